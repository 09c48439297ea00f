mod dashboard;
mod layout;
mod picker;
pub mod state;
mod theme;

use crate::package_manager::{current_registry, CommandRunner};
use crate::store::PreferenceStore;
use crate::workflow::{self, SwitchPhase, SwitchRequest, Workflow};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use state::{App, AppEvent};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run<S: PreferenceStore>(
    workflow: Workflow<S>,
    runner: Arc<dyn CommandRunner>,
) -> Result<()> {
    // 终端初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(workflow);
    let (tx, mut rx) = mpsc::channel(32);

    // 启动时异步读取当前 registry，不阻塞状态栏显示
    let tx_clone = tx.clone();
    let detect_runner = runner.clone();
    tokio::spawn(async move {
        let registry = current_registry(detect_runner).await;
        let _ = tx_clone.send(AppEvent::RegistryDetected(registry)).await;
    });

    let result = event_loop(&mut terminal, &mut app, &runner, &tx, &mut rx);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<S: PreferenceStore>(
    terminal: &mut Term,
    app: &mut App<S>,
    runner: &Arc<dyn CommandRunner>,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(request) = handle_key(key, app) {
                        spawn_switch(request, runner.clone(), tx.clone());
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let height = terminal.size()?.height;
                    if layout::status_bar_hit(mouse.row, height) && !app.is_picking() {
                        app.start_switch();
                    }
                }
                _ => {}
            }
        }

        // 处理异步事件
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// 处理按键，返回需要执行的切换
fn handle_key<S: PreferenceStore>(key: KeyEvent, app: &mut App<S>) -> Option<SwitchRequest> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }
    if app.is_picking() {
        return picker::handle_picker_key(key, app);
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('s') | KeyCode::Enter => app.start_switch(),
        _ => {}
    }
    None
}

/// 在后台执行切换命令，结果通过 channel 送回主循环
fn spawn_switch(request: SwitchRequest, runner: Arc<dyn CommandRunner>, tx: mpsc::Sender<AppEvent>) {
    log::info!("执行: {}", request.command);
    tokio::spawn(async move {
        let result = workflow::execute(runner, &request).await;
        let _ = tx.send(AppEvent::SwitchFinished { request, result }).await;
    });
}

fn ui<S: PreferenceStore>(f: &mut Frame, app: &App<S>) {
    let chunks = layout::main_layout(f.area());
    layout::render_header(f, "☁  包管理器镜像切换", chunks[0]);

    let hint = match app.workflow.phase() {
        SwitchPhase::Idle => {
            dashboard::render_dashboard(f, app, chunks[1]);
            "s 切换镜像 | q 退出"
        }
        SwitchPhase::PickingManager | SwitchPhase::PickingRegistry(_) => {
            picker::render_picker(f, app, chunks[1]);
            "↑↓ 选择 | Enter 确认 | 1-9 快速选择 | Esc 取消"
        }
        SwitchPhase::Executing(request) => {
            picker::render_executing(f, request, chunks[1]);
            "s 重新切换 | q 退出"
        }
    };

    layout::render_status_bar(
        f,
        hint,
        app.visible_notification(),
        app.workflow.status(),
        chunks[2],
    );
}
