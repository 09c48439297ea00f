//! 包管理器 / 镜像源选择框

use super::layout;
use super::state::App;
use super::theme::{BLUE, BRIGHT_WHITE, DIM, PINK, SEL_BG};
use crate::package_manager::{PackageManager, REGISTRY_OPTIONS};
use crate::store::PreferenceStore;
use crate::workflow::{Selection, Step, SwitchPhase, SwitchRequest};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// 处理选择框按键。选中镜像源后返回待执行的切换。
pub fn handle_picker_key<S: PreferenceStore>(
    key: KeyEvent,
    app: &mut App<S>,
) -> Option<SwitchRequest> {
    let len = app.picker_len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(cursor) = app.picker_cursor_mut() {
                *cursor = cursor.saturating_sub(1);
            }
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(cursor) = app.picker_cursor_mut() {
                if *cursor + 1 < len {
                    *cursor += 1;
                }
            }
            None
        }
        // 数字键直接选中
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if idx >= len {
                return None;
            }
            if let Some(cursor) = app.picker_cursor_mut() {
                *cursor = idx;
            }
            confirm(app)
        }
        KeyCode::Enter => confirm(app),
        KeyCode::Esc | KeyCode::Char('q') => {
            cancel(app);
            None
        }
        _ => None,
    }
}

fn confirm<S: PreferenceStore>(app: &mut App<S>) -> Option<SwitchRequest> {
    let step = match app.workflow.phase() {
        SwitchPhase::PickingManager => {
            let manager = PackageManager::ALL[app.manager_selected];
            app.workflow.choose_manager(Selection::Selected(manager))
        }
        SwitchPhase::PickingRegistry(_) => {
            let option = REGISTRY_OPTIONS[app.registry_selected];
            app.workflow.choose_registry(Selection::Selected(option))
        }
        _ => Step::Continue,
    };
    match step {
        Step::Execute(request) => Some(request),
        _ => None,
    }
}

fn cancel<S: PreferenceStore>(app: &mut App<S>) {
    match app.workflow.phase() {
        SwitchPhase::PickingManager => {
            app.workflow.choose_manager(Selection::Cancelled);
        }
        SwitchPhase::PickingRegistry(_) => {
            app.workflow.choose_registry(Selection::Cancelled);
        }
        _ => {}
    }
}

/// 渲染当前选择框
pub fn render_picker<S: PreferenceStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (title, items, selected): (String, Vec<(String, String)>, usize) = match app.workflow.phase() {
        SwitchPhase::PickingManager => (
            "请选择包管理器".to_string(),
            PackageManager::ALL
                .iter()
                .map(|pm| (pm.name().to_string(), String::new()))
                .collect(),
            app.manager_selected,
        ),
        SwitchPhase::PickingRegistry(manager) => (
            format!("选择镜像源（{manager}）"),
            REGISTRY_OPTIONS
                .iter()
                .map(|opt| (opt.label.to_string(), opt.url.to_string()))
                .collect(),
            app.registry_selected,
        ),
        _ => return,
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let padded = inner.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, (label, detail))| item_line(i, label, detail, i == selected))
        .collect();

    f.render_widget(Paragraph::new(lines), padded);
}

/// 选择项: " 1  label  detail"
fn item_line(idx: usize, label: &str, detail: &str, selected: bool) -> Line<'static> {
    let (marker, label_style, bg) = if selected {
        (
            "▶",
            Style::default().fg(PINK).add_modifier(Modifier::BOLD),
            SEL_BG,
        )
    } else {
        (" ", Style::default().fg(BRIGHT_WHITE), Color::Reset)
    };
    let mut spans = vec![
        Span::styled(format!("{marker} "), Style::default().fg(PINK)),
        Span::styled(format!("{}  ", idx + 1), Style::default().fg(DIM)),
        Span::styled(label.to_string(), label_style),
    ];
    if !detail.is_empty() {
        spans.push(Span::styled(
            format!("  {detail}"),
            Style::default().fg(BLUE),
        ));
    }
    Line::from(spans).style(Style::default().bg(bg))
}

/// 执行中的提示
pub fn render_executing(f: &mut Frame, request: &SwitchRequest, area: Rect) {
    let lines = vec![
        format!("正在切换 {} 的镜像源...", request.manager),
        String::new(),
        format!("$ {}", request.command),
    ];
    layout::render_scrollable_content(f, "执行中", &lines, 0, area);
}
