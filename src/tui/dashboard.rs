use super::state::App;
use super::theme::{BLUE, DIM};
use crate::package_manager::REGISTRY_OPTIONS;
use crate::store::PreferenceStore;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_dashboard<S: PreferenceStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(block, area);

    let status = app.workflow.status();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_title("── 当前镜像 ──"));
    lines.push(Line::from(""));
    lines.push(info_line("状态  ", status.text()));
    lines.push(info_line("详情  ", status.tooltip()));

    lines.push(Line::from(""));
    lines.push(Line::from(""));

    lines.push(section_title("── 可选镜像 ──"));
    lines.push(Line::from(""));
    for opt in REGISTRY_OPTIONS.iter() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", opt.label),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(opt.url, Style::default().fg(BLUE)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));

    lines.push(section_title("── 快捷键 ──"));
    lines.push(Line::from(""));
    lines.push(shortcut_line("s", " 切换镜像（也可点击状态栏）"));
    lines.push(shortcut_line("q", " 退出                     "));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        format!("lian-mirror v{}  ", env!("CARGO_PKG_VERSION")),
        Style::default().fg(DIM),
    )]));

    // 垂直居中
    let content_height = lines.len() as u16;
    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(content_height),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertical[1],
    );
}

fn section_title(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )])
}

/// 信息行: "标签: 值"
fn info_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

/// 快捷键行: "  X  描述"
fn shortcut_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
