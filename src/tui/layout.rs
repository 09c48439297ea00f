use super::theme::{DIM, ERR_RED, OK_GREEN};
use crate::status::StatusIndicator;
use crate::workflow::{NoticeLevel, Notification};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// 状态栏高度
pub const STATUS_BAR_HEIGHT: u16 = 3;

/// 标准三段式布局：Header(3) + Content(弹性) + 状态栏(3)
pub fn main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area)
        .to_vec()
}

/// 渲染通用 header
pub fn render_header(f: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// 渲染状态栏：左侧提示 / 快捷键，右侧镜像指示器
pub fn render_status_bar(
    f: &mut Frame,
    hint: &str,
    notification: Option<&Notification>,
    indicator: &StatusIndicator,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let indicator_width = indicator.text().chars().count() as u16 * 2 + 2;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(indicator_width)])
        .split(inner.inner(Margin {
            horizontal: 1,
            vertical: 0,
        }));

    let left = match notification {
        Some(n) => {
            let color = match n.level {
                NoticeLevel::Info => OK_GREEN,
                NoticeLevel::Error => ERR_RED,
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", n.at.format("%H:%M:%S")),
                    Style::default().fg(DIM),
                ),
                Span::styled(n.message.clone(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::Green))),
    };
    f.render_widget(Paragraph::new(left), columns[0]);

    let right = Paragraph::new(indicator.text())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);
    f.render_widget(right, columns[1]);
}

/// 鼠标点击是否落在状态栏上
pub fn status_bar_hit(row: u16, term_height: u16) -> bool {
    row >= term_height.saturating_sub(STATUS_BAR_HEIGHT)
}

/// 渲染带边框的文本区域
pub fn render_scrollable_content(
    f: &mut Frame,
    title: &str,
    lines: &[String],
    scroll_offset: usize,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    f.render_widget(block, area);

    // 内部水平边距
    let padded = inner.inner(Margin {
        horizontal: 1,
        vertical: 0,
    });

    let visible_height = padded.height as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    let actual_scroll = scroll_offset.min(max_scroll);

    let visible_content: Vec<Line> = lines
        .iter()
        .skip(actual_scroll)
        .take(visible_height)
        .map(|line| Line::from(line.clone()))
        .collect();

    let paragraph = Paragraph::new(visible_content).wrap(Wrap { trim: false });
    f.render_widget(paragraph, padded);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bottom_rows_hit_status_bar() {
        assert!(status_bar_hit(39, 40));
        assert!(status_bar_hit(37, 40));
        assert!(!status_bar_hit(36, 40));
        assert!(!status_bar_hit(0, 40));
    }

    #[test]
    fn tiny_terminal_is_all_status_bar() {
        assert!(status_bar_hit(0, 2));
    }

    #[test]
    fn main_layout_reserves_header_and_status_bar() {
        let chunks = main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[2].height, STATUS_BAR_HEIGHT);
        assert_eq!(chunks[1].height, 18);
    }
}
