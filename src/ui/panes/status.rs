//! Status bar rendering with keybindings and pipeline totals

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Totals shown on the left of the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub file_name: &'a str,
    pub temp_count: u32,
    pub label_count: u32,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);

    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.file_name),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", sep_style),
        Span::styled(
            format!("{} temps, {} labels", data.temp_count, data.label_count),
            bar_style.fg(DEFAULT_THEME.fg),
        ),
        Span::styled(" | ", sep_style),
        Span::styled(format!("{} ", data.message), bar_style.fg(DEFAULT_THEME.fg)),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar_style)
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);

    let right_spans = vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar_style)
            .alignment(Alignment::Right),
        layout[1],
    );
}
