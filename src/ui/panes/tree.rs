//! Syntax tree pane rendering

use crate::parser::lexer::KEYWORDS;
use crate::ui::panes::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn tag_style(tag: &str) -> Style {
    match tag {
        "sequence" | "block" | ";" => Style::default()
            .fg(DEFAULT_THEME.structure)
            .add_modifier(Modifier::ITALIC),
        _ if KEYWORDS.contains(&tag) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if tag.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if tag.starts_with(|c: char| c.is_alphabetic()) => Style::default().fg(DEFAULT_THEME.fg),
        _ => Style::default().fg(DEFAULT_THEME.secondary),
    }
}

/// Split an outline row into its indentation and its styled tag.
fn outline_line(row: &str) -> Line<'_> {
    let tag = row.trim_start();
    let indent = &row[..row.len() - tag.len()];
    Line::from(vec![
        Span::styled(indent, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(tag, tag_style(tag)),
    ])
}

/// Render the simplified tree, one node per row
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    node_count: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Tree ({} nodes) ", node_count);
    let block = pane_block(&title, is_focused);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, outline.len(), visible_height);

    let visible_lines: Vec<Line> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|row| outline_line(row))
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
