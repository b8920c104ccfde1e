//! Source code pane rendering with keyword highlighting
//!
//! The pane uses a simple character-by-character pass per line to apply
//! styles without re-running the lexer. Block comments that span several
//! lines are only recognised on the line where they start.

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

fn highlight_source_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, ch)| ch);

        if c == '/' && matches!(next, Some('/') | Some('*')) {
            flush_word(&mut spans, &mut current_word);
            spans.push(Span::styled(
                &line[byte..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c.is_alphanumeric() || c == '_' || (c == '.' && !current_word.is_empty()) {
            current_word.push(c);
            i += 1;
            continue;
        }

        flush_word(&mut spans, &mut current_word);
        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            '!' | '&' | '|' | '@' | '#' | '$' | '?' | '"' | '\'' => {
                Style::default().fg(DEFAULT_THEME.error)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    flush_word(&mut spans, &mut current_word);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let style = word_style(word);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn word_style(word: &str) -> Style {
    if KEYWORDS.contains(&word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if word.starts_with(|c: char| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let number = Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            );
            let mut spans = vec![number];
            spans.extend(highlight_source_line(line).spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
