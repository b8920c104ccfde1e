//! Quadruple listing pane rendering

use crate::ir::constants::{OPERAND_WIDTH, OPERATOR_WIDTH};
use crate::ir::quadruple::{listing_header, Operand, Operator, Quadruple};
use crate::ui::panes::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn operator_style(quad: &Quadruple) -> Style {
    if quad.is_jump() || quad.op == Operator::Return {
        return Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD);
    }
    match quad.op {
        Operator::Label(_) => Style::default()
            .fg(DEFAULT_THEME.label)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.secondary),
    }
}

fn operand_style(operand: &Operand) -> Style {
    match operand {
        Operand::Label(_) => Style::default().fg(DEFAULT_THEME.label),
        Operand::Temp(_) => Style::default().fg(DEFAULT_THEME.temp),
        Operand::Name(_) | Operand::None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// One listing row, columns padded like the textual listing
fn quad_line(index: usize, quad: &Quadruple) -> Line<'static> {
    let sep = || Span::styled(" | ", Style::default().fg(DEFAULT_THEME.comment));
    Line::from(vec![
        Span::styled(format!("{:4} ", index), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{:<w$}", quad.op.to_string(), w = OPERATOR_WIDTH),
            operator_style(quad),
        ),
        sep(),
        Span::styled(
            format!("{:<w$}", quad.arg1.to_string(), w = OPERAND_WIDTH),
            operand_style(&quad.arg1),
        ),
        sep(),
        Span::styled(
            format!("{:<w$}", quad.arg2.to_string(), w = OPERAND_WIDTH),
            operand_style(&quad.arg2),
        ),
        sep(),
        Span::styled(quad.result.to_string(), operand_style(&quad.result)),
    ])
}

/// Render the quadruple listing below a fixed header row
pub fn render_quads_pane(
    frame: &mut Frame,
    area: Rect,
    quadruples: &[Quadruple],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Quadruples ({}) ", quadruples.len());
    let block = pane_block(&title, is_focused);

    if quadruples.is_empty() {
        let paragraph = Paragraph::new("(nothing to lower)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders (2) and the header row (1)
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    clamp_scroll(scroll_offset, quadruples.len(), visible_height);

    let header = Line::from(Span::styled(
        format!("     {}", listing_header()),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ));

    let mut lines = vec![header];
    lines.extend(
        quadruples
            .iter()
            .enumerate()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|(index, quad)| quad_line(index, quad)),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
