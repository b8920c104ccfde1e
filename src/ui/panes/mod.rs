//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with line numbers and keyword highlighting
//! - [`tree`]: Simplified syntax tree, one node per line
//! - [`quads`]: Quadruple listing with labels and temporaries highlighted
//! - [`status`]: Status bar with keybindings and pipeline totals
//!
//! Each pane module exports a `render_*` function. Panes take the scroll
//! offset of their own content by `&mut` and clamp it to what fits.

pub mod quads;
pub mod source;
pub mod status;
pub mod tree;

pub use quads::render_quads_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane frame, highlighted when focused
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so the last page of `total` rows stays filled.
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible_height: usize) {
    if total > visible_height {
        *offset = (*offset).min(total - visible_height);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = 50;
        clamp_scroll(&mut offset, 30, 10);
        assert_eq!(offset, 20);

        let mut offset = 3;
        clamp_scroll(&mut offset, 5, 10);
        assert_eq!(offset, 0);

        let mut offset = 4;
        clamp_scroll(&mut offset, 30, 10);
        assert_eq!(offset, 4);
    }
}
