//! Main TUI application state and logic

use crate::ir::generator::QuadrupleGenerator;
use crate::ir::quadruple::Quadruple;
use crate::parser::ast::Node;
use crate::ui::panes::{self, status::StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp / PageDown
const PAGE_STEP: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
    Quads,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Quads,
            FocusedPane::Quads => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Quads,
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Quads => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    pub file_name: String,
    pub source_code: String,

    /// Simplified tree, pre-rendered one node per row
    pub tree_outline: Vec<String>,
    pub node_count: usize,

    pub quadruples: Vec<Quadruple>,
    pub temp_count: u32,
    pub label_count: u32,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,
    pub quads_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    /// Create the viewer over a finished pipeline run
    pub fn new(
        file_name: String,
        source_code: String,
        tree: &Node,
        generator: QuadrupleGenerator,
    ) -> Self {
        let temp_count = generator.temp_count();
        let label_count = generator.label_count();
        let quadruples = generator.into_quadruples();

        App {
            file_name,
            source_code,
            tree_outline: tree.outline(),
            node_count: tree.size(),
            quadruples,
            temp_count,
            label_count,
            focused_pane: FocusedPane::Quads,
            source_scroll: 0,
            tree_scroll: 0,
            quads_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        // Source | Tree | Quadruples
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Percentage(40),
            ])
            .split(main_chunks[0]);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            &self.tree_outline,
            self.node_count,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_quads_pane(
            frame,
            columns[2],
            &self.quadruples,
            self.focused_pane == FocusedPane::Quads,
            &mut self.quads_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                file_name: &self.file_name,
                temp_count: self.temp_count,
                label_count: self.label_count,
            },
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Quads => &mut self.quads_scroll,
        }
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            // Offsets only grow here; each pane clamps its own on render
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_STEP);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_STEP);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                *self.focused_scroll() = usize::MAX;
            }
            _ => {}
        }
    }
}
