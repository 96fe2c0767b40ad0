//! Terminal rendering and key handling for the command palette.
//!
//! The view owns the query text input and translates key presses into
//! palette operations:
//! - Esc dismisses, Enter confirms
//! - Up/Down, Tab/Shift+Tab, Ctrl+P/N and Ctrl+K/J move the highlight
//! - PageUp/PageDown move by a page
//! - anything else edits the query

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::{TextInput, Theme};
use crate::palette::{CommandPalette, ResultEntry};

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Outcomes the host cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// A command was executed.
    Executed(String),
    /// The palette was dismissed.
    Cancelled,
}

/// Palette overlay for the terminal host.
#[derive(Debug, Default)]
pub struct PaletteView {
    /// Text input for the search query.
    input: TextInput,
}

impl PaletteView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the palette with a fresh query.
    pub fn open(&mut self, palette: &mut CommandPalette) {
        self.input.clear();
        palette.open();
    }

    /// Get the current query text.
    pub fn query(&self) -> &str {
        self.input.value()
    }

    /// Handle keyboard input while the palette is open.
    ///
    /// Returns an action when the palette closed.
    pub fn handle_input(
        &mut self,
        palette: &mut CommandPalette,
        key: KeyEvent,
    ) -> Option<PaletteAction> {
        if !palette.is_open() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                palette.dismiss();
                self.input.clear();
                Some(PaletteAction::Cancelled)
            }

            (KeyCode::Enter, _) => {
                let id = palette.confirm()?;
                self.input.clear();
                Some(PaletteAction::Executed(id))
            }

            (KeyCode::Down, KeyModifiers::NONE)
            | (KeyCode::Tab, KeyModifiers::NONE)
            | (KeyCode::Char('j'), KeyModifiers::CONTROL)
            | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                palette.move_highlight(1);
                None
            }

            (KeyCode::Up, KeyModifiers::NONE)
            | (KeyCode::BackTab, _)
            | (KeyCode::Char('k'), KeyModifiers::CONTROL)
            | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                palette.move_highlight(-1);
                None
            }

            (KeyCode::PageDown, _) => {
                palette.move_highlight(PAGE_STEP);
                None
            }

            (KeyCode::PageUp, _) => {
                palette.move_highlight(-PAGE_STEP);
                None
            }

            _ => {
                if self.input.handle_input(key) {
                    palette.type_query(self.input.value());
                }
                None
            }
        }
    }

    /// Render the palette overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &CommandPalette, theme: &Theme) {
        if !palette.is_open() {
            return;
        }

        // Centered, ~70 chars wide, in the upper third
        let width = 70.min(area.width.saturating_sub(4));
        let height = 16.min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + area.height / 6;
        let palette_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, palette_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().fg(theme.fg).bg(theme.bg))
            .title(" Command Palette ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(palette_area);
        frame.render_widget(block, palette_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Search input
                Constraint::Length(1), // Separator
                Constraint::Min(1),    // Results list
            ])
            .split(inner);

        self.render_search(frame, chunks[0], theme);

        let separator = Paragraph::new(Line::from(Span::styled(
            "─".repeat(chunks[1].width as usize),
            Style::default().fg(theme.muted),
        )));
        frame.render_widget(separator, chunks[1]);

        self.render_results(frame, chunks[2], palette, theme);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let query = self.input.value();
        let display = if query.is_empty() {
            Line::from(Span::styled(
                "Type to search commands...",
                Style::default().fg(theme.muted),
            ))
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme.accent)),
                Span::raw(query),
            ])
        };
        frame.render_widget(Paragraph::new(display), area);

        let cursor_x = if query.is_empty() {
            area.x
        } else {
            area.x + 2 + self.input.cursor() as u16
        };
        if cursor_x < area.x + area.width {
            frame.set_cursor_position(Position::new(cursor_x, area.y));
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, palette: &CommandPalette, theme: &Theme) {
        let entries = palette.entries();
        if entries.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No matching commands",
                Style::default().fg(theme.muted),
            )));
            frame.render_widget(empty, area);
            return;
        }

        let visible_count = area.height as usize;
        let selected = palette.highlight().unwrap_or(0);

        // Keep the highlighted row on screen
        let scroll_offset = if selected >= visible_count {
            selected - visible_count + 1
        } else {
            0
        };

        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_count)
            .map(|(idx, entry)| {
                render_entry(entry, palette.highlight() == Some(idx), area.width as usize, theme)
            })
            .collect();

        frame.render_widget(List::new(items), area);
    }
}

fn render_entry<'a>(
    entry: &ResultEntry<'a>,
    is_selected: bool,
    width: usize,
    theme: &Theme,
) -> ListItem<'a> {
    let style = if is_selected {
        Style::default().bg(theme.highlight_bg)
    } else {
        Style::default()
    };

    let mut spans = Vec::new();

    if is_selected {
        spans.push(Span::styled("> ", Style::default().fg(theme.accent)));
    } else {
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(entry.label, style.add_modifier(Modifier::BOLD)));

    let badge = if entry.recent { "Recent" } else { entry.category };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("[{}]", badge),
        Style::default().fg(theme.accent),
    ));

    let hint = entry.key_binding.map(|k| format!(" {}", k)).unwrap_or_default();
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let mut room = width.saturating_sub(used + hint.chars().count() + 1);

    if let Some(description) = entry.description {
        if room > 4 {
            let text: String = format!(" {}", description).chars().take(room).collect();
            room -= text.chars().count();
            spans.push(Span::styled(text, Style::default().fg(theme.muted)));
        }
    }

    if !hint.is_empty() {
        if room > 0 {
            spans.push(Span::raw(" ".repeat(room)));
        }
        spans.push(Span::styled(hint, Style::default().fg(theme.muted)));
    }

    ListItem::new(Line::from(spans)).style(style)
}
