use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::document_library::{DocumentFormat, DocumentLibrary};
use crate::theme::current_theme;

/// Cursor and scroll state of the file chooser.
#[derive(Debug, Default, Clone)]
pub struct DocumentPicker {
    cursor: usize,
    scroll_offset: usize,
    /// Screen rows of the visible entries, paired with library indices.
    item_areas: Vec<(usize, Rect)>,
}

impl DocumentPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Library index under a screen position, if any entry was drawn there.
    pub fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        self.item_areas
            .iter()
            .find(|(_, area)| {
                row == area.y && column >= area.x && column < area.right()
            })
            .map(|(index, _)| *index)
    }

    fn keep_cursor_visible(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.cursor + 1 - visible_rows;
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, library: &DocumentLibrary) {
        let palette = current_theme();
        let (text_color, border_color, bg_color) = palette.get_panel_colors(true);
        let (selection_bg, selection_fg) = palette.get_selection_colors(true);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let title = format!(" Choose a quiz document ({}) ", library.directory().display());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(bg_color));
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        self.item_areas.clear();
        self.set_cursor(self.cursor, library.len());

        if library.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No .docx or .txt files in this directory",
                Style::default().fg(palette.base_03),
            )));
            f.render_widget(empty, inner);
        } else {
            let visible_rows = inner.height as usize;
            self.keep_cursor_visible(visible_rows);

            let mut lines = Vec::with_capacity(visible_rows);
            for (row, (index, doc)) in library
                .documents()
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(visible_rows)
                .enumerate()
            {
                let marker = match doc.format {
                    DocumentFormat::Docx => "docx",
                    DocumentFormat::PlainText => "txt ",
                };
                let style = if index == self.cursor {
                    Style::default()
                        .fg(selection_fg)
                        .bg(selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(text_color)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!(" {marker} "), Style::default().fg(palette.base_0c)),
                    Span::styled(format!(" {} ", doc.display_name), style),
                ]));
                self.item_areas
                    .push((index, Rect::new(inner.x, inner.y + row as u16, inner.width, 1)));
            }
            f.render_widget(Paragraph::new(lines), inner);
        }

        let help = Paragraph::new(Line::from(Span::styled(
            " j/k: Move | Enter: Open | r: Refresh | Esc: Back | ?: Help | q: Quit",
            Style::default().fg(palette.base_03),
        )));
        f.render_widget(help, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_clamped_to_list() {
        let mut picker = DocumentPicker::new();
        picker.move_up();
        assert_eq!(picker.cursor(), 0);

        picker.move_down(3);
        picker.move_down(3);
        picker.move_down(3);
        assert_eq!(picker.cursor(), 2);

        picker.set_cursor(10, 2);
        assert_eq!(picker.cursor(), 1);
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut picker = DocumentPicker::new();
        picker.set_cursor(7, 10);
        picker.keep_cursor_visible(3);
        assert_eq!(picker.scroll_offset, 5);

        picker.set_cursor(1, 10);
        picker.keep_cursor_visible(3);
        assert_eq!(picker.scroll_offset, 1);
    }
}
