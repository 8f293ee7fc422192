use crate::event_source::{KeyCode, KeyEvent};
use crate::theme::current_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

const HELP_TEXT: &str = include_str!("../../readme.txt");

pub enum HelpPopupAction {
    Close,
}

/// Key binding reference drawn over the current screen.
pub struct HelpPopup {
    lines: Vec<&'static str>,
    scroll_offset: usize,
}

impl HelpPopup {
    pub fn new() -> Self {
        HelpPopup {
            lines: HELP_TEXT.lines().collect(),
            scroll_offset: 0,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn last_offset(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Unindented lines are section titles.
    fn is_heading(line: &str) -> bool {
        !line.is_empty() && !line.starts_with(' ')
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let palette = current_theme();
        let widest = self
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(60);
        // two columns of margin on each side plus the borders
        let width = (widest as u16 + 6).min(area.width);
        let height = (self.lines.len() as u16 + 2).min(area.height.saturating_sub(2));

        let [popup_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [popup_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(popup_area);

        f.render_widget(Clear, popup_area);

        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .map(|line| {
                let style = if Self::is_heading(line) {
                    Style::default()
                        .fg(palette.base_0d)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.base_05)
                };
                Line::styled(format!("  {line}"), style)
            })
            .collect();

        let position = format!(" {}/{} ", self.scroll_offset + 1, self.lines.len().max(1));
        let help = Paragraph::new(lines).block(
            Block::default()
                .title(" Help - Press ? or ESC to close ")
                .title_bottom(Line::from(position).right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.base_0c))
                .style(Style::default().bg(palette.base_00)),
        );
        f.render_widget(help, popup_area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<HelpPopupAction> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.last_offset());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.scroll_offset = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll_offset = self.last_offset(),
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                return Some(HelpPopupAction::Close);
            }
            _ => {}
        }
        None
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn scrolling_stays_within_content() {
        let mut popup = HelpPopup::new();
        assert!(popup.handle_key(key(KeyCode::Char('k'))).is_none());
        assert_eq!(popup.scroll_offset(), 0);

        popup.handle_key(key(KeyCode::Char('j')));
        assert_eq!(popup.scroll_offset(), 1);

        popup.handle_key(key(KeyCode::Char('G')));
        assert_eq!(popup.scroll_offset(), popup.last_offset());
        popup.handle_key(key(KeyCode::Down));
        assert_eq!(popup.scroll_offset(), popup.last_offset());

        popup.handle_key(key(KeyCode::Char('g')));
        assert_eq!(popup.scroll_offset(), 0);
    }

    #[test]
    fn escape_closes() {
        let mut popup = HelpPopup::new();
        assert!(matches!(
            popup.handle_key(key(KeyCode::Esc)),
            Some(HelpPopupAction::Close)
        ));
    }

    #[test]
    fn headings_are_detected() {
        assert!(HelpPopup::is_heading("Answering"));
        assert!(!HelpPopup::is_heading("  j / k           move"));
        assert!(!HelpPopup::is_heading(""));
    }

    #[test]
    fn renders_key_bindings() {
        let popup = HelpPopup::new();
        let mut terminal = Terminal::new(TestBackend::new(90, 50)).unwrap();
        terminal.draw(|f| popup.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Tab"));
        assert!(screen.contains("export the chosen answers"));
    }
}
