pub mod test_helpers {
    use crate::event_source::{Event, KeyCode, SimulatedEventSource};
    use crate::export::{AuthorError, DocumentAuthor, ExportBlock};
    use crate::extractor::{ExtractError, TextExtractor};
    use crate::main_app::{App, AppConfig};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    /// Builder for creating test scenarios with simulated user input
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl Default for TestScenarioBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        pub fn press_code(mut self, code: KeyCode) -> Self {
            self.events.push(SimulatedEventSource::code_key(code));
            self
        }

        pub fn press_enter(self) -> Self {
            self.press_code(KeyCode::Enter)
        }

        pub fn press_tab(self) -> Self {
            self.press_code(KeyCode::Tab)
        }

        pub fn press_esc(self) -> Self {
            self.press_code(KeyCode::Esc)
        }

        /// Move the cursor down n times (press 'j' n times)
        pub fn navigate_down(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('j'));
            }
            self
        }

        /// Move the cursor up n times (press 'k' n times)
        pub fn navigate_up(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('k'));
            }
            self
        }

        /// Select answer option `n` (1-based) of the current question
        pub fn answer(self, n: u32) -> Self {
            match char::from_digit(n, 10) {
                Some(c) if c != '0' => self.press_char(c),
                _ => self,
            }
        }

        /// Go to the next question (press 'l')
        pub fn next_question(self) -> Self {
            self.press_char('l')
        }

        /// Go to the previous question (press 'h')
        pub fn prev_question(self) -> Self {
            self.press_char('h')
        }

        pub fn next_page(self) -> Self {
            self.press_char(']')
        }

        pub fn prev_page(self) -> Self {
            self.press_char('[')
        }

        pub fn export(self) -> Self {
            self.press_char('e')
        }

        pub fn click(mut self, column: u16, row: u16) -> Self {
            self.events
                .push(SimulatedEventSource::left_click(column, row));
            self
        }

        /// Quit the application (press 'q')
        pub fn quit(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('q'));
            self
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Create a test terminal for snapshot testing
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    /// Screen position of the first occurrence of `needle`, as (column, row).
    pub fn find_on_screen(terminal: &Terminal<TestBackend>, needle: &str) -> Option<(u16, u16)> {
        let buffer = terminal.backend().buffer();
        for y in 0..buffer.area.height {
            let cells: Vec<&str> = (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            let line: String = cells.concat();
            if let Some(byte_offset) = line.find(needle) {
                let mut consumed = 0;
                for (x, symbol) in cells.iter().enumerate() {
                    if consumed == byte_offset {
                        return Some((x as u16, y));
                    }
                    consumed += symbol.len();
                }
            }
        }
        None
    }

    /// Serves document text from memory, keyed by path.
    #[derive(Default)]
    pub struct StaticTextExtractor {
        texts: HashMap<PathBuf, String>,
    }

    impl StaticTextExtractor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
            self.texts.insert(path.into(), text.into());
            self
        }
    }

    impl TextExtractor for StaticTextExtractor {
        fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
            self.texts
                .get(path)
                .cloned()
                .ok_or_else(|| ExtractError::invalid(format!("cannot read {}", path.display())))
        }
    }

    /// A writer that always fails, for export error paths.
    pub struct FailingAuthor;

    impl DocumentAuthor for FailingAuthor {
        fn extension(&self) -> &'static str {
            "docx"
        }

        fn author(&self, _blocks: &[ExportBlock]) -> Result<Vec<u8>, AuthorError> {
            Err(AuthorError::Io(std::io::Error::other("writer broke")))
        }
    }

    /// Config rooted in `dir` for both documents and exports, with no
    /// auto-advance delay so scenarios stay deterministic.
    pub fn test_config(dir: &Path) -> AppConfig {
        AppConfig {
            document_directory: dir.to_path_buf(),
            export_dir: dir.to_path_buf(),
            export_file_name: "answers.docx".to_string(),
            advance_delay: Duration::ZERO,
        }
    }

    /// App over `dir` using the real .docx/.txt readers and writer.
    pub fn create_test_app(dir: &Path) -> App {
        App::new_with_config(test_config(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = TestScenarioBuilder::new()
            .navigate_down(2)
            .press_enter()
            .answer(2)
            .answer(0)
            .press_tab()
            .click(1, 1)
            .quit()
            .build();

        // '0' is not an option key, so it is skipped
        assert_eq!(scenario.remaining(), 7);
    }

    #[test]
    fn find_on_screen_reports_cell_position() {
        let mut terminal = create_test_terminal(20, 3);
        terminal
            .draw(|f| {
                f.render_widget(ratatui::widgets::Paragraph::new("\n  ◀ 12 ▶"), f.area());
            })
            .unwrap();

        assert_eq!(find_on_screen(&terminal, "12"), Some((4, 1)));
        assert_eq!(find_on_screen(&terminal, "▶"), Some((7, 1)));
        assert_eq!(find_on_screen(&terminal, "missing"), None);
    }
}
