//! Pure projection of a [`QuizState`] into what the quiz screen shows.
//!
//! Widgets never read the state directly; they draw a `QuizView` built fresh
//! for every frame, so marker and option highlighting can't go stale.

use crate::pagination;
use crate::quiz_state::QuizState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerView {
    pub index: usize,
    /// One-based label shown in the strip.
    pub number: usize,
    pub is_current: bool,
    pub is_answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub question_number: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub markers: Vec<MarkerView>,
    pub nav_page: usize,
    pub total_pages: usize,
    pub show_previous_page: bool,
    pub show_next_page: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub answered: usize,
    pub complete: bool,
}

impl QuizView {
    pub fn project(state: &QuizState) -> Self {
        let current = state.current_index();
        let question = state.current_question();
        let selection = state.selection(current);

        let options = question
            .options
            .iter()
            .map(|text| OptionView {
                text: text.clone(),
                selected: selection == Some(text.as_str()),
            })
            .collect();

        let markers = pagination::page_range(state.nav_page(), state.len())
            .map(|index| MarkerView {
                index,
                number: index + 1,
                is_current: index == current,
                is_answered: state.selection(index).is_some(),
            })
            .collect();

        Self {
            question_number: current + 1,
            total_questions: state.len(),
            prompt: question.prompt.clone(),
            options,
            markers,
            nav_page: state.nav_page(),
            total_pages: state.total_pages(),
            show_previous_page: pagination::has_previous_page(state.nav_page()),
            show_next_page: pagination::has_next_page(state.nav_page(), state.len()),
            can_go_previous: state.has_previous(),
            can_go_next: state.has_next(),
            answered: state.answered_count(),
            complete: state.is_complete(),
        }
    }

    pub fn progress_label(&self) -> String {
        let label = format!("Answered: {} / {}", self.answered, self.total_questions);
        if self.complete {
            format!("{label} ✓")
        } else {
            label
        }
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.options.iter().position(|option| option.selected)
    }
}
