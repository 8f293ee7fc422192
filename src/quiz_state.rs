use log::{debug, trace};
use thiserror::Error;

use crate::pagination::{self, PageDirection};
use crate::question::Question;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("question index {index} is out of range (quiz has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Everything a loaded quiz session knows: the questions, what the user picked
/// for each of them, which question is active and which marker page is shown.
///
/// A `QuizState` is only ever built from a non-empty question list, so
/// `current_index` always points at a real question. Loading another document
/// replaces the whole value.
#[derive(Debug, Clone)]
pub struct QuizState {
    questions: Vec<Question>,
    selections: Vec<Option<String>>,
    current_index: usize,
    nav_page: usize,
}

impl QuizState {
    /// Returns `None` for an empty question list.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let selections = vec![None; questions.len()];
        Some(Self {
            questions,
            selections,
            current_index: 0,
            nav_page: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selections(&self) -> &[Option<String>] {
        &self.selections
    }

    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(index).and_then(|s| s.as_deref())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn nav_page(&self) -> usize {
        self.nav_page
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.len())
    }

    /// Always counted from `selections`, never cached.
    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.len()
    }

    fn check_index(&self, index: usize) -> Result<(), QuizError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(QuizError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    /// Records `answer` for question `index`, replacing any earlier pick.
    ///
    /// The text is not checked against the question's options.
    pub fn select_answer(
        &mut self,
        index: usize,
        answer: impl Into<String>,
    ) -> Result<(), QuizError> {
        self.check_index(index)?;
        let answer = answer.into();
        debug!("Question {} answered with {:?}", index + 1, answer);
        self.selections[index] = Some(answer);
        Ok(())
    }

    /// Makes `index` the active question and flips the marker strip to the
    /// page that contains it.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.check_index(index)?;
        self.current_index = index;
        self.nav_page = pagination::page_of(index);
        trace!("Moved to question {}", index + 1);
        Ok(())
    }

    /// Returns false at the first question.
    pub fn previous(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index).is_ok(),
            None => false,
        }
    }

    /// Returns false at the last question.
    pub fn next(&mut self) -> bool {
        let index = self.current_index + 1;
        index < self.len() && self.go_to(index).is_ok()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.len()
    }

    /// The delayed step that follows a selection on question `answered`.
    ///
    /// Moves to the following question if there is one and the user is still
    /// on `answered`; otherwise nothing happens.
    pub fn advance_after_selection(&mut self, answered: usize) -> bool {
        if self.current_index != answered {
            debug!(
                "Skipping auto-advance from {}: user is on {}",
                answered + 1,
                self.current_index + 1
            );
            return false;
        }
        self.next()
    }

    /// Scrolls the marker strip one page; the active question is unchanged.
    pub fn change_nav_page(&mut self, direction: PageDirection) -> bool {
        match pagination::step(self.nav_page, direction, self.len()) {
            Some(page) => {
                self.nav_page = page;
                true
            }
            None => false,
        }
    }
}
