use log::debug;

use crate::parsing::line_classifier::{LineKind, classify_line};
use crate::question::Question;

/// Turns raw extracted document text into question records.
///
/// Lines are trimmed and blank ones dropped. A question line seals the
/// previously open question and opens a new one; option lines attach to the
/// open question. Options seen before the first question, and any line the
/// classifier does not recognise, are discarded.
///
/// An empty result is not an error here; callers decide how to report it.
pub fn parse_questions(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut open: Option<Question> = None;
    let mut discarded = 0usize;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match classify_line(line) {
            LineKind::QuestionStart(prompt) => {
                if let Some(done) = open.replace(Question::new(prompt)) {
                    questions.push(done);
                }
            }
            LineKind::AnswerOption(option) => match open.as_mut() {
                Some(question) => question.options.push(option.to_string()),
                None => discarded += 1,
            },
            LineKind::Unrecognized => discarded += 1,
        }
    }

    if let Some(done) = open {
        questions.push(done);
    }

    debug!(
        "Parsed {} questions, discarded {} lines",
        questions.len(),
        discarded
    );
    questions
}
