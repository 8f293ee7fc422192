use regex::Regex;
use std::sync::LazyLock;

static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s(.+)").expect("question pattern is valid"));

static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]\)\s(.+)").expect("answer pattern is valid"));

/// What a single trimmed, non-empty line of extracted text represents.
///
/// Both recognised variants borrow the *whole* line: a question keeps its
/// number ("12. ...") and an option keeps its label ("c) ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    QuestionStart(&'a str),
    AnswerOption(&'a str),
    Unrecognized,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    if QUESTION_LINE.is_match(line) {
        LineKind::QuestionStart(line)
    } else if ANSWER_LINE.is_match(line) {
        LineKind::AnswerOption(line)
    } else {
        LineKind::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_line_starts_a_question() {
        assert_eq!(
            classify_line("1. What is 2+2?"),
            LineKind::QuestionStart("1. What is 2+2?")
        );
        assert_eq!(
            classify_line("120. Last one"),
            LineKind::QuestionStart("120. Last one")
        );
    }

    #[test]
    fn lettered_line_is_an_option_in_either_case() {
        assert_eq!(classify_line("a) 3"), LineKind::AnswerOption("a) 3"));
        assert_eq!(classify_line("D) None"), LineKind::AnswerOption("D) None"));
    }

    #[test]
    fn near_misses_are_unrecognized() {
        // no space after the delimiter
        assert_eq!(classify_line("1.What"), LineKind::Unrecognized);
        assert_eq!(classify_line("a)3"), LineKind::Unrecognized);
        // nothing after the space
        assert_eq!(classify_line("1. "), LineKind::Unrecognized);
        assert_eq!(classify_line("b) "), LineKind::Unrecognized);
        // two letters or wrong delimiter
        assert_eq!(classify_line("ab) text"), LineKind::Unrecognized);
        assert_eq!(classify_line("a. text"), LineKind::Unrecognized);
        assert_eq!(classify_line("1) text"), LineKind::Unrecognized);
        assert_eq!(classify_line("Chapter one"), LineKind::Unrecognized);
    }

    #[test]
    fn non_ascii_letter_is_not_an_option_label() {
        assert_eq!(classify_line("đ) Sai"), LineKind::Unrecognized);
    }
}
