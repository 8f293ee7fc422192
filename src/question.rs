use serde::Serialize;

/// A single multiple-choice question as it appeared in the source document.
///
/// `prompt` is the whole question line, number included ("3. Which ..."), and
/// every option keeps its label ("b) ..."). Both are trimmed copies of the
/// source lines, nothing else is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_keep_their_labels() {
        let question = Question::with_options("1. Pick one", ["a) 3", "b) 4"]);
        assert_eq!(question.options, vec!["a) 3", "b) 4"]);
        assert_eq!(question.option_count(), 2);
    }
}
