use crate::quiz_state::QuizState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Question,
    Answer,
    Separator,
}

/// One line of the exported document, independent of the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlock {
    pub kind: BlockKind,
    pub text: String,
    pub emphasized: bool,
}

impl ExportBlock {
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Question,
            text: text.into(),
            emphasized: true,
        }
    }

    pub fn answer(text: impl Into<String>, selected: bool) -> Self {
        Self {
            kind: BlockKind::Answer,
            text: text.into(),
            emphasized: selected,
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: BlockKind::Separator,
            text: String::new(),
            emphasized: false,
        }
    }
}

/// Lays the answered quiz out as blocks: each question in bold, then its
/// options (bold only when the option text equals the recorded selection),
/// then an empty separator.
pub fn build_export_blocks(state: &QuizState) -> Vec<ExportBlock> {
    let mut blocks = Vec::new();

    for (index, question) in state.questions().iter().enumerate() {
        let selection = state.selection(index);
        blocks.push(ExportBlock::question(&question.prompt));
        for option in &question.options {
            blocks.push(ExportBlock::answer(option, selection == Some(option.as_str())));
        }
        blocks.push(ExportBlock::separator());
    }

    blocks
}
