use serde::{Deserialize, Serialize};

/// A finished cell of a Quiver note.
///
/// Serializes to the cell shape Quiver expects in `content.json`:
/// `{"type": "code", "language": ..., "data": ...}` or
/// `{"type": "markdown", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Code { language: String, data: String },
    Markdown { data: String },
}

impl Block {
    /// Build a code block, returning `None` if the text is blank once trimmed.
    pub fn code(language: impl Into<String>, data: &str) -> Option<Self> {
        let data = data.trim();
        (!data.is_empty()).then(|| Block::Code {
            language: language.into(),
            data: data.to_string(),
        })
    }

    /// Build a markdown block, returning `None` if the text is blank once trimmed.
    pub fn markdown(data: &str) -> Option<Self> {
        let data = data.trim();
        (!data.is_empty()).then(|| Block::Markdown {
            data: data.to_string(),
        })
    }

    pub fn data(&self) -> &str {
        match self {
            Block::Code { data, .. } | Block::Markdown { data } => data,
        }
    }
}
