use serde::{Deserialize, Serialize};

use super::Block;

/// A converted Markdown document, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub tags: Vec<String>,
    pub cells: Vec<Block>,
}

impl Note {
    /// The `content.json` document of this note.
    pub fn content(&self) -> NoteContent<'_> {
        NoteContent {
            title: &self.title,
            cells: &self.cells,
        }
    }

    /// The `meta.json` document of this note. Both timestamps get `now`.
    pub fn meta(&self, uuid: String, now: i64) -> NoteMeta<'_> {
        NoteMeta {
            created_at: now,
            updated_at: now,
            tags: &self.tags,
            title: &self.title,
            uuid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteContent<'a> {
    pub title: &'a str,
    pub cells: &'a [Block],
}

#[derive(Debug, Serialize)]
pub struct NoteMeta<'a> {
    pub created_at: i64,
    pub updated_at: i64,
    pub tags: &'a [String],
    pub title: &'a str,
    pub uuid: String,
}

/// Top-level `meta.json` of a `.qvnotebook` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMeta {
    pub name: String,
    pub uuid: String,
}
