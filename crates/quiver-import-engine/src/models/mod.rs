pub mod block;
pub mod note;

pub use block::Block;
pub use note::{Note, NoteContent, NoteMeta, NotebookMeta};
