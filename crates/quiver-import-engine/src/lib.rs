pub mod convert;
pub mod error;
pub mod io;
pub mod models;
pub mod options;
pub mod parsing;
pub mod providers;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use convert::{Converter, NotebookSummary};
pub use error::{ConvertError, Result};
pub use models::{Block, Note, NotebookMeta};
pub use options::ConvertOptions;
pub use parsing::{LanguageAliases, parse_note};
pub use providers::{Clock, IdGenerator, SystemClock, UuidGenerator};
