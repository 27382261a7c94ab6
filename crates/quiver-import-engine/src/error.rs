use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Couldn't find image at: {}", path.display())]
    MissingImage { path: PathBuf },
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
    #[error("Invalid input directory: {}", .0.display())]
    InvalidInputDir(PathBuf),
}

impl ConvertError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io { path, source }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
