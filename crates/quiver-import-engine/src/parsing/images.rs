use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::Result;

/// URL scheme Quiver uses to point at files in a note's `resources/` folder.
pub const QUIVER_IMAGE_SCHEME: &str = "quiver-image-url";

/// Somewhere local images can be copied to.
pub trait ResourceStore {
    /// Copy the image at `source` and return the file name it was stored under.
    ///
    /// Fails with [`ConvertError::MissingImage`](crate::ConvertError::MissingImage)
    /// when `source` does not exist.
    fn import(&mut self, source: &Path) -> Result<String>;
}

/// One `![alt](source "title")` occurrence within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference<'a> {
    pub alt_text: &'a str,
    pub source: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> ImageReference<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        Self {
            alt_text: caps.name("alt").map_or("", |m| m.as_str()),
            source: caps.name("src").map_or("", |m| m.as_str()),
            title: caps.name("title").map(|m| m.as_str()),
        }
    }

    pub fn is_remote(&self) -> bool {
        remote_regex().is_match(self.source)
    }
}

/// Rewrites local image references in markdown lines to point into the
/// note's resources.
pub struct ImageRewriter<'a> {
    base_dir: &'a Path,
    store: &'a mut dyn ResourceStore,
}

impl<'a> ImageRewriter<'a> {
    /// `base_dir` is the directory of the document being converted; image
    /// paths are resolved against it.
    pub fn new(base_dir: &'a Path, store: &'a mut dyn ResourceStore) -> Self {
        Self { base_dir, store }
    }

    /// Rewrite every local image reference in `line`.
    ///
    /// Only the source token of each occurrence changes; alt text, title and
    /// the rest of the line are kept byte for byte. Remote images are left
    /// alone.
    pub fn rewrite_line(&mut self, line: &str) -> Result<String> {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;

        for caps in image_regex().captures_iter(line) {
            let reference = ImageReference::from_captures(&caps);
            if reference.is_remote() {
                continue;
            }
            let Some(src) = caps.name("src") else {
                continue;
            };

            let path = self.resolve(reference.source);
            let file_name = self.store.import(&path)?;
            out.push_str(&line[last..src.start()]);
            out.push_str(QUIVER_IMAGE_SCHEME);
            out.push('/');
            out.push_str(&file_name);
            last = src.end();
        }

        out.push_str(&line[last..]);
        Ok(out)
    }

    fn resolve(&self, source: &str) -> PathBuf {
        self.base_dir.join(source)
    }
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| {
        // One level of nested brackets in the alt text and of balanced
        // parentheses in the source, e.g. `![a [b]](pic(1).png)`
        Regex::new(
            r#"!\[(?P<alt>(?:[^\[\]]|\[[^\[\]]*\])*)\]\((?P<src>(?:[^\s()]|\([^\s()]*\))+)(?:\s+"(?P<title>[^"]*)")?\)"#,
        )
        .expect("Invalid image regex")
    })
}

fn remote_regex() -> &'static Regex {
    static REMOTE_REGEX: OnceLock<Regex> = OnceLock::new();
    REMOTE_REGEX.get_or_init(|| Regex::new(r"(?i)^https?://").expect("Invalid remote URL regex"))
}
