//! # Note Parsing
//!
//! Turns the text of one Markdown document into a [`Note`].
//!
//! ## Phases
//!
//! 1. **Header** (`header`): the first two lines may carry a `# Title` and a
//!    `[tag, list]`. They are consumed only when at least one of them matched.
//! 2. **Scanning** (`scanner`): every remaining line is classified as a fence
//!    boundary (`fence`), a code line or a markdown line, and accumulated into
//!    the open block.
//! 3. **Image rewriting** (`images`): markdown lines have local image
//!    references copied into the note's resources and pointed at
//!    `quiver-image-url/...`.
//!
//! ## Key Invariants
//!
//! - At most one block is open at a time
//! - Code lines are never rewritten
//! - No emitted block is blank

pub mod fence;
pub mod header;
pub mod images;
pub mod scanner;

use std::path::Path;

use crate::error::Result;
use crate::models::Note;
use crate::options::ConvertOptions;

pub use fence::{CodeFence, Fence, LanguageAliases};
pub use header::Header;
pub use images::{ImageReference, ImageRewriter, QUIVER_IMAGE_SCHEME, ResourceStore};
pub use scanner::Scanner;

/// Parse a whole document.
///
/// `source_name` becomes the title when the document has none. Image paths
/// are resolved against `base_dir` and handed to `resources`.
pub fn parse_note(
    text: &str,
    source_name: &str,
    base_dir: &Path,
    options: &ConvertOptions,
    resources: &mut dyn ResourceStore,
) -> Result<Note> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let header = Header::extract(lines.first().copied(), lines.get(1).copied());

    let mut scanner = Scanner::new(options, ImageRewriter::new(base_dir, resources));
    for line in lines.iter().skip(header.lines_to_skip()) {
        scanner.push(line)?;
    }

    Ok(Note {
        title: header.title_or(source_name),
        tags: header.tags(),
        cells: scanner.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    /// Refuses every import; for documents without local images.
    struct NoImages;

    impl ResourceStore for NoImages {
        fn import(&mut self, source: &Path) -> Result<String> {
            panic!("unexpected image import: {}", source.display());
        }
    }

    fn parse(text: &str) -> Note {
        parse_note(
            text,
            "notes/doc.md",
            Path::new("notes"),
            &ConvertOptions::default(),
            &mut NoImages,
        )
        .unwrap()
    }

    #[test]
    fn header_lines_are_consumed() {
        let note = parse("# Title\n[tag1, tag2]\nBody text\n");

        assert_eq!(note.title, "Title");
        assert_eq!(note.tags, vec!["tag1", "tag2"]);
        assert_eq!(
            note.cells,
            vec![Block::Markdown {
                data: "Body text".to_string()
            }]
        );
    }

    #[test]
    fn documents_without_header_are_scanned_in_full() {
        let note = parse("First line\nSecond line\n");

        assert_eq!(note.title, "notes/doc.md");
        assert!(note.tags.is_empty());
        assert_eq!(
            note.cells,
            vec![Block::Markdown {
                data: "First line\nSecond line".to_string()
            }]
        );
    }

    #[test]
    fn title_only_header_consumes_second_line_too() {
        let note = parse("# Title\nswallowed\nkept\n");
        assert_eq!(note.cells[0].data(), "kept");
    }

    #[test]
    fn fence_only_document() {
        let note = parse("```python\nprint('hi')\n```\n");

        assert_eq!(note.title, "notes/doc.md");
        assert_eq!(
            note.cells,
            vec![Block::Code {
                language: "python".to_string(),
                data: "print('hi')".to_string()
            }]
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "# T\n[a]\nIntro\n```sh\nls\n```\n## More\n";
        assert_eq!(parse(text), parse(text));
    }
}
