use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::{self, FsResources};
use crate::models::{Note, NotebookMeta};
use crate::options::ConvertOptions;
use crate::parsing::parse_note;
use crate::providers::{Clock, IdGenerator, SystemClock, UuidGenerator};

pub const NOTE_EXTENSION: &str = "qvnote";
pub const CONTENT_FILE: &str = "content.json";
pub const META_FILE: &str = "meta.json";

/// What a batch conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookSummary {
    pub uuid: String,
    pub note_dirs: Vec<PathBuf>,
}

/// Writes Markdown documents out as Quiver notes.
pub struct Converter<I = UuidGenerator, C = SystemClock> {
    options: ConvertOptions,
    ids: I,
    clock: C,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_providers(options, UuidGenerator, SystemClock)
    }
}

impl<I: IdGenerator, C: Clock> Converter<I, C> {
    pub fn with_providers(options: ConvertOptions, ids: I, clock: C) -> Self {
        Self {
            options,
            ids,
            clock,
        }
    }

    /// Convert every `*.md` file in `input_dir` into `output_root`, then
    /// write the notebook's own `meta.json`.
    ///
    /// The first failing note aborts the whole batch; notes written before it
    /// stay on disk.
    pub fn convert_notebook(
        &mut self,
        input_dir: &Path,
        output_root: &Path,
        name: &str,
    ) -> Result<NotebookSummary> {
        let sources = io::scan_markdown_files(input_dir)?;
        if sources.is_empty() {
            warn!("No markdown files found in {}", input_dir.display());
        }

        let mut note_dirs = Vec::with_capacity(sources.len());
        for source in &sources {
            note_dirs.push(self.convert_single(source, output_root)?);
        }

        let meta = NotebookMeta {
            name: name.to_string(),
            uuid: self.ids.next_id(),
        };
        io::write_json(&output_root.join(META_FILE), &meta)?;
        info!(
            "Wrote notebook '{}' with {} notes to {}",
            name,
            note_dirs.len(),
            output_root.display()
        );

        Ok(NotebookSummary {
            uuid: meta.uuid,
            note_dirs,
        })
    }

    /// Convert one document into a fresh `<output_root>/<ID>.qvnote`
    /// directory and return that directory.
    pub fn convert_single(&mut self, source: &Path, output_root: &Path) -> Result<PathBuf> {
        let note_dir = output_root.join(format!("{}.{NOTE_EXTENSION}", self.ids.next_id()));
        self.convert_note(source, &note_dir)?;
        Ok(note_dir)
    }

    /// Convert `source` and write `content.json`, `meta.json` and any
    /// resources into `note_dir`.
    pub fn convert_note(&mut self, source: &Path, note_dir: &Path) -> Result<Note> {
        let text = io::read_file(source)?;
        let source_name = source.display().to_string();
        let base_dir = source.parent().unwrap_or(Path::new(""));

        let note = {
            let mut resources = FsResources::new(note_dir, &mut self.ids);
            if self.options.dedupe_images {
                resources = resources.deduplicated();
            }
            parse_note(&text, &source_name, base_dir, &self.options, &mut resources)?
        };

        let now = self.clock.now_unix();
        io::write_json(&note_dir.join(CONTENT_FILE), &note.content())?;
        io::write_json(&note_dir.join(META_FILE), &note.meta(self.ids.next_id(), now))?;

        info!(
            "Converted {} -> {} ({} cells)",
            source.display(),
            note_dir.display(),
            note.cells.len()
        );
        Ok(note)
    }
}
