use crate::parsing::fence::LanguageAliases;

/// Knobs controlling how a Markdown document is turned into a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Drop markdown lines containing a `[TOC]` marker.
    pub strip_toc: bool,
    /// Turn `## Heading` into `# Heading` (and so on) in markdown cells.
    pub reduce_headers: bool,
    /// Copy each distinct image once per note and reuse its reference.
    pub dedupe_images: bool,
    pub language_aliases: LanguageAliases,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strip_toc: true,
            reduce_headers: true,
            dedupe_images: false,
            language_aliases: LanguageAliases::default(),
        }
    }
}

impl ConvertOptions {
    /// Options that pass markdown lines through untouched apart from image
    /// rewriting.
    pub fn verbatim() -> Self {
        Self {
            strip_toc: false,
            reduce_headers: false,
            ..Self::default()
        }
    }
}
