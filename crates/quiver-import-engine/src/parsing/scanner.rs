use log::debug;

use crate::error::Result;
use crate::models::Block;
use crate::options::ConvertOptions;

use super::fence::{CodeFence, Fence};
use super::images::ImageRewriter;

const TOC_MARKER: &str = "[TOC]";

/// Which kind of block the scanner is accumulating.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scanning {
    Markdown,
    Code { language: String },
}

/// Two-state line scanner that groups a document into note cells.
///
/// Exactly one block is open at a time. A fence line flushes it and decides
/// what the next one is: a tagged fence opens code, a bare fence goes back
/// to markdown.
pub struct Scanner<'a> {
    options: &'a ConvertOptions,
    images: ImageRewriter<'a>,
    state: Scanning,
    buffer: String,
    cells: Vec<Block>,
}

impl<'a> Scanner<'a> {
    pub fn new(options: &'a ConvertOptions, images: ImageRewriter<'a>) -> Self {
        Self {
            options,
            images,
            state: Scanning::Markdown,
            buffer: String::new(),
            cells: vec![],
        }
    }

    /// Feed one line, including its trailing newline if it has one.
    pub fn push(&mut self, line: &str) -> Result<()> {
        if let Some(fence) = CodeFence::detect(line) {
            self.flush();
            self.state = match fence {
                Fence::Open { language } => Scanning::Code {
                    language: self.options.language_aliases.resolve(language).to_string(),
                },
                Fence::Close => Scanning::Markdown,
            };
            return Ok(());
        }

        if matches!(self.state, Scanning::Code { .. }) {
            self.buffer.push_str(line);
            Ok(())
        } else {
            self.push_markdown(line)
        }
    }

    /// Flush the open block and return every non-empty cell in order.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.cells
    }

    fn push_markdown(&mut self, line: &str) -> Result<()> {
        if self.options.strip_toc && line.contains(TOC_MARKER) {
            debug!("Dropping TOC marker line");
            return Ok(());
        }

        let line = if self.options.reduce_headers && line.starts_with("##") {
            &line[1..]
        } else {
            line
        };

        let line = self.images.rewrite_line(line)?;
        self.buffer.push_str(&line);
        Ok(())
    }

    fn flush(&mut self) {
        let data = std::mem::take(&mut self.buffer);
        let block = match &self.state {
            Scanning::Markdown => Block::markdown(&data),
            Scanning::Code { language } => Block::code(language.as_str(), &data),
        };
        self.cells.extend(block);
    }
}
