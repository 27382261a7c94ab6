use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::parsing::ResourceStore;
use crate::providers::IdGenerator;

pub const RESOURCES_DIR: &str = "resources";

/// Copies images into `<note_dir>/resources/` under freshly generated names.
pub struct FsResources<'a> {
    dir: PathBuf,
    ids: &'a mut dyn IdGenerator,
    /// Present when repeated references should share one copy.
    cache: Option<HashMap<PathBuf, String>>,
}

impl<'a> FsResources<'a> {
    pub fn new(note_dir: &Path, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            dir: note_dir.join(RESOURCES_DIR),
            ids,
            cache: None,
        }
    }

    /// Reuse the first copy of a file for later references to it.
    pub fn deduplicated(mut self) -> Self {
        self.cache = Some(HashMap::new());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResourceStore for FsResources<'_> {
    fn import(&mut self, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(ConvertError::MissingImage {
                path: source.to_path_buf(),
            });
        }

        let key = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        if let Some(cache) = &self.cache
            && let Some(name) = cache.get(&key)
        {
            debug!("Reusing {name} for {}", source.display());
            return Ok(name.clone());
        }

        fs::create_dir_all(&self.dir).map_err(ConvertError::io(&self.dir))?;

        let extension = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let name = format!("{}{extension}", self.ids.next_id());
        let dest = self.dir.join(&name);

        fs::copy(source, &dest).map_err(ConvertError::io(source))?;
        debug!("Copied {} to {}", source.display(), dest.display());

        if let Some(cache) = &mut self.cache {
            cache.insert(key, name.clone());
        }
        Ok(name)
    }
}
