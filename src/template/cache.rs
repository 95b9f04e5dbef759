// ABOUTME: Shared cache of raw template text keyed by resolved file path
// ABOUTME: Reads each template file once on first use and keeps it until explicitly invalidated

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use super::error::{Result, TemplateError};

/// Raw template text loaded from a base directory.
///
/// Entries are filled on first lookup and never expire; `invalidate` drops
/// all of them so the next lookup re-reads the files.
#[derive(Debug)]
pub struct TemplateCache {
    base_dir: PathBuf,
    entries: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    texts: HashMap<PathBuf, Arc<str>>,
    /// Bumped by every invalidation; reads started before it are not stored
    generation: u64,
}

impl TemplateCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path of a resource relative to the base directory
    pub fn resolve_path(&self, relative: &Path) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Raw text of the template at `relative`, reading it on a cache miss
    pub fn get(&self, relative: &Path) -> Result<Arc<str>> {
        let full_path = self.resolve_path(relative);

        let generation = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(text) = entries.texts.get(&full_path) {
                return Ok(Arc::clone(text));
            }
            entries.generation
        };

        debug!("Template cache miss: {}", full_path.display());
        let text: Arc<str> = match std::fs::read_to_string(&full_path) {
            Ok(text) => text.into(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TemplateError::NotFound { path: full_path });
            }
            Err(e) => return Err(TemplateError::IoError(e)),
        };

        Ok(self.store(full_path, text, generation))
    }

    /// Cache `text` unless the cache was invalidated since `generation`
    fn store(&self, full_path: PathBuf, text: Arc<str>, generation: u64) -> Arc<str> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.generation != generation {
            debug!("Not caching {}: invalidated during read", full_path.display());
            return text;
        }
        // Another thread may have filled the slot while we were reading
        let cached = entries.texts.entry(full_path).or_insert(text);
        Arc::clone(cached)
    }

    #[cfg(test)]
    fn generation(&self) -> u64 {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// Drop every cached entry
    pub fn invalidate(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Invalidating {} cached templates", entries.texts.len());
        entries.texts.clear();
        entries.generation += 1;
    }

    pub fn contains(&self, relative: &Path) -> bool {
        let full_path = self.resolve_path(relative);
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .texts
            .contains_key(&full_path)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .texts
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
