use std::collections::HashMap;
use std::path::Path;

use crate::foundation::error::SceneryResult;
use crate::text::font::Font;

/// Name-keyed font cache, filled once at startup.
///
/// Labels keep their own [`Font`] clone, so unloading a name only affects later lookups.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<String, Font>,
}

impl FontCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` at `size_px` under `name`.
    ///
    /// Returns `Ok(false)` without touching the file when the name is already taken.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>, size_px: f32) -> SceneryResult<bool> {
        if self.fonts.contains_key(name) {
            return Ok(false);
        }
        let font = Font::from_path(path.as_ref(), size_px)?;
        tracing::debug!(family = %font.family_name(), "font loaded");
        self.fonts.insert(name.to_owned(), font);
        Ok(true)
    }

    /// Register an already loaded font. Returns false when the name is taken.
    pub fn insert(&mut self, name: &str, font: Font) -> bool {
        if self.fonts.contains_key(name) {
            return false;
        }
        self.fonts.insert(name.to_owned(), font);
        true
    }

    /// Forget `name`. Returns whether it was present.
    pub fn unload(&mut self, name: &str) -> bool {
        self.fonts.remove(name).is_some()
    }

    /// Shared handle for `name`.
    pub fn get(&self, name: &str) -> Option<Font> {
        self.fonts.get(name).cloned()
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True when no font is loaded.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
