use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use regex::Regex;

use crate::foundation::error::{SceneryError, SceneryResult};
use crate::render::backend::Renderer;
use crate::widgets::image::Image;

/// Numbered frames of one animation, ascending by frame number.
pub type FrameList = Vec<(u32, Image)>;

/// Named frame sequences loaded from image directories, ready to feed
/// [`Sprite::add_animation`](crate::Sprite::add_animation).
#[derive(Debug, Default)]
pub struct SpriteLibrary {
    animations: HashMap<String, FrameList>,
}

impl SpriteLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `<base>_<N>.<ext>` file in `dir` as frame `N` of animation `name`.
    ///
    /// Returns the number of frames loaded. Loading under an existing name replaces it.
    pub fn load_animation(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        dir: &Path,
        base: &str,
    ) -> SceneryResult<usize> {
        let pattern = format!(r"^{}_([0-9]+)\..*$", regex::escape(base));
        let filter = Regex::new(&pattern).context("build frame filter")?;
        self.load_animation_matching(renderer, name, dir, &filter, 1)
    }

    /// Load the files of `dir` whose whole name matches `filter`; capture `group` holds the
    /// frame number.
    ///
    /// Fails when nothing matches or any frame fails to load; the library is left unchanged.
    #[tracing::instrument(level = "debug", skip(self, renderer, filter), fields(filter = %filter))]
    pub fn load_animation_matching(
        &mut self,
        renderer: &mut dyn Renderer,
        name: &str,
        dir: &Path,
        filter: &Regex,
        group: usize,
    ) -> SceneryResult<usize> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read sprite directory '{}'", dir.display()))?;

        let mut matched = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(caps) = filter.captures(file_name) else {
                continue;
            };
            if caps.get(0).is_none_or(|m| m.range() != (0..file_name.len())) {
                continue;
            }
            let Some(number) = caps.get(group) else {
                continue;
            };
            let number: u32 = number.as_str().parse().map_err(|_| {
                SceneryError::resource(format!("frame number out of range in '{file_name}'"))
            })?;
            matched.push((number, file_name.to_owned(), entry.path()));
        }
        if matched.is_empty() {
            return Err(SceneryError::resource(format!(
                "no frames for '{name}' in '{}'",
                dir.display()
            )));
        }
        matched.sort();

        let mut frames = FrameList::with_capacity(matched.len());
        for (number, _, path) in matched {
            let mut img = Image::new();
            img.load(renderer, &path)?;
            frames.push((number, img));
        }
        let count = frames.len();
        tracing::debug!(name, frames = count, "sprite animation loaded");
        self.animations.insert(name.to_owned(), frames);
        Ok(count)
    }

    /// Frames of `name`.
    pub fn get(&self, name: &str) -> Option<&[(u32, Image)]> {
        self.animations.get(name).map(Vec::as_slice)
    }

    /// Loaded animation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sprites.rs"]
mod tests;
