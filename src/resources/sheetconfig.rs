//! Sheet definitions read from a section/key configuration store.
//!
//! # Configuration File Format
//!
//! ```ini
//! [general]
//! sprites_count = 4,2
//! animations = walk, attack
//!
//! [bookmarks]
//! idle = 0,0
//! dead = 3,1
//!
//! [anim_walk]
//! repeats = true
//! steps_count = 2
//! step_0_duration = 0.15
//! step_0_source = 0,0
//! step_1_duration = 0.15
//! step_1_source = 1,0
//!
//! [anim_attack]
//! repeats = false
//! steps_count = 2
//! step_0_duration = 0.1
//! step_0_source = 0,1
//! step_1_duration = 0.3
//! step_1_source = 1,1
//! step_1_tag = hit
//! ```
//!
//! `general/sprites_count`, `anim_<id>/steps_count` and every
//! `step_<i>_source` are required. A missing `step_<i>_duration` reads as
//! zero and is rejected like any other non-positive duration.

use std::path::Path;

use configparser::ini::Ini;
use log::{debug, info};

use crate::error::SheetError;
use crate::resources::sheet::{GridIndex, SheetIndex};
use crate::resources::sheetanimation::{Animation, AnimationStep};

const GENERAL: &str = "general";
const BOOKMARKS: &str = "bookmarks";

/// Read access to a section/key string store.
///
/// Typed getters return `default` when the key is absent or its value does
/// not parse. Use [`ConfigReader::has_key`] to tell the two apart.
pub trait ConfigReader {
    fn get_string(&self, section: &str, key: &str, default: &str) -> String;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_float(&self, section: &str, key: &str, default: f32) -> f32;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
    /// Key names of `section` in file order. Empty if the section is absent.
    fn list_keys(&self, section: &str) -> Vec<String>;
    fn has_key(&self, section: &str, key: &str) -> bool;
}

impl ConfigReader for Ini {
    fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.get(section, key).unwrap_or_else(|| default.to_string())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.getint(section, key).ok().flatten().unwrap_or(default)
    }

    fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.getfloat(section, key)
            .ok()
            .flatten()
            .map(|v| v as f32)
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.getboolcoerce(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn list_keys(&self, section: &str) -> Vec<String> {
        self.get_map_ref()
            .get(section)
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }
}

fn required_string(
    config: &impl ConfigReader,
    section: &str,
    key: &str,
) -> Result<String, SheetError> {
    if !config.has_key(section, key) {
        return Err(SheetError::missing(section, key));
    }
    Ok(config.get_string(section, key, ""))
}

fn grid_index(
    config: &impl ConfigReader,
    section: &str,
    key: &str,
) -> Result<GridIndex, SheetError> {
    let raw = required_string(config, section, key)?;
    raw.parse()
        .map_err(|_| SheetError::malformed(section, key, &raw))
}

/// Load the `anim_<id>` section of one animation.
pub fn animation_from_config(
    config: &impl ConfigReader,
    id: &str,
) -> Result<Animation, SheetError> {
    let section = format!("anim_{id}");
    let raw_count = required_string(config, &section, "steps_count")?;
    let steps_count: usize = raw_count
        .trim()
        .parse()
        .map_err(|_| SheetError::malformed(&section, "steps_count", &raw_count))?;
    let repeats = config.get_bool(&section, "repeats", false);

    let mut steps = Vec::with_capacity(steps_count);
    for i in 0..steps_count {
        let duration = config.get_float(&section, &format!("step_{i}_duration"), 0.0);
        let source = grid_index(config, &section, &format!("step_{i}_source"))?;
        let tag = config.get_string(&section, &format!("step_{i}_tag"), "");
        let mut step = AnimationStep::new(duration, source);
        if !tag.is_empty() {
            step.tag = Some(tag);
        }
        steps.push(step);
    }

    let animation = Animation::new(id, repeats, steps)?;
    debug!(
        "Loaded animation '{}': {} steps, {:.3}s, repeats={}",
        id,
        animation.step_count(),
        animation.total_duration(),
        repeats
    );
    Ok(animation)
}

impl SheetIndex {
    /// Build an index from a configuration store.
    ///
    /// Fails on the first invalid entry; no partially loaded index is
    /// ever returned.
    pub fn from_config(config: &impl ConfigReader) -> Result<Self, SheetError> {
        let grid = grid_index(config, GENERAL, "sprites_count")?;
        let mut sheet = SheetIndex::new(grid)?;

        let animations = config.get_string(GENERAL, "animations", "");
        for id in animations.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            sheet.add_animation(animation_from_config(config, id)?)?;
        }

        for name in config.list_keys(BOOKMARKS) {
            let index = grid_index(config, BOOKMARKS, &name)?;
            sheet.add_bookmark(name, index)?;
        }

        info!(
            "Loaded sheet: {}x{} grid, {} animations, {} bookmarks",
            grid.x,
            grid.y,
            sheet.animation_names().len(),
            sheet.bookmarks().len()
        );
        Ok(sheet)
    }

    /// Parse INI text and build an index from it.
    pub fn from_ini_str(text: &str) -> Result<Self, SheetError> {
        let mut config = Ini::new_cs();
        config
            .read(text.to_string())
            .map_err(SheetError::Load)?;
        Self::from_config(&config)
    }

    /// Load an INI sheet definition from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let mut config = Ini::new_cs();
        config
            .load(path)
            .map_err(|e| SheetError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_config(&config)
    }
}
