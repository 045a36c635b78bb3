//! Registry of loaded sprite sheets.
//!
//! Each [`SheetIndex`] is stored under the key of the texture it describes.
//! Entities reference a sheet by that key; the store is shared read-only by
//! the animation system.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::error::SheetError;
use crate::resources::sheet::SheetIndex;

#[derive(Resource, Debug, Default)]
pub struct SheetStore {
    pub map: FxHashMap<String, SheetIndex>,
}

impl SheetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SheetStore {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&SheetIndex> {
        self.map.get(key.as_ref())
    }

    /// Like [`SheetStore::get`] but reports an unknown key as an error.
    pub fn get_or_err(&self, key: &str) -> Result<&SheetIndex, SheetError> {
        self.map
            .get(key)
            .ok_or_else(|| SheetError::SheetNotFound(key.to_string()))
    }

    /// Insert a sheet, replacing any previous sheet under the same key.
    pub fn insert(&mut self, key: impl Into<String>, sheet: SheetIndex) {
        self.map.insert(key.into(), sheet);
    }

    /// Load an INI sheet definition and store it under `key`.
    pub fn load_from_file(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), SheetError> {
        let sheet = SheetIndex::load_from_file(path)?;
        self.insert(key, sheet);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
