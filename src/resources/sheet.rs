//! Sprite-sheet geometry and lookup.
//!
//! A [`SheetIndex`] describes how a texture is divided into a grid of equal
//! cells and names the cells callers care about: bookmarks for single fixed
//! frames and [`Animation`]s for timed sequences. It is immutable once built
//! and shared read-only by every entity drawing from the same sheet.
//!
//! # Remainder pixels
//!
//! Cell size is computed with integer division, so a texture whose pixel
//! size is not an exact multiple of the grid loses the remainder at its
//! right and bottom edges. Existing assets are cropped this way, so it is
//! kept as is.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::resources::sheetanimation::{Animation, Frame};

/// Column/row address of one cell of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: u32,
    pub y: u32,
}

impl GridIndex {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Parses the `"x,y"` form used in sheet definition files.
impl FromStr for GridIndex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or(())?;
        let x = x.trim().parse::<u32>().map_err(|_| ())?;
        let y = y.trim().parse::<u32>().map_err(|_| ())?;
        Ok(Self { x, y })
    }
}

/// Pixel-space rectangle selecting one cell of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Grid geometry plus named animations and bookmarks for one sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetIndex {
    grid: GridIndex,
    animations: FxHashMap<String, Animation>,
    bookmarks: FxHashMap<String, GridIndex>,
}

impl SheetIndex {
    /// Create an index for a grid of `grid.x` columns by `grid.y` rows.
    pub fn new(grid: GridIndex) -> Result<Self, SheetError> {
        if grid.x == 0 || grid.y == 0 {
            return Err(SheetError::EmptyGrid);
        }
        Ok(Self {
            grid,
            animations: FxHashMap::default(),
            bookmarks: FxHashMap::default(),
        })
    }

    /// Register an animation. Names must be unique and every step must
    /// address a cell inside the grid.
    pub fn with_animation(mut self, animation: Animation) -> Result<Self, SheetError> {
        self.add_animation(animation)?;
        Ok(self)
    }

    /// Register a bookmark. Names must be unique and the cell must lie
    /// inside the grid.
    pub fn with_bookmark(
        mut self,
        name: impl Into<String>,
        index: GridIndex,
    ) -> Result<Self, SheetError> {
        self.add_bookmark(name.into(), index)?;
        Ok(self)
    }

    pub(crate) fn add_animation(&mut self, animation: Animation) -> Result<(), SheetError> {
        for step in animation.steps() {
            self.check_in_grid(animation.id(), step.source)?;
        }
        if self.animations.contains_key(animation.id()) {
            return Err(SheetError::DuplicateName(animation.id().to_string()));
        }
        self.animations.insert(animation.id().to_string(), animation);
        Ok(())
    }

    pub(crate) fn add_bookmark(
        &mut self,
        name: String,
        index: GridIndex,
    ) -> Result<(), SheetError> {
        self.check_in_grid(&name, index)?;
        if self.bookmarks.contains_key(&name) {
            return Err(SheetError::DuplicateName(name));
        }
        self.bookmarks.insert(name, index);
        Ok(())
    }

    fn check_in_grid(&self, name: &str, index: GridIndex) -> Result<(), SheetError> {
        if index.x >= self.grid.x || index.y >= self.grid.y {
            return Err(SheetError::OutOfGrid {
                name: name.to_string(),
                x: index.x,
                y: index.y,
                cols: self.grid.x,
                rows: self.grid.y,
            });
        }
        Ok(())
    }

    /// Columns (`x`) and rows (`y`) of the grid.
    pub fn grid_size(&self) -> GridIndex {
        self.grid
    }

    /// Pixel size of one cell for a texture of the given size.
    pub fn cell_size(&self, image_width: u32, image_height: u32) -> (u32, u32) {
        (image_width / self.grid.x, image_height / self.grid.y)
    }

    /// Source rectangle of `index` inside a texture of the given size.
    ///
    /// Fails with [`SheetError::OutOfGrid`] if `index` lies outside the grid.
    pub fn source_rect_for(
        &self,
        image_width: u32,
        image_height: u32,
        index: GridIndex,
    ) -> Result<SourceRect, SheetError> {
        self.check_in_grid("source_rect_for", index)?;
        let (width, height) = self.cell_size(image_width, image_height);
        Ok(SourceRect {
            x: index.x * width,
            y: index.y * height,
            width,
            height,
        })
    }

    pub fn resolve_bookmark(&self, name: &str) -> Result<GridIndex, SheetError> {
        self.bookmarks
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::BookmarkNotFound(name.to_string()))
    }

    /// Source rectangle of a bookmarked cell.
    pub fn bookmark_rect(
        &self,
        image_width: u32,
        image_height: u32,
        name: &str,
    ) -> Result<SourceRect, SheetError> {
        let index = self.resolve_bookmark(name)?;
        self.source_rect_for(image_width, image_height, index)
    }

    pub fn animation(&self, name: &str) -> Result<&Animation, SheetError> {
        self.animations
            .get(name)
            .ok_or_else(|| SheetError::AnimationNotFound(name.to_string()))
    }

    /// Advance the caller's `progress` for the named animation.
    ///
    /// Only `progress` is mutated; the index itself is never touched.
    pub fn animate(
        &self,
        name: &str,
        progress: &mut f32,
        delta: f32,
    ) -> Result<Frame<'_>, SheetError> {
        self.animation(name)?.resolve(progress, delta)
    }

    /// Sorted animation identifiers.
    pub fn animation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted bookmark names with their cells.
    pub fn bookmarks(&self) -> Vec<(&str, GridIndex)> {
        let mut marks: Vec<(&str, GridIndex)> =
            self.bookmarks.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        marks.sort_unstable_by_key(|(k, _)| *k);
        marks
    }

    /// Build an index from a JSON document of the form
    /// `{"sprites_count":{"x":4,"y":1},"animations":[...],"bookmarks":{"name":{"x":0,"y":0}}}`.
    pub fn from_json_str(json: &str) -> Result<Self, SheetError> {
        let def: SheetDef =
            serde_json::from_str(json).map_err(|e| SheetError::Load(e.to_string()))?;
        let mut sheet = SheetIndex::new(def.sprites_count)?;
        for animation in def.animations {
            sheet.add_animation(animation)?;
        }
        for (name, index) in def.bookmarks {
            sheet.add_bookmark(name, index)?;
        }
        info!(
            "Loaded sheet: {}x{} grid, {} animations, {} bookmarks",
            sheet.grid.x,
            sheet.grid.y,
            sheet.animations.len(),
            sheet.bookmarks.len()
        );
        Ok(sheet)
    }
}

#[derive(Deserialize)]
struct SheetDef {
    sprites_count: GridIndex,
    #[serde(default)]
    animations: Vec<Animation>,
    #[serde(default)]
    bookmarks: BTreeMap<String, GridIndex>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::sheetanimation::AnimationStep;

    fn strip() -> SheetIndex {
        SheetIndex::new(GridIndex::new(4, 1)).unwrap()
    }

    #[test]
    fn test_source_rect_for_strip() {
        let sheet = strip();
        assert_eq!(sheet.cell_size(400, 100), (100, 100));
        assert_eq!(
            sheet.source_rect_for(400, 100, GridIndex::new(2, 0)).unwrap(),
            SourceRect {
                x: 200,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn test_source_rect_drops_remainder_pixels() {
        let sheet = SheetIndex::new(GridIndex::new(3, 2)).unwrap();
        let last = sheet.source_rect_for(100, 51, GridIndex::new(2, 1)).unwrap();
        assert_eq!(
            last,
            SourceRect {
                x: 66,
                y: 25,
                width: 33,
                height: 25
            }
        );
        // one pixel column and one pixel row are never covered
        assert_eq!(last.x + last.width, 99);
        assert_eq!(last.y + last.height, 50);
    }

    #[test]
    fn test_adjacent_rects_tile_without_overlap() {
        let sheet = SheetIndex::new(GridIndex::new(4, 3)).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let a = sheet.source_rect_for(128, 96, GridIndex::new(x, y)).unwrap();
                let b = sheet.source_rect_for(128, 96, GridIndex::new(x + 1, y)).unwrap();
                assert_eq!(a.x + a.width, b.x);
                assert_eq!(a.y, b.y);
            }
        }
    }

    #[test]
    fn test_source_rect_outside_grid_rejected() {
        let sheet = strip();
        let err = sheet
            .source_rect_for(400, 100, GridIndex::new(u32::MAX / 2, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            SheetError::OutOfGrid {
                cols: 4,
                rows: 1,
                ..
            }
        ));
        assert!(sheet.source_rect_for(400, 100, GridIndex::new(4, 0)).is_err());
        assert!(sheet.source_rect_for(400, 100, GridIndex::new(0, 1)).is_err());
        assert!(sheet.source_rect_for(400, 100, GridIndex::new(3, 0)).is_ok());
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            SheetIndex::new(GridIndex::new(0, 1)),
            Err(SheetError::EmptyGrid)
        );
    }

    #[test]
    fn test_bookmark_lookup() {
        let sheet = strip().with_bookmark("idle", GridIndex::new(3, 0)).unwrap();
        assert_eq!(sheet.resolve_bookmark("idle"), Ok(GridIndex::new(3, 0)));
        assert_eq!(
            sheet.bookmark_rect(400, 100, "idle").unwrap(),
            SourceRect {
                x: 300,
                y: 0,
                width: 100,
                height: 100
            }
        );
        let err = sheet.resolve_bookmark("Idle").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bookmark_outside_grid_rejected() {
        let err = strip()
            .with_bookmark("far", GridIndex::new(4, 0))
            .unwrap_err();
        assert!(matches!(err, SheetError::OutOfGrid { x: 4, .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let anim = || {
            Animation::new("run", true, vec![AnimationStep::new(0.1, GridIndex::new(0, 0))])
                .unwrap()
        };
        let err = strip()
            .with_animation(anim())
            .and_then(|s| s.with_animation(anim()))
            .unwrap_err();
        assert_eq!(err, SheetError::DuplicateName("run".to_string()));
    }

    #[test]
    fn test_animate_unknown_name_fails() {
        let sheet = strip();
        let mut progress = 0.0;
        assert_eq!(
            sheet.animate("wlak", &mut progress, 0.1),
            Err(SheetError::AnimationNotFound("wlak".to_string()))
        );
        assert_eq!(progress, 0.0);
    }

    #[test]
    fn test_animate_delegates_to_animation() {
        let anim = Animation::new(
            "run",
            true,
            vec![
                AnimationStep::new(0.5, GridIndex::new(0, 0)),
                AnimationStep::new(0.5, GridIndex::new(1, 0)),
            ],
        )
        .unwrap();
        let sheet = strip().with_animation(anim).unwrap();
        let mut progress = 0.0;
        let frame = sheet.animate("run", &mut progress, 0.5).unwrap();
        assert_eq!(frame.grid_index, GridIndex::new(1, 0));
        assert_eq!(progress, 1.0);
    }

    #[test]
    fn test_grid_index_parse() {
        assert_eq!("2, 3".parse::<GridIndex>(), Ok(GridIndex::new(2, 3)));
        assert!("2".parse::<GridIndex>().is_err());
        assert!("-1,0".parse::<GridIndex>().is_err());
        assert!("a,b".parse::<GridIndex>().is_err());
        assert!("".parse::<GridIndex>().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "sprites_count": {"x": 4, "y": 2},
            "animations": [
                {"id": "jump", "steps": [
                    {"duration": 0.1, "source": {"x": 0, "y": 1}},
                    {"duration": 0.2, "source": {"x": 1, "y": 1}, "tag": "apex"}
                ]}
            ],
            "bookmarks": {"dead": {"x": 3, "y": 1}}
        }"#;
        let sheet = SheetIndex::from_json_str(json).unwrap();
        assert_eq!(sheet.grid_size(), GridIndex::new(4, 2));
        assert!(!sheet.animation("jump").unwrap().repeats());
        assert_eq!(sheet.resolve_bookmark("dead"), Ok(GridIndex::new(3, 1)));
    }

    #[test]
    fn test_from_json_str_rejects_bad_step() {
        let json = r#"{"sprites_count": {"x": 1, "y": 1},
            "animations": [{"id": "x", "steps": [{"duration": 0, "source": {"x": 0, "y": 0}}]}]}"#;
        assert!(matches!(
            SheetIndex::from_json_str(json),
            Err(SheetError::Load(_))
        ));
    }
}
