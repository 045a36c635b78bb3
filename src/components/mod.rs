//! ECS components for animated entities.
//!
//! Submodules overview:
//! - [`sheetanimation`] – per-entity playback state of a sprite-sheet animation
//! - [`sheetbookmark`] – selects a single bookmarked cell of a sheet
//! - [`sprite`] – texture key, source rectangle and render size

pub mod sheetanimation;
pub mod sheetbookmark;
pub mod sprite;
