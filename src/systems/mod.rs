//! Engine systems.
//!
//! Submodules overview
//! - [`sheetanimation`] – advance sheet animations and apply bookmarks to sprites
//! - [`time`] – update simulation time and delta

pub mod sheetanimation;
pub mod time;
