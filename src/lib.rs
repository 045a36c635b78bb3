//! Sprite-sheet animation library.
//!
//! Resolves elapsed time into sprite-sheet cells: named, duration-weighted
//! animations and bookmarks over a fixed grid, plus the ECS components,
//! resources and systems that drive them for any number of entities.

pub mod components;
pub mod error;
pub mod resources;
pub mod systems;
