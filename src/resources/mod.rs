//! Shared, read-only definitions and ECS resources.
//!
//! Overview
//! - `sheet` – grid geometry, bookmarks and animation lookup for one sheet
//! - `sheetanimation` – timed step sequences and time-to-step resolution
//! - `sheetconfig` – loading sheets from INI section/key definitions
//! - `sheetstore` – loaded sheets keyed by texture
//! - `worldtime` – simulation time and delta
pub mod sheet;
pub mod sheetanimation;
pub mod sheetconfig;
pub mod sheetstore;
pub mod worldtime;
