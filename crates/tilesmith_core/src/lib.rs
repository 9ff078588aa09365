//! Core data model for 2D tile-world editors.
//!
//! This crate provides the engine-agnostic pieces an editor shell builds on:
//!
//! - [`TileWorld`]: sparse, unbounded column→row tile storage
//! - [`Tile`] / [`TileBrush`]: three-layer cells and the painting contract
//! - [`Camera`]: integer-pixel viewpoint with zoom and exact screen/world
//!   mapping
//! - [`SelectionGroup`]: catalog selection with group cycling and hide
//! - [`HistoryStack`] / [`EditHistory`]: snapshot-based undo and redo
//! - [`WorldFragment`] / [`merge`]: staged imports
//!
//! No rendering, windowing, or input handling lives here; shells provide
//! those and drive this model through `tilesmith_editor`.

mod camera;
mod history;
mod merge;
mod selection;
mod tile;
mod world;

pub use camera::{Camera, Viewport};
pub use history::{EditHistory, HistoryStack, DEFAULT_HISTORY_LIMIT};
pub use merge::{merge, WorldFragment};
pub use selection::{CycleDirection, SelectionGroup};
pub use tile::{Tile, TileBrush, TileLayer};
pub use world::TileWorld;
