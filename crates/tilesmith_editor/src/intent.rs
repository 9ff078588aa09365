//! The input vocabulary shells feed into a session.

use std::path::PathBuf;

use tilesmith_core::{CycleDirection, TileLayer};

/// One discrete editing action.
///
/// Shells translate raw input (keys, clicks, menu items) into intents and
/// hand them to [`EditorSession::apply`](crate::EditorSession::apply).
/// Pointer-driven intents carry screen pixels; the session maps them to
/// world cells through its camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorIntent {
    /// Move the camera by pixels.
    Pan { dx: i32, dy: i32 },
    /// Adjust the camera pan speed.
    AdjustSpeed { delta: i32 },
    /// Zoom in one step.
    ZoomIn,
    /// Zoom out one step.
    ZoomOut,
    /// Jump the camera to an absolute position.
    Teleport { x: i32, y: i32 },
    /// Pick a catalog index on one layer.
    Select { layer: TileLayer, index: u32 },
    /// Jump to the first index of a tile group (numeric hotkeys).
    SelectGroup { layer: TileLayer, group: u32 },
    /// Step one layer's selection.
    CycleSelection {
        layer: TileLayer,
        direction: CycleDirection,
    },
    /// Hide or restore one layer's selection.
    ToggleHide { layer: TileLayer },
    /// Flip orientation inference (autotiling and grouped cycling).
    ToggleOrientationInference,
    /// Paint the current selections at a screen pixel.
    Paint { px: i32, py: i32 },
    /// Erase the cell at a screen pixel.
    Erase { px: i32, py: i32 },
    /// Copy the hovered cell's layer values into the selections.
    PickTile { px: i32, py: i32 },
    /// Revert to the previous checkpoint.
    Undo,
    /// Reapply an undone change.
    Redo,
    /// Stage a world file as a pending import fragment.
    ImportFragment { path: PathBuf },
    /// Shift the pending fragment by whole cells.
    ShiftImport { dx: i32, dy: i32 },
    /// Commit the pending fragment into the world.
    MergeImport,
    /// Discard the pending fragment.
    CancelImport,
    /// Replace the session's world with a file's contents.
    LoadWorld { path: PathBuf },
    /// Write the session's world to a file.
    SaveWorld { path: PathBuf },
}
