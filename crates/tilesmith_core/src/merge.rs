//! Merging one world into another.

use serde::{Deserialize, Serialize};

use crate::world::TileWorld;

/// Overlays `fragment` onto `base`, shifted by whole cells.
///
/// Every fragment cell at `(col, row)` lands at `(col + offset_x,
/// row + offset_y)`. Targets with a negative column or row are dropped, so a
/// merge never grows the base into negative space. Surviving cells overwrite
/// whatever the base held there; writes go through [`TileWorld::put`], so the
/// world invariants hold afterwards.
///
/// The base is modified in place. Callers that want the merge undoable
/// snapshot the base first.
pub fn merge(base: &mut TileWorld, fragment: &TileWorld, offset_x: i32, offset_y: i32) {
    for ((col, row), tile) in fragment.iter() {
        let Some(target_col) = col.checked_add(offset_x) else {
            continue;
        };
        let Some(target_row) = row.checked_add(offset_y) else {
            continue;
        };
        if target_col < 0 || target_row < 0 {
            continue;
        }
        base.put(target_col, target_row, *tile);
    }
}

/// A staged world overlay: imported content plus the offset it will merge at.
///
/// Sessions hold one of these while the user previews and shifts an import;
/// committing calls [`merge_into`](Self::merge_into) and drops the fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFragment {
    pub world: TileWorld,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl WorldFragment {
    /// Stages `world` at offset zero.
    pub fn new(world: TileWorld) -> Self {
        WorldFragment {
            world,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// Shifts the staged offset by whole cells.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.offset_x = self.offset_x.saturating_add(dx);
        self.offset_y = self.offset_y.saturating_add(dy);
    }

    /// Merges the staged content into `base` at the current offset.
    pub fn merge_into(&self, base: &mut TileWorld) {
        merge(base, &self.world, self.offset_x, self.offset_y);
    }
}
