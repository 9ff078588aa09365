//! Variant resolution and write-back.

use std::ops::RangeInclusive;

use tilesmith_core::{TileLayer, TileWorld};

use crate::mask::calculate_bitmask;
use crate::rules::AutotileRules;

/// Resolves tile variants for one layer against one rule table.
///
/// Resolution looks only at neighbor occupancy, never at neighbor variants,
/// and always stays inside the group of the cell's current value. Applying
/// twice without an occupancy change is therefore a no-op, and a cascade
/// touches nothing beyond the cell's own neighborhood.
#[derive(Debug, Clone, Copy)]
pub struct AutotileResolver<'a> {
    layer: TileLayer,
    rules: &'a AutotileRules,
}

impl<'a> AutotileResolver<'a> {
    pub fn new(layer: TileLayer, rules: &'a AutotileRules) -> Self {
        AutotileResolver { layer, rules }
    }

    /// The value the cell should hold, or `None` when the cell is absent on
    /// the layer.
    pub fn resolve(&self, world: &TileWorld, col: i32, row: i32) -> Option<u32> {
        let value = world.get(col, row)?.layer(self.layer)?;
        let group_size = self.rules.group_size.max(1);
        let group_base = value / group_size * group_size;
        let mask = calculate_bitmask(world, self.layer, col, row, self.rules.connectivity);
        Some(group_base + self.rules.variant_for(mask))
    }

    /// Writes the resolved variant back to the cell. With `cascade` set,
    /// each neighbor is re-resolved as well, without cascading further; this
    /// is the call that follows a paint or erase.
    pub fn apply(&self, world: &mut TileWorld, col: i32, row: i32, cascade: bool) {
        self.apply_cell(world, col, row);
        if cascade {
            for &(dx, dy) in self.rules.connectivity.neighbor_offsets() {
                self.apply_cell(world, col.saturating_add(dx), row.saturating_add(dy));
            }
        }
    }

    /// Re-resolves every occupied cell inside the given inclusive ranges.
    ///
    /// Merging keeps the variants a fragment carried, so nothing calls this
    /// automatically; run it over the merged bounds to reshape imported or
    /// generated content.
    pub fn apply_region(
        &self,
        world: &mut TileWorld,
        cols: RangeInclusive<i32>,
        rows: RangeInclusive<i32>,
    ) {
        let cells: Vec<(i32, i32)> = world
            .cells_in(cols, rows)
            .filter(|(_, tile)| tile.layer(self.layer).is_some())
            .map(|(cell, _)| cell)
            .collect();
        for (col, row) in cells {
            self.apply_cell(world, col, row);
        }
    }

    fn apply_cell(&self, world: &mut TileWorld, col: i32, row: i32) {
        let Some(resolved) = self.resolve(world, col, row) else {
            return;
        };
        let Some(tile) = world.get(col, row) else {
            return;
        };
        let mut updated = *tile;
        updated.set_layer(self.layer, Some(resolved));
        world.put(col, row, updated);
    }
}
