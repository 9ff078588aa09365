//! Neighbor occupancy bitmasks.
//!
//! Rows grow downward, so north is `row - 1`. Edge neighbors occupy bits
//! 0..=3 and corners bits 4..=7; rule tables index on the resulting mask.

use serde::{Deserialize, Serialize};

use tilesmith_core::{TileLayer, TileWorld};

/// North neighbor bit.
pub const MASK_NORTH: u8 = 1 << 0;
/// East neighbor bit.
pub const MASK_EAST: u8 = 1 << 1;
/// South neighbor bit.
pub const MASK_SOUTH: u8 = 1 << 2;
/// West neighbor bit.
pub const MASK_WEST: u8 = 1 << 3;
/// North-east corner bit.
pub const MASK_NORTH_EAST: u8 = 1 << 4;
/// South-east corner bit.
pub const MASK_SOUTH_EAST: u8 = 1 << 5;
/// South-west corner bit.
pub const MASK_SOUTH_WEST: u8 = 1 << 6;
/// North-west corner bit.
pub const MASK_NORTH_WEST: u8 = 1 << 7;

/// Edge neighbor offsets in bit order: north, east, south, west.
pub const EDGE_NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Corner neighbor offsets in bit order: NE, SE, SW, NW.
pub const CORNER_NEIGHBORS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// All eight neighbor offsets, edges first.
pub const ALL_NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Which neighbors participate in a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Edge neighbors only: 16 possible masks.
    #[default]
    FourWay,
    /// Edges plus corners: 256 masks, corners canonicalized.
    EightWay,
}

impl Connectivity {
    /// Number of distinct masks a rule table must cover.
    pub fn mask_count(&self) -> usize {
        match self {
            Connectivity::FourWay => 16,
            Connectivity::EightWay => 256,
        }
    }

    /// Offsets of the neighbors that receive cascade updates.
    pub fn neighbor_offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::FourWay => &EDGE_NEIGHBORS,
            Connectivity::EightWay => &ALL_NEIGHBORS,
        }
    }
}

/// Occupancy bitmask of a cell's neighbors on one layer.
///
/// Only occupancy matters; the neighbors' variants never enter the mask,
/// which is what keeps resolution idempotent. Eight-way masks are passed
/// through [`optimize_bitmask`] before lookup.
pub fn calculate_bitmask(
    world: &TileWorld,
    layer: TileLayer,
    col: i32,
    row: i32,
    connectivity: Connectivity,
) -> u8 {
    let mut mask = 0u8;
    for (bit, &(dx, dy)) in EDGE_NEIGHBORS.iter().enumerate() {
        if world.is_occupied(col.saturating_add(dx), row.saturating_add(dy), layer) {
            mask |= 1 << bit;
        }
    }
    if connectivity == Connectivity::EightWay {
        for (bit, &(dx, dy)) in CORNER_NEIGHBORS.iter().enumerate() {
            if world.is_occupied(col.saturating_add(dx), row.saturating_add(dy), layer) {
                mask |= 1 << (bit + 4);
            }
        }
        mask = optimize_bitmask(mask);
    }
    mask
}

/// Canonicalizes an eight-way mask.
///
/// A corner neighbor only changes a tile's shape when both of its adjacent
/// edges are occupied too, so unsupported corner bits are cleared. This cuts
/// the masks that can actually occur down to the 47 classic blob shapes.
pub fn optimize_bitmask(mask: u8) -> u8 {
    let mut out = mask;
    if out & (MASK_NORTH | MASK_EAST) != (MASK_NORTH | MASK_EAST) {
        out &= !MASK_NORTH_EAST;
    }
    if out & (MASK_SOUTH | MASK_EAST) != (MASK_SOUTH | MASK_EAST) {
        out &= !MASK_SOUTH_EAST;
    }
    if out & (MASK_SOUTH | MASK_WEST) != (MASK_SOUTH | MASK_WEST) {
        out &= !MASK_SOUTH_WEST;
    }
    if out & (MASK_NORTH | MASK_WEST) != (MASK_NORTH | MASK_WEST) {
        out &= !MASK_NORTH_WEST;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilesmith_core::Tile;

    fn block(index: u32) -> Tile {
        Tile::new(Some(index), None, None)
    }

    fn liquid(index: u32) -> Tile {
        Tile::new(None, Some(index), None)
    }

    #[test]
    fn test_four_way_mask() {
        let mut world = TileWorld::new();
        world.put(5, 5, block(0));
        world.put(5, 4, block(0)); // north
        world.put(6, 5, block(0)); // east

        let mask = calculate_bitmask(&world, TileLayer::Block, 5, 5, Connectivity::FourWay);
        assert_eq!(mask, MASK_NORTH | MASK_EAST);
    }

    #[test]
    fn test_mask_is_per_layer() {
        let mut world = TileWorld::new();
        world.put(5, 5, block(0));
        world.put(5, 4, liquid(0));

        let mask = calculate_bitmask(&world, TileLayer::Block, 5, 5, Connectivity::FourWay);
        assert_eq!(mask, 0);
        let mask = calculate_bitmask(&world, TileLayer::Liquid, 5, 5, Connectivity::FourWay);
        assert_eq!(mask, MASK_NORTH);
    }

    #[test]
    fn test_eight_way_corner_needs_both_edges() {
        let mut world = TileWorld::new();
        world.put(5, 5, block(0));
        world.put(6, 4, block(0)); // NE corner, no supporting edges

        let mask = calculate_bitmask(&world, TileLayer::Block, 5, 5, Connectivity::EightWay);
        assert_eq!(mask, 0);

        world.put(5, 4, block(0)); // north
        world.put(6, 5, block(0)); // east
        let mask = calculate_bitmask(&world, TileLayer::Block, 5, 5, Connectivity::EightWay);
        assert_eq!(mask, MASK_NORTH | MASK_EAST | MASK_NORTH_EAST);
    }

    #[test]
    fn test_optimize_bitmask() {
        assert_eq!(optimize_bitmask(MASK_NORTH_EAST), 0);
        assert_eq!(optimize_bitmask(MASK_NORTH_EAST | MASK_NORTH), MASK_NORTH);
        assert_eq!(
            optimize_bitmask(MASK_NORTH_EAST | MASK_NORTH | MASK_EAST),
            MASK_NORTH_EAST | MASK_NORTH | MASK_EAST
        );
        assert_eq!(optimize_bitmask(0xFF), 0xFF);
    }

    #[test]
    fn test_mask_on_missing_cell_reads_neighbors_only() {
        let mut world = TileWorld::new();
        world.put(4, 5, block(0));
        let mask = calculate_bitmask(&world, TileLayer::Block, 5, 5, Connectivity::FourWay);
        assert_eq!(mask, MASK_WEST);
    }
}
