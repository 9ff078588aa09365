//! Neighbor-driven tile variant selection.
//!
//! Tile art comes in groups: one logical tile (grass, water, stone) painted
//! as several variants whose edges face open space or connect to neighbors.
//! This crate picks the right variant automatically. Each edit computes an
//! occupancy bitmask of the edited cell's neighbors ([`calculate_bitmask`]),
//! looks it up in a data-driven table ([`AutotileRules`]), and writes the
//! group-relative variant back ([`AutotileResolver`]), optionally cascading
//! one step to the neighbors the edit affected.
//!
//! Tables are plain serde data, so art packs with different layouts (3×3
//! patches, 16-tile bitmask strips, 47-tile blobs) configure the same engine.

mod mask;
mod resolver;
mod rules;

pub use mask::{
    calculate_bitmask, optimize_bitmask, Connectivity, ALL_NEIGHBORS, CORNER_NEIGHBORS,
    EDGE_NEIGHBORS, MASK_EAST, MASK_NORTH, MASK_NORTH_EAST, MASK_NORTH_WEST, MASK_SOUTH,
    MASK_SOUTH_EAST, MASK_SOUTH_WEST, MASK_WEST,
};
pub use resolver::AutotileResolver;
pub use rules::{AutotileConfig, AutotileRules, RulesError};
