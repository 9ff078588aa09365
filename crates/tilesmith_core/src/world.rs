//! The sparse tile world.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::tile::{Tile, TileBrush, TileLayer};

/// A sparse, unbounded 2D tile map keyed by column, then row.
///
/// Columns and rows are signed; the world grows in any direction. Two
/// invariants hold after every operation: no stored tile is fully absent,
/// and no column map is empty. Ordered keys make [`bounds`](Self::bounds)
/// cheap, iteration deterministic, and serialization stable.
///
/// Cloning is a deep copy; snapshots taken for undo share nothing with the
/// live world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileWorld {
    columns: BTreeMap<i32, BTreeMap<i32, Tile>>,
}

impl TileWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile at a cell.
    pub fn get(&self, col: i32, row: i32) -> Option<&Tile> {
        self.columns.get(&col)?.get(&row)
    }

    /// Stores a tile. Writing a fully absent tile removes the cell instead,
    /// so empty tiles never reach the map.
    pub fn put(&mut self, col: i32, row: i32, tile: Tile) {
        if tile.is_empty() {
            self.remove(col, row);
            return;
        }
        self.columns.entry(col).or_default().insert(row, tile);
    }

    /// Paints a brush onto a cell: set layers replace, unset layers keep the
    /// existing value. An empty brush over an empty cell stores nothing.
    pub fn paint(&mut self, col: i32, row: i32, brush: &TileBrush) {
        let painted = brush.apply_to(self.get(col, row));
        self.put(col, row, painted);
    }

    /// Removes a cell, dropping its column when that leaves the column empty.
    pub fn remove(&mut self, col: i32, row: i32) -> Option<Tile> {
        let column = self.columns.get_mut(&col)?;
        let removed = column.remove(&row);
        if column.is_empty() {
            self.columns.remove(&col);
        }
        removed
    }

    /// True when `layer` holds a value at the cell.
    pub fn is_occupied(&self, col: i32, row: i32, layer: TileLayer) -> bool {
        self.get(col, row).is_some_and(|tile| tile.layer(layer).is_some())
    }

    /// Maximum column and row keys over all stored cells, `None` when empty.
    pub fn bounds(&self) -> Option<(i32, i32)> {
        let (&max_col, _) = self.columns.last_key_value()?;
        let max_row = self
            .columns
            .values()
            .filter_map(|column| column.last_key_value().map(|(&row, _)| row))
            .max()?;
        Some((max_col, max_row))
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates every cell in column, then row order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &Tile)> {
        self.columns.iter().flat_map(|(&col, column)| {
            column.iter().map(move |(&row, tile)| ((col, row), tile))
        })
    }

    /// Iterates the cells inside the given inclusive ranges, in key order.
    /// Inverted ranges select nothing, so queries built from a collapsed
    /// viewport are ordinary empty queries.
    pub fn cells_in(
        &self,
        cols: RangeInclusive<i32>,
        rows: RangeInclusive<i32>,
    ) -> impl Iterator<Item = ((i32, i32), &Tile)> + '_ {
        // BTreeMap::range panics on inverted bounds.
        let query = (!cols.is_empty() && !rows.is_empty()).then_some((cols, rows));
        query.into_iter().flat_map(move |(cols, rows)| {
            self.columns.range(cols).flat_map(move |(&col, column)| {
                column
                    .range(rows.clone())
                    .map(move |(&row, tile)| ((col, row), tile))
            })
        })
    }

    /// Drops fully absent tiles and empty columns. Worlds built through
    /// [`put`](Self::put) never need this; it repairs data deserialized from
    /// outside sources.
    pub fn normalize(&mut self) {
        for column in self.columns.values_mut() {
            column.retain(|_, tile| !tile.is_empty());
        }
        self.columns.retain(|_, column| !column.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(index: u32) -> Tile {
        Tile::new(Some(index), None, None)
    }

    #[test]
    fn test_put_get_remove() {
        let mut world = TileWorld::new();
        world.put(2, 3, block(7));
        assert_eq!(world.get(2, 3), Some(&block(7)));
        assert_eq!(world.len(), 1);

        let removed = world.remove(2, 3);
        assert_eq!(removed, Some(block(7)));
        assert!(world.is_empty());
        assert_eq!(world.bounds(), None);
    }

    #[test]
    fn test_remove_missing_cell_is_noop() {
        let mut world = TileWorld::new();
        world.put(0, 0, block(1));
        assert_eq!(world.remove(5, 5), None);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_put_empty_tile_removes_cell() {
        let mut world = TileWorld::new();
        world.put(4, 4, block(2));
        world.put(4, 4, Tile::EMPTY);
        assert!(world.is_empty());

        world.put(9, 9, Tile::EMPTY);
        assert!(world.is_empty());
    }

    #[test]
    fn test_paint_preserves_existing_layers() {
        let mut world = TileWorld::new();
        world.put(1, 1, block(5));
        world.paint(1, 1, &TileBrush::new(None, Some(3), None));
        assert_eq!(world.get(1, 1), Some(&Tile::new(Some(5), Some(3), None)));
    }

    #[test]
    fn test_paint_empty_brush_creates_nothing() {
        let mut world = TileWorld::new();
        world.paint(0, 0, &TileBrush::default());
        assert!(world.is_empty());
    }

    #[test]
    fn test_negative_keys_supported() {
        let mut world = TileWorld::new();
        world.put(-3, -7, block(1));
        assert_eq!(world.get(-3, -7), Some(&block(1)));
        assert_eq!(world.bounds(), Some((-3, -7)));
    }

    #[test]
    fn test_bounds_are_maxima_per_axis() {
        let mut world = TileWorld::new();
        world.put(2, 5, block(0));
        world.put(7, 1, block(0));
        assert_eq!(world.bounds(), Some((7, 5)));
    }

    #[test]
    fn test_cells_in_range() {
        let mut world = TileWorld::new();
        for col in 0..5 {
            for row in 0..5 {
                world.put(col, row, block((col * 5 + row) as u32));
            }
        }
        let cells: Vec<_> = world.cells_in(1..=2, 3..=4).map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![(1, 3), (1, 4), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_cells_in_inverted_range_is_empty() {
        let mut world = TileWorld::new();
        world.put(0, 0, block(1));

        assert_eq!(world.cells_in(5..=-5, 0..=0).count(), 0);
        assert_eq!(world.cells_in(0..=0, 3..=1).count(), 0);
        assert_eq!(world.cells_in(0..=0, 0..=0).count(), 1);
    }

    #[test]
    fn test_cells_in_from_collapsed_viewport() {
        use crate::camera::{Camera, Viewport};

        let mut world = TileWorld::new();
        world.put(0, 0, block(1));

        let camera = Camera::new(Viewport::new(0, 0), 10, 5);
        let (cols, rows) = camera.visible_cells();
        assert_eq!(world.cells_in(cols, rows).count(), 0);
    }

    #[test]
    fn test_iter_is_ordered() {
        let mut world = TileWorld::new();
        world.put(3, 0, block(0));
        world.put(-1, 2, block(1));
        world.put(-1, -2, block(2));
        let cells: Vec<_> = world.iter().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![(-1, -2), (-1, 2), (3, 0)]);
    }

    #[test]
    fn test_normalize_repairs_deserialized_data() {
        let json = r#"{"0":{"0":{"block":-1,"liquid":-1,"interactable":-1},"1":{"block":3,"liquid":-1,"interactable":-1}}}"#;
        let mut world: TileWorld = serde_json::from_str(json).unwrap();
        world.normalize();
        assert_eq!(world.len(), 1);
        assert_eq!(world.get(0, 1), Some(&block(3)));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut world = TileWorld::new();
        world.put(0, 5, Tile::new(Some(2), Some(1), None));
        world.put(-4, 0, block(9));
        let json = serde_json::to_string(&world).unwrap();
        let parsed: TileWorld = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, world);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut world = TileWorld::new();
        world.put(0, 0, block(1));
        let snapshot = world.clone();
        world.put(0, 0, block(2));
        assert_eq!(snapshot.get(0, 0), Some(&block(1)));
    }
}
