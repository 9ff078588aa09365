//! Tiles and the painting brush.
//!
//! A [`Tile`] is one cell of the world with three independent layers. Each
//! layer either holds an index into that layer's sprite catalog or is absent.
//! World files written by earlier tools store absent layers as `-1`; the
//! serde representation keeps that sentinel while the in-memory type uses
//! `Option`.

use serde::{Deserialize, Serialize};

/// Identifies one of the three layers of a [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayer {
    /// Solid terrain.
    Block,
    /// Water, lava, and friends.
    Liquid,
    /// Doors, levers, pickups.
    Interactable,
}

impl TileLayer {
    /// All layers, in paint order.
    pub const ALL: [TileLayer; 3] = [
        TileLayer::Block,
        TileLayer::Liquid,
        TileLayer::Interactable,
    ];

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            TileLayer::Block => "Block",
            TileLayer::Liquid => "Liquid",
            TileLayer::Interactable => "Interactable",
        }
    }
}

/// One cell of a [`TileWorld`](crate::TileWorld).
///
/// Layers are independent: a cell can hold a block and a liquid at once.
/// A tile with all three layers absent is never stored; writing one is
/// equivalent to removing the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Block layer value.
    #[serde(with = "layer_index", default)]
    pub block: Option<u32>,
    /// Liquid layer value.
    #[serde(with = "layer_index", default)]
    pub liquid: Option<u32>,
    /// Interactable layer value.
    #[serde(with = "layer_index", default)]
    pub interactable: Option<u32>,
}

impl Tile {
    /// A tile with every layer absent.
    pub const EMPTY: Tile = Tile {
        block: None,
        liquid: None,
        interactable: None,
    };

    pub const fn new(block: Option<u32>, liquid: Option<u32>, interactable: Option<u32>) -> Self {
        Tile {
            block,
            liquid,
            interactable,
        }
    }

    /// True when every layer is absent.
    pub fn is_empty(&self) -> bool {
        self.block.is_none() && self.liquid.is_none() && self.interactable.is_none()
    }

    /// Value of one layer.
    pub fn layer(&self, layer: TileLayer) -> Option<u32> {
        match layer {
            TileLayer::Block => self.block,
            TileLayer::Liquid => self.liquid,
            TileLayer::Interactable => self.interactable,
        }
    }

    /// Sets one layer.
    pub fn set_layer(&mut self, layer: TileLayer, value: Option<u32>) {
        match layer {
            TileLayer::Block => self.block = value,
            TileLayer::Liquid => self.liquid = value,
            TileLayer::Interactable => self.interactable = value,
        }
    }
}

/// A paint candidate: per layer, `Some(index)` sets the layer and `None`
/// keeps whatever the cell already holds. Painting never clears a layer;
/// clearing is the eraser's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileBrush {
    pub block: Option<u32>,
    pub liquid: Option<u32>,
    pub interactable: Option<u32>,
}

impl TileBrush {
    pub const fn new(block: Option<u32>, liquid: Option<u32>, interactable: Option<u32>) -> Self {
        TileBrush {
            block,
            liquid,
            interactable,
        }
    }

    /// True when no layer would be set.
    pub fn is_empty(&self) -> bool {
        self.block.is_none() && self.liquid.is_none() && self.interactable.is_none()
    }

    /// The tile that results from painting over `existing`.
    pub fn apply_to(&self, existing: Option<&Tile>) -> Tile {
        let current = existing.copied().unwrap_or(Tile::EMPTY);
        Tile {
            block: self.block.or(current.block),
            liquid: self.liquid.or(current.liquid),
            interactable: self.interactable.or(current.interactable),
        }
    }
}

/// Serde adapter keeping the legacy `-1` sentinel for absent layer values.
mod layer_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_i64(*index as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(None)
        } else {
            u32::try_from(raw)
                .map(Some)
                .map_err(|_| serde::de::Error::custom("tile index out of range"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_preserves_unset_layers() {
        let existing = Tile::new(Some(5), None, None);
        let brush = TileBrush::new(None, Some(3), None);
        let painted = brush.apply_to(Some(&existing));
        assert_eq!(painted, Tile::new(Some(5), Some(3), None));
    }

    #[test]
    fn test_brush_overwrites_set_layers() {
        let existing = Tile::new(Some(5), Some(1), None);
        let brush = TileBrush::new(Some(7), None, None);
        let painted = brush.apply_to(Some(&existing));
        assert_eq!(painted, Tile::new(Some(7), Some(1), None));
    }

    #[test]
    fn test_brush_on_missing_cell() {
        let brush = TileBrush::new(Some(2), None, None);
        assert_eq!(brush.apply_to(None), Tile::new(Some(2), None, None));
    }

    #[test]
    fn test_empty_brush_produces_empty_tile() {
        let brush = TileBrush::default();
        assert!(brush.is_empty());
        assert!(brush.apply_to(None).is_empty());
    }

    #[test]
    fn test_layer_accessors() {
        let mut tile = Tile::new(Some(1), None, Some(4));
        assert_eq!(tile.layer(TileLayer::Block), Some(1));
        assert_eq!(tile.layer(TileLayer::Liquid), None);
        assert_eq!(tile.layer(TileLayer::Interactable), Some(4));
        tile.set_layer(TileLayer::Liquid, Some(9));
        assert_eq!(tile.liquid, Some(9));
    }

    #[test]
    fn test_serde_keeps_sentinel() {
        let tile = Tile::new(Some(2), None, None);
        let json = serde_json::to_string(&tile).unwrap();
        assert_eq!(json, r#"{"block":2,"liquid":-1,"interactable":-1}"#);
        let parsed: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tile);
    }

    #[test]
    fn test_serde_reads_any_negative_as_absent() {
        let parsed: Tile =
            serde_json::from_str(r#"{"block":-7,"liquid":0,"interactable":-1}"#).unwrap();
        assert_eq!(parsed, Tile::new(None, Some(0), None));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TileLayer::Block.display_name(), "Block");
        assert_eq!(TileLayer::ALL.len(), 3);
    }
}
