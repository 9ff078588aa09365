//! Mask→variant rule tables.
//!
//! Rules are data: a table maps every canonical neighbor mask to a variant
//! offset inside a tile group. Tables ship with projects as JSON and are
//! validated on load, so art packs with different layouts plug in without
//! code changes.

use serde::{Deserialize, Serialize};

use tilesmith_core::TileLayer;

use crate::mask::{Connectivity, MASK_EAST, MASK_NORTH, MASK_SOUTH, MASK_WEST};

/// Errors from [`AutotileRules::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    ZeroGroupSize,
    WrongTableLength { expected: usize, found: usize },
    OffsetOutOfGroup { offset: u32, group_size: u32 },
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::ZeroGroupSize => write!(f, "group size must be at least 1"),
            RulesError::WrongTableLength { expected, found } => {
                write!(f, "variant table holds {} entries, connectivity needs {}", found, expected)
            }
            RulesError::OffsetOutOfGroup { offset, group_size } => {
                write!(f, "variant offset {} outside group of {}", offset, group_size)
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// The autotile table for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileRules {
    /// Neighborhood the masks are computed over.
    #[serde(default)]
    pub connectivity: Connectivity,
    /// Catalog indices per logical tile.
    pub group_size: u32,
    /// Variant offset for each canonical mask.
    pub variants: Vec<u32>,
}

impl AutotileRules {
    /// Identity table: groups of 16, offset equal to the four-way mask.
    pub fn four_way_identity() -> Self {
        AutotileRules {
            connectivity: Connectivity::FourWay,
            group_size: 16,
            variants: (0..16).collect(),
        }
    }

    /// Groups of 9 laid out as a 3×3 patch.
    ///
    /// Column 0/1/2 of the patch is the left-edge, middle, and right-edge
    /// piece; rows run top-edge, middle, bottom-edge. Cells with no
    /// horizontal (or vertical) neighbors use the middle piece of that axis.
    pub fn patch_3x3() -> Self {
        let mut variants = Vec::with_capacity(16);
        for mask in 0..16u8 {
            let column = match (mask & MASK_WEST != 0, mask & MASK_EAST != 0) {
                (false, true) => 0,
                (true, false) => 2,
                _ => 1,
            };
            let row = match (mask & MASK_NORTH != 0, mask & MASK_SOUTH != 0) {
                (false, true) => 0,
                (true, false) => 2,
                _ => 1,
            };
            variants.push(row * 3 + column);
        }
        AutotileRules {
            connectivity: Connectivity::FourWay,
            group_size: 9,
            variants,
        }
    }

    /// Checks the table shape: a non-zero group, one entry per mask, every
    /// offset inside the group.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.group_size == 0 {
            return Err(RulesError::ZeroGroupSize);
        }
        let expected = self.connectivity.mask_count();
        if self.variants.len() != expected {
            return Err(RulesError::WrongTableLength {
                expected,
                found: self.variants.len(),
            });
        }
        if let Some(&offset) = self.variants.iter().find(|&&offset| offset >= self.group_size) {
            return Err(RulesError::OffsetOutOfGroup {
                offset,
                group_size: self.group_size,
            });
        }
        Ok(())
    }

    /// Variant offset for a canonical mask.
    pub fn variant_for(&self, mask: u8) -> u32 {
        self.variants.get(mask as usize).copied().unwrap_or(0)
    }
}

/// Optional rules per layer. Layers without rules are never reshaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<AutotileRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid: Option<AutotileRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactable: Option<AutotileRules>,
}

impl Default for AutotileConfig {
    /// 3×3 patch rules for the terrain-like layers, none for interactables.
    fn default() -> Self {
        AutotileConfig {
            block: Some(AutotileRules::patch_3x3()),
            liquid: Some(AutotileRules::patch_3x3()),
            interactable: None,
        }
    }
}

impl AutotileConfig {
    /// No rules on any layer.
    pub fn disabled() -> Self {
        AutotileConfig {
            block: None,
            liquid: None,
            interactable: None,
        }
    }

    /// Rules for one layer.
    pub fn rules_for(&self, layer: TileLayer) -> Option<&AutotileRules> {
        match layer {
            TileLayer::Block => self.block.as_ref(),
            TileLayer::Liquid => self.liquid.as_ref(),
            TileLayer::Interactable => self.interactable.as_ref(),
        }
    }

    /// Validates every configured table.
    pub fn validate(&self) -> Result<(), RulesError> {
        for layer in TileLayer::ALL {
            if let Some(rules) = self.rules_for(layer) {
                rules.validate()?;
            }
        }
        Ok(())
    }
}
