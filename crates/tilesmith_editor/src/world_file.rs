//! World documents on disk.
//!
//! Worlds persist as pretty-printed JSON. The current format wraps the tile
//! map in a small versioned document; files from earlier tools that contain
//! a bare column map (with `-1` layer sentinels) still load and are upgraded
//! to a fresh document on the next save.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tilesmith_core::TileWorld;

/// Current world document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from world file operations.
#[derive(Debug)]
pub enum WorldFileError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for WorldFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldFileError::IoError(e) => write!(f, "IO error: {}", e),
            WorldFileError::ParseError(e) => write!(f, "Parse error: {}", e),
            WorldFileError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for WorldFileError {}

/// A versioned world document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldFile {
    /// Format version, for migrations.
    pub version: u32,
    /// Stable identity across renames and saves.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The tile map itself.
    pub world: TileWorld,
}

impl WorldFile {
    /// Wraps a world in a fresh document.
    pub fn new(world: TileWorld) -> Self {
        Self::with_id(Uuid::new_v4(), world)
    }

    /// Wraps a world, keeping an existing document identity.
    pub fn with_id(id: Uuid, world: TileWorld) -> Self {
        WorldFile {
            version: FORMAT_VERSION,
            id,
            world,
        }
    }

    /// Parses a document from JSON, accepting the legacy bare-map format.
    pub fn from_json(content: &str) -> Result<Self, WorldFileError> {
        match serde_json::from_str::<WorldFile>(content) {
            Ok(mut document) => {
                document.world.normalize();
                Ok(document)
            }
            Err(document_error) => {
                // Legacy files are the bare column map.
                match serde_json::from_str::<TileWorld>(content) {
                    Ok(mut world) => {
                        warn!("world file uses the legacy bare-map format; it will be upgraded on save");
                        world.normalize();
                        Ok(WorldFile::new(world))
                    }
                    Err(_) => Err(WorldFileError::ParseError(document_error.to_string())),
                }
            }
        }
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WorldFileError> {
        serde_json::to_string_pretty(self).map_err(|e| WorldFileError::SerializeError(e.to_string()))
    }

    /// Loads a document from disk.
    pub fn load(path: &Path) -> Result<Self, WorldFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WorldFileError::IoError(e.to_string()))?;
        let document = Self::from_json(&content)?;
        info!("Loaded world from {:?} ({} cells)", path, document.world.len());
        Ok(document)
    }

    /// Saves the document to disk.
    pub fn save(&self, path: &Path) -> Result<(), WorldFileError> {
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| WorldFileError::IoError(e.to_string()))?;
        info!("Saved world to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilesmith_core::Tile;

    #[test]
    fn test_json_round_trip() {
        let mut world = TileWorld::new();
        world.put(0, 5, Tile::new(Some(2), Some(1), None));
        world.put(3, 0, Tile::new(Some(9), None, None));
        let document = WorldFile::new(world);

        let json = document.to_json().unwrap();
        let parsed = WorldFile::from_json(&json).unwrap();
        assert_eq!(parsed.version, FORMAT_VERSION);
        assert_eq!(parsed.id, document.id);
        assert_eq!(parsed.world, document.world);
    }

    #[test]
    fn test_json_keeps_layer_sentinels() {
        let mut world = TileWorld::new();
        world.put(0, 0, Tile::new(Some(2), None, None));
        let json = WorldFile::new(world).to_json().unwrap();
        assert!(json.contains("\"liquid\": -1"));
        assert!(json.contains("\"interactable\": -1"));
    }

    #[test]
    fn test_legacy_bare_map_loads() {
        let json = r#"{"4":{"7":{"block":3,"liquid":-1,"interactable":0}}}"#;
        let document = WorldFile::from_json(json).unwrap();
        assert_eq!(document.version, FORMAT_VERSION);
        assert!(!document.id.is_nil());
        assert_eq!(
            document.world.get(4, 7),
            Some(&Tile::new(Some(3), None, Some(0)))
        );
    }

    #[test]
    fn test_legacy_load_normalizes_empty_tiles() {
        let json = r#"{"0":{"0":{"block":-1,"liquid":-1,"interactable":-1}}}"#;
        let document = WorldFile::from_json(json).unwrap();
        assert!(document.world.is_empty());
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let error = WorldFile::from_json("not json at all").unwrap_err();
        assert!(matches!(error, WorldFileError::ParseError(_)));

        // Valid JSON that is neither format also fails.
        let error = WorldFile::from_json(r#"{"version":"nope"}"#).unwrap_err();
        assert!(matches!(error, WorldFileError::ParseError(_)));
    }

    #[test]
    fn test_missing_id_gets_generated() {
        let json = format!(
            r#"{{"version":{},"world":{{}}}}"#,
            FORMAT_VERSION
        );
        let document = WorldFile::from_json(&json).unwrap();
        assert!(!document.id.is_nil());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let error = WorldFile::load(Path::new("/nonexistent/world.json")).unwrap_err();
        assert!(matches!(error, WorldFileError::IoError(_)));
    }
}
