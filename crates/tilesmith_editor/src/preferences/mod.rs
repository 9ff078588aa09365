//! Editor preferences persisted across sessions.
//!
//! Preferences live in the platform config directory, not in world files:
//! recently opened worlds plus the defaults new sessions start from.

mod file;

pub use file::PreferencesError;

use serde::{Deserialize, Serialize};

/// Most recent worlds kept in the list.
pub const MAX_RECENT_WORLDS: usize = 10;

/// One entry in the recent worlds list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentWorld {
    pub path: String,
    pub name: String,
}

/// Cross-session editor settings.
///
/// Missing or unreadable preference files fall back to defaults; preferences
/// are never a reason the editor refuses to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorPreferences {
    /// Recently opened worlds, most recent first.
    #[serde(default)]
    pub recent_worlds: Vec<RecentWorld>,
    /// Tile size new sessions start at.
    #[serde(default = "default_tile_size")]
    pub default_tile_size: u32,
    /// Pan speed new sessions start at.
    #[serde(default = "default_pan_speed")]
    pub default_pan_speed: i32,
    /// Whether orientation inference starts enabled.
    #[serde(default = "default_infer_orientation")]
    pub infer_orientation: bool,
}

fn default_tile_size() -> u32 {
    40
}

fn default_pan_speed() -> i32 {
    2
}

fn default_infer_orientation() -> bool {
    true
}

impl Default for EditorPreferences {
    fn default() -> Self {
        EditorPreferences {
            recent_worlds: Vec::new(),
            default_tile_size: default_tile_size(),
            default_pan_speed: default_pan_speed(),
            infer_orientation: default_infer_orientation(),
        }
    }
}

impl EditorPreferences {
    /// Puts a world at the front of the recent list, deduplicated by path
    /// and capped at [`MAX_RECENT_WORLDS`].
    pub fn add_recent_world(&mut self, path: &str, name: &str) {
        self.recent_worlds.retain(|entry| entry.path != path);
        self.recent_worlds.insert(
            0,
            RecentWorld {
                path: path.to_string(),
                name: name.to_string(),
            },
        );
        self.recent_worlds.truncate(MAX_RECENT_WORLDS);
    }

    /// Drops one entry by path (after a file goes missing, for example).
    pub fn remove_recent_world(&mut self, path: &str) {
        self.recent_worlds.retain(|entry| entry.path != path);
    }

    /// Empties the recent list.
    pub fn clear_recent_worlds(&mut self) {
        self.recent_worlds.clear();
    }
}
