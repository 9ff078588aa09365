//! Editor state and orchestration for tilesmith worlds.
//!
//! This crate ties the primitives from `tilesmith_core` and the shaping
//! tables from `tilesmith_autotile` into an [`EditorSession`]: one value
//! owning the world, camera, selections, history, sprite catalogs, and any
//! staged import. Shells (a windowed frontend, a test harness) translate
//! input into [`EditorIntent`] values and feed them to
//! [`EditorSession::apply`]; everything else here supports that loop.
//!
//! Also provided: the on-disk world document ([`world_file`]), sprite
//! catalogs with zoom-aware rescaling ([`catalog`]), and persisted editor
//! preferences ([`preferences`]).

pub mod catalog;
pub mod intent;
pub mod preferences;
pub mod session;
pub mod world_file;

pub use catalog::{CatalogSet, SpriteCatalog, HOVER_OPACITY, IMPORT_OPACITY};
pub use intent::EditorIntent;
pub use preferences::{EditorPreferences, PreferencesError, RecentWorld, MAX_RECENT_WORLDS};
pub use session::{EditorSession, Selections, SessionConfig};
pub use world_file::{WorldFile, WorldFileError, FORMAT_VERSION};
