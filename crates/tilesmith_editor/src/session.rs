//! The editing session: all editor state, one transition function.

use std::path::Path;

use log::{debug, info};
use uuid::Uuid;

use tilesmith_autotile::{AutotileConfig, AutotileResolver};
use tilesmith_core::{
    Camera, EditHistory, SelectionGroup, TileBrush, TileLayer, TileWorld, Viewport, WorldFragment,
    DEFAULT_HISTORY_LIMIT,
};

use crate::catalog::CatalogSet;
use crate::intent::EditorIntent;
use crate::world_file::{WorldFile, WorldFileError};

/// Construction-time settings for an [`EditorSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// View the camera fills.
    pub viewport: Viewport,
    /// Tile size the session starts at.
    pub initial_tile_size: u32,
    /// Floor for zooming out.
    pub min_tile_size: u32,
    /// Pixels added or removed per zoom step.
    pub zoom_step: u32,
    /// Pan speed the camera starts at.
    pub initial_speed: i32,
    /// Autotile tables per layer.
    pub autotile: AutotileConfig,
    /// Whether orientation inference starts on.
    pub infer_orientation: bool,
    /// Undo/redo depth cap.
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            viewport: Viewport::new(1280, 800),
            initial_tile_size: 40,
            min_tile_size: Camera::DEFAULT_MIN_TILE_SIZE,
            zoom_step: 5,
            initial_speed: 2,
            autotile: AutotileConfig::default(),
            infer_orientation: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.initial_tile_size = tile_size;
        self
    }

    pub fn with_min_tile_size(mut self, min_tile_size: u32) -> Self {
        self.min_tile_size = min_tile_size;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_autotile(mut self, autotile: AutotileConfig) -> Self {
        self.autotile = autotile;
        self
    }

    pub fn with_infer_orientation(mut self, infer_orientation: bool) -> Self {
        self.infer_orientation = infer_orientation;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

/// One [`SelectionGroup`] per layer.
#[derive(Debug, Clone)]
pub struct Selections {
    block: SelectionGroup,
    liquid: SelectionGroup,
    interactable: SelectionGroup,
}

impl Selections {
    fn new(block_len: u32, liquid_len: u32, interactable_len: u32) -> Self {
        Selections {
            block: SelectionGroup::new(block_len),
            liquid: SelectionGroup::new(liquid_len),
            interactable: SelectionGroup::new(interactable_len),
        }
    }

    /// Selection state for one layer.
    pub fn layer(&self, layer: TileLayer) -> &SelectionGroup {
        match layer {
            TileLayer::Block => &self.block,
            TileLayer::Liquid => &self.liquid,
            TileLayer::Interactable => &self.interactable,
        }
    }

    fn layer_mut(&mut self, layer: TileLayer) -> &mut SelectionGroup {
        match layer {
            TileLayer::Block => &mut self.block,
            TileLayer::Liquid => &mut self.liquid,
            TileLayer::Interactable => &mut self.interactable,
        }
    }

    /// The paint candidate the current selections produce. Hidden
    /// selections contribute nothing.
    pub fn brush(&self) -> TileBrush {
        TileBrush::new(
            self.block.selection(),
            self.liquid.selection(),
            self.interactable.selection(),
        )
    }
}

/// An editing session: the world being edited plus every piece of editor
/// state, advanced exclusively through [`apply`](Self::apply).
///
/// Nothing here is global; shells own as many sessions as they need and
/// drive each one with [`EditorIntent`] values.
#[derive(Debug, Clone)]
pub struct EditorSession {
    world: TileWorld,
    camera: Camera,
    selections: Selections,
    history: EditHistory,
    catalogs: CatalogSet,
    autotile: AutotileConfig,
    pending_import: Option<WorldFragment>,
    document_id: Uuid,
    infer_orientation: bool,
    zoom_step: u32,
    dirty: bool,
}

impl EditorSession {
    /// A fresh session over an empty world.
    pub fn new(config: SessionConfig, mut catalogs: CatalogSet) -> Self {
        let mut camera =
            Camera::new(config.viewport, config.initial_tile_size, config.initial_speed)
                .with_min_tile_size(config.min_tile_size);
        // Camera::new clamps to the default floor; a starting size below it
        // only fits once the configured floor is in place.
        camera.set_tile_size(config.initial_tile_size);
        catalogs.rescale_all(camera.tile_size());
        let selections = Selections::new(
            catalogs.block.len(),
            catalogs.liquid.len(),
            catalogs.interactable.len(),
        );
        EditorSession {
            world: TileWorld::new(),
            camera,
            selections,
            history: EditHistory::with_limit(config.history_limit),
            catalogs,
            autotile: config.autotile,
            pending_import: None,
            document_id: Uuid::new_v4(),
            infer_orientation: config.infer_orientation,
            zoom_step: config.zoom_step,
            dirty: false,
        }
    }

    /// A session editing an existing world.
    pub fn with_world(config: SessionConfig, catalogs: CatalogSet, world: TileWorld) -> Self {
        let mut session = Self::new(config, catalogs);
        session.world = world;
        session
    }

    // ========================================================================
    // Accessors for shells
    // ========================================================================

    pub fn world(&self) -> &TileWorld {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Mutable catalogs, for renderers that memoize overlay variants.
    pub fn catalogs_mut(&mut self) -> &mut CatalogSet {
        &mut self.catalogs
    }

    pub fn pending_import(&self) -> Option<&WorldFragment> {
        self.pending_import.as_ref()
    }

    pub fn infer_orientation(&self) -> bool {
        self.infer_orientation
    }

    /// True when the world changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Stages a fragment obtained outside the file flow (clipboard, tests).
    pub fn stage_import(&mut self, fragment: WorldFragment) {
        self.pending_import = Some(fragment);
    }

    // ========================================================================
    // The transition function
    // ========================================================================

    /// Applies one intent.
    ///
    /// Only file-backed intents can fail; every other intent clamps or
    /// no-ops instead of erroring. A failed load, save, or import leaves the
    /// session exactly as it was.
    pub fn apply(&mut self, intent: EditorIntent) -> Result<(), WorldFileError> {
        match intent {
            EditorIntent::Pan { dx, dy } => self.camera.pan(dx, dy),
            EditorIntent::AdjustSpeed { delta } => self.camera.adjust_speed(delta),
            EditorIntent::ZoomIn => {
                self.zoom(self.camera.tile_size().saturating_add(self.zoom_step));
            }
            EditorIntent::ZoomOut => {
                self.zoom(self.camera.tile_size().saturating_sub(self.zoom_step));
            }
            EditorIntent::Teleport { x, y } => self.camera.teleport(x, y),
            EditorIntent::Select { layer, index } => {
                self.selections.layer_mut(layer).select(index);
            }
            EditorIntent::SelectGroup { layer, group } => {
                let group_size = self.group_size(layer);
                self.selections.layer_mut(layer).select_group(group, group_size);
            }
            EditorIntent::CycleSelection { layer, direction } => {
                let group_size = self.group_size(layer);
                let grouped = self.infer_orientation && self.autotile.rules_for(layer).is_some();
                self.selections
                    .layer_mut(layer)
                    .cycle(direction, group_size, grouped);
            }
            EditorIntent::ToggleHide { layer } => {
                self.selections.layer_mut(layer).toggle_hide();
            }
            EditorIntent::ToggleOrientationInference => {
                self.infer_orientation = !self.infer_orientation;
                debug!(
                    "orientation inference {}",
                    if self.infer_orientation { "on" } else { "off" }
                );
            }
            EditorIntent::Paint { px, py } => self.paint_at(px, py),
            EditorIntent::Erase { px, py } => self.erase_at(px, py),
            EditorIntent::PickTile { px, py } => self.pick_at(px, py),
            EditorIntent::Undo => self.undo(),
            EditorIntent::Redo => self.redo(),
            EditorIntent::ImportFragment { path } => return self.import_fragment(&path),
            EditorIntent::ShiftImport { dx, dy } => {
                if let Some(fragment) = self.pending_import.as_mut() {
                    fragment.shift(dx, dy);
                }
            }
            EditorIntent::MergeImport => self.merge_import(),
            EditorIntent::CancelImport => {
                self.pending_import = None;
            }
            EditorIntent::LoadWorld { path } => return self.load_world(&path),
            EditorIntent::SaveWorld { path } => return self.save_world(&path),
        }
        Ok(())
    }

    // ========================================================================
    // Pointer edits
    // ========================================================================

    fn paint_at(&mut self, px: i32, py: i32) {
        let brush = self.selections.brush();
        if brush.is_empty() {
            return;
        }
        let (col, row) = self.camera.to_world(px, py);
        self.history.checkpoint(&self.world);
        self.world.paint(col, row, &brush);
        self.reshape_after_edit(col, row);
        self.dirty = true;
        debug!("painted cell ({}, {})", col, row);
    }

    fn erase_at(&mut self, px: i32, py: i32) {
        let (col, row) = self.camera.to_world(px, py);
        if self.world.get(col, row).is_none() {
            return;
        }
        self.history.checkpoint(&self.world);
        self.world.remove(col, row);
        self.reshape_after_edit(col, row);
        self.dirty = true;
        debug!("erased cell ({}, {})", col, row);
    }

    fn pick_at(&mut self, px: i32, py: i32) {
        let (col, row) = self.camera.to_world(px, py);
        let Some(tile) = self.world.get(col, row).copied() else {
            return;
        };
        for layer in TileLayer::ALL {
            if let Some(value) = tile.layer(layer) {
                self.selections.layer_mut(layer).select(value);
            }
        }
        debug!("picked cell ({}, {})", col, row);
    }

    /// Re-resolves autotile variants around an edited cell, on every layer
    /// that has rules.
    fn reshape_after_edit(&mut self, col: i32, row: i32) {
        if !self.infer_orientation {
            return;
        }
        for layer in TileLayer::ALL {
            if let Some(rules) = self.autotile.rules_for(layer) {
                AutotileResolver::new(layer, rules).apply(&mut self.world, col, row, true);
            }
        }
    }

    fn group_size(&self, layer: TileLayer) -> u32 {
        self.autotile.rules_for(layer).map_or(1, |rules| rules.group_size)
    }

    // ========================================================================
    // History
    // ========================================================================

    fn undo(&mut self) {
        if let Some(previous) = self.history.undo(&self.world) {
            self.world = previous;
            self.dirty = true;
            debug!("undo ({} checkpoints left)", self.history.undo_depth());
        }
    }

    fn redo(&mut self) {
        if let Some(next) = self.history.redo(&self.world) {
            self.world = next;
            self.dirty = true;
            debug!("redo ({} redo steps left)", self.history.redo_depth());
        }
    }

    // ========================================================================
    // Import and files
    // ========================================================================

    fn import_fragment(&mut self, path: &Path) -> Result<(), WorldFileError> {
        let document = WorldFile::load(path)?;
        info!("staged import of {} cells", document.world.len());
        self.pending_import = Some(WorldFragment::new(document.world));
        Ok(())
    }

    fn merge_import(&mut self) {
        let Some(fragment) = self.pending_import.take() else {
            return;
        };
        self.history.checkpoint(&self.world);
        fragment.merge_into(&mut self.world);
        self.dirty = true;
        info!(
            "merged import at offset ({}, {})",
            fragment.offset_x, fragment.offset_y
        );
    }

    fn load_world(&mut self, path: &Path) -> Result<(), WorldFileError> {
        let document = WorldFile::load(path)?;
        self.world = document.world;
        self.document_id = document.id;
        self.history.clear();
        self.pending_import = None;
        self.dirty = false;
        Ok(())
    }

    fn save_world(&mut self, path: &Path) -> Result<(), WorldFileError> {
        WorldFile::with_id(self.document_id, self.world.clone()).save(path)?;
        self.dirty = false;
        Ok(())
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    fn zoom(&mut self, requested: u32) {
        let applied = self.camera.set_tile_size(requested);
        self.catalogs.rescale_all(applied);
        debug!("tile size {}", applied);
    }
}
