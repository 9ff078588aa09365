//! The editing viewpoint: integer-pixel position, pan speed, and zoom.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Pixel dimensions of the view the camera fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

/// The editing viewpoint.
///
/// The position is the world pixel displayed at the viewport center. Both
/// axes are clamped to a lower bound derived from the viewport and the
/// current tile size, which keeps the world origin within a tile of the
/// top-left view edge; there is no upper bound. Zoom is expressed as the
/// tile size in pixels and never drops below the configured floor, so cells
/// always keep a visible extent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    x: i32,
    y: i32,
    speed: i32,
    tile_size: u32,
    min_tile_size: u32,
    viewport: Viewport,
}

impl Camera {
    /// Slowest pan speed, pixels per step.
    pub const MIN_SPEED: i32 = 1;
    /// Fastest pan speed, pixels per step.
    pub const MAX_SPEED: i32 = 25;
    /// Zoom floor unless overridden with
    /// [`with_min_tile_size`](Self::with_min_tile_size).
    pub const DEFAULT_MIN_TILE_SIZE: u32 = 5;

    /// A camera parked at the lower bound of both axes.
    pub fn new(viewport: Viewport, tile_size: u32, speed: i32) -> Self {
        let mut camera = Camera {
            x: 0,
            y: 0,
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            tile_size: tile_size.max(Self::DEFAULT_MIN_TILE_SIZE),
            min_tile_size: Self::DEFAULT_MIN_TILE_SIZE,
            viewport,
        };
        camera.x = camera.min_x();
        camera.y = camera.min_y();
        camera
    }

    /// Overrides the zoom floor (at least 1).
    pub fn with_min_tile_size(mut self, min_tile_size: u32) -> Self {
        self.min_tile_size = min_tile_size.max(1);
        self.tile_size = self.tile_size.max(self.min_tile_size);
        self.clamp_position();
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Lower bound of the x position for the current tile size.
    pub fn min_x(&self) -> i32 {
        self.viewport.width as i32 / 2 - self.tile_size as i32
    }

    /// Lower bound of the y position for the current tile size.
    pub fn min_y(&self) -> i32 {
        self.viewport.height as i32 / 2 - self.tile_size as i32
    }

    /// Moves the position by pixels, clamped to the per-axis lower bounds.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self.clamp_position();
    }

    /// Jumps to an absolute position, clamped like [`pan`](Self::pan).
    /// Out-of-bounds targets are corrected silently, never rejected.
    pub fn teleport(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.clamp_position();
    }

    /// Adjusts the pan speed, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn adjust_speed(&mut self, delta: i32) {
        self.speed = self
            .speed
            .saturating_add(delta)
            .clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    /// Changes the zoom level (tile size in pixels).
    ///
    /// The requested size is clamped to the floor, then the position
    /// rescales proportionally per axis so the tile at the view center stays
    /// centered. Returns the size actually applied; callers owning sprite
    /// catalogs rescale them to it.
    pub fn set_tile_size(&mut self, tile_size: u32) -> u32 {
        let old = self.tile_size;
        let new = tile_size.max(self.min_tile_size);
        if new != old {
            self.tile_size = new;
            self.x = rescale(self.x, old, new);
            self.y = rescale(self.y, old, new);
            self.clamp_position();
        }
        self.tile_size
    }

    /// Screen pixel of a cell's top-left corner.
    pub fn to_screen(&self, col: i32, row: i32) -> (i32, i32) {
        let tile = self.tile_size as i64;
        let px = col as i64 * tile - self.x as i64 + (self.viewport.width / 2) as i64;
        let py = row as i64 * tile - self.y as i64 + (self.viewport.height / 2) as i64;
        (px as i32, py as i32)
    }

    /// Cell containing a screen pixel. Exact inverse of
    /// [`to_screen`](Self::to_screen) for every cell, negatives included.
    pub fn to_world(&self, px: i32, py: i32) -> (i32, i32) {
        let tile = self.tile_size as i64;
        let wx = px as i64 - (self.viewport.width / 2) as i64 + self.x as i64;
        let wy = py as i64 - (self.viewport.height / 2) as i64 + self.y as i64;
        (wx.div_euclid(tile) as i32, wy.div_euclid(tile) as i32)
    }

    /// Column and row ranges intersecting the viewport. A zero-size
    /// viewport yields inverted ranges, which are empty.
    pub fn visible_cells(&self) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let (first_col, first_row) = self.to_world(0, 0);
        let (last_col, last_row) = self.to_world(
            self.viewport.width as i32 - 1,
            self.viewport.height as i32 - 1,
        );
        (first_col..=last_col, first_row..=last_row)
    }

    fn clamp_position(&mut self) {
        self.x = self.x.max(self.min_x());
        self.y = self.y.max(self.min_y());
    }
}

fn rescale(position: i32, old_size: u32, new_size: u32) -> i32 {
    (position as i64 * new_size as i64 / old_size as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Viewport::new(800, 600), 10, 2)
    }

    #[test]
    fn test_starts_at_lower_bounds() {
        let camera = camera();
        assert_eq!(camera.position(), (390, 290));
        assert_eq!(camera.min_x(), 390);
        assert_eq!(camera.min_y(), 290);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let mut camera = camera();
        camera.teleport(523, 411);
        for col in -5..=5 {
            for row in -5..=5 {
                let (px, py) = camera.to_screen(col, row);
                assert_eq!(camera.to_world(px, py), (col, row));
            }
        }
    }

    #[test]
    fn test_round_trip_with_odd_tile_size() {
        let mut camera = Camera::new(Viewport::new(1280, 800), 17, 2);
        camera.teleport(999, 777);
        for col in -3..=7 {
            for row in -3..=7 {
                let (px, py) = camera.to_screen(col, row);
                assert_eq!(camera.to_world(px, py), (col, row));
            }
        }
    }

    #[test]
    fn test_pan_clamps_to_minimum() {
        let mut camera = camera();
        camera.pan(-10_000, -10_000);
        assert_eq!(camera.position(), (390, 290));

        camera.pan(15, 7);
        assert_eq!(camera.position(), (405, 297));
    }

    #[test]
    fn test_teleport_clamps() {
        let mut camera = camera();
        camera.teleport(-50, 5000);
        assert_eq!(camera.position(), (390, 5000));
    }

    #[test]
    fn test_speed_clamped_both_ends() {
        let mut camera = camera();
        camera.adjust_speed(1000);
        assert_eq!(camera.speed(), Camera::MAX_SPEED);
        camera.adjust_speed(-1000);
        assert_eq!(camera.speed(), Camera::MIN_SPEED);
        camera.adjust_speed(3);
        assert_eq!(camera.speed(), Camera::MIN_SPEED + 3);
    }

    #[test]
    fn test_zoom_rescales_position_proportionally() {
        let mut camera = camera();
        camera.teleport(500, 400);
        let applied = camera.set_tile_size(20);
        assert_eq!(applied, 20);
        assert_eq!(camera.position(), (1000, 800));
    }

    #[test]
    fn test_zoom_keeps_center_cell() {
        let mut camera = camera();
        camera.teleport(600, 400);
        let center_before = camera.to_world(400, 300);
        camera.set_tile_size(20);
        assert_eq!(camera.to_world(400, 300), center_before);
    }

    #[test]
    fn test_zoom_floor() {
        let mut camera = camera();
        camera.teleport(500, 400);
        let applied = camera.set_tile_size(1);
        assert_eq!(applied, Camera::DEFAULT_MIN_TILE_SIZE);
        // Rescaled by the applied ratio 5/10, not the requested one.
        assert_eq!(camera.position(), (395, 295));
    }

    #[test]
    fn test_zoom_at_floor_is_stable() {
        let mut camera = camera();
        camera.set_tile_size(5);
        let position = camera.position();
        camera.set_tile_size(3);
        assert_eq!(camera.tile_size(), 5);
        assert_eq!(camera.position(), position);
    }

    #[test]
    fn test_custom_zoom_floor() {
        let mut camera = Camera::new(Viewport::new(800, 600), 10, 2).with_min_tile_size(8);
        assert_eq!(camera.set_tile_size(2), 8);
    }

    #[test]
    fn test_visible_cells_cover_viewport_corners() {
        let mut camera = camera();
        camera.teleport(1234, 987);
        let (cols, rows) = camera.visible_cells();
        let top_left = camera.to_world(0, 0);
        let bottom_right = camera.to_world(799, 599);
        assert!(cols.contains(&top_left.0) && cols.contains(&bottom_right.0));
        assert!(rows.contains(&top_left.1) && rows.contains(&bottom_right.1));
    }

    #[test]
    fn test_visible_cells_of_zero_viewport_are_empty() {
        let camera = Camera::new(Viewport::new(0, 0), 10, 5);
        let (cols, rows) = camera.visible_cells();
        assert!(cols.is_empty());
        assert!(rows.is_empty());
    }
}
