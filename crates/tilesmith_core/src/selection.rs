//! Per-catalog selection state.

use serde::{Deserialize, Serialize};

/// Direction for [`SelectionGroup::cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDirection {
    Previous,
    Next,
}

/// Selection state over one sprite catalog.
///
/// Holds the current pick plus a single-level hidden slot: hiding stashes
/// the pick and clears it, the next toggle restores it. Explicit picks and
/// cycling restore a pending hide first, so a stale hide never clobbers a
/// fresh selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionGroup {
    catalog_len: u32,
    current: Option<u32>,
    hidden: Option<u32>,
}

impl SelectionGroup {
    /// No selection, nothing hidden.
    pub fn new(catalog_len: u32) -> Self {
        SelectionGroup {
            catalog_len,
            current: None,
            hidden: None,
        }
    }

    pub fn catalog_len(&self) -> u32 {
        self.catalog_len
    }

    pub fn selection(&self) -> Option<u32> {
        self.current
    }

    /// True while a hidden selection waits to be restored.
    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }

    /// Picks an index, clamped to the last catalog entry. No-op on an empty
    /// catalog.
    pub fn select(&mut self, index: u32) {
        self.prepare();
        if self.catalog_len == 0 {
            return;
        }
        self.current = Some(index.min(self.catalog_len - 1));
    }

    /// Jumps to the first index of `group` (numeric hotkeys).
    pub fn select_group(&mut self, group: u32, group_size: u32) {
        self.select(group.saturating_mul(group_size));
    }

    /// Clears the selection; nothing will paint on this layer.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Restores a pending hidden selection, if any. Called internally before
    /// every explicit pick and cycle.
    pub fn prepare(&mut self) {
        if self.hidden.is_some() {
            self.toggle_hide();
        }
    }

    /// Hides the current selection, or restores the previously hidden one.
    ///
    /// Exactly one level deep: hide stashes and clears, the next toggle
    /// restores. Hiding when nothing is selected is a no-op.
    pub fn toggle_hide(&mut self) {
        match self.hidden.take() {
            Some(stashed) => {
                if self.catalog_len > 0 {
                    self.current = Some(stashed.min(self.catalog_len - 1));
                }
            }
            None => {
                self.hidden = self.current.take();
            }
        }
    }

    /// Steps the selection.
    ///
    /// With `grouped` set, the catalog is treated as consecutive groups of
    /// `group_size` and the selection jumps to the first index of the
    /// neighboring group, wrapping at the ends; with no current selection
    /// the current group counts as group 0. Ungrouped cycling moves a single
    /// index with the same wrap. A pending hide is restored first.
    pub fn cycle(&mut self, direction: CycleDirection, group_size: u32, grouped: bool) {
        self.prepare();
        if self.catalog_len == 0 {
            return;
        }
        let len = self.catalog_len;
        let target = if grouped {
            let group_size = if group_size == 0 { len } else { group_size.min(len) };
            let group_count = (len / group_size).max(1);
            let current_group = self.current.map_or(0, |index| index / group_size);
            let next_group = match direction {
                CycleDirection::Next => (current_group + 1) % group_count,
                CycleDirection::Previous => (current_group + group_count - 1) % group_count,
            };
            next_group * group_size
        } else {
            match direction {
                CycleDirection::Next => self.current.map_or(0, |index| (index + 1) % len),
                CycleDirection::Previous => match self.current {
                    None | Some(0) => len - 1,
                    Some(index) => index - 1,
                },
            }
        };
        self.current = Some(target.min(len - 1));
    }
}
