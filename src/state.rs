//! Viewer UI state: the explicit state object shared by the compare view
//! and the input widgets.
//!
//! Owned by the app and passed by reference; initialized once at startup
//! and lives for the process lifetime (no teardown).

use serde::{Deserialize, Serialize};

use crate::spring::DividerSpring;

/// Shared UI state for one compare widget.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerState {
    /// Which auxiliary channel the right pane shows (index into the
    /// manifest's channel list). Always a declared channel index.
    pub display_level: usize,
    /// Divider smoothing state (runtime only)
    #[serde(skip)]
    pub divider: DividerSpring,
    /// Carousel horizontal scroll offset
    #[serde(skip)]
    pub carousel_offset: f32,
    /// Canvas width of the previous frame; 0 means no layout happened yet
    #[serde(skip)]
    pub last_canvas_width: f32,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            display_level: 0,
            divider: DividerSpring::default(),
            carousel_offset: 0.0,
            last_canvas_width: 0.0,
        }
    }
}

impl ViewerState {
    /// Clamp persisted state against the declared channel count (a manifest
    /// edit between runs may have removed channels).
    pub fn sanitize(&mut self, channel_count: usize) {
        if channel_count > 0 && self.display_level >= channel_count {
            self.display_level = 0;
        }
    }
}
