//! Split geometry: divider position -> source sub-rectangles.
//!
//! Every frame packs SEGMENT_COUNT equal-width segments side by side:
//! RGB | material | E | density | nu. The compare view draws segment 0 left
//! of the divider and the selected channel segment right of it, sampled so
//! both panes share one continuous coordinate space (a seamless wipe).

/// Fixed horizontal segment layout of every concatenated frame
pub const SEGMENT_COUNT: usize = 5;

/// Horizontal source span in concatenated-frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceSpan {
    pub x0: f32,
    pub x1: f32,
}

impl SourceSpan {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }
}

/// Maps divider positions from display space into segment space.
#[derive(Debug, Clone, Copy)]
pub struct SplitGeometry {
    /// Width of the whole concatenated source frame (all segments)
    pub source_width: f32,
    pub source_height: f32,
    /// Width the compare canvas is displayed at
    pub displayed_width: f32,
}

impl SplitGeometry {
    pub fn new(source_width: f32, source_height: f32, displayed_width: f32) -> Self {
        Self {
            source_width,
            source_height,
            displayed_width,
        }
    }

    /// Width of one channel segment in source pixels
    pub fn segment_width(&self) -> f32 {
        self.source_width / SEGMENT_COUNT as f32
    }

    /// Aspect ratio (w/h) of a single displayed pane
    pub fn pane_aspect(&self) -> f32 {
        self.segment_width() / self.source_height
    }

    /// Map a divider position from display space into segment space
    pub fn scaled_left(&self, divider: f32) -> f32 {
        divider * self.segment_width() / self.displayed_width
    }

    /// Source span of the left (RGB) pane: start of segment 0 up to the
    /// divider's position within that segment.
    pub fn left_span(&self, divider: f32) -> SourceSpan {
        SourceSpan {
            x0: 0.0,
            x1: self.scaled_left(divider),
        }
    }

    /// Source span of the right pane: the same intra-segment offset, inside
    /// the selected channel's segment (display level 0 = segment 1).
    pub fn right_span(&self, divider: f32, display_level: usize) -> SourceSpan {
        let seg = self.segment_width();
        let start = seg * (display_level + 1) as f32 + self.scaled_left(divider);
        SourceSpan {
            x0: start,
            x1: seg * (display_level + 2) as f32,
        }
    }

    /// Convert a source span to normalized texture u coordinates
    pub fn to_uv(&self, span: SourceSpan) -> (f32, f32) {
        (span.x0 / self.source_width, span.x1 / self.source_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-2, "{} != {}", a, b);
    }

    #[test]
    fn test_segment_width() {
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        assert_eq!(geo.segment_width(), 640.0);
    }

    #[test]
    fn test_divider_maps_into_segment_space() {
        // Reference values: 5 segments of 640px, divider at 118 of 960
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        assert_close(geo.scaled_left(118.0), 78.67);
    }

    #[test]
    fn test_right_pane_starts_in_selected_segment() {
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        let span = geo.right_span(118.0, 1);
        // segment 2 (display level 1) starts at 1280; offset 78.67 within it
        assert_close(span.x0, 1358.67);
        assert_close(span.x1, 1920.0);
        assert_close(span.width(), 640.0 - 78.67);
    }

    #[test]
    fn test_left_pane_samples_rgb_segment() {
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        let span = geo.left_span(480.0);
        assert_eq!(span.x0, 0.0);
        assert_close(span.x1, 320.0);
    }

    #[test]
    fn test_extremes_collapse_one_pane() {
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        // Divider fully left: left pane empty, right pane a whole segment
        assert_close(geo.left_span(0.0).width(), 0.0);
        assert_close(geo.right_span(0.0, 3).width(), 640.0);
        // Divider fully right: left pane a whole segment, right pane empty
        assert_close(geo.left_span(960.0).width(), 640.0);
        assert_close(geo.right_span(960.0, 0).width(), 0.0);
    }

    #[test]
    fn test_uv_normalization() {
        let geo = SplitGeometry::new(3200.0, 640.0, 960.0);
        let (u0, u1) = geo.to_uv(geo.right_span(0.0, 0));
        // Segment 1 spans u 0.2..0.4
        assert_close(u0, 0.2);
        assert_close(u1, 0.4);
    }
}
