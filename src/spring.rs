//! Divider smoothing: a damped spring (PD controller) easing the divider
//! toward the pointer target.
//!
//! Not a physically exact spring: there is no mass term, velocity decays
//! geometrically each tick. Ticks run on a fixed 10 ms timestep driven by a
//! wall-clock accumulator, so smoothing keeps easing after the pointer is
//! released and late UI frames only cost smoothness, never correctness.

/// Proportional gain
pub const KP: f32 = 0.06;
/// Derivative (damping) gain
pub const KD: f32 = 0.25;
/// Fixed spring timestep
pub const TICK_SECONDS: f32 = 0.010;
/// Targets within this distance of an edge snap fully to that edge
pub const EDGE_SNAP_PADDING: f32 = 10.0;

/// Cap on ticks replayed after a long stall (~10 frames worth)
const MAX_TICKS_PER_ADVANCE: u32 = 16;

/// Per-widget divider state: smoothed position, pointer target, drag flag.
#[derive(Debug, Clone)]
pub struct DividerSpring {
    /// Smoothed position actually rendered (px from widget left edge)
    pub current: f32,
    /// Last pointer-driven target; kept after release so easing continues
    target: Option<f32>,
    /// Persists across ticks
    velocity: f32,
    dragging: bool,
    accumulator: f32,
}

impl Default for DividerSpring {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl DividerSpring {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: None,
            velocity: 0.0,
            dragging: false,
            accumulator: 0.0,
        }
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer-down: enter Dragging and set the target
    pub fn begin_drag(&mut self, x: f32) {
        self.dragging = true;
        self.target = Some(x);
    }

    /// Pointer move: updates the target only while in Dragging
    pub fn drag_to(&mut self, x: f32) {
        if self.dragging {
            self.target = Some(x);
        }
    }

    /// Pointer-up. Callers invoke this on release anywhere, for every
    /// divider instance at once (observed behavior of the original page:
    /// a release clears dragging globally, not just on the dragged widget).
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Jump without animation (used when the canvas first gets a size)
    pub fn reset_to(&mut self, x: f32) {
        self.current = x;
        self.target = None;
        self.velocity = 0.0;
        self.accumulator = 0.0;
    }

    /// Whether the divider is still visibly easing (repaint wanted)
    pub fn is_animating(&self) -> bool {
        if self.velocity.abs() > 0.01 {
            return true;
        }
        match self.target {
            Some(t) => (t - self.current).abs() > 0.5,
            None => false,
        }
    }

    /// One fixed spring step against a widget of the given width.
    pub fn tick(&mut self, width: f32) {
        if let Some(mut target) = self.target {
            // Snap-to-edge: full-before / full-after near the extremes
            if target <= EDGE_SNAP_PADDING {
                target = 0.0;
            }
            if target >= width - EDGE_SNAP_PADDING {
                target = width;
            }
            self.velocity += KP * (target - self.current);
        }
        self.velocity -= KD * self.velocity;
        self.current += self.velocity;
    }

    /// Advance by wall-clock time, replaying fixed ticks. A stall longer
    /// than MAX_TICKS_PER_ADVANCE ticks is coalesced (skipped ticks mean a
    /// less smooth animation, never a correctness issue).
    pub fn advance(&mut self, dt: f32, width: f32) {
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= TICK_SECONDS {
            self.accumulator -= TICK_SECONDS;
            if ticks < MAX_TICKS_PER_ADVANCE {
                self.tick(width);
                ticks += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tick_reference_values() {
        // target=500, current=100, velocity=0:
        // velocity = 0.06*400 = 24, damped to 18, position 100+18 = 118
        let mut spring = DividerSpring::new(100.0);
        spring.begin_drag(500.0);
        spring.tick(960.0);
        assert!((spring.velocity - 18.0).abs() < 1e-3);
        assert!((spring.current - 118.0).abs() < 1e-3);
    }

    #[test]
    fn test_velocity_persists_across_ticks() {
        let mut spring = DividerSpring::new(100.0);
        spring.begin_drag(500.0);
        spring.tick(960.0);
        spring.tick(960.0);
        // Second tick: v = (18 + 0.06*(500-118)) * 0.75
        let expected_v = (18.0 + 0.06 * (500.0 - 118.0)) * 0.75;
        assert!((spring.velocity - expected_v).abs() < 1e-4);
        assert!((spring.current - (118.0 + expected_v)).abs() < 1e-4);
    }

    #[test]
    fn test_target_snaps_to_left_edge() {
        let mut spring = DividerSpring::new(50.0);
        spring.begin_drag(EDGE_SNAP_PADDING); // exactly at the threshold
        spring.tick(960.0);
        // Snapped target is 0, so the first velocity pulls toward 0
        assert!((spring.velocity - 0.06 * (0.0 - 50.0) * 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_target_snaps_to_right_edge() {
        let width = 960.0;
        let mut spring = DividerSpring::new(900.0);
        spring.begin_drag(width - 5.0);
        spring.tick(width);
        assert!((spring.velocity - 0.06 * (width - 900.0) * 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_easing_continues_after_release() {
        let mut spring = DividerSpring::new(0.0);
        spring.begin_drag(500.0);
        spring.tick(960.0);
        spring.end_drag();
        assert!(!spring.dragging());
        let before = spring.current;
        spring.tick(960.0);
        // Target is retained, divider keeps moving toward it
        assert!(spring.current > before);
        assert!(spring.is_animating());
    }

    #[test]
    fn test_press_without_move_sets_target() {
        // A hold with no pointer movement must already ease toward the
        // press point
        let mut spring = DividerSpring::new(100.0);
        spring.begin_drag(300.0);
        spring.tick(960.0);
        assert!(spring.dragging());
        assert!(spring.current > 100.0);
    }

    #[test]
    fn test_drag_to_ignored_when_idle() {
        let mut spring = DividerSpring::new(10.0);
        spring.drag_to(300.0);
        spring.tick(960.0);
        assert_eq!(spring.current, 10.0);
    }

    #[test]
    fn test_advance_accumulates_fixed_ticks() {
        let mut a = DividerSpring::new(100.0);
        a.begin_drag(500.0);
        a.advance(0.035, 960.0); // 3 full ticks, 5ms left over

        let mut b = DividerSpring::new(100.0);
        b.begin_drag(500.0);
        for _ in 0..3 {
            b.tick(960.0);
        }
        assert_eq!(a.current, b.current);
    }

    #[test]
    fn test_long_stall_is_coalesced() {
        let mut spring = DividerSpring::new(100.0);
        spring.begin_drag(500.0);
        spring.advance(5.0, 960.0);
        // Bounded work, and the spring must not have exploded past the target
        assert!(spring.current <= 500.0 + 1.0);
    }

    #[test]
    fn test_converges_to_target() {
        let mut spring = DividerSpring::new(0.0);
        spring.begin_drag(500.0);
        for _ in 0..500 {
            spring.tick(960.0);
        }
        assert!((spring.current - 500.0).abs() < 0.5);
        assert!(!spring.is_animating());
    }
}
