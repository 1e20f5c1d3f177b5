//! Playback engine for looping demo scenes.
//!
//! Wall-clock timing against the clip fps: `update()` is called every UI
//! frame and advances at most one frame when enough time has elapsed, so a
//! late frame costs smoothness only. Scenes are loops, so looping is always
//! on and reaching the end wraps to frame 0.

use log::debug;
use std::time::Instant;

/// Playback state for the active scene.
pub struct Player {
    pub is_playing: bool,
    playhead: usize,
    last_frame_time: Option<Instant>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            playhead: 0,
            last_frame_time: None,
        }
    }

    /// Current frame index within the active scene
    pub fn playhead(&self) -> usize {
        self.playhead
    }

    /// Advance playback; call once per UI frame.
    pub fn update(&mut self, frame_count: usize, fps: f32) {
        if !self.is_playing || frame_count == 0 || fps <= 0.0 {
            return;
        }

        let now = Instant::now();
        match self.last_frame_time {
            Some(last) => {
                let elapsed = now.duration_since(last).as_secs_f32();
                if elapsed >= 1.0 / fps {
                    self.advance(frame_count);
                    self.last_frame_time = Some(now);
                }
            }
            None => self.last_frame_time = Some(now),
        }
    }

    /// One frame forward, wrapping at the end of the loop.
    pub fn advance(&mut self, frame_count: usize) {
        if frame_count == 0 {
            return;
        }
        let next = self.playhead + 1;
        if next >= frame_count {
            debug!("Loop: {} -> 0", self.playhead);
            self.playhead = 0;
        } else {
            self.playhead = next;
        }
    }

    /// Toggle play/pause. No-op when there is no active scene.
    pub fn play_pause(&mut self, frame_count: usize) {
        if frame_count == 0 {
            return;
        }
        self.is_playing = !self.is_playing;
        self.last_frame_time = None;
        debug!(
            "Playback {} at frame {}",
            if self.is_playing { "started" } else { "paused" },
            self.playhead
        );
    }

    /// Scene switch: rewind to frame 0 and start playing.
    pub fn restart(&mut self) {
        self.playhead = 0;
        self.is_playing = true;
        self.last_frame_time = None;
    }

    /// Transport button label: shows the action available, not the state
    /// (paused shows Play, playing shows Pause).
    pub fn icon_text(&self) -> &'static str {
        if self.is_playing {
            "\u{23F8} Pause"
        } else {
            "\u{25B6} Play"
        }
    }
}
