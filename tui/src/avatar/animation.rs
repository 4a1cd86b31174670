//! Motion Clock
//!
//! Frame timing for the avatar's cosmetic motion: a looping frame counter
//! advanced by real frame deltas. Pulse and bounce read its phase.

use std::time::Duration;

/// Looping frame counter
pub struct MotionClock {
    frame_duration: Duration,
    frame_count: usize,
    current_frame: usize,
    /// Time accumulated on the current frame
    frame_time: Duration,
}

impl MotionClock {
    pub fn new(frame_duration: Duration, frame_count: usize) -> Self {
        Self {
            frame_duration,
            frame_count: frame_count.max(1),
            current_frame: 0,
            frame_time: Duration::ZERO,
        }
    }

    /// Advance by a frame delta; long deltas skip whole frames
    pub fn update(&mut self, delta: Duration) {
        if self.frame_duration.is_zero() {
            return;
        }
        self.frame_time += delta;
        while self.frame_time >= self.frame_duration {
            self.frame_time -= self.frame_duration;
            self.current_frame = (self.current_frame + 1) % self.frame_count;
        }
    }

    /// Restart from frame 0 (new motion begins)
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.frame_time = Duration::ZERO;
    }

    pub fn frame(&self) -> usize {
        self.current_frame
    }

    /// On for the first half of the loop
    pub fn pulse_on(&self) -> bool {
        self.current_frame < self.frame_count.div_ceil(2)
    }

    /// Rows to lift the sprite: up on odd frames
    pub fn bounce_lift(&self) -> u16 {
        (self.current_frame % 2) as u16
    }
}

impl Default for MotionClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), 4)
    }
}
