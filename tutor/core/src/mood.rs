//! Avatar Mood and Eyes
//!
//! Mood is driven by the send/receive cycle. The eye variant is a cosmetic
//! sub-state: cycle transitions set it explicitly, and the blink driver only
//! touches it while the avatar is idle.

use std::time::Duration;

use rand::{Rng, RngCore};

/// Avatar mood
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mood {
    #[default]
    Idle,
    /// Waiting for a reply
    Thinking,
    /// A reply just landed
    Excited,
    Speaking,
}

/// Motion applied to the whole avatar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Still,
    Pulse,
    Bounce,
}

/// Color treatment of the avatar's mouth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouthTone {
    Gray,
    /// Pulsing blue
    Processing,
    Green,
}

impl Mood {
    pub fn motion(&self) -> Motion {
        match self {
            Mood::Thinking | Mood::Speaking => Motion::Pulse,
            Mood::Excited => Motion::Bounce,
            Mood::Idle => Motion::Still,
        }
    }

    pub fn mouth(&self) -> MouthTone {
        match self {
            Mood::Excited => MouthTone::Green,
            Mood::Thinking => MouthTone::Processing,
            Mood::Idle | Mood::Speaking => MouthTone::Gray,
        }
    }

    /// Side bars shown while processing
    pub fn shows_processing_bars(&self) -> bool {
        matches!(self, Mood::Thinking)
    }

    pub fn shows_particles(&self) -> bool {
        matches!(self, Mood::Excited)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Idle => "idle",
            Mood::Thinking => "thinking",
            Mood::Excited => "excited",
            Mood::Speaking => "speaking",
        }
    }
}

/// Eye rendering variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EyeVariant {
    #[default]
    Normal,
    Blink,
    Processing,
    Happy,
}

impl EyeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            EyeVariant::Normal => "normal",
            EyeVariant::Blink => "blink",
            EyeVariant::Processing => "processing",
            EyeVariant::Happy => "happy",
        }
    }
}

/// Idle blink timer logic
#[derive(Clone, Debug)]
pub struct BlinkDriver {
    period: Duration,
    threshold: f64,
}

impl BlinkDriver {
    pub fn new(period: Duration, threshold: f64) -> Self {
        Self { period, threshold }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Decide the eye variant for one tick.
    ///
    /// Returns `None` outside idle; other moods own the eyes. No random draw
    /// is taken in that case.
    pub fn tick<R: RngCore>(&self, mood: Mood, rng: &mut R) -> Option<EyeVariant> {
        if mood != Mood::Idle {
            return None;
        }
        let draw: f64 = rng.gen();
        if draw > self.threshold {
            Some(EyeVariant::Blink)
        } else {
            Some(EyeVariant::Normal)
        }
    }
}
