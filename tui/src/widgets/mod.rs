//! Custom widgets for the tutor TUI

pub mod transcript;

pub use transcript::{Transcript, TranscriptState};
