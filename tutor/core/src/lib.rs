//! Tutor Core - Headless state machine for the ARIA tutor chat widget
//!
//! The widget shows a floating robot avatar that toggles a chat panel,
//! answers every question with a canned reply after a short delay, and
//! animates the avatar's mood along the way.
//!
//! This crate owns all of that state and none of the rendering. Surfaces
//! embed a [`TutorWidget`], forward user input to it, advance its clock once
//! per frame with [`TutorWidget::update`], and draw from its accessors.
//!
//! # Modules
//!
//! - **widget**: the controller and its send/reply/revert cycle
//! - **responses**: canned replies, quick suggestions, persona strings
//! - **mood**: mood and eye variants, blink driver, cosmetic mapping
//! - **scheduler**: virtual-clock timer queue
//! - **messages**: immutable messages and the append-only log
//! - **config**: timing configuration

pub mod config;
pub mod messages;
pub mod mood;
pub mod responses;
pub mod scheduler;
pub mod widget;

pub use config::{ConfigError, WidgetConfig};
pub use messages::{Message, MessageId, MessageKind, MessageLog, Origin};
pub use mood::{BlinkDriver, EyeVariant, Motion, Mood, MouthTone};
pub use responses::{ResponseSelector, CANNED_RESPONSES, GREETING, QUICK_SUGGESTIONS};
pub use scheduler::{TimerId, TimerQueue};
pub use widget::{TutorWidget, WidgetEvent};
