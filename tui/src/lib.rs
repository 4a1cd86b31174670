//! Tutor TUI - Terminal surface for the ARIA tutor widget
//!
//! A floating robot avatar sits in the bottom-right corner of the screen and
//! opens a chat panel above it. All widget state lives in
//! [`tutor_core::TutorWidget`]; this crate only turns terminal input into
//! widget operations and draws what the widget reports.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering and hit testing
//! - **Avatar**: Pattern-and-palette robot sprite driven by mood
//! - **Panel**: Chat panel chrome, suggestions, and input line
//! - **Widgets**: Scrollable transcript

pub mod app;
pub mod avatar;
pub mod compositor;
pub mod panel;
pub mod theme;
pub mod widgets;

pub use app::App;
