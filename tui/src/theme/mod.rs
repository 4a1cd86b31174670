//! Theme and Colors
//!
//! ARIA's palette: metallic slate for the robot shell, cyan/blue/purple
//! accents, green for happy states.

use ratatui::style::Color;

// ============================================================================
// Robot Palette
// ============================================================================

/// Shell border - cyan, slightly muted
pub const ROBOT_SHELL: Color = Color::Rgb(103, 232, 249);

/// Antenna stem - slate
pub const ROBOT_ANTENNA: Color = Color::Rgb(148, 163, 184);

/// Antenna tip and normal eyes - cyan-400
pub const ROBOT_CYAN: Color = Color::Rgb(34, 211, 238);

/// Dimmed cyan for the off phase of a pulse
pub const ROBOT_CYAN_DIM: Color = Color::Rgb(14, 116, 144);

/// Status light, top left
pub const LIGHT_RED: Color = Color::Rgb(248, 113, 113);

/// Status light, top right
pub const LIGHT_GREEN: Color = Color::Rgb(74, 222, 128);

// ============================================================================
// Mood Colors
// ============================================================================

/// Thinking - blue-400
pub const MOOD_PROCESSING: Color = Color::Rgb(96, 165, 250);

/// Off phase of the processing pulse
pub const MOOD_PROCESSING_DIM: Color = Color::Rgb(30, 64, 175);

/// Happy eyes and excited mouth - green-400
pub const MOOD_HAPPY: Color = Color::Rgb(74, 222, 128);

/// Idle mouth
pub const MOUTH_IDLE: Color = Color::Rgb(75, 85, 99);

/// Excitement particles
pub const PARTICLE_YELLOW: Color = Color::Rgb(253, 224, 71);
pub const PARTICLE_CYAN: Color = Color::Rgb(103, 232, 249);

/// Notification badge - pink
pub const BADGE_PINK: Color = Color::Rgb(236, 72, 153);

// ============================================================================
// Panel Colors
// ============================================================================

/// Panel border glow
pub const PANEL_BORDER: Color = Color::Rgb(56, 189, 248);

/// Header title
pub const TITLE_WHITE: Color = Color::Rgb(255, 255, 255);

/// Subtitle, timestamps, inactive buttons
pub const TEXT_MUTED: Color = Color::Rgb(209, 213, 219);

/// Placeholder and separators
pub const DIM_GRAY: Color = Color::Rgb(107, 114, 128);

/// User bubble text
pub const USER_CYAN: Color = Color::Rgb(6, 182, 212);

/// Assistant bubble text
pub const ASSISTANT_TEXT: Color = Color::Rgb(229, 231, 235);

/// Typing dots, left to right
pub const TYPING_DOTS: [Color; 3] = [
    ROBOT_CYAN,
    MOOD_PROCESSING,
    Color::Rgb(192, 132, 252),
];
