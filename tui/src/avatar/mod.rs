//! Avatar - ARIA's robot face
//!
//! The floating icon that opens the chat. Its look is a pure function of the
//! widget's mood and eye variant plus a motion clock:
//! - Eyes follow the eye variant (blink, processing, happy, normal)
//! - Mouth color follows the mood
//! - Thinking pulses and shows side bars; excited bounces and sparkles
//! - A badge sits on the corner while the chat is closed

mod animation;
mod sprites;

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::style::{Color, Style};

use tutor_core::{EyeVariant, Mood, Motion, MouthTone};

use crate::theme::{
    BADGE_PINK, LIGHT_GREEN, LIGHT_RED, MOOD_HAPPY, MOOD_PROCESSING, MOOD_PROCESSING_DIM,
    MOUTH_IDLE, PARTICLE_CYAN, PARTICLE_YELLOW, ROBOT_ANTENNA, ROBOT_CYAN, ROBOT_CYAN_DIM,
    ROBOT_SHELL,
};

pub use animation::MotionClock;
pub use sprites::{build_frame, ColoredCell, Frame};

/// Sprite width in cells
pub const AVATAR_WIDTH: u16 = 13;

/// Sprite height plus one row of bounce headroom
pub const AVATAR_HEIGHT: u16 = 7;

const SHELL_TOP: &str = " q----+----w ";
const SHELL_LIGHTS: &str = " |r       g| ";
const SHELL_MOUTH: &str = " |   MMM   | ";
const SHELL_BOTTOM: &str = " z---------x ";

/// What the avatar looks like this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvatarLook {
    pub mood: Mood,
    pub eye: EyeVariant,
    /// Panel closed: show the notification badge
    pub badge: bool,
}

/// The animated robot avatar
pub struct RobotAvatar {
    clock: MotionClock,
    motion: Motion,
}

impl RobotAvatar {
    pub fn new() -> Self {
        Self {
            clock: MotionClock::default(),
            motion: Motion::Still,
        }
    }

    /// Advance motion (call every frame)
    pub fn update(&mut self, delta: Duration, mood: Mood) {
        let motion = mood.motion();
        if motion != self.motion {
            self.motion = motion;
            self.clock.reset();
        }
        self.clock.update(delta);
    }

    /// Rows the sprite is lifted this frame
    pub fn lift(&self) -> u16 {
        match self.motion {
            Motion::Bounce => self.clock.bounce_lift(),
            Motion::Still | Motion::Pulse => 0,
        }
    }

    /// Build the sprite for a look
    pub fn frame(&self, look: AvatarLook) -> Frame {
        let pattern = Self::pattern(look);
        let pattern: Vec<&str> = pattern.iter().map(String::as_str).collect();
        build_frame(&pattern, &self.palette(look))
    }

    fn pattern(look: AvatarLook) -> Vec<String> {
        let mut crown: Vec<char> = if look.mood.shows_particles() {
            " *    o    . ".chars().collect()
        } else {
            "      o      ".chars().collect()
        };
        if look.badge {
            if let Some(last) = crown.last_mut() {
                *last = '!';
            }
        }

        let eyes = if look.mood.shows_processing_bars() {
            "p|  E   E  |p"
        } else {
            " |  E   E  | "
        };

        vec![
            crown.into_iter().collect(),
            SHELL_TOP.to_string(),
            SHELL_LIGHTS.to_string(),
            eyes.to_string(),
            SHELL_MOUTH.to_string(),
            SHELL_BOTTOM.to_string(),
        ]
    }

    fn palette(&self, look: AvatarLook) -> Vec<(char, char, Color)> {
        let on = self.clock.pulse_on();
        let pulse = |bright: Color, dim: Color| if on { bright } else { dim };

        let (eye_glyph, eye_color) = match look.eye {
            EyeVariant::Blink => ('▁', ROBOT_CYAN),
            EyeVariant::Processing => ('█', pulse(MOOD_PROCESSING, MOOD_PROCESSING_DIM)),
            EyeVariant::Happy => ('█', MOOD_HAPPY),
            EyeVariant::Normal => ('█', ROBOT_CYAN),
        };

        let mouth_color = match look.mood.mouth() {
            MouthTone::Gray => MOUTH_IDLE,
            MouthTone::Processing => pulse(MOOD_PROCESSING, MOOD_PROCESSING_DIM),
            MouthTone::Green => MOOD_HAPPY,
        };

        vec![
            ('o', '●', pulse(ROBOT_CYAN, ROBOT_CYAN_DIM)),
            ('+', '┴', ROBOT_ANTENNA),
            ('q', '╭', ROBOT_SHELL),
            ('w', '╮', ROBOT_SHELL),
            ('z', '╰', ROBOT_SHELL),
            ('x', '╯', ROBOT_SHELL),
            ('-', '─', ROBOT_SHELL),
            ('|', '│', ROBOT_SHELL),
            ('r', '●', pulse(LIGHT_RED, MOUTH_IDLE)),
            ('g', '●', LIGHT_GREEN),
            ('E', eye_glyph, eye_color),
            ('M', '▬', mouth_color),
            ('p', '┃', pulse(MOOD_PROCESSING, MOOD_PROCESSING_DIM)),
            ('*', '✦', PARTICLE_YELLOW),
            ('.', '·', PARTICLE_CYAN),
            ('!', '●', BADGE_PINK),
        ]
    }

    /// Render into a layer buffer of `AVATAR_WIDTH` x `AVATAR_HEIGHT`
    pub fn render(&self, buf: &mut Buffer, look: AvatarLook) {
        let frame = self.frame(look);
        let area = buf.area;

        let y_offset = (AVATAR_HEIGHT - frame.height).saturating_sub(self.lift());

        for (row_idx, row) in frame.cells.iter().enumerate() {
            let y = area.y + y_offset + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            for (col_idx, cell) in row.iter().enumerate() {
                let x = area.x + col_idx as u16;
                if x >= area.x + area.width {
                    break;
                }
                if cell.is_empty() {
                    continue;
                }
                buf.set_string(x, y, cell.ch.to_string(), Style::default().fg(cell.fg));
            }
        }
    }
}

impl Default for RobotAvatar {
    fn default() -> Self {
        Self::new()
    }
}
