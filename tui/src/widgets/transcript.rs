//! Transcript Widget
//!
//! The scrollable message list inside the chat panel. User messages hug the
//! right edge, ARIA's hug the left, each followed by its `HH:MM` timestamp.
//! Scrolling counts lines back from the newest, so new messages stay in view
//! unless the user has scrolled away.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{StatefulWidget, Widget};
use textwrap::wrap;

use tutor_core::responses::TYPING_INDICATOR;
use tutor_core::Message;

use crate::theme::{ASSISTANT_TEXT, DIM_GRAY, TEXT_MUTED, TYPING_DOTS, USER_CYAN};

/// Bubbles use at most this share of the width (percent)
const BUBBLE_WIDTH_PERCENT: usize = 85;

/// Scroll state for the transcript
#[derive(Debug, Default)]
pub struct TranscriptState {
    /// Lines scrolled back from the newest (0 = following)
    pub scroll_back: usize,
    /// Total laid-out lines at the last render
    pub total_lines: usize,
    /// Visible rows at the last render
    pub viewport: usize,
}

impl TranscriptState {
    pub fn scroll_up(&mut self, lines: usize) {
        let max_back = self.total_lines.saturating_sub(self.viewport);
        self.scroll_back = (self.scroll_back + lines).min(max_back);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Jump back to the newest message
    pub fn follow_latest(&mut self) {
        self.scroll_back = 0;
    }

    pub fn is_following(&self) -> bool {
        self.scroll_back == 0
    }
}

/// Message list with an optional typing indicator at the end
pub struct Transcript<'a> {
    messages: &'a [Message],
    /// Which typing dot is lit; `None` hides the indicator
    typing: Option<usize>,
}

impl<'a> Transcript<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            typing: None,
        }
    }

    pub fn typing(mut self, lit_dot: Option<usize>) -> Self {
        self.typing = lit_dot;
        self
    }

    /// Lay out every line for a given width
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let bubble_width = (width as usize * BUBBLE_WIDTH_PERCENT / 100).max(8);
        let mut lines = Vec::new();

        for msg in self.messages {
            let (style, alignment) = if msg.is_user() {
                (Style::default().fg(USER_CYAN).add_modifier(Modifier::BOLD), Alignment::Right)
            } else {
                (Style::default().fg(ASSISTANT_TEXT), Alignment::Left)
            };

            for chunk in wrap(msg.text(), bubble_width) {
                lines.push(Line::styled(chunk.into_owned(), style).alignment(alignment));
            }
            lines.push(
                Line::styled(msg.timestamp_label(), Style::default().fg(DIM_GRAY))
                    .alignment(alignment),
            );
            lines.push(Line::default());
        }

        if let Some(lit) = self.typing {
            let mut spans: Vec<Span<'static>> = TYPING_DOTS
                .iter()
                .enumerate()
                .map(|(i, color)| {
                    let glyph = if i == lit % TYPING_DOTS.len() { "● " } else { "• " };
                    Span::styled(glyph, Style::default().fg(*color))
                })
                .collect();
            spans.push(Span::styled(
                format!(" {TYPING_INDICATOR}"),
                Style::default().fg(TEXT_MUTED),
            ));
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl<'a> StatefulWidget for Transcript<'a> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(area.width);
        state.total_lines = lines.len();
        state.viewport = area.height as usize;

        let max_back = state.total_lines.saturating_sub(state.viewport);
        state.scroll_back = state.scroll_back.min(max_back);

        let visible_end = state.total_lines - state.scroll_back;
        let visible_start = visible_end.saturating_sub(state.viewport);

        for (i, line) in lines[visible_start..visible_end].iter().enumerate() {
            let row = Rect::new(area.x, area.y + i as u16, area.width, 1);
            line.render(row, buf);
        }
    }
}
