//! Chat Panel
//!
//! Draws the floating chat panel into its layer buffer and reports where its
//! clickable parts ended up, in layer-local coordinates.
//!
//! ```text
//! ╭────────────────────────────────────╮
//! │ ● ARIA AI ◈                [_] [x] │  header
//! │   Advanced Learning Assistant      │
//! ├────────────────────────────────────┤
//! │ transcript ...                     │  hidden when minimized
//! │ [Explain this...] [Show me ...]    │
//! │ [What should I...] [Help me ...]   │
//! ├────────────────────────────────────┤
//! │ > draft_                       [➤] │
//! ╰────────────────────────────────────╯
//! ```

use rand::RngCore;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use tutor_core::responses::{INPUT_PLACEHOLDER, PERSONA_SUBTITLE, PERSONA_TITLE};
use tutor_core::{TutorWidget, QUICK_SUGGESTIONS};

use crate::theme::{
    DIM_GRAY, LIGHT_GREEN, PANEL_BORDER, ROBOT_CYAN, TEXT_MUTED, TITLE_WHITE, USER_CYAN,
};
use crate::widgets::{Transcript, TranscriptState};

/// Rows of a minimized panel: borders plus the two header lines
pub const MINIMIZED_HEIGHT: u16 = 4;

/// Smallest expanded panel that still fits every section
pub const MIN_EXPANDED_HEIGHT: u16 = 12;

/// Clickable regions, layer-local
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelHits {
    pub minimize: Rect,
    pub close: Rect,
    /// One per quick suggestion, empty when minimized
    pub suggestions: Vec<Rect>,
    pub send: Option<Rect>,
}

/// What a click inside the panel landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTarget {
    Minimize,
    Close,
    Suggestion(usize),
    Send,
}

impl PanelHits {
    pub fn target_at(&self, x: u16, y: u16) -> Option<PanelTarget> {
        let inside = |r: &Rect| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height;

        if inside(&self.minimize) {
            return Some(PanelTarget::Minimize);
        }
        if inside(&self.close) {
            return Some(PanelTarget::Close);
        }
        if let Some(idx) = self.suggestions.iter().position(inside) {
            return Some(PanelTarget::Suggestion(idx));
        }
        match &self.send {
            Some(r) if inside(r) => Some(PanelTarget::Send),
            _ => None,
        }
    }
}

/// Per-frame inputs for the panel that are not widget state
pub struct PanelView {
    /// Lit typing dot, advanced by the app's motion clock
    pub typing_dot: usize,
    /// Show the caret in the input
    pub caret: bool,
}

/// Render the whole panel into `buf` (layer-local, origin 0,0)
pub fn render_panel<R: RngCore>(
    widget: &TutorWidget<R>,
    view: &PanelView,
    buf: &mut Buffer,
    transcript: &mut TranscriptState,
) -> PanelHits {
    let area = buf.area;
    let mut hits = PanelHits::default();
    if area.width < 20 || area.height < MINIMIZED_HEIGHT {
        return hits;
    }

    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PANEL_BORDER))
        .render(area, buf);

    let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);
    render_header(widget, inner, buf, &mut hits);

    if !widget.shows_body() || area.height < MIN_EXPANDED_HEIGHT {
        return hits;
    }

    // Body rows between the header separator and the input separator
    let body_top = inner.y + 3;
    let input_y = inner.y + inner.height - 1;
    let suggestion_rows = 2u16;
    let transcript_height = input_y
        .saturating_sub(1)
        .saturating_sub(suggestion_rows)
        .saturating_sub(body_top);

    separator(area, inner.y + 2, buf);
    separator(area, input_y - 1, buf);

    let typing = widget.awaiting_reply().then_some(view.typing_dot);
    Transcript::new(widget.messages()).typing(typing).render(
        Rect::new(inner.x + 1, body_top, inner.width - 2, transcript_height),
        buf,
        transcript,
    );

    hits.suggestions = render_suggestions(
        Rect::new(inner.x + 1, body_top + transcript_height, inner.width - 2, suggestion_rows),
        buf,
    );
    hits.send = Some(render_input(widget, view, Rect::new(inner.x + 1, input_y, inner.width - 2, 1), buf));

    hits
}

fn render_header<R: RngCore>(
    widget: &TutorWidget<R>,
    inner: Rect,
    buf: &mut Buffer,
    hits: &mut PanelHits,
) {
    let x = inner.x + 1;
    buf.set_string(x, inner.y, "●", Style::default().fg(LIGHT_GREEN));
    buf.set_string(
        x + 2,
        inner.y,
        PERSONA_TITLE,
        Style::default().fg(TITLE_WHITE).add_modifier(Modifier::BOLD),
    );
    buf.set_string(
        x + 3 + PERSONA_TITLE.width() as u16,
        inner.y,
        "◈",
        Style::default().fg(ROBOT_CYAN),
    );
    buf.set_string(x + 2, inner.y + 1, PERSONA_SUBTITLE, Style::default().fg(TEXT_MUTED));

    let minimize_label = if widget.is_minimized() { "[□]" } else { "[_]" };
    let close_x = inner.x + inner.width - 4;
    let minimize_x = close_x - 4;
    let button = Style::default().fg(TEXT_MUTED);
    buf.set_string(minimize_x, inner.y, minimize_label, button);
    buf.set_string(close_x, inner.y, "[x]", button);

    hits.minimize = Rect::new(minimize_x, inner.y, 3, 1);
    hits.close = Rect::new(close_x, inner.y, 3, 1);
}

/// Two-by-two grid of suggestion buttons
fn render_suggestions(area: Rect, buf: &mut Buffer) -> Vec<Rect> {
    let col_width = area.width / 2;
    let label_width = col_width.saturating_sub(3) as usize;

    QUICK_SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let col = (i % 2) as u16;
            let row = (i / 2) as u16;
            let rect = Rect::new(area.x + col * col_width, area.y + row, col_width.saturating_sub(1), 1);

            let label = truncate(suggestion, label_width);
            buf.set_string(rect.x, rect.y, format!("[{label}]"), Style::default().fg(TEXT_MUTED));
            rect
        })
        .collect()
}

/// Input row; returns the send button rect
fn render_input<R: RngCore>(
    widget: &TutorWidget<R>,
    view: &PanelView,
    area: Rect,
    buf: &mut Buffer,
) -> Rect {
    let send = Rect::new(area.x + area.width - 3, area.y, 3, 1);
    let field_width = area.width.saturating_sub(6) as usize;

    buf.set_string(area.x, area.y, ">", Style::default().fg(ROBOT_CYAN));

    if widget.draft().is_empty() {
        buf.set_string(
            area.x + 2,
            area.y,
            truncate(INPUT_PLACEHOLDER, field_width),
            Style::default().fg(DIM_GRAY),
        );
    } else {
        let caret = if view.caret && widget.is_input_focused() { "_" } else { "" };
        let text = format!("{}{caret}", widget.draft());
        buf.set_string(
            area.x + 2,
            area.y,
            tail(&text, field_width),
            Style::default().fg(TITLE_WHITE),
        );
    }

    let send_style = if widget.can_send() {
        Style::default().fg(USER_CYAN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_GRAY)
    };
    buf.set_string(send.x, send.y, "[➤]", send_style);
    send
}

fn separator(area: Rect, y: u16, buf: &mut Buffer) {
    let style = Style::default().fg(PANEL_BORDER);
    buf.set_string(area.x, y, "├", style);
    buf.set_string(area.x + 1, y, "─".repeat(area.width.saturating_sub(2) as usize), style);
    buf.set_string(area.x + area.width - 1, y, "┤", style);
}

/// Cut `text` to `max` columns, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

/// Keep the last `max` columns of `text` so the caret stays visible
fn tail(text: &str, max: usize) -> String {
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        kept.push(ch);
    }
    kept.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use tutor_core::WidgetConfig;

    fn widget() -> TutorWidget<StepRng> {
        TutorWidget::with_rng(WidgetConfig::default(), StepRng::new(0, 0)).expect("valid config")
    }

    fn view() -> PanelView {
        PanelView {
            typing_dot: 0,
            caret: true,
        }
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_expanded_panel_sections() {
        let mut w = widget();
        w.toggle_panel();
        let mut buf = Buffer::empty(Rect::new(0, 0, 44, 24));
        let hits = render_panel(&w, &view(), &mut buf, &mut TranscriptState::default());

        let text = screen(&buf);
        assert!(text.contains(PERSONA_TITLE));
        assert!(text.contains(PERSONA_SUBTITLE));
        assert!(text.contains("Hello! I'm ARIA"));
        assert!(text.contains("Ask ARIA anything"));
        assert_eq!(hits.suggestions.len(), 4);
        assert!(hits.send.is_some());
    }

    #[test]
    fn test_minimized_panel_is_header_only() {
        let mut w = widget();
        w.toggle_panel();
        w.toggle_minimize();
        let mut buf = Buffer::empty(Rect::new(0, 0, 44, MINIMIZED_HEIGHT));
        let hits = render_panel(&w, &view(), &mut buf, &mut TranscriptState::default());

        let text = screen(&buf);
        assert!(text.contains("[□]"));
        assert!(!text.contains("Hello! I'm ARIA"));
        assert!(hits.suggestions.is_empty());
        assert_eq!(hits.send, None);
    }

    #[test]
    fn test_hit_targets() {
        let mut w = widget();
        w.toggle_panel();
        let mut buf = Buffer::empty(Rect::new(0, 0, 44, 24));
        let hits = render_panel(&w, &view(), &mut buf, &mut TranscriptState::default());

        assert_eq!(hits.target_at(hits.close.x + 1, hits.close.y), Some(PanelTarget::Close));
        assert_eq!(hits.target_at(hits.minimize.x, hits.minimize.y), Some(PanelTarget::Minimize));
        let third = hits.suggestions[2];
        assert_eq!(hits.target_at(third.x + 2, third.y), Some(PanelTarget::Suggestion(2)));
        assert_eq!(hits.target_at(0, 0), None);
    }

    #[test]
    fn test_typing_indicator_while_awaiting() {
        let mut w = widget();
        w.toggle_panel();
        w.submit(Some("Explain this concept simply"));
        let mut buf = Buffer::empty(Rect::new(0, 0, 44, 24));
        render_panel(&w, &view(), &mut buf, &mut TranscriptState::default());
        assert!(screen(&buf).contains("ARIA is processing..."));
    }

    #[test]
    fn test_truncate_and_tail() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Explain this concept simply", 10), "Explain t…");
        assert_eq!(tail("abcdef", 3), "def");
    }
}
