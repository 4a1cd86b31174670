//! Render Tests for the Tutor TUI
//!
//! Drive an `App` with synthetic terminal events and a virtual clock, then
//! inspect the composited screen. No terminal is needed.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use tutor_core::{Mood, WidgetConfig, QUICK_SUGGESTIONS};
use tutor_tui::App;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 40;

fn app() -> App {
    let config = WidgetConfig {
        seed: Some(7),
        ..WidgetConfig::default()
    };
    App::with_size(config, WIDTH, HEIGHT).expect("default config is valid")
}

fn key(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn click(app: &mut App, column: u16, row: u16) {
    app.handle_event(Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
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

fn rendered(app: &mut App) -> String {
    screen(app.render_frame())
}

#[test]
fn test_closed_widget_shows_only_avatar_and_hint() {
    let mut app = app();
    let text = rendered(&mut app);

    assert!(text.contains("F2 chat"));
    assert!(!text.contains("Hello! I'm ARIA"));
    assert!(app.widget().shows_badge());
}

#[test]
fn test_open_panel_renders_greeting() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    let text = rendered(&mut app);

    assert!(text.contains("ARIA AI"));
    assert!(text.contains("Advanced Learning Assistant"));
    assert!(text.contains("Hello! I'm ARIA"));
    assert!(text.contains("Ask ARIA anything"));
}

#[test]
fn test_typing_indicator_while_awaiting_reply() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    for c in "hi".chars() {
        key(&mut app, KeyCode::Char(c));
    }
    key(&mut app, KeyCode::Enter);
    app.update(Duration::from_millis(100));

    assert_eq!(app.widget().mood(), Mood::Thinking);
    assert!(rendered(&mut app).contains("ARIA is processing..."));

    app.update(Duration::from_millis(2500));
    assert_eq!(app.widget().messages().len(), 3);
    assert_eq!(app.widget().mood(), Mood::Excited);
    assert!(!rendered(&mut app).contains("ARIA is processing..."));
}

#[test]
fn test_shift_enter_does_not_submit() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    key(&mut app, KeyCode::Char('x'));
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));

    assert_eq!(app.widget().messages().len(), 1);
    assert_eq!(app.widget().draft(), "x");
}

#[test]
fn test_minimized_panel_hides_body() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    key(&mut app, KeyCode::F(3));
    let text = rendered(&mut app);

    assert!(text.contains("ARIA AI"));
    assert!(text.contains("[□]"));
    assert!(!text.contains("Hello! I'm ARIA"));
    assert!(!text.contains("Ask ARIA anything"));
    assert!(!app.widget().is_input_focused());
}

#[test]
fn test_alt_digit_sends_quick_suggestion() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT)));

    let messages = app.widget().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text(), QUICK_SUGGESTIONS[1]);
    assert_eq!(app.widget().draft(), "");
}

#[test]
fn test_alt_digit_ignored_while_minimized() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    key(&mut app, KeyCode::F(3));
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT)));

    assert_eq!(app.widget().messages().len(), 1);
    assert_eq!(app.widget().mood(), Mood::Idle);
}

#[test]
fn test_alt_digit_ignored_while_closed() {
    let mut app = app();
    app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT)));
    assert_eq!(app.widget().messages().len(), 1);
}

#[test]
fn test_click_avatar_toggles_panel() {
    let mut app = app();
    let avatar = app.placement().avatar;
    rendered(&mut app);

    click(&mut app, avatar.x + 6, avatar.y + 3);
    assert!(app.widget().is_open());

    click(&mut app, avatar.x + 6, avatar.y + 3);
    assert!(!app.widget().is_open());
}

#[test]
fn test_click_close_button() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    rendered(&mut app);

    // Close button sits at the right end of the header row
    let panel = app.placement().panel;
    click(&mut app, panel.x + panel.width - 4, panel.y + 1);
    assert!(!app.widget().is_open());
}

#[test]
fn test_esc_closes_then_quits() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));

    key(&mut app, KeyCode::Esc);
    assert!(!app.widget().is_open());
    assert!(app.is_running());

    key(&mut app, KeyCode::Esc);
    assert!(!app.is_running());
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app();
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(!app.is_running());
}

#[test]
fn test_draws_through_test_backend() {
    let mut app = app();
    key(&mut app, KeyCode::F(2));
    let output = app.render_frame().clone();

    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("test backend");
    terminal
        .draw(|frame| {
            let buf = frame.buffer_mut();
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })
        .expect("draw");

    assert!(screen(terminal.backend().buffer()).contains("Hello! I'm ARIA"));
}
