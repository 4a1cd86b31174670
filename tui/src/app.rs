//! Main Application
//!
//! The App struct hosts a `TutorWidget` inside the terminal:
//! - Event loop (keyboard, mouse, resize)
//! - Per-frame clock that drives the widget's timers
//! - Compositor layers for the status hint, chat panel, and avatar
//!
//! The widget owns all conversation and mood state. The App only translates
//! terminal input into widget operations and draws from widget accessors.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;
use tracing::{debug, info};

use tutor_core::{TutorWidget, WidgetConfig, WidgetEvent};

use crate::avatar::{AvatarLook, MotionClock, RobotAvatar, AVATAR_HEIGHT, AVATAR_WIDTH};
use crate::compositor::{Compositor, LayerId};
use crate::panel::{render_panel, PanelHits, PanelTarget, PanelView, MINIMIZED_HEIGHT};
use crate::theme::DIM_GRAY;
use crate::widgets::TranscriptState;

/// Widest the chat panel gets
const PANEL_MAX_WIDTH: u16 = 46;

/// Tallest the expanded chat panel gets
const PANEL_MAX_HEIGHT: u16 = 26;

/// Lines scrolled per PageUp/PageDown or wheel notch
const SCROLL_STEP: usize = 3;

const STATUS_HINT: &str = " F2 chat · F3 minimize · Esc quit";

/// Where each layer sits on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetLayout {
    pub status: Rect,
    pub panel: Rect,
    pub avatar: Rect,
}

/// Avatar in the bottom-right corner, panel stacked right above it
pub fn layout(width: u16, height: u16, minimized: bool) -> WidgetLayout {
    let avatar = Rect::new(
        width.saturating_sub(AVATAR_WIDTH + 2),
        height.saturating_sub(AVATAR_HEIGHT + 1),
        AVATAR_WIDTH.min(width),
        AVATAR_HEIGHT.min(height),
    );

    let panel_width = PANEL_MAX_WIDTH.min(width.saturating_sub(4));
    let panel_height = if minimized {
        MINIMIZED_HEIGHT.min(avatar.y)
    } else {
        PANEL_MAX_HEIGHT.min(avatar.y.saturating_sub(1))
    };
    let panel = Rect::new(
        width.saturating_sub(panel_width + 2),
        avatar.y.saturating_sub(panel_height),
        panel_width,
        panel_height,
    );

    let status = Rect::new(0, height.saturating_sub(1), width, height.min(1));

    WidgetLayout {
        status,
        panel,
        avatar,
    }
}

/// Layer IDs for UI regions
struct AppLayers {
    status: LayerId,
    panel: LayerId,
    avatar: LayerId,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// The chat widget being hosted
    widget: TutorWidget,

    // === UI Components ===
    compositor: Compositor,
    avatar: RobotAvatar,
    layers: AppLayers,
    transcript: TranscriptState,
    /// Clickable panel regions from the last render
    panel_hits: PanelHits,
    /// Drives typing dots and the input caret
    ui_clock: MotionClock,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create an App sized to the current terminal
    pub fn new(config: WidgetConfig) -> anyhow::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Self::with_size(config, width, height)
    }

    /// Create an App for a fixed screen size
    pub fn with_size(config: WidgetConfig, width: u16, height: u16) -> anyhow::Result<Self> {
        let widget = TutorWidget::new(config)?;

        let area = Rect::new(0, 0, width, height);
        let mut compositor = Compositor::new(area);
        let placed = layout(width, height, widget.is_minimized());

        let layers = AppLayers {
            status: compositor.create_layer(placed.status, 0),
            panel: compositor.create_layer(placed.panel, 10),
            avatar: compositor.create_layer(placed.avatar, 20),
        };
        compositor.set_visible(layers.panel, widget.is_open());

        Ok(Self {
            running: true,
            widget,
            compositor,
            avatar: RobotAvatar::new(),
            layers,
            transcript: TranscriptState::default(),
            panel_hits: PanelHits::default(),
            ui_clock: MotionClock::new(Duration::from_millis(400), 6),
            last_frame: Instant::now(),
            size: (width, height),
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Target ~10 FPS for terminal-style animations
        let frame_duration = Duration::from_millis(100);

        let mut event_stream = EventStream::new();
        info!("Tutor TUI started");

        self.draw(terminal)?;

        let mut result = Ok(());

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => {
                            result = Err(e.into());
                            break;
                        }
                        None => self.running = false,
                    }
                }

                // Frame tick so timers advance without input
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            let now = Instant::now();
            let delta = now - self.last_frame;
            self.last_frame = now;
            self.update(delta);

            if let Err(e) = self.draw(terminal) {
                result = Err(e);
                break;
            }

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        self.finish(result)
    }

    /// Unmount the widget on every exit path, then hand back the loop result
    pub fn finish(&mut self, result: anyhow::Result<()>) -> anyhow::Result<()> {
        self.running = false;
        self.widget.unmount();
        match &result {
            Ok(()) => info!("Tutor TUI stopped"),
            Err(e) => info!(error = %e, "Tutor TUI stopped on error"),
        }
        result
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc => {
                if self.widget.is_open() {
                    self.widget.close_panel();
                } else {
                    self.running = false;
                }
            }

            KeyCode::F(2) => self.widget.toggle_panel(),
            KeyCode::F(3) => self.widget.toggle_minimize(),

            // Quick suggestions
            KeyCode::Char(c @ '1'..='4')
                if key.modifiers.contains(KeyModifiers::ALT) && self.widget.shows_body() =>
            {
                self.widget.submit_suggestion(c as usize - '1' as usize);
            }

            KeyCode::Enter if self.widget.is_input_focused() => {
                self.widget
                    .handle_enter(key.modifiers.contains(KeyModifiers::SHIFT));
            }
            KeyCode::Backspace if self.widget.is_input_focused() => self.widget.backspace(),
            KeyCode::Char(c)
                if self.widget.is_input_focused()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.widget.push_char(c);
            }

            // Transcript scrolling
            KeyCode::PageUp => self.transcript.scroll_up(SCROLL_STEP),
            KeyCode::PageDown => self.transcript.scroll_down(SCROLL_STEP),

            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let hit = self.compositor.hit_test(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((layer, lx, ly)) = hit else {
                    return;
                };
                if layer == self.layers.avatar {
                    self.widget.toggle_panel();
                } else if layer == self.layers.panel {
                    match self.panel_hits.target_at(lx, ly) {
                        Some(PanelTarget::Minimize) => self.widget.toggle_minimize(),
                        Some(PanelTarget::Close) => self.widget.close_panel(),
                        Some(PanelTarget::Suggestion(index)) => {
                            self.widget.submit_suggestion(index);
                        }
                        Some(PanelTarget::Send) => {
                            self.widget.submit(None);
                        }
                        None => {}
                    }
                }
            }
            MouseEventKind::ScrollUp if self.hits_panel(hit) => {
                self.transcript.scroll_up(SCROLL_STEP)
            }
            MouseEventKind::ScrollDown if self.hits_panel(hit) => {
                self.transcript.scroll_down(SCROLL_STEP)
            }
            _ => {}
        }
    }

    fn hits_panel(&self, hit: Option<(LayerId, u16, u16)>) -> bool {
        hit.is_some_and(|(layer, _, _)| layer == self.layers.panel)
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));
        self.place_layers();
    }

    fn place_layers(&mut self) {
        let placed = layout(self.size.0, self.size.1, self.widget.is_minimized());
        self.compositor.place_layer(self.layers.status, placed.status);
        self.compositor.place_layer(self.layers.panel, placed.panel);
        self.compositor.place_layer(self.layers.avatar, placed.avatar);
    }

    /// Advance the widget clock and react to what changed
    pub fn update(&mut self, delta: Duration) {
        self.widget.update(delta);
        self.avatar.update(delta, self.widget.mood());
        self.ui_clock.update(delta);

        for event in self.widget.drain_events() {
            debug!(?event, "Widget event");
            if let WidgetEvent::MessageAppended { .. } = event {
                self.transcript.follow_latest();
            }
        }
    }

    /// Render every layer and composite the screen
    pub fn render_frame(&mut self) -> &Buffer {
        self.render_status();
        self.render_panel();
        self.render_avatar();
        self.compositor.composite()
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        let output = self.render_frame().clone();

        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })?;

        Ok(())
    }

    fn render_status(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            buf.set_string(area.x, area.y, STATUS_HINT, Style::default().fg(DIM_GRAY));
        }
    }

    fn render_panel(&mut self) {
        // Open/minimize may have changed since the last frame
        self.place_layers();
        self.compositor
            .set_visible(self.layers.panel, self.widget.is_open());
        if !self.widget.is_open() {
            self.panel_hits = PanelHits::default();
            return;
        }

        let view = PanelView {
            typing_dot: self.ui_clock.frame(),
            caret: self.ui_clock.pulse_on(),
        };
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.panel) {
            buf.reset();
            self.panel_hits = render_panel(&self.widget, &view, buf, &mut self.transcript);
        }
    }

    fn render_avatar(&mut self) {
        let look = AvatarLook {
            mood: self.widget.mood(),
            eye: self.widget.eye(),
            badge: self.widget.shows_badge(),
        };
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.avatar) {
            buf.reset();
            self.avatar.render(buf, look);
        }
    }

    pub fn widget(&self) -> &TutorWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut TutorWidget {
        &mut self.widget
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Screen bounds of the avatar and panel layers
    pub fn placement(&self) -> WidgetLayout {
        layout(self.size.0, self.size.1, self.widget.is_minimized())
    }
}
