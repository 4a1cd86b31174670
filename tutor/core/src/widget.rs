//! Widget Controller
//!
//! `TutorWidget` owns every piece of widget state and is the only writer.
//! User operations mutate it synchronously; delayed behavior (reply arrival,
//! the excited hold, idle blinking) is scheduled on the controller's own
//! timer queue and fires from `update`.
//!
//! # Cycles
//!
//! Each accepted submit starts a new cycle. Every cycle gets exactly one
//! reply, but only the newest cycle drives the avatar: a reply from an older
//! cycle still lands in the log without touching mood or eyes, and starting
//! a cycle cancels the previous excited→idle revert.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::{ConfigError, WidgetConfig};
use crate::messages::{Message, MessageId, MessageKind, MessageLog, Origin};
use crate::mood::{BlinkDriver, EyeVariant, Mood};
use crate::responses::{ResponseSelector, GREETING, QUICK_SUGGESTIONS};
use crate::scheduler::{TimerId, TimerQueue};

/// Observable state changes, drained by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    PanelToggled { open: bool },
    MinimizeToggled { minimized: bool },
    MessageAppended { id: MessageId, origin: Origin },
    MoodChanged { from: Mood, to: Mood },
    EyeChanged { from: EyeVariant, to: EyeVariant },
}

/// What a scheduled timer does when it fires
#[derive(Clone, Debug)]
enum TimerEvent {
    /// Deliver the reply for a cycle
    Reply { cycle: u64, prompt: String },
    /// End the excited hold of a cycle
    RevertToIdle { cycle: u64 },
    /// Idle blink driver
    BlinkTick,
}

/// The tutor chat widget
pub struct TutorWidget<R: RngCore = StdRng> {
    config: WidgetConfig,
    rng: R,
    selector: ResponseSelector,
    blink: BlinkDriver,
    timers: TimerQueue<TimerEvent>,

    // === Conversation ===
    log: MessageLog,
    draft: String,
    pending_replies: usize,

    // === Panel ===
    panel_open: bool,
    minimized: bool,
    input_focused: bool,

    // === Avatar ===
    mood: Mood,
    eye: EyeVariant,
    /// Newest cycle (0 before the first submit)
    cycle: u64,
    revert_timer: Option<TimerId>,

    mounted: bool,
    events: Vec<WidgetEvent>,
}

impl TutorWidget<StdRng> {
    /// Mount a widget, seeding the RNG from `config.seed` or entropy
    pub fn new(config: WidgetConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> TutorWidget<R> {
    /// Mount a widget with an injected random source
    pub fn with_rng(config: WidgetConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let blink = BlinkDriver::new(config.blink_period(), config.blink_threshold);
        let mut timers = TimerQueue::new();
        timers.schedule(blink.period(), TimerEvent::BlinkTick);

        let mut log = MessageLog::new();
        log.append(GREETING, Origin::Assistant, MessageKind::Normal);

        info!(
            reply_delay_min_ms = config.reply_delay_min_ms,
            reply_delay_max_ms = config.reply_delay_max_ms,
            "Tutor widget mounted"
        );

        Ok(Self {
            config,
            rng,
            selector: ResponseSelector::new(),
            blink,
            timers,
            log,
            draft: String::new(),
            pending_replies: 0,
            panel_open: false,
            minimized: false,
            input_focused: false,
            mood: Mood::Idle,
            eye: EyeVariant::Normal,
            cycle: 0,
            revert_timer: None,
            mounted: true,
            events: Vec::new(),
        })
    }

    // ========================================================================
    // Panel
    // ========================================================================

    /// Open or close the chat panel
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        self.input_focused = self.panel_open && !self.minimized;
        debug!(open = self.panel_open, "Panel toggled");
        self.events.push(WidgetEvent::PanelToggled {
            open: self.panel_open,
        });
    }

    /// Close the panel from its header button
    pub fn close_panel(&mut self) {
        if self.panel_open {
            self.toggle_panel();
        }
    }

    /// Collapse or expand the open panel. No-op while closed.
    pub fn toggle_minimize(&mut self) {
        if !self.panel_open {
            return;
        }
        self.minimized = !self.minimized;
        self.input_focused = !self.minimized;
        debug!(minimized = self.minimized, "Minimize toggled");
        self.events.push(WidgetEvent::MinimizeToggled {
            minimized: self.minimized,
        });
    }

    // ========================================================================
    // Draft
    // ========================================================================

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Whether the send button is enabled
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Send `text`, or the trimmed draft when `None`.
    ///
    /// Empty or whitespace-only text is silently ignored. Returns the id of
    /// the appended user message.
    pub fn submit(&mut self, text: Option<&str>) -> Option<MessageId> {
        let (resolved, kind) = match text {
            Some(explicit) => (explicit.trim().to_string(), MessageKind::Suggestion),
            None => (self.draft.trim().to_string(), MessageKind::Normal),
        };
        if resolved.is_empty() {
            trace!("Ignoring empty submit");
            return None;
        }
        if !self.mounted {
            return None;
        }

        let id = self.log.append(resolved.clone(), Origin::User, kind);
        self.events.push(WidgetEvent::MessageAppended {
            id,
            origin: Origin::User,
        });
        self.draft.clear();

        self.cycle += 1;
        if let Some(timer) = self.revert_timer.take() {
            self.timers.cancel(timer);
        }
        self.set_mood(Mood::Thinking);
        self.set_eye(EyeVariant::Processing);

        let delay = Duration::from_millis(
            self.rng
                .gen_range(self.config.reply_delay_min_ms..self.config.reply_delay_max_ms),
        );
        self.timers.schedule(
            delay,
            TimerEvent::Reply {
                cycle: self.cycle,
                prompt: resolved,
            },
        );
        self.pending_replies += 1;

        debug!(%id, cycle = self.cycle, delay_ms = delay.as_millis() as u64, "Message submitted");
        Some(id)
    }

    /// Send one of the quick suggestions. Out-of-range indices are ignored.
    pub fn submit_suggestion(&mut self, index: usize) -> Option<MessageId> {
        let suggestion = QUICK_SUGGESTIONS.get(index)?;
        self.submit(Some(*suggestion))
    }

    /// Enter key in the input: sends the draft unless Shift is held
    pub fn handle_enter(&mut self, shift: bool) -> Option<MessageId> {
        if shift {
            return None;
        }
        self.submit(None)
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Advance the widget clock and fire due timers
    pub fn update(&mut self, delta: Duration) {
        if !self.mounted {
            return;
        }
        self.timers.advance(delta);
        while let Some((due, _, event)) = self.timers.pop_due() {
            self.fire(due, event);
        }
    }

    fn fire(&mut self, due: Duration, event: TimerEvent) {
        match event {
            TimerEvent::Reply { cycle, prompt } => self.deliver_reply(due, cycle, &prompt),
            TimerEvent::RevertToIdle { cycle } => {
                if cycle == self.cycle {
                    self.revert_timer = None;
                    self.set_mood(Mood::Idle);
                    self.set_eye(EyeVariant::Normal);
                }
            }
            TimerEvent::BlinkTick => {
                if let Some(eye) = self.blink.tick(self.mood, &mut self.rng) {
                    trace!(eye = eye.as_str(), "Blink tick");
                    self.set_eye(eye);
                }
                self.timers
                    .schedule_at(due + self.blink.period(), TimerEvent::BlinkTick);
            }
        }
    }

    fn deliver_reply(&mut self, due: Duration, cycle: u64, prompt: &str) {
        self.pending_replies = self.pending_replies.saturating_sub(1);

        let reply = self.selector.select(prompt, &mut self.rng);
        let id = self.log.append(reply, Origin::Assistant, MessageKind::Normal);
        self.events.push(WidgetEvent::MessageAppended {
            id,
            origin: Origin::Assistant,
        });

        if cycle != self.cycle {
            debug!(%id, cycle, current = self.cycle, "Reply from superseded cycle");
            return;
        }

        self.set_mood(Mood::Excited);
        self.set_eye(EyeVariant::Happy);
        let revert = self
            .timers
            .schedule_at(due + self.config.excited_hold(), TimerEvent::RevertToIdle { cycle });
        self.revert_timer = Some(revert);
        debug!(%id, cycle, "Reply delivered");
    }

    /// Stop all timers. The widget is inert afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.timers.clear();
        self.revert_timer = None;
        self.pending_replies = 0;
        self.mounted = false;
        info!(messages = self.log.len(), "Tutor widget unmounted");
    }

    fn set_mood(&mut self, mood: Mood) {
        if self.mood != mood {
            debug!(from = self.mood.as_str(), to = mood.as_str(), "Mood changed");
            self.events.push(WidgetEvent::MoodChanged {
                from: self.mood,
                to: mood,
            });
            self.mood = mood;
        }
    }

    fn set_eye(&mut self, eye: EyeVariant) {
        if self.eye != eye {
            self.events.push(WidgetEvent::EyeChanged {
                from: self.eye,
                to: eye,
            });
            self.eye = eye;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    /// True while any reply is still on its way
    pub fn awaiting_reply(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn eye(&self) -> EyeVariant {
        self.eye
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Virtual time since mount
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    /// The avatar's notification badge shows while the panel is closed
    pub fn shows_badge(&self) -> bool {
        !self.panel_open
    }

    /// Transcript, suggestions and input are visible
    pub fn shows_body(&self) -> bool {
        self.panel_open && !self.minimized
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }
}
