use std::time::Duration;

use chrono::{DateTime, Local};

use crate::duration::{format_seconds, parse_duration_to_seconds};
use crate::timer::{TickHandle, TickScheduler, TickToken};

/// One second of wall clock per session tick
pub const SESSION_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Setup,
    Running,
    Paused,
    /// Ran to its full duration; shown the same way as `Setup`
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start { total_seconds: i64 },
    TogglePause,
    Tick,
    Done,
    Skip,
    Stop,
}

/// State of one training run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSession {
    pub total_seconds: u64,
    pub elapsed_seconds: u64,
    pub paused: bool,
    pub current_set_index: u32,
    pub active: bool,
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self {
            total_seconds: 0,
            elapsed_seconds: 0,
            paused: false,
            current_set_index: 1,
            active: false,
        }
    }
}

impl TrainingSession {
    pub fn phase(&self) -> SessionPhase {
        match (self.active, self.paused) {
            (true, true) => SessionPhase::Paused,
            (true, false) => SessionPhase::Running,
            (false, _) if self.total_seconds > 0 && self.elapsed_seconds >= self.total_seconds => {
                SessionPhase::Completed
            }
            (false, _) => SessionPhase::Setup,
        }
    }

    /// Pure transition: the session after `event`. Events that make no sense
    /// in the current phase leave the session untouched.
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Start { total_seconds } => {
                if self.active || total_seconds <= 0 {
                    return self;
                }
                Self {
                    total_seconds: total_seconds as u64,
                    elapsed_seconds: 0,
                    paused: false,
                    current_set_index: 1,
                    active: true,
                }
            }
            SessionEvent::TogglePause if self.active => Self {
                paused: !self.paused,
                ..self
            },
            SessionEvent::Tick if self.active && !self.paused => {
                let elapsed = self.elapsed_seconds + 1;
                if elapsed >= self.total_seconds {
                    Self {
                        elapsed_seconds: self.total_seconds,
                        paused: false,
                        active: false,
                        ..self
                    }
                } else {
                    Self {
                        elapsed_seconds: elapsed,
                        ..self
                    }
                }
            }
            // "done" and "skip" only advance the set counter for now
            SessionEvent::Done | SessionEvent::Skip if self.active => Self {
                current_set_index: self.current_set_index.saturating_add(1),
                ..self
            },
            SessionEvent::Stop if self.active => Self {
                paused: false,
                active: false,
                ..self
            },
            _ => self,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.elapsed_seconds)
    }

    /// Fraction of the target already elapsed, 0.0 ..= 1.0
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            0.0
        } else {
            (self.elapsed_seconds as f64 / self.total_seconds as f64).clamp(0.0, 1.0)
        }
    }
}

/// What a finished (or stopped) session looked like
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub planned_seconds: u64,
    pub elapsed_seconds: u64,
    pub sets: u32,
    pub completed: bool,
    pub finished_at: DateTime<Local>,
}

impl SessionSummary {
    fn from_session(session: &TrainingSession) -> Self {
        Self {
            planned_seconds: session.total_seconds,
            elapsed_seconds: session.elapsed_seconds,
            // the index points at the set in progress
            sets: session.current_set_index.saturating_sub(1),
            completed: session.phase() == SessionPhase::Completed,
            finished_at: Local::now(),
        }
    }
}

/// Owns the live session and the tick run that drives it
pub struct SessionController {
    session: TrainingSession,
    scheduler: Box<dyn TickScheduler>,
    ticker: Option<TickHandle>,
    tick_period: Duration,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session)
            .field("ticker", &self.ticker)
            .field("tick_period", &self.tick_period)
            .finish()
    }
}

impl SessionController {
    pub fn new(scheduler: Box<dyn TickScheduler>) -> Self {
        Self::with_tick_period(scheduler, SESSION_TICK)
    }

    pub fn with_tick_period(scheduler: Box<dyn TickScheduler>, tick_period: Duration) -> Self {
        Self {
            session: TrainingSession::default(),
            scheduler,
            ticker: None,
            tick_period,
        }
    }

    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn is_active(&self) -> bool {
        self.session.active
    }

    pub fn is_paused(&self) -> bool {
        self.session.paused
    }

    pub fn current_set_index(&self) -> u32 {
        self.session.current_set_index
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.session.remaining_seconds()
    }

    pub fn progress(&self) -> f64 {
        self.session.progress()
    }

    /// "MM:SS / MM:SS" of elapsed against target
    pub fn elapsed_display(&self) -> String {
        format!(
            "{} / {}",
            format_seconds(self.session.elapsed_seconds),
            format_seconds(self.session.total_seconds)
        )
    }

    /// Token of the live tick run, if any
    pub fn tick_token(&self) -> Option<TickToken> {
        self.ticker.as_ref().map(TickHandle::token)
    }

    /// Start a session from the raw duration text. Returns false when a
    /// session is already active or the duration is not positive.
    pub fn start(&mut self, duration_text: &str) -> bool {
        let total_seconds = parse_duration_to_seconds(duration_text);
        let next = self.session.apply(SessionEvent::Start { total_seconds });
        if !next.active || self.session.active {
            tracing::warn!(
                duration = duration_text,
                total_seconds,
                already_active = self.session.active,
                "session start ignored"
            );
            return false;
        }

        self.session = next;
        self.resume_ticking();
        tracing::info!(total_seconds, "session started");
        true
    }

    /// Pause a running session or resume a paused one
    pub fn toggle_pause(&mut self) {
        if !self.session.active {
            return;
        }
        self.session = self.session.apply(SessionEvent::TogglePause);
        if self.session.paused {
            self.cancel_ticking();
            tracing::info!(elapsed = self.session.elapsed_seconds, "session paused");
        } else {
            self.resume_ticking();
            tracing::info!(elapsed = self.session.elapsed_seconds, "session resumed");
        }
    }

    pub fn done(&mut self) {
        self.session = self.session.apply(SessionEvent::Done);
        tracing::debug!(set = self.session.current_set_index, "set done");
    }

    pub fn skip(&mut self) {
        self.session = self.session.apply(SessionEvent::Skip);
        tracing::debug!(set = self.session.current_set_index, "set skipped");
    }

    /// Apply one tick from the run identified by `token`. Ticks from any
    /// other run are dropped. Returns the summary when this tick completed
    /// the session.
    pub fn on_tick(&mut self, token: TickToken) -> Option<SessionSummary> {
        if self.tick_token() != Some(token) {
            tracing::trace!(token = token.get(), "stale tick ignored");
            return None;
        }

        self.session = self.session.apply(SessionEvent::Tick);
        if self.session.active {
            return None;
        }

        self.cancel_ticking();
        tracing::info!(total_seconds = self.session.total_seconds, "session completed");
        Some(SessionSummary::from_session(&self.session))
    }

    /// End the active session early
    pub fn stop(&mut self) -> Option<SessionSummary> {
        if !self.session.active {
            return None;
        }
        self.session = self.session.apply(SessionEvent::Stop);
        self.cancel_ticking();
        tracing::info!(elapsed = self.session.elapsed_seconds, "session stopped");
        Some(SessionSummary::from_session(&self.session))
    }

    fn resume_ticking(&mut self) {
        self.cancel_ticking();
        self.ticker = Some(self.scheduler.schedule(self.tick_period));
    }

    fn cancel_ticking(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_ticking();
    }
}
