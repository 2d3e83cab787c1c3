use std::time::Instant;

use tracing::{debug, warn};

use crate::controller::{InputOutcome, InputSink, KeyInput, PendingGuess, SessionController, Signal};
use crate::error::{GameError, ServiceError};
use crate::notice::{NoticeBoard, RowFlash};
use crate::session::SessionSummary;

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Playing,
    Results,
    /// The session could not start (word service down, empty list)
    Unavailable(String),
}

pub struct App {
    pub controller: SessionController,
    pub state: AppState,
    pub duration_secs: u32,
    pub notices: NoticeBoard,
    pub flash: RowFlash,
    pub summary: Option<SessionSummary>,
}

impl App {
    pub fn new(controller: SessionController, duration_secs: u32) -> Self {
        Self {
            controller,
            state: AppState::Unavailable(String::new()),
            duration_secs,
            notices: NoticeBoard::default(),
            flash: RowFlash::default(),
            summary: None,
        }
    }

    /// Start (or restart) a session
    pub fn start(&mut self) -> Result<(), GameError> {
        self.notices.clear();
        self.flash.clear();
        self.summary = None;

        match self.controller.start_session(self.duration_secs) {
            Ok(()) => {
                self.state = AppState::Playing;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "could not start session");
                self.state = AppState::Unavailable(e.to_string());
                Err(e)
            }
        }
    }

    /// Route a key to the controller. Returns a ticket when the current row
    /// needs checking by the word service.
    pub fn handle_key(&mut self, key: KeyInput, now: Instant) -> Option<PendingGuess> {
        self.sync_clock(now);
        if self.state != AppState::Playing {
            return None;
        }
        let outcome = self.controller.on_key(key);
        self.apply_signals(now);
        match outcome {
            InputOutcome::Submitted(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn handle_validation(
        &mut self,
        ticket: PendingGuess,
        verdict: Result<bool, ServiceError>,
        now: Instant,
    ) {
        // A verdict landing after the deadline must not score
        self.sync_clock(now);
        let word = ticket.word.clone();
        match self.controller.finish_submit(ticket, verdict) {
            Ok(_) => {}
            Err(e) if e.is_rejection() => debug!(word = %word, error = %e, "guess rejected"),
            Err(GameError::StaleValidation) => {
                debug!(word = %word, "dropped verdict for a finished row or session")
            }
            Err(e) => warn!(word = %word, error = %e, "guess could not be checked"),
        }
        self.apply_signals(now);
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.sync_clock(now);
        self.notices.expire(now);
    }

    /// Deliver due countdown ticks before anything else touches the session
    fn sync_clock(&mut self, now: Instant) {
        if self.state == AppState::Playing {
            self.controller.advance_clock();
        }
        self.apply_signals(now);
    }

    pub fn is_validating(&self) -> bool {
        self.controller.pending().is_some()
    }

    fn apply_signals(&mut self, now: Instant) {
        for signal in self.controller.drain_signals() {
            match signal {
                Signal::Notice(text) => self.notices.show(text, now),
                Signal::Flash { row } => self.flash.trigger(row, now),
                Signal::SessionEnded(summary) => {
                    self.summary = Some(summary);
                    self.state = AppState::Results;
                }
                Signal::RoundSolved { .. } | Signal::RoundFailed { .. } => {}
            }
        }
    }
}
