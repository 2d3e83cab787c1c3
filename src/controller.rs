use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::board::{MAX_ATTEMPTS, WORD_LENGTH};
use crate::countdown::TickDriver;
use crate::error::{GameError, ServiceError};
use crate::scoring::{score_guess, GuessResult};
use crate::session::{RoundRecord, Session, SessionConfig, SessionSummary};
use crate::word_list::WordList;
use crate::word_service::WordService;

/// Key input after stripping terminal specifics
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Backspace,
    Enter,
    Letter(char),
    Other,
}

impl From<KeyEvent> for KeyInput {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Enter => KeyInput::Enter,
            KeyCode::Char(c)
                if c.is_ascii_alphabetic()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                KeyInput::Letter(c.to_ascii_uppercase())
            }
            _ => KeyInput::Other,
        }
    }
}

/// Ticket for a guess whose validity check is in flight
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingGuess {
    pub word: String,
    pub round: u32,
    pub row: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Edited,
    Rejected(GameError),
    /// The caller must check `PendingGuess::word` with the word service and
    /// hand the verdict to `finish_submit`.
    Submitted(PendingGuess),
}

pub trait InputSink {
    fn on_key(&mut self, key: KeyInput) -> InputOutcome;
}

/// Presentation side effects, drained by the app after every event
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Notice(String),
    Flash { row: usize },
    RoundSolved { word: String, attempts: usize },
    RoundFailed { word: String },
    SessionEnded(SessionSummary),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Solved(GuessResult),
    Failed { result: GuessResult, target: String },
    Continue(GuessResult),
}

pub struct SessionController {
    service: Arc<dyn WordService>,
    driver: Box<dyn TickDriver>,
    rng: StdRng,
    word_list: WordList,
    session: Session,
    pending: Option<PendingGuess>,
    signals: Vec<Signal>,
}

impl SessionController {
    pub fn new(service: Arc<dyn WordService>, driver: Box<dyn TickDriver>) -> Self {
        Self {
            service,
            driver,
            rng: StdRng::from_entropy(),
            word_list: WordList::default(),
            session: Session::new(SessionConfig { duration_secs: 0 }),
            pending: None,
            signals: Vec::new(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    pub fn service(&self) -> Arc<dyn WordService> {
        Arc::clone(&self.service)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active
    }

    pub fn pending(&self) -> Option<&PendingGuess> {
        self.pending.as_ref()
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Fetch the word list unless it is already populated
    pub fn load_word_list(&mut self) -> Result<(), GameError> {
        if !self.word_list.is_empty() {
            return Ok(());
        }
        let raw = self.service.list_words()?;
        self.word_list = WordList::from_raw(raw);
        info!(words = self.word_list.len(), "word list loaded");
        Ok(())
    }

    pub fn select_target_word(&mut self) -> Result<String, GameError> {
        self.word_list.choose(&mut self.rng).map(str::to_string)
    }

    pub fn start_session(&mut self, duration_secs: u32) -> Result<(), GameError> {
        if duration_secs == 0 {
            return Err(GameError::ZeroDuration);
        }
        self.driver.stop();
        self.load_word_list()?;
        let target = self.select_target_word()?;

        self.session = Session::new(SessionConfig { duration_secs });
        self.session.begin_round(target);
        self.session.is_active = true;
        self.pending = None;
        self.signals.clear();
        self.driver.start();

        info!(duration_secs, "session started");
        Ok(())
    }

    fn next_round(&mut self) -> Result<(), GameError> {
        let target = self.select_target_word()?;
        self.session.begin_round(target);
        debug!(round = self.session.round, "new round");
        Ok(())
    }

    fn reject(&mut self, err: GameError) -> GameError {
        let text = match &err {
            GameError::IncompleteGuess => format!("Please fill all {WORD_LENGTH} letters!"),
            GameError::DuplicateGuess(_) => "You already guessed this word!".to_string(),
            GameError::InvalidWord(_) => "Invalid word! Try again.".to_string(),
            other => other.to_string(),
        };
        debug!(row = self.session.row_index, error = %err, "guess rejected");
        self.signals.push(Signal::Flash {
            row: self.session.row_index,
        });
        self.signals.push(Signal::Notice(text));
        err
    }

    /// Run the local checks on the current row and open the validation window.
    /// Until `finish_submit` runs, the row is frozen.
    pub fn begin_submit(&mut self) -> Result<PendingGuess, GameError> {
        if !self.session.is_active {
            return Err(GameError::Inactive);
        }
        if self.pending.is_some() {
            return Err(GameError::ValidationPending);
        }

        let row = self.session.row_index;
        let Some(word) = self.session.board.row_word(row) else {
            return Err(self.reject(GameError::IncompleteGuess));
        };
        if self.session.guessed_words.contains(&word) {
            return Err(self.reject(GameError::DuplicateGuess(word)));
        }

        let ticket = PendingGuess {
            word,
            round: self.session.round,
            row,
        };
        self.pending = Some(ticket.clone());
        Ok(ticket)
    }

    /// Apply the word service verdict for `ticket`
    pub fn finish_submit(
        &mut self,
        ticket: PendingGuess,
        verdict: Result<bool, ServiceError>,
    ) -> Result<GuessOutcome, GameError> {
        if !self.session.is_active || self.pending.as_ref() != Some(&ticket) {
            debug!(word = %ticket.word, round = ticket.round, "discarding stale validation");
            return Err(GameError::StaleValidation);
        }
        self.pending = None;

        match verdict {
            Err(e) => {
                warn!(error = %e, "guess validation failed");
                self.signals
                    .push(Signal::Notice("Word service unavailable, try again".to_string()));
                return Err(e.into());
            }
            Ok(false) => return Err(self.reject(GameError::InvalidWord(ticket.word))),
            Ok(true) => {}
        }

        let word = ticket.word;
        let row = ticket.row;
        self.session.guessed_words.insert(word.clone());

        let result = score_guess(&word, &self.session.target_word);
        self.session.board.apply(row, &result);
        self.session.keyboard.record(&result);
        let attempts = row + 1;

        if result.is_solved() {
            self.session.solved_count += 1;
            self.session.history.push(RoundRecord {
                target: word.clone(),
                solved: true,
                attempts,
            });
            info!(word = %word, attempts, solved = self.session.solved_count, "word solved");
            self.signals.push(Signal::RoundSolved { word, attempts });
            self.signals
                .push(Signal::Notice("Correct! Next word...".to_string()));
            self.next_round()?;
            Ok(GuessOutcome::Solved(result))
        } else if row + 1 >= MAX_ATTEMPTS {
            let target = self.session.target_word.clone();
            self.session.history.push(RoundRecord {
                target: target.clone(),
                solved: false,
                attempts,
            });
            info!(target = %target, "out of attempts");
            self.signals.push(Signal::RoundFailed {
                word: target.clone(),
            });
            self.signals.push(Signal::Notice(format!(
                "Failed! The correct word was: {target}"
            )));
            self.next_round()?;
            Ok(GuessOutcome::Failed { result, target })
        } else {
            self.session.row_index += 1;
            self.session.cell_index = 0;
            Ok(GuessOutcome::Continue(result))
        }
    }

    /// Check the current row against the word service and score it, blocking
    /// on the service call.
    pub fn submit_guess(&mut self) -> Result<GuessOutcome, GameError> {
        let ticket = self.begin_submit()?;
        let verdict = self.service.validate(&ticket.word);
        self.finish_submit(ticket, verdict)
    }

    /// One second elapsed. Returns the summary exactly once, when time runs out.
    pub fn tick(&mut self) -> Option<SessionSummary> {
        if !self.session.is_active {
            return None;
        }
        self.session.remaining_secs = self.session.remaining_secs.saturating_sub(1);
        if self.session.remaining_secs == 0 {
            Some(self.end_session())
        } else {
            None
        }
    }

    /// Deliver whatever ticks the driver has due
    pub fn advance_clock(&mut self) -> Option<SessionSummary> {
        let due = self.driver.poll();
        for _ in 0..due {
            if let Some(summary) = self.tick() {
                return Some(summary);
            }
        }
        None
    }

    fn end_session(&mut self) -> SessionSummary {
        self.session.is_active = false;
        self.pending = None;
        self.driver.stop();

        let summary = self.session.summary();
        info!(solved = summary.solved_count, "session ended");
        self.signals.push(Signal::SessionEnded(summary.clone()));
        summary
    }
}

impl InputSink for SessionController {
    fn on_key(&mut self, key: KeyInput) -> InputOutcome {
        if !self.session.is_active || self.pending.is_some() {
            return InputOutcome::Ignored;
        }

        let row = self.session.row_index;
        match key {
            KeyInput::Backspace if self.session.cell_index > 0 => {
                self.session.cell_index -= 1;
                self.session.board.clear_letter(row, self.session.cell_index);
                InputOutcome::Edited
            }
            KeyInput::Enter => match self.begin_submit() {
                Ok(ticket) => InputOutcome::Submitted(ticket),
                Err(e) => InputOutcome::Rejected(e),
            },
            KeyInput::Letter(c)
                if c.is_ascii_alphabetic() && self.session.cell_index < WORD_LENGTH =>
            {
                self.session
                    .board
                    .set_letter(row, self.session.cell_index, c.to_ascii_uppercase());
                self.session.cell_index += 1;
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }
}
