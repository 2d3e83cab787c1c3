use std::collections::HashSet;

use chrono::{DateTime, Local};

use crate::board::{Board, Keyboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u32,
}

/// One finished word, solved or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub target: String,
    pub solved: bool,
    pub attempts: usize,
}

/// Carried by the session end signal
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub solved_count: u32,
    pub duration_secs: u32,
    pub rounds: Vec<RoundRecord>,
    pub ended_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    pub target_word: String,
    pub row_index: usize,
    pub cell_index: usize,
    pub remaining_secs: u32,
    pub solved_count: u32,
    pub guessed_words: HashSet<String>,
    pub is_active: bool,
    // Round bookkeeping
    pub round: u32,
    pub board: Board,
    pub keyboard: Keyboard,
    pub history: Vec<RoundRecord>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            target_word: String::new(),
            row_index: 0,
            cell_index: 0,
            remaining_secs: config.duration_secs,
            solved_count: 0,
            guessed_words: HashSet::new(),
            is_active: false,
            round: 0,
            board: Board::new(),
            keyboard: Keyboard::new(),
            history: Vec::new(),
        }
    }

    /// Clear the grid for a fresh target word
    pub fn begin_round(&mut self, target: String) {
        self.round += 1;
        self.target_word = target;
        self.row_index = 0;
        self.cell_index = 0;
        self.guessed_words.clear();
        self.board = Board::new();
        self.keyboard = Keyboard::new();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            solved_count: self.solved_count,
            duration_secs: self.config.duration_secs,
            rounds: self.history.clone(),
            ended_at: Local::now(),
        }
    }
}
