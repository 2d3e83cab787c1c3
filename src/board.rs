use std::collections::BTreeMap;

use itertools::Itertools;

use crate::scoring::{GuessResult, LetterOutcome};

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

pub const KEY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub outcome: Option<LetterOutcome>,
}

/// The 6x5 guess grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; WORD_LENGTH]; MAX_ATTEMPTS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[[Cell; WORD_LENGTH]; MAX_ATTEMPTS] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn set_letter(&mut self, row: usize, col: usize, letter: char) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            cell.letter = Some(letter);
        }
    }

    pub fn clear_letter(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = Cell::default();
        }
    }

    /// The row's letters as a word, or None while any cell is empty
    pub fn row_word(&self, row: usize) -> Option<String> {
        let cells = self.rows.get(row)?;
        cells
            .iter()
            .map(|c| c.letter)
            .collect::<Option<Vec<char>>>()
            .map(|letters| letters.into_iter().join(""))
    }

    pub fn apply(&mut self, row: usize, result: &GuessResult) {
        if let Some(cells) = self.rows.get_mut(row) {
            for (cell, (letter, outcome)) in cells.iter_mut().zip(result.letters()) {
                cell.letter = Some(letter);
                cell.outcome = Some(outcome);
            }
        }
    }
}

/// Best outcome seen per letter during the current round
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keyboard {
    states: BTreeMap<char, LetterOutcome>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, letter: char) -> Option<LetterOutcome> {
        self.states.get(&letter).copied()
    }

    pub fn record(&mut self, result: &GuessResult) {
        for (letter, outcome) in result.letters() {
            self.states
                .entry(letter)
                .and_modify(|best| *best = (*best).max(outcome))
                .or_insert(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_guess;

    #[test]
    fn test_row_word_requires_full_row() {
        let mut board = Board::new();
        for (col, c) in "CRAN".chars().enumerate() {
            board.set_letter(0, col, c);
        }
        assert_eq!(board.row_word(0), None);

        board.set_letter(0, 4, 'E');
        assert_eq!(board.row_word(0), Some("CRANE".to_string()));
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut board = Board::new();
        board.set_letter(MAX_ATTEMPTS, 0, 'A');
        board.set_letter(0, WORD_LENGTH, 'A');
        assert_eq!(board, Board::new());
        assert!(board.cell(MAX_ATTEMPTS, 0).is_none());
    }

    #[test]
    fn test_clear_letter_resets_cell() {
        let mut board = Board::new();
        board.set_letter(2, 3, 'Z');
        board.clear_letter(2, 3);
        assert_eq!(board.cell(2, 3), Some(&Cell::default()));
    }

    #[test]
    fn test_apply_marks_outcomes() {
        let mut board = Board::new();
        let result = score_guess("PAPER", "APPLE");
        board.apply(1, &result);

        let row = &board.rows()[1];
        assert_eq!(row[2].letter, Some('P'));
        assert_eq!(row[2].outcome, Some(LetterOutcome::Exact));
        assert_eq!(row[4].outcome, Some(LetterOutcome::Absent));
        assert!(board.rows()[0].iter().all(|c| c.outcome.is_none()));
    }

    #[test]
    fn test_keyboard_keeps_best_outcome() {
        let mut keyboard = Keyboard::new();
        // P is both Present (pos 0) and Exact (pos 2)
        keyboard.record(&score_guess("PAPER", "APPLE"));
        assert_eq!(keyboard.state('P'), Some(LetterOutcome::Exact));
        assert_eq!(keyboard.state('R'), Some(LetterOutcome::Absent));
        assert_eq!(keyboard.state('Z'), None);

        // A later absent verdict does not downgrade
        keyboard.record(&score_guess("PPPPP", "APPLE"));
        assert_eq!(keyboard.state('P'), Some(LetterOutcome::Exact));
    }

    #[test]
    fn test_key_rows_cover_alphabet() {
        let letters: String = KEY_ROWS.concat().chars().sorted().collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
}
