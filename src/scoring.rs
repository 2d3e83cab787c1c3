use itertools::Itertools;

/// Per-letter feedback for a scored guess.
///
/// Ordered from least to most informative so that `max` picks the outcome a
/// keyboard key should keep when a letter shows up more than once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
pub enum LetterOutcome {
    Absent,
    Present,
    Exact,
}

/// A scored guess: the guess text and one outcome per position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessResult {
    pub guess: String,
    pub outcomes: Vec<LetterOutcome>,
}

impl GuessResult {
    pub fn is_solved(&self) -> bool {
        self.outcomes.iter().all(|o| *o == LetterOutcome::Exact)
    }

    /// Letters paired with their outcome, in guess order
    pub fn letters(&self) -> impl Iterator<Item = (char, LetterOutcome)> + '_ {
        self.guess.chars().zip(self.outcomes.iter().copied())
    }
}

/// Score `guess` against `target` with Wordle semantics.
///
/// Both words must have the same length. Exact matches are claimed first so a
/// correctly placed letter is never also spent on an out-of-place duplicate.
pub fn score_guess(guess: &str, target: &str) -> GuessResult {
    let guess_chars: Vec<char> = guess.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();
    debug_assert_eq!(guess_chars.len(), target_chars.len());

    let mut remaining = target_chars.iter().copied().counts();
    let mut outcomes: Vec<Option<LetterOutcome>> = vec![None; guess_chars.len()];

    for (idx, (g, t)) in guess_chars.iter().zip(target_chars.iter()).enumerate() {
        if g == t {
            outcomes[idx] = Some(LetterOutcome::Exact);
            if let Some(count) = remaining.get_mut(g) {
                *count -= 1;
            }
        }
    }

    for (idx, g) in guess_chars.iter().enumerate() {
        if outcomes[idx].is_some() {
            continue;
        }
        outcomes[idx] = match remaining.get_mut(g) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Some(LetterOutcome::Present)
            }
            _ => Some(LetterOutcome::Absent),
        };
    }

    GuessResult {
        guess: guess.to_string(),
        outcomes: outcomes
            .into_iter()
            .map(|o| o.unwrap_or(LetterOutcome::Absent))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterOutcome::{Absent, Exact, Present};

    fn outcomes(guess: &str, target: &str) -> Vec<LetterOutcome> {
        score_guess(guess, target).outcomes
    }

    #[test]
    fn test_double_letter_guess_against_double_letter_target() {
        assert_eq!(
            outcomes("ERASE", "SPEED"),
            vec![Present, Absent, Absent, Present, Present]
        );
    }

    #[test]
    fn test_exact_match_consumes_duplicate_before_present() {
        assert_eq!(
            outcomes("PAPER", "APPLE"),
            vec![Present, Present, Exact, Present, Absent]
        );
    }

    #[test]
    fn test_single_exact_with_anagram_letters() {
        assert_eq!(
            outcomes("REACT", "CRANE"),
            vec![Present, Present, Exact, Present, Absent]
        );
    }

    #[test]
    fn test_late_exact_letter_is_not_claimed_early() {
        // The E at position 4 is green, so the earlier Es have nothing left
        assert_eq!(
            outcomes("EERIE", "CRANE"),
            vec![Absent, Absent, Present, Absent, Exact]
        );
    }

    #[test]
    fn test_repeated_letter_with_one_remaining() {
        assert_eq!(
            outcomes("FLOOR", "ROBOT"),
            vec![Absent, Absent, Present, Exact, Present]
        );
    }

    #[test]
    fn test_all_absent() {
        assert_eq!(outcomes("QUICK", "BLAND"), vec![Absent; 5]);
    }

    #[test]
    fn test_solved_iff_all_exact() {
        let solved = score_guess("CRANE", "CRANE");
        assert!(solved.is_solved());
        assert_eq!(solved.outcomes, vec![Exact; 5]);

        let anagram = score_guess("NACRE", "CRANE");
        assert!(!anagram.is_solved());
        assert!(anagram.outcomes.iter().all(|o| *o != Absent));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        for (guess, target) in [("ERASE", "SPEED"), ("PAPER", "APPLE"), ("LLAMA", "HELLO")] {
            assert_eq!(score_guess(guess, target), score_guess(guess, target));
        }
    }

    #[test]
    fn test_marked_letters_never_exceed_target_count() {
        let pairs = [
            ("EEEEE", "SPEED"),
            ("LLAMA", "HELLO"),
            ("SASSY", "ASSET"),
            ("PAPPY", "APPLE"),
            ("ERASE", "SPEED"),
        ];
        for (guess, target) in pairs {
            let result = score_guess(guess, target);
            assert_eq!(result.outcomes.len(), guess.len());
            for letter in guess.chars().unique() {
                let marked = result
                    .letters()
                    .filter(|(c, o)| *c == letter && *o != Absent)
                    .count();
                let available = target.chars().filter(|c| *c == letter).count();
                assert!(
                    marked <= available,
                    "{guess} vs {target}: {letter} marked {marked} times, target has {available}"
                );
            }
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Exact.to_string(), "Exact");
        assert_eq!(Present.to_string(), "Present");
        assert_eq!(Absent.to_string(), "Absent");
    }

    #[test]
    fn test_outcome_ordering_prefers_exact() {
        assert_eq!(Absent.max(Present), Present);
        assert_eq!(Present.max(Exact), Exact);
    }
}
