use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::board::WORD_LENGTH;
use crate::error::GameError;

/// Playable target words, uppercase and exactly five ASCII letters each
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Normalize raw entries from the word service, dropping anything that is
    /// not a five letter word.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dropped = 0usize;
        let words = raw
            .into_iter()
            .filter_map(|entry| {
                let word = normalize(entry.as_ref());
                if is_playable(&word) {
                    Some(word)
                } else {
                    dropped += 1;
                    None
                }
            })
            .collect::<Vec<_>>();

        if dropped > 0 {
            debug!(dropped, kept = words.len(), "skipped unplayable word list entries");
        }

        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Uniformly random word from the list
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, GameError> {
        self.words
            .choose(rng)
            .map(String::as_str)
            .ok_or(GameError::EmptyWordList)
    }
}

pub fn normalize(word: &str) -> String {
    word.trim().to_uppercase()
}

pub fn is_playable(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_from_raw_uppercases_entries() {
        let list = WordList::from_raw(["crane", "Slate", " audio "]);
        assert_eq!(list.words, vec!["CRANE", "SLATE", "AUDIO"]);
    }

    #[test]
    fn test_from_raw_drops_unplayable_entries() {
        let list = WordList::from_raw(["cat", "crane", "planet", "no-go", "", "ÉCOLE"]);
        assert_eq!(list.words, vec!["CRANE"]);
    }

    #[test]
    fn test_choose_from_empty_list_fails() {
        let list = WordList::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert_matches!(list.choose(&mut rng), Err(GameError::EmptyWordList));
    }

    #[test]
    fn test_choose_returns_member() {
        let list = WordList::from_raw(["crane", "slate", "audio", "pious"]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let word = list.choose(&mut rng).unwrap();
            assert!(list.contains(word));
        }
    }

    #[test]
    fn test_choose_reaches_every_word() {
        let list = WordList::from_raw(["crane", "slate", "audio"]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(list.choose(&mut rng).unwrap().to_string());
        }
        assert_eq!(seen.len(), 3);
    }
}
