use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::session::TrainerError;

/// Shuffle a slice in place with the Fisher–Yates algorithm.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen element at or before it, so every permutation is equally
/// likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The ordered words of a session.
///
/// A deck is never empty and is only ever reordered as a whole.
pub struct Deck {
    words: Vec<String>,
    rng: StdRng,
}

impl Deck {
    /// Build a shuffled deck from a copy of `words`.
    ///
    /// `seed` makes the shuffle order reproducible; `None` seeds from OS entropy.
    pub fn new(words: &[String], seed: Option<u64>) -> Result<Self, TrainerError> {
        if words.is_empty() {
            return Err(TrainerError::EmptyDeck);
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut deck = Self {
            words: words.to_vec(),
            rng,
        };
        deck.reshuffle();
        Ok(deck)
    }

    /// Replace the current order with a fresh random permutation.
    pub fn reshuffle(&mut self) {
        shuffle(&mut self.words, &mut self.rng);
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
