use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A shuffled 52-card deck consumed from the front, one card at a time.
/// An exhausted deck is a normal state that callers check before dealing.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Creates a freshly shuffled deck seeded from OS entropy, so two
    /// consecutive creations are uncorrelated.
    pub fn new() -> Self {
        let rng = ChaCha20Rng::from_rng(&mut rand::rng());
        let mut deck = Self {
            cards: full_deck(),
            position: 0,
            rng,
        };
        deck.shuffle();
        deck
    }

    /// Creates a shuffled deck with a fixed seed for reproducible deals.
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let mut deck = Self {
            cards: full_deck(),
            position: 0,
            rng,
        };
        deck.shuffle();
        deck
    }

    /// Builds an unshuffled deck with an explicit card order; cards are
    /// drawn in the order given. Used by scripted deals and replays.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    /// Rebuilds the full 52-card deck and reshuffles it, continuing the
    /// deck's RNG stream.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Removes and returns the top card, or `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
