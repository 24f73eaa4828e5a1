//! # pontoon-engine: Betting Blackjack Table Core
//!
//! A single-table, multi-round betting blackjack engine: deck management,
//! hand scoring, wagering (ante, raise, call/fold), pot distribution, and
//! a shared per-scope wallet with a lazy daily reset. The engine is fully
//! synchronous and platform-agnostic; rendering, command routing, and the
//! timed raise wait live in the service layer.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and hand formatting
//! - [`deck`] - Shuffled 52-card deck with ChaCha20 RNG
//! - [`hand`] - Blackjack scoring and natural detection
//! - [`player`] - Per-table player state and round status
//! - [`wallet`] - Scope-shared coin balances with daily reset
//! - [`table`] - Round lifecycle: ante, deal, hit/stand, raise, resolve
//! - [`raise`] - Call/fold response bookkeeping for an open raise
//! - [`logger`] - Round history serialization (JSONL)
//! - [`config`] - Tunable table parameters with validation
//! - [`errors`] - Error types for declined operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pontoon_engine::cards::{Card, Rank, Suit};
//! use pontoon_engine::hand::score_hand;
//!
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Spades, rank: Rank::King },
//! ];
//! assert_eq!(score_hand(&cards), 21);
//! ```
//!
//! ## Deterministic Dealing
//!
//! Deck order is reproducible with a seed, which the tests and any replay
//! tooling rely on:
//!
//! ```rust
//! use pontoon_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! assert_eq!(d1.draw(), d2.draw());
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod raise;
pub mod table;
pub mod wallet;
