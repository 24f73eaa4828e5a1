use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A player's standing within the current round.
///
/// `Ready` means seated but not in the current round; resolution returns
/// every participant to `Ready` and the next join re-activates them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Seated, waiting for the next round.
    Ready,
    /// Active: may hit, stand, or raise.
    Playing,
    /// Done drawing, still contests the pot.
    Stand,
    /// Score exceeded 21; forcibly folded, terminal for the round.
    Bust,
    /// Voluntarily folded (or folded by raise timeout); forfeits the pot
    /// contest but keeps no claim on bets already placed.
    Fold,
}

/// A response to an open raise.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseResponse {
    Call,
    Fold,
}

/// Per-table player state. Created on first join and kept across rounds;
/// everything except the identity is cleared on round reset.
#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) identity: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) score: u32,
    pub(crate) status: PlayerStatus,
    pub(crate) bet: u32,
    pub(crate) has_raised: bool,
    pub(crate) is_folded: bool,
    pub(crate) natural_bonus: u32,
}

impl Player {
    pub(crate) fn new(identity: String) -> Self {
        Self {
            identity,
            hand: Vec::new(),
            score: 0,
            status: PlayerStatus::Playing,
            bet: 0,
            has_raised: false,
            is_folded: false,
            natural_bonus: 0,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn natural_bonus(&self) -> u32 {
        self.natural_bonus
    }

    pub fn is_folded(&self) -> bool {
        self.is_folded
    }

    /// Still contesting the pot: playing or standing, and not folded.
    pub fn is_active(&self) -> bool {
        !self.is_folded && matches!(self.status, PlayerStatus::Playing | PlayerStatus::Stand)
    }

    /// Part of the current round. Guards against counting stale `Ready`
    /// entries left over from players who never joined this round.
    pub fn in_round(&self) -> bool {
        self.status != PlayerStatus::Ready || self.bet > 0 || !self.hand.is_empty()
    }

    /// Clears round state, keeping the seat for the next round.
    pub(crate) fn reset_for_next_round(&mut self) {
        self.hand.clear();
        self.score = 0;
        self.status = PlayerStatus::Ready;
        self.bet = 0;
        self.has_raised = false;
        self.is_folded = false;
        self.natural_bonus = 0;
    }
}
