use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{format_hand, format_public_hand, Card};
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::TableError;
use crate::hand::{is_natural, score_hand};
use crate::player::{Player, PlayerStatus, RaiseResponse};
use crate::wallet::WalletStore;

/// One table: a deck, a pot, and the players seated at it, driven through
/// the round lifecycle ante -> deal -> hit/stand -> raise/call/fold ->
/// resolve -> reset.
///
/// The table never owns coin balances. Every coin-affecting operation
/// takes the scope's [`WalletStore`] by handle, so multiple tables can
/// share one wallet. Players are kept in seat (join) order, which fixes
/// the deterministic order for odd-pot remainder distribution.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    deck: Deck,
    pot: u32,
    current_raise: u32,
    players: Vec<Player>,
}

/// Result of a successful join: the dealt hand and the post-ante balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinOutcome {
    pub hand: Vec<Card>,
    pub score: u32,
    pub balance: u32,
    /// Bonus recorded at deal time for an Ace + ten-valued hand. Paid
    /// only at resolution; never credited to the live balance here.
    pub natural_bonus: u32,
}

/// Result of a successful hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitOutcome {
    pub card: Card,
    pub hand: Vec<Card>,
    pub score: u32,
    pub status: PlayerStatus,
}

/// Result of opening a raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseOutcome {
    pub pot: u32,
    pub current_raise: u32,
    /// Other active players who must now call or fold, in seat order.
    pub responders: Vec<String>,
}

/// How a resolved round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RoundResult {
    /// Every in-round player busted or folded; bets were refunded.
    AllBusted,
    /// Survivors tied at the highest score split the pot.
    Winners { identities: Vec<String>, score: u32 },
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundResult::AllBusted => write!(f, "no winner, all players busted"),
            RoundResult::Winners { identities, score } if identities.len() == 1 => {
                write!(f, "winner: {} with score {}", identities[0], score)
            }
            RoundResult::Winners { identities, score } => {
                write!(f, "tie between {} at score {}", identities.join(", "), score)
            }
        }
    }
}

/// Per-player line of a resolved round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub identity: String,
    pub hand: String,
    pub score: u32,
    pub final_balance: u32,
    /// Net coin movement at resolution: pot share, refund, and bonus.
    pub change: i64,
    pub natural_bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub result: RoundResult,
    pub summaries: Vec<RoundSummary>,
}

/// Another seat as visible to the table: first card masked, folded hands
/// hidden entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSeat {
    pub identity: String,
    pub public_hand: String,
    pub status: PlayerStatus,
    pub balance: u32,
}

/// A player's own view of the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    pub hand: Vec<Card>,
    pub rendered_hand: String,
    pub score: u32,
    pub status: PlayerStatus,
    pub balance: u32,
    pub pot: u32,
    pub others: Vec<PublicSeat>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self::with_deck(config, Deck::new())
    }

    /// Deterministic table for reproducible deals.
    pub fn with_seed(config: TableConfig, seed: u64) -> Self {
        Self::with_deck(config, Deck::new_with_seed(seed))
    }

    /// Table with an explicit starting deck (scripted deals, replays).
    pub fn with_deck(config: TableConfig, deck: Deck) -> Self {
        Self {
            config,
            deck,
            pot: 0,
            current_raise: 0,
            players: Vec::new(),
        }
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn current_raise(&self) -> u32 {
        self.current_raise
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, identity: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.identity == identity)
    }

    fn player_mut(&mut self, identity: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.identity == identity)
    }

    /// True when nobody in the round can still draw; the caller usually
    /// resolves at this point.
    pub fn round_finished(&self) -> bool {
        let mut any = false;
        for p in &self.players {
            if p.in_round() {
                any = true;
                if !p.is_folded && p.status == PlayerStatus::Playing {
                    return false;
                }
            }
        }
        any
    }

    /// Antes up, deals two cards, and records a natural bonus when the
    /// opening hand is Ace + ten-valued. A `Ready` seat left over from an
    /// earlier round re-antes in place; a seat with an active hand is
    /// declined.
    pub fn join(
        &mut self,
        wallet: &mut WalletStore,
        identity: &str,
    ) -> Result<JoinOutcome, TableError> {
        if self.deck.remaining() < 2 {
            return Err(TableError::DeckExhausted);
        }
        if self.player(identity).is_some_and(Player::in_round) {
            return Err(TableError::AlreadySeated);
        }
        let balance = wallet.balance(identity);
        let ante = self.config.ante;
        if balance < ante {
            return Err(TableError::InsufficientFunds {
                needed: ante,
                available: balance,
            });
        }

        let cards = vec![
            self.deck.draw().ok_or(TableError::DeckExhausted)?,
            self.deck.draw().ok_or(TableError::DeckExhausted)?,
        ];
        let balance = wallet.adjust(identity, -i64::from(ante));
        self.pot += ante;

        let bonus = if is_natural(&cards) {
            self.config.natural_bonus
        } else {
            0
        };
        let score = score_hand(&cards);

        if self.player(identity).is_none() {
            self.players.push(Player::new(identity.to_string()));
        }
        // seat exists now in both branches
        if let Some(player) = self.player_mut(identity) {
            player.hand = cards.clone();
            player.score = score;
            player.status = PlayerStatus::Playing;
            player.bet = ante;
            player.has_raised = false;
            player.is_folded = false;
            player.natural_bonus = bonus;
        }

        Ok(JoinOutcome {
            hand: cards,
            score,
            balance,
            natural_bonus: bonus,
        })
    }

    /// Draws one card and rescores. A score over 21 busts the player,
    /// which is terminal for the round and forces the folded flag.
    pub fn hit(&mut self, identity: &str) -> Result<HitOutcome, TableError> {
        let eligible = match self.player(identity) {
            None => return Err(TableError::NotSeated),
            Some(p) => !p.is_folded && p.status == PlayerStatus::Playing,
        };
        if !eligible {
            return Err(TableError::NotEligible);
        }
        if self.current_raise > 0 {
            return Err(TableError::RaiseAlreadyOpen);
        }
        let card = self.deck.draw().ok_or(TableError::DeckExhausted)?;

        // seat verified above
        let Some(player) = self.player_mut(identity) else {
            return Err(TableError::NotSeated);
        };
        player.hand.push(card);
        player.score = score_hand(&player.hand);
        if player.score > 21 {
            player.status = PlayerStatus::Bust;
            player.is_folded = true;
        }
        Ok(HitOutcome {
            card,
            hand: player.hand.clone(),
            score: player.score,
            status: player.status,
        })
    }

    /// Playing -> Stand; a no-op for any other status.
    pub fn stand(&mut self, identity: &str) -> Result<PlayerStatus, TableError> {
        let player = self.player_mut(identity).ok_or(TableError::NotSeated)?;
        if player.status == PlayerStatus::Playing {
            player.status = PlayerStatus::Stand;
        }
        Ok(player.status)
    }

    /// Other active players who would have to respond to a raise by
    /// `raiser`, in seat order.
    pub fn active_responders(&self, raiser: &str) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.identity != raiser && p.is_active())
            .map(|p| p.identity.clone())
            .collect()
    }

    /// Upper bound for a raise by `identity`: capped by their own balance
    /// and, when other active players exist, by the lowest balance among
    /// them minus 1, so every responder can call without being forced to
    /// zero. Returns 0 for ineligible raisers.
    pub fn calculate_max_raise(&self, wallet: &mut WalletStore, identity: &str) -> u32 {
        let Some(player) = self.player(identity) else {
            return 0;
        };
        if player.has_raised || player.is_folded || player.status != PlayerStatus::Playing {
            return 0;
        }
        let own = wallet.balance(identity);
        let others = self.active_responders(identity);
        if others.is_empty() {
            return own;
        }
        let min_other = others
            .iter()
            .map(|id| wallet.balance(id))
            .min()
            .unwrap_or(0);
        own.min(min_other.saturating_sub(1))
    }

    /// Opens a raise: debits the raiser, grows the bet and pot, and
    /// blocks hits and further raises until the responses close it.
    pub fn start_raise(
        &mut self,
        wallet: &mut WalletStore,
        identity: &str,
        amount: u32,
    ) -> Result<RaiseOutcome, TableError> {
        if self.current_raise > 0 {
            return Err(TableError::RaiseAlreadyOpen);
        }
        let eligible = match self.player(identity) {
            None => return Err(TableError::NotSeated),
            Some(p) => !p.has_raised && !p.is_folded && p.status == PlayerStatus::Playing,
        };
        if !eligible {
            return Err(TableError::NotEligible);
        }
        let max = self.calculate_max_raise(wallet, identity);
        if amount < 1 || amount > max {
            return Err(TableError::InvalidAmount { amount, max });
        }

        wallet.adjust(identity, -i64::from(amount));
        self.pot += amount;
        self.current_raise = amount;
        let responders = self.active_responders(identity);
        if let Some(player) = self.player_mut(identity) {
            player.bet += amount;
            player.has_raised = true;
        }
        Ok(RaiseOutcome {
            pot: self.pot,
            current_raise: amount,
            responders,
        })
    }

    /// Applies a call or fold against the open raise and returns the
    /// responder's balance afterwards. Folding costs nothing beyond the
    /// bets already placed.
    pub fn respond_to_raise(
        &mut self,
        wallet: &mut WalletStore,
        identity: &str,
        response: RaiseResponse,
    ) -> Result<u32, TableError> {
        if self.current_raise == 0 {
            return Err(TableError::NoActiveRaise);
        }
        let eligible = match self.player(identity) {
            None => return Err(TableError::NotSeated),
            Some(p) => !p.is_folded && p.status == PlayerStatus::Playing,
        };
        if !eligible {
            return Err(TableError::NotEligible);
        }
        match response {
            RaiseResponse::Call => {
                let needed = self.current_raise;
                let available = wallet.balance(identity);
                if available < needed {
                    return Err(TableError::InsufficientFunds { needed, available });
                }
                let balance = wallet.adjust(identity, -i64::from(needed));
                self.pot += needed;
                if let Some(player) = self.player_mut(identity) {
                    player.bet += needed;
                }
                Ok(balance)
            }
            RaiseResponse::Fold => {
                if let Some(player) = self.player_mut(identity) {
                    player.status = PlayerStatus::Fold;
                    player.is_folded = true;
                }
                Ok(wallet.balance(identity))
            }
        }
    }

    /// Reopens hit/stand/raise. Called exactly once after every invited
    /// responder has answered or been folded by the timeout.
    pub fn clear_raise(&mut self) {
        self.current_raise = 0;
    }

    /// Settles the round: splits the pot among the survivors tied at the
    /// top score (odd remainder handed out one coin at a time in seat
    /// order), or refunds every bet when nobody survived. Natural bonuses
    /// are then paid independently to non-busted, non-folded holders.
    /// Afterwards the table resets for the next round: fresh deck, empty
    /// pot, every seat back to `Ready`.
    pub fn resolve_round(&mut self, wallet: &mut WalletStore) -> Result<RoundOutcome, TableError> {
        if self.current_raise > 0 {
            return Err(TableError::RaiseAlreadyOpen);
        }
        let in_round: Vec<String> = self
            .players
            .iter()
            .filter(|p| p.in_round())
            .map(|p| p.identity.clone())
            .collect();
        if in_round.is_empty() {
            return Err(TableError::NoActiveRound);
        }
        let balances_before: Vec<u32> = in_round.iter().map(|id| wallet.balance(id)).collect();

        let survivors: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.in_round() && p.is_active())
            .collect();

        let result = if survivors.is_empty() {
            for id in &in_round {
                let bet = self.player(id).map_or(0, |p| p.bet);
                wallet.adjust(id, i64::from(bet));
            }
            self.pot = 0;
            RoundResult::AllBusted
        } else {
            let top = survivors.iter().map(|p| p.score).max().unwrap_or(0);
            let winners: Vec<String> = survivors
                .iter()
                .filter(|p| p.score == top)
                .map(|p| p.identity.clone())
                .collect();
            let share = self.pot / winners.len() as u32;
            let remainder = self.pot % winners.len() as u32;
            for (i, id) in winners.iter().enumerate() {
                let extra = if (i as u32) < remainder { 1 } else { 0 };
                wallet.adjust(id, i64::from(share + extra));
            }
            for id in &in_round {
                if let Some(p) = self.player(id) {
                    if p.natural_bonus > 0 && p.status != PlayerStatus::Bust && !p.is_folded {
                        wallet.adjust(id, i64::from(p.natural_bonus));
                    }
                }
            }
            self.pot = 0;
            RoundResult::Winners {
                identities: winners,
                score: top,
            }
        };

        let mut summaries = Vec::with_capacity(in_round.len());
        for (id, before) in in_round.iter().zip(balances_before) {
            let final_balance = wallet.balance(id);
            let (hand, score, bonus) = self
                .player(id)
                .map(|p| (format_hand(&p.hand), p.score, p.natural_bonus))
                .unwrap_or_default();
            summaries.push(RoundSummary {
                identity: id.clone(),
                hand,
                score,
                final_balance,
                change: i64::from(final_balance) - i64::from(before),
                natural_bonus: bonus,
            });
        }

        self.reset_for_next_round();
        Ok(RoundOutcome { result, summaries })
    }

    fn reset_for_next_round(&mut self) {
        self.deck.shuffle();
        self.pot = 0;
        self.current_raise = 0;
        for p in &mut self.players {
            p.reset_for_next_round();
        }
    }

    /// The table as `identity` sees it: their full hand, plus every other
    /// seat with the first card masked (folded seats fully hidden).
    pub fn view_for(
        &self,
        wallet: &mut WalletStore,
        identity: &str,
    ) -> Result<TableView, TableError> {
        let me = self.player(identity).ok_or(TableError::NotSeated)?;
        let others = self
            .players
            .iter()
            .filter(|p| p.identity != identity)
            .map(|p| PublicSeat {
                identity: p.identity.clone(),
                public_hand: if p.is_folded {
                    "[folded]".to_string()
                } else {
                    format_public_hand(&p.hand)
                },
                status: p.status,
                balance: wallet.balance(&p.identity),
            })
            .collect();
        Ok(TableView {
            hand: me.hand.clone(),
            rendered_hand: format_hand(&me.hand),
            score: me.score,
            status: me.status,
            balance: wallet.balance(identity),
            pot: self.pot,
            others,
        })
    }
}
