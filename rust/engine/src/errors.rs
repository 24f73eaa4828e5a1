use thiserror::Error;

/// Declined table operations. Every variant is locally recoverable: the
/// operation leaves table and wallet state unchanged and the caller
/// surfaces the reason to the player.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("player is not seated at this table")]
    NotSeated,
    #[error("player already has an active hand this round")]
    AlreadySeated,
    #[error("insufficient coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("the deck is exhausted")]
    DeckExhausted,
    #[error("invalid raise amount {amount}, allowed range is 1..={max}")]
    InvalidAmount { amount: u32, max: u32 },
    #[error("a raise is already open; waiting for call/fold responses")]
    RaiseAlreadyOpen,
    #[error("no raise is currently open")]
    NoActiveRaise,
    #[error("player has already responded to this raise")]
    AlreadyResponded,
    #[error("player cannot act while busted, folded, or out of the round")]
    NotEligible,
    #[error("no round is in progress")]
    NoActiveRound,
}
