use crate::cards::{Card, Rank};

/// Scores a blackjack hand. Face cards count 10 and Aces count 11, then
/// while the total exceeds 21 one Ace at a time is re-counted as 1 until
/// the total fits or no flexible Ace remains.
///
/// ```
/// use pontoon_engine::cards::{Card, Rank, Suit};
/// use pontoon_engine::hand::score_hand;
///
/// let hand = [
///     Card { suit: Suit::Hearts, rank: Rank::Ace },
///     Card { suit: Suit::Clubs, rank: Rank::Ace },
///     Card { suit: Suit::Spades, rank: Rank::Nine },
/// ];
/// assert_eq!(score_hand(&hand), 21);
/// ```
pub fn score_hand(hand: &[Card]) -> u32 {
    let mut score = 0;
    let mut flexible_aces = 0;
    for card in hand {
        if card.rank == Rank::Ace {
            flexible_aces += 1;
        }
        score += card.rank.blackjack_value();
    }
    while score > 21 && flexible_aces > 0 {
        score -= 10;
        flexible_aces -= 1;
    }
    score
}

/// True when a freshly dealt two-card hand is a natural: an Ace plus any
/// ten-valued card (10, J, Q, K).
pub fn is_natural(hand: &[Card]) -> bool {
    hand.len() == 2
        && hand.iter().any(|c| c.rank == Rank::Ace)
        && hand.iter().any(|c| c.rank.is_ten_value())
}
