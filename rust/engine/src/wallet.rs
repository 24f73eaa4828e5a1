use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::config::TableConfig;

/// Coin balances for one wallet scope (e.g. one server), shared by every
/// table within that scope. Entries are created lazily on first lookup
/// and reset to the starting balance once per local calendar day.
///
/// There is no timer thread: the hosting layer calls
/// [`WalletStore::maybe_reset_daily`] at the start of every player-facing
/// operation, so the first operation after midnight performs the reset.
#[derive(Debug)]
pub struct WalletStore {
    starting_balance: u32,
    tz_offset_hours: i32,
    balances: HashMap<String, u32>,
    last_reset: Option<NaiveDate>,
}

impl WalletStore {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            starting_balance: config.starting_balance,
            tz_offset_hours: config.tz_offset_hours,
            balances: HashMap::new(),
            last_reset: None,
        }
    }

    fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        (now + Duration::hours(i64::from(self.tz_offset_hours))).date_naive()
    }

    /// Current balance, lazily initializing unseen identities to the
    /// starting amount.
    pub fn balance(&mut self, identity: &str) -> u32 {
        *self
            .balances
            .entry(identity.to_string())
            .or_insert(self.starting_balance)
    }

    pub fn set_balance(&mut self, identity: &str, amount: u32) -> u32 {
        self.balances.insert(identity.to_string(), amount);
        amount
    }

    /// Applies a signed delta and returns the new balance. The engine
    /// validates affordability before every debit, so the balance never
    /// goes negative through engine logic.
    pub fn adjust(&mut self, identity: &str, delta: i64) -> u32 {
        let current = i64::from(self.balance(identity));
        let next = (current + delta).max(0) as u32;
        self.set_balance(identity, next)
    }

    /// Resets every tracked balance to the starting amount when the local
    /// date has advanced past the stored reset date. Bets already in a
    /// pot are untouched; only wallet balances change.
    ///
    /// Returns true when a reset was performed.
    pub fn maybe_reset_daily(&mut self, now: DateTime<Utc>) -> bool {
        let today = self.local_date(now);
        let due = match self.last_reset {
            None => true,
            Some(last) => today > last,
        };
        if due {
            for coins in self.balances.values_mut() {
                *coins = self.starting_balance;
            }
            self.last_reset = Some(today);
        }
        due
    }

    pub fn last_reset(&self) -> Option<NaiveDate> {
        self.last_reset
    }

    pub fn tracked_identities(&self) -> impl Iterator<Item = &str> {
        self.balances.keys().map(String::as_str)
    }
}
