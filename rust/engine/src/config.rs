use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable table and wallet parameters, supplied by the hosting layer at
/// table/wallet creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Coins every wallet entry starts with and resets to each day.
    pub starting_balance: u32,
    /// Fixed entry bet debited on joining a round.
    pub ante: u32,
    /// Bonus owed to a surviving player dealt an Ace + ten-valued card.
    pub natural_bonus: u32,
    /// Local-time offset from UTC, in whole hours, used for the daily
    /// wallet reset boundary.
    pub tz_offset_hours: i32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: 30,
            ante: 1,
            natural_bonus: 5,
            tz_offset_hours: 9,
        }
    }
}

impl TableConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_balance == 0 {
            return Err(ConfigError::InvalidValue(
                "starting_balance must be greater than 0".to_string(),
            ));
        }
        if self.ante == 0 {
            return Err(ConfigError::InvalidValue(
                "ante must be greater than 0".to_string(),
            ));
        }
        if self.ante > self.starting_balance {
            return Err(ConfigError::InvalidValue(
                "ante cannot exceed starting_balance".to_string(),
            ));
        }
        if self.tz_offset_hours.abs() > 23 {
            return Err(ConfigError::InvalidValue(
                "tz_offset_hours must be between -23 and 23".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}
