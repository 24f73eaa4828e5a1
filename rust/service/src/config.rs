use std::time::Duration;

use pontoon_engine::config::{ConfigError, TableConfig};

const DEFAULT_RAISE_TIMEOUT: Duration = Duration::from_secs(60);

/// Service configuration: the engine's table parameters plus how long
/// an open raise waits for call/fold responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub table: TableConfig,
    /// How long invited responders get before absentees are folded.
    pub raise_timeout: Duration,
    /// Fixed deck seed for reproducible deals; `None` seeds from OS
    /// entropy.
    pub deck_seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            raise_timeout: DEFAULT_RAISE_TIMEOUT,
            deck_seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.table.validate()?;
        if self.raise_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "raise_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
