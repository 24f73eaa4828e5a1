use pontoon_engine::config::ConfigError;
use pontoon_engine::errors::TableError;
use thiserror::Error;

/// Errors surfaced by the registry layer. Engine declines pass through
/// unchanged; the rest are registry concerns.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown table key: {0}")]
    UnknownTable(String),
    #[error("player is already in an unfinished round at table {table}")]
    ActiveElsewhere { table: String },
    #[error("no raise is awaiting responses at this table")]
    NoPendingRaise,
    #[error("internal storage lock poisoned")]
    StoragePoisoned,
    #[error("failed to write round history: {0}")]
    History(#[from] std::io::Error),
}
