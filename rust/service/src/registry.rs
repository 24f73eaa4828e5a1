use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

use pontoon_engine::logger::{RoundLogger, RoundRecord};
use pontoon_engine::player::{PlayerStatus, RaiseResponse};
use pontoon_engine::raise::RaiseSession;
use pontoon_engine::table::{
    HitOutcome, JoinOutcome, RaiseOutcome, RoundOutcome, Table, TableView,
};
use pontoon_engine::wallet::WalletStore;

use crate::config::ServiceConfig;
use crate::errors::ServiceError;

type SharedWallet = Arc<Mutex<WalletStore>>;

/// An open raise awaiting call/fold responses.
struct PendingRaise {
    session: RaiseSession,
    notify: Arc<Notify>,
}

struct TableEntry {
    scope: String,
    table: Table,
    wallet: SharedWallet,
    pending: Option<PendingRaise>,
}

/// How a raise wait ended: what each responder answered and who was
/// folded by the deadline.
///
/// An absentee whose fold is declined by the table (for instance a
/// responder who was already standing when the raise opened) keeps
/// their status and appears in neither list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseWaitOutcome {
    pub responses: Vec<(String, RaiseResponse)>,
    pub timed_out: Vec<String>,
}

/// Registry of tables by table key and wallets by scope key.
///
/// Both are created on first use and kept until the caller discards
/// them. Every table of a scope shares that scope's wallet; the wallet
/// mutex serializes balance access across those tables. Lock order is
/// always table entry first, wallet second, and no lock is ever held
/// across an await.
pub struct TableService {
    config: ServiceConfig,
    tables: RwLock<HashMap<String, Arc<Mutex<TableEntry>>>>,
    wallets: RwLock<HashMap<String, SharedWallet>>,
    history: Option<Mutex<RoundLogger>>,
}

impl TableService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self {
            config,
            tables: RwLock::new(HashMap::new()),
            wallets: RwLock::new(HashMap::new()),
            history: None,
        })
    }

    /// Service that appends every resolved round to a JSONL history file
    /// at `history_path`. Fails when the file cannot be opened.
    pub fn with_history<P: AsRef<Path>>(
        config: ServiceConfig,
        history_path: P,
    ) -> Result<Self, ServiceError> {
        let mut service = Self::new(config)?;
        service.history = Some(Mutex::new(RoundLogger::create(history_path)?));
        Ok(service)
    }

    fn wallet_for(&self, scope_key: &str) -> Result<SharedWallet, ServiceError> {
        {
            let wallets = self
                .wallets
                .read()
                .map_err(|_| ServiceError::StoragePoisoned)?;
            if let Some(w) = wallets.get(scope_key) {
                return Ok(Arc::clone(w));
            }
        }
        let mut wallets = self
            .wallets
            .write()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let wallet = wallets
            .entry(scope_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(WalletStore::new(&self.config.table))));
        Ok(Arc::clone(wallet))
    }

    fn entry(&self, table_key: &str) -> Result<Arc<Mutex<TableEntry>>, ServiceError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        tables
            .get(table_key)
            .map(Arc::clone)
            .ok_or_else(|| ServiceError::UnknownTable(table_key.to_string()))
    }

    fn entry_or_create(
        &self,
        table_key: &str,
        scope_key: &str,
    ) -> Result<Arc<Mutex<TableEntry>>, ServiceError> {
        if let Ok(existing) = self.entry(table_key) {
            return Ok(existing);
        }
        let wallet = self.wallet_for(scope_key)?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = tables.entry(table_key.to_string()).or_insert_with(|| {
            tracing::info!(table = table_key, scope = scope_key, "creating table");
            let table = match self.config.deck_seed {
                Some(seed) => Table::with_seed(self.config.table.clone(), seed),
                None => Table::new(self.config.table.clone()),
            };
            Arc::new(Mutex::new(TableEntry {
                scope: scope_key.to_string(),
                table,
                wallet,
                pending: None,
            }))
        });
        Ok(Arc::clone(entry))
    }

    /// Daily reset is lazy: every player-facing operation runs it first.
    fn reset_wallet_daily(&self, wallet: &SharedWallet) -> Result<(), ServiceError> {
        let mut guard = wallet.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        if guard.maybe_reset_daily(Utc::now()) {
            tracing::info!("daily wallet reset applied");
        }
        Ok(())
    }

    /// Declines a join when the player is still in an unfinished round at
    /// another table of the same scope.
    fn find_active_elsewhere(
        &self,
        table_key: &str,
        scope_key: &str,
        identity: &str,
    ) -> Result<Option<String>, ServiceError> {
        let snapshot: Vec<(String, Arc<Mutex<TableEntry>>)> = {
            let tables = self
                .tables
                .read()
                .map_err(|_| ServiceError::StoragePoisoned)?;
            tables
                .iter()
                .filter(|(key, _)| key.as_str() != table_key)
                .map(|(key, entry)| (key.clone(), Arc::clone(entry)))
                .collect()
        };
        for (key, entry) in snapshot {
            let guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
            if guard.scope == scope_key
                && guard
                    .table
                    .player(identity)
                    .is_some_and(|p| p.in_round())
            {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    pub fn join(
        &self,
        table_key: &str,
        scope_key: &str,
        identity: &str,
    ) -> Result<JoinOutcome, ServiceError> {
        if let Some(table) = self.find_active_elsewhere(table_key, scope_key, identity)? {
            return Err(ServiceError::ActiveElsewhere { table });
        }
        let entry = self.entry_or_create(table_key, scope_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let mut wallet = entry
            .wallet
            .lock()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let outcome = entry.table.join(&mut wallet, identity)?;
        tracing::info!(
            table = table_key,
            scope = scope_key,
            player = identity,
            score = outcome.score,
            balance = outcome.balance,
            "player joined round"
        );
        Ok(outcome)
    }

    pub fn hit(&self, table_key: &str, identity: &str) -> Result<HitOutcome, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let outcome = entry.table.hit(identity)?;
        tracing::debug!(
            table = table_key,
            player = identity,
            score = outcome.score,
            status = ?outcome.status,
            "player hit"
        );
        Ok(outcome)
    }

    pub fn stand(&self, table_key: &str, identity: &str) -> Result<PlayerStatus, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        Ok(entry.table.stand(identity)?)
    }

    /// Opens a raise and registers the responders to wait for. With no
    /// other active player there is nobody to ask, so the raise closes
    /// immediately.
    pub fn start_raise(
        &self,
        table_key: &str,
        identity: &str,
        amount: u32,
    ) -> Result<RaiseOutcome, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let mut wallet = entry
            .wallet
            .lock()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let outcome = entry.table.start_raise(&mut wallet, identity, amount)?;
        drop(wallet);
        if outcome.responders.is_empty() {
            entry.table.clear_raise();
        } else {
            entry.pending = Some(PendingRaise {
                session: RaiseSession::new(outcome.responders.iter().cloned()),
                notify: Arc::new(Notify::new()),
            });
        }
        tracing::info!(
            table = table_key,
            player = identity,
            amount,
            pot = outcome.pot,
            responders = outcome.responders.len(),
            "raise opened"
        );
        Ok(outcome)
    }

    /// Records one responder's call or fold. When the last invited
    /// responder answers, the raise closes and any waiter wakes early.
    pub fn respond_to_raise(
        &self,
        table_key: &str,
        identity: &str,
        response: RaiseResponse,
    ) -> Result<u32, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let Some(pending) = entry.pending.as_mut() else {
            return Err(ServiceError::NoPendingRaise);
        };
        if !pending.session.expected().iter().any(|e| e == identity) {
            return Err(pontoon_engine::errors::TableError::NotEligible.into());
        }
        if pending.session.response(identity).is_some() {
            return Err(pontoon_engine::errors::TableError::AlreadyResponded.into());
        }
        let mut wallet = entry
            .wallet
            .lock()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let balance = entry.table.respond_to_raise(&mut wallet, identity, response)?;
        drop(wallet);
        // eligibility was pre-checked, recording cannot fail now
        let _ = pending.session.record(identity, response);
        tracing::info!(
            table = table_key,
            player = identity,
            response = ?response,
            "raise response recorded"
        );
        if pending.session.is_complete() {
            entry.table.clear_raise();
            pending.notify.notify_one();
            tracing::debug!(table = table_key, "all responders answered, raise closed");
        }
        Ok(balance)
    }

    /// Waits for every invited responder, up to the configured timeout.
    /// Finishes the instant the last response lands; at the deadline the
    /// absentees are folded and the raise is closed.
    pub async fn wait_for_raise(
        &self,
        table_key: &str,
    ) -> Result<RaiseWaitOutcome, ServiceError> {
        let entry = self.entry(table_key)?;
        let notify = {
            let guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
            let pending = guard.pending.as_ref().ok_or(ServiceError::NoPendingRaise)?;
            Arc::clone(&pending.notify)
        };

        // suspend without holding any lock
        let _ = tokio::time::timeout(self.config.raise_timeout, notify.notified()).await;

        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        let Some(pending) = entry.pending.take() else {
            return Err(ServiceError::NoPendingRaise);
        };
        let mut session = pending.session;
        let mut folded = Vec::new();
        if !session.is_complete() {
            let mut wallet = entry
                .wallet
                .lock()
                .map_err(|_| ServiceError::StoragePoisoned)?;
            for id in session.absentees() {
                match entry
                    .table
                    .respond_to_raise(&mut wallet, &id, RaiseResponse::Fold)
                {
                    Ok(_) => {
                        let _ = session.record(&id, RaiseResponse::Fold);
                        folded.push(id);
                    }
                    Err(err) => {
                        tracing::warn!(table = table_key, player = %id, error = %err, "timeout fold declined");
                    }
                }
            }
            drop(wallet);
            entry.table.clear_raise();
            tracing::info!(
                table = table_key,
                folded = folded.len(),
                "raise timed out, absentees folded"
            );
        }
        let responses = session
            .expected()
            .iter()
            .filter(|id| !folded.iter().any(|f| f == *id))
            .filter_map(|id| session.response(id).map(|r| (id.clone(), r)))
            .collect();
        Ok(RaiseWaitOutcome {
            responses,
            timed_out: folded,
        })
    }

    /// Settles the table's round and resets it, logging the outcome to
    /// the round history when one is configured.
    pub fn resolve(&self, table_key: &str) -> Result<RoundOutcome, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let mut wallet = entry
            .wallet
            .lock()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        let outcome = entry.table.resolve_round(&mut wallet)?;
        drop(wallet);
        tracing::info!(
            table = table_key,
            result = %outcome.result,
            players = outcome.summaries.len(),
            "round resolved"
        );
        if let Some(history) = &self.history {
            match history.lock() {
                Ok(mut logger) => {
                    let record = RoundRecord {
                        round_id: logger.next_id(),
                        table: table_key.to_string(),
                        result: outcome.result.clone(),
                        summaries: outcome.summaries.clone(),
                        ts: None,
                        meta: None,
                    };
                    if let Err(err) = logger.write(&record) {
                        tracing::warn!(table = table_key, error = %err, "round history write failed");
                    }
                }
                Err(_) => {
                    tracing::warn!(table = table_key, "round history lock poisoned");
                }
            }
        }
        Ok(outcome)
    }

    /// The table as one player sees it: own cards in full, everyone
    /// else's hand with the first card masked.
    pub fn show(&self, table_key: &str, identity: &str) -> Result<TableView, ServiceError> {
        let entry = self.entry(table_key)?;
        let mut guard = entry.lock().map_err(|_| ServiceError::StoragePoisoned)?;
        let entry = &mut *guard;
        self.reset_wallet_daily(&entry.wallet)?;
        let mut wallet = entry
            .wallet
            .lock()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        Ok(entry.table.view_for(&mut wallet, identity)?)
    }

    /// Discards a table. Wallets are scope-wide and stay.
    pub fn remove_table(&self, table_key: &str) -> Result<bool, ServiceError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| ServiceError::StoragePoisoned)?;
        Ok(tables.remove(table_key).is_some())
    }
}
