use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{
    clock::Clock,
    ids::IdGenerator,
    services::{DashboardSummary, FilterService, Statement, StatementService, SummaryService},
};
use crate::domain::{
    Card, Debt, DebtKind, DisplayStamp, Displayable, Ledger, ListKind, SearchField, TimeWindow,
    Transaction, TransactionKind, TransactionPatch,
};
use crate::errors::{LedgerError, Result};
use crate::storage::StorageBackend;

/// Metadata describing how the ledger was obtained at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetadata {
    pub location: String,
    /// `true` when a stored blob was read successfully.
    pub restored: bool,
    /// Why the default ledger was used in place of a stored one, if it was.
    pub fallback_reason: Option<String>,
}

/// Owns the ledger and its storage. Every write is validated, staged on a copy,
/// persisted, and only then committed, so a failure leaves state untouched.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    metadata: LoadMetadata,
}

impl LedgerManager {
    /// Loads the stored ledger, falling back to the default ledger when the
    /// blob is missing or unreadable. Never fails.
    pub fn open(storage: Box<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Self {
        let location = storage.location();
        let (ledger, restored, fallback_reason) = match storage.load() {
            Ok(Some(ledger)) => {
                info!(
                    %location,
                    transactions = ledger.transactions.len(),
                    debts = ledger.debts.len(),
                    "ledger loaded"
                );
                (ledger, true, None)
            }
            Ok(None) => {
                info!(%location, "no stored ledger, starting empty");
                (Ledger::new(), false, None)
            }
            Err(err) => {
                warn!(%location, error = %err, "stored ledger unreadable, starting empty");
                (Ledger::new(), false, Some(err.to_string()))
            }
        };
        let ids = IdGenerator::seeded(ledger.max_id());
        Self {
            ledger,
            storage,
            clock,
            ids,
            metadata: LoadMetadata {
                location,
                restored,
                fallback_reason,
            },
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn load_metadata(&self) -> &LoadMetadata {
        &self.metadata
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Records a new income or expense entry at the front of the ledger.
    pub fn add_transaction(
        &mut self,
        desc: &str,
        amount: f64,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Transaction> {
        let now = self.clock.now();
        let mut ids = self.ids.clone();
        let id = ids.next(now.timestamp_millis());
        let txn = Transaction::new(
            id,
            now.timestamp_millis(),
            DisplayStamp::from_instant(now),
            desc,
            amount,
            kind,
            category,
        )?;

        let mut staged = self.ledger.clone();
        staged.transactions.insert(0, txn.clone());
        self.commit(staged, ids)?;
        debug!(entry = %txn.display_label(), amount = txn.amount, "transaction added");
        Ok(txn)
    }

    /// Merges `patch` into the transaction with `id`, keeping its id and creation stamps.
    pub fn update_transaction(&mut self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let current = self
            .ledger
            .transaction(id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {id}")))?;
        let updated = current.patched(patch)?;

        let mut staged = self.ledger.clone();
        if let Some(slot) = staged.transaction_mut(id) {
            *slot = updated.clone();
        }
        self.commit(staged, self.ids.clone())?;
        debug!(entry = %updated.display_label(), "transaction updated");
        Ok(updated)
    }

    pub fn add_debt(&mut self, desc: &str, amount: f64, kind: DebtKind) -> Result<Debt> {
        let now = self.clock.now();
        let mut ids = self.ids.clone();
        let id = ids.next(now.timestamp_millis());
        let debt = Debt::new(
            id,
            now.timestamp_millis(),
            DisplayStamp::from_instant(now),
            desc,
            amount,
            kind,
        )?;

        let mut staged = self.ledger.clone();
        staged.debts.insert(0, debt.clone());
        self.commit(staged, ids)?;
        debug!(entry = %debt.display_label(), amount = debt.amount, "debt added");
        Ok(debt)
    }

    /// Removes the entry with `id` from the chosen list. Returns `false`
    /// without touching storage when no entry matches.
    pub fn delete_item(&mut self, kind: ListKind, id: i64) -> Result<bool> {
        let mut staged = self.ledger.clone();
        if !staged.remove(kind, id) {
            debug!(%kind, id, "delete target absent");
            return Ok(false);
        }
        self.commit(staged, self.ids.clone())?;
        debug!(%kind, id, "entry deleted");
        Ok(true)
    }

    /// Empties both lists. The card survives only when `keep_card` is set.
    pub fn reset_all(&mut self, keep_card: bool) -> Result<()> {
        let mut staged = Ledger::new();
        if keep_card {
            staged.card = self.ledger.card.clone();
        }
        self.commit(staged, self.ids.clone())?;
        info!(keep_card, "ledger reset");
        Ok(())
    }

    pub fn set_card(&mut self, holder: &str, number: &str, expiry: &str, cvv: &str) -> Result<Card> {
        let card = Card::new(holder, number, expiry, cvv)?;
        let mut staged = self.ledger.clone();
        staged.card = card.clone();
        self.commit(staged, self.ids.clone())?;
        debug!("card profile replaced");
        Ok(card)
    }

    pub fn dashboard(&self, recent_limit: usize) -> DashboardSummary {
        SummaryService::dashboard(&self.ledger, recent_limit)
    }

    /// Transactions inside `window`, narrowed by `query` over description and category.
    pub fn transaction_feed(&self, window: TimeWindow, query: &str) -> Vec<&Transaction> {
        let timed = FilterService::by_time(&self.ledger.transactions, window, self.now_millis());
        FilterService::by_text(
            timed,
            query,
            &[SearchField::Description, SearchField::Category],
        )
    }

    /// Debts narrowed by `query` over description only.
    pub fn debt_feed(&self, query: &str) -> Vec<&Debt> {
        FilterService::by_text(&self.ledger.debts, query, &[SearchField::Description])
    }

    pub fn statement(&self, window: TimeWindow) -> Statement {
        StatementService::generate(&self.ledger, window, self.clock.now())
    }

    fn commit(&mut self, staged: Ledger, ids: IdGenerator) -> Result<()> {
        self.storage.save(&staged)?;
        self.ledger = staged;
        self.ids = ids;
        Ok(())
    }
}
