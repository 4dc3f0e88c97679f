use crate::domain::account::{Amount, Balance};
use crate::domain::identity::Identity;
use crate::domain::ports::{Bank, TransactionStore};
use crate::domain::transaction::{Transaction, TxId};
use crate::error::{EscrowError, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// An in-memory transaction ledger.
///
/// Backed by a `BTreeMap` so that [`TransactionStore::all`] yields records in
/// id order without sorting.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: BTreeMap<TxId, Transaction>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn store(&mut self, tx: Transaction) -> Result<()> {
        self.transactions.insert(tx.id, tx);
        Ok(())
    }

    fn get(&self, id: TxId) -> Result<Option<Transaction>> {
        Ok(self.transactions.get(&id).cloned())
    }

    fn remove(&mut self, id: TxId) -> Result<Option<Transaction>> {
        Ok(self.transactions.remove(&id))
    }

    fn all(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.values().cloned().collect())
    }
}

/// An in-memory bank of identity balances.
///
/// Identities registered with [`InMemoryBank::reject_incoming`] refuse every
/// transfer addressed to them, which stands in for a receiving account that
/// cannot accept funds.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBank {
    balances: HashMap<Identity, Balance>,
    rejecting: HashSet<Identity>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (Identity, Balance)>,
    {
        Self {
            balances: balances.into_iter().collect(),
            rejecting: HashSet::new(),
        }
    }

    /// Sets the opening balance of `identity`, replacing any previous value.
    pub fn credit(&mut self, identity: Identity, balance: Balance) {
        self.balances.insert(identity, balance);
    }

    pub fn reject_incoming(&mut self, identity: Identity) {
        self.rejecting.insert(identity);
    }

    pub fn accept_incoming(&mut self, identity: &Identity) {
        self.rejecting.remove(identity);
    }
}

impl Bank for InMemoryBank {
    fn balance_of(&self, identity: &Identity) -> Balance {
        self.balances.get(identity).copied().unwrap_or_default()
    }

    fn balances(&self) -> Vec<(Identity, Balance)> {
        let mut all: Vec<_> = self
            .balances
            .iter()
            .map(|(identity, balance)| (identity.clone(), *balance))
            .collect();
        all.sort();
        all
    }

    fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount) -> Result<()> {
        if self.rejecting.contains(to) {
            return Err(EscrowError::TransferFailed(format!(
                "{to} does not accept transfers"
            )));
        }
        if from == to {
            return Err(EscrowError::TransferFailed(format!(
                "{from} cannot transfer to itself"
            )));
        }

        let from_balance = self.balance_of(from);
        let debited = from_balance.checked_sub(amount).ok_or_else(|| {
            EscrowError::TransferFailed(format!(
                "insufficient funds: {from} holds {from_balance}, needs {amount}"
            ))
        })?;
        let credited = self.balance_of(to).checked_add(amount).ok_or_else(|| {
            EscrowError::TransferFailed(format!("balance overflow crediting {to}"))
        })?;

        // Both sides are computed before either is written.
        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}
