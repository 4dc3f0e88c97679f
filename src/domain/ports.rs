use super::account::{Amount, Balance};
use super::events::EscrowEvent;
use super::identity::Identity;
use super::transaction::{Transaction, TxId};
use crate::error::Result;

/// The transaction ledger: a mapping from id to record.
///
/// `store` overwrites. `remove` only exists so the engine can roll back a
/// deposit whose funding transfer failed; committed records are never removed.
pub trait TransactionStore: Send {
    fn store(&mut self, tx: Transaction) -> Result<()>;
    fn get(&self, id: TxId) -> Result<Option<Transaction>>;
    fn remove(&mut self, id: TxId) -> Result<Option<Transaction>>;
    fn all(&self) -> Result<Vec<Transaction>>;
}

/// Funds held by identities outside of the ledger's own bookkeeping.
///
/// A transfer either moves the whole amount or fails with
/// [`EscrowError::TransferFailed`](crate::error::EscrowError::TransferFailed)
/// and leaves every balance untouched.
pub trait Bank: Send {
    fn balance_of(&self, identity: &Identity) -> Balance;
    /// Every identity the bank has seen, sorted by identity.
    fn balances(&self) -> Vec<(Identity, Balance)>;
    fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount) -> Result<()>;
}

/// Consumer of [`EscrowEvent`] notifications.
pub trait EventSink: Send {
    fn emit(&mut self, event: EscrowEvent);
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type BankBox = Box<dyn Bank>;
pub type EventSinkBox = Box<dyn EventSink>;
