use crate::domain::access::AccessControl;
use crate::domain::account::{Amount, Balance};
use crate::domain::events::EscrowEvent;
use crate::domain::identity::Identity;
use crate::domain::ports::{BankBox, EventSinkBox, TransactionStoreBox};
use crate::domain::transaction::{Transaction, TransactionStatus, TxId};
use crate::error::{EscrowError, Result};
use tracing::{debug, error, warn};

/// Identity under which the engine holds escrowed funds when none is configured.
pub const DEFAULT_CUSTODY: &str = "escrow";

/// Bootstrap parameters of an [`EscrowEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowConfig {
    /// Fixed for the lifetime of the engine.
    pub owner: Identity,
    /// The engine's own account in the bank.
    pub custody: Identity,
}

impl EscrowConfig {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            custody: Identity::new(DEFAULT_CUSTODY),
        }
    }

    pub fn with_custody(mut self, custody: Identity) -> Self {
        self.custody = custody;
        self
    }
}

/// The escrow ledger.
///
/// `EscrowEngine` is the single context owning the access-control state, the
/// transaction ledger and the id counter. Every mutating entry point takes
/// `&mut self`, so operations are serialized by construction and each one
/// either commits fully or returns an error with no state changed.
///
/// Checks run in a fixed order: pause flag, transaction lookup, caller
/// authorization, current status, and finally the fund transfer. The status
/// change is written before funds move; a failed transfer writes the previous
/// record back.
pub struct EscrowEngine {
    access: AccessControl,
    custody: Identity,
    next_id: TxId,
    transactions: TransactionStoreBox,
    bank: BankBox,
    events: EventSinkBox,
}

impl EscrowEngine {
    /// Creates a new `EscrowEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Owner and custody identities.
    /// * `transactions` - The store for the transaction ledger.
    /// * `bank` - Holds the balances funds are moved between.
    /// * `events` - Receives a notification for every committed operation.
    pub fn new(
        config: EscrowConfig,
        transactions: TransactionStoreBox,
        bank: BankBox,
        events: EventSinkBox,
    ) -> Self {
        Self {
            access: AccessControl::new(config.owner),
            custody: config.custody,
            next_id: 1,
            transactions,
            bank,
            events,
        }
    }

    pub fn owner(&self) -> &Identity {
        self.access.owner()
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.access.is_admin(identity)
    }

    pub fn paused(&self) -> bool {
        self.access.paused()
    }

    /// The id the next deposit will receive: one more than the number of
    /// transactions created so far.
    pub fn next_id(&self) -> TxId {
        self.next_id
    }

    pub fn custody(&self) -> &Identity {
        &self.custody
    }

    /// Snapshot of a transaction, `None` if the id was never assigned.
    pub fn transaction(&self, id: TxId) -> Result<Option<Transaction>> {
        self.transactions.get(id)
    }

    /// Every transaction, ordered by id.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut all = self.transactions.all()?;
        all.sort_by_key(|tx| tx.id);
        Ok(all)
    }

    pub fn balance_of(&self, identity: &Identity) -> Balance {
        self.bank.balance_of(identity)
    }

    pub fn custody_balance(&self) -> Balance {
        self.bank.balance_of(&self.custody)
    }

    pub fn balances(&self) -> Vec<(Identity, Balance)> {
        self.bank.balances()
    }

    pub fn add_admin(&mut self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.access.add_admin(caller, identity)?;
        debug!(%caller, admin = %identity, "admin added");
        self.events.emit(EscrowEvent::AdminAdded {
            admin: identity.clone(),
        });
        Ok(())
    }

    pub fn delete_admin(&mut self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.access.delete_admin(caller, identity)?;
        debug!(%caller, admin = %identity, "admin deleted");
        self.events.emit(EscrowEvent::AdminDeleted {
            admin: identity.clone(),
        });
        Ok(())
    }

    pub fn pause(&mut self, caller: &Identity) -> Result<()> {
        self.access.pause(caller)?;
        debug!(%caller, "escrow paused");
        self.events.emit(EscrowEvent::Paused { by: caller.clone() });
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Identity) -> Result<()> {
        self.access.unpause(caller)?;
        debug!(%caller, "escrow unpaused");
        self.events.emit(EscrowEvent::Unpaused { by: caller.clone() });
        Ok(())
    }

    /// Moves `value` from `caller` into custody on behalf of `receiver`.
    ///
    /// Returns the id of the new `Pending` transaction. The custody account
    /// can be neither side of a deposit.
    pub fn deposit(&mut self, caller: &Identity, receiver: &Identity, value: u128) -> Result<TxId> {
        self.access.ensure_not_paused()?;
        if receiver.is_null() {
            return Err(EscrowError::ZeroReceiver);
        }
        for party in [caller, receiver] {
            if party == &self.custody {
                return Err(EscrowError::CustodyParty(party.clone()));
            }
        }
        let amount = Amount::new(value)?;

        let id = self.next_id;
        let tx = Transaction::new(id, caller.clone(), receiver.clone(), amount);
        self.transactions.store(tx.clone())?;

        if let Err(e) = self.bank.transfer(caller, &self.custody, amount) {
            if let Err(rollback) = self.transactions.remove(id) {
                error!(id, error = %rollback, "failed to discard unfunded transaction");
            }
            warn!(%caller, %receiver, %amount, error = %e, "deposit rolled back");
            return Err(as_transfer_failure(e));
        }
        self.next_id += 1;

        debug!(id, sender = %caller, %receiver, %amount, "transaction created");
        self.events.emit(EscrowEvent::created(&tx));
        Ok(id)
    }

    /// Sender acknowledges the deal; the receiver may then withdraw.
    pub fn confirm(&mut self, caller: &Identity, id: TxId) -> Result<()> {
        self.access.ensure_not_paused()?;
        let tx = self.load(id)?;
        if caller != &tx.sender {
            return Err(wrong_caller(id, caller));
        }
        ensure_status(&tx, TransactionStatus::Pending)?;

        let tx = self.transition(&tx, TransactionStatus::Confirmed, None)?;
        self.events.emit(EscrowEvent::confirmed(&tx));
        Ok(())
    }

    pub fn withdraw(&mut self, caller: &Identity, id: TxId) -> Result<()> {
        self.access.ensure_not_paused()?;
        let tx = self.load(id)?;
        if caller != &tx.receiver {
            return Err(wrong_caller(id, caller));
        }
        ensure_status(&tx, TransactionStatus::Confirmed)?;

        let payee = tx.receiver.clone();
        let tx = self.transition(&tx, TransactionStatus::Withdrawn, Some(&payee))?;
        self.events.emit(EscrowEvent::withdrawn(&tx));
        Ok(())
    }

    /// Either party contests a transaction that has not been confirmed yet.
    ///
    /// Confirmed transactions cannot be disputed: confirmation is the sender's
    /// final word on the deal.
    pub fn dispute(&mut self, caller: &Identity, id: TxId) -> Result<()> {
        self.access.ensure_not_paused()?;
        let tx = self.load(id)?;
        if !tx.is_party(caller) {
            return Err(wrong_caller(id, caller));
        }
        ensure_status(&tx, TransactionStatus::Pending)?;

        let tx = self.transition(&tx, TransactionStatus::Disputed, None)?;
        self.events.emit(EscrowEvent::disputed(caller, &tx));
        Ok(())
    }

    /// Resolves a dispute in favour of the sender.
    pub fn refund(&mut self, caller: &Identity, id: TxId) -> Result<()> {
        self.access.ensure_not_paused()?;
        let tx = self.load(id)?;
        self.access.ensure_privileged(caller)?;
        ensure_status(&tx, TransactionStatus::Disputed)?;

        let payee = tx.sender.clone();
        let tx = self.transition(&tx, TransactionStatus::Refunded, Some(&payee))?;
        self.events.emit(EscrowEvent::refunded(caller, &tx));
        Ok(())
    }

    /// Resolves a dispute in favour of the receiver.
    pub fn release(&mut self, caller: &Identity, id: TxId) -> Result<()> {
        self.access.ensure_not_paused()?;
        let tx = self.load(id)?;
        self.access.ensure_privileged(caller)?;
        ensure_status(&tx, TransactionStatus::Disputed)?;

        let payee = tx.receiver.clone();
        let tx = self.transition(&tx, TransactionStatus::Released, Some(&payee))?;
        self.events.emit(EscrowEvent::released(caller, &tx));
        Ok(())
    }

    fn load(&self, id: TxId) -> Result<Transaction> {
        self.transactions
            .get(id)?
            .ok_or(EscrowError::TransactionNotFound(id))
    }

    /// Writes `next` and, when `payee` is set, pays out the escrowed amount.
    ///
    /// On a failed payout the original record is restored.
    fn transition(
        &mut self,
        tx: &Transaction,
        next: TransactionStatus,
        payee: Option<&Identity>,
    ) -> Result<Transaction> {
        debug_assert!(tx.status.can_transition_to(next));

        let mut updated = tx.clone();
        updated.status = next;
        self.transactions.store(updated.clone())?;

        if let Some(payee) = payee
            && let Err(e) = self.bank.transfer(&self.custody, payee, tx.amount)
        {
            if let Err(rollback) = self.transactions.store(tx.clone()) {
                error!(id = tx.id, error = %rollback, "failed to restore transaction");
            }
            warn!(id = tx.id, status = %next, %payee, error = %e, "transition rolled back");
            return Err(as_transfer_failure(e));
        }

        debug!(id = tx.id, from = %tx.status, to = %next, "transaction updated");
        Ok(updated)
    }
}

fn ensure_status(tx: &Transaction, expected: TransactionStatus) -> Result<()> {
    if tx.status == expected {
        Ok(())
    } else {
        Err(EscrowError::InvalidTransition {
            id: tx.id,
            current: tx.status,
            expected,
        })
    }
}

fn wrong_caller(id: TxId, caller: &Identity) -> EscrowError {
    EscrowError::WrongCaller {
        id,
        caller: caller.clone(),
    }
}

fn as_transfer_failure(e: EscrowError) -> EscrowError {
    match e {
        EscrowError::TransferFailed(_) => e,
        other => EscrowError::TransferFailed(other.to_string()),
    }
}
