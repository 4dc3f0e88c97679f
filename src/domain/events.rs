use super::account::Amount;
use super::identity::Identity;
use super::transaction::{Transaction, TxId};
use serde::Serialize;

/// Notifications published after a successful state change.
///
/// Delivery is best-effort: the engine hands each event to its
/// [`EventSink`](super::ports::EventSink) once and never retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EscrowEvent {
    AdminAdded {
        admin: Identity,
    },
    AdminDeleted {
        admin: Identity,
    },
    Paused {
        by: Identity,
    },
    Unpaused {
        by: Identity,
    },
    TransactionCreated {
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
    TransactionConfirmed {
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
    TransactionWithdrawn {
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
    TransactionDisputed {
        caller: Identity,
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
    TransactionRefunded {
        admin: Identity,
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
    TransactionReleased {
        admin: Identity,
        sender: Identity,
        receiver: Identity,
        id: TxId,
        amount: Amount,
    },
}

impl EscrowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdminAdded { .. } => "AdminAdded",
            Self::AdminDeleted { .. } => "AdminDeleted",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
            Self::TransactionCreated { .. } => "TransactionCreated",
            Self::TransactionConfirmed { .. } => "TransactionConfirmed",
            Self::TransactionWithdrawn { .. } => "TransactionWithdrawn",
            Self::TransactionDisputed { .. } => "TransactionDisputed",
            Self::TransactionRefunded { .. } => "TransactionRefunded",
            Self::TransactionReleased { .. } => "TransactionReleased",
        }
    }

    /// The transaction an event refers to, if any.
    pub fn transaction_id(&self) -> Option<TxId> {
        match self {
            Self::TransactionCreated { id, .. }
            | Self::TransactionConfirmed { id, .. }
            | Self::TransactionWithdrawn { id, .. }
            | Self::TransactionDisputed { id, .. }
            | Self::TransactionRefunded { id, .. }
            | Self::TransactionReleased { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub(crate) fn created(tx: &Transaction) -> Self {
        Self::TransactionCreated {
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }

    pub(crate) fn confirmed(tx: &Transaction) -> Self {
        Self::TransactionConfirmed {
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }

    pub(crate) fn withdrawn(tx: &Transaction) -> Self {
        Self::TransactionWithdrawn {
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }

    pub(crate) fn disputed(caller: &Identity, tx: &Transaction) -> Self {
        Self::TransactionDisputed {
            caller: caller.clone(),
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }

    pub(crate) fn refunded(admin: &Identity, tx: &Transaction) -> Self {
        Self::TransactionRefunded {
            admin: admin.clone(),
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }

    pub(crate) fn released(admin: &Identity, tx: &Transaction) -> Self {
        Self::TransactionReleased {
            admin: admin.clone(),
            sender: tx.sender.clone(),
            receiver: tx.receiver.clone(),
            id: tx.id,
            amount: tx.amount,
        }
    }
}
