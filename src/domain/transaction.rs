use super::account::Amount;
use super::identity::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TxId = u64;

/// Lifecycle of an escrowed transaction.
///
/// ```text
/// Pending ──confirm──▶ Confirmed ──withdraw──▶ Withdrawn
///    │
///    └────dispute───▶ Disputed ──refund──▶ Refunded
///                          └────release──▶ Released
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Confirmed,
    Withdrawn,
    Disputed,
    Refunded,
    Released,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Withdrawn | Self::Refunded | Self::Released)
    }

    /// The only edges of the state graph.
    pub fn can_transition_to(self, next: Self) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Disputed)
                | (Confirmed, Withdrawn)
                | (Disputed, Refunded)
                | (Disputed, Released)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Withdrawn => "withdrawn",
            Self::Disputed => "disputed",
            Self::Refunded => "refunded",
            Self::Released => "released",
        };
        f.write_str(name)
    }
}

/// A permanent record of funds held on behalf of `receiver`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub sender: Identity,
    pub receiver: Identity,
    pub amount: Amount,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(id: TxId, sender: Identity, receiver: Identity, amount: Amount) -> Self {
        Self {
            id,
            sender,
            receiver,
            amount,
            status: TransactionStatus::Pending,
        }
    }

    pub fn is_party(&self, identity: &Identity) -> bool {
        &self.sender == identity || &self.receiver == identity
    }
}
