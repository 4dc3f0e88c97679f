use super::engine::EscrowEngine;
use crate::domain::identity::Identity;
use crate::domain::transaction::TxId;
use crate::error::Result;

/// One call against the engine, as issued by an external caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddAdmin { caller: Identity, admin: Identity },
    DeleteAdmin { caller: Identity, admin: Identity },
    Pause { caller: Identity },
    Unpause { caller: Identity },
    Deposit { caller: Identity, receiver: Identity, amount: u128 },
    Confirm { caller: Identity, id: TxId },
    Withdraw { caller: Identity, id: TxId },
    Dispute { caller: Identity, id: TxId },
    Refund { caller: Identity, id: TxId },
    Release { caller: Identity, id: TxId },
}

impl Command {
    pub fn caller(&self) -> &Identity {
        match self {
            Self::AddAdmin { caller, .. }
            | Self::DeleteAdmin { caller, .. }
            | Self::Pause { caller }
            | Self::Unpause { caller }
            | Self::Deposit { caller, .. }
            | Self::Confirm { caller, .. }
            | Self::Withdraw { caller, .. }
            | Self::Dispute { caller, .. }
            | Self::Refund { caller, .. }
            | Self::Release { caller, .. } => caller,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddAdmin { .. } => "add_admin",
            Self::DeleteAdmin { .. } => "delete_admin",
            Self::Pause { .. } => "pause",
            Self::Unpause { .. } => "unpause",
            Self::Deposit { .. } => "deposit",
            Self::Confirm { .. } => "confirm",
            Self::Withdraw { .. } => "withdraw",
            Self::Dispute { .. } => "dispute",
            Self::Refund { .. } => "refund",
            Self::Release { .. } => "release",
        }
    }

    /// Applies the command. Deposits return the id they created.
    pub fn execute(&self, engine: &mut EscrowEngine) -> Result<Option<TxId>> {
        match self {
            Self::AddAdmin { caller, admin } => engine.add_admin(caller, admin).map(|_| None),
            Self::DeleteAdmin { caller, admin } => {
                engine.delete_admin(caller, admin).map(|_| None)
            }
            Self::Pause { caller } => engine.pause(caller).map(|_| None),
            Self::Unpause { caller } => engine.unpause(caller).map(|_| None),
            Self::Deposit {
                caller,
                receiver,
                amount,
            } => engine.deposit(caller, receiver, *amount).map(Some),
            Self::Confirm { caller, id } => engine.confirm(caller, *id).map(|_| None),
            Self::Withdraw { caller, id } => engine.withdraw(caller, *id).map(|_| None),
            Self::Dispute { caller, id } => engine.dispute(caller, *id).map(|_| None),
            Self::Refund { caller, id } => engine.refund(caller, *id).map(|_| None),
            Self::Release { caller, id } => engine.release(caller, *id).map(|_| None),
        }
    }
}
