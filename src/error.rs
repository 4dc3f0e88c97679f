use crate::domain::identity::Identity;
use crate::domain::transaction::{TransactionStatus, TxId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscrowError {
    #[error("Contract is paused")]
    ContractPaused,
    #[error("Unauthorized address: {0}")]
    Unauthorized(Identity),
    #[error("Address {0} is already an admin")]
    AlreadyAdmin(Identity),
    #[error("Address {0} is not an admin")]
    NotAnAdmin(Identity),
    #[error("Contract is not paused")]
    NotPaused,
    #[error("Receiver cannot be the null address")]
    ZeroReceiver,
    #[error("Deposit amount must be positive")]
    ZeroAmount,
    #[error("Address {0} is the escrow custody account")]
    CustodyParty(Identity),
    #[error("Transaction {0} does not exist")]
    TransactionNotFound(TxId),
    #[error("Transaction {id} is {current}, expected {expected}")]
    InvalidTransition {
        id: TxId,
        current: TransactionStatus,
        expected: TransactionStatus,
    },
    #[error("Address {caller} is not allowed to act on transaction {id}")]
    WrongCaller { id: TxId, caller: Identity },
    #[error("Transfer failed: {0}")]
    TransferFailed(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EscrowError {
    /// `Unauthorized` and `WrongCaller`.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::WrongCaller { .. })
    }

    /// Failures caused by the current lifecycle state rather than the caller.
    ///
    /// `ContractPaused` is the pause guard and is not part of this group.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::AlreadyAdmin(_)
                | Self::NotAnAdmin(_)
                | Self::NotPaused
                | Self::InvalidTransition { .. }
        )
    }

    /// Rejected deposit arguments.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ZeroReceiver | Self::ZeroAmount | Self::CustodyParty(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EscrowError>;
