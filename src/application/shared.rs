use super::engine::EscrowEngine;
use crate::domain::account::Balance;
use crate::domain::identity::Identity;
use crate::domain::transaction::{Transaction, TxId};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A cloneable handle for hosts that issue calls concurrently.
///
/// Every call holds the engine lock for the whole operation, so two calls
/// never interleave, on the same transaction id or otherwise.
#[derive(Clone)]
pub struct SharedEscrow {
    engine: Arc<Mutex<EscrowEngine>>,
}

impl SharedEscrow {
    pub fn new(engine: EscrowEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Runs `f` with exclusive access to the engine.
    pub async fn with_engine<T>(&self, f: impl FnOnce(&mut EscrowEngine) -> T) -> T {
        let mut engine = self.engine.lock().await;
        f(&mut *engine)
    }

    pub async fn add_admin(&self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.engine.lock().await.add_admin(caller, identity)
    }

    pub async fn delete_admin(&self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.engine.lock().await.delete_admin(caller, identity)
    }

    pub async fn pause(&self, caller: &Identity) -> Result<()> {
        self.engine.lock().await.pause(caller)
    }

    pub async fn unpause(&self, caller: &Identity) -> Result<()> {
        self.engine.lock().await.unpause(caller)
    }

    pub async fn deposit(
        &self,
        caller: &Identity,
        receiver: &Identity,
        value: u128,
    ) -> Result<TxId> {
        self.engine.lock().await.deposit(caller, receiver, value)
    }

    pub async fn confirm(&self, caller: &Identity, id: TxId) -> Result<()> {
        self.engine.lock().await.confirm(caller, id)
    }

    pub async fn withdraw(&self, caller: &Identity, id: TxId) -> Result<()> {
        self.engine.lock().await.withdraw(caller, id)
    }

    pub async fn dispute(&self, caller: &Identity, id: TxId) -> Result<()> {
        self.engine.lock().await.dispute(caller, id)
    }

    pub async fn refund(&self, caller: &Identity, id: TxId) -> Result<()> {
        self.engine.lock().await.refund(caller, id)
    }

    pub async fn release(&self, caller: &Identity, id: TxId) -> Result<()> {
        self.engine.lock().await.release(caller, id)
    }

    pub async fn transaction(&self, id: TxId) -> Result<Option<Transaction>> {
        self.engine.lock().await.transaction(id)
    }

    pub async fn next_id(&self) -> TxId {
        self.engine.lock().await.next_id()
    }

    pub async fn balance_of(&self, identity: &Identity) -> Balance {
        self.engine.lock().await.balance_of(identity)
    }

    /// Consumes the handle and returns the engine, or `None` while other
    /// clones are still alive.
    pub fn into_inner(self) -> Option<EscrowEngine> {
        Arc::try_unwrap(self.engine).ok().map(Mutex::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::EscrowConfig;
    use crate::domain::transaction::TransactionStatus;
    use crate::infrastructure::events::TracingEventSink;
    use crate::infrastructure::in_memory::{InMemoryBank, InMemoryTransactionStore};

    fn shared() -> SharedEscrow {
        SharedEscrow::new(EscrowEngine::new(
            EscrowConfig::new(Identity::new("owner")),
            Box::new(InMemoryTransactionStore::new()),
            Box::new(InMemoryBank::with_balances([(
                Identity::new("sender"),
                Balance::new(100),
            )])),
            Box::new(TracingEventSink),
        ))
    }

    #[tokio::test]
    async fn test_shared_lifecycle() {
        let escrow = shared();
        let sender = Identity::new("sender");
        let receiver = Identity::new("receiver");

        let id = escrow.deposit(&sender, &receiver, 60).await.unwrap();
        escrow.confirm(&sender, id).await.unwrap();
        escrow.withdraw(&receiver, id).await.unwrap();

        let tx = escrow.transaction(id).await.unwrap().unwrap();
        assert_eq!(tx.status, TransactionStatus::Withdrawn);
        assert_eq!(escrow.balance_of(&receiver).await, Balance::new(60));
    }

    #[tokio::test]
    async fn test_into_inner_requires_last_handle() {
        let escrow = shared();
        let clone = escrow.clone();
        assert!(escrow.into_inner().is_none());

        let engine = clone.into_inner().unwrap();
        assert_eq!(engine.next_id(), 1);
    }
}
