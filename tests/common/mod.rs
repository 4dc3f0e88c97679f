#![allow(dead_code)]

use escrow_ledger::application::engine::{EscrowConfig, EscrowEngine};
use escrow_ledger::domain::account::Balance;
use escrow_ledger::domain::events::EscrowEvent;
use escrow_ledger::domain::identity::Identity;
use escrow_ledger::infrastructure::in_memory::{InMemoryBank, InMemoryTransactionStore};
use std::fs::File;
use std::io::Error;
use std::path::Path;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub const OPENING_BALANCE: u128 = 10_000;

pub fn id(name: &str) -> Identity {
    Identity::new(name)
}

/// Owner `owner`; `sender` and `receiver` each start with `OPENING_BALANCE`.
pub fn bank() -> InMemoryBank {
    InMemoryBank::with_balances([
        (id("sender"), Balance::new(OPENING_BALANCE)),
        (id("receiver"), Balance::new(OPENING_BALANCE)),
    ])
}

pub fn engine_with(bank: InMemoryBank) -> (EscrowEngine, UnboundedReceiver<EscrowEvent>) {
    let (events, rx) = mpsc::unbounded_channel();
    let engine = EscrowEngine::new(
        EscrowConfig::new(id("owner")),
        Box::new(InMemoryTransactionStore::new()),
        Box::new(bank),
        Box::new(events),
    );
    (engine, rx)
}

pub fn engine() -> (EscrowEngine, UnboundedReceiver<EscrowEvent>) {
    engine_with(bank())
}

/// Custody must hold at least the amount of every transaction whose funds
/// have not been paid out.
pub fn assert_custody_solvent(engine: &EscrowEngine) {
    let outstanding: u128 = engine
        .transactions()
        .unwrap()
        .iter()
        .filter(|tx| !tx.status.is_terminal())
        .map(|tx| tx.amount.value())
        .sum();
    let custody = engine.custody_balance();
    assert!(
        custody >= Balance::new(outstanding),
        "custody holds {custody}, owes {outstanding}"
    );
}

pub fn drain(rx: &mut UnboundedReceiver<EscrowEvent>) -> Vec<EscrowEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

pub fn write_csv(path: &Path, header: &[&str], rows: &[&[&str]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(*row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_script(path: &Path, rows: &[&[&str]]) -> Result<(), Error> {
    write_csv(path, &["command", "caller", "target", "amount"], rows)
}

pub fn write_balances(path: &Path, rows: &[&[&str]]) -> Result<(), Error> {
    write_csv(path, &["identity", "balance"], rows)
}
