use crate::domain::account::Balance;
use crate::domain::identity::Identity;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    identity: &'a Identity,
    balance: Balance,
}

/// Writes ledger reports as CSV.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// `id,sender,receiver,amount,status`, one row per transaction.
    pub fn write_transactions<'a, I>(&mut self, transactions: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut wrote_any = false;
        for tx in transactions {
            self.writer.serialize(tx)?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["id", "sender", "receiver", "amount", "status"])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// `identity,balance`, one row per identity.
    pub fn write_balances<'a, I>(&mut self, balances: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a (Identity, Balance)>,
    {
        let mut wrote_any = false;
        for (identity, balance) in balances {
            self.writer.serialize(BalanceRow {
                identity,
                balance: *balance,
            })?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer.write_record(["identity", "balance"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
