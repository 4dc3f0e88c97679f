use crate::domain::account::Balance;
use crate::domain::identity::Identity;
use crate::error::{EscrowError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct BalanceRecord {
    identity: Identity,
    balance: u128,
}

/// Reads opening balances from an `identity, balance` CSV source.
pub struct BalanceReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BalanceReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn balances(self) -> impl Iterator<Item = Result<(Identity, Balance)>> {
        self.reader.into_deserialize::<BalanceRecord>().map(|result| {
            result
                .map(|record| (record.identity, Balance::new(record.balance)))
                .map_err(EscrowError::from)
        })
    }
}
