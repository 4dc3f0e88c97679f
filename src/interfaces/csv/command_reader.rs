use crate::application::command::Command;
use crate::domain::identity::Identity;
use crate::domain::transaction::TxId;
use crate::error::{EscrowError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    AddAdmin,
    DeleteAdmin,
    Pause,
    Unpause,
    Deposit,
    Confirm,
    Withdraw,
    Dispute,
    Refund,
    Release,
}

/// A raw `command, caller, target, amount` row.
///
/// `target` is an identity for admin commands and deposits, and a
/// transaction id for the other transaction commands.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub command: CommandKind,
    pub caller: Identity,
    pub target: Option<String>,
    pub amount: Option<u128>,
}

impl TryFrom<CommandRecord> for Command {
    type Error = EscrowError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let caller = record.caller;
        let command = match record.command {
            CommandKind::AddAdmin => Command::AddAdmin {
                admin: identity_target(record.target),
                caller,
            },
            CommandKind::DeleteAdmin => Command::DeleteAdmin {
                admin: identity_target(record.target),
                caller,
            },
            CommandKind::Pause => Command::Pause { caller },
            CommandKind::Unpause => Command::Unpause { caller },
            CommandKind::Deposit => Command::Deposit {
                receiver: identity_target(record.target),
                amount: record.amount.ok_or_else(|| {
                    EscrowError::InvalidCommand("deposit requires an amount".to_string())
                })?,
                caller,
            },
            CommandKind::Confirm => Command::Confirm {
                id: id_target(record.target)?,
                caller,
            },
            CommandKind::Withdraw => Command::Withdraw {
                id: id_target(record.target)?,
                caller,
            },
            CommandKind::Dispute => Command::Dispute {
                id: id_target(record.target)?,
                caller,
            },
            CommandKind::Refund => Command::Refund {
                id: id_target(record.target)?,
                caller,
            },
            CommandKind::Release => Command::Release {
                id: id_target(record.target)?,
                caller,
            },
        };
        Ok(command)
    }
}

// A missing target is kept as the empty identity so that the engine, not the
// parser, rejects a deposit to nobody.
fn identity_target(target: Option<String>) -> Identity {
    Identity::new(target.unwrap_or_default())
}

fn id_target(target: Option<String>) -> Result<TxId> {
    let target = target
        .ok_or_else(|| EscrowError::InvalidCommand("missing transaction id".to_string()))?;
    target
        .parse()
        .map_err(|_| EscrowError::InvalidCommand(format!("invalid transaction id: {target}")))
}

/// Reads engine commands from a CSV source.
///
/// Rows are trimmed and may omit trailing columns.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one `Result` per row; a bad row does not end the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(EscrowError::from).and_then(Command::try_from))
    }
}
