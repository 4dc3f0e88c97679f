use clap::{Parser, ValueEnum};
use escrow_ledger::application::engine::{DEFAULT_CUSTODY, EscrowConfig, EscrowEngine};
use escrow_ledger::domain::identity::Identity;
use escrow_ledger::infrastructure::events::TracingEventSink;
use escrow_ledger::infrastructure::in_memory::{InMemoryBank, InMemoryTransactionStore};
use escrow_ledger::interfaces::csv::balance_reader::BalanceReader;
use escrow_ledger::interfaces::csv::command_reader::CommandReader;
use escrow_ledger::interfaces::csv::ledger_writer::LedgerWriter;
use escrow_ledger::logging::{LogFormat, init_logging};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    /// Every transaction with its final status
    Transactions,
    /// Final balance of every known identity, custody included
    Balances,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script CSV (`command, caller, target, amount`)
    input: PathBuf,

    /// Owner identity, fixed for the lifetime of the escrow
    #[arg(long, env = "ESCROW_OWNER")]
    owner: String,

    /// Opening balances CSV (`identity, balance`)
    #[arg(long, env = "ESCROW_BALANCES")]
    balances: Option<PathBuf>,

    /// Identity holding escrowed funds
    #[arg(long, env = "ESCROW_CUSTODY", default_value = DEFAULT_CUSTODY)]
    custody: String,

    /// Report printed to stdout once the script has run
    #[arg(long, env = "ESCROW_REPORT", value_enum, default_value_t = Report::Transactions)]
    report: Report,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, env = "ESCROW_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[arg(long, env = "ESCROW_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format).into_diagnostic()?;

    let mut bank = InMemoryBank::new();
    if let Some(path) = &cli.balances {
        let file = File::open(path).into_diagnostic()?;
        for row in BalanceReader::new(file).balances() {
            let (identity, balance) = row.into_diagnostic()?;
            bank.credit(identity, balance);
        }
    }

    let config = EscrowConfig::new(Identity::new(cli.owner))
        .with_custody(Identity::new(cli.custody));
    let mut engine = EscrowEngine::new(
        config,
        Box::new(InMemoryTransactionStore::new()),
        Box::new(bank),
        Box::new(TracingEventSink),
    );
    info!(owner = %engine.owner(), custody = %engine.custody(), "escrow ready");

    // Replay the script; bad rows and rejected calls are reported and skipped.
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for (row, command) in reader.commands().enumerate() {
        let line = row + 2;
        match command {
            Ok(command) => match command.execute(&mut engine) {
                Ok(created) => {
                    debug!(line, command = command.name(), ?created, "command applied");
                }
                Err(e) => {
                    warn!(
                        line,
                        command = command.name(),
                        caller = %command.caller(),
                        error = %e,
                        "Command rejected"
                    );
                }
            },
            Err(e) => {
                warn!(line, error = %e, "Error reading command");
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = LedgerWriter::new(stdout.lock());
    match cli.report {
        Report::Transactions => {
            let transactions = engine.transactions().into_diagnostic()?;
            writer.write_transactions(&transactions).into_diagnostic()?;
        }
        Report::Balances => {
            writer
                .write_balances(&engine.balances())
                .into_diagnostic()?;
        }
    }

    Ok(())
}
