pub mod balance_reader;
pub mod command_reader;
pub mod ledger_writer;
