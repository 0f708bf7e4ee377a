pub mod ledger;
pub mod mock;
pub mod observability;
pub mod persistence;

pub use ledger::SubprocessLedgerProvider;
pub use persistence::CsvDatasetRepository;
