use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Ledger not initialized (run `absensi init`)")]
    NotInitialized,

    #[error("Ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record payload: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("Store failure: {0}")]
    Store(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
