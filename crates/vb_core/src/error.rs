use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("unknown counter label: {0}")]
    UnknownCounter(String),

    #[error("duplicate player in roster: {0}")]
    DuplicatePlayer(String),

    #[error("empty roster")]
    EmptyRoster,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
