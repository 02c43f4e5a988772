use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invoice record not found: {0}")]
    RecordNotFound(PathBuf),

    #[error("Malformed invoice record {path}: {source}")]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid invoice file name: {0}")]
    InvalidFileName(String),

    #[error("Invoice total is too large to represent")]
    TotalOverflow,

    #[error("Failed to render invoice: {0}")]
    Render(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),

    #[error("Config file already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("Answer does not match the current question")]
    UnexpectedAnswer,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
