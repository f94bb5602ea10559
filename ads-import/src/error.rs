use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("input file {0} not found")]
    NotFound(PathBuf),

    #[error("input is empty or unreadable")]
    Empty,

    #[error("header row not found")]
    HeaderNotFound,

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
