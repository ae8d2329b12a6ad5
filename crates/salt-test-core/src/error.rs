//! Error types for salt-test.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown test group '{group}' (known groups: {known})")]
    UnknownGroup { group: String, known: String },

    #[error("Test suite for flavor \"{0}\" not installed.")]
    SuiteNotInstalled(String),
}

pub type Result<T> = std::result::Result<T, Error>;
