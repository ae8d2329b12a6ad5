//! TOML configuration loading for salt-test.
//!
//! This crate handles:
//! - Fetching documents from local paths and HTTP(S) URLs
//! - Optional SHA-256 verification of fetched documents
//! - Skiplist schema validation
//! - Run configuration (test group definitions)

pub mod document;
pub mod error;
pub mod integrity;
pub mod run;
pub mod skiplist;
pub mod source;

pub use error::{ConfigError, ConfigResult, LoadError, Position, ValidationError};
pub use run::{load_run_config, parse_run_config};
pub use skiplist::{load_skiplist, parse_skiplist, validate};
pub use source::Source;
