//! Core domain types for salt-test.
//!
//! This crate contains:
//! - Skiplist and exclusion plan types
//! - Skiplist resolution for a single test group
//! - Rendering of exclusion plans into pytest arguments
//! - Test group definitions and the built-in run configuration
//! - Package flavors and pytest command composition

pub mod command;
pub mod emit;
pub mod error;
pub mod flavor;
pub mod group;
pub mod plan;
pub mod skiplist;

pub use error::{Error, Result};
pub use flavor::Flavor;
pub use group::{RunConfig, TestGroup};
pub use plan::{ExclusionPlan, resolve};
pub use skiplist::{EntrySet, GroupSkip, Skiplist, Subgroup};
