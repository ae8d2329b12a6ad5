//! Exclusion plans.

use crate::skiplist::{EntrySet, Skiplist};

/// The resolved, group-scoped exclusions for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPlan {
    /// Paths passed to `--ignore`.
    pub files: EntrySet,
    /// Node ids passed to `--deselect`.
    pub tests: EntrySet,
    /// Expressions folded into a single negated `-k` filter.
    pub keywords: EntrySet,
}

impl ExclusionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.tests.is_empty() && self.keywords.is_empty()
    }
}

/// Compute the exclusion plan for `group`.
///
/// A group without an entry in the skiplist resolves to an empty plan.
/// Entries are not checked against the installed test suite.
pub fn resolve(skiplist: &Skiplist, group: &str) -> ExclusionPlan {
    let Some(skip) = skiplist.group(group) else {
        return ExclusionPlan::new();
    };

    ExclusionPlan {
        files: skip.files.clone(),
        tests: skip.tests.clone(),
        keywords: skip.keywords.clone(),
    }
}
