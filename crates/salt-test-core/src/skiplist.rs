//! Skiplist definitions.
//!
//! A skiplist maps test group names to the files, node ids and keyword
//! expressions that must not run for that group.

use derive_more::Display;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Insertion-ordered set of skiplist entries.
///
/// Duplicates are dropped on insert, keeping the position of the first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns `false` if it was already present.
    pub fn insert(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.seen.contains(entry)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EntrySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for EntrySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The kinds of exclusions a group can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Subgroup {
    /// Files or directories removed from collection.
    #[display("files")]
    Files,
    /// Individual test node ids to deselect.
    #[display("tests")]
    Tests,
    /// Keyword expressions excluded through pytest's `-k` filter.
    #[display("keywords")]
    Keywords,
}

impl Subgroup {
    pub const ALL: [Subgroup; 3] = [Subgroup::Files, Subgroup::Tests, Subgroup::Keywords];

    /// Look up a subgroup by its document key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Subgroup::Files => "files",
            Subgroup::Tests => "tests",
            Subgroup::Keywords => "keywords",
        }
    }
}

/// Exclusions scoped to one test group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSkip {
    /// Paths relative to the test suite root, skipped wholesale.
    pub files: EntrySet,
    /// Node ids (`path::Class::test[param]`) deselected individually.
    pub tests: EntrySet,
    /// Raw keyword expressions.
    pub keywords: EntrySet,
}

impl GroupSkip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, subgroup: Subgroup) -> &EntrySet {
        match subgroup {
            Subgroup::Files => &self.files,
            Subgroup::Tests => &self.tests,
            Subgroup::Keywords => &self.keywords,
        }
    }

    pub fn entries_mut(&mut self, subgroup: Subgroup) -> &mut EntrySet {
        match subgroup {
            Subgroup::Files => &mut self.files,
            Subgroup::Tests => &mut self.tests,
            Subgroup::Keywords => &mut self.keywords,
        }
    }

    pub fn is_empty(&self) -> bool {
        Subgroup::ALL.iter().all(|s| self.entries(*s).is_empty())
    }
}

/// A validated skiplist.
///
/// Read-only once built; a group missing from the map has no exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skiplist {
    groups: BTreeMap<String, GroupSkip>,
}

impl Skiplist {
    /// An empty skiplist, used when no skiplist source is given.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: BTreeMap<String, GroupSkip>) -> Self {
        Self { groups }
    }

    pub fn group(&self, name: &str) -> Option<&GroupSkip> {
        self.groups.get(name)
    }

    /// Group names in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(GroupSkip::is_empty)
    }
}

impl FromIterator<(String, GroupSkip)> for Skiplist {
    fn from_iter<I: IntoIterator<Item = (String, GroupSkip)>>(iter: I) -> Self {
        Self::from_groups(iter.into_iter().collect())
    }
}
