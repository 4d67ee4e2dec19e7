//! Declarative symbol table.
//!
//! Maps every public symbol to the group whose provider supplies it and the
//! capabilities it needs. Immutable once built.

pub mod builder;
pub mod catalog;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use builder::SymbolTableBuilder;

/// One configuration contribution: symbols added to a group under a
/// shared capability requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub group: String,
    pub symbols: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl Contribution {
    pub fn new<S, R>(group: impl Into<String>, symbols: S, requires: R) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            group: group.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            requires: requires.into_iter().map(Into::into).collect(),
        }
    }
}

/// A declared public symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub group: String,
    /// Required capabilities, deduplicated, in declaration order
    pub requires: Vec<String>,
}

/// Symbols loaded together from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    pub symbols: Vec<String>,
}

/// Immutable symbol table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
    /// Symbol names in declaration order
    order: Vec<String>,
    groups: Vec<Group>,
    group_index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Start building a table.
    pub fn builder() -> SymbolTableBuilder {
        SymbolTableBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Symbol names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    pub fn group(&self, key: &str) -> Option<&Group> {
        self.group_index.get(key).map(|&i| &self.groups[i])
    }

    /// Groups in first-declaration order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Distinct required capabilities in first-use order.
    pub fn capabilities(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in self.entries() {
            for cap in &entry.requires {
                if !seen.contains(&cap.as_str()) {
                    seen.push(cap.as_str());
                }
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
