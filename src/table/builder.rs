//! Symbol table construction.

use crate::error::{Error, Result};
use crate::table::catalog;
use crate::table::{Contribution, Group, SymbolEntry, SymbolTable};

/// Collects contributions and merges them into a [`SymbolTable`].
///
/// Contributions naming the same group extend it. A symbol name may appear
/// only once across all contributions; `build` fails on the first repeat.
#[derive(Debug, Clone, Default)]
pub struct SymbolTableBuilder {
    contributions: Vec<Contribution>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded with the built-in pipeline catalog.
    pub fn with_catalog() -> Self {
        let mut builder = Self::new();
        builder.extend(catalog::contributions());
        builder
    }

    /// Add one contribution.
    pub fn contribute(mut self, contribution: Contribution) -> Self {
        self.contributions.push(contribution);
        self
    }

    /// Add several contributions.
    pub fn extend(&mut self, contributions: impl IntoIterator<Item = Contribution>) {
        self.contributions.extend(contributions);
    }

    /// Merge all contributions.
    pub fn build(self) -> Result<SymbolTable> {
        let mut table = SymbolTable::default();

        for contribution in self.contributions {
            let Contribution {
                group,
                symbols,
                requires,
            } = contribution;

            if group.trim().is_empty() {
                return Err(Error::InvalidContribution("empty group key".into()));
            }

            let mut deduped: Vec<String> = Vec::with_capacity(requires.len());
            for cap in requires {
                if cap.trim().is_empty() {
                    return Err(Error::InvalidContribution(format!(
                        "empty capability name in group '{}'",
                        group
                    )));
                }
                if !deduped.contains(&cap) {
                    deduped.push(cap);
                }
            }

            let index = Self::group_slot(&mut table, &group);

            for name in symbols {
                if name.trim().is_empty() {
                    return Err(Error::InvalidContribution(format!(
                        "empty symbol name in group '{}'",
                        group
                    )));
                }

                if let Some(existing) = table.entries.get(&name) {
                    return Err(Error::DuplicateSymbol {
                        name,
                        first_group: existing.group.clone(),
                        second_group: group,
                    });
                }

                table.groups[index].symbols.push(name.clone());
                table.order.push(name.clone());
                table.entries.insert(
                    name.clone(),
                    SymbolEntry {
                        name,
                        group: group.clone(),
                        requires: deduped.clone(),
                    },
                );
            }
        }

        log::debug!(
            "Built symbol table: {} symbols in {} groups",
            table.order.len(),
            table.groups.len()
        );
        Ok(table)
    }

    fn group_slot(table: &mut SymbolTable, key: &str) -> usize {
        if let Some(&index) = table.group_index.get(key) {
            return index;
        }
        table.groups.push(Group {
            key: key.to_string(),
            symbols: Vec::new(),
        });
        let index = table.groups.len() - 1;
        table.group_index.insert(key.to_string(), index);
        index
    }
}
