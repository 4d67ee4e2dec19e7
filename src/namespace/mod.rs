//! Lazy namespace over the symbol table.
//!
//! Provides a state machine per symbol:
//! UNRESOLVED -> RESOLVED | PLACEHOLDER
//!
//! A failed provider load leaves the symbol UNRESOLVED so a later
//! resolution can retry it. RESOLVED and PLACEHOLDER are terminal.

pub mod global;
pub mod provider;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::capability::{builtin_probe, CapabilityProbe};
use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::placeholder::{Placeholder, PlaceholderFactory};
use crate::table::{SymbolEntry, SymbolTable, SymbolTableBuilder};

pub use provider::{member, FnProvider, Member, Members, Provider, ProviderError, ProviderSet};

/// Resolution state of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolState {
    /// Not requested yet, or the last load failed
    Unresolved,
    /// Real value cached
    Resolved,
    /// Placeholder cached
    Placeholder,
}

impl fmt::Display for SymbolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "UNRESOLVED"),
            Self::Resolved => write!(f, "RESOLVED"),
            Self::Placeholder => write!(f, "PLACEHOLDER"),
        }
    }
}

/// A resolved symbol: the provider's real value or a placeholder.
#[derive(Clone)]
pub enum Symbol {
    Live { name: Arc<str>, value: Member },
    Gated(Arc<Placeholder>),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Self::Live { name, .. } => &**name,
            Self::Gated(placeholder) => placeholder.symbol(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn is_gated(&self) -> bool {
        matches!(self, Self::Gated(_))
    }

    /// The real value. Using a placeholder fails with `CapabilityUnavailable`.
    pub fn value(&self) -> Result<&Member> {
        match self {
            Self::Live { value, .. } => Ok(value),
            Self::Gated(placeholder) => placeholder.invoke(),
        }
    }

    /// The real value as a concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.value()?
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch {
                symbol: self.name().to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Gated(placeholder) => Some(&**placeholder),
            Self::Live { .. } => None,
        }
    }

    /// Whether both handles point at the same cached value.
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Self::Live { value: a, .. }, Self::Live { value: b, .. }) => Arc::ptr_eq(a, b),
            (Self::Gated(a), Self::Gated(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live { name, .. } => f
                .debug_struct("Live")
                .field("name", name)
                .finish_non_exhaustive(),
            Self::Gated(placeholder) => f.debug_tuple("Gated").field(placeholder).finish(),
        }
    }
}

/// A symbol that would resolve to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatedSymbol {
    pub name: String,
    pub missing: Vec<String>,
}

/// Live and gated symbol names, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub live: Vec<String>,
    pub gated: Vec<GatedSymbol>,
}

/// Namespace that resolves declared symbols on first access.
///
/// Nothing is loaded for symbols nobody touches. A group's provider is
/// loaded at most once successfully, no matter how many of its symbols are
/// resolved concurrently. Both caches are pre-sized maps of once-cells, so
/// cached reads take no lock.
pub struct LazyNamespace {
    table: SymbolTable,
    probe: Arc<CapabilityProbe>,
    placeholders: PlaceholderFactory,
    providers: ProviderSet,
    /// Loaded members by group key
    groups: HashMap<String, OnceCell<Members>>,
    /// Resolved symbols by name
    resolved: HashMap<String, OnceLock<Symbol>>,
}

impl LazyNamespace {
    /// Create a namespace over a built table. Probes and loads nothing.
    pub fn new(table: SymbolTable, probe: Arc<CapabilityProbe>, providers: ProviderSet) -> Self {
        let placeholders = PlaceholderFactory::new(probe.hints());
        let groups = table
            .groups()
            .iter()
            .map(|g| (g.key.clone(), OnceCell::new()))
            .collect();
        let resolved = table
            .names()
            .map(|name| (name.to_string(), OnceLock::new()))
            .collect();

        Self {
            table,
            probe,
            placeholders,
            providers,
            groups,
            resolved,
        }
    }

    /// Create a namespace and apply the bootstrap options.
    ///
    /// With `probe_on_init`, every capability the table mentions is probed
    /// once. With `eager`, every symbol is resolved before returning.
    pub async fn bootstrap(
        table: SymbolTable,
        probe: Arc<CapabilityProbe>,
        providers: ProviderSet,
        config: &RegistryConfig,
    ) -> Result<Self> {
        let namespace = Self::new(table, probe, providers);

        if config.probe_on_init {
            for capability in namespace.table.capabilities() {
                namespace.probe.is_available(capability);
            }
        }

        if config.eager {
            namespace.preload().await?;
        }

        Ok(namespace)
    }

    /// Namespace over the built-in catalog plus configured contributions,
    /// probed with the built-in backend detectors.
    pub async fn with_catalog(providers: ProviderSet, config: &RegistryConfig) -> Result<Self> {
        let mut builder = SymbolTableBuilder::with_catalog();
        builder.extend(config.contributions.iter().cloned());
        let table = builder.build()?;
        let probe = Arc::new(builtin_probe(config));
        Self::bootstrap(table, probe, providers, config).await
    }

    /// Every declared name, gated or not. Resolves nothing.
    pub fn list_names(&self) -> Vec<&str> {
        self.table.names().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn probe(&self) -> &CapabilityProbe {
        &self.probe
    }

    /// Resolve a name to its real value or a placeholder, caching the result.
    ///
    /// This will:
    /// 1. Fail with `UnknownSymbol` for undeclared names
    /// 2. Return the cached symbol if present
    /// 3. Cache and return a placeholder if any capability is missing
    /// 4. Otherwise load the owning group once and cache its member
    ///
    /// Provider failures are returned as-is and nothing is cached.
    pub async fn resolve(&self, name: &str) -> Result<Symbol> {
        let (entry, slot) = match (self.table.get(name), self.resolved.get(name)) {
            (Some(entry), Some(slot)) => (entry, slot),
            _ => {
                return Err(Error::UnknownSymbol {
                    name: name.to_string(),
                })
            }
        };

        if let Some(symbol) = slot.get() {
            return Ok(symbol.clone());
        }

        let missing = self.missing_capabilities(entry);
        if !missing.is_empty() {
            log::debug!("'{}' is gated on [{}]", name, missing.join(", "));
            let placeholder = Arc::new(self.placeholders.make_placeholder(entry, missing));
            return Ok(slot.get_or_init(|| Symbol::Gated(placeholder)).clone());
        }

        let members = self.load_group(&entry.group).await?;
        let value = members
            .get(name)
            .cloned()
            .ok_or_else(|| Error::MissingMember {
                group: entry.group.clone(),
                symbol: name.to_string(),
            })?;

        Ok(slot
            .get_or_init(|| Symbol::Live {
                name: Arc::from(name),
                value,
            })
            .clone())
    }

    /// Resolve every declared symbol. Stops at the first error.
    pub async fn preload(&self) -> Result<()> {
        log::info!("Preloading {} symbols", self.table.len());
        for name in self.table.names() {
            self.resolve(name).await?;
        }
        Ok(())
    }

    /// Current state of a symbol. Resolves nothing.
    pub fn state(&self, name: &str) -> Result<SymbolState> {
        let slot = self.resolved.get(name).ok_or_else(|| Error::UnknownSymbol {
            name: name.to_string(),
        })?;

        Ok(match slot.get() {
            None => SymbolState::Unresolved,
            Some(Symbol::Live { .. }) => SymbolState::Resolved,
            Some(Symbol::Gated(_)) => SymbolState::Placeholder,
        })
    }

    /// Split declared symbols into live and gated using the probe only.
    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for entry in self.table.entries() {
            let missing = self.missing_capabilities(entry);
            if missing.is_empty() {
                partition.live.push(entry.name.clone());
            } else {
                partition.gated.push(GatedSymbol {
                    name: entry.name.clone(),
                    missing,
                });
            }
        }
        partition
    }

    /// Number of symbols currently cached.
    pub fn resolved_count(&self) -> usize {
        self.resolved.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_group_loaded(&self, group: &str) -> bool {
        self.groups
            .get(group)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }

    fn missing_capabilities(&self, entry: &SymbolEntry) -> Vec<String> {
        entry
            .requires
            .iter()
            .filter(|cap| !self.probe.is_available(cap))
            .cloned()
            .collect()
    }

    async fn load_group(&self, group: &str) -> Result<&Members> {
        let cell = self.groups.get(group).ok_or_else(|| Error::NoProvider {
            group: group.to_string(),
        })?;

        cell.get_or_try_init(|| async {
            let provider = self.providers.get(group).ok_or_else(|| Error::NoProvider {
                group: group.to_string(),
            })?;

            log::info!("Loading provider for group '{}'", group);
            let members = provider
                .load(group)
                .await
                .map_err(|source| Error::ProviderLoad {
                    group: group.to_string(),
                    source,
                })?;

            self.check_members(group, &members);
            log::info!("Loaded group '{}' with {} members", group, members.len());
            Ok::<Members, Error>(members)
        })
        .await
    }

    fn check_members(&self, group: &str, members: &Members) {
        let Some(declared) = self.table.group(group) else {
            return;
        };
        for symbol in &declared.symbols {
            if !members.contains_key(symbol) {
                log::warn!(
                    "Provider for group '{}' does not expose declared member '{}'",
                    group,
                    symbol
                );
            }
        }
    }
}

impl fmt::Debug for LazyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyNamespace")
            .field("symbols", &self.table.len())
            .field("groups", &self.groups.len())
            .field("resolved", &self.resolved_count())
            .field("providers", &self.providers)
            .finish()
    }
}
