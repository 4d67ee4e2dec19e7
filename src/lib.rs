//! Pipeline registry - lazy, capability-gated access to a large pipeline namespace.
//!
//! Symbols are declared up front in a [`SymbolTable`]. Nothing behind them
//! is loaded until a [`LazyNamespace`] resolves one; symbols whose optional
//! backends are missing resolve to [`Placeholder`]s that fail only when used.

mod defaults;
pub mod error;

pub mod capability;
pub mod config;
pub mod namespace;
pub mod placeholder;
pub mod table;

pub use error::{Error, Result};

pub use capability::{
    builtin_probe, AnyOf, Availability, Capability, CapabilityProbe, DetectError, Detector,
    EnvFlag, Fixed, FnDetector, LibraryDetector,
};
pub use config::RegistryConfig;
pub use namespace::global;
pub use namespace::{
    member, FnProvider, GatedSymbol, LazyNamespace, Member, Members, Partition, Provider,
    ProviderError, ProviderSet, Symbol, SymbolState,
};
pub use placeholder::{Placeholder, PlaceholderFactory};
pub use table::catalog::{StaticContribution, CONTRIBUTIONS};
pub use table::{Contribution, Group, SymbolEntry, SymbolTable, SymbolTableBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
