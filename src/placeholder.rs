//! Stand-ins for capability-gated symbols.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::table::SymbolEntry;

/// Safe-to-hold stand-in for a symbol whose capabilities are missing.
///
/// Holding, cloning, printing or serializing a placeholder never fails.
/// Every attempt to use it returns [`Error::CapabilityUnavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    symbol: String,
    group: String,
    missing: Vec<String>,
    hint: String,
}

impl Placeholder {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Every missing capability, in declaration order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// The error reported when this placeholder is used.
    pub fn error(&self) -> Error {
        Error::CapabilityUnavailable {
            symbol: self.symbol.clone(),
            missing: self.missing.clone(),
            hint: self.hint.clone(),
        }
    }

    /// Use the placeholder. Always fails.
    pub fn invoke<T>(&self) -> crate::Result<T> {
        Err(self.error())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<placeholder {} missing [{}]>", self.symbol, self.missing.join(", "))
    }
}

/// Builds placeholders from symbol entries.
///
/// Never touches a provider, so it works even where the provider cannot load.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderFactory {
    hints: HashMap<String, String>,
}

impl PlaceholderFactory {
    /// Factory using per-capability remediation hints.
    pub fn new(hints: HashMap<String, String>) -> Self {
        Self { hints }
    }

    pub fn make_placeholder(&self, entry: &SymbolEntry, missing: Vec<String>) -> Placeholder {
        let hint = self.remediation(&missing);
        Placeholder {
            symbol: entry.name.clone(),
            group: entry.group.clone(),
            missing,
            hint,
        }
    }

    fn remediation(&self, missing: &[String]) -> String {
        let steps: Vec<String> = missing
            .iter()
            .map(|cap| match self.hints.get(cap) {
                Some(hint) => format!("{}: {}", cap, hint),
                None => format!("{}: make the backend available", cap),
            })
            .collect();
        format!("To enable it: {}", steps.join("; "))
    }
}
