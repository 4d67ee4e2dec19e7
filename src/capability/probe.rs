//! Memoized capability probing.
//!
//! Each registered capability owns a once-initialized slot:
//! UNKNOWN -> AVAILABLE | UNAVAILABLE
//!
//! The slot map is fixed at construction, so after the first probe a lookup
//! is a plain read with no locking.

use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::capability::detect::{Detector, Fixed};
use crate::capability::Capability;
use crate::config::RegistryConfig;

/// Probe state for one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Not probed yet
    Unknown,
    /// Backend is usable
    Available,
    /// Backend is missing or detection failed
    Unavailable,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Available => write!(f, "AVAILABLE"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

struct ProbeSlot {
    capability: Capability,
    detector: Box<dyn Detector>,
    state: OnceLock<bool>,
}

impl ProbeSlot {
    fn evaluate(&self) -> bool {
        *self.state.get_or_init(|| {
            let name = &self.capability.name;
            let available = match catch_unwind(AssertUnwindSafe(|| self.detector.detect())) {
                Ok(Ok(available)) => available,
                Ok(Err(e)) => {
                    log::warn!("Capability '{}' detection failed: {}", name, e);
                    false
                }
                Err(_) => {
                    log::warn!("Capability '{}' detector panicked", name);
                    false
                }
            };
            log::debug!("Capability '{}' available: {}", name, available);
            available
        })
    }
}

/// Answers whether named capabilities are usable in this process.
///
/// The first query for a name runs its detector; every later query returns
/// the memoized answer. Concurrent first queries block on the same slot so
/// the detector runs once.
pub struct CapabilityProbe {
    slots: HashMap<String, ProbeSlot>,
    order: Vec<String>,
    /// Unregistered names already reported
    unregistered: Mutex<HashSet<String>>,
}

impl CapabilityProbe {
    /// Create an empty probe.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            order: Vec::new(),
            unregistered: Mutex::new(HashSet::new()),
        }
    }

    /// Register a capability and its detector.
    ///
    /// Registering the same name twice replaces the earlier detector.
    pub fn with_capability(
        mut self,
        capability: Capability,
        detector: impl Detector + 'static,
    ) -> Self {
        self.register(capability, Box::new(detector));
        self
    }

    /// Register a capability with a boxed detector.
    pub fn register(&mut self, capability: Capability, detector: Box<dyn Detector>) {
        let name = capability.name.clone();
        if !self.slots.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.slots.insert(
            name,
            ProbeSlot {
                capability,
                detector,
                state: OnceLock::new(),
            },
        );
    }

    /// Apply `enabled` / `disabled` overrides from configuration.
    ///
    /// Overridden capabilities are never probed. `disabled` wins over `enabled`.
    pub fn with_overrides(mut self, config: &RegistryConfig) -> Self {
        for (names, value) in [(&config.enabled, true), (&config.disabled, false)] {
            for name in names {
                let capability = self
                    .slots
                    .remove(name)
                    .map(|slot| slot.capability)
                    .unwrap_or_else(|| Capability::new(name.as_str()));
                self.order.retain(|n| n != name);
                self.register(capability, Box::new(Fixed(value)));
            }
        }
        self
    }

    /// Whether the capability is usable. Never fails; probes at most once per name.
    pub fn is_available(&self, name: &str) -> bool {
        match self.slots.get(name) {
            Some(slot) => slot.evaluate(),
            None => {
                self.report_unregistered(name);
                false
            }
        }
    }

    /// Warn once per unregistered name.
    fn report_unregistered(&self, name: &str) {
        let Ok(mut seen) = self.unregistered.lock() else {
            return;
        };
        if seen.insert(name.to_string()) {
            log::warn!(
                "Capability '{}' has no registered detector, treating it as unavailable",
                name
            );
        }
    }

    /// Current probe state without probing.
    pub fn availability(&self, name: &str) -> Availability {
        match self.slots.get(name).and_then(|slot| slot.state.get()) {
            Some(true) => Availability::Available,
            Some(false) => Availability::Unavailable,
            None if self.slots.contains_key(name) => Availability::Unknown,
            None => Availability::Unavailable,
        }
    }

    /// Probe every registered capability once.
    pub fn probe_all(&self) {
        for name in &self.order {
            self.is_available(name);
        }
    }

    /// Remediation hint for a capability, if one was registered.
    pub fn hint(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.capability.hint.as_deref())
    }

    /// Registered capability names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered capability hints, for building placeholders.
    pub fn hints(&self) -> HashMap<String, String> {
        self.slots
            .values()
            .filter_map(|slot| {
                slot.capability
                    .hint
                    .clone()
                    .map(|hint| (slot.capability.name.clone(), hint))
            })
            .collect()
    }
}

impl Default for CapabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}
