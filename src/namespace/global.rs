//! Process-wide namespace instance.
//!
//! Installed once at startup, never torn down. Code that can take a
//! `&LazyNamespace` should; the global is for hosts that need one shared
//! entry point.

use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::namespace::LazyNamespace;

static NAMESPACE: OnceLock<Arc<LazyNamespace>> = OnceLock::new();

/// Install the process-wide namespace. Fails if one is already installed.
pub fn install(instance: LazyNamespace) -> Result<&'static Arc<LazyNamespace>> {
    let symbols = instance.len();
    NAMESPACE
        .set(Arc::new(instance))
        .map_err(|_| Error::AlreadyInstalled)?;
    log::debug!("Installed global namespace with {} symbols", symbols);
    namespace()
}

/// The installed namespace, if any.
pub fn get() -> Option<&'static Arc<LazyNamespace>> {
    NAMESPACE.get()
}

/// The installed namespace or [`Error::NotInstalled`].
pub fn namespace() -> Result<&'static Arc<LazyNamespace>> {
    get().ok_or(Error::NotInstalled)
}
