//! Provider seam: the units that supply a group's real members.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// A resolved member value.
pub type Member = Arc<dyn Any + Send + Sync>;

/// Members exposed by one loaded group, by symbol name.
pub type Members = HashMap<String, Member>;

/// Error a provider reports when its group cannot be loaded.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies every member of one group.
///
/// `load` is all-or-nothing. The namespace calls it at most once per
/// successful load; a failed load may be retried by a later resolution.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn load(&self, group: &str) -> Result<Members, ProviderError>;
}

/// Provider backed by a synchronous closure.
pub struct FnProvider<F>(pub F);

impl<F> FnProvider<F>
where
    F: Fn() -> Result<Members, ProviderError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Provider for FnProvider<F>
where
    F: Fn() -> Result<Members, ProviderError> + Send + Sync,
{
    async fn load(&self, _group: &str) -> Result<Members, ProviderError> {
        (self.0)()
    }
}

/// Wrap a concrete value as a [`Member`].
pub fn member<T: Any + Send + Sync>(value: T) -> Member {
    Arc::new(value)
}

/// Providers by group key.
#[derive(Clone, Default)]
pub struct ProviderSet {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the provider for a group, replacing any earlier one.
    pub fn with(mut self, group: impl Into<String>, provider: impl Provider + 'static) -> Self {
        self.insert(group, Arc::new(provider));
        self
    }

    pub fn insert(&mut self, group: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(group.into(), provider);
    }

    pub fn get(&self, group: &str) -> Option<&Arc<dyn Provider>> {
        self.providers.get(group)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}
