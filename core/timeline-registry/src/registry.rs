//! The persistent provider store.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;
use timeline_types::{
    AndProvider, Error, Provider, ProviderAddress, ProviderId, Result, Scope, ScopedKey,
};

/// Ordered, immutable list of top-level providers.
///
/// Cloning a registry is a reference-count bump. Transitions build a new
/// outer list but reuse the `Arc` of every provider they did not touch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Provider>")]
pub struct Registry {
    providers: Arc<[Arc<Provider>]>,
}

impl Registry {
    /// Creates a registry with no providers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: Arc::from(Vec::new()),
        }
    }

    /// Builds a registry from an externally supplied provider list.
    ///
    /// Fails with [`Error::DuplicateId`] if an id repeats within the
    /// top-level list or within a single AND-group. The same id appearing in
    /// two different groups is accepted.
    pub fn new(providers: Vec<Provider>) -> Result<Self> {
        let mut seen: HashSet<ScopedKey> = HashSet::new();
        for provider in &providers {
            check_unique(&mut seen, &Scope::TopLevel, &provider.id)?;
            let scope = Scope::AndGroup(provider.id.clone());
            for member in &provider.and {
                check_unique(&mut seen, &scope, &member.id)?;
            }
        }
        Ok(Self::from_arcs(providers.into_iter().map(Arc::new).collect()))
    }

    fn from_arcs(providers: Vec<Arc<Provider>>) -> Self {
        Self {
            providers: Arc::from(providers),
        }
    }

    /// Iterates the top-level providers in order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &Provider> + '_ {
        self.providers.iter().map(|provider| provider.as_ref())
    }

    /// Number of top-level providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if there are no top-level providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Looks up a top-level provider.
    pub fn find(&self, provider_id: &str) -> Result<&Provider> {
        self.position(provider_id)
            .map(|index| self.providers[index].as_ref())
            .ok_or_else(|| Error::NotFound(provider_id.to_string()))
    }

    /// Looks up a member of a top-level provider's AND-group.
    pub fn find_and(&self, provider_id: &str, and_provider_id: &str) -> Result<&AndProvider> {
        self.find(provider_id)?
            .and_member(and_provider_id)
            .ok_or_else(|| Error::NotFound(format!("{provider_id} / {and_provider_id}")))
    }

    /// Returns true if the address resolves to an entity in this registry.
    #[must_use]
    pub fn contains(&self, address: &ProviderAddress) -> bool {
        match address {
            ProviderAddress::TopLevel(provider_id) => self.find(provider_id.as_str()).is_ok(),
            ProviderAddress::Nested {
                provider_id,
                and_provider_id,
            } => self
                .find_and(provider_id.as_str(), and_provider_id.as_str())
                .is_ok(),
        }
    }

    /// Every entity in the registry, identified by its scoped key.
    pub fn keys(&self) -> impl Iterator<Item = ScopedKey> + '_ {
        self.list().flat_map(|provider| {
            let scope = Scope::AndGroup(provider.id.clone());
            std::iter::once(ScopedKey::new(Scope::TopLevel, provider.id.clone())).chain(
                provider
                    .and
                    .iter()
                    .map(move |member| ScopedKey::new(scope.clone(), member.id.clone())),
            )
        })
    }

    /// Returns true if both registries hold the very same allocation for the
    /// given top-level provider (it was not rebuilt between the snapshots).
    #[must_use]
    pub fn shares_provider(&self, other: &Registry, provider_id: &str) -> bool {
        match (self.position(provider_id), other.position(provider_id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&self.providers[a], &other.providers[b]),
            _ => false,
        }
    }

    pub(crate) fn position(&self, provider_id: &str) -> Option<usize> {
        self.providers
            .iter()
            .position(|provider| provider.id == *provider_id)
    }

    pub(crate) fn get(&self, index: usize) -> &Provider {
        &self.providers[index]
    }

    /// A new registry without the provider at `index`.
    pub(crate) fn without(&self, index: usize) -> Self {
        let mut providers = self.providers.to_vec();
        providers.remove(index);
        Self::from_arcs(providers)
    }

    /// A new registry with the provider at `index` replaced.
    pub(crate) fn with_replaced(&self, index: usize, replacement: Provider) -> Self {
        let mut providers = self.providers.to_vec();
        providers[index] = Arc::new(replacement);
        Self::from_arcs(providers)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Provider>> for Registry {
    type Error = Error;

    fn try_from(providers: Vec<Provider>) -> Result<Self> {
        Self::new(providers)
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.list())
    }
}

fn check_unique(seen: &mut HashSet<ScopedKey>, scope: &Scope, id: &ProviderId) -> Result<()> {
    if seen.insert(ScopedKey::new(scope.clone(), id.clone())) {
        Ok(())
    } else {
        Err(Error::DuplicateId {
            scope: scope.clone(),
            id: id.clone(),
        })
    }
}
