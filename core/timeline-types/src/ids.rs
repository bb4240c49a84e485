//! Identifier types for timeline providers.
//!
//! Provider ids are only unique inside the list that holds them: the
//! top-level list, or one provider's AND-group. The same id may appear in
//! two different groups, so an entity is always addressed by a scope plus
//! its local id.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Local identifier of a provider within its containing list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a provider id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProviderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProviderId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProviderId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The list a provider id is unique within.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// The ordered list of top-level providers.
    TopLevel,
    /// The AND-group owned by the given top-level provider.
    AndGroup(ProviderId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLevel => f.write_str("top-level providers"),
            Self::AndGroup(parent) => write!(f, "and-group of '{parent}'"),
        }
    }
}

/// A `(scope, local id)` pair. Unique across a whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopedKey {
    pub scope: Scope,
    pub id: ProviderId,
}

impl ScopedKey {
    #[must_use]
    pub fn new(scope: Scope, id: ProviderId) -> Self {
        Self { scope, id }
    }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::TopLevel => write!(f, "{}", self.id),
            Scope::AndGroup(parent) => write!(f, "{parent} / {}", self.id),
        }
    }
}

/// Compound address of a single provider, as carried by user intents.
///
/// External callers supply `providerId` plus an optional `andProviderId`;
/// this type makes the two cases explicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderAddress {
    /// A top-level provider (and, implicitly, its whole AND-group).
    TopLevel(ProviderId),
    /// One member of a top-level provider's AND-group.
    Nested {
        provider_id: ProviderId,
        and_provider_id: ProviderId,
    },
}

impl ProviderAddress {
    /// Builds an address from the two ids a caller supplies.
    #[must_use]
    pub fn from_parts(provider_id: ProviderId, and_provider_id: Option<ProviderId>) -> Self {
        match and_provider_id {
            Some(and_provider_id) => Self::Nested {
                provider_id,
                and_provider_id,
            },
            None => Self::TopLevel(provider_id),
        }
    }

    /// Shorthand for a top-level address.
    #[must_use]
    pub fn top_level(provider_id: impl Into<ProviderId>) -> Self {
        Self::TopLevel(provider_id.into())
    }

    /// Shorthand for an AND-member address.
    #[must_use]
    pub fn nested(provider_id: impl Into<ProviderId>, and_provider_id: impl Into<ProviderId>) -> Self {
        Self::Nested {
            provider_id: provider_id.into(),
            and_provider_id: and_provider_id.into(),
        }
    }

    /// The top-level provider id (the parent, for nested addresses).
    #[must_use]
    pub fn provider_id(&self) -> &ProviderId {
        match self {
            Self::TopLevel(provider_id) | Self::Nested { provider_id, .. } => provider_id,
        }
    }

    /// The AND-member id, if this address points into a group.
    #[must_use]
    pub fn and_provider_id(&self) -> Option<&ProviderId> {
        match self {
            Self::TopLevel(_) => None,
            Self::Nested {
                and_provider_id, ..
            } => Some(and_provider_id),
        }
    }

    /// The scoped key this address resolves to.
    #[must_use]
    pub fn key(&self) -> ScopedKey {
        match self {
            Self::TopLevel(id) => ScopedKey::new(Scope::TopLevel, id.clone()),
            Self::Nested {
                provider_id,
                and_provider_id,
            } => ScopedKey::new(Scope::AndGroup(provider_id.clone()), and_provider_id.clone()),
        }
    }
}

impl fmt::Display for ProviderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key(), f)
    }
}
