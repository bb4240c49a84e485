//! The composition reducer: user intents in, new registry and callback
//! payload out.
//!
//! Intents carry ids taken from whatever the presentation layer last
//! rendered, which may be stale. An intent whose ids do not resolve is a
//! no-op: the registry comes back unchanged and no payload is emitted.

use crate::Registry;
use serde::{Deserialize, Serialize};
use timeline_types::{ProviderAddress, ProviderId};
use tracing::debug;

/// A user intent against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Remove a top-level provider together with its AND-group.
    RemoveProvider { provider_id: ProviderId },
    /// Remove one member of a provider's AND-group.
    RemoveAndProvider {
        provider_id: ProviderId,
        and_provider_id: ProviderId,
    },
    /// Flip `enabled` on a top-level provider or an AND-member.
    ToggleEnabled {
        provider_id: ProviderId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        and_provider_id: Option<ProviderId>,
    },
    /// Flip `excluded` on a top-level provider or an AND-member.
    ToggleExcluded {
        provider_id: ProviderId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        and_provider_id: Option<ProviderId>,
    },
}

impl Intent {
    pub fn remove(provider_id: impl Into<ProviderId>) -> Self {
        Self::RemoveProvider {
            provider_id: provider_id.into(),
        }
    }

    pub fn remove_and(
        provider_id: impl Into<ProviderId>,
        and_provider_id: impl Into<ProviderId>,
    ) -> Self {
        Self::RemoveAndProvider {
            provider_id: provider_id.into(),
            and_provider_id: and_provider_id.into(),
        }
    }

    pub fn toggle_enabled(address: ProviderAddress) -> Self {
        let (provider_id, and_provider_id) = split(address);
        Self::ToggleEnabled {
            provider_id,
            and_provider_id,
        }
    }

    pub fn toggle_excluded(address: ProviderAddress) -> Self {
        let (provider_id, and_provider_id) = split(address);
        Self::ToggleExcluded {
            provider_id,
            and_provider_id,
        }
    }

    /// The entity this intent targets.
    #[must_use]
    pub fn address(&self) -> ProviderAddress {
        match self {
            Self::RemoveProvider { provider_id } => ProviderAddress::TopLevel(provider_id.clone()),
            Self::RemoveAndProvider {
                provider_id,
                and_provider_id,
            } => ProviderAddress::nested(provider_id.clone(), and_provider_id.clone()),
            Self::ToggleEnabled {
                provider_id,
                and_provider_id,
            }
            | Self::ToggleExcluded {
                provider_id,
                and_provider_id,
            } => ProviderAddress::from_parts(provider_id.clone(), and_provider_id.clone()),
        }
    }
}

fn split(address: ProviderAddress) -> (ProviderId, Option<ProviderId>) {
    match address {
        ProviderAddress::TopLevel(provider_id) => (provider_id, None),
        ProviderAddress::Nested {
            provider_id,
            and_provider_id,
        } => (provider_id, Some(and_provider_id)),
    }
}

/// Payload of a removal: the removed id, or `[providerId, andProviderId]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Removal {
    Provider(ProviderId),
    AndProvider(ProviderId, ProviderId),
}

impl Removal {
    /// The removed ids in payload order.
    #[must_use]
    pub fn ids(&self) -> Vec<&ProviderId> {
        match self {
            Self::Provider(provider_id) => vec![provider_id],
            Self::AndProvider(provider_id, and_provider_id) => vec![provider_id, and_provider_id],
        }
    }
}

/// Payload of an enabled toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnabledToggle {
    #[serde(rename_all = "camelCase")]
    Nested {
        provider_id: ProviderId,
        and_provider_id: ProviderId,
        enabled: bool,
    },
    #[serde(rename_all = "camelCase")]
    TopLevel { provider_id: ProviderId, enabled: bool },
}

/// Payload of an excluded toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcludedToggle {
    #[serde(rename_all = "camelCase")]
    Nested {
        provider_id: ProviderId,
        and_provider_id: ProviderId,
        excluded: bool,
    },
    #[serde(rename_all = "camelCase")]
    TopLevel { provider_id: ProviderId, excluded: bool },
}

/// What an applied intent reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum Outcome {
    Removed(Removal),
    EnabledToggled(EnabledToggle),
    ExcludedToggled(ExcludedToggle),
}

/// Result of reducing one intent.
#[derive(Debug, Clone)]
pub struct Transition {
    pub registry: Registry,
    /// `None` when the intent did not resolve and nothing changed.
    pub outcome: Option<Outcome>,
}

impl Transition {
    fn unchanged(registry: &Registry) -> Self {
        Self {
            registry: registry.clone(),
            outcome: None,
        }
    }

    /// Returns true if the intent was ignored.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.outcome.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Enabled,
    Excluded,
}

impl Flag {
    fn flip(self, enabled: &mut bool, excluded: &mut bool) -> bool {
        let slot = match self {
            Self::Enabled => enabled,
            Self::Excluded => excluded,
        };
        *slot = !*slot;
        *slot
    }
}

/// Applies `intent` to `registry`, returning the next registry.
///
/// `registry` itself is never modified.
pub fn reduce(registry: &Registry, intent: &Intent) -> Transition {
    let applied = match intent {
        Intent::RemoveProvider { provider_id } => remove_provider(registry, provider_id),
        Intent::RemoveAndProvider {
            provider_id,
            and_provider_id,
        } => remove_and_provider(registry, provider_id, and_provider_id),
        Intent::ToggleEnabled {
            provider_id,
            and_provider_id,
        } => toggle(registry, provider_id, and_provider_id.as_ref(), Flag::Enabled).map(
            |(next, value)| {
                let payload = match and_provider_id {
                    Some(and_provider_id) => EnabledToggle::Nested {
                        provider_id: provider_id.clone(),
                        and_provider_id: and_provider_id.clone(),
                        enabled: value,
                    },
                    None => EnabledToggle::TopLevel {
                        provider_id: provider_id.clone(),
                        enabled: value,
                    },
                };
                (next, Outcome::EnabledToggled(payload))
            },
        ),
        Intent::ToggleExcluded {
            provider_id,
            and_provider_id,
        } => toggle(registry, provider_id, and_provider_id.as_ref(), Flag::Excluded).map(
            |(next, value)| {
                let payload = match and_provider_id {
                    Some(and_provider_id) => ExcludedToggle::Nested {
                        provider_id: provider_id.clone(),
                        and_provider_id: and_provider_id.clone(),
                        excluded: value,
                    },
                    None => ExcludedToggle::TopLevel {
                        provider_id: provider_id.clone(),
                        excluded: value,
                    },
                };
                (next, Outcome::ExcludedToggled(payload))
            },
        ),
    };

    match applied {
        Some((next, outcome)) => {
            debug!(provider = %intent.address(), ?outcome, "Applied provider intent");
            Transition {
                registry: next,
                outcome: Some(outcome),
            }
        }
        None => {
            debug!(provider = %intent.address(), "Intent references an unknown provider, ignoring");
            Transition::unchanged(registry)
        }
    }
}

fn remove_provider(registry: &Registry, provider_id: &ProviderId) -> Option<(Registry, Outcome)> {
    let index = registry.position(provider_id.as_str())?;
    Some((
        registry.without(index),
        Outcome::Removed(Removal::Provider(provider_id.clone())),
    ))
}

fn remove_and_provider(
    registry: &Registry,
    provider_id: &ProviderId,
    and_provider_id: &ProviderId,
) -> Option<(Registry, Outcome)> {
    let index = registry.position(provider_id.as_str())?;
    let parent = registry.get(index);
    let member = parent
        .and
        .iter()
        .position(|member| member.id == *and_provider_id)?;

    let mut next = parent.clone();
    next.and.remove(member);
    Some((
        registry.with_replaced(index, next),
        Outcome::Removed(Removal::AndProvider(
            provider_id.clone(),
            and_provider_id.clone(),
        )),
    ))
}

fn toggle(
    registry: &Registry,
    provider_id: &ProviderId,
    and_provider_id: Option<&ProviderId>,
    flag: Flag,
) -> Option<(Registry, bool)> {
    let index = registry.position(provider_id.as_str())?;
    let mut next = registry.get(index).clone();

    let value = match and_provider_id {
        None => flag.flip(&mut next.enabled, &mut next.excluded),
        Some(and_provider_id) => {
            let member = next
                .and
                .iter_mut()
                .find(|member| member.id == *and_provider_id)?;
            flag.flip(&mut member.enabled, &mut member.excluded)
        }
    };

    Some((registry.with_replaced(index, next), value))
}

impl Registry {
    /// Convenience for [`reduce`].
    pub fn apply(&self, intent: &Intent) -> Transition {
        reduce(self, intent)
    }
}
