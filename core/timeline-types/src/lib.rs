//! Core type definitions for the event timeline.
//!
//! This crate defines the plain data model shared by every other timeline
//! crate:
//! - Provider identifiers, scoped per group ([`ProviderId`], [`ScopedKey`])
//! - Compound addressing of a top-level provider or an AND-member ([`ProviderAddress`])
//! - Filter providers and their nested AND-groups ([`Provider`], [`AndProvider`])
//! - The field/value predicate a provider contributes ([`QueryMatch`])
//!
//! Nothing here knows how providers are stored, mutated, or compiled; those
//! concerns live in `timeline-registry` and `timeline-query`.

mod ids;
mod provider;

pub use ids::{ProviderAddress, ProviderId, Scope, ScopedKey};
pub use provider::{AndProvider, Criterion, MatchOperator, MatchValue, Provider, QueryMatch};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or reading provider structures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("provider not found: {0}")]
    NotFound(String),

    #[error("duplicate provider id '{id}' in {scope}")]
    DuplicateId { scope: Scope, id: ProviderId },
}
