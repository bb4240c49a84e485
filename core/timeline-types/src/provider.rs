//! Filter providers.
//!
//! A [`Provider`] is one filter criterion on the timeline. Top-level
//! providers are OR-ed together; each may own a flat AND-group of
//! [`AndProvider`]s. AND-members have no group of their own, so the two-level
//! nesting limit holds by construction.

use crate::ProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a [`QueryMatch`] compares its field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOperator {
    /// `field : value`
    #[default]
    #[serde(rename = ":")]
    Is,
    /// `field : *`, the field is present with any value.
    #[serde(rename = ":*")]
    Exists,
}

/// The value side of a match: a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for MatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for MatchValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MatchValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for MatchValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for MatchValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// The predicate a provider contributes to the compiled query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatch {
    pub field: String,
    /// Label shown instead of `field`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    pub value: MatchValue,
    /// Label shown instead of `value`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<MatchValue>,
    #[serde(default)]
    pub operator: MatchOperator,
}

impl QueryMatch {
    /// `field : value`.
    pub fn is(field: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        Self {
            field: field.into(),
            display_field: None,
            value: value.into(),
            display_value: None,
            operator: MatchOperator::Is,
        }
    }

    /// `field : *`.
    pub fn exists(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            display_field: None,
            value: MatchValue::Text(String::new()),
            display_value: None,
            operator: MatchOperator::Exists,
        }
    }

    /// The field label, falling back to the field itself.
    #[must_use]
    pub fn shown_field(&self) -> &str {
        self.display_field.as_deref().unwrap_or(&self.field)
    }

    /// The value label, falling back to the value itself.
    #[must_use]
    pub fn shown_value(&self) -> &MatchValue {
        self.display_value.as_ref().unwrap_or(&self.value)
    }
}

/// Read access shared by top-level providers and AND-members.
///
/// The query compiler only needs these three facts about an entity.
pub trait Criterion {
    fn enabled(&self) -> bool;
    fn excluded(&self) -> bool;
    fn query_match(&self) -> &QueryMatch;
}

/// A top-level filter provider, optionally owning an AND-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: ProviderId,
    /// Display label; not significant to composition.
    pub name: String,
    pub enabled: bool,
    pub excluded: bool,
    /// Free-form KQL attached to this provider. Stored, not compiled.
    #[serde(default)]
    pub kql_query: String,
    pub query_match: QueryMatch,
    #[serde(default)]
    pub and: Vec<AndProvider>,
}

impl Provider {
    /// Creates an enabled, non-excluded provider with an empty AND-group.
    pub fn new(id: impl Into<ProviderId>, name: impl Into<String>, query_match: QueryMatch) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            excluded: false,
            kql_query: String::new(),
            query_match,
            and: Vec::new(),
        }
    }

    /// Replaces the AND-group.
    #[must_use]
    pub fn with_and(mut self, and: Vec<AndProvider>) -> Self {
        self.and = and;
        self
    }

    /// Looks up a member of this provider's AND-group.
    #[must_use]
    pub fn and_member(&self, and_provider_id: &str) -> Option<&AndProvider> {
        self.and.iter().find(|member| member.id == *and_provider_id)
    }

    /// Returns true if the AND-group has at least one member.
    #[must_use]
    pub fn has_and_group(&self) -> bool {
        !self.and.is_empty()
    }
}

impl Criterion for Provider {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn excluded(&self) -> bool {
        self.excluded
    }

    fn query_match(&self) -> &QueryMatch {
        &self.query_match
    }
}

/// A member of a top-level provider's AND-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndProvider {
    pub id: ProviderId,
    pub name: String,
    pub enabled: bool,
    pub excluded: bool,
    #[serde(default)]
    pub kql_query: String,
    pub query_match: QueryMatch,
}

impl AndProvider {
    /// Creates an enabled, non-excluded AND-member.
    pub fn new(id: impl Into<ProviderId>, name: impl Into<String>, query_match: QueryMatch) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            excluded: false,
            kql_query: String::new(),
            query_match,
        }
    }
}

/// Demotes a provider to an AND-member. Its own AND-group is dropped.
impl From<Provider> for AndProvider {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            enabled: provider.enabled,
            excluded: provider.excluded,
            kql_query: provider.kql_query,
            query_match: provider.query_match,
        }
    }
}

impl Criterion for AndProvider {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn excluded(&self) -> bool {
        self.excluded
    }

    fn query_match(&self) -> &QueryMatch {
        &self.query_match
    }
}
