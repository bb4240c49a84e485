//! The compiled boolean expression tree.

use serde::{Deserialize, Serialize};
use timeline_types::{MatchOperator, MatchValue, QueryMatch};

/// A boolean predicate over events, handed to the query execution
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Expr {
    /// `field == value`
    Match { field: String, value: MatchValue },
    /// The field is present.
    Exists { field: String },
    Not { expr: Box<Expr> },
    And { terms: Vec<Expr> },
    Or { terms: Vec<Expr> },
    /// Raw KQL text typed by the user, passed through untouched.
    Kql { query: String },
}

impl Expr {
    pub fn is(field: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        Self::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    pub fn negate(expr: Expr) -> Self {
        Self::Not {
            expr: Box::new(expr),
        }
    }

    pub fn and(terms: Vec<Expr>) -> Self {
        Self::And { terms }
    }

    pub fn or(terms: Vec<Expr>) -> Self {
        Self::Or { terms }
    }

    pub fn kql(query: impl Into<String>) -> Self {
        Self::Kql {
            query: query.into(),
        }
    }

    /// The predicate for a provider's query match.
    #[must_use]
    pub fn from_match(query_match: &QueryMatch) -> Self {
        match query_match.operator {
            MatchOperator::Is => Self::is(query_match.field.clone(), query_match.value.clone()),
            MatchOperator::Exists => Self::exists(query_match.field.clone()),
        }
    }

    /// Number of leaf predicates (matches, exists checks, raw KQL).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Match { .. } | Self::Exists { .. } | Self::Kql { .. } => 1,
            Self::Not { expr } => expr.leaf_count(),
            Self::And { terms } | Self::Or { terms } => terms.iter().map(Expr::leaf_count).sum(),
        }
    }
}
