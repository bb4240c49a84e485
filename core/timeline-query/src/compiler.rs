//! Registry → expression folding.

use crate::Expr;
use serde::Serialize;
use timeline_registry::Registry;
use timeline_types::{Criterion, Provider};
use tracing::debug;

/// The folded form of a registry.
///
/// `expr` is `None` when no provider contributes a term. Callers must treat
/// that as "no provider constraint", never as an implicit match-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    expr: Option<Expr>,
    group_count: usize,
    term_count: usize,
}

impl CompiledQuery {
    /// The compiled expression, if any provider contributes.
    #[must_use]
    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    #[must_use]
    pub fn into_expr(self) -> Option<Expr> {
        self.expr
    }

    /// Returns true if no provider contributes a term.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expr.is_none()
    }

    /// Number of top-level groups that made it into the OR.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Number of provider predicates across all groups.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// KQL text for the expression, `None` when empty.
    #[must_use]
    pub fn to_kql(&self) -> Option<String> {
        self.expr.as_ref().map(ToString::to_string)
    }
}

/// What a single provider adds to its group's AND.
fn contribute<C: Criterion>(criterion: &C) -> Option<Expr> {
    if !criterion.enabled() {
        return None;
    }
    let predicate = Expr::from_match(criterion.query_match());
    Some(if criterion.excluded() {
        Expr::negate(predicate)
    } else {
        predicate
    })
}

/// AND of the anchor and its members. A disabled anchor does not disable
/// the group; a group with nothing enabled yields `None`.
fn compile_group(provider: &Provider) -> Option<Expr> {
    let mut terms: Vec<Expr> = contribute(provider)
        .into_iter()
        .chain(provider.and.iter().filter_map(contribute))
        .collect();
    match terms.len() {
        0 => None,
        1 => terms.pop(),
        _ => Some(Expr::and(terms)),
    }
}

/// Folds the registry into a single expression.
#[must_use]
pub fn compile(registry: &Registry) -> CompiledQuery {
    let mut groups: Vec<Expr> = registry.list().filter_map(compile_group).collect();
    let group_count = groups.len();
    let term_count = groups.iter().map(Expr::leaf_count).sum();

    let expr = match group_count {
        0 => None,
        1 => groups.pop(),
        _ => Some(Expr::or(groups)),
    };

    debug!(
        providers = registry.len(),
        groups = group_count,
        terms = term_count,
        "Compiled provider registry"
    );

    CompiledQuery {
        expr,
        group_count,
        term_count,
    }
}
