//! KQL text rendering and combination with the search bar query.

use crate::{CompiledQuery, Expr, QueryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use timeline_types::MatchValue;

/// How the free-form KQL from the search bar combines with the providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KqlMode {
    /// Providers AND the search bar query.
    #[default]
    Filter,
    /// Providers OR the search bar query.
    Search,
}

impl fmt::Display for KqlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("filter"),
            Self::Search => f.write_str("search"),
        }
    }
}

impl FromStr for KqlMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filter" => Ok(Self::Filter),
            "search" => Ok(Self::Search),
            _ => Err(QueryError::UnknownKqlMode(s.to_string())),
        }
    }
}

/// Combines the compiled providers with the search bar query.
///
/// Returns `None` when neither side constrains anything.
#[must_use]
pub fn combine_with_kql(compiled: &CompiledQuery, kql: &str, mode: KqlMode) -> Option<Expr> {
    let kql = kql.trim();
    match (compiled.expr(), kql.is_empty()) {
        (None, true) => None,
        (None, false) => Some(Expr::kql(kql)),
        (Some(providers), true) => Some(providers.clone()),
        (Some(providers), false) => {
            let terms = vec![providers.clone(), Expr::kql(kql)];
            Some(match mode {
                KqlMode::Filter => Expr::and(terms),
                KqlMode::Search => Expr::or(terms),
            })
        }
    }
}

/// Compound operands need parentheses when nested.
fn needs_parens(expr: &Expr) -> bool {
    match expr {
        Expr::And { terms } | Expr::Or { terms } => terms.len() > 1,
        Expr::Kql { .. } => true,
        Expr::Match { .. } | Expr::Exists { .. } | Expr::Not { .. } => false,
    }
}

struct Operand<'a>(&'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_parens(self.0) {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, terms: &[Expr], separator: &str) -> fmt::Result {
    if let [only] = terms {
        return write!(f, "{only}");
    }
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", Operand(term))?;
    }
    Ok(())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        if matches!(c, '\\' | '"') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &MatchValue) -> fmt::Result {
    match value {
        MatchValue::Number(number) => write!(f, "{number}"),
        MatchValue::Text(text) => write_quoted(f, text),
    }
}

fn is_special(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\\' | '(' | ')' | ':' | '<' | '>' | '"' | '*' | '{' | '}')
}

/// Field names are bare unless they hold whitespace or a KQL special
/// character, in which case they are quoted like values.
fn write_field(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    let needs_quotes = field.is_empty() || field.chars().any(is_special);
    if needs_quotes {
        write_quoted(f, field)
    } else {
        f.write_str(field)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match { field, value } => {
                write_field(f, field)?;
                f.write_str(" : ")?;
                write_value(f, value)
            }
            Self::Exists { field } => {
                write_field(f, field)?;
                f.write_str(" : *")
            }
            Self::Not { expr } => write!(f, "NOT {}", Operand(expr)),
            Self::And { terms } => write_joined(f, terms, " and "),
            Self::Or { terms } => write_joined(f, terms, " or "),
            Self::Kql { query } => f.write_str(query),
        }
    }
}
