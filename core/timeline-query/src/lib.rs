//! Query compiler for the event timeline.
//!
//! Folds a [`timeline_registry::Registry`] into a single boolean [`Expr`]:
//!
//! ```text
//! expr = OR_i [ AND( contribute(p_i), contribute(a_i1), ..., contribute(a_ik) ) ]
//! ```
//!
//! A disabled provider contributes nothing, an excluded one is negated.
//! Groups that end up with no contributing term are left out of the OR
//! entirely, so an all-disabled registry compiles to an empty
//! [`CompiledQuery`] rather than to "match everything".
//!
//! The expression renders to KQL text via `Display` and can be combined with
//! the free-form search bar query through [`combine_with_kql`].

mod compiler;
mod error;
mod expr;
mod kql;

pub use compiler::{compile, CompiledQuery};
pub use error::QueryError;
pub use expr::Expr;
pub use kql::{combine_with_kql, KqlMode};
