//! Provider registry and composition reducer for the event timeline.
//!
//! - [`Registry`]: the canonical, persistent store of top-level providers
//!   and their AND-groups. Read-only from the outside.
//! - [`reduce`]: the only way to change a registry, a pure function from
//!   `(registry, intent)` to a new registry plus the callback payload the
//!   presentation layer expects.
//! - [`History`]: undo/redo over registry snapshots.
//!
//! Every transition returns a new [`Registry`] value. The previous value is
//! never touched and stays valid for concurrent readers; unchanged providers
//! are shared between the two snapshots rather than copied.

mod history;
mod reducer;
mod registry;

pub use history::History;
pub use reducer::{reduce, EnabledToggle, ExcludedToggle, Intent, Outcome, Removal, Transition};
pub use registry::Registry;
