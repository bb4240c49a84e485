//! Result window manager for the event timeline.
//!
//! Takes the materialized rows returned by executing a compiled query and
//! produces the sorted, paginated slice the timeline displays.
//!
//! - [`Sort`] / [`Direction`]: the active sort column
//! - [`ResultWindow`]: sort key, page size (restricted to configured
//!   options), and page index; bad requests are clamped, never rejected
//! - [`WindowConfig`]: defaults and the `[window]` TOML section
//! - [`QueryView`]: the provider registry and window travelling together

mod config;
mod error;
mod sort;
mod view;
mod window;

pub use config::WindowConfig;
pub use error::{WindowError, WindowResult};
pub use sort::{sort_rows, Direction, EventRow, Sort};
pub use view::QueryView;
pub use window::{Page, ResultSet, ResultWindow};
