//! Window configuration, read from the `[window]` section of a TOML file.
//!
//! ```toml
//! [window]
//! items-per-page = 25
//! items-per-page-options = [10, 25, 50, 100]
//!
//! [window.sort]
//! column-id = "@timestamp"
//! direction = "desc"
//! ```

use crate::{Direction, Sort, WindowError, WindowResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Page size, the page sizes a user may pick from, and the initial sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    pub items_per_page: usize,
    pub items_per_page_options: Vec<usize>,
    pub sort: Sort,
}

fn default_items_per_page() -> usize {
    5
}

fn default_items_per_page_options() -> Vec<usize> {
    vec![5, 10, 20]
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            items_per_page_options: default_items_per_page_options(),
            sort: Sort::default(),
        }
    }
}

impl WindowConfig {
    /// Loads the window config from `path`.
    ///
    /// A missing file yields the defaults. A file that cannot be read,
    /// parsed, or validated also yields the defaults, with a warning.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No window config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(WindowError::from)
            .and_then(|contents| Self::from_toml_str(&contents))
        {
            Ok(config) => {
                info!("Loaded window config from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load window config {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> WindowResult<Self> {
        let file: WindowFile = toml::from_str(contents)?;
        file.into_config().validate()
    }

    /// Checks the page size options and normalizes the config.
    ///
    /// Options are sorted ascending and deduplicated. A default page size
    /// that is not one of the options is moved to the nearest option.
    pub fn validate(mut self) -> WindowResult<Self> {
        if self.items_per_page_options.is_empty() {
            return Err(WindowError::EmptyPageSizeOptions);
        }
        if self.items_per_page_options.contains(&0) {
            return Err(WindowError::ZeroPageSize);
        }
        self.items_per_page_options.sort_unstable();
        self.items_per_page_options.dedup();

        let nearest = nearest_option(&self.items_per_page_options, self.items_per_page);
        if nearest != self.items_per_page {
            warn!(
                requested = self.items_per_page,
                chosen = nearest,
                "Default page size is not an option, using nearest"
            );
            self.items_per_page = nearest;
        }
        Ok(self)
    }
}

/// Closest option to `requested`; ties go to the smaller option.
pub(crate) fn nearest_option(options: &[usize], requested: usize) -> usize {
    options
        .iter()
        .copied()
        .min_by_key(|option| (option.abs_diff(requested), *option))
        .unwrap_or(requested)
}

/// Raw TOML structure matching the config file format.
#[derive(Deserialize)]
struct WindowFile {
    #[serde(default)]
    window: WindowSection,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct WindowSection {
    #[serde(default = "default_items_per_page")]
    items_per_page: usize,
    #[serde(default = "default_items_per_page_options")]
    items_per_page_options: Vec<usize>,
    #[serde(default)]
    sort: SortSection,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            items_per_page_options: default_items_per_page_options(),
            sort: SortSection::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SortSection {
    #[serde(default = "default_sort_column")]
    column_id: String,
    #[serde(default)]
    direction: Direction,
}

fn default_sort_column() -> String {
    Sort::default().column_id
}

impl Default for SortSection {
    fn default() -> Self {
        Self {
            column_id: default_sort_column(),
            direction: Direction::default(),
        }
    }
}

impl WindowFile {
    fn into_config(self) -> WindowConfig {
        WindowConfig {
            items_per_page: self.window.items_per_page,
            items_per_page_options: self.window.items_per_page_options,
            sort: Sort::new(self.window.sort.column_id, self.window.sort.direction),
        }
    }
}
