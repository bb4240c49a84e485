//! Sort and pagination state over a materialized result set.

use crate::config::nearest_option;
use crate::{sort_rows, EventRow, Sort, WindowConfig, WindowResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Rows returned by executing a compiled query, plus the total hit count
/// the backend reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub rows: Vec<EventRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl ResultSet {
    pub fn new(rows: Vec<EventRow>) -> Self {
        Self {
            rows,
            total_count: None,
        }
    }

    /// Reported total, or the number of materialized rows if none was given.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count.unwrap_or(self.rows.len() as u64)
    }
}

/// One displayed page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub rows: Vec<&'a EventRow>,
    /// Effective page index after clamping.
    pub page_index: usize,
    pub page_count: usize,
    pub items_per_page: usize,
    pub total_count: u64,
    pub sort: Sort,
}

/// Sort key, page size, and page index for the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultWindow {
    sort: Sort,
    items_per_page: usize,
    items_per_page_options: Vec<usize>,
    page: usize,
}

impl Default for ResultWindow {
    fn default() -> Self {
        let config = WindowConfig::default();
        Self {
            sort: config.sort,
            items_per_page: config.items_per_page,
            items_per_page_options: config.items_per_page_options,
            page: 0,
        }
    }
}

impl ResultWindow {
    /// Builds a window on page 0 from a config, validating it first.
    pub fn new(config: WindowConfig) -> WindowResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            sort: config.sort,
            items_per_page: config.items_per_page,
            items_per_page_options: config.items_per_page_options,
            page: 0,
        })
    }

    #[must_use]
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    #[must_use]
    pub fn items_per_page_options(&self) -> &[usize] {
        &self.items_per_page_options
    }

    /// The requested page index. May point past the last page until the
    /// window is applied to a result set.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Changes the sort and goes back to the first page.
    pub fn set_sort(&mut self, sort: Sort) {
        debug!(sort = %sort, "Sort changed");
        self.sort = sort;
        self.page = 0;
    }

    /// Changes the page size and goes back to the first page.
    ///
    /// A size that is not one of the options is replaced by the nearest
    /// option (ties go to the smaller one). Returns the size in effect.
    pub fn set_items_per_page(&mut self, requested: usize) -> usize {
        let chosen = nearest_option(&self.items_per_page_options, requested);
        if chosen != requested {
            warn!(requested, chosen, "Page size is not an option, clamping");
        }
        self.items_per_page = chosen;
        self.page = 0;
        chosen
    }

    /// Moves to a page. Negative indices become 0; indices past the end are
    /// clamped when the window is applied.
    pub fn go_to_page(&mut self, requested: i64) -> usize {
        self.page = usize::try_from(requested).unwrap_or_else(|_| {
            warn!(requested, "Negative page index, clamping to 0");
            0
        });
        self.page
    }

    /// Number of pages needed for `row_count` rows.
    #[must_use]
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.items_per_page)
    }

    /// The page index that would be shown for `row_count` rows.
    #[must_use]
    pub fn effective_page(&self, row_count: usize) -> usize {
        let last = self.page_count(row_count).saturating_sub(1);
        if self.page > last {
            debug!(requested = self.page, last, "Page index past the end, clamping");
        }
        self.page.min(last)
    }

    /// Sorts the result set and slices out the current page.
    pub fn apply<'a>(&self, results: &'a ResultSet) -> Page<'a> {
        let sorted = sort_rows(&results.rows, &self.sort);
        let page_index = self.effective_page(sorted.len());
        let rows = sorted
            .into_iter()
            .skip(page_index * self.items_per_page)
            .take(self.items_per_page)
            .collect();

        Page {
            rows,
            page_index,
            page_count: self.page_count(results.rows.len()),
            items_per_page: self.items_per_page,
            total_count: results.total_count(),
            sort: self.sort.clone(),
        }
    }
}
