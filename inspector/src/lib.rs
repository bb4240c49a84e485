//! Scenario model and runner for the timeline inspector.
//!
//! A scenario is an initial provider list, a sequence of user intents, and
//! the rows a backend returned. Running it replays the intents, compiles the
//! final registry, and windows the rows, producing a [`Report`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use timeline_query::{combine_with_kql, compile, Expr, KqlMode};
use timeline_registry::{History, Intent, Outcome, Registry};
use timeline_window::{EventRow, Page, QueryView, ResultSet, ResultWindow, Sort, WindowConfig};
use tracing::{debug, info};

/// Input read from a scenario file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub providers: Registry,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub results: ResultSet,
}

/// Query and window settings, typically from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub window: WindowConfig,
    pub kql: String,
    pub kql_mode: KqlMode,
    pub sort: Option<Sort>,
    pub items_per_page: Option<usize>,
    pub page: Option<i64>,
}

/// The page that would be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    pub rows: Vec<EventRow>,
    pub page_index: usize,
    pub page_count: usize,
    pub items_per_page: usize,
    pub total_count: u64,
    pub sort: Sort,
}

impl From<Page<'_>> for PageReport {
    fn from(page: Page<'_>) -> Self {
        Self {
            rows: page.rows.into_iter().cloned().collect(),
            page_index: page.page_index,
            page_count: page.page_count,
            items_per_page: page.items_per_page,
            total_count: page.total_count,
            sort: page.sort,
        }
    }
}

/// Everything a scenario run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Payloads of the intents that resolved, in order.
    pub outcomes: Vec<Outcome>,
    /// Intents that referenced unknown providers.
    pub ignored_intents: usize,
    pub providers: Registry,
    pub query: Option<Expr>,
    pub kql: Option<String>,
    pub show_pagination: bool,
    pub page: PageReport,
}

/// Replays a scenario.
pub fn run(scenario: Scenario, options: &RunOptions) -> Result<Report> {
    let mut window = ResultWindow::new(options.window.clone())?;
    if let Some(sort) = &options.sort {
        window.set_sort(sort.clone());
    }
    if let Some(items_per_page) = options.items_per_page {
        window.set_items_per_page(items_per_page);
    }
    if let Some(page) = options.page {
        window.go_to_page(page);
    }

    let mut history = History::new(scenario.providers);
    let mut outcomes = Vec::new();
    let mut ignored_intents = 0;
    for intent in &scenario.intents {
        match history.apply(intent) {
            Some(outcome) => outcomes.push(outcome),
            None => {
                debug!(provider = %intent.address(), "Skipped unresolved intent");
                ignored_intents += 1;
            }
        }
    }

    let view = QueryView::new(history.present().clone(), window);
    let compiled = compile(view.registry());
    let query = combine_with_kql(&compiled, &options.kql, options.kql_mode);
    let kql = query.as_ref().map(ToString::to_string);
    let page = PageReport::from(view.window().apply(&scenario.results));

    info!(
        applied = outcomes.len(),
        ignored = ignored_intents,
        providers = view.registry().len(),
        terms = compiled.term_count(),
        "Scenario replayed"
    );

    Ok(Report {
        outcomes,
        ignored_intents,
        providers: view.registry().clone(),
        query,
        kql,
        show_pagination: view.show_pagination(),
        page,
    })
}
