use pretty_assertions::assert_eq;
use serde_json::json;
use timeline_inspector::{run, RunOptions, Scenario};
use timeline_query::KqlMode;
use timeline_registry::{EnabledToggle, Intent, Outcome, Registry, Removal};
use timeline_types::{Provider, ProviderAddress, QueryMatch};
use timeline_window::{Direction, EventRow, ResultSet, Sort};

fn provider(name: &str) -> Provider {
    Provider::new(format!("id-{name}"), name, QueryMatch::is("name", name))
}

/// Provider 1 with an AND-group of Provider 2 and Provider 3.
fn and_provider_fixture() -> Registry {
    Registry::new(vec![provider("Provider 1").with_and(vec![
        provider("Provider 2").into(),
        provider("Provider 3").into(),
    ])])
    .unwrap()
}

fn rows(count: usize) -> ResultSet {
    ResultSet::new(
        (0..count)
            .map(|i| EventRow::new(format!("e{i}")).with_field("seq", i as u64))
            .collect(),
    )
}

// ── Fixture scenarios ────────────────────────────────────────────

#[test]
fn removing_the_anchor_removes_the_group_and_hides_pagination() {
    let scenario = Scenario {
        providers: and_provider_fixture(),
        intents: vec![Intent::remove("id-Provider 1")],
        results: rows(3),
    };
    let report = run(scenario, &RunOptions::default()).unwrap();

    assert_eq!(
        report.outcomes,
        vec![Outcome::Removed(Removal::Provider("id-Provider 1".into()))]
    );
    assert!(report.providers.is_empty());
    assert!(!report.show_pagination);
    assert_eq!(report.query, None);
    assert_eq!(report.kql, None);
}

#[test]
fn disabling_an_and_member_drops_it_from_the_query() {
    let scenario = Scenario {
        providers: and_provider_fixture(),
        intents: vec![Intent::toggle_enabled(ProviderAddress::nested(
            "id-Provider 1",
            "id-Provider 2",
        ))],
        results: ResultSet::default(),
    };
    let report = run(scenario, &RunOptions::default()).unwrap();

    assert_eq!(
        report.outcomes,
        vec![Outcome::EnabledToggled(EnabledToggle::Nested {
            provider_id: "id-Provider 1".into(),
            and_provider_id: "id-Provider 2".into(),
            enabled: false,
        })]
    );
    assert_eq!(
        report.kql.as_deref(),
        Some(r#"name : "Provider 1" and name : "Provider 3""#)
    );
    assert!(report.show_pagination);
}

#[test]
fn unresolved_intents_are_counted_not_fatal() {
    let scenario = Scenario {
        providers: and_provider_fixture(),
        intents: vec![
            Intent::remove("id-Provider 2"),
            Intent::remove_and("id-Provider 1", "id-Provider 3"),
        ],
        results: ResultSet::default(),
    };
    let report = run(scenario, &RunOptions::default()).unwrap();
    assert_eq!(report.ignored_intents, 1);
    assert_eq!(report.outcomes.len(), 1);
}

// ── Options ──────────────────────────────────────────────────────

#[test]
fn window_options_are_clamped_and_applied() {
    let scenario = Scenario {
        providers: and_provider_fixture(),
        intents: vec![],
        results: rows(23),
    };
    let options = RunOptions {
        sort: Some(Sort::new("seq", Direction::Asc)),
        items_per_page: Some(7),
        page: Some(40),
        ..RunOptions::default()
    };
    let report = run(scenario, &options).unwrap();

    assert_eq!(report.page.items_per_page, 5);
    assert_eq!(report.page.page_count, 5);
    assert_eq!(report.page.page_index, 4);
    let ids: Vec<&str> = report.page.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["e20", "e21", "e22"]);
}

#[test]
fn search_bar_query_is_combined() {
    let scenario = Scenario {
        providers: Registry::new(vec![provider("A")]).unwrap(),
        ..Scenario::default()
    };
    let options = RunOptions {
        kql: "host.name : web".into(),
        kql_mode: KqlMode::Search,
        ..RunOptions::default()
    };
    let report = run(scenario, &options).unwrap();
    assert_eq!(report.kql.as_deref(), Some(r#"name : "A" or (host.name : web)"#));
}

// ── Scenario files ───────────────────────────────────────────────

#[test]
fn scenario_parses_from_json() {
    let scenario: Scenario = serde_json::from_value(json!({
        "providers": [{
            "id": "id-Provider 1",
            "name": "Provider 1",
            "enabled": true,
            "excluded": false,
            "kqlQuery": "",
            "queryMatch": { "field": "name", "value": "Provider 1" },
            "and": []
        }],
        "intents": [
            { "type": "toggleExcluded", "providerId": "id-Provider 1" }
        ],
        "results": {
            "rows": [{ "_id": "1", "@timestamp": "2019-01-01T00:00:00.000Z" }],
            "totalCount": 120
        }
    }))
    .unwrap();

    let report = run(scenario, &RunOptions::default()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value["outcomes"][0],
        json!({
            "kind": "excludedToggled",
            "payload": { "providerId": "id-Provider 1", "excluded": true }
        })
    );
    assert_eq!(value["kql"], json!(r#"NOT name : "Provider 1""#));
    assert_eq!(value["page"]["totalCount"], json!(120));
    assert_eq!(value["showPagination"], json!(true));
}

#[test]
fn duplicate_ids_in_scenario_are_rejected() {
    let result = serde_json::from_value::<Scenario>(json!({
        "providers": [
            { "id": "x", "name": "x", "enabled": true, "excluded": false,
              "queryMatch": { "field": "f", "value": "v" } },
            { "id": "x", "name": "x", "enabled": true, "excluded": false,
              "queryMatch": { "field": "f", "value": "v" } }
        ]
    }));
    assert!(result.is_err());
}

#[test]
fn window_config_file_drives_page_size() {
    use std::io::Write;
    use timeline_window::WindowConfig;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[window]\nitems-per-page = 10\nitems-per-page-options = [10, 25]\n")
        .unwrap();

    let scenario = Scenario {
        providers: and_provider_fixture(),
        intents: vec![],
        results: rows(12),
    };
    let options = RunOptions {
        window: WindowConfig::load_from(file.path()),
        page: Some(-3),
        ..RunOptions::default()
    };
    let report = run(scenario, &options).unwrap();

    assert_eq!(report.page.items_per_page, 10);
    assert_eq!(report.page.page_index, 0);
    assert_eq!(report.page.page_count, 2);
    assert_eq!(report.page.rows.len(), 10);
}
