//! Shared fixtures for registry tests.

#![allow(dead_code)]

use timeline_registry::Registry;
use timeline_types::{AndProvider, Provider, QueryMatch};

/// A provider named `name` matching `name : "<name>"`, id `id-<name>`.
pub fn mock_provider(name: &str) -> Provider {
    Provider::new(format!("id-{name}"), name, QueryMatch::is("name", name))
}

pub fn mock_member(name: &str) -> AndProvider {
    mock_provider(name).into()
}

/// Five independent top-level providers.
pub fn mock_providers() -> Vec<Provider> {
    (1..=5)
        .map(|n| mock_provider(&format!("Provider {n}")))
        .collect()
}

/// Provider 1 owning an AND-group of Provider 2 and Provider 3.
pub fn and_provider_fixture() -> Registry {
    let anchor = mock_provider("Provider 1").with_and(vec![
        mock_member("Provider 2"),
        mock_member("Provider 3"),
    ]);
    Registry::new(vec![anchor]).unwrap()
}
