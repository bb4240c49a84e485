mod common;

use common::{and_provider_fixture, mock_member, mock_provider, mock_providers};
use pretty_assertions::assert_eq;
use timeline_registry::Registry;
use timeline_types::{Error, ProviderAddress, Scope, ScopedKey};

// ── Construction ─────────────────────────────────────────────────

#[test]
fn empty_registry_has_no_providers() {
    let registry = Registry::empty();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert_eq!(registry, Registry::default());
}

#[test]
fn new_preserves_order() {
    let registry = Registry::new(mock_providers()).unwrap();
    let ids: Vec<&str> = registry.list().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "id-Provider 1",
            "id-Provider 2",
            "id-Provider 3",
            "id-Provider 4",
            "id-Provider 5"
        ]
    );
}

#[test]
fn duplicate_top_level_id_is_rejected() {
    let result = Registry::new(vec![mock_provider("A"), mock_provider("A")]);
    match result {
        Err(Error::DuplicateId { scope, id }) => {
            assert_eq!(scope, Scope::TopLevel);
            assert_eq!(id, "id-A");
        }
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn duplicate_id_within_one_group_is_rejected() {
    let anchor = mock_provider("A").with_and(vec![mock_member("B"), mock_member("B")]);
    match Registry::new(vec![anchor]) {
        Err(Error::DuplicateId { scope, id }) => {
            assert_eq!(scope, Scope::AndGroup("id-A".into()));
            assert_eq!(id, "id-B");
        }
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn same_id_in_different_groups_is_accepted() {
    let a = mock_provider("A").with_and(vec![mock_member("Shared")]);
    let b = mock_provider("B").with_and(vec![mock_member("Shared")]);
    let registry = Registry::new(vec![a, b]).unwrap();
    assert!(registry.find_and("id-A", "id-Shared").is_ok());
    assert!(registry.find_and("id-B", "id-Shared").is_ok());
}

#[test]
fn member_may_reuse_a_top_level_id() {
    let a = mock_provider("A").with_and(vec![mock_member("B")]);
    let b = mock_provider("B");
    assert!(Registry::new(vec![a, b]).is_ok());
}

// ── Lookups ──────────────────────────────────────────────────────

#[test]
fn find_top_level_provider() {
    let registry = and_provider_fixture();
    let provider = registry.find("id-Provider 1").unwrap();
    assert_eq!(provider.name, "Provider 1");
    assert_eq!(provider.and.len(), 2);
}

#[test]
fn find_unknown_provider_is_not_found() {
    let registry = and_provider_fixture();
    assert!(matches!(
        registry.find("id-Provider 2"),
        Err(Error::NotFound(id)) if id == "id-Provider 2"
    ));
}

#[test]
fn find_and_member() {
    let registry = and_provider_fixture();
    let member = registry.find_and("id-Provider 1", "id-Provider 3").unwrap();
    assert_eq!(member.name, "Provider 3");
}

#[test]
fn find_and_with_unknown_member_is_not_found() {
    let registry = and_provider_fixture();
    let err = registry.find_and("id-Provider 1", "id-Provider 9").unwrap_err();
    assert!(format!("{err}").contains("id-Provider 1 / id-Provider 9"));
}

#[test]
fn contains_resolves_both_address_shapes() {
    let registry = and_provider_fixture();
    assert!(registry.contains(&ProviderAddress::top_level("id-Provider 1")));
    assert!(registry.contains(&ProviderAddress::nested("id-Provider 1", "id-Provider 2")));
    assert!(!registry.contains(&ProviderAddress::top_level("id-Provider 2")));
    assert!(!registry.contains(&ProviderAddress::nested("id-Provider 2", "id-Provider 1")));
}

#[test]
fn keys_enumerate_every_entity_with_its_scope() {
    let registry = and_provider_fixture();
    let keys: Vec<ScopedKey> = registry.keys().collect();
    assert_eq!(
        keys,
        vec![
            ScopedKey::new(Scope::TopLevel, "id-Provider 1".into()),
            ScopedKey::new(Scope::AndGroup("id-Provider 1".into()), "id-Provider 2".into()),
            ScopedKey::new(Scope::AndGroup("id-Provider 1".into()), "id-Provider 3".into()),
        ]
    );
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_as_plain_provider_list() {
    let registry = and_provider_fixture();
    let value = serde_json::to_value(&registry).unwrap();
    let list = value.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "id-Provider 1");
    assert_eq!(list[0]["and"][1]["id"], "id-Provider 3");
}

#[test]
fn deserialization_validates_ids() {
    let json = serde_json::to_string(&vec![mock_provider("A"), mock_provider("A")]).unwrap();
    let err = serde_json::from_str::<Registry>(&json).unwrap_err();
    assert!(err.to_string().contains("duplicate provider id"));
}

#[test]
fn deserialization_roundtrip() {
    let registry = and_provider_fixture();
    let json = serde_json::to_string(&registry).unwrap();
    let parsed: Registry = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, registry);
}
