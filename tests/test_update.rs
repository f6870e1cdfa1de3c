use accord::json::JsonMap;
use accord::model::prelude::*;
use serde_json::json;

fn fragment(value: serde_json::Value) -> JsonMap {
    serde_json::from_value(value).unwrap()
}

fn user() -> User {
    serde_json::from_value(json!({
        "id": "5",
        "username": "crab",
        "global_name": "Crab",
        "avatar": "a_1",
    }))
    .unwrap()
}

#[test]
fn only_present_keys_are_written() {
    let mut user = user();
    let applied = user.update(&fragment(json!({"global_name": "Ferris"})));

    assert_eq!(applied, ["global_name"]);
    assert_eq!(user.global_name.as_deref(), Some("Ferris"));
    assert_eq!(user.name, "crab");
    assert_eq!(user.avatar.as_deref(), Some("a_1"));
}

#[test]
fn empty_fragment_changes_nothing() {
    let mut user = user();
    assert!(user.update(&JsonMap::new()).is_empty());
    assert_eq!(user.global_name.as_deref(), Some("Crab"));
}

#[test]
fn identifiers_are_immutable() {
    let mut user = user();
    let applied = user.update(&fragment(json!({"id": "6", "username": "lobster"})));

    assert_eq!(applied, ["username"]);
    assert_eq!(user.id, UserId::new(5));
}

#[test]
fn bad_values_are_skipped_individually() {
    let mut user = user();
    let applied = user.update(&fragment(json!({
        "username": 12,
        "bot": true,
        "made_up": "ignored",
    })));

    assert_eq!(applied, ["bot"]);
    assert_eq!(user.name, "crab");
    assert_eq!(user.bot, Some(true));
}

#[test]
fn null_clears_optional_fields() {
    let mut user = user();
    user.update(&fragment(json!({"avatar": null})));
    assert_eq!(user.avatar, None);

    // A required field cannot be cleared.
    assert!(user.update(&fragment(json!({"username": null}))).is_empty());
    assert_eq!(user.name, "crab");
}

#[test]
fn current_user_merges_into_its_user() {
    let mut current: CurrentUser = serde_json::from_value(json!({
        "id": "5",
        "username": "crab",
        "mfa_enabled": false,
    }))
    .unwrap();

    let applied = current.update(&fragment(json!({"username": "ferris", "mfa_enabled": true})));

    assert!(applied.contains(&"username"));
    assert!(applied.contains(&"mfa_enabled"));
    assert_eq!(current.name, "ferris");
    assert_eq!(current.mfa_enabled, Some(true));
}

#[test]
fn keyed_collections_are_replaced() {
    let mut role: Role = serde_json::from_value(json!({
        "id": "7",
        "name": "mods",
        "color": 255,
        "hoist": false,
        "position": 2,
        "permissions": "8192",
        "managed": false,
        "mentionable": false,
    }))
    .unwrap();

    role.update(&fragment(json!({"permissions": "10240", "color": 0})));

    assert_eq!(role.permissions, Permissions::MANAGE_MESSAGES | Permissions::SEND_MESSAGES);
    assert_eq!(role.colour.0, 0);
    assert_eq!(role.position, 2);
}
