use accord::model::prelude::*;
use serde_json::{json, Value};

const OWNER: u64 = 1000;

fn role(id: u64, permissions: Permissions) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("role {id}"),
        "color": 0,
        "hoist": false,
        "position": 0,
        "permissions": permissions.bits().to_string(),
        "managed": false,
        "mentionable": false,
    })
}

fn member(id: u64, roles: &[u64]) -> Member {
    serde_json::from_value(json!({
        "guild_id": "1",
        "user": {"id": id.to_string(), "username": format!("user {id}")},
        "roles": roles.iter().map(u64::to_string).collect::<Vec<_>>(),
        "joined_at": "2023-01-01T00:00:00Z",
    }))
    .unwrap()
}

fn guild() -> Guild {
    let everyone =
        Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS;

    serde_json::from_value(json!({
        "id": "1",
        "name": "crabs",
        "icon": null,
        "splash": null,
        "discovery_splash": null,
        "owner_id": OWNER.to_string(),
        "afk_channel_id": null,
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [
            role(1, everyone),
            role(10, Permissions::MANAGE_MESSAGES),
            role(11, Permissions::ADMINISTRATOR),
        ],
        "emojis": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_id": null,
        "rules_channel_id": null,
        "vanity_url_code": null,
        "description": null,
        "banner": null,
        "premium_tier": 0,
        "preferred_locale": "en-US",
        "public_updates_channel_id": null,
        "nsfw_level": 0,
        "joined_at": "2023-01-01T00:00:00Z",
        "member_count": 0,
        "channels": [{
            "id": "50",
            "type": 0,
            "name": "announcements",
            "permission_overwrites": [
                {"id": "1", "type": 0, "allow": "0", "deny": "2048"},
                {"id": "10", "type": 0, "allow": "2048", "deny": "0"},
                {"id": "4", "type": 1, "allow": "0", "deny": "1024"},
            ],
        }],
    }))
    .unwrap()
}

#[test]
fn guild_level_permissions_combine_roles() {
    let guild = guild();

    assert_eq!(
        guild.member_permissions(&member(2, &[10])),
        Permissions::VIEW_CHANNEL
            | Permissions::SEND_MESSAGES
            | Permissions::EMBED_LINKS
            | Permissions::MANAGE_MESSAGES
    );
    assert_eq!(guild.member_permissions(&member(3, &[11])), Permissions::all());
    assert_eq!(guild.member_permissions(&member(OWNER, &[])), Permissions::all());
}

#[test]
fn overwrites_apply_in_order() {
    let guild = guild();
    let channel = &guild.channels[&ChannelId::new(50)];

    // The role overwrite re-allows what @everyone denies.
    let moderator = channel.permissions_for_member(&guild, &member(2, &[10]));
    assert!(moderator.contains(Permissions::SEND_MESSAGES | Permissions::MANAGE_MESSAGES));

    // Without SEND_MESSAGES, embedding links is meaningless.
    let regular = channel.permissions_for_member(&guild, &member(5, &[]));
    assert_eq!(regular, Permissions::VIEW_CHANNEL);

    // The member overwrite hides the channel altogether.
    let hidden = channel.permissions_for_member(&guild, &member(4, &[]));
    assert_eq!(hidden, Permissions::empty());
}

#[test]
fn permissions_travel_as_strings() {
    let permissions = Permissions::VIEW_CHANNEL | Permissions::MODERATE_MEMBERS;

    let value = serde_json::to_value(permissions).unwrap();
    assert_eq!(value, json!("1099511628800"));
    assert_eq!(serde_json::from_value::<Permissions>(value).unwrap(), permissions);
    assert_eq!(
        serde_json::from_value::<Permissions>(json!(1024)).unwrap(),
        Permissions::VIEW_CHANNEL
    );
}
