#![cfg(feature = "cache")]

use accord::cache::{Cache, CacheUpdate, Settings};
use accord::model::prelude::*;
use serde_json::{json, Value};

fn dispatch(cache: &Cache, name: &str, data: Value) {
    let mut event = Event::deserialize_with_name(name, data).unwrap();
    cache.update(&mut event);
}

fn guild(id: u64) -> Value {
    json!({
        "id": id.to_string(),
        "name": "crabs",
        "icon": null,
        "splash": null,
        "discovery_splash": null,
        "owner_id": "2",
        "afk_channel_id": null,
        "afk_timeout": 300,
        "verification_level": 1,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [{
            "id": id.to_string(),
            "name": "@everyone",
            "color": 0,
            "hoist": false,
            "position": 0,
            "permissions": "3072",
            "managed": false,
            "mentionable": false,
        }],
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
        "member_count": 2,
        "members": [{
            "user": {"id": "2", "username": "ferris"},
            "roles": [],
            "joined_at": "2023-01-01T00:00:00Z",
        }],
        "channels": [
            {"id": "10", "type": 0, "name": "general", "position": 0},
            {"id": "11", "type": 2, "name": "voice", "position": 1, "bitrate": 64000},
        ],
    })
}

fn message(id: u64, content: &str) -> Value {
    json!({
        "id": id.to_string(),
        "channel_id": "10",
        "guild_id": "1",
        "author": {"id": "2", "username": "ferris"},
        "content": content,
        "timestamp": "2023-01-01T00:00:00Z",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "pinned": false,
        "type": 0,
    })
}

fn cache_with_messages(max_messages: usize) -> Cache {
    let mut settings = Settings::default();
    settings.max_messages = max_messages;

    Cache::new_with_settings(settings)
}

#[test]
fn ready_marks_guilds_unavailable() {
    let cache = Cache::new();
    assert!(cache.current_user().is_none());

    dispatch(
        &cache,
        "READY",
        json!({
            "v": 10,
            "user": {"id": "99", "username": "accord", "bot": true},
            "guilds": [{"id": "1", "unavailable": true}, {"id": "2", "unavailable": true}],
            "session_id": "abc",
        }),
    );

    assert_eq!(cache.current_user().unwrap().id, UserId::new(99));
    assert_eq!(cache.unavailable_guilds().len(), 2);
    assert_eq!(cache.guild_count(), 2);

    dispatch(&cache, "GUILD_CREATE", guild(1));
    assert_eq!(cache.unavailable_guilds().len(), 1);
    assert!(cache.guild(GuildId::new(1)).is_some());
    assert_eq!(cache.guild_count(), 2);
}

#[test]
fn guild_snapshot_fills_every_map() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));

    let guild_id = GuildId::new(1);
    assert_eq!(cache.guilds(), [guild_id]);
    assert_eq!(cache.roles(guild_id).unwrap().len(), 1);
    assert_eq!(cache.guild_channels(guild_id).unwrap().len(), 2);
    assert_eq!(cache.members(guild_id).unwrap().len(), 1);
    assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris");
    assert_eq!(cache.unknown_members(), 1);

    let Some(Channel::Guild(voice)) = cache.channel(ChannelId::new(11)) else {
        panic!("voice channel not cached");
    };
    assert_eq!(voice.guild_id, guild_id);
    assert_eq!(voice.bitrate, Some(64000));
}

#[test]
fn same_id_keeps_only_the_latest_value() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));

    let role = json!({
        "guild_id": "1",
        "role": {
            "id": "5",
            "name": "mods",
            "color": 0,
            "hoist": false,
            "position": 1,
            "permissions": "0",
            "managed": false,
            "mentionable": false,
        },
    });
    dispatch(&cache, "GUILD_ROLE_CREATE", role.clone());

    let mut renamed = role;
    renamed["role"]["name"] = json!("moderators");
    let mut event: GuildRoleUpdateEvent = serde_json::from_value(renamed).unwrap();

    let old = cache.update(&mut event).unwrap();
    assert_eq!(old.name, "mods");
    assert_eq!(cache.roles(GuildId::new(1)).unwrap().len(), 2);
    assert_eq!(cache.role(GuildId::new(1), RoleId::new(5)).unwrap().name, "moderators");
}

#[test]
fn removal_events_remove_exactly_the_named_entity() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));
    dispatch(&cache, "GUILD_CREATE", guild(3));

    dispatch(
        &cache,
        "CHANNEL_DELETE",
        json!({"id": "10", "guild_id": "1", "type": 0, "name": "general"}),
    );

    let channels = cache.guild_channels(GuildId::new(1)).unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, ChannelId::new(11));

    dispatch(&cache, "GUILD_DELETE", json!({"id": "1"}));
    assert!(cache.guild(GuildId::new(1)).is_none());
    assert!(cache.guild(GuildId::new(3)).is_some());
    assert!(cache.unavailable_guilds().is_empty());
}

#[test]
fn outage_keeps_the_guild_known() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));
    dispatch(&cache, "GUILD_DELETE", json!({"id": "1", "unavailable": true}));

    assert!(cache.guild(GuildId::new(1)).is_none());
    assert!(cache.unavailable_guilds().get(&GuildId::new(1)).is_some());
    assert_eq!(cache.guilds(), [GuildId::new(1)]);
}

#[test]
fn update_fragments_touch_only_their_fields() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));

    dispatch(&cache, "GUILD_UPDATE", json!({"id": "1", "description": "a guild for crabs"}));

    let guild = cache.guild(GuildId::new(1)).unwrap();
    assert_eq!(guild.description.as_deref(), Some("a guild for crabs"));
    assert_eq!(guild.name, "crabs");
    assert_eq!(guild.channels.len(), 2);
    assert_eq!(guild.members.len(), 1);

    // Nothing happens for a guild that was never received.
    dispatch(&cache, "GUILD_UPDATE", json!({"id": "8", "name": "ghost"}));
    assert!(cache.guild(GuildId::new(8)).is_none());
}

#[test]
fn members_follow_their_events() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));
    let guild_id = GuildId::new(1);

    dispatch(
        &cache,
        "GUILD_MEMBER_ADD",
        json!({
            "guild_id": "1",
            "user": {"id": "3", "username": "corro"},
            "roles": [],
            "joined_at": "2023-02-01T00:00:00Z",
        }),
    );
    assert_eq!(cache.members(guild_id).unwrap().len(), 2);
    assert_eq!(cache.guild(guild_id).unwrap().member_count, 3);

    dispatch(
        &cache,
        "GUILD_MEMBER_UPDATE",
        json!({"guild_id": "1", "user": {"id": "3", "username": "corro"}, "nick": "unsafe"}),
    );
    let member = cache.member(guild_id, UserId::new(3)).unwrap();
    assert_eq!(member.nick.as_deref(), Some("unsafe"));
    assert_eq!(member.joined_at.unix_timestamp(), 1675209600);

    dispatch(
        &cache,
        "GUILD_MEMBER_REMOVE",
        json!({"guild_id": "1", "user": {"id": "3", "username": "corro"}}),
    );
    assert!(cache.member(guild_id, UserId::new(3)).is_none());
    assert!(cache.member(guild_id, UserId::new(2)).is_some());
}

#[test]
fn message_history_evicts_the_oldest() {
    let cache = cache_with_messages(2);
    dispatch(&cache, "GUILD_CREATE", guild(1));

    for id in 100..103 {
        dispatch(&cache, "MESSAGE_CREATE", message(id, "hi"));
    }

    let history: Vec<_> =
        cache.channel_messages(ChannelId::new(10)).unwrap().into_iter().map(|m| m.id).collect();
    assert_eq!(history, [MessageId::new(101), MessageId::new(102)]);

    let channel = cache.guild_channel(ChannelId::new(10)).unwrap();
    assert_eq!(channel.last_message_id, Some(MessageId::new(102)));
}

#[test]
fn messages_are_not_kept_by_default() {
    let cache = Cache::new();
    dispatch(&cache, "MESSAGE_CREATE", message(100, "hi"));

    assert!(cache.message(ChannelId::new(10), MessageId::new(100)).is_none());
    assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris");
}

#[test]
fn message_update_and_deletion() {
    let cache = cache_with_messages(10);

    for id in 100..104 {
        dispatch(&cache, "MESSAGE_CREATE", message(id, "hi"));
    }

    dispatch(&cache, "MESSAGE_UPDATE", json!({"id": "100", "channel_id": "10", "content": "edit"}));
    assert_eq!(cache.message(ChannelId::new(10), MessageId::new(100)).unwrap().content, "edit");

    let mut bulk: MessageDeleteBulkEvent =
        serde_json::from_value(json!({"ids": ["101", "102", "999"], "channel_id": "10"})).unwrap();
    let removed = cache.update(&mut bulk).unwrap();
    assert_eq!(removed.len(), 2);

    let history: Vec<_> =
        cache.channel_messages(ChannelId::new(10)).unwrap().into_iter().map(|m| m.id).collect();
    assert_eq!(history, [MessageId::new(100), MessageId::new(103)]);
}

#[test]
fn presences_update_users() {
    let cache = Cache::new();
    dispatch(&cache, "GUILD_CREATE", guild(1));

    dispatch(
        &cache,
        "PRESENCE_UPDATE",
        json!({
            "user": {"id": "2", "username": "ferris2"},
            "guild_id": "1",
            "status": "online",
            "activities": [],
        }),
    );

    assert_eq!(cache.presence(UserId::new(2)).unwrap().status, OnlineStatus::Online);
    assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris2");
    assert_eq!(cache.member(GuildId::new(1), UserId::new(2)).unwrap().user.name, "ferris2");

    dispatch(
        &cache,
        "PRESENCE_UPDATE",
        json!({"user": {"id": "2"}, "guild_id": "1", "status": "offline", "activities": []}),
    );
    assert!(cache.presence(UserId::new(2)).is_none());
    assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris2");
}

#[test]
fn disabled_guild_cache_stores_nothing() {
    let mut settings = Settings::default();
    settings.cache_guilds = false;
    let cache = Cache::new_with_settings(settings);

    dispatch(&cache, "GUILD_CREATE", guild(1));
    assert!(cache.guild(GuildId::new(1)).is_none());
    assert_eq!(cache.guild_count(), 0);
    assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris");
}

struct Forget(UserId);

impl CacheUpdate for Forget {
    type Output = ();

    fn update(&mut self, cache: &Cache) -> Option<()> {
        let mut user = cache.user_mut(self.0)?;
        user.global_name = None;
        Some(())
    }
}

#[test]
fn custom_updates() {
    let cache = Cache::new();
    assert!(cache.update(&mut Forget(UserId::new(2))).is_none());

    dispatch(&cache, "GUILD_CREATE", guild(1));
    assert!(cache.update(&mut Forget(UserId::new(2))).is_some());
}
