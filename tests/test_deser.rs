use accord::model::prelude::*;
use serde_json::{json, Value};

fn member(guild_id: &str) -> Value {
    json!({
        "guild_id": guild_id,
        "user": {"id": "5", "username": "crab", "discriminator": "0"},
        "nick": null,
        "roles": ["7"],
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "deaf": false,
        "mute": false,
    })
}

#[test]
fn ids_accept_strings_and_numbers() {
    let from_string: UserId = serde_json::from_value(json!("80351110224678912")).unwrap();
    let from_number: UserId = serde_json::from_value(json!(80351110224678912_u64)).unwrap();

    assert_eq!(from_string, from_number);
    assert_eq!(serde_json::to_value(from_string).unwrap(), json!("80351110224678912"));
    assert!(serde_json::from_value::<UserId>(json!("crab")).is_err());
}

#[test]
fn member_add_carries_its_guild() {
    let event = Event::deserialize_with_name("GUILD_MEMBER_ADD", member("3")).unwrap();

    let Event::GuildMemberAdd(add) = event else { panic!("wrong event") };
    assert_eq!(add.member.guild_id, GuildId::new(3));
    assert_eq!(add.member.roles, [RoleId::new(7)]);
    assert_eq!(add.member.user.discriminator, None);
}

#[test]
fn channels_dispatch_on_their_type() {
    let private: Channel = serde_json::from_value(json!({
        "id": "1",
        "type": 1,
        "last_message_id": null,
        "recipients": [{"id": "5", "username": "crab"}],
    }))
    .unwrap();
    assert!(matches!(private, Channel::Private(ref c) if c.recipient().is_some()));

    let text: Channel = serde_json::from_value(json!({
        "id": "2",
        "guild_id": "3",
        "type": 0,
        "name": "general",
        "permission_overwrites": [{"id": "3", "type": 0, "allow": "0", "deny": "2048"}],
    }))
    .unwrap();
    let text = text.guild().unwrap();
    assert_eq!(text.kind, ChannelType::Text);
    assert_eq!(text.overwrites()[0].kind, PermissionOverwriteType::Role(RoleId::new(3)));
    assert_eq!(text.overwrites()[0].deny, Permissions::SEND_MESSAGES);
    assert_eq!(text.position, None);

    assert!(serde_json::from_value::<Channel>(json!({"id": "2", "name": "x"})).is_err());
}

#[test]
fn snapshots_keep_unset_apart_from_empty() {
    let mut missing_joined_at = member("3");
    missing_joined_at.as_object_mut().unwrap().remove("joined_at");
    assert!(serde_json::from_value::<Member>(missing_joined_at).is_err());

    let mut without_mute = member("3");
    without_mute.as_object_mut().unwrap().remove("mute");
    let member: Member = serde_json::from_value(without_mute).unwrap();
    assert_eq!(member.mute, None);
    assert_eq!(member.deaf, Some(false));

    let unset: Emoji = serde_json::from_value(json!({"id": "9", "name": "blob"})).unwrap();
    let empty: Emoji =
        serde_json::from_value(json!({"id": "9", "name": "blob", "roles": [], "managed": false}))
            .unwrap();
    assert_eq!(unset.roles, None);
    assert_eq!(unset.managed, None);
    assert_eq!(empty.roles, Some(vec![]));
    assert_eq!(empty.managed, Some(false));

    let user: User = serde_json::from_value(json!({"id": "5", "username": "crab"})).unwrap();
    let bot: User =
        serde_json::from_value(json!({"id": "5", "username": "crab", "bot": false})).unwrap();
    assert_eq!(user.bot, None);
    assert_eq!(bot.bot, Some(false));

    let channel = json!({"id": "2", "guild_id": "3", "type": 0, "name": "general"});
    let unplaced: GuildChannel = serde_json::from_value(channel.clone()).unwrap();
    let mut placed = channel;
    placed["position"] = json!(0);
    let placed: GuildChannel = serde_json::from_value(placed).unwrap();
    assert_eq!(unplaced.position, None);
    assert_eq!(placed.position, Some(0));

    assert!(serde_json::from_value::<User>(json!({"id": "5"})).is_err());
}

#[test]
fn unknown_enum_values_are_kept() {
    let channel: Channel = serde_json::from_value(json!({
        "id": "2",
        "guild_id": "3",
        "type": 99,
        "name": "future",
    }))
    .unwrap();

    assert_eq!(channel.kind(), ChannelType::Unknown(99));
    assert_eq!(serde_json::to_value(channel).unwrap()["type"], json!(99));
}

#[test]
fn unknown_events_are_not_errors() {
    let event = Event::deserialize_with_name("AUTO_MODERATION_ACTION_EXECUTION", json!({}))
        .unwrap();

    assert_eq!(event.event_type().name(), "AUTO_MODERATION_ACTION_EXECUTION");
    assert!(matches!(event, Event::Unknown(_)));
}

#[test]
fn malformed_payloads_are_errors() {
    assert!(Event::deserialize_with_name("GUILD_ROLE_DELETE", json!({"guild_id": "1"})).is_err());
    assert!(Event::deserialize_with_name("MESSAGE_UPDATE", json!({"content": "x"})).is_err());
}

#[test]
fn message_references() {
    let message: Message = serde_json::from_value(json!({
        "id": "10",
        "channel_id": "2",
        "author": {"id": "5", "username": "crab"},
        "content": "reply",
        "timestamp": "2024-01-01T00:00:00Z",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "pinned": false,
        "type": 19,
        "message_reference": {"message_id": "9", "channel_id": "2"},
        "flags": 4,
    }))
    .unwrap();

    let reference = message.message_reference.unwrap();
    assert_eq!(reference.message_id, Some(MessageId::new(9)));
    assert_eq!(reference.guild_id, None);
    assert!(message.flags.unwrap().contains(MessageFlags::SUPPRESS_EMBEDS));
}
