use accord::builder::*;
use accord::model::prelude::*;
use accord::utils::Colour;
use serde_json::json;

#[test]
fn only_set_fields_are_sent() {
    let builder = EditGuild::new().name("crabs").afk_timeout(60);
    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({"name": "crabs", "afk_timeout": 60})
    );

    assert_eq!(serde_json::to_value(EditMember::new()).unwrap(), json!({}));
}

#[test]
fn clearable_fields_send_null() {
    let builder = EditGuild::new()
        .icon(None)
        .afk_channel(None)
        .system_channel_id(Some(ChannelId::new(4)))
        .verification_level(VerificationLevel::High);

    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({
            "icon": null,
            "afk_channel_id": null,
            "system_channel_id": "4",
            "verification_level": 3,
        })
    );

    let builder = EditMember::new().nickname(None).voice_channel(None).enable_communication();
    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({"nick": null, "channel_id": null, "communication_disabled_until": null})
    );
}

#[test]
fn audit_log_reason_is_never_in_the_body() {
    let builder = EditMember::new().mute(true).audit_log_reason("spamming");
    assert_eq!(serde_json::to_value(builder).unwrap(), json!({"mute": true}));

    let builder = CreateChannel::new("rules").topic("read me").audit_log_reason("setup");
    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({"name": "rules", "type": 0, "topic": "read me"})
    );
}

#[test]
fn role_icon_and_emoji_exclude_each_other() {
    let builder = EditRole::new()
        .colour(Colour::from_rgb(255, 0, 0))
        .icon(Some("data:image/png;base64,AAAA".into()))
        .unicode_emoji(Some("\u{1F980}".into()));

    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({"color": 0xFF0000, "icon": null, "unicode_emoji": "\u{1F980}"})
    );
}

#[test]
fn channel_overwrites() {
    let overwrite = PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL,
        deny: Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Member(UserId::new(9)),
    };

    let builder = CreateChannel::new("quiet")
        .kind(ChannelType::Voice)
        .category(ChannelId::new(2))
        .permissions([overwrite]);

    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({
            "name": "quiet",
            "type": 2,
            "parent_id": "2",
            "permission_overwrites": [{"allow": "1024", "deny": "2048", "id": "9", "type": 1}],
        })
    );
}

#[test]
fn replies_reference_their_message() {
    let builder = CreateMessage::new()
        .content("same")
        .reference_message((ChannelId::new(3), MessageId::new(4)));

    assert_eq!(
        serde_json::to_value(builder).unwrap(),
        json!({
            "content": "same",
            "tts": false,
            "message_reference": {"message_id": "4", "channel_id": "3"},
        })
    );
}
