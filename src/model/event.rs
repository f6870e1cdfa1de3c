//! All the events this library handles.
//!
//! Every event wraps the `d` payload of a gateway dispatch. Snapshot events (`GUILD_CREATE`,
//! `MESSAGE_CREATE`, ...) carry a fully decoded model. Update events that Discord sends partially
//! (`GUILD_UPDATE`, `GUILD_MEMBER_UPDATE`, `MESSAGE_UPDATE`) keep the identifiers needed to find
//! the cached entity plus the raw fragment to [merge][`Update`] into it.
//!
//! [`Update`]: super::update::Update

use std::collections::HashMap;
use std::fmt;

use serde::de::Error as DeError;

use super::utils::{deserialize_keyed, optional, required, serialize_keyed};
use crate::internal::prelude::*;
use crate::json;
use crate::model::channel::{Channel, Message};
use crate::model::gateway::{Presence, Ready};
use crate::model::guild::{Emoji, Guild, Member, Role, UnavailableGuild};
use crate::model::id::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
use crate::model::user::{CurrentUser, User};

/// Moves the listed identifier keys out of a fragment, returning `(ids, fragment)`.
fn split_fragment(mut fragment: JsonMap, keys: &[&'static str]) -> (JsonMap, JsonMap) {
    let mut ids = JsonMap::new();

    for key in keys {
        if let Some(value) = fragment.remove(*key) {
            ids.insert((*key).to_string(), value);
        }
    }

    (ids, fragment)
}

fn join_fragment(
    fragment: &JsonMap,
    ids: impl IntoIterator<Item = (&'static str, Value)>,
) -> JsonMap {
    let mut map = fragment.clone();

    for (key, value) in ids {
        map.insert(key.to_string(), value);
    }

    map
}

/// Sent after identifying to the gateway.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#ready).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ReadyEvent {
    pub ready: Ready,
}

/// Event data for the channel creation event.
///
/// This is fired when:
///
/// - A [`Channel`] is created in a [`Guild`]
/// - A [`PrivateChannel`] is created
///
/// [`PrivateChannel`]: crate::model::channel::PrivateChannel
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-create).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ChannelCreateEvent {
    /// The channel that was created.
    pub channel: Channel,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ChannelUpdateEvent {
    pub channel: Channel,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#channel-delete).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ChannelDeleteEvent {
    pub channel: Channel,
}

/// The full snapshot of a guild, sent when the guild becomes available or the current user joins
/// it.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-create).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct GuildCreateEvent {
    pub guild: Guild,
}

/// The fields of a guild that changed.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-update).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GuildUpdateEvent {
    pub guild_id: GuildId,
    /// The changed fields, without the guild's `id`.
    pub fragment: JsonMap,
}

impl<'de> Deserialize<'de> for GuildUpdateEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let (ids, fragment) = split_fragment(JsonMap::deserialize(deserializer)?, &["id"]);

        Ok(Self {
            guild_id: required::<_, D::Error>(&ids, "id")?,
            fragment,
        })
    }
}

impl Serialize for GuildUpdateEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        join_fragment(&self.fragment, [("id", Value::from(self.guild_id.to_string()))])
            .serialize(serializer)
    }
}

/// Sent when a guild becomes unavailable, or when the current user leaves or is removed from it.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-delete).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct GuildDeleteEvent {
    pub guild: UnavailableGuild,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-ban-add).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildBanAddEvent {
    pub guild_id: GuildId,
    pub user: User,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-ban-remove).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildBanRemoveEvent {
    pub guild_id: GuildId,
    pub user: User,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-emojis-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildEmojisUpdateEvent {
    pub guild_id: GuildId,
    #[serde(deserialize_with = "deserialize_keyed", serialize_with = "serialize_keyed")]
    pub emojis: HashMap<EmojiId, Emoji>,
}

/// A member joined a guild. The payload is a full member with its `guild_id`.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-member-add).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct GuildMemberAddEvent {
    pub member: Member,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-member-remove).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildMemberRemoveEvent {
    pub guild_id: GuildId,
    pub user: User,
}

/// The fields of a guild member that changed. The member is identified by `user.id`.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-member-update).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GuildMemberUpdateEvent {
    pub guild_id: GuildId,
    pub user: User,
    /// The changed fields, including the `user` object but without the `guild_id`.
    pub fragment: JsonMap,
}

impl<'de> Deserialize<'de> for GuildMemberUpdateEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let (ids, fragment) = split_fragment(JsonMap::deserialize(deserializer)?, &["guild_id"]);

        Ok(Self {
            guild_id: required::<_, D::Error>(&ids, "guild_id")?,
            user: required::<_, D::Error>(&fragment, "user")?,
            fragment,
        })
    }
}

impl Serialize for GuildMemberUpdateEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        join_fragment(&self.fragment, [("guild_id", Value::from(self.guild_id.to_string()))])
            .serialize(serializer)
    }
}

/// A chunk of a guild's members, sent in response to a request guild members gateway command.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-members-chunk).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[non_exhaustive]
pub struct GuildMembersChunkEvent {
    /// ID of the guild.
    pub guild_id: GuildId,
    /// Set of guild members.
    #[serde(deserialize_with = "deserialize_keyed", serialize_with = "serialize_keyed")]
    pub members: HashMap<UserId, Member>,
    /// Chunk index in the expected chunks for this response (0 <= chunk_index < chunk_count).
    pub chunk_index: u32,
    /// Total number of expected chunks for this response.
    pub chunk_count: u32,
    /// When passing an invalid ID, it will be returned here.
    #[serde(default)]
    pub not_found: Vec<UserId>,
    /// The nonce used in the request.
    pub nonce: Option<String>,
}

impl<'de> Deserialize<'de> for GuildMembersChunkEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let mut map = JsonMap::deserialize(deserializer)?;

        if let Some(guild_id) = map.get("guild_id").cloned() {
            json::inject_into_array(&mut map, "members", "guild_id", &guild_id);
        }

        Self::deserialize(Value::Object(map)).map_err(DeError::custom)
    }
}

impl Serialize for GuildMembersChunkEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        Self::serialize(self, serializer)
    }
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-create).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildRoleCreateEvent {
    pub guild_id: GuildId,
    pub role: Role,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildRoleUpdateEvent {
    pub guild_id: GuildId,
    pub role: Role,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#guild-role-delete).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildRoleDeleteEvent {
    pub guild_id: GuildId,
    pub role_id: RoleId,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-create).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct MessageCreateEvent {
    pub message: Message,
}

/// The fields of a message that changed.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-update).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct MessageUpdateEvent {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    /// The changed fields, without the identifiers above.
    pub fragment: JsonMap,
}

impl<'de> Deserialize<'de> for MessageUpdateEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let (ids, fragment) = split_fragment(JsonMap::deserialize(deserializer)?, &[
            "id",
            "channel_id",
            "guild_id",
        ]);

        Ok(Self {
            id: required::<_, D::Error>(&ids, "id")?,
            channel_id: required::<_, D::Error>(&ids, "channel_id")?,
            guild_id: optional::<_, D::Error>(&ids, "guild_id")?,
            fragment,
        })
    }
}

impl Serialize for MessageUpdateEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let mut ids = vec![
            ("id", Value::from(self.id.to_string())),
            ("channel_id", Value::from(self.channel_id.to_string())),
        ];

        if let Some(guild_id) = self.guild_id {
            ids.push(("guild_id", Value::from(guild_id.to_string())));
        }

        join_fragment(&self.fragment, ids).serialize(serializer)
    }
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-delete).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct MessageDeleteEvent {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    #[serde(rename = "id")]
    pub message_id: MessageId,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#message-delete-bulk).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct MessageDeleteBulkEvent {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub ids: Vec<MessageId>,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#presence-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct PresenceUpdateEvent {
    pub presence: Presence,
}

/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#typing-start).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct TypingStartEvent {
    /// ID of the channel.
    pub channel_id: ChannelId,
    /// ID of the guild.
    pub guild_id: Option<GuildId>,
    /// ID of the user.
    pub user_id: UserId,
    /// Timestamp of when the user started typing.
    pub timestamp: u64,
}

/// The current user's information changed.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#user-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct UserUpdateEvent {
    pub current_user: CurrentUser,
}

/// A dispatch the library does not model. The payload is kept as-is.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct UnknownEvent {
    #[serde(rename = "t")]
    pub kind: String,
    #[serde(rename = "d")]
    pub value: Value,
}

macro_rules! define_events {
    ($(
        $(#[doc = $doc:literal])*
        $name:literal => $Variant:ident($Event:ty),
    )*) => {
        /// Event received over a websocket connection
        #[derive(Clone, Debug, Serialize)]
        #[serde(untagged)]
        #[non_exhaustive]
        pub enum Event {
            $(
                $(#[doc = $doc])*
                $Variant($Event),
            )*
            /// An event type not covered by the above
            Unknown(UnknownEvent),
        }

        /// The type of event dispatch received from the gateway.
        ///
        /// This is used to determine what type of event dispatch was received.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum EventType {
            $(
                $(#[doc = $doc])*
                $Variant,
            )*
            /// An unknown event was received over the gateway.
            Other(String),
        }

        impl EventType {
            /// Return the event name of this event, as sent in the `t` field of a dispatch.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$Variant => $name,)*
                    Self::Other(name) => name,
                }
            }
        }

        impl From<&str> for EventType {
            fn from(name: &str) -> Self {
                match name {
                    $($name => Self::$Variant,)*
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl Event {
            /// Return the type of this event.
            #[must_use]
            pub fn event_type(&self) -> EventType {
                match self {
                    $(Self::$Variant(_) => EventType::$Variant,)*
                    Self::Unknown(unknown) => EventType::Other(unknown.kind.clone()),
                }
            }

            /// Decodes the `d` payload of a dispatch given its `t` event name.
            ///
            /// Names the library does not model decode into [`Event::Unknown`] and never fail.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Json`] if the payload of a known event is malformed.
            pub fn deserialize_with_name(name: &str, data: Value) -> Result<Self> {
                Ok(match EventType::from(name) {
                    $(EventType::$Variant => Self::$Variant(json::from_value(data)?),)*
                    EventType::Other(kind) => Self::Unknown(UnknownEvent {
                        kind,
                        value: data,
                    }),
                })
            }
        }
    };
}

define_events! {
    /// The channel was created.
    "CHANNEL_CREATE" => ChannelCreate(ChannelCreateEvent),
    /// The channel was deleted.
    "CHANNEL_DELETE" => ChannelDelete(ChannelDeleteEvent),
    /// The channel was updated.
    "CHANNEL_UPDATE" => ChannelUpdate(ChannelUpdateEvent),
    /// A user was banned from a guild.
    "GUILD_BAN_ADD" => GuildBanAdd(GuildBanAddEvent),
    /// A user's ban was lifted from a guild.
    "GUILD_BAN_REMOVE" => GuildBanRemove(GuildBanRemoveEvent),
    /// A guild became available, or the current user joined it.
    "GUILD_CREATE" => GuildCreate(GuildCreateEvent),
    /// A guild became unavailable, or the current user left it.
    "GUILD_DELETE" => GuildDelete(GuildDeleteEvent),
    /// A guild's emojis were updated.
    "GUILD_EMOJIS_UPDATE" => GuildEmojisUpdate(GuildEmojisUpdateEvent),
    /// A member joined a guild.
    "GUILD_MEMBER_ADD" => GuildMemberAdd(GuildMemberAddEvent),
    /// A member left a guild, or was removed from it.
    "GUILD_MEMBER_REMOVE" => GuildMemberRemove(GuildMemberRemoveEvent),
    /// A guild member was updated.
    "GUILD_MEMBER_UPDATE" => GuildMemberUpdate(GuildMemberUpdateEvent),
    /// A chunk of guild members.
    "GUILD_MEMBERS_CHUNK" => GuildMembersChunk(GuildMembersChunkEvent),
    /// A role was created in a guild.
    "GUILD_ROLE_CREATE" => GuildRoleCreate(GuildRoleCreateEvent),
    /// A role was deleted from a guild.
    "GUILD_ROLE_DELETE" => GuildRoleDelete(GuildRoleDeleteEvent),
    /// A guild role was updated.
    "GUILD_ROLE_UPDATE" => GuildRoleUpdate(GuildRoleUpdateEvent),
    /// A guild was updated.
    "GUILD_UPDATE" => GuildUpdate(GuildUpdateEvent),
    /// A message was sent in a channel.
    "MESSAGE_CREATE" => MessageCreate(MessageCreateEvent),
    /// A message was deleted.
    "MESSAGE_DELETE" => MessageDelete(MessageDeleteEvent),
    /// Multiple messages were deleted at once.
    "MESSAGE_DELETE_BULK" => MessageDeleteBulk(MessageDeleteBulkEvent),
    /// A message was edited.
    "MESSAGE_UPDATE" => MessageUpdate(MessageUpdateEvent),
    /// A user's presence was updated.
    "PRESENCE_UPDATE" => PresenceUpdate(PresenceUpdateEvent),
    /// The first event after identifying.
    "READY" => Ready(ReadyEvent),
    /// A user started typing in a channel.
    "TYPING_START" => TypingStart(TypingStartEvent),
    /// The current user was updated.
    "USER_UPDATE" => UserUpdate(UserUpdateEvent),
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::json;

    #[test]
    fn unknown_names_are_kept() {
        let event = Event::deserialize_with_name("SOMETHING_NEW", json!({"a": 1})).unwrap();

        match event {
            Event::Unknown(unknown) => {
                assert_eq!(unknown.kind, "SOMETHING_NEW");
                assert_eq!(unknown.value, json!({"a": 1}));
            },
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn fragment_events_split_their_ids() {
        let event = Event::deserialize_with_name(
            "MESSAGE_UPDATE",
            json!({"id": "3", "channel_id": "2", "content": "edited"}),
        )
        .unwrap();

        let Event::MessageUpdate(update) = event else { panic!("wrong event") };
        assert_eq!(update.id, MessageId::new(3));
        assert_eq!(update.guild_id, None);
        assert_eq!(update.fragment.len(), 1);
        assert_eq!(update.fragment["content"], json!("edited"));

        let serialized = json::to_value(&update).unwrap();
        assert_eq!(serialized["channel_id"], json!("2"));
    }

    #[test]
    fn member_update_requires_a_user() {
        assert!(Event::deserialize_with_name(
            "GUILD_MEMBER_UPDATE",
            json!({"guild_id": "1", "nick": "crab"}),
        )
        .is_err());

        let event = Event::deserialize_with_name(
            "GUILD_MEMBER_UPDATE",
            json!({"guild_id": "1", "user": {"id": "5", "username": "crab"}, "nick": null}),
        )
        .unwrap();

        assert_eq!(event.event_type(), EventType::GuildMemberUpdate);
        assert_eq!(event.event_type().to_string(), "GUILD_MEMBER_UPDATE");
    }

    #[test]
    fn members_chunk_injects_guild_id() {
        let chunk: GuildMembersChunkEvent = json::from_value(json!({
            "guild_id": "9",
            "members": [{
                "user": {"id": "5", "username": "crab"},
                "roles": [],
                "joined_at": "2024-01-01T00:00:00.000000+00:00",
            }],
            "chunk_index": 0,
            "chunk_count": 1,
        }))
        .unwrap();

        assert_eq!(chunk.members[&UserId::new(5)].guild_id, GuildId::new(9));
    }
}
