//! Models relating to channels and types within channels.

mod attachment;
mod channel_id;
mod guild_channel;
mod message;
mod private_channel;
mod reaction;

use std::fmt;
use std::num::NonZeroU64;

use serde::de::Error as DeError;

pub use self::attachment::*;
pub use self::guild_channel::*;
pub use self::message::*;
pub use self::private_channel::*;
pub use self::reaction::*;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::id::{ChannelId, RoleId, UserId};
use crate::model::mention::Mentionable;
use crate::model::Permissions;

/// A container for any channel.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Channel {
    /// A channel within a [`Guild`].
    ///
    /// [`Guild`]: crate::model::guild::Guild
    Guild(GuildChannel),
    /// A private channel to another [`User`] (Direct Message), or a group direct message.
    ///
    /// [`User`]: crate::model::user::User
    Private(PrivateChannel),
}

impl Channel {
    /// Converts from [`Channel`] to `Option<GuildChannel>`.
    ///
    /// Converts `self` into an `Option<GuildChannel>`, consuming `self`, and discarding a
    /// [`PrivateChannel`] if any.
    #[must_use]
    pub fn guild(self) -> Option<GuildChannel> {
        match self {
            Self::Guild(lock) => Some(lock),
            Self::Private(_) => None,
        }
    }

    /// Converts from [`Channel`] to `Option<PrivateChannel>`.
    ///
    /// Converts `self` into an `Option<PrivateChannel>`, consuming `self`, and discarding a
    /// [`GuildChannel`], if any.
    #[must_use]
    pub fn private(self) -> Option<PrivateChannel> {
        match self {
            Self::Private(lock) => Some(lock),
            Self::Guild(_) => None,
        }
    }

    /// Deletes the inner channel.
    ///
    /// **Note**: If the channel is a [`GuildChannel`], the [Manage Channels] permission is
    /// required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission.
    ///
    /// [Manage Channels]: Permissions::MANAGE_CHANNELS
    pub async fn delete(&self, http: impl AsRef<Http>) -> Result<()> {
        self.id().delete(http).await.map(|_| ())
    }

    /// Determines if the channel is NSFW.
    #[inline]
    #[must_use]
    pub fn is_nsfw(&self) -> bool {
        match self {
            Self::Guild(channel) => channel.nsfw.unwrap_or_default(),
            Self::Private(_) => false,
        }
    }

    /// Retrieves the Id of the inner [`GuildChannel`] or [`PrivateChannel`].
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ChannelId {
        match self {
            Self::Guild(ch) => ch.id,
            Self::Private(ch) => ch.id,
        }
    }

    /// Retrieves the kind of the inner channel.
    #[must_use]
    pub const fn kind(&self) -> ChannelType {
        match self {
            Self::Guild(ch) => ch.kind,
            Self::Private(ch) => ch.kind,
        }
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let map = JsonMap::deserialize(deserializer)?;

        let kind = map
            .get("type")
            .ok_or_else(|| DeError::missing_field("type"))?
            .as_u64()
            .ok_or_else(|| DeError::custom("channel type must be an integer"))?;
        let kind = u8::try_from(kind)
            .map_err(|_| DeError::custom(format_args!("channel type {kind} is out of range")))?;

        let value = Value::Object(map);
        match ChannelType::from(kind) {
            ChannelType::Private | ChannelType::GroupDm => {
                PrivateChannel::deserialize(value).map(Channel::Private)
            },
            _ => GuildChannel::deserialize(value).map(Channel::Guild),
        }
        .map_err(DeError::custom)
    }
}

impl Serialize for Channel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            Self::Guild(c) => c.serialize(serializer),
            Self::Private(c) => c.serialize(serializer),
        }
    }
}

impl fmt::Display for Channel {
    /// Formats the channel into a "mentioned" string.
    ///
    /// This will return a different format for each type of channel:
    /// - [`PrivateChannel`]s: the recipient's name;
    /// - [`GuildChannel`]s: a string mentioning the channel that users who can see the channel can
    ///   click on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guild(ch) => fmt::Display::fmt(&ch.id.mention(), f),
            Self::Private(ch) => f.write_str(&ch.name()),
        }
    }
}

enum_number! {
    /// A representation of a type of channel.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ChannelType {
        /// An indicator that the channel is a text [`GuildChannel`].
        Text = 0,
        /// An indicator that the channel is a [`PrivateChannel`].
        Private = 1,
        /// An indicator that the channel is a voice [`GuildChannel`].
        Voice = 2,
        /// An indicator that the channel is a group DM.
        GroupDm = 3,
        /// An indicator that the channel is a channel category.
        Category = 4,
        /// An indicator that the channel is a `NewsChannel`.
        ///
        /// Note: `NewsChannel` is serialized into a [`GuildChannel`]
        News = 5,
        /// An indicator that the channel is a news thread [`GuildChannel`].
        NewsThread = 10,
        /// An indicator that the channel is a public thread [`GuildChannel`].
        PublicThread = 11,
        /// An indicator that the channel is a private thread [`GuildChannel`].
        PrivateThread = 12,
        /// An indicator that the channel is a stage [`GuildChannel`].
        Stage = 13,
        /// An indicator that the channel is a directory [`GuildChannel`] in a hub.
        Directory = 14,
        /// An indicator that the channel is a forum [`GuildChannel`].
        Forum = 15,
        /// An indicator that the channel is a media [`GuildChannel`].
        Media = 16,
        _ => Unknown(u8),
    }
}

impl ChannelType {
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Text => "text",
            Self::Voice => "voice",
            Self::GroupDm => "group_dm",
            Self::Category => "category",
            Self::News => "news",
            Self::NewsThread => "news_thread",
            Self::PublicThread => "public_thread",
            Self::PrivateThread => "private_thread",
            Self::Stage => "stage",
            Self::Directory => "directory",
            Self::Forum => "forum",
            Self::Media => "media",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Whether the channel type describes a thread.
    #[must_use]
    pub const fn is_thread(self) -> bool {
        matches!(self, Self::NewsThread | Self::PublicThread | Self::PrivateThread)
    }
}

#[derive(Deserialize, Serialize)]
struct PermissionOverwriteData {
    allow: Permissions,
    deny: Permissions,
    id: NonZeroU64Str,
    #[serde(rename = "type")]
    kind: u8,
}

/// Snowflakes arrive as strings; a raw id is kept until the overwrite type is known.
#[derive(Clone, Copy)]
struct NonZeroU64Str(NonZeroU64);

impl<'de> Deserialize<'de> for NonZeroU64Str {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        RoleId::deserialize(deserializer).map(|id| Self(id.into()))
    }
}

impl Serialize for NonZeroU64Str {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// A channel-specific permission overwrite for a member or role.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#overwrite-object).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionOverwrite {
    pub allow: Permissions,
    pub deny: Permissions,
    pub kind: PermissionOverwriteType,
}

impl<'de> Deserialize<'de> for PermissionOverwrite {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let data = PermissionOverwriteData::deserialize(deserializer)?;

        let kind = match data.kind {
            0 => PermissionOverwriteType::Role(RoleId::from(data.id.0)),
            1 => PermissionOverwriteType::Member(UserId::from(data.id.0)),
            _ => return Err(DeError::custom("Unknown PermissionOverwriteType")),
        };

        Ok(PermissionOverwrite {
            allow: data.allow,
            deny: data.deny,
            kind,
        })
    }
}

impl Serialize for PermissionOverwrite {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let (id, kind) = match self.kind {
            PermissionOverwriteType::Role(id) => (id.into(), 0),
            PermissionOverwriteType::Member(id) => (id.into(), 1),
        };

        PermissionOverwriteData {
            allow: self.allow,
            deny: self.deny,
            id: NonZeroU64Str(id),
            kind,
        }
        .serialize(serializer)
    }
}

/// The type of edit being made to a Channel's permissions.
///
/// This is for use with methods such as [`GuildChannel::create_permission`].
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#overwrite-object-overwrite-structure) (field `type`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PermissionOverwriteType {
    /// A member which is having its permission overwrites edited.
    Member(UserId),
    /// A role which is having its permission overwrites edited.
    Role(RoleId),
}

impl PermissionOverwriteType {
    pub(crate) fn target(self) -> (u64, u8) {
        match self {
            Self::Role(id) => (id.get(), 0),
            Self::Member(id) => (id.get(), 1),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn channel_dispatches_on_type() {
        let channel: Channel = from_value(json!({
            "id": "2",
            "type": 1,
            "recipients": [{"id": "3", "username": "friend"}],
        }))
        .unwrap();
        assert!(matches!(channel, Channel::Private(_)));
        assert_eq!(channel.id(), ChannelId::new(2));

        let channel: Channel = from_value(json!({
            "id": "4",
            "type": 2,
            "guild_id": "1",
            "name": "voice",
            "position": 3,
        }))
        .unwrap();
        assert_eq!(channel.kind(), ChannelType::Voice);
        assert_eq!(channel.to_string(), "<#4>");
    }

    #[test]
    fn channel_type_out_of_range_is_an_error() {
        let result = from_value::<Channel>(json!({
            "id": "4",
            "type": 256,
            "guild_id": "1",
            "name": "text",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn permission_overwrite_serde() {
        let overwrite: PermissionOverwrite = from_value(json!({
            "id": "15",
            "type": 1,
            "allow": "1024",
            "deny": "0",
        }))
        .unwrap();

        assert_eq!(overwrite.kind, PermissionOverwriteType::Member(UserId::new(15)));
        assert_eq!(overwrite.allow, Permissions::VIEW_CHANNEL);
        assert_eq!(
            to_value(&overwrite).unwrap(),
            json!({"id": "15", "type": 1, "allow": "1024", "deny": "0"})
        );
        assert!(from_value::<PermissionOverwrite>(json!({
            "id": "15",
            "type": 7,
            "allow": "0",
            "deny": "0",
        }))
        .is_err());
    }

    #[test]
    fn unknown_channel_types_are_kept() {
        assert_eq!(ChannelType::from(99), ChannelType::Unknown(99));
        assert_eq!(u8::from(ChannelType::Forum), 15);
        assert!(ChannelType::PublicThread.is_thread());
    }
}
