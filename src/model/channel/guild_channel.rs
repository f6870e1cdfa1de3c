use std::fmt;

use super::{Channel, ChannelType, Message, PermissionOverwrite, PermissionOverwriteType};
use crate::builder::{CreateInvite, CreateMessage, EditChannel, GetMessages};
use crate::http::{Http, MessagesIter, Paginator};
use crate::internal::prelude::*;
use crate::model::guild::{Guild, Member};
use crate::model::id::{ChannelId, GuildId, MessageId, UserId};
use crate::model::invite::Invite;
use crate::model::mention::Mentionable;
use crate::model::timestamp::Timestamp;
use crate::model::Permissions;

/// Represents a guild's text, news, or voice channel. Some methods are available only for voice
/// channels and some are only available for text channels. News channels are a subset of text
/// channels and lack slow mode hence `rate_limit_per_user` will be `None`.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildChannel {
    /// The unique Id of the channel.
    pub id: ChannelId,
    /// The Id of the guild the channel is located in.
    ///
    /// Discord leaves this out of channels nested in a guild snapshot; the library fills it in.
    pub guild_id: GuildId,
    /// The type of the channel.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The name of the channel.
    pub name: String,
    /// The position of the channel.
    ///
    /// The default text channel will _almost always_ have a position of `0`. Threads have
    /// none.
    pub position: Option<u16>,
    /// The topic of the channel.
    pub topic: Option<String>,
    /// Whether the channel is NSFW.
    pub nsfw: Option<bool>,
    /// The Id of the last message sent in the channel.
    ///
    /// **Note**: This is only available for text channels.
    pub last_message_id: Option<MessageId>,
    /// The bitrate of the channel.
    ///
    /// **Note**: This is only available for voice and stage channels.
    pub bitrate: Option<u32>,
    /// The maximum number of members allowed in the channel.
    ///
    /// **Note**: This is only available for voice channels.
    pub user_limit: Option<u32>,
    /// A rate limit that applies per user and excludes bots.
    ///
    /// **Note**: This is only available for text channels excluding news channels.
    pub rate_limit_per_user: Option<u16>,
    /// Whether this guild channel belongs in a category, and the Id of that category.
    pub parent_id: Option<ChannelId>,
    /// The timestamp of the time a pin was most recently made.
    ///
    /// **Note**: This is only available for text channels.
    pub last_pin_timestamp: Option<Timestamp>,
    /// Permission overwrites for [`Member`]s and for [`Role`]s.
    ///
    /// [`Role`]: crate::model::guild::Role
    pub permission_overwrites: Option<Vec<PermissionOverwrite>>,
    /// The Id of the user who created the thread.
    ///
    /// **Note**: This is only available on threads.
    pub owner_id: Option<UserId>,
    /// An approximate count of users in a thread, stops counting at 50.
    ///
    /// **Note**: This is only available on threads.
    pub member_count: Option<u8>,
    /// An approximate count of messages in a thread, stops counting at 50.
    ///
    /// **Note**: This is only available on threads.
    pub message_count: Option<u32>,
}

impl_update!(GuildChannel {
    "type" => kind,
    "name" => name,
    "position" => position,
    "topic" => topic,
    "nsfw" => nsfw,
    "last_message_id" => last_message_id,
    "bitrate" => bitrate,
    "user_limit" => user_limit,
    "rate_limit_per_user" => rate_limit_per_user,
    "parent_id" => parent_id,
    "last_pin_timestamp" => last_pin_timestamp,
    "permission_overwrites" => permission_overwrites,
    "owner_id" => owner_id,
    "member_count" => member_count,
    "message_count" => message_count,
});

impl GuildChannel {
    /// The permission overwrites of the channel, empty when Discord sent none.
    #[must_use]
    pub fn overwrites(&self) -> &[PermissionOverwrite] {
        self.permission_overwrites.as_deref().unwrap_or_default()
    }

    /// Whether or not this channel is text-based, meaning that it is possible to send messages.
    #[must_use]
    pub fn is_text_based(&self) -> bool {
        matches!(
            self.kind,
            ChannelType::Text
                | ChannelType::News
                | ChannelType::Voice
                | ChannelType::Stage
                | ChannelType::NewsThread
                | ChannelType::PublicThread
                | ChannelType::PrivateThread
        )
    }

    /// Broadcasts to the channel that the current user is typing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have the required permissions.
    #[inline]
    pub async fn broadcast_typing(&self, http: impl AsRef<Http>) -> Result<()> {
        self.id.broadcast_typing(http).await
    }

    /// Creates an invite for the given channel.
    ///
    /// **Note**: Requires the [Create Instant Invite] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Create Instant Invite]: Permissions::CREATE_INSTANT_INVITE
    #[inline]
    pub async fn create_invite(
        &self,
        http: impl AsRef<Http>,
        builder: CreateInvite,
    ) -> Result<Invite> {
        self.id.create_invite(http, builder).await
    }

    /// Creates a [permission overwrite][`PermissionOverwrite`] for either a single [`Member`] or
    /// [`Role`] within the channel.
    ///
    /// Refer to the documentation for [`PermissionOverwrite`]s for more information.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [`Role`]: crate::model::guild::Role
    /// [Manage Channels]: Permissions::MANAGE_CHANNELS
    #[inline]
    pub async fn create_permission(
        &self,
        http: impl AsRef<Http>,
        target: PermissionOverwrite,
    ) -> Result<()> {
        self.id.create_permission(http, target).await
    }

    /// Deletes a [permission overwrite][`PermissionOverwrite`] from the channel.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: Permissions::MANAGE_CHANNELS
    #[inline]
    pub async fn delete_permission(
        &self,
        http: impl AsRef<Http>,
        permission_type: PermissionOverwriteType,
    ) -> Result<()> {
        self.id.delete_permission(http, permission_type).await
    }

    /// Deletes this channel, returning the channel on a successful deletion.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: Permissions::MANAGE_CHANNELS
    pub async fn delete(&self, http: impl AsRef<Http>) -> Result<GuildChannel> {
        let channel = self.id.delete(http).await?;
        channel.guild().ok_or(Error::Model(crate::model::ModelError::InvalidChannelType))
    }

    /// Edits the channel's settings, updating this value with the result.
    ///
    /// Refer to the documentation for [`EditChannel`] for a full list of methods.
    ///
    /// **Note**: Requires the [Manage Channels] permission. Modifying permissions via
    /// [`EditChannel::permissions`] also requires the [Manage Roles] permission.
    ///
    /// # Examples
    ///
    /// Change a voice channels name and bitrate:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::channel::GuildChannel;
    /// use accord::builder::EditChannel;
    ///
    /// # async fn run(http: &Http, mut channel: GuildChannel) -> accord::Result<()> {
    /// let builder = EditChannel::new().name("test").bitrate(86400);
    /// channel.edit(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission or if invalid data is given.
    ///
    /// [Manage Channels]: Permissions::MANAGE_CHANNELS
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditChannel) -> Result<()> {
        *self = self.id.edit(http, builder).await?;
        Ok(())
    }

    /// Gets messages from the channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    #[inline]
    pub async fn messages(
        &self,
        http: impl AsRef<Http>,
        builder: GetMessages,
    ) -> Result<Vec<Message>> {
        self.id.messages(http, builder).await
    }

    /// Returns a paginator over every message of the channel, newest first.
    #[inline]
    pub fn messages_iter<H: AsRef<Http> + Send + Sync>(
        &self,
        http: H,
    ) -> Paginator<MessagesIter<H>> {
        self.id.messages_iter(http)
    }

    /// Gets the list of [`Message`]s which are pinned to the channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    #[inline]
    pub async fn pins(&self, http: impl AsRef<Http>) -> Result<Vec<Message>> {
        self.id.pins(http).await
    }

    /// Sends a message with just the given message content in the channel.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content length is over the above limit.
    /// See [`ChannelId::send_message`] for more details.
    ///
    /// [`ModelError::MessageTooLong`]: crate::model::ModelError::MessageTooLong
    #[inline]
    pub async fn say(&self, http: impl AsRef<Http>, content: impl Into<String>) -> Result<Message> {
        self.id.say(http, content).await
    }

    /// Sends a message to the channel.
    ///
    /// # Errors
    ///
    /// See [`ChannelId::send_message`] for a list of possible errors, and their corresponding
    /// reasons.
    #[inline]
    pub async fn send_message(
        &self,
        http: impl AsRef<Http>,
        builder: CreateMessage,
    ) -> Result<Message> {
        self.id.send_message(http, builder).await
    }

    /// Calculates the permissions of a member in this channel, given the guild the channel
    /// belongs to.
    ///
    /// See [`Guild::user_permissions_in`].
    #[must_use]
    pub fn permissions_for_member(&self, guild: &Guild, member: &Member) -> Permissions {
        guild.user_permissions_in(self, member)
    }
}

impl fmt::Display for GuildChannel {
    /// Formats the channel, creating a mention of it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id.mention(), f)
    }
}

impl From<GuildChannel> for Channel {
    fn from(channel: GuildChannel) -> Self {
        Channel::Guild(channel)
    }
}

impl From<&GuildChannel> for ChannelId {
    /// Gets the Id of a guild channel.
    fn from(channel: &GuildChannel) -> ChannelId {
        channel.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};
    use crate::model::update::Update;

    #[test]
    fn update_keeps_untouched_fields() {
        let mut channel: GuildChannel = from_value(json!({
            "id": "7",
            "guild_id": "1",
            "type": 0,
            "name": "general",
            "position": 2,
            "topic": "chat",
            "nsfw": false,
        }))
        .unwrap();

        let fragment = match json!({"topic": null, "nsfw": true, "guild_id": "2"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(channel.update(&fragment), ["topic", "nsfw"]);
        assert_eq!(channel.topic, None);
        assert_eq!(channel.nsfw, Some(true));
        assert_eq!(channel.position, Some(2));
        assert!(channel.overwrites().is_empty());
        assert_eq!(channel.guild_id, GuildId::new(1));
        assert!(channel.is_text_based());
    }
}
