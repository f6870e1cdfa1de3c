//! Models relating to Discord channels.

use super::{Attachment, MessageReaction, ReactionType};
use crate::builder::{CreateMessage, EditMessage};
use crate::constants::MESSAGE_CODE_LIMIT;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId, WebhookId};
use crate::model::timestamp::Timestamp;
use crate::model::user::User;

/// A representation of a message over a guild's text channel, a group, or a private channel.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object) with some
/// [extra fields](https://discord.com/developers/docs/topics/gateway-events#message-create-message-create-extra-fields).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    pub id: MessageId,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: super::Channel
    pub channel_id: ChannelId,
    /// The Id of the [`Guild`] that the message was sent in. This value will only be present if
    /// this message was received over the gateway, therefore **do not use this to check if
    /// message is in DMs**, it is not a reliable method.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    pub guild_id: Option<GuildId>,
    /// The user that sent the message.
    pub author: User,
    /// The content of the message.
    pub content: String,
    /// Initial message creation timestamp, calculated from its Id.
    pub timestamp: Timestamp,
    /// The timestamp of the last time the message was updated, if it was.
    pub edited_timestamp: Option<Timestamp>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    ///
    /// In the client, this is done via the `/tts` slash command.
    pub tts: bool,
    /// Indicator of whether the message mentions everyone.
    pub mention_everyone: bool,
    /// Array of users mentioned in the message.
    pub mentions: Vec<User>,
    /// Array of [`Role`]s' Ids mentioned in the message.
    ///
    /// [`Role`]: crate::model::guild::Role
    pub mention_roles: Vec<RoleId>,
    /// An vector of the files attached to a message.
    pub attachments: Vec<Attachment>,
    /// A list of reactions to the message.
    pub reactions: Option<Vec<MessageReaction>>,
    /// Indicator of whether the message is pinned.
    pub pinned: bool,
    /// The Id of the webhook that sent this message, if one did.
    pub webhook_id: Option<WebhookId>,
    /// Indicator of the type of message this is, i.e. whether it is a regular message or a system
    /// message.
    #[serde(rename = "type")]
    pub kind: MessageType,
    /// Reference data sent with crossposted messages and replies.
    pub message_reference: Option<MessageReference>,
    /// Bit flags describing extra features of the message.
    pub flags: Option<MessageFlags>,
    /// The message that was replied to using this message.
    pub referenced_message: Option<Box<Message>>,
}

impl_update!(Message {
    "content" => content,
    "edited_timestamp" => edited_timestamp,
    "tts" => tts,
    "mention_everyone" => mention_everyone,
    "mentions" => mentions,
    "mention_roles" => mention_roles,
    "attachments" => attachments,
    "reactions" => reactions,
    "pinned" => pinned,
    "flags" => flags,
});

impl Message {
    /// Crossposts this message.
    ///
    /// Crossposting a message makes it appear in the channels following the news channel this
    /// message was sent in.
    ///
    /// **Note**: Requires the [Send Messages] permission. Crossposting someone else's message
    /// also requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if the message was
    /// already crossposted.
    ///
    /// [Send Messages]: crate::model::Permissions::SEND_MESSAGES
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn crosspost(&self, http: impl AsRef<Http>) -> Result<Message> {
        self.channel_id.crosspost(http, self.id).await
    }

    /// Deletes the message.
    ///
    /// **Note**: The logged in user must either be the author of the message or have the [Manage
    /// Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete(&self, http: impl AsRef<Http>) -> Result<()> {
        self.channel_id.delete_message(http, self.id).await
    }

    /// Deletes all of the [`Reaction`]s associated with the message.
    ///
    /// **Note**: Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [`Reaction`]: MessageReaction
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete_reactions(&self, http: impl AsRef<Http>) -> Result<()> {
        http.as_ref().delete_message_reactions(self.channel_id, self.id).await
    }

    /// Edits this message, replacing the original content with new content.
    ///
    /// Message editing preserves all unchanged message data, with some exceptions for embeds and
    /// attachments.
    ///
    /// **Note**: You can only edit your own messages.
    ///
    /// # Examples
    ///
    /// Edit a message with new content:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::channel::Message;
    /// use accord::builder::EditMessage;
    ///
    /// # async fn run(http: &Http, mut message: Message) -> accord::Result<()> {
    /// let builder = EditMessage::new().content("new content");
    /// message.edit(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the new content is over the limit, or
    /// [`Error::Http`] if the message was not sent by the current user.
    ///
    /// [`ModelError::MessageTooLong`]: crate::model::ModelError::MessageTooLong
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditMessage) -> Result<()> {
        *self = self.channel_id.edit_message(http, self.id, builder).await?;
        Ok(())
    }

    /// Returns a link referencing this message. When clicked, users will jump to the message.
    /// The link will be valid for messages in either private channels or guilds.
    #[must_use]
    pub fn link(&self) -> String {
        match self.guild_id {
            Some(guild_id) => {
                format!("https://discord.com/channels/{guild_id}/{}/{}", self.channel_id, self.id)
            },
            None => format!("https://discord.com/channels/@me/{}/{}", self.channel_id, self.id),
        }
    }

    /// True if message was sent using direct messages.
    ///
    /// **Only use this for messages from the gateway (event handler)!** Not for returned Message
    /// objects from HTTP requests, like [`ChannelId::send_message`], because [`Self::guild_id`]
    /// is never set for those, which this method relies on.
    ///
    /// [`ChannelId::send_message`]: crate::model::id::ChannelId::send_message
    #[inline]
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.guild_id.is_none()
    }

    /// Checks whether the message was sent by the given user.
    #[must_use]
    pub fn is_own(&self, current_user_id: UserId) -> bool {
        self.author.id == current_user_id
    }

    /// Checks whether the message mentions the given user.
    #[must_use]
    pub fn mentions_user_id(&self, id: UserId) -> bool {
        self.mentions.iter().any(|mentioned_user| mentioned_user.id == id)
    }

    /// Checks the length of a message to ensure that it is within Discord's maximum length limit.
    ///
    /// Returns [`None`] if the message is within the limit, otherwise returns [`Some`] with an
    /// inner value of how many unicode code points the message is over.
    #[must_use]
    pub fn overflow_length(content: &str) -> Option<usize> {
        let count = content.chars().count();

        count.checked_sub(MESSAGE_CODE_LIMIT).filter(|over| *over > 0)
    }

    /// Pins this message to its channel.
    ///
    /// **Note**: Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn pin(&self, http: impl AsRef<Http>) -> Result<()> {
        self.channel_id.pin(http, self.id).await
    }

    /// Unpins the message from its channel.
    ///
    /// **Note**: Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn unpin(&self, http: impl AsRef<Http>) -> Result<()> {
        self.channel_id.unpin(http, self.id).await
    }

    /// React to the message with a custom [`Emoji`] or unicode character.
    ///
    /// **Note**: Requires the [Add Reactions] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [`Emoji`]: crate::model::guild::Emoji
    /// [Add Reactions]: crate::model::Permissions::ADD_REACTIONS
    pub async fn react(
        &self,
        http: impl AsRef<Http>,
        reaction_type: impl Into<ReactionType>,
    ) -> Result<()> {
        self.channel_id.create_reaction(http, self.id, reaction_type).await
    }

    /// Gets the list of [`User`]s who have reacted to this message with a certain [`ReactionType`].
    ///
    /// The default `limit` is `50` - specify otherwise to receive a different maximum number of
    /// users. The maximum that may be retrieved at a time is `100`, if a greater number is
    /// provided then it is automatically reduced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    pub async fn reaction_users(
        &self,
        http: impl AsRef<Http>,
        reaction_type: impl Into<ReactionType>,
        limit: Option<u8>,
        after: Option<UserId>,
    ) -> Result<Vec<User>> {
        self.channel_id.reaction_users(http, self.id, reaction_type, limit, after).await
    }

    /// Uses Discord's inline reply to a user without pinging them.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content of the message is over the above
    /// limit, by the number of unicode code points.
    ///
    /// [`ModelError::MessageTooLong`]: crate::model::ModelError::MessageTooLong
    pub async fn reply(
        &self,
        http: impl AsRef<Http>,
        content: impl Into<String>,
    ) -> Result<Message> {
        let builder = CreateMessage::new().content(content).reference_message(self);
        self.channel_id.send_message(http, builder).await
    }
}

impl AsRef<MessageId> for Message {
    fn as_ref(&self) -> &MessageId {
        &self.id
    }
}

impl From<Message> for MessageId {
    /// Gets the Id of a [`Message`].
    fn from(message: Message) -> MessageId {
        message.id
    }
}

impl From<&Message> for MessageId {
    /// Gets the Id of a [`Message`].
    fn from(message: &Message) -> MessageId {
        message.id
    }
}

enum_number! {
    /// Differentiates between regular and different types of system messages.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum MessageType {
        /// A regular message.
        Regular = 0,
        /// An indicator that a recipient was added by the author.
        GroupRecipientAddition = 1,
        /// An indicator that a recipient was removed by the author.
        GroupRecipientRemoval = 2,
        /// An indicator that a call was started by the author.
        GroupCallCreation = 3,
        /// An indicator that the group name was modified by the author.
        GroupNameUpdate = 4,
        /// An indicator that the group icon was modified by the author.
        GroupIconUpdate = 5,
        /// An indicator that a message was pinned by the author.
        PinsAdd = 6,
        /// An indicator that a member joined the guild.
        MemberJoin = 7,
        /// An indicator that someone has boosted the guild.
        NitroBoost = 8,
        /// An indicator that the guild has reached nitro tier 1
        NitroTier1 = 9,
        /// An indicator that the guild has reached nitro tier 2
        NitroTier2 = 10,
        /// An indicator that the guild has reached nitro tier 3
        NitroTier3 = 11,
        /// An indicator that the channel is following a news channel.
        ChannelFollowAdd = 12,
        /// An indicator that the guild is disqualified for Discovery Feature
        GuildDiscoveryDisqualified = 14,
        /// An indicator that the guild is requalified for Discovery Feature
        GuildDiscoveryRequalified = 15,
        /// The first warning before guild discovery removal.
        GuildDiscoveryGracePeriodInitialWarning = 16,
        /// The last warning before guild discovery removal.
        GuildDiscoveryGracePeriodFinalWarning = 17,
        /// Message sent to inform users that a thread was created.
        ThreadCreated = 18,
        /// A message reply.
        InlineReply = 19,
        /// A slash command.
        ChatInputCommand = 20,
        /// A thread start message.
        ThreadStarterMessage = 21,
        /// Server setup tips.
        GuildInviteReminder = 22,
        /// A context menu command.
        ContextMenuCommand = 23,
        /// A message from an auto moderation action.
        AutoModAction = 24,
        _ => Unknown(u8),
    }
}

bitflags_int! {
    /// Describes extra features of the message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags).
    #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct MessageFlags: u64 {
        /// This message has been published to subscribed channels (via Channel Following).
        const CROSSPOSTED = 1 << 0;
        /// This message originated from a message in another channel (via Channel Following).
        const IS_CROSSPOST = 1 << 1;
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// The source message for this crosspost has been deleted (via Channel Following).
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        /// This message came from the urgent message system.
        const URGENT = 1 << 4;
        /// This message has an associated thread, with the same id as the message.
        const HAS_THREAD = 1 << 5;
        /// This message is only visible to the user who invoked the Interaction.
        const EPHEMERAL = 1 << 6;
        /// This message is an Interaction Response and the bot is "thinking".
        const LOADING = 1 << 7;
        /// This message failed to mention some roles and add their members to the thread.
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
        /// This message will not trigger push and desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
        /// This message is a voice message.
        const IS_VOICE_MESSAGE = 1 << 13;
    }
}

/// Reference data sent with crossposted messages and replies.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-reference-object-message-reference-structure).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct MessageReference {
    /// ID of the originating message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    /// ID of the originating message's channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    /// ID of the originating message's guild.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// When sending, whether to error if the referenced message doesn't exist instead of sending
    /// as a normal (non-reply) message, default true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_if_not_exists: Option<bool>,
}

impl From<&Message> for MessageReference {
    fn from(m: &Message) -> Self {
        Self {
            message_id: Some(m.id),
            channel_id: Some(m.channel_id),
            guild_id: m.guild_id,
            fail_if_not_exists: None,
        }
    }
}

impl From<(ChannelId, MessageId)> for MessageReference {
    fn from(pair: (ChannelId, MessageId)) -> Self {
        Self {
            message_id: Some(pair.1),
            channel_id: Some(pair.0),
            guild_id: None,
            fail_if_not_exists: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};
    use crate::model::update::Update;

    fn message() -> Message {
        from_value(json!({
            "id": "300",
            "channel_id": "20",
            "guild_id": "1",
            "author": {"id": "5", "username": "author"},
            "content": "hello",
            "timestamp": "2022-01-01T00:00:00.000000+00:00",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "pinned": false,
            "type": 19,
            "flags": 4,
        }))
        .unwrap()
    }

    #[test]
    fn snapshot_defaults() {
        let message = message();

        assert_eq!(message.kind, MessageType::InlineReply);
        assert_eq!(message.flags, Some(MessageFlags::SUPPRESS_EMBEDS));
        assert!(message.attachments.is_empty());
        assert!(!message.pinned);
        assert_eq!(message.link(), "https://discord.com/channels/1/20/300");
        assert!(message.is_own(UserId::new(5)));
    }

    #[test]
    fn update_only_touches_named_fields() {
        let mut message = message();
        let fragment = match json!({
            "id": "300",
            "channel_id": "20",
            "content": "edited",
            "edited_timestamp": "2022-01-01T00:05:00.000000+00:00",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(message.update(&fragment), ["content", "edited_timestamp"]);
        assert_eq!(message.content, "edited");
        assert!(message.edited_timestamp.is_some());
        assert_eq!(message.author.name, "author");
    }

    #[test]
    fn overflow_length() {
        assert_eq!(Message::overflow_length("a"), None);
        assert_eq!(Message::overflow_length(&"a".repeat(2003)), Some(3));
    }
}
