use tracing::warn;

use super::{
    Channel,
    GuildChannel,
    Message,
    PermissionOverwrite,
    PermissionOverwriteType,
    ReactionType,
};
use crate::builder::{CreateInvite, CreateMessage, EditChannel, EditMessage, GetMessages};
use crate::constants::{BULK_DELETE_MAX, BULK_DELETE_MIN};
use crate::http::{Http, MessagesIter, Paginator};
use crate::internal::prelude::*;
use crate::json::json;
use crate::model::id::{ChannelId, MessageId, UserId};
use crate::model::invite::Invite;
use crate::model::user::User;
use crate::model::ModelError;

impl ChannelId {
    /// Broadcasts that the current user is typing to a channel for the next 5 seconds.
    ///
    /// After 5 seconds, another request must be made to continue broadcasting that the current
    /// user is typing.
    ///
    /// This should rarely be used for bots, and should likely only be used for signifying that a
    /// long-running command is still being executed.
    ///
    /// **Note**: Requires the [Send Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to send messages to this
    /// channel.
    ///
    /// [Send Messages]: crate::model::Permissions::SEND_MESSAGES
    pub async fn broadcast_typing(self, http: impl AsRef<Http>) -> Result<()> {
        http.as_ref().broadcast_typing(self).await
    }

    /// Creates an invite for the given channel.
    ///
    /// **Note**: Requires the [Create Instant Invite] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Create Instant Invite]: crate::model::Permissions::CREATE_INSTANT_INVITE
    pub async fn create_invite(
        self,
        http: impl AsRef<Http>,
        builder: CreateInvite,
    ) -> Result<Invite> {
        http.as_ref().create_invite(self, &builder, builder.audit_log_reason.as_deref()).await
    }

    /// Creates a [permission overwrite][`PermissionOverwrite`] for either a single [`Member`] or
    /// [`Role`] within a [`Channel`].
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if an invalid value is
    /// set.
    ///
    /// [`Member`]: crate::model::guild::Member
    /// [`Role`]: crate::model::guild::Role
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn create_permission(
        self,
        http: impl AsRef<Http>,
        target: PermissionOverwrite,
    ) -> Result<()> {
        let (id, kind) = target.kind.target();
        let map = json!({
            "allow": target.allow,
            "deny": target.deny,
            "type": kind,
        });

        http.as_ref().create_permission(self, id, &map, None).await
    }

    /// React to a [`Message`] with a custom [`Emoji`] or unicode character.
    ///
    /// **Note**: Requires the [Add Reactions] permission, _if_ the current user is the first user
    /// to perform a react with a certain emoji.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [`Emoji`]: crate::model::guild::Emoji
    /// [Add Reactions]: crate::model::Permissions::ADD_REACTIONS
    pub async fn create_reaction(
        self,
        http: impl AsRef<Http>,
        message_id: MessageId,
        reaction_type: impl Into<ReactionType>,
    ) -> Result<()> {
        http.as_ref().create_reaction(self, message_id, &reaction_type.into()).await
    }

    /// Crossposts a [`Message`] of a news channel to its followers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if the message was
    /// already crossposted.
    pub async fn crosspost(self, http: impl AsRef<Http>, message_id: MessageId) -> Result<Message> {
        http.as_ref().crosspost_message(self, message_id).await
    }

    /// Deletes this channel, returning the channel on a successful deletion.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn delete(self, http: impl AsRef<Http>) -> Result<Channel> {
        http.as_ref().delete_channel(self, None).await
    }

    /// Deletes a [`Message`] given its Id.
    ///
    /// Refer to [`Message::delete`] for more information.
    ///
    /// Requires the [Manage Messages] permission, if the current user is not the author of the
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to delete the message.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete_message(self, http: impl AsRef<Http>, message_id: MessageId) -> Result<()> {
        http.as_ref().delete_message(self, message_id, None).await
    }

    /// Deletes messages by Ids from the given vector in the given channel.
    ///
    /// The minimum amount of messages is 2 and the maximum amount is 100; a single Id falls back
    /// to a regular delete.
    ///
    /// Requires the [Manage Messages] permission.
    ///
    /// **Note**: Messages that are older than 2 weeks can't be deleted using this method.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BulkDeleteAmount`] if an attempt was made to delete 0 or more than
    /// 100 messages.
    ///
    /// Also will return [`Error::Http`] if the current user lacks permission to delete messages.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete_messages(
        self,
        http: impl AsRef<Http>,
        message_ids: impl IntoIterator<Item = MessageId>,
    ) -> Result<()> {
        let ids: Vec<MessageId> = message_ids.into_iter().collect();

        match ids.len() {
            0 => Err(Error::Model(ModelError::BulkDeleteAmount)),
            1 => self.delete_message(http, ids[0]).await,
            len if (BULK_DELETE_MIN..=BULK_DELETE_MAX).contains(&len) => {
                let map = json!({ "messages": ids });

                http.as_ref().delete_messages(self, &map, None).await
            },
            _ => Err(Error::Model(ModelError::BulkDeleteAmount)),
        }
    }

    /// Deletes all permission overrides in the channel from a member or role.
    ///
    /// **Note**: Requires the [Manage Channel] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channel]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn delete_permission(
        self,
        http: impl AsRef<Http>,
        permission_type: PermissionOverwriteType,
    ) -> Result<()> {
        let (id, _) = permission_type.target();

        http.as_ref().delete_permission(self, id, None).await
    }

    /// Deletes the given [`Reaction`] from the channel.
    ///
    /// Passing [`None`] as the user deletes the current user's reaction.
    ///
    /// **Note**: Requires the [Manage Messages] permission, _if_ the current user did not perform
    /// the reaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user did not perform the reaction, or lacks
    /// permission.
    ///
    /// [`Reaction`]: super::MessageReaction
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete_reaction(
        self,
        http: impl AsRef<Http>,
        message_id: MessageId,
        user_id: Option<UserId>,
        reaction_type: impl Into<ReactionType>,
    ) -> Result<()> {
        let http = http.as_ref();
        let reaction_type = reaction_type.into();

        match user_id {
            Some(user_id) => http.delete_reaction(self, message_id, user_id, &reaction_type).await,
            None => http.delete_reaction_me(self, message_id, &reaction_type).await,
        }
    }

    /// Deletes all of the reactions of a given message.
    ///
    /// **Note**: Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn delete_reactions(
        self,
        http: impl AsRef<Http>,
        message_id: MessageId,
    ) -> Result<()> {
        http.as_ref().delete_message_reactions(self, message_id).await
    }

    /// Edits a channel's settings.
    ///
    /// Refer to the documentation for [`EditChannel`] for a full list of methods.
    ///
    /// **Note**: Requires the [Manage Channels] permission. Modifying permissions via
    /// [`EditChannel::permissions`] also requires the [Manage Roles] permission.
    ///
    /// # Examples
    ///
    /// Change a voice channel's name and bitrate:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::id::ChannelId;
    /// use accord::builder::EditChannel;
    ///
    /// # async fn run(http: &Http) -> accord::Result<()> {
    /// let builder = EditChannel::new().name("test").bitrate(64000);
    /// ChannelId::new(7).edit(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission or if invalid data is given.
    ///
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn edit(self, http: impl AsRef<Http>, builder: EditChannel) -> Result<GuildChannel> {
        http.as_ref().edit_channel(self, &builder, builder.audit_log_reason.as_deref()).await
    }

    /// Edits a [`Message`] in the channel given its Id.
    ///
    /// Message editing preserves all unchanged message data, with some exceptions for embeds and
    /// attachments.
    ///
    /// **Note**: You can only edit your own messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content of the message is over the
    /// [`MESSAGE_CODE_LIMIT`], or [`Error::Http`] if the current user is not the author.
    ///
    /// [`MESSAGE_CODE_LIMIT`]: crate::constants::MESSAGE_CODE_LIMIT
    pub async fn edit_message(
        self,
        http: impl AsRef<Http>,
        message_id: MessageId,
        builder: EditMessage,
    ) -> Result<Message> {
        builder.check_length()?;

        http.as_ref().edit_message(self, message_id, &builder).await
    }

    /// Gets all of the channel's invites.
    ///
    /// Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn invites(self, http: impl AsRef<Http>) -> Result<Vec<Invite>> {
        http.as_ref().get_channel_invites(self).await
    }

    /// Gets a message from the channel.
    ///
    /// Requires the [Read Message History] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if a message with the
    /// given Id does not exist in the channel.
    ///
    /// [Read Message History]: crate::model::Permissions::READ_MESSAGE_HISTORY
    pub async fn message(self, http: impl AsRef<Http>, message_id: MessageId) -> Result<Message> {
        http.as_ref().get_message(self, message_id).await
    }

    /// Gets messages from the channel.
    ///
    /// **Note**: If the user does not have the [Read Message History] permission, returns an
    /// empty [`Vec`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::id::{ChannelId, MessageId};
    /// use accord::builder::GetMessages;
    ///
    /// # async fn run(http: &Http) -> accord::Result<()> {
    /// let builder = GetMessages::new().before(MessageId::new(158339864557912064)).limit(25);
    /// let _messages = ChannelId::new(7).messages(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Read Message History]: crate::model::Permissions::READ_MESSAGE_HISTORY
    pub async fn messages(
        self,
        http: impl AsRef<Http>,
        builder: GetMessages,
    ) -> Result<Vec<Message>> {
        http.as_ref().get_messages(self, builder.search_filter, builder.limit).await
    }

    /// Returns a paginator over every message of the channel, from the newest to the oldest,
    /// requesting 100 messages per page.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::id::ChannelId;
    /// use futures::StreamExt;
    ///
    /// # async fn run(http: &Http) -> accord::Result<()> {
    /// let mut messages = ChannelId::new(7).messages_iter(http).stream();
    /// while let Some(message) = messages.next().await {
    ///     let message = message?;
    ///     println!("{} said {}", message.author.name, message.content);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn messages_iter<H: AsRef<Http> + Send + Sync>(
        self,
        http: H,
    ) -> Paginator<MessagesIter<H>> {
        Paginator::new(MessagesIter::new(http, self))
    }

    /// Pins a [`Message`] to the channel.
    ///
    /// **Note**: Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if the channel has too
    /// many pinned messages.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn pin(self, http: impl AsRef<Http>, message_id: MessageId) -> Result<()> {
        http.as_ref().pin_message(self, message_id, None).await
    }

    /// Gets the list of [`Message`]s which are pinned to the channel.
    ///
    /// **Note**: Returns an empty [`Vec`] if the current user does not have the [Read Message
    /// History] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to view the channel.
    ///
    /// [Read Message History]: crate::model::Permissions::READ_MESSAGE_HISTORY
    pub async fn pins(self, http: impl AsRef<Http>) -> Result<Vec<Message>> {
        http.as_ref().get_pins(self).await
    }

    /// Gets the list of [`User`]s who have reacted to a [`Message`] with a certain
    /// [`ReactionType`].
    ///
    /// The default `limit` is `50` - specify otherwise to receive a different maximum number of
    /// users. The maximum that may be retrieve at a time is `100`, if a greater number is provided
    /// then it is automatically reduced.
    ///
    /// The optional `after` attribute is to retrieve the users after a certain user. This is
    /// useful for pagination.
    ///
    /// **Note**: Requires the [Read Message History] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to read messages in the
    /// channel.
    ///
    /// [Read Message History]: crate::model::Permissions::READ_MESSAGE_HISTORY
    pub async fn reaction_users(
        self,
        http: impl AsRef<Http>,
        message_id: MessageId,
        reaction_type: impl Into<ReactionType>,
        limit: Option<u8>,
        after: Option<UserId>,
    ) -> Result<Vec<User>> {
        let mut limit = limit.unwrap_or(50);

        if limit > 100 {
            limit = 100;
            warn!("Reaction users limit clamped to 100! (API Restriction)");
        }

        http.as_ref()
            .get_reaction_users(self, message_id, &reaction_type.into(), limit, after)
            .await
    }

    /// Sends a message with just the given message content in the channel.
    ///
    /// **Note**: Message content must be under 2000 unicode code points.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content length is over the above limit.
    /// See [`Self::send_message`] for more details.
    pub async fn say(self, http: impl AsRef<Http>, content: impl Into<String>) -> Result<Message> {
        let builder = CreateMessage::new().content(content);
        self.send_message(http, builder).await
    }

    /// Sends a message to the channel.
    ///
    /// Refer to the documentation for [`CreateMessage`] for information regarding content
    /// restrictions and requirements.
    ///
    /// **Note**: Requires the [Send Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content of the message is over the above
    /// limit, by the number of unicode code points.
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to send a message in this
    /// channel.
    ///
    /// [Send Messages]: crate::model::Permissions::SEND_MESSAGES
    pub async fn send_message(
        self,
        http: impl AsRef<Http>,
        builder: CreateMessage,
    ) -> Result<Message> {
        builder.check_length()?;

        http.as_ref().send_message(self, &builder).await
    }

    /// Attempts to find a [`Channel`] by its Id over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the channel retrieval request failed.
    pub async fn to_channel(self, http: impl AsRef<Http>) -> Result<Channel> {
        http.as_ref().get_channel(self).await
    }

    /// Unpins a [`Message`] in the channel given by its Id.
    ///
    /// Requires the [Manage Messages] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Messages]: crate::model::Permissions::MANAGE_MESSAGES
    pub async fn unpin(self, http: impl AsRef<Http>, message_id: MessageId) -> Result<()> {
        http.as_ref().unpin_message(self, message_id, None).await
    }
}

impl From<Channel> for ChannelId {
    /// Gets the Id of a [`Channel`].
    fn from(channel: Channel) -> ChannelId {
        channel.id()
    }
}

impl From<&Channel> for ChannelId {
    /// Gets the Id of a [`Channel`].
    fn from(channel: &Channel) -> ChannelId {
        channel.id()
    }
}
