use std::fmt;

use super::{Channel, ChannelType, Message};
use crate::builder::{CreateMessage, GetMessages};
use crate::http::{Http, MessagesIter, Paginator};
use crate::internal::prelude::*;
use crate::model::id::{ChannelId, MessageId};
use crate::model::timestamp::Timestamp;
use crate::model::user::User;

/// A Direct Message text channel with another user, or a group DM.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct PrivateChannel {
    /// The unique Id of the private channel.
    ///
    /// Can be used to calculate the first message's creation date.
    pub id: ChannelId,
    /// The Id of the last message sent.
    pub last_message_id: Option<MessageId>,
    /// Timestamp of the last time a [`Message`] was pinned.
    pub last_pin_timestamp: Option<Timestamp>,
    /// Indicator of the type of channel this is.
    ///
    /// This should always be [`ChannelType::Private`] or [`ChannelType::GroupDm`].
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The recipients of the channel, excluding the current user.
    pub recipients: Option<Vec<User>>,
    /// The name of a group DM.
    pub name: Option<String>,
}

impl PrivateChannel {
    /// The user on the other end of a one to one Direct Message.
    #[must_use]
    pub fn recipient(&self) -> Option<&User> {
        self.recipients.as_ref()?.first()
    }

    /// Broadcasts that the current user is typing to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    pub async fn broadcast_typing(&self, http: impl AsRef<Http>) -> Result<()> {
        self.id.broadcast_typing(http).await
    }

    /// Deletes the channel. This does not delete the contents of the channel, and is equivalent
    /// to closing a private channel on the client, which can be re-opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    pub async fn delete(&self, http: impl AsRef<Http>) -> Result<Channel> {
        self.id.delete(http).await
    }

    /// Gets messages from the channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request fails.
    pub async fn messages(
        &self,
        http: impl AsRef<Http>,
        builder: GetMessages,
    ) -> Result<Vec<Message>> {
        self.id.messages(http, builder).await
    }

    /// Returns a paginator over every message of the channel, newest first.
    pub fn messages_iter<H>(&self, http: H) -> Paginator<MessagesIter<H>>
    where
        H: AsRef<Http> + Send + Sync,
    {
        self.id.messages_iter(http)
    }

    /// Returns "DM with $username#discriminator", or the group's name.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        match self.recipient() {
            Some(user) => format!("DM with {}", user.tag()),
            None => "Empty DM".to_string(),
        }
    }

    /// Sends a message with just the given message content in the channel.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessageTooLong`] if the content length is over the limit.
    ///
    /// [`ModelError::MessageTooLong`]: crate::model::ModelError::MessageTooLong
    pub async fn say(&self, http: impl AsRef<Http>, content: impl Into<String>) -> Result<Message> {
        self.id.say(http, content).await
    }

    /// Sends a message to the channel.
    ///
    /// # Errors
    ///
    /// See [`ChannelId::send_message`].
    pub async fn send_message(
        &self,
        http: impl AsRef<Http>,
        builder: CreateMessage,
    ) -> Result<Message> {
        self.id.send_message(http, builder).await
    }
}

impl fmt::Display for PrivateChannel {
    /// Formats the private channel, displaying the recipient's username.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<PrivateChannel> for Channel {
    fn from(channel: PrivateChannel) -> Self {
        Channel::Private(channel)
    }
}
