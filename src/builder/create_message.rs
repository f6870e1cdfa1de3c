use crate::internal::prelude::*;
use crate::model::error::check_content_length;
use crate::model::prelude::*;

/// A builder to specify the contents of an send message request, primarily meant for use
/// through [`ChannelId::send_message`].
///
/// There are a number of fields that can be set: the content, whether the message is
/// text-to-speech, the message it replies to and a nonce.
///
/// # Examples
///
/// Sending a message reply to another message:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::channel::Message;
/// use accord::builder::CreateMessage;
///
/// # async fn run(http: &Http, message: &Message) -> accord::Result<()> {
/// let builder = CreateMessage::new().content("test").reference_message(message);
/// message.channel_id.send_message(http, builder).await?;
/// # Ok(())
/// # }
/// ```
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#create-message)
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nonce: Option<String>,
    tts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_reference: Option<MessageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<MessageFlags>,
}

impl CreateMessage {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_length(&self) -> Result<()> {
        if let Some(content) = &self.content {
            check_content_length(content)?;
        }

        Ok(())
    }

    /// Set the content of the message.
    ///
    /// **Note**: Message contents must be under 2000 unicode code points.
    #[inline]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set whether the message is text-to-speech.
    ///
    /// Think carefully before setting this to `true`.
    ///
    /// Defaults to `false`.
    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Set the reference message this message is a reply to.
    pub fn reference_message(mut self, reference: impl Into<MessageReference>) -> Self {
        self.message_reference = Some(reference.into());
        self
    }

    /// Can be used to verify a message was sent (up to 25 characters). The value is echoed back
    /// in the message create event.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Message flags to send.
    ///
    /// Only [`MessageFlags::SUPPRESS_EMBEDS`] and [`MessageFlags::SUPPRESS_NOTIFICATIONS`] can be
    /// set.
    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags = Some(flags);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{json, to_value};
    use crate::model::ModelError;

    #[test]
    fn replies_carry_a_reference() {
        let builder = CreateMessage::new()
            .content("pong")
            .reference_message((ChannelId::new(1), MessageId::new(2)));

        assert_eq!(
            to_value(&builder).unwrap(),
            json!({
                "content": "pong",
                "tts": false,
                "message_reference": {"message_id": "2", "channel_id": "1"},
            })
        );
    }

    #[test]
    fn overlong_content_is_rejected_locally() {
        let builder = CreateMessage::new().content("a".repeat(2001));

        assert!(matches!(
            builder.check_length(),
            Err(Error::Model(ModelError::MessageTooLong(1)))
        ));
        assert!(CreateMessage::new().content("a".repeat(2000)).check_length().is_ok());
    }
}
