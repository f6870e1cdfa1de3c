use crate::internal::prelude::*;
use crate::model::error::check_content_length;
use crate::model::prelude::*;

/// A builder to specify the fields to edit in an existing message.
///
/// # Examples
///
/// Editing the content of a [`Message`] to `"hello"`:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::channel::Message;
/// use accord::builder::EditMessage;
///
/// # async fn run(http: &Http, mut message: Message) -> accord::Result<()> {
/// message.edit(http, EditMessage::new().content("hello")).await?;
/// # Ok(())
/// # }
/// ```
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#edit-message)
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<MessageFlags>,
}

impl EditMessage {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_length(&self) -> Result<()> {
        if let Some(Some(content)) = &self.content {
            check_content_length(content)?;
        }

        Ok(())
    }

    /// Set the content of the message.
    ///
    /// **Note**: Message contents must be under 2000 unicode code points.
    #[inline]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    /// Removes the content of the message. Only valid for messages with attachments.
    pub fn remove_content(mut self) -> Self {
        self.content = Some(None);
        self
    }

    /// Add or remove embeds from the message.
    pub fn suppress_embeds(mut self, suppress: bool) -> Self {
        let mut flags = self.flags.unwrap_or_else(MessageFlags::empty);
        flags.set(MessageFlags::SUPPRESS_EMBEDS, suppress);

        self.flags = Some(flags);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn unset_fields_are_left_alone() {
        assert_eq!(to_value(&EditMessage::new()).unwrap(), json!({}));
        assert_eq!(
            to_value(&EditMessage::new().remove_content()).unwrap(),
            json!({"content": null})
        );
        assert_eq!(
            to_value(&EditMessage::new().content("x").suppress_embeds(true)).unwrap(),
            json!({"content": "x", "flags": 4})
        );
    }
}
