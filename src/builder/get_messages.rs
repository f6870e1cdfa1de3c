use tracing::warn;

use crate::http::MessagePagination;
use crate::model::id::MessageId;

/// Builds a request to the API to retrieve messages.
///
/// This accepts 2 types of parameters. The first type filters messages based on Id, and is set by
/// one of the following:
///
/// - [`Self::after`]
/// - [`Self::around`]
/// - [`Self::before`]
///
/// These are mutually exclusive, and override each other if called sequentially. If one is not
/// provided, messages are simply sorted by most recent.
///
/// The other parameter specifies the number of messages to retrieve. This is _optional_, and
/// defaults to 50 if not specified.
///
/// See [`ChannelId::messages`] for more examples.
///
/// # Examples
///
/// Creating a [`GetMessages`] builder to retrieve the first 25 messages after the message with an
/// Id of `158339864557912064`:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// use accord::builder::GetMessages;
/// use accord::model::id::{ChannelId, MessageId};
///
/// # async fn run(http: &Http) -> accord::Result<()> {
/// let builder = GetMessages::new().after(MessageId::new(158339864557912064)).limit(25);
/// let _messages = ChannelId::new(81384788765712384).messages(http, builder).await?;
/// # Ok(())
/// # }
/// ```
///
/// [`ChannelId::messages`]: crate::model::id::ChannelId::messages
/// [Discord docs](https://discord.com/developers/docs/resources/channel#get-channel-messages)
#[derive(Clone, Copy, Debug, Default)]
#[must_use]
pub struct GetMessages {
    pub(crate) search_filter: Option<MessagePagination>,
    pub(crate) limit: Option<u8>,
}

impl GetMessages {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Indicates to retrieve the messages after a specific message, given its Id.
    pub fn after(mut self, message_id: impl Into<MessageId>) -> Self {
        self.search_filter = Some(MessagePagination::After(message_id.into()));
        self
    }

    /// Indicates to retrieve the messages _around_ a specific message, in other words in either
    /// direction from the message in time.
    pub fn around(mut self, message_id: impl Into<MessageId>) -> Self {
        self.search_filter = Some(MessagePagination::Around(message_id.into()));
        self
    }

    /// Indicates to retrieve the messages before a specific message, given its Id.
    pub fn before(mut self, message_id: impl Into<MessageId>) -> Self {
        self.search_filter = Some(MessagePagination::Before(message_id.into()));
        self
    }

    /// The maximum number of messages to retrieve for the query.
    ///
    /// If this is not specified, a default value of 50 is used.
    ///
    /// **Note**: This field is capped to 100 messages due to a Discord limitation. If an amount
    /// larger than 100 is supplied, it will be truncated.
    pub fn limit(mut self, limit: u8) -> Self {
        if limit > 100 {
            warn!("GetMessages limit {limit} exceeds the maximum of 100, truncating");
        }

        self.limit = Some(limit.min(100));
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn last_filter_wins_and_limit_is_capped() {
        let builder =
            GetMessages::new().before(MessageId::new(5)).after(MessageId::new(9)).limit(250);

        assert!(matches!(
            builder.search_filter,
            Some(MessagePagination::After(id)) if id.get() == 9
        ));
        assert_eq!(builder.limit, Some(100));
    }
}
