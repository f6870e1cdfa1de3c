use crate::internal::prelude::*;
use crate::model::prelude::*;

/// A builder to edit a [`GuildChannel`] for use via [`GuildChannel::edit`].
///
/// # Examples
///
/// Edit a channel, providing a new name and topic:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::channel::GuildChannel;
/// use accord::builder::EditChannel;
///
/// # async fn run(http: &Http, mut channel: GuildChannel) -> accord::Result<()> {
/// let builder = EditChannel::new().name("new name").topic(Some("a test topic".into()));
/// channel.edit(http, builder).await?;
/// # Ok(())
/// # }
/// ```
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#modify-channel-json-params-guild-channel).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    kind: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate_limit_per_user: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission_overwrites: Option<Vec<PermissionOverwrite>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<Option<ChannelId>>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl EditChannel {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The bitrate of the channel in bits.
    ///
    /// This is for [voice] channels only.
    ///
    /// [voice]: ChannelType::Voice
    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    /// The camera video quality mode of the channel, or the type of a text channel: only
    /// conversion between [text] and [news] is supported.
    ///
    /// [text]: ChannelType::Text
    /// [news]: ChannelType::News
    pub fn kind(mut self, kind: ChannelType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The name of the channel.
    ///
    /// Must be between 2 and 100 characters long.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The position of the channel in the channel list.
    pub fn position(mut self, position: u16) -> Self {
        self.position = Some(position);
        self
    }

    /// The topic of the channel. Pass [`None`] to clear it.
    ///
    /// **Note**: Must be between 0 and 1024 characters long.
    ///
    /// This is for [text] channels only.
    ///
    /// [text]: ChannelType::Text
    pub fn topic(mut self, topic: Option<String>) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Is the channel inappropriate for work?
    ///
    /// This is for [text] channels only.
    ///
    /// [text]: ChannelType::Text
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    /// The number of users that may be in the channel simultaneously.
    ///
    /// This is for [voice] channels only.
    ///
    /// [voice]: ChannelType::Voice
    pub fn user_limit(mut self, user_limit: u32) -> Self {
        self.user_limit = Some(user_limit);
        self
    }

    /// The parent category of the channel. Pass [`None`] to move the channel out of its
    /// category.
    ///
    /// This is for [text] and [voice] channels only.
    ///
    /// [text]: ChannelType::Text
    /// [voice]: ChannelType::Voice
    pub fn category(mut self, category: Option<ChannelId>) -> Self {
        self.parent_id = Some(category);
        self
    }

    /// How many seconds must a user wait before sending another message.
    ///
    /// Bots, or users with the [`MANAGE_MESSAGES`] and/or [`MANAGE_CHANNELS`] permissions are
    /// exempt from this restriction.
    ///
    /// **Note**: Must be between 0 and 21600 seconds (360 minutes or 6 hours).
    ///
    /// [`MANAGE_MESSAGES`]: Permissions::MANAGE_MESSAGES
    /// [`MANAGE_CHANNELS`]: Permissions::MANAGE_CHANNELS
    #[doc(alias = "slowmode")]
    pub fn rate_limit_per_user(mut self, seconds: u16) -> Self {
        self.rate_limit_per_user = Some(seconds);
        self
    }

    /// A set of overwrites defining what a user or a user carrying a certain role can and cannot
    /// do, replacing every existing overwrite of the channel.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::id::{ChannelId, UserId};
    /// use accord::builder::EditChannel;
    /// use accord::model::channel::{PermissionOverwrite, PermissionOverwriteType};
    /// use accord::model::Permissions;
    ///
    /// # async fn run(http: &Http, channel_id: ChannelId) -> accord::Result<()> {
    /// let overwrite = PermissionOverwrite {
    ///     allow: Permissions::VIEW_CHANNEL,
    ///     deny: Permissions::SEND_TTS_MESSAGES,
    ///     kind: PermissionOverwriteType::Member(UserId::new(1234)),
    /// };
    ///
    /// let builder = EditChannel::new().name("my_edited_cool_channel").permissions([overwrite]);
    /// channel_id.edit(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub fn permissions(mut self, perms: impl IntoIterator<Item = PermissionOverwrite>) -> Self {
        self.permission_overwrites = Some(perms.into_iter().collect());
        self
    }

    /// Sets the request's audit log reason.
    pub fn audit_log_reason(mut self, reason: impl Into<String>) -> Self {
        self.audit_log_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn clearing_topic_and_category_sends_null() {
        let builder = EditChannel::new().topic(None).category(None).nsfw(false);

        assert_eq!(
            to_value(&builder).unwrap(),
            json!({"topic": null, "parent_id": null, "nsfw": false})
        );
    }

    #[test]
    fn overwrites_use_the_wire_format() {
        let builder = EditChannel::new().permissions([PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(RoleId::new(7)),
        }]);

        assert_eq!(
            to_value(&builder).unwrap(),
            json!({"permission_overwrites": [{"allow": "1024", "deny": "0", "id": "7", "type": 0}]})
        );
    }
}
