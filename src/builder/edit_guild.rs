use crate::internal::prelude::*;
use crate::model::prelude::*;

/// A builder to optionally edit certain fields of a [`Guild`].
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#modify-guild).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditGuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    afk_channel_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    afk_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    splash: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_channel_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules_channel_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_updates_channel_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_locale: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explicit_content_filter: Option<Option<ExplicitContentFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_message_notifications: Option<Option<DefaultMessageNotificationLevel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification_level: Option<VerificationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_channel_flags: Option<SystemChannelFlags>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl EditGuild {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the "AFK voice channel" that users are to move to if they have been AFK for an amount
    /// of time, configurable by [`Self::afk_timeout`]. Pass [`None`] to unset the current value.
    #[inline]
    pub fn afk_channel(mut self, channel: Option<ChannelId>) -> Self {
        self.afk_channel_id = Some(channel);
        self
    }

    /// Set the amount of time a user is to be moved to the AFK channel, configured via
    /// [`Self::afk_channel`], after being AFK.
    pub fn afk_timeout(mut self, timeout: u64) -> Self {
        self.afk_timeout = Some(timeout);
        self
    }

    /// Set the icon of the guild, as a data URI. Pass [`None`] to remove the icon.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::guild::PartialGuild;
    /// use accord::builder::EditGuild;
    /// use accord::utils::encode_image;
    ///
    /// # async fn run(http: &Http, mut guild: PartialGuild) -> accord::Result<()> {
    /// let icon = encode_image("image/png", &std::fs::read("./guild_icon.png")?);
    /// guild.edit(http, EditGuild::new().icon(Some(icon))).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the name of the guild.
    ///
    /// **Note**: Must be between (and including) 2-100 characters.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description of the guild. Pass [`None`] to clear it.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Transfers the ownership of the guild to another user.
    ///
    /// **Note**: The current user must be the owner of the guild.
    pub fn owner(mut self, user_id: impl Into<UserId>) -> Self {
        self.owner_id = Some(user_id.into());
        self
    }

    /// Set the splash image of the guild on the invitation page. Pass [`None`] to remove it.
    pub fn splash(mut self, splash: Option<String>) -> Self {
        self.splash = Some(splash);
        self
    }

    /// Set the banner image of the guild. Pass [`None`] to remove it.
    pub fn banner(mut self, banner: Option<String>) -> Self {
        self.banner = Some(banner);
        self
    }

    /// Set the channel ID where welcome messages and boost events will be posted.
    pub fn system_channel_id(mut self, channel_id: Option<ChannelId>) -> Self {
        self.system_channel_id = Some(channel_id);
        self
    }

    /// Set the channel ID of the rules and guidelines channel.
    pub fn rules_channel_id(mut self, channel_id: Option<ChannelId>) -> Self {
        self.rules_channel_id = Some(channel_id);
        self
    }

    /// Set the channel ID where admins and moderators receive update messages from Discord.
    pub fn public_updates_channel_id(mut self, channel_id: Option<ChannelId>) -> Self {
        self.public_updates_channel_id = Some(channel_id);
        self
    }

    /// Set the preferred locale used in Server Discovery and update messages from Discord.
    ///
    /// If this is not set, the locale will default to "en-US";
    pub fn preferred_locale(mut self, locale: Option<String>) -> Self {
        self.preferred_locale = Some(locale);
        self
    }

    /// Set the content filter level.
    pub fn explicit_content_filter(mut self, level: Option<ExplicitContentFilter>) -> Self {
        self.explicit_content_filter = Some(level);
        self
    }

    /// Set the default message notification level.
    pub fn default_message_notifications(
        mut self,
        level: Option<DefaultMessageNotificationLevel>,
    ) -> Self {
        self.default_message_notifications = Some(level);
        self
    }

    /// Set the verification level of the guild. This can restrict what a user must have prior to
    /// being able to send messages in a guild.
    ///
    /// Refer to the documentation for [`VerificationLevel`] for more information on each variant.
    #[inline]
    pub fn verification_level(mut self, verification_level: impl Into<VerificationLevel>) -> Self {
        self.verification_level = Some(verification_level.into());
        self
    }

    /// Modifies the notifications that are sent by discord to the configured system channel.
    pub fn system_channel_flags(mut self, system_channel_flags: SystemChannelFlags) -> Self {
        self.system_channel_flags = Some(system_channel_flags);
        self
    }

    /// Sets the request's audit log reason.
    pub fn audit_log_reason(mut self, reason: impl Into<String>) -> Self {
        self.audit_log_reason = Some(reason.into());
        self
    }
}
