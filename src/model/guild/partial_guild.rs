use std::collections::HashMap;

use super::{
    icon_url,
    DefaultMessageNotificationLevel,
    Emoji,
    ExplicitContentFilter,
    Guild,
    Member,
    MfaLevel,
    NsfwLevel,
    PremiumTier,
    Role,
    SystemChannelFlags,
    VerificationLevel,
};
use crate::builder::EditGuild;
use crate::http::{Http, MembersIter, Paginator};
use crate::internal::prelude::*;
use crate::model::id::{ChannelId, EmojiId, GuildId, RoleId, UserId};
use crate::model::utils::{decode_keyed, deserialize_keyed, serialize_keyed};

/// Partial information about a [`Guild`], as returned by the REST API. This does not include
/// information like member data or channels.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct PartialGuild {
    /// The unique Id identifying the guild.
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The hash of the icon used by the guild.
    pub icon: Option<String>,
    /// An identifying hash of the guild's splash icon.
    pub splash: Option<String>,
    /// An identifying hash of the guild discovery's splash icon.
    pub discovery_splash: Option<String>,
    /// The Id of the user who owns the guild.
    pub owner_id: UserId,
    /// Id of a voice channel that's considered the AFK channel.
    pub afk_channel_id: Option<ChannelId>,
    /// The amount of seconds a user can not show any activity in a voice channel before being
    /// moved to an AFK channel -- if one exists.
    pub afk_timeout: u64,
    /// Whether or not the guild widget is enabled.
    pub widget_enabled: Option<bool>,
    /// The channel id that the widget will generate an invite to, or null if set to no invite
    pub widget_channel_id: Option<ChannelId>,
    /// Indicator of the current verification level of the guild.
    pub verification_level: VerificationLevel,
    /// Indicator of whether notifications for all messages are enabled by default in the guild.
    pub default_message_notifications: DefaultMessageNotificationLevel,
    /// Default explicit content filter level.
    pub explicit_content_filter: ExplicitContentFilter,
    /// A mapping of the guild's roles.
    #[serde(serialize_with = "serialize_keyed", deserialize_with = "deserialize_keyed")]
    pub roles: HashMap<RoleId, Role>,
    /// All of the guild's custom emojis.
    #[serde(serialize_with = "serialize_keyed", deserialize_with = "deserialize_keyed")]
    pub emojis: HashMap<EmojiId, Emoji>,
    /// Features enabled for the guild.
    pub features: Vec<String>,
    /// Indicator of whether the guild requires multi-factor authentication for moderators.
    pub mfa_level: MfaLevel,
    /// The ID of the channel to which system messages are sent.
    pub system_channel_id: Option<ChannelId>,
    /// System channel flags.
    #[serde(default)]
    pub system_channel_flags: SystemChannelFlags,
    /// The id of the channel where rules and/or guidelines are displayed.
    pub rules_channel_id: Option<ChannelId>,
    /// The maximum number of members for the guild.
    pub max_members: Option<u64>,
    /// The vanity url code for the guild, if it has one.
    pub vanity_url_code: Option<String>,
    /// The server's description, if it has one.
    pub description: Option<String>,
    /// The guild's banner, if it has one.
    pub banner: Option<String>,
    /// The server's premium boosting level.
    pub premium_tier: PremiumTier,
    /// The total number of users currently boosting this server.
    pub premium_subscription_count: Option<u64>,
    /// The preferred locale of this guild.
    pub preferred_locale: String,
    /// The id of the channel where admins and moderators of Community guilds receive notices from
    /// Discord.
    pub public_updates_channel_id: Option<ChannelId>,
    /// The guild NSFW state.
    pub nsfw_level: NsfwLevel,
    /// Whether the guild has the boost progress bar enabled
    pub premium_progress_bar_enabled: Option<bool>,
    /// Approximate number of members in this guild. Only present when requested with counts.
    pub approximate_member_count: Option<u64>,
    /// Approximate number of non-offline members in this guild. Only present when requested with
    /// counts.
    pub approximate_presence_count: Option<u64>,
}

impl_update!(PartialGuild {
    "name" => name,
    "icon" => icon,
    "splash" => splash,
    "discovery_splash" => discovery_splash,
    "owner_id" => owner_id,
    "afk_channel_id" => afk_channel_id,
    "afk_timeout" => afk_timeout,
    "widget_enabled" => widget_enabled,
    "widget_channel_id" => widget_channel_id,
    "verification_level" => verification_level,
    "default_message_notifications" => default_message_notifications,
    "explicit_content_filter" => explicit_content_filter,
    "roles" => roles with decode_keyed,
    "emojis" => emojis with decode_keyed,
    "features" => features,
    "mfa_level" => mfa_level,
    "system_channel_id" => system_channel_id,
    "system_channel_flags" => system_channel_flags,
    "rules_channel_id" => rules_channel_id,
    "max_members" => max_members,
    "vanity_url_code" => vanity_url_code,
    "description" => description,
    "banner" => banner,
    "premium_tier" => premium_tier,
    "premium_subscription_count" => premium_subscription_count,
    "preferred_locale" => preferred_locale,
    "public_updates_channel_id" => public_updates_channel_id,
    "nsfw_level" => nsfw_level,
    "premium_progress_bar_enabled" => premium_progress_bar_enabled,
    "approximate_member_count" => approximate_member_count,
    "approximate_presence_count" => approximate_presence_count,
});

impl PartialGuild {
    /// Edits the guild, replacing this value with the one Discord returns.
    ///
    /// **Note**: Requires the [Manage Guild] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild]: crate::model::Permissions::MANAGE_GUILD
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditGuild) -> Result<()> {
        let approximate_member_count = self.approximate_member_count;
        let approximate_presence_count = self.approximate_presence_count;

        *self = self.id.edit(http, builder).await?;

        // The edit response carries no counts; keep the last known ones.
        self.approximate_member_count = self.approximate_member_count.or(approximate_member_count);
        self.approximate_presence_count =
            self.approximate_presence_count.or(approximate_presence_count);

        Ok(())
    }

    /// Gets a [`Member`] of the guild by Id over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the user is not in the guild.
    #[inline]
    pub async fn member(&self, http: impl AsRef<Http>, user_id: UserId) -> Result<Member> {
        self.id.member(http, user_id).await
    }

    /// Returns a paginator over every member of the guild.
    #[inline]
    pub fn members_iter<H: AsRef<Http> + Send + Sync>(&self, http: H) -> Paginator<MembersIter<H>> {
        self.id.members_iter(http)
    }

    /// Leaves the guild.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user is unable to leave the guild.
    #[inline]
    pub async fn leave(&self, http: impl AsRef<Http>) -> Result<()> {
        self.id.leave(http).await
    }

    /// Returns the formatted URL of the guild's icon, if one exists.
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        icon_url(self.id, self.icon.as_deref())
    }

    /// Gets a role of the guild by its name.
    #[must_use]
    pub fn role_by_name(&self, role_name: &str) -> Option<&Role> {
        self.roles.values().find(|role| role.name == role_name)
    }
}

impl From<Guild> for PartialGuild {
    /// Converts a full guild snapshot into a partial one, dropping the gateway-only collections.
    fn from(guild: Guild) -> Self {
        Self {
            id: guild.id,
            name: guild.name,
            icon: guild.icon,
            splash: guild.splash,
            discovery_splash: guild.discovery_splash,
            owner_id: guild.owner_id,
            afk_channel_id: guild.afk_channel_id,
            afk_timeout: guild.afk_timeout,
            widget_enabled: guild.widget_enabled,
            widget_channel_id: guild.widget_channel_id,
            verification_level: guild.verification_level,
            default_message_notifications: guild.default_message_notifications,
            explicit_content_filter: guild.explicit_content_filter,
            roles: guild.roles,
            emojis: guild.emojis,
            features: guild.features,
            mfa_level: guild.mfa_level,
            system_channel_id: guild.system_channel_id,
            system_channel_flags: guild.system_channel_flags,
            rules_channel_id: guild.rules_channel_id,
            max_members: guild.max_members,
            vanity_url_code: guild.vanity_url_code,
            description: guild.description,
            banner: guild.banner,
            premium_tier: guild.premium_tier,
            premium_subscription_count: guild.premium_subscription_count,
            preferred_locale: guild.preferred_locale,
            public_updates_channel_id: guild.public_updates_channel_id,
            nsfw_level: guild.nsfw_level,
            premium_progress_bar_enabled: guild.premium_progress_bar_enabled,
            approximate_member_count: Some(guild.member_count),
            approximate_presence_count: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};
    use crate::model::update::Update;

    #[test]
    fn counts_are_optional() {
        let mut guild: PartialGuild = from_value(json!({
            "id": "5",
            "name": "partial",
            "icon": "a_abc",
            "splash": null,
            "discovery_splash": null,
            "owner_id": "1",
            "afk_channel_id": null,
            "afk_timeout": 60,
            "verification_level": 0,
            "default_message_notifications": 1,
            "explicit_content_filter": 2,
            "roles": [],
            "emojis": [],
            "features": ["COMMUNITY"],
            "mfa_level": 1,
            "system_channel_id": null,
            "premium_tier": 2,
            "preferred_locale": "en-US",
            "nsfw_level": 0,
        }))
        .unwrap();

        assert_eq!(guild.approximate_member_count, None);
        assert_eq!(guild.premium_tier, PremiumTier::Tier2);
        assert_eq!(guild.widget_enabled, None);
        assert_eq!(
            guild.icon_url().as_deref(),
            Some("https://cdn.discordapp.com/icons/5/a_abc.gif")
        );

        let fragment = match json!({"approximate_member_count": 42, "id": "6"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(guild.update(&fragment), ["approximate_member_count"]);
        assert_eq!(guild.approximate_member_count, Some(42));
        assert_eq!(guild.id, GuildId::new(5));
    }
}
