//! Models relating to guilds and types that it owns.

mod emoji;
mod guild_id;
mod member;
mod partial_guild;
mod role;

use std::collections::HashMap;

use serde::de::Error as DeError;
use tracing::{error, warn};

pub use self::emoji::*;
pub use self::member::*;
pub use self::partial_guild::*;
pub use self::role::*;
use super::utils::{decode_keyed, deserialize_keyed, serialize_keyed};
use crate::builder::{CreateChannel, EditGuild, EditRole};
use crate::http::Http;
use crate::internal::prelude::*;
use crate::json;
use crate::model::channel::{ChannelType, GuildChannel, PermissionOverwriteType};
use crate::model::gateway::{OnlineStatus, Presence};
use crate::model::id::{ChannelId, EmojiId, GuildId, RoleId, UserId};
use crate::model::timestamp::Timestamp;
use crate::model::user::User;
use crate::model::Permissions;

/// A representation of a banning of a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#ban-object).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Ban {
    /// The reason given for this ban.
    pub reason: Option<String>,
    /// The user that was banned.
    pub user: User,
}

/// Information about a Discord guild, such as channels, emojis, etc.
///
/// This is the full snapshot Discord sends in `GUILD_CREATE`, including the members, channels and
/// presences of the guild. Each nested collection is keyed by id.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object) plus
/// [extension](https://discord.com/developers/docs/topics/gateway-events#guild-create).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(remote = "Self")]
#[non_exhaustive]
pub struct Guild {
    /// The unique Id identifying the guild.
    ///
    /// This is equivalent to the Id of the default role (`@everyone`).
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The hash of the icon used by the guild.
    ///
    /// In the client, this appears on the guild list on the left-hand side.
    pub icon: Option<String>,
    /// An identifying hash of the guild's splash icon.
    ///
    /// If the `InviteSplash` feature is enabled, this can be used to generate a URL to a splash
    /// image.
    pub splash: Option<String>,
    /// An identifying hash of the guild discovery's splash icon.
    pub discovery_splash: Option<String>,
    /// The Id of the [`User`] who owns the guild.
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
    /// The guild features. More information available at [`discord documentation`].
    ///
    /// [`discord documentation`]: https://discord.com/developers/docs/resources/guild#guild-object-guild-features
    pub features: Vec<String>,
    /// Indicator of whether the guild requires multi-factor authentication for [`Role`]s or
    /// [`User`]s with moderation permissions.
    pub mfa_level: MfaLevel,
    /// The ID of the channel to which system messages are sent.
    pub system_channel_id: Option<ChannelId>,
    /// System channel flags.
    #[serde(default)]
    pub system_channel_flags: SystemChannelFlags,
    /// The id of the channel where rules and/or guidelines are displayed.
    ///
    /// **Note**: Only available on `COMMUNITY` guild, see [`Self::features`].
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
    /// The preferred locale of this guild only set if guild has the "DISCOVERABLE" feature,
    /// defaults to en-US.
    pub preferred_locale: String,
    /// The id of the channel where admins and moderators of Community guilds receive notices from
    /// Discord.
    pub public_updates_channel_id: Option<ChannelId>,
    /// The guild NSFW state. See [`discord support article`].
    ///
    /// [`discord support article`]: https://support.discord.com/hc/en-us/articles/1500005389362-NSFW-Server-Designation
    pub nsfw_level: NsfwLevel,
    /// Whether the guild has the boost progress bar enabled
    pub premium_progress_bar_enabled: Option<bool>,

    // =======
    // From here on, all fields are from Guild Create Event's extra fields (see Discord docs)
    // =======
    /// The date that the current user joined the guild.
    pub joined_at: Timestamp,
    /// Indicator of whether the guild is considered "large" by Discord.
    pub large: Option<bool>,
    /// Whether this guild is unavailable due to an outage.
    pub unavailable: Option<bool>,
    /// The number of members in the guild.
    pub member_count: u64,
    /// Users who are members of the guild.
    ///
    /// Members might not all be available when the [`ReadyEvent`] is received if the
    /// [`Self::member_count`] is greater than the `large_threshold` set by the gateway.
    ///
    /// [`ReadyEvent`]: crate::model::event::ReadyEvent
    #[serde(default, serialize_with = "serialize_keyed", deserialize_with = "deserialize_keyed")]
    pub members: HashMap<UserId, Member>,
    /// All voice and text channels contained within a guild.
    ///
    /// This contains all channels regardless of permissions (i.e. the ability of the bot to read
    /// from or connect to them).
    #[serde(default, serialize_with = "serialize_keyed", deserialize_with = "deserialize_keyed")]
    pub channels: HashMap<ChannelId, GuildChannel>,
    /// A mapping of [`User`]s' Ids to their current presences.
    ///
    /// **Note**: This will be empty unless the "guild presences" privileged intent is enabled.
    #[serde(default, serialize_with = "serialize_keyed", deserialize_with = "deserialize_keyed")]
    pub presences: HashMap<UserId, Presence>,
}

impl_update!(Guild {
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
    "member_count" => member_count,
    "large" => large,
    "unavailable" => unavailable,
});

impl Guild {
    /// Bans a [`User`] from the guild, deleting their messages from the last `dmd` days.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::DeleteMessageDaysAmount`] if `dmd` is greater than 7.
    ///
    /// [Ban Members]: Permissions::BAN_MEMBERS
    /// [`ModelError::DeleteMessageDaysAmount`]: crate::model::ModelError::DeleteMessageDaysAmount
    #[inline]
    pub async fn ban(
        &self,
        http: impl AsRef<Http>,
        user_id: UserId,
        dmd: u8,
        reason: Option<&str>,
    ) -> Result<()> {
        self.id.ban(http, user_id, dmd, reason).await
    }

    /// Unbans the given [`User`] from the guild.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission.
    ///
    /// [Ban Members]: Permissions::BAN_MEMBERS
    #[inline]
    pub async fn unban(&self, http: impl AsRef<Http>, user_id: UserId) -> Result<()> {
        self.id.unban(http, user_id, None).await
    }

    /// Creates a new [`GuildChannel`] in the guild.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    #[inline]
    pub async fn create_channel(
        &self,
        http: impl AsRef<Http>,
        builder: CreateChannel,
    ) -> Result<GuildChannel> {
        self.id.create_channel(http, builder).await
    }

    /// Creates a new role in the guild with the data set, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    #[inline]
    pub async fn create_role(&self, http: impl AsRef<Http>, builder: EditRole) -> Result<Role> {
        self.id.create_role(http, builder).await
    }

    /// Edits the guild, updating this value with the fields Discord returns.
    ///
    /// **Note**: Requires the [Manage Guild] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild]: Permissions::MANAGE_GUILD
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditGuild) -> Result<()> {
        let guild = self.id.edit(http, builder).await?;

        self.afk_channel_id = guild.afk_channel_id;
        self.afk_timeout = guild.afk_timeout;
        self.default_message_notifications = guild.default_message_notifications;
        self.emojis = guild.emojis;
        self.features = guild.features;
        self.icon = guild.icon;
        self.mfa_level = guild.mfa_level;
        self.name = guild.name;
        self.owner_id = guild.owner_id;
        self.roles = guild.roles;
        self.splash = guild.splash;
        self.banner = guild.banner;
        self.description = guild.description;
        self.system_channel_id = guild.system_channel_id;
        self.system_channel_flags = guild.system_channel_flags;
        self.verification_level = guild.verification_level;

        Ok(())
    }

    /// Kicks a [`Member`] from the guild.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    #[inline]
    pub async fn kick(
        &self,
        http: impl AsRef<Http>,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<()> {
        self.id.kick(http, user_id, reason).await
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

    /// Returns the formatted URL of the guild's banner image, if one exists.
    #[must_use]
    pub fn banner_url(&self) -> Option<String> {
        self.banner.as_ref().map(|banner| cdn!("/banners/{}/{}.webp?size=1024", self.id, banner))
    }

    /// Returns the formatted URL of the guild's splash image, if one exists.
    #[must_use]
    pub fn splash_url(&self) -> Option<String> {
        self.splash.as_ref().map(|splash| cdn!("/splashes/{}/{}.webp?size=4096", self.id, splash))
    }

    /// Gets a list of all the members (satisfying the status provided to the function) in this
    /// guild.
    #[must_use]
    pub fn members_with_status(&self, status: OnlineStatus) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|(id, _)| self.presences.get(id).is_some_and(|p| p.status == status))
            .map(|(_, member)| member)
            .collect()
    }

    /// Retrieves the first [`Member`] found that matches the name - with an optional
    /// discriminator - provided.
    ///
    /// Searching with a discriminator given is the most precise form of lookup, as no two people
    /// can share the same username *and* discriminator.
    ///
    /// If a member can not be found by username or username#discriminator, then a search will be
    /// done for the nickname. When searching by nickname, the hash (`#`) and everything after it
    /// is included in the search.
    ///
    /// The following are valid types of searches:
    /// - **username**: "zey"
    /// - **username and discriminator**: "zey#5479"
    /// - **nickname**: "zeyla" or "zeylas#nick"
    #[must_use]
    pub fn member_named(&self, name: &str) -> Option<&Member> {
        let (username, discrim) = match name.rsplit_once('#') {
            Some((username, discrim)) => match discrim.parse::<u16>() {
                Ok(discrim) => (username, Some(discrim)),
                Err(_) => (name, None),
            },
            None => (name, None),
        };

        self.members
            .values()
            .find(|member| {
                member.user.name == username
                    && discrim.map_or(true, |d| {
                        member.user.discriminator.map(|x| x.get()) == Some(d)
                    })
            })
            .or_else(|| self.members.values().find(|member| member.nick.as_deref() == Some(name)))
    }

    /// Retrieves all [`Member`]s whose username or nickname starts with the given prefix,
    /// sorted by display name.
    #[must_use]
    pub fn members_starting_with(&self, prefix: &str, case_sensitive: bool) -> Vec<&Member> {
        let starts_with = |name: &str| {
            if case_sensitive {
                name.starts_with(prefix)
            } else {
                name.to_lowercase().starts_with(&prefix.to_lowercase())
            }
        };

        let mut members: Vec<&Member> = self
            .members
            .values()
            .filter(|member| {
                starts_with(&member.user.name) || member.nick.as_deref().is_some_and(starts_with)
            })
            .collect();

        members.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        members
    }

    /// Gets a role of the guild by its name.
    #[must_use]
    pub fn role_by_name(&self, role_name: &str) -> Option<&Role> {
        self.roles.values().find(|role| role.name == role_name)
    }

    /// Gets the guild's `@everyone` role, if it is known.
    #[must_use]
    pub fn everyone_role(&self) -> Option<&Role> {
        self.roles.get(&self.id.everyone_role())
    }

    /// Calculates a [`Member`]'s guild-level permissions: those of `@everyone` combined with the
    /// ones of every role the member holds.
    ///
    /// The owner of the guild and members holding [Administrator] have all permissions.
    ///
    /// [Administrator]: Permissions::ADMINISTRATOR
    #[must_use]
    pub fn member_permissions(&self, member: &Member) -> Permissions {
        self.user_permissions(member.user.id, &member.roles)
    }

    fn user_permissions(&self, user_id: UserId, roles: &[RoleId]) -> Permissions {
        if user_id == self.owner_id {
            return Permissions::all();
        }

        let Some(everyone) = self.everyone_role() else {
            error!("@everyone role is missing in guild {}", self.id);

            return Permissions::empty();
        };

        let mut permissions = everyone.permissions;

        for role_id in roles {
            if let Some(role) = self.roles.get(role_id) {
                permissions |= role.permissions;
            } else {
                warn!("{} on {} has non-existent role {:?}", user_id, self.id, role_id);
            }
        }

        if permissions.contains(Permissions::ADMINISTRATOR) {
            return Permissions::all();
        }

        permissions
    }

    /// Calculates a [`Member`]'s permissions in a given channel of the guild.
    ///
    /// The guild-level permissions are resolved first. Then the channel's overwrites are applied
    /// in order: the `@everyone` overwrite, the overwrites of the member's roles combined, and
    /// finally the overwrite of the member itself.
    #[must_use]
    pub fn user_permissions_in(&self, channel: &GuildChannel, member: &Member) -> Permissions {
        if member.user.id == self.owner_id {
            return Permissions::all();
        }

        let mut permissions = self.user_permissions(member.user.id, &member.roles);

        if permissions.contains(Permissions::ADMINISTRATOR) {
            return Permissions::all();
        }

        if channel.guild_id != self.id {
            warn!("Channel {} does not belong to guild {}", channel.id, self.id);
        }

        let everyone_id = self.id.everyone_role();
        let mut role_allow = Permissions::empty();
        let mut role_deny = Permissions::empty();

        for overwrite in channel.overwrites() {
            if overwrite.kind == PermissionOverwriteType::Role(everyone_id) {
                permissions = (permissions & !overwrite.deny) | overwrite.allow;
            }
        }

        for overwrite in channel.overwrites() {
            if let PermissionOverwriteType::Role(role_id) = overwrite.kind {
                if role_id != everyone_id && member.roles.contains(&role_id) {
                    role_allow |= overwrite.allow;
                    role_deny |= overwrite.deny;
                }
            }
        }

        permissions = (permissions & !role_deny) | role_allow;

        for overwrite in channel.overwrites() {
            if overwrite.kind == PermissionOverwriteType::Member(member.user.id) {
                permissions = (permissions & !overwrite.deny) | overwrite.allow;
            }
        }

        // Voice permissions mean nothing in a text channel.
        if channel.kind == ChannelType::Text {
            permissions &= !(Permissions::CONNECT
                | Permissions::SPEAK
                | Permissions::MUTE_MEMBERS
                | Permissions::DEAFEN_MEMBERS
                | Permissions::MOVE_MEMBERS
                | Permissions::USE_VAD
                | Permissions::STREAM
                | Permissions::PRIORITY_SPEAKER);
        }

        // Without SEND_MESSAGES, message-related permissions are dropped.
        if !permissions.contains(Permissions::SEND_MESSAGES) {
            permissions &= !(Permissions::SEND_TTS_MESSAGES
                | Permissions::MENTION_EVERYONE
                | Permissions::EMBED_LINKS
                | Permissions::ATTACH_FILES);
        }

        // Without VIEW_CHANNEL, only guild-wide actionable permissions remain.
        if !permissions.contains(Permissions::VIEW_CHANNEL) {
            permissions &= Permissions::KICK_MEMBERS
                | Permissions::BAN_MEMBERS
                | Permissions::ADMINISTRATOR
                | Permissions::MANAGE_GUILD
                | Permissions::CHANGE_NICKNAME
                | Permissions::MANAGE_NICKNAMES;
        }

        permissions
    }
}

impl<'de> Deserialize<'de> for Guild {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let mut map = JsonMap::deserialize(deserializer)?;

        if let Some(guild_id) = map.get("id").cloned() {
            json::inject_into_array(&mut map, "channels", "guild_id", &guild_id);
            json::inject_into_array(&mut map, "members", "guild_id", &guild_id);
            json::inject_into_array(&mut map, "presences", "guild_id", &guild_id);
        }

        Self::deserialize(Value::Object(map)).map_err(DeError::custom)
    }
}

impl Serialize for Guild {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        Self::serialize(self, serializer)
    }
}

pub(crate) fn icon_url(guild_id: GuildId, icon: Option<&str>) -> Option<String> {
    icon.map(|icon| {
        let ext = if icon.starts_with("a_") { "gif" } else { "webp" };

        cdn!("/icons/{}/{}.{}", guild_id, icon, ext)
    })
}

/// Partial information about a [`Guild`]. This does not include information like member data.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#get-current-user-guilds-example-partial-guild).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildInfo {
    /// The unique Id of the guild.
    ///
    /// Can be used to calculate creation date.
    pub id: GuildId,
    /// The name of the guild.
    pub name: String,
    /// The hash of the icon of the guild.
    ///
    /// This can be used to generate a URL to the guild's icon image.
    pub icon: Option<String>,
    /// Indicator of whether the current user is the owner.
    pub owner: Option<bool>,
    /// The permissions that the current user has.
    pub permissions: Permissions,
    /// See [`Guild::features`].
    pub features: Option<Vec<String>>,
    /// Approximate number of members in this guild, when requested with counts.
    pub approximate_member_count: Option<u64>,
    /// Approximate number of online members in this guild, when requested with counts.
    pub approximate_presence_count: Option<u64>,
}

impl GuildInfo {
    /// Returns the formatted URL of the guild's icon, if the guild has an icon.
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        icon_url(self.id, self.icon.as_deref())
    }
}

/// Represents the amount of members that would be pruned by a guild prune operation.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#get-guild-prune-count).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildPrune {
    /// The number of members that would be pruned by the operation.
    pub pruned: u64,
}

/// Preview of a guild, available for discoverable guilds and guilds the current user is in.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-preview-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GuildPreview {
    /// The guild Id.
    pub id: GuildId,
    /// The guild name.
    pub name: String,
    /// The guild icon hash if it has one.
    pub icon: Option<String>,
    /// The guild splash hash if it has one.
    pub splash: Option<String>,
    /// The guild discovery splash hash it it has one.
    pub discovery_splash: Option<String>,
    /// The custom guild emojis.
    pub emojis: Vec<Emoji>,
    /// The guild features. See [`Guild::features`]
    pub features: Vec<String>,
    /// Approximate number of members in this guild.
    pub approximate_member_count: u64,
    /// Approximate number of online members in this guild.
    pub approximate_presence_count: u64,
    /// The description for the guild, if the guild has the `DISCOVERABLE` feature.
    pub description: Option<String>,
}

/// Data for an unavailable guild.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#unavailable-guild-object).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct UnavailableGuild {
    /// The Id of the [`Guild`] that may be unavailable.
    pub id: GuildId,
    /// Indicator of whether the guild is unavailable.
    ///
    /// This is unset when the current user was removed from the guild.
    pub unavailable: Option<bool>,
}

enum_number! {
    /// Default message notification level for a guild.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-default-message-notification-level).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum DefaultMessageNotificationLevel {
        /// Receive notifications for everything.
        All = 0,
        /// Receive only mentions.
        Mentions = 1,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// Setting used to filter explicit messages from members.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-explicit-content-filter-level).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ExplicitContentFilter {
        /// Don't scan any messages.
        None = 0,
        /// Scan messages from members without a role.
        WithoutRole = 1,
        /// Scan messages sent by all members.
        All = 2,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// Multi-Factor Authentication level for guild moderators.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-mfa-level).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum MfaLevel {
        /// MFA is disabled.
        None = 0,
        /// MFA is enabled.
        Elevated = 1,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The level to set as criteria prior to a user being able to send messages in a [`Guild`].
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-verification-level).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum VerificationLevel {
        /// Does not require any verification.
        None = 0,
        /// Must have a verified email on the user's Discord account.
        Low = 1,
        /// Must also be a registered user on Discord for longer than 5 minutes.
        Medium = 2,
        /// Must also be a member of the guild for longer than 10 minutes.
        High = 3,
        /// Must have a verified phone on the user's Discord account.
        Higher = 4,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The [`Guild`] nsfw level.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-guild-nsfw-level).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum NsfwLevel {
        /// The nsfw level is not specified.
        Default = 0,
        /// The guild is considered as explicit.
        Explicit = 1,
        /// The guild is considered as safe.
        Safe = 2,
        /// The guild is age restricted.
        AgeRestricted = 3,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The guild's premium (boost) tier.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-premium-tier).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum PremiumTier {
        /// Guild has not unlocked any Server Boost perks
        Tier0 = 0,
        /// Guild has unlocked Server Boost level 1 perks
        Tier1 = 1,
        /// Guild has unlocked Server Boost level 2 perks
        Tier2 = 2,
        /// Guild has unlocked Server Boost level 3 perks
        Tier3 = 3,
        _ => Unknown(u8),
    }
}

bitflags_int! {
    /// Describes a system channel flags.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-object-system-channel-flags).
    #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct SystemChannelFlags: u64 {
        /// Suppress member join notifications.
        const SUPPRESS_JOIN_NOTIFICATIONS = 1 << 0;
        /// Suppress server boost notifications.
        const SUPPRESS_PREMIUM_SUBSCRIPTIONS = 1 << 1;
        /// Suppress server setup tips.
        const SUPPRESS_GUILD_REMINDER_NOTIFICATIONS = 1 << 2;
        /// Hide member join sticker reply buttons.
        const SUPPRESS_JOIN_NOTIFICATION_REPLIES = 1 << 3;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};
    use crate::model::update::Update;

    fn role(id: u64, permissions: Permissions) -> Value {
        json!({
            "id": id.to_string(),
            "name": format!("role {id}"),
            "color": 0,
            "hoist": false,
            "position": 0,
            "permissions": permissions.bits().to_string(),
            "managed": false,
            "mentionable": false,
        })
    }

    fn member(id: &str, name: &str, roles: &[&str]) -> Value {
        json!({
            "user": {"id": id, "username": name},
            "roles": roles,
            "joined_at": "2021-08-01T12:00:00.000000+00:00",
        })
    }

    fn overwrite(id: &str, kind: u8, allow: Permissions, deny: Permissions) -> Value {
        json!({
            "id": id,
            "type": kind,
            "allow": allow.bits().to_string(),
            "deny": deny.bits().to_string(),
        })
    }

    fn guild() -> Guild {
        let none = Permissions::empty();
        let mut moderator = member("200", "mod", &["2"]);
        moderator["nick"] = json!("Moddy");

        from_value(json!({
            "id": "1",
            "name": "guild",
            "icon": null,
            "splash": null,
            "discovery_splash": null,
            "owner_id": "100",
            "afk_channel_id": null,
            "afk_timeout": 300,
            "verification_level": 1,
            "default_message_notifications": 0,
            "explicit_content_filter": 0,
            "roles": [
                role(
                    1,
                    Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::CONNECT
                ),
                role(2, Permissions::KICK_MEMBERS),
                role(3, Permissions::ADMINISTRATOR),
            ],
            "emojis": [],
            "features": [],
            "mfa_level": 0,
            "system_channel_id": null,
            "premium_tier": 0,
            "preferred_locale": "en-US",
            "nsfw_level": 0,
            "joined_at": "2021-08-01T12:00:00.000000+00:00",
            "member_count": 2,
            "members": [
                member("100", "owner", &[]),
                moderator,
                member("300", "admin", &["3"]),
            ],
            "channels": [
                {"id": "10", "type": 0, "name": "general", "position": 0, "permission_overwrites": [
                    overwrite("1", 0, none, Permissions::SEND_MESSAGES),
                    overwrite("2", 0, Permissions::SEND_MESSAGES, none),
                ]},
                {"id": "11", "type": 0, "name": "secret", "position": 1, "permission_overwrites": [
                    overwrite("200", 1, none, Permissions::VIEW_CHANNEL),
                ]},
            ],
        }))
        .unwrap()
    }

    #[test]
    fn snapshot_injects_guild_id() {
        let guild = guild();

        assert_eq!(guild.members.len(), 3);
        assert!(guild.members.values().all(|m| m.guild_id == guild.id));
        assert!(guild.channels.values().all(|c| c.guild_id == guild.id));
        assert_eq!(guild.verification_level, VerificationLevel::Low);
        assert!(guild.presences.is_empty());
    }

    #[test]
    fn guild_level_permissions() {
        let guild = guild();
        let owner = &guild.members[&UserId::new(100)];
        let moderator = &guild.members[&UserId::new(200)];
        let admin = &guild.members[&UserId::new(300)];

        assert_eq!(guild.member_permissions(owner), Permissions::all());
        assert_eq!(guild.member_permissions(admin), Permissions::all());
        assert_eq!(
            guild.member_permissions(moderator),
            Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::CONNECT
                | Permissions::KICK_MEMBERS
        );
    }

    #[test]
    fn channel_overwrites_apply_in_order() {
        let guild = guild();
        let moderator = &guild.members[&UserId::new(200)];
        let general = &guild.channels[&ChannelId::new(10)];
        let secret = &guild.channels[&ChannelId::new(11)];

        let in_general = guild.user_permissions_in(general, moderator);
        assert!(in_general.send_messages());
        assert!(!in_general.connect());

        let in_secret = guild.user_permissions_in(secret, moderator);
        assert_eq!(in_secret, Permissions::KICK_MEMBERS);
    }

    #[test]
    fn member_lookup_by_name() {
        let guild = guild();

        assert_eq!(guild.member_named("mod").map(|m| m.user.id), Some(UserId::new(200)));
        assert_eq!(guild.member_named("Moddy").map(|m| m.user.id), Some(UserId::new(200)));
        assert!(guild.member_named("nobody").is_none());
        assert_eq!(guild.members_starting_with("ad", false).len(), 1);
    }

    #[test]
    fn update_replaces_roles_and_keeps_members() {
        let mut guild = guild();
        let fragment = match json!({"name": "renamed", "roles": [role(1, Permissions::empty())]}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(guild.update(&fragment), ["name", "roles"]);
        assert_eq!(guild.name, "renamed");
        assert_eq!(guild.roles.len(), 1);
        assert_eq!(guild.members.len(), 3);
    }
}
