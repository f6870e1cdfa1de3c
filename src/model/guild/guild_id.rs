use std::collections::HashMap;

use super::{Ban, Emoji, Guild, GuildInfo, GuildPreview, GuildPrune, Member, PartialGuild, Role};
use crate::builder::{CreateChannel, CreateEmoji, EditEmoji, EditGuild, EditMember, EditRole};
use crate::constants::BAN_DELETE_MESSAGE_DAYS_MAX;
use crate::http::{BansIter, Http, MembersIter, Paginator};
use crate::internal::prelude::*;
use crate::model::channel::GuildChannel;
use crate::model::id::{ChannelId, EmojiId, GuildId, RoleId, UserId};
use crate::model::invite::Invite;
use crate::model::ModelError;

impl GuildId {
    /// Bans a [`User`] from the guild, deleting their messages from the last `dmd` days.
    ///
    /// Refer to the documentation for [`Guild::ban`] for more information.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Examples
    ///
    /// Ban a member and remove all messages they've sent in the last 4 days:
    ///
    /// ```rust,no_run
    /// use accord::model::id::{GuildId, UserId};
    /// # use accord::http::Http;
    ///
    /// # async fn run(http: &Http) -> accord::Result<()> {
    /// // assuming a `user` has already been bound
    /// let user_id = UserId::new(2);
    /// let _ = GuildId::new(81384788765712384).ban(http, user_id, 4, Some("spam")).await;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::DeleteMessageDaysAmount`] if the number of days' worth of messages
    /// to delete is over the maximum, or a [`ModelError::AuditLogReasonTooLong`] for an
    /// overlong reason.
    ///
    /// Also can return [`Error::Http`] if the current user lacks permission.
    ///
    /// [`User`]: crate::model::user::User
    /// [Ban Members]: crate::model::Permissions::BAN_MEMBERS
    pub async fn ban(
        self,
        http: impl AsRef<Http>,
        user_id: UserId,
        dmd: u8,
        reason: Option<&str>,
    ) -> Result<()> {
        if dmd > BAN_DELETE_MESSAGE_DAYS_MAX {
            return Err(Error::Model(ModelError::DeleteMessageDaysAmount(dmd)));
        }

        http.as_ref().ban_user(self, user_id, dmd, reason).await
    }

    /// Gets the first page of bans of the guild. Use [`Self::bans_iter`] to walk every ban.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission to perform bans.
    ///
    /// [Ban Members]: crate::model::Permissions::BAN_MEMBERS
    pub async fn bans(self, http: impl AsRef<Http>) -> Result<Vec<Ban>> {
        http.as_ref().get_bans(self, None, None).await
    }

    /// Returns a paginator over every ban of the guild, in ascending user id order.
    pub fn bans_iter<H: AsRef<Http> + Send + Sync>(self, http: H) -> Paginator<BansIter<H>> {
        Paginator::new(BansIter::new(http, self))
    }

    /// Unbans a [`User`] from the guild.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission.
    ///
    /// [`User`]: crate::model::user::User
    /// [Ban Members]: crate::model::Permissions::BAN_MEMBERS
    pub async fn unban(
        self,
        http: impl AsRef<Http>,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<()> {
        http.as_ref().remove_ban(self, user_id, reason).await
    }

    /// Gets all of the guild's channels over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user is not in the guild.
    pub async fn channels(
        self,
        http: impl AsRef<Http>,
    ) -> Result<HashMap<ChannelId, GuildChannel>> {
        let channels = http.as_ref().get_channels(self).await?;

        Ok(channels.into_iter().map(|c| (c.id, c)).collect())
    }

    /// Creates a [`GuildChannel`] in the guild.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Examples
    ///
    /// Create a voice channel in a guild with the name `test`:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// use accord::builder::CreateChannel;
    /// use accord::model::channel::ChannelType;
    /// use accord::model::id::GuildId;
    ///
    /// # async fn run(http: &Http) -> accord::Result<()> {
    /// let builder = CreateChannel::new("test").kind(ChannelType::Voice);
    /// let _channel = GuildId::new(7).create_channel(http, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn create_channel(
        self,
        http: impl AsRef<Http>,
        builder: CreateChannel,
    ) -> Result<GuildChannel> {
        http.as_ref().create_channel(self, &builder, builder.audit_log_reason.as_deref()).await
    }

    /// Reorders the channels of the guild.
    ///
    /// Accepts an iterator of a tuple of the channel ID to modify and its new position.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn reorder_channels(
        self,
        http: impl AsRef<Http>,
        channels: impl IntoIterator<Item = (ChannelId, u64)>,
    ) -> Result<()> {
        let items: Vec<Value> = channels
            .into_iter()
            .map(|(id, pos)| crate::json::json!({"id": id, "position": pos}))
            .collect();

        http.as_ref().edit_guild_channel_positions(self, &Value::from(items)).await
    }

    /// Creates an emoji in the guild with a name and base64-encoded image.
    ///
    /// **Note**: Requires the [Manage Guild Expressions] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, if the name is too long, or
    /// if the image is too big.
    ///
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn create_emoji(self, http: impl AsRef<Http>, builder: CreateEmoji) -> Result<Emoji> {
        http.as_ref().create_emoji(self, &builder, builder.audit_log_reason.as_deref()).await
    }

    /// Edits an [`Emoji`]'s name or roles in the guild.
    ///
    /// **Note**: Requires the [Manage Guild Expressions] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn edit_emoji(
        self,
        http: impl AsRef<Http>,
        emoji_id: EmojiId,
        builder: EditEmoji,
    ) -> Result<Emoji> {
        let reason = builder.audit_log_reason.as_deref();
        http.as_ref().edit_emoji(self, emoji_id, &builder, reason).await
    }

    /// Deletes an [`Emoji`] from the guild.
    ///
    /// **Note**: Requires the [Manage Guild Expressions] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if an emoji with that Id
    /// does not exist.
    ///
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn delete_emoji(self, http: impl AsRef<Http>, emoji_id: EmojiId) -> Result<()> {
        http.as_ref().delete_emoji(self, emoji_id, None).await
    }

    /// Gets an [`Emoji`] of the guild by Id over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if an emoji with that Id does not exist.
    pub async fn emoji(self, http: impl AsRef<Http>, emoji_id: EmojiId) -> Result<Emoji> {
        http.as_ref().get_emoji(self, emoji_id).await
    }

    /// Gets a list of all of the guild's emojis over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user is not in the guild.
    pub async fn emojis(self, http: impl AsRef<Http>) -> Result<Vec<Emoji>> {
        http.as_ref().get_emojis(self).await
    }

    /// Creates a new role in the guild with the data set, if any.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn create_role(self, http: impl AsRef<Http>, builder: EditRole) -> Result<Role> {
        let http = http.as_ref();
        let role = http.create_role(self, &builder, builder.audit_log_reason.as_deref()).await?;

        if let Some(position) = builder.position {
            http.edit_role_positions(self, &[(role.id, position)], None).await?;
        }

        Ok(role)
    }

    /// Edits a role, optionally setting its fields.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn edit_role(
        self,
        http: impl AsRef<Http>,
        role_id: RoleId,
        builder: EditRole,
    ) -> Result<Role> {
        let http = http.as_ref();
        let mut role =
            http.edit_role(self, role_id, &builder, builder.audit_log_reason.as_deref()).await?;

        if let Some(position) = builder.position {
            let roles = http.edit_role_positions(self, &[(role_id, position)], None).await?;
            if let Some(moved) = roles.into_iter().find(|r| r.id == role_id) {
                role = moved;
            }
        }

        Ok(role)
    }

    /// Edits the order of a role in the guild, returning every role of the guild in its new
    /// order.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn edit_role_position(
        self,
        http: impl AsRef<Http>,
        role_id: RoleId,
        position: u16,
    ) -> Result<Vec<Role>> {
        http.as_ref().edit_role_positions(self, &[(role_id, position)], None).await
    }

    /// Deletes a [`Role`] by Id from the guild.
    ///
    /// Also see [`Role::delete`] if you have a role in hand.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to delete the role.
    ///
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn delete_role(self, http: impl AsRef<Http>, role_id: RoleId) -> Result<()> {
        http.as_ref().delete_role(self, role_id, None).await
    }

    /// Gets all of the guild's roles over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user is not in the guild.
    pub async fn roles(self, http: impl AsRef<Http>) -> Result<HashMap<RoleId, Role>> {
        let roles = http.as_ref().get_guild_roles(self).await?;

        Ok(roles.into_iter().map(|r| (r.id, r)).collect())
    }

    /// Edits the guild's settings.
    ///
    /// **Note**: Requires the [Manage Guild] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild]: crate::model::Permissions::MANAGE_GUILD
    pub async fn edit(self, http: impl AsRef<Http>, builder: EditGuild) -> Result<PartialGuild> {
        http.as_ref().edit_guild(self, &builder, builder.audit_log_reason.as_deref()).await
    }

    /// Edits a [`Member`] of the guild.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks necessary permissions.
    pub async fn edit_member(
        self,
        http: impl AsRef<Http>,
        user_id: UserId,
        builder: EditMember,
    ) -> Result<Member> {
        let reason = builder.audit_log_reason.as_deref();
        http.as_ref().edit_member(self, user_id, &builder, reason).await
    }

    /// Edits the current user's nickname for the guild.
    ///
    /// Pass [`None`] to reset the nickname.
    ///
    /// **Note**: Requires the [Change Nickname] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Change Nickname]: crate::model::Permissions::CHANGE_NICKNAME
    pub async fn edit_nickname(
        self,
        http: impl AsRef<Http>,
        new_nickname: Option<&str>,
    ) -> Result<()> {
        http.as_ref().edit_nickname(self, new_nickname, None).await
    }

    /// Gets a [`Member`] of the guild by Id over the REST API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the user is not in the guild.
    pub async fn member(self, http: impl AsRef<Http>, user_id: UserId) -> Result<Member> {
        http.as_ref().get_member(self, user_id).await
    }

    /// Gets one page of the guild's members, optionally after a user Id. The limit defaults to 1
    /// and may be at most 1000.
    ///
    /// Use [`Self::members_iter`] to walk the whole member list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the API returns an error, such as when the limit is out of
    /// range.
    pub async fn members(
        self,
        http: impl AsRef<Http>,
        limit: Option<u16>,
        after: Option<UserId>,
    ) -> Result<Vec<Member>> {
        http.as_ref().get_guild_members(self, limit, after).await
    }

    /// Returns a paginator over every member of the guild, in ascending user id order, requesting
    /// 1000 members per page.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::id::GuildId;
    /// use futures::StreamExt;
    ///
    /// # async fn run(http: &Http, guild_id: GuildId) -> accord::Result<()> {
    /// let mut members = guild_id.members_iter(http).stream();
    /// while let Some(member) = members.next().await {
    ///     println!("{} is a member", member?.display_name());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn members_iter<H: AsRef<Http> + Send + Sync>(self, http: H) -> Paginator<MembersIter<H>> {
        Paginator::new(MembersIter::new(http, self))
    }

    /// Searches the guild for members whose username or nickname starts with the query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the API returns an error.
    pub async fn search_members(
        self,
        http: impl AsRef<Http>,
        query: &str,
        limit: Option<u16>,
    ) -> Result<Vec<Member>> {
        http.as_ref().search_guild_members(self, query, limit).await
    }

    /// Kicks a [`Member`] from the guild.
    ///
    /// **Note**: Requires the [Kick Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the member cannot be kicked by the current user.
    ///
    /// [Kick Members]: crate::model::Permissions::KICK_MEMBERS
    pub async fn kick(
        self,
        http: impl AsRef<Http>,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<()> {
        http.as_ref().kick_member(self, user_id, reason).await
    }

    /// Leaves the guild.
    ///
    /// # Errors
    ///
    /// May return an [`Error::Http`] if the current user cannot leave the guild, or currently is
    /// not in the guild.
    pub async fn leave(self, http: impl AsRef<Http>) -> Result<()> {
        http.as_ref().leave_guild(self).await
    }

    /// Deletes the guild. The current user must be the owner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user is not the owner of the guild.
    pub async fn delete(self, http: impl AsRef<Http>) -> Result<()> {
        http.as_ref().delete_guild(self).await
    }

    /// Requests the guild over REST, with approximate member and presence counts.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if the current user is not in the guild.
    pub async fn to_partial_guild(self, http: impl AsRef<Http>) -> Result<PartialGuild> {
        http.as_ref().get_guild(self).await
    }

    /// Gets the preview of a discoverable guild, or one the current user is in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the guild is not available to the current user.
    pub async fn preview(self, http: impl AsRef<Http>) -> Result<GuildPreview> {
        http.as_ref().get_guild_preview(self).await
    }

    /// Gets the number of [`Member`]s that would be pruned with the given number of days.
    ///
    /// **Note**: Requires the [Kick Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Kick Members]: crate::model::Permissions::KICK_MEMBERS
    pub async fn prune_count(self, http: impl AsRef<Http>, days: u8) -> Result<GuildPrune> {
        http.as_ref().get_guild_prune_count(self, days).await
    }

    /// Starts a prune of [`Member`]s inactive for the given number of days.
    ///
    /// **Note**: Requires the [Kick Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Kick Members]: crate::model::Permissions::KICK_MEMBERS
    pub async fn start_prune(
        self,
        http: impl AsRef<Http>,
        days: u8,
        reason: Option<&str>,
    ) -> Result<GuildPrune> {
        http.as_ref().start_guild_prune(self, days, reason).await
    }

    /// Gets all of the guild's invites.
    ///
    /// **Note**: Requires the [Manage Guild] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild]: crate::model::Permissions::MANAGE_GUILD
    pub async fn invites(self, http: impl AsRef<Http>) -> Result<Vec<Invite>> {
        http.as_ref().get_guild_invites(self).await
    }
}

impl From<&PartialGuild> for GuildId {
    /// Gets the Id of a partial guild.
    fn from(guild: &PartialGuild) -> GuildId {
        guild.id
    }
}

impl From<&GuildInfo> for GuildId {
    /// Gets the Id of Guild information struct.
    fn from(guild_info: &GuildInfo) -> GuildId {
        guild_info.id
    }
}

impl From<&Guild> for GuildId {
    /// Gets the Id of Guild.
    fn from(live_guild: &Guild) -> GuildId {
        live_guild.id
    }
}
