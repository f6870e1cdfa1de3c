use std::borrow::Cow;
use std::fmt;

use super::{Guild, Role};
use crate::builder::EditMember;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::id::{GuildId, RoleId, UserId};
use crate::model::mention::Mentionable;
use crate::model::timestamp::Timestamp;
use crate::model::user::User;
use crate::model::Permissions;
use crate::utils::Colour;

bitflags_int! {
    /// Flags for a guild member.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object-guild-member-flags).
    #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct GuildMemberFlags: u32 {
        /// Member has left and rejoined the guild.
        const DID_REJOIN = 1 << 0;
        /// Member has completed onboarding.
        const COMPLETED_ONBOARDING = 1 << 1;
        /// Member is exempt from guild verification requirements.
        const BYPASSES_VERIFICATION = 1 << 2;
        /// Member has started onboarding.
        const STARTED_ONBOARDING = 1 << 3;
    }
}

/// Information about a member of a guild.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Member {
    /// Attached User struct.
    pub user: User,
    /// The member's nickname, if present.
    ///
    /// Can't be longer than 32 characters.
    pub nick: Option<String>,
    /// The guild avatar hash
    pub avatar: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member.
    pub roles: Vec<RoleId>,
    /// Timestamp representing the date when the member joined.
    pub joined_at: Timestamp,
    /// Timestamp representing the date since the member is boosting the guild.
    pub premium_since: Option<Timestamp>,
    /// Indicator of whether the member can hear in voice channels.
    ///
    /// Member objects sent alongside gateway events other than guild creation leave this out.
    pub deaf: Option<bool>,
    /// Indicator of whether the member can speak in voice channels.
    pub mute: Option<bool>,
    /// Guild member flags.
    pub flags: Option<GuildMemberFlags>,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    pub pending: Option<bool>,
    /// The total permissions of the member in a channel, including overrides. Only present in
    /// interaction payloads.
    pub permissions: Option<Permissions>,
    /// When the user's timeout will expire and the user will be able to communicate in the guild
    /// again.
    ///
    /// Will be None or a time in the past if the user is not timed out.
    pub communication_disabled_until: Option<Timestamp>,
    /// The unique Id of the guild that the member is a part of.
    ///
    /// Discord leaves this out of member objects nested in a guild or fetched by guild; the
    /// library fills it in from the surrounding payload.
    pub guild_id: GuildId,
}

impl_update!(Member {
    "user" => user,
    "nick" => nick,
    "avatar" => avatar,
    "roles" => roles,
    "joined_at" => joined_at,
    "premium_since" => premium_since,
    "deaf" => deaf,
    "mute" => mute,
    "flags" => flags,
    "pending" => pending,
    "communication_disabled_until" => communication_disabled_until,
});

impl Member {
    /// Adds a [`Role`] to the member.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if a role with the given
    /// Id does not exist.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn add_role(&mut self, http: impl AsRef<Http>, role_id: RoleId) -> Result<()> {
        http.as_ref().add_member_role(self.guild_id, self.user.id, role_id, None).await?;

        if !self.roles.contains(&role_id) {
            self.roles.push(role_id);
        }

        Ok(())
    }

    /// Adds one or multiple [`Role`]s to the member, in one request.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if a role with a given Id
    /// does not exist.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn add_roles(&mut self, http: impl AsRef<Http>, role_ids: &[RoleId]) -> Result<()> {
        let mut roles = self.roles.clone();
        roles.extend(role_ids.iter().filter(|id| !self.roles.contains(id)));

        self.edit(http, EditMember::new().roles(roles)).await
    }

    /// Removes a [`Role`] from the member.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if a role with the given Id does not exist, or if the current user
    /// lacks permission.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn remove_role(&mut self, http: impl AsRef<Http>, role_id: RoleId) -> Result<()> {
        http.as_ref().remove_member_role(self.guild_id, self.user.id, role_id, None).await?;
        self.roles.retain(|r| *r != role_id);

        Ok(())
    }

    /// Removes one or multiple [`Role`]s from the member, in one request.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn remove_roles(
        &mut self,
        http: impl AsRef<Http>,
        role_ids: &[RoleId],
    ) -> Result<()> {
        let roles = self.roles_without(role_ids);

        self.edit(http, EditMember::new().roles(roles)).await
    }

    fn roles_without(&self, role_ids: &[RoleId]) -> Vec<RoleId> {
        self.roles.iter().copied().filter(|id| !role_ids.contains(id)).collect()
    }

    /// Ban the member from its guild, deleting the last X number of days' worth of messages.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::DeleteMessageDaysAmount`] if the `dmd` is greater than 7, or a
    /// [`ModelError::AuditLogReasonTooLong`] if the reason is too long.
    ///
    /// [Ban Members]: Permissions::BAN_MEMBERS
    /// [`ModelError::DeleteMessageDaysAmount`]: crate::model::ModelError::DeleteMessageDaysAmount
    /// [`ModelError::AuditLogReasonTooLong`]: crate::model::ModelError::AuditLogReasonTooLong
    pub async fn ban(&self, http: impl AsRef<Http>, dmd: u8, reason: Option<&str>) -> Result<()> {
        self.guild_id.ban(http, self.user.id, dmd, reason).await
    }

    /// Kicks the member from the guild.
    ///
    /// **Note**: Requires the [Kick Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Kick Members]: Permissions::KICK_MEMBERS
    pub async fn kick(&self, http: impl AsRef<Http>, reason: Option<&str>) -> Result<()> {
        self.guild_id.kick(http, self.user.id, reason).await
    }

    /// Edits the member in place with the given data.
    ///
    /// **Note**: Requires the permissions matching the edited fields, see [`EditMember`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks necessary permissions.
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditMember) -> Result<()> {
        *self = self.guild_id.edit_member(http, self.user.id, builder).await?;
        Ok(())
    }

    /// Unbans the [`User`] from the guild.
    ///
    /// **Note**: Requires the [Ban Members] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission.
    ///
    /// [Ban Members]: Permissions::BAN_MEMBERS
    pub async fn unban(&self, http: impl AsRef<Http>) -> Result<()> {
        http.as_ref().remove_ban(self.guild_id, self.user.id, None).await
    }

    /// Returns the "nickname" of the member, or the display name of the user if none is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }

    /// Returns the DiscordTag of a Member, taking possible nickname into account.
    #[must_use]
    pub fn distinct(&self) -> Cow<'_, str> {
        match self.user.discriminator {
            Some(discriminator) => {
                Cow::Owned(format!("{}#{:04}", self.display_name(), discriminator.get()))
            },
            None => Cow::Borrowed(self.display_name()),
        }
    }

    /// Returns the formatted URL of the member's per guild avatar, if one exists.
    ///
    /// This will produce a WEBP image URL, or GIF if the member has a GIF avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_deref().map(|hash| {
            let ext = if hash.starts_with("a_") { "gif" } else { "webp" };

            cdn!(
                "/guilds/{}/users/{}/avatars/{}.{}?size=1024",
                self.guild_id,
                self.user.id,
                hash,
                ext
            )
        })
    }

    /// Retrieves the URL to the member's avatar, falling back to the user's avatar, then default
    /// avatar if needed.
    #[must_use]
    pub fn face(&self) -> String {
        self.avatar_url().unwrap_or_else(|| self.user.face())
    }

    /// Returns the member's roles, resolved against the given guild. Roles the guild does not
    /// know about are skipped.
    #[must_use]
    pub fn roles<'a>(&self, guild: &'a Guild) -> Vec<&'a Role> {
        self.roles.iter().filter_map(|id| guild.roles.get(id)).collect()
    }

    /// Retrieves the member's highest role in the given guild, if it has any.
    ///
    /// Ties in position are broken by the lowest role id.
    #[must_use]
    pub fn highest_role<'a>(&self, guild: &'a Guild) -> Option<&'a Role> {
        self.roles(guild).into_iter().max_by(|a, b| {
            a.position.cmp(&b.position).then_with(|| b.id.cmp(&a.id))
        })
    }

    /// Returns the colour of the highest hoisted role with a colour, if any.
    #[must_use]
    pub fn colour(&self, guild: &Guild) -> Option<Colour> {
        let mut roles = self.roles(guild);
        roles.retain(|role| role.colour.0 != 0);
        roles.sort_by(|a, b| b.cmp(a));

        roles.first().map(|role| role.colour)
    }

    /// Calculates the member's guild-level permissions in the given guild.
    ///
    /// See [`Guild::member_permissions`].
    #[must_use]
    pub fn permissions(&self, guild: &Guild) -> Permissions {
        guild.member_permissions(self)
    }
}

impl fmt::Display for Member {
    /// Mentions the user so that they receive a notification.
    // This is in the format of `<@USER_ID>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.user.mention(), f)
    }
}

impl From<&Member> for UserId {
    /// Gets the Id of a [`Member`].
    fn from(member: &Member) -> UserId {
        member.user.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn removing_roles_keeps_the_rest_in_order() {
        let member: Member = from_value(json!({
            "guild_id": "1",
            "user": {"id": "2", "username": "ferris", "discriminator": "0", "avatar": null},
            "roles": ["10", "11", "12", "13"],
            "joined_at": "2024-01-01T00:00:00.000Z",
        }))
        .unwrap();

        let removed = member.roles_without(&[RoleId::new(11), RoleId::new(13), RoleId::new(99)]);
        assert_eq!(removed, vec![RoleId::new(10), RoleId::new(12)]);
        assert_eq!(member.roles_without(&[]), member.roles);
    }
}
