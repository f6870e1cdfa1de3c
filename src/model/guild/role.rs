use std::cmp::Ordering;
use std::fmt;

use serde::de::IgnoredAny;

use crate::builder::EditRole;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::id::{GuildId, RoleId, UserId};
use crate::model::mention::Mentionable;
use crate::model::Permissions;
use crate::utils::Colour;

/// Information about a role within a guild. A role represents a set of permissions, and can be
/// attached to one or multiple users. A role has various miscellaneous configurations, such as
/// being assigned a colour. Roles are unique per guild and do not cross over to other guilds in
/// any way, and can have channel-specific permission overrides in addition to guild-level
/// permissions.
///
/// [Discord docs](https://discord.com/developers/docs/topics/permissions#role-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Role {
    /// The Id of the role. Can be used to calculate the role's creation date.
    pub id: RoleId,
    /// The name of the role.
    pub name: String,
    /// The colour of the role.
    #[serde(rename = "color")]
    pub colour: Colour,
    /// Indicator of whether the role is pinned above lesser roles.
    ///
    /// In the client, this causes [`Member`]s in the role to be seen above those in roles with a
    /// lower [`Self::position`].
    ///
    /// [`Member`]: super::Member
    pub hoist: bool,
    /// Role icon image hash.
    pub icon: Option<String>,
    /// Role unicoded image.
    pub unicode_emoji: Option<String>,
    /// The position of the role in the role hierarchy. Roles with a higher position are ranked
    /// above lower ones.
    pub position: u16,
    /// The permissions that the role grants.
    pub permissions: Permissions,
    /// Indicator of whether the role is managed by an integration service.
    pub managed: bool,
    /// Indicator of whether the role can be mentioned, similar to mentioning a specific member or
    /// `@everyone`.
    ///
    /// Only members of the role will be notified if a role is mentioned with this set to `true`.
    pub mentionable: bool,
    /// The tags this role has. It can be used to determine if this role is a special role in this
    /// guild such as guild subscriber role, or if the role is linked to an integration or a bot.
    pub tags: Option<RoleTags>,
}

impl_update!(Role {
    "name" => name,
    "color" => colour,
    "hoist" => hoist,
    "icon" => icon,
    "unicode_emoji" => unicode_emoji,
    "position" => position,
    "permissions" => permissions,
    "managed" => managed,
    "mentionable" => mentionable,
    "tags" => tags,
});

impl Role {
    /// Deletes the role.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission to delete this role.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn delete(&self, http: impl AsRef<Http>, guild_id: GuildId) -> Result<()> {
        guild_id.delete_role(http, self.id).await
    }

    /// Edits the role with the given data, updating it in place with the response.
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// # Examples
    ///
    /// Make a role hoisted, and change its name:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::guild::Role;
    /// # use accord::model::id::GuildId;
    /// use accord::builder::EditRole;
    ///
    /// # async fn run(http: &Http, guild_id: GuildId, mut role: Role) -> accord::Result<()> {
    /// let builder = EditRole::new().name("a test role").hoist(true);
    /// role.edit(http, guild_id, builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user does not have permission to Manage Roles.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub async fn edit(
        &mut self,
        http: impl AsRef<Http>,
        guild_id: GuildId,
        builder: EditRole,
    ) -> Result<()> {
        *self = guild_id.edit_role(http, self.id, builder).await?;
        Ok(())
    }

    /// Check that the role has the given permission.
    #[inline]
    #[must_use]
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.permissions.contains(permission)
    }

    /// Checks whether the role has all of the given permissions.
    ///
    /// The 'precise' argument is used to check if the role's permissions are precisely equivalent
    /// to the given permissions. If you need only check that the role has at least the given
    /// permissions, pass `false`.
    #[inline]
    #[must_use]
    pub fn has_permissions(&self, permissions: Permissions, precise: bool) -> bool {
        if precise {
            self.permissions == permissions
        } else {
            self.permissions.contains(permissions)
        }
    }

    /// Whether this is the `@everyone` role of the given guild.
    #[must_use]
    pub fn is_everyone(&self, guild_id: GuildId) -> bool {
        self.id == guild_id.everyone_role()
    }
}

impl fmt::Display for Role {
    /// Format a mention for the role, pinging its members.
    // This is in the format of: `<@&ROLE_ID>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mention(), f)
    }
}

impl Eq for Role {}

impl Ord for Role {
    fn cmp(&self, other: &Role) -> Ordering {
        if self.position == other.position {
            self.id.cmp(&other.id)
        } else {
            self.position.cmp(&other.position)
        }
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Role) -> bool {
        self.id == other.id
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Role) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The tags of a [`Role`].
///
/// [Discord docs](https://discord.com/developers/docs/topics/permissions#role-object-role-tags-structure).
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct RoleTags {
    /// The Id of the bot the [`Role`] belongs to.
    pub bot_id: Option<UserId>,
    /// The Id of the integration the [`Role`] belongs to.
    pub integration_id: Option<String>,
    /// Whether this is the guild's premium subscriber role.
    ///
    /// Discord marks the role by sending the key with a `null` value.
    #[serde(default, skip_serializing_if = "is_false", with = "present_flag")]
    pub premium_subscriber: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Flags Discord encodes as "key present with a `null` value".
mod present_flag {
    use super::*;

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> StdResult<bool, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(true)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: serde::Serializer>(_: &bool, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    fn role(id: u64, position: u16) -> Role {
        from_value(json!({
            "id": id.to_string(),
            "name": "role",
            "color": 0x1ABC9C,
            "hoist": false,
            "position": position,
            "permissions": "2048",
            "managed": false,
            "mentionable": false,
        }))
        .unwrap()
    }

    #[test]
    fn roles_order_by_position_then_id() {
        let mut roles = [role(3, 1), role(1, 2), role(2, 1)];
        roles.sort();

        let ids: Vec<_> = roles.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn premium_subscriber_tag_is_a_null_key() {
        let tags: RoleTags = from_value(json!({"premium_subscriber": null})).unwrap();
        assert!(tags.premium_subscriber);

        let tags: RoleTags = from_value(json!({"bot_id": "5"})).unwrap();
        assert!(!tags.premium_subscriber);
        assert_eq!(tags.bot_id, Some(UserId::new(5)));
    }

    #[test]
    fn role_permissions() {
        let role = role(1, 0);
        assert!(role.has_permission(Permissions::SEND_MESSAGES));
        assert!(role.has_permissions(Permissions::SEND_MESSAGES, true));
        assert!(!role.has_permissions(Permissions::empty(), true));
        assert_eq!(role.colour.hex(), "1ABC9C");
    }
}
