use crate::internal::prelude::*;
use crate::model::prelude::*;
use crate::utils::Colour;

/// A builder to create or edit a [`Role`] for use via a number of model methods.
///
/// These are:
///
/// - [`Guild::create_role`]
/// - [`GuildId::create_role`]
/// - [`GuildId::edit_role`]
/// - [`Role::edit`]
///
/// Defaults are provided for each parameter on role creation.
///
/// # Examples
///
/// Create a hoisted, mentionable role named `"a test role"`:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::id::GuildId;
/// use accord::builder::EditRole;
///
/// # async fn run(http: &Http, guild_id: GuildId) -> accord::Result<()> {
/// let builder = EditRole::new().name("a test role").hoist(true).mentionable(true);
/// let role = guild_id.create_role(http, builder).await?;
/// # Ok(())
/// # }
/// ```
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#modify-guild-role).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "color")]
    colour: Option<Colour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hoist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unicode_emoji: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mentionable: Option<bool>,

    /// Role positions are set through a separate endpoint, after the role itself is written.
    #[serde(skip)]
    pub(crate) position: Option<u16>,
    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl EditRole {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new builder with the values of the given [`Role`].
    pub fn from_role(role: &Role) -> Self {
        EditRole {
            hoist: Some(role.hoist),
            mentionable: Some(role.mentionable),
            name: Some(role.name.clone()),
            permissions: Some(role.permissions.bits()),
            position: Some(role.position),
            colour: Some(role.colour),
            unicode_emoji: role.unicode_emoji.as_ref().map(|v| Some(v.clone())),
            audit_log_reason: None,
            icon: None,
        }
    }

    /// Set the colour of the role.
    pub fn colour(mut self, colour: impl Into<Colour>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    /// Whether or not to hoist the role above lower-positioned roles in the user list.
    pub fn hoist(mut self, hoist: bool) -> Self {
        self.hoist = Some(hoist);
        self
    }

    /// Whether or not to make the role mentionable, upon which users with that role will be
    /// notified.
    pub fn mentionable(mut self, mentionable: bool) -> Self {
        self.mentionable = Some(mentionable);
        self
    }

    /// Set the role's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the role's permissions.
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions.bits());
        self
    }

    /// Set the role's position in the role list. This correlates to the role's position in the
    /// user list.
    pub fn position(mut self, position: u16) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the role icon to a unicode emoji.
    pub fn unicode_emoji(mut self, unicode_emoji: Option<String>) -> Self {
        self.unicode_emoji = Some(unicode_emoji);
        self.icon = Some(None);
        self
    }

    /// Set the role icon to a custom image, as a data URI.
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = Some(icon);
        self.unicode_emoji = Some(None);
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
    fn position_and_reason_stay_out_of_the_body() {
        let builder = EditRole::new()
            .name("mods")
            .colour(Colour(0x00ff00))
            .position(3)
            .audit_log_reason("promotion");

        assert_eq!(to_value(&builder).unwrap(), json!({"name": "mods", "color": 0x00ff00}));
        assert_eq!(builder.position, Some(3));
    }

    #[test]
    fn icon_and_emoji_exclude_each_other() {
        let builder = EditRole::new().unicode_emoji(Some("\u{1F980}".into()));
        assert_eq!(
            to_value(&builder).unwrap(),
            json!({"unicode_emoji": "\u{1F980}", "icon": null})
        );
    }
}
