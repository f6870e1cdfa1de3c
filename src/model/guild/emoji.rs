use std::fmt;

use crate::builder::EditEmoji;
use crate::http::Http;
use crate::internal::prelude::*;
use crate::model::id::{EmojiId, GuildId, RoleId};
use crate::model::user::User;

/// Represents a custom guild emoji, which can either be created using the API, or via an
/// integration. Emojis created using the API only work within the guild it was created in.
///
/// Fields Discord may leave out are [`None`] when absent from the payload.
///
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#emoji-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Emoji {
    /// The Id of the emoji.
    pub id: EmojiId,
    /// The name of the emoji. It must be at least 2 characters long and can only contain
    /// alphanumeric characters and underscores.
    pub name: String,
    /// Whether the emoji is animated.
    pub animated: Option<bool>,
    /// Whether the emoji can be used. This may be false when the guild loses boosts, reducing the
    /// emoji limit.
    pub available: Option<bool>,
    /// Whether the emoji is managed via an integration service.
    pub managed: Option<bool>,
    /// Whether the emoji name needs to be surrounded by colons in order to be used by the client.
    pub require_colons: Option<bool>,
    /// A list of [`Role`]s that are allowed to use the emoji. If there are no roles specified,
    /// then usage is unrestricted.
    ///
    /// [`Role`]: super::Role
    pub roles: Option<Vec<RoleId>>,
    /// The user who created the emoji.
    pub user: Option<User>,
}

impl_update!(Emoji {
    "name" => name,
    "animated" => animated,
    "available" => available,
    "managed" => managed,
    "require_colons" => require_colons,
    "roles" => roles,
    "user" => user,
});

impl Emoji {
    /// Deletes the emoji. This method requires the guild the emoji belongs to.
    ///
    /// **Note**: The [Manage Guild Expressions] permission is required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn delete(&self, http: impl AsRef<Http>, guild_id: GuildId) -> Result<()> {
        http.as_ref().delete_emoji(guild_id, self.id, None).await
    }

    /// Edits the emoji by updating it with a new name. This method requires the guild the emoji
    /// belongs to.
    ///
    /// **Note**: The [Manage Guild Expressions] permission is required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission, or if an invalid name is
    /// given.
    ///
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn edit(
        &mut self,
        http: impl AsRef<Http>,
        guild_id: GuildId,
        name: &str,
    ) -> Result<()> {
        let builder = EditEmoji::new().name(name);
        *self = http.as_ref().edit_emoji(guild_id, self.id, &builder, None).await?;

        Ok(())
    }

    /// Whether the emoji is animated. An unset flag means a static emoji.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.animated.unwrap_or_default()
    }

    /// Whether the emoji can be used. Discord only sends the flag when it is known, and an
    /// unset flag means the emoji is available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// Generates a URL to the emoji's image.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::json::json;
    /// # use accord::model::guild::Emoji;
    /// let emoji: Emoji = serde_json::from_value(json!({"id": "7", "name": "blobwave"}))?;
    ///
    /// assert_eq!(emoji.url(), "https://cdn.discordapp.com/emojis/7.png");
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        let extension = if self.is_animated() { "gif" } else { "png" };
        cdn!("/emojis/{}.{}", self.id, extension)
    }
}

impl fmt::Display for Emoji {
    /// Formats the emoji into a string that will cause Discord clients to render the emoji.
    ///
    /// This is in the format of either `<:NAME:EMOJI_ID>` for normal emojis, or
    /// `<a:NAME:EMOJI_ID>` for animated emojis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_animated() {
            f.write_str("<a:")?;
        } else {
            f.write_str("<:")?;
        }
        f.write_str(&self.name)?;
        f.write_str(":")?;
        fmt::Display::fmt(&self.id, f)?;
        f.write_str(">")
    }
}

impl From<&Emoji> for EmojiId {
    /// Gets the Id of an [`Emoji`].
    fn from(emoji: &Emoji) -> EmojiId {
        emoji.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn emoji_defaults_and_display() {
        let emoji: Emoji =
            from_value(json!({"id": "9", "name": "dance", "animated": true})).unwrap();

        assert!(emoji.is_available());
        assert_eq!(emoji.roles, None);
        assert_eq!(emoji.to_string(), "<a:dance:9>");
        assert_eq!(emoji.url(), "https://cdn.discordapp.com/emojis/9.gif");
    }

    #[test]
    fn unset_flags_differ_from_explicit_ones() {
        let unset: Emoji = from_value(json!({"id": "9", "name": "dance"})).unwrap();
        let explicit: Emoji = from_value(json!({
            "id": "9",
            "name": "dance",
            "available": false,
            "roles": [],
        }))
        .unwrap();

        assert_eq!(unset.available, None);
        assert!(unset.is_available());
        assert_eq!(explicit.available, Some(false));
        assert!(!explicit.is_available());
        assert_eq!(explicit.roles, Some(vec![]));
    }
}
