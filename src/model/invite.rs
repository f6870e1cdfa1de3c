//! Models for server and channel invites.

use super::channel::ChannelType;
use super::guild::{NsfwLevel, VerificationLevel};
use super::id::{ChannelId, GuildId};
use super::timestamp::Timestamp;
use super::user::User;
use crate::http::Http;
use crate::internal::prelude::*;

/// Information about an invite code.
///
/// Information can not be accessed for guilds the current user is banned from.
///
/// [Discord docs](https://discord.com/developers/docs/resources/invite#invite-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Invite {
    /// The unique code for the invite.
    pub code: String,
    /// A representation of the minimal amount of information needed about the guild being invited
    /// to.
    pub guild: Option<InviteGuild>,
    /// A representation of the minimal amount of information needed about the [`GuildChannel`]
    /// being invited to.
    ///
    /// [`GuildChannel`]: super::channel::GuildChannel
    pub channel: Option<InviteChannel>,
    /// The user who created the invite.
    pub inviter: Option<User>,
    /// The approximate number of [`Member`]s in the related [`Guild`].
    ///
    /// Only sent when the invite is fetched with counts.
    ///
    /// [`Guild`]: super::guild::Guild
    /// [`Member`]: super::guild::Member
    pub approximate_member_count: Option<u64>,
    /// The approximate number of online [`Member`]s in the related [`Guild`].
    ///
    /// [`Guild`]: super::guild::Guild
    /// [`Member`]: super::guild::Member
    pub approximate_presence_count: Option<u64>,
    /// The expiration date of this invite, returned from [`Http::get_invite`] when
    /// `with_expiration` is true.
    pub expires_at: Option<Timestamp>,
    /// Metadata only present on invites fetched from a guild or channel.
    #[serde(flatten)]
    pub metadata: Option<InviteMetadata>,
}

impl Invite {
    /// Deletes the invite.
    ///
    /// **Note**: Requires the [Manage Guild] permission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission.
    ///
    /// [Manage Guild]: super::Permissions::MANAGE_GUILD
    pub async fn delete(&self, http: impl AsRef<Http>) -> Result<Invite> {
        http.as_ref().delete_invite(&self.code, None).await
    }

    /// Gets information about an invite.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if the invite is invalid.
    pub async fn get(http: impl AsRef<Http>, code: &str, with_counts: bool) -> Result<Invite> {
        let code = crate::utils::parse_invite(code);

        http.as_ref().get_invite(code, with_counts).await
    }

    /// Returns a URL to use for the invite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::json::{from_value, json};
    /// # use accord::model::invite::Invite;
    /// # let invite: Invite = from_value(json!({"code": "WxZumR"})).unwrap();
    /// assert_eq!(invite.url(), "https://discord.gg/WxZumR");
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

/// Extra information returned for invites listed from a guild or a channel, or just created.
///
/// [Discord docs](https://discord.com/developers/docs/resources/invite#invite-metadata-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct InviteMetadata {
    /// The amount of times that an invite has been used.
    pub uses: u64,
    /// The maximum number of times the invite can be used, 0 meaning unlimited.
    pub max_uses: u64,
    /// The duration in seconds after which the invite expires, 0 meaning never.
    pub max_age: u64,
    /// Whether the invite only grants temporary membership.
    pub temporary: bool,
    /// The time the invite was created.
    pub created_at: Timestamp,
}

/// A minimal amount of information about the channel an invite points to.
///
/// [Discord docs](https://discord.com/developers/docs/resources/invite#invite-object-example-invite-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct InviteChannel {
    pub id: ChannelId,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
}

/// Subset of [`Guild`] used in [`Invite`].
///
/// [`Guild`]: super::guild::Guild
///
/// [Discord docs](https://discord.com/developers/docs/resources/invite#invite-object-example-invite-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct InviteGuild {
    pub id: GuildId,
    pub name: String,
    pub splash: Option<String>,
    pub banner: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub verification_level: VerificationLevel,
    pub vanity_url_code: Option<String>,
    pub nsfw_level: Option<NsfwLevel>,
    pub premium_subscription_count: Option<u64>,
}

impl InviteGuild {
    /// Returns the formatted URL of the guild's icon, if the guild has an icon.
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        super::guild::icon_url(self.id, self.icon.as_deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn metadata_is_only_present_on_listed_invites() {
        let public: Invite = from_value(json!({
            "code": "rust",
            "channel": {"id": "2", "name": "welcome", "type": 0},
            "guild": {"id": "1", "name": "crabs", "verification_level": 1},
        }))
        .unwrap();

        assert!(public.metadata.is_none());
        assert_eq!(public.channel.as_ref().unwrap().kind, ChannelType::Text);
        assert_eq!(public.url(), "https://discord.gg/rust");

        let listed: Invite = from_value(json!({
            "code": "rust",
            "uses": 3,
            "max_uses": 10,
            "max_age": 0,
            "temporary": false,
            "created_at": "2024-01-01T00:00:00.000000+00:00",
        }))
        .unwrap();

        assert_eq!(listed.metadata.unwrap().uses, 3);
    }
}
