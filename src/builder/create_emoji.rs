use crate::internal::prelude::*;
use crate::model::id::RoleId;

/// A builder to create a custom [`Emoji`] in a guild, for use via [`GuildId::create_emoji`].
///
/// # Examples
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::id::GuildId;
/// use accord::builder::CreateEmoji;
/// use accord::utils::encode_image;
///
/// # async fn run(http: &Http, guild_id: GuildId) -> accord::Result<()> {
/// let image = encode_image("image/png", &std::fs::read("./blob.png")?);
/// let emoji = guild_id.create_emoji(http, CreateEmoji::new("blob", image)).await?;
/// # Ok(())
/// # }
/// ```
///
/// [`Emoji`]: crate::model::guild::Emoji
/// [`GuildId::create_emoji`]: crate::model::id::GuildId::create_emoji
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#create-guild-emoji).
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct CreateEmoji {
    name: String,
    image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    roles: Vec<RoleId>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl CreateEmoji {
    /// Creates a builder with the emoji's name and its image, as a data URI no larger than
    /// 256 KiB.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            roles: Vec::new(),
            audit_log_reason: None,
        }
    }

    /// Only members with one of these roles may use the emoji.
    pub fn roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Sets the request's audit log reason.
    pub fn audit_log_reason(mut self, reason: impl Into<String>) -> Self {
        self.audit_log_reason = Some(reason.into());
        self
    }
}
