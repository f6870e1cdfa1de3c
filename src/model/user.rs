//! User information-related models.

use std::fmt;
use std::num::NonZeroU16;
use std::ops::{Deref, DerefMut};

use super::channel::PrivateChannel;
use super::guild::GuildInfo;
use super::id::UserId;
use super::mention::Mentionable;
use crate::builder::EditProfile;
use crate::http::{GuildsIter, Http, Paginator};
use crate::internal::prelude::*;
use crate::utils::Colour;

/// Used with `#[serde(with = "discriminator")]`.
///
/// Users migrated to the unique username system have a discriminator of `"0"`, which is decoded
/// as [`None`].
pub(crate) mod discriminator {
    use std::fmt;
    use std::num::NonZeroU16;

    use serde::de::{Error, Visitor};

    use crate::internal::prelude::*;
    use crate::json::JsonError;

    struct DiscriminatorVisitor;

    impl Visitor<'_> for DiscriminatorVisitor {
        type Value = u16;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("string or integer discriminator")
        }

        fn visit_u64<E: Error>(self, value: u64) -> StdResult<Self::Value, E> {
            u16::try_from(value).map_err(Error::custom)
        }

        fn visit_str<E: Error>(self, value: &str) -> StdResult<Self::Value, E> {
            value.parse().map_err(Error::custom)
        }
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> StdResult<Option<NonZeroU16>, D::Error> {
        deserializer.deserialize_any(DiscriminatorVisitor).map(NonZeroU16::new)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: serde::Serializer>(
        value: &Option<NonZeroU16>,
        serializer: S,
    ) -> StdResult<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.collect_str(&format_args!("{:04}", value.get())),
            None => serializer.serialize_str("0"),
        }
    }

    /// The fragment decoder, for use with `impl_update!`.
    pub fn decode(value: &Value) -> StdResult<Option<NonZeroU16>, JsonError> {
        deserialize(value)
    }
}

bitflags_int! {
    /// User's public flags
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/user#user-object-user-flags).
    #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct UserPublicFlags: u32 {
        /// User's flag as discord employee
        const DISCORD_EMPLOYEE = 1 << 0;
        /// User's flag as partnered server owner
        const PARTNERED_SERVER_OWNER = 1 << 1;
        /// User's flag as hypesquad events
        const HYPESQUAD_EVENTS = 1 << 2;
        /// User's flag as bug hunter level 1
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        /// User's flag as house bravery
        const HOUSE_BRAVERY = 1 << 6;
        /// User's flag as house brilliance
        const HOUSE_BRILLIANCE = 1 << 7;
        /// User's flag as house balance
        const HOUSE_BALANCE = 1 << 8;
        /// User's flag as early supporter
        const EARLY_SUPPORTER = 1 << 9;
        /// User's flag as team user
        const TEAM_USER = 1 << 10;
        /// User's flag as system
        const SYSTEM = 1 << 12;
        /// User's flag as bug hunter level 2
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        /// User's flag as verified bot
        const VERIFIED_BOT = 1 << 16;
        /// User's flag as early verified bot developer
        const EARLY_VERIFIED_BOT_DEVELOPER = 1 << 17;
        /// User's flag as discord certified moderator
        const DISCORD_CERTIFIED_MODERATOR = 1 << 18;
        /// Bot's running with HTTP interactions
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        /// User's flag for active developer
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}

enum_number! {
    /// Premium types denote the level of premium a user has. Visit the [Discord docs] for more
    /// information.
    ///
    /// [Discord docs]: https://discord.com/developers/docs/resources/user#user-object-premium-types
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum PremiumType {
        None = 0,
        NitroClassic = 1,
        Nitro = 2,
        NitroBasic = 3,
        _ => Unknown(u8),
    }
}

/// Information about a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    pub id: UserId,
    /// The account's username. Changing username will trigger a discriminator change if the
    /// username+discriminator pair becomes non-unique. Unless the account has migrated to a next
    /// generation username, which does not have a discriminant.
    #[serde(rename = "username")]
    pub name: String,
    /// The account's discriminator to differentiate the user from others with the same
    /// [`Self::name`]. The name+discriminator pair is always unique. If the discriminator is not
    /// present, then this is a next generation username which is implicitly unique.
    #[serde(default, with = "discriminator")]
    pub discriminator: Option<NonZeroU16>,
    /// The account's display name, if it is set. For bots this is the application name.
    pub global_name: Option<String>,
    /// Optional avatar hash.
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    pub bot: Option<bool>,
    /// Whether the user is an Official Discord System user (part of the urgent message system).
    pub system: Option<bool>,
    /// Optional banner hash.
    ///
    /// **Note**: This will only be present if the user is fetched via Rest API, e.g. with
    /// [`Http::get_user`].
    pub banner: Option<String>,
    /// The user's banner colour encoded as an integer representation of hexadecimal colour code
    ///
    /// **Note**: This will only be present if the user is fetched via Rest API, e.g. with
    /// [`Http::get_user`].
    #[serde(rename = "accent_color")]
    pub accent_colour: Option<Colour>,
    /// The public flags on a user's account
    pub public_flags: Option<UserPublicFlags>,
}

impl_update!(User {
    "username" => name,
    "discriminator" => discriminator with discriminator::decode,
    "global_name" => global_name,
    "avatar" => avatar,
    "bot" => bot,
    "system" => system,
    "banner" => banner,
    "accent_color" => accent_colour,
    "public_flags" => public_flags,
});

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl User {
    /// Returns the formatted URL of the user's icon, if one exists.
    ///
    /// This will produce a WEBP image URL, or GIF if the user has a GIF avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        avatar_url(self.id, self.avatar.as_deref())
    }

    /// Returns the formatted URL of the user's banner, if one exists.
    #[must_use]
    pub fn banner_url(&self) -> Option<String> {
        self.banner.as_deref().map(|banner| {
            let ext = if banner.starts_with("a_") { "gif" } else { "webp" };
            cdn!("/banners/{}/{}.{}?size=1024", self.id, banner, ext)
        })
    }

    /// Returns the formatted URL to the user's default avatar URL.
    ///
    /// This will produce a PNG URL.
    #[must_use]
    pub fn default_avatar_url(&self) -> String {
        default_avatar_url(self)
    }

    /// Retrieves the URL to the user's avatar, falling back to the default avatar if needed.
    ///
    /// This will call [`Self::avatar_url`] first, and if that returns [`None`], it then falls
    /// back to [`Self::default_avatar_url`].
    #[must_use]
    pub fn face(&self) -> String {
        self.avatar_url().unwrap_or_else(|| self.default_avatar_url())
    }

    /// Returns the "tag" for the user.
    ///
    /// The "tag" is defined as "username#discriminator", such as "zeyla#5479". Users on the unique
    /// username system have no discriminator, and their tag is just the username.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::json::json;
    /// # use accord::model::user::User;
    /// let user: User = serde_json::from_value(json!({
    ///     "id": "7",
    ///     "username": "zeyla",
    ///     "discriminator": "5479",
    /// }))?;
    ///
    /// assert_eq!(user.tag(), "zeyla#5479");
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    #[must_use]
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(discriminator) => format!("{}#{:04}", self.name, discriminator),
            None => self.name.clone(),
        }
    }

    /// Returns the name shown in the client: the global name if one is set, otherwise the
    /// username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }

    /// Creates a direct message channel between the current user and the user, or returns the
    /// one which already exists.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError::MessagingBot`] if the user is a bot, as bots can not message each
    /// other.
    ///
    /// [`ModelError::MessagingBot`]: super::ModelError::MessagingBot
    pub async fn create_dm_channel(&self, http: impl AsRef<Http>) -> Result<PrivateChannel> {
        if self.bot.unwrap_or_default() {
            return Err(Error::Model(super::ModelError::MessagingBot));
        }

        self.id.create_dm_channel(http).await
    }
}

impl fmt::Display for User {
    /// Formats a string which will mention the user.
    // This is in the format of: `<@USER_ID>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id.mention(), f)
    }
}

impl UserId {
    /// Creates a direct message channel between the current user and the user.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if the user cannot be messaged.
    pub async fn create_dm_channel(self, http: impl AsRef<Http>) -> Result<PrivateChannel> {
        http.as_ref().create_private_channel(self).await
    }

    /// Requests the user from the REST API.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if a [`User`] with that [`UserId`] does not exist.
    pub async fn to_user(self, http: impl AsRef<Http>) -> Result<User> {
        http.as_ref().get_user(self).await
    }
}

impl From<&User> for UserId {
    /// Gets the Id of a [`User`].
    fn from(user: &User) -> UserId {
        user.id
    }
}

impl From<&CurrentUser> for UserId {
    /// Gets the Id of a [`CurrentUser`].
    fn from(current_user: &CurrentUser) -> UserId {
        current_user.id
    }
}

/// Information about the current user.
///
/// This derefs to the [`User`] it extends.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct CurrentUser {
    #[serde(flatten)]
    user: User,
    /// Whether the user has two factor enabled on their account.
    pub mfa_enabled: Option<bool>,
    /// The user's chosen language option.
    pub locale: Option<String>,
    /// Whether the email on this account has been verified.
    pub verified: Option<bool>,
    /// The user's email.
    pub email: Option<String>,
    /// The flags on a user's account.
    pub flags: Option<UserPublicFlags>,
    /// The type of Nitro subscription on a user's account.
    pub premium_type: Option<PremiumType>,
}

impl_update!(CurrentUser {
    ..user;
    "mfa_enabled" => mfa_enabled,
    "locale" => locale,
    "verified" => verified,
    "email" => email,
    "flags" => flags,
    "premium_type" => premium_type,
});

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl DerefMut for CurrentUser {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.user
    }
}

impl CurrentUser {
    /// Edits the current user's profile settings.
    ///
    /// This mutates the current user in-place.
    ///
    /// # Examples
    ///
    /// Change the avatar:
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::user::CurrentUser;
    /// use accord::builder::EditProfile;
    ///
    /// # async fn run(http: &Http, mut user: CurrentUser) -> accord::Result<()> {
    /// let avatar = accord::utils::encode_image("image/png", &std::fs::read("./avatar.png")?);
    /// user.edit(http, EditProfile::new().avatar(avatar)).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if an invalid value is set. May also return an
    /// [`Error::Json`] if there is an error in deserializing the API response.
    pub async fn edit(&mut self, http: impl AsRef<Http>, builder: EditProfile) -> Result<()> {
        *self = http.as_ref().edit_profile(&builder).await?;
        Ok(())
    }

    /// Returns a paginator over the guilds the current user is in, in ascending id order.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use accord::http::Http;
    /// # use accord::model::user::CurrentUser;
    /// use futures::StreamExt;
    ///
    /// # async fn run(http: &Http, user: &CurrentUser) -> accord::Result<()> {
    /// let mut guilds = user.guilds_iter(http).stream();
    /// while let Some(guild) = guilds.next().await {
    ///     println!("In guild {}", guild?.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn guilds_iter<H: AsRef<Http> + Send + Sync>(&self, http: H) -> Paginator<GuildsIter<H>> {
        Paginator::new(GuildsIter::new(http))
    }

    /// Gets the guilds the current user is in, in one request of at most 200 guilds.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] if the request fails.
    pub async fn guilds(&self, http: impl AsRef<Http>) -> Result<Vec<GuildInfo>> {
        http.as_ref().get_guilds(None, None).await
    }
}

fn avatar_url(user_id: UserId, hash: Option<&str>) -> Option<String> {
    hash.map(|hash| {
        let ext = if hash.starts_with("a_") { "gif" } else { "webp" };

        cdn!("/avatars/{}/{}.{}?size=1024", user_id, hash, ext)
    })
}

fn default_avatar_url(user: &User) -> String {
    let avatar_id = match user.discriminator {
        Some(discriminator) => u64::from(discriminator.get() % 5),
        None => (user.id.get() >> 22) % 6,
    };

    cdn!("/embed/avatars/{}.png", avatar_id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json, to_value};
    use crate::model::update::Update;

    fn ferris() -> User {
        from_value(json!({
            "id": "210",
            "username": "ferris",
            "discriminator": "0",
            "global_name": "Ferris",
            "avatar": null,
        }))
        .unwrap()
    }

    #[test]
    fn migrated_users_have_no_discriminator() {
        let user = ferris();

        assert_eq!(user.discriminator, None);
        assert_eq!(user.tag(), "ferris");
        assert_eq!(user.display_name(), "Ferris");
        assert_eq!(to_value(&user).unwrap()["discriminator"], json!("0"));
    }

    #[test]
    fn default_avatar_uses_the_id_without_discriminator() {
        let user = ferris();
        assert_eq!(user.default_avatar_url(), "https://cdn.discordapp.com/embed/avatars/0.png");
        assert_eq!(user.face(), user.default_avatar_url());
    }

    #[test]
    fn current_user_merges_into_the_flattened_user() {
        let mut current: CurrentUser = from_value(json!({
            "id": "210",
            "username": "ferris",
            "mfa_enabled": true,
            "locale": "en-US",
        }))
        .unwrap();

        let fragment = match json!({"username": "crab", "locale": "de", "id": "1"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(current.update(&fragment), ["username", "locale"]);
        assert_eq!(current.name, "crab");
        assert_eq!(current.id, UserId::new(210));
        assert_eq!(current.locale.as_deref(), Some("de"));
        assert_eq!(current.mfa_enabled, Some(true));
    }
}
