use crate::internal::prelude::*;

/// A builder to edit the current user's settings, to be used in conjunction with
/// [`CurrentUser::edit`].
///
/// [`CurrentUser::edit`]: crate::model::user::CurrentUser::edit
/// [Discord docs](https://discord.com/developers/docs/resources/user#modify-current-user).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banner: Option<Option<String>>,
}

impl EditProfile {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current user's avatar. Requires the input be a data URI of an image in either
    /// JPG, GIF, or PNG format, as produced by [`encode_image`].
    ///
    /// [`encode_image`]: crate::utils::encode_image
    pub fn avatar(mut self, avatar: String) -> Self {
        self.avatar = Some(Some(avatar));
        self
    }

    /// Delete the current user's avatar, resetting it to the default logo.
    pub fn delete_avatar(mut self) -> Self {
        self.avatar = Some(None);
        self
    }

    /// Set the current user's banner image, as a data URI.
    pub fn banner(mut self, banner: String) -> Self {
        self.banner = Some(Some(banner));
        self
    }

    /// Delete the current user's banner.
    pub fn delete_banner(mut self) -> Self {
        self.banner = Some(None);
        self
    }

    /// Modifies the current user's username.
    ///
    /// When modifying the username, if another user has the same _new_ username and current
    /// discriminator, a new unique discriminator will be assigned. If there are no available
    /// discriminators with the requested username, an error will occur.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{json, to_value};

    #[test]
    fn deleting_the_avatar_sends_null() {
        let builder = EditProfile::new().username("crab").delete_avatar();
        assert_eq!(to_value(&builder).unwrap(), json!({"username": "crab", "avatar": null}));
    }
}
