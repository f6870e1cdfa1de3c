use crate::internal::prelude::*;
use crate::model::id::RoleId;

/// A builder to edit the name or role restrictions of a guild [`Emoji`].
///
/// [`Emoji`]: crate::model::guild::Emoji
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#modify-guild-emoji).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditEmoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Option<Vec<RoleId>>>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl EditEmoji {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The new name of the emoji.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restricts the emoji to the given roles. Pass [`None`] to let everyone use it again.
    pub fn roles(mut self, roles: Option<Vec<RoleId>>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Sets the request's audit log reason.
    pub fn audit_log_reason(mut self, reason: impl Into<String>) -> Self {
        self.audit_log_reason = Some(reason.into());
        self
    }
}
