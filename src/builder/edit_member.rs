use crate::internal::prelude::*;
use crate::model::prelude::*;

/// A builder which edits the properties of a [`Member`], to be used in conjunction with
/// [`Member::edit`].
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#modify-guild-member).
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    nick: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<RoleId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deaf: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    communication_disabled_until: Option<Option<String>>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl EditMember {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to deafen the member.
    ///
    /// **Note**: Requires the [Deafen Members] permission.
    ///
    /// [Deafen Members]: Permissions::DEAFEN_MEMBERS
    pub fn deafen(mut self, deafen: bool) -> Self {
        self.deaf = Some(deafen);
        self
    }

    /// Whether to mute the member.
    ///
    /// **Note**: Requires the [Mute Members] permission.
    ///
    /// [Mute Members]: Permissions::MUTE_MEMBERS
    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = Some(mute);
        self
    }

    /// Changes the member's nickname. Pass [`None`] to reset the nickname.
    ///
    /// **Note**: Requires the [Manage Nicknames] permission.
    ///
    /// [Manage Nicknames]: Permissions::MANAGE_NICKNAMES
    pub fn nickname(mut self, nickname: Option<String>) -> Self {
        self.nick = Some(nickname);
        self
    }

    /// Set the list of roles that the member should have.
    ///
    /// **Note**: Requires the [Manage Roles] permission to modify.
    ///
    /// [Manage Roles]: Permissions::MANAGE_ROLES
    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<RoleId>>) -> Self {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Move a member to a voice channel, or pass [`None`] to disconnect them from voice.
    ///
    /// **Note**: Requires the [Move Members] permission.
    ///
    /// [Move Members]: Permissions::MOVE_MEMBERS
    pub fn voice_channel(mut self, channel_id: Option<ChannelId>) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Times the user out until `time`, an ISO8601-formatted datetime string.
    ///
    /// `time` is limited to a maximum of 28 days in the future.
    ///
    /// **Note**: Requires the [Moderate Members] permission.
    ///
    /// [Moderate Members]: Permissions::MODERATE_MEMBERS
    pub fn disable_communication_until(mut self, time: impl Into<String>) -> Self {
        self.communication_disabled_until = Some(Some(time.into()));
        self
    }

    /// Times the user out until `time`.
    ///
    /// **Note**: Requires the [Moderate Members] permission.
    ///
    /// [Moderate Members]: Permissions::MODERATE_MEMBERS
    pub fn disable_communication_until_datetime(self, time: Timestamp) -> Self {
        self.disable_communication_until(time.to_string())
    }

    /// Allow a user to communicate, removing their timeout, if there is one.
    ///
    /// **Note**: Requires the [Moderate Members] permission.
    ///
    /// [Moderate Members]: Permissions::MODERATE_MEMBERS
    pub fn enable_communication(mut self) -> Self {
        self.communication_disabled_until = Some(None);
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
    fn cleared_fields_are_sent_as_null() {
        let builder = EditMember::new().nickname(None).enable_communication().mute(true);

        assert_eq!(
            to_value(&builder).unwrap(),
            json!({"nick": null, "communication_disabled_until": null, "mute": true})
        );
    }

    #[test]
    fn roles_are_sent_as_ids() {
        let builder = EditMember::new().roles([RoleId::new(1), RoleId::new(2)]);
        assert_eq!(to_value(&builder).unwrap(), json!({"roles": ["1", "2"]}));
    }
}
