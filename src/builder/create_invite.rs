use crate::internal::prelude::*;

/// A builder to create an [`Invite`] for use via [`ChannelId::create_invite`].
///
/// This is a structured and cleaner way of creating an invite, as all parameters are optional.
///
/// # Examples
///
/// Create an invite with a max age of 3600 seconds and 10 max uses:
///
/// ```rust,no_run
/// # use accord::http::Http;
/// # use accord::model::id::ChannelId;
/// use accord::builder::CreateInvite;
///
/// # async fn run(http: &Http, channel_id: ChannelId) -> accord::Result<()> {
/// let builder = CreateInvite::new().max_age(3600).max_uses(10);
/// let invite = channel_id.create_invite(http, builder).await?;
/// println!("Created {}", invite.url());
/// # Ok(())
/// # }
/// ```
///
/// [`Invite`]: crate::model::invite::Invite
/// [`ChannelId::create_invite`]: crate::model::id::ChannelId::create_invite
/// [Discord docs](https://discord.com/developers/docs/resources/channel#create-channel-invite)
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct CreateInvite {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temporary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique: Option<bool>,

    #[serde(skip)]
    pub(crate) audit_log_reason: Option<String>,
}

impl CreateInvite {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The duration that the invite will be valid for.
    ///
    /// Set to `0` for an invite which does not expire after an amount of time.
    ///
    /// Defaults to `86400`, or 24 hours.
    pub fn max_age(mut self, max_age: u32) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// The number of uses that the invite will be valid for.
    ///
    /// Set to `0` for an invite which does not expire after a number of uses.
    ///
    /// Defaults to `0`.
    pub fn max_uses(mut self, max_uses: u8) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    /// Whether an invite grants a temporary membership.
    ///
    /// Defaults to `false`.
    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    /// Whether or not to try to reuse a similar invite.
    ///
    /// Defaults to `false`.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
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
    fn reason_is_not_part_of_the_body() {
        let builder = CreateInvite::new().max_age(0).unique(true).audit_log_reason("event");

        assert_eq!(to_value(&builder).unwrap(), json!({"max_age": 0, "unique": true}));
        assert_eq!(builder.audit_log_reason.as_deref(), Some("event"));
    }
}
