//! Error enum definition wrapping potential model implementation errors.

use std::error::Error as StdError;
use std::fmt;

use super::Permissions;

/// An error returned from the [`model`] module.
///
/// This is always wrapped within the library's [`Error::Model`] variant.
///
/// # Examples
///
/// Matching an [`Error`] with this variant would look something like the following for the
/// [`GuildId::ban`] method:
///
/// ```rust,no_run
/// use accord::http::Http;
/// use accord::model::id::{GuildId, UserId};
/// use accord::model::ModelError;
/// use accord::Error;
///
/// # async fn run(http: &Http) {
/// let guild_id = GuildId::new(81384788765712384);
///
/// match guild_id.ban(http, UserId::new(77), 8, None).await {
///     Ok(()) => {
///         // Ban successful.
///     },
///     Err(Error::Model(ModelError::DeleteMessageDaysAmount(amount))) => {
///         println!("Failed deleting {amount} days' worth of messages");
///     },
///     Err(why) => {
///         println!("Unexpected error: {why:?}");
///     },
/// }
/// # }
/// ```
///
/// [`Error`]: crate::Error
/// [`Error::Model`]: crate::Error::Model
/// [`GuildId::ban`]: super::id::GuildId::ban
/// [`model`]: crate::model
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// When attempting to delete below or above the minimum or maximum allowed number of
    /// messages.
    BulkDeleteAmount,
    /// When attempting to delete a number of days' worth of messages that is not allowed.
    DeleteMessageDaysAmount(u8),
    /// Indicates that an audit log reason exceeds the maximum length. The length of the reason
    /// is provided.
    AuditLogReasonTooLong(usize),
    /// An indication that a [guild][`Guild`] could not be found by [Id][`GuildId`] in the
    /// [`Cache`].
    ///
    /// [`Guild`]: super::guild::Guild
    /// [`GuildId`]: super::id::GuildId
    /// [`Cache`]: crate::cache::Cache
    GuildNotFound,
    /// An indication that a [role][`Role`] could not be found by [Id][`RoleId`] in the
    /// [`Cache`].
    ///
    /// [`Role`]: super::guild::Role
    /// [`RoleId`]: super::id::RoleId
    /// [`Cache`]: crate::cache::Cache
    RoleNotFound,
    /// An indication that a [member][`Member`] could not be found in its guild.
    ///
    /// [`Member`]: super::guild::Member
    MemberNotFound,
    /// An indication that a channel could not be found by [Id][`ChannelId`] in the [`Cache`].
    ///
    /// [`ChannelId`]: super::id::ChannelId
    /// [`Cache`]: crate::cache::Cache
    ChannelNotFound,
    /// Indicates that you do not have the required permissions to perform an operation.
    ///
    /// The provided [`Permissions`] is the set of permissions which were required.
    InvalidPermissions(Permissions),
    /// Indicates that a [`Message`]s content was too long and will not successfully send, as the
    /// length is over 2000 codepoints.
    ///
    /// The number of code points larger than the limit is provided.
    ///
    /// [`Message`]: super::channel::Message
    MessageTooLong(usize),
    /// Indicates that the current user is attempting to Direct Message another bot user, which
    /// is disallowed by the API.
    MessagingBot,
    /// An indicator that the [`ChannelType`] cannot perform an action.
    ///
    /// [`ChannelType`]: super::channel::ChannelType
    InvalidChannelType,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BulkDeleteAmount => f.write_str("Too few/many messages to bulk delete."),
            Self::DeleteMessageDaysAmount(_) => f.write_str("Invalid delete message days."),
            Self::AuditLogReasonTooLong(_) => f.write_str("Audit log reason too long."),
            Self::GuildNotFound => f.write_str("Guild not found in the cache."),
            Self::RoleNotFound => f.write_str("Role not found in the cache."),
            Self::MemberNotFound => f.write_str("Member not found in the guild."),
            Self::ChannelNotFound => f.write_str("Channel not found in the cache."),
            Self::InvalidChannelType => f.write_str("The channel cannot perform the action."),
            Self::InvalidPermissions(_) => f.write_str("Invalid permissions."),
            Self::MessageTooLong(_) => f.write_str("Message too large."),
            Self::MessagingBot => f.write_str("Attempted to message another bot user."),
        }
    }
}

impl StdError for Error {}

/// Checks a message's content against [`MESSAGE_CODE_LIMIT`], returning the overflow.
///
/// [`MESSAGE_CODE_LIMIT`]: crate::constants::MESSAGE_CODE_LIMIT
pub(crate) fn check_content_length(content: &str) -> Result<(), Error> {
    let length = content.chars().count();

    match length.checked_sub(crate::constants::MESSAGE_CODE_LIMIT) {
        Some(overflow) if overflow > 0 => Err(Error::MessageTooLong(overflow)),
        _ => Ok(()),
    }
}

/// Checks an audit log reason against [`AUDIT_LOG_REASON_LIMIT`].
///
/// [`AUDIT_LOG_REASON_LIMIT`]: crate::constants::AUDIT_LOG_REASON_LIMIT
pub(crate) fn check_audit_log_reason(reason: Option<&str>) -> Result<(), Error> {
    match reason {
        Some(reason) if reason.len() > crate::constants::AUDIT_LOG_REASON_LIMIT => {
            Err(Error::AuditLogReasonTooLong(reason.len()))
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn content_length_counts_code_points() {
        assert!(check_content_length(&"é".repeat(2000)).is_ok());
        assert_eq!(check_content_length(&"a".repeat(2003)), Err(Error::MessageTooLong(3)));
    }

    #[test]
    fn audit_log_reason_limit() {
        assert!(check_audit_log_reason(None).is_ok());
        assert!(check_audit_log_reason(Some(&"a".repeat(512))).is_ok());
        assert_eq!(
            check_audit_log_reason(Some(&"a".repeat(513))),
            Err(Error::AuditLogReasonTooLong(513))
        );
    }
}
