//! A set of constants used by the library.

/// The version of the REST API the library targets.
pub const API_VERSION: u8 = 10;

/// The maximum unicode code points allowed within a message by Discord.
pub const MESSAGE_CODE_LIMIT: usize = 2000;

/// The maximum number of bytes allowed in an audit log reason.
pub const AUDIT_LOG_REASON_LIMIT: usize = 512;

/// The maximum number of messages which may be deleted in a single bulk delete request.
pub const BULK_DELETE_MAX: usize = 100;

/// The minimum number of messages a bulk delete request accepts.
pub const BULK_DELETE_MIN: usize = 2;

/// The maximum number of days' worth of messages a ban may delete.
pub const BAN_DELETE_MESSAGE_DAYS_MAX: u8 = 7;

/// The page size used when walking a channel's messages.
pub const MESSAGES_PAGE_SIZE: u16 = 100;

/// The page size used when walking a guild's member list.
pub const MEMBERS_PAGE_SIZE: u16 = 1000;

/// The page size used when walking the current user's guilds.
pub const GUILDS_PAGE_SIZE: u16 = 200;

/// The page size used when walking a guild's bans.
pub const BANS_PAGE_SIZE: u16 = 1000;

/// The [UserAgent] sent along with every request.
///
/// [UserAgent]: ::reqwest::header::USER_AGENT
pub const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/accord-rs/accord, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// The header Discord reads audit log reasons from.
pub const AUDIT_LOG_REASON_HEADER: &str = "X-Audit-Log-Reason";
