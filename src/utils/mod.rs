//! A set of utilities to help with common use cases that are not required to fully use the
//! library.

mod colour;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub use self::colour::Colour;
use crate::model::id::{ChannelId, EmojiId, RoleId, UserId};

/// Encodes raw image bytes into the data URI format Discord expects for avatars, guild icons and
/// emojis.
///
/// # Examples
///
/// ```rust
/// use accord::utils::encode_image;
///
/// assert_eq!(encode_image("image/png", b"abc"), "data:image/png;base64,YWJj");
/// ```
#[must_use]
pub fn encode_image(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Retrieves the "code" part of an invite out of a URL.
///
/// # Examples
///
/// ```rust
/// use accord::utils::parse_invite;
///
/// assert_eq!(parse_invite("https://discord.gg/0cDvIgU2voY8RSYL"), "0cDvIgU2voY8RSYL");
/// assert_eq!(parse_invite("discord.com/invite/0cDvIgU2voY8RSYL"), "0cDvIgU2voY8RSYL");
/// assert_eq!(parse_invite("0cDvIgU2voY8RSYL"), "0cDvIgU2voY8RSYL");
/// ```
#[must_use]
pub fn parse_invite(code: &str) -> &str {
    let code = code.trim_start_matches("https://").trim_start_matches("http://");

    ["discord.gg/", "discord.com/invite/", "discordapp.com/invite/"]
        .iter()
        .find_map(|prefix| code.strip_prefix(prefix))
        .unwrap_or(code)
}

/// Retrieves an Id from a user mention.
///
/// If the mention is invalid, then [`None`] is returned.
///
/// # Examples
///
/// Retrieving an Id from a valid [`User`] mention:
///
/// ```rust
/// use accord::model::id::UserId;
/// use accord::utils::parse_user_mention;
///
/// // regular username mention
/// assert_eq!(parse_user_mention("<@114941315417899012>"), Some(UserId::new(114941315417899012)));
///
/// // nickname mention
/// assert_eq!(parse_user_mention("<@!114941315417899012>"), Some(UserId::new(114941315417899012)));
/// ```
///
/// Asserting that an invalid username or nickname mention returns [`None`]:
///
/// ```rust
/// use accord::utils::parse_user_mention;
///
/// assert!(parse_user_mention("<@1149413154aa17899012").is_none());
/// assert!(parse_user_mention("<@!11494131541789a90b1c2").is_none());
/// ```
///
/// [`User`]: crate::model::user::User
#[must_use]
pub fn parse_user_mention(mention: &str) -> Option<UserId> {
    let inner = mention.strip_prefix("<@")?.strip_suffix('>')?;
    let inner = inner.strip_prefix('!').unwrap_or(inner);

    inner.parse().ok()
}

/// Retrieves an Id from a role mention.
///
/// ```rust
/// use accord::model::id::RoleId;
/// use accord::utils::parse_role_mention;
///
/// assert_eq!(parse_role_mention("<@&136107769680887808>"), Some(RoleId::new(136107769680887808)));
/// assert!(parse_role_mention("<@&136107769680887808").is_none());
/// ```
#[must_use]
pub fn parse_role_mention(mention: &str) -> Option<RoleId> {
    mention.strip_prefix("<@&")?.strip_suffix('>')?.parse().ok()
}

/// Retrieves an Id from a channel mention.
///
/// ```rust
/// use accord::model::id::ChannelId;
/// use accord::utils::parse_channel_mention;
///
/// let channel_id = ChannelId::new(81384788765712384);
/// assert_eq!(parse_channel_mention("<#81384788765712384>"), Some(channel_id));
/// assert!(parse_channel_mention("<#!81384788765712384>").is_none());
/// ```
#[must_use]
pub fn parse_channel_mention(mention: &str) -> Option<ChannelId> {
    mention.strip_prefix("<#")?.strip_suffix('>')?.parse().ok()
}

/// Retrieves the animated state, name and Id from an emoji mention, in the form of an
/// `(animated, name, id)` tuple.
///
/// ```rust
/// use accord::model::id::EmojiId;
/// use accord::utils::parse_emoji;
///
/// let (animated, name, id) = parse_emoji("<:smugAnimeFace:302516740095606785>").unwrap();
/// assert!(!animated);
/// assert_eq!(name, "smugAnimeFace");
/// assert_eq!(id, EmojiId::new(302516740095606785));
/// ```
#[must_use]
pub fn parse_emoji(mention: &str) -> Option<(bool, String, EmojiId)> {
    let inner = mention.strip_prefix('<')?.strip_suffix('>')?;
    let (animated, inner) = match inner.strip_prefix('a') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    let mut parts = inner.strip_prefix(':')?.splitn(2, ':');
    let name = parts.next().filter(|name| !name.is_empty())?;
    let id = parts.next()?.parse().ok()?;

    Some((animated, name.to_string(), id))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_emoji() {
        assert_eq!(
            parse_emoji("<a:dance:302516740095606785>"),
            Some((true, "dance".to_string(), EmojiId::new(302516740095606785)))
        );
        assert!(parse_emoji("<::302516740095606785>").is_none());
        assert!(parse_emoji("<:name:>").is_none());
    }

    #[test]
    fn test_user_mention_rejects_zero() {
        assert!(parse_user_mention("<@0>").is_none());
    }
}
