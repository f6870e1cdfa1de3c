use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use super::channel::{Channel, GuildChannel, PrivateChannel};
use super::guild::{Emoji, Member, Role};
use super::id::{ChannelId, EmojiId, RoleId, UserId};
use super::user::{CurrentUser, User};
use crate::internal::prelude::*;
use crate::utils;

/// Allows something - such as a channel or role - to be mentioned in a message.
pub trait Mentionable {
    /// Creates a [`Mention`] that will be able to notify or create a link to the item.
    ///
    /// [`Mention`] implements [`Display`], so [`ToString::to_string()`] can be called on it, or
    /// inserted directly into a [`format_args!`] type of macro.
    ///
    /// [`Display`]: fmt::Display
    ///
    /// # Examples
    ///
    /// ```
    /// # use accord::model::id::{RoleId, ChannelId, UserId};
    /// use accord::model::mention::Mentionable;
    /// let user = UserId::new(1);
    /// let channel = ChannelId::new(2);
    /// let role = RoleId::new(3);
    /// assert_eq!(
    ///     "<@1> <#2> <@&3>",
    ///     format!("{} {} {}", user.mention(), channel.mention(), role.mention(),),
    /// )
    /// ```
    fn mention(&self) -> Mention;
}

/// A struct that represents some way to insert a notification, link, or emoji into a message.
///
/// [`Display`] is the primary way of utilizing a [`Mention`], either in a [`format_args!`] type of
/// macro or with [`ToString::to_string()`]. A [`Mention`] is created using
/// [`Mentionable::mention()`], with [`From`]/[`Into`], or parsed from a string.
///
/// [`Display`]: fmt::Display
///
/// # Examples
///
/// ```
/// # use accord::model::id::{ChannelId, UserId};
/// use accord::model::mention::Mention;
///
/// let mention: Mention = "<@!114941315417899012>".parse().unwrap();
/// assert_eq!(mention, Mention::User(UserId::new(114941315417899012)));
/// assert_eq!(Mention::from(ChannelId::new(2)).to_string(), "<#2>");
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mention {
    Channel(ChannelId),
    Role(RoleId),
    User(UserId),
    Emoji(EmojiId, bool),
}

macro_rules! mention {
    ($i:ident: $($t:ty, $e:expr;)*) => {$(
        impl From<$t> for Mention {
            #[inline(always)]
            fn from($i: $t) -> Self {
                $e
            }
        }
    )*};
}

mention!(value:
    ChannelId, Mention::Channel(value);
    RoleId, Mention::Role(value);
    UserId, Mention::User(value);
    EmojiId, Mention::Emoji(value, false);
    (EmojiId, bool), Mention::Emoji(value.0, value.1);
);

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mention::Channel(id) => f.write_fmt(format_args!("<#{id}>")),
            Mention::Role(id) => f.write_fmt(format_args!("<@&{id}>")),
            Mention::User(id) => f.write_fmt(format_args!("<@{id}>")),
            Mention::Emoji(id, animated) => {
                f.write_fmt(format_args!("<{}:omitted:{id}>", if animated { "a" } else { "" }))
            },
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum MentionParseError {
    InvalidMention,
}

impl fmt::Display for MentionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid mention")
    }
}

impl StdError for MentionParseError {}

impl FromStr for Mention {
    type Err = MentionParseError;

    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        let m = if let Some(id) = utils::parse_channel_mention(s) {
            id.mention()
        } else if let Some(id) = utils::parse_role_mention(s) {
            id.mention()
        } else if let Some(id) = utils::parse_user_mention(s) {
            id.mention()
        } else if let Some((animated, _, id)) = utils::parse_emoji(s) {
            (id, animated).mention()
        } else {
            return Err(MentionParseError::InvalidMention);
        };

        Ok(m)
    }
}

impl<T> Mentionable for T
where
    T: Into<Mention> + Copy,
{
    fn mention(&self) -> Mention {
        (*self).into()
    }
}

macro_rules! mentionable {
    ($i:ident: $($t:ty, $e:expr;)*) => {$(
        impl Mentionable for $t {
            #[inline(always)]
            fn mention(&self) -> Mention {
                let $i = self;
                $e.into()
            }
        }
    )*};
}

mentionable!(value:
    Channel, value.id();
    GuildChannel, value.id;
    PrivateChannel, value.id;
    CurrentUser, value.id;
    Member, value.user.id;
    User, value.id;
    Role, value.id;
    Emoji, (value.id, value.is_animated());
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn test_mention() {
        let role: Role = from_value(json!({
            "id": "2",
            "name": "fake role",
            "color": 0,
            "hoist": false,
            "position": 1,
            "permissions": "0",
            "managed": false,
            "mentionable": false,
        }))
        .unwrap();
        let emoji: Emoji = from_value(json!({"id": "5", "name": "a", "animated": true})).unwrap();
        let user: User = from_value(json!({"id": "6", "username": "fake"})).unwrap();

        assert_eq!(ChannelId::new(1).mention().to_string(), "<#1>");
        assert_eq!(emoji.mention().to_string(), "<a:omitted:5>");
        assert_eq!(role.mention().to_string(), "<@&2>");
        assert_eq!(user.mention().to_string(), "<@6>");
        assert_eq!(user.to_string(), "<@6>");
    }

    #[test]
    fn parse_mentions() {
        assert_eq!("<@&3>".parse::<Mention>().unwrap(), Mention::Role(RoleId::new(3)));
        assert_eq!(
            "<a:dance:9>".parse::<Mention>().unwrap(),
            Mention::Emoji(EmojiId::new(9), true)
        );
        assert!("@everyone".parse::<Mention>().is_err());
    }
}
