//! A collection of newtypes defining type-strong IDs.

use std::fmt;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

use serde::de::{Error as DeError, Unexpected, Visitor};

use super::Timestamp;
use crate::internal::prelude::*;

macro_rules! id_u64 {
    ($($name:ident;)*) => {
        $(
            impl $name {
                #[doc = concat!("Creates a new ", stringify!($name), " from a u64.")]
                /// # Panics
                /// Panics if `id` is zero.
                #[inline]
                #[must_use]
                #[track_caller]
                pub const fn new(id: u64) -> Self {
                    match NonZeroU64::new(id) {
                        Some(inner) => Self(inner),
                        None => panic!(concat!(
                            "Attempted to call ",
                            stringify!($name),
                            "::new with invalid (0) value"
                        )),
                    }
                }

                /// Retrieves the inner `id` as a [`u64`].
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0.get()
                }

                #[doc = concat!("Retrieves the time that the ", stringify!($name), " was created.")]
                #[must_use]
                pub fn created_at(&self) -> Timestamp {
                    Timestamp::from_discord_id(self.get())
                }
            }

            impl From<NonZeroU64> for $name {
                fn from(id: NonZeroU64) -> $name {
                    $name(id)
                }
            }

            impl From<u64> for $name {
                #[track_caller]
                fn from(id: u64) -> $name {
                    $name::new(id)
                }
            }

            impl From<$name> for NonZeroU64 {
                fn from(id: $name) -> NonZeroU64 {
                    id.0
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.get()
                }
            }

            impl PartialEq<u64> for $name {
                fn eq(&self, u: &u64) -> bool {
                    self.get() == *u
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = ParseIntError;

                fn from_str(s: &str) -> StdResult<Self, Self::Err> {
                    Ok(Self(s.parse()?))
                }
            }

            impl Serialize for $name {
                fn serialize<S: serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> StdResult<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> StdResult<Self, D::Error> {
                    deserializer.deserialize_any(SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

/// An identifier for a message attachment.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AttachmentId(NonZeroU64);

/// An identifier for a Channel
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChannelId(NonZeroU64);

/// An identifier for an Emoji
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EmojiId(NonZeroU64);

/// An identifier for a Guild
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GuildId(NonZeroU64);

/// An identifier for a Message
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MessageId(NonZeroU64);

/// An identifier for a Role
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoleId(NonZeroU64);

/// An identifier for a User
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UserId(NonZeroU64);

/// An identifier for a [`Webhook`](https://discord.com/developers/docs/resources/webhook).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WebhookId(NonZeroU64);

id_u64! {
    AttachmentId;
    ChannelId;
    EmojiId;
    GuildId;
    MessageId;
    RoleId;
    UserId;
    WebhookId;
}

impl GuildId {
    /// The `@everyone` role of a guild shares the guild's Id.
    #[must_use]
    pub fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}

/// Discord sends snowflakes as strings, but older payloads and user input may carry them as
/// numbers. Both are accepted.
struct SnowflakeVisitor;

impl<'de> Visitor<'de> for SnowflakeVisitor {
    type Value = NonZeroU64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-zero string or integer snowflake")
    }

    fn visit_i64<E: DeError>(self, value: i64) -> StdResult<Self::Value, E> {
        let value = u64::try_from(value)
            .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))?;

        self.visit_u64(value)
    }

    fn visit_u64<E: DeError>(self, value: u64) -> StdResult<Self::Value, E> {
        NonZeroU64::new(value).ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: DeError>(self, value: &str) -> StdResult<Self::Value, E> {
        value.parse().map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

#[cfg(test)]
mod test {
    use super::{GuildId, UserId};
    use crate::json::{from_value, json, to_value};

    #[test]
    fn test_created_at() {
        // The id is from discord's snowflake docs
        let id = GuildId::new(175928847299117063);
        assert_eq!(id.created_at().unix_timestamp(), 1462015105);
        assert_eq!(id.created_at().to_string(), "2016-04-30T11:18:25.796Z");
    }

    #[test]
    fn test_id_serde() {
        let id = UserId::new(17_5928_8472_9911_7063);
        assert_eq!(to_value(&id).unwrap(), json!("175928847299117063"));

        assert_eq!(from_value::<UserId>(json!("175928847299117063")).unwrap(), id);
        assert_eq!(from_value::<UserId>(json!(175928847299117063_u64)).unwrap(), id);
        assert!(from_value::<UserId>(json!("0")).is_err());
        assert!(from_value::<UserId>(json!("not a snowflake")).is_err());
        assert!(from_value::<UserId>(json!(-5)).is_err());
    }

    #[test]
    fn test_everyone_role() {
        let guild_id = GuildId::new(81384788765712384);
        assert_eq!(guild_id.everyone_role().get(), guild_id.get());
    }
}
