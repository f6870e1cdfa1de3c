use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::{Error as DeError, MapAccess, Visitor};
use serde::ser::SerializeMap;

use crate::internal::prelude::*;
use crate::model::guild::Emoji;
use crate::model::id::EmojiId;
use crate::utils;

/// The type of a reaction sent.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ReactionType {
    /// A reaction with a [`Guild`]s custom [`Emoji`], which is unique to the guild.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    Custom {
        /// Whether the emoji is animated.
        animated: bool,
        /// The Id of the custom [`Emoji`].
        id: EmojiId,
        /// The name of the custom emoji. This is primarily used for decoration and distinguishing
        /// the emoji client-side.
        name: Option<String>,
    },
    /// A reaction with a twemoji.
    Unicode(String),
}

impl<'de> Deserialize<'de> for ReactionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "snake_case")]
        enum Field {
            Animated,
            Id,
            Name,
            #[serde(other)]
            Other,
        }

        struct ReactionTypeVisitor;

        impl<'de> Visitor<'de> for ReactionTypeVisitor {
            type Value = ReactionType;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("enum ReactionType")
            }

            fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> StdResult<Self::Value, V::Error> {
                let mut animated = None;
                let mut id = None;
                let mut name: Option<Option<String>> = None;

                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Animated => {
                            if animated.is_some() {
                                return Err(DeError::duplicate_field("animated"));
                            }

                            animated = Some(map.next_value()?);
                        },
                        Field::Id => {
                            if id.is_some() {
                                return Err(DeError::duplicate_field("id"));
                            }

                            // Unicode emojis are sent with a `null` id.
                            id = Some(map.next_value::<Option<EmojiId>>()?);
                        },
                        Field::Name => {
                            if name.is_some() {
                                return Err(DeError::duplicate_field("name"));
                            }

                            name = Some(map.next_value()?);
                        },
                        Field::Other => {
                            map.next_value::<serde::de::IgnoredAny>()?;
                        },
                    }
                }

                let animated = animated.unwrap_or(false);
                let name = name.ok_or_else(|| DeError::missing_field("name"))?;

                match (id.flatten(), name) {
                    (Some(id), name) => Ok(ReactionType::Custom {
                        animated,
                        id,
                        name,
                    }),
                    (None, Some(name)) => Ok(ReactionType::Unicode(name)),
                    (None, None) => Err(DeError::custom("reaction without an id or a name")),
                }
            }
        }

        deserializer.deserialize_map(ReactionTypeVisitor)
    }
}

impl Serialize for ReactionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            ReactionType::Custom {
                animated,
                id,
                name,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;

                map.serialize_entry("animated", animated)?;
                map.serialize_entry("id", id)?;
                map.serialize_entry("name", name)?;

                map.end()
            },
            ReactionType::Unicode(name) => {
                let mut map = serializer.serialize_map(Some(1))?;

                map.serialize_entry("name", name)?;

                map.end()
            },
        }
    }
}

impl ReactionType {
    /// Creates a data-esque display of the type. This is the form the reaction endpoints expect
    /// in their path, before percent-encoding.
    #[inline]
    #[must_use]
    pub fn as_data(&self) -> String {
        match self {
            ReactionType::Custom {
                id,
                name,
                ..
            } => format!("{}:{id}", name.as_deref().unwrap_or("")),
            ReactionType::Unicode(unicode) => unicode.clone(),
        }
    }

    /// Helper function to allow testing equality of unicode emojis without having to perform any
    /// allocation. Will always return false if the reaction was not a unicode reaction.
    #[must_use]
    pub fn unicode_eq(&self, other: &str) -> bool {
        matches!(self, ReactionType::Unicode(unicode) if unicode == other)
    }
}

impl From<char> for ReactionType {
    /// Creates a [`ReactionType`] from a `char`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accord::model::channel::ReactionType;
    ///
    /// assert_eq!(ReactionType::from('a').as_data(), "a");
    /// ```
    fn from(ch: char) -> ReactionType {
        ReactionType::Unicode(ch.to_string())
    }
}

impl From<Emoji> for ReactionType {
    fn from(emoji: Emoji) -> ReactionType {
        ReactionType::Custom {
            animated: emoji.is_animated(),
            id: emoji.id,
            name: Some(emoji.name),
        }
    }
}

impl From<EmojiId> for ReactionType {
    fn from(emoji_id: EmojiId) -> ReactionType {
        ReactionType::Custom {
            animated: false,
            id: emoji_id,
            name: None,
        }
    }
}

impl FromStr for ReactionType {
    type Err = Infallible;

    /// Parses a custom emoji mention such as `<:name:id>`, or falls back to a unicode reaction.
    fn from_str(reaction: &str) -> StdResult<Self, Self::Err> {
        Ok(match utils::parse_emoji(reaction) {
            Some((animated, name, id)) => ReactionType::Custom {
                animated,
                id,
                name: Some(name),
            },
            None => ReactionType::Unicode(reaction.to_string()),
        })
    }
}

impl fmt::Display for ReactionType {
    /// Formats the reaction type, displaying the associated emoji in a way that clients can
    /// understand.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionType::Custom {
                animated,
                id,
                name,
            } => {
                if *animated {
                    f.write_str("<a:")?;
                } else {
                    f.write_str("<:")?;
                }

                if let Some(name) = name {
                    f.write_str(name)?;
                }

                f.write_str(":")?;
                fmt::Display::fmt(id, f)?;
                f.write_str(">")
            },
            ReactionType::Unicode(unicode) => f.write_str(unicode),
        }
    }
}

/// An emoji reaction to a message.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#reaction-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct MessageReaction {
    /// The amount of the type of reaction that have been sent for the associated message.
    pub count: u64,
    /// Indicator of whether the current user has sent this type of reaction.
    pub me: bool,
    /// The type of reaction.
    #[serde(rename = "emoji")]
    pub reaction_type: ReactionType,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn unicode_and_custom_reactions() {
        let unicode: ReactionType = from_value(json!({"id": null, "name": "🔥"})).unwrap();
        assert!(unicode.unicode_eq("🔥"));
        assert_eq!(to_value(&unicode).unwrap(), json!({"name": "🔥"}));

        let custom: ReactionType =
            from_value(json!({"id": "41", "name": "blob", "animated": true})).unwrap();
        assert_eq!(custom.as_data(), "blob:41");
        assert_eq!(custom.to_string(), "<a:blob:41>");

        assert!(from_value::<ReactionType>(json!({"id": null, "name": null})).is_err());
    }

    #[test]
    fn parse_reactions() {
        let parsed: ReactionType = "<:ferris:12>".parse().unwrap();
        assert_eq!(parsed, ReactionType::Custom {
            animated: false,
            id: EmojiId::new(12),
            name: Some("ferris".into()),
        });

        let parsed: ReactionType = "👍".parse().unwrap();
        assert_eq!(parsed, ReactionType::Unicode("👍".into()));
    }
}
