use std::collections::HashMap;
use std::hash::Hash;

use serde::de::{DeserializeOwned, Error as DeError};
use serde::ser::{SerializeSeq, Serializer};
use serde::Deserializer;

use super::channel::GuildChannel;
use super::gateway::Presence;
use super::guild::{Emoji, Member, Role};
use super::id::{ChannelId, EmojiId, RoleId, UserId};
use crate::internal::prelude::*;
use crate::json::JsonError;

/// A model which is stored in an id-keyed map inside its parent.
///
/// Discord sends these collections as arrays; the library keys them by id so a lookup is a map
/// access and an insertion with an existing id replaces the old value.
pub trait Identifiable {
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;
}

impl Identifiable for Role {
    type Id = RoleId;

    fn id(&self) -> RoleId {
        self.id
    }
}

impl Identifiable for Emoji {
    type Id = EmojiId;

    fn id(&self) -> EmojiId {
        self.id
    }
}

impl Identifiable for Member {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.user.id
    }
}

impl Identifiable for GuildChannel {
    type Id = ChannelId;

    fn id(&self) -> ChannelId {
        self.id
    }
}

impl Identifiable for Presence {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.user.id
    }
}

/// Deserializes an array of models into a map keyed by their ids. A later entry with a duplicate
/// id replaces the earlier one.
pub fn deserialize_keyed<'de, D, T>(deserializer: D) -> StdResult<HashMap<T::Id, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Identifiable,
{
    let items = Vec::<T>::deserialize(deserializer)?;

    Ok(items.into_iter().map(|item| (item.id(), item)).collect())
}

/// Serializes an id-keyed map back into the array shape Discord uses.
pub fn serialize_keyed<S, T>(map: &HashMap<T::Id, T>, serializer: S) -> StdResult<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + Identifiable,
{
    let mut seq = serializer.serialize_seq(Some(map.len()))?;

    for value in map.values() {
        seq.serialize_element(value)?;
    }

    seq.end()
}

/// The fragment decoder counterpart of [`deserialize_keyed`], for use with `impl_update!`.
pub fn decode_keyed<T>(value: &Value) -> StdResult<HashMap<T::Id, T>, JsonError>
where
    T: DeserializeOwned + Identifiable,
{
    deserialize_keyed(value)
}

/// Decodes a required key out of a raw payload object.
pub fn required<T, E>(map: &JsonMap, key: &'static str) -> StdResult<T, E>
where
    T: DeserializeOwned,
    E: DeError,
{
    let value = map.get(key).ok_or_else(|| E::missing_field(key))?;

    T::deserialize(value).map_err(E::custom)
}

/// Decodes an optional key out of a raw payload object. A `null` value is treated as absent.
pub fn optional<T, E>(map: &JsonMap, key: &'static str) -> StdResult<Option<T>, E>
where
    T: DeserializeOwned,
    E: DeError,
{
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(E::custom),
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_keyed", serialize_with = "serialize_keyed")]
        roles: HashMap<RoleId, Role>,
    }

    fn role(id: u64, name: &str) -> Value {
        json!({
            "id": id.to_string(),
            "name": name,
            "color": 0,
            "hoist": false,
            "position": 1,
            "permissions": "0",
            "managed": false,
            "mentionable": false,
        })
    }

    #[test]
    fn keyed_collections_keep_the_last_duplicate() {
        let holder: Holder =
            serde_json::from_value(json!({"roles": [role(1, "a"), role(2, "b"), role(1, "c")]}))
                .unwrap();

        assert_eq!(holder.roles.len(), 2);
        assert_eq!(holder.roles[&RoleId::new(1)].name, "c");

        let value = serde_json::to_value(&holder).unwrap();
        assert_eq!(value["roles"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn required_and_optional_keys() {
        let map = match json!({"a": "5", "b": null}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let a: RoleId = required::<_, JsonError>(&map, "a").unwrap();
        assert_eq!(a, RoleId::new(5));
        assert!(required::<RoleId, JsonError>(&map, "c").is_err());
        assert_eq!(optional::<RoleId, JsonError>(&map, "b").unwrap(), None);
        assert_eq!(optional::<RoleId, JsonError>(&map, "c").unwrap(), None);
    }
}
