//! This module exports the JSON types and helpers used throughout the library, so the rest of the
//! codebase never names `serde_json` directly.

use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::Result;

pub type Value = serde_json::Value;

pub use serde_json::json;
pub use serde_json::Error as JsonError;

pub type JsonMap = serde_json::Map<String, Value>;

pub(crate) async fn decode_resp<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_vec<T>(v: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn from_value<T>(v: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(value)?)
}

/// Inserts `key: value` into every object of the array stored under `array_key`.
///
/// Discord leaves out parent ids on objects nested inside a parent payload (for example members
/// inside a guild snapshot). Injecting them before decoding lets the nested models keep the id as
/// a required field.
pub(crate) fn inject_into_array(map: &mut JsonMap, array_key: &str, key: &str, value: &Value) {
    if let Some(Value::Array(items)) = map.get_mut(array_key) {
        for item in items {
            if let Some(object) = item.as_object_mut() {
                object.entry(key).or_insert_with(|| value.clone());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn inject_keeps_existing_values() {
        let mut map = match json!({"members": [{"a": 1}, {"guild_id": "5"}], "other": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        inject_into_array(&mut map, "members", "guild_id", &json!("7"));
        inject_into_array(&mut map, "missing", "guild_id", &json!("7"));

        assert_eq!(map["members"][0]["guild_id"], json!("7"));
        assert_eq!(map["members"][1]["guild_id"], json!("5"));
        assert!(map.get("missing").is_none());
    }
}
