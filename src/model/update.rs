//! Merging of partial gateway fragments into long-lived models.
//!
//! Update events such as `GUILD_UPDATE` or `MESSAGE_UPDATE` only carry the fields that changed.
//! [`Update::update`] writes exactly those fields into the cached value and leaves every other
//! field untouched:
//!
//! - a key absent from the fragment never modifies its field;
//! - a key the model does not know is ignored;
//! - a key whose value fails to decode into the field's type is skipped and logged, and the
//!   remaining keys are still applied;
//! - an explicit `null` clears an optional field.
//!
//! Identifiers are never part of a merge: the id of a cached value is immutable.
//!
//! # Examples
//!
//! ```rust
//! use accord::json::{json, JsonMap, Value};
//! use accord::model::update::Update;
//! use accord::model::user::User;
//!
//! let mut user: User = serde_json::from_value(json!({
//!     "id": "210",
//!     "username": "ferris",
//!     "avatar": "a_1234",
//! }))?;
//!
//! let fragment: JsonMap = serde_json::from_value(json!({"avatar": null, "locale": "en-US"}))?;
//! let applied = user.update(&fragment);
//!
//! assert_eq!(applied, ["avatar"]);
//! assert_eq!(user.avatar, None);
//! assert_eq!(user.name, "ferris");
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::internal::prelude::*;
use crate::json::JsonError;

/// The fragment keys an [`Update::update`] call wrote into the model, in declaration order.
pub type UpdatedFields = Vec<&'static str>;

/// A model that can absorb a partial update fragment received from the gateway.
pub trait Update {
    /// Applies every known key of the `fragment` to the matching field.
    ///
    /// Returns the keys that were applied. Keys that are unknown or fail to decode are not part
    /// of the result.
    fn update(&mut self, fragment: &JsonMap) -> UpdatedFields;
}

/// Decodes a fragment value into the type of the field it targets.
#[allow(clippy::missing_errors_doc)]
pub fn decode<T: DeserializeOwned>(value: &Value) -> StdResult<T, JsonError> {
    T::deserialize(value)
}

/// Overwrites `field` with the decoded `value`. On a decode failure the field keeps its value and
/// `false` is returned.
pub fn merge_field<T, F>(field: &mut T, key: &'static str, value: &Value, decode: F) -> bool
where
    F: FnOnce(&Value) -> StdResult<T, JsonError>,
{
    match decode(value) {
        Ok(decoded) => {
            *field = decoded;

            true
        },
        Err(why) => {
            warn!("Skipping field {key:?} of partial update: {why:?}");

            false
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
        note: Option<String>,
    }

    impl_update!(Sample {
        "name" => name,
        "count" => count,
        "note" => note,
    });

    fn fragment(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_fragment_is_a_no_op() {
        let mut sample = Sample {
            name: "a".into(),
            count: 3,
            note: Some("n".into()),
        };

        assert!(sample.update(&JsonMap::new()).is_empty());
        assert_eq!(sample, Sample {
            name: "a".into(),
            count: 3,
            note: Some("n".into()),
        });
    }

    #[test]
    fn malformed_key_does_not_abort_the_merge() {
        let mut sample = Sample::default();

        let applied = sample.update(&fragment(json!({
            "name": "b",
            "count": "not a number",
            "note": "hi",
            "unknown": true,
        })));

        assert_eq!(applied, ["name", "note"]);
        assert_eq!(sample.name, "b");
        assert_eq!(sample.count, 0);
        assert_eq!(sample.note.as_deref(), Some("hi"));
    }

    #[test]
    fn null_clears_optional_fields_only() {
        let mut sample = Sample {
            name: "a".into(),
            count: 1,
            note: Some("n".into()),
        };

        let applied = sample.update(&fragment(json!({"note": null, "name": null})));

        assert_eq!(applied, ["note"]);
        assert_eq!(sample.name, "a");
        assert_eq!(sample.note, None);
    }
}
