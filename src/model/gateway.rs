//! Models pertaining to the gateway.

use super::guild::UnavailableGuild;
use super::id::{EmojiId, GuildId, UserId};
use super::update::Update;
use super::user::{CurrentUser, User};
use crate::internal::prelude::*;

/// Representation of an activity that a [`User`] is performing.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#activity-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Activity {
    /// The name of the activity.
    pub name: String,
    /// The type of activity being performed
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// The Stream URL if [`Self::kind`] is [`ActivityType::Streaming`].
    pub url: Option<String>,
    /// Unix timestamp, in milliseconds, of when the activity was added to the user's session.
    pub created_at: Option<u64>,
    /// Unix timestamps for the start and/or end times of the activity.
    pub timestamps: Option<ActivityTimestamps>,
    /// What the user is doing.
    pub details: Option<String>,
    /// The user's current party status.
    pub state: Option<String>,
    /// Emoji currently used in custom status
    pub emoji: Option<ActivityEmoji>,
}

/// An emoji used in a custom status.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#activity-object-activity-emoji).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct ActivityEmoji {
    /// The name of the emoji.
    pub name: String,
    /// The id of the emoji.
    pub id: Option<EmojiId>,
    /// Whether this emoji is animated.
    pub animated: Option<bool>,
}

enum_number! {
    /// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#activity-object-activity-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ActivityType {
        /// An indicator that the user is playing a game.
        Playing = 0,
        /// An indicator that the user is streaming to a service.
        Streaming = 1,
        /// An indicator that the user is listening to something.
        Listening = 2,
        /// An indicator that the user is watching something.
        Watching = 3,
        /// An indicator that the user uses custom statuses
        Custom = 4,
        /// An indicator that the user is competing somewhere.
        Competing = 5,
        _ => Unknown(u8),
    }
}

/// Timestamps of when a user started and/or is ending their activity.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#activity-object-activity-timestamps).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct ActivityTimestamps {
    pub end: Option<u64>,
    pub start: Option<u64>,
}

/// The current online status of a [`User`].
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#update-presence-status-types).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OnlineStatus {
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Idle,
    Invisible,
    #[default]
    Offline,
    Online,
}

impl OnlineStatus {
    #[must_use]
    pub fn name(&self) -> &str {
        match *self {
            OnlineStatus::DoNotDisturb => "dnd",
            OnlineStatus::Idle => "idle",
            OnlineStatus::Invisible => "invisible",
            OnlineStatus::Offline => "offline",
            OnlineStatus::Online => "online",
        }
    }
}

/// Information detailing the current active status of a [`User`].
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#client-status-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct ClientStatus {
    pub desktop: Option<OnlineStatus>,
    pub mobile: Option<OnlineStatus>,
    pub web: Option<OnlineStatus>,
}

/// Information about the user of a [`Presence`] event.
///
/// Presence updates only guarantee the `id`; every other user field is sent only when it changed,
/// so the remaining keys are kept as a raw fragment.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#presence-update).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct PresenceUser {
    pub id: UserId,
    #[serde(flatten)]
    pub fields: JsonMap,
}

impl PresenceUser {
    /// Attempts to build a full [`User`] out of this presence user.
    ///
    /// Returns [`None`] if a field required by [`User`] was not sent.
    #[must_use]
    pub fn to_user(&self) -> Option<User> {
        let mut map = self.fields.clone();
        map.insert("id".into(), Value::from(self.id.to_string()));

        User::deserialize(Value::Object(map)).ok()
    }

    /// Merges the user fields carried by the presence into an existing [`User`].
    pub fn apply_to(&self, user: &mut User) {
        if self.id == user.id {
            user.update(&self.fields);
        }
    }
}

/// Information detailing the current online status of a [`User`].
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#presence-update-presence-update-event-fields).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Presence {
    /// Data about the associated user.
    pub user: PresenceUser,
    /// The Id of the guild the presence was received in. Absent inside a guild snapshot, where
    /// the library fills it in.
    pub guild_id: Option<GuildId>,
    /// The user's online status.
    pub status: OnlineStatus,
    /// [`User`]'s current activities.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// The devices a user are currently active on, if available.
    pub client_status: Option<ClientStatus>,
}

/// An initial set of information given after IDENTIFYing to the gateway.
///
/// [Discord docs](https://discord.com/developers/docs/topics/gateway-events#ready-ready-event-fields).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Ready {
    /// API version
    #[serde(rename = "v")]
    pub version: u8,
    /// Information about the user including email
    pub user: CurrentUser,
    /// Guilds the user is in
    pub guilds: Vec<UnavailableGuild>,
    /// Used for resuming connections
    pub session_id: String,
    /// Gateway URL for resuming connections
    pub resume_gateway_url: Option<String>,
    /// Shard information associated with this session, if sent when identifying
    pub shard: Option<[u32; 2]>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn presence_user_fragments() {
        let presence: Presence = from_value(json!({
            "user": {"id": "210", "username": "crab"},
            "status": "dnd",
            "activities": [{"name": "rust", "type": 0, "created_at": 1}],
        }))
        .unwrap();

        assert_eq!(presence.status, OnlineStatus::DoNotDisturb);
        assert_eq!(presence.activities[0].kind, ActivityType::Playing);
        assert_eq!(presence.guild_id, None);

        let user = presence.user.to_user().unwrap();
        assert_eq!(user.name, "crab");

        let mut stale: User = from_value(json!({"id": "210", "username": "ferris"})).unwrap();
        presence.user.apply_to(&mut stale);
        assert_eq!(stale.name, "crab");

        let sparse: PresenceUser = from_value(json!({"id": "210"})).unwrap();
        assert!(sparse.to_user().is_none());
    }
}
