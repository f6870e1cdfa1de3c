//! A cache containing data received from the gateway.
//!
//! Using the cache allows to avoid REST API requests via the [`http`] module where possible.
//!
//! The cache is fed by handing every decoded [`Event`] to [`Cache::update`]. Snapshots such as
//! `GUILD_CREATE` replace what is cached, while update events like `GUILD_UPDATE` carry a partial
//! fragment that is merged into the cached value with [`Update::update`].
//!
//! Following a policy to never hand out locks, the cache will clone all values when calling its
//! methods.
//!
//! # Example
//!
//! ```rust
//! use accord::cache::Cache;
//! use accord::json::json;
//! use accord::model::event::Event;
//!
//! # fn run() -> accord::Result<()> {
//! let cache = Cache::new();
//! let mut event = Event::deserialize_with_name("GUILD_ROLE_DELETE", json!({
//!     "guild_id": "1",
//!     "role_id": "2",
//! }))?;
//!
//! cache.update(&mut event);
//! # Ok(())
//! # }
//! ```
//!
//! [`http`]: crate::http
//! [`Update::update`]: crate::model::update::Update::update

use std::collections::VecDeque;

use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use tracing::instrument;

use crate::model::prelude::*;

mod event;
mod settings;
mod wrappers;

pub use self::settings::Settings;
pub use self::wrappers::ReadOnlyMapRef;
use self::wrappers::MaybeMap;

/// Trait used for updating the cache with a type.
///
/// This may be implemented on a type and used to update the cache via [`Cache::update`].
///
/// # Examples
///
/// Creating a custom struct implementation to update the cache with:
///
/// ```rust
/// use accord::cache::{Cache, CacheUpdate};
/// use accord::model::id::UserId;
/// use accord::model::user::User;
///
/// struct RenameUser {
///     user_id: UserId,
///     name: String,
/// }
///
/// impl CacheUpdate for RenameUser {
///     // The old name, if the user was cached.
///     type Output = String;
///
///     fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
///         let mut user = cache.user_mut(self.user_id)?;
///         Some(std::mem::replace(&mut user.name, self.name.clone()))
///     }
/// }
/// ```
pub trait CacheUpdate {
    /// The return type of an update.
    ///
    /// If there is nothing to return, specify this type as an unit (`()`).
    type Output;

    /// Updates the cache with the implementation.
    fn update(&mut self, cache: &Cache) -> Option<Self::Output>;
}

/// A cache containing data received from the gateway.
///
/// The cache will clone all values when calling its methods.
#[derive(Debug)]
#[non_exhaustive]
pub struct Cache {
    /// A map of guilds with full data available. This includes data like [`Role`]s and
    /// [`Emoji`]s that are not available through the REST API.
    pub(crate) guilds: MaybeMap<GuildId, Guild>,
    /// A list of guilds which are "unavailable".
    ///
    /// Additionally, guilds are always unavailable for bot users when a Ready is received.
    /// Guilds are "sent in" over time through the receiving of [`Event::GuildCreate`]s.
    pub(crate) unavailable_guilds: MaybeMap<GuildId, ()>,
    /// A map of users that the current user has seen, whether through a guild snapshot, a member
    /// event, a presence or a message author.
    pub(crate) users: MaybeMap<UserId, User>,
    /// A map of direct message channels that the current user has open with other users.
    pub(crate) private_channels: MaybeMap<ChannelId, PrivateChannel>,
    /// A map of users' presences. This is updated in real-time. Note that status updates are
    /// often "eaten" by the gateway, and this should not be treated as being entirely 100%
    /// accurate.
    pub(crate) presences: DashMap<UserId, Presence>,
    /// The most recent messages of each channel, oldest first.
    pub(crate) messages: DashMap<ChannelId, VecDeque<Message>>,
    /// The current user "logged in" and for which events are being received for.
    ///
    /// This is unset until a [`Event::Ready`] is received.
    pub(crate) user: RwLock<Option<CurrentUser>>,
    settings: RwLock<Settings>,
}

impl Cache {
    /// Creates a new cache with the default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new cache instance with settings applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accord::cache::{Cache, Settings};
    ///
    /// let mut settings = Settings::default();
    /// settings.max_messages = 10;
    ///
    /// let cache = Cache::new_with_settings(settings);
    /// assert_eq!(cache.settings().max_messages, 10);
    /// ```
    #[instrument]
    #[must_use]
    pub fn new_with_settings(settings: Settings) -> Self {
        Self {
            guilds: MaybeMap::enabled(settings.cache_guilds),
            unavailable_guilds: MaybeMap::enabled(settings.cache_guilds),
            users: MaybeMap::enabled(settings.cache_users),
            private_channels: MaybeMap::enabled(settings.cache_channels),
            presences: DashMap::new(),
            messages: DashMap::new(),
            user: RwLock::new(None),
            settings: RwLock::new(settings),
        }
    }

    /// Fetches the number of [`Member`]s that have not had data received.
    ///
    /// The important detail to note here is that this is the number of _member_s that have not
    /// had data received. A single [`User`] may have multiple associated member objects that have
    /// not been received.
    ///
    /// This can be used in combination with requesting guild members over the gateway, to
    /// request the remaining members of every guild.
    pub fn unknown_members(&self) -> u64 {
        self.guilds
            .iter()
            .map(|guild| guild.member_count.saturating_sub(guild.members.len() as u64))
            .sum()
    }

    /// Fetches a vector of all [`PrivateChannel`] Ids that are stored in the cache.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accord::cache::Cache;
    ///
    /// let cache = Cache::new();
    /// assert!(cache.private_channels().is_empty());
    /// ```
    pub fn private_channels(&self) -> Vec<ChannelId> {
        self.private_channels.iter().map(|c| *c.key()).collect()
    }

    /// Retrieves a clone of the private channel with the given Id, if it is cached.
    pub fn private_channel(&self, id: impl Into<ChannelId>) -> Option<PrivateChannel> {
        self.private_channels.get(&id.into()).map(|c| c.clone())
    }

    /// Fetches a vector of all [`Guild`]s' Ids that are stored in the cache, including the
    /// unavailable ones.
    pub fn guilds(&self) -> Vec<GuildId> {
        let unavailable = self.unavailable_guilds.iter().map(|g| *g.key());

        self.guilds.iter().map(|g| *g.key()).chain(unavailable).collect()
    }

    /// Retrieves a clone of a [`Guild`] from the cache.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::cache::Cache;
    /// use accord::model::id::GuildId;
    ///
    /// let cache = Cache::new();
    /// assert!(cache.guild(GuildId::new(7)).is_none());
    /// ```
    pub fn guild(&self, id: impl Into<GuildId>) -> Option<Guild> {
        self.guilds.get(&id.into()).map(|g| g.clone())
    }

    /// Returns the number of cached guilds, available or not.
    pub fn guild_count(&self) -> usize {
        self.guilds.len() + self.unavailable_guilds.len()
    }

    /// Returns a read-only view of the guilds that are currently unavailable.
    ///
    /// These are the guilds listed by a [`Event::Ready`] that have not yet been received, or
    /// that went down during an outage.
    pub fn unavailable_guilds(&self) -> ReadOnlyMapRef<'_, GuildId, ()> {
        self.unavailable_guilds.as_read_only()
    }

    /// Retrieves a clone of a guild channel, looking through every cached guild.
    pub fn guild_channel(&self, id: impl Into<ChannelId>) -> Option<GuildChannel> {
        let id = id.into();

        self.guilds.iter().find_map(|guild| guild.channels.get(&id).cloned())
    }

    /// Retrieves a [`Channel`] from the cache, whether it lives in a guild or is a direct
    /// message channel.
    pub fn channel(&self, id: impl Into<ChannelId>) -> Option<Channel> {
        let id = id.into();

        if let Some(channel) = self.private_channel(id) {
            return Some(Channel::Private(channel));
        }

        self.guild_channel(id).map(Channel::Guild)
    }

    /// Returns a clone of every channel of a guild, or [`None`] if the guild is not cached.
    pub fn guild_channels(&self, guild_id: impl Into<GuildId>) -> Option<Vec<GuildChannel>> {
        let guild = self.guilds.get(&guild_id.into())?;

        Some(guild.channels.values().cloned().collect())
    }

    /// Retrieves a clone of a guild's member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::cache::Cache;
    /// use accord::model::id::{GuildId, UserId};
    ///
    /// let cache = Cache::new();
    /// assert!(cache.member(GuildId::new(1), UserId::new(2)).is_none());
    /// ```
    pub fn member(
        &self,
        guild_id: impl Into<GuildId>,
        user_id: impl Into<UserId>,
    ) -> Option<Member> {
        let guild = self.guilds.get(&guild_id.into())?;

        guild.members.get(&user_id.into()).cloned()
    }

    /// Returns a clone of every cached member of a guild, or [`None`] if the guild is not cached.
    pub fn members(&self, guild_id: impl Into<GuildId>) -> Option<Vec<Member>> {
        let guild = self.guilds.get(&guild_id.into())?;

        Some(guild.members.values().cloned().collect())
    }

    /// Retrieves a clone of a [`Role`] of a guild.
    pub fn role(&self, guild_id: impl Into<GuildId>, role_id: impl Into<RoleId>) -> Option<Role> {
        let guild = self.guilds.get(&guild_id.into())?;

        guild.roles.get(&role_id.into()).cloned()
    }

    /// Returns a clone of every role of a guild, or [`None`] if the guild is not cached.
    pub fn roles(&self, guild_id: impl Into<GuildId>) -> Option<Vec<Role>> {
        let guild = self.guilds.get(&guild_id.into())?;

        Some(guild.roles.values().cloned().collect())
    }

    /// Retrieves a clone of a [`User`] from the cache.
    pub fn user(&self, user_id: impl Into<UserId>) -> Option<User> {
        self.users.get(&user_id.into()).map(|u| u.clone())
    }

    /// Mutable access to a cached [`User`], for use by custom [`CacheUpdate`] implementations.
    ///
    /// The returned guard holds a write lock on a shard of the map, drop it before calling any
    /// other cache method.
    pub fn user_mut(
        &self,
        user_id: impl Into<UserId>,
    ) -> Option<dashmap::mapref::one::RefMut<'_, UserId, User>> {
        self.users.get_mut(&user_id.into())
    }

    /// Returns a read-only view of the cached users.
    pub fn users(&self) -> ReadOnlyMapRef<'_, UserId, User> {
        self.users.as_read_only()
    }

    /// Returns the number of cached users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Retrieves a clone of a user's latest [`Presence`].
    pub fn presence(&self, user_id: impl Into<UserId>) -> Option<Presence> {
        self.presences.get(&user_id.into()).map(|p| p.clone())
    }

    /// Retrieves a clone of a cached [`Message`].
    ///
    /// Messages are only cached when [`Settings::max_messages`] is non-zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use accord::cache::Cache;
    /// use accord::model::id::{ChannelId, MessageId};
    ///
    /// let cache = Cache::new();
    /// assert!(cache.message(ChannelId::new(1), MessageId::new(2)).is_none());
    /// ```
    pub fn message(
        &self,
        channel_id: impl Into<ChannelId>,
        message_id: impl Into<MessageId>,
    ) -> Option<Message> {
        let message_id = message_id.into();
        let messages = self.messages.get(&channel_id.into())?;

        messages.iter().find(|m| m.id == message_id).cloned()
    }

    /// Returns a clone of the cached messages of a channel, oldest first.
    pub fn channel_messages(&self, channel_id: impl Into<ChannelId>) -> Option<Vec<Message>> {
        let messages = self.messages.get(&channel_id.into())?;

        Some(messages.iter().cloned().collect())
    }

    /// Returns a clone of the current user, if a [`Event::Ready`] was received.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.read().clone()
    }

    /// Returns a read guard to the settings of the cache.
    pub fn settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read()
    }

    /// Sets the maximum amount of messages per channel to cache.
    ///
    /// Channels holding more messages than the new limit are truncated, evicting their oldest
    /// messages first.
    pub fn set_max_messages(&self, max: usize) {
        self.settings.write().max_messages = max;

        self.messages.retain(|_, messages| {
            while messages.len() > max {
                messages.pop_front();
            }

            !messages.is_empty()
        });
    }

    /// Releases the spare capacity of the internal maps.
    pub fn shrink_to_fit(&self) {
        self.guilds.shrink_to_fit();
        self.unavailable_guilds.shrink_to_fit();
        self.users.shrink_to_fit();
        self.private_channels.shrink_to_fit();
        self.presences.shrink_to_fit();
        self.messages.shrink_to_fit();
    }

    /// Updates the cache with the update implementation for an event or other custom update
    /// implementation.
    ///
    /// Returns the previous value, for the events which replace or remove one.
    ///
    /// Refer to the [documentation for `CacheUpdate`] for more information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use accord::cache::Cache;
    /// use accord::json::json;
    /// use accord::model::event::GuildRoleDeleteEvent;
    ///
    /// # fn run() -> Result<(), serde_json::Error> {
    /// let cache = Cache::new();
    /// let mut event: GuildRoleDeleteEvent =
    ///     serde_json::from_value(json!({"guild_id": "1", "role_id": "2"}))?;
    ///
    /// // Nothing was cached for that guild.
    /// assert!(cache.update(&mut event).is_none());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// [documentation for `CacheUpdate`]: CacheUpdate
    pub fn update<E: CacheUpdate>(&self, e: &mut E) -> Option<E::Output> {
        e.update(self)
    }

    pub(crate) fn cache_user(&self, user: &User) {
        self.users.insert(user.id, user.clone());
    }

    pub(crate) fn push_message(&self, message: &Message) -> Option<Message> {
        let max = self.settings().max_messages;

        if max == 0 {
            return None;
        }

        let mut messages = self.messages.entry(message.channel_id).or_default();

        if let Some(cached) = messages.iter_mut().find(|m| m.id == message.id) {
            return Some(std::mem::replace(cached, message.clone()));
        }

        let mut removed = None;
        if messages.len() >= max {
            removed = messages.pop_front();
        }

        messages.push_back(message.clone());

        removed
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new_with_settings(Settings::default())
    }
}

impl AsRef<Cache> for Cache {
    fn as_ref(&self) -> &Cache {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json};

    fn message(id: u64) -> Message {
        from_value(json!({
            "id": id.to_string(),
            "channel_id": "5",
            "author": {"id": "3", "username": "ferris"},
            "content": "",
            "timestamp": "2023-01-01T00:00:00Z",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "pinned": false,
            "type": 0,
        }))
        .unwrap()
    }

    #[test]
    fn disabled_maps_never_store() {
        let mut settings = Settings::default();
        settings.cache_users = false;

        let cache = Cache::new_with_settings(settings);
        cache.cache_user(&message(1).author);

        assert!(cache.user(UserId::new(3)).is_none());
        assert_eq!(cache.user_count(), 0);
    }

    #[test]
    fn message_history_is_bounded() {
        let cache = Cache::new();
        assert!(cache.push_message(&message(1)).is_none());
        assert!(cache.channel_messages(ChannelId::new(5)).is_none());

        cache.set_max_messages(2);
        assert!(cache.push_message(&message(1)).is_none());
        assert!(cache.push_message(&message(2)).is_none());

        let evicted = cache.push_message(&message(3)).unwrap();
        assert_eq!(evicted.id, MessageId::new(1));

        let ids: Vec<_> =
            cache.channel_messages(ChannelId::new(5)).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, [MessageId::new(2), MessageId::new(3)]);

        cache.set_max_messages(1);
        assert!(cache.message(ChannelId::new(5), MessageId::new(2)).is_none());
        assert!(cache.message(ChannelId::new(5), MessageId::new(3)).is_some());
    }
}
