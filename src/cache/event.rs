use std::collections::HashMap;

use tracing::{debug, warn};

use super::{Cache, CacheUpdate};
use crate::internal::prelude::*;
use crate::json::from_value;
use crate::model::channel::{Channel, GuildChannel, Message};
use crate::model::event::{
    ChannelCreateEvent,
    ChannelDeleteEvent,
    ChannelUpdateEvent,
    Event,
    GuildCreateEvent,
    GuildDeleteEvent,
    GuildEmojisUpdateEvent,
    GuildMemberAddEvent,
    GuildMemberRemoveEvent,
    GuildMemberUpdateEvent,
    GuildMembersChunkEvent,
    GuildRoleCreateEvent,
    GuildRoleDeleteEvent,
    GuildRoleUpdateEvent,
    GuildUpdateEvent,
    MessageCreateEvent,
    MessageDeleteBulkEvent,
    MessageDeleteEvent,
    MessageUpdateEvent,
    PresenceUpdateEvent,
    ReadyEvent,
    UserUpdateEvent,
};
use crate::model::gateway::{OnlineStatus, Presence};
use crate::model::guild::{Emoji, Guild, Member, Role};
use crate::model::id::{ChannelId, EmojiId};
use crate::model::update::Update;
use crate::model::user::CurrentUser;

/// Inserts a channel where it belongs and returns the channel it replaced.
fn insert_channel(cache: &Cache, channel: &Channel) -> Option<Channel> {
    match channel {
        Channel::Guild(channel) => {
            let Some(mut guild) = cache.guilds.get_mut(&channel.guild_id) else {
                warn!("Channel {} belongs to uncached guild {}", channel.id, channel.guild_id);
                return None;
            };

            guild.channels.insert(channel.id, channel.clone()).map(Channel::Guild)
        },
        Channel::Private(channel) => {
            for recipient in channel.recipients.iter().flatten() {
                cache.cache_user(recipient);
            }

            cache.private_channels.insert(channel.id, channel.clone()).map(Channel::Private)
        },
    }
}

fn remove_messages<'a>(cache: &Cache, channel_ids: impl IntoIterator<Item = &'a ChannelId>) {
    for channel_id in channel_ids {
        cache.messages.remove(channel_id);
    }
}

impl CacheUpdate for ChannelCreateEvent {
    type Output = Channel;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        insert_channel(cache, &self.channel)
    }
}

impl CacheUpdate for ChannelDeleteEvent {
    type Output = Channel;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let channel_id = self.channel.id();

        // Remove the cached messages for the channel.
        cache.messages.remove(&channel_id);

        match &self.channel {
            Channel::Guild(channel) => cache
                .guilds
                .get_mut(&channel.guild_id)
                .and_then(|mut g| g.channels.remove(&channel_id))
                .map(Channel::Guild),
            Channel::Private(_) => {
                cache.private_channels.remove(&channel_id).map(|(_, c)| Channel::Private(c))
            },
        }
    }
}

impl CacheUpdate for ChannelUpdateEvent {
    type Output = Channel;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        insert_channel(cache, &self.channel)
    }
}

impl CacheUpdate for GuildCreateEvent {
    type Output = Guild;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache.unavailable_guilds.remove(&self.guild.id);

        for member in self.guild.members.values() {
            cache.cache_user(&member.user);
        }

        for presence in self.guild.presences.values() {
            cache.presences.insert(presence.user.id, presence.clone());
        }

        cache.guilds.insert(self.guild.id, self.guild.clone())
    }
}

impl CacheUpdate for GuildDeleteEvent {
    type Output = Guild;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        if self.guild.unavailable == Some(true) {
            cache.unavailable_guilds.insert(self.guild.id, ());
        } else {
            cache.unavailable_guilds.remove(&self.guild.id);
        }

        let (_, guild) = cache.guilds.remove(&self.guild.id)?;
        remove_messages(cache, guild.channels.keys());

        Some(guild)
    }
}

impl CacheUpdate for GuildEmojisUpdateEvent {
    type Output = HashMap<EmojiId, Emoji>;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let Some(mut guild) = cache.guilds.get_mut(&self.guild_id) else {
            warn!("Emojis updated for uncached guild {}", self.guild_id);
            return None;
        };

        Some(std::mem::replace(&mut guild.emojis, self.emojis.clone()))
    }
}

impl CacheUpdate for GuildMemberAddEvent {
    type Output = ();

    fn update(&mut self, cache: &Cache) -> Option<()> {
        cache.cache_user(&self.member.user);

        if let Some(mut guild) = cache.guilds.get_mut(&self.member.guild_id) {
            if guild.members.insert(self.member.user.id, self.member.clone()).is_none() {
                guild.member_count += 1;
            }
        }

        None
    }
}

impl CacheUpdate for GuildMemberRemoveEvent {
    type Output = Member;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let mut guild = cache.guilds.get_mut(&self.guild_id)?;

        guild.member_count = guild.member_count.saturating_sub(1);
        guild.members.remove(&self.user.id)
    }
}

impl CacheUpdate for GuildMemberUpdateEvent {
    type Output = Member;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache.cache_user(&self.user);

        let Some(mut guild) = cache.guilds.get_mut(&self.guild_id) else {
            warn!("Member {} updated in uncached guild {}", self.user.id, self.guild_id);
            return None;
        };

        if let Some(member) = guild.members.get_mut(&self.user.id) {
            let old = member.clone();
            member.update(&self.fragment);

            return Some(old);
        }

        // The member update carries every member field, so an unknown member can be built
        // from it.
        let mut map = self.fragment.clone();
        map.insert("guild_id".into(), Value::from(self.guild_id.to_string()));

        match from_value::<Member>(Value::Object(map)) {
            Ok(member) => {
                guild.members.insert(self.user.id, member);
            },
            Err(why) => warn!("Member {} not cached and not decodable: {why:?}", self.user.id),
        }

        None
    }
}

impl CacheUpdate for GuildMembersChunkEvent {
    type Output = ();

    fn update(&mut self, cache: &Cache) -> Option<()> {
        for member in self.members.values() {
            cache.cache_user(&member.user);
        }

        if let Some(mut guild) = cache.guilds.get_mut(&self.guild_id) {
            guild.members.extend(self.members.clone());
        }

        None
    }
}

impl CacheUpdate for GuildRoleCreateEvent {
    type Output = Role;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache
            .guilds
            .get_mut(&self.guild_id)
            .and_then(|mut g| g.roles.insert(self.role.id, self.role.clone()))
    }
}

impl CacheUpdate for GuildRoleDeleteEvent {
    type Output = Role;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache.guilds.get_mut(&self.guild_id).and_then(|mut g| g.roles.remove(&self.role_id))
    }
}

impl CacheUpdate for GuildRoleUpdateEvent {
    type Output = Role;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let Some(mut guild) = cache.guilds.get_mut(&self.guild_id) else {
            warn!("Role {} updated in uncached guild {}", self.role.id, self.guild_id);
            return None;
        };

        guild.roles.insert(self.role.id, self.role.clone())
    }
}

impl CacheUpdate for GuildUpdateEvent {
    type Output = Guild;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let Some(mut guild) = cache.guilds.get_mut(&self.guild_id) else {
            warn!("Update for uncached guild {}", self.guild_id);
            return None;
        };

        let old = guild.clone();
        guild.update(&self.fragment);

        Some(old)
    }
}

impl CacheUpdate for MessageCreateEvent {
    /// The oldest message, if the channel's message cache was already full.
    type Output = Message;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache.cache_user(&self.message.author);

        // Update the relevant channel object with the new latest message if this message is newer
        if let Some(mut guild) = self.message.guild_id.and_then(|g_id| cache.guilds.get_mut(&g_id))
        {
            if let Some(channel) = guild.channels.get_mut(&self.message.channel_id) {
                update_channel_last_message_id(&self.message, channel);
            }
        }

        if let Some(mut channel) = cache.private_channels.get_mut(&self.message.channel_id) {
            channel.last_message_id = channel.last_message_id.max(Some(self.message.id));
        }

        cache.push_message(&self.message)
    }
}

fn update_channel_last_message_id(message: &Message, channel: &mut GuildChannel) {
    // Ids grow with their creation time.
    channel.last_message_id = channel.last_message_id.max(Some(message.id));
}

impl CacheUpdate for MessageUpdateEvent {
    type Output = Message;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let Some(mut messages) = cache.messages.get_mut(&self.channel_id) else {
            debug!("Update for uncached message {}", self.id);
            return None;
        };

        let message = messages.iter_mut().find(|m| m.id == self.id)?;
        let old = message.clone();
        message.update(&self.fragment);

        Some(old)
    }
}

impl CacheUpdate for MessageDeleteEvent {
    type Output = Message;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let mut messages = cache.messages.get_mut(&self.channel_id)?;
        let index = messages.iter().position(|m| m.id == self.message_id)?;

        messages.remove(index)
    }
}

impl CacheUpdate for MessageDeleteBulkEvent {
    type Output = Vec<Message>;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let mut messages = cache.messages.get_mut(&self.channel_id)?;
        let mut removed = Vec::new();

        messages.retain(|m| {
            if self.ids.contains(&m.id) {
                removed.push(m.clone());
                false
            } else {
                true
            }
        });

        Some(removed)
    }
}

impl CacheUpdate for PresenceUpdateEvent {
    type Output = Presence;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        let user_id = self.presence.user.id;

        if let Some(mut user) = cache.users.get_mut(&user_id) {
            self.presence.user.apply_to(&mut *user);
        } else if let Some(user) = self.presence.user.to_user() {
            cache.cache_user(&user);
        }

        if let Some(guild_id) = self.presence.guild_id {
            if let Some(mut guild) = cache.guilds.get_mut(&guild_id) {
                // If the member went offline, remove them from the presence list.
                if self.presence.status == OnlineStatus::Offline {
                    guild.presences.remove(&user_id);
                } else {
                    guild.presences.insert(user_id, self.presence.clone());
                }

                if let Some(member) = guild.members.get_mut(&user_id) {
                    self.presence.user.apply_to(&mut member.user);
                }
            }
        }

        if self.presence.status == OnlineStatus::Offline {
            cache.presences.remove(&user_id).map(|(_, p)| p)
        } else {
            cache.presences.insert(user_id, self.presence.clone())
        }
    }
}

impl CacheUpdate for ReadyEvent {
    type Output = ();

    fn update(&mut self, cache: &Cache) -> Option<()> {
        for unavailable in &self.ready.guilds {
            cache.guilds.remove(&unavailable.id);
            cache.unavailable_guilds.insert(unavailable.id, ());
        }

        cache.cache_user(&self.ready.user);
        *cache.user.write() = Some(self.ready.user.clone());

        None
    }
}

impl CacheUpdate for UserUpdateEvent {
    type Output = CurrentUser;

    fn update(&mut self, cache: &Cache) -> Option<Self::Output> {
        cache.cache_user(&self.current_user);

        let mut user = cache.user.write();
        std::mem::replace(&mut *user, Some(self.current_user.clone()))
    }
}

impl CacheUpdate for Event {
    type Output = ();

    /// Applies any cacheable event, discarding the previous value it returns.
    fn update(&mut self, cache: &Cache) -> Option<()> {
        match self {
            Self::Ready(event) => event.update(cache),
            Self::ChannelCreate(event) => event.update(cache).map(drop),
            Self::ChannelUpdate(event) => event.update(cache).map(drop),
            Self::ChannelDelete(event) => event.update(cache).map(drop),
            Self::GuildCreate(event) => event.update(cache).map(drop),
            Self::GuildUpdate(event) => event.update(cache).map(drop),
            Self::GuildDelete(event) => event.update(cache).map(drop),
            Self::GuildEmojisUpdate(event) => event.update(cache).map(drop),
            Self::GuildMemberAdd(event) => event.update(cache),
            Self::GuildMemberUpdate(event) => event.update(cache).map(drop),
            Self::GuildMemberRemove(event) => event.update(cache).map(drop),
            Self::GuildMembersChunk(event) => event.update(cache),
            Self::GuildRoleCreate(event) => event.update(cache).map(drop),
            Self::GuildRoleUpdate(event) => event.update(cache).map(drop),
            Self::GuildRoleDelete(event) => event.update(cache).map(drop),
            Self::MessageCreate(event) => event.update(cache).map(drop),
            Self::MessageUpdate(event) => event.update(cache).map(drop),
            Self::MessageDelete(event) => event.update(cache).map(drop),
            Self::MessageDeleteBulk(event) => event.update(cache).map(drop),
            Self::PresenceUpdate(event) => event.update(cache).map(drop),
            Self::UserUpdate(event) => event.update(cache).map(drop),
            Self::GuildBanAdd(_)
            | Self::GuildBanRemove(_)
            | Self::TypingStart(_)
            | Self::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::json;
    use crate::model::id::{GuildId, MessageId, RoleId, UserId};

    fn event(name: &str, data: Value) -> Event {
        Event::deserialize_with_name(name, data).unwrap()
    }

    fn guild_create() -> Event {
        event(
            "GUILD_CREATE",
            json!({
                "id": "1",
                "name": "crabs",
                "icon": null,
                "splash": null,
                "discovery_splash": null,
                "owner_id": "2",
                "afk_channel_id": null,
                "afk_timeout": 300,
                "verification_level": 0,
                "default_message_notifications": 0,
                "explicit_content_filter": 0,
                "roles": [{
                    "id": "1",
                    "name": "@everyone",
                    "color": 0,
                    "hoist": false,
                    "position": 0,
                    "permissions": "1024",
                    "managed": false,
                    "mentionable": false,
                }],
                "emojis": [],
                "features": [],
                "mfa_level": 0,
                "system_channel_id": null,
                "system_channel_flags": 0,
                "rules_channel_id": null,
                "vanity_url_code": null,
                "description": null,
                "banner": null,
                "premium_tier": 0,
                "preferred_locale": "en-US",
                "public_updates_channel_id": null,
                "nsfw_level": 0,
                "joined_at": "2023-01-01T00:00:00Z",
                "member_count": 1,
                "members": [{
                    "user": {"id": "2", "username": "ferris"},
                    "roles": [],
                    "joined_at": "2023-01-01T00:00:00Z",
                    "deaf": false,
                    "mute": false,
                }],
                "channels": [{"id": "5", "type": 0, "name": "general", "position": 0}],
                "presences": [],
            }),
        )
    }

    #[test]
    fn guild_lifecycle() {
        let cache = Cache::new();
        cache.update(&mut guild_create());

        let guild_id = GuildId::new(1);
        assert_eq!(cache.guild(guild_id).unwrap().name, "crabs");
        assert_eq!(cache.member(guild_id, UserId::new(2)).unwrap().guild_id, guild_id);
        assert_eq!(cache.user(UserId::new(2)).unwrap().name, "ferris");
        assert!(cache.channel(ChannelId::new(5)).is_some());

        cache.update(&mut event("GUILD_UPDATE", json!({"id": "1", "name": "lobsters"})));
        let guild = cache.guild(guild_id).unwrap();
        assert_eq!(guild.name, "lobsters");
        assert_eq!(guild.roles.len(), 1);

        cache.update(&mut event("GUILD_DELETE", json!({"id": "1", "unavailable": true})));
        assert!(cache.guild(guild_id).is_none());
        assert!(cache.unavailable_guilds().get(&guild_id).is_some());
        assert_eq!(cache.guilds(), [guild_id]);

        cache.update(&mut guild_create());
        assert!(cache.unavailable_guilds().is_empty());

        cache.update(&mut event("GUILD_DELETE", json!({"id": "1"})));
        assert_eq!(cache.guild_count(), 0);
    }

    #[test]
    fn members_and_roles_follow_events() {
        let cache = Cache::new();
        cache.update(&mut guild_create());
        let guild_id = GuildId::new(1);

        let mut update: GuildMemberUpdateEvent = from_value(json!({
            "guild_id": "1",
            "user": {"id": "2", "username": "ferris"},
            "nick": "crab",
            "roles": ["1"],
            "joined_at": "2023-01-01T00:00:00Z",
        }))
        .unwrap();
        let old = cache.update(&mut update).unwrap();
        assert_eq!(old.nick, None);
        assert_eq!(cache.member(guild_id, UserId::new(2)).unwrap().nick.as_deref(), Some("crab"));

        let mut delete: GuildRoleDeleteEvent =
            from_value(json!({"guild_id": "1", "role_id": "1"})).unwrap();
        assert_eq!(cache.update(&mut delete).unwrap().name, "@everyone");
        assert!(cache.role(guild_id, RoleId::new(1)).is_none());
        assert!(cache.update(&mut delete).is_none());

        let mut remove: GuildMemberRemoveEvent =
            from_value(json!({"guild_id": "1", "user": {"id": "2", "username": "ferris"}}))
                .unwrap();
        assert!(cache.update(&mut remove).is_some());
        assert_eq!(cache.guild(guild_id).unwrap().member_count, 0);
        assert!(cache.members(guild_id).unwrap().is_empty());
    }

    #[test]
    fn repeated_member_add_is_counted_once() {
        let cache = Cache::new();
        cache.update(&mut guild_create());
        let guild_id = GuildId::new(1);

        let member = |id: &str| {
            json!({
                "guild_id": "1",
                "user": {"id": id, "username": "crab"},
                "roles": [],
                "joined_at": "2023-01-01T00:00:00Z",
            })
        };

        cache.update(&mut event("GUILD_MEMBER_ADD", member("2")));
        assert_eq!(cache.guild(guild_id).unwrap().member_count, 1);

        cache.update(&mut event("GUILD_MEMBER_ADD", member("3")));
        cache.update(&mut event("GUILD_MEMBER_ADD", member("3")));
        assert_eq!(cache.guild(guild_id).unwrap().member_count, 2);
        assert_eq!(cache.members(guild_id).unwrap().len(), 2);
    }

    #[test]
    fn unknown_member_is_built_from_the_update() {
        let cache = Cache::new();
        cache.update(&mut guild_create());

        cache.update(&mut event(
            "GUILD_MEMBER_UPDATE",
            json!({
                "guild_id": "1",
                "user": {"id": "9", "username": "corro"},
                "roles": [],
                "joined_at": "2023-02-01T00:00:00Z",
            }),
        ));

        let member = cache.member(GuildId::new(1), UserId::new(9)).unwrap();
        assert_eq!(member.user.name, "corro");
    }

    #[test]
    fn messages_are_merged_and_deleted() {
        let mut settings = super::super::Settings::default();
        settings.max_messages = 10;
        let cache = Cache::new_with_settings(settings);
        cache.update(&mut guild_create());

        cache.update(&mut event(
            "MESSAGE_CREATE",
            json!({
                "id": "100",
                "channel_id": "5",
                "guild_id": "1",
                "author": {"id": "2", "username": "ferris"},
                "content": "hi",
                "timestamp": "2023-01-01T00:00:00Z",
                "edited_timestamp": null,
                "tts": false,
                "mention_everyone": false,
                "mentions": [],
                "mention_roles": [],
                "attachments": [],
                "pinned": false,
                "type": 0,
            }),
        ));

        let channel = cache.guild_channel(ChannelId::new(5)).unwrap();
        assert_eq!(channel.last_message_id, Some(MessageId::new(100)));

        cache.update(&mut event(
            "MESSAGE_UPDATE",
            json!({"id": "100", "channel_id": "5", "content": "hello"}),
        ));
        let message = cache.message(ChannelId::new(5), MessageId::new(100)).unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.author.name, "ferris");

        cache.update(&mut event("MESSAGE_DELETE", json!({"id": "100", "channel_id": "5"})));
        assert!(cache.message(ChannelId::new(5), MessageId::new(100)).is_none());
    }
}
