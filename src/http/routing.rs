use std::borrow::Cow;

use crate::model::id::*;

/// A macro for defining routes. Takes as input a list of route definitions, and generates a
/// definition for the `Route` enum and implements methods on it.
macro_rules! routes {
    ($lt:lifetime, {
        $(
            $name:ident $({ $($field_name:ident: $field_type:ty),* })?,
            $path:expr;
        )+
    }) => {
        #[derive(Clone, Copy, Debug)]
        #[non_exhaustive]
        pub enum Route<$lt> {
            $(
                $name $({ $($field_name: $field_type),* })?,
            )+
        }

        impl<$lt> Route<$lt> {
            /// The full URL of the route, built on the API base URL.
            #[must_use]
            pub fn path(self) -> Cow<'static, str> {
                match self {
                    $(
                        Self::$name $({ $($field_name),* })? => $path.into(),
                    )+
                }
            }
        }
    };
}

// This macro takes as input a list of route definitions, represented in the following way:
// 1. The first line defines an enum variant representing an endpoint.
// 2. The second line provides the url for that endpoint.
routes! ('a, {
    Channel { channel_id: ChannelId },
    api!("/channels/{}", channel_id);

    ChannelInvites { channel_id: ChannelId },
    api!("/channels/{}/invites", channel_id);

    ChannelMessage { channel_id: ChannelId, message_id: MessageId },
    api!("/channels/{}/messages/{}", channel_id, message_id);

    ChannelMessageCrosspost { channel_id: ChannelId, message_id: MessageId },
    api!("/channels/{}/messages/{}/crosspost", channel_id, message_id);

    ChannelMessageReaction {
        channel_id: ChannelId,
        message_id: MessageId,
        user_id: UserId,
        reaction: &'a str
    },
    api!("/channels/{}/messages/{}/reactions/{}/{}", channel_id, message_id, reaction, user_id);

    ChannelMessageReactionMe { channel_id: ChannelId, message_id: MessageId, reaction: &'a str },
    api!("/channels/{}/messages/{}/reactions/{}/@me", channel_id, message_id, reaction);

    ChannelMessageReactionEmoji { channel_id: ChannelId, message_id: MessageId, reaction: &'a str },
    api!("/channels/{}/messages/{}/reactions/{}", channel_id, message_id, reaction);

    ChannelMessageReactions { channel_id: ChannelId, message_id: MessageId },
    api!("/channels/{}/messages/{}/reactions", channel_id, message_id);

    ChannelMessages { channel_id: ChannelId },
    api!("/channels/{}/messages", channel_id);

    ChannelMessagesBulkDelete { channel_id: ChannelId },
    api!("/channels/{}/messages/bulk-delete", channel_id);

    ChannelPermission { channel_id: ChannelId, target_id: u64 },
    api!("/channels/{}/permissions/{}", channel_id, target_id);

    ChannelPin { channel_id: ChannelId, message_id: MessageId },
    api!("/channels/{}/pins/{}", channel_id, message_id);

    ChannelPins { channel_id: ChannelId },
    api!("/channels/{}/pins", channel_id);

    ChannelTyping { channel_id: ChannelId },
    api!("/channels/{}/typing", channel_id);

    Guild { guild_id: GuildId },
    api!("/guilds/{}", guild_id);

    GuildBan { guild_id: GuildId, user_id: UserId },
    api!("/guilds/{}/bans/{}", guild_id, user_id);

    GuildBans { guild_id: GuildId },
    api!("/guilds/{}/bans", guild_id);

    GuildChannels { guild_id: GuildId },
    api!("/guilds/{}/channels", guild_id);

    GuildEmoji { guild_id: GuildId, emoji_id: EmojiId },
    api!("/guilds/{}/emojis/{}", guild_id, emoji_id);

    GuildEmojis { guild_id: GuildId },
    api!("/guilds/{}/emojis", guild_id);

    GuildInvites { guild_id: GuildId },
    api!("/guilds/{}/invites", guild_id);

    GuildMember { guild_id: GuildId, user_id: UserId },
    api!("/guilds/{}/members/{}", guild_id, user_id);

    GuildMemberMe { guild_id: GuildId },
    api!("/guilds/{}/members/@me", guild_id);

    GuildMemberRole { guild_id: GuildId, user_id: UserId, role_id: RoleId },
    api!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id);

    GuildMembers { guild_id: GuildId },
    api!("/guilds/{}/members", guild_id);

    GuildMembersSearch { guild_id: GuildId },
    api!("/guilds/{}/members/search", guild_id);

    GuildPreview { guild_id: GuildId },
    api!("/guilds/{}/preview", guild_id);

    GuildPrune { guild_id: GuildId },
    api!("/guilds/{}/prune", guild_id);

    GuildRole { guild_id: GuildId, role_id: RoleId },
    api!("/guilds/{}/roles/{}", guild_id, role_id);

    GuildRoles { guild_id: GuildId },
    api!("/guilds/{}/roles", guild_id);

    Invite { code: &'a str },
    api!("/invites/{}", code);

    User { user_id: UserId },
    api!("/users/{}", user_id);

    UserMe,
    api!("/users/@me");

    UserMeDmChannels,
    api!("/users/@me/channels");

    UserMeGuild { guild_id: GuildId },
    api!("/users/@me/guilds/{}", guild_id);

    UserMeGuilds,
    api!("/users/@me/guilds");
});

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn paths_embed_their_ids() {
        let route = Route::GuildMemberRole {
            guild_id: GuildId::new(1),
            user_id: UserId::new(2),
            role_id: RoleId::new(3),
        };
        assert_eq!(route.path(), "https://discord.com/api/v10/guilds/1/members/2/roles/3");

        let route = Route::ChannelMessageReactionMe {
            channel_id: ChannelId::new(4),
            message_id: MessageId::new(5),
            reaction: "%F0%9F%91%8D",
        };
        assert_eq!(
            route.path(),
            "https://discord.com/api/v10/channels/4/messages/5/reactions/%F0%9F%91%8D/@me"
        );

        assert_eq!(Route::UserMe.path(), "https://discord.com/api/v10/users/@me");
    }
}
