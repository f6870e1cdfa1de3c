
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap as Headers, HeaderValue};
use reqwest::{Client, ClientBuilder, Response as ReqwestResponse};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use super::request::Request;
use super::routing::Route;
use super::{ErrorResponse, GuildPagination, HttpError, LightMethod, MessagePagination};
use crate::constants;
use crate::internal::prelude::*;
use crate::json::{self, decode_resp, json, to_vec};
use crate::model::channel::{Channel, GuildChannel, Message, PrivateChannel, ReactionType};
use crate::model::error::check_audit_log_reason;
use crate::model::guild::{
    Ban,
    Emoji,
    GuildInfo,
    GuildPreview,
    GuildPrune,
    Member,
    PartialGuild,
    Role,
};
use crate::model::id::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
use crate::model::invite::Invite;
use crate::model::user::{CurrentUser, User};

/// A builder for the underlying [`Http`] client that performs requests to Discord's HTTP API.
///
/// If you do not need a proxy or a custom [`reqwest::Client`], you can use [`Http::new`]
/// instead.
///
/// ## Example
///
/// Create an instance of [`Http`] with a proxy:
///
/// ```rust
/// # use accord::http::HttpBuilder;
/// # fn run() {
/// let http = HttpBuilder::new("token").proxy("http://127.0.0.1:3000").build();
/// # }
/// ```
#[must_use]
pub struct HttpBuilder {
    client: Option<Client>,
    token: SecretString,
    proxy: Option<String>,
}

impl HttpBuilder {
    /// Construct a new builder to call methods on for the HTTP construction. The `token` will
    /// automatically be prefixed "Bot " if not already.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            client: None,
            token: SecretString::new(parse_token(token.as_ref())),
            proxy: None,
        }
    }

    /// Sets a token for the bot. If the token is not prefixed "Bot ", this method will
    /// automatically do so.
    pub fn token(mut self, token: impl AsRef<str>) -> Self {
        self.token = SecretString::new(parse_token(token.as_ref()));
        self
    }

    /// Sets the [`reqwest::Client`]. If one isn't provided, a default one will be used.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the proxy that Discord HTTP API requests will be passed to. This is mainly intended
    /// for something like [`twilight-http-proxy`], shared by multiple processes.
    ///
    /// The proxy should be in the form of the protocol and hostname, e.g.
    /// `http://127.0.0.1:3000` or `http://myproxy.example`. The `https://discord.com` origin of
    /// every request is replaced by it.
    ///
    /// [`twilight-http-proxy`]: https://github.com/twilight-rs/http-proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Use the given configuration to build the `Http` client.
    #[must_use]
    pub fn build(self) -> Http {
        let client = self.client.unwrap_or_else(|| {
            let builder = configure_client_backend(Client::builder());
            builder.build().expect("Cannot build reqwest::Client")
        });

        Http {
            client,
            token: self.token,
            proxy: self.proxy,
        }
    }
}

fn parse_token(token: &str) -> String {
    let token = token.trim();

    if token.starts_with("Bot ") || token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bot {token}")
    }
}

fn reason_into_header(reason: &str) -> Result<Headers> {
    check_audit_log_reason(Some(reason))?;

    let mut headers = Headers::new();

    // "The X-Audit-Log-Reason header supports 1-512 URL-encoded UTF-8 characters."
    // https://discord.com/developers/docs/resources/audit-log#audit-log-entry-object
    let encoded = utf8_percent_encode(reason, NON_ALPHANUMERIC).to_string();
    let header_value = HeaderValue::try_from(encoded).map_err(HttpError::InvalidHeader)?;

    headers.insert(constants::AUDIT_LOG_REASON_HEADER, header_value);
    Ok(headers)
}

fn reason_headers(reason: Option<&str>) -> Result<Option<Headers>> {
    reason.map(reason_into_header).transpose()
}

/// **Note**: For all member functions that return a [`Result`], the Error kind will be either
/// [`Error::Http`] or [`Error::Json`].
///
/// [`Error::Http`]: crate::error::Error::Http
/// [`Error::Json`]: crate::error::Error::Json
#[derive(Debug)]
pub struct Http {
    pub(crate) client: Client,
    token: SecretString,
    proxy: Option<String>,
}

impl Http {
    /// Creates a client with the given token, prefixed with "Bot " if it is not already.
    #[must_use]
    pub fn new(token: &str) -> Self {
        HttpBuilder::new(token).build()
    }

    /// The token the client authenticates with, including its "Bot " prefix.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Adds a [`Role`] to a [`Member`] in a [`Guild`].
    ///
    /// **Note**: Requires the [Manage Roles] permission.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildMemberRole {
                    guild_id,
                    user_id,
                    role_id,
                },
                LightMethod::Put,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Bans a [`User`] from a [`Guild`], removing their messages sent in the last X number of
    /// days.
    ///
    /// Passing a `delete_message_days` of `0` is equivalent to not removing any messages. Up to
    /// `7` days' worth of messages may be deleted.
    ///
    /// **Note**: Requires that you have the [Ban Members] permission.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    /// [Ban Members]: crate::model::Permissions::BAN_MEMBERS
    pub async fn ban_user(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delete_message_days: u8,
        reason: Option<&str>,
    ) -> Result<()> {
        let map = json!({
            "delete_message_seconds": u32::from(delete_message_days) * 86400,
        });

        self.wind(
            204,
            Request::new(
                Route::GuildBan {
                    guild_id,
                    user_id,
                },
                LightMethod::Put,
            )
            .body(Some(to_vec(&map)?))
            .headers(reason_headers(reason)?),
        )
        .await
    }

    /// Broadcasts that the current user is typing in the given [`Channel`].
    ///
    /// This lasts for about 10 seconds, and will then need to be renewed to indicate that the
    /// current user is still typing.
    pub async fn broadcast_typing(&self, channel_id: ChannelId) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelTyping {
                    channel_id,
                },
                LightMethod::Post,
            ),
        )
        .await
    }

    /// Creates a [`GuildChannel`] in the [`Guild`] given its Id.
    ///
    /// **Note**: Requires the [Manage Channels] permission.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    /// [Manage Channels]: crate::model::Permissions::MANAGE_CHANNELS
    pub async fn create_channel(
        &self,
        guild_id: GuildId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<GuildChannel> {
        self.fire(
            Request::new(
                Route::GuildChannels {
                    guild_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Creates an emoji in the given [`Guild`] with the given data.
    ///
    /// **Note**: Requires the [Manage Guild Expressions] permission.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    /// [Manage Guild Expressions]: crate::model::Permissions::MANAGE_GUILD_EXPRESSIONS
    pub async fn create_emoji(
        &self,
        guild_id: GuildId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Emoji> {
        self.fire(
            Request::new(
                Route::GuildEmojis {
                    guild_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Creates a new invite for the given channel.
    ///
    /// **Note**: Requires the [Create Instant Invite] permission.
    ///
    /// [Create Instant Invite]: crate::model::Permissions::CREATE_INSTANT_INVITE
    pub async fn create_invite(
        &self,
        channel_id: ChannelId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Invite> {
        self.fire(
            Request::new(
                Route::ChannelInvites {
                    channel_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Creates a permission override for a member or a role in a channel.
    pub async fn create_permission(
        &self,
        channel_id: ChannelId,
        target_id: u64,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelPermission {
                    channel_id,
                    target_id,
                },
                LightMethod::Put,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Creates a private channel with a user.
    pub async fn create_private_channel(&self, recipient_id: UserId) -> Result<PrivateChannel> {
        let map = json!({
            "recipient_id": recipient_id,
        });

        self.fire(
            Request::new(Route::UserMeDmChannels, LightMethod::Post).body(Some(to_vec(&map)?)),
        )
            .await
    }

    /// Reacts to a message.
    pub async fn create_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction_type: &ReactionType,
    ) -> Result<()> {
        let reaction = encode_reaction(reaction_type);

        self.wind(
            204,
            Request::new(
                Route::ChannelMessageReactionMe {
                    channel_id,
                    message_id,
                    reaction: &reaction,
                },
                LightMethod::Put,
            ),
        )
        .await
    }

    /// Creates a role.
    pub async fn create_role(
        &self,
        guild_id: GuildId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Role> {
        self.fire(
            Request::new(
                Route::GuildRoles {
                    guild_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Crossposts a message by Id.
    ///
    /// **Note**: Only available on news channels.
    pub async fn crosspost_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message> {
        self.fire(Request::new(
            Route::ChannelMessageCrosspost {
                channel_id,
                message_id,
            },
            LightMethod::Post,
        ))
        .await
    }

    /// Deletes a private channel or a channel in a guild.
    pub async fn delete_channel(
        &self,
        channel_id: ChannelId,
        audit_log_reason: Option<&str>,
    ) -> Result<Channel> {
        self.fire(
            Request::new(
                Route::Channel {
                    channel_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes an emoji from a guild.
    pub async fn delete_emoji(
        &self,
        guild_id: GuildId,
        emoji_id: EmojiId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildEmoji {
                    guild_id,
                    emoji_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes a guild, only if connected account owns it.
    pub async fn delete_guild(&self, guild_id: GuildId) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::Guild {
                    guild_id,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Deletes an invite by code.
    pub async fn delete_invite(
        &self,
        code: &str,
        audit_log_reason: Option<&str>,
    ) -> Result<Invite> {
        self.fire(
            Request::new(
                Route::Invite {
                    code,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes a message if created by us or we have specific permissions.
    pub async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelMessage {
                    channel_id,
                    message_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes a bunch of messages, only works for bots.
    pub async fn delete_messages(
        &self,
        channel_id: ChannelId,
        map: &Value,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelMessagesBulkDelete {
                    channel_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes all of the [`MessageReaction`]s associated with a [`Message`].
    ///
    /// [`MessageReaction`]: crate::model::channel::MessageReaction
    pub async fn delete_message_reactions(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelMessageReactions {
                    channel_id,
                    message_id,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Deletes a permission override from a role or a member in a channel.
    pub async fn delete_permission(
        &self,
        channel_id: ChannelId,
        target_id: u64,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelPermission {
                    channel_id,
                    target_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes a reaction from a message if owned by us or we have specific permissions.
    pub async fn delete_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        user_id: UserId,
        reaction_type: &ReactionType,
    ) -> Result<()> {
        let reaction = encode_reaction(reaction_type);

        self.wind(
            204,
            Request::new(
                Route::ChannelMessageReaction {
                    channel_id,
                    message_id,
                    user_id,
                    reaction: &reaction,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Deletes a reaction by the current user from a message.
    pub async fn delete_reaction_me(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction_type: &ReactionType,
    ) -> Result<()> {
        let reaction = encode_reaction(reaction_type);

        self.wind(
            204,
            Request::new(
                Route::ChannelMessageReactionMe {
                    channel_id,
                    message_id,
                    reaction: &reaction,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Deletes a role from a server. Can't remove the default everyone role.
    pub async fn delete_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildRole {
                    guild_id,
                    role_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Changes channel information.
    pub async fn edit_channel(
        &self,
        channel_id: ChannelId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<GuildChannel> {
        self.fire(
            Request::new(
                Route::Channel {
                    channel_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Changes emoji information.
    pub async fn edit_emoji(
        &self,
        guild_id: GuildId,
        emoji_id: EmojiId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Emoji> {
        self.fire(
            Request::new(
                Route::GuildEmoji {
                    guild_id,
                    emoji_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Changes guild information.
    pub async fn edit_guild(
        &self,
        guild_id: GuildId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<PartialGuild> {
        self.fire(
            Request::new(
                Route::Guild {
                    guild_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Edits the positions of a guild's channels.
    pub async fn edit_guild_channel_positions(
        &self,
        guild_id: GuildId,
        value: &Value,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildChannels {
                    guild_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(value)?)),
        )
        .await
    }

    /// Edits a [`Guild`]'s member.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    pub async fn edit_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Member> {
        let value = self
            .fire(
                Request::new(
                    Route::GuildMember {
                        guild_id,
                        user_id,
                    },
                    LightMethod::Patch,
                )
                .body(Some(to_vec(map)?))
                .headers(reason_headers(audit_log_reason)?),
            )
            .await?;

        decode_member(value, guild_id)
    }

    /// Edits a message by Id.
    ///
    /// **Note**: Only the author of a message can modify it.
    pub async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        map: &impl Serialize,
    ) -> Result<Message> {
        self.fire(
            Request::new(
                Route::ChannelMessage {
                    channel_id,
                    message_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Edits the current user's nickname for the provided [`Guild`] via its Id.
    ///
    /// Pass [`None`] to reset the nickname.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    pub async fn edit_nickname(
        &self,
        guild_id: GuildId,
        new_nickname: Option<&str>,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        let map = json!({ "nick": new_nickname });

        self.wind(
            200,
            Request::new(
                Route::GuildMemberMe {
                    guild_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(&map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Edits the current user's profile settings.
    pub async fn edit_profile(&self, map: &impl Serialize) -> Result<CurrentUser> {
        self.fire(Request::new(Route::UserMe, LightMethod::Patch).body(Some(to_vec(map)?))).await
    }

    /// Changes a role in a guild.
    pub async fn edit_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        map: &impl Serialize,
        audit_log_reason: Option<&str>,
    ) -> Result<Role> {
        self.fire(
            Request::new(
                Route::GuildRole {
                    guild_id,
                    role_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Changes the positions of roles in a guild, returning every role of the guild.
    pub async fn edit_role_positions(
        &self,
        guild_id: GuildId,
        positions: &[(RoleId, u16)],
        audit_log_reason: Option<&str>,
    ) -> Result<Vec<Role>> {
        let map: Vec<Value> = positions
            .iter()
            .map(|(id, position)| json!({ "id": id, "position": position }))
            .collect();

        self.fire(
            Request::new(
                Route::GuildRoles {
                    guild_id,
                },
                LightMethod::Patch,
            )
            .body(Some(to_vec(&map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Gets a ban of a user in a guild.
    pub async fn get_ban(&self, guild_id: GuildId, user_id: UserId) -> Result<Ban> {
        self.fire(Request::new(
            Route::GuildBan {
                guild_id,
                user_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets the bans of a guild, in ascending user id order.
    ///
    /// `after` is an exclusive cursor; `limit` defaults to 1000 on Discord's side.
    pub async fn get_bans(
        &self,
        guild_id: GuildId,
        after: Option<UserId>,
        limit: Option<u16>,
    ) -> Result<Vec<Ban>> {
        let mut params = vec![];
        if let Some(after) = after {
            params.push(("after", after.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        self.fire(
            Request::new(
                Route::GuildBans {
                    guild_id,
                },
                LightMethod::Get,
            )
            .params(Some(params)),
        )
        .await
    }

    /// Gets channel information.
    pub async fn get_channel(&self, channel_id: ChannelId) -> Result<Channel> {
        self.fire(Request::new(
            Route::Channel {
                channel_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets all invites for a channel.
    pub async fn get_channel_invites(&self, channel_id: ChannelId) -> Result<Vec<Invite>> {
        self.fire(Request::new(
            Route::ChannelInvites {
                channel_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets all channels in a guild.
    pub async fn get_channels(&self, guild_id: GuildId) -> Result<Vec<GuildChannel>> {
        self.fire(Request::new(
            Route::GuildChannels {
                guild_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets information about the current user.
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        self.fire(Request::new(Route::UserMe, LightMethod::Get)).await
    }

    /// Gets information about an emoji in a guild.
    pub async fn get_emoji(&self, guild_id: GuildId, emoji_id: EmojiId) -> Result<Emoji> {
        self.fire(Request::new(
            Route::GuildEmoji {
                guild_id,
                emoji_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets all emojis of a guild.
    pub async fn get_emojis(&self, guild_id: GuildId) -> Result<Vec<Emoji>> {
        self.fire(Request::new(
            Route::GuildEmojis {
                guild_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets guild information, with the approximate member and presence counts.
    pub async fn get_guild(&self, guild_id: GuildId) -> Result<PartialGuild> {
        self.fire(
            Request::new(
                Route::Guild {
                    guild_id,
                },
                LightMethod::Get,
            )
            .params(Some(vec![("with_counts", "true".to_string())])),
        )
        .await
    }

    /// Gets all invites to a guild.
    pub async fn get_guild_invites(&self, guild_id: GuildId) -> Result<Vec<Invite>> {
        self.fire(Request::new(
            Route::GuildInvites {
                guild_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets the members of a guild, in ascending user id order.
    ///
    /// `after` is an exclusive cursor; Discord accepts a `limit` of up to 1000.
    pub async fn get_guild_members(
        &self,
        guild_id: GuildId,
        limit: Option<u16>,
        after: Option<UserId>,
    ) -> Result<Vec<Member>> {
        let mut params = vec![("limit", limit.unwrap_or(constants::MEMBERS_PAGE_SIZE).to_string())];
        if let Some(after) = after {
            params.push(("after", after.to_string()));
        }

        let value = self
            .fire(
                Request::new(
                    Route::GuildMembers {
                        guild_id,
                    },
                    LightMethod::Get,
                )
                .params(Some(params)),
            )
            .await?;

        decode_members(value, guild_id)
    }

    /// Gets the public preview of a guild.
    pub async fn get_guild_preview(&self, guild_id: GuildId) -> Result<GuildPreview> {
        self.fire(Request::new(
            Route::GuildPreview {
                guild_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets the amount of users that can be pruned.
    pub async fn get_guild_prune_count(&self, guild_id: GuildId, days: u8) -> Result<GuildPrune> {
        self.fire(
            Request::new(
                Route::GuildPrune {
                    guild_id,
                },
                LightMethod::Get,
            )
            .params(Some(vec![("days", days.to_string())])),
        )
        .await
    }

    /// Gets all roles of a guild.
    pub async fn get_guild_roles(&self, guild_id: GuildId) -> Result<Vec<Role>> {
        self.fire(Request::new(
            Route::GuildRoles {
                guild_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets a paginated list of the current user's guilds.
    ///
    /// The `limit` has a maximum value of 200.
    pub async fn get_guilds(
        &self,
        target: Option<GuildPagination>,
        limit: Option<u16>,
    ) -> Result<Vec<GuildInfo>> {
        let mut params = vec![];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        match target {
            Some(GuildPagination::After(after)) => params.push(("after", after.to_string())),
            Some(GuildPagination::Before(before)) => params.push(("before", before.to_string())),
            None => {},
        }

        self.fire(Request::new(Route::UserMeGuilds, LightMethod::Get).params(Some(params))).await
    }

    /// Gets information about a specific invite.
    pub async fn get_invite(&self, code: &str, member_counts: bool) -> Result<Invite> {
        self.fire(
            Request::new(
                Route::Invite {
                    code,
                },
                LightMethod::Get,
            )
            .params(Some(vec![("with_counts", member_counts.to_string())])),
        )
        .await
    }

    /// Gets member of a guild.
    pub async fn get_member(&self, guild_id: GuildId, user_id: UserId) -> Result<Member> {
        let value = self
            .fire(Request::new(
                Route::GuildMember {
                    guild_id,
                    user_id,
                },
                LightMethod::Get,
            ))
            .await?;

        decode_member(value, guild_id)
    }

    /// Gets a message by an Id, bots only.
    pub async fn get_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message> {
        self.fire(Request::new(
            Route::ChannelMessage {
                channel_id,
                message_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets X messages from a channel.
    pub async fn get_messages(
        &self,
        channel_id: ChannelId,
        target: Option<MessagePagination>,
        limit: Option<u8>,
    ) -> Result<Vec<Message>> {
        let mut params = vec![];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(target) = target {
            match target {
                MessagePagination::After(id) => params.push(("after", id.to_string())),
                MessagePagination::Around(id) => params.push(("around", id.to_string())),
                MessagePagination::Before(id) => params.push(("before", id.to_string())),
            }
        }

        self.fire(
            Request::new(
                Route::ChannelMessages {
                    channel_id,
                },
                LightMethod::Get,
            )
            .params(Some(params)),
        )
        .await
    }

    /// Gets all pins of a channel.
    pub async fn get_pins(&self, channel_id: ChannelId) -> Result<Vec<Message>> {
        self.fire(Request::new(
            Route::ChannelPins {
                channel_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Gets user Ids based on their reaction to a message. This endpoint is dumb.
    pub async fn get_reaction_users(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction_type: &ReactionType,
        limit: u8,
        after: Option<UserId>,
    ) -> Result<Vec<User>> {
        let reaction = encode_reaction(reaction_type);
        let mut params = vec![("limit", limit.to_string())];
        if let Some(after) = after {
            params.push(("after", after.to_string()));
        }

        self.fire(
            Request::new(
                Route::ChannelMessageReactionEmoji {
                    channel_id,
                    message_id,
                    reaction: &reaction,
                },
                LightMethod::Get,
            )
            .params(Some(params)),
        )
        .await
    }

    /// Gets a user by Id.
    pub async fn get_user(&self, user_id: UserId) -> Result<User> {
        self.fire(Request::new(
            Route::User {
                user_id,
            },
            LightMethod::Get,
        ))
        .await
    }

    /// Kicks a member from a guild with a provided reason.
    pub async fn kick_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildMember {
                    guild_id,
                    user_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(reason)?),
        )
        .await
    }

    /// Leaves a guild.
    pub async fn leave_guild(&self, guild_id: GuildId) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::UserMeGuild {
                    guild_id,
                },
                LightMethod::Delete,
            ),
        )
        .await
    }

    /// Pins a message in a channel.
    pub async fn pin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelPin {
                    channel_id,
                    message_id,
                },
                LightMethod::Put,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Unbans a user from a guild.
    pub async fn remove_ban(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildBan {
                    guild_id,
                    user_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Deletes a single [`Role`] from a [`Member`] in a [`Guild`].
    ///
    /// **Note**: Requires the [Manage Roles] permission and respect of role hierarchy.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    /// [Manage Roles]: crate::model::Permissions::MANAGE_ROLES
    pub async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::GuildMemberRole {
                    guild_id,
                    user_id,
                    role_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Returns a list of [`Member`]s in a [`Guild`] whose username or nickname starts with a
    /// provided string.
    ///
    /// [`Guild`]: crate::model::guild::Guild
    pub async fn search_guild_members(
        &self,
        guild_id: GuildId,
        query: &str,
        limit: Option<u16>,
    ) -> Result<Vec<Member>> {
        let mut params = vec![("query", query.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let value = self
            .fire(
                Request::new(
                    Route::GuildMembersSearch {
                        guild_id,
                    },
                    LightMethod::Get,
                )
                .params(Some(params)),
            )
            .await?;

        decode_members(value, guild_id)
    }

    /// Sends a message to a channel.
    pub async fn send_message(
        &self,
        channel_id: ChannelId,
        map: &impl Serialize,
    ) -> Result<Message> {
        self.fire(
            Request::new(
                Route::ChannelMessages {
                    channel_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(map)?)),
        )
        .await
    }

    /// Starts removing some members from a guild based on the last time they've been online.
    pub async fn start_guild_prune(
        &self,
        guild_id: GuildId,
        days: u8,
        audit_log_reason: Option<&str>,
    ) -> Result<GuildPrune> {
        let map = json!({ "days": days });

        self.fire(
            Request::new(
                Route::GuildPrune {
                    guild_id,
                },
                LightMethod::Post,
            )
            .body(Some(to_vec(&map)?))
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Unpins a message from a channel.
    pub async fn unpin_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        audit_log_reason: Option<&str>,
    ) -> Result<()> {
        self.wind(
            204,
            Request::new(
                Route::ChannelPin {
                    channel_id,
                    message_id,
                },
                LightMethod::Delete,
            )
            .headers(reason_headers(audit_log_reason)?),
        )
        .await
    }

    /// Fires off a request, deserializing the response reader via the given type bound.
    ///
    /// If you don't need to deserialize the response and want the response instance itself, use
    /// [`Self::request`].
    pub async fn fire<T: DeserializeOwned>(&self, req: Request<'_>) -> Result<T> {
        let response = self.request(req).await?;
        decode_resp(response).await
    }

    /// Performs a request, returning the response if the status code is successful.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnsuccessfulRequest`] with Discord's decoded error body if the
    /// response status is not a success.
    #[instrument(skip(self))]
    pub async fn request(&self, req: Request<'_>) -> Result<ReqwestResponse> {
        let method = req.method;
        let request = req.build(&self.client, self.token(), self.proxy.as_deref())?.build()?;

        debug!("Sending {} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;

        trace!("Response status: {}", response.status());

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::Http(HttpError::UnsuccessfulRequest(
                ErrorResponse::from_response(response, method).await,
            )))
        }
    }

    /// Performs a request and then verifies that the response status code is equal to the
    /// expected value.
    ///
    /// This is a function that performs a light amount of work and returns an empty tuple, so
    /// it's called "self.wind" to denote that it's lightweight.
    pub(super) async fn wind(&self, expected: u16, req: Request<'_>) -> Result<()> {
        let method = req.method;
        let response = self.request(req).await?;

        if response.status().as_u16() == expected {
            return Ok(());
        }

        debug!("Expected {}, got {}", expected, response.status());
        trace!("Unsuccessful response: {:?}", response);

        Err(Error::Http(HttpError::UnsuccessfulRequest(
            ErrorResponse::from_response(response, method).await,
        )))
    }
}

impl AsRef<Http> for Http {
    fn as_ref(&self) -> &Http {
        self
    }
}

/// Percent-encodes a reaction for use in a path segment.
fn encode_reaction(reaction_type: &ReactionType) -> String {
    utf8_percent_encode(&reaction_type.as_data(), NON_ALPHANUMERIC).to_string()
}

/// Member objects returned by guild endpoints don't carry their guild's id.
fn decode_member(mut value: Value, guild_id: GuildId) -> Result<Member> {
    if let Some(map) = value.as_object_mut() {
        map.entry("guild_id").or_insert_with(|| Value::from(guild_id.to_string()));
    }

    json::from_value(value)
}

fn decode_members(value: Value, guild_id: GuildId) -> Result<Vec<Member>> {
    match value {
        Value::Array(members) => {
            members.into_iter().map(|member| decode_member(member, guild_id)).collect()
        },
        other => json::from_value(other),
    }
}

fn configure_client_backend(builder: ClientBuilder) -> ClientBuilder {
    #[cfg(feature = "rustls_backend")]
    let builder = builder.use_rustls_tls();

    #[cfg(all(feature = "native_tls_backend", not(feature = "rustls_backend")))]
    let builder = builder.use_native_tls();

    builder
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tokens_are_prefixed_once() {
        assert_eq!(parse_token("abc"), "Bot abc");
        assert_eq!(parse_token(" Bot abc "), "Bot abc");
        assert_eq!(Http::new("abc").token(), "Bot abc");
    }

    #[test]
    fn reasons_are_percent_encoded() {
        let headers = reason_into_header("bad ban? ok").unwrap();
        assert_eq!(headers[constants::AUDIT_LOG_REASON_HEADER], "bad%20ban%3F%20ok");

        let long = "a".repeat(constants::AUDIT_LOG_REASON_LIMIT + 1);
        assert!(matches!(
            reason_into_header(&long),
            Err(Error::Model(crate::model::ModelError::AuditLogReasonTooLong(513)))
        ));
    }

    #[test]
    fn builder_sets_token_and_proxy() {
        let http = HttpBuilder::new("abc").token("def").proxy("http://127.0.0.1:3000").build();

        assert_eq!(http.token(), "Bot def");
        assert_eq!(http.proxy.as_deref(), Some("http://127.0.0.1:3000"));
    }

    #[test]
    fn reactions_are_path_safe() {
        assert_eq!(encode_reaction(&ReactionType::Unicode("\u{1F44D}".into())), "%F0%9F%91%8D");
        assert_eq!(
            encode_reaction(&ReactionType::Custom {
                animated: false,
                id: EmojiId::new(7),
                name: Some("blob".into()),
            }),
            "blob%3A7"
        );
    }

    #[test]
    fn members_get_their_guild_id() {
        let members = decode_members(
            json!([{
                "user": {"id": "5", "username": "crab"},
                "roles": [],
                "joined_at": "2024-01-01T00:00:00Z",
            }]),
            GuildId::new(3),
        )
        .unwrap();

        assert_eq!(members[0].guild_id, GuildId::new(3));
    }
}
