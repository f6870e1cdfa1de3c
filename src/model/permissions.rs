//! A set of permissions for a role or user. These can be assigned directly to a role or as a
//! channel's permission overrides.
//!
//! For convenience, methods for each permission are available, which can be used to test if the
//! set of permissions contains a single permission. This can simplify code and reduce a potential
//! import.
//!
//! Additionally, presets equivalent to the official client's `@everyone` role presets are
//! available. These are [`PRESET_GENERAL`], [`PRESET_TEXT`], and [`PRESET_VOICE`].
//!
//! Permissions follow a hierarchy:
//!
//! - An account can grant roles to users that are of a lower position than its highest role;
//! - An account can edit roles lesser than its highest role, but can only grant permissions they
//!   have;
//! - An account can move only roles lesser than its highest role;
//! - An account can only kick/ban accounts with a lesser role than its top role.
//!
//! Discord encodes permission sets as a decimal string, since they no longer fit into a 53 bit
//! float. [`Permissions`] (de)serializes in that form, and also accepts a plain integer.

use std::fmt;

use serde::de::{Error as DeError, Visitor};

use crate::internal::prelude::*;

/// This macro generates the [`Permissions::get_permission_names`] method and one check method
/// per permission.
macro_rules! permission_checks {
    {$($perm:ident => $flag:ident: $name:literal),* $(,)?} => {
        impl Permissions {
            $(
                #[doc = concat!(
                    "Shorthand for checking that the set of permissions contains the [",
                    $name,
                    "] permission."
                )]
                #[doc = ""]
                #[doc = concat!("[", $name, "]: Self::", stringify!($flag))]
                #[must_use]
                pub fn $perm(self) -> bool {
                    self.contains(Self::$flag)
                }
            )*

            /// Returns a list of names of all contained permissions.
            #[must_use]
            pub fn get_permission_names(self) -> Vec<&'static str> {
                let mut names = Vec::new();

                $(
                    if self.$perm() {
                        names.push($name);
                    }
                )*

                names
            }
        }
    }
}

/// Returns a set of permissions with the original @everyone permissions set to true.
///
/// This includes the text permissions of [`PRESET_TEXT`] and the voice permissions of
/// [`PRESET_VOICE`].
pub const PRESET_GENERAL: Permissions = Permissions::from_bits_truncate(
    PRESET_TEXT.bits() | PRESET_VOICE.bits() | Permissions::CHANGE_NICKNAME.bits(),
);

/// Returns a set of text-only permissions with the original `@everyone` permissions set to true.
pub const PRESET_TEXT: Permissions = Permissions::from_bits_truncate(
    Permissions::ADD_REACTIONS.bits()
        | Permissions::ATTACH_FILES.bits()
        | Permissions::CREATE_INSTANT_INVITE.bits()
        | Permissions::EMBED_LINKS.bits()
        | Permissions::MENTION_EVERYONE.bits()
        | Permissions::READ_MESSAGE_HISTORY.bits()
        | Permissions::VIEW_CHANNEL.bits()
        | Permissions::SEND_MESSAGES.bits()
        | Permissions::SEND_TTS_MESSAGES.bits()
        | Permissions::USE_EXTERNAL_EMOJIS.bits(),
);

/// Returns a set of voice-only permissions with the original `@everyone` permissions set to true.
pub const PRESET_VOICE: Permissions = Permissions::from_bits_truncate(
    Permissions::CONNECT.bits() | Permissions::SPEAK.bits() | Permissions::USE_VAD.bits(),
);

bitflags::bitflags! {
    /// A set of permissions that can be assigned to [`User`]s and [`Role`]s via
    /// [`PermissionOverwrite`]s, roles globally in a [`Guild`], and to [`GuildChannel`]s.
    ///
    /// [`Guild`]: super::guild::Guild
    /// [`GuildChannel`]: super::channel::GuildChannel
    /// [`PermissionOverwrite`]: super::channel::PermissionOverwrite
    /// [`Role`]: super::guild::Role
    /// [`User`]: super::user::User
    #[derive(Copy, PartialEq, Eq, Clone, PartialOrd, Ord, Hash, Default)]
    pub struct Permissions: u64 {
        /// Allows for the creation of invites.
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Allows for the kicking of guild [member]s.
        ///
        /// [member]: super::guild::Member
        const KICK_MEMBERS = 1 << 1;
        /// Allows the banning of guild [member]s.
        ///
        /// [member]: super::guild::Member
        const BAN_MEMBERS = 1 << 2;
        /// Allows all permissions, bypassing channel [permission overwrite]s.
        ///
        /// [permission overwrite]: super::channel::PermissionOverwrite
        const ADMINISTRATOR = 1 << 3;
        /// Allows management and editing of guild [channel]s.
        ///
        /// [channel]: super::channel::GuildChannel
        const MANAGE_CHANNELS = 1 << 4;
        /// Allows management and editing of the [guild].
        ///
        /// [guild]: super::guild::Guild
        const MANAGE_GUILD = 1 << 5;
        /// [`Member`]s with this permission can add new [`Reaction`]s to a [`Message`]. Members
        /// can still react using reactions already added to messages without this permission.
        ///
        /// [`Member`]: super::guild::Member
        /// [`Message`]: super::channel::Message
        /// [`Reaction`]: super::channel::MessageReaction
        const ADD_REACTIONS = 1 << 6;
        /// Allows viewing a guild's audit logs.
        const VIEW_AUDIT_LOG = 1 << 7;
        /// Allows the use of priority speaking in voice channels.
        const PRIORITY_SPEAKER = 1 << 8;
        /// Allows the user to go live.
        const STREAM = 1 << 9;
        /// Allows guild members to view a channel, which includes reading messages in text
        /// channels and joining voice channels.
        const VIEW_CHANNEL = 1 << 10;
        /// Allows sending messages in a guild channel.
        const SEND_MESSAGES = 1 << 11;
        /// Allows the sending of text-to-speech messages in a channel.
        const SEND_TTS_MESSAGES = 1 << 12;
        /// Allows the deleting of other messages in a guild channel.
        ///
        /// **Note**: This does not allow the editing of other messages.
        const MANAGE_MESSAGES = 1 << 13;
        /// Allows links from this user - or users of this role - to be embedded, with potential
        /// data such as a thumbnail, description, and page name.
        const EMBED_LINKS = 1 << 14;
        /// Allows uploading of files.
        const ATTACH_FILES = 1 << 15;
        /// Allows the reading of a channel's message history.
        const READ_MESSAGE_HISTORY = 1 << 16;
        /// Allows the usage of the `@everyone` mention, which will notify all users in a channel.
        /// The `@here` mention will also be available, and can be used to mention all non-offline
        /// users.
        const MENTION_EVERYONE = 1 << 17;
        /// Allows the usage of custom emojis from other guilds.
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        /// Allows for viewing guild insights.
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        /// Allows the joining of a voice channel.
        const CONNECT = 1 << 20;
        /// Allows the user to speak in a voice channel.
        const SPEAK = 1 << 21;
        /// Allows the muting of members in a voice channel.
        const MUTE_MEMBERS = 1 << 22;
        /// Allows the deafening of members in a voice channel.
        const DEAFEN_MEMBERS = 1 << 23;
        /// Allows the moving of members from one voice channel to another.
        const MOVE_MEMBERS = 1 << 24;
        /// Allows the usage of voice-activity-detection in a voice channel.
        ///
        /// If this is disabled, then [`Member`]s must use push-to-talk.
        ///
        /// [`Member`]: super::guild::Member
        const USE_VAD = 1 << 25;
        /// Allows members to change their own nickname in the guild.
        const CHANGE_NICKNAME = 1 << 26;
        /// Allows members to change other members' nicknames.
        const MANAGE_NICKNAMES = 1 << 27;
        /// Allows management and editing of roles below their own.
        const MANAGE_ROLES = 1 << 28;
        /// Allows management of webhooks.
        const MANAGE_WEBHOOKS = 1 << 29;
        /// Allows management of emojis and stickers created without the use of an
        /// [`Integration`].
        ///
        /// [`Integration`]: https://discord.com/developers/docs/resources/guild#integration-object
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        /// Allows using slash commands.
        const USE_APPLICATION_COMMANDS = 1 << 31;
        /// Allows for requesting to speak in stage channels.
        const REQUEST_TO_SPEAK = 1 << 32;
        /// Allows for creating, editing, and deleting scheduled events.
        const MANAGE_EVENTS = 1 << 33;
        /// Allows for deleting and archiving threads, and viewing all private threads.
        const MANAGE_THREADS = 1 << 34;
        /// Allows for timing out users.
        const MODERATE_MEMBERS = 1 << 40;
    }
}

permission_checks! {
    create_instant_invite => CREATE_INSTANT_INVITE: "Create Invite",
    kick_members => KICK_MEMBERS: "Kick Members",
    ban_members => BAN_MEMBERS: "Ban Members",
    administrator => ADMINISTRATOR: "Administrator",
    manage_channels => MANAGE_CHANNELS: "Manage Channels",
    manage_guild => MANAGE_GUILD: "Manage Guild",
    add_reactions => ADD_REACTIONS: "Add Reactions",
    view_audit_log => VIEW_AUDIT_LOG: "View Audit Log",
    priority_speaker => PRIORITY_SPEAKER: "Priority Speaker",
    stream => STREAM: "Stream",
    view_channel => VIEW_CHANNEL: "View Channel",
    send_messages => SEND_MESSAGES: "Send Messages",
    send_tts_messages => SEND_TTS_MESSAGES: "Send TTS Messages",
    manage_messages => MANAGE_MESSAGES: "Manage Messages",
    embed_links => EMBED_LINKS: "Embed Links",
    attach_files => ATTACH_FILES: "Attach Files",
    read_message_history => READ_MESSAGE_HISTORY: "Read Message History",
    mention_everyone => MENTION_EVERYONE: "Mention Everyone",
    use_external_emojis => USE_EXTERNAL_EMOJIS: "Use External Emojis",
    view_guild_insights => VIEW_GUILD_INSIGHTS: "View Guild Insights",
    connect => CONNECT: "Connect",
    speak => SPEAK: "Speak",
    mute_members => MUTE_MEMBERS: "Mute Members",
    deafen_members => DEAFEN_MEMBERS: "Deafen Members",
    move_members => MOVE_MEMBERS: "Move Members",
    use_vad => USE_VAD: "Use Voice Activity",
    change_nickname => CHANGE_NICKNAME: "Change Nickname",
    manage_nicknames => MANAGE_NICKNAMES: "Manage Nicknames",
    manage_roles => MANAGE_ROLES: "Manage Roles",
    manage_webhooks => MANAGE_WEBHOOKS: "Manage Webhooks",
    manage_guild_expressions => MANAGE_GUILD_EXPRESSIONS: "Manage Guild Expressions",
    use_application_commands => USE_APPLICATION_COMMANDS: "Use Application Commands",
    request_to_speak => REQUEST_TO_SPEAK: "Request To Speak",
    manage_events => MANAGE_EVENTS: "Manage Events",
    manage_threads => MANAGE_THREADS: "Manage Threads",
    moderate_members => MODERATE_MEMBERS: "Moderate Members",
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Permissions").field(&self.get_permission_names()).finish()
    }
}

struct PermissionsVisitor;

impl<'de> Visitor<'de> for PermissionsVisitor {
    type Value = Permissions;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a permission bitset as a string or integer")
    }

    fn visit_u64<E: DeError>(self, value: u64) -> StdResult<Self::Value, E> {
        Ok(Permissions::from_bits_truncate(value))
    }

    fn visit_str<E: DeError>(self, value: &str) -> StdResult<Self::Value, E> {
        value.parse().map(Permissions::from_bits_truncate).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl Serialize for Permissions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.get_permission_names();

        let total = names.len();
        for (i, &name) in names.iter().enumerate() {
            if i > 0 && i != total - 1 {
                f.write_str(", ")?;
            }

            if total > 1 && i == total - 1 {
                f.write_str(" and ")?;
            }

            f.write_str(name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn permissions_serde() {
        let perms = Permissions::SEND_MESSAGES | Permissions::MODERATE_MEMBERS;
        let encoded = to_value(&perms).unwrap();

        assert_eq!(encoded, json!("1099511629824"));
        assert_eq!(from_value::<Permissions>(encoded).unwrap(), perms);
        assert_eq!(from_value::<Permissions>(json!(8)).unwrap(), Permissions::ADMINISTRATOR);
    }

    #[test]
    fn unknown_bits_are_dropped() {
        let perms: Permissions = from_value(json!((1_u64 << 63 | 1).to_string())).unwrap();
        assert_eq!(perms, Permissions::CREATE_INSTANT_INVITE);
    }

    #[test]
    fn display_lists_names() {
        let perms = Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS | Permissions::SPEAK;
        assert_eq!(perms.to_string(), "Kick Members, Ban Members and Speak");
        assert_eq!(Permissions::empty().to_string(), "");
    }

    #[test]
    fn presets() {
        assert!(PRESET_GENERAL.contains(PRESET_TEXT));
        assert!(PRESET_GENERAL.contains(PRESET_VOICE));
        assert!(!PRESET_GENERAL.administrator());
    }
}
