//! A set of builders used to make using methods on certain structs simpler to use.
//!
//! These are used when not all parameters are required, all parameters are optional, and/or sane
//! default values for required parameters can be applied by a builder.
//!
//! Builders serialize to the JSON body of their endpoint. Fields left unset are omitted from the
//! body; fields that can be cleared are `Option<Option<T>>`, where `Some(None)` is sent as `null`.

// Option<Option<T>> is required for fields that are
// #[serde(skip_serializing_if = "Option::is_none")]
#![allow(clippy::option_option)]

mod create_channel;
mod create_emoji;
mod create_invite;
mod create_message;
mod edit_channel;
mod edit_emoji;
mod edit_guild;
mod edit_member;
mod edit_message;
mod edit_profile;
mod edit_role;
mod get_messages;

pub use create_channel::*;
pub use create_emoji::*;
pub use create_invite::*;
pub use create_message::*;
pub use edit_channel::*;
pub use edit_emoji::*;
pub use edit_guild::*;
pub use edit_member::*;
pub use edit_message::*;
pub use edit_profile::*;
pub use edit_role::*;
pub use get_messages::*;
