//! Mappings of objects received from the API, with optional helper methods for ease of use.
//!
//! Every model can be built from a full JSON snapshot through [`serde::Deserialize`]: fields the
//! API always sends are required, and a snapshot missing one of them fails to decode. Fields the
//! API documents as optional are [`Option`]s, so "not sent" stays distinguishable from an
//! explicitly empty value.
//!
//! Models which live in the [`Cache`] additionally implement [`Update`], which merges the sparse
//! fragments the gateway pushes into an existing value.
//!
//! Methods like [`Message::delete`] or [`GuildId::members_iter`] take the [`Http`] client as an
//! explicit argument; models never hold a reference back to a client.
//!
//! [`Cache`]: crate::cache::Cache
//! [`Update`]: update::Update
//! [`Message::delete`]: channel::Message::delete
//! [`GuildId::members_iter`]: id::GuildId::members_iter
//! [`Http`]: crate::http::Http

mod utils;

pub mod channel;
pub mod error;
pub mod event;
pub mod gateway;
pub mod guild;
pub mod id;
pub mod invite;
pub mod mention;
pub mod permissions;
pub mod prelude;
pub mod timestamp;
pub mod update;
pub mod user;

pub use self::error::Error as ModelError;
pub use self::permissions::Permissions;
pub use self::timestamp::Timestamp;
