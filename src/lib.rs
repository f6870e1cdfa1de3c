//! Accord is a Rust library for the Discord API.
//!
//! The library is split into a few layers which can be used independently of each other:
//!
//! - [`model`]: mappings of the objects Discord sends, decoded from JSON snapshots, plus the
//!   [`Update`] trait used to merge partial gateway fragments into them;
//! - [`http`]: the [`Http`] client, with one async method per REST endpoint, and the cursor
//!   [`Paginator`] used to walk list endpoints;
//! - [`builder`]: request builders for the endpoints that take optional parameters;
//! - [`cache`]: an in-memory [`Cache`] kept in sync by feeding it the gateway [`Event`]s received
//!   by your event dispatcher.
//!
//! The library does not open a gateway connection itself. Whatever drives your websocket is
//! expected to decode dispatch payloads with [`Event::deserialize_with_name`] and hand them to
//! [`Cache::update`].
//!
//! # Example
//!
//! ```rust,no_run
//! use accord::http::Http;
//! use accord::model::id::ChannelId;
//!
//! # async fn run() -> accord::Result<()> {
//! let http = Http::new(&std::env::var("DISCORD_TOKEN").unwrap_or_default());
//! let channel_id = ChannelId::new(381880193700069377);
//!
//! channel_id.say(&http, "Hello!").await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Update`]: crate::model::update::Update
//! [`Http`]: crate::http::Http
//! [`Paginator`]: crate::http::Paginator
//! [`Cache`]: crate::cache::Cache
//! [`Cache::update`]: crate::cache::Cache::update
//! [`Event`]: crate::model::event::Event
//! [`Event::deserialize_with_name`]: crate::model::event::Event::deserialize_with_name
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::cast_possible_wrap,
    clippy::wildcard_imports,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::doc_link_with_quotes
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
mod internal;

pub mod builder;
#[cfg(feature = "cache")]
pub mod cache;
pub mod constants;
pub mod http;
pub mod json;
pub mod model;
pub mod prelude;
pub mod utils;

mod error;

pub use crate::error::{Error, Result};

/// Special module that re-exports most public items from this crate.
///
/// Useful, because you don't have to remember the full paths of accord items.
pub mod all {
    #[doc(no_inline)]
    pub use crate::builder::*;
    #[cfg(feature = "cache")]
    #[doc(no_inline)]
    pub use crate::cache::*;
    #[doc(no_inline)]
    pub use crate::constants::*;
    #[doc(no_inline)]
    pub use crate::http::*;
    #[doc(no_inline)]
    pub use crate::model::prelude::*;
    #[doc(no_inline)]
    pub use crate::utils::*;
}
