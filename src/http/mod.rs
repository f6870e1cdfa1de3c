//! The HTTP module which provides functions for performing requests to endpoints in Discord's
//! API.
//!
//! Every endpoint is one async method on [`Http`], taking typed ids and returning the decoded
//! model. Requests are single-shot: a non-successful status is returned as
//! [`HttpError::UnsuccessfulRequest`] and never retried.
//!
//! Note that you may want to perform requests through a [model]s' instance methods where
//! possible, as they each offer different levels of a high-level interface to the HTTP module.
//!
//! [model]: crate::model

mod client;
mod error;
mod pagination;
mod request;
mod routing;

use reqwest::Method;

pub use self::client::*;
pub use self::error::*;
pub use self::pagination::*;
pub use self::request::Request;
pub use self::routing::Route;
use crate::model::id::{GuildId, MessageId};

/// The method of a [`Request`].
///
/// This is needed because `reqwest`'s `Method` enum does not derive Copy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum LightMethod {
    /// Indicates that a route is for the `DELETE` method only.
    Delete,
    /// Indicates that a route is for the `GET` method only.
    Get,
    /// Indicates that a route is for the `PATCH` method only.
    Patch,
    /// Indicates that a route is for the `POST` method only.
    Post,
    /// Indicates that a route is for the `PUT` method only.
    Put,
}

impl LightMethod {
    #[must_use]
    pub const fn reqwest_method(self) -> Method {
        match self {
            Self::Delete => Method::DELETE,
            Self::Get => Method::GET,
            Self::Patch => Method::PATCH,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

/// Representation of the method of a query to send for the [`Http::get_guilds`] function.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub enum GuildPagination {
    /// The Id to get the guilds after.
    After(GuildId),
    /// The Id to get the guilds before.
    Before(GuildId),
}

/// Representation of the method of a query to send for the [`Http::get_messages`] function.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub enum MessagePagination {
    /// The Id to get the messages after.
    After(MessageId),
    /// The Id to get the messages around.
    Around(MessageId),
    /// The Id to get the messages before.
    Before(MessageId),
}
