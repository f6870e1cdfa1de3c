//! A set of exports which can be helpful to use.
//!
//! Note that the `AccordError` re-export is equivalent to [`accord::Error`], although is
//! re-exported as a separate name to remove likely ambiguity with other crate error enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use accord::prelude::*;
//! ```
//!
//! [`accord::Error`]: crate::Error

#[cfg(feature = "cache")]
pub use crate::cache::{Cache, CacheUpdate};
pub use crate::error::Error as AccordError;
pub use crate::http::{Http, HttpError, Paginator};
pub use crate::model::mention::Mentionable;
pub use crate::model::update::Update;
pub use crate::model::ModelError;
