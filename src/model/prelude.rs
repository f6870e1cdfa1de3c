//! The model prelude re-exports all types in the model sub-modules.
//!
//! This allows for quick and easy access to all of the model types.
//!
//! # Examples
//!
//! Import all model types into scope:
//!
//! ```rust,no_run
//! use accord::model::prelude::*;
//! ```
#[doc(inline)]
pub use super::{
    channel::*,
    event::*,
    gateway::*,
    guild::*,
    id::*,
    invite::*,
    mention::*,
    permissions::*,
    timestamp::Timestamp,
    update::Update,
    user::*,
    ModelError,
};
