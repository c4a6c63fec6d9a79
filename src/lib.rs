//! Cast Ability - voice skill routing for cast-capable media devices
//!
//! A request already parsed by the NLU layer is routed through an ordered
//! rule list to an action handler, which picks the instrument to act on
//! (asking the user when several qualify) and answers with a spoken
//! sentence and, when resolved, one command for the device.

pub mod ability;
pub mod command;
pub mod conversation;
pub mod core;
pub mod device;
pub mod request;
pub mod response;
pub mod rules;

pub use ability::Ability;
pub use crate::core::config::AbilityConfig;
pub use crate::core::error::{AbilityError, Result};
pub use request::Request;
pub use response::Response;
