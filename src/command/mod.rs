//! Command pipeline
//!
//! Request -> InstrumentResolver -> ResolutionOutcome -> ResponseBuilder -> Response

pub mod handler;
pub mod resolver;

pub use handler::{intent_predicate, register_actions, slot_filling_predicate, ActionHandler};
pub use resolver::{InstrumentResolver, ResolutionOutcome};
