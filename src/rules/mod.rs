//! Request routing rules

pub mod engine;

pub use engine::{handler, Handler, Predicate, RuleEngine};
