//! Multi-turn conversation state

pub mod context;
pub mod store;

pub use context::{SlotFillingContext, INSTRUMENT_NAME_SLOT};
pub use store::{ContextStore, MemoryContextStore};
