//! Slot-filling persistence between turns
//!
//! Production deployments keep this in whatever store the transport layer
//! provides. `MemoryContextStore` serves the CLI and tests.

use crate::conversation::context::SlotFillingContext;
use ahash::AHashMap;

/// Storage of slot-filling state keyed by conversation id
///
/// Concurrent turns of one conversation are last-write-wins.
pub trait ContextStore {
    /// Context saved for a conversation, empty when none was saved
    fn load(&self, conversation_id: &str) -> SlotFillingContext;

    fn save(&mut self, conversation_id: &str, context: SlotFillingContext);
}

#[derive(Debug, Default)]
pub struct MemoryContextStore {
    contexts: AHashMap<String, SlotFillingContext>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

impl ContextStore for MemoryContextStore {
    fn load(&self, conversation_id: &str) -> SlotFillingContext {
        self.contexts
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    fn save(&mut self, conversation_id: &str, context: SlotFillingContext) {
        // Empty contexts are dropped rather than stored
        if context.is_empty() {
            self.contexts.remove(conversation_id);
        } else {
            self.contexts.insert(conversation_id.to_string(), context);
        }
    }
}
