//! Per-conversation slot-filling state

use serde::{Deserialize, Serialize};

/// Slot asked for when several instruments could execute an action
pub const INSTRUMENT_NAME_SLOT: &str = "instrument_name";

/// Which action is waiting for an answer, and what is still missing
///
/// Created empty, set when disambiguation cannot finish in one turn, and
/// cleared or replaced by the next turn's handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFillingContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_slots: Vec<String>,
}

impl SlotFillingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pending `action` with the given missing slots
    pub fn pending(action: impl Into<String>, missing_slots: &[&str]) -> Self {
        Self {
            action: Some(action.into()),
            missing_slots: missing_slots.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// True when `action` is waiting for an answer
    pub fn is_pending(&self, action: &str) -> bool {
        self.action.as_deref() == Some(action)
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.missing_slots.is_empty()
    }

    pub fn set_pending(&mut self, action: impl Into<String>, missing_slots: &[&str]) {
        *self = Self::pending(action, missing_slots);
    }

    pub fn clear(&mut self) {
        self.action = None;
        self.missing_slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_matches_only_its_action() {
        let ctx = SlotFillingContext::pending("play", &[INSTRUMENT_NAME_SLOT]);
        assert!(ctx.is_pending("play"));
        assert!(!ctx.is_pending("pause"));
        assert_eq!(ctx.missing_slots, vec!["instrument_name"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut ctx = SlotFillingContext::pending("pause", &[INSTRUMENT_NAME_SLOT]);
        ctx.clear();
        assert!(ctx.is_empty());
        assert!(!ctx.is_pending("pause"));
    }

    #[test]
    fn test_empty_context_serializes_to_empty_object() {
        let json = serde_json::to_string(&SlotFillingContext::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
