//! Incoming request as handed over by the NLU layer
//!
//! A request is immutable while it is being handled: rules only read it and
//! write their results into a separate [`Response`](crate::response::Response).

pub mod interpret;

use crate::conversation::SlotFillingContext;
use crate::device::Device;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub use interpret::{InstrumentInterpreter, INSTRUMENT_SLOT_KEYS};

/// Slots extracted from the utterance, keyed by slot name
pub type Slots = AHashMap<String, String>;

/// NLU output for one utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nlu {
    /// Best intent label, e.g. "CHROME_CAST_PLAY"
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub slots: Slots,
    /// Raw utterance, kept for logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Conversation the turn belongs to, when the transport knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub nlu: Nlu,
    #[serde(default)]
    pub device: Device,
    /// Slot-filling state carried over from the previous turn
    #[serde(default)]
    pub slot_filling: SlotFillingContext,
}

impl Request {
    pub fn new(intent: impl Into<String>, device: Device) -> Self {
        Self {
            nlu: Nlu {
                intent: intent.into(),
                ..Nlu::default()
            },
            device,
            ..Self::default()
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.nlu.slots.insert(name.into(), value.into());
        self
    }

    pub fn with_slot_filling(mut self, slot_filling: SlotFillingContext) -> Self {
        self.slot_filling = slot_filling;
        self
    }

    pub fn intent(&self) -> &str {
        &self.nlu.intent
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.nlu.slots.get(name).map(String::as_str)
    }

    /// True when the previous turn left `action` waiting for an answer
    pub fn is_in_slot_filling_action(&self, action: &str) -> bool {
        self.slot_filling.is_pending(action)
    }
}
