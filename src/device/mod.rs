//! Device capability snapshot
//!
//! The device registry is owned elsewhere; a request carries a snapshot of
//! the instruments the device exposes. The core only reads it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability kind of an instrument ("chrome_cast", "speaker", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentKind(String);

impl InstrumentKind {
    pub const CHROME_CAST: &'static str = "chrome_cast";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn chrome_cast() -> Self {
        Self::new(Self::CHROME_CAST)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// A controllable physical instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub kind: InstrumentKind,
    /// Actions the instrument can execute
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Instrument {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: InstrumentKind,
        actions: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn supports(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// Capability query consumed by the instrument resolver
///
/// Results must come back in a stable order so reprompt wording is
/// reproducible for identical input.
pub trait CapabilitySource {
    fn instruments_supporting(&self, kind: &InstrumentKind, action: &str) -> Vec<Instrument>;
}

/// Instruments exposed by the requesting device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

impl Device {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// All instruments of a kind, in device order
    pub fn instruments_of_kind<'a>(
        &'a self,
        kind: &'a InstrumentKind,
    ) -> impl Iterator<Item = &'a Instrument> + 'a {
        self.instruments.iter().filter(move |i| &i.kind == kind)
    }
}

impl CapabilitySource for Device {
    fn instruments_supporting(&self, kind: &InstrumentKind, action: &str) -> Vec<Instrument> {
        self.instruments_of_kind(kind)
            .filter(|i| i.supports(action))
            .cloned()
            .collect()
    }
}
