//! Instrument resolution - picks the one instrument an action should run on

use crate::conversation::SlotFillingContext;
use crate::device::{CapabilitySource, Instrument, InstrumentKind};
use crate::request::{InstrumentInterpreter, Request};

/// Result of resolving an action to an instrument
///
/// Every variant is a normal outcome; callers match on all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// No instrument of the kind supports the action
    NotFound,
    /// Exactly one instrument was identified
    Resolved(Instrument),
    /// The user already answered a disambiguation question and the answer
    /// matched none of the candidates
    NoMatchInContext,
    /// Several candidates and nothing to choose between them yet
    NeedsDisambiguation(Vec<String>),
}

impl ResolutionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionOutcome::NotFound => "not_found",
            ResolutionOutcome::Resolved(_) => "resolved",
            ResolutionOutcome::NoMatchInContext => "no_match_in_context",
            ResolutionOutcome::NeedsDisambiguation(_) => "needs_disambiguation",
        }
    }
}

/// Classifies a request against the device's instruments
///
/// Never mutates anything; writing the follow-up slot-filling state is the
/// caller's job.
pub struct InstrumentResolver<'a> {
    capabilities: &'a dyn CapabilitySource,
    interpreter: &'a dyn InstrumentInterpreter,
}

impl<'a> InstrumentResolver<'a> {
    pub fn new(
        capabilities: &'a dyn CapabilitySource,
        interpreter: &'a dyn InstrumentInterpreter,
    ) -> Self {
        Self {
            capabilities,
            interpreter,
        }
    }

    /// Resolver backed by the request's own device snapshot and slots
    pub fn for_request(request: &'a Request) -> Self {
        Self::new(&request.device, request)
    }

    pub fn resolve(
        &self,
        kind: &InstrumentKind,
        action: &str,
        slot_filling: &SlotFillingContext,
    ) -> ResolutionOutcome {
        let mut instruments = self.capabilities.instruments_supporting(kind, action);
        let count = instruments.len();

        let outcome = match count {
            0 => ResolutionOutcome::NotFound,
            1 => ResolutionOutcome::Resolved(instruments.remove(0)),
            _ => self.disambiguate(action, &instruments, slot_filling),
        };

        tracing::debug!(
            "Resolved {} on {} ({} candidates): {}",
            action,
            kind,
            count,
            outcome.label()
        );
        outcome
    }

    fn disambiguate(
        &self,
        action: &str,
        candidates: &[Instrument],
        slot_filling: &SlotFillingContext,
    ) -> ResolutionOutcome {
        // A candidate named in the utterance wins over any pending question
        if let Some(named) = self
            .interpreter
            .interpret_instrument(candidates)
            .filter(|named| candidates.iter().any(|c| c.id == named.id))
        {
            return ResolutionOutcome::Resolved(named);
        }

        if slot_filling.is_pending(action) {
            return ResolutionOutcome::NoMatchInContext;
        }

        ResolutionOutcome::NeedsDisambiguation(
            candidates.iter().map(|i| i.name.clone()).collect(),
        )
    }
}
