//! Reinterpret the utterance as a reference to one of the candidate instruments

use crate::device::Instrument;
use crate::request::Request;

/// Slots that may carry an instrument reference, checked in order
pub const INSTRUMENT_SLOT_KEYS: [&str; 2] = ["instrument_name", "instrument"];

/// NLU reinterpretation consumed by the instrument resolver
pub trait InstrumentInterpreter {
    /// The candidate the utterance names, if any
    ///
    /// Only instruments in `candidates` can be returned.
    fn interpret_instrument(&self, candidates: &[Instrument]) -> Option<Instrument>;
}

impl InstrumentInterpreter for Request {
    fn interpret_instrument(&self, candidates: &[Instrument]) -> Option<Instrument> {
        let hint = INSTRUMENT_SLOT_KEYS
            .iter()
            .filter_map(|key| self.slot(key))
            .map(str::trim)
            .find(|value| !value.is_empty())?;

        let matched = match_by_name(candidates, hint);
        if matched.is_none() {
            tracing::debug!(
                "NLU hint '{}' names none of {} candidates",
                hint,
                candidates.len()
            );
        }
        matched.cloned()
    }
}

fn match_by_name<'a>(candidates: &'a [Instrument], hint: &str) -> Option<&'a Instrument> {
    let hint_lower = hint.to_lowercase();

    if let Some(exact) = candidates
        .iter()
        .find(|i| i.name.to_lowercase() == hint_lower)
    {
        return Some(exact);
    }

    // Partial match only counts when it is unambiguous
    let mut partial = candidates
        .iter()
        .filter(|i| i.name.to_lowercase().contains(&hint_lower));
    match (partial.next(), partial.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
