//! Maps a resolution outcome onto a response

use crate::command::resolver::ResolutionOutcome;
use crate::conversation::INSTRUMENT_NAME_SLOT;
use crate::device::Instrument;
use crate::response::{Action, NlgParam, Response};

/// Parameter key naming the target instrument of an outgoing action
pub const INSTRUMENT_PARAM: &str = "instrument";

/// Fills responses for one action
///
/// `label` is the spoken name of the instrument kind ("chrome cast").
pub struct ResponseBuilder<'a> {
    action: &'a str,
    label: &'a str,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(action: &'a str, label: &'a str) -> Self {
        Self { action, label }
    }

    pub fn fill(&self, outcome: ResolutionOutcome, response: &mut Response) {
        match outcome {
            ResolutionOutcome::NotFound => self.not_found(response),
            ResolutionOutcome::NoMatchInContext => self.no_match_in_context(response),
            ResolutionOutcome::NeedsDisambiguation(names) => {
                self.needs_disambiguation(names, response)
            }
            ResolutionOutcome::Resolved(instrument) => self.resolved(&instrument, response),
        }
    }

    fn not_found(&self, response: &mut Response) {
        response.nlg.sentence = format!("I didn't find any {} instrument in the device.", self.label);
    }

    fn no_match_in_context(&self, response: &mut Response) {
        tracing::warn!("Abandoning disambiguation of {}: answer matched no instrument", self.action);
        response.nlg.sentence = format!(
            "I didn't find any {} instrument in the device matching your request.",
            self.label
        );
        response.slot_filling.clear();
    }

    fn needs_disambiguation(&self, names: Vec<String>, response: &mut Response) {
        response.nlg.sentence = format!(
            "I found several {} instruments in the device : {{{{instruments}}}}.",
            self.label
        );
        response.nlg.params = vec![NlgParam::enumerated_list("instruments", names)];
        response
            .slot_filling
            .set_pending(self.action, &[INSTRUMENT_NAME_SLOT]);
        response.auto_reprompt = true;
    }

    fn resolved(&self, instrument: &Instrument, response: &mut Response) {
        tracing::info!("Executing {} on {}", self.action, instrument.name);
        response.nlg.sentence = format!(
            "Executing the action {{{{action}}}} on the {} {{{{instrument}}}}.",
            self.label
        );
        response.nlg.params = vec![
            NlgParam::string("action", self.action),
            NlgParam::string(INSTRUMENT_PARAM, instrument.name.as_str()),
        ];
        response.action =
            Some(Action::new(self.action).with_param(INSTRUMENT_PARAM, instrument.name.as_str()));
        if response.slot_filling.is_pending(self.action) {
            response.slot_filling.clear();
        }
    }
}
