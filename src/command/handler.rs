//! Action handling - one parameterized code path for every action
//!
//! Request -> InstrumentResolver -> ResolutionOutcome -> ResponseBuilder -> Response

use crate::command::resolver::InstrumentResolver;
use crate::core::config::ActionConfig;
use crate::device::InstrumentKind;
use crate::request::Request;
use crate::response::{Response, ResponseBuilder};
use crate::rules::{Handler, RuleEngine};
use std::sync::Arc;

/// Resolves and answers requests for a single action
#[derive(Debug, Clone)]
pub struct ActionHandler {
    kind: InstrumentKind,
    label: String,
    action: String,
}

impl ActionHandler {
    pub fn new(kind: InstrumentKind, label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            action: action.into(),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn handle(&self, request: &Request, response: &mut Response) {
        let outcome = InstrumentResolver::for_request(request).resolve(
            &self.kind,
            &self.action,
            &request.slot_filling,
        );
        ResponseBuilder::new(&self.action, &self.label).fill(outcome, response);
    }

    pub fn into_handler(self) -> Handler {
        crate::rules::handler(move |request, response| self.handle(request, response))
    }
}

/// Predicate for a turn answering a question asked about `action`
pub fn slot_filling_predicate(action: String) -> impl Fn(&Request) -> bool + Send + Sync {
    move |request: &Request| request.is_in_slot_filling_action(&action)
}

/// Predicate for a request whose intent is one of `intents`
pub fn intent_predicate(intents: Vec<String>) -> impl Fn(&Request) -> bool + Send + Sync {
    move |request: &Request| intents.iter().any(|intent| intent == request.intent())
}

/// Register every action of an instrument kind on `engine`
///
/// All slot-filling rules go first, then all intent rules: a disambiguation
/// in progress takes precedence over a fresh intent match.
pub fn register_actions(
    engine: &mut RuleEngine,
    kind: &InstrumentKind,
    label: &str,
    actions: &[ActionConfig],
) {
    let handlers: Vec<(&ActionConfig, Handler)> = actions
        .iter()
        .map(|action| {
            let handler = ActionHandler::new(kind.clone(), label, action.name.clone());
            (action, handler.into_handler())
        })
        .collect();

    for (action, handler) in &handlers {
        engine.register(slot_filling_predicate(action.name.clone()), Arc::clone(handler));
    }
    for (action, handler) in handlers {
        engine.register(intent_predicate(action.intents.clone()), handler);
    }
}
