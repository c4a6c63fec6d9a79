//! A configured skill: rule list plus fallback
//!
//! The rule list is built once from the configuration and never changes
//! afterwards. Cloning an `Ability` shares the same rules.

use crate::command::register_actions;
use crate::conversation::ContextStore;
use crate::core::config::AbilityConfig;
use crate::core::error::Result;
use crate::request::Request;
use crate::response::Response;
use crate::rules::RuleEngine;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Ability {
    name: String,
    engine: Arc<RuleEngine>,
    fallback_sentence: String,
}

impl Ability {
    /// Validate the configuration and register its rules
    pub fn from_config(config: &AbilityConfig) -> Result<Self> {
        config.validate()?;

        let mut engine = RuleEngine::new();
        register_actions(
            &mut engine,
            &config.instrument_kind,
            &config.instrument_label,
            &config.actions,
        );

        tracing::info!(
            "Ability {} ready: {} actions, {} rules",
            config.name,
            config.actions.len(),
            engine.len()
        );

        Ok(Self {
            name: config.name.clone(),
            engine: Arc::new(engine),
            fallback_sentence: config.fallback_sentence.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.engine
    }

    /// Answer one request; unmatched requests get the fallback sentence
    pub fn handle(&self, request: &Request) -> Response {
        match self.engine.dispatch(request) {
            Some(response) => response,
            None => {
                tracing::warn!(
                    "{}: no rule for intent '{}', answering with fallback",
                    self.name,
                    request.intent()
                );
                Response::with_sentence(self.fallback_sentence.clone())
            }
        }
    }

    /// Answer one turn of a conversation whose state lives in `store`
    ///
    /// A request that already carries slot-filling state keeps it; otherwise
    /// the stored state is attached. The response's state is saved as-is.
    pub fn handle_turn<S: ContextStore>(
        &self,
        store: &mut S,
        conversation_id: &str,
        mut request: Request,
    ) -> Response {
        if request.slot_filling.is_empty() {
            request.slot_filling = store.load(conversation_id);
        }

        let response = self.handle(&request);
        store.save(conversation_id, response.slot_filling.clone());
        response
    }
}
