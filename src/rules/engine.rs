//! Ordered (predicate, handler) routing
//!
//! Rules are evaluated in registration order and the first matching
//! predicate wins, whatever its specificity. The list is built once at
//! startup; afterwards the engine is only read, so it can be shared
//! behind an `Arc` by every concurrent request.

use crate::request::Request;
use crate::response::Response;
use std::fmt;
use std::sync::Arc;

pub type Predicate = Box<dyn Fn(&Request) -> bool + Send + Sync>;

/// Handlers are shared so one action can sit behind several predicates
pub type Handler = Arc<dyn Fn(&Request, &mut Response) + Send + Sync>;

/// Wrap a closure as a [`Handler`]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Request, &mut Response) + Send + Sync + 'static,
{
    Arc::new(f)
}

struct Rule {
    predicate: Predicate,
    handler: Handler,
}

#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; it is evaluated after every rule registered before it
    pub fn register<P>(&mut self, predicate: P, handler: Handler) -> &mut Self
    where
        P: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            predicate: Box::new(predicate),
            handler,
        });
        self
    }

    /// Append a rule matching requests whose intent equals `intent`
    pub fn register_intent(&mut self, intent: impl Into<String>, handler: Handler) -> &mut Self {
        let intent = intent.into();
        self.register(move |request: &Request| request.intent() == intent, handler)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the first rule whose predicate accepts the request
    pub fn matching_rule(&self, request: &Request) -> Option<usize> {
        self.rules.iter().position(|rule| (rule.predicate)(request))
    }

    /// Run the first matching handler against a fresh response
    ///
    /// Returns `None` when no rule matches; the fallback belongs to the caller.
    pub fn dispatch(&self, request: &Request) -> Option<Response> {
        let Some(index) = self.matching_rule(request) else {
            tracing::debug!("No rule matched intent '{}'", request.intent());
            return None;
        };

        tracing::debug!("Rule #{} matched intent '{}'", index, request.intent());
        let mut response = Response::new();
        (self.rules[index].handler)(request, &mut response);
        Some(response)
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rules.len())
            .finish()
    }
}
