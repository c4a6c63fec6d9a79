//! Outgoing response: spoken sentence, machine action, conversation state
//!
//! Response -> Nlg (template + params) + at most one Action + SlotFillingContext

pub mod builder;

use crate::conversation::SlotFillingContext;
use serde::{Deserialize, Serialize};

pub use builder::ResponseBuilder;

/// Value substituted into a sentence placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NlgValue {
    Text(String),
    List(Vec<String>),
}

/// How a parameter is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NlgParamType {
    String,
    EnumeratedList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NlgParam {
    pub name: String,
    pub value: NlgValue,
    #[serde(rename = "type")]
    pub kind: NlgParamType,
}

impl NlgParam {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: NlgValue::Text(value.into()),
            kind: NlgParamType::String,
        }
    }

    pub fn enumerated_list(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: NlgValue::List(values),
            kind: NlgParamType::EnumeratedList,
        }
    }

    fn rendered_value(&self) -> String {
        match &self.value {
            NlgValue::Text(text) => text.clone(),
            NlgValue::List(items) => enumerate(items),
        }
    }
}

/// "a", "a and b", "a, b and c"
fn enumerate(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Spoken reply: sentence template with `{{name}}` placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nlg {
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<NlgParam>,
}

impl Nlg {
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            params: Vec::new(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&NlgParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Substitute every known placeholder; unknown ones are left as-is
    pub fn render(&self) -> String {
        self.params.iter().fold(self.sentence.clone(), |sentence, param| {
            sentence.replace(&format!("{{{{{}}}}}", param.name), &param.rendered_value())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParameter {
    pub key: String,
    pub value: String,
}

/// Command to execute on a resolved instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub identifier: String,
    #[serde(default)]
    pub params: Vec<ActionParameter>,
}

impl Action {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(ActionParameter {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub nlg: Nlg,
    /// At most one action per turn; on the wire this is an `actions` list
    #[serde(rename = "actions", default, with = "action_list")]
    pub action: Option<Action>,
    /// Slot-filling state to persist for the next turn
    #[serde(default)]
    pub slot_filling: SlotFillingContext,
    /// The caller should wait for the user's answer before doing anything else
    #[serde(default)]
    pub auto_reprompt: bool,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sentence(sentence: impl Into<String>) -> Self {
        Self {
            nlg: Nlg::new(sentence),
            ..Self::default()
        }
    }

    /// The sentence with parameters substituted
    pub fn spoken(&self) -> String {
        self.nlg.render()
    }
}

mod action_list {
    use super::Action;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(action: &Option<Action>, s: S) -> Result<S::Ok, S::Error> {
        action.iter().collect::<Vec<_>>().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Action>, D::Error> {
        let mut actions = Vec::<Action>::deserialize(d)?;
        if actions.len() > 1 {
            return Err(D::Error::custom("a response carries at most one action"));
        }
        Ok(actions.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_string_params() {
        let nlg = Nlg {
            sentence: "Executing the action {{action}} on the chrome cast {{instrument}}.".into(),
            params: vec![
                NlgParam::string("action", "play"),
                NlgParam::string("instrument", "Kitchen Cast"),
            ],
        };
        assert_eq!(
            nlg.render(),
            "Executing the action play on the chrome cast Kitchen Cast."
        );
    }

    #[test]
    fn test_render_enumerated_list() {
        let names = |n: &[&str]| n.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut nlg = Nlg::new("Found {{instruments}}.");

        nlg.params = vec![NlgParam::enumerated_list("instruments", names(&["A"]))];
        assert_eq!(nlg.render(), "Found A.");

        nlg.params = vec![NlgParam::enumerated_list("instruments", names(&["A", "B"]))];
        assert_eq!(nlg.render(), "Found A and B.");

        nlg.params = vec![NlgParam::enumerated_list("instruments", names(&["A", "B", "C"]))];
        assert_eq!(nlg.render(), "Found A, B and C.");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let nlg = Nlg::new("Hello {{who}}");
        assert_eq!(nlg.render(), "Hello {{who}}");
    }

    #[test]
    fn test_param_type_serialization() {
        let param = NlgParam::enumerated_list("instruments", vec!["A".into()]);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "enumerated_list");
        assert_eq!(json["value"], serde_json::json!(["A"]));

        let param = NlgParam::string("action", "play");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["value"], "play");
    }

    #[test]
    fn test_action_serializes_as_list() {
        let mut response = Response::with_sentence("ok");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["actions"], serde_json::json!([]));

        response.action = Some(Action::new("play").with_param("instrument", "Kitchen Cast"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["actions"][0]["identifier"], "play");
        assert_eq!(json["actions"][0]["params"][0]["key"], "instrument");
        assert_eq!(json["actions"][0]["params"][0]["value"], "Kitchen Cast");
    }

    #[test]
    fn test_more_than_one_action_is_rejected() {
        let json = r#"{"nlg": {"sentence": ""}, "actions": [
            {"identifier": "play"}, {"identifier": "pause"}
        ]}"#;
        assert!(serde_json::from_str::<Response>(json).is_err());
    }
}
