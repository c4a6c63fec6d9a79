//! Integration tests for routing and multi-turn disambiguation

use cast_ability::conversation::{
    ContextStore, MemoryContextStore, SlotFillingContext, INSTRUMENT_NAME_SLOT,
};
use cast_ability::device::{Device, Instrument, InstrumentKind};
use cast_ability::response::{Action, NlgParamType, NlgValue};
use cast_ability::rules::{handler, RuleEngine};
use cast_ability::{Ability, AbilityConfig, Request};
use std::path::Path;

/// Helper: the two-cast household used throughout
fn living_room_and_kitchen() -> Device {
    let kind = InstrumentKind::chrome_cast();
    Device::new(vec![
        Instrument::new("lr", "Living Room Cast", kind.clone(), &["play", "pause"]),
        Instrument::new("k", "Kitchen Cast", kind, &["play", "pause"]),
    ])
}

fn ability() -> Ability {
    Ability::from_config(&AbilityConfig::default()).unwrap()
}

#[test]
fn test_fresh_ambiguity_asks_which_instrument() {
    let request = Request::new("CHROME_CAST_PLAY", living_room_and_kitchen());
    let response = ability().handle(&request);

    let param = response.nlg.param("instruments").unwrap();
    assert_eq!(param.kind, NlgParamType::EnumeratedList);
    assert_eq!(
        param.value,
        NlgValue::List(vec!["Living Room Cast".to_string(), "Kitchen Cast".to_string()])
    );
    assert_eq!(response.slot_filling.action.as_deref(), Some("play"));
    assert_eq!(response.slot_filling.missing_slots, vec!["instrument_name"]);
    assert!(response.auto_reprompt);
    assert!(response.action.is_none());
}

#[test]
fn test_answer_in_pending_context_executes() {
    let request = Request::new("CHROME_CAST_PLAY", living_room_and_kitchen())
        .with_slot_filling(SlotFillingContext::pending("play", &[INSTRUMENT_NAME_SLOT]))
        .with_slot("instrument_name", "Kitchen Cast");
    let response = ability().handle(&request);

    assert_eq!(
        response.action,
        Some(Action::new("play").with_param("instrument", "Kitchen Cast"))
    );
    assert!(response.slot_filling.is_empty());
    assert!(!response.auto_reprompt);
}

#[test]
fn test_explicit_instrument_skips_the_question() {
    let request = Request::new("CHROME_CAST_PAUSE", living_room_and_kitchen())
        .with_slot("instrument_name", "living room cast");
    let response = ability().handle(&request);

    assert_eq!(
        response.action,
        Some(Action::new("pause").with_param("instrument", "Living Room Cast"))
    );
}

#[test]
fn test_named_instrument_must_support_the_action() {
    let kind = InstrumentKind::chrome_cast();
    let device = Device::new(vec![
        Instrument::new("lr", "Living Room Cast", kind.clone(), &["play", "pause"]),
        Instrument::new("k", "Kitchen Cast", kind.clone(), &["play", "pause"]),
        Instrument::new("b", "Bedroom Cast", kind.clone(), &["pause"]),
        Instrument::new("km", "Kitchen Cast Mini", kind, &["pause"]),
    ]);

    // Bedroom Cast cannot play: ask instead of sending it the command
    let request = Request::new("CHROME_CAST_PLAY", device.clone())
        .with_slot("instrument_name", "Bedroom Cast");
    let response = ability().handle(&request);
    assert!(response.action.is_none());
    assert!(response.auto_reprompt);

    let request = Request::new("CHROME_CAST_PLAY", device).with_slot("instrument_name", "kitchen");
    let response = ability().handle(&request);
    assert_eq!(
        response.action,
        Some(Action::new("play").with_param("instrument", "Kitchen Cast"))
    );
}

#[test]
fn test_single_instrument_executes_directly() {
    let device = Device::new(vec![Instrument::new(
        "k",
        "Kitchen Cast",
        InstrumentKind::chrome_cast(),
        &["play"],
    )]);
    let response = ability().handle(&Request::new("CHROME_CAST_PLAY", device));

    assert_eq!(response.action.unwrap().param("instrument"), Some("Kitchen Cast"));
    assert_eq!(
        response.nlg.render(),
        "Executing the action play on the chrome cast Kitchen Cast."
    );
}

#[test]
fn test_no_instrument_reports_not_found() {
    let device = Device::new(vec![Instrument::new(
        "s",
        "Hall Speaker",
        InstrumentKind::new("speaker"),
        &["play"],
    )]);
    let response = ability().handle(&Request::new("CHROME_CAST_PLAY", device));

    assert!(response.action.is_none());
    assert_eq!(
        response.spoken(),
        "I didn't find any chrome cast instrument in the device."
    );
}

#[test]
fn test_slot_filling_rule_shadows_intent_rule() {
    // Both rules match; the one registered first must run
    let mut engine = RuleEngine::new();
    engine
        .register(
            |r: &Request| r.is_in_slot_filling_action("play"),
            handler(|_, response| response.nlg.sentence = "slot filling".into()),
        )
        .register_intent(
            "CHROME_CAST_PLAY",
            handler(|_, response| response.nlg.sentence = "intent".into()),
        );

    let request = Request::new("CHROME_CAST_PLAY", Device::default())
        .with_slot_filling(SlotFillingContext::pending("play", &[INSTRUMENT_NAME_SLOT]));
    assert_eq!(engine.dispatch(&request).unwrap().nlg.sentence, "slot filling");
}

#[test]
fn test_two_turn_conversation_over_json() {
    let ability = ability();
    let mut store = MemoryContextStore::new();
    let lines = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/requests/disambiguation.jsonl"),
    )
    .unwrap();

    let responses: Vec<_> = lines
        .lines()
        .map(|line| serde_json::from_str::<Request>(line).unwrap())
        .map(|request| ability.handle_turn(&mut store, "demo", request))
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(
        responses[0].spoken(),
        "I found several chrome cast instruments in the device : Living Room Cast and Kitchen Cast."
    );
    let json = serde_json::to_value(&responses[1]).unwrap();
    assert_eq!(json["actions"][0]["identifier"], "play");
    assert_eq!(json["actions"][0]["params"][0]["value"], "Kitchen Cast");
    assert!(store.load("demo").is_empty());
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/chromecast.toml");
    let config = AbilityConfig::load(&path).unwrap();
    assert_eq!(config.instrument_kind, InstrumentKind::chrome_cast());
    assert_eq!(config.actions.len(), 2);
    assert!(Ability::from_config(&config).is_ok());
}

#[test]
fn test_ability_is_shared_across_threads() {
    let ability = ability();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ability = ability.clone();
            std::thread::spawn(move || {
                let request = Request::new("CHROME_CAST_PLAY", living_room_and_kitchen());
                ability.handle(&request).auto_reprompt
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
