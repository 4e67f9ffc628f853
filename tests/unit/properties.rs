use dtr_cli::context::{TokenContext, TokenOptions};
use dtr_cli::flatten::flatten;
use dtr_cli::registry::TicketInput;
use dtr_cli::test_utils::{context_from, init_test_logging};
use dtr_cli::tokens::{TokenMap, TokenValue, document_from_json};
use serde_json::json;

#[test]
fn test_primitive_round_trip() {
    init_test_logging(None);
    let mut tokens = context_from(json!({
        "color": "#fff",
        "size": 12.5,
        "enabled": true,
        "nothing": null
    }));

    for id in ["color", "size", "enabled", "nothing"] {
        let stored = tokens.get(id).map(|ticket| ticket.value.clone());
        assert!(stored.is_some(), "{id} should be registered");
        assert_eq!(tokens.resolve(id), stored, "direct {id}");
        assert_eq!(tokens.resolve(format!("{{{id}}}")), stored, "braced {id}");
    }
}

#[test]
fn test_chained_aliases_of_any_length() {
    for length in [1_usize, 10, 200] {
        let mut tokens = TokenContext::default();
        tokens.register(TicketInput::with_id("t0", TokenValue::from("root")));
        for i in 1..=length {
            tokens.register(TicketInput::with_id(format!("t{i}"), TokenValue::alias(format!("{{t{}}}", i - 1))));
        }

        assert_eq!(tokens.resolve(format!("t{length}")), Some(TokenValue::from("root")), "chain of {length}");
    }
}

#[test]
fn test_cycles_resolve_to_none() {
    let mut two = context_from(json!({ "a": "{b}", "b": "{a}" }));
    assert_eq!(two.resolve("a"), None);
    assert_eq!(two.resolve("b"), None);

    let mut three = context_from(json!({
        "a": { "$value": "{b}" },
        "b": { "$value": "{c}" },
        "c": { "$value": "{a}" }
    }));
    assert_eq!(three.resolve("{a}"), None);
    assert_eq!(three.resolve("c"), None);
}

#[test]
fn test_idempotent_after_unrelated_register() {
    let mut tokens = context_from(json!({ "base": 2, "double": "{base}" }));
    let first = tokens.resolve("double");
    tokens.register(TokenValue::from("anonymous"));
    assert_eq!(tokens.resolve("double"), first);
    assert_eq!(first, Some(TokenValue::from(2)));
}

#[test]
fn test_upsert_keeps_cached_alias_value() {
    let mut tokens = context_from(json!({ "base": "#000", "primary": { "$value": "{base}" } }));
    assert_eq!(tokens.resolve("primary"), Some(TokenValue::from("#000")));

    tokens.upsert("base", "#fff");
    assert_eq!(tokens.resolve("primary"), Some(TokenValue::from("#000")));

    tokens.clear_cache();
    assert_eq!(tokens.resolve("primary"), Some(TokenValue::from("#fff")));
}

#[test]
fn test_partial_path_resolves() {
    let document = json!({ "colors": { "blue": { "500": "#3b82f6" } } });

    let mut nested = context_from(document.clone());
    assert_eq!(nested.resolve("{colors}.blue.500"), Some(TokenValue::from("#3b82f6")));

    let mut flat = TokenContext::from_json(document, TokenOptions::new().with_flat(true)).unwrap();
    assert_eq!(flat.resolve("{colors}.blue.500"), Some(TokenValue::from("#3b82f6")));
    assert_eq!(flat.resolve("colors.blue.500"), Some(TokenValue::from("#3b82f6")));
    assert_eq!(flat.resolve("{colors}.blue.600"), None);
}

#[test]
fn test_falsy_values_are_distinguishable_from_missing() {
    let mut tokens = context_from(json!({
        "zero": 0,
        "off": false,
        "none": null,
        "to-zero": "{zero}",
        "to-none": { "$value": "{none}" }
    }));

    assert_eq!(tokens.resolve("zero"), Some(TokenValue::from(0)));
    assert_eq!(tokens.resolve("off"), Some(TokenValue::from(false)));
    assert_eq!(tokens.resolve("none"), Some(TokenValue::null()));
    assert_eq!(tokens.resolve("to-zero"), Some(TokenValue::from(0)));
    assert_eq!(tokens.resolve("to-none"), Some(TokenValue::null()));
    assert_eq!(tokens.resolve("absent"), None);
}

#[test]
fn test_flatten_count() {
    let document = document_from_json(json!({ "a": { "b": 1, "c": 2 }, "d": 3 })).unwrap();
    let ids: Vec<String> = flatten(&document, None, false).into_iter().map(|entry| entry.id).collect();
    assert_eq!(ids, ["a.b", "a.c", "d"]);
}

#[test]
fn test_empty_container_is_not_registered() {
    let mut tokens = context_from(json!({ "empty": {}, "filled": { "x": 1 } }));
    assert_eq!(tokens.keys().collect::<Vec<_>>(), ["filled.x"]);
    assert_eq!(tokens.resolve("empty"), None);
}

#[test]
fn test_end_to_end_scenario() {
    let mut tokens = context_from(json!({
        "base": "#007BFF",
        "primary": { "$value": "{base}" },
        "accent": { "$value": "{primary}" }
    }));
    assert_eq!(tokens.resolve("accent"), Some(TokenValue::from("#007BFF")));
}

#[test]
fn test_reverse_lookup_returns_all_ids() {
    let tokens = context_from(json!({ "error": "#F00", "danger": "#F00" }));
    let mut ids = tokens.browse("#F00").unwrap();
    ids.sort();
    assert_eq!(ids, ["danger", "error"]);
}

#[test]
fn test_unregister_then_reregister_moves_to_end() {
    let mut tokens = context_from(json!({ "a": 1, "b": 2, "c": 3 }));
    tokens.unregister("a");
    tokens.register(TicketInput::with_id("a", TokenValue::from(10)));

    assert_eq!(tokens.keys().collect::<Vec<_>>(), ["b", "c", "a"]);
    assert_eq!(tokens.lookup(0), None);
    assert_eq!(tokens.lookup(3), Some("a"));
}

#[test]
fn test_new_from_token_map() {
    let mut document = TokenMap::new();
    document.insert("radius".to_string(), TokenValue::from(6));
    document.insert("card".to_string(), TokenValue::alias("{radius}"));

    let mut tokens = TokenContext::new(&document, TokenOptions::new().with_prefix("ui")).unwrap();
    assert_eq!(tokens.keys().collect::<Vec<_>>(), ["ui.card", "ui.radius"]);
    assert_eq!(tokens.resolve("ui.card"), None);
    assert_eq!(tokens.resolve("ui.radius"), Some(TokenValue::from(6)));
}
