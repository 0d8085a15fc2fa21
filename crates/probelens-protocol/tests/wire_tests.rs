use probelens_protocol::attribution::{display_token, AttributionResult};
use probelens_protocol::catalog::ResidualVariable;
use probelens_protocol::treatment::{SteeringTreatment, SIMPLE_STEERING};
use std::collections::HashMap;

#[test]
fn attribution_parses_backend_json() {
    let raw = r#"{
        "input_tokens": ["Hello", "Ġworld"],
        "token_scores": [0.12, 0.93],
        "token_scores_drop_special": [0.0, 0.93],
        "generated_text": "hi"
    }"#;

    let result: AttributionResult = serde_json::from_str(raw).unwrap();
    assert_eq!(result.token_count(), 2);
    assert_eq!(result.scores(false), &[0.12, 0.93]);
    assert_eq!(result.scores(true), &[0.0, 0.93]);
    assert_eq!(display_token(&result.input_tokens[1]), " world");
    assert_eq!(result.generated_text, "hi");
}

#[test]
fn attribution_missing_fields_default() {
    let raw = r#"{"input_tokens": ["a"], "token_scores": [0.5]}"#;
    let result: AttributionResult = serde_json::from_str(raw).unwrap();

    // The drop-special lane falls back to the plain scores.
    assert_eq!(result.scores(true), &[0.5]);
    assert!(result.generated_text.is_empty());
}

#[test]
fn catalog_parses_directions_map() {
    let raw = r#"{
        "name": "tone_direction",
        "directions": {
            "layers.0.attn_out": [0.1, -0.2],
            "layers.0.mlp_out": [0.3, 0.4]
        },
        "num_directions": 2,
        "dim": 2
    }"#;

    let catalog: ResidualVariable = serde_json::from_str(raw).unwrap();
    assert_eq!(catalog.name, "tone_direction");
    assert!(catalog.contains_key("layers.0.attn_out"));
    assert!(!catalog.contains_key("layers.1.attn_out"));

    let mut keys = catalog.layer_keys();
    keys.sort();
    assert_eq!(keys, ["layers.0.attn_out", "layers.0.mlp_out"]);
}

#[test]
fn treatment_parses_stored_config() {
    let raw = r#"{
        "type": "simple_steering",
        "residual_var": "tone_direction",
        "normalize": true,
        "alpha": 1.0,
        "delta": 0.0,
        "layer_keys": [
            "model.layers.0.mlp_block_out",
            "model.layers.5.mlp_block_out"
        ]
    }"#;

    let treatment = SteeringTreatment::parse(raw).unwrap();
    assert_eq!(treatment.treatment_type, SIMPLE_STEERING);
    assert_eq!(treatment.residual_var, "tone_direction");
    assert_eq!(treatment.layer_keys.len(), 2);
}

#[test]
fn treatment_rejects_non_steering_strings() {
    assert!(SteeringTreatment::parse("").is_none());
    assert!(SteeringTreatment::parse("   ").is_none());
    assert!(SteeringTreatment::parse("not json").is_none());
    assert!(SteeringTreatment::parse(r#"{"type": "other_treatment"}"#).is_none());
}

#[test]
fn treatment_clamps_delta_on_parse() {
    let high = SteeringTreatment::parse(r#"{"type": "simple_steering", "delta": 3.5}"#).unwrap();
    assert_eq!(high.delta, 1.0);

    let low = SteeringTreatment::parse(r#"{"type": "simple_steering", "delta": -1.0}"#).unwrap();
    assert_eq!(low.delta, 0.0);
}

#[test]
fn treatment_defaults_apply() {
    let treatment = SteeringTreatment::parse(r#"{"type": "simple_steering"}"#).unwrap();
    assert_eq!(treatment.alpha, 1.0);
    assert_eq!(treatment.delta, 0.0);
    assert!(treatment.normalize);
    assert!(treatment.layer_keys.is_empty());
    assert!(treatment.residual_var.is_empty());
}

#[test]
fn treatment_serializes_wire_field_names() {
    let treatment = SteeringTreatment {
        residual_var: "v".to_string(),
        ..Default::default()
    };

    let json = treatment.to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "simple_steering");
    assert_eq!(value["residual_var"], "v");
    assert_eq!(value["alpha"], 1.0);
    assert!(value["normalize"].as_bool().unwrap());
    assert!(value["layer_keys"].as_array().unwrap().is_empty());
}

#[test]
fn resolve_layer_keys_filters_and_defaults() {
    let mut directions = HashMap::new();
    directions.insert("layers.0.attn_out".to_string(), vec![0.0]);
    directions.insert("layers.1.mlp_out".to_string(), vec![0.0]);
    let catalog = ResidualVariable {
        name: "v".to_string(),
        num_directions: 2,
        dim: 1,
        directions,
    };

    // An empty list means every catalog key, in sorted order.
    let all = SteeringTreatment::default().resolve_layer_keys(&catalog);
    assert_eq!(all, ["layers.0.attn_out", "layers.1.mlp_out"]);

    // Listed keys are filtered down to the ones the catalog still has.
    let treatment = SteeringTreatment {
        layer_keys: vec![
            "layers.1.mlp_out".to_string(),
            "layers.9.attn_out".to_string(),
        ],
        ..Default::default()
    };
    assert_eq!(treatment.resolve_layer_keys(&catalog), ["layers.1.mlp_out"]);
}
