use crate::catalog::ResidualVariable;
use serde::{Deserialize, Serialize};

/// Wire value of the `type` field this crate knows how to build.
pub const SIMPLE_STEERING: &str = "simple_steering";

fn default_type() -> String {
    SIMPLE_STEERING.to_string()
}

fn default_alpha() -> f32 {
    1.0
}

fn default_normalize() -> bool {
    true
}

/// The treatment object stored in the session `treatment` field and applied
/// by the steering backend as forward hooks:
///
/// ```json
/// {
///   "type": "simple_steering",
///   "residual_var": "<variable name>",
///   "alpha": 1.0,
///   "delta": 0.0,
///   "normalize": true,
///   "layer_keys": ["model.layers.0.mlp_block_out"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteeringTreatment {
    #[serde(rename = "type", default = "default_type")]
    pub treatment_type: String,
    #[serde(default)]
    pub residual_var: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub delta: f32,
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    #[serde(default)]
    pub layer_keys: Vec<String>,
}

impl Default for SteeringTreatment {
    fn default() -> Self {
        Self {
            treatment_type: default_type(),
            residual_var: String::new(),
            alpha: 1.0,
            delta: 0.0,
            normalize: true,
            layer_keys: Vec::new(),
        }
    }
}

impl SteeringTreatment {
    /// Parse a stored treatment string. An empty string, invalid JSON, or a
    /// different treatment type all mean "no steering".
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return None;
        }

        let mut cfg: Self = serde_json::from_str(s).ok()?;
        if cfg.treatment_type != SIMPLE_STEERING {
            return None;
        }

        cfg.delta = cfg.delta.clamp(0.0, 1.0);
        Some(cfg)
    }

    /// Keys the backend will actually hook: the listed keys that exist in
    /// the catalog, or every catalog key when the list is empty.
    pub fn resolve_layer_keys(&self, catalog: &ResidualVariable) -> Vec<String> {
        if self.layer_keys.is_empty() {
            let mut keys: Vec<String> = catalog.directions.keys().cloned().collect();
            keys.sort();
            keys
        } else {
            self.layer_keys
                .iter()
                .filter(|k| catalog.contains_key(k))
                .cloned()
                .collect()
        }
    }

    pub fn to_json_string(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize treatment: {}", e))
    }
}
