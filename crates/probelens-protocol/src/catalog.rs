use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A stored residual variable: direction vectors addressed by layer key
/// (e.g. `model.layers.0.mlp_block_out`). The selection grid only looks at
/// the keys; the vectors are opaque here and consumed by the treatment
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResidualVariable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub directions: HashMap<String, Vec<f32>>,
    #[serde(default)]
    pub num_directions: usize,
    #[serde(default)]
    pub dim: usize,
}

impl ResidualVariable {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read residual variable file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse residual variable JSON: {}", e))
    }

    pub fn layer_keys(&self) -> Vec<&str> {
        self.directions.keys().map(String::as_str).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.directions.contains_key(key)
    }
}
