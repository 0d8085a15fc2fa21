use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Attribution result for one prompt, as produced by the backend.
/// One score per input token. `token_scores_drop_special` is the variant
/// with special tokens suppressed and may be absent in older results.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttributionResult {
    #[serde(default)]
    pub input_tokens: Vec<String>,
    #[serde(default)]
    pub token_scores: Vec<f32>,
    #[serde(default)]
    pub token_scores_drop_special: Vec<f32>,
    #[serde(default)]
    pub generated_text: String,
}

impl AttributionResult {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read attribution file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse attribution JSON: {}", e))
    }

    /// Scores for the requested lane. The drop-special lane falls back to
    /// the plain scores when the backend did not emit it.
    pub fn scores(&self, drop_special: bool) -> &[f32] {
        if drop_special && !self.token_scores_drop_special.is_empty() {
            &self.token_scores_drop_special
        } else {
            &self.token_scores
        }
    }

    pub fn token_count(&self) -> usize {
        self.input_tokens.len()
    }
}

/// BPE tokenizers mark a leading space with U+0120; show it as a space.
pub fn display_token(raw: &str) -> String {
    raw.replace('\u{0120}', " ")
}
