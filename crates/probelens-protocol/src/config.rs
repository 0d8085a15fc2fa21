use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelConfig {
    #[command(flatten)]
    pub viz: VizParams,
    #[command(flatten)]
    pub steer: SteerParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizParams {
    /// KDE sample count over [0,1]; the curve has kde_resolution + 1 points.
    #[arg(long, default_value_t = 120)]
    pub kde_resolution: usize,

    /// Lower bound on the Silverman bandwidth (degenerate-sample guard).
    #[arg(long, default_value_t = 0.02)]
    pub bandwidth_floor: f32,

    #[arg(long, default_value = "#e8e8e8")]
    pub low_color: String,
    #[arg(long, default_value = "#3b82f6")]
    pub high_color: String,

    #[arg(long, default_value_t = 0.0)]
    pub min_clip: f32,
    #[arg(long, default_value_t = 1.0)]
    pub max_clip: f32,

    /// Use the score lane with special tokens suppressed.
    #[arg(long, default_value_t = false)]
    pub drop_special: bool,
}

impl Default for VizParams {
    fn default() -> Self {
        Self {
            kde_resolution: 120,
            bandwidth_floor: 0.02,
            low_color: "#e8e8e8".to_string(),
            high_color: "#3b82f6".to_string(),
            min_clip: 0.0,
            max_clip: 1.0,
            drop_special: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteerParams {
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f32,

    /// Apply steering only where |cos sim| >= delta; clamped into [0,1].
    #[arg(long, default_value_t = 0.0)]
    pub delta: f32,

    /// Preserve per-token norms after steering.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub normalize: bool,
}

impl Default for SteerParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            delta: 0.0,
            normalize: true,
        }
    }
}

impl PanelConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("❌ Failed to read panel config file: {}", e));

        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("❌ Failed to parse panel config JSON: {}", e))
    }

    pub fn merge_from_cli(&mut self, cli: &PanelConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident, $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(viz, kde_resolution, "kde_resolution");
        update_if_present!(viz, bandwidth_floor, "bandwidth_floor");
        update_if_present!(viz, low_color, "low_color");
        update_if_present!(viz, high_color, "high_color");
        update_if_present!(viz, min_clip, "min_clip");
        update_if_present!(viz, max_clip, "max_clip");
        update_if_present!(viz, drop_special, "drop_special");

        update_if_present!(steer, alpha, "alpha");
        update_if_present!(steer, delta, "delta");
        update_if_present!(steer, normalize, "normalize");
    }
}
