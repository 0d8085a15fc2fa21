use crate::density::{self, DensityCurve};
use crate::error::{PlResult, ProbeLensError};
use crate::gradient::{self, Rgb};
use crate::grid::GridSelectionController;
use crate::pointer::PointerEvent;
use crate::range::{ClipRange, RangeClipController};
use probelens_protocol::attribution::{display_token, AttributionResult};
use probelens_protocol::catalog::ResidualVariable;
use probelens_protocol::config::PanelConfig;
use probelens_protocol::treatment::{SteeringTreatment, SIMPLE_STEERING};
use tracing::debug;
use typed_builder::TypedBuilder;

/// Everything needed to assemble one panel instance.
#[derive(TypedBuilder)]
pub struct PanelParams {
    pub config: PanelConfig,
    #[builder(default)]
    pub attribution: Option<AttributionResult>,
    #[builder(default)]
    pub catalog: Option<ResidualVariable>,
}

impl PanelParams {
    pub fn build_panel(self) -> PlResult<VisualizationPanel> {
        if self.config.viz.kde_resolution == 0 {
            return Err(ProbeLensError::Validation(
                "kde_resolution must be at least 1".to_string(),
            ));
        }
        if self.config.viz.bandwidth_floor <= 0.0 {
            return Err(ProbeLensError::Validation(
                "bandwidth_floor must be positive".to_string(),
            ));
        }

        let mut panel = VisualizationPanel::new(self.config);
        if let Some(result) = self.attribution {
            panel.set_attribution(result);
        }
        if let Some(catalog) = &self.catalog {
            panel.set_catalog(catalog);
        }
        Ok(panel)
    }
}

/// Composition root for one attribution view: the clip-range slider, the
/// KDE chart and the per-token colors on one side, the intervention grid
/// on the other. Every panel owns its controller state outright, so any
/// number of instances can coexist without cross-talk.
pub struct VisualizationPanel {
    config: PanelConfig,
    range: RangeClipController,
    grid: GridSelectionController,
    low: Rgb,
    high: Rgb,
    attribution: AttributionResult,
    catalog_name: String,
    curve: DensityCurve,
    colors: Vec<Rgb>,
}

impl VisualizationPanel {
    pub fn new(config: PanelConfig) -> Self {
        let low = Rgb::parse_hex(&config.viz.low_color);
        let high = Rgb::parse_hex(&config.viz.high_color);
        let range = RangeClipController::new(config.viz.min_clip, config.viz.max_clip);

        let mut panel = Self {
            config,
            range,
            grid: GridSelectionController::default(),
            low,
            high,
            attribution: AttributionResult::default(),
            catalog_name: String::new(),
            curve: DensityCurve::default(),
            colors: Vec::new(),
        };
        panel.refresh();
        panel
    }

    /// Swap in a new attribution result and recompute curve and colors.
    pub fn set_attribution(&mut self, result: AttributionResult) {
        debug!("Panel attribution updated: {} tokens", result.token_count());
        self.attribution = result;
        self.refresh();
    }

    /// Point the grid at a residual variable. Selection is preserved for
    /// keys the new catalog still contains.
    pub fn set_catalog(&mut self, catalog: &ResidualVariable) {
        self.catalog_name = catalog.name.clone();
        self.grid.rebuild(catalog);
    }

    pub fn set_low_color(&mut self, hex: &str) {
        self.low = Rgb::parse_hex(hex);
        self.refresh();
    }

    pub fn set_high_color(&mut self, hex: &str) {
        self.high = Rgb::parse_hex(hex);
        self.refresh();
    }

    /// Slider event. The original redraws colors, track and curve on every
    /// frame of a drag, so the panel refreshes unconditionally here.
    pub fn range_event(&mut self, event: PointerEvent<f32>) {
        self.range.handle(event);
        self.refresh();
    }

    /// Typed entry into the min_clip field.
    pub fn set_min_clip(&mut self, value: f32) {
        self.range.set_min(value);
        self.refresh();
    }

    pub fn set_max_clip(&mut self, value: f32) {
        self.range.set_max(value);
        self.refresh();
    }

    /// Grid event, in (row, col) cell coordinates.
    pub fn grid_event(&mut self, event: PointerEvent<(usize, usize)>) {
        self.grid.handle(event);
    }

    pub fn clip_range(&self) -> ClipRange {
        self.range.range()
    }

    pub fn grid(&self) -> &GridSelectionController {
        &self.grid
    }

    pub fn attribution(&self) -> &AttributionResult {
        &self.attribution
    }

    /// Scores in the active lane (plain or drop-special).
    pub fn scores(&self) -> &[f32] {
        self.attribution.scores(self.config.viz.drop_special)
    }

    /// One color per score in the active lane.
    pub fn token_colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn density_curve(&self) -> &DensityCurve {
        &self.curve
    }

    pub fn curve_svg_path(&self) -> String {
        self.curve.svg_path()
    }

    /// Input tokens with BPE space markers rendered as spaces.
    pub fn display_tokens(&self) -> Vec<String> {
        self.attribution
            .input_tokens
            .iter()
            .map(|t| display_token(t))
            .collect()
    }

    /// Serialized steering configuration for the external session store.
    /// This object is the entire boundary contract; the panel itself never
    /// performs any I/O.
    pub fn steering_treatment(&self) -> SteeringTreatment {
        SteeringTreatment {
            treatment_type: SIMPLE_STEERING.to_string(),
            residual_var: self.catalog_name.clone(),
            alpha: self.config.steer.alpha,
            delta: self.config.steer.delta.clamp(0.0, 1.0),
            normalize: self.config.steer.normalize,
            layer_keys: self.grid.selected_keys(),
        }
    }

    fn refresh(&mut self) {
        let scores = self.attribution.scores(self.config.viz.drop_special);
        let range = self.range.range();
        let (low, high) = (self.low, self.high);

        self.curve = density::estimate(
            scores,
            self.config.viz.kde_resolution,
            self.config.viz.bandwidth_floor,
        );
        self.colors = scores
            .iter()
            .map(|s| gradient::map_score(*s, &range, low, high))
            .collect();
    }
}
