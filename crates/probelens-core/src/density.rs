use serde::{Deserialize, Serialize};

/// Default sample count over the display domain.
pub const DEFAULT_RESOLUTION: usize = 120;

/// Default lower bound on the bandwidth; keeps a degenerate sample
/// (n = 1, or all scores equal) from collapsing the kernel width to zero.
pub const DEFAULT_BANDWIDTH_FLOOR: f32 = 0.02;

// Chart frame of the dashboard's KDE SVG (220x100 viewBox).
const CHART_W: f32 = 220.0;
const PAD_LEFT: f32 = 28.0;
const PAD_RIGHT: f32 = 8.0;
const PAD_TOP: f32 = 8.0;
const BASE_Y: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f32,
    pub density: f32,
}

/// Smoothed score distribution sampled at fixed resolution over [0,1].
/// Values are the raw kernel sums; the chart rescales against the curve's
/// own maximum, so no renormalization happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    pub points: Vec<DensityPoint>,
}

#[inline(always)]
fn gaussian(u: f32) -> f32 {
    (-0.5 * u * u).exp() / (2.0 * std::f32::consts::PI).sqrt()
}

/// Silverman's rule of thumb, floored.
#[inline]
fn silverman_bandwidth(scores: &[f32], floor: f32) -> f32 {
    let n = scores.len() as f32;
    let mean = scores.iter().sum::<f32>() / n;
    let variance = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / n;

    (1.06 * variance.sqrt() * n.powf(-0.2)).max(floor)
}

/// Gaussian KDE of the scores over [0,1], sampled at `resolution + 1`
/// evenly spaced points. Non-finite scores are ignored; an empty sequence
/// yields a flat zero curve.
pub fn estimate(scores: &[f32], resolution: usize, bandwidth_floor: f32) -> DensityCurve {
    let resolution = resolution.max(1);
    let finite: Vec<f32> = scores.iter().copied().filter(|s| s.is_finite()).collect();
    let n = finite.len();

    let mut points = Vec::with_capacity(resolution + 1);
    if n == 0 {
        for i in 0..=resolution {
            points.push(DensityPoint {
                x: i as f32 / resolution as f32,
                density: 0.0,
            });
        }
        return DensityCurve { points };
    }

    let h = silverman_bandwidth(&finite, bandwidth_floor);
    let norm = 1.0 / (n as f32 * h);
    for i in 0..=resolution {
        let x = i as f32 / resolution as f32;
        let sum: f32 = finite.iter().map(|s| gaussian((x - s) / h)).sum();
        points.push(DensityPoint {
            x,
            density: norm * sum,
        });
    }

    DensityCurve { points }
}

impl DensityCurve {
    pub fn max_density(&self) -> f32 {
        self.points.iter().fold(0.0f32, |a, p| a.max(p.density))
    }

    /// Closed SVG path over the dashboard's chart frame, scaled so the
    /// tallest mode touches the top of the plot. A flat curve renders as
    /// the bare baseline segment.
    pub fn svg_path(&self) -> String {
        let inner_w = CHART_W - PAD_LEFT - PAD_RIGHT;
        let inner_h = BASE_Y - PAD_TOP;
        let max_d = self.max_density();

        if self.points.is_empty() || max_d <= 0.0 {
            return format!(
                "M {},{} L {},{} Z",
                PAD_LEFT,
                BASE_Y,
                CHART_W - PAD_RIGHT,
                BASE_Y
            );
        }

        let last = self.points.len().saturating_sub(1).max(1) as f32;
        let mut d = format!("M {},{}", PAD_LEFT, BASE_Y);
        for (i, p) in self.points.iter().enumerate() {
            let x = PAD_LEFT + (i as f32 / last) * inner_w;
            let y = BASE_Y - (p.density / max_d) * inner_h;
            d.push_str(&format!(" L {},{}", x, y));
        }
        d.push_str(&format!(" L {},{} Z", CHART_W - PAD_RIGHT, BASE_Y));
        d
    }
}
