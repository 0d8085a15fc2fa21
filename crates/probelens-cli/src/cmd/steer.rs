use crate::reports;
use clap::Args;
use probelens_core::catalog::ResidualVariable;
use probelens_core::config::PanelConfig;
use probelens_core::error::{PlResult, ProbeLensError};
use probelens_core::panel::PanelParams;
use probelens_core::pointer::PointerEvent;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SteerArgs {
    #[command(flatten)]
    pub config: PanelConfig,

    /// Pointer drag over the grid, as "r0,c0:r1,c1". May repeat; each drag
    /// adds or removes exactly like the dashboard (the anchor cell's state
    /// picks the mode).
    #[arg(long, value_name = "RECT")]
    pub drag: Vec<String>,

    /// Write the treatment JSON here instead of stdout.
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Parse "r0,c0:r1,c1" into anchor and target cells.
pub fn parse_rect(raw: &str) -> PlResult<((usize, usize), (usize, usize))> {
    let invalid =
        || ProbeLensError::Validation(format!("Invalid drag '{}', expected r0,c0:r1,c1", raw));

    let (from, to) = raw.split_once(':').ok_or_else(invalid)?;
    let parse_cell = |s: &str| -> PlResult<(usize, usize)> {
        let (r, c) = s.split_once(',').ok_or_else(invalid)?;
        let r = r.trim().parse::<usize>().map_err(|_| invalid())?;
        let c = c.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok((r, c))
    };

    Ok((parse_cell(from)?, parse_cell(to)?))
}

pub fn run(args: SteerArgs, catalog: Option<String>, config: PanelConfig) -> PlResult<()> {
    let path = catalog
        .ok_or_else(|| ProbeLensError::Config("steer needs --catalog <file>".to_string()))?;

    info!("📂 Loading residual variable: {}", path);
    let catalog = ResidualVariable::load_from_file(&path).map_err(ProbeLensError::Validation)?;
    info!("🧭 {} direction keys", catalog.directions.len());

    let mut panel = PanelParams::builder()
        .config(config)
        .catalog(Some(catalog))
        .build()
        .build_panel()?;

    for gesture in &args.drag {
        let (anchor, target) = parse_rect(gesture)?;
        panel.grid_event(PointerEvent::Down(anchor));
        panel.grid_event(PointerEvent::Move(target));
        panel.grid_event(PointerEvent::Up);
    }

    reports::print_grid(&panel);

    let treatment = panel.steering_treatment();
    let json = serde_json::to_string_pretty(&treatment)?;
    match &args.out {
        Some(out) => {
            fs::write(out, json)?;
            info!("💾 Treatment written to {}", out);
        }
        None => println!("{}", json),
    }
    Ok(())
}
