use crate::reports;
use clap::Args;
use probelens_core::attribution::AttributionResult;
use probelens_core::config::PanelConfig;
use probelens_core::error::{PlResult, ProbeLensError};
use probelens_core::panel::PanelParams;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: PanelConfig,

    /// Limit the token table to the first N tokens.
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(args: RenderArgs, attribution: Option<String>, config: PanelConfig) -> PlResult<()> {
    let path = attribution.ok_or_else(|| {
        ProbeLensError::Config("render needs --attribution <file>".to_string())
    })?;

    info!("📂 Loading attribution result: {}", path);
    let result = AttributionResult::load_from_file(&path).map_err(ProbeLensError::Validation)?;
    info!("🔤 {} input tokens", result.token_count());

    let panel = PanelParams::builder()
        .config(config)
        .attribution(Some(result))
        .build()
        .build_panel()?;

    reports::print_token_table(&panel, args.limit);
    reports::print_curve_summary(&panel);
    Ok(())
}
