use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use probelens_core::config::PanelConfig;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Attribution result JSON (backend output).
    #[arg(global = true, short, long)]
    attribution: Option<String>,

    /// Residual variable JSON (direction catalog).
    #[arg(global = true, short = 'r', long)]
    catalog: Option<String>,

    /// Panel config JSON; explicit CLI flags override its values.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Render(cmd::render::RenderArgs),
    Steer(cmd::steer::SteerArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let (mut config, cli_config_ref, sub_matches) = match &cli.command {
        Commands::Render(args) => (
            args.config.clone(),
            &args.config,
            matches.subcommand_matches("render").unwrap(),
        ),
        Commands::Steer(args) => (
            args.config.clone(),
            &args.config,
            matches.subcommand_matches("steer").unwrap(),
        ),
    };

    if let Some(path) = &cli.config {
        info!("⚙️  Loading panel config: {}", path);
        let mut file_config = PanelConfig::load_from_file(path);
        file_config.merge_from_cli(cli_config_ref, sub_matches);
        config = file_config;
    }

    let attribution_path = cli.attribution.clone();
    let catalog_path = cli.catalog.clone();

    let result = match cli.command {
        Commands::Render(args) => cmd::render::run(args, attribution_path, config),
        Commands::Steer(args) => cmd::steer::run(args, catalog_path, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
