mod app;
mod formatters;
mod presets;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};

fn main() -> Result<()> {
    let cli = app::Cli::parse();

    // Initialiser le logger, RUST_LOG reste prioritaire sur -v
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    info!("Démarrage de firestore-perf");

    // Le stockage est libéré dans app::run, avant que l'erreur ne remonte ici
    let result = app::run(cli);

    info!("Fin de firestore-perf");

    result
}
