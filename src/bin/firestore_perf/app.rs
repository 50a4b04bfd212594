use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use firestore_perf::bench::DEFAULT_PROJECT_ID;
use firestore_perf::{
    EmulatorResetClient, EmulatorStore, Harness, HarnessConfig, MemoryStore, ReqwestTransport,
    TenantMode, EMULATOR_HOST_ENV,
};

use crate::formatters::OutputFormat;
use crate::presets::Preset;

#[derive(Parser, Debug)]
#[command(name = "firestore-perf")]
#[command(about = "Remplit un émulateur Firestore d'événements synthétiques et chronomètre une requête", long_about = None)]
pub struct Cli {
    /// Niveau de verbosité (répéter pour augmenter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Format de sortie du résumé final (text, json, table)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Désactive les couleurs en sortie
    #[arg(long)]
    no_color: bool,

    /// Configuration de base
    #[arg(short, long, value_enum, default_value_t = Preset::Smoke)]
    preset: Preset,

    /// Projet pour lequel le client est créé
    #[arg(long, default_value = DEFAULT_PROJECT_ID)]
    project: String,

    /// Hôte de l'émulateur (hôte:port)
    #[arg(long, env = EMULATOR_HOST_ENV)]
    emulator_host: Option<String>,

    /// Chemin de la collection, remplace celui du preset
    #[arg(short, long)]
    collection: Option<String>,

    /// Nombre de documents à insérer, remplace celui du preset
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Affecte tous les documents à ce tenant au lieu d'un tirage aléatoire
    #[arg(long)]
    tenant: Option<i64>,

    /// Nombre maximal de documents renvoyés par la requête
    #[arg(long)]
    limit: Option<usize>,

    /// Vide l'émulateur avant l'insertion
    #[arg(long)]
    reset: bool,

    /// Utilise un stockage en mémoire au lieu de Firestore
    #[arg(long)]
    in_memory: bool,
}

impl Cli {
    /// Résout la configuration : d'abord le preset, puis les options
    pub fn harness_config(&self) -> HarnessConfig {
        let mut config = self.preset.config();

        config.project_id = self.project.clone();
        config.emulator_host = self.emulator_host.clone().filter(|host| !host.is_empty());
        config.reset = self.reset;

        if let Some(collection) = &self.collection {
            config.collection = collection.clone();
        }
        if let Some(count) = self.count {
            config.document_count = count;
        }
        if let Some(tenant) = self.tenant {
            config.tenant_mode = TenantMode::Fixed(tenant);
        }
        if let Some(limit) = self.limit {
            config.query = config.query.limit(limit);
        }

        config
    }
}

/// Exécute le benchmark décrit par la ligne de commande
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.harness_config();
    let formatter = cli.format.formatter(!cli.no_color);

    let mut harness = Harness::new(config.clone());
    if config.reset {
        if cli.in_memory {
            warn!("--reset has no effect with --in-memory");
        } else {
            let transport = ReqwestTransport::new()?;
            let client = EmulatorResetClient::new(config.emulator_host.clone(), Box::new(transport));
            harness = harness.with_reset_client(client);
        }
    }

    if config.emulator_host.is_none() && !cli.in_memory {
        println!("{}", formatter.format_info(&format!(
            "{} is not set, using the public Firestore endpoint", EMULATOR_HOST_ENV
        )));
    }

    let result = if cli.in_memory {
        harness.run(|config| Ok(MemoryStore::new(&config.project_id)))
    } else {
        harness.run(|config| EmulatorStore::connect(&config.project_id, config.emulator_host.as_deref()))
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            return Err(e).context("Benchmark aborted");
        }
    };

    println!("{}", formatter.format_report(&report)?);
    println!("DONE");

    Ok(())
}
