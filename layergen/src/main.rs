//! CLI entry point for layergen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use layergen::codegen::{ContextBuilder, LayerKind};
use layergen::config::GeneratorConfig;
use layergen::connector::open_connector;
use layergen::{GeneratorError, SchemaViolation};

#[derive(Parser)]
#[command(name = "layergen")]
#[command(about = "Scaffold entity, mapper and service layers from table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format); LAYERGEN_* env vars override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to SQL schema file (overrides schema_file and database_url)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output root directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated tables to scaffold (overrides config)
    #[arg(short, long)]
    tables: Option<String>,

    /// Comma-separated layers to render (overrides config)
    #[arg(short, long)]
    layers: Option<String>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the configured layers for every table (default)
    Generate,
    /// Render only the Oracle mapper bindings
    Oracle,
    /// Show primary keys and derived names for the configured tables
    Inspect,
    /// List the layer catalog
    Layers,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Generate);

    // The catalog is static, it needs no configuration
    if matches!(command, Commands::Layers) {
        print_layers();
        return Ok(());
    }

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.use_schema_file(schema);
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(tables) = cli.tables {
        config.tables = tables;
    }
    if let Some(layers) = cli.layers {
        config.layers = layers;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    let report = match command {
        Commands::Inspect => return inspect(&config),
        Commands::Oracle => layergen::generate_oracle(&config)?,
        Commands::Generate | Commands::Layers => layergen::generate(&config)?,
    };

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for path in &report.files {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    info!(
        "Scaffolded {} tables into {} files",
        report.tables.len(),
        report.files.len()
    );
    Ok(())
}

fn print_layers() {
    println!("Layers (sweep order):");
    for kind in LayerKind::ALL {
        let note = if kind.is_swept() {
            ""
        } else {
            "  (explicit only: `layergen oracle`)"
        };
        println!("  {}{}", kind, note);
    }
}

fn inspect(config: &GeneratorConfig) -> Result<()> {
    config.validate()?;
    let connector = open_connector(config)?;
    let builder = ContextBuilder::new(config, connector.as_ref());

    for table in config.table_list() {
        println!("Table: {}", table);
        let primary_key = match connector.primary_key(&table) {
            Ok(pk) if pk.is_present() => pk,
            Ok(_) => {
                println!("  {}\n", SchemaViolation::MissingPrimaryKey);
                continue;
            }
            Err(e) => {
                println!("  {}\n", e);
                continue;
            }
        };

        match builder.build(&table, &primary_key) {
            Ok(ctx) => {
                println!("  Class:       {} / {}", ctx.upper_class_name(), ctx.lower_class_name());
                println!(
                    "  Primary key: {} {} -> {} ({} / {})",
                    primary_key.column,
                    primary_key.sql_type,
                    primary_key.java_type,
                    ctx.primary_key().field_upper,
                    ctx.primary_key().field_lower
                );
                println!("  Entity:      {}", ctx.entity_class());
            }
            Err(GeneratorError::ConfigError(msg)) => println!("  {}", msg),
            Err(e) => return Err(e.into()),
        }
        println!();
    }

    Ok(())
}
