//! Generation orchestrator: table discovery, validation and layer dispatch

use std::path::PathBuf;

use tracing::{debug, info};

use super::catalog::{parse_layer_list, LayerKind};
use super::context::ContextBuilder;
use super::generator::{LayerBindings, LayerGenerator};
use super::writer::OutputWriter;
use crate::config::GeneratorConfig;
use crate::connector::{PrimaryKeyInfo, SchemaConnector};
use crate::error::{ConnectorError, GeneratorError, Result, SchemaViolation};

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Tables processed, in order
    pub tables: Vec<String>,
    /// Files written, in order
    pub files: Vec<PathBuf>,
}

/// Drives generation table by table
///
/// Tables are processed in configured order and all layers of one table are
/// written before the next table starts. The first failure ends the run.
pub struct Orchestrator<'a> {
    config: &'a GeneratorConfig,
    connector: &'a dyn SchemaConnector,
    bindings: LayerBindings,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator using the built-in generators
    pub fn new(config: &'a GeneratorConfig, connector: &'a dyn SchemaConnector) -> Self {
        Self {
            config,
            connector,
            bindings: LayerBindings::standard(),
        }
    }

    /// Replace the layer bindings
    pub fn with_bindings(mut self, bindings: LayerBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Render every configured sweep layer for every configured table
    pub fn run(&self, writer: &mut dyn OutputWriter) -> Result<GenerationReport> {
        let tables = self.tables()?;

        let layers = parse_layer_list(&self.config.layers)?;
        let generators = self.resolve(&layers)?;
        info!(
            "Generating {} layers for {} tables: {}",
            layers.len(),
            tables.len(),
            layers.iter().map(LayerKind::id).collect::<Vec<_>>().join(", ")
        );

        self.sweep(&tables, &generators, writer)
    }

    /// Render a single layer for every configured table
    ///
    /// This is the only way the excluded layer gets rendered.
    pub fn run_layer(&self, layer: LayerKind, writer: &mut dyn OutputWriter) -> Result<GenerationReport> {
        let tables = self.tables()?;
        let generators = self.resolve(&[layer])?;
        info!("Generating layer {} for {} tables", layer, tables.len());

        self.sweep(&tables, &generators, writer)
    }

    fn tables(&self) -> Result<Vec<String>> {
        let tables = self.config.table_list();
        if tables.is_empty() {
            return Err(GeneratorError::ConfigError(
                "table list is empty, nothing to generate".into(),
            ));
        }
        Ok(tables)
    }

    fn resolve(&self, layers: &[LayerKind]) -> Result<Vec<(LayerKind, &dyn LayerGenerator)>> {
        layers
            .iter()
            .map(|&kind| Ok((kind, self.bindings.resolve(kind)?)))
            .collect()
    }

    fn sweep(
        &self,
        tables: &[String],
        generators: &[(LayerKind, &dyn LayerGenerator)],
        writer: &mut dyn OutputWriter,
    ) -> Result<GenerationReport> {
        let builder = ContextBuilder::new(self.config, self.connector);
        let mut report = GenerationReport::default();

        for table in tables {
            info!("Processing table {}", table);
            let primary_key = self.primary_key(table)?;
            let ctx = builder.build(table, &primary_key)?;

            for &(kind, generator) in generators {
                let file = generator.render(&ctx, kind).map_err(|e| match e {
                    e @ GeneratorError::Rendering { .. } => e,
                    other => GeneratorError::rendering(table, kind, other.to_string()),
                })?;
                let path = writer.write(&file).map_err(|source| GeneratorError::Output {
                    table: table.clone(),
                    layer: kind,
                    path: file.path.clone(),
                    source,
                })?;
                debug!("{} / {} -> {}", table, kind, path.display());
                report.files.push(path);
            }

            report.tables.push(table.clone());
        }

        info!(
            "Generated {} files for {} tables",
            report.files.len(),
            report.tables.len()
        );
        Ok(report)
    }

    /// Resolve and validate the primary key of `table`
    fn primary_key(&self, table: &str) -> Result<PrimaryKeyInfo> {
        let primary_key = self.connector.primary_key(table).map_err(|e| match e {
            ConnectorError::TableNotFound(_) => GeneratorError::SchemaValidation {
                table: table.to_string(),
                violation: SchemaViolation::TableNotFound,
            },
            source => GeneratorError::Connector {
                table: table.to_string(),
                source,
            },
        })?;

        if !primary_key.is_present() {
            return Err(GeneratorError::SchemaValidation {
                table: table.to_string(),
                violation: SchemaViolation::MissingPrimaryKey,
            });
        }

        debug!(
            "Table {} primary key {} ({})",
            table, primary_key.column, primary_key.sql_type
        );
        Ok(primary_key)
    }
}
