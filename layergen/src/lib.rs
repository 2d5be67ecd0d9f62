//! layergen: scaffold MyBatis-style application layers from table metadata
//!
//! For each configured table, layergen looks up the primary key in a schema
//! source, derives class names, and renders one file per layer:
//!
//! - `entity`: data object (`<package>.entity.<Class>`, or `.domain` with `domain = true`)
//! - `mapper_interface`: data access interface (`<Class>Mapper`)
//! - `mapper_binding`: MyBatis XML for MySQL (`<Class>Mapper.xml`)
//! - `service_interface` / `service_binding`: service and its implementation
//!
//! `oracle_mapper` (Oracle-dialect XML) is never part of the regular sweep;
//! it is rendered through [`generate_oracle`].
//!
//! Generation stops at the first problem: an unknown table, a table without
//! a primary key, a bad layer list, or a rendering failure. Output is
//! deterministic, so the recovery is always to fix the input and rerun.
//!
//! # Configuration file
//!
//! ```toml
//! package_name = "com.acme.shop"
//! table_prefix = "t_"
//! tables = "t_user,t_order"
//! layers = "entity,mapper_interface,mapper_binding"
//! schema_file = "schema.sql"
//! output_dir = "./generated"
//! ```
//!
//! # Programmatic Configuration
//!
//! ```rust,ignore
//! layergen::GeneratorBuilder::new("com.acme.shop")
//!     .schema_file("schema.sql")
//!     .tables(&["t_user", "t_order"])
//!     .table_prefix("t_")
//!     .output_dir("src/main/java")
//!     .generate()
//!     .expect("scaffolding failed");
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! layergen --config layergen.toml generate
//! ```

pub mod codegen;
pub mod config;
pub mod connector;
pub mod error;
pub mod parser;

use std::path::Path;

use tracing::info;

pub use codegen::{GenerationReport, LayerKind, Orchestrator};
pub use config::GeneratorConfig;
pub use connector::SchemaConnector;
pub use error::{ConnectorError, GeneratorError, Result, SchemaViolation};

use codegen::{DryRunWriter, FsWriter, OutputWriter};

/// Main entry point: run the per-table sweep
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    execute(config, None)
}

/// Render only the Oracle mapper binding for every configured table
pub fn generate_oracle(config: &GeneratorConfig) -> Result<GenerationReport> {
    execute(config, Some(LayerKind::OracleMapper))
}

fn execute(config: &GeneratorConfig, layer: Option<LayerKind>) -> Result<GenerationReport> {
    // Configuration problems surface before the schema source is opened
    config.validate()?;
    let connector = connector::open_connector(config)?;
    let orchestrator = Orchestrator::new(config, connector.as_ref());

    let mut fs_writer;
    let mut dry_run_writer;
    let writer: &mut dyn OutputWriter = if config.dry_run {
        dry_run_writer = DryRunWriter::new(&config.output_dir);
        &mut dry_run_writer
    } else {
        info!("Writing into {:?}", config.output_dir);
        fs_writer = FsWriter::new(&config.output_dir);
        &mut fs_writer
    };

    let report = match layer {
        Some(layer) => orchestrator.run_layer(layer, writer)?,
        None => orchestrator.run(writer)?,
    };

    info!("Generation complete");
    Ok(report)
}

/// Builder pattern for configuring a run in code
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Create a new builder for the given base package
    pub fn new(package_name: &str) -> Self {
        Self {
            config: GeneratorConfig {
                package_name: package_name.to_string(),
                ..Default::default()
            },
        }
    }

    /// Read table metadata from a DDL file
    pub fn schema_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.schema_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read table metadata from a live database
    pub fn database_url(mut self, url: &str) -> Self {
        self.config.database_url = Some(url.to_string());
        self
    }

    /// Set the tables to scaffold, in order
    pub fn tables(mut self, tables: &[&str]) -> Self {
        self.config.tables = tables.join(",");
        self
    }

    /// Set the layers to render
    pub fn layers(mut self, layers: &[LayerKind]) -> Self {
        self.config.layers = layers
            .iter()
            .map(LayerKind::id)
            .collect::<Vec<_>>()
            .join(",");
        self
    }

    /// Set the prefix stripped from table names
    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.config.table_prefix = prefix.to_string();
        self
    }

    /// Set the database schema qualifier
    pub fn schema_name(mut self, schema: &str) -> Self {
        self.config.schema_name = Some(schema.to_string());
        self
    }

    /// Put data objects in the `domain` package
    pub fn domain(mut self, domain: bool) -> Self {
        self.config.domain = domain;
        self
    }

    /// Set the output root directory
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the per-table sweep
    pub fn generate(self) -> Result<GenerationReport> {
        generate(&self.config)
    }

    /// Render the Oracle mapper bindings
    pub fn generate_oracle(self) -> Result<GenerationReport> {
        generate_oracle(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_config() {
        let builder = GeneratorBuilder::new("com.acme")
            .tables(&["t_user", "t_order"])
            .layers(&[LayerKind::Entity, LayerKind::MapperBinding])
            .table_prefix("t_")
            .schema_name("SHOP")
            .domain(true)
            .dry_run();
        let config = builder.config();
        assert_eq!(config.tables, "t_user,t_order");
        assert_eq!(config.layers, "entity,mapper_binding");
        assert_eq!(config.table_prefix, "t_");
        assert_eq!(config.schema_name.as_deref(), Some("SHOP"));
        assert!(config.domain);
        assert!(config.dry_run);
    }

    #[test]
    fn test_empty_table_list_fails_before_opening_schema() {
        // The schema file does not exist; validation must fail first
        let err = GeneratorBuilder::new("com.acme")
            .schema_file("/nonexistent/schema.sql")
            .generate()
            .unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }
}
