//! Schema sources: where table metadata comes from
//!
//! The generator needs one question answered per table: which column is the
//! primary key and what type it has. Generators that emit column-aware files
//! additionally ask for the column list through the same connector.

mod ddl;
#[cfg(feature = "mysql")]
mod mysql;

pub use ddl::DdlConnector;
#[cfg(feature = "mysql")]
pub use mysql::MySqlConnector;

use tracing::{info, warn};

use crate::codegen::{JavaType, TypeResolver};
use crate::config::GeneratorConfig;
use crate::error::{ConnectorError, GeneratorError, Result};
use crate::parser::{ColumnMetadata, TableMetadata};

/// Primary key metadata for one table
///
/// For a composite key this describes the first key column; the full key is
/// carried by the `is_primary_key` flags of [`SchemaConnector::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyInfo {
    /// Key column name; empty when the table has no primary key
    pub column: String,
    /// Declared SQL type of the key column
    pub sql_type: String,
    /// Java type the key maps to
    pub java_type: JavaType,
}

impl PrimaryKeyInfo {
    /// Key info for a table that exists but has no primary key
    pub fn missing() -> Self {
        Self {
            column: String::new(),
            sql_type: String::new(),
            java_type: JavaType::String,
        }
    }

    /// Whether a usable key column was reported
    pub fn is_present(&self) -> bool {
        !self.column.trim().is_empty()
    }
}

/// Read-only access to table metadata
pub trait SchemaConnector {
    /// Resolve the primary key of `table`
    ///
    /// Fails with [`ConnectorError::TableNotFound`] when the table does not
    /// exist. A table without a primary key is reported with an empty column.
    fn primary_key(&self, table: &str) -> std::result::Result<PrimaryKeyInfo, ConnectorError>;

    /// List the columns of `table` in declaration order
    fn columns(&self, table: &str) -> std::result::Result<Vec<ColumnMetadata>, ConnectorError>;
}

/// Derive primary key info from a table's metadata
pub(crate) fn primary_key_of(table: &TableMetadata) -> PrimaryKeyInfo {
    let Some(pk) = &table.primary_key else {
        return PrimaryKeyInfo::missing();
    };
    if pk.is_composite() {
        info!(
            "Table `{}` has a composite primary key {:?}, key methods take every key column",
            table.name, pk.columns
        );
    }
    let Some(column) = pk.columns.first().and_then(|name| table.get_column(name)) else {
        return PrimaryKeyInfo::missing();
    };
    PrimaryKeyInfo {
        column: column.name.clone(),
        sql_type: column.data_type.clone(),
        java_type: TypeResolver::resolve(&column.data_type, column.is_unsigned),
    }
}

/// Open the schema source named by the configuration
///
/// A database URL wins over a schema file.
pub fn open_connector(config: &GeneratorConfig) -> Result<Box<dyn SchemaConnector>> {
    if let Some(url) = config.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if let Some(path) = &config.schema_file {
            warn!(
                "Both database_url and schema_file are set, ignoring schema file {:?}",
                path
            );
        }
        return open_database(url);
    }

    if let Some(path) = &config.schema_file {
        info!("Reading schema: {:?}", path);
        return Ok(Box::new(DdlConnector::from_file(path)?));
    }

    Err(GeneratorError::ConfigError(
        "no schema source configured, set schema_file or database_url".into(),
    ))
}

#[cfg(feature = "mysql")]
fn open_database(url: &str) -> Result<Box<dyn SchemaConnector>> {
    info!("Connecting to schema database");
    let connector = MySqlConnector::connect(url).map_err(|e| {
        GeneratorError::ConfigError(format!("cannot open database_url: {}", e))
    })?;
    Ok(Box::new(connector))
}

#[cfg(not(feature = "mysql"))]
fn open_database(_url: &str) -> Result<Box<dyn SchemaConnector>> {
    Err(GeneratorError::ConfigError(
        "database_url is set but layergen was built without the `mysql` feature".into(),
    ))
}
