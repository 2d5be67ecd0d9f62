//! Schema source backed by DDL (`CREATE TABLE` statements)

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::{primary_key_of, PrimaryKeyInfo, SchemaConnector};
use crate::error::{ConnectorError, GeneratorError, Result};
use crate::parser::{self, ColumnMetadata, TableMetadata};

/// Answers metadata queries from a parsed DDL snapshot
#[derive(Debug, Clone, Default)]
pub struct DdlConnector {
    tables: BTreeMap<String, TableMetadata>,
}

impl DdlConnector {
    /// Parse a schema file
    pub fn from_file(path: &Path) -> Result<Self> {
        let sql = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::ConfigError(format!(
                "cannot read schema_file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_sql(&sql).map_err(|e| match e {
            GeneratorError::ParseError(msg) => {
                GeneratorError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse schema DDL from a string
    pub fn from_sql(sql: &str) -> Result<Self> {
        let tables = parser::parse_schema(sql)?;
        debug!("Schema defines {} tables", tables.len());
        Ok(Self::from_tables(tables))
    }

    /// Build from already-parsed tables
    pub fn from_tables(tables: Vec<TableMetadata>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Names of every table in the snapshot, sorted
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    fn table(&self, name: &str) -> std::result::Result<&TableMetadata, ConnectorError> {
        self.tables
            .get(name)
            .ok_or_else(|| ConnectorError::TableNotFound(name.to_string()))
    }
}

impl SchemaConnector for DdlConnector {
    fn primary_key(&self, table: &str) -> std::result::Result<PrimaryKeyInfo, ConnectorError> {
        self.table(table).map(primary_key_of)
    }

    fn columns(&self, table: &str) -> std::result::Result<Vec<ColumnMetadata>, ConnectorError> {
        Ok(self.table(table)?.columns.clone())
    }
}
