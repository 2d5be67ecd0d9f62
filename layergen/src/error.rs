//! Error types for layergen

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::LayerKind;

/// Result type alias for layergen operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schema validation failed for table `{table}`: {violation}")]
    SchemaValidation {
        table: String,
        violation: SchemaViolation,
    },

    #[error("Schema source failed while resolving table `{table}`: {source}")]
    Connector {
        table: String,
        #[source]
        source: ConnectorError,
    },

    #[error("Failed to render layer `{layer}` for table `{table}`: {message}")]
    Rendering {
        table: String,
        layer: LayerKind,
        message: String,
    },

    #[error("Failed to write layer `{layer}` for table `{table}` to {}: {source}", .path.display())]
    Output {
        table: String,
        layer: LayerKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GeneratorError {
    /// Shorthand for a rendering failure
    pub fn rendering(table: &str, layer: LayerKind, message: impl Into<String>) -> Self {
        GeneratorError::Rendering {
            table: table.to_string(),
            layer,
            message: message.into(),
        }
    }
}

/// Why a table cannot be scaffolded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The schema source has no such table
    TableNotFound,
    /// The table exists but has no primary key column
    MissingPrimaryKey,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::TableNotFound => f.write_str(
                "table does not exist in the schema source, check the configured table list",
            ),
            SchemaViolation::MissingPrimaryKey => f.write_str(
                "table has no primary key, generated code requires a single key column",
            ),
        }
    }
}

/// Errors reported by a schema connector
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// The requested table does not exist
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Connection to the schema source failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Metadata query failed
    #[error("Query error: {0}")]
    Query(String),
}

impl From<sqlparser::parser::ParserError> for GeneratorError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        GeneratorError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for GeneratorError {
    fn from(err: config::ConfigError) -> Self {
        GeneratorError::ConfigError(err.to_string())
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::Error> for ConnectorError {
    fn from(err: mysql_async::Error) -> Self {
        ConnectorError::Query(err.to_string())
    }
}
