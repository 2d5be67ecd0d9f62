//! Per-table rendering context

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use super::naming::{ClassNames, NamingResolver, PrimaryKeyNames};
use super::type_resolver::JavaType;
use crate::config::GeneratorConfig;
use crate::connector::{PrimaryKeyInfo, SchemaConnector};
use crate::error::Result;

/// Attribute key for the database schema qualifier
pub const ATTR_SCHEMA_NAME: &str = "schema_name";

/// Attribute key for the domain flag
pub const ATTR_DOMAIN: &str = "domain";

/// Everything a layer generator may read while rendering one table
///
/// Built once per table by [`ContextBuilder`] and read-only afterwards.
pub struct RenderingContext<'a> {
    table_name: String,
    class_names: ClassNames,
    package_name: String,
    primary_key: PrimaryKeyNames,
    primary_key_type: JavaType,
    primary_key_sql_type: String,
    connector: &'a dyn SchemaConnector,
    config: &'a GeneratorConfig,
    attributes: BTreeMap<String, Value>,
}

impl<'a> RenderingContext<'a> {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// PascalCase class name, prefix stripped
    pub fn upper_class_name(&self) -> &str {
        &self.class_names.upper
    }

    /// camelCase class name, prefix stripped
    pub fn lower_class_name(&self) -> &str {
        &self.class_names.lower
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn primary_key(&self) -> &PrimaryKeyNames {
        &self.primary_key
    }

    pub fn primary_key_type(&self) -> JavaType {
        self.primary_key_type
    }

    pub fn primary_key_sql_type(&self) -> &str {
        &self.primary_key_sql_type
    }

    pub fn connector(&self) -> &'a dyn SchemaConnector {
        self.connector
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Supplementary value attached before rendering
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Supplementary string value; blank strings count as absent
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Supplementary boolean value, `false` when absent
    pub fn attribute_flag(&self, key: &str) -> bool {
        self.attribute(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Package segment holding data objects
    pub fn entity_segment(&self) -> &'static str {
        if self.attribute_flag(ATTR_DOMAIN) {
            "domain"
        } else {
            "entity"
        }
    }

    /// Fully qualified package for a sub-package (`mapper` -> `com.acme.mapper`)
    pub fn sub_package(&self, segment: &str) -> String {
        format!("{}.{}", self.package_name, segment)
    }

    /// Directory of a sub-package relative to the output root
    pub fn sub_package_path(&self, segment: &str) -> PathBuf {
        self.sub_package(segment).split('.').collect()
    }

    /// Fully qualified entity class name
    pub fn entity_class(&self) -> String {
        format!(
            "{}.{}",
            self.sub_package(self.entity_segment()),
            self.class_names.upper
        )
    }
}

/// Assembles a [`RenderingContext`] for one table
pub struct ContextBuilder<'a> {
    config: &'a GeneratorConfig,
    connector: &'a dyn SchemaConnector,
    naming: NamingResolver,
    attributes: BTreeMap<String, Value>,
}

impl<'a> ContextBuilder<'a> {
    /// Start a builder preloaded with the standard attributes
    pub fn new(config: &'a GeneratorConfig, connector: &'a dyn SchemaConnector) -> Self {
        let mut attributes = BTreeMap::new();
        if let Some(schema) = config.schema_name.as_deref().map(str::trim) {
            if !schema.is_empty() {
                attributes.insert(ATTR_SCHEMA_NAME.to_string(), Value::from(schema));
            }
        }
        attributes.insert(ATTR_DOMAIN.to_string(), Value::Bool(config.domain));

        Self {
            config,
            connector,
            naming: NamingResolver::new(config.table_prefix.clone()),
            attributes,
        }
    }

    /// Attach an extra attribute, replacing any previous value for `key`
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Build the context for `table` with its validated primary key
    pub fn build(&self, table: &str, primary_key: &PrimaryKeyInfo) -> Result<RenderingContext<'a>> {
        let class_names = self.naming.resolve(table)?;
        Ok(RenderingContext {
            table_name: table.to_string(),
            class_names,
            package_name: self.config.package_name.trim().to_string(),
            primary_key: self.naming.primary_key_names(&primary_key.column),
            primary_key_type: primary_key.java_type,
            primary_key_sql_type: primary_key.sql_type.clone(),
            connector: self.connector,
            config: self.config,
            attributes: self.attributes.clone(),
        })
    }
}
