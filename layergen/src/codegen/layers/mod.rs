//! Built-in layer generators: a MyBatis-style Java stack

mod entity;
mod mapper;
mod service;

pub use entity::EntityGenerator;
pub use mapper::{MapperBindingGenerator, MapperInterfaceGenerator, OracleMapperGenerator};
pub use service::{ServiceBindingGenerator, ServiceInterfaceGenerator};

use std::path::PathBuf;

use super::catalog::LayerKind;
use super::context::RenderingContext;
use super::naming::{to_accessor_suffix, to_field_name};
use super::type_resolver::{JavaType, TypeResolver};
use crate::error::{GeneratorError, Result};
use crate::parser::ColumnMetadata;

/// Reject a call for a layer this generator does not render
fn expect_layer(ctx: &RenderingContext<'_>, expected: LayerKind, actual: LayerKind) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GeneratorError::rendering(
            ctx.table_name(),
            actual,
            format!("generator for `{}` cannot render this layer", expected),
        ))
    }
}

/// Column listing for the table, with the failure attributed to `layer`
fn load_columns(ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<Vec<ColumnMetadata>> {
    let columns = ctx.connector().columns(ctx.table_name()).map_err(|e| {
        GeneratorError::rendering(ctx.table_name(), layer, format!("cannot list columns: {}", e))
    })?;
    if columns.is_empty() {
        return Err(GeneratorError::rendering(
            ctx.table_name(),
            layer,
            "schema source reported no columns",
        ));
    }
    Ok(columns)
}

/// One primary key column as it appears in generated code
struct KeyField<'c> {
    column: &'c ColumnMetadata,
    /// camelCase property / parameter name
    field: String,
    java_type: JavaType,
}

/// Every primary key column of the table, in declaration order
///
/// Columns flagged by the schema source win; otherwise the context key column
/// is looked up by name.
fn key_fields<'c>(
    ctx: &RenderingContext<'_>,
    layer: LayerKind,
    columns: &'c [ColumnMetadata],
) -> Result<Vec<KeyField<'c>>> {
    let mut keys: Vec<&ColumnMetadata> = columns.iter().filter(|c| c.is_primary_key).collect();
    if keys.is_empty() {
        keys = columns
            .iter()
            .filter(|c| c.name == ctx.primary_key().column_raw)
            .collect();
    }
    if keys.is_empty() {
        return Err(GeneratorError::rendering(
            ctx.table_name(),
            layer,
            format!(
                "primary key column `{}` is missing from the column listing",
                ctx.primary_key().column_raw
            ),
        ));
    }

    Ok(keys
        .into_iter()
        .map(|column| KeyField {
            column,
            field: to_field_name(&column.name),
            java_type: TypeResolver::resolve(&column.data_type, column.is_unsigned),
        })
        .collect())
}

fn is_key_column(keys: &[KeyField<'_>], column: &ColumnMetadata) -> bool {
    keys.iter().any(|k| k.column.name == column.name)
}

/// Whether the table has columns besides the key, i.e. supports updates
fn has_updatable_columns(keys: &[KeyField<'_>], columns: &[ColumnMetadata]) -> bool {
    columns.iter().any(|c| !is_key_column(keys, c))
}

/// Java parameter list taking the key (`Long id`)
///
/// Composite keys become one `@Param`-annotated parameter per column.
fn key_params(keys: &[KeyField<'_>]) -> String {
    match keys {
        [key] => format!("{} {}", key.java_type, key.field),
        _ => keys
            .iter()
            .map(|k| format!("@Param(\"{}\") {} {}", k.field, k.java_type, k.field))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Plain Java parameter list taking the key (`String orderNo, String sku`)
fn plain_key_params(keys: &[KeyField<'_>]) -> String {
    keys.iter()
        .map(|k| format!("{} {}", k.java_type, k.field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Call arguments passing the key on (`orderNo, sku`)
fn key_args(keys: &[KeyField<'_>]) -> String {
    keys.iter()
        .map(|k| k.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Method-name suffix naming the key (`Id`, `OrderNoAndSku`)
fn key_suffix(keys: &[KeyField<'_>]) -> String {
    keys.iter()
        .map(|k| to_accessor_suffix(&k.column.name))
        .collect::<Vec<_>>()
        .join("And")
}

/// Imports needed by the key parameters
fn key_imports(keys: &[KeyField<'_>]) -> Vec<&'static str> {
    keys.iter().filter_map(|k| k.java_type.import()).collect()
}

/// Escape text for a `/** ... */` block
fn doc_text(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

/// Path of a Java source file in a sub-package
fn java_path(ctx: &RenderingContext<'_>, segment: &str, class_name: &str) -> PathBuf {
    ctx.sub_package_path(segment)
        .join(format!("{}.java", class_name))
}

/// Mapper interface name (`Account` -> `AccountMapper`)
fn mapper_name(ctx: &RenderingContext<'_>) -> String {
    format!("{}Mapper", ctx.upper_class_name())
}

/// Service interface name (`Account` -> `AccountService`)
fn service_name(ctx: &RenderingContext<'_>) -> String {
    format!("{}Service", ctx.upper_class_name())
}

/// Header comment shared by generated Java sources
fn java_header(ctx: &RenderingContext<'_>) -> String {
    format!(
        "// Generated by layergen from table `{}`. Regenerating overwrites this file.\n",
        ctx.table_name()
    )
}
