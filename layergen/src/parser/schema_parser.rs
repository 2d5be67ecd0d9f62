//! DDL parser using sqlparser-rs

use sqlparser::ast::{
    ColumnOption, Expr, Ident, IndexColumn, ObjectName, PrimaryKeyConstraint, Statement,
    TableConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::Result;

/// Parse a SQL schema string into table metadata
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            tables.push(extract_table_metadata(&create_table));
        }
    }

    Ok(tables)
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(create: &sqlparser::ast::CreateTable) -> TableMetadata {
    let name = extract_table_name(&create.name);

    let mut columns = Vec::new();
    let mut primary_key = None;

    for col_def in &create.columns {
        let column = extract_column_metadata(col_def);
        if column.is_primary_key {
            primary_key = Some(PrimaryKey {
                columns: vec![column.name.clone()],
            });
        }
        columns.push(column);
    }

    // Table-level PRIMARY KEY (...) overrides a column-level one
    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            let pk_names: Vec<String> = pk_cols
                .iter()
                .map(extract_ident_from_index_column)
                .collect();
            for col in columns.iter_mut() {
                col.is_primary_key = pk_names.contains(&col.name);
                if col.is_primary_key {
                    col.nullable = false;
                }
            }
            primary_key = Some(PrimaryKey { columns: pk_names });
        }
    }

    TableMetadata {
        name,
        columns,
        primary_key,
    }
}

/// Extract column metadata from a column definition
fn extract_column_metadata(col_def: &sqlparser::ast::ColumnDef) -> ColumnMetadata {
    let name = extract_ident(&col_def.name);
    let data_type = format!("{}", col_def.data_type);
    let is_unsigned = data_type.to_uppercase().contains("UNSIGNED");

    let mut nullable = true;
    let mut is_auto_increment = false;
    let mut is_primary_key = false;
    let mut comment = None;

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                nullable = false;
            }
            ColumnOption::Null => {
                nullable = true;
            }
            ColumnOption::PrimaryKey(_) => {
                is_primary_key = true;
                nullable = false;
            }
            ColumnOption::Comment(c) => {
                comment = Some(c.clone());
            }
            ColumnOption::DialectSpecific(tokens) => {
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") {
                    is_auto_increment = true;
                }
            }
            _ => {}
        }
    }

    ColumnMetadata {
        name,
        data_type,
        nullable,
        is_auto_increment,
        is_unsigned,
        is_primary_key,
        comment,
    }
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a string from an Ident, removing backticks if present
fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
