//! Naming utilities for scaffolding
//!
//! All conversions are pure: the same table name and prefix always produce
//! the same names, so regenerated files are byte-identical.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use crate::error::{GeneratorError, Result};

/// Class-name variants derived from a table name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// PascalCase, prefix stripped (`user_account` with prefix `user_` -> `Account`)
    pub upper: String,
    /// camelCase, prefix stripped (`account`)
    pub lower: String,
}

/// Field-name variants derived from a primary key column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyNames {
    /// PascalCase field name (`user_id` -> `UserId`)
    pub field_upper: String,
    /// camelCase field name (`user_id` -> `userId`)
    pub field_lower: String,
    /// Raw column, upper-cased (`user_id` -> `USER_ID`)
    pub column_upper: String,
    /// Raw column as reported by the schema source
    pub column_raw: String,
}

/// Derives class and field names from raw table and column names
#[derive(Debug, Clone, Default)]
pub struct NamingResolver {
    prefix: String,
}

impl NamingResolver {
    /// Create a resolver that strips `prefix` from table names
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the configured prefix (case-sensitive, leading match only)
    pub fn strip_prefix<'t>(&self, table_name: &'t str) -> &'t str {
        if self.prefix.is_empty() {
            return table_name;
        }
        table_name.strip_prefix(self.prefix.as_str()).unwrap_or(table_name)
    }

    /// Derive the class-name variants for a table
    ///
    /// Fails on an empty table name and on a name that is nothing but the
    /// prefix, since neither yields a usable class name.
    pub fn resolve(&self, table_name: &str) -> Result<ClassNames> {
        if table_name.trim().is_empty() {
            return Err(GeneratorError::ConfigError(
                "table name is empty, cannot derive a class name".into(),
            ));
        }

        let stripped = self.strip_prefix(table_name);
        let upper = stripped.to_upper_camel_case();
        if upper.is_empty() {
            return Err(GeneratorError::ConfigError(format!(
                "table name `{}` is empty after stripping prefix `{}`",
                table_name, self.prefix
            )));
        }

        Ok(ClassNames {
            lower: stripped.to_lower_camel_case(),
            upper,
        })
    }

    /// Derive the field-name variants for a primary key column
    pub fn primary_key_names(&self, column: &str) -> PrimaryKeyNames {
        PrimaryKeyNames {
            field_upper: column.to_upper_camel_case(),
            field_lower: to_field_name(column),
            column_upper: column.to_uppercase(),
            column_raw: column.to_string(),
        }
    }
}

/// Convert a column name to a Java field name (camelCase)
pub fn to_field_name(column_name: &str) -> String {
    column_name.to_lower_camel_case()
}

/// Convert a column name to an accessor suffix (`created_at` -> `CreatedAt`)
pub fn to_accessor_suffix(column_name: &str) -> String {
    column_name.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_prefix() {
        let resolver = NamingResolver::new("user_");
        let names = resolver.resolve("user_account").unwrap();
        assert_eq!(names.upper, "Account");
        assert_eq!(names.lower, "account");
    }

    #[test]
    fn test_resolve_without_prefix() {
        let resolver = NamingResolver::default();
        let names = resolver.resolve("order_items").unwrap();
        assert_eq!(names.upper, "OrderItems");
        assert_eq!(names.lower, "orderItems");
    }

    #[test]
    fn test_prefix_is_case_sensitive_and_leading_only() {
        let resolver = NamingResolver::new("t_");
        assert_eq!(resolver.resolve("T_ORDER").unwrap().upper, "TOrder");
        assert_eq!(resolver.resolve("order_t_item").unwrap().upper, "OrderTItem");
        assert_eq!(resolver.resolve("t_order").unwrap().upper, "Order");
    }

    #[test]
    fn test_upper_case_table_names() {
        let resolver = NamingResolver::new("T_");
        let names = resolver.resolve("T_USER_ACCOUNT").unwrap();
        assert_eq!(names.upper, "UserAccount");
        assert_eq!(names.lower, "userAccount");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = NamingResolver::new("sys_");
        for table in ["sys_user", "sys_role_menu", "audit_log"] {
            assert_eq!(
                resolver.resolve(table).unwrap(),
                resolver.resolve(table).unwrap()
            );
        }
        assert_eq!(
            resolver.primary_key_names("role_id"),
            resolver.primary_key_names("role_id")
        );
    }

    #[test]
    fn test_empty_and_prefix_only_names_fail() {
        let resolver = NamingResolver::new("user_");
        assert!(resolver.resolve("").is_err());
        assert!(resolver.resolve("  ").is_err());
        let err = resolver.resolve("user_").unwrap_err();
        assert!(err.to_string().contains("user_"));
    }

    #[test]
    fn test_primary_key_names() {
        let resolver = NamingResolver::default();
        let names = resolver.primary_key_names("id");
        assert_eq!(names.field_upper, "Id");
        assert_eq!(names.field_lower, "id");
        assert_eq!(names.column_upper, "ID");
        assert_eq!(names.column_raw, "id");

        let names = resolver.primary_key_names("order_no");
        assert_eq!(names.field_upper, "OrderNo");
        assert_eq!(names.field_lower, "orderNo");
        assert_eq!(names.column_upper, "ORDER_NO");
    }

    #[test]
    fn test_field_helpers() {
        assert_eq!(to_field_name("created_at"), "createdAt");
        assert_eq!(to_accessor_suffix("created_at"), "CreatedAt");
    }
}
