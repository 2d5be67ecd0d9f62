//! SQL to Java type mapping

use std::fmt;

/// Represents a Java type used in generated sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    String,
    Bytes,
    Date,
}

impl JavaType {
    /// Simple name as written in a declaration
    pub fn simple_name(&self) -> &'static str {
        match self {
            JavaType::Boolean => "Boolean",
            JavaType::Byte => "Byte",
            JavaType::Short => "Short",
            JavaType::Integer => "Integer",
            JavaType::Long => "Long",
            JavaType::BigInteger => "BigInteger",
            JavaType::Float => "Float",
            JavaType::Double => "Double",
            JavaType::BigDecimal => "BigDecimal",
            JavaType::String => "String",
            JavaType::Bytes => "byte[]",
            JavaType::Date => "Date",
        }
    }

    /// Fully qualified name, used for MyBatis `parameterType`/`resultType`
    pub fn qualified_name(&self) -> &'static str {
        match self {
            JavaType::Boolean => "java.lang.Boolean",
            JavaType::Byte => "java.lang.Byte",
            JavaType::Short => "java.lang.Short",
            JavaType::Integer => "java.lang.Integer",
            JavaType::Long => "java.lang.Long",
            JavaType::BigInteger => "java.math.BigInteger",
            JavaType::Float => "java.lang.Float",
            JavaType::Double => "java.lang.Double",
            JavaType::BigDecimal => "java.math.BigDecimal",
            JavaType::String => "java.lang.String",
            JavaType::Bytes => "byte[]",
            JavaType::Date => "java.util.Date",
        }
    }

    /// Import line needed outside `java.lang`, if any
    pub fn import(&self) -> Option<&'static str> {
        match self {
            JavaType::BigInteger | JavaType::BigDecimal | JavaType::Date => {
                Some(self.qualified_name())
            }
            _ => None,
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}

/// Resolve declared SQL types to Java and JDBC types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the Java type for a declared column type
    pub fn resolve(data_type: &str, is_unsigned: bool) -> JavaType {
        let lower = data_type.trim().to_lowercase();

        if Self::is_boolean_type(&lower) {
            return JavaType::Boolean;
        }

        // Integer types
        if lower.starts_with("tinyint") {
            return if is_unsigned {
                JavaType::Short
            } else {
                JavaType::Byte
            };
        }
        if lower.starts_with("smallint") {
            return if is_unsigned {
                JavaType::Integer
            } else {
                JavaType::Short
            };
        }
        if lower.starts_with("mediumint") || lower.starts_with("int") {
            return if is_unsigned {
                JavaType::Long
            } else {
                JavaType::Integer
            };
        }
        if lower.starts_with("bigint") {
            return if is_unsigned {
                JavaType::BigInteger
            } else {
                JavaType::Long
            };
        }

        // Float types
        if lower.starts_with("float") {
            return JavaType::Float;
        }
        if lower.starts_with("double") || lower.starts_with("real") {
            return JavaType::Double;
        }

        // Decimal types (NUMBER is the Oracle spelling)
        if lower.starts_with("decimal") || lower.starts_with("numeric") || lower.starts_with("number") {
            return JavaType::BigDecimal;
        }

        // Binary types
        if lower.starts_with("binary")
            || lower.starts_with("varbinary")
            || lower.contains("blob")
            || lower.starts_with("raw")
            || lower.starts_with("bit")
        {
            return JavaType::Bytes;
        }

        // Date/time types
        if lower == "date"
            || lower.starts_with("datetime")
            || lower.starts_with("timestamp")
            || lower.starts_with("time")
        {
            return JavaType::Date;
        }

        // Character types and everything else (json, enum, set, ...)
        JavaType::String
    }

    /// MyBatis `jdbcType` for a declared column type
    pub fn jdbc_type(data_type: &str) -> &'static str {
        let lower = data_type.trim().to_lowercase();

        if Self::is_boolean_type(&lower) {
            return "BIT";
        }
        if lower.starts_with("tinyint") {
            return "TINYINT";
        }
        if lower.starts_with("smallint") {
            return "SMALLINT";
        }
        if lower.starts_with("mediumint") || lower.starts_with("int") {
            return "INTEGER";
        }
        if lower.starts_with("bigint") {
            return "BIGINT";
        }
        if lower.starts_with("float") {
            return "REAL";
        }
        if lower.starts_with("double") || lower.starts_with("real") {
            return "DOUBLE";
        }
        if lower.starts_with("decimal") || lower.starts_with("numeric") || lower.starts_with("number") {
            return "DECIMAL";
        }
        if lower.contains("blob") {
            return "BLOB";
        }
        if lower.starts_with("binary") || lower.starts_with("varbinary") || lower.starts_with("raw") || lower.starts_with("bit") {
            return "VARBINARY";
        }
        if lower == "date" {
            return "DATE";
        }
        if lower.starts_with("datetime") || lower.starts_with("timestamp") {
            return "TIMESTAMP";
        }
        if lower.starts_with("time") {
            return "TIME";
        }
        if lower.starts_with("char") || lower.starts_with("nchar") {
            return "CHAR";
        }
        if lower.contains("text") || lower.contains("clob") {
            return "LONGVARCHAR";
        }
        "VARCHAR"
    }

    /// Check if the type represents a boolean
    fn is_boolean_type(lower: &str) -> bool {
        if lower == "bool" || lower == "boolean" {
            return true;
        }

        // TINYINT(1) and BIT(1) are the usual MySQL boolean spellings
        (lower.starts_with("tinyint") || lower.starts_with("bit")) && lower.contains("(1)")
    }
}
