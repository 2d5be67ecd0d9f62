//! Mapper generators - data access interface and its MyBatis XML bindings

use std::collections::BTreeSet;

use tracing::debug;

use super::{
    expect_layer, has_updatable_columns, is_key_column, java_header, java_path, key_fields,
    key_imports, key_params, load_columns, mapper_name, KeyField,
};
use crate::codegen::catalog::LayerKind;
use crate::codegen::context::{RenderingContext, ATTR_SCHEMA_NAME};
use crate::codegen::generator::{LayerGenerator, RenderedFile};
use crate::codegen::naming::to_field_name;
use crate::codegen::type_resolver::TypeResolver;
use crate::error::{GeneratorError, Result};
use crate::parser::ColumnMetadata;

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\" \"http://mybatis.org/dtd/mybatis-3-mapper.dtd\">\n";

const PARAM_IMPORT: &str = "org.apache.ibatis.annotations.Param";

/// Renders `<package>.mapper.<Class>Mapper`
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperInterfaceGenerator;

impl LayerGenerator for MapperInterfaceGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::MapperInterface, layer)?;
        let columns = load_columns(ctx, layer)?;
        let keys = key_fields(ctx, layer, &columns)?;
        let mapper = mapper_name(ctx);
        debug!("Rendering mapper interface {} for {}", mapper, ctx.table_name());

        let entity = ctx.upper_class_name();
        let param = ctx.lower_class_name();
        let key_params = key_params(&keys);

        let entity_class = ctx.entity_class();
        let mut imports: BTreeSet<&str> = BTreeSet::new();
        imports.insert(&entity_class);
        imports.insert("java.util.List");
        imports.extend(key_imports(&keys));
        if keys.len() > 1 {
            imports.insert(PARAM_IMPORT);
        }

        let mut code = java_header(ctx);
        code.push_str(&format!("package {};\n\n", ctx.sub_package("mapper")));
        for import in &imports {
            code.push_str(&format!("import {};\n", import));
        }
        code.push('\n');

        code.push_str(&format!("/**\n * Data access for table `{}`\n */\n", ctx.table_name()));
        code.push_str(&format!("public interface {} {{\n\n", mapper));
        code.push_str(&format!("    int insert({} {});\n\n", entity, param));
        if has_updatable_columns(&keys, &columns) {
            code.push_str(&format!("    int updateByPrimaryKey({} {});\n\n", entity, param));
        }
        code.push_str(&format!("    int deleteByPrimaryKey({});\n\n", key_params));
        code.push_str(&format!("    {} selectByPrimaryKey({});\n\n", entity, key_params));
        code.push_str(&format!("    List<{}> selectAll();\n\n", entity));
        code.push_str("    long countAll();\n");
        code.push_str("}\n");

        Ok(RenderedFile {
            path: java_path(ctx, "mapper", &mapper),
            contents: code,
        })
    }
}

/// Renders `<package>/mapper/<Class>Mapper.xml` for MySQL
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperBindingGenerator;

impl LayerGenerator for MapperBindingGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::MapperBinding, layer)?;
        let columns = load_columns(ctx, layer)?;
        let keys = key_fields(ctx, layer, &columns)?;
        debug!("Rendering MySQL mapper binding for {}", ctx.table_name());

        let dialect = Dialect {
            quote: '`',
            upper_case: false,
            table_ref: quote_ident('`', ctx.table_name()),
            key_sequence: None,
        };

        Ok(RenderedFile {
            path: ctx
                .sub_package_path("mapper")
                .join(format!("{}.xml", mapper_name(ctx))),
            contents: render_binding(ctx, &columns, &keys, &dialect),
        })
    }
}

/// Renders `<package>/mapper/oracle/<Class>Mapper.xml`
///
/// Identifiers are schema-qualified, upper-cased and double-quoted. A single
/// key column is filled from the `SEQ_<TABLE>` sequence. Needs the
/// `schema_name` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleMapperGenerator;

impl LayerGenerator for OracleMapperGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::OracleMapper, layer)?;
        let schema = ctx.attribute_str(ATTR_SCHEMA_NAME).ok_or_else(|| {
            GeneratorError::rendering(
                ctx.table_name(),
                layer,
                "Oracle bindings need a schema qualifier, set schema_name",
            )
        })?;
        let columns = load_columns(ctx, layer)?;
        let keys = key_fields(ctx, layer, &columns)?;
        debug!("Rendering Oracle mapper binding for {}", ctx.table_name());

        let schema = quote_ident('"', &schema.to_uppercase());
        let table = ctx.table_name().to_uppercase();
        let key_sequence = match keys.as_slice() {
            [_] => Some(format!(
                "{}.{}",
                schema,
                quote_ident('"', &format!("SEQ_{}", table))
            )),
            _ => None,
        };
        let dialect = Dialect {
            quote: '"',
            upper_case: true,
            table_ref: format!("{}.{}", schema, quote_ident('"', &table)),
            key_sequence,
        };

        Ok(RenderedFile {
            path: ctx
                .sub_package_path("mapper")
                .join("oracle")
                .join(format!("{}.xml", mapper_name(ctx))),
            contents: render_binding(ctx, &columns, &keys, &dialect),
        })
    }
}

/// Quote an identifier, doubling any embedded quote character
fn quote_ident(quote: char, name: &str) -> String {
    let doubled = format!("{}{}", quote, quote);
    format!("{}{}{}", quote, name.replace(quote, &doubled), quote)
}

/// SQL flavour of a mapper binding
struct Dialect {
    /// Identifier quote character
    quote: char,
    upper_case: bool,
    /// Quoted table reference used in statements
    table_ref: String,
    /// Sequence that supplies new keys; auto-increment is used when `None`
    key_sequence: Option<String>,
}

impl Dialect {
    /// Column name as the database reports it in result sets
    fn label(&self, name: &str) -> String {
        if self.upper_case {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }

    /// Quoted column reference for statements
    fn column(&self, name: &str) -> String {
        quote_ident(self.quote, &self.label(name))
    }

    /// `k1 = #{k1} AND k2 = #{k2}` over every key column
    fn key_condition(&self, keys: &[KeyField<'_>]) -> String {
        keys.iter()
            .map(|k| format!("{} = {}", self.column(&k.column.name), placeholder(k.column)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// `#{field,jdbcType=TYPE}` placeholder for a column
fn placeholder(column: &ColumnMetadata) -> String {
    format!(
        "#{{{},jdbcType={}}}",
        to_field_name(&column.name),
        TypeResolver::jdbc_type(&column.data_type)
    )
}

fn render_binding(
    ctx: &RenderingContext<'_>,
    columns: &[ColumnMetadata],
    keys: &[KeyField<'_>],
    dialect: &Dialect,
) -> String {
    let namespace = format!("{}.{}", ctx.sub_package("mapper"), mapper_name(ctx));
    let entity = ctx.entity_class();
    // Multi-column keys arrive as named @Param values
    let key_parameter_type = match keys {
        [key] => format!(" parameterType=\"{}\"", key.java_type.qualified_name()),
        _ => String::new(),
    };
    let key_condition = dialect.key_condition(keys);
    let table = &dialect.table_ref;

    let mut xml = String::from(XML_PROLOG);
    xml.push_str(&format!("<mapper namespace=\"{}\">\n\n", namespace));

    // Result map
    xml.push_str(&format!("    <resultMap id=\"BaseResultMap\" type=\"{}\">\n", entity));
    for col in columns {
        let tag = if is_key_column(keys, col) { "id" } else { "result" };
        xml.push_str(&format!(
            "        <{} column=\"{}\" property=\"{}\" jdbcType=\"{}\"/>\n",
            tag,
            dialect.label(&col.name),
            to_field_name(&col.name),
            TypeResolver::jdbc_type(&col.data_type)
        ));
    }
    xml.push_str("    </resultMap>\n\n");

    let column_list: Vec<String> = columns.iter().map(|c| dialect.column(&c.name)).collect();
    xml.push_str(&format!(
        "    <sql id=\"Base_Column_List\">\n        {}\n    </sql>\n\n",
        column_list.join(", ")
    ));

    xml.push_str(&format!(
        "    <select id=\"selectByPrimaryKey\"{} resultMap=\"BaseResultMap\">\n\
         \x20       SELECT\n\
         \x20       <include refid=\"Base_Column_List\"/>\n\
         \x20       FROM {}\n\
         \x20       WHERE {}\n\
         \x20   </select>\n\n",
        key_parameter_type, table, key_condition
    ));

    xml.push_str(&format!(
        "    <select id=\"selectAll\" resultMap=\"BaseResultMap\">\n\
         \x20       SELECT\n\
         \x20       <include refid=\"Base_Column_List\"/>\n\
         \x20       FROM {}\n\
         \x20   </select>\n\n",
        table
    ));

    xml.push_str(&format!(
        "    <select id=\"countAll\" resultType=\"java.lang.Long\">\n\
         \x20       SELECT COUNT(*) FROM {}\n\
         \x20   </select>\n\n",
        table
    ));

    // Insert: sequence-backed keys are inserted explicitly, auto-increment keys are skipped
    let insert_columns: Vec<&ColumnMetadata> = columns
        .iter()
        .filter(|c| dialect.key_sequence.is_some() || !c.is_auto_increment)
        .collect();
    match (&dialect.key_sequence, keys) {
        (Some(sequence), [key]) => {
            xml.push_str(&format!(
                "    <insert id=\"insert\" parameterType=\"{}\">\n\
                 \x20       <selectKey keyProperty=\"{}\" resultType=\"{}\" order=\"BEFORE\">\n\
                 \x20           SELECT {}.NEXTVAL FROM DUAL\n\
                 \x20       </selectKey>\n",
                entity,
                key.field,
                key.java_type.qualified_name(),
                sequence
            ));
        }
        (None, [key]) if key.column.is_auto_increment => {
            xml.push_str(&format!(
                "    <insert id=\"insert\" parameterType=\"{}\" useGeneratedKeys=\"true\" keyProperty=\"{}\">\n",
                entity, key.field
            ));
        }
        _ => {
            xml.push_str(&format!("    <insert id=\"insert\" parameterType=\"{}\">\n", entity));
        }
    }
    let names: Vec<String> = insert_columns.iter().map(|c| dialect.column(&c.name)).collect();
    let values: Vec<String> = insert_columns.iter().map(|c| placeholder(c)).collect();
    xml.push_str(&format!(
        "        INSERT INTO {} ({})\n        VALUES ({})\n    </insert>\n\n",
        table,
        names.join(", "),
        values.join(", ")
    ));

    if has_updatable_columns(keys, columns) {
        let assignments: Vec<String> = columns
            .iter()
            .filter(|c| !is_key_column(keys, c))
            .map(|c| format!("{} = {}", dialect.column(&c.name), placeholder(c)))
            .collect();
        xml.push_str(&format!(
            "    <update id=\"updateByPrimaryKey\" parameterType=\"{}\">\n\
             \x20       UPDATE {}\n\
             \x20       SET {}\n\
             \x20       WHERE {}\n\
             \x20   </update>\n\n",
            entity,
            table,
            assignments.join(",\n            "),
            key_condition
        ));
    }

    xml.push_str(&format!(
        "    <delete id=\"deleteByPrimaryKey\"{}>\n\
         \x20       DELETE FROM {}\n\
         \x20       WHERE {}\n\
         \x20   </delete>\n\n",
        key_parameter_type, table, key_condition
    ));

    xml.push_str("</mapper>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::ContextBuilder;
    use crate::codegen::layers::test_support;
    use crate::connector::{DdlConnector, SchemaConnector};
    use std::path::PathBuf;

    #[test]
    fn test_render_mapper_interface() {
        let config = test_support::config();
        let connector = test_support::connector();
        let ctx = test_support::context(&config, &connector);

        let file = MapperInterfaceGenerator
            .render(&ctx, LayerKind::MapperInterface)
            .unwrap();
        assert_eq!(
            file.path,
            PathBuf::from("com/acme/shop/mapper/AccountMapper.java")
        );
        let code = &file.contents;
        assert!(code.contains("package com.acme.shop.mapper;"));
        assert!(code.contains("import com.acme.shop.entity.Account;"));
        assert!(code.contains("public interface AccountMapper"));
        assert!(code.contains("int insert(Account account);"));
        assert!(code.contains("int updateByPrimaryKey(Account account);"));
        assert!(code.contains("Account selectByPrimaryKey(Long id);"));
        assert!(code.contains("int deleteByPrimaryKey(Long id);"));
    }

    #[test]
    fn test_render_mysql_binding() {
        let config = test_support::config();
        let connector = test_support::connector();
        let ctx = test_support::context(&config, &connector);

        let file = MapperBindingGenerator
            .render(&ctx, LayerKind::MapperBinding)
            .unwrap();
        assert_eq!(
            file.path,
            PathBuf::from("com/acme/shop/mapper/AccountMapper.xml")
        );
        let xml = &file.contents;
        assert!(xml.contains("<mapper namespace=\"com.acme.shop.mapper.AccountMapper\">"));
        assert!(xml.contains("<id column=\"id\" property=\"id\" jdbcType=\"BIGINT\"/>"));
        assert!(xml.contains(
            "<result column=\"user_name\" property=\"userName\" jdbcType=\"VARCHAR\"/>"
        ));
        assert!(xml.contains("useGeneratedKeys=\"true\" keyProperty=\"id\""));
        assert!(xml.contains(
            "INSERT INTO `user_account` (`user_name`, `balance`, `created_at`)"
        ));
        assert!(xml.contains("WHERE `id` = #{id,jdbcType=BIGINT}"));
        assert!(xml.contains("`user_name` = #{userName,jdbcType=VARCHAR}"));
        assert!(xml.contains("<select id=\"selectByPrimaryKey\" parameterType=\"java.lang.Long\""));
        assert!(!xml.contains("SHOP."));
    }

    #[test]
    fn test_render_oracle_binding() {
        let config = test_support::config();
        let connector = test_support::connector();
        let ctx = test_support::context(&config, &connector);

        let file = OracleMapperGenerator
            .render(&ctx, LayerKind::OracleMapper)
            .unwrap();
        assert_eq!(
            file.path,
            PathBuf::from("com/acme/shop/mapper/oracle/AccountMapper.xml")
        );
        let xml = &file.contents;
        assert!(xml.contains("FROM \"SHOP\".\"USER_ACCOUNT\""));
        assert!(xml.contains("SELECT \"SHOP\".\"SEQ_USER_ACCOUNT\".NEXTVAL FROM DUAL"));
        assert!(xml.contains(
            "INSERT INTO \"SHOP\".\"USER_ACCOUNT\" (\"ID\", \"USER_NAME\", \"BALANCE\", \"CREATED_AT\")"
        ));
        assert!(xml.contains("WHERE \"ID\" = #{id,jdbcType=BIGINT}"));
        assert!(xml.contains("<id column=\"ID\" property=\"id\" jdbcType=\"BIGINT\"/>"));
    }

    #[test]
    fn test_oracle_binding_requires_schema_name() {
        let mut config = test_support::config();
        config.schema_name = None;
        let connector = test_support::connector();
        let ctx = test_support::context(&config, &connector);

        let err = OracleMapperGenerator
            .render(&ctx, LayerKind::OracleMapper)
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Rendering { layer: LayerKind::OracleMapper, .. }
        ));
    }

    #[test]
    fn test_key_only_table_has_no_update() {
        let config = test_support::config();
        let connector =
            DdlConnector::from_sql("CREATE TABLE user_tag (tag VARCHAR(32) PRIMARY KEY);").unwrap();
        let key = connector.primary_key("user_tag").unwrap();
        let ctx = ContextBuilder::new(&config, &connector)
            .build("user_tag", &key)
            .unwrap();

        let xml = MapperBindingGenerator
            .render(&ctx, LayerKind::MapperBinding)
            .unwrap()
            .contents;
        assert!(!xml.contains("updateByPrimaryKey"));
        assert!(xml.contains("<insert id=\"insert\" parameterType=\"com.acme.shop.entity.Tag\">"));

        let code = MapperInterfaceGenerator
            .render(&ctx, LayerKind::MapperInterface)
            .unwrap()
            .contents;
        assert!(!code.contains("updateByPrimaryKey"));
        assert!(code.contains("Tag selectByPrimaryKey(String tag);"));
    }

    fn order_item_context<'a>(
        config: &'a crate::config::GeneratorConfig,
        connector: &'a DdlConnector,
    ) -> RenderingContext<'a> {
        let key = connector.primary_key("user_order_item").unwrap();
        ContextBuilder::new(config, connector)
            .build("user_order_item", &key)
            .unwrap()
    }

    const ORDER_ITEM: &str = r#"
        CREATE TABLE user_order_item (
            order_no VARCHAR(32) NOT NULL,
            sku VARCHAR(32) NOT NULL,
            quantity INT NOT NULL,
            PRIMARY KEY (order_no, sku)
        );
    "#;

    #[test]
    fn test_composite_key_binding_matches_every_key_column() {
        let config = test_support::config();
        let connector = DdlConnector::from_sql(ORDER_ITEM).unwrap();
        let ctx = order_item_context(&config, &connector);

        let xml = MapperBindingGenerator
            .render(&ctx, LayerKind::MapperBinding)
            .unwrap()
            .contents;
        let key_condition =
            "WHERE `order_no` = #{orderNo,jdbcType=VARCHAR} AND `sku` = #{sku,jdbcType=VARCHAR}";
        assert_eq!(xml.matches(key_condition).count(), 3);
        assert!(xml.contains("SET `quantity` = #{quantity,jdbcType=INTEGER}\n"));
        assert!(!xml.contains("`sku` = #{sku,jdbcType=VARCHAR},"));
        assert!(xml.contains("<id column=\"sku\" property=\"sku\" jdbcType=\"VARCHAR\"/>"));
        assert!(xml.contains("<delete id=\"deleteByPrimaryKey\">"));
        assert!(!xml.contains("useGeneratedKeys"));
    }

    #[test]
    fn test_composite_key_interface_takes_every_key_column() {
        let config = test_support::config();
        let connector = DdlConnector::from_sql(ORDER_ITEM).unwrap();
        let ctx = order_item_context(&config, &connector);

        let code = MapperInterfaceGenerator
            .render(&ctx, LayerKind::MapperInterface)
            .unwrap()
            .contents;
        let params = "@Param(\"orderNo\") String orderNo, @Param(\"sku\") String sku";
        assert!(code.contains(&format!("int deleteByPrimaryKey({});", params)));
        assert!(code.contains(&format!("OrderItem selectByPrimaryKey({});", params)));
        assert!(code.contains("import org.apache.ibatis.annotations.Param;"));
    }

    #[test]
    fn test_composite_key_oracle_binding_has_no_sequence() {
        let config = test_support::config();
        let connector = DdlConnector::from_sql(ORDER_ITEM).unwrap();
        let ctx = order_item_context(&config, &connector);

        let xml = OracleMapperGenerator
            .render(&ctx, LayerKind::OracleMapper)
            .unwrap()
            .contents;
        assert!(!xml.contains("selectKey"));
        assert!(xml.contains(
            "WHERE \"ORDER_NO\" = #{orderNo,jdbcType=VARCHAR} AND \"SKU\" = #{sku,jdbcType=VARCHAR}"
        ));
    }

    #[test]
    fn test_reserved_word_columns_are_quoted() {
        let config = test_support::config();
        let connector = DdlConnector::from_sql(
            "CREATE TABLE `user_setting` (`id` BIGINT PRIMARY KEY, `key` VARCHAR(32), `order` INT);",
        )
        .unwrap();
        let key = connector.primary_key("user_setting").unwrap();
        let ctx = ContextBuilder::new(&config, &connector)
            .build("user_setting", &key)
            .unwrap();

        let xml = MapperBindingGenerator
            .render(&ctx, LayerKind::MapperBinding)
            .unwrap()
            .contents;
        assert!(xml.contains("INSERT INTO `user_setting` (`id`, `key`, `order`)"));
        assert!(xml.contains("`id`, `key`, `order`\n    </sql>"));
        assert!(xml.contains("SET `key` = #{key,jdbcType=VARCHAR},"));
        assert!(xml.contains("`order` = #{order,jdbcType=INTEGER}"));
        assert!(xml.contains("FROM `user_setting`"));
        // Result set labels stay bare
        assert!(xml.contains("<result column=\"key\" property=\"key\" jdbcType=\"VARCHAR\"/>"));
    }

    #[test]
    fn test_quote_ident_doubles_quote_char() {
        assert_eq!(quote_ident('`', "odd`name"), "`odd``name`");
        assert_eq!(quote_ident('"', "T"), "\"T\"");
    }
}
