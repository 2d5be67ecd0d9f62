//! Entity generator - one data object class per table

use std::collections::BTreeSet;

use tracing::debug;

use super::{doc_text, expect_layer, java_header, java_path, load_columns};
use crate::codegen::catalog::LayerKind;
use crate::codegen::context::RenderingContext;
use crate::codegen::generator::{LayerGenerator, RenderedFile};
use crate::codegen::naming::{to_accessor_suffix, to_field_name};
use crate::codegen::type_resolver::TypeResolver;
use crate::error::Result;

/// Renders `<package>.<entity|domain>.<Class>`
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityGenerator;

impl LayerGenerator for EntityGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::Entity, layer)?;
        let columns = load_columns(ctx, layer)?;
        let class_name = ctx.upper_class_name();
        debug!("Rendering entity {} for {}", class_name, ctx.table_name());

        let fields: Vec<(String, String, &str, String)> = columns
            .iter()
            .map(|col| {
                let java_type = TypeResolver::resolve(&col.data_type, col.is_unsigned);
                let mut doc = format!("Column: `{}`", col.name);
                if col.is_primary_key {
                    doc.push_str(" (PRIMARY KEY)");
                }
                if let Some(comment) = col.comment.as_deref().filter(|c| !c.is_empty()) {
                    doc.push_str(&format!(" - {}", doc_text(comment)));
                }
                (
                    to_field_name(&col.name),
                    to_accessor_suffix(&col.name),
                    java_type.simple_name(),
                    doc,
                )
            })
            .collect();

        let mut imports: BTreeSet<&str> = BTreeSet::new();
        imports.insert("java.io.Serializable");
        for col in &columns {
            if let Some(import) = TypeResolver::resolve(&col.data_type, col.is_unsigned).import() {
                imports.insert(import);
            }
        }

        let mut code = java_header(ctx);
        code.push_str(&format!("package {};\n\n", ctx.sub_package(ctx.entity_segment())));
        for import in &imports {
            code.push_str(&format!("import {};\n", import));
        }
        code.push('\n');

        code.push_str(&format!(
            "/**\n * Database table: `{}`\n */\n",
            doc_text(ctx.table_name())
        ));
        code.push_str(&format!(
            "public class {} implements Serializable {{\n\n",
            class_name
        ));
        code.push_str("    private static final long serialVersionUID = 1L;\n");

        for (field, _, java_type, doc) in &fields {
            code.push_str(&format!("\n    /** {} */\n", doc));
            code.push_str(&format!("    private {} {};\n", java_type, field));
        }

        for (field, suffix, java_type, _) in &fields {
            code.push_str(&format!(
                "\n    public {} get{}() {{\n        return {};\n    }}\n",
                java_type, suffix, field
            ));
            code.push_str(&format!(
                "\n    public void set{}({} {}) {{\n        this.{} = {};\n    }}\n",
                suffix, java_type, field, field, field
            ));
        }

        code.push_str("}\n");

        Ok(RenderedFile {
            path: java_path(ctx, ctx.entity_segment(), class_name),
            contents: code,
        })
    }
}
