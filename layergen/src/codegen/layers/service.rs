//! Service generators - service interface and its mapper-backed implementation

use std::collections::BTreeSet;

use tracing::debug;

use super::{
    expect_layer, has_updatable_columns, java_header, java_path, key_args, key_fields,
    key_imports, key_suffix, load_columns, mapper_name, plain_key_params, service_name,
};
use crate::codegen::catalog::LayerKind;
use crate::codegen::context::RenderingContext;
use crate::codegen::generator::{LayerGenerator, RenderedFile};
use crate::error::Result;

/// Renders `<package>.service.<Class>Service`
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceInterfaceGenerator;

impl LayerGenerator for ServiceInterfaceGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::ServiceInterface, layer)?;
        let columns = load_columns(ctx, layer)?;
        let keys = key_fields(ctx, layer, &columns)?;
        let service = service_name(ctx);
        debug!("Rendering service interface {} for {}", service, ctx.table_name());

        let entity = ctx.upper_class_name();
        let param = ctx.lower_class_name();
        let key_params = plain_key_params(&keys);
        let suffix = key_suffix(&keys);

        let entity_class = ctx.entity_class();
        let mut imports: BTreeSet<&str> = BTreeSet::new();
        imports.insert(&entity_class);
        imports.insert("java.util.List");
        imports.extend(key_imports(&keys));

        let mut code = java_header(ctx);
        code.push_str(&format!("package {};\n\n", ctx.sub_package("service")));
        for import in &imports {
            code.push_str(&format!("import {};\n", import));
        }
        code.push('\n');

        code.push_str(&format!("public interface {} {{\n\n", service));
        code.push_str(&format!("    {} save({} {});\n\n", entity, entity, param));
        if has_updatable_columns(&keys, &columns) {
            code.push_str(&format!("    boolean update({} {});\n\n", entity, param));
        }
        code.push_str(&format!("    boolean removeBy{}({});\n\n", suffix, key_params));
        code.push_str(&format!("    {} findBy{}({});\n\n", entity, suffix, key_params));
        code.push_str(&format!("    List<{}> findAll();\n\n", entity));
        code.push_str("    long count();\n");
        code.push_str("}\n");

        Ok(RenderedFile {
            path: java_path(ctx, "service", &service),
            contents: code,
        })
    }
}

/// Renders `<package>.service.impl.<Class>ServiceImpl`
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceBindingGenerator;

impl LayerGenerator for ServiceBindingGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
        expect_layer(ctx, LayerKind::ServiceBinding, layer)?;
        let columns = load_columns(ctx, layer)?;
        let keys = key_fields(ctx, layer, &columns)?;
        let service = service_name(ctx);
        let class_name = format!("{}Impl", service);
        debug!("Rendering service binding {} for {}", class_name, ctx.table_name());

        let entity = ctx.upper_class_name();
        let param = ctx.lower_class_name();
        let key_params = plain_key_params(&keys);
        let key_args = key_args(&keys);
        let suffix = key_suffix(&keys);
        let mapper = mapper_name(ctx);
        let mapper_field = format!("{}Mapper", ctx.lower_class_name());

        let entity_class = ctx.entity_class();
        let mapper_class = format!("{}.{}", ctx.sub_package("mapper"), mapper);
        let service_class = format!("{}.{}", ctx.sub_package("service"), service);
        let mut imports: BTreeSet<&str> = BTreeSet::new();
        imports.insert(&entity_class);
        imports.insert(&mapper_class);
        imports.insert(&service_class);
        imports.insert("java.util.List");
        imports.insert("org.springframework.beans.factory.annotation.Autowired");
        imports.insert("org.springframework.stereotype.Service");
        imports.extend(key_imports(&keys));

        let mut code = java_header(ctx);
        code.push_str(&format!("package {};\n\n", ctx.sub_package("service.impl")));
        for import in &imports {
            code.push_str(&format!("import {};\n", import));
        }
        code.push('\n');

        code.push_str("@Service\n");
        code.push_str(&format!(
            "public class {} implements {} {{\n\n",
            class_name, service
        ));
        code.push_str("    @Autowired\n");
        code.push_str(&format!("    private {} {};\n\n", mapper, mapper_field));

        code.push_str(&format!(
            "    @Override\n    public {} save({} {}) {{\n        {}.insert({});\n        return {};\n    }}\n\n",
            entity, entity, param, mapper_field, param, param
        ));
        if has_updatable_columns(&keys, &columns) {
            code.push_str(&format!(
                "    @Override\n    public boolean update({} {}) {{\n        return {}.updateByPrimaryKey({}) > 0;\n    }}\n\n",
                entity, param, mapper_field, param
            ));
        }
        code.push_str(&format!(
            "    @Override\n    public boolean removeBy{}({}) {{\n        return {}.deleteByPrimaryKey({}) > 0;\n    }}\n\n",
            suffix, key_params, mapper_field, key_args
        ));
        code.push_str(&format!(
            "    @Override\n    public {} findBy{}({}) {{\n        return {}.selectByPrimaryKey({});\n    }}\n\n",
            entity, suffix, key_params, mapper_field, key_args
        ));
        code.push_str(&format!(
            "    @Override\n    public List<{}> findAll() {{\n        return {}.selectAll();\n    }}\n\n",
            entity, mapper_field
        ));
        code.push_str(&format!(
            "    @Override\n    public long count() {{\n        return {}.countAll();\n    }}\n",
            mapper_field
        ));
        code.push_str("}\n");

        Ok(RenderedFile {
            path: java_path(ctx, "service.impl", &class_name),
            contents: code,
        })
    }
}
