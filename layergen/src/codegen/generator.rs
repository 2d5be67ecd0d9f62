//! Layer generator contract and the layer-to-generator bindings

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::catalog::LayerKind;
use super::context::RenderingContext;
use super::layers;
use crate::error::{GeneratorError, Result};

/// One generated file, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders one layer of one table
///
/// Implementations hold no state between calls: rendering the same context
/// twice yields the same file.
pub trait LayerGenerator {
    fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile>;
}

/// Built-in generator for a layer
fn standard_generator(kind: LayerKind) -> Box<dyn LayerGenerator> {
    match kind {
        LayerKind::Entity => Box::new(layers::EntityGenerator),
        LayerKind::MapperInterface => Box::new(layers::MapperInterfaceGenerator),
        LayerKind::MapperBinding => Box::new(layers::MapperBindingGenerator),
        LayerKind::ServiceInterface => Box::new(layers::ServiceInterfaceGenerator),
        LayerKind::ServiceBinding => Box::new(layers::ServiceBindingGenerator),
        LayerKind::OracleMapper => Box::new(layers::OracleMapperGenerator),
    }
}

/// Which generator renders which layer
pub struct LayerBindings {
    generators: BTreeMap<LayerKind, Box<dyn LayerGenerator>>,
}

impl LayerBindings {
    /// Bindings with no generator at all
    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// The built-in generator for every layer of the catalog
    pub fn standard() -> Self {
        Self {
            generators: LayerKind::ALL
                .into_iter()
                .map(|kind| (kind, standard_generator(kind)))
                .collect(),
        }
    }

    /// Bind `generator` to `kind`, replacing the previous binding
    pub fn bind(mut self, kind: LayerKind, generator: impl LayerGenerator + 'static) -> Self {
        self.generators.insert(kind, Box::new(generator));
        self
    }

    /// Remove the binding for `kind`
    pub fn unbind(mut self, kind: LayerKind) -> Self {
        self.generators.remove(&kind);
        self
    }

    /// Look up the generator for `kind`
    pub fn resolve(&self, kind: LayerKind) -> Result<&dyn LayerGenerator> {
        self.generators
            .get(&kind)
            .map(|generator| generator.as_ref())
            .ok_or_else(|| {
                GeneratorError::ConfigError(format!("no generator bound for layer `{}`", kind))
            })
    }
}

impl Default for LayerBindings {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for LayerBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.generators.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl LayerGenerator for Fixed {
        fn render(&self, ctx: &RenderingContext<'_>, layer: LayerKind) -> Result<RenderedFile> {
            Ok(RenderedFile {
                path: PathBuf::from(format!("{}.{}", ctx.table_name(), layer)),
                contents: String::new(),
            })
        }
    }

    #[test]
    fn test_standard_binds_every_layer() {
        let bindings = LayerBindings::standard();
        for kind in LayerKind::ALL {
            assert!(bindings.resolve(kind).is_ok(), "{} unbound", kind);
        }
    }

    #[test]
    fn test_missing_binding_is_config_error() {
        let bindings = LayerBindings::standard().unbind(LayerKind::Entity);
        let err = bindings.resolve(LayerKind::Entity).err().unwrap();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
        assert!(err.to_string().contains("entity"));
        assert!(LayerBindings::empty().resolve(LayerKind::ServiceBinding).is_err());
    }

    #[test]
    fn test_bind_overrides() {
        let bindings = LayerBindings::empty().bind(LayerKind::Entity, Fixed);
        assert!(bindings.resolve(LayerKind::Entity).is_ok());
        assert!(bindings.resolve(LayerKind::MapperInterface).is_err());
    }
}
