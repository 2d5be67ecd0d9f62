//! The closed set of output layers

use std::fmt;
use std::str::FromStr;

use crate::error::{GeneratorError, Result};

/// A category of generated artifact
///
/// Declaration order is catalog order: layers of one table are rendered in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    /// Data object carrying one row
    Entity,
    /// Mapper (data access) interface
    MapperInterface,
    /// MyBatis XML binding for the mapper interface (MySQL dialect)
    MapperBinding,
    /// Service interface
    ServiceInterface,
    /// Service implementation bound to the mapper
    ServiceBinding,
    /// Oracle-dialect mapper binding
    ///
    /// Never part of the per-table sweep; rendered only through the
    /// explicit single-layer path.
    OracleMapper,
}

impl LayerKind {
    /// Every layer, in catalog order
    pub const ALL: [LayerKind; 6] = [
        LayerKind::Entity,
        LayerKind::MapperInterface,
        LayerKind::MapperBinding,
        LayerKind::ServiceInterface,
        LayerKind::ServiceBinding,
        LayerKind::OracleMapper,
    ];

    /// Identifier used in the `layers` configuration key
    pub fn id(&self) -> &'static str {
        match self {
            LayerKind::Entity => "entity",
            LayerKind::MapperInterface => "mapper_interface",
            LayerKind::MapperBinding => "mapper_binding",
            LayerKind::ServiceInterface => "service_interface",
            LayerKind::ServiceBinding => "service_binding",
            LayerKind::OracleMapper => "oracle_mapper",
        }
    }

    /// Whether the default per-table sweep renders this layer
    pub fn is_swept(&self) -> bool {
        !matches!(self, LayerKind::OracleMapper)
    }

    /// Layers visited by the per-table sweep, in catalog order
    pub fn swept() -> impl Iterator<Item = LayerKind> {
        Self::ALL.into_iter().filter(LayerKind::is_swept)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LayerKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        LayerKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = LayerKind::ALL.iter().map(LayerKind::id).collect();
                GeneratorError::ConfigError(format!(
                    "unknown layer identifier `{}`, expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Parse the comma-separated `layers` value into the layers to sweep
///
/// Blank segments are ignored and repeats collapse. The result follows
/// catalog order, not configured order, and never contains the excluded
/// layer.
pub fn parse_layer_list(raw: &str) -> Result<Vec<LayerKind>> {
    let mut selected = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: LayerKind = id.parse()?;
        if !selected.contains(&kind) {
            selected.push(kind);
        }
    }

    if selected.is_empty() {
        return Err(GeneratorError::ConfigError(format!(
            "layer list `{}` is empty, expected comma-separated layer identifiers",
            raw
        )));
    }

    let swept: Vec<LayerKind> = LayerKind::swept()
        .filter(|kind| selected.contains(kind))
        .collect();
    if swept.is_empty() {
        return Err(GeneratorError::ConfigError(format!(
            "layer list `{}` selects no layer of the per-table sweep",
            raw
        )));
    }

    Ok(swept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for kind in LayerKind::ALL {
            assert_eq!(kind.id().parse::<LayerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_only_oracle_mapper_is_excluded() {
        let excluded: Vec<LayerKind> = LayerKind::ALL
            .into_iter()
            .filter(|k| !k.is_swept())
            .collect();
        assert_eq!(excluded, vec![LayerKind::OracleMapper]);
        assert_eq!(LayerKind::swept().count(), 5);
    }

    #[test]
    fn test_parse_uses_catalog_order() {
        let layers = parse_layer_list("service_binding, entity,mapper_interface").unwrap();
        assert_eq!(
            layers,
            vec![
                LayerKind::Entity,
                LayerKind::MapperInterface,
                LayerKind::ServiceBinding
            ]
        );
    }

    #[test]
    fn test_parse_ignores_blanks_and_duplicates() {
        let layers = parse_layer_list(",entity,, entity ,").unwrap();
        assert_eq!(layers, vec![LayerKind::Entity]);
    }

    #[test]
    fn test_parse_drops_excluded_layer() {
        let layers = parse_layer_list("entity,oracle_mapper").unwrap();
        assert_eq!(layers, vec![LayerKind::Entity]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_layer_list(""),
            Err(GeneratorError::ConfigError(_))
        ));
        assert!(parse_layer_list(" , ,").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = parse_layer_list("entity,controller").unwrap_err();
        assert!(err.to_string().contains("controller"));
    }

    #[test]
    fn test_parse_rejects_excluded_only() {
        assert!(parse_layer_list("oracle_mapper").is_err());
    }
}
