//! Default configuration values - single source of truth

/// Default prefix stripped from table names (none)
pub const TABLE_PREFIX: &str = "";

/// Default table list (none, must be configured)
pub const TABLES: &str = "";

/// Default layer list: every layer of the per-table sweep
pub const LAYERS: &str = "entity,mapper_interface,mapper_binding,service_interface,service_binding";

/// Whether data objects go to the `domain` package by default
pub const DOMAIN: bool = false;

/// Default output directory
pub const OUTPUT_DIR: &str = "./generated";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Environment variable prefix for `GeneratorConfig::load`
pub const ENV_PREFIX: &str = "LAYERGEN";

/// Config file looked up when no explicit path is given
pub const CONFIG_FILE: &str = "layergen";
