//! Code generation module

mod catalog;
mod context;
mod generator;
mod layers;
mod naming;
mod orchestrator;
mod type_resolver;
mod writer;

pub use catalog::*;
pub use context::*;
pub use generator::*;
pub use layers::{
    EntityGenerator, MapperBindingGenerator, MapperInterfaceGenerator, OracleMapperGenerator,
    ServiceBindingGenerator, ServiceInterfaceGenerator,
};
pub use naming::*;
pub use orchestrator::*;
pub use type_resolver::*;
pub use writer::*;
