//! Resolved metadata elements accumulated in the registry.

mod column;
mod migration;
mod model;
mod type_adapter;

pub use column::ColumnElement;
pub use migration::MigrationElement;
pub use model::ModelAdapterElement;
pub use type_adapter::TypeAdapterElement;
