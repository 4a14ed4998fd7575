//! Per-round metadata store.
//!
//! One [`Registry`] is created empty at the start of a processing session,
//! populated by the steps, read by the emitters, and discarded with the
//! round. Deterministic emission falls out of the ordered collections used
//! here: set-iteration order never leaks into generated sources.

use crate::diag::Diagnostics;
use crate::element::{ColumnElement, MigrationElement, ModelAdapterElement, TypeAdapterElement};
use crate::emit::SourceArtifact;
use std::collections::BTreeMap;

/// Two adapters claiming the same deserialized type.
///
/// Last-registered-wins would silently change schemas, so registration is
/// a hard error instead.
#[derive(Debug, thiserror::Error)]
#[error("duplicate type adapter for `{deserialized}`: already registered by `{existing}`")]
pub struct DuplicateAdapter {
    pub deserialized: String,
    pub existing: String,
}

/// Process-wide store of everything discovered in one round.
#[derive(Debug, Default)]
pub struct Registry {
    migrations: BTreeMap<(i64, String), MigrationElement>,
    type_adapters: BTreeMap<String, TypeAdapterElement>,
    columns: BTreeMap<String, Vec<ColumnElement>>,
    model_adapters: BTreeMap<String, ModelAdapterElement>,
    artifacts: Vec<SourceArtifact>,
    diagnostics: Diagnostics,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a migration. Ordered by version, then qualified name.
    pub fn add_migration(&mut self, migration: MigrationElement) {
        let key = (migration.version(), migration.qualified_name().to_string());
        self.migrations.insert(key, migration);
    }

    /// Migrations in version order.
    pub fn migrations(&self) -> impl Iterator<Item = &MigrationElement> {
        self.migrations.values()
    }

    /// Register a type adapter, rejecting a second adapter for the same
    /// deserialized type.
    pub fn add_type_adapter(
        &mut self,
        adapter: TypeAdapterElement,
    ) -> Result<(), DuplicateAdapter> {
        if let Some(existing) = self.type_adapters.get(adapter.deserialized()) {
            return Err(DuplicateAdapter {
                deserialized: adapter.deserialized().to_string(),
                existing: existing.qualified_name().to_string(),
            });
        }
        self.type_adapters
            .insert(adapter.deserialized().to_string(), adapter);
        Ok(())
    }

    /// Adapter registered for a canonical deserialized type, if any.
    #[must_use]
    pub fn type_adapter(&self, deserialized: &str) -> Option<&TypeAdapterElement> {
        self.type_adapters.get(deserialized)
    }

    /// Type adapters ordered by deserialized type.
    pub fn type_adapters(&self) -> impl Iterator<Item = &TypeAdapterElement> {
        self.type_adapters.values()
    }

    /// Append a column to its model, preserving field-declaration order.
    pub fn add_column(&mut self, column: ColumnElement) {
        self.columns
            .entry(column.model().to_string())
            .or_default()
            .push(column);
    }

    /// Columns of a model in field-declaration order.
    #[must_use]
    pub fn columns(&self, model: &str) -> &[ColumnElement] {
        self.columns.get(model).map_or(&[], Vec::as_slice)
    }

    /// Register a model whose adapter artifact was emitted.
    pub fn add_model_adapter(&mut self, element: ModelAdapterElement) {
        self.model_adapters
            .insert(element.model_qualified_name().to_string(), element);
    }

    /// Model adapters ordered by model qualified name.
    pub fn model_adapters(&self) -> impl Iterator<Item = &ModelAdapterElement> {
        self.model_adapters.values()
    }

    /// Record a generated source artifact.
    pub fn add_artifact(&mut self, artifact: SourceArtifact) {
        self.artifacts.push(artifact);
    }

    #[must_use]
    pub fn artifacts(&self) -> &[SourceArtifact] {
        &self.artifacts
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Tear the registry down into emitted artifacts and diagnostics.
    #[must_use]
    pub fn into_output(self) -> (Vec<SourceArtifact>, Diagnostics) {
        (self.artifacts, self.diagnostics)
    }
}
