//! The ordered processing steps of one compilation round.
//!
//! Step order is part of the contract: migrations, then type adapters, then
//! columns, then model adapters, then the holder. Each step reads the round,
//! validates its candidates, and records results in the registry; later
//! steps depend on what earlier steps registered.

use crate::decl::{DeclKind, FieldDecl, MethodDecl, Round, TypeDecl};
use crate::element::{ColumnElement, MigrationElement, ModelAdapterElement, TypeAdapterElement};
use crate::emit::{AdapterHolderWriter, ModelAdapterWriter, SourceWriter};
use crate::registry::Registry;
use crate::resolve::{self, TypeMap};
use crate::validate::{MigrationValidator, ModelAdapterValidator, TypeAdapterValidator, Validator};

/// One pass over the round.
pub trait ProcessingStep {
    fn name(&self) -> &'static str;
    fn process(&self, round: &Round, registry: &mut Registry, type_map: &TypeMap);
}

/// The five steps in their fixed execution order.
#[must_use]
pub fn default_steps() -> Vec<Box<dyn ProcessingStep>> {
    vec![
        Box::new(MigrationStep),
        Box::new(TypeAdapterStep),
        Box::new(ColumnStep),
        Box::new(ModelAdapterStep),
        Box::new(AdapterHolderStep),
    ]
}

/// Registers versioned migrations.
pub struct MigrationStep;

impl ProcessingStep for MigrationStep {
    fn name(&self) -> &'static str {
        "migration"
    }

    fn process(&self, round: &Round, registry: &mut Registry, _type_map: &TypeMap) {
        for decl in round.migration_decls() {
            if !MigrationValidator.validate(None, decl, registry.diagnostics_mut()) {
                continue;
            }
            let Some(marker) = decl.migration else { continue };
            tracing::debug!(migration = %decl.qualified_name, version = marker.version, "registered migration");
            registry.add_migration(MigrationElement::new(&decl.qualified_name, marker.version));
        }
    }
}

/// Built-in conversions seeded before any user adapter. Described as
/// ordinary declarations so they pass through the same validation.
const BUILT_IN_ADAPTERS: &[(&str, &str, &str)] = &[
    ("modelgen_core::adapter::BoolAdapter", "bool", "i64"),
    ("modelgen_core::adapter::NaiveDateTimeAdapter", "chrono::NaiveDateTime", "i64"),
    ("modelgen_core::adapter::DateTimeUtcAdapter", "chrono::DateTime<chrono::Utc>", "i64"),
    ("modelgen_core::adapter::SystemTimeAdapter", "std::time::SystemTime", "i64"),
];

fn built_in_adapter_decls() -> Vec<TypeDecl> {
    BUILT_IN_ADAPTERS
        .iter()
        .map(|(qualified, deserialized, serialized)| {
            TypeDecl::new(*qualified, DeclKind::Struct)
                .type_adapter(*deserialized, *serialized)
                .method(MethodDecl::new(
                    "serialize",
                    vec![(*deserialized).to_string()],
                    Some((*serialized).to_string()),
                ))
                .method(MethodDecl::new(
                    "deserialize",
                    vec![(*serialized).to_string()],
                    Some((*deserialized).to_string()),
                ))
                .default_ctor()
        })
        .collect()
}

/// Registers type adapters: built-ins first, then the round's declarations.
/// A second adapter for an already-claimed deserialized type is rejected
/// with an ambiguity error; the first registration stands.
pub struct TypeAdapterStep;

impl TypeAdapterStep {
    fn register(decl: &TypeDecl, registry: &mut Registry, type_map: &TypeMap) {
        if !TypeAdapterValidator::new(type_map).validate(None, decl, registry.diagnostics_mut()) {
            return;
        }
        let Some(marker) = &decl.type_adapter else { return };
        let deserialized = type_map.canonicalize(&marker.deserialized);
        let serialized = type_map.canonicalize(&marker.serialized);
        // Validation guarantees the serialized side has a SQL kind.
        let Some(sql_type) = type_map.sql_type(&serialized) else {
            return;
        };

        let element =
            TypeAdapterElement::new(&decl.qualified_name, &deserialized, &serialized, sql_type);
        match registry.add_type_adapter(element) {
            Ok(()) => {
                tracing::debug!(adapter = %decl.qualified_name, deserialized = %deserialized, "registered type adapter");
            }
            Err(err) => {
                registry
                    .diagnostics_mut()
                    .error(&decl.qualified_name, err.to_string());
            }
        }
    }
}

impl ProcessingStep for TypeAdapterStep {
    fn name(&self) -> &'static str {
        "type-adapter"
    }

    fn process(&self, round: &Round, registry: &mut Registry, type_map: &TypeMap) {
        for decl in built_in_adapter_decls() {
            Self::register(&decl, registry, type_map);
        }
        for decl in round.type_adapter_decls() {
            Self::register(decl, registry, type_map);
        }
    }
}

/// Resolves every column-marked field of every model.
///
/// Non-struct table declarations are skipped here without a diagnostic; the
/// model-adapter step owns that error.
pub struct ColumnStep;

impl ColumnStep {
    /// Find the `field()` getter and `set_field()` setter for a non-public
    /// field, comparing canonical type spellings.
    fn accessors<'a>(
        model: &'a TypeDecl,
        field: &FieldDecl,
        type_map: &TypeMap,
    ) -> Option<(&'a str, &'a str)> {
        let field_type = type_map.canonicalize(&field.type_name);

        let getter = model.find_method(&field.name).filter(|m| {
            m.param_types.is_empty()
                && m.return_type
                    .as_deref()
                    .is_some_and(|r| type_map.canonicalize(r) == field_type)
        })?;

        let setter_name = format!("set_{}", field.name);
        let setter = model.find_method(&setter_name).filter(|m| {
            m.param_types.len() == 1 && type_map.canonicalize(&m.param_types[0]) == field_type
        })?;

        Some((getter.name.as_str(), setter.name.as_str()))
    }
}

impl ProcessingStep for ColumnStep {
    fn name(&self) -> &'static str {
        "column"
    }

    fn process(&self, round: &Round, registry: &mut Registry, type_map: &TypeMap) {
        for decl in round.table_decls() {
            if decl.kind != DeclKind::Struct {
                continue;
            }
            for field in decl.fields.iter().filter(|f| f.column.is_some()) {
                let resolution = resolve::resolve(type_map, registry, round, &field.type_name);
                let mut column = ColumnElement::new(&decl.qualified_name, field, resolution);

                if !field.public {
                    match Self::accessors(decl, field, type_map) {
                        Some((getter, setter)) => {
                            column.set_getter(getter);
                            column.set_setter(setter);
                        }
                        None => {
                            registry.diagnostics_mut().error(
                                &decl.qualified_name,
                                format!(
                                    "non-public field `{}` needs a `{}()` getter and `set_{}()` setter",
                                    field.name, field.name, field.name
                                ),
                            );
                            continue;
                        }
                    }
                }

                tracing::trace!(model = %decl.qualified_name, column = %column.column_name(), "registered column");
                registry.add_column(column);
            }
        }
    }
}

/// Validates each model and emits its adapter artifact.
pub struct ModelAdapterStep;

impl ProcessingStep for ModelAdapterStep {
    fn name(&self) -> &'static str {
        "model-adapter"
    }

    fn process(&self, round: &Round, registry: &mut Registry, _type_map: &TypeMap) {
        for decl in round.table_decls() {
            if !ModelAdapterValidator.validate(None, decl, registry.diagnostics_mut()) {
                continue;
            }
            let Some(table) = &decl.table else { continue };

            // A single unmappable column rejects the whole model; partial
            // schemas never reach emission.
            let unmapped: Vec<(String, String)> = registry
                .columns(&decl.qualified_name)
                .iter()
                .filter(|c| c.sql_type().is_none())
                .map(|c| (c.field_name().to_string(), c.deserialized().to_string()))
                .collect();
            if !unmapped.is_empty() {
                for (field, type_name) in unmapped {
                    registry.diagnostics_mut().error(
                        &decl.qualified_name,
                        format!(
                            "column `{field}` of `{}`: type `{type_name}` has no SQL-storable mapping",
                            decl.simple_name()
                        ),
                    );
                }
                continue;
            }

            let element = ModelAdapterElement::new(&decl.qualified_name, &table.name);
            let artifact = ModelAdapterWriter::new(registry).artifact(&element);
            tracing::debug!(model = %decl.qualified_name, artifact = %artifact.name, "emitted model adapter");
            registry.add_model_adapter(element);
            registry.add_artifact(artifact);
        }
    }
}

/// Emits the holder artifact tying the whole round together. Always runs,
/// even for an empty registry.
pub struct AdapterHolderStep;

impl ProcessingStep for AdapterHolderStep {
    fn name(&self) -> &'static str {
        "adapter-holder"
    }

    fn process(&self, _round: &Round, registry: &mut Registry, _type_map: &TypeMap) {
        let artifact = AdapterHolderWriter.artifact(registry);
        tracing::debug!(artifact = %artifact.name, "emitted adapter holder");
        registry.add_artifact(artifact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::ColumnMarker;

    fn run_steps(round: &Round) -> Registry {
        let type_map = TypeMap::new();
        let mut registry = Registry::new();
        for step in default_steps() {
            step.process(round, &mut registry, &type_map);
        }
        registry
    }

    #[test]
    fn test_built_ins_seed_the_registry() {
        let registry = run_steps(&Round::new());
        assert!(registry.type_adapter("bool").is_some());
        assert!(registry.type_adapter("chrono::NaiveDateTime").is_some());
        assert!(registry.type_adapter("chrono::DateTime<chrono::Utc>").is_some());
        assert!(registry.type_adapter("std::time::SystemTime").is_some());
        assert!(!registry.diagnostics().has_errors());
    }

    #[test]
    fn test_user_adapter_clashing_with_built_in_is_ambiguous() {
        let round = Round::new().with(
            TypeDecl::new("crate::MyBoolAdapter", DeclKind::Struct)
                .type_adapter("bool", "String")
                .method(MethodDecl::new(
                    "serialize",
                    vec!["bool".to_string()],
                    Some("String".to_string()),
                ))
                .method(MethodDecl::new(
                    "deserialize",
                    vec!["String".to_string()],
                    Some("bool".to_string()),
                ))
                .default_ctor(),
        );
        let registry = run_steps(&round);
        assert!(registry.diagnostics().has_errors());
        // The built-in stays registered.
        assert_eq!(
            registry.type_adapter("bool").unwrap().qualified_name(),
            "modelgen_core::adapter::BoolAdapter"
        );
    }

    #[test]
    fn test_private_field_without_accessors_is_rejected() {
        let round = Round::new().with(
            TypeDecl::new("crate::Note", DeclKind::Struct)
                .table("notes")
                .field(
                    FieldDecl::new("title", "String")
                        .private()
                        .column(ColumnMarker::new("title")),
                ),
        );
        let registry = run_steps(&round);
        assert!(registry.diagnostics().has_errors());
        assert!(registry.columns("crate::Note").is_empty());
    }

    #[test]
    fn test_private_field_with_accessors_is_registered() {
        let round = Round::new().with(
            TypeDecl::new("crate::Note", DeclKind::Struct)
                .table("notes")
                .field(
                    FieldDecl::new("title", "String")
                        .private()
                        .column(ColumnMarker::new("title")),
                )
                .method(MethodDecl::new("title", vec![], Some("String".to_string())))
                .method(MethodDecl::new(
                    "set_title",
                    vec!["String".to_string()],
                    None,
                )),
        );
        let registry = run_steps(&round);
        assert!(!registry.diagnostics().has_errors());
        let columns = registry.columns("crate::Note");
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].getter(), Some("title"));
        assert_eq!(columns[0].setter(), Some("set_title"));
    }

    #[test]
    fn test_unmapped_column_rejects_whole_model() {
        let round = Round::new().with(
            TypeDecl::new("crate::Note", DeclKind::Struct)
                .table("notes")
                .field(FieldDecl::new("title", "String").column(ColumnMarker::new("title")))
                .field(
                    FieldDecl::new("mystery", "crate::Mystery")
                        .column(ColumnMarker::new("mystery")),
                ),
        );
        let registry = run_steps(&round);
        assert!(registry.diagnostics().has_errors());
        assert_eq!(registry.model_adapters().count(), 0);
        // Only the holder artifact was emitted.
        assert_eq!(registry.artifacts().len(), 1);
        assert_eq!(registry.artifacts()[0].name, "AdapterHolderImpl");
    }

    #[test]
    fn test_holder_emitted_even_for_empty_round() {
        let registry = run_steps(&Round::new());
        assert_eq!(registry.artifacts().len(), 1);
        assert_eq!(registry.artifacts()[0].name, "AdapterHolderImpl");
    }
}
