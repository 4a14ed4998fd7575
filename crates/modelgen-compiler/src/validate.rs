//! Structural rule-checkers, one per declaration kind.
//!
//! Validators only gate whether a step registers a declaration; they report
//! diagnostics and never touch the registry themselves.

use crate::decl::{DeclKind, TypeDecl};
use crate::diag::Diagnostics;
use crate::resolve::TypeMap;
use modelgen_core::is_valid_identifier;

/// A rule-checker for one candidate declaration.
///
/// Returns whether generation should proceed for the candidate; a `false`
/// return is always accompanied by at least one error diagnostic.
pub trait Validator {
    fn validate(
        &self,
        enclosing: Option<&TypeDecl>,
        candidate: &TypeDecl,
        diagnostics: &mut Diagnostics,
    ) -> bool;
}

/// Rules for table-marked model declarations.
pub struct ModelAdapterValidator;

impl Validator for ModelAdapterValidator {
    fn validate(
        &self,
        _enclosing: Option<&TypeDecl>,
        candidate: &TypeDecl,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if candidate.kind != DeclKind::Struct {
            diagnostics.error(
                &candidate.qualified_name,
                "table marker applies only to Model classes.",
            );
            return false;
        }

        let Some(table) = &candidate.table else {
            diagnostics.error(&candidate.qualified_name, "missing table marker");
            return false;
        };
        if !is_valid_identifier(&table.name) {
            diagnostics.error(
                &candidate.qualified_name,
                format!("`{}` is not a valid table name", table.name),
            );
            return false;
        }

        true
    }
}

/// Rules for type-adapter declarations.
///
/// The serialized side must itself be one of the SQL-storable kinds; there
/// are no chained adapters. The declaration must also expose a matching
/// one-argument serialize/deserialize pair.
pub struct TypeAdapterValidator<'a> {
    type_map: &'a TypeMap,
}

impl<'a> TypeAdapterValidator<'a> {
    #[must_use]
    pub fn new(type_map: &'a TypeMap) -> Self {
        Self { type_map }
    }
}

impl Validator for TypeAdapterValidator<'_> {
    fn validate(
        &self,
        _enclosing: Option<&TypeDecl>,
        candidate: &TypeDecl,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if candidate.kind != DeclKind::Struct {
            diagnostics.error(
                &candidate.qualified_name,
                "type-adapter marker applies only to classes.",
            );
            return false;
        }

        let Some(marker) = &candidate.type_adapter else {
            diagnostics.error(&candidate.qualified_name, "missing type-adapter marker");
            return false;
        };

        let deserialized = self.type_map.canonicalize(&marker.deserialized);
        let serialized = self.type_map.canonicalize(&marker.serialized);

        if self.type_map.sql_type(&serialized).is_none() {
            diagnostics.error(
                &candidate.qualified_name,
                format!("serialized type `{serialized}` is not SQL-storable"),
            );
            return false;
        }

        let serialize_ok = candidate.find_method("serialize").is_some_and(|m| {
            m.param_types.len() == 1
                && self.type_map.canonicalize(&m.param_types[0]) == deserialized
                && m.return_type
                    .as_deref()
                    .is_some_and(|r| self.type_map.canonicalize(r) == serialized)
        });
        if !serialize_ok {
            diagnostics.error(
                &candidate.qualified_name,
                format!("missing a one-argument serialize({deserialized}) -> {serialized} method"),
            );
            return false;
        }

        let deserialize_ok = candidate.find_method("deserialize").is_some_and(|m| {
            m.param_types.len() == 1
                && self.type_map.canonicalize(&m.param_types[0]) == serialized
                && m.return_type
                    .as_deref()
                    .is_some_and(|r| self.type_map.canonicalize(r) == deserialized)
        });
        if !deserialize_ok {
            diagnostics.error(
                &candidate.qualified_name,
                format!("missing a one-argument deserialize({serialized}) -> {deserialized} method"),
            );
            return false;
        }

        true
    }
}

/// Rules for migration declarations.
pub struct MigrationValidator;

impl Validator for MigrationValidator {
    fn validate(
        &self,
        _enclosing: Option<&TypeDecl>,
        candidate: &TypeDecl,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if candidate.kind != DeclKind::Struct {
            diagnostics.error(
                &candidate.qualified_name,
                "migration marker applies only to classes.",
            );
            return false;
        }
        if !candidate.has_default_ctor {
            diagnostics.error(
                &candidate.qualified_name,
                "migrations must have a zero-argument constructor reachable by the generator",
            );
            return false;
        }

        true
    }
}
