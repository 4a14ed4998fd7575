//! The declaration-description input model.
//!
//! The pipeline never inspects source code itself. A front end (a parser, an
//! AST walker, or a JSON fixture) describes every marked declaration of one
//! compilation round with these types and hands the [`Round`] to the driver.
//! Everything is plain serde data so declaration sets can be stored, diffed,
//! and replayed.

use modelgen_core::{
    CollateFunction, ConflictClause, Deferrable, DeferrableTiming, ReferentialAction,
};
use serde::{Deserialize, Serialize};

/// All declarations discovered for one compilation round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Round {
    pub declarations: Vec<TypeDecl>,
}

impl Round {
    /// Create an empty round.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration (builder pattern).
    #[must_use]
    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.declarations.push(decl);
        self
    }

    /// Declarations carrying a table marker, in occurrence order.
    pub fn table_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter(|d| d.table.is_some())
    }

    /// Declarations carrying a type-adapter marker, in occurrence order.
    pub fn type_adapter_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter(|d| d.type_adapter.is_some())
    }

    /// Declarations carrying a migration marker, in occurrence order.
    pub fn migration_decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.declarations.iter().filter(|d| d.migration.is_some())
    }

    /// Look up a declaration by qualified name.
    #[must_use]
    pub fn find(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.declarations
            .iter()
            .find(|d| d.qualified_name == qualified_name)
    }
}

/// Kind of a declared type, as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    /// A class-like named aggregate. The only kind models, adapters, and
    /// migrations may be declared as.
    Struct,
    Enum,
    Trait,
    Union,
}

/// One marked type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    /// `::`-separated qualified path of the type.
    pub qualified_name: String,
    pub kind: DeclKind,
    /// Present when the type is declared as a persisted model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableMarker>,
    /// Present when the type is declared as a type adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_adapter: Option<TypeAdapterMarker>,
    /// Present when the type is declared as a schema migration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration: Option<MigrationMarker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDecl>,
    /// Whether the generator can construct the type with no arguments.
    #[serde(default)]
    pub has_default_ctor: bool,
}

impl TypeDecl {
    /// Create a declaration with no markers, fields, or methods.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            table: None,
            type_adapter: None,
            migration: None,
            fields: Vec::new(),
            methods: Vec::new(),
            has_default_ctor: false,
        }
    }

    /// Attach a table marker (builder pattern).
    #[must_use]
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(TableMarker { name: name.into() });
        self
    }

    /// Attach a type-adapter marker (builder pattern).
    #[must_use]
    pub fn type_adapter(
        mut self,
        deserialized: impl Into<String>,
        serialized: impl Into<String>,
    ) -> Self {
        self.type_adapter = Some(TypeAdapterMarker {
            deserialized: deserialized.into(),
            serialized: serialized.into(),
        });
        self
    }

    /// Attach a migration marker (builder pattern).
    #[must_use]
    pub fn migration(mut self, version: i64) -> Self {
        self.migration = Some(MigrationMarker { version });
        self
    }

    /// Add a field (builder pattern).
    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method (builder pattern).
    #[must_use]
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Mark the type as default-constructible (builder pattern).
    #[must_use]
    pub fn default_ctor(mut self) -> Self {
        self.has_default_ctor = true;
        self
    }

    /// Last segment of the qualified name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Look up a method by name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Table marker: declares a persisted model and its table name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMarker {
    pub name: String,
}

/// Type-adapter marker: the (deserialized, serialized) pair the adapter
/// converts between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAdapterMarker {
    pub deserialized: String,
    pub serialized: String,
}

/// Migration marker: a versioned schema-change step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MigrationMarker {
    pub version: i64,
}

/// One declared field of a marked type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// Declared type, as spelled in source.
    pub type_name: String,
    /// Whether the field is directly accessible. Non-public fields need a
    /// getter/setter pair resolvable from the enclosing type's methods.
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnMarker>,
}

impl FieldDecl {
    /// Create a public field with no column marker.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            public: true,
            column: None,
        }
    }

    /// Mark the field as non-public (builder pattern).
    #[must_use]
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Attach a column marker (builder pattern).
    #[must_use]
    pub fn column(mut self, marker: ColumnMarker) -> Self {
        self.column = Some(marker);
        self
    }
}

/// One declared method, described just enough for accessor discovery and
/// adapter signature validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Parameter types, excluding any receiver.
    #[serde(default)]
    pub param_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl MethodDecl {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        param_types: Vec<String>,
        return_type: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_types,
            return_type,
        }
    }
}

/// Column marker with its constraint sub-markers.
///
/// Field order here mirrors the fixed clause order of the emitted schema
/// fragment; the emitters rely on the marker, not on this ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMarker {
    /// Column name in the table.
    pub name: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<NotNullMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<UniqueMarker>,
    /// CHECK expression, emitted verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// DEFAULT expression, emitted verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collate: Option<CollateFunction>,
    /// Only meaningful on model-typed columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyMarker>,
}

impl ColumnMarker {
    /// Create a marker with only a column name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
            auto_increment: false,
            not_null: None,
            unique: None,
            check: None,
            default: None,
            collate: None,
            foreign_key: None,
        }
    }

    /// Set the primary key flag (builder pattern).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the auto-increment flag (builder pattern).
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Add a NOT NULL constraint (builder pattern).
    #[must_use]
    pub fn not_null(mut self, on_conflict: Option<ConflictClause>) -> Self {
        self.not_null = Some(NotNullMarker { on_conflict });
        self
    }

    /// Add a UNIQUE constraint (builder pattern).
    #[must_use]
    pub fn unique(mut self, on_conflict: Option<ConflictClause>) -> Self {
        self.unique = Some(UniqueMarker { on_conflict });
        self
    }

    /// Add a CHECK expression (builder pattern).
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.check = Some(expr.into());
        self
    }

    /// Add a DEFAULT expression (builder pattern).
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Set the collating function (builder pattern).
    #[must_use]
    pub fn collate(mut self, function: CollateFunction) -> Self {
        self.collate = Some(function);
        self
    }

    /// Attach a foreign-key marker (builder pattern).
    #[must_use]
    pub fn foreign_key(mut self, marker: ForeignKeyMarker) -> Self {
        self.foreign_key = Some(marker);
        self
    }
}

/// NOT NULL constraint with an optional conflict clause.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NotNullMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_conflict: Option<ConflictClause>,
}

/// UNIQUE constraint with an optional conflict clause.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UniqueMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_conflict: Option<ConflictClause>,
}

/// Explicit FOREIGN KEY constraint for a model-typed column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignKeyMarker {
    /// Referenced columns in the parent table; empty means unspecified.
    #[serde(default)]
    pub foreign_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<Deferrable>,
    /// Only emitted when `deferrable` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<DeferrableTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let decl = TypeDecl::new("crate::models::Note", DeclKind::Struct);
        assert_eq!(decl.simple_name(), "Note");

        let bare = TypeDecl::new("Note", DeclKind::Struct);
        assert_eq!(bare.simple_name(), "Note");
    }

    #[test]
    fn test_round_filters() {
        let round = Round::new()
            .with(TypeDecl::new("a::M", DeclKind::Struct).table("m"))
            .with(TypeDecl::new("a::A", DeclKind::Struct).type_adapter("x::Y", "i64"))
            .with(TypeDecl::new("a::V1", DeclKind::Struct).migration(1));

        assert_eq!(round.table_decls().count(), 1);
        assert_eq!(round.type_adapter_decls().count(), 1);
        assert_eq!(round.migration_decls().count(), 1);
        assert!(round.find("a::M").is_some());
        assert!(round.find("a::Z").is_none());
    }

    #[test]
    fn test_round_json_round_trip() {
        let round = Round::new().with(
            TypeDecl::new("crate::Note", DeclKind::Struct)
                .table("notes")
                .field(
                    FieldDecl::new("title", "String")
                        .column(ColumnMarker::new("title").not_null(None)),
                ),
        );

        let json = serde_json::to_string(&round).unwrap();
        let parsed: Round = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.declarations.len(), 1);
        let field = &parsed.declarations[0].fields[0];
        assert_eq!(field.column.as_ref().unwrap().name, "title");
        assert!(field.column.as_ref().unwrap().not_null.is_some());
    }

    #[test]
    fn test_sparse_json_input() {
        // A front end only has to spell out what is present.
        let json = r#"{
            "declarations": [{
                "qualified_name": "crate::Note",
                "kind": "Struct",
                "table": { "name": "notes" },
                "fields": [{
                    "name": "title",
                    "type_name": "String",
                    "public": true,
                    "column": { "name": "title" }
                }]
            }]
        }"#;
        let round: Round = serde_json::from_str(json).unwrap();
        let decl = &round.declarations[0];
        assert!(decl.migration.is_none());
        assert!(!decl.has_default_ctor);
        assert!(decl.fields[0].column.as_ref().unwrap().check.is_none());
    }
}
