//! Resolved column metadata and its schema fragment builders.

use crate::decl::{ColumnMarker, FieldDecl};
use crate::resolve::Resolution;
use modelgen_core::SqlType;

/// One persisted field of a model, fully resolved.
///
/// Created once during the column step and immutable afterward, except for
/// the getter/setter association attached before schema emission.
#[derive(Debug, Clone)]
pub struct ColumnElement {
    model: String,
    field_name: String,
    marker: ColumnMarker,
    deserialized: String,
    serialized: String,
    sql_type: Option<SqlType>,
    model_table: Option<String>,
    getter: Option<String>,
    setter: Option<String>,
}

impl ColumnElement {
    /// Build a column from its field declaration and type resolution.
    #[must_use]
    pub fn new(model: impl Into<String>, field: &FieldDecl, resolution: Resolution) -> Self {
        let marker = field
            .column
            .clone()
            .unwrap_or_else(|| ColumnMarker::new(field.name.clone()));
        Self {
            model: model.into(),
            field_name: field.name.clone(),
            marker,
            deserialized: resolution.deserialized,
            serialized: resolution.serialized,
            sql_type: resolution.sql_type,
            model_table: resolution.model_table,
            getter: None,
            setter: None,
        }
    }

    /// Qualified name of the enclosing model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.marker.name
    }

    /// Canonical declared type.
    #[must_use]
    pub fn deserialized(&self) -> &str {
        &self.deserialized
    }

    /// Canonical SQL-storable type.
    #[must_use]
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// SQL kind of the serialized type, if one exists.
    #[must_use]
    pub fn sql_type(&self) -> Option<SqlType> {
        self.sql_type
    }

    /// Whether the declared type is itself a model.
    #[must_use]
    pub fn is_model(&self) -> bool {
        self.model_table.is_some()
    }

    /// Whether reads and writes must go through a type adapter.
    #[must_use]
    pub fn requires_type_adapter(&self) -> bool {
        self.serialized != self.deserialized
    }

    pub fn set_getter(&mut self, name: impl Into<String>) {
        self.getter = Some(name.into());
    }

    pub fn set_setter(&mut self, name: impl Into<String>) {
        self.setter = Some(name.into());
    }

    #[must_use]
    pub fn getter(&self) -> Option<&str> {
        self.getter.as_deref()
    }

    #[must_use]
    pub fn setter(&self) -> Option<&str> {
        self.setter.as_deref()
    }

    /// Column definition fragment, in fixed clause order.
    ///
    /// Returns `None` when the serialized type has no SQL kind; the model
    /// step reports that as a resolution error instead of emitting a
    /// partial schema.
    #[must_use]
    pub fn schema(&self) -> Option<String> {
        let sql_type = self.sql_type?;
        let mut out = String::new();
        out.push_str(self.column_name());
        out.push(' ');
        out.push_str(sql_type.sql_name());

        if self.marker.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if self.marker.auto_increment {
            out.push_str(" AUTOINCREMENT");
        }
        if let Some(not_null) = &self.marker.not_null {
            out.push_str(" NOT NULL");
            if let Some(clause) = not_null.on_conflict {
                out.push_str(" ON CONFLICT ");
                out.push_str(clause.as_sql());
            }
        }
        if let Some(unique) = &self.marker.unique {
            out.push_str(" UNIQUE");
            if let Some(clause) = unique.on_conflict {
                out.push_str(" ON CONFLICT ");
                out.push_str(clause.as_sql());
            }
        }
        if let Some(check) = &self.marker.check {
            out.push_str(" CHECK (");
            out.push_str(check);
            out.push(')');
        }
        if let Some(default) = &self.marker.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if let Some(collate) = self.marker.collate {
            out.push_str(" COLLATE ");
            out.push_str(collate.as_sql());
        }

        Some(out)
    }

    /// Table-level FOREIGN KEY clause.
    ///
    /// Only model-typed columns carrying the explicit foreign-key marker
    /// produce one.
    #[must_use]
    pub fn foreign_key_clause(&self) -> Option<String> {
        let table = self.model_table.as_deref()?;
        let fk = self.marker.foreign_key.as_ref()?;

        let mut out = String::new();
        out.push_str("FOREIGN KEY(");
        out.push_str(self.column_name());
        out.push_str(") REFERENCES ");
        out.push_str(table);

        if !fk.foreign_columns.is_empty() {
            out.push('(');
            out.push_str(&fk.foreign_columns.join(","));
            out.push(')');
        }
        if let Some(action) = fk.on_delete {
            out.push_str(" ON DELETE ");
            out.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            out.push_str(" ON UPDATE ");
            out.push_str(action.as_sql());
        }
        if let Some(deferrable) = fk.deferrable {
            out.push(' ');
            out.push_str(deferrable.as_sql());
            if let Some(timing) = fk.timing {
                out.push(' ');
                out.push_str(timing.as_sql());
            }
        }

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::ForeignKeyMarker;
    use modelgen_core::{
        CollateFunction, ConflictClause, Deferrable, DeferrableTiming, ReferentialAction,
    };

    fn resolved(deserialized: &str, serialized: &str, sql_type: SqlType) -> Resolution {
        Resolution {
            deserialized: deserialized.to_string(),
            serialized: serialized.to_string(),
            sql_type: Some(sql_type),
            model_table: None,
        }
    }

    fn column(marker: ColumnMarker, resolution: Resolution) -> ColumnElement {
        let field = FieldDecl::new("field", "String").column(marker);
        ColumnElement::new("crate::M", &field, resolution)
    }

    #[test]
    fn test_plain_column() {
        let col = column(
            ColumnMarker::new("title"),
            resolved("String", "String", SqlType::Text),
        );
        assert_eq!(col.schema().unwrap(), "title TEXT");
        assert!(col.foreign_key_clause().is_none());
        assert!(!col.requires_type_adapter());
    }

    #[test]
    fn test_primary_key_autoincrement() {
        let col = column(
            ColumnMarker::new("_id").primary_key().auto_increment(),
            resolved("i64", "i64", SqlType::Integer),
        );
        assert_eq!(col.schema().unwrap(), "_id INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    #[test]
    fn test_not_null_with_conflict_clause() {
        let col = column(
            ColumnMarker::new("title").not_null(Some(ConflictClause::Replace)),
            resolved("String", "String", SqlType::Text),
        );
        assert_eq!(col.schema().unwrap(), "title TEXT NOT NULL ON CONFLICT REPLACE");
    }

    #[test]
    fn test_unique_without_conflict_clause() {
        let col = column(
            ColumnMarker::new("slug").unique(None),
            resolved("String", "String", SqlType::Text),
        );
        assert_eq!(col.schema().unwrap(), "slug TEXT UNIQUE");
    }

    #[test]
    fn test_check_before_default() {
        let col = column(
            ColumnMarker::new("count")
                .default_expr("0")
                .check("count >= 0"),
            resolved("i64", "i64", SqlType::Integer),
        );
        // CHECK always precedes DEFAULT regardless of marker construction
        // order.
        assert_eq!(
            col.schema().unwrap(),
            "count INTEGER CHECK (count >= 0) DEFAULT 0"
        );
    }

    #[test]
    fn test_collate_last() {
        let col = column(
            ColumnMarker::new("title")
                .not_null(None)
                .collate(CollateFunction::NoCase),
            resolved("String", "String", SqlType::Text),
        );
        assert_eq!(col.schema().unwrap(), "title TEXT NOT NULL COLLATE NOCASE");
    }

    #[test]
    fn test_unmapped_type_yields_no_schema() {
        let field = FieldDecl::new("blob", "crate::Mystery").column(ColumnMarker::new("blob"));
        let col = ColumnElement::new(
            "crate::M",
            &field,
            Resolution {
                deserialized: "crate::Mystery".to_string(),
                serialized: "crate::Mystery".to_string(),
                sql_type: None,
                model_table: None,
            },
        );
        assert!(col.schema().is_none());
    }

    #[test]
    fn test_foreign_key_clause_full() {
        let marker = ColumnMarker::new("author").foreign_key(ForeignKeyMarker {
            foreign_columns: vec!["_id".to_string()],
            on_delete: Some(ReferentialAction::Cascade),
            on_update: Some(ReferentialAction::SetNull),
            deferrable: Some(Deferrable::Deferrable),
            timing: Some(DeferrableTiming::InitiallyDeferred),
        });
        let field = FieldDecl::new("author", "crate::Author").column(marker);
        let col = ColumnElement::new(
            "crate::Note",
            &field,
            Resolution {
                deserialized: "crate::Author".to_string(),
                serialized: "i64".to_string(),
                sql_type: Some(SqlType::Integer),
                model_table: Some("authors".to_string()),
            },
        );
        assert_eq!(col.schema().unwrap(), "author INTEGER");
        assert_eq!(
            col.foreign_key_clause().unwrap(),
            "FOREIGN KEY(author) REFERENCES authors(_id) ON DELETE CASCADE \
             ON UPDATE SET NULL DEFERRABLE INITIALLY DEFERRED"
        );
    }

    #[test]
    fn test_foreign_key_requires_explicit_marker() {
        // Model-typed column without the marker: INTEGER column, no clause.
        let field = FieldDecl::new("author", "crate::Author").column(ColumnMarker::new("author"));
        let col = ColumnElement::new(
            "crate::Note",
            &field,
            Resolution {
                deserialized: "crate::Author".to_string(),
                serialized: "i64".to_string(),
                sql_type: Some(SqlType::Integer),
                model_table: Some("authors".to_string()),
            },
        );
        assert!(col.is_model());
        assert!(col.requires_type_adapter());
        assert!(col.foreign_key_clause().is_none());
    }

    #[test]
    fn test_timing_needs_deferrable() {
        let marker = ColumnMarker::new("author").foreign_key(ForeignKeyMarker {
            foreign_columns: Vec::new(),
            on_delete: None,
            on_update: None,
            deferrable: None,
            timing: Some(DeferrableTiming::InitiallyImmediate),
        });
        let field = FieldDecl::new("author", "crate::Author").column(marker);
        let col = ColumnElement::new(
            "crate::Note",
            &field,
            Resolution {
                deserialized: "crate::Author".to_string(),
                serialized: "i64".to_string(),
                sql_type: Some(SqlType::Integer),
                model_table: Some("authors".to_string()),
            },
        );
        assert_eq!(
            col.foreign_key_clause().unwrap(),
            "FOREIGN KEY(author) REFERENCES authors"
        );
    }
}
