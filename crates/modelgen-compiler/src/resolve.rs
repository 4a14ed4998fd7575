//! Declared-type resolution.
//!
//! Maps a field's declared type to its SQL-storable serialized
//! representation, consulting the model set and the adapter registry.

use crate::decl::Round;
use crate::registry::Registry;
use modelgen_core::SqlType;
use std::collections::HashMap;

/// Serialized type of a model-typed column: the surrogate row identifier.
pub const ROW_ID_TYPE: &str = "i64";

/// Immutable type configuration: spelling canonicalization plus the
/// declared-type-to-SQL-kind table. Built once at process start and passed
/// by reference into resolution; never mutated afterward.
#[derive(Debug)]
pub struct TypeMap {
    aliases: HashMap<&'static str, &'static str>,
    sql: HashMap<&'static str, SqlType>,
}

/// Scalar types with std-qualified alias spellings.
const PRIMITIVES: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "char", "f32", "f64",
];

impl TypeMap {
    /// Build the fixed configuration.
    #[must_use]
    pub fn new() -> Self {
        let mut aliases: HashMap<&'static str, &'static str> = HashMap::new();
        aliases.insert("std::string::String", "String");
        aliases.insert("alloc::string::String", "String");
        aliases.insert("std::vec::Vec<u8>", "Vec<u8>");
        aliases.insert("alloc::vec::Vec<u8>", "Vec<u8>");
        aliases.insert("chrono::naive::NaiveDateTime", "chrono::NaiveDateTime");
        aliases.insert("chrono::DateTime<Utc>", "chrono::DateTime<chrono::Utc>");
        aliases.insert("time::SystemTime", "std::time::SystemTime");

        let mut sql = HashMap::new();
        sql.insert("Vec<u8>", SqlType::Blob);
        sql.insert("f32", SqlType::Real);
        sql.insert("f64", SqlType::Real);
        sql.insert("i16", SqlType::Integer);
        sql.insert("i32", SqlType::Integer);
        sql.insert("i64", SqlType::Integer);
        sql.insert("u16", SqlType::Integer);
        sql.insert("u32", SqlType::Integer);
        sql.insert("String", SqlType::Text);
        // i8/u8/char/bool have no direct mapping; they go through adapters
        // or fail resolution.

        Self { aliases, sql }
    }

    /// Collapse a declared spelling to its canonical identity.
    ///
    /// Adapter and SQL-kind lookups are keyed by canonical names, so
    /// `std::primitive::i64` and `i64` resolve identically.
    #[must_use]
    pub fn canonicalize(&self, declared: &str) -> String {
        let mut name: String = declared.split_whitespace().collect();
        if let Some(stripped) = name.strip_prefix("::") {
            name = stripped.to_string();
        }
        for primitive in PRIMITIVES {
            if name == format!("core::primitive::{primitive}")
                || name == format!("std::primitive::{primitive}")
            {
                return (*primitive).to_string();
            }
        }
        if let Some(canonical) = self.aliases.get(name.as_str()) {
            return (*canonical).to_string();
        }
        name
    }

    /// Direct SQL kind for a canonical type name, if any.
    #[must_use]
    pub fn sql_type(&self, canonical: &str) -> Option<SqlType> {
        self.sql.get(canonical).copied()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving one declared field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical declared ("deserialized") type.
    pub deserialized: String,
    /// Canonical SQL-storable ("serialized") type.
    pub serialized: String,
    /// SQL kind of the serialized type. `None` means the column cannot be
    /// stored and emission must reject the enclosing model.
    pub sql_type: Option<SqlType>,
    /// Referenced table name when the declared type is itself a model.
    pub model_table: Option<String>,
}

impl Resolution {
    /// Whether reads and writes must go through a type adapter.
    #[must_use]
    pub fn requires_type_adapter(&self) -> bool {
        self.serialized != self.deserialized
    }
}

/// Resolve a declared type. Precedence, first match wins:
///
/// 1. a table-marked model in the round — serialized as the surrogate row
///    identifier, with the referenced table recorded;
/// 2. a registered type adapter for the declared type;
/// 3. identity — the declared type must itself be SQL-storable.
#[must_use]
pub fn resolve(type_map: &TypeMap, registry: &Registry, round: &Round, declared: &str) -> Resolution {
    let deserialized = type_map.canonicalize(declared);

    if let Some(model) = round.find(&deserialized) {
        if let Some(table) = &model.table {
            return Resolution {
                deserialized,
                serialized: ROW_ID_TYPE.to_string(),
                sql_type: type_map.sql_type(ROW_ID_TYPE),
                model_table: Some(table.name.clone()),
            };
        }
    }

    if let Some(adapter) = registry.type_adapter(&deserialized) {
        let serialized = adapter.serialized().to_string();
        let sql_type = type_map.sql_type(&serialized);
        return Resolution {
            deserialized,
            serialized,
            sql_type,
            model_table: None,
        };
    }

    let sql_type = type_map.sql_type(&deserialized);
    Resolution {
        serialized: deserialized.clone(),
        deserialized,
        sql_type,
        model_table: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{DeclKind, TypeDecl};
    use crate::element::TypeAdapterElement;

    #[test]
    fn test_canonicalize_primitive_spellings() {
        let map = TypeMap::new();
        assert_eq!(map.canonicalize("i64"), "i64");
        assert_eq!(map.canonicalize("std::primitive::i64"), "i64");
        assert_eq!(map.canonicalize("core::primitive::bool"), "bool");
        assert_eq!(map.canonicalize("::std::string::String"), "String");
        assert_eq!(map.canonicalize("alloc::vec::Vec<u8>"), "Vec<u8>");
        assert_eq!(map.canonicalize("Vec< u8 >"), "Vec<u8>");
    }

    #[test]
    fn test_sql_kind_table() {
        let map = TypeMap::new();
        assert_eq!(map.sql_type("i64"), Some(SqlType::Integer));
        assert_eq!(map.sql_type("u32"), Some(SqlType::Integer));
        assert_eq!(map.sql_type("f64"), Some(SqlType::Real));
        assert_eq!(map.sql_type("String"), Some(SqlType::Text));
        assert_eq!(map.sql_type("Vec<u8>"), Some(SqlType::Blob));
        // Deliberately unmapped scalars.
        assert_eq!(map.sql_type("bool"), None);
        assert_eq!(map.sql_type("i8"), None);
        assert_eq!(map.sql_type("char"), None);
    }

    #[test]
    fn test_identity_resolution() {
        let map = TypeMap::new();
        let registry = Registry::new();
        let round = Round::new();
        let res = resolve(&map, &registry, &round, "std::primitive::i64");
        assert_eq!(res.deserialized, "i64");
        assert_eq!(res.serialized, "i64");
        assert_eq!(res.sql_type, Some(SqlType::Integer));
        assert!(!res.requires_type_adapter());
    }

    #[test]
    fn test_model_resolution_wins_over_adapter() {
        let map = TypeMap::new();
        let mut registry = Registry::new();
        // Even with an adapter registered for the model type, the model rule
        // takes precedence.
        registry
            .add_type_adapter(TypeAdapterElement::new(
                "crate::WeirdAdapter",
                "crate::Author",
                "String",
                SqlType::Text,
            ))
            .unwrap();
        let round =
            Round::new().with(TypeDecl::new("crate::Author", DeclKind::Struct).table("authors"));

        let res = resolve(&map, &registry, &round, "crate::Author");
        assert_eq!(res.serialized, ROW_ID_TYPE);
        assert_eq!(res.sql_type, Some(SqlType::Integer));
        assert_eq!(res.model_table.as_deref(), Some("authors"));
        assert!(res.requires_type_adapter());
    }

    #[test]
    fn test_adapter_resolution() {
        let map = TypeMap::new();
        let mut registry = Registry::new();
        registry
            .add_type_adapter(TypeAdapterElement::new(
                "modelgen_core::adapter::BoolAdapter",
                "bool",
                "i64",
                SqlType::Integer,
            ))
            .unwrap();
        let round = Round::new();

        let res = resolve(&map, &registry, &round, "bool");
        assert_eq!(res.serialized, "i64");
        assert_eq!(res.sql_type, Some(SqlType::Integer));
        assert!(res.requires_type_adapter());
        assert!(res.model_table.is_none());
    }

    #[test]
    fn test_unmapped_type_has_no_sql_kind() {
        let map = TypeMap::new();
        let registry = Registry::new();
        let round = Round::new();
        let res = resolve(&map, &registry, &round, "crate::Mystery");
        assert_eq!(res.sql_type, None);
        assert!(!res.requires_type_adapter());
    }
}
