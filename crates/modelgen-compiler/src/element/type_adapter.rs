//! Registered type-adapter metadata.

use modelgen_core::SqlType;

/// One pluggable (deserialized, serialized) conversion, validated so that
/// the serialized side is directly SQL-storable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAdapterElement {
    qualified_name: String,
    deserialized: String,
    serialized: String,
    sql_type: SqlType,
}

impl TypeAdapterElement {
    #[must_use]
    pub fn new(
        qualified_name: impl Into<String>,
        deserialized: impl Into<String>,
        serialized: impl Into<String>,
        sql_type: SqlType,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            deserialized: deserialized.into(),
            serialized: serialized.into(),
            sql_type,
        }
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Canonical declared type the adapter reads and writes.
    #[must_use]
    pub fn deserialized(&self) -> &str {
        &self.deserialized
    }

    /// Canonical SQL-storable type the adapter converts to.
    #[must_use]
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// SQL kind of the serialized type.
    #[must_use]
    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }
}
