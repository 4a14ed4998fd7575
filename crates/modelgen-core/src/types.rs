//! SQL-storable type kinds.

use serde::{Deserialize, Serialize};

/// The fixed, finite set of column storage kinds the generator can emit.
///
/// Every column's serialized type must resolve to exactly one of these.
/// A declared type with no mapping (directly or through a type adapter)
/// is a resolution error, not a fifth kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// Raw byte payloads.
    Blob,
    /// Floating point values.
    Real,
    /// Integral values, including surrogate row identifiers.
    Integer,
    /// UTF-8 text.
    Text,
}

impl SqlType {
    /// Get the SQL spelling of this kind as it appears in emitted DDL.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            SqlType::Blob => "BLOB",
            SqlType::Real => "REAL",
            SqlType::Integer => "INTEGER",
            SqlType::Text => "TEXT",
        }
    }

    /// Parse a SQL kind from its spelling (case-insensitive).
    ///
    /// Returns `None` for anything outside the fixed set.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BLOB" => Some(SqlType::Blob),
            "REAL" => Some(SqlType::Real),
            "INTEGER" => Some(SqlType::Integer),
            "TEXT" => Some(SqlType::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_name())
    }
}
