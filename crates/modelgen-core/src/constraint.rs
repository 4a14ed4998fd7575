//! Column constraint vocabulary shared between markers and emitted DDL.

use serde::{Deserialize, Serialize};

/// SQLite conflict resolution algorithm for NOT NULL and UNIQUE constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictClause {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl ConflictClause {
    /// Get the SQL keyword for this conflict algorithm.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            ConflictClause::Rollback => "ROLLBACK",
            ConflictClause::Abort => "ABORT",
            ConflictClause::Fail => "FAIL",
            ConflictClause::Ignore => "IGNORE",
            ConflictClause::Replace => "REPLACE",
        }
    }

    /// Parse a conflict algorithm from a string (case-insensitive).
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ROLLBACK" => Some(ConflictClause::Rollback),
            "ABORT" => Some(ConflictClause::Abort),
            "FAIL" => Some(ConflictClause::Fail),
            "IGNORE" => Some(ConflictClause::Ignore),
            "REPLACE" => Some(ConflictClause::Replace),
            _ => None,
        }
    }
}

/// Referential action for foreign key constraints (ON DELETE / ON UPDATE).
///
/// An absent action means the clause is omitted from the emitted DDL
/// entirely, which is why there is no `NoAction` default variant here:
/// columns carry `Option<ReferentialAction>` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// Set referencing columns to NULL.
    SetNull,
    /// Set referencing columns to their default values.
    SetDefault,
    /// Automatically delete/update referencing rows.
    Cascade,
    /// Raise an error if any references exist.
    Restrict,
    /// Explicit NO ACTION clause.
    NoAction,
}

impl ReferentialAction {
    /// Get the SQL representation of this action.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
        }
    }

    /// Parse a referential action from a string (case-insensitive).
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SET NULL" | "SETNULL" | "SET_NULL" => Some(ReferentialAction::SetNull),
            "SET DEFAULT" | "SETDEFAULT" | "SET_DEFAULT" => Some(ReferentialAction::SetDefault),
            "CASCADE" => Some(ReferentialAction::Cascade),
            "RESTRICT" => Some(ReferentialAction::Restrict),
            "NO ACTION" | "NOACTION" | "NO_ACTION" => Some(ReferentialAction::NoAction),
            _ => None,
        }
    }
}

/// Foreign key deferrable clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferrable {
    Deferrable,
    NotDeferrable,
}

impl Deferrable {
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Deferrable::Deferrable => "DEFERRABLE",
            Deferrable::NotDeferrable => "NOT DEFERRABLE",
        }
    }
}

/// Timing qualifier for a deferrable foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferrableTiming {
    InitiallyDeferred,
    InitiallyImmediate,
}

impl DeferrableTiming {
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            DeferrableTiming::InitiallyDeferred => "INITIALLY DEFERRED",
            DeferrableTiming::InitiallyImmediate => "INITIALLY IMMEDIATE",
        }
    }
}

/// Collating function for text columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollateFunction {
    Binary,
    NoCase,
    RTrim,
}

impl CollateFunction {
    /// Get the SQL keyword for this collating function.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            CollateFunction::Binary => "BINARY",
            CollateFunction::NoCase => "NOCASE",
            CollateFunction::RTrim => "RTRIM",
        }
    }

    /// Parse a collating function from a string (case-insensitive).
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BINARY" => Some(CollateFunction::Binary),
            "NOCASE" => Some(CollateFunction::NoCase),
            "RTRIM" => Some(CollateFunction::RTrim),
            _ => None,
        }
    }
}
