//! Core types and runtime contracts for modelgen.
//!
//! `modelgen-core` is the **foundation layer** for the ecosystem. It defines
//! the vocabulary shared between the compile-time pipeline and the code it
//! generates.
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: [`Migration`], [`ModelAdapter`], [`TypeAdapter`],
//!   and [`AdapterHolder`] are the traits the generated sources implement
//!   and the storage layer consumes.
//! - **Data model**: [`SqlType`] and the constraint enums describe what a
//!   column can store and which clauses its DDL carries.
//! - **Built-ins**: the adapters the generator seeds into every round
//!   (`bool` and the date/time types, all stored as `INTEGER`).
//!
//! # Who Uses This Crate
//!
//! - `modelgen-compiler` resolves declared types against [`SqlType`] and
//!   emits sources targeting the traits defined here.
//! - Storage layers link against the generated holder via [`AdapterHolder`].
//!
//! Most applications should use the `modelgen` facade; reach for
//! `modelgen-core` directly when writing a storage integration.

pub mod adapter;
pub mod constraint;
pub mod identifiers;
pub mod types;

pub use adapter::{
    AdapterHolder, BoolAdapter, DateTimeUtcAdapter, HOLDER_IMPL_NAME, HOLDER_IMPL_PATH, Migration,
    ModelAdapter, NaiveDateTimeAdapter, SystemTimeAdapter, TypeAdapter, TypeAdapterEntry,
};
pub use constraint::{
    CollateFunction, ConflictClause, Deferrable, DeferrableTiming, ReferentialAction,
};
pub use identifiers::{is_valid_identifier, sanitize_identifier};
pub use types::SqlType;
