//! Declaration-driven schema and adapter code generation.
//!
//! `modelgen` is the **facade crate**: one import that exposes the runtime
//! contracts from `modelgen-core` and the generation pipeline from
//! `modelgen-compiler`.
//!
//! # Quick Tour
//!
//! Describe the marked declarations of a compilation round, run the
//! processor, and write the resulting artifacts wherever your build wants
//! them:
//!
//! ```
//! use modelgen::{ColumnMarker, FieldDecl, Processor, Round, TypeDecl};
//! use modelgen::decl::DeclKind;
//!
//! let round = Round::new().with(
//!     TypeDecl::new("crate::models::Note", DeclKind::Struct)
//!         .table("notes")
//!         .field(
//!             FieldDecl::new("_id", "i64")
//!                 .column(ColumnMarker::new("_id").primary_key().auto_increment()),
//!         )
//!         .field(FieldDecl::new("title", "String").column(ColumnMarker::new("title"))),
//! );
//!
//! let output = Processor::new().process(&round);
//! assert!(!output.has_errors());
//! assert!(output.artifact("Note$$ModelAdapter").is_some());
//! ```
//!
//! Generated sources implement the `modelgen-core` traits re-exported here;
//! a storage layer consumes them through [`AdapterHolder`].

pub use modelgen_compiler::{
    ColumnMarker, CompileError, Diagnostic, Diagnostics, FieldDecl, ForeignKeyMarker, MethodDecl,
    Processor, Registry, Resolution, Round, RoundOutput, Severity, SourceArtifact, TypeDecl,
    TypeMap, decl, diag, element, emit, registry, resolve, step, validate,
};
pub use modelgen_core::{
    AdapterHolder, BoolAdapter, CollateFunction, ConflictClause, DateTimeUtcAdapter, Deferrable,
    DeferrableTiming, HOLDER_IMPL_NAME, HOLDER_IMPL_PATH, Migration, ModelAdapter,
    NaiveDateTimeAdapter, ReferentialAction, SqlType, SystemTimeAdapter, TypeAdapter,
    TypeAdapterEntry, adapter, constraint, identifiers, types,
};
