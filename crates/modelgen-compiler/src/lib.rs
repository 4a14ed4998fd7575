//! Declaration-driven source generation pipeline.
//!
//! `modelgen-compiler` is the **compile-time half** of modelgen. It consumes
//! a [`Round`] of marked type declarations and produces Rust source
//! artifacts: one model adapter per persisted model and a single adapter
//! holder tying the round together.
//!
//! # Role In The Architecture
//!
//! - **Input model**: [`decl`] describes marked declarations as plain serde
//!   data; any front end that can fill a [`Round`] can drive the pipeline.
//! - **Resolution**: [`resolve`] maps declared types to their SQL-storable
//!   representation via the model set and the adapter registry.
//! - **Steps**: [`step`] runs the five ordered passes over the round.
//! - **Emission**: [`emit`] turns registry metadata into deterministic
//!   source artifacts.
//!
//! # Pipeline Shape
//!
//! ```text
//! Round ──► Processor ──► steps (migration, type-adapter, column,
//!                                model-adapter, adapter-holder)
//!                    └──► RoundOutput { artifacts, diagnostics }
//! ```
//!
//! Bad input never panics the pipeline; offending declarations are excluded
//! and reported through [`Diagnostic`]s. Output order is deterministic:
//! running the same round twice yields byte-identical artifacts.

pub mod decl;
pub mod diag;
pub mod element;
pub mod emit;
pub mod registry;
pub mod resolve;
pub mod step;
pub mod validate;

pub use decl::{ColumnMarker, FieldDecl, ForeignKeyMarker, MethodDecl, Round, TypeDecl};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use emit::SourceArtifact;
pub use registry::Registry;
pub use resolve::{Resolution, TypeMap};
pub use step::ProcessingStep;

/// Failure to load a round description.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to parse round description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything one round produced.
#[derive(Debug)]
pub struct RoundOutput {
    /// Generated sources, in emission order.
    pub artifacts: Vec<SourceArtifact>,
    /// Everything reported against the round's declarations.
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundOutput {
    /// Whether any declaration was rejected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Look up an artifact by name.
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<&SourceArtifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }
}

/// The pipeline driver.
///
/// Owns the immutable [`TypeMap`] and the fixed step list; each call to
/// [`process`](Self::process) runs one independent round against a fresh
/// registry.
pub struct Processor {
    type_map: TypeMap,
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl Processor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            type_map: TypeMap::new(),
            steps: step::default_steps(),
        }
    }

    /// Run the steps over a round.
    #[must_use]
    pub fn process(&self, round: &Round) -> RoundOutput {
        let mut registry = Registry::new();
        for step in &self.steps {
            tracing::debug!(step = step.name(), "running processing step");
            step.process(round, &mut registry, &self.type_map);
        }
        let (artifacts, diagnostics) = registry.into_output();
        RoundOutput {
            artifacts,
            diagnostics: diagnostics.into_vec(),
        }
    }

    /// Parse a JSON round description and run it.
    pub fn process_json(&self, json: &str) -> Result<RoundOutput, CompileError> {
        let round: Round = serde_json::from_str(json)?;
        Ok(self.process(&round))
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_round_emits_only_the_holder() {
        let output = Processor::new().process(&Round::new());
        assert!(!output.has_errors());
        assert_eq!(output.artifacts.len(), 1);
        assert!(output.artifact("AdapterHolderImpl").is_some());
    }

    #[test]
    fn test_process_json_rejects_malformed_input() {
        let err = Processor::new().process_json("{ not json").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }
}
