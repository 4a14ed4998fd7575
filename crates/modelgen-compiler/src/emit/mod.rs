//! Source emission.
//!
//! Emitters turn registry metadata into complete Rust source artifacts. They
//! are plain string builders: deterministic input order in, byte-identical
//! output out.

mod holder;
mod model_adapter;

pub use holder::AdapterHolderWriter;
pub use model_adapter::{ModelAdapterWriter, create_table_sql};

/// Banner at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Generated by modelgen. Do not modify!\n";

/// One generated source file: its artifact name and full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    pub name: String,
    pub source: String,
}

impl SourceArtifact {
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// An emitter for one element kind.
pub trait SourceWriter {
    type Element;

    /// Artifact name for the element.
    fn source_name(&self, element: &Self::Element) -> String;

    /// Append the complete generated source to `out`.
    fn write_source(&self, out: &mut String, element: &Self::Element);

    /// Emit the element as a finished artifact.
    fn artifact(&self, element: &Self::Element) -> SourceArtifact {
        let mut source = String::new();
        self.write_source(&mut source, element);
        SourceArtifact::new(self.source_name(element), source)
    }
}

/// Render a string as a double-quoted Rust literal.
pub(crate) fn rust_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
