//! Registered model-adapter metadata.

use modelgen_core::sanitize_identifier;

/// One model whose adapter artifact has been (or is about to be) emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAdapterElement {
    model_qualified_name: String,
    table_name: String,
}

impl ModelAdapterElement {
    #[must_use]
    pub fn new(model_qualified_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            model_qualified_name: model_qualified_name.into(),
            table_name: table_name.into(),
        }
    }

    #[must_use]
    pub fn model_qualified_name(&self) -> &str {
        &self.model_qualified_name
    }

    #[must_use]
    pub fn model_simple_name(&self) -> &str {
        self.model_qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.model_qualified_name)
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Artifact naming contract: `<ModelSimpleName>$$ModelAdapter`.
    #[must_use]
    pub fn artifact_name(&self) -> String {
        format!("{}$$ModelAdapter", self.model_simple_name())
    }

    /// Rust type ident used inside the generated source (`$` cannot appear
    /// in an ident, so `$$` becomes `__`).
    #[must_use]
    pub fn type_ident(&self) -> String {
        sanitize_identifier(&self.artifact_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_contract() {
        let element = ModelAdapterElement::new("crate::models::Note", "notes");
        assert_eq!(element.model_simple_name(), "Note");
        assert_eq!(element.artifact_name(), "Note$$ModelAdapter");
        assert_eq!(element.type_ident(), "Note__ModelAdapter");
    }
}
