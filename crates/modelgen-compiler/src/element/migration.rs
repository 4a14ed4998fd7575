//! Registered migration metadata.

/// One versioned schema-change step discovered in the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationElement {
    qualified_name: String,
    version: i64,
}

impl MigrationElement {
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, version: i64) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            version,
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

    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }
}
