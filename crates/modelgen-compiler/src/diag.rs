//! Diagnostic reporting.
//!
//! The pipeline never panics on bad input. Every rule violation is recorded
//! against the offending declaration and the round keeps going; callers
//! inspect the collected diagnostics after the round completes.

use serde::Serialize;

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The declaration was excluded from generation.
    Error,
    Warning,
    Note,
}

/// One message reported against a declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Qualified name (optionally `::field`-suffixed) of the declaration
    /// the message is about.
    pub element: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        write!(f, "{tag}: {}: {}", self.element, self.message)
    }
}

/// Collecting sink for diagnostics, owned by the registry for one round.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an error against a declaration.
    pub fn error(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, element, message);
    }

    /// Report a warning against a declaration.
    pub fn warning(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, element, message);
    }

    /// Report a note against a declaration.
    pub fn note(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Note, element, message);
    }

    fn push(&mut self, severity: Severity, element: impl Into<String>, message: impl Into<String>) {
        let entry = Diagnostic {
            severity,
            element: element.into(),
            message: message.into(),
        };
        tracing::debug!(diagnostic = %entry, "reported");
        self.entries.push(entry);
    }

    /// Whether any error-severity diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Consume the sink, yielding the collected diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut sink = Diagnostics::new();
        sink.error("a::B", "first");
        sink.warning("a::C", "second");
        let entries = sink.into_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].severity, Severity::Warning);
    }

    #[test]
    fn test_has_errors() {
        let mut sink = Diagnostics::new();
        assert!(!sink.has_errors());
        sink.note("a::B", "info");
        assert!(!sink.has_errors());
        sink.error("a::B", "bad");
        assert!(sink.has_errors());
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic {
            severity: Severity::Error,
            element: "crate::Note::date".to_string(),
            message: "no SQL type".to_string(),
        };
        assert_eq!(diag.to_string(), "error: crate::Note::date: no SQL type");
    }
}
