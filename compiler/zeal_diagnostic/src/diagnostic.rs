use std::fmt;

use zeal_ir::{NodeId, Span};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One message in the diagnostic log.
///
/// `node` references the originating node of the document being evaluated;
/// the span is carried alongside so the message can be located without the
/// arena.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be logged or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub node: Option<NodeId>,
    pub span: Option<Span>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            node: None,
            span: None,
            notes: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn info(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Info)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the originating node and its span.
    pub fn at(mut self, node: NodeId, span: Span) -> Self {
        self.node = Some(node);
        self.span = Some(span);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        if let Some(span) = self.span {
            write!(f, "\n  --> {span}")?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::error(ErrorCode::E1001)
            .with_message("name `x` is not defined")
            .at(NodeId::new(3), Span::new(10, 11))
            .with_note("defined names are looked up lexically");

        assert_eq!(diag.code, ErrorCode::E1001);
        assert_eq!(diag.node, Some(NodeId::new(3)));
        assert_eq!(diag.notes.len(), 1);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning(ErrorCode::E3004)
            .with_message("missing member `show`")
            .at(NodeId::new(0), Span::new(2, 8));

        assert_eq!(
            diag.to_string(),
            "warning [E3004]: missing member `show`\n  --> 2..8"
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
