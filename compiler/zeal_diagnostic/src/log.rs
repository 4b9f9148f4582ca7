//! Append-only diagnostic log.
//!
//! Order of insertion is preserved; nothing is sorted or deduplicated, so
//! the log reads in evaluation order.

use crate::{Diagnostic, ErrorGuaranteed, Severity};

/// Configuration for the diagnostic log.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited). Errors past the limit
    /// are counted but not stored.
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

impl DiagnosticConfig {
    pub fn with_error_limit(error_limit: usize) -> Self {
        DiagnosticConfig { error_limit }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
    config: DiagnosticConfig,
    error_count: usize,
    suppressed: usize,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticLog {
            config,
            ..Self::default()
        }
    }

    /// Append a diagnostic of any severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
            if self.limit_reached() {
                self.suppressed += 1;
                return;
            }
        }
        self.diagnostics.push(diagnostic);
    }

    /// Append an error diagnostic and return proof that it was logged.
    ///
    /// # Panics
    /// Debug-asserts that `diagnostic` has error severity.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error());
        self.push(diagnostic);
        ErrorGuaranteed::new()
    }

    fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count > self.config.error_limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Errors logged, including the ones dropped by the error limit.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Errors dropped because of the error limit.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take every stored diagnostic, leaving the log empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.suppressed = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests;
