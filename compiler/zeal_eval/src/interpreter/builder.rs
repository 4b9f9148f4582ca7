//! `InterpreterBuilder` for creating interpreters with non-default settings.

use std::rc::Rc;

use zeal_diagnostic::DiagnosticConfig;
use zeal_ir::SharedInterner;
use zeal_runtime::{stdout_handler, SharedPrintHandler};

use super::Interpreter;
use crate::{CallStack, ImportSystem, DEFAULT_MAX_CALL_DEPTH};

/// Builder for [`Interpreter`].
///
/// Defaults: a fresh interner, printing to stdout, no import system, a call
/// depth limit of [`DEFAULT_MAX_CALL_DEPTH`] and no diagnostic error limit.
#[must_use]
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    import_system: Option<Rc<dyn ImportSystem>>,
    max_call_depth: usize,
    error_limit: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            interner: None,
            print_handler: None,
            import_system: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            error_limit: 0,
        }
    }

    /// Share names with the code that built the documents.
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn import_system(mut self, import_system: impl ImportSystem + 'static) -> Self {
        self.import_system = Some(Rc::new(import_system));
        self
    }

    pub fn shared_import_system(mut self, import_system: Rc<dyn ImportSystem>) -> Self {
        self.import_system = Some(import_system);
        self
    }

    /// Calls allowed to be active at once.
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Errors kept in the diagnostic log; 0 keeps all of them.
    pub fn error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter::from_parts(
            self.interner.unwrap_or_default(),
            self.print_handler.unwrap_or_else(stdout_handler),
            self.import_system,
            CallStack::new(self.max_call_depth),
            DiagnosticConfig::with_error_limit(self.error_limit),
        )
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
