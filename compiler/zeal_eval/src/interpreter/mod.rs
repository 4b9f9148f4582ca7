//! Tree-walking interpreter for Zeal documents.
//!
//! The interpreter owns the [`Runtime`] and a small amount of mutable
//! evaluation state: the current scope, where declarations land, the
//! enclosing module scope, the arena the running nodes live in and the frame
//! stack. Every temporary change of that state goes through a
//! [`ScopedInterpreter`] guard, which puts the previous state back on drop.
//!
//! Node evaluation is split by concern:
//!
//! - `eval`: the node dispatch, literals, names, members, assignment, tuples;
//! - `control_flow`: `if`, `while`, `when`, `break`, `continue`, `return`;
//! - `declarations`: variables, functions, classes, type classes, modules;
//! - `call`: invoking every kind of callable;
//! - `import`: `import` statements and document compilation.

mod builder;
mod call;
mod control_flow;
mod declarations;
mod eval;
mod import;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use zeal_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticLog, ErrorGuaranteed};
use zeal_ir::{ParsedDocument, SharedArena, SharedInterner};
use zeal_runtime::{
    prelude, DefinitionTarget, ObjectId, Runtime, RuntimeError, ScopeId, SharedPrintHandler,
};

use crate::{CallStack, ControlAction, EvalFailure, ImportSystem, ModuleRegistry};

/// One activation: the top-level unit or a function call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Scope the frame started in.
    pub scope: ScopeId,
    /// Function being executed; `None` for a document.
    pub function: Option<ObjectId>,
}

/// State restored by [`ScopedInterpreter`].
#[derive(Clone, Debug)]
pub(crate) struct InterpreterState {
    pub(crate) frames: Vec<Frame>,
    pub(crate) scope: ScopeId,
    pub(crate) definer: DefinitionTarget,
    pub(crate) module_scope: ScopeId,
    pub(crate) arena: SharedArena,
}

impl InterpreterState {
    fn top_level(scope: ScopeId) -> Self {
        InterpreterState {
            frames: vec![Frame {
                scope,
                function: None,
            }],
            scope,
            definer: DefinitionTarget::Scope(scope),
            module_scope: scope,
            arena: SharedArena::default(),
        }
    }
}

pub struct Interpreter {
    pub(crate) runtime: Runtime,
    pub(crate) state: InterpreterState,
    /// Prelude and built-in types; parent of every document scope.
    global: ScopeId,
    pub(crate) diagnostics: DiagnosticLog,
    pub(crate) registry: ModuleRegistry,
    pub(crate) import_system: Option<Rc<dyn ImportSystem>>,
    pub(crate) call_stack: CallStack,
    diagnostic_config: DiagnosticConfig,
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub(crate) fn from_parts(
        interner: SharedInterner,
        print_handler: SharedPrintHandler,
        import_system: Option<Rc<dyn ImportSystem>>,
        call_stack: CallStack,
        diagnostic_config: DiagnosticConfig,
    ) -> Self {
        let mut runtime = Runtime::new(interner, print_handler);
        let mut registry = ModuleRegistry::new();
        let mut diagnostics = DiagnosticLog::with_config(diagnostic_config.clone());
        let global = bootstrap(&mut runtime, &mut registry, &mut diagnostics);
        let main = runtime.new_scope(Some(global));
        Interpreter {
            runtime,
            state: InterpreterState::top_level(main),
            global,
            diagnostics,
            registry,
            import_system,
            call_stack,
            diagnostic_config,
        }
    }

    /// Discard every object, module and diagnostic and start over with a
    /// fresh global scope. The interner, print handler, import system and
    /// limits are kept.
    pub fn reset(&mut self) {
        let interner = self.runtime.interner().clone();
        let print_handler = self.runtime.print_handler().clone();
        self.runtime = Runtime::new(interner, print_handler);
        self.registry.clear();
        self.diagnostics = DiagnosticLog::with_config(self.diagnostic_config.clone());
        self.call_stack.clear();
        self.global = bootstrap(&mut self.runtime, &mut self.registry, &mut self.diagnostics);
        let main = self.runtime.new_scope(Some(self.global));
        self.state = InterpreterState::top_level(main);
        tracing::debug!("interpreter reset");
    }

    // ===== Accessors =====

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    /// Scope that the next statement runs in.
    pub fn current_scope(&self) -> ScopeId {
        self.state.scope
    }

    pub fn frames(&self) -> &[Frame] {
        &self.state.frames
    }

    pub fn set_import_system(&mut self, import_system: Rc<dyn ImportSystem>) {
        self.import_system = Some(import_system);
    }

    /// Current value of `name` as seen from the current scope.
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        let name = self.runtime.intern(name);
        let binding = self.runtime.get_name(self.state.scope, name).ok()?;
        self.runtime.read(binding).ok()
    }

    /// Everything the print handler captured so far.
    pub fn output(&self) -> String {
        self.runtime.print_handler().output()
    }

    // ===== Entry points =====

    /// Run `document` in the current scope and return the value of its last
    /// statement. Failures become diagnostics; nothing is memoized.
    pub fn execute(&mut self, document: &ParsedDocument) -> ObjectId {
        let mut unit = self.enter_arena(document.arena.clone());
        unit.execute_top_level(&document.statements)
    }

    // ===== Diagnostics =====

    /// Record a failure that reached a statement boundary.
    pub(crate) fn report(&mut self, failure: EvalFailure) -> ErrorGuaranteed {
        let mut diagnostic =
            Diagnostic::error(failure.error.code()).with_message(failure.error.to_string());
        if let (Some(node), Some(span)) = (failure.node, failure.span) {
            diagnostic = diagnostic.at(node, span);
        }
        if !self.call_stack.is_empty() {
            let trace = self.call_stack.backtrace(self.runtime.interner());
            diagnostic = diagnostic.with_note(format!("in {}", trace.join(" <- ")));
        }
        tracing::debug!(code = %failure.error.code(), "{}", failure.error);
        self.diagnostics.emit_error(diagnostic)
    }

    /// Record a control signal that left every construct that could catch it.
    pub(crate) fn report_escaped(&mut self, signal: &ControlAction) -> ErrorGuaranteed {
        let construct = match signal {
            ControlAction::Return(_) => "function",
            _ => "loop",
        };
        let error = RuntimeError::ControlOutsideConstruct {
            signal: signal.signal_name(),
            construct,
        };
        self.diagnostics
            .emit_error(Diagnostic::error(error.code()).with_message(error.to_string()))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the global scope and register the `core` module over it.
fn bootstrap(
    runtime: &mut Runtime,
    registry: &mut ModuleRegistry,
    diagnostics: &mut DiagnosticLog,
) -> ScopeId {
    let global = runtime.new_scope(None);
    if let Err(error) = prelude::install(runtime, global) {
        diagnostics.push(Diagnostic::error(error.code()).with_message(error.to_string()));
    }
    let core = runtime.intern("core");
    let module = runtime.new_module(core, global);
    registry.register_module("core", module);
    global
}
