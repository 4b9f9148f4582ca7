//! Zeal Eval - tree-walking evaluator for Zeal documents.
//!
//! # Architecture
//!
//! - [`Interpreter`] walks [`zeal_ir`] nodes and drives a
//!   [`zeal_runtime::Runtime`] that owns every object, scope and cell.
//! - [`Interpreter::evaluate_value`] and [`Interpreter::evaluate_binding`]
//!   are the two resolution modes: read through slots, or hand back the
//!   slot itself (assignment targets, reflection).
//! - `return`/`break`/`continue` travel as [`ControlAction`]s on the error
//!   arm of [`EvalResult`], next to real errors, so `?` unwinds both.
//! - Errors are turned into diagnostics at statement boundaries; the failed
//!   statement evaluates to `null` and its siblings still run.
//! - Imports go through an [`ImportSystem`]; compiled documents and declared
//!   modules are memoized in the [`ModuleRegistry`].

mod call_stack;
mod control;
mod import_system;
pub mod interpreter;
mod module_registry;
mod stack;

pub use call_stack::{CallFrame, CallStack, DEFAULT_MAX_CALL_DEPTH};
pub use control::{ControlAction, EvalFailure, EvalResult};
pub use import_system::{DocumentImportSystem, ImportResult, ImportSystem};
pub use interpreter::{Frame, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use module_registry::ModuleRegistry;
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the process-wide tracing subscriber.
///
/// Reads the filter from `ZEAL_LOG`, falling back to `RUST_LOG`; does nothing
/// when neither is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Some(directives) = std::env::var("ZEAL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"));
        let tree = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        // Another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
    });
}

#[cfg(test)]
mod tests;
