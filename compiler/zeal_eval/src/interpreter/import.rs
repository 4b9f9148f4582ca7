//! `import` statements and document compilation.

use zeal_diagnostic::Diagnostic;
use zeal_ir::{ImportClause, ImportStmt, NodeId, NodeKind, ParsedDocument, Span};
use zeal_runtime::protocols::ScopeProtocol;
use zeal_runtime::{Object, RuntimeError, RuntimeResult, ScopeId};

use super::Interpreter;
use crate::{EvalResult, ImportResult};

impl Interpreter {
    /// Compile `document` once: it runs in a fresh context in a child of the
    /// global scope, and that scope is memoized under the document's path.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %document.path))]
    pub fn compile_document(&mut self, document: &ParsedDocument) -> RuntimeResult<ScopeId> {
        if let Some(scope) = self.registry.document(&document.path) {
            tracing::trace!("cached");
            return Ok(scope);
        }
        self.registry.begin_document(&document.path)?;
        let global = self.global_scope();
        let scope = self.runtime.new_scope(Some(global));
        self.new_context(scope, document.arena.clone())
            .execute_top_level(&document.statements);
        self.registry.finish_document(&document.path, scope);
        Ok(scope)
    }

    /// Resolve `path` through the import system.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn import(&mut self, path: &str) -> RuntimeResult<ImportResult> {
        let failed = || RuntimeError::ImportFailed {
            path: path.to_owned(),
        };
        let system = self.import_system.clone().ok_or_else(failed)?;
        system.import_from(self, path)?.ok_or_else(failed)
    }

    /// Names a clause cannot find are reported and skipped; the rest are
    /// still bound.
    pub(crate) fn execute_import(&mut self, stmt: &ImportStmt, node: NodeId, span: Span) -> EvalResult {
        let path = self.import_path(stmt.source)?;
        let result = self.import(&path)?;
        let target = self.state.definer;

        match &stmt.clause {
            ImportClause::All => {
                for &(name, value) in result.all() {
                    target.refer(&mut self.runtime, name, value)?;
                }
            }
            ImportClause::Names(items) => {
                for item in items {
                    let Some(value) = result.item(item.name) else {
                        let error = RuntimeError::ImportNameNotFound {
                            name: self.runtime.name(item.name).to_owned(),
                            path: path.clone(),
                        };
                        self.diagnostics.push(
                            Diagnostic::error(error.code())
                                .with_message(error.to_string())
                                .at(node, span),
                        );
                        continue;
                    };
                    let bound = item.alias.unwrap_or(item.name);
                    target.refer(&mut self.runtime, bound, value)?;
                }
            }
            ImportClause::Default(name) => {
                let module = result.into_module(&mut self.runtime, *name)?;
                target.refer(&mut self.runtime, *name, module)?;
            }
        }
        Ok(self.runtime.core().unit_value)
    }

    /// A bare identifier names a module; anything else must evaluate to a
    /// string path.
    fn import_path(&mut self, source: NodeId) -> EvalResult<String> {
        if let NodeKind::Identifier(name) = self.state.arena.kind(source) {
            return Ok(self.runtime.name(*name).to_owned());
        }
        let value = self.evaluate_value(source)?;
        match self.runtime.object(value) {
            Object::Str(path) => Ok(path.clone()),
            _ => Err(RuntimeError::NotAssignable {
                expected: self.runtime.type_name(self.runtime.core().string),
                found: self.runtime.type_name(self.runtime.runtime_type(value)),
            }
            .into()),
        }
    }
}
