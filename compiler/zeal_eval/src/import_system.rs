//! The import boundary.
//!
//! The evaluator never reads files. An [`ImportSystem`] turns an import
//! source into an [`ImportResult`]: the exported bindings of a module or of a
//! compiled document.

use rustc_hash::FxHashMap;
use zeal_ir::{Name, ParsedDocument};
use zeal_runtime::{ObjectId, Runtime, RuntimeResult, ScopeId};

use crate::Interpreter;

/// Bindings exported by one imported unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportResult {
    /// Scope the bindings were taken from, if any.
    scope: Option<ScopeId>,
    items: Vec<(Name, ObjectId)>,
}

impl ImportResult {
    pub fn new(items: Vec<(Name, ObjectId)>) -> Self {
        ImportResult { scope: None, items }
    }

    /// The owned members of `scope`, in definition order. Names the scope
    /// only `refer`s (its own imports) are not exported.
    pub fn from_scope(rt: &Runtime, scope: ScopeId) -> Self {
        ImportResult {
            scope: Some(scope),
            items: rt.scope_members(scope),
        }
    }

    pub fn all(&self) -> &[(Name, ObjectId)] {
        &self.items
    }

    pub fn item(&self, name: Name) -> Option<ObjectId> {
        self.items
            .iter()
            .find_map(|&(n, value)| (n == name).then_some(value))
    }

    /// The whole unit as a module object named `name`.
    pub fn into_module(self, rt: &mut Runtime, name: Name) -> RuntimeResult<ObjectId> {
        let scope = match self.scope {
            Some(scope) => scope,
            None => {
                let scope = rt.new_scope(None);
                for (item, value) in self.items {
                    rt.refer(scope, item, value)?;
                }
                scope
            }
        };
        Ok(rt.new_module(name, scope))
    }
}

pub trait ImportSystem {
    /// Resolve `path`. `Ok(None)` means nothing answers to that path.
    fn import_from(
        &self,
        interpreter: &mut Interpreter,
        path: &str,
    ) -> RuntimeResult<Option<ImportResult>>;
}

/// Serves registered modules by name and in-memory documents by path.
#[derive(Debug, Default)]
pub struct DocumentImportSystem {
    documents: FxHashMap<String, ParsedDocument>,
}

impl DocumentImportSystem {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, document: ParsedDocument) -> Self {
        self.add_document(document);
        self
    }

    pub fn add_document(&mut self, document: ParsedDocument) {
        self.documents.insert(document.path.clone(), document);
    }

    pub fn document(&self, path: &str) -> Option<&ParsedDocument> {
        self.documents.get(path)
    }
}

impl ImportSystem for DocumentImportSystem {
    fn import_from(
        &self,
        interpreter: &mut Interpreter,
        path: &str,
    ) -> RuntimeResult<Option<ImportResult>> {
        if let Some(module) = interpreter.registry().module(path) {
            let scope = interpreter.runtime().module(module).map(|m| m.scope);
            return Ok(scope.map(|scope| ImportResult::from_scope(interpreter.runtime(), scope)));
        }
        let Some(document) = self.documents.get(path) else {
            return Ok(None);
        };
        let scope = interpreter.compile_document(document)?;
        Ok(Some(ImportResult::from_scope(interpreter.runtime(), scope)))
    }
}
