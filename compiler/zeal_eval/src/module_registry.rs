//! Named modules and compiled documents, memoized per compilation run.

use rustc_hash::FxHashMap;
use zeal_runtime::{ObjectId, RuntimeError, ScopeId};

#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// Module objects by name: `core` and every declared `module`.
    modules: FxHashMap<String, ObjectId>,
    /// Result scope of each compiled document, by path.
    documents: FxHashMap<String, ScopeId>,
    /// Documents currently being compiled, outermost first.
    in_progress: Vec<String>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module; a later module under the same name replaces it.
    pub fn register_module(&mut self, name: impl Into<String>, module: ObjectId) {
        self.modules.insert(name.into(), module);
    }

    pub fn module(&self, name: &str) -> Option<ObjectId> {
        self.modules.get(name).copied()
    }

    pub fn document(&self, path: &str) -> Option<ScopeId> {
        self.documents.get(path).copied()
    }

    /// Mark `path` as being compiled; fails if it already is.
    pub fn begin_document(&mut self, path: &str) -> Result<(), RuntimeError> {
        if self.in_progress.iter().any(|p| p == path) {
            return Err(RuntimeError::CyclicImport {
                path: path.to_owned(),
            });
        }
        self.in_progress.push(path.to_owned());
        Ok(())
    }

    /// Close `path` and remember its scope.
    pub fn finish_document(&mut self, path: &str, scope: ScopeId) {
        self.in_progress.retain(|p| p != path);
        self.documents.insert(path.to_owned(), scope);
    }

    pub fn is_compiling(&self, path: &str) -> bool {
        self.in_progress.iter().any(|p| p == path)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn clear(&mut self) {
        self.modules.clear();
        self.documents.clear();
        self.in_progress.clear();
    }
}

#[cfg(test)]
mod tests;
