#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use zeal_ir::SharedInterner;
use zeal_runtime::{silent_handler, Runtime};

#[test]
fn test_documents_are_memoized_by_path() {
    let mut rt = Runtime::new(SharedInterner::new(), silent_handler());
    let scope = rt.new_scope(None);
    let mut registry = ModuleRegistry::new();

    registry.begin_document("a.zl").unwrap();
    assert!(registry.is_compiling("a.zl"));
    registry.finish_document("a.zl", scope);

    assert!(!registry.is_compiling("a.zl"));
    assert_eq!(registry.document("a.zl"), Some(scope));
    assert_eq!(registry.document("b.zl"), None);
}

#[test]
fn test_reentering_a_document_is_a_cycle() {
    let mut registry = ModuleRegistry::new();
    registry.begin_document("a.zl").unwrap();
    registry.begin_document("b.zl").unwrap();
    assert_eq!(
        registry.begin_document("a.zl"),
        Err(RuntimeError::CyclicImport {
            path: "a.zl".to_owned()
        })
    );
    assert!(registry.is_compiling("b.zl"));
}

#[test]
fn test_clear_forgets_everything() {
    let mut rt = Runtime::new(SharedInterner::new(), silent_handler());
    let scope = rt.new_scope(None);
    let name = rt.intern("m");
    let module = rt.new_module(name, scope);
    let mut registry = ModuleRegistry::new();
    registry.register_module("m", module);
    registry.finish_document("m.zl", scope);

    assert_eq!(registry.module("m"), Some(module));
    registry.clear();
    assert_eq!(registry.module_count(), 0);
    assert_eq!(registry.document_count(), 0);
}
