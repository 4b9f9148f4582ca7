//! Modules, loop markers and the definition-target sum type.

use zeal_ir::Name;

use crate::protocols::ScopeProtocol;
use crate::{ClassScope, Object, ObjectId, Runtime, RuntimeResult, ScopeId, TypeClassScope};

/// A named scope whose members are reachable through member access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub name: Name,
    pub scope: ScopeId,
}

/// Identity token bound to the name of a `while` or `when`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub name: Option<Name>,
}

/// Where declarations of the current body land.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefinitionTarget {
    Scope(ScopeId),
    Class(ClassScope),
    TypeClass(TypeClassScope),
}

impl DefinitionTarget {
    fn target(&self) -> &dyn ScopeProtocol {
        match self {
            DefinitionTarget::Scope(scope) => scope,
            DefinitionTarget::Class(class) => class,
            DefinitionTarget::TypeClass(type_class) => type_class,
        }
    }
}

impl ScopeProtocol for DefinitionTarget {
    fn define(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.target().define(rt, name, value)
    }

    fn define_static(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.target().define_static(rt, name, value)
    }

    fn refer(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.target().refer(rt, name, value)
    }

    fn get_name(&self, rt: &Runtime, name: Name) -> RuntimeResult<ObjectId> {
        self.target().get_name(rt, name)
    }
}

impl Runtime {
    pub fn new_module(&mut self, name: Name, scope: ScopeId) -> ObjectId {
        tracing::debug!(module = self.name(name), "new module");
        self.alloc(Object::Module(Module { name, scope }))
    }

    pub fn module(&self, id: ObjectId) -> Option<&Module> {
        match self.object(id) {
            Object::Module(m) => Some(m),
            _ => None,
        }
    }
}
