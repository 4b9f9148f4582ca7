//! Type classes: interfaces implemented per concrete type after the fact.
//!
//! A type class owns a scope of member declarations (usually functions
//! without a body) and a registry `type -> implementation class`. The
//! implementation class is an ordinary class whose methods take `this` of
//! the implemented type.

use rustc_hash::FxHashMap;
use zeal_ir::Name;

use crate::protocols::{Callable, ScopeProtocol, TypeProtocol};
use crate::{Object, ObjectId, Runtime, RuntimeError, RuntimeResult, ScopeId};

#[derive(Clone, Debug)]
pub struct TypeClass {
    pub name: Name,
    /// Interface declarations; parent is the lexical scope.
    pub scope: ScopeId,
    implementations: FxHashMap<ObjectId, ObjectId>,
    /// Implemented types in registration order.
    order: Vec<ObjectId>,
}

impl TypeClass {
    pub fn implementation(&self, ty: ObjectId) -> Option<ObjectId> {
        self.implementations.get(&ty).copied()
    }

    pub fn implemented_types(&self) -> &[ObjectId] {
        &self.order
    }
}

impl TypeProtocol for TypeClass {
    fn assignable_from(&self, _rt: &Runtime, source: ObjectId) -> bool {
        self.implementations.contains_key(&source)
    }

    fn type_name(&self, rt: &Runtime) -> String {
        rt.name(self.name).to_owned()
    }
}

/// `TC.member`: dispatches on the runtime type of the first argument.
#[derive(Clone, Debug)]
pub struct TypeClassMethod {
    pub type_class: ObjectId,
    pub name: Name,
    signature: ObjectId,
}

impl Callable for TypeClassMethod {
    fn callable_name(&self) -> Option<Name> {
        Some(self.name)
    }

    fn signature(&self) -> ObjectId {
        self.signature
    }
}

/// A type class as a definition target for its interface body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeClassScope(pub ObjectId);

impl ScopeProtocol for TypeClassScope {
    fn define(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        let scope = rt.type_class_scope(self.0)?;
        rt.define(scope, name, value)
    }

    fn refer(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        let scope = rt.type_class_scope(self.0)?;
        rt.refer(scope, name, value)
    }

    fn get_name(&self, rt: &Runtime, name: Name) -> RuntimeResult<ObjectId> {
        rt.get_name(rt.type_class_scope(self.0)?, name)
    }
}

impl Runtime {
    pub fn new_type_class(&mut self, name: Name, lexical_scope: ScopeId) -> ObjectId {
        let scope = self.new_scope(Some(lexical_scope));
        tracing::debug!(type_class = self.name(name), "new type class");
        self.alloc(Object::TypeClass(TypeClass {
            name,
            scope,
            implementations: FxHashMap::default(),
            order: Vec::new(),
        }))
    }

    pub fn type_class(&self, id: ObjectId) -> Option<&TypeClass> {
        match self.object(id) {
            Object::TypeClass(tc) => Some(tc),
            _ => None,
        }
    }

    fn expect_type_class(&self, id: ObjectId) -> RuntimeResult<&TypeClass> {
        self.type_class(id).ok_or_else(|| RuntimeError::NotATypeClass {
            found: self.display(id),
        })
    }

    pub fn type_class_scope(&self, type_class: ObjectId) -> RuntimeResult<ScopeId> {
        Ok(self.expect_type_class(type_class)?.scope)
    }

    /// Class shell for `impl TC for T`, named `TC.T`. Fails before
    /// allocating anything when `T` already implements `TC`.
    pub fn new_implementation_class(
        &mut self,
        type_class: ObjectId,
        implemented_type: ObjectId,
        lexical_scope: ScopeId,
    ) -> RuntimeResult<ObjectId> {
        self.ensure_unimplemented(type_class, implemented_type)?;
        let tc_name = self.expect_type_class(type_class)?.name;
        let name = format!("{}.{}", self.name(tc_name), self.type_name(implemented_type));
        let name = self.intern(&name);
        let class = self.new_class(Some(name), None, lexical_scope)?;
        self.set_implemented_type(class, implemented_type)?;
        Ok(class)
    }

    /// Register `implementation` for `ty`; a type implements a class once.
    pub fn add_implementation(
        &mut self,
        type_class: ObjectId,
        ty: ObjectId,
        implementation: ObjectId,
    ) -> RuntimeResult<()> {
        self.ensure_unimplemented(type_class, ty)?;
        if let Object::TypeClass(tc) = self.object_mut(type_class) {
            tc.implementations.insert(ty, implementation);
            tc.order.push(ty);
        }
        tracing::debug!(
            type_class = %self.type_name(type_class),
            ty = %self.type_name(ty),
            "registered implementation"
        );
        Ok(())
    }

    fn ensure_unimplemented(&self, type_class: ObjectId, ty: ObjectId) -> RuntimeResult<()> {
        if self.expect_type_class(type_class)?.implementations.contains_key(&ty) {
            return Err(RuntimeError::AlreadyImplemented {
                type_class: self.type_name(type_class),
                ty: self.type_name(ty),
            });
        }
        Ok(())
    }

    /// `TC(T)`: the implementation class registered for `ty`.
    pub fn implementation(&self, type_class: ObjectId, ty: ObjectId) -> RuntimeResult<ObjectId> {
        self.expect_type_class(type_class)?
            .implementation(ty)
            .ok_or_else(|| RuntimeError::TypeClassNotImplemented {
                type_class: self.type_name(type_class),
                ty: self.type_name(ty),
            })
    }

    /// `TC.member`: a dispatcher for an interface member.
    pub fn type_class_method(&mut self, type_class: ObjectId, name: Name) -> RuntimeResult<ObjectId> {
        let scope = self.type_class_scope(type_class)?;
        if self.scope(scope).get(name).is_none() {
            return Err(RuntimeError::UnknownMember {
                member: self.name(name).to_owned(),
                ty: self.type_name(type_class),
            });
        }
        let any = self.core().any;
        let signature = self.new_function_type(Vec::new(), any, true);
        Ok(self.alloc(Object::TypeClassMethod(TypeClassMethod {
            type_class,
            name,
            signature,
        })))
    }

    /// Callable that a dispatcher call forwards to, chosen by the runtime
    /// type of the first argument. The result takes the same arguments.
    pub fn dispatch_type_class_method(
        &mut self,
        method: ObjectId,
        arguments: &[ObjectId],
    ) -> RuntimeResult<ObjectId> {
        let (type_class, name) = match self.object(method) {
            Object::TypeClassMethod(m) => (m.type_class, m.name),
            _ => {
                return Err(RuntimeError::NotCallable {
                    found: self.display(method),
                })
            }
        };
        let Some(&receiver) = arguments.first() else {
            return Err(RuntimeError::WrongArity {
                expected: 1,
                found: 0,
            });
        };
        let ty = self.runtime_type(receiver);
        let implementation = self.implementation(type_class, ty)?;
        self.class_member(implementation, implementation, name)
    }

    /// Interface members an implementation class does not define itself.
    pub fn missing_members(&self, type_class: ObjectId, implementation: ObjectId) -> RuntimeResult<Vec<Name>> {
        let interface = self.type_class_scope(type_class)?;
        let own = self.class_scope(implementation)?;
        Ok(self
            .scope_members(interface)
            .into_iter()
            .map(|(name, _)| name)
            .filter(|&name| self.scope(own).get(name).is_none())
            .collect())
    }
}
