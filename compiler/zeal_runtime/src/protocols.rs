//! Capability traits shared by runtime entities.
//!
//! Objects live in the [`Runtime`] arena, so every trait method receives the
//! runtime it needs to look at other objects. Methods that allocate take
//! `&mut Runtime` and are called on a copy of the object taken out of the
//! arena.
//!
//! All compatibility checks go through [`TypeProtocol::assignable_from`]:
//! "does a value of type `S` fit a slot of type `T`" is always asked of `T`.

use zeal_ir::Name;

use crate::{CellId, CoreTypes, ObjectId, Runtime, RuntimeError, RuntimeResult, ScopeId};

/// Anything with a runtime type.
pub trait ObjectProtocol {
    fn runtime_type(&self, core: &CoreTypes) -> ObjectId;
}

/// An object usable as a type.
pub trait TypeProtocol {
    /// Whether values whose runtime type is `source` are accepted.
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool;

    /// Override consulted before `target.assignable_from(self)`.
    ///
    /// `None` defers to the target.
    fn assignable_to(&self, _rt: &Runtime, _target: ObjectId) -> Option<bool> {
        None
    }

    fn default_value(&self, rt: &mut Runtime) -> RuntimeResult<ObjectId> {
        Err(RuntimeError::NoDefaultValue {
            ty: self.type_name(rt),
        })
    }

    fn type_name(&self, rt: &Runtime) -> String;
}

/// A type whose values can be called.
pub trait CallableType {
    /// Result type of calling a value of this type with `arguments`
    /// (argument types), or the reason the call does not type-check.
    fn type_of_application(&self, rt: &Runtime, arguments: &[ObjectId])
        -> RuntimeResult<ObjectId>;
}

/// A callable value.
pub trait Callable {
    fn callable_name(&self) -> Option<Name>;

    /// The callable's type, used for overload matching.
    fn signature(&self) -> ObjectId;
}

/// A readable slot.
pub trait Getter {
    fn get(&self, rt: &Runtime) -> RuntimeResult<ObjectId>;
}

/// A writable slot.
pub trait Setter {
    /// Type every stored value must be assignable to.
    fn slot_type(&self) -> ObjectId;

    /// Cell receiving the written value.
    fn target_cell(&self, rt: &Runtime) -> RuntimeResult<CellId>;
}

/// Produces a receiver-bound copy of a member.
pub trait Bind {
    fn bind(&self, rt: &mut Runtime, receiver: ObjectId) -> RuntimeResult<ObjectId>;
}

/// A constructible, subclassable type.
pub trait ClassProtocol {
    fn base(&self) -> ObjectId;

    /// Scope holding the class members.
    fn member_scope(&self) -> ScopeId;
}

/// Something declarations can be defined into.
pub trait ScopeProtocol {
    /// Bind and record ownership.
    fn define(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()>;

    /// Bind a declaration marked `static`. Only class scopes distinguish it.
    fn define_static(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.define(rt, name, value)
    }

    /// Bind without ownership.
    fn refer(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()>;

    fn get_name(&self, rt: &Runtime, name: Name) -> RuntimeResult<ObjectId>;
}
