//! The central object enum.

use std::fmt;

use crate::protocols::{
    Bind, Callable, CallableType, ClassProtocol, Getter, ObjectProtocol, Setter, TypeProtocol,
};
use crate::{
    Argument, BoundField, Class, CoreTypes, Field, Function, FunctionType, Instance, Marker,
    Method, Module, NativeFunction, NativeType, NullableType, OverloadGroup, PartialCall,
    PartialType, SpecialType, TupleType, TypeClass, TypeClassMethod, UnionType, Variable,
};

/// Handle to an object in the runtime arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        ObjectId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a mutable value cell.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct CellId(u32);

impl CellId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        CellId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleValue {
    pub items: Vec<ObjectId>,
    /// Structural type built from the item types at creation.
    pub ty: ObjectId,
}

#[derive(Clone, Debug)]
pub enum Object {
    // Types
    Special(SpecialType),
    Native(NativeType),
    Union(UnionType),
    TupleType(TupleType),
    FunctionType(FunctionType),
    PartialType(PartialType),
    Nullable(NullableType),
    Class(Class),
    TypeClass(TypeClass),

    // Values
    Unit,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(TupleValue),
    Instance(Instance),
    Module(Module),
    Marker(Marker),

    // Callables
    Function(Function),
    NativeFunction(NativeFunction),
    OverloadGroup(OverloadGroup),
    Partial(PartialCall),
    TypeClassMethod(TypeClassMethod),

    // Slots and member descriptors
    Variable(Variable),
    Argument(Argument),
    Field(Field),
    Method(Method),
    BoundField(BoundField),
}

impl Object {
    pub fn as_type(&self) -> Option<&dyn TypeProtocol> {
        match self {
            Object::Special(t) => Some(t),
            Object::Native(t) => Some(t),
            Object::Union(t) => Some(t),
            Object::TupleType(t) => Some(t),
            Object::FunctionType(t) => Some(t),
            Object::PartialType(t) => Some(t),
            Object::Nullable(t) => Some(t),
            Object::Class(t) => Some(t),
            Object::TypeClass(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_callable_type(&self) -> Option<&dyn CallableType> {
        match self {
            Object::FunctionType(t) => Some(t),
            Object::PartialType(t) => Some(t),
            Object::Union(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&dyn Callable> {
        match self {
            Object::Function(f) => Some(f),
            Object::NativeFunction(f) => Some(f),
            Object::OverloadGroup(g) => Some(g),
            Object::Partial(p) => Some(p),
            Object::TypeClassMethod(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_getter(&self) -> Option<&dyn Getter> {
        match self {
            Object::Variable(v) => Some(v),
            Object::Argument(a) => Some(a),
            Object::BoundField(b) => Some(b),
            Object::Field(f) if f.is_static => Some(f),
            _ => None,
        }
    }

    pub fn as_setter(&self) -> Option<&dyn Setter> {
        match self {
            Object::Variable(v) => Some(v),
            Object::Argument(a) => Some(a),
            Object::BoundField(b) => Some(b),
            Object::Field(f) if f.is_static => Some(f),
            _ => None,
        }
    }

    pub fn as_bind(&self) -> Option<&dyn Bind> {
        match self {
            Object::Field(f) => Some(f),
            Object::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&dyn ClassProtocol> {
        match self {
            Object::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Callables that take part in overload merging.
    pub fn is_overloadable(&self) -> bool {
        matches!(
            self,
            Object::Function(_)
                | Object::NativeFunction(_)
                | Object::OverloadGroup(_)
                | Object::Partial(_)
        )
    }

    /// Anything a call expression accepts as its callee.
    pub fn is_callable(&self) -> bool {
        self.as_callable().is_some()
            || matches!(
                self,
                Object::Class(_) | Object::TypeClass(_) | Object::Method(_)
            )
            || matches!(self, Object::Special(SpecialType::Object))
    }
}

impl ObjectProtocol for Object {
    fn runtime_type(&self, core: &CoreTypes) -> ObjectId {
        match self {
            Object::Special(_)
            | Object::Native(_)
            | Object::Union(_)
            | Object::TupleType(_)
            | Object::FunctionType(_)
            | Object::PartialType(_)
            | Object::Nullable(_)
            | Object::Class(_)
            | Object::TypeClass(_) => core.type_,
            Object::Unit => core.unit,
            Object::Null => core.null,
            Object::Bool(_) => core.bool_,
            Object::Int(_) => core.int,
            Object::Float(_) => core.float,
            Object::Str(_) => core.string,
            Object::Tuple(t) => t.ty,
            Object::Instance(i) => i.class,
            Object::Module(_) => core.module,
            Object::Marker(_) => core.object,
            Object::Function(f) => f.signature(),
            Object::NativeFunction(f) => f.signature(),
            Object::OverloadGroup(g) => g.signature(),
            Object::Partial(p) => p.signature(),
            Object::TypeClassMethod(m) => m.signature(),
            Object::Variable(v) => v.ty,
            Object::Argument(a) => a.ty,
            Object::Field(f) => f.ty,
            Object::Method(m) => m.ty,
            Object::BoundField(b) => b.ty,
        }
    }
}
