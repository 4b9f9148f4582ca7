//! Built-in and structural types.

use crate::protocols::{CallableType, TypeProtocol};
use crate::{Object, ObjectId, Runtime, RuntimeError, RuntimeResult};

/// Singleton types created once per runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SpecialType {
    /// The type of types.
    Type,
    /// Accepts nothing and flows nowhere.
    Void,
    /// Single-valued type.
    Unit,
    /// Accepts everything; flows only into itself.
    Any,
    /// Type of the single `null` instance.
    Null,
    /// Root class every class is subordinate to.
    Object,
    /// Type of module objects.
    Module,
}

impl TypeProtocol for SpecialType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        let core = rt.core();
        match self {
            SpecialType::Type => rt.is_type(source),
            SpecialType::Void => false,
            SpecialType::Any => true,
            SpecialType::Unit => source == core.unit,
            SpecialType::Null => source == core.null,
            SpecialType::Module => source == core.module,
            SpecialType::Object => {
                source == core.object || matches!(rt.object(source), Object::Class(_))
            }
        }
    }

    fn assignable_to(&self, rt: &Runtime, target: ObjectId) -> Option<bool> {
        match self {
            SpecialType::Void => Some(false),
            SpecialType::Any => Some(target == rt.core().any),
            _ => None,
        }
    }

    fn default_value(&self, rt: &mut Runtime) -> RuntimeResult<ObjectId> {
        match self {
            SpecialType::Unit => Ok(rt.core().unit_value),
            SpecialType::Null => Ok(rt.core().null_value),
            _ => Err(RuntimeError::NoDefaultValue {
                ty: self.type_name(rt),
            }),
        }
    }

    fn type_name(&self, _rt: &Runtime) -> String {
        match self {
            SpecialType::Type => "type",
            SpecialType::Void => "void",
            SpecialType::Unit => "unit",
            SpecialType::Any => "any",
            SpecialType::Null => "null",
            SpecialType::Object => "object",
            SpecialType::Module => "module",
        }
        .to_owned()
    }
}

/// Types backed by host values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NativeType {
    Bool,
    Int,
    Float,
    String,
}

impl TypeProtocol for NativeType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        matches!(rt.object(source), Object::Native(native) if native == self)
    }

    fn default_value(&self, rt: &mut Runtime) -> RuntimeResult<ObjectId> {
        Ok(match self {
            NativeType::Bool => rt.core().false_value,
            NativeType::Int => rt.alloc(Object::Int(0)),
            NativeType::Float => rt.alloc(Object::Float(0.0)),
            NativeType::String => rt.alloc(Object::Str(String::new())),
        })
    }

    fn type_name(&self, _rt: &Runtime) -> String {
        match self {
            NativeType::Bool => "bool",
            NativeType::Int => "int",
            NativeType::Float => "float",
            NativeType::String => "string",
        }
        .to_owned()
    }
}

/// `A | B`. Also the type of an overload group: one member per overload.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub types: Vec<ObjectId>,
}

impl TypeProtocol for UnionType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        if let Object::Union(other) = rt.object(source) {
            return other
                .types
                .iter()
                .all(|&ty| self.types.iter().any(|&t| rt.assignable(ty, t)));
        }
        self.types.iter().any(|&t| rt.assignable(source, t))
    }

    fn type_name(&self, rt: &Runtime) -> String {
        let names: Vec<String> = self.types.iter().map(|&t| rt.type_name(t)).collect();
        names.join(" | ")
    }
}

impl CallableType for UnionType {
    fn type_of_application(
        &self,
        rt: &Runtime,
        arguments: &[ObjectId],
    ) -> RuntimeResult<ObjectId> {
        let mut results = self
            .types
            .iter()
            .filter_map(|&ty| rt.type_application(ty, arguments).ok());
        match (results.next(), results.next()) {
            (Some(result), None) => Ok(result),
            (None, _) => Err(RuntimeError::NoMatchingOverload {
                name: self.type_name(rt),
                arguments: rt.describe_types(arguments),
            }),
            (Some(_), Some(_)) => Err(RuntimeError::AmbiguousOverload {
                name: self.type_name(rt),
                arguments: rt.describe_types(arguments),
                count: 2 + results.count(),
            }),
        }
    }
}

/// Structural tuple type.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleType {
    pub items: Vec<ObjectId>,
}

impl TypeProtocol for TupleType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        match rt.object(source) {
            Object::TupleType(other) => {
                other.items.len() == self.items.len()
                    && other
                        .items
                        .iter()
                        .zip(&self.items)
                        .all(|(&s, &t)| rt.assignable(s, t))
            }
            _ => false,
        }
    }

    fn default_value(&self, rt: &mut Runtime) -> RuntimeResult<ObjectId> {
        let mut values = Vec::with_capacity(self.items.len());
        for &item in &self.items {
            values.push(rt.default_value(item)?);
        }
        Ok(rt.new_tuple(values))
    }

    fn type_name(&self, rt: &Runtime) -> String {
        let names: Vec<String> = self.items.iter().map(|&t| rt.type_name(t)).collect();
        format!("({})", names.join(", "))
    }
}

/// Signature of a function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<ObjectId>,
    pub returns: ObjectId,
    /// Accepts any number of arguments of any type.
    pub variadic: bool,
}

impl TypeProtocol for FunctionType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        if self.variadic {
            return false;
        }
        rt.type_application(source, &self.parameters)
            .is_ok_and(|result| rt.assignable(result, self.returns))
    }

    fn type_name(&self, rt: &Runtime) -> String {
        let returns = rt.type_name(self.returns);
        if self.variadic {
            return format!("fun(...) -> {returns}");
        }
        let names: Vec<String> = self.parameters.iter().map(|&t| rt.type_name(t)).collect();
        format!("fun({}) -> {returns}", names.join(", "))
    }
}

impl CallableType for FunctionType {
    fn type_of_application(
        &self,
        rt: &Runtime,
        arguments: &[ObjectId],
    ) -> RuntimeResult<ObjectId> {
        if self.variadic {
            return Ok(self.returns);
        }
        if arguments.len() != self.parameters.len() {
            return Err(RuntimeError::WrongArity {
                expected: self.parameters.len(),
                found: arguments.len(),
            });
        }
        for (&argument, &parameter) in arguments.iter().zip(&self.parameters) {
            if !rt.assignable(argument, parameter) {
                return Err(RuntimeError::NotAssignable {
                    expected: rt.type_name(parameter),
                    found: rt.type_name(argument),
                });
            }
        }
        Ok(self.returns)
    }
}

/// Type of a callable with some leading arguments already supplied.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialType {
    /// Type of the underlying callable.
    pub origin: ObjectId,
    /// Types of the bound leading arguments.
    pub bound: Vec<ObjectId>,
}

impl TypeProtocol for PartialType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        matches!(rt.object(source), Object::PartialType(other) if other == self)
    }

    fn type_name(&self, rt: &Runtime) -> String {
        format!("partial {}", rt.type_name(self.origin))
    }
}

impl CallableType for PartialType {
    fn type_of_application(
        &self,
        rt: &Runtime,
        arguments: &[ObjectId],
    ) -> RuntimeResult<ObjectId> {
        let mut all = self.bound.clone();
        all.extend_from_slice(arguments);
        rt.type_application(self.origin, &all)
    }
}

/// `T?`: accepts `null` or `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct NullableType {
    pub inner: ObjectId,
}

impl TypeProtocol for NullableType {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        if source == rt.core().null {
            return true;
        }
        if let Object::Nullable(other) = rt.object(source) {
            return rt.assignable(other.inner, self.inner);
        }
        rt.assignable(source, self.inner)
    }

    fn default_value(&self, rt: &mut Runtime) -> RuntimeResult<ObjectId> {
        Ok(rt.core().null_value)
    }

    fn type_name(&self, rt: &Runtime) -> String {
        format!("{}?", rt.type_name(self.inner))
    }
}
