//! Singleton types and values, allocated once per runtime.

use crate::{NativeType, Object, ObjectId, SpecialType};

/// Ids of the built-in types and singleton values.
///
/// Equality between these is identity: `ty == core.int` is how the runtime
/// asks "is this the `int` type".
#[derive(Clone, Debug)]
pub struct CoreTypes {
    pub type_: ObjectId,
    pub void: ObjectId,
    pub unit: ObjectId,
    pub any: ObjectId,
    pub null: ObjectId,
    pub object: ObjectId,
    pub module: ObjectId,

    pub bool_: ObjectId,
    pub int: ObjectId,
    pub float: ObjectId,
    pub string: ObjectId,

    pub unit_value: ObjectId,
    pub null_value: ObjectId,
    pub true_value: ObjectId,
    pub false_value: ObjectId,
}

impl CoreTypes {
    /// Allocate every singleton at the start of an empty arena.
    pub(crate) fn install(objects: &mut Vec<Object>) -> Self {
        let mut alloc = |object: Object| {
            let id = ObjectId::new(u32::try_from(objects.len()).unwrap_or(u32::MAX));
            objects.push(object);
            id
        };

        CoreTypes {
            type_: alloc(Object::Special(SpecialType::Type)),
            void: alloc(Object::Special(SpecialType::Void)),
            unit: alloc(Object::Special(SpecialType::Unit)),
            any: alloc(Object::Special(SpecialType::Any)),
            null: alloc(Object::Special(SpecialType::Null)),
            object: alloc(Object::Special(SpecialType::Object)),
            module: alloc(Object::Special(SpecialType::Module)),
            bool_: alloc(Object::Native(NativeType::Bool)),
            int: alloc(Object::Native(NativeType::Int)),
            float: alloc(Object::Native(NativeType::Float)),
            string: alloc(Object::Native(NativeType::String)),
            unit_value: alloc(Object::Unit),
            null_value: alloc(Object::Null),
            true_value: alloc(Object::Bool(true)),
            false_value: alloc(Object::Bool(false)),
        }
    }

    /// Built-in types under the names the global scope binds them to.
    pub fn named_types(&self) -> [(&'static str, ObjectId); 11] {
        [
            ("type", self.type_),
            ("void", self.void),
            ("unit", self.unit),
            ("any", self.any),
            ("null", self.null),
            ("object", self.object),
            ("module", self.module),
            ("bool", self.bool_),
            ("int", self.int),
            ("float", self.float),
            ("string", self.string),
        ]
    }

    pub fn bool_value(&self, value: bool) -> ObjectId {
        if value {
            self.true_value
        } else {
            self.false_value
        }
    }
}
