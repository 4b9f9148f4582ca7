//! The runtime arena and the services every layer above it uses.

use zeal_ir::{Name, SharedInterner};

use crate::protocols::ObjectProtocol;
use crate::{
    CellId, CoreTypes, FunctionType, Marker, NullableType, Object, ObjectId, RuntimeError,
    RuntimeResult, Scope, SharedPrintHandler, TupleType, TupleValue, UnionType, Variable,
};

/// Owns every object, cell and scope of one compilation run.
pub struct Runtime {
    objects: Vec<Object>,
    cells: Vec<ObjectId>,
    pub(crate) scopes: Vec<Scope>,
    core: CoreTypes,
    interner: SharedInterner,
    print: SharedPrintHandler,
    this_name: Name,
}

impl Runtime {
    pub fn new(interner: SharedInterner, print: SharedPrintHandler) -> Self {
        let mut objects = Vec::with_capacity(256);
        let core = CoreTypes::install(&mut objects);
        let this_name = interner.intern("this");
        Runtime {
            objects,
            cells: Vec::new(),
            scopes: Vec::new(),
            core,
            interner,
            print,
            this_name,
        }
    }

    #[inline]
    pub fn core(&self) -> &CoreTypes {
        &self.core
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Text of an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    #[inline]
    pub fn intern(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// Name of the implicit receiver parameter of methods.
    #[inline]
    pub fn this_name(&self) -> Name {
        self.this_name
    }

    // ===== Allocation =====

    /// # Panics
    /// Panics if the arena holds more than `u32::MAX` objects.
    pub fn alloc(&mut self, object: Object) -> ObjectId {
        let index = u32::try_from(self.objects.len())
            .unwrap_or_else(|_| panic!("object arena exceeded u32::MAX objects"));
        self.objects.push(object);
        ObjectId::new(index)
    }

    /// # Panics
    /// Panics if `id` does not belong to this runtime.
    #[inline]
    #[track_caller]
    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    #[inline]
    #[track_caller]
    pub(crate) fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.index()]
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// # Panics
    /// Panics if the cell store holds more than `u32::MAX` cells.
    pub fn new_cell(&mut self, value: ObjectId) -> CellId {
        let index = u32::try_from(self.cells.len())
            .unwrap_or_else(|_| panic!("cell store exceeded u32::MAX cells"));
        self.cells.push(value);
        CellId::new(index)
    }

    #[inline]
    #[track_caller]
    pub fn cell(&self, cell: CellId) -> ObjectId {
        self.cells[cell.index()]
    }

    #[inline]
    #[track_caller]
    pub(crate) fn store_cell(&mut self, cell: CellId, value: ObjectId) {
        self.cells[cell.index()] = value;
    }

    // ===== Values and compound types =====

    pub fn int(&mut self, value: i64) -> ObjectId {
        self.alloc(Object::Int(value))
    }

    pub fn float(&mut self, value: f64) -> ObjectId {
        self.alloc(Object::Float(value))
    }

    pub fn string(&mut self, value: impl Into<String>) -> ObjectId {
        self.alloc(Object::Str(value.into()))
    }

    pub fn bool(&self, value: bool) -> ObjectId {
        self.core.bool_value(value)
    }

    pub fn new_tuple(&mut self, items: Vec<ObjectId>) -> ObjectId {
        let item_types = items.iter().map(|&item| self.runtime_type(item)).collect();
        let ty = self.new_tuple_type(item_types);
        self.alloc(Object::Tuple(TupleValue { items, ty }))
    }

    pub fn new_tuple_type(&mut self, items: Vec<ObjectId>) -> ObjectId {
        self.alloc(Object::TupleType(TupleType { items }))
    }

    pub fn new_union(&mut self, types: Vec<ObjectId>) -> ObjectId {
        self.alloc(Object::Union(UnionType { types }))
    }

    pub fn new_nullable(&mut self, inner: ObjectId) -> ObjectId {
        self.alloc(Object::Nullable(NullableType { inner }))
    }

    pub fn new_function_type(
        &mut self,
        parameters: Vec<ObjectId>,
        returns: ObjectId,
        variadic: bool,
    ) -> ObjectId {
        self.alloc(Object::FunctionType(FunctionType {
            parameters,
            returns,
            variadic,
        }))
    }

    /// Allocate a variable slot holding `value`.
    pub fn new_variable(&mut self, name: Name, ty: ObjectId, value: ObjectId) -> ObjectId {
        let cell = self.new_cell(value);
        self.alloc(Object::Variable(Variable { name, ty, cell }))
    }

    pub fn new_marker(&mut self, name: Option<Name>) -> ObjectId {
        self.alloc(Object::Marker(Marker { name }))
    }

    // ===== Types =====

    #[inline]
    pub fn runtime_type(&self, id: ObjectId) -> ObjectId {
        self.object(id).runtime_type(&self.core)
    }

    #[inline]
    pub fn is_type(&self, id: ObjectId) -> bool {
        self.object(id).as_type().is_some()
    }

    /// `id` itself if it is a type, `NotAType` otherwise.
    pub fn expect_type(&self, id: ObjectId) -> RuntimeResult<ObjectId> {
        if self.is_type(id) {
            Ok(id)
        } else {
            Err(RuntimeError::NotAType {
                found: self.display(id),
            })
        }
    }

    pub fn type_name(&self, ty: ObjectId) -> String {
        match self.object(ty).as_type() {
            Some(t) => t.type_name(self),
            None => self.display(ty),
        }
    }

    /// Comma-separated names of argument types, for messages.
    pub fn describe_types(&self, types: &[ObjectId]) -> String {
        let names: Vec<String> = types.iter().map(|&t| self.type_name(t)).collect();
        names.join(", ")
    }

    /// Whether a value of type `source` fits a slot of type `target`.
    pub fn assignable(&self, source: ObjectId, target: ObjectId) -> bool {
        if let Some(answer) = self
            .object(source)
            .as_type()
            .and_then(|t| t.assignable_to(self, target))
        {
            return answer;
        }
        self.object(target)
            .as_type()
            .is_some_and(|t| t.assignable_from(self, source))
    }

    pub fn is_instance(&self, value: ObjectId, ty: ObjectId) -> bool {
        self.assignable(self.runtime_type(value), ty)
    }

    /// `NotAssignable` unless `value` is an instance of `ty`.
    pub fn check_value(&self, value: ObjectId, ty: ObjectId) -> RuntimeResult<()> {
        if self.is_instance(value, ty) {
            Ok(())
        } else {
            Err(RuntimeError::NotAssignable {
                expected: self.type_name(ty),
                found: self.type_name(self.runtime_type(value)),
            })
        }
    }

    pub fn default_value(&mut self, ty: ObjectId) -> RuntimeResult<ObjectId> {
        let object = self.object(ty).clone();
        match object.as_type() {
            Some(t) => t.default_value(self),
            None => Err(RuntimeError::NotAType {
                found: self.display(ty),
            }),
        }
    }

    /// Result type of calling something of type `ty` with `arguments`.
    pub fn type_application(&self, ty: ObjectId, arguments: &[ObjectId]) -> RuntimeResult<ObjectId> {
        match self.object(ty).as_callable_type() {
            Some(callable) => callable.type_of_application(self, arguments),
            None => Err(RuntimeError::NotCallable {
                found: self.type_name(ty),
            }),
        }
    }

    /// Walks `base` pointers from `class` up to the root.
    pub fn is_subclass(&self, class: ObjectId, base: ObjectId) -> bool {
        if class == base {
            return true;
        }
        if base == self.core.object {
            return matches!(self.object(class), Object::Class(_));
        }
        let mut current = class;
        while let Some(class) = self.object(current).as_class() {
            let parent = class.base();
            if parent == base {
                return true;
            }
            current = parent;
        }
        false
    }

    // ===== Slots =====

    /// Value of a binding: getters are read, everything else is the value.
    pub fn read(&self, binding: ObjectId) -> RuntimeResult<ObjectId> {
        match self.object(binding).as_getter() {
            Some(getter) => getter.get(self),
            None => Ok(binding),
        }
    }

    /// Static view of a binding: `(declared type, current value)` for slots,
    /// `(runtime type, binding)` for everything else.
    pub fn typed_view(&self, binding: ObjectId) -> RuntimeResult<(ObjectId, ObjectId)> {
        let object = self.object(binding);
        match (object.as_getter(), object.as_setter()) {
            (Some(getter), Some(setter)) => Ok((setter.slot_type(), getter.get(self)?)),
            _ => Ok((self.runtime_type(binding), binding)),
        }
    }

    /// Write through a setter after checking the slot type.
    pub fn assign(&mut self, slot: ObjectId, value: ObjectId) -> RuntimeResult<()> {
        let Some(setter) = self.object(slot).as_setter() else {
            return Err(RuntimeError::NotASetter {
                found: self.display(slot),
            });
        };
        let ty = setter.slot_type();
        let cell = setter.target_cell(self)?;
        self.check_value(value, ty)?;
        self.store_cell(cell, value);
        Ok(())
    }

    // ===== Value semantics =====

    /// Equality used by `when`: identity, equal natives or equal tuples.
    #[expect(clippy::float_cmp, reason = "language equality on floats is exact")]
    pub fn values_equal(&self, a: ObjectId, b: ObjectId) -> bool {
        if a == b {
            return true;
        }
        match (self.object(a), self.object(b)) {
            (Object::Bool(x), Object::Bool(y)) => x == y,
            (Object::Int(x), Object::Int(y)) => x == y,
            (Object::Float(x), Object::Float(y)) => x == y,
            (Object::Str(x), Object::Str(y)) => x == y,
            (Object::Tuple(x), Object::Tuple(y)) => {
                x.items.len() == y.items.len()
                    && x
                        .items
                        .iter()
                        .zip(&y.items)
                        .all(|(&l, &r)| self.values_equal(l, r))
            }
            _ => false,
        }
    }

    pub fn is_truthy(&self, value: ObjectId) -> bool {
        match self.object(value) {
            Object::Bool(b) => *b,
            Object::Null | Object::Unit => false,
            Object::Int(n) => *n != 0,
            Object::Float(f) => *f != 0.0,
            Object::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// User-facing rendering of a value, as `print` shows it.
    pub fn display(&self, id: ObjectId) -> String {
        let object = self.object(id);
        if let Some(ty) = object.as_type() {
            return ty.type_name(self);
        }
        let named = |name: Option<Name>| name.map_or("<anonymous>", |n| self.name(n));
        match object {
            Object::Unit => "()".to_owned(),
            Object::Null => "null".to_owned(),
            Object::Bool(b) => b.to_string(),
            Object::Int(n) => n.to_string(),
            Object::Float(f) => format!("{f:?}"),
            Object::Str(s) => s.clone(),
            Object::Tuple(t) => {
                let items: Vec<String> = t.items.iter().map(|&i| self.display(i)).collect();
                format!("({})", items.join(", "))
            }
            Object::Instance(i) => format!("<{} object>", self.type_name(i.class)),
            Object::Module(m) => format!("<module {}>", self.name(m.name)),
            Object::Marker(m) => format!("<label {}>", named(m.name)),
            Object::Function(f) => format!("<function {}>", named(f.name)),
            Object::NativeFunction(f) => format!("<native function {}>", self.name(f.name)),
            Object::OverloadGroup(g) => format!("<overload group {}>", named(g.name)),
            Object::Partial(p) => format!("<bound {}>", self.display(p.callable)),
            Object::TypeClassMethod(m) => format!("<type class method {}>", self.name(m.name)),
            Object::Variable(v) => format!("<variable {}>", self.name(v.name)),
            Object::Argument(a) => format!("<argument {}>", self.name(a.name)),
            Object::Field(f) => format!("<field {}>", self.name(f.name)),
            Object::Method(m) => format!("<method {}>", self.name(m.name)),
            Object::BoundField(b) => format!("<field {}>", self.name(b.name)),
            // Types were rendered above.
            _ => String::new(),
        }
    }
}
