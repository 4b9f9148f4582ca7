//! Classes, their member descriptors and instances.
//!
//! A class scope holds descriptors rather than values: a [`Field`] or a
//! [`Method`]. Fetching one through an instance binds it to that instance.
//! Member lookup consults the class scope, then the scopes of its bases, and
//! finally the lexical scope of the declaration.

use rustc_hash::FxHashMap;
use zeal_ir::Name;

use crate::protocols::{Bind, ClassProtocol, Getter, ScopeProtocol, Setter, TypeProtocol};
use crate::{CellId, FunctionBody, Object, ObjectId, Runtime, RuntimeError, RuntimeResult, ScopeId};

#[derive(Clone, Debug)]
pub struct Class {
    /// The class's own id, for subclass checks from inside the arena.
    pub id: ObjectId,
    pub name: Option<Name>,
    pub base: ObjectId,
    /// Member scope; its parent is the lexical scope of the declaration.
    pub scope: ScopeId,
    /// Overload group of the constructors. Replaced on every addition.
    pub constructor: ObjectId,
    /// Instance field descriptors, in index order.
    pub fields: Vec<ObjectId>,
    /// Receiver type of a type-class implementation class.
    pub implemented_type: Option<ObjectId>,
}

impl Class {
    /// Type of the implicit `this` parameter.
    pub fn this_type(&self) -> ObjectId {
        self.implemented_type.unwrap_or(self.id)
    }
}

impl ClassProtocol for Class {
    fn base(&self) -> ObjectId {
        self.base
    }

    fn member_scope(&self) -> ScopeId {
        self.scope
    }
}

impl TypeProtocol for Class {
    fn assignable_from(&self, rt: &Runtime, source: ObjectId) -> bool {
        matches!(rt.object(source), Object::Class(_)) && rt.is_subclass(source, self.id)
    }

    fn type_name(&self, rt: &Runtime) -> String {
        self.name
            .map_or_else(|| "<anonymous class>".to_owned(), |n| rt.name(n).to_owned())
    }
}

/// Field descriptor.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: Name,
    pub ty: ObjectId,
    /// Position among the owner's instance fields.
    pub index: usize,
    pub initializer: ObjectId,
    pub is_static: bool,
    pub owner: ObjectId,
    /// Storage of a static field.
    pub static_cell: Option<CellId>,
}

impl Getter for Field {
    fn get(&self, rt: &Runtime) -> RuntimeResult<ObjectId> {
        Ok(rt.cell(self.target_cell(rt)?))
    }
}

impl Setter for Field {
    fn slot_type(&self) -> ObjectId {
        self.ty
    }

    fn target_cell(&self, rt: &Runtime) -> RuntimeResult<CellId> {
        self.static_cell
            .ok_or_else(|| RuntimeError::InstanceMemberOnType {
                member: rt.name(self.name).to_owned(),
            })
    }
}

impl Bind for Field {
    fn bind(&self, rt: &mut Runtime, receiver: ObjectId) -> RuntimeResult<ObjectId> {
        if self.is_static {
            rt.check_receiver(self.owner, receiver)?;
            return Ok(rt.alloc(Object::Field(self.clone())));
        }
        match rt.object(receiver) {
            Object::Class(_) => Err(RuntimeError::InstanceMemberOnType {
                member: rt.name(self.name).to_owned(),
            }),
            Object::Instance(instance) if rt.is_subclass(instance.class, self.owner) => {
                Ok(rt.alloc(Object::BoundField(BoundField {
                    name: self.name,
                    ty: self.ty,
                    instance: receiver,
                    owner: self.owner,
                    index: self.index,
                })))
            }
            _ => Err(RuntimeError::NotAssignable {
                expected: rt.type_name(self.owner),
                found: rt.type_name(rt.runtime_type(receiver)),
            }),
        }
    }
}

/// Method descriptor: the overload group of one member name.
#[derive(Clone, Debug)]
pub struct Method {
    pub name: Name,
    pub group: ObjectId,
    pub owner: ObjectId,
    pub is_static: bool,
    pub ty: ObjectId,
}

impl Bind for Method {
    fn bind(&self, rt: &mut Runtime, receiver: ObjectId) -> RuntimeResult<ObjectId> {
        if self.is_static {
            rt.check_receiver(self.owner, receiver)?;
            return Ok(self.group);
        }
        // `C.method` yields the unbound group; `this` is passed explicitly.
        if matches!(rt.object(receiver), Object::Class(_)) && rt.is_subclass(receiver, self.owner)
        {
            return Ok(self.group);
        }
        let this_type = rt.this_type(self.owner);
        rt.check_value(receiver, this_type)?;
        Ok(rt.new_partial(self.group, vec![receiver]))
    }
}

/// An object created by calling a class.
#[derive(Clone, Debug)]
pub struct Instance {
    pub class: ObjectId,
    /// Field cells per declaring class, for the class and each base.
    pub fields: FxHashMap<ObjectId, Vec<CellId>>,
}

/// A field descriptor bound to one instance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundField {
    pub name: Name,
    pub ty: ObjectId,
    pub instance: ObjectId,
    pub owner: ObjectId,
    pub index: usize,
}

impl Getter for BoundField {
    fn get(&self, rt: &Runtime) -> RuntimeResult<ObjectId> {
        Ok(rt.cell(self.target_cell(rt)?))
    }
}

impl Setter for BoundField {
    fn slot_type(&self) -> ObjectId {
        self.ty
    }

    fn target_cell(&self, rt: &Runtime) -> RuntimeResult<CellId> {
        rt.instance_cell(self.instance, self.owner, self.index)
            .ok_or_else(|| RuntimeError::UnknownMember {
                member: rt.name(self.name).to_owned(),
                ty: rt.type_name(rt.runtime_type(self.instance)),
            })
    }
}

/// A class as a definition target: the class body's declarations land here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassScope(pub ObjectId);

impl ScopeProtocol for ClassScope {
    fn define(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        rt.class_define(self.0, name, value, false)
    }

    fn define_static(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        rt.class_define(self.0, name, value, true)
    }

    fn refer(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        let scope = rt.class_scope(self.0)?;
        rt.refer(scope, name, value)
    }

    fn get_name(&self, rt: &Runtime, name: Name) -> RuntimeResult<ObjectId> {
        rt.get_name(rt.class_scope(self.0)?, name)
    }
}

impl Runtime {
    /// Allocate an empty class. `base` defaults to the root `object` type.
    pub fn new_class(
        &mut self,
        name: Option<Name>,
        base: Option<ObjectId>,
        lexical_scope: ScopeId,
    ) -> RuntimeResult<ObjectId> {
        let object = self.core().object;
        let base = base.unwrap_or(object);
        if base != object && !matches!(self.object(base), Object::Class(_)) {
            return Err(RuntimeError::NotAClass {
                found: self.display(base),
            });
        }
        let scope = self.new_scope(Some(lexical_scope));
        let constructor = self.new_overload_group(name, Vec::new(), None);
        let id = self.next_object_id();
        tracing::debug!(class = name.map_or("<anonymous>", |n| self.name(n)), "new class");
        Ok(self.alloc(Object::Class(Class {
            id,
            name,
            base,
            scope,
            constructor,
            fields: Vec::new(),
            implemented_type: None,
        })))
    }

    fn next_object_id(&self) -> ObjectId {
        ObjectId::new(u32::try_from(self.object_count()).unwrap_or(u32::MAX))
    }

    pub fn class(&self, id: ObjectId) -> Option<&Class> {
        match self.object(id) {
            Object::Class(c) => Some(c),
            _ => None,
        }
    }

    fn class_mut(&mut self, id: ObjectId) -> RuntimeResult<&mut Class> {
        let found = self.display(id);
        match self.object_mut(id) {
            Object::Class(c) => Ok(c),
            _ => Err(RuntimeError::NotAClass { found }),
        }
    }

    fn expect_class(&self, id: ObjectId) -> RuntimeResult<&Class> {
        self.class(id).ok_or_else(|| RuntimeError::NotAClass {
            found: self.display(id),
        })
    }

    pub fn class_scope(&self, class: ObjectId) -> RuntimeResult<ScopeId> {
        Ok(self.expect_class(class)?.scope)
    }

    /// `this` type of a class; the class itself for non-classes.
    pub fn this_type(&self, class: ObjectId) -> ObjectId {
        self.class(class).map_or(class, Class::this_type)
    }

    pub(crate) fn set_implemented_type(&mut self, class: ObjectId, ty: ObjectId) -> RuntimeResult<()> {
        self.class_mut(class)?.implemented_type = Some(ty);
        Ok(())
    }

    /// Whether `receiver` may access members declared by `owner` without
    /// an instance binding: a subclass of `owner`, or a value of its `this` type.
    pub(crate) fn check_receiver(&self, owner: ObjectId, receiver: ObjectId) -> RuntimeResult<()> {
        if matches!(self.object(receiver), Object::Class(_)) && self.is_subclass(receiver, owner) {
            return Ok(());
        }
        self.check_value(receiver, self.this_type(owner))
    }

    /// Route a declaration made inside a class body.
    pub fn class_define(
        &mut self,
        class: ObjectId,
        name: Name,
        value: ObjectId,
        is_static: bool,
    ) -> RuntimeResult<()> {
        let (class_name, this_type, scope) = {
            let c = self.expect_class(class)?;
            (c.name, c.this_type(), c.scope)
        };
        match self.object(value) {
            Object::Function(_) => {
                let is_constructor = !is_static && class_name == Some(name);
                if !is_static {
                    let this = self.this_name();
                    self.add_parameter(value, this, this_type, Some(0))?;
                }
                if is_constructor {
                    self.add_constructor(class, value)
                } else {
                    self.add_method(class, name, value, is_static)
                }
            }
            Object::Variable(variable) => {
                let (ty, initializer) = (variable.ty, self.cell(variable.cell));
                self.add_field(class, name, ty, initializer, is_static)
            }
            _ => self.define(scope, name, value),
        }
    }

    pub fn add_constructor(&mut self, class: ObjectId, function: ObjectId) -> RuntimeResult<()> {
        let (name, current) = {
            let c = self.expect_class(class)?;
            (c.name, c.constructor)
        };
        let mut overloads = self
            .overload_group(current)
            .map(|g| g.overloads.clone())
            .unwrap_or_default();
        overloads.push(function);
        let group = self.new_overload_group(name, overloads, None);
        self.class_mut(class)?.constructor = group;
        Ok(())
    }

    pub fn add_method(
        &mut self,
        class: ObjectId,
        name: Name,
        function: ObjectId,
        is_static: bool,
    ) -> RuntimeResult<()> {
        let scope = self.class_scope(class)?;
        let mut overloads = match self.scope(scope).get(name).map(|id| self.object(id)) {
            None => Vec::new(),
            Some(Object::Method(method)) if method.is_static == is_static => self
                .overload_group(method.group)
                .map(|g| g.overloads.clone())
                .unwrap_or_default(),
            Some(_) => {
                return Err(RuntimeError::NameAlreadyExists {
                    name: self.name(name).to_owned(),
                })
            }
        };
        overloads.push(function);
        let group = self.new_overload_group(Some(name), overloads, None);
        let ty = self.runtime_type(group);
        let method = self.alloc(Object::Method(Method {
            name,
            group,
            owner: class,
            is_static,
            ty,
        }));
        self.replace_binding(scope, name, method);
        Ok(())
    }

    pub fn add_field(
        &mut self,
        class: ObjectId,
        name: Name,
        ty: ObjectId,
        initializer: ObjectId,
        is_static: bool,
    ) -> RuntimeResult<()> {
        let (scope, index) = {
            let c = self.expect_class(class)?;
            (c.scope, c.fields.len())
        };
        let static_cell = is_static.then(|| self.new_cell(initializer));
        let field = self.alloc(Object::Field(Field {
            name,
            ty,
            index,
            initializer,
            is_static,
            owner: class,
            static_cell,
        }));
        self.define(scope, name, field)?;
        if !is_static {
            self.class_mut(class)?.fields.push(field);
        }
        Ok(())
    }

    /// Close a class body: a class without constructors gets one that takes
    /// only `this` and does nothing.
    pub fn finish_class(&mut self, class: ObjectId) -> RuntimeResult<()> {
        let (name, scope, this_type, constructor) = {
            let c = self.expect_class(class)?;
            (c.name, c.scope, c.this_type(), c.constructor)
        };
        let has_constructor = self
            .overload_group(constructor)
            .is_some_and(|g| !g.overloads.is_empty());
        if has_constructor {
            return Ok(());
        }
        let unit = self.core().unit;
        let body = FunctionBody {
            arena: zeal_ir::SharedArena::default(),
            statements: Vec::new(),
        };
        let function = self.new_function(name, Some(unit), scope, Some(body));
        let this = self.this_name();
        self.add_parameter(function, this, this_type, Some(0))?;
        self.add_constructor(class, function)
    }

    /// Allocate an instance with every field set to its initializer.
    ///
    /// Constructors run afterwards; see the evaluator.
    pub fn new_instance(&mut self, class: ObjectId) -> RuntimeResult<ObjectId> {
        self.expect_class(class)?;
        let mut fields = FxHashMap::default();
        let mut current = class;
        while let Some(c) = self.class(current) {
            let (owner, base) = (c.id, c.base);
            let initializers: Vec<ObjectId> = c
                .fields
                .iter()
                .filter_map(|&f| match self.object(f) {
                    Object::Field(field) => Some(field.initializer),
                    _ => None,
                })
                .collect();
            let cells = initializers
                .into_iter()
                .map(|value| self.new_cell(value))
                .collect();
            fields.insert(owner, cells);
            current = base;
        }
        Ok(self.alloc(Object::Instance(Instance { class, fields })))
    }

    pub(crate) fn instance_cell(
        &self,
        instance: ObjectId,
        owner: ObjectId,
        index: usize,
    ) -> Option<CellId> {
        match self.object(instance) {
            Object::Instance(i) => i.fields.get(&owner)?.get(index).copied(),
            _ => None,
        }
    }

    /// Own members, then each base's, then the declaration's lexical scope.
    fn find_class_member(&self, class: ObjectId, name: Name) -> Option<ObjectId> {
        let mut current = self.class(class);
        while let Some(c) = current {
            if let Some(item) = self.scope(c.scope).get(name) {
                return Some(item);
            }
            current = self.class(c.base);
        }
        let scope = self.class(class)?.scope;
        self.get_name(scope, name).ok()
    }

    /// Look `name` up for `receiver` in a class and bind descriptors.
    pub fn class_member(
        &mut self,
        class: ObjectId,
        receiver: ObjectId,
        name: Name,
    ) -> RuntimeResult<ObjectId> {
        self.expect_class(class)?;
        let item = self
            .find_class_member(class, name)
            .ok_or_else(|| RuntimeError::UnknownMember {
                member: self.name(name).to_owned(),
                ty: self.type_name(class),
            })?;
        let descriptor = self.object(item).clone();
        match descriptor.as_bind() {
            Some(bind) => bind.bind(self, receiver),
            None => Ok(item),
        }
    }
}
