//! Lexical scopes with implicit overload merging.
//!
//! Scopes are records in the runtime's scope arena. Binding a callable to a
//! name that already holds a callable never overwrites: both end up in a
//! newly allocated [`OverloadGroup`](crate::OverloadGroup) and the scope is
//! updated to point at it.

use rustc_hash::FxHashMap;
use zeal_ir::Name;

use crate::protocols::ScopeProtocol;
use crate::{Object, ObjectId, Runtime, RuntimeError, RuntimeResult};

/// Handle to a scope in the runtime.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One name-binding environment.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    items: FxHashMap<Name, ObjectId>,
    /// Names bound with `define` (owned), in definition order.
    members: Vec<Name>,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn get(&self, name: Name) -> Option<ObjectId> {
        self.items.get(&name).copied()
    }

    pub fn is_member(&self, name: Name) -> bool {
        self.members.contains(&name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, name: Name, value: ObjectId) {
        self.items.insert(name, value);
    }

    fn mark_member(&mut self, name: Name) {
        if !self.members.contains(&name) {
            self.members.push(name);
        }
    }

    fn remove(&mut self, name: Name) -> Option<ObjectId> {
        let removed = self.items.remove(&name)?;
        self.members.retain(|&n| n != name);
        Some(removed)
    }
}

impl Runtime {
    /// # Panics
    /// Panics if the scope arena holds more than `u32::MAX` scopes.
    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let index = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("scope arena exceeded u32::MAX scopes"));
        self.scopes.push(Scope {
            parent,
            ..Scope::default()
        });
        ScopeId(index)
    }

    #[inline]
    #[track_caller]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    #[track_caller]
    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Bind `value` at `name` and record ownership.
    pub fn define(&mut self, scope: ScopeId, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.bind_name(scope, name, value)?;
        self.scope_mut(scope).mark_member(name);
        Ok(())
    }

    /// Bind `value` at `name` without claiming ownership.
    pub fn refer(&mut self, scope: ScopeId, name: Name, value: ObjectId) -> RuntimeResult<()> {
        self.bind_name(scope, name, value)
    }

    /// Resolve `name` here or in an ancestor.
    pub fn get_name(&self, scope: ScopeId, name: Name) -> RuntimeResult<ObjectId> {
        self.lookup(scope, name)
            .map(|(_, value)| value)
            .ok_or_else(|| RuntimeError::NameNotFound {
                name: self.name(name).to_owned(),
            })
    }

    /// Resolve `name` and report which scope bound it.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<(ScopeId, ObjectId)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = self.scope(id);
            if let Some(value) = record.get(name) {
                return Some((id, value));
            }
            current = record.parent;
        }
        None
    }

    /// Remove a local binding. Ancestors are never touched.
    pub fn remove_name(&mut self, scope: ScopeId, name: Name) -> Option<ObjectId> {
        self.scope_mut(scope).remove(name)
    }

    /// Owned (`define`d) bindings in definition order. These are what a
    /// scope exports; `refer`red names stay local.
    pub fn scope_members(&self, scope: ScopeId) -> Vec<(Name, ObjectId)> {
        let record = self.scope(scope);
        record
            .members
            .iter()
            .filter_map(|&name| record.get(name).map(|value| (name, value)))
            .collect()
    }

    /// Overwrite a local binding without merging. Class bodies use this to
    /// swap a method descriptor for its extended successor.
    pub(crate) fn replace_binding(&mut self, scope: ScopeId, name: Name, value: ObjectId) {
        let record = self.scope_mut(scope);
        record.insert(name, value);
        record.mark_member(name);
    }

    fn bind_name(&mut self, scope: ScopeId, name: Name, value: ObjectId) -> RuntimeResult<()> {
        let mut value = value;

        // A lone function sees the outer overloads of its name through the
        // parent link of its own group.
        if matches!(self.object(value), Object::Function(_)) {
            let parent = self.outer_group(scope, name);
            value = self.new_overload_group(Some(name), vec![value], parent);
        }

        if let Some(existing) = self.scope(scope).get(name) {
            if !self.object(existing).is_overloadable() || !self.object(value).is_overloadable() {
                return Err(RuntimeError::NameAlreadyExists {
                    name: self.name(name).to_owned(),
                });
            }
            value = self.merge_overloads(scope, name, existing, value);
        }

        self.scope_mut(scope).insert(name, value);
        Ok(())
    }

    /// New group holding `existing`'s overloads followed by `incoming`'s.
    fn merge_overloads(
        &mut self,
        scope: ScopeId,
        name: Name,
        existing: ObjectId,
        incoming: ObjectId,
    ) -> ObjectId {
        let parent = match self.object(existing) {
            Object::OverloadGroup(group) => group.parent,
            _ => self.outer_group(scope, name),
        };
        let mut overloads = self.overloads_of(existing);
        overloads.extend(self.overloads_of(incoming));
        self.new_overload_group(Some(name), overloads, parent)
    }

    fn overloads_of(&self, callable: ObjectId) -> Vec<ObjectId> {
        match self.object(callable) {
            Object::OverloadGroup(group) => group.overloads.clone(),
            _ => vec![callable],
        }
    }

    /// Group visible for `name` in the scopes enclosing `scope`, if the name
    /// is bound to a callable there.
    fn outer_group(&mut self, scope: ScopeId, name: Name) -> Option<ObjectId> {
        let parent = self.scope(scope).parent?;
        let (owner, item) = self.lookup(parent, name)?;
        let object = self.object(item);
        if matches!(object, Object::OverloadGroup(_)) {
            return Some(item);
        }
        if !object.is_overloadable() {
            return None;
        }
        let outer = self.outer_group(owner, name);
        Some(self.new_overload_group(Some(name), vec![item], outer))
    }
}

impl ScopeProtocol for ScopeId {
    fn define(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        rt.define(*self, name, value)
    }

    fn refer(&self, rt: &mut Runtime, name: Name, value: ObjectId) -> RuntimeResult<()> {
        rt.refer(*self, name, value)
    }

    fn get_name(&self, rt: &Runtime, name: Name) -> RuntimeResult<ObjectId> {
        rt.get_name(*self, name)
    }
}
