//! Overload groups and call-site resolution.

use zeal_ir::Name;

use crate::protocols::Callable;
use crate::{Object, ObjectId, Runtime, RuntimeError, RuntimeResult};

/// Callables sharing one name, resolved per call by argument types.
///
/// `parent` is the group visible for the same name in an enclosing scope;
/// it is consulted only when no local overload matches.
#[derive(Clone, Debug)]
pub struct OverloadGroup {
    pub name: Option<Name>,
    pub overloads: Vec<ObjectId>,
    pub parent: Option<ObjectId>,
    /// Union of the overload types, fixed at creation.
    ty: ObjectId,
}

impl Callable for OverloadGroup {
    fn callable_name(&self) -> Option<Name> {
        self.name
    }

    fn signature(&self) -> ObjectId {
        self.ty
    }
}

impl Runtime {
    pub fn new_overload_group(
        &mut self,
        name: Option<Name>,
        overloads: Vec<ObjectId>,
        parent: Option<ObjectId>,
    ) -> ObjectId {
        let types = overloads.iter().map(|&o| self.runtime_type(o)).collect();
        let ty = self.new_union(types);
        self.alloc(Object::OverloadGroup(OverloadGroup {
            name,
            overloads,
            parent,
            ty,
        }))
    }

    pub fn overload_group(&self, id: ObjectId) -> Option<&OverloadGroup> {
        match self.object(id) {
            Object::OverloadGroup(g) => Some(g),
            _ => None,
        }
    }

    /// Overloads accepting `arguments` (argument types). An empty local
    /// result defers entirely to the parent group.
    pub fn matching_overloads(&self, group: ObjectId, arguments: &[ObjectId]) -> Vec<ObjectId> {
        let Some(g) = self.overload_group(group) else {
            return Vec::new();
        };
        let local: Vec<ObjectId> = g
            .overloads
            .iter()
            .copied()
            .filter(|&o| {
                self.type_application(self.runtime_type(o), arguments)
                    .is_ok()
            })
            .collect();
        match g.parent {
            Some(parent) if local.is_empty() => self.matching_overloads(parent, arguments),
            _ => local,
        }
    }

    /// The single overload accepting `arguments`.
    pub fn resolve_overload(&self, group: ObjectId, arguments: &[ObjectId]) -> RuntimeResult<ObjectId> {
        let matches = self.matching_overloads(group, arguments);
        tracing::trace!(
            group = %self.display(group),
            candidates = matches.len(),
            "resolve overload"
        );
        match matches.as_slice() {
            [single] => Ok(*single),
            [] => Err(RuntimeError::NoMatchingOverload {
                name: self.group_name(group),
                arguments: self.describe_types(arguments),
            }),
            many => Err(RuntimeError::AmbiguousOverload {
                name: self.group_name(group),
                arguments: self.describe_types(arguments),
                count: many.len(),
            }),
        }
    }

    fn group_name(&self, group: ObjectId) -> String {
        self.overload_group(group)
            .and_then(|g| g.name)
            .map_or_else(|| "<anonymous>".to_owned(), |n| self.name(n).to_owned())
    }
}

#[cfg(test)]
mod tests;
