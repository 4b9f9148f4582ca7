//! Member access: `receiver.name`.

use zeal_ir::Name;

use crate::{Object, ObjectId, Runtime, RuntimeError, RuntimeResult};

impl Runtime {
    /// Resolve `receiver.name` to a binding.
    ///
    /// Classes, type classes and modules answer for themselves; any other
    /// receiver is looked up through its runtime type. Descriptors come back
    /// bound to the receiver; slots come back unread.
    pub fn get_member(&mut self, receiver: ObjectId, name: Name) -> RuntimeResult<ObjectId> {
        match self.object(receiver) {
            Object::Class(_) => return self.class_member(receiver, receiver, name),
            Object::TypeClass(_) => return self.type_class_method(receiver, name),
            Object::Module(module) => {
                let scope = module.scope;
                return self.scope(scope).get(name).ok_or_else(|| RuntimeError::UnknownMember {
                    member: self.name(name).to_owned(),
                    ty: self.display(receiver),
                });
            }
            _ => {}
        }
        let ty = self.runtime_type(receiver);
        if matches!(self.object(ty), Object::Class(_)) {
            return self.class_member(ty, receiver, name);
        }
        Err(RuntimeError::UnknownMember {
            member: self.name(name).to_owned(),
            ty: self.type_name(ty),
        })
    }
}

#[cfg(test)]
mod tests;
