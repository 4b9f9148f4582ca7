//! Functions, native functions, partial applications and value slots.

use zeal_ir::{Name, NodeId, SharedArena};

use crate::protocols::{Callable, Getter, Setter};
use crate::{CellId, Object, ObjectId, PartialType, Runtime, RuntimeError, RuntimeResult, ScopeId};

/// One declared parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: Name,
    pub ty: ObjectId,
    /// Position in the owner's parameter list.
    pub index: usize,
    /// The function declaring this parameter.
    pub owner: ObjectId,
}

/// Statements executed on each call, with the arena they live in.
#[derive(Clone, Debug)]
pub struct FunctionBody {
    pub arena: SharedArena,
    pub statements: Vec<NodeId>,
}

/// A user-defined function.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Option<Name>,
    pub parameters: Vec<Parameter>,
    /// Declared result type; `None` behaves as `any`.
    pub return_type: Option<ObjectId>,
    /// Scope captured at the definition site.
    pub lexical_scope: ScopeId,
    /// `None` for signature-only declarations.
    pub body: Option<FunctionBody>,
    signature: ObjectId,
}

impl Callable for Function {
    fn callable_name(&self) -> Option<Name> {
        self.name
    }

    fn signature(&self) -> ObjectId {
        self.signature
    }
}

/// Host implementation of a native function.
pub type NativeFn = fn(&mut Runtime, &[ObjectId]) -> RuntimeResult<ObjectId>;

#[derive(Clone, Debug)]
pub struct NativeFunction {
    pub name: Name,
    pub func: NativeFn,
    signature: ObjectId,
}

impl Callable for NativeFunction {
    fn callable_name(&self) -> Option<Name> {
        Some(self.name)
    }

    fn signature(&self) -> ObjectId {
        self.signature
    }
}

/// A callable with its leading arguments already supplied.
#[derive(Clone, Debug)]
pub struct PartialCall {
    pub callable: ObjectId,
    pub bound: Vec<ObjectId>,
    ty: ObjectId,
}

impl Callable for PartialCall {
    fn callable_name(&self) -> Option<Name> {
        None
    }

    fn signature(&self) -> ObjectId {
        self.ty
    }
}

/// A declared variable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: Name,
    pub ty: ObjectId,
    pub cell: CellId,
}

impl Getter for Variable {
    fn get(&self, rt: &Runtime) -> RuntimeResult<ObjectId> {
        Ok(rt.cell(self.cell))
    }
}

impl Setter for Variable {
    fn slot_type(&self) -> ObjectId {
        self.ty
    }

    fn target_cell(&self, _rt: &Runtime) -> RuntimeResult<CellId> {
        Ok(self.cell)
    }
}

/// A parameter bound to an argument inside one call frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub ty: ObjectId,
    pub cell: CellId,
}

impl Getter for Argument {
    fn get(&self, rt: &Runtime) -> RuntimeResult<ObjectId> {
        Ok(rt.cell(self.cell))
    }
}

impl Setter for Argument {
    fn slot_type(&self) -> ObjectId {
        self.ty
    }

    fn target_cell(&self, _rt: &Runtime) -> RuntimeResult<CellId> {
        Ok(self.cell)
    }
}

impl Runtime {
    /// Allocate a function without parameters; see [`Runtime::add_parameter`].
    pub fn new_function(
        &mut self,
        name: Option<Name>,
        return_type: Option<ObjectId>,
        lexical_scope: ScopeId,
        body: Option<FunctionBody>,
    ) -> ObjectId {
        let returns = return_type.unwrap_or(self.core().any);
        let signature = self.new_function_type(Vec::new(), returns, false);
        self.alloc(Object::Function(Function {
            name,
            parameters: Vec::new(),
            return_type,
            lexical_scope,
            body,
            signature,
        }))
    }

    pub fn function(&self, id: ObjectId) -> Option<&Function> {
        match self.object(id) {
            Object::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Insert a parameter at `index` (or append), renumber the rest and
    /// rebuild the signature.
    pub fn add_parameter(
        &mut self,
        function: ObjectId,
        name: Name,
        ty: ObjectId,
        index: Option<usize>,
    ) -> RuntimeResult<()> {
        let any = self.core().any;
        let found = self.display(function);
        let Object::Function(f) = self.object_mut(function) else {
            return Err(RuntimeError::NotCallable { found });
        };

        let at = index.map_or(f.parameters.len(), |i| i.min(f.parameters.len()));
        f.parameters.insert(
            at,
            Parameter {
                name,
                ty,
                index: at,
                owner: function,
            },
        );
        for (i, parameter) in f.parameters.iter_mut().enumerate() {
            parameter.index = i;
        }
        let types = f.parameters.iter().map(|p| p.ty).collect();
        let returns = f.return_type.unwrap_or(any);

        let signature = self.new_function_type(types, returns, false);
        if let Object::Function(f) = self.object_mut(function) {
            f.signature = signature;
        }
        Ok(())
    }

    /// Allocate a native function. `parameters: None` accepts any arguments.
    pub fn new_native(
        &mut self,
        name: &str,
        parameters: Option<Vec<ObjectId>>,
        returns: ObjectId,
        func: NativeFn,
    ) -> ObjectId {
        let name = self.intern(name);
        let signature = match parameters {
            Some(parameters) => self.new_function_type(parameters, returns, false),
            None => self.new_function_type(Vec::new(), returns, true),
        };
        self.alloc(Object::NativeFunction(NativeFunction {
            name,
            func,
            signature,
        }))
    }

    pub fn new_partial(&mut self, callable: ObjectId, bound: Vec<ObjectId>) -> ObjectId {
        let origin = self.runtime_type(callable);
        let bound_types = bound.iter().map(|&b| self.runtime_type(b)).collect();
        let ty = self.alloc(Object::PartialType(PartialType {
            origin,
            bound: bound_types,
        }));
        self.alloc(Object::Partial(PartialCall {
            callable,
            bound,
            ty,
        }))
    }

    /// Allocate an argument slot for one call.
    pub fn new_argument(&mut self, name: Name, ty: ObjectId, value: ObjectId) -> ObjectId {
        let cell = self.new_cell(value);
        self.alloc(Object::Argument(Argument { name, ty, cell }))
    }
}
