//! Zeal runtime object model.
//!
//! Every runtime entity (values, types, functions, classes, scopes' bindings)
//! is an [`Object`] in the [`Runtime`] arena, addressed by [`ObjectId`].
//! The capability traits in [`protocols`] describe what an object can do;
//! the [`Object`] enum maps each variant onto the traits it implements.
//!
//! # Architecture
//!
//! - Built-in singleton types are created once per runtime in [`CoreTypes`];
//!   type identity is id equality.
//! - Scopes live in their own arena ([`ScopeId`]). Binding two callables to
//!   the same name merges them into a freshly allocated [`OverloadGroup`].
//! - Slot contents live in cells so slot objects never change after they
//!   are allocated.
//!
//! Executing function bodies is the evaluator's job; this crate stops at
//! deciding *which* callable runs and with which argument types.

mod class;
mod core_types;
mod error;
mod function;
mod member;
mod module;
mod object;
mod overload;
pub mod prelude;
mod print_handler;
pub mod protocols;
mod runtime;
mod scope;
mod type_class;
mod types;

pub use class::{BoundField, Class, ClassScope, Field, Instance, Method};
pub use core_types::CoreTypes;
pub use error::{RuntimeError, RuntimeResult};
pub use function::{
    Argument, Function, FunctionBody, NativeFn, NativeFunction, Parameter, PartialCall, Variable,
};
pub use module::{DefinitionTarget, Marker, Module};
pub use object::{CellId, Object, ObjectId, TupleValue};
pub use overload::OverloadGroup;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use runtime::Runtime;
pub use scope::{Scope, ScopeId};
pub use type_class::{TypeClass, TypeClassMethod, TypeClassScope};
pub use types::{
    FunctionType, NativeType, NullableType, PartialType, SpecialType, TupleType, UnionType,
};
