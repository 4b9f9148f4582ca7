//! Zeal IR - names, spans and the statement tree handed to the evaluator.
//!
//! The lexer and parser live outside this workspace. They produce a
//! [`ParsedDocument`]: a [`NodeArena`] of statement/expression nodes plus the
//! ids of the top-level statements. Everything here is plain data.

mod arena;
mod ast;
mod interner;
mod name;
mod span;

pub use arena::{NodeArena, SharedArena};
pub use ast::{
    ClassDecl, FunctionDecl, IfStmt, ImplDecl, ImportClause, ImportItem, ImportStmt, LiteralKind,
    ModuleDecl, Node, NodeId, NodeKind, Param, ParsedDocument, TypeClassDecl, VarDecl, WhenCase,
    WhenStmt, WhileStmt,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
