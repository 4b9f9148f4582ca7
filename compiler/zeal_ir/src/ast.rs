//! Statement and expression nodes.
//!
//! The tree is flat: children are [`NodeId`]s into the owning
//! [`NodeArena`](crate::NodeArena). Declarations and statements share one
//! node type because the evaluator executes both the same way.

use crate::{Name, SharedArena, Span};
use std::fmt;

/// Index of a node inside its arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Lexical class of a literal token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LiteralKind {
    /// `true`, `false` or `null`.
    Keyword,
    String,
    /// Integer literal in base 10.
    Decimal,
    /// Floating point literal.
    Real,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: Option<NodeId>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<Name>,
    pub params: Vec<Param>,
    pub return_type: Option<NodeId>,
    /// `None` for interface members that only declare a signature.
    pub body: Option<Vec<NodeId>>,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Option<Name>,
    pub base: Option<NodeId>,
    pub items: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeClassDecl {
    pub name: Name,
    pub items: Vec<NodeId>,
}

/// `impl TypeClass for Type { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ImplDecl {
    pub type_class: NodeId,
    pub implemented_type: NodeId,
    pub items: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Name,
    pub ty: Option<NodeId>,
    pub initializer: Option<NodeId>,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub name: Option<Name>,
    pub condition: NodeId,
    pub if_true: NodeId,
    pub if_false: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub name: Option<Name>,
    pub condition: NodeId,
    pub body: NodeId,
    pub else_body: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhenCase {
    pub value: NodeId,
    pub body: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhenStmt {
    pub name: Option<Name>,
    pub subject: NodeId,
    pub cases: Vec<WhenCase>,
    pub else_body: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportItem {
    pub name: Name,
    pub alias: Option<Name>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportClause {
    /// `import * from "path"`
    All,
    /// `import { a, b as c } from "path"`
    Names(Vec<ImportItem>),
    /// `import name from "path"`: binds the whole unit as a module.
    Default(Name),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportStmt {
    pub source: NodeId,
    pub clause: ImportClause,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModuleDecl {
    pub name: Name,
    /// `None` for `module a;`, which stays open until the end of the document.
    pub body: Option<Vec<NodeId>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Assign {
        left: NodeId,
        right: NodeId,
    },
    Block(Vec<NodeId>),
    Break {
        target: Option<NodeId>,
    },
    Continue {
        target: Option<NodeId>,
    },
    FunctionCall {
        callable: NodeId,
        arguments: Vec<NodeId>,
    },
    Function(Box<FunctionDecl>),
    Class(ClassDecl),
    TypeClass(TypeClassDecl),
    TypeClassImplementation(ImplDecl),
    Identifier(Name),
    If(Box<IfStmt>),
    Import(ImportStmt),
    Literal {
        kind: LiteralKind,
        text: Name,
    },
    MemberAccess {
        object: NodeId,
        member: Name,
    },
    Module(ModuleDecl),
    Return(Option<NodeId>),
    Var(Box<VarDecl>),
    When(Box<WhenStmt>),
    While(Box<WhileStmt>),
    /// `(a, b)`: a tuple value, or a tuple type when every element is a type.
    Tuple(Vec<NodeId>),
    /// `a | b`
    Union(Vec<NodeId>),
    /// A construct the parser recognised but the evaluator has no rule for.
    Unhandled(String),
}

impl NodeKind {
    /// Short name used in diagnostics and trace output.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Assign { .. } => "assignment",
            NodeKind::Block(_) => "block",
            NodeKind::Break { .. } => "break",
            NodeKind::Continue { .. } => "continue",
            NodeKind::FunctionCall { .. } => "function call",
            NodeKind::Function(_) => "function declaration",
            NodeKind::Class(_) => "class declaration",
            NodeKind::TypeClass(_) => "typeclass declaration",
            NodeKind::TypeClassImplementation(_) => "typeclass implementation",
            NodeKind::Identifier(_) => "identifier",
            NodeKind::If(_) => "if",
            NodeKind::Import(_) => "import",
            NodeKind::Literal { .. } => "literal",
            NodeKind::MemberAccess { .. } => "member access",
            NodeKind::Module(_) => "module",
            NodeKind::Return(_) => "return",
            NodeKind::Var(_) => "variable declaration",
            NodeKind::When(_) => "when",
            NodeKind::While(_) => "while",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::Union(_) => "union",
            NodeKind::Unhandled(_) => "unhandled node",
        }
    }
}

/// One parsed compilation unit.
#[derive(Clone, Debug)]
pub struct ParsedDocument {
    /// Resolved path; also the memoization key for compiled documents.
    pub path: String,
    pub arena: SharedArena,
    pub statements: Vec<NodeId>,
}

impl ParsedDocument {
    pub fn new(path: impl Into<String>, arena: SharedArena, statements: Vec<NodeId>) -> Self {
        ParsedDocument {
            path: path.into(),
            arena,
            statements,
        }
    }
}
