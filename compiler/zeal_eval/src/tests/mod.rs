//! Evaluator tests over hand-built documents.
//!
//! [`Doc`] wraps a `NodeArena` with helpers that take source-level names,
//! so a test reads close to the program it builds.

mod control_tests;
mod literals_tests;

use zeal_diagnostic::ErrorCode;
use zeal_ir::{
    ClassDecl, FunctionDecl, IfStmt, ImplDecl, ImportClause, ImportItem, ImportStmt, LiteralKind,
    ModuleDecl, Name, NodeArena, NodeId, NodeKind, Param, ParsedDocument, SharedInterner, Span,
    TypeClassDecl, VarDecl, WhenCase, WhenStmt, WhileStmt,
};
use zeal_runtime::{buffer_handler, Object, ObjectId};

use crate::Interpreter;

pub(crate) struct Doc {
    pub interner: SharedInterner,
    pub arena: NodeArena,
}

impl Doc {
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    pub fn with_interner(interner: SharedInterner) -> Self {
        Doc {
            interner,
            arena: NodeArena::new(),
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    fn node(&mut self, kind: NodeKind) -> NodeId {
        self.arena.alloc(kind, Span::DUMMY)
    }

    // Expressions

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.name(name);
        self.arena.identifier(name)
    }

    fn literal(&mut self, kind: LiteralKind, text: &str) -> NodeId {
        let text = self.name(text);
        self.arena.literal(kind, text)
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.literal(LiteralKind::Decimal, &value.to_string())
    }

    pub fn decimal(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::Decimal, text)
    }

    pub fn real(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::Real, text)
    }

    pub fn string(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::String, text)
    }

    pub fn keyword(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::Keyword, text)
    }

    /// `name(arguments...)`
    pub fn call(&mut self, name: &str, arguments: Vec<NodeId>) -> NodeId {
        let callee = self.ident(name);
        self.arena.call(callee, arguments)
    }

    pub fn call_node(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.arena.call(callee, arguments)
    }

    pub fn member(&mut self, object: NodeId, member: &str) -> NodeId {
        let member = self.name(member);
        self.arena.member(object, member)
    }

    /// `object.method(arguments...)`
    pub fn method_call(&mut self, object: NodeId, method: &str, arguments: Vec<NodeId>) -> NodeId {
        let callee = self.member(object, method);
        self.arena.call(callee, arguments)
    }

    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.arena.assign(left, right)
    }

    /// `name = value`
    pub fn set(&mut self, name: &str, value: NodeId) -> NodeId {
        let target = self.ident(name);
        self.arena.assign(target, value)
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.arena.block(statements)
    }

    pub fn tuple(&mut self, items: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Tuple(items))
    }

    pub fn union(&mut self, items: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Union(items))
    }

    pub fn unhandled(&mut self, description: &str) -> NodeId {
        self.node(NodeKind::Unhandled(description.to_owned()))
    }

    // Declarations

    pub fn var(&mut self, name: &str, ty: Option<&str>, initializer: Option<NodeId>) -> NodeId {
        self.var_decl(name, ty, initializer, false)
    }

    pub fn static_var(&mut self, name: &str, ty: Option<&str>, initializer: Option<NodeId>) -> NodeId {
        self.var_decl(name, ty, initializer, true)
    }

    fn var_decl(
        &mut self,
        name: &str,
        ty: Option<&str>,
        initializer: Option<NodeId>,
        is_static: bool,
    ) -> NodeId {
        let name = self.name(name);
        let ty = ty.map(|ty| self.ident(ty));
        self.node(NodeKind::Var(Box::new(VarDecl {
            name,
            ty,
            initializer,
            is_static,
        })))
    }

    /// `fun name(p: T, ...) -> R { body }`; `None` body declares a
    /// signature only.
    pub fn function(
        &mut self,
        name: Option<&str>,
        params: &[(&str, &str)],
        returns: Option<&str>,
        body: Option<Vec<NodeId>>,
    ) -> NodeId {
        self.function_decl(name, params, returns, body, false)
    }

    pub fn static_function(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
        returns: Option<&str>,
        body: Vec<NodeId>,
    ) -> NodeId {
        self.function_decl(Some(name), params, returns, Some(body), true)
    }

    fn function_decl(
        &mut self,
        name: Option<&str>,
        params: &[(&str, &str)],
        returns: Option<&str>,
        body: Option<Vec<NodeId>>,
        is_static: bool,
    ) -> NodeId {
        let params = params
            .iter()
            .map(|&(name, ty)| Param {
                name: self.name(name),
                ty: Some(self.ident(ty)),
                span: Span::DUMMY,
            })
            .collect();
        let decl = FunctionDecl {
            name: name.map(|n| self.name(n)),
            params,
            return_type: returns.map(|r| self.ident(r)),
            body,
            is_static,
        };
        self.node(NodeKind::Function(Box::new(decl)))
    }

    pub fn class(&mut self, name: &str, base: Option<&str>, items: Vec<NodeId>) -> NodeId {
        let decl = ClassDecl {
            name: Some(self.name(name)),
            base: base.map(|b| self.ident(b)),
            items,
        };
        self.node(NodeKind::Class(decl))
    }

    pub fn type_class(&mut self, name: &str, items: Vec<NodeId>) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::TypeClass(TypeClassDecl { name, items }))
    }

    pub fn implementation(&mut self, type_class: &str, ty: &str, items: Vec<NodeId>) -> NodeId {
        let decl = ImplDecl {
            type_class: self.ident(type_class),
            implemented_type: self.ident(ty),
            items,
        };
        self.node(NodeKind::TypeClassImplementation(decl))
    }

    pub fn module(&mut self, name: &str, body: Option<Vec<NodeId>>) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::Module(ModuleDecl { name, body }))
    }

    pub fn import(&mut self, path: &str, clause: ImportClause) -> NodeId {
        let source = self.string(path);
        self.node(NodeKind::Import(ImportStmt { source, clause }))
    }

    /// `import { name as alias, ... } from path`
    pub fn import_names(&mut self, path: &str, names: &[(&str, Option<&str>)]) -> NodeId {
        let items = names
            .iter()
            .map(|&(name, alias)| ImportItem {
                name: self.name(name),
                alias: alias.map(|a| self.name(a)),
            })
            .collect();
        self.import(path, ImportClause::Names(items))
    }

    // Statements

    pub fn if_(
        &mut self,
        name: Option<&str>,
        condition: NodeId,
        if_true: NodeId,
        if_false: Option<NodeId>,
    ) -> NodeId {
        let stmt = IfStmt {
            name: name.map(|n| self.name(n)),
            condition,
            if_true,
            if_false,
        };
        self.node(NodeKind::If(Box::new(stmt)))
    }

    pub fn while_(
        &mut self,
        name: Option<&str>,
        condition: NodeId,
        body: NodeId,
        else_body: Option<NodeId>,
    ) -> NodeId {
        let stmt = WhileStmt {
            name: name.map(|n| self.name(n)),
            condition,
            body,
            else_body,
        };
        self.node(NodeKind::While(Box::new(stmt)))
    }

    pub fn when(
        &mut self,
        name: Option<&str>,
        subject: NodeId,
        cases: Vec<(NodeId, NodeId)>,
        else_body: Option<NodeId>,
    ) -> NodeId {
        let stmt = WhenStmt {
            name: name.map(|n| self.name(n)),
            subject,
            cases: cases
                .into_iter()
                .map(|(value, body)| WhenCase { value, body })
                .collect(),
            else_body,
        };
        self.node(NodeKind::When(Box::new(stmt)))
    }

    pub fn break_(&mut self, target: Option<&str>) -> NodeId {
        let target = target.map(|t| self.ident(t));
        self.node(NodeKind::Break { target })
    }

    pub fn continue_(&mut self, target: Option<&str>) -> NodeId {
        let target = target.map(|t| self.ident(t));
        self.node(NodeKind::Continue { target })
    }

    pub fn ret(&mut self, value: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Return(value))
    }

    /// `print(arguments...)`
    pub fn print(&mut self, arguments: Vec<NodeId>) -> NodeId {
        self.call("print", arguments)
    }

    pub fn finish(self, path: &str, statements: Vec<NodeId>) -> ParsedDocument {
        ParsedDocument::new(path, self.arena.into_shared(), statements)
    }
}

/// Interpreter sharing `interner`, printing into a buffer.
pub(crate) fn interpreter(interner: &SharedInterner) -> Interpreter {
    Interpreter::builder()
        .interner(interner.clone())
        .print_handler(buffer_handler())
        .build()
}

/// Execute `statements` as the main document.
pub(crate) fn run(doc: Doc, statements: Vec<NodeId>) -> (Interpreter, ObjectId) {
    let mut interp = interpreter(&doc.interner);
    let document = doc.finish("main.zl", statements);
    let value = interp.execute(&document);
    (interp, value)
}

pub(crate) fn error_codes(interp: &Interpreter) -> Vec<ErrorCode> {
    interp.diagnostics().iter().map(|d| d.code).collect()
}

#[track_caller]
pub(crate) fn int_of(interp: &Interpreter, value: ObjectId) -> i64 {
    match interp.runtime().object(value) {
        Object::Int(n) => *n,
        _ => panic!("expected an int, found {}", interp.runtime().display(value)),
    }
}

#[track_caller]
pub(crate) fn lookup_int(interp: &Interpreter, name: &str) -> i64 {
    let value = interp
        .lookup(name)
        .unwrap_or_else(|| panic!("`{name}` is not bound"));
    int_of(interp, value)
}
