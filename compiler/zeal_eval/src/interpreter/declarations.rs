//! Declarations: variables, functions, classes, type classes, modules.

use zeal_diagnostic::{Diagnostic, ErrorCode};
use zeal_ir::{
    ClassDecl, FunctionDecl, ImplDecl, ModuleDecl, Name, NodeId, Span, TypeClassDecl, VarDecl,
};
use zeal_runtime::protocols::ScopeProtocol;
use zeal_runtime::{ClassScope, DefinitionTarget, FunctionBody, ObjectId, RuntimeError, TypeClassScope};

use super::Interpreter;
use crate::EvalResult;

impl Interpreter {
    /// Bind a declaration through the current definition target.
    fn define_declaration(&mut self, name: Name, value: ObjectId, is_static: bool) -> EvalResult<()> {
        let definer = self.state.definer;
        if is_static {
            definer.define_static(&mut self.runtime, name, value)?;
        } else {
            definer.define(&mut self.runtime, name, value)?;
        }
        Ok(())
    }

    /// `var name: T = init`. With only a type the slot starts at the type's
    /// default; with only an initializer the type is the value's type.
    pub(crate) fn declare_variable(&mut self, decl: &VarDecl) -> EvalResult {
        let (ty, value) = match (decl.ty, decl.initializer) {
            (None, None) => {
                return Err(RuntimeError::MissingTypeOrInitializer {
                    name: self.runtime.name(decl.name).to_owned(),
                }
                .into())
            }
            (Some(ty), None) => {
                let ty = self.evaluate_type(ty)?;
                (ty, self.runtime.default_value(ty)?)
            }
            (None, Some(initializer)) => {
                let value = self.evaluate_value(initializer)?;
                (self.runtime.runtime_type(value), value)
            }
            (Some(ty), Some(initializer)) => {
                let ty = self.evaluate_type(ty)?;
                let value = self.evaluate_value(initializer)?;
                self.runtime.check_value(value, ty)?;
                (ty, value)
            }
        };
        let variable = self.runtime.new_variable(decl.name, ty, value);
        self.define_declaration(decl.name, variable, decl.is_static)?;
        Ok(value)
    }

    /// Parameter and return types are evaluated now; the body runs per call
    /// in a child of the scope current here.
    pub(crate) fn declare_function(&mut self, decl: &FunctionDecl) -> EvalResult {
        let return_type = decl
            .return_type
            .map(|ty| self.evaluate_type(ty))
            .transpose()?;
        let body = decl.body.as_ref().map(|statements| FunctionBody {
            arena: self.state.arena.clone(),
            statements: statements.clone(),
        });
        let function = self
            .runtime
            .new_function(decl.name, return_type, self.state.scope, body);

        let any = self.runtime.core().any;
        for param in &decl.params {
            let ty = match param.ty {
                Some(ty) => self.evaluate_type(ty)?,
                None => any,
            };
            self.runtime.add_parameter(function, param.name, ty, None)?;
        }

        if let Some(name) = decl.name {
            self.define_declaration(name, function, decl.is_static)?;
        }
        Ok(function)
    }

    pub(crate) fn declare_class(&mut self, decl: &ClassDecl) -> EvalResult {
        let base = decl.base.map(|base| self.evaluate_value(base)).transpose()?;
        let class = self.runtime.new_class(decl.name, base, self.state.scope)?;
        if let Some(name) = decl.name {
            self.define_declaration(name, class, false)?;
        }
        self.class_body(class, &decl.items)?;
        Ok(class)
    }

    fn class_body(&mut self, class: ObjectId, items: &[NodeId]) -> EvalResult<()> {
        let scope = self.runtime.class_scope(class)?;
        self.enter(scope, DefinitionTarget::Class(ClassScope(class)))
            .execute_statements(items)?;
        self.runtime.finish_class(class)?;
        Ok(())
    }

    pub(crate) fn declare_type_class(&mut self, decl: &TypeClassDecl) -> EvalResult {
        let type_class = self.runtime.new_type_class(decl.name, self.state.scope);
        self.define_declaration(decl.name, type_class, false)?;
        let scope = self.runtime.type_class_scope(type_class)?;
        self.enter(scope, DefinitionTarget::TypeClass(TypeClassScope(type_class)))
            .execute_statements(&decl.items)?;
        Ok(type_class)
    }

    /// `impl TC for T { ... }`: the body becomes an implementation class.
    /// Interface members it leaves out are reported as warnings. A second
    /// implementation for the same type fails before its body runs.
    pub(crate) fn declare_implementation(
        &mut self,
        decl: &ImplDecl,
        node: NodeId,
        span: Span,
    ) -> EvalResult {
        let type_class = self.evaluate_value(decl.type_class)?;
        let ty = self.evaluate_type(decl.implemented_type)?;
        let class = self
            .runtime
            .new_implementation_class(type_class, ty, self.state.scope)?;
        self.class_body(class, &decl.items)?;

        for member in self.runtime.missing_members(type_class, class)? {
            let message = format!(
                "implementation of `{}` for `{}` is missing `{}`",
                self.runtime.type_name(type_class),
                self.runtime.type_name(ty),
                self.runtime.name(member),
            );
            self.diagnostics.push(
                Diagnostic::warning(ErrorCode::E3004)
                    .with_message(message)
                    .at(node, span),
            );
        }

        self.runtime.add_implementation(type_class, ty, class)?;
        Ok(class)
    }

    /// A module's scope hangs off the enclosing module scope, not off the
    /// current scope. Without a body the module stays current until the
    /// enclosing body ends.
    pub(crate) fn declare_module(&mut self, decl: &ModuleDecl) -> EvalResult {
        let scope = self.runtime.new_scope(Some(self.state.module_scope));
        let module = self.runtime.new_module(decl.name, scope);
        self.define_declaration(decl.name, module, false)?;
        self.registry
            .register_module(self.runtime.name(decl.name), module);

        match &decl.body {
            Some(body) => {
                self.enter_module(scope).execute_statements(body)?;
            }
            None => {
                self.state.scope = scope;
                self.state.definer = DefinitionTarget::Scope(scope);
                self.state.module_scope = scope;
            }
        }
        Ok(module)
    }
}
