//! Calling functions, natives, overload groups, classes and type classes.

use zeal_ir::{NodeId, Span};
use zeal_runtime::{Function, Object, ObjectId, RuntimeError, ScopeId, SpecialType};

use super::Interpreter;
use crate::{CallFrame, ControlAction, EvalResult};

impl Interpreter {
    pub(crate) fn call_expression(
        &mut self,
        callable: NodeId,
        arguments: &[NodeId],
        span: Span,
    ) -> EvalResult {
        let callee = self.evaluate_value(callable)?;
        let arguments = self.evaluate_all(arguments)?;
        self.call(callee, &arguments, span)
    }

    /// Invoke `callee` with already evaluated `arguments`.
    pub fn call(&mut self, callee: ObjectId, arguments: &[ObjectId], span: Span) -> EvalResult {
        match self.runtime.object(callee) {
            Object::Function(_) => self.call_function(callee, arguments, span),
            Object::NativeFunction(native) => {
                let func = native.func;
                self.check_application(callee, arguments)?;
                Ok(func(&mut self.runtime, arguments)?)
            }
            Object::OverloadGroup(_) => {
                let types = self.argument_types(arguments);
                let target = self.runtime.resolve_overload(callee, &types)?;
                self.call(target, arguments, span)
            }
            Object::Partial(partial) => {
                let target = partial.callable;
                let mut all = partial.bound.clone();
                all.extend_from_slice(arguments);
                self.call(target, &all, span)
            }
            Object::Method(method) => {
                let group = method.group;
                self.call(group, arguments, span)
            }
            Object::TypeClassMethod(_) => {
                let target = self
                    .runtime
                    .dispatch_type_class_method(callee, arguments)?;
                self.call(target, arguments, span)
            }
            Object::Class(_) => self.create_instance(callee, arguments, span),
            Object::TypeClass(_) => {
                let &[ty] = arguments else {
                    return Err(RuntimeError::WrongArity {
                        expected: 1,
                        found: arguments.len(),
                    }
                    .into());
                };
                let ty = self.runtime.expect_type(ty)?;
                Ok(self.runtime.implementation(callee, ty)?)
            }
            Object::Special(SpecialType::Object) => {
                if !arguments.is_empty() {
                    return Err(RuntimeError::WrongArity {
                        expected: 0,
                        found: arguments.len(),
                    }
                    .into());
                }
                Ok(self.runtime.new_marker(None))
            }
            _ => Err(RuntimeError::NotCallable {
                found: self.runtime.display(callee),
            }
            .into()),
        }
    }

    fn argument_types(&self, arguments: &[ObjectId]) -> Vec<ObjectId> {
        arguments
            .iter()
            .map(|&argument| self.runtime.runtime_type(argument))
            .collect()
    }

    /// Arity and argument types against the callee's signature.
    fn check_application(&self, callee: ObjectId, arguments: &[ObjectId]) -> EvalResult<()> {
        let signature = self.runtime.runtime_type(callee);
        let types = self.argument_types(arguments);
        self.runtime.type_application(signature, &types)?;
        Ok(())
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(function = %self.runtime.display(function), depth = self.call_stack.depth())
    )]
    fn call_function(&mut self, function: ObjectId, arguments: &[ObjectId], span: Span) -> EvalResult {
        let Some(declaration) = self.runtime.function(function).cloned() else {
            return Err(RuntimeError::NotCallable {
                found: self.runtime.display(function),
            }
            .into());
        };
        self.check_application(function, arguments)?;
        let Some(body) = &declaration.body else {
            return Err(RuntimeError::AbstractCall {
                function: self.runtime.display(function),
            }
            .into());
        };

        self.call_stack.push(CallFrame {
            name: declaration.name,
            call_span: span,
        })?;
        let result = {
            let scope = self.runtime.new_scope(Some(declaration.lexical_scope));
            let mut frame = self.enter_frame(scope, Some(function), body.arena.clone());
            frame
                .bind_arguments(scope, &declaration, arguments)
                .and_then(|()| frame.execute_statements(&body.statements))
        };
        self.call_stack.pop();

        self.finish_call(function, &declaration, result)
    }

    fn bind_arguments(
        &mut self,
        scope: ScopeId,
        declaration: &Function,
        arguments: &[ObjectId],
    ) -> EvalResult<()> {
        for (parameter, &argument) in declaration.parameters.iter().zip(arguments) {
            let slot = self
                .runtime
                .new_argument(parameter.name, parameter.ty, argument);
            self.runtime.define(scope, parameter.name, slot)?;
        }
        Ok(())
    }

    /// Turn the body's outcome into the call's value.
    fn finish_call(
        &mut self,
        function: ObjectId,
        declaration: &Function,
        result: EvalResult,
    ) -> EvalResult {
        let core = self.runtime.core().clone();
        match result {
            Err(ControlAction::Return(value)) => {
                let value = value.unwrap_or(core.unit_value);
                if let Some(ty) = declaration.return_type.filter(|&ty| ty != core.void) {
                    self.runtime.check_value(value, ty)?;
                }
                Ok(value)
            }
            Err(signal @ (ControlAction::Break(_) | ControlAction::Continue(_))) => {
                Err(RuntimeError::ControlOutsideConstruct {
                    signal: signal.signal_name(),
                    construct: "function",
                }
                .into())
            }
            Err(error) => Err(error),
            Ok(_) => match declaration.return_type {
                None => Ok(core.unit_value),
                Some(ty) if ty == core.unit || ty == core.void || ty == core.any => {
                    Ok(core.unit_value)
                }
                Some(ty) => self.runtime.default_value(ty).map_err(|_| {
                    ControlAction::from(RuntimeError::MissingReturn {
                        function: self.runtime.display(function),
                        ty: self.runtime.type_name(ty),
                    })
                }),
            },
        }
    }

    /// Allocate an instance and run the constructor overload matching
    /// `(instance, arguments...)`. A constructor returning unit yields the
    /// instance; any other result replaces it.
    fn create_instance(&mut self, class: ObjectId, arguments: &[ObjectId], span: Span) -> EvalResult {
        let instance = self.runtime.new_instance(class)?;
        let constructor = match self.runtime.class(class) {
            Some(c) => c.constructor,
            None => {
                return Err(RuntimeError::NotAClass {
                    found: self.runtime.display(class),
                }
                .into())
            }
        };
        let mut all = Vec::with_capacity(arguments.len() + 1);
        all.push(instance);
        all.extend_from_slice(arguments);

        let result = self.call(constructor, &all, span)?;
        if result == self.runtime.core().unit_value {
            Ok(instance)
        } else {
            Ok(result)
        }
    }
}
