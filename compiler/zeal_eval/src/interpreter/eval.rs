//! Node dispatch and the expression forms.

use zeal_ir::{LiteralKind, Name, NodeId, NodeKind};
use zeal_runtime::{ObjectId, RuntimeError};

use super::Interpreter;
use crate::{ensure_sufficient_stack, ControlAction, EvalResult};

impl Interpreter {
    /// Evaluate `node` and read through any slot it produces.
    pub fn evaluate_value(&mut self, node: NodeId) -> EvalResult {
        ensure_sufficient_stack(|| self.value_of(node))
    }

    /// Evaluate `node` to a binding: names and members resolve to the slot
    /// or descriptor itself instead of its current value. Used by assignment
    /// targets and reflection.
    pub fn evaluate_binding(&mut self, node: NodeId) -> EvalResult {
        let arena = self.state.arena.clone();
        let result = match arena.kind(node) {
            NodeKind::Identifier(name) => self.resolve_name(*name),
            NodeKind::MemberAccess { object, member } => self.member_binding(*object, *member),
            _ => return self.evaluate_value(node),
        };
        result.map_err(|action| action.at(node, arena.span(node)))
    }

    /// Evaluate `node` and require a type.
    pub(crate) fn evaluate_type(&mut self, node: NodeId) -> EvalResult {
        let value = self.evaluate_value(node)?;
        Ok(self.runtime.expect_type(value)?)
    }

    fn value_of(&mut self, id: NodeId) -> EvalResult {
        let arena = self.state.arena.clone();
        let node = arena.get(id);
        let result = match &node.kind {
            NodeKind::Literal { kind, text } => self.literal(*kind, *text),
            NodeKind::Identifier(name) => {
                let binding = self.resolve_name(*name)?;
                Ok(self.runtime.read(binding)?)
            }
            NodeKind::MemberAccess { object, member } => {
                let binding = self.member_binding(*object, *member)?;
                Ok(self.runtime.read(binding)?)
            }
            NodeKind::Assign { left, right } => self.assign(*left, *right),
            NodeKind::Block(statements) => self.scoped().execute_statements(statements),
            NodeKind::Tuple(items) => self.tuple(items),
            NodeKind::Union(items) => self.union(items),
            NodeKind::FunctionCall {
                callable,
                arguments,
            } => self.call_expression(*callable, arguments, node.span),
            NodeKind::If(stmt) => self.execute_if(stmt),
            NodeKind::While(stmt) => self.execute_while(stmt),
            NodeKind::When(stmt) => self.execute_when(stmt),
            NodeKind::Break { target } => self.break_or_continue(*target, ControlAction::Break),
            NodeKind::Continue { target } => {
                self.break_or_continue(*target, ControlAction::Continue)
            }
            NodeKind::Return(value) => self.execute_return(*value),
            NodeKind::Var(decl) => self.declare_variable(decl),
            NodeKind::Function(decl) => self.declare_function(decl),
            NodeKind::Class(decl) => self.declare_class(decl),
            NodeKind::TypeClass(decl) => self.declare_type_class(decl),
            NodeKind::TypeClassImplementation(decl) => {
                self.declare_implementation(decl, id, node.span)
            }
            NodeKind::Module(decl) => self.declare_module(decl),
            NodeKind::Import(stmt) => self.execute_import(stmt, id, node.span),
            NodeKind::Unhandled(description) => {
                tracing::warn!(node = %description, "no evaluation rule");
                Err(RuntimeError::Unhandled {
                    node: description.clone(),
                }
                .into())
            }
        };
        result.map_err(|action| action.at(id, node.span))
    }

    // ===== Statements =====

    /// Evaluate one statement. Errors become diagnostics and the statement
    /// yields `null`; control signals pass through.
    pub fn execute_statement(&mut self, node: NodeId) -> EvalResult {
        match self.evaluate_value(node) {
            Err(ControlAction::Error(failure)) => {
                self.report(*failure);
                Ok(self.runtime.core().null_value)
            }
            other => other,
        }
    }

    /// Run `statements` in order; the result is the last statement's value,
    /// or unit for an empty list.
    pub fn execute_statements(&mut self, statements: &[NodeId]) -> EvalResult {
        let mut last = self.runtime.core().unit_value;
        for &statement in statements {
            last = self.execute_statement(statement)?;
        }
        Ok(last)
    }

    /// Run the statements of a unit. Signals that reach this level are
    /// reported and end the statement that raised them.
    pub(crate) fn execute_top_level(&mut self, statements: &[NodeId]) -> ObjectId {
        let mut last = self.runtime.core().unit_value;
        for &statement in statements {
            last = match self.execute_statement(statement) {
                Ok(value) => value,
                Err(signal) => {
                    self.report_escaped(&signal);
                    self.runtime.core().null_value
                }
            };
        }
        last
    }

    // ===== Expressions =====

    fn literal(&mut self, kind: LiteralKind, text: Name) -> EvalResult {
        let source = self.runtime.name(text);
        let invalid = |kind: &'static str| RuntimeError::InvalidLiteral {
            kind,
            text: source.to_owned(),
        };
        let value = match kind {
            LiteralKind::Keyword => match source {
                "true" => self.runtime.core().true_value,
                "false" => self.runtime.core().false_value,
                "null" => self.runtime.core().null_value,
                _ => return Err(invalid("keyword").into()),
            },
            LiteralKind::String => self.runtime.string(source),
            LiteralKind::Decimal => {
                let value = source.parse::<i64>().map_err(|_| invalid("decimal"))?;
                self.runtime.int(value)
            }
            LiteralKind::Real => {
                let value = source.parse::<f64>().map_err(|_| invalid("real"))?;
                self.runtime.float(value)
            }
        };
        Ok(value)
    }

    fn resolve_name(&mut self, name: Name) -> EvalResult {
        Ok(self.runtime.get_name(self.state.scope, name)?)
    }

    fn member_binding(&mut self, object: NodeId, member: Name) -> EvalResult {
        let receiver = self.evaluate_value(object)?;
        Ok(self.runtime.get_member(receiver, member)?)
    }

    /// The target is resolved before the value is evaluated.
    fn assign(&mut self, left: NodeId, right: NodeId) -> EvalResult {
        let slot = self.evaluate_binding(left)?;
        if self.runtime.object(slot).as_setter().is_none() {
            return Err(RuntimeError::NotASetter {
                found: self.runtime.display(slot),
            }
            .into());
        }
        let value = self.evaluate_value(right)?;
        self.runtime.assign(slot, value)?;
        Ok(value)
    }

    /// A tuple of types is a tuple type; anything else is a tuple value.
    fn tuple(&mut self, items: &[NodeId]) -> EvalResult {
        let values = self.evaluate_all(items)?;
        let all_types = values.iter().all(|&v| self.runtime.is_type(v));
        if !values.is_empty() && all_types {
            Ok(self.runtime.new_tuple_type(values))
        } else {
            Ok(self.runtime.new_tuple(values))
        }
    }

    fn union(&mut self, items: &[NodeId]) -> EvalResult {
        let types = items
            .iter()
            .map(|&item| self.evaluate_type(item))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(self.runtime.new_union(types))
    }

    pub(crate) fn evaluate_all(&mut self, nodes: &[NodeId]) -> EvalResult<Vec<ObjectId>> {
        nodes.iter().map(|&node| self.evaluate_value(node)).collect()
    }
}
