//! `if`, loops and non-local exits.

use zeal_ir::{Name, NodeId};
use zeal_runtime::{Object, ObjectId, RuntimeError};

use super::Interpreter;
use crate::{ControlAction, EvalResult};

/// Whether a signal aimed at `target` stops at the construct owning `marker`.
/// Untargeted signals stop at the innermost construct.
fn targets(target: Option<ObjectId>, marker: ObjectId) -> bool {
    target.is_none() || target == Some(marker)
}

impl Interpreter {
    /// The condition and its optional name live in a scope shared by both
    /// branches.
    pub(crate) fn execute_if(&mut self, stmt: &zeal_ir::IfStmt) -> EvalResult {
        let mut scoped = self.scoped();
        let condition = scoped.evaluate_value(stmt.condition)?;
        if let Some(name) = stmt.name {
            let scope = scoped.state.scope;
            scoped.runtime.define(scope, name, condition)?;
        }
        if scoped.runtime.is_truthy(condition) {
            scoped.evaluate_value(stmt.if_true)
        } else if let Some(if_false) = stmt.if_false {
            scoped.evaluate_value(if_false)
        } else {
            Ok(scoped.runtime.core().unit_value)
        }
    }

    /// `else` runs only when the condition turns false, never after `break`.
    pub(crate) fn execute_while(&mut self, stmt: &zeal_ir::WhileStmt) -> EvalResult {
        let mut scoped = self.scoped();
        let marker = scoped.bind_marker(stmt.name)?;
        let unit = scoped.runtime.core().unit_value;
        loop {
            let condition = scoped.evaluate_value(stmt.condition)?;
            if !scoped.runtime.is_truthy(condition) {
                if let Some(else_body) = stmt.else_body {
                    scoped.evaluate_value(else_body)?;
                }
                return Ok(unit);
            }
            match scoped.evaluate_value(stmt.body) {
                Ok(_) => {}
                Err(ControlAction::Break(target)) if targets(target, marker) => return Ok(unit),
                Err(ControlAction::Continue(target)) if targets(target, marker) => {}
                Err(other) => return Err(other),
            }
        }
    }

    /// Cases are tested in order against the subject. `continue` inside a
    /// case enters the next case without testing it; `break` or finishing a
    /// case ends the `when`. `else` runs once every case has been passed.
    /// Cases and `else` see the subject as `value`.
    pub(crate) fn execute_when(&mut self, stmt: &zeal_ir::WhenStmt) -> EvalResult {
        let mut scoped = self.scoped();
        let subject = scoped.evaluate_value(stmt.subject)?;
        let value_name = scoped.runtime.intern("value");
        let scope = scoped.state.scope;
        scoped.runtime.refer(scope, value_name, subject)?;
        let marker = scoped.bind_marker(stmt.name)?;
        let unit = scoped.runtime.core().unit_value;

        let mut fall_through = false;
        for case in &stmt.cases {
            if !fall_through {
                let value = scoped.evaluate_value(case.value)?;
                if !scoped.runtime.values_equal(subject, value) {
                    continue;
                }
            }
            fall_through = false;
            match scoped.evaluate_value(case.body) {
                Ok(_) => return Ok(unit),
                Err(ControlAction::Break(target)) if targets(target, marker) => return Ok(unit),
                Err(ControlAction::Continue(target)) if targets(target, marker) => {
                    fall_through = true;
                }
                Err(other) => return Err(other),
            }
        }

        if let Some(else_body) = stmt.else_body {
            scoped.evaluate_value(else_body)?;
        }
        Ok(unit)
    }

    /// A fresh marker, bound under `name` in the current scope if given.
    fn bind_marker(&mut self, name: Option<Name>) -> EvalResult {
        let marker = self.runtime.new_marker(name);
        if let Some(name) = name {
            let scope = self.state.scope;
            self.runtime.define(scope, name, marker)?;
        }
        Ok(marker)
    }

    pub(crate) fn break_or_continue(
        &mut self,
        target: Option<NodeId>,
        signal: fn(Option<ObjectId>) -> ControlAction,
    ) -> EvalResult {
        let Some(target) = target else {
            return Err(signal(None));
        };
        let marker = self.evaluate_value(target)?;
        if !matches!(self.runtime.object(marker), Object::Marker(_)) {
            return Err(RuntimeError::InvalidLoopTarget {
                found: self.runtime.display(marker),
            }
            .into());
        }
        Err(signal(Some(marker)))
    }

    pub(crate) fn execute_return(&mut self, value: Option<NodeId>) -> EvalResult {
        let in_function = self
            .state
            .frames
            .last()
            .is_some_and(|frame| frame.function.is_some());
        if !in_function {
            return Err(RuntimeError::ControlOutsideConstruct {
                signal: "return",
                construct: "function",
            }
            .into());
        }
        let value = value.map(|node| self.evaluate_value(node)).transpose()?;
        Err(ControlAction::Return(value))
    }
}
