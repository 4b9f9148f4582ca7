//! RAII guards over the interpreter's evaluation state.
//!
//! A [`ScopedInterpreter`] snapshots the current scope, definition target,
//! module scope, arena and frame depth when it is created and restores them
//! when it is dropped, including during unwinding. The guard derefs to the
//! interpreter, so evaluation continues through it transparently.
//!
//! ```text
//! let mut scoped = interpreter.scoped();
//! scoped.runtime.define(scoped.state.scope, name, value)?;
//! scoped.evaluate_value(body)?;
//! // previous scope is current again here
//! ```

use std::ops::{Deref, DerefMut};

use zeal_ir::SharedArena;
use zeal_runtime::{DefinitionTarget, ObjectId, ScopeId};

use super::{Frame, Interpreter, InterpreterState};

struct SavedState {
    scope: ScopeId,
    definer: DefinitionTarget,
    module_scope: ScopeId,
    arena: SharedArena,
    depth: usize,
    /// The whole frame stack, when the guard replaced it.
    frames: Option<Vec<Frame>>,
}

pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    saved: SavedState,
}

impl<'a> ScopedInterpreter<'a> {
    fn new(interpreter: &'a mut Interpreter) -> Self {
        let state = &interpreter.state;
        let saved = SavedState {
            scope: state.scope,
            definer: state.definer,
            module_scope: state.module_scope,
            arena: state.arena.clone(),
            depth: state.frames.len(),
            frames: None,
        };
        ScopedInterpreter { interpreter, saved }
    }
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        let state = &mut self.interpreter.state;
        state.scope = self.saved.scope;
        state.definer = self.saved.definer;
        state.module_scope = self.saved.module_scope;
        state.arena = self.saved.arena.clone();
        match self.saved.frames.take() {
            Some(frames) => state.frames = frames,
            None => state.frames.truncate(self.saved.depth),
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Guard running in a fresh child of the current scope.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        let child = self.runtime.new_scope(Some(self.state.scope));
        self.enter(child, DefinitionTarget::Scope(child))
    }

    /// Guard running in `scope` with declarations going to `definer`.
    pub fn enter(&mut self, scope: ScopeId, definer: DefinitionTarget) -> ScopedInterpreter<'_> {
        let mut guard = ScopedInterpreter::new(self);
        guard.state.scope = scope;
        guard.state.definer = definer;
        guard
    }

    /// Guard running a module body: `scope` also becomes the module scope.
    pub fn enter_module(&mut self, scope: ScopeId) -> ScopedInterpreter<'_> {
        let mut guard = self.enter(scope, DefinitionTarget::Scope(scope));
        guard.state.module_scope = scope;
        guard
    }

    /// Guard for one function activation over the nodes of `arena`.
    pub fn enter_frame(
        &mut self,
        scope: ScopeId,
        function: Option<ObjectId>,
        arena: SharedArena,
    ) -> ScopedInterpreter<'_> {
        let mut guard = self.enter(scope, DefinitionTarget::Scope(scope));
        guard.state.arena = arena;
        guard.state.frames.push(Frame { scope, function });
        guard
    }

    /// Guard that only switches the node arena.
    pub(crate) fn enter_arena(&mut self, arena: SharedArena) -> ScopedInterpreter<'_> {
        let mut guard = ScopedInterpreter::new(self);
        guard.state.arena = arena;
        guard
    }

    /// Guard for a nested compilation unit: a fresh frame stack over the same
    /// global scope, running in `scope`.
    pub fn new_context(&mut self, scope: ScopeId, arena: SharedArena) -> ScopedInterpreter<'_> {
        let mut guard = ScopedInterpreter::new(self);
        let outer = std::mem::replace(&mut guard.state, InterpreterState::top_level(scope));
        guard.saved.frames = Some(outer.frames);
        guard.state.arena = arena;
        guard
    }
}
