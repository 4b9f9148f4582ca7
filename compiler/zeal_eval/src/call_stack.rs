//! Live call frames and the recursion limit.

use zeal_ir::{Name, SharedInterner, Span};
use zeal_runtime::RuntimeError;

/// Calls allowed to be active at once unless configured otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct CallFrame {
    /// Callee name; `None` for anonymous functions.
    pub name: Option<Name>,
    /// Span of the call expression.
    pub call_span: Span,
}

/// Active calls, innermost last. `push` enforces the depth limit.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// The frame is not pushed when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), RuntimeError> {
        if self.frames.len() >= self.max_depth {
            return Err(RuntimeError::RecursionLimitExceeded {
                depth: self.max_depth,
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Callee names, most recent call first.
    pub fn backtrace(&self, interner: &SharedInterner) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .map(|frame| {
                frame
                    .name
                    .map_or_else(|| "<anonymous>".to_owned(), |n| interner.lookup(n).to_owned())
            })
            .collect()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

#[cfg(test)]
mod tests;
