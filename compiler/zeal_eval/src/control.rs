//! Non-local exits: errors and `return`/`break`/`continue`.

use zeal_ir::{NodeId, Span};
use zeal_runtime::{ObjectId, RuntimeError};

/// A runtime error and the innermost node it was raised under.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalFailure {
    pub error: RuntimeError,
    pub node: Option<NodeId>,
    pub span: Option<Span>,
}

/// Everything that leaves a node early.
///
/// Control signals carry the loop marker they target (`None` for the
/// innermost loop) or the returned value.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Error(Box<EvalFailure>),
    Return(Option<ObjectId>),
    Break(Option<ObjectId>),
    Continue(Option<ObjectId>),
}

impl ControlAction {
    /// Record `node` as the failure site unless an inner node already did.
    #[must_use]
    pub fn at(self, node: NodeId, span: Span) -> Self {
        match self {
            ControlAction::Error(mut failure) => {
                if failure.node.is_none() {
                    failure.node = Some(node);
                    failure.span = Some(span);
                }
                ControlAction::Error(failure)
            }
            signal => signal,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// Keyword of a control signal, for messages.
    pub fn signal_name(&self) -> &'static str {
        match self {
            ControlAction::Error(_) => "error",
            ControlAction::Return(_) => "return",
            ControlAction::Break(_) => "break",
            ControlAction::Continue(_) => "continue",
        }
    }
}

impl From<RuntimeError> for ControlAction {
    fn from(error: RuntimeError) -> Self {
        ControlAction::Error(Box::new(EvalFailure {
            error,
            node: None,
            span: None,
        }))
    }
}

pub type EvalResult<T = ObjectId> = Result<T, ControlAction>;
