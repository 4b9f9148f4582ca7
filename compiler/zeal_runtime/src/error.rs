//! Runtime error taxonomy.
//!
//! Every user-visible failure of the object model or evaluator is a
//! [`RuntimeError`]. Messages are rendered eagerly (names and types as text)
//! so the error outlives the runtime that produced it.

use zeal_diagnostic::ErrorCode;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    // Binding errors
    #[error("name `{name}` is not defined")]
    NameNotFound { name: String },

    #[error("name `{name}` is already defined in this scope")]
    NameAlreadyExists { name: String },

    #[error("`{ty}` has no member `{member}`")]
    UnknownMember { member: String, ty: String },

    // Type errors
    #[error("expected a value of type `{expected}`, found `{found}`")]
    NotAssignable { expected: String, found: String },

    #[error("cannot assign to `{found}`")]
    NotASetter { found: String },

    #[error("expected {expected} argument(s), found {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("no overload of `{name}` accepts arguments ({arguments})")]
    NoMatchingOverload { name: String, arguments: String },

    #[error("call to `{name}` with arguments ({arguments}) is ambiguous: {count} overloads match")]
    AmbiguousOverload {
        name: String,
        arguments: String,
        count: usize,
    },

    #[error("`{found}` is not callable")]
    NotCallable { found: String },

    #[error("`{ty}` does not implement type class `{type_class}`")]
    TypeClassNotImplemented { type_class: String, ty: String },

    #[error("type class `{type_class}` is already implemented for `{ty}`")]
    AlreadyImplemented { type_class: String, ty: String },

    #[error("type `{ty}` has no default value")]
    NoDefaultValue { ty: String },

    #[error("expected a type, found `{found}`")]
    NotAType { found: String },

    #[error("expected a class, found `{found}`")]
    NotAClass { found: String },

    #[error("expected a type class, found `{found}`")]
    NotATypeClass { found: String },

    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral { kind: &'static str, text: String },

    #[error("instance member `{member}` cannot be accessed through its class")]
    InstanceMemberOnType { member: String },

    // Import errors
    #[error("cannot import `{path}`")]
    ImportFailed { path: String },

    #[error("`{path}` does not export `{name}`")]
    ImportNameNotFound { name: String, path: String },

    #[error("`{path}` imports itself")]
    CyclicImport { path: String },

    // Declaration and control errors
    #[error("variable `{name}` needs a type or an initializer")]
    MissingTypeOrInitializer { name: String },

    #[error("function `{function}` must return a value of type `{ty}`")]
    MissingReturn { function: String, ty: String },

    #[error("function `{function}` has no body")]
    AbstractCall { function: String },

    #[error("`{found}` is not a loop")]
    InvalidLoopTarget { found: String },

    #[error("`{signal}` outside of {construct}")]
    ControlOutsideConstruct {
        signal: &'static str,
        construct: &'static str,
    },

    // Internal errors
    #[error("maximum call depth of {depth} exceeded")]
    RecursionLimitExceeded { depth: usize },

    #[error("no evaluation rule for {node}")]
    Unhandled { node: String },

    #[error("integer overflow in `{operation}`")]
    IntegerOverflow { operation: &'static str },

    #[error("division by zero")]
    DivisionByZero,
}

impl RuntimeError {
    /// Stable code used when the error becomes a diagnostic.
    pub fn code(&self) -> ErrorCode {
        match self {
            RuntimeError::NameNotFound { .. } => ErrorCode::E1001,
            RuntimeError::NameAlreadyExists { .. } => ErrorCode::E1002,
            RuntimeError::UnknownMember { .. } => ErrorCode::E1003,
            RuntimeError::NotAssignable { .. } => ErrorCode::E2001,
            RuntimeError::NotASetter { .. } => ErrorCode::E2002,
            RuntimeError::WrongArity { .. } => ErrorCode::E2003,
            RuntimeError::NoMatchingOverload { .. } => ErrorCode::E2004,
            RuntimeError::AmbiguousOverload { .. } => ErrorCode::E2005,
            RuntimeError::NotCallable { .. } => ErrorCode::E2006,
            RuntimeError::TypeClassNotImplemented { .. } => ErrorCode::E2007,
            RuntimeError::AlreadyImplemented { .. } => ErrorCode::E2008,
            RuntimeError::NoDefaultValue { .. } => ErrorCode::E2009,
            RuntimeError::NotAType { .. } => ErrorCode::E2010,
            RuntimeError::NotAClass { .. } => ErrorCode::E2011,
            RuntimeError::NotATypeClass { .. } => ErrorCode::E2012,
            RuntimeError::InvalidLiteral { .. } => ErrorCode::E2013,
            RuntimeError::InstanceMemberOnType { .. } => ErrorCode::E2014,
            RuntimeError::ImportFailed { .. } => ErrorCode::E3001,
            RuntimeError::ImportNameNotFound { .. } => ErrorCode::E3002,
            RuntimeError::CyclicImport { .. } => ErrorCode::E3003,
            RuntimeError::MissingTypeOrInitializer { .. } => ErrorCode::E4001,
            RuntimeError::MissingReturn { .. } => ErrorCode::E4002,
            RuntimeError::AbstractCall { .. } => ErrorCode::E4003,
            RuntimeError::InvalidLoopTarget { .. } => ErrorCode::E4004,
            RuntimeError::ControlOutsideConstruct { .. } => ErrorCode::E4005,
            RuntimeError::RecursionLimitExceeded { .. } => ErrorCode::E9001,
            RuntimeError::Unhandled { .. } => ErrorCode::E9002,
            RuntimeError::IntegerOverflow { .. } => ErrorCode::E9003,
            RuntimeError::DivisionByZero => ErrorCode::E9004,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_messages() {
        let err = RuntimeError::NameNotFound {
            name: "x".to_owned(),
        };
        assert_eq!(err.to_string(), "name `x` is not defined");

        let err = RuntimeError::WrongArity {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "expected 2 argument(s), found 1");
    }

    #[test]
    fn test_error_codes_follow_categories() {
        let binding = RuntimeError::NameAlreadyExists {
            name: "f".to_owned(),
        };
        assert!(binding.code().is_binding_error());

        let ty = RuntimeError::AmbiguousOverload {
            name: "f".to_owned(),
            arguments: "int".to_owned(),
            count: 2,
        };
        assert!(ty.code().is_type_error());

        assert!(RuntimeError::DivisionByZero.code().is_internal());
    }
}
