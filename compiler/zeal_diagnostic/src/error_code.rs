use std::fmt;

/// Error codes for all evaluator diagnostics.
///
/// Format: E#### where the first digit indicates the category:
/// - E1xxx: Binding errors
/// - E2xxx: Type errors
/// - E3xxx: Import and module errors
/// - E4xxx: Declaration and control errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Binding Errors (E1xxx)
    /// Name is not bound in any enclosing scope
    E1001,
    /// Name is already bound to a non-overloadable value
    E1002,
    /// Member not found on the receiver's type
    E1003,

    // Type Errors (E2xxx)
    /// Value type does not satisfy the target type
    E2001,
    /// Assignment target is not a writable slot
    E2002,
    /// Wrong number of arguments
    E2003,
    /// No overload accepts the argument types
    E2004,
    /// More than one overload accepts the argument types
    E2005,
    /// Value is not callable
    E2006,
    /// Type has no implementation of the type class
    E2007,
    /// Type class already implemented for the type
    E2008,
    /// Type has no default value
    E2009,
    /// Expected a type
    E2010,
    /// Expected a class
    E2011,
    /// Expected a type class
    E2012,
    /// Literal text cannot be converted
    E2013,
    /// Instance member accessed through its class
    E2014,

    // Import Errors (E3xxx)
    /// Import source could not be resolved
    E3001,
    /// Imported unit does not export the name
    E3002,
    /// Document imports itself through a cycle
    E3003,
    /// Type class implementation misses an interface member (warning)
    E3004,

    // Declaration Errors (E4xxx)
    /// Variable declared without type or initializer
    E4001,
    /// Function with a declared result type fell off its end
    E4002,
    /// Called a function that has no body
    E4003,
    /// `break`/`continue` target is not a loop
    E4004,
    /// Control signal escaped its construct
    E4005,

    // Internal Errors (E9xxx)
    /// Call depth limit exceeded
    E9001,
    /// Node kind has no evaluation rule
    E9002,
    /// Integer overflow
    E9003,
    /// Division by zero
    E9004,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::E9003 => "E9003",
            ErrorCode::E9004 => "E9004",
        }
    }

    /// Binding errors (E1xxx).
    pub fn is_binding_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Type errors (E2xxx).
    pub fn is_type_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Internal errors (E9xxx).
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E2005.to_string(), "E2005");
        assert_eq!(ErrorCode::E9002.to_string(), "E9002");
    }

    #[test]
    fn test_error_code_categories() {
        assert!(ErrorCode::E1002.is_binding_error());
        assert!(ErrorCode::E2007.is_type_error());
        assert!(!ErrorCode::E3001.is_type_error());
        assert!(ErrorCode::E9001.is_internal());
    }
}
