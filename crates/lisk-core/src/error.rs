use std::fmt;

use lasso::Spur;

use crate::value::{resolve, Value};

/// Check the exact argument count of a builtin, returning
/// `LiskError::WrongArgCount` with a rendering of the offending arguments.
///
/// ```ignore
/// check_args!(args, 2);
/// ```
#[macro_export]
macro_rules! check_args {
    ($args:expr, $count:literal) => {
        if $args.len() != $count {
            return Err($crate::LiskError::wrong_arg_count($count, $args));
        }
    };
}

/// 1-based source position of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(line: usize, col: usize) -> Self {
        Span { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Whether an unbound-variable error came from a lookup or a `set!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarAccess {
    Read,
    Write,
}

impl VarAccess {
    fn verb(&self) -> &'static str {
        match self {
            VarAccess::Read => "Getting",
            VarAccess::Write => "Setting",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LiskError {
    #[error("Parse error at {span}: {message}")]
    Parse { message: String, span: Span },

    #[error("Invalid type: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Expected {expected} args; found values{found}")]
    WrongArgCount { expected: usize, found: String },

    #[error("{} an unbound variable: {name}", access.verb())]
    Unbound { name: String, access: VarAccess },

    #[error("Unrecognized special form: {0}")]
    BadSpecialForm(String),

    #[error("Not a function: {0}")]
    NotFunction(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Eval error: {0}")]
    Eval(String),
}

impl LiskError {
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        LiskError::Parse {
            message: message.into(),
            span,
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        LiskError::TypeMismatch {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    pub fn wrong_arg_count(expected: usize, found: &[Value]) -> Self {
        let mut rendered = String::new();
        for v in found {
            rendered.push(' ');
            rendered.push_str(&v.to_string());
        }
        LiskError::WrongArgCount {
            expected,
            found: rendered,
        }
    }

    pub fn unbound_read(name: Spur) -> Self {
        LiskError::Unbound {
            name: resolve(name),
            access: VarAccess::Read,
        }
    }

    pub fn unbound_write(name: Spur) -> Self {
        LiskError::Unbound {
            name: resolve(name),
            access: VarAccess::Write,
        }
    }

    pub fn bad_special_form(form: &Value) -> Self {
        LiskError::BadSpecialForm(form.to_string())
    }

    pub fn not_function(value: &Value) -> Self {
        LiskError::NotFunction(value.to_string())
    }

    pub fn eval(message: impl Into<String>) -> Self {
        LiskError::Eval(message.into())
    }
}
