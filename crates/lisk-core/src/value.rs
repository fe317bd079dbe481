use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::rc::Rc;

use lasso::{Rodeo, Spur};

use crate::env::Env;
use crate::error::LiskError;

thread_local! {
    static INTERNER: RefCell<Rodeo> = RefCell::new(Rodeo::default());
}

/// Intern a string, returning a Spur key.
pub fn intern(s: &str) -> Spur {
    INTERNER.with(|r| r.borrow_mut().get_or_intern(s))
}

/// Resolve a Spur key back to a String.
pub fn resolve(spur: Spur) -> String {
    INTERNER.with(|r| r.borrow().resolve(&spur).to_string())
}

/// Resolve a Spur and call f with the &str, avoiding allocation.
pub fn with_resolved<F, R>(spur: Spur, f: F) -> R
where
    F: FnOnce(&str) -> R,
{
    INTERNER.with(|r| {
        let interner = r.borrow();
        f(interner.resolve(&spur))
    })
}

/// A pure builtin callable from lisk code.
pub type CallableInner = dyn Fn(&[Value]) -> Result<Value, LiskError>;

pub struct PrimitiveFn {
    pub name: String,
    pub func: Box<CallableInner>,
}

impl PrimitiveFn {
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, LiskError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(f),
        }
    }
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<primitive {}>", self.name)
    }
}

/// A side-effecting builtin: same calling convention as [`PrimitiveFn`],
/// kept as a separate tag so hosts can tell the two registries apart.
pub struct IoFn {
    pub name: String,
    pub func: Box<CallableInner>,
}

impl IoFn {
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, LiskError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(f),
        }
    }
}

impl fmt::Debug for IoFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<io-fn {}>", self.name)
    }
}

/// A user-defined callable: parameter names, body, and the defining
/// environment held by shared reference.
#[derive(Debug, Clone)]
pub struct Closure {
    pub params: Vec<Spur>,
    pub variadic: Option<Spur>,
    pub body: Vec<Value>,
    pub env: Env,
    pub name: Option<Spur>,
}

/// An improper list: at least one leading value plus a non-list tail.
#[derive(Debug, Clone, PartialEq)]
pub struct DottedPair {
    pub prefix: Vec<Value>,
    pub tail: Value,
}

enum PortStream {
    Input(BufReader<File>),
    Output(File),
}

/// An open line-oriented text stream. Closing drops the underlying file
/// and is idempotent.
pub struct Port {
    path: String,
    stream: RefCell<Option<PortStream>>,
}

impl Port {
    pub fn open_input(path: &str) -> Result<Self, LiskError> {
        let file = File::open(path)
            .map_err(|e| LiskError::Io(format!("open-input-file {path}: {e}")))?;
        Ok(Port {
            path: path.to_string(),
            stream: RefCell::new(Some(PortStream::Input(BufReader::new(file)))),
        })
    }

    pub fn open_output(path: &str) -> Result<Self, LiskError> {
        let file = File::create(path)
            .map_err(|e| LiskError::Io(format!("open-output-file {path}: {e}")))?;
        Ok(Port {
            path: path.to_string(),
            stream: RefCell::new(Some(PortStream::Output(file))),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Read one line, without the trailing newline. Returns "" at EOF.
    pub fn read_line(&self) -> Result<String, LiskError> {
        let path = &self.path;
        match self.stream.borrow_mut().as_mut() {
            Some(PortStream::Input(reader)) => {
                let mut line = String::new();
                reader
                    .read_line(&mut line)
                    .map_err(|e| LiskError::Io(format!("read {path}: {e}")))?;
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(line)
            }
            Some(PortStream::Output(_)) => {
                Err(LiskError::eval(format!("read: {path} is an output port")))
            }
            None => Err(LiskError::eval(format!("read: port {path} is closed"))),
        }
    }

    /// Write one line of text followed by a newline.
    pub fn write_line(&self, text: &str) -> Result<(), LiskError> {
        let path = &self.path;
        match self.stream.borrow_mut().as_mut() {
            Some(PortStream::Output(file)) => writeln!(file, "{text}")
                .map_err(|e| LiskError::Io(format!("write {path}: {e}"))),
            Some(PortStream::Input(_)) => {
                Err(LiskError::eval(format!("write: {path} is an input port")))
            }
            None => Err(LiskError::eval(format!("write: port {path} is closed"))),
        }
    }

    /// Drop the underlying stream; safe to call more than once.
    pub fn close(&self) {
        self.stream.borrow_mut().take();
    }

    pub fn is_closed(&self) -> bool {
        self.stream.borrow().is_none()
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<port {}>", self.path)
    }
}

/// The core Value type for all lisk code and data.
#[derive(Debug, Clone)]
pub enum Value {
    Symbol(Spur),
    List(Rc<Vec<Value>>),
    Dotted(Rc<DottedPair>),
    Int(i64),
    Str(Rc<String>),
    Bool(bool),
    Port(Rc<Port>),
    PrimitiveFn(Rc<PrimitiveFn>),
    IoFn(Rc<IoFn>),
    Closure(Rc<Closure>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Dotted(_) => "dotted list",
            Value::Int(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Port(_) => "port",
            Value::PrimitiveFn(_) => "primitive",
            Value::IoFn(_) => "io function",
            Value::Closure(_) => "closure",
        }
    }

    pub fn symbol(s: &str) -> Value {
        Value::Symbol(intern(s))
    }

    pub fn string(s: &str) -> Value {
        Value::Str(Rc::new(s.to_string()))
    }

    pub fn int(n: i64) -> Value {
        Value::Int(n)
    }

    pub fn bool(b: bool) -> Value {
        Value::Bool(b)
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn dotted(prefix: Vec<Value>, tail: Value) -> Value {
        Value::Dotted(Rc::new(DottedPair { prefix, tail }))
    }

    /// The empty list, the language's unit value.
    pub fn empty_list() -> Value {
        Value::List(Rc::new(Vec::new()))
    }

    pub fn closure(c: Closure) -> Value {
        Value::Closure(Rc::new(c))
    }

    pub fn as_symbol_spur(&self) -> Option<Spur> {
        match self {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dotted(a), Value::Dotted(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Port(a), Value::Port(b)) => Rc::ptr_eq(a, b),
            (Value::PrimitiveFn(a), Value::PrimitiveFn(b)) => Rc::ptr_eq(a, b),
            (Value::IoFn(a), Value::IoFn(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Symbol(s) => with_resolved(*s, |name| write!(f, "{name}")),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Dotted(pair) => {
                write!(f, "(")?;
                for item in &pair.prefix {
                    write!(f, "{item} ")?;
                }
                write!(f, ". {})", pair.tail)
            }
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::Port(p) => write!(f, "<port {}>", p.path),
            Value::PrimitiveFn(p) => write!(f, "<primitive {}>", p.name),
            Value::IoFn(io) => write!(f, "<io-fn {}>", io.name),
            Value::Closure(c) => match c.name {
                Some(name) => with_resolved(name, |n| write!(f, "<closure {n}>")),
                None => write!(f, "<closure>"),
            },
        }
    }
}
