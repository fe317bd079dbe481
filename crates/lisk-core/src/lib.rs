pub mod callback;
pub mod env;
pub mod error;
pub mod value;

pub use callback::{call_callback, set_apply_callback, ApplyFn};
pub use env::{Cell, Env};
pub use error::{LiskError, Span, VarAccess};
pub use lasso::Spur;
pub use value::{
    intern, resolve, with_resolved, Closure, DottedPair, IoFn, Port, PrimitiveFn, Value,
};
