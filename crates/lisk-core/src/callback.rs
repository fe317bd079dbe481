use std::cell::Cell;

use crate::error::LiskError;
use crate::value::Value;

/// Application entry point of the evaluator, as seen from builtins.
pub type ApplyFn = fn(&Value, &[Value]) -> Result<Value, LiskError>;

thread_local! {
    static APPLY: Cell<Option<ApplyFn>> = const { Cell::new(None) };
}

/// Install the evaluator's apply function. Called once by the interpreter
/// so that builtins (the `apply` I/O operation) can re-enter evaluation
/// without a crate cycle.
pub fn set_apply_callback(f: ApplyFn) {
    APPLY.with(|cell| cell.set(Some(f)));
}

/// Apply a callable to already-evaluated arguments via the installed hook.
pub fn call_callback(func: &Value, args: &[Value]) -> Result<Value, LiskError> {
    let f = APPLY
        .with(|cell| cell.get())
        .ok_or_else(|| LiskError::eval("no evaluator registered"))?;
    f(func, args)
}
