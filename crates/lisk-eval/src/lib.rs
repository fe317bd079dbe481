mod eval;
mod special_forms;

pub use eval::{apply, eval, EvalResult, Interpreter};
