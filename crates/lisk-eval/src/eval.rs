use lisk_core::{intern, Closure, Env, LiskError, Value};

use crate::special_forms;

pub type EvalResult = Result<Value, LiskError>;

/// The interpreter owns the global environment with both builtin
/// registries installed.
pub struct Interpreter {
    pub global_env: Env,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let env = Env::new();
        lisk_stdlib::register_stdlib(&env);
        // Let builtins (the `apply` operation) re-enter application.
        lisk_core::set_apply_callback(apply);
        Interpreter { global_env: env }
    }

    pub fn eval(&self, expr: &Value) -> EvalResult {
        eval(expr, &self.global_env)
    }

    /// Evaluate a string of one or more expressions; the value is the
    /// last expression's, or `()` for empty input.
    pub fn eval_str(&self, input: &str) -> EvalResult {
        let exprs = lisk_reader::read_many(input)?;
        let mut result = Value::empty_list();
        for expr in &exprs {
            result = eval(expr, &self.global_env)?;
        }
        Ok(result)
    }

    /// Seed a global binding from the host (e.g. script arguments).
    pub fn define(&self, name: &str, value: Value) -> Value {
        self.global_env.define(intern(name), value)
    }
}

/// Evaluate one expression in an environment.
pub fn eval(expr: &Value, env: &Env) -> EvalResult {
    match expr {
        Value::Int(_) | Value::Str(_) | Value::Bool(_) => Ok(expr.clone()),

        Value::Symbol(name) => env
            .get(*name)
            .ok_or_else(|| LiskError::unbound_read(*name)),

        Value::List(items) if !items.is_empty() => {
            if let Some(result) = special_forms::try_eval_special(items, env) {
                return result;
            }
            let func = eval(&items[0], env)?;
            let mut args = Vec::with_capacity(items.len() - 1);
            for arg in &items[1..] {
                args.push(eval(arg, env)?);
            }
            apply(&func, &args)
        }

        // (), dotted expressions, and bare runtime-only values.
        other => Err(LiskError::bad_special_form(other)),
    }
}

/// Apply a callable to already-evaluated arguments.
pub fn apply(func: &Value, args: &[Value]) -> EvalResult {
    match func {
        Value::PrimitiveFn(p) => (p.func)(args),
        Value::IoFn(io) => (io.func)(args),
        Value::Closure(closure) => apply_closure(closure, args),
        other => Err(LiskError::not_function(other)),
    }
}

fn apply_closure(closure: &Closure, args: &[Value]) -> EvalResult {
    if closure.variadic.is_some() {
        if args.len() < closure.params.len() {
            return Err(LiskError::wrong_arg_count(closure.params.len(), args));
        }
    } else if args.len() != closure.params.len() {
        return Err(LiskError::wrong_arg_count(closure.params.len(), args));
    }

    // The call environment holds the captured frame's cells plus fresh
    // cells for this call's parameters. It is never written back into the
    // closure, so sibling calls never see each other's locals.
    let call_env = closure.env.snapshot();
    for (param, arg) in closure.params.iter().zip(args) {
        call_env.bind(*param, arg.clone());
    }
    if let Some(rest) = closure.variadic {
        call_env.bind(rest, Value::list(args[closure.params.len()..].to_vec()));
    }

    let mut result = Value::empty_list();
    for expr in &closure.body {
        result = eval(expr, &call_env)?;
    }
    Ok(result)
}
