use std::cell::Cell;

use lisk_core::{intern, Closure, Env, LiskError, Spur, Value};

use crate::eval::{eval, EvalResult};

/// Pre-interned `Spur` handles for the special form names. Every list
/// expression checks its head against these, so we compare interned keys
/// instead of resolving strings.
struct SpecialFormSpurs {
    quote: Spur,
    if_: Spur,
    set_bang: Spur,
    define: Spur,
    lambda: Spur,
    load: Spur,
}

impl SpecialFormSpurs {
    fn init() -> Self {
        Self {
            quote: intern("quote"),
            if_: intern("if"),
            set_bang: intern("set!"),
            define: intern("define"),
            lambda: intern("lambda"),
            load: intern("load"),
        }
    }
}

thread_local! {
    static SF: Cell<Option<&'static SpecialFormSpurs>> = const { Cell::new(None) };
}

fn special_forms() -> &'static SpecialFormSpurs {
    SF.with(|cell| match cell.get() {
        Some(sf) => sf,
        None => {
            let sf: &'static SpecialFormSpurs = Box::leak(Box::new(SpecialFormSpurs::init()));
            cell.set(Some(sf));
            sf
        }
    })
}

/// Evaluate a special form. Returns `Some(result)` when the list matches a
/// special-form shape exactly; `None` sends the list on to ordinary
/// application, so e.g. `(quote a b)` is an application of an (unbound)
/// `quote` variable, not a malformed quote.
pub fn try_eval_special(items: &[Value], env: &Env) -> Option<EvalResult> {
    let sf = special_forms();
    let head = items[0].as_symbol_spur()?;
    let args = &items[1..];

    if head == sf.quote {
        match args {
            [quoted] => Some(Ok(quoted.clone())),
            _ => None,
        }
    } else if head == sf.if_ {
        match args {
            [pred, then, alt] => Some(eval_if(pred, then, alt, env)),
            _ => None,
        }
    } else if head == sf.set_bang {
        match args {
            [Value::Symbol(name), expr] => Some(eval_set(*name, expr, env)),
            _ => None,
        }
    } else if head == sf.define {
        eval_define(args, env)
    } else if head == sf.lambda {
        eval_lambda(args, env)
    } else if head == sf.load {
        match args {
            [Value::Str(path)] => Some(eval_load(path, env)),
            _ => None,
        }
    } else {
        None
    }
}

/// Only `#f` is falsy; 0, "" and () all take the then-branch.
fn eval_if(pred: &Value, then: &Value, alt: &Value, env: &Env) -> EvalResult {
    if matches!(eval(pred, env)?, Value::Bool(false)) {
        eval(alt, env)
    } else {
        eval(then, env)
    }
}

fn eval_set(name: Spur, expr: &Value, env: &Env) -> EvalResult {
    let val = eval(expr, env)?;
    if env.set(name, val.clone()) {
        Ok(val)
    } else {
        Err(LiskError::unbound_write(name))
    }
}

fn eval_define(args: &[Value], env: &Env) -> Option<EvalResult> {
    match args {
        // (define x expr)
        [Value::Symbol(name), expr] => {
            let name = *name;
            Some(eval(expr, env).map(|val| env.define(name, val)))
        }
        // (define (f params...) body...) / (define (f params... . rest) body...)
        [signature, body @ ..] => {
            let (name, params, variadic) = function_signature(signature)?;
            let closure = Value::closure(Closure {
                params,
                variadic,
                body: body.to_vec(),
                env: env.clone(),
                name: Some(name),
            });
            Some(Ok(env.define(name, closure)))
        }
        _ => None,
    }
}

fn eval_lambda(args: &[Value], env: &Env) -> Option<EvalResult> {
    let (signature, body) = args.split_first()?;
    let (params, variadic) = match signature {
        // (lambda (params...) body...)
        Value::List(items) => (param_symbols(items)?, None),
        // (lambda (params... . rest) body...)
        Value::Dotted(pair) => (
            param_symbols(&pair.prefix)?,
            Some(pair.tail.as_symbol_spur()?),
        ),
        // (lambda args body...): every argument collected into one list
        Value::Symbol(rest) => (Vec::new(), Some(*rest)),
        _ => return None,
    };
    Some(Ok(Value::closure(Closure {
        params,
        variadic,
        body: body.to_vec(),
        env: env.clone(),
        name: None,
    })))
}

/// Destructure `(f p...)` or `(f p... . rest)` into name, fixed parameter
/// names, and the optional variadic tail name.
fn function_signature(signature: &Value) -> Option<(Spur, Vec<Spur>, Option<Spur>)> {
    match signature {
        Value::List(items) => {
            let (name, params) = items.split_first()?;
            Some((name.as_symbol_spur()?, param_symbols(params)?, None))
        }
        Value::Dotted(pair) => {
            let (name, params) = pair.prefix.split_first()?;
            Some((
                name.as_symbol_spur()?,
                param_symbols(params)?,
                Some(pair.tail.as_symbol_spur()?),
            ))
        }
        _ => None,
    }
}

fn param_symbols(values: &[Value]) -> Option<Vec<Spur>> {
    values.iter().map(Value::as_symbol_spur).collect()
}

/// Parse the named file and evaluate its expressions in order, in the
/// current environment; the value is the last expression's.
fn eval_load(path: &str, env: &Env) -> EvalResult {
    let source = std::fs::read_to_string(path)
        .map_err(|e| LiskError::Io(format!("load {path}: {e}")))?;
    let mut result = Value::empty_list();
    for expr in &lisk_reader::read_many(&source)? {
        result = eval(expr, env)?;
    }
    Ok(result)
}
