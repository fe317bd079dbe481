use lisk_core::{check_args, Env, LiskError, Value};

use crate::coerce;
use crate::equality;
use crate::register_primitive;

pub fn register(env: &Env) {
    register_numeric(env, "+", |a, b| Ok(a.wrapping_add(b)));
    register_numeric(env, "-", |a, b| Ok(a.wrapping_sub(b)));
    register_numeric(env, "*", |a, b| Ok(a.wrapping_mul(b)));
    register_numeric(env, "/", div);
    register_numeric(env, "quotient", div);
    register_numeric(env, "mod", rem);
    register_numeric(env, "remainder", rem);

    register_int_cmp(env, "=", |a, b| a == b);
    register_int_cmp(env, "<", |a, b| a < b);
    register_int_cmp(env, ">", |a, b| a > b);
    register_int_cmp(env, "/=", |a, b| a != b);
    register_int_cmp(env, ">=", |a, b| a >= b);
    register_int_cmp(env, "<=", |a, b| a <= b);

    register_str_cmp(env, "string=?", |a, b| a == b);
    register_str_cmp(env, "string<?", |a, b| a < b);
    register_str_cmp(env, "string>?", |a, b| a > b);
    register_str_cmp(env, "string<=?", |a, b| a <= b);
    register_str_cmp(env, "string>=?", |a, b| a >= b);

    // Both operands arrive pre-evaluated, so these cannot short-circuit.
    register_bool_op(env, "&&", |a, b| a && b);
    register_bool_op(env, "||", |a, b| a || b);

    register_primitive(env, "car", car);
    register_primitive(env, "cdr", cdr);
    register_primitive(env, "cons", cons);

    register_primitive(env, "eq?", eqv_primitive);
    register_primitive(env, "eqv?", eqv_primitive);
    register_primitive(env, "equal?", |args| {
        check_args!(args, 2);
        Ok(Value::bool(equality::equal(&args[0], &args[1])))
    });
}

fn div(a: i64, b: i64) -> Result<i64, LiskError> {
    if b == 0 {
        return Err(LiskError::eval("division by zero"));
    }
    Ok(a.wrapping_div(b))
}

fn rem(a: i64, b: i64) -> Result<i64, LiskError> {
    if b == 0 {
        return Err(LiskError::eval("modulo by zero"));
    }
    Ok(a.wrapping_rem(b))
}

/// A binary-reducing numeric operation: at least two arguments, each
/// coerced to an integer, folded left to right.
fn register_numeric(env: &Env, name: &str, f: fn(i64, i64) -> Result<i64, LiskError>) {
    register_primitive(env, name, move |args| {
        if args.len() < 2 {
            return Err(LiskError::wrong_arg_count(2, args));
        }
        let mut acc = coerce::int_of(&args[0])?;
        for arg in &args[1..] {
            acc = f(acc, coerce::int_of(arg)?)?;
        }
        Ok(Value::Int(acc))
    });
}

fn register_int_cmp(env: &Env, name: &str, f: fn(i64, i64) -> bool) {
    register_primitive(env, name, move |args| {
        check_args!(args, 2);
        Ok(Value::bool(f(
            coerce::int_of(&args[0])?,
            coerce::int_of(&args[1])?,
        )))
    });
}

fn register_str_cmp(env: &Env, name: &str, f: fn(&str, &str) -> bool) {
    register_primitive(env, name, move |args| {
        check_args!(args, 2);
        Ok(Value::bool(f(
            &coerce::str_of(&args[0])?,
            &coerce::str_of(&args[1])?,
        )))
    });
}

fn register_bool_op(env: &Env, name: &str, f: fn(bool, bool) -> bool) {
    register_primitive(env, name, move |args| {
        check_args!(args, 2);
        Ok(Value::bool(f(
            coerce::bool_of(&args[0])?,
            coerce::bool_of(&args[1])?,
        )))
    });
}

fn car(args: &[Value]) -> Result<Value, LiskError> {
    check_args!(args, 1);
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(items[0].clone()),
        Value::Dotted(pair) => Ok(pair.prefix[0].clone()),
        other => Err(LiskError::type_mismatch("pair", other)),
    }
}

fn cdr(args: &[Value]) -> Result<Value, LiskError> {
    check_args!(args, 1);
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(Value::list(items[1..].to_vec())),
        Value::Dotted(pair) => {
            if pair.prefix.len() == 1 {
                Ok(pair.tail.clone())
            } else {
                Ok(Value::dotted(pair.prefix[1..].to_vec(), pair.tail.clone()))
            }
        }
        other => Err(LiskError::type_mismatch("pair", other)),
    }
}

fn cons(args: &[Value]) -> Result<Value, LiskError> {
    check_args!(args, 2);
    let head = args[0].clone();
    match &args[1] {
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len() + 1);
            out.push(head);
            out.extend(items.iter().cloned());
            Ok(Value::list(out))
        }
        Value::Dotted(pair) => {
            let mut prefix = Vec::with_capacity(pair.prefix.len() + 1);
            prefix.push(head);
            prefix.extend(pair.prefix.iter().cloned());
            Ok(Value::dotted(prefix, pair.tail.clone()))
        }
        tail => Ok(Value::dotted(vec![head], tail.clone())),
    }
}

fn eqv_primitive(args: &[Value]) -> Result<Value, LiskError> {
    check_args!(args, 2);
    Ok(Value::bool(equality::eqv(&args[0], &args[1])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(env: &Env, name: &str, args: &[Value]) -> Result<Value, LiskError> {
        match env.get_str(name) {
            Some(Value::PrimitiveFn(p)) => (p.func)(args),
            other => panic!("{name} is not a registered primitive: {other:?}"),
        }
    }

    fn fresh_env() -> Env {
        let env = Env::new();
        register(&env);
        env
    }

    #[test]
    fn arithmetic_folds() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "+", &[Value::int(1), Value::int(2), Value::int(3)]).unwrap(),
            Value::int(6)
        );
        assert_eq!(
            call(&env, "-", &[Value::int(10), Value::int(3), Value::int(2)]).unwrap(),
            Value::int(5)
        );
        assert_eq!(
            call(&env, "*", &[Value::int(4), Value::int(5)]).unwrap(),
            Value::int(20)
        );
        assert_eq!(
            call(&env, "quotient", &[Value::int(7), Value::int(2)]).unwrap(),
            Value::int(3)
        );
        assert_eq!(
            call(&env, "mod", &[Value::int(7), Value::int(2)]).unwrap(),
            Value::int(1)
        );
    }

    #[test]
    fn arithmetic_coerces_arguments() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "+", &[Value::string("2"), Value::int(3)]).unwrap(),
            Value::int(5)
        );
        let err = call(&env, "+", &[Value::int(1), Value::string("two")]).unwrap_err();
        assert!(matches!(err, LiskError::TypeMismatch { .. }));
    }

    #[test]
    fn arithmetic_requires_two_args() {
        let env = fresh_env();
        for op in ["+", "-", "*", "/", "mod", "quotient", "remainder"] {
            let err = call(&env, op, &[Value::int(1)]).unwrap_err();
            assert!(
                matches!(err, LiskError::WrongArgCount { expected: 2, .. }),
                "{op} should require two args"
            );
        }
    }

    #[test]
    fn division_by_zero_errors() {
        let env = fresh_env();
        assert!(call(&env, "/", &[Value::int(1), Value::int(0)]).is_err());
        assert!(call(&env, "mod", &[Value::int(1), Value::int(0)]).is_err());
    }

    #[test]
    fn integer_comparisons() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "<", &[Value::int(1), Value::int(2)]).unwrap(),
            Value::bool(true)
        );
        assert_eq!(
            call(&env, "/=", &[Value::int(1), Value::int(1)]).unwrap(),
            Value::bool(false)
        );
        let err = call(&env, "=", &[Value::int(1)]).unwrap_err();
        assert!(matches!(err, LiskError::WrongArgCount { expected: 2, .. }));
    }

    #[test]
    fn string_comparisons_coerce() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "string=?", &[Value::string("a"), Value::string("a")]).unwrap(),
            Value::bool(true)
        );
        assert_eq!(
            call(&env, "string<?", &[Value::string("a"), Value::string("b")]).unwrap(),
            Value::bool(true)
        );
        // Integers coerce to their decimal rendering.
        assert_eq!(
            call(&env, "string=?", &[Value::int(1), Value::string("1")]).unwrap(),
            Value::bool(true)
        );
    }

    #[test]
    fn boolean_combinators_are_strict() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "&&", &[Value::bool(true), Value::bool(false)]).unwrap(),
            Value::bool(false)
        );
        assert_eq!(
            call(&env, "||", &[Value::bool(true), Value::bool(false)]).unwrap(),
            Value::bool(true)
        );
        let err = call(&env, "&&", &[Value::bool(true), Value::int(1)]).unwrap_err();
        assert!(matches!(err, LiskError::TypeMismatch { .. }));
    }

    #[test]
    fn cons_builds_lists_and_pairs() {
        let env = fresh_env();
        assert_eq!(
            call(
                &env,
                "cons",
                &[Value::int(1), Value::list(vec![Value::int(2), Value::int(3)])]
            )
            .unwrap(),
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3)])
        );
        assert_eq!(
            call(&env, "cons", &[Value::int(1), Value::int(2)]).unwrap(),
            Value::dotted(vec![Value::int(1)], Value::int(2))
        );
        assert_eq!(
            call(
                &env,
                "cons",
                &[Value::int(0), Value::dotted(vec![Value::int(1)], Value::int(2))]
            )
            .unwrap(),
            Value::dotted(vec![Value::int(0), Value::int(1)], Value::int(2))
        );
    }

    #[test]
    fn car_and_cdr() {
        let env = fresh_env();
        let pair = Value::dotted(vec![Value::int(1)], Value::int(2));
        assert_eq!(call(&env, "car", &[pair.clone()]).unwrap(), Value::int(1));
        assert_eq!(call(&env, "cdr", &[pair]).unwrap(), Value::int(2));

        let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
        assert_eq!(call(&env, "car", &[list.clone()]).unwrap(), Value::int(1));
        assert_eq!(
            call(&env, "cdr", &[list]).unwrap(),
            Value::list(vec![Value::int(2), Value::int(3)])
        );

        let long = Value::dotted(vec![Value::int(1), Value::int(2)], Value::int(3));
        assert_eq!(call(&env, "car", &[long.clone()]).unwrap(), Value::int(1));
        assert_eq!(
            call(&env, "cdr", &[long]).unwrap(),
            Value::dotted(vec![Value::int(2)], Value::int(3))
        );

        let err = call(&env, "car", &[Value::empty_list()]).unwrap_err();
        assert!(matches!(err, LiskError::TypeMismatch { .. }));
        let err = call(&env, "cdr", &[Value::int(1)]).unwrap_err();
        assert!(matches!(err, LiskError::TypeMismatch { .. }));
    }

    #[test]
    fn equality_predicates() {
        let env = fresh_env();
        assert_eq!(
            call(&env, "eqv?", &[Value::string("a"), Value::string("a")]).unwrap(),
            Value::bool(true)
        );
        assert_eq!(
            call(&env, "eqv?", &[Value::int(1), Value::string("1")]).unwrap(),
            Value::bool(false)
        );
        assert_eq!(
            call(&env, "equal?", &[Value::int(1), Value::string("1")]).unwrap(),
            Value::bool(true)
        );
        let err = call(&env, "eq?", &[Value::int(1)]).unwrap_err();
        assert!(matches!(err, LiskError::WrongArgCount { expected: 2, .. }));
    }
}
