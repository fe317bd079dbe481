use lisk_core::Value;

use crate::coerce;

/// Structural, strict equality. Total: never errors, mismatched tags are
/// simply unequal. Dotted pairs compare as their normalized list form
/// (prefix followed by tail).
pub fn eqv(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Dotted(x), Value::Dotted(y)) => {
            x.prefix.len() == y.prefix.len()
                && x.prefix.iter().zip(y.prefix.iter()).all(|(l, r)| eqv(l, r))
                && eqv(&x.tail, &y.tail)
        }
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| eqv(l, r))
        }
        _ => false,
    }
}

/// Coercive equality: values are equal if any of the integer, string, or
/// boolean coercions (tried in that order) succeeds on both sides with
/// matching results. A failed coercion is "no match", never an error.
/// Falls back to [`eqv`].
pub fn equal(a: &Value, b: &Value) -> bool {
    if let (Ok(x), Ok(y)) = (coerce::int_of(a), coerce::int_of(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (coerce::str_of(a), coerce::str_of(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (coerce::bool_of(a), coerce::bool_of(b)) {
        if x == y {
            return true;
        }
    }
    eqv(a, b)
}
