use lisk_core::{LiskError, Value};

/// Best-effort conversion to an integer, used only for builtin argument
/// binding: numbers pass through, strings are parsed, a single-element
/// list unwraps to its sole element.
pub fn int_of(v: &Value) -> Result<i64, LiskError> {
    match v {
        Value::Int(n) => Ok(*n),
        Value::Str(s) => s
            .parse::<i64>()
            .map_err(|_| LiskError::type_mismatch("number", v)),
        Value::List(items) => match items.as_slice() {
            [only] => int_of(only),
            _ => Err(LiskError::type_mismatch("number", v)),
        },
        _ => Err(LiskError::type_mismatch("number", v)),
    }
}

/// Best-effort conversion to a string: numbers render in decimal,
/// booleans render as the literals "True" / "False".
pub fn str_of(v: &Value) -> Result<String, LiskError> {
    match v {
        Value::Str(s) => Ok(s.to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        _ => Err(LiskError::type_mismatch("string", v)),
    }
}

/// Booleans coerce only from booleans.
pub fn bool_of(v: &Value) -> Result<bool, LiskError> {
    match v {
        Value::Bool(b) => Ok(*b),
        _ => Err(LiskError::type_mismatch("boolean", v)),
    }
}
