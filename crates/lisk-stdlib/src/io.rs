use std::rc::Rc;

use lisk_core::{call_callback, check_args, Env, LiskError, Port, Value};

use crate::register_io_fn;

pub fn register(env: &Env) {
    // (apply f '(a b)) or (apply f a b ...): re-enters the evaluator's
    // application protocol.
    register_io_fn(env, "apply", |args| match args {
        [] => Err(LiskError::wrong_arg_count(1, args)),
        [func, Value::List(items)] => call_callback(func, items),
        [func, rest @ ..] => call_callback(func, rest),
    });

    register_io_fn(env, "open-input-file", |args| {
        check_args!(args, 1);
        let path = args[0]
            .as_str()
            .ok_or_else(|| LiskError::type_mismatch("string", &args[0]))?;
        Ok(Value::Port(Rc::new(Port::open_input(path)?)))
    });

    register_io_fn(env, "open-output-file", |args| {
        check_args!(args, 1);
        let path = args[0]
            .as_str()
            .ok_or_else(|| LiskError::type_mismatch("string", &args[0]))?;
        Ok(Value::Port(Rc::new(Port::open_output(path)?)))
    });

    register_io_fn(env, "close-input-port", close_port);
    register_io_fn(env, "close-output-port", close_port);

    // No argument: one line from stdin. One port argument: one line from it.
    register_io_fn(env, "read", |args| match args {
        [] => {
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| LiskError::Io(format!("read: {e}")))?;
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Ok(Value::string(&line))
        }
        [Value::Port(port)] => Ok(Value::string(&port.read_line()?)),
        [other] => Err(LiskError::type_mismatch("port", other)),
        _ => Err(LiskError::wrong_arg_count(1, args)),
    });

    // Renders the value followed by a newline, to stdout or a port.
    register_io_fn(env, "write", |args| match args {
        [v] => {
            println!("{v}");
            Ok(Value::bool(true))
        }
        [v, Value::Port(port)] => {
            port.write_line(&v.to_string())?;
            Ok(Value::bool(true))
        }
        [_, other] => Err(LiskError::type_mismatch("port", other)),
        _ => Err(LiskError::wrong_arg_count(1, args)),
    });

    register_io_fn(env, "read-contents", |args| {
        check_args!(args, 1);
        let path = args[0]
            .as_str()
            .ok_or_else(|| LiskError::type_mismatch("string", &args[0]))?;
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LiskError::Io(format!("read-contents {path}: {e}")))?;
        Ok(Value::string(&contents))
    });

    // The whole file as a list of parsed, unevaluated expressions.
    register_io_fn(env, "read-all", |args| {
        check_args!(args, 1);
        let path = args[0]
            .as_str()
            .ok_or_else(|| LiskError::type_mismatch("string", &args[0]))?;
        let source = std::fs::read_to_string(path)
            .map_err(|e| LiskError::Io(format!("read-all {path}: {e}")))?;
        Ok(Value::list(lisk_reader::read_many(&source)?))
    });
}

/// Closing is idempotent and answers whether the argument was a port at all.
fn close_port(args: &[Value]) -> Result<Value, LiskError> {
    check_args!(args, 1);
    match &args[0] {
        Value::Port(port) => {
            port.close();
            Ok(Value::bool(true))
        }
        _ => Ok(Value::bool(false)),
    }
}
