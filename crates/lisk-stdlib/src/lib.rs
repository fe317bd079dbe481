pub mod coerce;
pub mod equality;
mod io;
mod primitives;

use std::rc::Rc;

use lisk_core::{intern, Env, IoFn, LiskError, PrimitiveFn, Value};

/// Install both builtin registries into a fresh environment.
pub fn register_stdlib(env: &Env) {
    primitives::register(env);
    io::register(env);
}

fn register_primitive(
    env: &Env,
    name: &str,
    f: impl Fn(&[Value]) -> Result<Value, LiskError> + 'static,
) {
    env.define(
        intern(name),
        Value::PrimitiveFn(Rc::new(PrimitiveFn::new(name, f))),
    );
}

fn register_io_fn(
    env: &Env,
    name: &str,
    f: impl Fn(&[Value]) -> Result<Value, LiskError> + 'static,
) {
    env.define(intern(name), Value::IoFn(Rc::new(IoFn::new(name, f))));
}
