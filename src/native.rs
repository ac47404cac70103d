//! Host-level built-ins.
//!
//! The interpreter knows nothing about these: anything satisfying the
//! [`Callable`](crate::value::Callable) contract can be planted in the
//! global environment before a run.  `install` seeds the minimal stdlib —
//! `clock`, `print`, and `str`.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::interpreter::Interpreter;
use crate::value::Value;

/// Signature of a native implementation.  Errors are plain messages; the
/// interpreter attaches the call-site position.
pub type NativeFn = fn(&mut Interpreter<'_>, &[Value]) -> Result<Value, String>;

#[derive(Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

/// Define the built-in functions in the interpreter's global environment.
pub fn install(interpreter: &Interpreter<'_>) {
    debug!("Installing native functions");

    interpreter.define_native(NativeFunction {
        name: "clock",
        arity: 0,
        func: native_clock,
    });

    interpreter.define_native(NativeFunction {
        name: "print",
        arity: 1,
        func: native_print,
    });

    interpreter.define_native(NativeFunction {
        name: "str",
        arity: 1,
        func: native_str,
    });
}

/// Seconds since the Unix epoch, as a number.
fn native_clock(_interpreter: &mut Interpreter<'_>, _args: &[Value]) -> Result<Value, String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("Clock error: {}", e))?
        .as_secs_f64();

    Ok(Value::Number(timestamp))
}

/// Write the argument's rendering plus a newline to the program output.
fn native_print(interpreter: &mut Interpreter<'_>, args: &[Value]) -> Result<Value, String> {
    interpreter.print_line(&args[0].stringify())?;

    Ok(Value::Nil)
}

/// The argument's rendering, as a string value.
fn native_str(_interpreter: &mut Interpreter<'_>, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Str(args[0].stringify()))
}
