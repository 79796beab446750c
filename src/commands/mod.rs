//! The built-in command catalogue (spec §2's "~60 commands" row, detailed
//! in SPEC_FULL.md §4.9). Each submodule registers a themed slice of the
//! catalogue as `NativeFn` entries in the interpreter's command registry;
//! [`register_core_commands`] is called once from [`Interp::new`](crate::interp::Interp::new),
//! mirroring `picolRegisterCoreCmds`.

mod arith;
mod array_cmd;
mod compare;
mod control;
mod file_cmd;
mod host;
mod io;
mod introspect;
mod list_cmds;
mod string_cmds;
mod var_cmds;

use crate::error::{Completion, EvalResult, InterpError};
use crate::interp::Interp;

pub(crate) fn ok(value: impl Into<String>) -> EvalResult {
    Ok(Completion::normal(value))
}

/// Checks `argv.len()` (including the command name at index 0) against an
/// inclusive `[min, max]` range, raising the standard `wrong # args`
/// message (`max = None` means unbounded) on mismatch.
pub(crate) fn check_arity(
    interp: &mut Interp,
    argv: &[String],
    min: usize,
    max: Option<usize>,
    usage: &str,
) -> Result<(), InterpError> {
    let n = argv.len();
    let ok = n >= min && max.map_or(true, |m| n <= m);
    if ok {
        Ok(())
    } else {
        Err(interp.err_arity(format!("wrong # args: should be \"{}\"", usage)))
    }
}

pub fn register_core_commands(interp: &mut Interp) {
    arith::register(interp);
    list_cmds::register(interp);
    string_cmds::register(interp);
    control::register(interp);
    var_cmds::register(interp);
    array_cmd::register(interp);
    introspect::register(interp);
    compare::register(interp);
    io::register(interp);
    host::register(interp);
    file_cmd::register(interp);
}
