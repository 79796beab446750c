//! The user-procedure call adapter (spec §4.4), ported from
//! `picolCallProc`: binds formal arguments (including a trailing `args`
//! that soaks up the remainder), enforces the recursion cap, and always
//! pops the pushed frame on the way out — including when the body
//! raises an error.

use crate::error::{Completion, EvalResult, Flow};
use crate::interp::Interp;
use crate::limits::MAX_RECURSION;
use crate::list;

pub(crate) fn call_proc(
    interp: &mut Interp,
    proc_name: &str,
    args_spec: &str,
    body: &str,
    argv: &[String],
) -> EvalResult {
    if interp.frames.depth() > MAX_RECURSION {
        return Err(interp.err_resource("too many nested evaluations (infinite loop?)"));
    }

    let formals: Vec<&str> = args_spec.split(' ').filter(|s| !s.is_empty()).collect();
    let actual = &argv[1..];
    let has_args_tail = formals.last() == Some(&"args");
    let min_required = if has_args_tail {
        formals.len() - 1
    } else {
        formals.len()
    };
    let arity_ok = if has_args_tail {
        actual.len() >= min_required
    } else {
        actual.len() == formals.len()
    };
    if !arity_ok {
        return Err(interp.err_arity(format!(
            "wrong # args for \"{}\": should be \"{}{}{}\"",
            proc_name,
            proc_name,
            if args_spec.is_empty() { "" } else { " " },
            args_spec
        )));
    }

    interp.frames.push_call(list::list_from(argv));
    for (idx, formal) in formals.iter().enumerate() {
        if *formal == "args" && idx == formals.len() - 1 {
            let rest = list::list_from(&actual[idx..]);
            interp.set_var_local(formal, rest);
        } else {
            interp.set_var_local(formal, actual[idx].clone());
        }
    }

    let body_result = interp.eval(body);
    interp.frames.pop_call();
    let completion = body_result?;

    match completion.flow {
        Flow::Return => Ok(Completion::normal(completion.value)),
        _ => Ok(completion),
    }
}

/// `uplevel ?level? command...`: temporarily redirects variable scoping
/// to an ancestor frame, evaluates `command` there, then restores the
/// caller's frame regardless of outcome.
pub(crate) fn uplevel(interp: &mut Interp, level_spec: &str, command: &str) -> EvalResult {
    let target = if let Some(n) = level_spec.strip_prefix('#') {
        let n: usize = n
            .parse()
            .map_err(|_| interp.err_type(format!("bad level \"{}\"", level_spec)))?;
        interp.frames.resolve_absolute_level(n)
    } else {
        let up: usize = level_spec
            .parse()
            .map_err(|_| interp.err_type(format!("bad level \"{}\"", level_spec)))?;
        interp.frames.resolve_level(up)
    };
    let previous = interp.frames.set_current_index(target);
    let result = interp.eval(command);
    interp.frames.set_current_index(previous);
    result
}
