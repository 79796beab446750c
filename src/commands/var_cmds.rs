//! Variable-scope built-ins (spec §4.3/§4.4): `set`/`unset`/`incr` are
//! thin wrappers over [`crate::interp::vars`]; `global`/`variable`
//! install the redirect-placeholder a frame uses to reach the global
//! frame, per `picolCmdGlobal`/`picolCmdVariable`.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use crate::value;

fn set_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "set varName ?newValue?")?;
    if let Some(value) = argv.get(2) {
        interp.set_var(&argv[1], value.clone())?;
        ok(value.clone())
    } else {
        ok(interp.get_var(&argv[1])?)
    }
}

fn unset_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "unset varName ?varName ...?")?;
    for name in &argv[1..] {
        interp.unset_var(name)?;
    }
    ok(String::new())
}

fn incr_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "incr varName ?increment?")?;
    let step = match argv.get(2) {
        Some(s) => value::parse_int(s).ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", s)))?,
        None => 1,
    };
    let current = interp.get_var(&argv[1])?;
    let n = value::parse_int(&current)
        .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", current)))?;
    let result = (n + step).to_string();
    interp.set_var(&argv[1], result.clone())?;
    ok(result)
}

fn global_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "global varName ?varName ...?")?;
    for name in &argv[1..] {
        interp.link_to_global(name);
    }
    ok(String::new())
}

/// `variable name ?value? ?name value? ...`: like `global`, but a
/// trailing value initializes the global slot the first time it is
/// declared (subsequent redeclarations leave an existing value alone).
fn variable_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "variable name ?value? ?name value ...?")?;
    let rest = &argv[1..];
    let trailing_name_only = rest.len() % 2 == 1;
    let paired_len = if trailing_name_only { rest.len() - 1 } else { rest.len() };

    let mut i = 0;
    while i < paired_len {
        let name = &rest[i];
        let value = &rest[i + 1];
        let qualified = format!("::{}", name.trim_start_matches("::"));
        if !interp.var_exists(&qualified) {
            interp.set_var(&qualified, value.clone())?;
        }
        interp.link_to_global(name);
        i += 2;
    }
    if trailing_name_only {
        interp.link_to_global(rest.last().unwrap());
    }
    ok(String::new())
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("set", set_cmd);
    interp.register_native("unset", unset_cmd);
    interp.register_native("incr", incr_cmd);
    interp.register_native("global", global_cmd);
    interp.register_native("variable", variable_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn set_then_get_round_trips() {
        let mut i = Interp::new();
        i.eval("set x 5").unwrap();
        assert_eq!(i.eval("set x").unwrap().value, "5");
    }

    #[test]
    fn incr_adds_default_step_of_one() {
        let mut i = Interp::new();
        i.eval("set x 5").unwrap();
        i.eval("incr x").unwrap();
        assert_eq!(i.eval("set x").unwrap().value, "6");
    }

    #[test]
    fn incr_with_explicit_step() {
        let mut i = Interp::new();
        i.eval("set x 5").unwrap();
        i.eval("incr x 3").unwrap();
        assert_eq!(i.eval("set x").unwrap().value, "8");
    }

    #[test]
    fn global_redirects_proc_local_to_outer_scope() {
        let mut i = Interp::new();
        i.eval("set g 1").unwrap();
        i.eval("proc bump {} { global g; incr g }").unwrap();
        i.eval("bump").unwrap();
        assert_eq!(i.eval("set g").unwrap().value, "2");
    }
}
