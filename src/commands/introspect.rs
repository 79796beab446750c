//! Command/introspection built-ins (spec §4.4/§4.5): `proc` defines and
//! `rename` mutates entries in the command registry; `info` answers
//! questions about procs, variables, and the call stack; `interp` drives
//! sub-interpreters; `trace` toggles the evaluator's tracing flag.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::registry::CommandImpl;
use crate::interp::Interp;
use crate::list;

fn proc_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 4, Some(4), "proc name args body")?;
    interp.commands.define_proc(&argv[1], argv[2].clone(), argv[3].clone());
    ok(String::new())
}

fn rename_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "rename oldName newName")?;
    interp
        .commands
        .rename(&argv[1], &argv[2])
        .map_err(|e| interp.err_name(e))?;
    ok(String::new())
}

fn info_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "info subcommand ?arg ...?")?;
    match argv[1].as_str() {
        "args" => {
            check_arity(interp, argv, 3, Some(3), "info args procName")?;
            match interp.commands.get(&argv[2]) {
                Some(CommandImpl::Proc(def)) => ok(def.args),
                _ => Err(interp.err_name(format!("\"{}\" isn't a procedure", argv[2]))),
            }
        }
        "body" => {
            check_arity(interp, argv, 3, Some(3), "info body procName")?;
            match interp.commands.get(&argv[2]) {
                Some(CommandImpl::Proc(def)) => ok(def.body),
                _ => Err(interp.err_name(format!("\"{}\" isn't a procedure", argv[2]))),
            }
        }
        "commands" => {
            let pattern = argv.get(2);
            let names: Vec<String> = match pattern {
                Some(p) => interp.commands.names_matching(p).into_iter().map(String::from).collect(),
                None => interp.commands.names().into_iter().map(String::from).collect(),
            };
            ok(list::list_from(&names))
        }
        "procs" => {
            let pattern = argv.get(2);
            let names: Vec<String> = interp
                .commands
                .names()
                .into_iter()
                .filter(|n| matches!(interp.commands.get(n), Some(CommandImpl::Proc(_))))
                .filter(|n| pattern.map_or(true, |p| crate::glob::matches(p, n)))
                .map(String::from)
                .collect();
            ok(list::list_from(&names))
        }
        "exists" => {
            check_arity(interp, argv, 3, Some(3), "info exists varName")?;
            ok(crate::value::bool_str(interp.var_exists(&argv[2])))
        }
        "globals" => {
            let pattern = argv.get(2);
            let names: Vec<String> = interp
                .global_var_names()
                .into_iter()
                .filter(|n| pattern.map_or(true, |p| crate::glob::matches(p, n)))
                .collect();
            ok(list::list_from(&names))
        }
        "vars" => {
            let pattern = argv.get(2);
            let names: Vec<String> = interp
                .local_var_names()
                .into_iter()
                .filter(|n| pattern.map_or(true, |p| crate::glob::matches(p, n)))
                .collect();
            ok(list::list_from(&names))
        }
        "level" => {
            if argv.len() == 2 {
                ok(interp.call_depth().to_string())
            } else {
                let n: usize = argv[2]
                    .parse()
                    .map_err(|_| interp.err_type(format!("bad level \"{}\"", argv[2])))?;
                ok(interp.frame_command_at(n).unwrap_or_default())
            }
        }
        "script" => ok(interp.get_var("::_script_").unwrap_or_default()),
        "patchlevel" => ok("1.0"),
        other => Err(interp.err_name(format!(
            "unknown or ambiguous subcommand \"{}\": must be one of args, body, commands, exists, globals, level, patchlevel, procs, script, vars",
            other
        ))),
    }
}

/// `interp create ?name?` / `interp eval handle arg...` / `interp alias
/// aliasName targetCmd ?arg...?`: per spec §5, independent interpreters
/// share no mutable state. Cross-interpreter aliasing (binding a command
/// in one interpreter to a command record owned by *another*) is scoped
/// down to same-interpreter aliasing here — see DESIGN.md's Open
/// Question resolution.
fn interp_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "interp create|eval|alias ...")?;
    match argv[1].as_str() {
        "create" => {
            let h = interp.create_subinterp();
            if let Some(name) = argv.get(2) {
                interp.set_var(name, h.to_value())?;
            }
            ok(h.to_value())
        }
        "eval" => {
            check_arity(interp, argv, 4, None, "interp eval handle arg ?arg ...?")?;
            let handle = crate::handles::Handle::parse(&argv[2])
                .ok_or_else(|| interp.err_type(format!("\"{}\" isn't an interpreter handle", argv[2])))?;
            let command = argv[3..].join(" ");
            let sub = interp
                .subinterp(handle)
                .ok_or_else(|| interp.err_name(format!("could not find interpreter \"{}\"", argv[2])))?;
            sub.eval(&command)
        }
        "alias" => {
            check_arity(interp, argv, 4, None, "interp alias aliasName targetCmd ?arg ...?")?;
            let alias_name = argv[2].clone();
            let target: Vec<String> = argv[3..].to_vec();
            let f = std::rc::Rc::new(std::cell::RefCell::new(move |i: &mut Interp, call_argv: &[String]| {
                let mut full = target.clone();
                full.extend_from_slice(&call_argv[1..]);
                i.eval(&list::list_from(&full))
            }));
            interp
                .register_command(&alias_name, f)
                .map_err(|e| interp.err_name(e))?;
            ok(String::new())
        }
        other => Err(interp.err_name(format!("bad option \"{}\": must be one of alias, create, eval", other))),
    }
}

/// `trace add|remove ...`: per SPEC_FULL.md §6's ambient-logging section,
/// this built-in is a simplified on/off switch over [`Interp::trace`]
/// rather than the reference implementation's full variable/command
/// trace machinery.
fn trace_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "trace add|remove ...")?;
    match argv[1].as_str() {
        "add" => interp.set_trace(true),
        "remove" => interp.set_trace(false),
        other => return Err(interp.err_type(format!("bad option \"{}\": must be add or remove", other))),
    }
    ok(String::new())
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("proc", proc_cmd);
    interp.register_native("rename", rename_cmd);
    interp.register_native("info", info_cmd);
    interp.register_native("interp", interp_cmd);
    interp.register_native("trace", trace_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn proc_with_wrong_arity_reports_usage() {
        let mut i = Interp::new();
        i.eval("proc p {a b} { expr $a + $b }").unwrap();
        let err = i.eval("p 1").unwrap_err();
        assert!(err.message().contains("wrong # args"));
    }

    #[test]
    fn info_commands_lists_builtins() {
        let mut i = Interp::new();
        let c = i.eval("info commands set").unwrap();
        assert_eq!(c.value, "set");
    }

    #[test]
    fn rename_moves_a_command() {
        let mut i = Interp::new();
        i.eval("proc p {} { return hi }").unwrap();
        i.eval("rename p q").unwrap();
        assert_eq!(i.eval("q").unwrap().value, "hi");
        assert!(i.eval("p").is_err());
    }
}
