//! Control-flow and evaluation built-ins (spec §4.2/§4.4): `if`/`while`/
//! `for`/`foreach`/`switch` drive [`crate::interp::condition`] and the
//! body's [`Flow`] signal; `catch`/`error`/`return`/`break`/`continue`
//! are the user-facing face of the unified return-code channel; `eval`,
//! `apply`, and `uplevel` are thin wrappers over the evaluator and the
//! proc-call adapter.

use crate::commands::{check_arity, ok};
use crate::error::{Completion, EvalResult, Flow};
use crate::interp::condition::evaluate_condition;
use crate::interp::procs;
use crate::interp::Interp;
use crate::list;

fn if_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "if cond body ?elseif cond body ...? ?else body?")?;
    let mut i = 1;
    loop {
        let cond = evaluate_condition(interp, &argv[i])?;
        if cond.flow != Flow::Normal {
            return Ok(cond);
        }
        let truthy = crate::value::is_truthy(
            crate::value::parse_int(&cond.value).unwrap_or(0),
        );
        if truthy {
            return match argv.get(i + 1) {
                Some(body) => interp.eval(body),
                None => Err(interp.err_arity("wrong # args: should be \"if cond body\"")),
            };
        }
        i += 2;
        match argv.get(i).map(|s| s.as_str()) {
            Some("elseif") => {
                i += 1;
                continue;
            }
            Some("else") => {
                return match argv.get(i + 1) {
                    Some(body) => interp.eval(body),
                    None => Err(interp.err_arity("wrong # args: should be \"if cond body else body\"")),
                };
            }
            Some(_) => return Err(interp.err_arity("wrong # args: should be \"if cond body ?elseif cond body ...? ?else body?\"")),
            None => return ok(String::new()),
        }
    }
}

fn while_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "while cond body")?;
    loop {
        let cond = evaluate_condition(interp, &argv[1])?;
        if cond.flow != Flow::Normal {
            return Ok(cond);
        }
        if !crate::value::is_truthy(crate::value::parse_int(&cond.value).unwrap_or(0)) {
            return ok(String::new());
        }
        let body = interp.eval(&argv[2])?;
        match body.flow {
            Flow::Break => return ok(String::new()),
            Flow::Continue | Flow::Normal => continue,
            Flow::Return => return Ok(body),
        }
    }
}

fn for_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 5, Some(5), "for start test next body")?;
    let start = interp.eval(&argv[1])?;
    if start.flow != Flow::Normal {
        return Ok(start);
    }
    loop {
        let cond = evaluate_condition(interp, &argv[2])?;
        if cond.flow != Flow::Normal {
            return Ok(cond);
        }
        if !crate::value::is_truthy(crate::value::parse_int(&cond.value).unwrap_or(0)) {
            return ok(String::new());
        }
        let body = interp.eval(&argv[4])?;
        match body.flow {
            Flow::Break => return ok(String::new()),
            Flow::Return => return Ok(body),
            Flow::Normal | Flow::Continue => {}
        }
        let next = interp.eval(&argv[3])?;
        if next.flow != Flow::Normal {
            return Ok(next);
        }
    }
}

/// `foreach {varlist1} list1 ?{varlist2} list2 ...? body`: each varlist/
/// list pair is walked in lock-step, round-robin assigning that pair's
/// variables from its list; the shortest-exhausted list among a pair
/// still runs its variables through as empty strings, matching Tcl's
/// "pad the ragged tail with empty elements" rule.
fn foreach_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 4, None, "foreach varList list ?varList list ...? body")?;
    if argv.len() % 2 != 0 {
        return Err(interp.err_arity("wrong # args: should be \"foreach varList list ?varList list ...? body\""));
    }
    let body = argv.last().unwrap();
    let pairs = &argv[1..argv.len() - 1];
    let mut groups: Vec<(Vec<String>, Vec<String>)> = Vec::new();
    let mut max_rounds = 0usize;
    for chunk in pairs.chunks(2) {
        let vars = list::parse_list(&chunk[0]);
        let values = list::parse_list(&chunk[1]);
        if vars.is_empty() {
            return Err(interp.err_type("foreach varlist is empty"));
        }
        let rounds = (values.len() + vars.len() - 1) / vars.len();
        max_rounds = max_rounds.max(rounds);
        groups.push((vars, values));
    }

    for round in 0..max_rounds {
        for (vars, values) in &groups {
            for (slot, name) in vars.iter().enumerate() {
                let idx = round * vars.len() + slot;
                let value = values.get(idx).cloned().unwrap_or_default();
                interp.set_var(name, value)?;
            }
        }
        let result = interp.eval(body)?;
        match result.flow {
            Flow::Break => return ok(String::new()),
            Flow::Return => return Ok(result),
            Flow::Normal | Flow::Continue => {}
        }
    }
    ok(String::new())
}

/// `switch ?-exact|-glob? string {pattern body ...}` (also accepts the
/// patterns and bodies as flat trailing arguments). `default` always
/// matches if reached. A body of `-` falls through to the next body,
/// matching Tcl's fallthrough convention.
fn switch_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "switch ?-exact|-glob? string {pattern body ...}")?;
    let mut i = 1;
    let mut exact = true;
    while i < argv.len() - 1 && argv[i].starts_with('-') {
        match argv[i].as_str() {
            "-exact" => exact = true,
            "-glob" => exact = false,
            "--" => {
                i += 1;
                break;
            }
            other => return Err(interp.err_type(format!("bad option \"{}\"", other))),
        }
        i += 1;
    }
    let subject = &argv[i];
    let rest = &argv[i + 1..];
    let arms: Vec<String> = if rest.len() == 1 {
        list::parse_list(&rest[0])
    } else {
        rest.to_vec()
    };
    if arms.len() % 2 != 0 {
        return Err(interp.err_arity("switch: extra switch pattern with no body"));
    }
    let mut pairs = arms.chunks(2).peekable();
    while let Some(pair) = pairs.next() {
        let (pattern, body) = (&pair[0], &pair[1]);
        let hit = pattern == "default" || if exact { pattern == subject } else { crate::glob::matches(pattern, subject) };
        if hit {
            let mut chosen = body;
            while chosen == "-" {
                match pairs.next() {
                    Some(next_pair) => chosen = &next_pair[1],
                    None => return Err(interp.err_type("no body specified for pattern")),
                }
            }
            return interp.eval(chosen);
        }
    }
    ok(String::new())
}

fn break_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(1), "break")?;
    Ok(Completion::signal(Flow::Break, String::new()))
}

fn continue_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(1), "continue")?;
    Ok(Completion::signal(Flow::Continue, String::new()))
}

fn return_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(2), "return ?value?")?;
    let value = argv.get(1).cloned().unwrap_or_default();
    Ok(Completion::signal(Flow::Return, value))
}

/// `catch body ?varName?`: converts any outcome — error or flow signal —
/// into a numeric return code stored as the command's result, with the
/// body's value (or error message) optionally captured into `varName`
/// (spec §4.6/§7).
fn catch_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "catch body ?varName?")?;
    let (code, value) = match interp.eval(&argv[1]) {
        Ok(c) => match c.flow {
            Flow::Normal => (0, c.value),
            Flow::Return => (2, c.value),
            Flow::Break => (3, c.value),
            Flow::Continue => (4, c.value),
        },
        Err(e) => (1, e.message().to_string()),
    };
    if let Some(varname) = argv.get(2) {
        interp.set_var(varname, value)?;
    }
    ok(code.to_string())
}

fn error_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(4), "error message ?errorInfo? ?errorCode?")?;
    Err(interp.err_user(argv[1].clone()))
}

fn eval_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "eval arg ?arg ...?")?;
    let script = if argv.len() == 2 { argv[1].clone() } else { argv[1..].join(" ") };
    interp.eval(&script)
}

/// `apply {argSpec body} arg...`: the same binding/arity/recursion
/// machinery as a named `proc` call (spec §4.4), just without a
/// registry entry — `lambdaExpr` is the two-element list itself.
fn apply_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "apply lambdaExpr ?arg ...?")?;
    let parts = list::parse_list(&argv[1]);
    if parts.len() != 2 {
        return Err(interp.err_type("can't interpret as a lambda expression"));
    }
    let mut call_argv = vec!["{lambda}".to_string()];
    call_argv.extend_from_slice(&argv[2..]);
    procs::call_proc(interp, "{lambda}", &parts[0], &parts[1], &call_argv)
}

fn uplevel_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "uplevel ?level? arg ?arg ...?")?;
    let looks_like_level =
        argv[1].starts_with('#') || argv[1].chars().all(|c| c.is_ascii_digit());
    let (level, body_words) = if looks_like_level && argv.len() > 2 {
        (argv[1].clone(), &argv[2..])
    } else {
        ("1".to_string(), &argv[1..])
    };
    let command = if body_words.len() == 1 { body_words[0].clone() } else { body_words.join(" ") };
    procs::uplevel(interp, &level, &command)
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("if", if_cmd);
    interp.register_native("while", while_cmd);
    interp.register_native("for", for_cmd);
    interp.register_native("foreach", foreach_cmd);
    interp.register_native("switch", switch_cmd);
    interp.register_native("break", break_cmd);
    interp.register_native("continue", continue_cmd);
    interp.register_native("return", return_cmd);
    interp.register_native("catch", catch_cmd);
    interp.register_native("error", error_cmd);
    interp.register_native("eval", eval_cmd);
    interp.register_native("apply", apply_cmd);
    interp.register_native("uplevel", uplevel_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn catch_converts_error_to_code_one() {
        let mut i = Interp::new();
        let c = i.eval("catch { error msg } r").unwrap();
        assert_eq!(c.value, "1");
        assert_eq!(i.eval("set r").unwrap().value, "msg");
    }

    #[test]
    fn while_loop_respects_break() {
        let mut i = Interp::new();
        i.eval("set n 0").unwrap();
        i.eval("while {1} { incr n; if {$n == 3} { break } }").unwrap();
        assert_eq!(i.eval("set n").unwrap().value, "3");
    }

    #[test]
    fn uplevel_writes_into_callers_frame() {
        let mut i = Interp::new();
        i.eval("proc p {} { uplevel 1 {set marker hi} }").unwrap();
        i.eval("p").unwrap();
        assert_eq!(i.eval("set marker").unwrap().value, "hi");
    }

    #[test]
    fn foreach_collects_squares() {
        let mut i = Interp::new();
        i.eval("set a \"\"").unwrap();
        i.eval("foreach x {1 2 3 4} { lappend a [expr $x*$x] }").unwrap();
        assert_eq!(i.eval("set a").unwrap().value, "1 4 9 16");
    }
}
