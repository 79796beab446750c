//! Thin host-facing built-ins (spec §4.9's "host/misc" row): `clock`,
//! `exit`, `pid`, `rand`, `time`, and `exec`. Each is a direct, narrow
//! wrapper over a single OS or crate facility — there is no abstraction
//! layer here beyond what the command itself needs.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use rand::Rng;

fn clock_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "clock seconds|format|clicks ?arg ...?")?;
    match argv[1].as_str() {
        "seconds" => {
            let secs = chrono::Utc::now().timestamp();
            ok(secs.to_string())
        }
        "clicks" => {
            let micros = chrono::Utc::now().timestamp_micros();
            ok(micros.to_string())
        }
        "format" => {
            check_arity(interp, argv, 3, Some(5), "clock format clockValue ?-format fmt?")?;
            let secs: i64 = argv[2]
                .parse()
                .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", argv[2])))?;
            let fmt = if argv.get(3).map(|s| s.as_str()) == Some("-format") {
                argv.get(4).map(|s| s.as_str()).unwrap_or("%Y-%m-%d %H:%M:%S")
            } else {
                "%Y-%m-%d %H:%M:%S"
            };
            let dt = chrono::DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| interp.err_range("seconds value too large/small to represent"))?;
            ok(dt.format(fmt).to_string())
        }
        other => Err(interp.err_name(format!(
            "unknown or ambiguous subcommand \"{}\": must be one of clicks, format, seconds",
            other
        ))),
    }
}

/// `exit ?code?`: per spec §6, this actually terminates the host
/// process — there is no "exit exception" to catch, matching the
/// reference implementation's direct `exit(3)` call.
fn exit_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(2), "exit ?returnCode?")?;
    let code: i32 = match argv.get(1) {
        Some(s) => s
            .parse()
            .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", s)))?,
        None => 0,
    };
    std::process::exit(code);
}

fn pid_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(1), "pid")?;
    ok(std::process::id().to_string())
}

/// `rand ?max?`: a non-negative integer, either an arbitrary 31-bit
/// value or uniform in `0..max` when a bound is given — there is no
/// seeding control, matching the reference implementation's bare
/// `rand()` wrapper.
fn rand_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 1, Some(2), "rand ?max?")?;
    let mut rng = rand::thread_rng();
    match argv.get(1) {
        Some(m) => {
            let max: i64 = m
                .parse()
                .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", m)))?;
            if max <= 0 {
                return Err(interp.err_range("rand max must be positive"));
            }
            ok(rng.gen_range(0..max).to_string())
        }
        None => ok(rng.gen_range(0..i32::MAX).to_string()),
    }
}

/// `time script ?count?`: evaluates `script` `count` times (default 1)
/// and reports elapsed microseconds in Tcl's `"N microseconds per
/// iteration"` shape.
fn time_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "time script ?count?")?;
    let count: u32 = match argv.get(2) {
        Some(n) => n
            .parse()
            .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", n)))?,
        None => 1,
    };
    let count = count.max(1);
    let start = chrono::Utc::now();
    for _ in 0..count {
        interp.eval(&argv[1])?;
    }
    let elapsed_us = chrono::Utc::now().signed_duration_since(start).num_microseconds().unwrap_or(0);
    let per_iter = elapsed_us / i64::from(count);
    ok(format!("{} microseconds per iteration", per_iter))
}

/// `exec prog ?arg ...?`: runs a host process to completion and returns
/// its trimmed stdout, raising an error (stderr as the message) on
/// non-zero exit — matching `Tcl_ExecObjCmd`'s basic synchronous case,
/// minus pipelines and I/O redirection.
fn exec_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "exec prog ?arg ...?")?;
    let output = std::process::Command::new(&argv[1])
        .args(&argv[2..])
        .output()
        .map_err(|e| interp.err_host(e.to_string()))?;
    if output.status.success() {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        while text.ends_with('\n') {
            text.pop();
        }
        ok(text)
    } else {
        Err(interp.err_host(String::from_utf8_lossy(&output.stderr).trim_end().to_string()))
    }
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("clock", clock_cmd);
    interp.register_native("exit", exit_cmd);
    interp.register_native("pid", pid_cmd);
    interp.register_native("rand", rand_cmd);
    interp.register_native("time", time_cmd);
    interp.register_native("exec", exec_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn pid_returns_a_positive_integer() {
        let mut i = Interp::new();
        let pid: i64 = i.eval("pid").unwrap().value.parse().unwrap();
        assert!(pid > 0);
    }

    #[test]
    fn rand_with_max_stays_in_bounds() {
        let mut i = Interp::new();
        let v: i64 = i.eval("rand 10").unwrap().value.parse().unwrap();
        assert!((0..10).contains(&v));
    }

    #[test]
    fn time_reports_microseconds_per_iteration() {
        let mut i = Interp::new();
        let out = i.eval("time {set x 1} 3").unwrap().value;
        assert!(out.ends_with("microseconds per iteration"));
    }
}
