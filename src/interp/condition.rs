//! Condition evaluation for `if`/`while`/`for` (spec §4.8), ported from
//! `picolCondition`: a substituted three-word result whose middle word
//! names a registered command is rewritten infix-to-prefix and run as an
//! expression (`{1 > 2}` becomes `> 1 2`); a substituted single word that
//! splits into a compact binary comparison (`$n<=1` substitutes to
//! `6<=1`) is rewritten the same way via [`value::split_compact`], the
//! helper `expr`'s single-argument compact form also uses; anything else
//! is compared against zero by synthesizing `!= 0 ...` (or `== 0 ...` for
//! a leading `!`) and evaluating that.

use crate::error::{EvalResult, Flow};
use crate::interp::Interp;
use crate::list;
use crate::value;

pub fn evaluate_condition(interp: &mut Interp, raw: &str) -> EvalResult {
    let subst = interp.subst(raw)?;
    if subst.flow != Flow::Normal {
        return Ok(subst);
    }
    let words = list::parse_list(&subst.value);
    if words.len() == 3 && interp.commands.contains(&words[1]) {
        let prefix = list::list_from(&[words[1].clone(), words[0].clone(), words[2].clone()]);
        return interp.eval(&prefix);
    }
    if words.len() == 1 {
        if let Some((left, op, right)) = value::split_compact(&words[0]) {
            if interp.commands.contains(op) {
                let prefix = list::list_from(&[op.to_string(), left.to_string(), right.to_string()]);
                return interp.eval(&prefix);
            }
        }
    }

    let (negate, rest) = match raw.strip_prefix('!') {
        Some(stripped) => (true, stripped),
        None => (false, raw),
    };
    let cmp = if negate { "== 0 " } else { "!= 0 " };
    interp.eval(&format!("{}{}", cmp, rest))
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn compact_comparison_after_substitution_is_recognized() {
        let mut i = Interp::new();
        i.eval("set n 6").unwrap();
        let c = i.eval("if {$n<=1} { set r yes } else { set r no }").unwrap();
        assert_eq!(c.value, "no");
        assert_eq!(i.eval("set r").unwrap().value, "no");
    }

    #[test]
    fn recursive_proc_with_compact_condition_runs_to_completion() {
        let mut i = Interp::new();
        i.eval("proc fact n { if {$n<=1} {return 1}; expr $n * [fact [expr $n - 1]] }").unwrap();
        let c = i.eval("fact 6").unwrap();
        assert_eq!(c.value, "720");
    }
}
