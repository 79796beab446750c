//! The list-manipulation slice of the built-in catalogue (spec §4.7 /
//! SPEC_FULL.md §4.9): every command here is a thin wrapper around
//! [`crate::list`]'s brace-aware codec — lists are never anything but
//! strings, so "building a list" means assembling a string and
//! "indexing a list" means re-parsing one.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use crate::list::{self, list_from};

/// Resolves a Tcl-style index argument (`end`, `end-N`, or a plain
/// integer) against a list of length `len`. Out-of-range results are
/// returned as `isize` so callers can decide whether to clamp or error.
fn resolve_index(s: &str, len: usize) -> Option<isize> {
    if let Some(rest) = s.strip_prefix("end") {
        let base = len as isize - 1;
        if rest.is_empty() {
            return Some(base);
        }
        let n: isize = rest.strip_prefix('-')?.parse().ok()?;
        return Some(base - n);
    }
    s.parse::<isize>().ok()
}

fn clamp(idx: isize, len: usize) -> usize {
    idx.max(0).min(len as isize) as usize
}

fn list_cmd(_interp: &mut Interp, argv: &[String]) -> EvalResult {
    ok(list_from(&argv[1..]))
}

fn llength(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "llength list")?;
    ok(list::parse_list(&argv[1]).len().to_string())
}

fn lindex(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "lindex list ?index ...?")?;
    let mut current = argv[1].clone();
    for idx_arg in &argv[2..] {
        let words = list::parse_list(&current);
        let idx = resolve_index(idx_arg, words.len())
            .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", idx_arg)))?;
        if idx < 0 || idx as usize >= words.len() {
            return ok(String::new());
        }
        current = words[idx as usize].clone();
    }
    ok(current)
}

fn linsert(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "linsert list index element ?element ...?")?;
    let mut words = list::parse_list(&argv[1]);
    let idx = resolve_index(&argv[2], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[2])))?;
    let at = clamp(idx, words.len());
    for (offset, elem) in argv[3..].iter().enumerate() {
        words.insert(at + offset, elem.clone());
    }
    ok(list_from(&words))
}

fn lrange(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 4, Some(4), "lrange list first last")?;
    let words = list::parse_list(&argv[1]);
    let first = resolve_index(&argv[2], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[2])))?;
    let last = resolve_index(&argv[3], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[3])))?;
    let start = clamp(first, words.len());
    let end = clamp(last + 1, words.len()).max(start);
    ok(list_from(&words[start..end]))
}

fn lreplace(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 4, None, "lreplace list first last ?element ...?")?;
    let mut words = list::parse_list(&argv[1]);
    let first = resolve_index(&argv[2], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[2])))?;
    let last = resolve_index(&argv[3], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[3])))?;
    let start = clamp(first, words.len());
    let end = clamp(last + 1, words.len()).max(start);
    let replacement: Vec<String> = argv[4..].to_vec();
    words.splice(start..end, replacement);
    ok(list_from(&words))
}

fn lsearch(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "lsearch ?-exact|-glob? ?-all? list pattern")?;
    let mut exact = false;
    let mut all = false;
    let mut i = 1;
    while i < argv.len() - 2 {
        match argv[i].as_str() {
            "-exact" => exact = true,
            "-glob" => exact = false,
            "-all" => all = true,
            other => return Err(interp.err_type(format!("bad option \"{}\"", other))),
        }
        i += 1;
    }
    let words = list::parse_list(&argv[i]);
    let pattern = &argv[i + 1];
    let matches: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| {
            if exact {
                *w == pattern
            } else {
                crate::glob::matches(pattern, w)
            }
        })
        .map(|(idx, _)| idx)
        .collect();
    if all {
        ok(list_from(&matches.iter().map(|n| n.to_string()).collect::<Vec<_>>()))
    } else {
        ok(matches.first().map(|n| n.to_string()).unwrap_or_else(|| "-1".to_string()))
    }
}

fn lset(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "lset varName index value")?;
    let current = interp.get_var(&argv[1])?;
    let mut words = list::parse_list(&current);
    let idx = resolve_index(&argv[2], words.len())
        .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", argv[2])))?;
    if idx < 0 || idx as usize >= words.len() {
        return Err(interp.err_range(format!("list doesn't contain element {}", argv[2])));
    }
    words[idx as usize] = argv[3].clone();
    let rebuilt = list_from(&words);
    interp.set_var(&argv[1], rebuilt.clone())?;
    ok(rebuilt)
}

fn lsort(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "lsort ?-decreasing? ?-integer? ?-unique? list")?;
    let mut decreasing = false;
    let mut integer = false;
    let mut unique = false;
    for opt in &argv[1..argv.len() - 1] {
        match opt.as_str() {
            "-decreasing" => decreasing = true,
            "-increasing" => decreasing = false,
            "-integer" => integer = true,
            "-unique" => unique = true,
            other => return Err(interp.err_type(format!("bad option \"{}\"", other))),
        }
    }
    let mut words = list::parse_list(&argv[argv.len() - 1]);
    if integer {
        words.sort_by_key(|w| crate::value::parse_int(w).unwrap_or(0));
    } else {
        words.sort();
    }
    if decreasing {
        words.reverse();
    }
    if unique {
        words.dedup();
    }
    ok(list_from(&words))
}

fn lappend(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "lappend varName ?value ...?")?;
    let mut buf = interp.get_var(&argv[1]).unwrap_or_default();
    for v in &argv[2..] {
        list::list_append(&mut buf, v);
    }
    interp.set_var(&argv[1], buf.clone())?;
    ok(buf)
}

fn concat(_interp: &mut Interp, argv: &[String]) -> EvalResult {
    ok(argv[1..].join(" "))
}

fn join(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "join list ?joinString?")?;
    let sep = argv.get(2).map(|s| s.as_str()).unwrap_or(" ");
    ok(list::parse_list(&argv[1]).join(sep))
}

fn split(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(3), "split string ?splitChars?")?;
    let s = &argv[1];
    let chars = argv.get(2).map(|s| s.as_str()).unwrap_or(" \t\n\r");
    let parts: Vec<String> = if chars.is_empty() {
        s.chars().map(|c| c.to_string()).collect()
    } else {
        s.split(|c| chars.contains(c)).map(|s| s.to_string()).collect()
    };
    ok(list_from(&parts))
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("list", list_cmd);
    interp.register_native("llength", llength);
    interp.register_native("lindex", lindex);
    interp.register_native("linsert", linsert);
    interp.register_native("lrange", lrange);
    interp.register_native("lreplace", lreplace);
    interp.register_native("lsearch", lsearch);
    interp.register_native("lset", lset);
    interp.register_native("lsort", lsort);
    interp.register_native("lappend", lappend);
    interp.register_native("concat", concat);
    interp.register_native("join", join);
    interp.register_native("split", split);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn lappend_builds_up_a_list() {
        let mut i = Interp::new();
        i.eval("set a \"\"").unwrap();
        for x in 1..=4 {
            i.eval(&format!("lappend a {}", x * x)).unwrap();
        }
        let c = i.eval("set a").unwrap();
        assert_eq!(c.value, "1 4 9 16");
    }

    #[test]
    fn lindex_supports_end() {
        let mut i = Interp::new();
        let c = i.eval("lindex {a b c} end").unwrap();
        assert_eq!(c.value, "c");
    }

    #[test]
    fn lsort_unique_dedupes_sorted_input() {
        let mut i = Interp::new();
        let c = i.eval("lsort -unique {b a b c a}").unwrap();
        assert_eq!(c.value, "a b c");
    }

    #[test]
    fn expansion_prefix_splices_into_separate_words() {
        let mut i = Interp::new();
        let c = i.eval("llength [list {*}{a b c}]").unwrap();
        assert_eq!(c.value, "3");
    }
}
