//! `string`'s subcommands plus `append`, `format`, `scan`, and `subst`
//! (SPEC_FULL.md §4.9). `string` itself dispatches on its first argument
//! like a miniature command registry of its own, matching
//! `picolCommandString`'s big subcommand `if`/`else if` chain.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use crate::value;

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

fn string_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "string subcommand ?arg ...?")?;
    let sub = argv[1].as_str();
    let rest = &argv[2..];
    match sub {
        "length" => {
            check_arity(interp, argv, 3, Some(3), "string length string")?;
            ok(rest[0].chars().count().to_string())
        }
        "compare" => {
            check_arity(interp, argv, 4, Some(4), "string compare string1 string2")?;
            let ord = rest[0].cmp(&rest[1]) as i32;
            ok(ord.to_string())
        }
        "equal" => {
            check_arity(interp, argv, 4, Some(4), "string equal string1 string2")?;
            ok(value::bool_str(rest[0] == rest[1]))
        }
        "first" => {
            check_arity(interp, argv, 4, Some(4), "string first needle haystack")?;
            ok(rest[1].find(rest[0].as_str()).map(|i| i.to_string()).unwrap_or_else(|| "-1".to_string()))
        }
        "last" => {
            check_arity(interp, argv, 4, Some(4), "string last needle haystack")?;
            ok(rest[1].rfind(rest[0].as_str()).map(|i| i.to_string()).unwrap_or_else(|| "-1".to_string()))
        }
        "index" => {
            check_arity(interp, argv, 4, Some(4), "string index string charIndex")?;
            let chars: Vec<char> = rest[0].chars().collect();
            let idx = resolve_index(&rest[1], chars.len())
                .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", rest[1])))?;
            if idx < 0 || idx as usize >= chars.len() {
                ok(String::new())
            } else {
                ok(chars[idx as usize].to_string())
            }
        }
        "match" => {
            check_arity(interp, argv, 4, Some(4), "string match pattern string")?;
            ok(value::bool_str(crate::glob::matches(&rest[0], &rest[1])))
        }
        "is" => {
            check_arity(interp, argv, 4, Some(4), "string is class string")?;
            let holds = match rest[0].as_str() {
                "int" => value::is_integer(&rest[1]),
                "alpha" => !rest[1].is_empty() && rest[1].chars().all(|c| c.is_alphabetic()),
                "alnum" => !rest[1].is_empty() && rest[1].chars().all(|c| c.is_alphanumeric()),
                "digit" => !rest[1].is_empty() && rest[1].chars().all(|c| c.is_ascii_digit()),
                "space" => rest[1].chars().all(|c| c.is_whitespace()),
                "upper" => !rest[1].is_empty() && rest[1].chars().all(|c| c.is_uppercase()),
                "lower" => !rest[1].is_empty() && rest[1].chars().all(|c| c.is_lowercase()),
                "boolean" => matches!(rest[1].as_str(), "0" | "1" | "true" | "false" | "yes" | "no"),
                other => return Err(interp.err_type(format!("unknown class \"{}\"", other))),
            };
            ok(value::bool_str(holds))
        }
        "range" => {
            check_arity(interp, argv, 4, Some(4), "string range string first last")?;
            let chars: Vec<char> = rest[0].chars().collect();
            let first = resolve_index(&rest[1], chars.len())
                .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", rest[1])))?;
            let last = resolve_index(&rest[2], chars.len())
                .ok_or_else(|| interp.err_type(format!("bad index \"{}\"", rest[2])))?;
            let start = first.max(0).min(chars.len() as isize) as usize;
            let end = (last + 1).max(start as isize).min(chars.len() as isize) as usize;
            ok(chars[start..end].iter().collect::<String>())
        }
        "repeat" => {
            check_arity(interp, argv, 4, Some(4), "string repeat string count")?;
            let n: usize = rest[1]
                .parse()
                .map_err(|_| interp.err_type(format!("expected integer but got \"{}\"", rest[1])))?;
            ok(rest[0].repeat(n))
        }
        "reverse" => {
            check_arity(interp, argv, 3, Some(3), "string reverse string")?;
            ok(rest[0].chars().rev().collect::<String>())
        }
        "tolower" => {
            check_arity(interp, argv, 3, Some(3), "string tolower string")?;
            ok(rest[0].to_lowercase())
        }
        "toupper" => {
            check_arity(interp, argv, 3, Some(3), "string toupper string")?;
            ok(rest[0].to_uppercase())
        }
        "trim" => {
            check_arity(interp, argv, 3, Some(4), "string trim string ?chars?")?;
            ok(trim_chars(&rest[0], rest.get(1).map(|s| s.as_str()), true, true))
        }
        "trimleft" => {
            check_arity(interp, argv, 3, Some(4), "string trimleft string ?chars?")?;
            ok(trim_chars(&rest[0], rest.get(1).map(|s| s.as_str()), true, false))
        }
        "trimright" => {
            check_arity(interp, argv, 3, Some(4), "string trimright string ?chars?")?;
            ok(trim_chars(&rest[0], rest.get(1).map(|s| s.as_str()), false, true))
        }
        other => Err(interp.err_name(format!("unknown or ambiguous subcommand \"{}\": must be one of length, compare, equal, first, last, index, match, is, range, repeat, reverse, tolower, toupper, trim, trimleft, trimright", other))),
    }
}

fn trim_chars(s: &str, chars: Option<&str>, left: bool, right: bool) -> String {
    let set = chars.unwrap_or(" \t\n\r");
    let is_trim = |c: char| set.contains(c);
    let mut slice = s;
    if left {
        slice = slice.trim_start_matches(is_trim);
    }
    if right {
        slice = slice.trim_end_matches(is_trim);
    }
    slice.to_string()
}

fn append_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "append varName ?value ...?")?;
    let mut buf = interp.get_var(&argv[1]).unwrap_or_default();
    for v in &argv[2..] {
        buf.push_str(v);
    }
    interp.set_var(&argv[1], buf.clone())?;
    ok(buf)
}

/// A minimal `printf`-family formatter: `%d %s %x %X %o %c %%`, with an
/// optional zero-padded width (`%05d`). Anything fancier (precision,
/// `%f`) is out of scope per spec §1's "no floating point".
fn format_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, None, "format formatString ?arg ...?")?;
    let fmt = argv[1].as_bytes();
    let mut args = argv[2..].iter();
    let mut out = String::new();
    let mut i = 0;
    while i < fmt.len() {
        if fmt[i] != b'%' {
            out.push(fmt[i] as char);
            i += 1;
            continue;
        }
        i += 1;
        if i >= fmt.len() {
            out.push('%');
            break;
        }
        if fmt[i] == b'%' {
            out.push('%');
            i += 1;
            continue;
        }
        let zero_pad = fmt[i] == b'0';
        let mut j = i;
        while j < fmt.len() && fmt[j].is_ascii_digit() {
            j += 1;
        }
        let width: usize = std::str::from_utf8(&fmt[i..j]).unwrap().parse().unwrap_or(0);
        if j >= fmt.len() {
            return Err(interp.err_type("format string ended in middle of field specifier"));
        }
        let conv = fmt[j];
        i = j + 1;
        let arg = args
            .next()
            .ok_or_else(|| interp.err_type("not enough arguments for all format specifiers"))?;
        let piece = match conv {
            b'd' => {
                let n = value::parse_int(arg)
                    .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", arg)))?;
                if zero_pad {
                    format!("{:0width$}", n, width = width)
                } else {
                    format!("{:width$}", n, width = width)
                }
            }
            b's' => format!("{:width$}", arg, width = width),
            b'x' => {
                let n = value::parse_int(arg)
                    .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", arg)))?;
                format!("{:01$x}", n, width)
            }
            b'X' => {
                let n = value::parse_int(arg)
                    .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", arg)))?;
                format!("{:01$X}", n, width)
            }
            b'o' => {
                let n = value::parse_int(arg)
                    .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", arg)))?;
                format!("{:01$o}", n, width)
            }
            b'c' => {
                let n = value::parse_int(arg)
                    .ok_or_else(|| interp.err_type(format!("expected integer but got \"{}\"", arg)))?;
                char::from_u32(n as u32).unwrap_or('\u{FFFD}').to_string()
            }
            other => return Err(interp.err_type(format!("bad field specifier \"{}\"", other as char))),
        };
        out.push_str(&piece);
    }
    ok(out)
}

/// `scan string format ?varName ...?`: a practical subset supporting
/// whitespace-delimited `%d` and `%s` fields (spec §1's ASCII-only scope
/// means no locale-aware numeric parsing beyond that).
fn scan_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "scan string format ?varName ...?")?;
    let input = argv[1].split_whitespace();
    let specs: Vec<u8> = argv[2]
        .as_bytes()
        .windows(2)
        .filter(|w| w[0] == b'%')
        .map(|w| w[1])
        .collect();
    let varnames = &argv[3..];
    let mut matched = 0i64;
    let mut values = Vec::new();
    let mut words = input;
    for spec in &specs {
        let word = match words.next() {
            Some(w) => w,
            None => break,
        };
        match spec {
            b'd' => match value::parse_int(word) {
                Some(n) => {
                    values.push(n.to_string());
                    matched += 1;
                }
                None => break,
            },
            b's' => {
                values.push(word.to_string());
                matched += 1;
            }
            other => return Err(interp.err_type(format!("bad scan conversion \"{}\"", *other as char))),
        }
    }
    if varnames.is_empty() {
        ok(crate::list::list_from(&values))
    } else {
        for (name, val) in varnames.iter().zip(values.iter()) {
            interp.set_var(name, val.clone())?;
        }
        ok(matched.to_string())
    }
}

fn subst_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 2, Some(2), "subst string")?;
    interp.subst(&argv[1])
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("string", string_cmd);
    interp.register_native("append", append_cmd);
    interp.register_native("format", format_cmd);
    interp.register_native("scan", scan_cmd);
    interp.register_native("subst", subst_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn string_reverse_reverses_bytes() {
        let mut i = Interp::new();
        let c = i.eval("string reverse hello").unwrap();
        assert_eq!(c.value, "olleh");
    }

    #[test]
    fn string_trim_strips_whitespace() {
        let mut i = Interp::new();
        let c = i.eval("string trim {  hi  }").unwrap();
        assert_eq!(c.value, "hi");
    }

    #[test]
    fn format_pads_with_zeroes() {
        let mut i = Interp::new();
        let c = i.eval("format %05d 42").unwrap();
        assert_eq!(c.value, "00042");
    }
}
