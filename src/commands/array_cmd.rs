//! `array`'s subcommands (spec §4.3, "Array"): `exists get names set
//! size statistics`, each resolving the array through the handle stored
//! in a scalar variable slot, as described in the data model.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use crate::list;

fn array_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, None, "array subcommand arrayName ?arg ...?")?;
    let sub = argv[1].as_str();
    let name = &argv[2];
    match sub {
        "exists" => {
            check_arity(interp, argv, 3, Some(3), "array exists arrayName")?;
            ok(crate::value::bool_str(interp.array_handle(name).is_some()))
        }
        "size" => {
            check_arity(interp, argv, 3, Some(3), "array size arrayName")?;
            let len = interp.array_handle(name).and_then(|h| interp.array(h)).map(|a| a.len()).unwrap_or(0);
            ok(len.to_string())
        }
        "names" => {
            check_arity(interp, argv, 3, Some(4), "array names arrayName ?pattern?")?;
            let pattern = argv.get(3).map(|s| s.as_str());
            let names: Vec<String> = interp
                .array_handle(name)
                .and_then(|h| interp.array(h))
                .map(|a| a.names_matching(pattern).into_iter().map(|s| s.to_string()).collect())
                .unwrap_or_default();
            ok(list::list_from(&names))
        }
        "get" => {
            check_arity(interp, argv, 3, Some(4), "array get arrayName ?pattern?")?;
            let pattern = argv.get(3).map(|s| s.as_str());
            let mut flat = Vec::new();
            if let Some(arr) = interp.array_handle(name).and_then(|h| interp.array(h)) {
                for (k, v) in arr.entries() {
                    if pattern.map_or(true, |p| crate::glob::matches(p, k)) {
                        flat.push(k.to_string());
                        flat.push(v.to_string());
                    }
                }
            }
            ok(list::list_from(&flat))
        }
        "set" => {
            check_arity(interp, argv, 4, Some(4), "array set arrayName list")?;
            let pairs = list::parse_list(&argv[3]);
            if pairs.len() % 2 != 0 {
                return Err(interp.err_type("list must have an even number of elements"));
            }
            let h = interp.array_handle_or_create(name);
            let mut i = 0;
            while i < pairs.len() {
                if let Some(a) = interp.array_mut(h) {
                    a.set(&pairs[i], pairs[i + 1].clone());
                }
                i += 2;
            }
            ok(String::new())
        }
        "statistics" => {
            check_arity(interp, argv, 3, Some(3), "array statistics arrayName")?;
            let stats = interp
                .array_handle(name)
                .and_then(|h| interp.array(h))
                .map(|a| a.statistics())
                .ok_or_else(|| interp.err_name(format!("\"{}\" isn't an array", name)))?;
            ok(stats)
        }
        other => Err(interp.err_name(format!(
            "unknown or ambiguous subcommand \"{}\": must be one of exists, get, names, set, size, statistics",
            other
        ))),
    }
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("array", array_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn array_set_then_names_and_index() {
        let mut i = Interp::new();
        i.eval("array set A {a 1 b 2}").unwrap();
        let names = i.eval("lsort [array names A]").unwrap();
        assert_eq!(names.value, "a b");
        assert_eq!(i.eval("set A(a)").unwrap().value, "1");
    }

    #[test]
    fn array_size_reports_entry_count() {
        let mut i = Interp::new();
        i.eval("array set a {k1 v1 k2 v2}").unwrap();
        assert_eq!(i.eval("array size a").unwrap().value, "2");
    }
}
