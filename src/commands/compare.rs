//! String-identity and list-membership comparison words (spec §4.9's
//! "comparisons-as-words" row): `eq`/`ne` compare raw strings (unlike
//! `==`/`!=`, which require integers), and `in`/`ni` test list
//! membership.

use crate::commands::{check_arity, ok};
use crate::error::EvalResult;
use crate::interp::Interp;
use crate::list;
use crate::value;

fn eq_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "eq string1 string2")?;
    ok(value::bool_str(argv[1] == argv[2]))
}

fn ne_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "ne string1 string2")?;
    ok(value::bool_str(argv[1] != argv[2]))
}

fn in_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "in value list")?;
    ok(value::bool_str(list::parse_list(&argv[2]).iter().any(|w| w == &argv[1])))
}

fn ni_cmd(interp: &mut Interp, argv: &[String]) -> EvalResult {
    check_arity(interp, argv, 3, Some(3), "ni value list")?;
    ok(value::bool_str(!list::parse_list(&argv[2]).iter().any(|w| w == &argv[1])))
}

pub(super) fn register(interp: &mut Interp) {
    interp.register_native("eq", eq_cmd);
    interp.register_native("ne", ne_cmd);
    interp.register_native("in", in_cmd);
    interp.register_native("ni", ni_cmd);
}

#[cfg(test)]
mod tests {
    use crate::interp::Interp;

    #[test]
    fn in_tests_list_membership() {
        let mut i = Interp::new();
        assert_eq!(i.eval("in b {a b c}").unwrap().value, "1");
        assert_eq!(i.eval("ni b {a b c}").unwrap().value, "0");
    }
}
