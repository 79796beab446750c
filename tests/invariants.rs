//! Black-box tests for the ten binding invariants, beyond the seven
//! scenarios already covered in `scenarios.rs`.

use picol_core::Interp;

#[test]
fn subst_then_eval_matches_direct_eval_for_side_effect_free_source() {
    let mut i = Interp::new();
    i.eval("set x 5").unwrap();
    let substituted = i.subst("expr $x + 1").unwrap().value;
    let direct = i.eval("expr $x + 1").unwrap().value;
    let via_subst = i.eval(&substituted).unwrap().value;
    assert_eq!(via_subst, direct);
}

#[test]
fn list_round_trip_is_idempotent_after_first_pass() {
    let mut i = Interp::new();
    let words = i.eval("list a {b c} d").unwrap().value;
    let joined_once = i.eval(&format!("join [list {}]", words)).unwrap().value;
    let reparsed = i.eval(&format!("list {}", joined_once)).unwrap().value;
    let joined_twice = i.eval(&format!("join [list {}]", reparsed)).unwrap().value;
    assert_eq!(joined_once, joined_twice);
}

#[test]
fn set_then_get_yields_exact_value() {
    let mut i = Interp::new();
    i.eval("set x {hello world}").unwrap();
    assert_eq!(i.eval("set x").unwrap().value, "hello world");
}

#[test]
fn incr_adds_step_and_defaults_to_one() {
    let mut i = Interp::new();
    i.eval("set x 10").unwrap();
    i.eval("incr x 5").unwrap();
    assert_eq!(i.eval("set x").unwrap().value, "15");
    i.eval("incr x").unwrap();
    assert_eq!(i.eval("set x").unwrap().value, "16");
}

#[test]
fn wrong_arity_proc_call_reports_error_and_leaves_stack_depth_unchanged() {
    let mut i = Interp::new();
    i.eval("proc p {a b} { expr $a + $b }").unwrap();
    let depth_before = i.eval("info level").unwrap().value;
    assert!(i.eval("p 1").is_err());
    let depth_after = i.eval("info level").unwrap().value;
    assert_eq!(depth_before, depth_after);
}

#[test]
fn recursion_past_the_cap_fails_but_interpreter_stays_usable() {
    let mut i = Interp::new();
    i.eval("proc loop n { loop [expr $n + 1] }").unwrap();
    let err = i.eval("loop 0").unwrap_err();
    assert!(err.message().contains("too many nested evaluations"));
    assert_eq!(i.eval("expr 2 + 2").unwrap().value, "4");
}

#[test]
fn catch_captures_error_message_and_returns_one() {
    let mut i = Interp::new();
    let c = i.eval("catch { error msg } r").unwrap();
    assert_eq!(c.value, "1");
    assert_eq!(i.eval("set r").unwrap().value, "msg");
}

#[test]
fn uplevel_writes_into_the_callers_frame_not_the_callees() {
    let mut i = Interp::new();
    i.eval("proc p {} { uplevel 1 { set x 1 } }").unwrap();
    i.eval("p").unwrap();
    assert_eq!(i.eval("set x").unwrap().value, "1");
    assert!(i.eval("p; info exists x").unwrap().value == "1");
}

#[test]
fn array_set_populates_size_names_and_elements() {
    let mut i = Interp::new();
    i.eval("array set a {k1 v1 k2 v2}").unwrap();
    assert_eq!(i.eval("array size a").unwrap().value, "2");
    assert_eq!(i.eval("lsort [array names a]").unwrap().value, "k1 k2");
    assert_eq!(i.eval("set a(k1)").unwrap().value, "v1");
}

#[test]
fn expansion_prefix_splices_brace_list_into_separate_words() {
    let mut i = Interp::new();
    let c = i.eval("llength [list {*}{a b c}]").unwrap();
    assert_eq!(c.value, "3");
}
