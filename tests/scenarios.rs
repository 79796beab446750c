//! Black-box script tests: full source text in, expected result string
//! out. These are the seven concrete scenarios from the interpreter's
//! acceptance table, run end to end through the public `Interp` API.

use picol_core::Interp;

#[test]
fn scenario_1_sums_two_variables() {
    let mut i = Interp::new();
    i.eval("set x 5; set y 7").unwrap();
    let c = i.eval("expr $x + $y").unwrap();
    assert_eq!(c.value, "12");
}

#[test]
fn scenario_2_recursive_factorial() {
    let mut i = Interp::new();
    i.eval("proc fact n { if {$n<=1} {return 1}; expr $n * [fact [expr $n - 1]] }").unwrap();
    let c = i.eval("fact 6").unwrap();
    assert_eq!(c.value, "720");
}

#[test]
fn scenario_3_foreach_collects_squares() {
    let mut i = Interp::new();
    i.eval("set a \"\"; foreach x {1 2 3 4} { lappend a [expr $x*$x] }").unwrap();
    let c = i.eval("set a").unwrap();
    assert_eq!(c.value, "1 4 9 16");
}

#[test]
fn scenario_4_catch_divide_by_zero() {
    let mut i = Interp::new();
    i.eval("catch {expr 1/0} e").unwrap();
    let c = i.eval("list $e").unwrap();
    assert_eq!(c.value, "{divide by zero}");
}

#[test]
fn scenario_5_string_reverse() {
    let mut i = Interp::new();
    let c = i.eval("string reverse \"hello\"").unwrap();
    assert_eq!(c.value, "olleh");
}

#[test]
fn scenario_6_array_names_sorted() {
    let mut i = Interp::new();
    i.eval("array set A {a 1 b 2}").unwrap();
    let c = i.eval("lsort [array names A]").unwrap();
    assert_eq!(c.value, "a b");
}

#[test]
fn scenario_7_uplevel_sets_callers_variable() {
    let mut i = Interp::new();
    i.eval("proc p {} { uplevel 1 {set marker hi} }").unwrap();
    i.eval("p").unwrap();
    let c = i.eval("set marker").unwrap();
    assert_eq!(c.value, "hi");
}
