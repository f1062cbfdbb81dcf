mod utils;

use utils::{assert_translates, run, run_warnings, session};

#[test]
fn pointer_to_array() {
    assert_translates(
        "c17",
        "explain int (*x)[10]",
        "declare x as pointer to array 10 of int\n",
    );
}

#[test]
fn array_of_pointer_to_function() {
    assert_translates(
        "c17",
        "explain int (*a[3])(char)",
        "declare a as array 3 of pointer to function (char) returning int\n",
    );
}

#[test]
fn simple_declarations() {
    assert_translates("c17", "explain int x", "declare x as int\n");
    assert_translates("c17", "explain char *p", "declare p as pointer to char\n");
    assert_translates(
        "c17",
        "explain unsigned long x",
        "declare x as unsigned long\n",
    );
    assert_translates(
        "c17",
        "explain struct S *s",
        "declare s as pointer to struct S\n",
    );
}

#[test]
fn qualifiers() {
    assert_translates(
        "c17",
        "explain const int *p",
        "declare p as pointer to const int\n",
    );
    assert_translates(
        "c17",
        "explain char *const p",
        "declare p as const pointer to char\n",
    );
}

#[test]
fn east_const_parses_the_same() {
    // east-const and west-const spellings are the same declaration
    assert_translates(
        "c17",
        "explain int const x",
        "declare x as const int\n",
    );
    assert_translates(
        "c17",
        "explain const int x",
        "declare x as const int\n",
    );
}

#[test]
fn function_declarations() {
    assert_translates(
        "c17",
        "explain char *f(int x, int y)",
        "declare f as function (x as int, y as int) returning pointer to char\n",
    );
    assert_translates(
        "c17",
        "explain void f(void)",
        "declare f as function returning void\n",
    );
    assert_translates(
        "c17",
        "explain int f(int, ...)",
        "declare f as function (int, ...) returning int\n",
    );
}

#[test]
fn knr_parameters() {
    assert_translates(
        "knr",
        "explain double sin(x)",
        "declare sin as function (x) returning double\n",
    );
}

#[test]
fn pointer_to_member() {
    assert_translates(
        "c++17",
        "explain void (C::*p)(int)",
        "declare p as pointer to member of class C of function (int) returning void\n",
    );
}

#[test]
fn references() {
    assert_translates(
        "c++17",
        "explain int &r",
        "declare r as reference to int\n",
    );
    assert_translates(
        "c++17",
        "explain int &&r",
        "declare r as rvalue reference to int\n",
    );
}

#[test]
fn typedef_storage_reads_as_type() {
    assert_translates(
        "c17",
        "explain typedef int *p",
        "declare p as type pointer to int\n",
    );
}

#[test]
fn bit_fields() {
    assert_translates(
        "c17",
        "explain unsigned x : 3",
        "declare x as unsigned width 3 bits\n",
    );
}

#[test]
fn trailing_return_types() {
    assert_translates(
        "c++11",
        "explain auto f(int) -> char",
        "declare f as function (int) returning char\n",
    );
    utils::assert_error_contains(
        "c++11",
        "explain int f(int) -> char",
        "trailing return type requires \"auto\"",
    );
}

#[test]
fn typedef_names_resolve() {
    assert_translates(
        "c17",
        "explain size_t *p",
        "declare p as pointer to size_t\n",
    );
}

#[test]
fn implicit_int_warns_in_c89() {
    utils::init();
    let mut s = session("c89");
    let (outcome, warnings) = run_warnings(&mut s, "explain x");
    assert!(outcome.result.is_ok());
    assert!(
        warnings.iter().any(|w| w.contains("\"int\" assumed")),
        "got {:?}",
        warnings
    );
}

#[test]
fn digraph_input_is_equivalent() {
    utils::init();
    let mut s = session("c99");
    let plain = run(&mut s, "explain int x[3]");
    let digraph = run(&mut s, "explain int x<:3:>");
    assert_eq!(plain, digraph);
}

#[test]
fn trigraph_input_is_equivalent() {
    utils::init();
    let mut s = session("c89");
    let plain = run(&mut s, "explain int x[3]");
    let trigraph = run(&mut s, "explain int x??(3??)");
    assert_eq!(plain, trigraph);
}
