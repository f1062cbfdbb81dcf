mod utils;

use utils::{assert_error_contains, run_errors, session};

#[test]
fn conflicting_int_modifiers() {
    // the conflict is reported at the token that introduced it
    assert_error_contains(
        "c89",
        "explain int signed short long x",
        "\"long\" and \"short\" are illegal together",
    );
    assert_error_contains("c17", "explain signed unsigned x", "illegal together");
    assert_error_contains("c17", "explain float int x", "illegal together");
    assert_error_contains("c99", "explain long long long x", "\"long long long\" is illegal");
}

#[test]
fn array_of_reference() {
    assert_error_contains(
        "c++17",
        "declare x as array of reference to int",
        "array of reference is illegal",
    );
}

#[test]
fn register_removed_in_cpp17() {
    assert_error_contains(
        "c++17",
        "declare r as register int",
        "register is not supported in C++17",
    );
}

#[test]
fn language_gating() {
    assert_error_contains("c89", "explain bool x", "bool is not supported in C89");
    assert_error_contains(
        "c++03",
        "declare x as constexpr int",
        "constexpr is not supported in C++03",
    );
    assert_error_contains("c17", "explain int &r", "reference is not supported");
    assert_error_contains("c89", "explain int32_t x", "int32_t is not supported in C89");
}

#[test]
fn pointer_and_reference_shapes() {
    assert_error_contains(
        "c++17",
        "declare p as pointer to reference to int",
        "pointer to reference is illegal",
    );
    assert_error_contains(
        "c++17",
        "declare r as reference to reference to int",
        "reference to reference is illegal",
    );
}

#[test]
fn function_shapes() {
    assert_error_contains(
        "c17",
        "declare f as function returning array 3 of int",
        "function returning array is illegal",
    );
    assert_error_contains(
        "c17",
        "declare f as function returning function returning int",
        "function returning function is illegal",
    );
    assert_error_contains(
        "c17",
        "declare a as array 3 of function returning int",
        "array of function is illegal",
    );
}

#[test]
fn variadic_placement() {
    assert_error_contains(
        "c17",
        "declare f as function (..., x as int) returning int",
        "must be the last parameter",
    );
    assert_error_contains(
        "c17",
        "declare f as function (...) returning int",
        "cannot be the only parameter",
    );
}

#[test]
fn void_misuse() {
    assert_error_contains("c17", "declare x as void", "variable of type void");
    assert_error_contains(
        "c17",
        "declare a as array 3 of void",
        "array of void is illegal",
    );
    assert_error_contains(
        "c17",
        "explain int f(void x)",
        "cannot have type void",
    );
}

#[test]
fn member_only_types() {
    assert_error_contains(
        "c++17",
        "declare f as virtual function returning void",
        "only legal for member functions",
    );
}

#[test]
fn storage_conflicts() {
    assert_error_contains("c17", "explain static extern int x", "conflicting storage class");
    assert_error_contains("c17", "explain typedef static int x", "conflicting storage class");
}

#[test]
fn bit_field_rules() {
    assert_error_contains("c17", "explain float x : 3", "only integral types");
    assert_error_contains("c17", "explain int x : 0", "must be positive");
    assert_error_contains("c17", "explain static int x : 3", "static members cannot");
}

#[test]
fn implicit_int_is_an_error_in_c23() {
    assert_error_contains("c23", "explain x", "implicit \"int\" is illegal");
}

#[test]
fn named_casts_require_cpp() {
    assert_error_contains(
        "c17",
        "static cast x into pointer to int",
        "static_cast is not supported",
    );
}

#[test]
fn cast_shapes() {
    assert_error_contains(
        "c17",
        "cast x into array 3 of int",
        "cast into array is illegal",
    );
    assert_error_contains(
        "c17",
        "cast x into register int",
        "cannot have storage class",
    );
}

#[test]
fn unknown_names_suggest() {
    utils::init();
    let mut s = session("c17");
    let errors = run_errors(&mut s, "declare x as pointer to itn");
    assert!(
        errors.iter().any(|e| e.contains("did you mean \"int\"")),
        "got {:?}",
        errors
    );

    let errors = run_errors(&mut s, "declaer x as int");
    assert!(
        errors.iter().any(|e| e.contains("did you mean \"declare\"")),
        "got {:?}",
        errors
    );
}

#[test]
fn multiple_errors_in_one_declaration() {
    utils::init();
    let mut s = session("c17");
    // both the return shape and the parameter are wrong
    let errors = run_errors(&mut s, "declare f as function (x as void) returning array 2 of int");
    assert!(errors.len() >= 2, "got {:?}", errors);
}

#[test]
fn errors_suppress_output() {
    utils::init();
    let mut s = session("c++17");
    assert!(s
        .interpret("declare x as array of reference to int")
        .result
        .is_err());
}
