mod utils;

use seaspeak::Reply;
use utils::{run, run_errors, run_ok, session};

#[test]
fn show_a_user_typedef() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef unsigned long word");
    assert_eq!(run(&mut s, "show word"), "typedef unsigned long word;\n");
}

#[test]
fn define_is_a_typedef_too() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "define word as unsigned long");
    assert_eq!(run(&mut s, "show word"), "typedef unsigned long word;\n");
}

#[test]
fn show_a_function_pointer_typedef() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef int (*pf)(char)");
    assert_eq!(run(&mut s, "show pf"), "typedef int (*pf)(char);\n");
}

#[test]
fn show_as_using() {
    utils::init();
    let mut s = session("c++17");
    run_ok(&mut s, "using pi = int *");
    assert_eq!(run(&mut s, "show pi as using"), "using pi = int*;\n");
}

#[test]
fn using_requires_cpp11() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef unsigned long word");
    let errors = run_errors(&mut s, "show word as using");
    assert!(
        errors.iter().any(|e| e.contains("using is not supported")),
        "got {:?}",
        errors
    );
}

#[test]
fn identical_redefinition_is_accepted() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef unsigned long word");
    run_ok(&mut s, "typedef unsigned long word");
}

#[test]
fn conflicting_redefinition_is_rejected() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef unsigned long word");
    let errors = run_errors(&mut s, "typedef char *word");
    assert!(
        errors.iter().any(|e| e.contains("already defined")),
        "got {:?}",
        errors
    );
}

#[test]
fn show_user_lists_only_user_definitions() {
    utils::init();
    let mut s = session("c17");
    run_ok(&mut s, "typedef unsigned long word");
    let listing = run(&mut s, "show user");
    assert_eq!(listing, "typedef unsigned long word;\n");

    let predefined = run(&mut s, "show predefined");
    assert!(predefined.contains("size_t"), "got {:?}", predefined);
    assert!(!predefined.contains("word"), "got {:?}", predefined);
}

#[test]
fn predefined_names_are_language_gated() {
    utils::init();
    let c89 = run(&mut session("c89"), "show predefined");
    assert!(!c89.contains("int32_t"), "got {:?}", c89);
    let c99 = run(&mut session("c99"), "show predefined");
    assert!(c99.contains("int32_t"), "got {:?}", c99);
}

#[test]
fn scoped_typedefs_print_inside_scopes() {
    utils::init();
    let mut s = session("c++17");
    run_ok(&mut s, "define ns::word as unsigned long");
    assert_eq!(
        run(&mut s, "show ns::word"),
        "namespace ns { typedef unsigned long word; }\n"
    );
}

#[test]
fn show_unknown_name_suggests() {
    utils::init();
    let mut s = session("c17");
    let errors = run_errors(&mut s, "show size_tt");
    assert!(
        errors.iter().any(|e| e.contains("did you mean \"size_t\"")),
        "got {:?}",
        errors
    );
}

#[test]
fn set_language_switches_checking() {
    utils::init();
    let mut s = session("c++14");
    run_ok(&mut s, "declare r as register int");
    run_ok(&mut s, "set c++17");
    let errors = run_errors(&mut s, "declare r as register int");
    assert!(
        errors
            .iter()
            .any(|e| e.contains("register is not supported in C++17")),
        "got {:?}",
        errors
    );
}

#[test]
fn set_east_const_moves_typedef_qualifiers() {
    utils::init();
    let mut s = session("c17");
    assert_eq!(
        run(&mut s, "declare x as const size_t"),
        "const size_t x;\n"
    );
    run_ok(&mut s, "set east-const");
    assert_eq!(
        run(&mut s, "declare x as const size_t"),
        "size_t const x;\n"
    );
}

#[test]
fn set_alt_tokens() {
    utils::init();
    let mut s = session("c++17");
    run_ok(&mut s, "set alt-tokens");
    assert_eq!(
        run(&mut s, "declare r as reference to int"),
        "int bitand r;\n"
    );
}

#[test]
fn set_options_lists_state() {
    utils::init();
    let mut s = session("c17");
    let listing = run(&mut s, "set options");
    assert!(listing.contains("noeast-const"), "got {:?}", listing);
    assert!(listing.contains("lang=C17"), "got {:?}", listing);
    run_ok(&mut s, "set east-const");
    let listing = run(&mut s, "set options");
    assert!(listing.contains("  east-const"), "got {:?}", listing);
}

#[test]
fn set_unknown_option_suggests() {
    utils::init();
    let mut s = session("c17");
    let errors = run_errors(&mut s, "set eastconst");
    assert!(
        errors
            .iter()
            .any(|e| e.contains("did you mean \"east-const\"")),
        "got {:?}",
        errors
    );
}

#[test]
fn quit_is_reported() {
    utils::init();
    let mut s = session("c17");
    assert_eq!(s.interpret("quit").result.unwrap(), Reply::Quit);
    assert_eq!(s.interpret("exit").result.unwrap(), Reply::Quit);
}

#[test]
fn help_mentions_the_commands() {
    utils::init();
    let mut s = session("c17");
    let help = run(&mut s, "help");
    for command in &["declare", "explain", "cast", "show", "set"] {
        assert!(help.contains(command), "help missing {}", command);
    }
    assert_eq!(run(&mut s, "?"), help);
}
