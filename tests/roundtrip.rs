mod utils;

use seaspeak::Reply;
use utils::{run, run_ok, session};

/// declare -> gibberish -> explain -> the same English back.
fn assert_roundtrip(lang: &str, english: &str) {
    utils::init();
    let mut s = session(lang);
    let gibberish = run(&mut s, english);
    let gibberish = gibberish.trim_end().trim_end_matches(';');
    let explained = run(&mut s, &format!("explain {}", gibberish));
    assert_eq!(
        explained.trim_end(),
        english,
        "via gibberish: {}",
        gibberish
    );
}

/// explain -> English -> declare -> the same gibberish back.
fn assert_roundtrip_gibberish(lang: &str, gibberish: &str) {
    utils::init();
    let mut s = session(lang);
    let english = run(&mut s, &format!("explain {}", gibberish));
    let regibberished = run(&mut s, english.trim_end());
    assert_eq!(
        regibberished.trim_end().trim_end_matches(';'),
        gibberish,
        "via English: {}",
        english.trim_end()
    );
}

#[test]
fn english_roundtrips() {
    for english in &[
        "declare x as int",
        "declare x as pointer to int",
        "declare x as pointer to pointer to char",
        "declare x as pointer to array 10 of int",
        "declare a as array 3 of pointer to function (char) returning int",
        "declare f as function (x as int, y as int) returning pointer to char",
        "declare s as pointer to struct S",
        "declare x as const pointer to volatile char",
        "declare f as static function returning pointer to char",
        "declare b as block (int) returning void",
        "declare x as unsigned long long int",
    ] {
        assert_roundtrip("c17", english);
    }
}

#[test]
fn cpp_english_roundtrips() {
    for english in &[
        "declare r as reference to int",
        "declare r as rvalue reference to int",
        "declare p as pointer to member of class C of function (int) returning void",
        "declare p as pointer to member of class C of int",
    ] {
        assert_roundtrip("c++17", english);
    }
}

#[test]
fn gibberish_roundtrips() {
    for gibberish in &[
        "int x",
        "char *p",
        "int (*x)[10]",
        "int (*a[3])(char)",
        "char *f(int x, int y)",
        "unsigned long x",
        "struct S *s",
    ] {
        assert_roundtrip_gibberish("c17", gibberish);
    }
}

#[test]
fn east_const_equivalence() {
    // parsing east-const gibberish yields the same declaration
    utils::init();
    let mut s = session("c17");
    let west = run(&mut s, "explain const int x");
    let east = run(&mut s, "explain int const x");
    assert_eq!(west, east);

    let west = run(&mut s, "explain const size_t x");
    let east = run(&mut s, "explain size_t const x");
    assert_eq!(west, east);
}

#[test]
fn trigraph_output_reparses() {
    utils::init();
    let mut s = session("c89");
    run_ok(&mut s, "set trigraphs");
    let output = run(&mut s, "declare x as array 3 of int");
    assert!(output.contains("??("), "no trigraph in {:?}", output);
    let reparsed = run(
        &mut s,
        &format!("explain {}", output.trim_end().trim_end_matches(';')),
    );
    run_ok(&mut s, "set nographs");
    let plain = run(&mut s, "explain int x[3]");
    assert_eq!(reparsed, plain);
}

#[test]
fn digraph_output_reparses() {
    utils::init();
    let mut s = session("c99");
    run_ok(&mut s, "set digraphs");
    let output = run(&mut s, "declare x as array 3 of int");
    assert_eq!(output, "int x<:3:>;\n");
    let reparsed = run(
        &mut s,
        &format!("explain {}", output.trim_end().trim_end_matches(';')),
    );
    assert_eq!(reparsed, "declare x as array 3 of int\n");
}

#[test]
fn typedef_roundtrip_through_registry() {
    utils::init();
    let mut s = session("c17");
    match s.interpret("typedef unsigned long word").result {
        Ok(Reply::None) => {}
        other => panic!("typedef failed: {:?}", other),
    }
    assert_eq!(run(&mut s, "declare x as word"), "word x;\n");
    assert_eq!(
        run(&mut s, "explain word *p"),
        "declare p as pointer to word\n"
    );
}
