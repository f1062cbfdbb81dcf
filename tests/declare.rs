mod utils;

use utils::{assert_translates, run, session};

#[test]
fn pointer_to_array_of_const() {
    assert_translates(
        "c17",
        "declare x as pointer to array 10 of const int",
        "int const (*x)[10];\n",
    );
}

#[test]
fn function_returning_pointer() {
    assert_translates(
        "c17",
        "declare f as function (x as int, y as int) returning pointer to char",
        "char *f(int x, int y);\n",
    );
}

#[test]
fn pointer_to_member_function() {
    assert_translates(
        "c++17",
        "declare p as pointer to member of class C of function (int) returning void",
        "void (C::*p)(int);\n",
    );
}

#[test]
fn array_of_pointer_to_function() {
    assert_translates(
        "c17",
        "declare a as array 3 of pointer to function (char) returning int",
        "int (*a[3])(char);\n",
    );
}

#[test]
fn simple_declarations() {
    assert_translates("c17", "declare x as int", "int x;\n");
    assert_translates("c17", "declare p as pointer to void", "void *p;\n");
    assert_translates(
        "c17",
        "declare p as pointer to pointer to char",
        "char **p;\n",
    );
    assert_translates("c17", "declare s as struct S", "struct S s;\n");
    assert_translates(
        "c17",
        "declare x as unsigned long long int",
        "unsigned long long int x;\n",
    );
}

#[test]
fn qualified_pointers() {
    assert_translates(
        "c17",
        "declare p as const pointer to char",
        "char *const p;\n",
    );
    assert_translates(
        "c17",
        "declare p as pointer to const char",
        "char const *p;\n",
    );
}

#[test]
fn references() {
    assert_translates("c++17", "declare r as reference to int", "int &r;\n");
    assert_translates(
        "c++17",
        "declare r as rvalue reference to int",
        "int &&r;\n",
    );
}

#[test]
fn block_declarations() {
    assert_translates(
        "c17",
        "declare b as block (int) returning void",
        "void (^b)(int);\n",
    );
}

#[test]
fn storage_classes() {
    assert_translates("c17", "declare x as static int", "static int x;\n");
    assert_translates(
        "c17",
        "declare f as static function returning pointer to char",
        "static char *f();\n",
    );
}

#[test]
fn variadic_parameters() {
    assert_translates(
        "c17",
        "declare f as function (x as int, ...) returning int",
        "int f(int x, ...);\n",
    );
    // C++ allows a lone "..."
    assert_translates(
        "c++17",
        "declare f as function (...) returning int",
        "int f(...);\n",
    );
}

#[test]
fn function_tail_qualifiers() {
    assert_translates(
        "c++17",
        "declare f as pointer to member of class C of const member function (int) returning int",
        "int (C::*f)(int) const;\n",
    );
}

#[test]
fn constructors_and_destructors() {
    assert_translates("c++17", "declare C::C as constructor (x as int)", "C::C(int x);\n");
    assert_translates("c++17", "declare C::C as destructor", "C::~C();\n");
}

#[test]
fn overloaded_operator() {
    assert_translates(
        "c++17",
        "declare operator < as function (i as int, j as int) returning bool",
        "bool operator<(int i, int j);\n",
    );
}

#[test]
fn casts() {
    // casts keep the operator adjacent to the type
    assert_translates("c17", "cast p into pointer to int", "(int*)p\n");
    assert_translates(
        "c++17",
        "static cast p into pointer to int",
        "static_cast<int*>(p)\n",
    );
    assert_translates(
        "c17",
        "cast a into pointer to array 10 of int",
        "(int(*)[10])a\n",
    );
}

#[test]
fn no_semicolon_mode() {
    utils::init();
    let mut s = session("c17");
    utils::run_ok(&mut s, "set nosemicolon");
    assert_eq!(run(&mut s, "declare x as int"), "int x\n");
}

#[test]
fn scoped_names() {
    assert_translates(
        "c++17",
        "declare std::x as pointer to int",
        "int *std::x;\n",
    );
}
