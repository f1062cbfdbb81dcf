#![allow(dead_code)]

use seaspeak::{LangIds, Opt, Outcome, Reply, Session};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn session(lang: &str) -> Session {
    let mut opt = Opt::default();
    opt.lang = LangIds::find(lang).unwrap_or_else(|| panic!("unknown dialect '{}'", lang));
    Session::new(opt)
}

pub fn run(session: &mut Session, line: &str) -> String {
    match session.interpret(line).result {
        Ok(Reply::Output(text)) => text,
        Ok(other) => panic!("'{}' produced no output: {:?}", line, other),
        Err(errors) => panic!("'{}' unexpectedly failed: {:?}", line, errors),
    }
}

pub fn run_ok(session: &mut Session, line: &str) {
    if let Err(errors) = session.interpret(line).result {
        panic!("'{}' unexpectedly failed: {:?}", line, errors);
    }
}

pub fn run_errors(session: &mut Session, line: &str) -> Vec<String> {
    match session.interpret(line).result {
        Ok(reply) => panic!("'{}' unexpectedly succeeded: {:?}", line, reply),
        Err(errors) => errors.iter().map(|e| e.data.to_string()).collect(),
    }
}

pub fn run_warnings(session: &mut Session, line: &str) -> (Outcome, Vec<String>) {
    let outcome = session.interpret(line);
    let warnings = outcome
        .warnings
        .iter()
        .map(|w| w.data.to_string())
        .collect();
    (outcome, warnings)
}

/// Asserts one command in one dialect produces exactly `expected`.
pub fn assert_translates(lang: &str, input: &str, expected: &str) {
    init();
    let mut session = session(lang);
    assert_eq!(run(&mut session, input), expected, "input: {}", input);
}

/// Asserts one command fails with a message containing `fragment`.
pub fn assert_error_contains(lang: &str, input: &str, fragment: &str) {
    init();
    let mut session = session(lang);
    let errors = run_errors(&mut session, input);
    assert!(
        errors.iter().any(|e| e.contains(fragment)),
        "input: {}\nexpected a message containing {:?}, got {:?}",
        input,
        fragment,
        errors
    );
}
