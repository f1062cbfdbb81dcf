use std::io::{self, BufRead, Write};
use std::process;

use seaspeak::{sysexits, Opt, Reply, Session};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opt = Opt::default();

    // `seaspeak declare x as pointer to int` runs one command and exits
    if !args.is_empty() {
        let line = args.join(" ");
        let mut session = Session::new(opt);
        process::exit(run_line(&mut session, &line).unwrap_or(sysexits::EX_DATAERR));
    }

    let code = if atty::is(atty::Stream::Stdin) {
        match seaspeak::repl::Repl::new(opt).run() {
            Ok(code) => code,
            Err(err) => {
                eprintln!("seaspeak: {}", err);
                sysexits::EX_SOFTWARE
            }
        }
    } else {
        // piped input: one command per line, keep going on errors
        let mut session = Session::new(opt);
        let stdin = io::stdin();
        let mut worst = sysexits::EX_OK;
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("seaspeak: {}", err);
                    process::exit(sysexits::EX_SOFTWARE);
                }
            };
            match run_line(&mut session, &line) {
                Some(sysexits::EX_OK) | None => {}
                Some(code) => worst = code,
            }
        }
        worst
    };
    process::exit(code);
}

/// Runs one command; returns its exit code, or `None` on `quit`.
fn run_line(session: &mut Session, line: &str) -> Option<i32> {
    let outcome = session.interpret(line);
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning.data);
    }
    match outcome.result {
        Ok(Reply::Output(text)) => {
            print!("{}", text);
            io::stdout().flush().ok();
            Some(sysexits::EX_OK)
        }
        Ok(Reply::None) => Some(sysexits::EX_OK),
        Ok(Reply::Quit) => None,
        Err(errors) => {
            for error in &errors {
                eprintln!("error: {}", error.data);
            }
            Some(sysexits::EX_DATAERR)
        }
    }
}
