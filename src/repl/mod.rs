//! The interactive loop.

mod helper;

use std::path::PathBuf;

use dirs_next::data_dir;
use rustyline::{error::ReadlineError, Cmd, CompletionType, Config, EditMode, Editor, KeyPress};

use crate::{sysexits, Opt, Reply, Session};
use helper::ReplHelper;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "seaspeak> ";

pub struct Repl {
    editor: Editor<ReplHelper>,
    session: Session,
}

impl Repl {
    pub fn new(opt: Opt) -> Self {
        let config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(1000)
            .build();
        let mut editor = Editor::with_config(config);

        let session = Session::new(opt);
        let helper = ReplHelper::new(helper::completion_words(&session));
        editor.set_helper(Some(helper));

        editor.bind_sequence(KeyPress::Up, Cmd::LineUpOrPreviousHistory(1));
        editor.bind_sequence(KeyPress::Down, Cmd::LineDownOrNextHistory(1));
        editor.bind_sequence(KeyPress::Tab, Cmd::Complete);

        Self { editor, session }
    }

    pub fn run(&mut self) -> rustyline::Result<i32> {
        self.load_history();

        println!("seaspeak {}", VERSION);
        println!("Type \"help\" for help.");
        let code = loop {
            let line = self.editor.readline(PROMPT);
            match line {
                Ok(line) => {
                    if !self.process_line(line) {
                        break sysexits::EX_OK;
                    }
                }
                // Ctrl + c aborts the current line.
                Err(ReadlineError::Interrupted) => continue,
                // Ctrl + d exits the repl.
                Err(ReadlineError::Eof) => break sysexits::EX_OK,
                Err(err) => {
                    self.save_history();
                    return Err(err);
                }
            }
        };
        self.save_history();
        Ok(code)
    }

    /// Returns false when the session should end.
    fn process_line(&mut self, line: String) -> bool {
        self.editor.add_history_entry(line.clone());

        let outcome = self.session.interpret(&line);
        for warning in &outcome.warnings {
            eprintln!("warning: {}", warning.data);
        }
        match outcome.result {
            Ok(Reply::Output(text)) => print!("{}", text),
            Ok(Reply::None) => {}
            Ok(Reply::Quit) => return false,
            Err(errors) => {
                for error in &errors {
                    eprint!("{}", crate::render_caret(&line, error));
                    eprintln!("error: {}", error.data);
                }
            }
        }
        // the known-name set may have grown
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_words(helper::completion_words(&self.session));
        }
        true
    }

    fn save_history(&self) -> Option<()> {
        let path = Self::history_path()?;
        self.editor.save_history(&path).ok()
    }

    fn load_history(&mut self) -> Option<()> {
        let path = Self::history_path()?;
        self.editor.load_history(&path).ok()
    }

    fn history_path() -> Option<PathBuf> {
        let mut history = data_dir()?;
        history.push("seaspeak_history");
        Some(history)
    }
}
