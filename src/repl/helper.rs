use std::borrow::Cow;

use owo_colors::OwoColorize;
use rustyline::{
    completion::{extract_word, Candidate, Completer},
    highlight::{Highlighter, MatchingBracketHighlighter},
    hint::Hinter,
    validate::Validator,
    Context,
};
use rustyline_derive::Helper;

use crate::data::lex::Keyword;
use crate::Session;

const COMMANDS: &[&str] = &[
    "declare", "explain", "cast", "define", "typedef", "using", "show", "set", "help", "exit",
    "quit",
];

const ENGLISH_WORDS: &[&str] = &[
    "array",
    "as",
    "block",
    "constructor",
    "destructor",
    "function",
    "into",
    "lambda",
    "member",
    "non-member",
    "of",
    "pointer",
    "reference",
    "returning",
    "rvalue",
    "to",
    "user-defined",
    "variable",
];

/// Everything completable right now: commands, English glue, keywords, and
/// the currently known type names.
pub(super) fn completion_words(session: &Session) -> Vec<String> {
    let mut words: Vec<String> = COMMANDS
        .iter()
        .chain(ENGLISH_WORDS)
        .chain(Keyword::all_spellings())
        .map(|s| s.to_string())
        .collect();
    words.extend(session.typedefs.names());
    words.sort();
    words.dedup();
    words
}

#[derive(Helper)]
pub(super) struct ReplHelper {
    highlighter: MatchingBracketHighlighter,
    words: Vec<String>,
}

impl ReplHelper {
    pub(super) fn new(words: Vec<String>) -> Self {
        Self {
            words,
            highlighter: Default::default(),
        }
    }

    pub(super) fn set_words(&mut self, words: Vec<String>) {
        self.words = words;
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

impl Validator for ReplHelper {}

impl Hinter for ReplHelper {
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() || line.contains(' ') {
            return None;
        }
        // hint only the leading command word
        self.words
            .iter()
            .filter(|w| COMMANDS.contains(&w.as_str()))
            .find(|cmd| cmd.starts_with(line))
            .map(|hint| String::from(&hint[line.len()..]))
    }
}

/// Wrapper around a completion string.
pub(super) struct CompletionCandidate {
    display: String,
}

impl Candidate for CompletionCandidate {
    fn display(&self) -> &str {
        &self.display
    }

    fn replacement(&self) -> &str {
        &self.display
    }
}

impl Completer for ReplHelper {
    type Candidate = CompletionCandidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (idx, word) = extract_word(line, pos, None, &[]);
        if word.is_empty() {
            return Ok((idx, vec![]));
        }
        let matches = self
            .words
            .iter()
            .filter(|w| w.starts_with(word))
            .map(|w| CompletionCandidate {
                display: w.clone(),
            })
            .collect();
        Ok((idx, matches))
    }
}
