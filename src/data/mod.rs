pub mod error;
pub mod lex;

pub use crate::intern::InternedStr;
pub use error::{
    CompileError, CompileResult, CompileWarning, Error, ErrorHandler, SemanticError, SyntaxError,
    Warning,
};
pub use lex::{Keyword, Locatable, Location, Span, Token};

// helper functions for `Display` impls
pub(crate) fn joined<I: IntoIterator<Item = T>, T: ToString>(it: I, delim: &str) -> String {
    it.into_iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(delim)
}
