//! Recursive-descent parsing of command lines.
//!
//! Two grammars share one token cursor: the English command language
//! (`declare x as ...`) and C/C++ declarations (`explain int (*x)[10]`).
//! Both build their ASTs through the combinators in `ast::build`, so the
//! placeholder algebra is exercised from either direction.

mod command;
mod decl;
mod english;

pub use command::{CastKind, Command, SetArgs, ShowArgs, ShowWhat, TypedefFlavor};

use crate::ast::{Ast, ScopedName};
use crate::data::error::SyntaxError;
use crate::data::lex::{Keyword, Locatable, Location, Token};
use crate::intern::InternedStr;
use crate::lex;
use crate::types::TypeId;
use crate::Session;

pub type ParseResult<T> = Result<T, crate::data::CompileError>;

pub struct Parser<'s> {
    pub(crate) session: &'s Session,
    tokens: Vec<Locatable<Token>>,
    offset: usize,
    pub(crate) ast: Ast,
    end_loc: Location,
}

impl<'s> Parser<'s> {
    pub fn new(session: &'s Session, line: &str) -> ParseResult<Parser<'s>> {
        let tokens = lex::lex(line, session.opt.lang)?;
        let end_loc = tokens
            .last()
            .map(|t| Location {
                span: (t.location.span.end..t.location.span.end + 1).into(),
            })
            .unwrap_or_default();
        Ok(Parser {
            session,
            tokens,
            offset: 0,
            ast: Ast::new(),
            end_loc,
        })
    }

    /// Parses one whole command; trailing tokens are an error.
    pub fn command(mut self) -> ParseResult<Command> {
        let cmd = self.parse_command()?;
        // a trailing semicolon is always harmless
        self.match_next(&Token::Semicolon);
        if let Some(extra) = self.peek_locatable() {
            let extra = extra.clone();
            return Err(extra
                .location
                .error(SyntaxError::ExpectedToken(
                    "end of command".into(),
                    extra.data.to_string(),
                )));
        }
        Ok(cmd)
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.offset).map(|t| &t.data)
    }

    pub(crate) fn peek_locatable(&self) -> Option<&Locatable<Token>> {
        self.tokens.get(self.offset)
    }

    pub(crate) fn peek_at(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.offset + ahead).map(|t| &t.data)
    }

    pub(crate) fn next_token(&mut self) -> Option<Locatable<Token>> {
        let token = self.tokens.get(self.offset).cloned();
        if token.is_some() {
            self.offset += 1;
        }
        token
    }

    /// The location of the next token, or just past the end of the line.
    pub(crate) fn location(&self) -> Location {
        self.peek_locatable()
            .map(|t| t.location)
            .unwrap_or(self.end_loc)
    }

    pub(crate) fn match_next(&mut self, token: &Token) -> Option<Locatable<Token>> {
        if self.peek() == Some(token) {
            self.next_token()
        } else {
            None
        }
    }

    pub(crate) fn match_keyword(&mut self, kw: Keyword) -> Option<Location> {
        self.match_next(&Token::Keyword(kw)).map(|t| t.location)
    }

    pub(crate) fn expect(&mut self, token: Token) -> ParseResult<Locatable<Token>> {
        match self.peek() {
            Some(got) if *got == token => Ok(self.next_token().unwrap()),
            Some(got) => Err(self.location().error(SyntaxError::ExpectedToken(
                format!("\"{}\"", token),
                format!("\"{}\"", got),
            ))),
            None => Err(self.end_loc.error(SyntaxError::UnexpectedEof)),
        }
    }

    /// Consumes the next token if it is the given bare word.
    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if let Some(Token::Id(id)) = self.peek() {
            if id.eq_str(word) {
                self.offset += 1;
                return true;
            }
        }
        false
    }

    pub(crate) fn peek_is_word(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Id(id)) if id.eq_str(word))
    }

    pub(crate) fn expect_id(&mut self) -> ParseResult<Locatable<InternedStr>> {
        match self.peek() {
            Some(Token::Id(_)) => {
                let token = self.next_token().unwrap();
                match token.data {
                    Token::Id(id) => Ok(token.location.with(id)),
                    _ => unreachable!(),
                }
            }
            Some(got) => Err(self
                .location()
                .error(SyntaxError::ExpectedId(format!("\"{}\"", got)))),
            None => Err(self.end_loc.error(SyntaxError::UnexpectedEof)),
        }
    }

    /// Parses a possibly scoped name: `name (:: name)*`. Scope types are
    /// filled in later when the surrounding construct knows them.
    pub(crate) fn scoped_name(&mut self) -> ParseResult<Locatable<ScopedName>> {
        let first = self.expect_id()?;
        let mut sname = ScopedName::one(first.data);
        let mut location = first.location;
        while self.match_next(&Token::ColonColon).is_some() {
            let next = self.expect_id()?;
            location = location.merge(next.location);
            sname.push(TypeId::NONE, next.data);
        }
        // every segment but the last names a scope of some kind
        sname.set_scope_types(TypeId::NONE);
        Ok(location.with(sname))
    }

    pub(crate) fn at_end(&self) -> bool {
        self.offset >= self.tokens.len()
    }
}

/// The type bit a word would contribute if some dialect reserved it; lets an
/// out-of-dialect keyword report as a language-version error rather than an
/// unknown name.
pub(super) fn keyword_bit_elsewhere(word: &str) -> Option<TypeId> {
    use crate::lang::LangIds;
    for &probe in &[LangIds::C_23, LangIds::CPP_23, LangIds::C_11, LangIds::CPP_11] {
        if let Some(kw) = Keyword::from_str(word, probe) {
            if let Some(bit) = kw.type_id(probe) {
                return Some(bit);
            }
        }
    }
    None
}
