//! The line lexer.
//!
//! Input arrives one command line at a time. Keywords are dialect-sensitive
//! (`bool` is an identifier in C89), so the lexer carries the active
//! language. Digraphs and trigraphs are folded into their plain tokens here;
//! emitting them again is the gibberish printer's job.

use log::trace;

use crate::data::error::SyntaxError;
use crate::data::lex::{Keyword, Locatable, Location, Span, Token};
use crate::intern::InternedStr;
use crate::lang::LangIds;

pub struct Lexer {
    chars: Vec<char>,
    offset: usize,
    lang: LangIds,
}

type LexResult<T> = Result<T, Locatable<SyntaxError>>;

/// Tokenizes a whole line up front; commands are short enough that there is
/// nothing to gain from streaming.
pub fn lex(line: &str, lang: LangIds) -> LexResult<Vec<Locatable<Token>>> {
    Lexer::new(line, lang).run()
}

impl Lexer {
    fn new(line: &str, lang: LangIds) -> Lexer {
        Lexer {
            chars: line.chars().collect(),
            offset: 0,
            lang,
        }
    }

    fn loc_from(&self, start: usize) -> Location {
        Location {
            span: Span {
                start: start as u32,
                end: self.offset as u32,
            },
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.offset + ahead).copied()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.offset += 1;
        }
        c
    }

    /// Folds a trigraph at the current position, if there is one. `??` that
    /// starts no trigraph is left alone.
    fn fold_trigraph(&mut self) -> Option<char> {
        if self.peek() != Some('?') || self.peek_at(1) != Some('?') {
            return None;
        }
        let mapped = match self.peek_at(2) {
            Some('(') => '[',
            Some(')') => ']',
            Some('<') => '{',
            Some('>') => '}',
            Some('=') => '#',
            Some('/') => '\\',
            Some('\'') => '^',
            Some('!') => '|',
            Some('-') => '~',
            _ => return None,
        };
        self.offset += 3;
        Some(mapped)
    }

    fn run(mut self) -> LexResult<Vec<Locatable<Token>>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.offset += 1;
                continue;
            }
            let start = self.offset;
            let token = if let Some(folded) = self.fold_trigraph() {
                self.punct(folded, start)?
            } else {
                let c = self.next_char().unwrap();
                match c {
                    'a'..='z' | 'A'..='Z' | '_' => self.word(start),
                    '0'..='9' => self.number(start)?,
                    _ => self.punct(c, start)?,
                }
            };
            trace!("lexed {:?}", token);
            tokens.push(self.loc_from(start).with(token));
        }
        Ok(tokens)
    }

    fn word(&mut self, start: usize) -> Token {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                    self.offset += 1;
                }
                // hyphenated English words: non-member, user-defined
                Some('-') if self.peek_at(1).map_or(false, |c| c.is_ascii_alphabetic()) => {
                    self.offset += 1;
                }
                // language names: c++, c++17
                Some('+') if self.peek_at(1) == Some('+') => {
                    self.offset += 2;
                }
                _ => break,
            }
        }
        let word: String = self.chars[start..self.offset].iter().collect();
        match Keyword::from_str(&word, self.lang) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Id(InternedStr::get_or_intern(word)),
        }
    }

    fn number(&mut self, start: usize) -> LexResult<Token> {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.offset += 1;
        }
        let text: String = self.chars[start..self.offset].iter().collect();
        text.parse::<u32>()
            .map(Token::Number)
            .map_err(|_| self.loc_from(start).with(SyntaxError::BadNumber))
    }

    fn punct(&mut self, c: char, start: usize) -> LexResult<Token> {
        let token = match c {
            '*' => Token::Star,
            '&' => {
                if self.peek() == Some('&') {
                    self.offset += 1;
                    Token::LogicalAnd
                } else {
                    Token::Ampersand
                }
            }
            '^' => Token::Caret,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '=' => Token::Equal,
            '~' => Token::Tilde,
            '?' => Token::Question,
            ':' => match self.peek() {
                Some(':') => {
                    self.offset += 1;
                    Token::ColonColon
                }
                // digraph for ]
                Some('>') => {
                    self.offset += 1;
                    Token::RightBracket
                }
                _ => Token::Colon,
            },
            '<' => match self.peek() {
                // digraphs for [ and {
                Some(':') => {
                    self.offset += 1;
                    Token::LeftBracket
                }
                Some('%') => {
                    self.offset += 1;
                    Token::LeftBrace
                }
                _ => Token::Less,
            },
            '%' => match self.peek() {
                // digraph for }
                Some('>') => {
                    self.offset += 1;
                    Token::RightBrace
                }
                _ => Token::Percent,
            },
            '-' => match self.peek() {
                Some('>') => {
                    self.offset += 1;
                    Token::Arrow
                }
                _ => Token::Minus,
            },
            '+' => Token::Plus,
            '/' => Token::Slash,
            '>' => Token::Greater,
            '!' => Token::Bang,
            '.' => {
                if self.peek() == Some('.') && self.peek_at(1) == Some('.') {
                    self.offset += 2;
                    Token::Ellipsis
                } else {
                    return Err(self
                        .loc_from(start)
                        .with(SyntaxError::UnexpectedChar(c)));
                }
            }
            _ => {
                return Err(self
                    .loc_from(start)
                    .with(SyntaxError::UnexpectedChar(c)))
            }
        };
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str, lang: LangIds) -> Vec<Token> {
        lex(line, lang)
            .unwrap()
            .into_iter()
            .map(|t| t.data)
            .collect()
    }

    #[test]
    fn declaration_tokens() {
        let tokens = kinds("int (*x)[10]", LangIds::C_17);
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Int),
                Token::LeftParen,
                Token::Star,
                Token::Id("x".into()),
                Token::RightParen,
                Token::LeftBracket,
                Token::Number(10),
                Token::RightBracket,
            ]
        );
    }

    #[test]
    fn keywords_depend_on_dialect() {
        assert_eq!(
            kinds("bool", LangIds::C_89),
            vec![Token::Id("bool".into())]
        );
        assert_eq!(
            kinds("bool", LangIds::CPP_17),
            vec![Token::Keyword(Keyword::Bool)]
        );
        assert_eq!(
            kinds("class", LangIds::C_99),
            vec![Token::Id("class".into())]
        );
    }

    #[test]
    fn digraphs_and_trigraphs_fold() {
        assert_eq!(
            kinds("int x<:3:>", LangIds::C_99),
            kinds("int x[3]", LangIds::C_99)
        );
        assert_eq!(
            kinds("int x??(3??)", LangIds::C_89),
            kinds("int x[3]", LangIds::C_89)
        );
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        let tokens = kinds("east-const", LangIds::C_17);
        assert_eq!(tokens, vec![Token::Id("east-const".into())]);
        let tokens = kinds("c++17", LangIds::C_17);
        assert_eq!(tokens, vec![Token::Id("c++17".into())]);
    }

    #[test]
    fn scope_and_ellipsis() {
        let tokens = kinds("std::string, ...", LangIds::CPP_17);
        assert_eq!(
            tokens,
            vec![
                Token::Id("std".into()),
                Token::ColonColon,
                Token::Id("string".into()),
                Token::Comma,
                Token::Ellipsis,
            ]
        );
    }
}
