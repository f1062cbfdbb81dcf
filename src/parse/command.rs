//! The command surface: dispatch plus the small grammars for `cast`,
//! `define`, `show`, and `set`.

use super::{Parser, ParseResult};
use crate::ast::{build, Ast, Kind, NodeId, ScopedName};
use crate::data::error::SyntaxError;
use crate::data::lex::{Keyword, Token};
use crate::lang::LangIds;
use crate::lookup;
use crate::types::TypeId;
use crate::Graphs;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastKind {
    /// A plain C-style cast.
    C,
    Const,
    Dynamic,
    Reinterpret,
    Static,
}

impl CastKind {
    pub fn gibberish(self) -> &'static str {
        match self {
            CastKind::C => "",
            CastKind::Const => "const_cast",
            CastKind::Dynamic => "dynamic_cast",
            CastKind::Reinterpret => "reinterpret_cast",
            CastKind::Static => "static_cast",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypedefFlavor {
    Typedef,
    Using,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShowWhat {
    Name(ScopedName),
    All,
    Predefined,
    User,
}

#[derive(Clone, Debug)]
pub struct ShowArgs {
    pub what: ShowWhat,
    pub flavor: Option<TypedefFlavor>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SetArgs {
    Lang(LangIds),
    AltTokens(bool),
    EastConst(bool),
    Graphs(Graphs),
    Semicolon(bool),
    UsingDecls(bool),
    ExplicitInt(TypeId),
    List,
}

#[derive(Debug)]
pub enum Command {
    Declare {
        ast: Ast,
        root: NodeId,
    },
    Cast {
        kind: CastKind,
        name: Option<ScopedName>,
        ast: Ast,
        root: NodeId,
    },
    /// `define <name> as <english>` and `typedef`/`using` gibberish all end
    /// up here: a new registry entry.
    Define {
        name: ScopedName,
        ast: Ast,
        root: NodeId,
    },
    Explain {
        ast: Ast,
        root: NodeId,
    },
    Show(ShowArgs),
    Set(SetArgs),
    Help,
    Quit,
}

const COMMAND_WORDS: &[&str] = &[
    "declare", "explain", "cast", "define", "typedef", "using", "show", "set", "help", "exit",
    "quit",
];

impl<'s> Parser<'s> {
    pub(super) fn parse_command(&mut self) -> ParseResult<Command> {
        match self.peek() {
            Some(Token::Question) => {
                self.next_token();
                Ok(Command::Help)
            }
            Some(Token::Keyword(Keyword::Typedef)) => {
                self.next_token();
                self.typedef_command(TypedefFlavor::Typedef)
            }
            Some(Token::Keyword(Keyword::Using)) => {
                self.next_token();
                self.using_command()
            }
            Some(Token::Keyword(Keyword::Const)) => self.named_cast(CastKind::Const),
            Some(Token::Keyword(Keyword::Static)) => self.named_cast(CastKind::Static),
            Some(Token::Id(id)) => {
                let word = id.resolve();
                match word.as_str() {
                    "declare" => {
                        self.next_token();
                        self.declare_command()
                    }
                    "explain" => {
                        self.next_token();
                        self.explain_command()
                    }
                    "cast" => {
                        self.next_token();
                        self.cast_command(CastKind::C)
                    }
                    "dynamic" => self.named_cast(CastKind::Dynamic),
                    "reinterpret" => self.named_cast(CastKind::Reinterpret),
                    "define" => {
                        self.next_token();
                        self.define_command()
                    }
                    "show" => {
                        self.next_token();
                        self.show_command()
                    }
                    "set" => {
                        self.next_token();
                        self.set_command()
                    }
                    "help" => {
                        self.next_token();
                        Ok(Command::Help)
                    }
                    "exit" | "quit" | "q" => {
                        self.next_token();
                        Ok(Command::Quit)
                    }
                    _ => {
                        let location = self.location();
                        Err(location.error(SyntaxError::UnknownCommand {
                            suggestions: lookup::suggest(
                                &word,
                                COMMAND_WORDS.iter().map(|s| s.to_string()),
                            ),
                            name: word,
                        }))
                    }
                }
            }
            Some(got) => {
                let got = got.to_string();
                Err(self
                    .location()
                    .error(SyntaxError::ExpectedToken("a command".into(), got)))
            }
            None => Err(self.location().error(SyntaxError::UnexpectedEof)),
        }
    }

    /// `declare <name> as <english>` or
    /// `declare operator <symbols> as <english>`.
    fn declare_command(&mut self) -> ParseResult<Command> {
        if self.match_keyword(Keyword::Operator).is_some() {
            let oper = self.operator_symbols("as")?;
            self.expect_word("as")?;
            let root = self.english_type()?;
            let root = self.into_operator(root, oper)?;
            let ast = std::mem::take(&mut self.ast);
            return Ok(Command::Declare { ast, root });
        }
        let name = self.scoped_name()?;
        self.expect_word("as")?;
        let root = self.english_type()?;
        self.ast.node_mut(root).sname = name.data;
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Declare { ast, root })
    }

    /// `explain <gibberish>`.
    fn explain_command(&mut self) -> ParseResult<Command> {
        let root = self.declaration()?;
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Explain { ast, root })
    }

    fn named_cast(&mut self, kind: CastKind) -> ParseResult<Command> {
        let location = self.location();
        self.next_token();
        if !self.eat_word("cast") {
            // `const` or `static` that doesn't begin a cast isn't a command
            return Err(location.error(SyntaxError::ExpectedToken(
                "\"cast\"".into(),
                "a declaration".into(),
            )));
        }
        self.cast_command(kind)
    }

    /// `cast [<name>] into <english>`.
    fn cast_command(&mut self, kind: CastKind) -> ParseResult<Command> {
        let name = if self.peek_is_word("into") {
            None
        } else {
            Some(self.scoped_name()?.data)
        };
        self.expect_word("into")?;
        let root = self.english_type()?;
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Cast {
            kind,
            name,
            ast,
            root,
        })
    }

    /// `define <name> as <english>`.
    fn define_command(&mut self) -> ParseResult<Command> {
        let name = self.scoped_name()?;
        self.expect_word("as")?;
        // `define x as type y` reads naturally; the word is optional
        self.eat_word("type");
        let root = self.english_type()?;
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Define {
            name: name.data,
            ast,
            root,
        })
    }

    /// `typedef <gibberish>`: the declared name inside the declarator is the
    /// typedef's name.
    fn typedef_command(&mut self, _flavor: TypedefFlavor) -> ParseResult<Command> {
        let location = self.location();
        let root = self.declaration()?;
        let name = build::take_name(&mut self.ast, root);
        if name.is_empty() {
            return Err(location.error(SyntaxError::ExpectedId("an unnamed type".into())));
        }
        // the `typedef` storage itself doesn't belong in the stored type
        build::take_type_any(&mut self.ast, root, TypeId::TYPEDEF);
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Define { name, ast, root })
    }

    /// `using <name> = <gibberish>`.
    fn using_command(&mut self) -> ParseResult<Command> {
        let name = self.scoped_name()?;
        self.expect(Token::Equal)?;
        let root = self.declaration()?;
        let ast = std::mem::take(&mut self.ast);
        Ok(Command::Define {
            name: name.data,
            ast,
            root,
        })
    }

    /// `show <name>|all|predefined|user [as typedef|using]`.
    fn show_command(&mut self) -> ParseResult<Command> {
        let what = if self.eat_word("all") {
            ShowWhat::All
        } else if self.eat_word("predefined") {
            ShowWhat::Predefined
        } else if self.eat_word("user") {
            ShowWhat::User
        } else {
            ShowWhat::Name(self.scoped_name()?.data)
        };
        let flavor = if self.eat_word("as") || !self.at_end() {
            if self.match_keyword(Keyword::Typedef).is_some() || self.eat_word("typedef") {
                Some(TypedefFlavor::Typedef)
            } else if self.match_keyword(Keyword::Using).is_some() || self.eat_word("using") {
                Some(TypedefFlavor::Using)
            } else {
                None
            }
        } else {
            None
        };
        Ok(Command::Show(ShowArgs { what, flavor }))
    }

    /// `set` alone lists the current options.
    fn set_command(&mut self) -> ParseResult<Command> {
        if self.at_end() {
            return Ok(Command::Set(SetArgs::List));
        }
        let location = self.location();
        // `using` is a keyword in C++ dialects
        if self.match_keyword(Keyword::Using).is_some() {
            return Ok(Command::Set(SetArgs::UsingDecls(true)));
        }
        let word = match self.next_token().map(|t| t.data) {
            Some(Token::Id(id)) => id.resolve(),
            Some(other) => {
                return Err(location.error(SyntaxError::ExpectedId(format!("\"{}\"", other))))
            }
            None => return Err(location.error(SyntaxError::UnexpectedEof)),
        };
        if let Some(lang) = LangIds::find(&word) {
            return Ok(Command::Set(SetArgs::Lang(lang)));
        }
        let args = match word.as_str() {
            "options" => SetArgs::List,
            "alt-tokens" => SetArgs::AltTokens(true),
            "noalt-tokens" => SetArgs::AltTokens(false),
            "east-const" => SetArgs::EastConst(true),
            "noeast-const" => SetArgs::EastConst(false),
            "digraphs" => SetArgs::Graphs(Graphs::Di),
            "trigraphs" => SetArgs::Graphs(Graphs::Tri),
            "nographs" => SetArgs::Graphs(Graphs::None),
            "semicolon" => SetArgs::Semicolon(true),
            "nosemicolon" => SetArgs::Semicolon(false),
            "using" => SetArgs::UsingDecls(true),
            "nousing" => SetArgs::UsingDecls(false),
            "noexplicit-int" => SetArgs::ExplicitInt(TypeId::NONE),
            "explicit-int" => {
                self.expect(Token::Equal)?;
                let value = self.expect_id()?;
                let mut mask = TypeId::NONE;
                for c in value.data.resolve().chars() {
                    match c {
                        'i' | 's' => mask |= TypeId::SIGNED,
                        'u' => mask |= TypeId::UNSIGNED,
                        _ => {
                            return Err(value.location.error(SyntaxError::ExpectedToken(
                                "\"i\", \"s\", or \"u\"".into(),
                                format!("'{}'", c),
                            )))
                        }
                    }
                }
                SetArgs::ExplicitInt(mask)
            }
            _ => {
                let mut candidates: Vec<String> = [
                    "options",
                    "alt-tokens",
                    "east-const",
                    "digraphs",
                    "trigraphs",
                    "nographs",
                    "semicolon",
                    "using",
                    "explicit-int",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect();
                candidates.extend(LangIds::all_names().iter().map(|s| s.to_string()));
                return Err(location.error(SyntaxError::UnknownOption {
                    suggestions: lookup::suggest(&word, candidates),
                    name: word,
                }));
            }
        };
        Ok(Command::Set(args))
    }

    pub(super) fn expect_word(&mut self, word: &str) -> ParseResult<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            let got = self
                .peek()
                .map(|t| format!("\"{}\"", t))
                .unwrap_or_else(|| "end of command".into());
            Err(self
                .location()
                .error(SyntaxError::ExpectedToken(format!("\"{}\"", word), got)))
        }
    }

    /// Collects the tokens spelling an overloaded operator (`<`, `[]`, `+`,
    /// ...) up to the given stop word or a `(`.
    pub(super) fn operator_symbols(&mut self, stop_word: &str) -> ParseResult<String> {
        let mut spelling = String::new();
        loop {
            match self.peek() {
                None => break,
                Some(Token::LeftParen) => break,
                Some(Token::Id(id)) if id.eq_str(stop_word) => break,
                Some(_) => {
                    let token = self.next_token().unwrap();
                    spelling.push_str(&token.data.to_string());
                }
            }
        }
        if spelling.is_empty() {
            return Err(self
                .location()
                .error(SyntaxError::ExpectedId("an operator".into())));
        }
        Ok(spelling)
    }

    /// Rebuilds a `function` node parsed by the English grammar as an
    /// `operator` node.
    pub(super) fn into_operator(&mut self, root: NodeId, oper: String) -> ParseResult<NodeId> {
        let location = self.ast.node(root).loc;
        let kind = &mut self.ast.node_mut(root).kind;
        if let Kind::Function { params, ret } = kind {
            let (params, ret) = (std::mem::take(params), ret.take());
            *kind = Kind::Operator {
                oper: oper.into(),
                params,
                ret,
            };
            Ok(root)
        } else {
            Err(location.error(SyntaxError::ExpectedToken(
                "a function type for the operator".into(),
                "another kind of type".into(),
            )))
        }
    }
}
