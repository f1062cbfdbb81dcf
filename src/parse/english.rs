//! The English half of the grammar: `pointer to array 10 of const int`.
//!
//! English reads outside-in, which matches the AST exactly, so nodes nest
//! directly and the placeholder machinery is only needed on the gibberish
//! side. Modifier words collect into a `TypeId` first and land on whichever
//! node the following kind-phrase creates.

use super::{Parser, ParseResult};
use crate::data::lex::Location;
use crate::ast::{build, ArraySize, Kind, NodeId};
use crate::data::error::SyntaxError;
use crate::data::lex::{Keyword, Token};
use crate::lookup;
use crate::types::TypeId;

/// Words that begin a kind-phrase rather than name a type.
const KIND_WORDS: &[&str] = &[
    "array",
    "variable",
    "pointer",
    "reference",
    "rvalue",
    "function",
    "block",
    "lambda",
    "constructor",
    "destructor",
    "user-defined",
];

impl<'s> Parser<'s> {
    /// ```text
    /// english_type
    /// : modifier* kind_phrase
    /// ;
    /// ```
    pub(super) fn english_type(&mut self) -> ParseResult<NodeId> {
        let location = self.location();
        let mods = self.english_modifiers()?;
        self.kind_phrase(mods, location)
    }

    /// Storage classes, qualifiers, and attributes, in keyword or English
    /// alias spelling.
    fn english_modifiers(&mut self) -> ParseResult<TypeId> {
        let mut mods = TypeId::NONE;
        loop {
            let location = self.location();
            let bit = match self.peek() {
                Some(Token::Keyword(kw)) => {
                    match kw.type_id(self.session.opt.lang) {
                        // base types end the modifier run
                        Some(id) if id.base().is_empty() => {
                            self.next_token();
                            id
                        }
                        _ => break,
                    }
                }
                Some(Token::Id(id)) => {
                    let word = id.resolve();
                    let bit = match word.as_str() {
                        "atomic" => TypeId::ATOMIC,
                        "noreturn" | "non-returning" => TypeId::NORETURN,
                        "deprecated" => TypeId::DEPRECATED,
                        "nodiscard" => TypeId::NODISCARD,
                        "maybe-unused" => TypeId::MAYBE_UNUSED,
                        "carries-dependency" => TypeId::CARRIES_DEPENDENCY,
                        "defaulted" => TypeId::DEFAULT,
                        "deleted" => TypeId::DELETE,
                        "non-throwing" => {
                            if crate::lang::cpp_min(crate::lang::LangIds::CPP_11)
                                .contains(self.session.opt.lang)
                            {
                                TypeId::NOEXCEPT
                            } else {
                                TypeId::THROW
                            }
                        }
                        // "pure virtual" is one notion, `= 0`
                        "pure" => {
                            self.next_token();
                            self.match_keyword(Keyword::Virtual);
                            mods.add(TypeId::PURE_VIRTUAL, location)?;
                            continue;
                        }
                        // member-ness reads naturally but adds no bits
                        "member" | "non-member" => {
                            self.next_token();
                            continue;
                        }
                        _ => break,
                    };
                    self.next_token();
                    bit
                }
                _ => break,
            };
            mods.add(bit, location)?;
        }
        Ok(mods)
    }

    fn kind_phrase(&mut self, mods: TypeId, location: Location) -> ParseResult<NodeId> {
        if self.eat_word("variable") {
            self.eat_word("length");
            self.expect_word("array")?;
            return self.array_phrase(mods, location, Some(ArraySize::Variable));
        }
        if self.eat_word("array") {
            return self.array_phrase(mods, location, None);
        }
        if self.eat_word("pointer") {
            self.expect_word("to")?;
            if self.eat_word("member") {
                self.expect_word("of")?;
                // `class` is an identifier in C dialects
                if self.match_keyword(Keyword::Class).is_none()
                    && self.match_keyword(Keyword::Struct).is_none()
                {
                    self.expect_word("class")?;
                }
                let class_sname = {
                    let mut sname = self.scoped_name()?.data;
                    sname.set_scope_types(TypeId::CLASS);
                    sname
                };
                self.eat_word("of");
                let of = self.english_type()?;
                let node = self.ast.new_node(
                    Kind::PointerToMember {
                        class_sname,
                        of: None,
                    },
                    mods,
                    location,
                );
                self.ast.set_chain_child(node, of);
                return Ok(node);
            }
            let to = self.english_type()?;
            let node = self.ast.new_node(Kind::Pointer { to: None }, mods, location);
            self.ast.set_chain_child(node, to);
            return Ok(node);
        }
        if self.eat_word("rvalue") {
            self.expect_word("reference")?;
            self.expect_word("to")?;
            let to = self.english_type()?;
            let node = self
                .ast
                .new_node(Kind::RvalueReference { to: None }, mods, location);
            self.ast.set_chain_child(node, to);
            return Ok(node);
        }
        if self.eat_word("reference") {
            self.expect_word("to")?;
            let to = self.english_type()?;
            let node = self
                .ast
                .new_node(Kind::Reference { to: None }, mods, location);
            self.ast.set_chain_child(node, to);
            return Ok(node);
        }
        if self.eat_word("function") {
            return self.function_phrase(
                mods,
                location,
                Kind::Function {
                    params: vec![],
                    ret: None,
                },
            );
        }
        if self.eat_word("block") {
            return self.function_phrase(
                mods | TypeId::APPLE_BLOCK,
                location,
                Kind::Block {
                    params: vec![],
                    ret: None,
                },
            );
        }
        if self.eat_word("lambda") {
            return self.function_phrase(
                mods,
                location,
                Kind::Lambda {
                    params: vec![],
                    ret: None,
                },
            );
        }
        if self.eat_word("constructor") {
            let params = if self.peek() == Some(&Token::LeftParen) {
                self.english_params()?
            } else {
                vec![]
            };
            let node = self
                .ast
                .new_node(Kind::Constructor { params: vec![] }, mods, location);
            for param in params {
                self.ast.add_param(node, param);
            }
            return Ok(node);
        }
        if self.eat_word("destructor") {
            return Ok(self.ast.new_node(Kind::Destructor, mods, location));
        }
        if self.eat_word("user-defined") {
            if self.eat_word("conversion") {
                self.match_keyword(Keyword::Operator);
                self.eat_word("operator");
                if !self.eat_word("returning") {
                    self.expect_word("to")?;
                }
                let to = self.english_type()?;
                let node =
                    self.ast
                        .new_node(Kind::UserDefConversion { to: None }, mods, location);
                self.ast.set_chain_child(node, to);
                return Ok(node);
            }
            self.expect_word("literal")?;
            return self.function_phrase(
                mods,
                location,
                Kind::UserDefLiteral {
                    params: vec![],
                    ret: None,
                },
            );
        }

        // tag types: enum E, struct S, class C, union U
        for (kw, bit) in &[
            (Keyword::Enum, TypeId::ENUM),
            (Keyword::Struct, TypeId::STRUCT),
            (Keyword::Union, TypeId::UNION),
            (Keyword::Class, TypeId::CLASS),
            (Keyword::Namespace, TypeId::NAMESPACE),
        ] {
            if self.match_keyword(*kw).is_some() {
                return self.ecsu_phrase(mods, *bit, location);
            }
        }

        // built-in types: a run of base-type keywords merged by the algebra
        if let Some(Token::Keyword(kw)) = self.peek() {
            if kw
                .type_id(self.session.opt.lang)
                .map_or(false, |id| !id.base().is_empty())
            {
                return self.builtin_phrase(mods, location);
            }
        }

        // a typedef name
        if let Some(Token::Id(id)) = self.peek() {
            let id = *id;
            let word = id.resolve();
            if !KIND_WORDS.contains(&word.as_str()) {
                let sname = self.scoped_name()?.data;
                if let Some(def) = self.session.typedefs.lookup(&sname) {
                    return Ok(self.ast.new_node(
                        Kind::Typedef { def, bit_width: 0 },
                        mods | TypeId::TYPEDEF_TYPE,
                        location,
                    ));
                }
                // a keyword of another dialect reads better as a
                // language-version error than as an unknown name
                if let Some(bit) = super::keyword_bit_elsewhere(&word) {
                    let lang = self.session.opt.lang;
                    let mut hint = bit.check().which(lang);
                    if hint.ends_with(lang.name()) {
                        hint.clear();
                    }
                    return Err(location.error(
                        crate::data::error::SemanticError::NotSupported {
                            what: word,
                            lang: lang.name(),
                            hint,
                        },
                    ));
                }
                return Err(location.error(SyntaxError::UnknownName {
                    suggestions: lookup::suggest_type_name(&word, &self.session.typedefs),
                    name: sname.to_string(),
                }));
            }
        }

        let got = self
            .peek()
            .map(|t| format!("\"{}\"", t))
            .unwrap_or_else(|| "end of command".into());
        Err(self
            .location()
            .error(SyntaxError::ExpectedToken("a type".into(), got)))
    }

    /// `array [qualifier*] [<size>] of <english>`.
    fn array_phrase(
        &mut self,
        mods: TypeId,
        location: Location,
        size: Option<ArraySize>,
    ) -> ParseResult<NodeId> {
        let mut quals = TypeId::NONE;
        while let Some(Token::Keyword(kw)) = self.peek() {
            let bit = match kw {
                Keyword::Const => TypeId::CONST,
                Keyword::Volatile => TypeId::VOLATILE,
                Keyword::Restrict => TypeId::RESTRICT,
                Keyword::Static => TypeId::STATIC,
                _ => break,
            };
            let location = self.location();
            self.next_token();
            quals.add(bit, location)?;
        }
        let size = match size {
            Some(size) => size,
            None => match self.peek() {
                Some(Token::Number(_)) => {
                    let token = self.next_token().unwrap();
                    match token.data {
                        Token::Number(n) => ArraySize::Fixed(n),
                        _ => unreachable!(),
                    }
                }
                _ => ArraySize::Unspecified,
            },
        };
        self.expect_word("of")?;
        let of = self.english_type()?;
        let node = self.ast.new_node(
            Kind::Array {
                size,
                quals,
                of: None,
            },
            mods,
            location,
        );
        self.ast.set_chain_child(node, of);
        Ok(node)
    }

    /// `(params) returning <english>`, both parts optional.
    fn function_phrase(
        &mut self,
        mods: TypeId,
        location: Location,
        kind: Kind,
    ) -> ParseResult<NodeId> {
        let params = if self.peek() == Some(&Token::LeftParen) {
            self.english_params()?
        } else {
            vec![]
        };
        let ret = if self.eat_word("returning") {
            self.english_type()?
        } else {
            // no `returning` clause: the pre-C23 implicit int
            self.ast
                .new_node(Kind::Builtin { bit_width: 0 }, TypeId::NONE, location)
        };
        let node = self.ast.new_node(kind, mods, location);
        for param in params {
            self.ast.add_param(node, param);
        }
        let node = build::add_func(&mut self.ast, None, Some(ret), node);
        Ok(node)
    }

    fn english_params(&mut self) -> ParseResult<Vec<NodeId>> {
        self.expect(Token::LeftParen)?;
        let mut params = vec![];
        if self.match_next(&Token::RightParen).is_some() {
            return Ok(params);
        }
        loop {
            params.push(self.english_param()?);
            if self.match_next(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(params)
    }

    /// ```text
    /// param
    /// : "..."
    /// | name "as" english_type
    /// | english_type
    /// | name              /* K&R untyped parameter */
    /// ;
    /// ```
    fn english_param(&mut self) -> ParseResult<NodeId> {
        let location = self.location();
        if self.match_next(&Token::Ellipsis).is_some() || self.eat_word("variadic") {
            return Ok(self.ast.new_node(Kind::Variadic, TypeId::NONE, location));
        }
        if let Some(Token::Id(id)) = self.peek() {
            let id = *id;
            let word = id.resolve();
            let next_is_as = matches!(self.peek_at(1), Some(Token::Id(w)) if w.eq_str("as"));
            if next_is_as {
                let name = self.expect_id()?;
                self.expect_word("as")?;
                let root = self.english_type()?;
                self.ast.node_mut(root).sname = crate::ast::ScopedName::one(name.data);
                return Ok(root);
            }
            let known_type = self
                .session
                .typedefs
                .lookup(&crate::ast::ScopedName::one(id))
                .is_some();
            if !KIND_WORDS.contains(&word.as_str()) && !known_type {
                // untyped K&R parameter
                let name = self.expect_id()?;
                let node = self.ast.new_node(Kind::Name, TypeId::NONE, location);
                self.ast.node_mut(node).sname = crate::ast::ScopedName::one(name.data);
                return Ok(node);
            }
        }
        self.english_type()
    }

    /// A run of built-in type words: `unsigned long int`, with an optional
    /// `width N bits` bit-field suffix.
    fn builtin_phrase(
        &mut self,
        mods: TypeId,
        location: Location,
    ) -> ParseResult<NodeId> {
        let mut type_id = mods;
        loop {
            let location = self.location();
            match self.peek() {
                Some(Token::Keyword(kw)) => match kw.type_id(self.session.opt.lang) {
                    Some(bit) => {
                        self.next_token();
                        type_id.add(bit, location)?;
                    }
                    None => break,
                },
                _ => break,
            }
        }
        let mut bit_width = 0;
        if self.eat_word("width") {
            let token = self.expect_number()?;
            self.eat_word("bits");
            bit_width = token;
        }
        Ok(self
            .ast
            .new_node(Kind::Builtin { bit_width }, type_id, location))
    }

    /// `enum E`, `struct S`, etc., with the C++11 `enum E of type T`.
    fn ecsu_phrase(
        &mut self,
        mods: TypeId,
        tag: TypeId,
        location: Location,
    ) -> ParseResult<NodeId> {
        let mut type_id = mods | tag;
        // `enum class E` / `enum struct E`
        if tag == TypeId::ENUM {
            if self.match_keyword(Keyword::Class).is_some() {
                type_id |= TypeId::CLASS;
            } else if self.match_keyword(Keyword::Struct).is_some() {
                type_id |= TypeId::STRUCT;
            }
        }
        let mut ecsu_sname = self.scoped_name()?.data;
        ecsu_sname.set_scope_types(TypeId::SCOPE);
        let node = self.ast.new_node(
            Kind::Ecsu {
                ecsu_sname,
                of: None,
                bit_width: 0,
            },
            type_id,
            location,
        );
        if tag == TypeId::ENUM && self.eat_word("of") {
            self.eat_word("type");
            let of = self.english_type()?;
            self.ast.set_ecsu_of(node, of);
        }
        Ok(node)
    }

}
