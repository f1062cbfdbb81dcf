//! The gibberish half of the grammar: C/C++ declarations.
//!
//! ```yacc
//! declaration
//! : alignas_specifier? specifier_list declarator? bit_field?
//! ;
//!
//! declarator
//! : '*' qualifier* declarator
//! | name '::' ... '::' '*' qualifier* declarator
//! | direct_declarator
//! ;
//!
//! direct_declarator
//! : '(' declarator ')' suffix*
//! | name suffix*
//! | suffix*
//! ;
//! ```
//!
//! Declarators read inside-out, so a partial AST keeps a placeholder where
//! the element type belongs; `add_array`/`add_func` graft suffixes into that
//! hole and the type specifier patches it away at the end.

use super::{Parser, ParseResult};
use crate::ast::{build, Alignment, ArraySize, Kind, KindSet, NodeId, ScopedName, VisitDir};
use crate::data::error::{SemanticError, SyntaxError};
use crate::data::lex::{Keyword, Locatable, Location, Token};
use crate::lookup;
use crate::types::TypeId;

/// A parsed (possibly abstract) declarator: the partial AST and the declared
/// name, if any.
struct DeclaratorResult {
    root: Option<NodeId>,
    name: Option<Locatable<ScopedName>>,
}

/// What the specifier list contributed besides type bits.
enum BaseKind {
    None,
    Ecsu {
        sname: ScopedName,
        of: Option<NodeId>,
    },
    Typedef(crate::typedefs::TypedefId),
}

struct SpecResult {
    type_id: TypeId,
    base: BaseKind,
    align: Alignment,
    consumed_any: bool,
    location: Location,
}


impl<'s> Parser<'s> {
    /// Parses one full declaration and returns the completed AST root, with
    /// no placeholder left anywhere.
    pub(super) fn declaration(&mut self) -> ParseResult<NodeId> {
        let specs = self.specifiers()?;
        let base = self.base_node(&specs);
        let decl = self.declarator()?;

        let root = build::patch_placeholder(&mut self.ast, base, decl.root);
        // a trailing return type leaves the head type unused; only `auto`
        // may stand there
        if root != base
            && self.ast.node(base).parent.is_none()
            && specs.type_id.base() != TypeId::AUTO_TYPE
        {
            return Err(specs.location.error(SemanticError::TrailingReturnAuto));
        }
        if let Some(name) = decl.name {
            self.ast.node_mut(root).sname = name.data;
        }
        if specs.align != Alignment::None {
            self.ast.node_mut(root).align = specs.align;
        }

        // bit-field suffix
        if self.match_next(&Token::Colon).is_some() {
            let location = self.location();
            let width = self.expect_number()?;
            if width == 0 {
                return Err(location.error(SemanticError::BitFieldWidth));
            }
            let leaf = self.ast.leaf(root);
            if !self.ast.set_bit_width(leaf, width) {
                return Err(location.error(SemanticError::BitFieldKind));
            }
        }
        Ok(root)
    }

    fn base_node(&mut self, specs: &SpecResult) -> NodeId {
        match &specs.base {
            BaseKind::Ecsu { sname, of } => {
                let node = self.ast.new_node(
                    Kind::Ecsu {
                        ecsu_sname: sname.clone(),
                        of: None,
                        bit_width: 0,
                    },
                    specs.type_id,
                    specs.location,
                );
                if let Some(of) = *of {
                    self.ast.set_ecsu_of(node, of);
                }
                node
            }
            BaseKind::Typedef(def) => self.ast.new_node(
                Kind::Typedef {
                    def: *def,
                    bit_width: 0,
                },
                specs.type_id | TypeId::TYPEDEF_TYPE,
                specs.location,
            ),
            BaseKind::None => self.ast.new_node(
                Kind::Builtin { bit_width: 0 },
                specs.type_id,
                specs.location,
            ),
        }
    }

    /// The declaration-specifier list: type keywords merged through the type
    /// algebra, at most one tag or typedef name, and `alignas` clauses.
    fn specifiers(&mut self) -> ParseResult<SpecResult> {
        let mut specs = SpecResult {
            type_id: TypeId::NONE,
            base: BaseKind::None,
            align: Alignment::None,
            consumed_any: false,
            location: self.location(),
        };
        loop {
            let location = self.location();
            match self.peek() {
                Some(Token::Keyword(Keyword::Alignas)) => {
                    self.next_token();
                    specs.align = self.alignas_operand()?;
                    specs.consumed_any = true;
                }
                Some(Token::Keyword(kw))
                    if matches!(
                        kw,
                        Keyword::Enum
                            | Keyword::Struct
                            | Keyword::Union
                            | Keyword::Class
                            | Keyword::Namespace
                    ) =>
                {
                    let kw = *kw;
                    self.next_token();
                    let tag_bit = match kw {
                        Keyword::Enum => TypeId::ENUM,
                        Keyword::Struct => TypeId::STRUCT,
                        Keyword::Union => TypeId::UNION,
                        Keyword::Class => TypeId::CLASS,
                        _ => TypeId::NAMESPACE,
                    };
                    specs.type_id.add(tag_bit, location)?;
                    // scoped enums: enum class E / enum struct E
                    if kw == Keyword::Enum {
                        if self.match_keyword(Keyword::Class).is_some() {
                            specs.type_id |= TypeId::CLASS;
                        } else if self.match_keyword(Keyword::Struct).is_some() {
                            specs.type_id |= TypeId::STRUCT;
                        }
                    }
                    let mut sname = self.scoped_name()?.data;
                    sname.set_scope_types(TypeId::SCOPE);
                    // C++11 fixed underlying type: enum E : int
                    let of = if kw == Keyword::Enum && self.peek() == Some(&Token::Colon) {
                        self.next_token();
                        let sub = self.specifiers()?;
                        Some(self.base_node(&sub))
                    } else {
                        None
                    };
                    specs.base = BaseKind::Ecsu { sname, of };
                    specs.consumed_any = true;
                }
                Some(Token::Keyword(kw)) => {
                    match kw.type_id(self.session.opt.lang) {
                        Some(bit) => {
                            self.next_token();
                            specs.type_id.add(bit, location)?;
                            specs.consumed_any = true;
                        }
                        // `operator`, `using`, `default`... end the specifiers
                        None => break,
                    }
                }
                Some(Token::Id(id)) => {
                    // a typedef name can serve as the base type once
                    if !matches!(specs.base, BaseKind::None) || !specs.type_id.base().is_empty() {
                        break;
                    }
                    let id = *id;
                    let mut segments = 1;
                    while self.peek_at(segments * 2 - 1) == Some(&Token::ColonColon) {
                        match self.peek_at(segments * 2) {
                            Some(Token::Id(_)) => segments += 1,
                            _ => break,
                        }
                    }
                    // scoped names are never declarator names here, but a
                    // plain unknown name might be (`explain x` is implicit
                    // int); only a name that cannot start a declarator is an
                    // unknown type
                    let sname = self.peek_scoped_name(segments);
                    match self.session.typedefs.lookup(&sname) {
                        Some(def) => {
                            for _ in 0..segments * 2 - 1 {
                                self.next_token();
                            }
                            specs.base = BaseKind::Typedef(def);
                            specs.consumed_any = true;
                        }
                        // `explain foo x`: foo was meant as a type; but a
                        // lone name can still be an implicit-int declarator
                        None if segments == 1
                            && !matches!(self.peek_at(1), Some(Token::Id(_))) =>
                        {
                            break
                        }
                        None => {
                            let word = id.resolve();
                            // a keyword of another dialect reads better as a
                            // language-version error than as an unknown name
                            if let Some(bit) = super::keyword_bit_elsewhere(&word) {
                                let lang = self.session.opt.lang;
                                let mut hint = bit.check().which(lang);
                                if hint.ends_with(lang.name()) {
                                    hint.clear();
                                }
                                return Err(location.error(SemanticError::NotSupported {
                                    what: word,
                                    lang: lang.name(),
                                    hint,
                                }));
                            }
                            return Err(location.error(SyntaxError::UnknownName {
                                suggestions: lookup::suggest_type_name(
                                    &word,
                                    &self.session.typedefs,
                                ),
                                name: sname.to_string(),
                            }));
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(specs)
    }

    /// Reads `segments` identifiers joined by `::` without consuming them.
    fn peek_scoped_name(&self, segments: usize) -> ScopedName {
        let mut sname = ScopedName::new();
        for i in 0..segments {
            if let Some(Token::Id(id)) = self.peek_at(i * 2) {
                sname.push(TypeId::NONE, *id);
            }
        }
        sname
    }

    /// `alignas ( number )` or `alignas ( type )`.
    fn alignas_operand(&mut self) -> ParseResult<Alignment> {
        self.expect(Token::LeftParen)?;
        let align = match self.peek() {
            Some(Token::Number(_)) => Alignment::Expr(self.expect_number()?),
            _ => Alignment::Type(self.declaration()?),
        };
        self.expect(Token::RightParen)?;
        Ok(align)
    }

    fn declarator(&mut self) -> ParseResult<DeclaratorResult> {
        let location = self.location();
        // pointer to member: (Id ::)+ *
        if let Some(segments) = self.pointer_to_member_lookahead() {
            let mut class_sname = ScopedName::new();
            for _ in 0..segments {
                let id = self.expect_id()?;
                class_sname.push(TypeId::CLASS, id.data);
                self.expect(Token::ColonColon)?;
            }
            self.expect(Token::Star)?;
            let quals = self.qualifier_list()?;
            let inner = self.declarator()?;
            let ptm = self.ast.new_node(
                Kind::PointerToMember {
                    class_sname,
                    of: None,
                },
                quals,
                location,
            );
            let hole = build::placeholder(&mut self.ast, location);
            self.ast.set_chain_child(ptm, hole);
            let root = build::patch_placeholder(&mut self.ast, ptm, inner.root);
            return Ok(DeclaratorResult {
                root: Some(root),
                name: inner.name,
            });
        }
        if self.match_next(&Token::Star).is_some() {
            let quals = self.qualifier_list()?;
            let inner = self.declarator()?;
            let ptr = self
                .ast
                .new_node(Kind::Pointer { to: None }, quals, location);
            let hole = build::placeholder(&mut self.ast, location);
            self.ast.set_chain_child(ptr, hole);
            let root = build::patch_placeholder(&mut self.ast, ptr, inner.root);
            return Ok(DeclaratorResult {
                root: Some(root),
                name: inner.name,
            });
        }
        if self.match_next(&Token::Ampersand).is_some() {
            let quals = self.qualifier_list()?;
            let inner = self.declarator()?;
            let r = self
                .ast
                .new_node(Kind::Reference { to: None }, quals, location);
            let hole = build::placeholder(&mut self.ast, location);
            self.ast.set_chain_child(r, hole);
            let root = build::patch_placeholder(&mut self.ast, r, inner.root);
            return Ok(DeclaratorResult {
                root: Some(root),
                name: inner.name,
            });
        }
        if self.match_next(&Token::LogicalAnd).is_some() {
            let quals = self.qualifier_list()?;
            let inner = self.declarator()?;
            let r = self
                .ast
                .new_node(Kind::RvalueReference { to: None }, quals, location);
            let hole = build::placeholder(&mut self.ast, location);
            self.ast.set_chain_child(r, hole);
            let root = build::patch_placeholder(&mut self.ast, r, inner.root);
            return Ok(DeclaratorResult {
                root: Some(root),
                name: inner.name,
            });
        }
        // Apple block: ^ qualifier* declarator
        if self.match_next(&Token::Caret).is_some() {
            let quals = self.qualifier_list()?;
            let inner = self.declarator()?;
            let block = self.ast.new_node(
                Kind::Block {
                    params: vec![],
                    ret: None,
                },
                quals | TypeId::APPLE_BLOCK,
                location,
            );
            let hole = build::placeholder(&mut self.ast, location);
            self.ast.set_chain_child(block, hole);
            let root = build::patch_placeholder(&mut self.ast, block, inner.root);
            return Ok(DeclaratorResult {
                root: Some(root),
                name: inner.name,
            });
        }
        self.direct_declarator()
    }

    /// `(Id ::)+ *` introduces a pointer-to-member declarator; returns the
    /// number of scope segments.
    fn pointer_to_member_lookahead(&self) -> Option<usize> {
        let mut segments = 0;
        loop {
            let base = segments * 2;
            match (self.peek_at(base), self.peek_at(base + 1)) {
                (Some(Token::Id(_)), Some(Token::ColonColon)) => {
                    segments += 1;
                    if self.peek_at(segments * 2) == Some(&Token::Star) {
                        return Some(segments);
                    }
                }
                _ => return None,
            }
        }
    }

    fn qualifier_list(&mut self) -> ParseResult<TypeId> {
        let mut quals = TypeId::NONE;
        loop {
            let location = self.location();
            let bit = match self.peek() {
                Some(Token::Keyword(Keyword::Const)) => TypeId::CONST,
                Some(Token::Keyword(Keyword::Volatile)) => TypeId::VOLATILE,
                Some(Token::Keyword(Keyword::Restrict)) => TypeId::RESTRICT,
                Some(Token::Keyword(Keyword::Atomic)) => TypeId::ATOMIC,
                _ => break,
            };
            self.next_token();
            quals.add(bit, location)?;
        }
        Ok(quals)
    }

    fn direct_declarator(&mut self) -> ParseResult<DeclaratorResult> {
        let mut result = DeclaratorResult {
            root: None,
            name: None,
        };
        let mut oper: Option<String> = None;

        match self.peek() {
            Some(Token::LeftParen) if !self.starts_params(1) => {
                self.next_token();
                result = self.declarator()?;
                self.expect(Token::RightParen)?;
            }
            Some(Token::Keyword(Keyword::Operator)) => {
                self.next_token();
                oper = Some(self.operator_symbols("(")?);
            }
            Some(Token::Id(_)) => {
                let name = self.scoped_name()?;
                result.name = Some(name);
            }
            _ => {}
        }

        // suffixes: arrays and parameter lists
        loop {
            if self.match_next(&Token::LeftBracket).is_some() {
                let array = self.array_suffix()?;
                result.root = Some(build::add_array(&mut self.ast, result.root, array));
                continue;
            }
            if self.peek() == Some(&Token::LeftParen) {
                let location = self.location();
                let params = self.param_list()?;

                // a block declarator owns the first parameter list
                if let Some(block) = self.pending_block(result.root) {
                    for param in params {
                        self.ast.add_param(block, param);
                    }
                } else {
                    let kind = match oper.take() {
                        Some(oper) => Kind::Operator {
                            oper: oper.into(),
                            params: vec![],
                            ret: None,
                        },
                        None => Kind::Function {
                            params: vec![],
                            ret: None,
                        },
                    };
                    let func = self.ast.new_node(kind, TypeId::NONE, location);
                    for param in params {
                        self.ast.add_param(func, param);
                    }
                    result.root = Some(build::add_func(&mut self.ast, result.root, None, func));
                }

                self.function_qualifiers(result.root)?;

                // trailing return type: -> T
                if self.match_next(&Token::Arrow).is_some() {
                    let ret = self.declaration()?;
                    if let Some(root) = result.root {
                        let new_root = build::patch_placeholder(&mut self.ast, ret, Some(root));
                        result.root = Some(new_root);
                    }
                }
                continue;
            }
            break;
        }

        if let Some(oper) = oper {
            // `operator <` with no parameter list
            return Err(self.location().error(SyntaxError::ExpectedToken(
                "\"(\"".into(),
                format!("\"operator {}\" without parameters", oper),
            )));
        }
        Ok(result)
    }

    /// Whether the token `ahead` of us begins a parameter list rather than a
    /// nested declarator.
    fn starts_params(&self, ahead: usize) -> bool {
        match self.peek_at(ahead) {
            Some(Token::RightParen) | Some(Token::Ellipsis) => true,
            Some(Token::Keyword(kw)) => kw.type_id(self.session.opt.lang).is_some(),
            Some(Token::Id(id)) => self
                .session
                .typedefs
                .lookup(&ScopedName::one(*id))
                .is_some(),
            _ => false,
        }
    }

    /// `[ qualifier* (N | *)? ]`, already past the `[`.
    fn array_suffix(&mut self) -> ParseResult<NodeId> {
        let location = self.location();
        let mut quals = TypeId::NONE;
        loop {
            let location = self.location();
            let bit = match self.peek() {
                Some(Token::Keyword(Keyword::Const)) => TypeId::CONST,
                Some(Token::Keyword(Keyword::Volatile)) => TypeId::VOLATILE,
                Some(Token::Keyword(Keyword::Restrict)) => TypeId::RESTRICT,
                Some(Token::Keyword(Keyword::Static)) => TypeId::STATIC,
                _ => break,
            };
            self.next_token();
            quals.add(bit, location)?;
        }
        let size = match self.peek() {
            Some(Token::Number(_)) => ArraySize::Fixed(self.expect_number()?),
            Some(Token::Star) => {
                self.next_token();
                ArraySize::Variable
            }
            _ => ArraySize::Unspecified,
        };
        self.expect(Token::RightBracket)?;
        Ok(self.ast.new_node(
            Kind::Array {
                size,
                quals,
                of: None,
            },
            TypeId::NONE,
            location,
        ))
    }

    /// `( )`, `( void )`, or `( param, ... )`.
    fn param_list(&mut self) -> ParseResult<Vec<NodeId>> {
        self.expect(Token::LeftParen)?;
        if self.match_next(&Token::RightParen).is_some() {
            return Ok(vec![]);
        }
        // f(void) declares no parameters
        if self.peek() == Some(&Token::Keyword(Keyword::Void))
            && self.peek_at(1) == Some(&Token::RightParen)
        {
            self.next_token();
            self.next_token();
            return Ok(vec![]);
        }
        let mut params = vec![];
        loop {
            params.push(self.param()?);
            if self.match_next(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(params)
    }

    fn param(&mut self) -> ParseResult<NodeId> {
        let location = self.location();
        if self.match_next(&Token::Ellipsis).is_some() {
            return Ok(self.ast.new_node(Kind::Variadic, TypeId::NONE, location));
        }
        let specs = self.specifiers()?;
        if !specs.consumed_any {
            // no type at all: a K&R untyped parameter
            let name = self.expect_id()?;
            let node = self.ast.new_node(Kind::Name, TypeId::NONE, location);
            self.ast.node_mut(node).sname = ScopedName::one(name.data);
            return Ok(node);
        }
        let base = self.base_node(&specs);
        let decl = self.declarator()?;
        let root = build::patch_placeholder(&mut self.ast, base, decl.root);
        if let Some(name) = decl.name {
            self.ast.node_mut(root).sname = name.data;
        }
        Ok(root)
    }

    /// Member-function qualifiers after the parameter list: cv-qualifiers,
    /// ref-qualifiers, `noexcept`, `throw()`, `final`, `override`, `= 0`,
    /// `= default`, `= delete`.
    fn function_qualifiers(&mut self, root: Option<NodeId>) -> ParseResult<()> {
        let func = match root.map(|r| {
            self.ast
                .find_kind_any(r, VisitDir::Down, KindSet::ANY_FUNCTION_LIKE)
        }) {
            Some(Some(f)) => f,
            _ => return Ok(()),
        };
        loop {
            let location = self.location();
            let bit = match self.peek() {
                Some(Token::Keyword(Keyword::Const)) => TypeId::CONST,
                Some(Token::Keyword(Keyword::Volatile)) => TypeId::VOLATILE,
                Some(Token::Keyword(Keyword::Noexcept)) => TypeId::NOEXCEPT,
                Some(Token::Keyword(Keyword::Throw)) => {
                    self.next_token();
                    self.expect(Token::LeftParen)?;
                    self.expect(Token::RightParen)?;
                    let node = self.ast.node_mut(func);
                    node.type_id.add(TypeId::THROW, location)?;
                    continue;
                }
                Some(Token::Ampersand) => TypeId::REFERENCE,
                Some(Token::LogicalAnd) => TypeId::RVALUE_REFERENCE,
                Some(Token::Id(id)) if id.eq_str("final") => TypeId::FINAL,
                Some(Token::Id(id)) if id.eq_str("override") => TypeId::OVERRIDE,
                Some(Token::Equal) => {
                    self.next_token();
                    let location = self.location();
                    let bit = match self.peek() {
                        Some(Token::Number(0)) => TypeId::PURE_VIRTUAL,
                        Some(Token::Keyword(Keyword::Default)) => TypeId::DEFAULT,
                        Some(Token::Keyword(Keyword::Delete)) => TypeId::DELETE,
                        _ => {
                            return Err(location.error(SyntaxError::ExpectedToken(
                                "\"0\", \"default\", or \"delete\"".into(),
                                self.peek()
                                    .map(|t| format!("\"{}\"", t))
                                    .unwrap_or_else(|| "end of command".into()),
                            )))
                        }
                    };
                    self.next_token();
                    self.ast.node_mut(func).type_id.add(bit, location)?;
                    continue;
                }
                _ => break,
            };
            self.next_token();
            self.ast.node_mut(func).type_id.add(bit, location)?;
        }
        Ok(())
    }

    pub(super) fn expect_number(&mut self) -> ParseResult<u32> {
        match self.peek() {
            Some(Token::Number(_)) => match self.next_token().unwrap().data {
                Token::Number(n) => Ok(n),
                _ => unreachable!(),
            },
            _ => {
                let got = self
                    .peek()
                    .map(|t| format!("\"{}\"", t))
                    .unwrap_or_else(|| "end of command".into());
                Err(self
                    .location()
                    .error(SyntaxError::ExpectedToken("a number".into(), got)))
            }
        }
    }

    /// Whether the hole's parent is a block still waiting for its parameter
    /// list.
    fn pending_block(&self, root: Option<NodeId>) -> Option<NodeId> {
        let root = root?;
        let hole = self
            .ast
            .find_kind_any(root, VisitDir::Down, KindSet::PLACEHOLDER)?;
        let parent = self.ast.node(hole).parent?;
        match &self.ast.node(parent).kind {
            Kind::Block { params, .. } if params.is_empty() => Some(parent),
            _ => None,
        }
    }
}
