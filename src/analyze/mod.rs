//! The declaration checker.
//!
//! A completed AST is legal or it isn't; this module decides, in the active
//! dialect, and collects every diagnostic rather than stopping at the first
//! so one command can report all of its problems at once. Traversal is
//! pre-order along the declarator spine, parameters before return types, and
//! within one node type-sector diagnostics fire before shape diagnostics.

use log::debug;

use crate::ast::{build, Alignment, ArraySize, Ast, Kind, KindSet, NodeId, VisitDir};
use crate::data::error::{ErrorHandler, SemanticError, Warning};
use crate::data::lex::Location;
use crate::lang::{c_min, cpp_min, LangIds};
use crate::types::TypeId;
use crate::Session;

/// Base-type bits a bit-field may have.
const INTEGRAL: TypeId = TypeId::from_bits_truncate(
    TypeId::BOOL.bits()
        | TypeId::CHAR.bits()
        | TypeId::CHAR8_T.bits()
        | TypeId::CHAR16_T.bits()
        | TypeId::CHAR32_T.bits()
        | TypeId::WCHAR_T.bits()
        | TypeId::SHORT.bits()
        | TypeId::INT.bits()
        | TypeId::LONG.bits()
        | TypeId::LONG_LONG.bits()
        | TypeId::SIGNED.bits()
        | TypeId::UNSIGNED.bits()
        | TypeId::ENUM.bits(),
);

struct AstChecker<'s> {
    session: &'s Session,
    ast: &'s Ast,
    error_handler: ErrorHandler,
    /// Checking a cast rather than a declaration.
    is_cast: bool,
    /// The declared name is scoped, so member-only types are legal.
    member_scope: bool,
}

/// Checks a completed declaration AST in the session's dialect.
pub fn check_declaration(session: &Session, ast: &Ast, root: NodeId) -> ErrorHandler {
    let mut checker = AstChecker::new(session, ast, false);
    checker.check_root(root);
    checker.error_handler
}

/// Checks the target type of a cast; storage classes and non-object types
/// are additionally illegal.
pub fn check_cast(session: &Session, ast: &Ast, root: NodeId) -> ErrorHandler {
    let mut checker = AstChecker::new(session, ast, true);
    checker.check_root(root);
    checker.error_handler
}

impl<'s> AstChecker<'s> {
    fn new(session: &'s Session, ast: &'s Ast, is_cast: bool) -> AstChecker<'s> {
        let member_scope = false;
        AstChecker {
            session,
            ast,
            error_handler: ErrorHandler::new(),
            is_cast,
            member_scope,
        }
    }

    fn lang(&self) -> LangIds {
        self.session.opt.lang
    }

    #[inline(always)]
    fn err(&mut self, e: SemanticError, l: Location) {
        self.error_handler.error(e, l);
    }

    fn not_supported(&mut self, what: &str, ok_langs: LangIds, location: Location) {
        let lang = self.lang();
        let mut hint = ok_langs.which(lang);
        // " since C++17" under C++17 would just restate the language
        if hint.ends_with(lang.name()) {
            hint.clear();
        }
        self.err(
            SemanticError::NotSupported {
                what: what.to_string(),
                lang: lang.name(),
                hint,
            },
            location,
        );
    }

    fn check_root(&mut self, root: NodeId) {
        debug!("checking AST of {} nodes", self.ast.len());
        self.member_scope = self
            .ast
            .find_name(root, VisitDir::Down)
            .map_or(false, |n| self.ast.node(n).sname.count() > 1);

        if self.is_cast {
            let node = self.ast.node(root);
            let storage = node.type_id.storage_class();
            if !storage.is_empty() {
                self.err(SemanticError::CastStorage(storage.name()), node.loc);
            }
            match &node.kind {
                Kind::Array { .. } => self.err(SemanticError::CastIntoArray, node.loc),
                k if k.is(KindSet::ANY_FUNCTION_LIKE) => {
                    self.err(SemanticError::CastIntoFunction, node.loc)
                }
                _ => {}
            }
        } else {
            // a whole declaration of type void declares nothing
            let view = build::untypedef(&self.session.typedefs, self.ast, root);
            if let Kind::Builtin { .. } = view.node().kind {
                let named = self.ast.find_name(root, VisitDir::Down).is_some();
                if view.node().type_id.base() == TypeId::VOID && named {
                    self.err(SemanticError::VariableOfVoid, self.ast.node(root).loc);
                }
            }
        }

        self.check_node(root, false);
    }

    fn check_node(&mut self, id: NodeId, is_param: bool) {
        let node = self.ast.node(id);
        let loc = node.loc;

        // language gating of every type bit on the node
        for (bit, ok_langs) in node.type_id.check_each(self.lang()) {
            self.not_supported(bit.bit_name(), ok_langs, loc);
        }
        // still legal, but on the way out
        let lang = self.lang();
        if node.type_id.contains(TypeId::REGISTER)
            && cpp_min(LangIds::CPP_11).contains(lang)
            && TypeId::REGISTER.check().contains(lang)
        {
            self.error_handler.warn(
                Warning::Deprecated {
                    what: "register".to_string(),
                    hint: " since C++11".to_string(),
                },
                loc,
            );
        }
        if node.type_id.contains(TypeId::THROW)
            && cpp_min(LangIds::CPP_11).contains(lang)
            && TypeId::THROW.check().contains(lang)
        {
            self.error_handler.warn(
                Warning::Deprecated {
                    what: "throw()".to_string(),
                    hint: " since C++11".to_string(),
                },
                loc,
            );
        }
        self.check_kind(id, is_param);

        // bit-fields
        let width = self.ast.bit_width(id);
        if width > 0 {
            let view = build::untypedef(&self.session.typedefs, self.ast, id);
            if (view.node().type_id.base() & INTEGRAL).is_empty() {
                self.err(SemanticError::BitFieldKind, loc);
            }
            if node.type_id.contains(TypeId::STATIC) {
                self.err(SemanticError::BitFieldStatic, loc);
            }
        }

        // alignment
        match self.ast.node(id).align {
            Alignment::None => {}
            align => {
                let ok = c_min(LangIds::C_11) | cpp_min(LangIds::CPP_11);
                if !ok.contains(self.lang()) {
                    self.not_supported("alignas", ok, loc);
                }
                if self.ast.node(id).kind.is(KindSet::ANY_FUNCTION_LIKE) {
                    self.err(SemanticError::AlignasOnFunction, loc);
                }
                if let Alignment::Type(t) = align {
                    self.check_node(t, false);
                }
            }
        }

        // children: parameters first, then the spine
        let params: Vec<NodeId> = self.ast.node(id).kind.params().to_vec();
        for &param in &params {
            self.check_node(param, true);
        }
        self.check_params(id, &params);
        if let Some(child) = self.ast.node(id).kind.chain_child() {
            self.check_node(child, is_param);
        }
        if let Kind::Ecsu { of: Some(of), .. } = self.ast.node(id).kind {
            self.check_node(of, false);
        }
    }

    fn check_kind(&mut self, id: NodeId, is_param: bool) {
        let node = self.ast.node(id);
        let loc = node.loc;
        let lang = self.lang();
        match &node.kind {
            Kind::Placeholder => unreachable!("placeholder in a completed AST"),
            Kind::Name => {
                // K&R untyped parameter
                if !c_min(LangIds::C_KNR).contains(lang) || lang == LangIds::C_23 {
                    self.err(SemanticError::ImplicitIntForbidden(lang.name()), loc);
                }
            }
            Kind::Builtin { .. } => {
                if node.type_id.base().is_empty() {
                    // implicit int
                    if lang == LangIds::C_23 || lang.is_cpp() {
                        self.err(SemanticError::ImplicitIntForbidden(lang.name()), loc);
                    } else if lang != LangIds::C_KNR {
                        self.error_handler.warn(Warning::ImplicitInt, loc);
                    }
                }
            }
            Kind::Ecsu { of, .. } => {
                if of.is_some() {
                    let ok = cpp_min(LangIds::CPP_11) | LangIds::C_23;
                    if !ok.contains(lang) {
                        self.not_supported("enum with a fixed underlying type", ok, loc);
                    }
                }
            }
            Kind::Typedef { def, .. } => {
                let tdef = self.session.typedefs.get(*def);
                if !tdef.lang_ids.contains(lang) {
                    let name = tdef.sname.to_string();
                    self.not_supported(&name, tdef.lang_ids, loc);
                }
            }
            Kind::Variadic => {
                // position is checked by the parent function
            }
            Kind::Array { size, quals, of } => {
                if *size == ArraySize::Variable || !quals.is_empty() {
                    let ok = c_min(LangIds::C_99);
                    if !ok.contains(lang) {
                        self.not_supported("a variable length array", ok, loc);
                    } else if !is_param {
                        self.err(SemanticError::ArrayQualsOutsideParam, loc);
                    }
                }
                if let Some(of) = *of {
                    let view = build::untypedef(&self.session.typedefs, self.ast, of);
                    let of_kind = &view.node().kind;
                    if of_kind.is(KindSet::ANY_FUNCTION_LIKE) {
                        self.err(SemanticError::ArrayOfFunction, loc);
                    } else if of_kind.is(KindSet::ANY_REFERENCE) {
                        self.err(SemanticError::ArrayOfReference, loc);
                    } else if matches!(of_kind, Kind::Builtin { .. })
                        && view.node().type_id.base() == TypeId::VOID
                    {
                        self.err(SemanticError::ArrayOfVoid, loc);
                    }
                }
            }
            Kind::Pointer { to } => {
                if let Some(to) = *to {
                    let view = build::untypedef(&self.session.typedefs, self.ast, to);
                    if view.node().kind.is(KindSet::ANY_REFERENCE) {
                        self.err(SemanticError::PointerToReference, loc);
                    }
                }
            }
            Kind::Reference { to } | Kind::RvalueReference { to } => {
                let ok = if matches!(node.kind, Kind::Reference { .. }) {
                    LangIds::CPP_ANY
                } else {
                    cpp_min(LangIds::CPP_11)
                };
                if !ok.contains(lang) {
                    self.not_supported(node.kind.name(), ok, loc);
                }
                if let Some(to) = *to {
                    if self.ast.node(to).kind.is(KindSet::ANY_REFERENCE) {
                        self.err(SemanticError::ReferenceToReference, loc);
                    }
                }
            }
            Kind::PointerToMember { .. } => {
                if !lang.is_cpp() {
                    self.not_supported("a pointer to member", LangIds::CPP_ANY, loc);
                }
            }
            Kind::Block { .. } => {
                // an Apple extension, accepted in every dialect
            }
            Kind::Function { .. } => {
                self.check_member_types(id);
                self.check_return(id);
            }
            Kind::Operator { .. } => {
                if !lang.is_cpp() {
                    self.not_supported("an overloaded operator", LangIds::CPP_ANY, loc);
                }
                self.check_member_types(id);
                self.check_return(id);
            }
            Kind::Lambda { .. } => {
                let ok = cpp_min(LangIds::CPP_11);
                if !ok.contains(lang) {
                    self.not_supported("a lambda", ok, loc);
                }
                self.check_return(id);
            }
            Kind::UserDefConversion { .. } => {
                if !lang.is_cpp() {
                    self.not_supported("a user-defined conversion operator", LangIds::CPP_ANY, loc);
                }
                let illegal = node.type_id - TypeId::USER_DEF_CONV_OK;
                if !illegal.is_empty() {
                    self.err(SemanticError::ConversionType(illegal.name()), loc);
                }
            }
            Kind::UserDefLiteral { .. } => {
                let ok = cpp_min(LangIds::CPP_11);
                if !ok.contains(lang) {
                    self.not_supported("a user-defined literal", ok, loc);
                }
                self.check_return(id);
            }
            Kind::Constructor { .. } => {
                if !lang.is_cpp() {
                    self.not_supported("a constructor", LangIds::CPP_ANY, loc);
                }
                let illegal = node.type_id - TypeId::CONSTRUCTOR_OK;
                if !illegal.is_empty() {
                    self.err(SemanticError::ConstructorType(illegal.name()), loc);
                }
            }
            Kind::Destructor => {
                if !lang.is_cpp() {
                    self.not_supported("a destructor", LangIds::CPP_ANY, loc);
                }
                let illegal = node.type_id - TypeId::DESTRUCTOR_OK;
                if !illegal.is_empty() {
                    self.err(SemanticError::DestructorType(illegal.name()), loc);
                }
            }
        }
    }

    /// Member-only and non-member-only type bits on a function.
    fn check_member_types(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        // a function reached through a pointer-to-member is a member function
        let via_ptr_to_member = node.parent.map_or(false, |p| {
            self.ast.node(p).kind.is(KindSet::POINTER_TO_MEMBER)
        });
        let member_only = node.type_id & TypeId::MEMBER_ONLY;
        if !member_only.is_empty() && !self.member_scope && !via_ptr_to_member {
            self.err(SemanticError::MemberOnly(member_only.name()), node.loc);
        }
        let non_member_only = node.type_id & TypeId::NON_MEMBER_ONLY;
        if !non_member_only.is_empty() && self.member_scope {
            self.err(
                SemanticError::NonMemberOnly(non_member_only.name()),
                node.loc,
            );
        }
    }

    /// Functions cannot return arrays or functions.
    fn check_return(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        let ret = match node.kind.chain_child() {
            Some(ret) => ret,
            None => return,
        };
        let view = build::untypedef(&self.session.typedefs, self.ast, ret);
        let kind = &view.node().kind;
        if kind.is(KindSet::ARRAY) {
            self.err(SemanticError::FunctionReturningArray, node.loc);
        } else if kind.is(KindSet::ANY_FUNCTION_LIKE) {
            self.err(SemanticError::FunctionReturningFunction, node.loc);
        }
    }

    /// Variadic placement, `void` parameters, and parameter storage classes.
    fn check_params(&mut self, func: NodeId, params: &[NodeId]) {
        if !self.ast.node(func).kind.is(KindSet::ANY_FUNCTION_LIKE) {
            return;
        }
        let len = params.len();
        for (i, &param) in params.iter().enumerate() {
            let node = self.ast.node(param);
            let loc = node.loc;
            if node.kind.is(KindSet::VARIADIC) {
                if i + 1 != len {
                    self.err(SemanticError::VariadicNotLast, loc);
                } else if len == 1 && self.lang().is_c() {
                    self.err(SemanticError::VariadicAlone, loc);
                }
                continue;
            }
            let storage = node.type_id.storage_class() - TypeId::REGISTER;
            if !storage.is_empty() {
                self.err(SemanticError::ParamStorage(storage.name()), loc);
            }
            // a void parameter: `(void)` was folded away by the parser, so
            // any left over is a misuse
            if let Kind::Builtin { .. } = node.kind {
                if node.type_id.base() == TypeId::VOID {
                    if !node.sname.is_empty() {
                        self.err(SemanticError::VoidParamNamed(node.sname.to_string()), loc);
                    } else if len > 1 {
                        self.err(SemanticError::VoidNotAlone, loc);
                    }
                }
            }
        }
    }
}
