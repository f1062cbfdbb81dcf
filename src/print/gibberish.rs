//! Pretty-printing an AST as a C/C++ declaration.
//!
//! C puts arrays and parameter lists on the right of the name but pointers
//! on the left, so a single pre-order walk is not enough: the walk descends
//! to the innermost node printing type heads and left-side operators, then
//! `print_postfix` climbs back out emitting brackets, parameter lists, and
//! the parentheses that keep pointers bound to the right thing. Consecutive
//! pointers collapse (`**a`, not `*(*a)`), and Apple blocks print `(^name)`.

use std::fmt::{self, Write};

use crate::ast::{ArraySize, Ast, Kind, KindSet, NodeId, VisitDir};
use crate::lang::{cpp_min, LangIds};
use crate::parse::TypedefFlavor;
use crate::typedefs::Typedef;
use crate::types::TypeId;
use crate::Session;

use super::{attribute_prefix, graph_token, type_name_c, GibFlags};

struct GibState<'s> {
    session: &'s Session,
    ast: &'s Ast,
    flags: GibFlags,
    postfix: bool,
    printed_space: bool,
    printing_typedef: bool,
    skip_name_for_using: bool,
}

/// Writes the gibberish for a declaration or cast target.
pub fn write_gibberish(
    session: &Session,
    ast: &Ast,
    root: NodeId,
    flags: GibFlags,
    out: &mut String,
) -> fmt::Result {
    if !flags.contains(GibFlags::CAST) {
        write!(out, "{}", attribute_prefix(session, ast.node(root).type_id))?;
        match ast.node(root).align {
            crate::ast::Alignment::None => {}
            crate::ast::Alignment::Expr(n) => {
                write!(out, "{}({}) ", alignas_spelling(session.opt.lang), n)?;
            }
            crate::ast::Alignment::Type(t) => {
                write!(out, "{}(", alignas_spelling(session.opt.lang))?;
                write_gibberish(session, ast, t, GibFlags::CAST, out)?;
                write!(out, ") ")?;
            }
        }
    }
    let mut g = GibState::new(session, ast, flags, false);
    g.print_ast(root, out)
}

/// Writes a registry entry the way `show` does: scope wrappers, the
/// `typedef` or `using` head, the body, and the closing braces.
pub fn write_typedef(
    session: &Session,
    tdef: &Typedef,
    flavor: TypedefFlavor,
    out: &mut String,
) -> fmt::Result {
    let sname = &tdef.sname;
    let mut close_braces = 0;
    let mut scope_type = TypeId::NONE;

    if sname.count() > 1 {
        scope_type = sname.scope_type();
        if scope_type.is_empty() || scope_type == TypeId::SCOPE {
            scope_type = TypeId::NAMESPACE;
        }
        let nested_ok = scope_type != TypeId::NAMESPACE
            || cpp_min(LangIds::CPP_17).contains(session.opt.lang)
            || session.opt.lang.is_c();
        if nested_ok {
            // C++17 nested-namespace form: namespace A::B { ... }
            write!(out, "{} {} {{ ", scope_type.name(), sname.scope_name())?;
            close_braces = 1;
        } else {
            for seg in &sname.segments()[..sname.count() - 1] {
                let mut seg_type = seg.type_id;
                if seg_type.is_empty() || seg_type == TypeId::SCOPE {
                    seg_type = TypeId::NAMESPACE;
                }
                write!(out, "{} {} {{ ", seg_type.name(), seg.name)?;
            }
            close_braces = sname.count() - 1;
        }
    }

    // an entry like `class std::string` is its own elaborated type; it needs
    // no `typedef` keyword in front
    let is_self_ecsu = match &tdef.ast.node(tdef.root).kind {
        Kind::Ecsu { ecsu_sname, .. } => *ecsu_sname == tdef.sname,
        _ => false,
    };
    let printing_typedef = flavor == TypedefFlavor::Typedef && !is_self_ecsu;
    let printing_using = flavor == TypedefFlavor::Using && !is_self_ecsu;

    if printing_typedef {
        write!(out, "typedef ")?;
    } else if printing_using {
        write!(out, "using {} = ", sname.local_name())?;
    }

    let flags = if printing_using {
        GibFlags::USING
    } else {
        GibFlags::TYPEDEF
    };
    let mut g = GibState::new(session, &tdef.ast, flags, printing_typedef);
    g.skip_name_for_using = printing_using;
    g.print_ast(tdef.root, out)?;

    if close_braces > 0 {
        write!(out, ";")?;
        for _ in 0..close_braces {
            write!(out, " }}")?;
        }
    }
    if session.opt.semicolon && scope_type != TypeId::NAMESPACE && close_braces == 0 {
        write!(out, ";")?;
    }
    Ok(())
}

fn alignas_spelling(lang: LangIds) -> &'static str {
    if lang.is_cpp() || lang == LangIds::C_23 {
        "alignas"
    } else {
        "_Alignas"
    }
}

impl<'s> GibState<'s> {
    fn new(
        session: &'s Session,
        ast: &'s Ast,
        flags: GibFlags,
        printing_typedef: bool,
    ) -> GibState<'s> {
        GibState {
            session,
            ast,
            flags,
            postfix: false,
            printed_space: flags.contains(GibFlags::OMIT_TYPE),
            printing_typedef,
            skip_name_for_using: flags.contains(GibFlags::USING),
        }
    }

    fn lang(&self) -> LangIds {
        self.session.opt.lang
    }

    fn space_once(&mut self, out: &mut String) -> fmt::Result {
        if !self.printed_space {
            self.printed_space = true;
            write!(out, " ")?;
        }
        Ok(())
    }

    fn print_ast(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        let node = self.ast.node(id);
        match &node.kind {
            Kind::Placeholder => unreachable!("placeholder in a completed AST"),

            Kind::Constructor { .. } | Kind::Destructor | Kind::UserDefConversion { .. } => {
                // no return type, so no space is needed before the name
                self.printed_space = true;
                self.function_like(id, out)
            }
            Kind::Block { .. }
            | Kind::Function { .. }
            | Kind::Operator { .. }
            | Kind::Lambda { .. }
            | Kind::UserDefLiteral { .. } => self.function_like(id, out),

            Kind::Array { .. } => {
                let head = node.type_id - TypeId::MASK_ATTRIBUTE;
                if !head.is_empty() {
                    write!(out, "{} ", type_name_c(self.session, head))?;
                }
                if let Some(of) = node.kind.chain_child() {
                    self.print_ast(of, out)?;
                }
                self.postfix_trigger(id, out)
            }

            Kind::Builtin { .. } => {
                if !self.flags.contains(GibFlags::OMIT_TYPE) {
                    let cv = node.type_id & TypeId::CV;
                    let mut head = node.type_id - cv - TypeId::MASK_ATTRIBUTE;
                    if head.base().is_empty() {
                        // implicit int spells itself out in gibberish
                        head |= TypeId::INT;
                    }
                    write!(out, "{}", type_name_c(self.session, head))?;
                    if !cv.is_empty() {
                        write!(out, " {}", cv.name())?;
                    }
                }
                self.print_space_ast_name(id, out)?;
                self.print_bit_width(id, out)
            }

            Kind::Ecsu { ecsu_sname, of, .. } => {
                let mut type_id = node.type_id - TypeId::MASK_ATTRIBUTE;
                if type_id.contains(TypeId::ENUM) {
                    // an elaborated-type-specifier writes `enum`, never
                    // `enum class`
                    type_id -= TypeId::STRUCT | TypeId::CLASS;
                }
                let cv = type_id & TypeId::CV;
                let head = if self.session.opt.east_const {
                    type_id - cv
                } else {
                    type_id
                };
                write!(out, "{}", type_name_c(self.session, head))?;
                if !self.flags.contains(GibFlags::TYPEDEF) || self.printing_typedef {
                    write!(out, " {}", ecsu_sname)?;
                }
                if let Some(of) = of {
                    write!(out, " : ")?;
                    self.print_ast(*of, out)?;
                }
                if self.session.opt.east_const && !cv.is_empty() {
                    write!(out, " {}", cv.name())?;
                }
                self.print_space_ast_name(id, out)?;
                self.print_bit_width(id, out)
            }

            Kind::Name => {
                // in C89-C17 a bare parameter name is implicitly int
                if self.lang() != LangIds::C_KNR {
                    write!(out, "int")?;
                }
                if !self.flags.contains(GibFlags::CAST) {
                    if self.lang() != LangIds::C_KNR {
                        write!(out, " ")?;
                    }
                    self.print_ast_name(id, out)?;
                }
                Ok(())
            }

            Kind::Pointer { .. } | Kind::Reference { .. } | Kind::RvalueReference { .. } => {
                if !self.flags.contains(GibFlags::OMIT_TYPE) {
                    let storage = node.type_id & TypeId::MASK_STORAGE;
                    if !storage.is_empty() {
                        write!(out, "{} ", storage.name())?;
                    }
                }
                if let Some(to) = node.kind.chain_child() {
                    self.print_ast(to, out)?;
                }
                if self.space_before_ptr_ref(id) {
                    self.space_once(out)?;
                }
                if !self.postfix {
                    self.print_qual_name(id, out)?;
                }
                Ok(())
            }

            Kind::PointerToMember { .. } => {
                if let Some(of) = node.kind.chain_child() {
                    self.print_ast(of, out)?;
                }
                if !self.postfix {
                    write!(out, " ")?;
                    self.printed_space = true;
                    self.print_qual_name(id, out)?;
                }
                Ok(())
            }

            Kind::Typedef { def, .. } => {
                if !self.flags.contains(GibFlags::OMIT_TYPE) {
                    let extra = node.type_id - TypeId::TYPEDEF_TYPE - TypeId::MASK_ATTRIBUTE;
                    let cv = extra & TypeId::CV;
                    let front = if self.session.opt.east_const {
                        extra - cv
                    } else {
                        extra
                    };
                    if !front.is_empty() {
                        write!(out, "{} ", type_name_c(self.session, front))?;
                    }
                    write!(out, "{}", self.session.typedefs.get(*def).sname)?;
                    if self.session.opt.east_const && !cv.is_empty() {
                        write!(out, " {}", cv.name())?;
                    }
                }
                self.print_space_ast_name(id, out)?;
                self.print_bit_width(id, out)
            }

            Kind::Variadic => write!(out, "..."),
        }
    }

    /// Function-like nodes: print the head type stripped of everything that
    /// belongs after the parameter list, recurse into the return type, then
    /// emit the tail.
    fn function_like(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        let node = self.ast.node(id);
        let type_id = node.type_id;

        let cv_qual = type_id & TypeId::MASK_QUALIFIER;
        let is_default = type_id.contains(TypeId::DEFAULT);
        let is_delete = type_id.contains(TypeId::DELETE);
        let is_final = type_id.contains(TypeId::FINAL);
        let mut is_noexcept = type_id.contains(TypeId::NOEXCEPT);
        let is_pure_virtual = type_id.contains(TypeId::PURE_VIRTUAL);
        let mut is_throw = type_id.contains(TypeId::THROW);
        let ref_qual = type_id & TypeId::MASK_REF_QUALIFIER;
        // `override` should be printed only if `final` isn't
        let is_override = !is_final && type_id.contains(TypeId::OVERRIDE);

        let mut head = type_id
            - (TypeId::MASK_QUALIFIER
                | TypeId::DEFAULT
                | TypeId::DELETE
                | TypeId::FINAL
                | TypeId::NOEXCEPT
                | TypeId::OVERRIDE
                | TypeId::PURE_VIRTUAL
                | TypeId::THROW
                | TypeId::MASK_REF_QUALIFIER
                | TypeId::MASK_ATTRIBUTE
                | TypeId::APPLE_BLOCK);
        // if either `override` or `final` is printed, `virtual` shouldn't be
        if is_override || is_final {
            head -= TypeId::VIRTUAL;
        }

        // exception specifications follow the dialect
        if !cpp_min(LangIds::CPP_11).contains(self.lang()) {
            if is_noexcept {
                is_noexcept = false;
                is_throw = true;
            }
        } else if is_throw {
            is_throw = false;
            is_noexcept = true;
        }

        if !head.is_empty() {
            write!(out, "{} ", type_name_c(self.session, head))?;
        }
        if let Kind::UserDefConversion { .. } = node.kind {
            if !node.sname.is_empty() && node.sname.count() > 1 {
                write!(out, "{}::", node.sname.scope_name())?;
            }
            write!(out, "operator ")?;
        }
        if let Some(child) = node.kind.chain_child() {
            self.print_ast(child, out)?;
        }
        self.postfix_trigger(id, out)?;

        if !cv_qual.is_empty() {
            write!(out, " {}", cv_qual.name())?;
        }
        if !ref_qual.is_empty() {
            if self.session.opt.alt_tokens {
                let word = if ref_qual.contains(TypeId::REFERENCE) {
                    "bitand"
                } else {
                    "and"
                };
                write!(out, " {}", word)?;
            } else if ref_qual.contains(TypeId::REFERENCE) {
                write!(out, " &")?;
            } else {
                write!(out, " &&")?;
            }
        }
        if is_noexcept {
            write!(out, " noexcept")?;
        } else if is_throw {
            write!(out, " throw()")?;
        }
        if is_override {
            write!(out, " override")?;
        } else if is_final {
            write!(out, " final")?;
        } else if is_pure_virtual {
            write!(out, " = 0")?;
        }
        if is_default {
            write!(out, " = default")?;
        } else if is_delete {
            write!(out, " = delete")?;
        }
        Ok(())
    }

    fn postfix_trigger(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        if !self.postfix {
            self.postfix = true;
            if !self.skip_name_for_using && !self.flags.contains(GibFlags::CAST) {
                self.space_once(out)?;
            }
            self.print_postfix(id, out)?;
        }
        Ok(())
    }

    /// Climbs out of the innermost node printing the right-side pieces in
    /// root-to-leaf order, parenthesizing where a pointer-like parent binds a
    /// suffix-bearing child.
    fn print_postfix(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        let node = self.ast.node(id);
        match node.parent {
            Some(parent) => {
                let parent_kind = self.ast.node(parent).kind.kind_set();
                if parent_kind.intersects(KindSet::ARRAY | KindSet::ANY_FUNCTION_LIKE) {
                    self.print_postfix(parent, out)?;
                } else if parent_kind
                    .intersects(KindSet::ANY_POINTER | KindSet::ANY_REFERENCE)
                {
                    if node.kind.is(KindSet::BLOCK) {
                        write!(out, "(^")?;
                    } else if node.kind.is(KindSet::POINTER) {
                        // consecutive pointers need no extra parentheses
                    } else {
                        write!(out, "(")?;
                    }
                    self.print_qual_name(parent, out)?;
                    if let Some(grandparent) = self.ast.node(parent).parent {
                        if self
                            .ast
                            .node(grandparent)
                            .kind
                            .is(KindSet::ANY_PARENT)
                        {
                            self.print_postfix(parent, out)?;
                        }
                    }
                    if !node.kind.is(KindSet::ANY_POINTER) {
                        write!(out, ")")?;
                    }
                }
                // object-like parents contribute nothing here
            }
            None => {
                // the root carries the declared name
                if node.kind.is(KindSet::BLOCK) {
                    write!(out, "(^")?;
                    self.print_space_ast_name(id, out)?;
                    write!(out, ")")?;
                } else {
                    self.print_space_ast_name(id, out)?;
                }
            }
        }

        // unwinding: sizes and parameter lists print root-to-leaf
        match &node.kind {
            Kind::Array { .. } => self.print_array_size(id, out),
            Kind::Block { params, .. }
            | Kind::Function { params, .. }
            | Kind::Operator { params, .. }
            | Kind::Lambda { params, .. }
            | Kind::UserDefLiteral { params, .. }
            | Kind::Constructor { params } => {
                write!(out, "(")?;
                self.print_ast_list(params, out)?;
                write!(out, ")")
            }
            Kind::Destructor | Kind::UserDefConversion { .. } => write!(out, "()"),
            _ => Ok(()),
        }
    }

    /// A pointer/reference operator, its qualifiers, and the name if this
    /// node holds one.
    fn print_qual_name(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        let node = self.ast.node(id);
        let quals = node.type_id & TypeId::MASK_QUALIFIER;
        match &node.kind {
            Kind::Pointer { .. } => {
                if !quals.is_empty()
                    && !self.flags.contains(GibFlags::CAST)
                    && !self.is_ptr_to_function(id)
                {
                    self.space_once(out)?;
                }
                write!(out, "*")?;
            }
            Kind::PointerToMember { class_sname, .. } => {
                write!(out, "{}::*", class_sname)?;
            }
            Kind::Reference { .. } => {
                if self.session.opt.alt_tokens {
                    self.space_once(out)?;
                    write!(out, "bitand ")?;
                } else {
                    write!(out, "&")?;
                }
            }
            Kind::RvalueReference { .. } => {
                if self.session.opt.alt_tokens {
                    self.space_once(out)?;
                    write!(out, "and ")?;
                } else {
                    write!(out, "&&")?;
                }
            }
            _ => {}
        }
        if !quals.is_empty() {
            write!(out, "{}", quals.name())?;
            if self
                .flags
                .intersects(GibFlags::DECL | GibFlags::TYPEDEF)
                && self.ast.find_name(id, VisitDir::Up).is_some()
            {
                // char *const p needs the space after the qualifier
                write!(out, " ")?;
                self.printed_space = true;
            }
        }
        self.print_ast_name(id, out)
    }

    fn print_space_ast_name(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        if self.flags.contains(GibFlags::CAST) {
            return Ok(()); // casts have no name
        }
        let node = self.ast.node(id);
        match &node.kind {
            Kind::Constructor { .. } => write!(out, "{}", node.sname),
            Kind::Destructor => {
                if node.sname.count() > 1 {
                    write!(out, "{}::", node.sname.scope_name())?;
                }
                if self.session.opt.alt_tokens {
                    write!(out, "compl ")?;
                } else {
                    write!(out, "~")?;
                }
                write!(out, "{}", node.sname.local_name())
            }
            Kind::Operator { oper, .. } => {
                self.space_once(out)?;
                if !node.sname.is_empty() {
                    write!(out, "{}::", node.sname)?;
                }
                write!(out, "operator{}", oper)
            }
            Kind::UserDefConversion { .. } => Ok(()),
            Kind::UserDefLiteral { .. } => {
                self.space_once(out)?;
                if node.sname.count() > 1 {
                    write!(out, "{}::", node.sname.scope_name())?;
                }
                write!(out, "operator\"\" {}", node.sname.local_name())
            }
            _ => {
                if !node.sname.is_empty() {
                    if !self.skip_name_for_using {
                        self.space_once(out)?;
                    }
                    self.print_ast_name(id, out)?;
                }
                Ok(())
            }
        }
    }

    fn print_ast_name(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        if self.skip_name_for_using {
            // the name was already printed right after `using`
            self.skip_name_for_using = false;
            self.printed_space = true;
            return Ok(());
        }
        let node = self.ast.node(id);
        if self.flags.contains(GibFlags::TYPEDEF) {
            // scope names were printed by the typedef wrapper
            write!(out, "{}", node.sname.local_name())
        } else {
            write!(out, "{}", node.sname)
        }
    }

    fn print_array_size(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        write!(out, "{}", graph_token(self.session, "["))?;
        if let Kind::Array { size, quals, .. } = &self.ast.node(id).kind {
            if !quals.is_empty() {
                write!(out, "{} ", quals.name())?;
            }
            match size {
                ArraySize::Unspecified => {}
                ArraySize::Variable => write!(out, "*")?,
                ArraySize::Fixed(n) => write!(out, "{}", n)?,
            }
        }
        write!(out, "{}", graph_token(self.session, "]"))
    }

    fn print_ast_list(&mut self, params: &[NodeId], out: &mut String) -> fmt::Result {
        let mut comma = false;
        for &param in params {
            if comma {
                write!(out, ", ")?;
            }
            comma = true;
            let mut sub = GibState::new(
                self.session,
                self.ast,
                self.flags - GibFlags::OMIT_TYPE - GibFlags::USING,
                false,
            );
            sub.print_ast(param, out)?;
        }
        Ok(())
    }

    /// Whether to print a space before `*`, `&`, or `&&`: only in named
    /// declarations, so `type *var` but `func(char*)` and `(int*)x`.
    fn space_before_ptr_ref(&self, id: NodeId) -> bool {
        if self.skip_name_for_using || self.flags.contains(GibFlags::CAST) {
            return false;
        }
        self.ast.find_name(id, VisitDir::Up).is_some()
    }

    fn is_ptr_to_function(&self, id: NodeId) -> bool {
        match self.ast.node(id).kind {
            Kind::Pointer { to: Some(to) } => {
                self.ast.node(to).kind.is(KindSet::ANY_FUNCTION_LIKE)
            }
            _ => false,
        }
    }

    fn print_bit_width(&mut self, id: NodeId, out: &mut String) -> fmt::Result {
        let width = self.ast.bit_width(id);
        if width > 0 {
            write!(out, " : {}", width)?;
        }
        Ok(())
    }
}
