//! Pretty-printing an AST as pseudo-English.
//!
//! A single pre-order walk down the declarator spine; every node contributes
//! a phrase and hands off to its child with "of", "to", or "returning". No
//! trailing punctuation is produced; the caller adds the newline.

use std::fmt::{self, Write};

use crate::ast::{ArraySize, Ast, Kind, KindSet, NodeId, VisitDir};
use crate::types::TypeId;
use crate::Session;

/// Writes the English for the type rooted at `id`; the declared name is not
/// part of the phrase (the caller says `declare <name> as` first).
pub fn write_english(
    session: &Session,
    ast: &Ast,
    id: NodeId,
    out: &mut String,
) -> fmt::Result {
    let node = ast.node(id);
    match &node.kind {
        Kind::Placeholder => unreachable!("placeholder in a completed AST"),
        Kind::Name => {
            // a K&R untyped parameter is just its name
            write!(out, "{}", node.sname)?;
        }
        Kind::Builtin { bit_width } => {
            let type_id = if node.type_id.base().is_empty() {
                node.type_id | TypeId::INT
            } else {
                node.type_id
            };
            write!(out, "{}", type_id.name_error())?;
            if *bit_width > 0 {
                write!(out, " width {} bits", bit_width)?;
            }
        }
        Kind::Ecsu {
            ecsu_sname,
            of,
            bit_width,
        } => {
            write!(out, "{} {}", node.type_id.name_error(), ecsu_sname)?;
            if let Some(of) = of {
                write!(out, " of type ")?;
                write_english(session, ast, *of, out)?;
            }
            if *bit_width > 0 {
                write!(out, " width {} bits", bit_width)?;
            }
        }
        Kind::Typedef { def, bit_width } => {
            let extra = node.type_id - TypeId::TYPEDEF_TYPE;
            if !extra.is_empty() {
                write!(out, "{} ", extra.name_error())?;
            }
            write!(out, "{}", session.typedefs.get(*def).sname)?;
            if *bit_width > 0 {
                write!(out, " width {} bits", bit_width)?;
            }
        }
        Kind::Variadic => {
            write!(out, "...")?;
        }
        Kind::Array { size, quals, of } => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            if *size == ArraySize::Variable {
                write!(out, "variable length ")?;
            }
            write!(out, "array ")?;
            if !quals.is_empty() {
                write!(out, "{} ", quals.name_error())?;
            }
            if let ArraySize::Fixed(n) = size {
                write!(out, "{} ", n)?;
            }
            write!(out, "of ")?;
            if let Some(of) = of {
                write_english(session, ast, *of, out)?;
            }
        }
        Kind::Pointer { to } | Kind::Reference { to } | Kind::RvalueReference { to } => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            write!(out, "{} to ", node.kind.name())?;
            if let Some(to) = to {
                write_english(session, ast, *to, out)?;
            }
        }
        Kind::PointerToMember { class_sname, of } => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            write!(out, "pointer to member of class {} of ", class_sname)?;
            if let Some(of) = of {
                write_english(session, ast, *of, out)?;
            }
        }
        Kind::Block { .. }
        | Kind::Function { .. }
        | Kind::Operator { .. }
        | Kind::Lambda { .. }
        | Kind::UserDefLiteral { .. } => {
            let storage = node.type_id - TypeId::MEMBER_ONLY - TypeId::APPLE_BLOCK;
            if !storage.is_empty() {
                write!(out, "{} ", storage.name_error())?;
            }
            // member-only bits read as e.g. "const member function"
            let member_bits = node.type_id & TypeId::MEMBER_ONLY;
            if !member_bits.is_empty() {
                write!(out, "{} ", member_bits.name_error())?;
                if node.kind.is(KindSet::FUNCTION | KindSet::OPERATOR) {
                    write!(out, "member ")?;
                }
            }
            match &node.kind {
                Kind::Block { .. } => write!(out, "block")?,
                Kind::Function { .. } => write!(out, "function")?,
                Kind::Operator { oper, .. } => write!(out, "operator {}", oper)?,
                Kind::Lambda { .. } => write!(out, "lambda")?,
                Kind::UserDefLiteral { .. } => write!(out, "user-defined literal")?,
                _ => unreachable!(),
            }
            write_params(session, ast, node.kind.params(), out)?;
            write!(out, " returning ")?;
            if let Some(ret) = node.kind.chain_child() {
                write_english(session, ast, ret, out)?;
            }
        }
        Kind::UserDefConversion { to } => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            write!(out, "user-defined conversion operator returning ")?;
            if let Some(to) = to {
                write_english(session, ast, *to, out)?;
            }
        }
        Kind::Constructor { params } => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            write!(out, "constructor")?;
            write_params(session, ast, params, out)?;
        }
        Kind::Destructor => {
            if !node.type_id.is_empty() {
                write!(out, "{} ", node.type_id.name_error())?;
            }
            write!(out, "destructor")?;
        }
    }
    Ok(())
}

/// `(x as int, y as int)`, `(char)`, `(x)`, or nothing when there are no
/// parameters.
fn write_params(
    session: &Session,
    ast: &Ast,
    params: &[NodeId],
    out: &mut String,
) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    write!(out, " (")?;
    let mut comma = false;
    for &param in params {
        if comma {
            write!(out, ", ")?;
        }
        comma = true;
        let node = ast.node(param);
        if !node.kind.is(KindSet::NAME) {
            if let Some(named) = ast.find_name(param, VisitDir::Down) {
                write!(out, "{} as ", ast.node(named).sname)?;
            }
        }
        write_english(session, ast, param, out)?;
    }
    write!(out, ")")
}
