//! The two printers and their shared plumbing.

pub mod english;
pub mod gibberish;

use bitflags::bitflags;

use crate::lang::{c_min, cpp_max, LangIds};
use crate::types::TypeId;
use crate::{Graphs, Session};

bitflags! {
    /// What kind of gibberish is being produced.
    pub struct GibFlags: u8 {
        /// A full declaration.
        const DECL      = 1 << 0;
        /// A cast: no names are printed.
        const CAST      = 1 << 1;
        /// The body of a `typedef`.
        const TYPEDEF   = 1 << 2;
        /// The body of a `using` declaration.
        const USING     = 1 << 3;
        /// Skip the type head (used for parameters of `using` bodies).
        const OMIT_TYPE = 1 << 4;
    }
}

/// Substitutes the digraph or trigraph spelling of a bracket token when the
/// mode and dialect call for it.
pub fn graph_token(session: &Session, token: &'static str) -> &'static str {
    if session.opt.alt_tokens {
        return token;
    }
    match session.opt.graphs {
        Graphs::None => token,
        Graphs::Di => {
            if !c_min(LangIds::C_95).contains(session.opt.lang) && !session.opt.lang.is_cpp() {
                return token;
            }
            match token {
                "[" => "<:",
                "]" => ":>",
                "[[" => "<:<:",
                "]]" => ":>:>",
                "{" => "<%",
                "}" => "%>",
                _ => token,
            }
        }
        Graphs::Tri => {
            let ok = c_min(LangIds::C_89) | cpp_max(LangIds::CPP_14);
            if !ok.contains(session.opt.lang) {
                return token;
            }
            match token {
                "[" => "??(",
                "]" => "??)",
                "[[" => "??(??(",
                "]]" => "??)??)",
                "{" => "??<",
                "}" => "??>",
                _ => token,
            }
        }
    }
}

/// The C spelling of a type head, applying the explicit-`int` option: with
/// the right mask bits set, `unsigned` prints as `unsigned int`.
pub fn type_name_c(session: &Session, type_id: TypeId) -> String {
    let mut t = type_id;
    let modifiers =
        TypeId::SHORT | TypeId::LONG | TypeId::LONG_LONG | TypeId::SIGNED | TypeId::UNSIGNED;
    if !t.contains(TypeId::INT) && t.base().intersects(modifiers) && t.base() - modifiers == TypeId::NONE {
        let wants = if t.contains(TypeId::UNSIGNED) {
            session.opt.explicit_int.contains(TypeId::UNSIGNED)
        } else {
            session.opt.explicit_int.contains(TypeId::SIGNED)
        };
        if wants {
            t |= TypeId::INT;
        }
    }
    t.name()
}

/// The attribute-specifier prefix (`[[nodiscard]] `), empty when the node
/// carries no attributes or the dialect predates them.
pub fn attribute_prefix(session: &Session, type_id: TypeId) -> String {
    let attrs = type_id.attributes();
    if attrs.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = [
        TypeId::CARRIES_DEPENDENCY,
        TypeId::DEPRECATED,
        TypeId::MAYBE_UNUSED,
        TypeId::NODISCARD,
        TypeId::NORETURN,
    ]
    .iter()
    .filter(|&&bit| attrs.contains(bit))
    .map(|&bit| bit.bit_name())
    .collect();
    format!(
        "{}{}{} ",
        graph_token(session, "[["),
        names.join(", "),
        graph_token(session, "]]")
    )
}
