//! The registry of named types.
//!
//! Entries are immutable once inserted and own their definition's arena, so
//! a `Typedef` reference inside some later parse can always be resolved
//! without lifetime gymnastics. Redefinition with a structurally identical
//! AST is a no-op; anything else is a conflict.

use std::collections::HashMap;

use crate::ast::{Ast, Kind, NodeId, ScopedName};
use crate::lang::{c_min, cpp_min, LangIds};
use crate::types::TypeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypedefId(u32);

#[derive(Clone, Debug)]
pub struct Typedef {
    pub sname: ScopedName,
    pub ast: Ast,
    pub root: NodeId,
    /// The dialects this name is predefined in; `ANY` for user definitions.
    pub lang_ids: LangIds,
    pub user_defined: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TypedefRegistry {
    defs: Vec<Typedef>,
    by_name: HashMap<ScopedName, TypedefId>,
}

impl TypedefRegistry {
    pub fn new() -> TypedefRegistry {
        Default::default()
    }

    /// Inserts a definition. Redefining a name with a structurally equal AST
    /// returns the existing entry; a different AST is rejected.
    pub fn define(&mut self, tdef: Typedef) -> Result<TypedefId, Typedef> {
        if let Some(&existing) = self.by_name.get(&tdef.sname) {
            let old = &self.defs[existing.0 as usize];
            return if old.ast.eq_structure(old.root, &tdef.ast, tdef.root) {
                Ok(existing)
            } else {
                Err(tdef)
            };
        }
        let id = TypedefId(self.defs.len() as u32);
        self.by_name.insert(tdef.sname.clone(), id);
        self.defs.push(tdef);
        Ok(id)
    }

    pub fn lookup(&self, sname: &ScopedName) -> Option<TypedefId> {
        self.by_name.get(sname).copied()
    }

    pub fn get(&self, id: TypedefId) -> &Typedef {
        &self.defs[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypedefId, &Typedef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, t)| (TypedefId(i as u32), t))
    }

    /// Every known name, for completion and "did you mean".
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.defs.iter().map(|t| t.sname.to_string())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Seeds the registry with the usual suspects from `<stddef.h>`,
/// `<stdint.h>`, and `std::`.
pub fn seed_predefined(reg: &mut TypedefRegistry) {
    let c89 = c_min(LangIds::C_89) | LangIds::CPP_ANY;
    let c99 = c_min(LangIds::C_99) | cpp_min(LangIds::CPP_11);
    let builtins: &[(&str, TypeId, LangIds)] = &[
        ("size_t", TypeId::UNSIGNED | TypeId::LONG, c89),
        ("ptrdiff_t", TypeId::LONG, c89),
        ("ssize_t", TypeId::LONG, c_min(LangIds::C_89)),
        ("int8_t", TypeId::SIGNED | TypeId::CHAR, c99),
        ("int16_t", TypeId::SHORT, c99),
        ("int32_t", TypeId::INT, c99),
        ("int64_t", TypeId::LONG, c99),
        ("uint8_t", TypeId::UNSIGNED | TypeId::CHAR, c99),
        ("uint16_t", TypeId::UNSIGNED | TypeId::SHORT, c99),
        ("uint32_t", TypeId::UNSIGNED | TypeId::INT, c99),
        ("uint64_t", TypeId::UNSIGNED | TypeId::LONG, c99),
        ("intptr_t", TypeId::LONG, c99),
        ("uintptr_t", TypeId::UNSIGNED | TypeId::LONG, c99),
        (
            "intmax_t",
            TypeId::LONG | TypeId::LONG_LONG,
            c99,
        ),
        (
            "uintmax_t",
            TypeId::UNSIGNED | TypeId::LONG | TypeId::LONG_LONG,
            c99,
        ),
        ("wint_t", TypeId::UNSIGNED | TypeId::INT, c_min(LangIds::C_95) | LangIds::CPP_ANY),
    ];
    for &(name, type_id, lang_ids) in builtins {
        let sname = ScopedName::one(name.into());
        let mut ast = Ast::new();
        let root = ast.new_node(Kind::Builtin { bit_width: 0 }, type_id, Default::default());
        ast.node_mut(root).sname = sname.clone();
        let _ = reg.define(Typedef {
            sname,
            ast,
            root,
            lang_ids,
            user_defined: false,
        });
    }

    let classes: &[(&[&str], LangIds)] = &[
        (&["std", "string"], LangIds::CPP_ANY),
        (&["std", "wstring"], LangIds::CPP_ANY),
        (&["std", "istream"], LangIds::CPP_ANY),
        (&["std", "ostream"], LangIds::CPP_ANY),
        (&["std", "nullptr_t"], cpp_min(LangIds::CPP_11)),
    ];
    for &(path, lang_ids) in classes {
        let mut sname = ScopedName::new();
        for (i, &seg) in path.iter().enumerate() {
            let scope_type = if i + 1 == path.len() {
                TypeId::CLASS
            } else {
                TypeId::NAMESPACE
            };
            sname.push(scope_type, seg.into());
        }
        let mut ast = Ast::new();
        let root = ast.new_node(
            Kind::Ecsu {
                ecsu_sname: sname.clone(),
                of: None,
                bit_width: 0,
            },
            TypeId::CLASS,
            Default::default(),
        );
        ast.node_mut(root).sname = sname.clone();
        let _ = reg.define(Typedef {
            sname,
            ast,
            root,
            lang_ids,
            user_defined: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_typedef(name: &str, type_id: TypeId) -> Typedef {
        let mut ast = Ast::new();
        let root = ast.new_node(Kind::Builtin { bit_width: 0 }, type_id, Default::default());
        Typedef {
            sname: ScopedName::one(name.into()),
            ast,
            root,
            lang_ids: LangIds::ANY,
            user_defined: true,
        }
    }

    #[test]
    fn identical_redefinition_is_noop() {
        let mut reg = TypedefRegistry::new();
        let first = reg.define(int_typedef("word", TypeId::INT)).unwrap();
        let second = reg.define(int_typedef("word", TypeId::INT)).unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn conflicting_redefinition_fails() {
        let mut reg = TypedefRegistry::new();
        reg.define(int_typedef("word", TypeId::INT)).unwrap();
        assert!(reg.define(int_typedef("word", TypeId::UNSIGNED)).is_err());
    }

    #[test]
    fn predefined_are_gated() {
        let mut reg = TypedefRegistry::new();
        seed_predefined(&mut reg);
        let id = reg.lookup(&ScopedName::one("int32_t".into())).unwrap();
        let tdef = reg.get(id);
        assert!(!tdef.lang_ids.contains(LangIds::C_89));
        assert!(tdef.lang_ids.contains(LangIds::C_99));
        assert!(!tdef.user_defined);
    }
}
