//! Combinators for assembling declaration ASTs while a parse is in flight.
//!
//! A partial declarator is a chain with exactly one `Placeholder` leaf: the
//! hole where the not-yet-seen type will go. `(*a)` parses to
//! `pointer -> hole`; the later `[10]` grafts an array into the hole (the
//! hole moves under the array), and the type specifier finally patches the
//! hole away. After any top-level build completes, no placeholder survives.

use log::trace;

use super::{Ast, Kind, KindSet, NodeId, ScopedName, VisitDir};
use crate::data::lex::Location;
use crate::typedefs::TypedefRegistry;
use crate::types::TypeId;

/// A node in some arena, possibly not the one a check started in (typedefs
/// own their definitions).
#[derive(Copy, Clone)]
pub struct AstView<'a> {
    pub ast: &'a Ast,
    pub id: NodeId,
}

impl<'a> AstView<'a> {
    pub fn new(ast: &'a Ast, id: NodeId) -> AstView<'a> {
        AstView { ast, id }
    }
    pub fn node(&self) -> &'a super::AstNode {
        self.ast.node(self.id)
    }
}

pub fn placeholder(ast: &mut Ast, loc: Location) -> NodeId {
    ast.new_node(Kind::Placeholder, TypeId::NONE, loc)
}

/// Replaces the placeholder in `decl` with `type_root`, returning the final
/// root. `type_root` must not already be attached anywhere; when `decl` has
/// no placeholder left (or is absent) the type stands alone.
pub fn patch_placeholder(ast: &mut Ast, type_root: NodeId, decl: Option<NodeId>) -> NodeId {
    debug_assert!(ast.node(type_root).parent.is_none());
    let decl_root = match decl {
        None => return type_root,
        Some(d) => d,
    };
    let hole = match ast.find_kind_any(decl_root, VisitDir::Down, KindSet::PLACEHOLDER) {
        None => return decl_root,
        Some(h) => h,
    };
    trace!("patching node {:?} into hole {:?}", type_root, hole);
    match ast.node(hole).parent {
        // the whole declarator was just a hole
        None => type_root,
        Some(parent) => {
            ast.set_chain_child(parent, type_root);
            decl_root
        }
    }
}

/// Grafts `new_node` into the hole of `root`; the hole becomes the graft's
/// own spine child, so the partial AST keeps exactly one hole.
fn graft(ast: &mut Ast, root: Option<NodeId>, new_node: NodeId) -> NodeId {
    let root = match root {
        None => {
            let hole = placeholder(ast, ast.node(new_node).loc);
            ast.set_chain_child(new_node, hole);
            return new_node;
        }
        Some(r) => r,
    };
    match ast.find_kind_any(root, VisitDir::Down, KindSet::PLACEHOLDER) {
        Some(hole) => {
            let parent = ast.node(hole).parent;
            ast.set_chain_child(new_node, hole);
            match parent {
                None => new_node,
                Some(p) => {
                    ast.set_chain_child(p, new_node);
                    root
                }
            }
        }
        // no hole left: the graft goes on top
        None => {
            ast.set_chain_child(new_node, root);
            new_node
        }
    }
}

/// Adds an array to the AST being built. `array.of` must be empty on entry;
/// the return value is the new partial root.
pub fn add_array(ast: &mut Ast, root: Option<NodeId>, array: NodeId) -> NodeId {
    debug_assert!(ast.node(array).kind.chain_child().is_none());
    graft(ast, root, array)
}

/// Adds a function-like node. When the return type is already known (the
/// English grammar, or a trailing-return clause) it is attached directly;
/// otherwise the function's return slot becomes the hole.
pub fn add_func(ast: &mut Ast, root: Option<NodeId>, ret: Option<NodeId>, func: NodeId) -> NodeId {
    debug_assert!(ast.node(func).kind.chain_child().is_none());
    if let Some(ret) = ret {
        ast.set_chain_child(func, ret);
        match root {
            None => return func,
            Some(root) => {
                // graft a completed function into a pending declarator
                return match ast.find_kind_any(root, VisitDir::Down, KindSet::PLACEHOLDER) {
                    Some(hole) => match ast.node(hole).parent {
                        None => func,
                        Some(p) => {
                            ast.set_chain_child(p, func);
                            root
                        }
                    },
                    None => root,
                };
            }
        }
    }
    graft(ast, root, func)
}

/// Takes the name away from whichever spine node holds it, for grafting onto
/// another node.
pub fn take_name(ast: &mut Ast, root: NodeId) -> ScopedName {
    match ast.find_name(root, VisitDir::Down) {
        None => ScopedName::new(),
        Some(named) => std::mem::take(&mut ast.node_mut(named).sname),
    }
}

/// Takes any of the given type bits away from the spine, e.g. stripping
/// `typedef` out of `explain typedef int *p` so the storage prints at the
/// declaration level rather than on the pointee. Parameters keep their own
/// bits.
pub fn take_type_any(ast: &mut Ast, root: NodeId, mask: TypeId) -> TypeId {
    let mut taken = TypeId::NONE;
    let mut current = Some(root);
    while let Some(id) = current {
        let node = ast.node_mut(id);
        let found = node.type_id & mask;
        if !found.is_empty() {
            node.type_id -= found;
            taken |= found;
        }
        current = ast.node(id).kind.chain_child();
    }
    taken
}

/// Follows typedef references to the concrete definition.
pub fn untypedef<'a>(reg: &'a TypedefRegistry, ast: &'a Ast, id: NodeId) -> AstView<'a> {
    let mut view = AstView::new(ast, id);
    while let Kind::Typedef { def, .. } = view.node().kind {
        let tdef = reg.get(def);
        view = AstView::new(&tdef.ast, tdef.root);
    }
    view
}

/// Strips one pointer level, looking through typedefs.
pub fn unpointer<'a>(reg: &'a TypedefRegistry, ast: &'a Ast, id: NodeId) -> Option<AstView<'a>> {
    let view = untypedef(reg, ast, id);
    match view.node().kind {
        Kind::Pointer { to: Some(to) } => Some(untypedef(reg, view.ast, to)),
        _ => None,
    }
}

/// Strips one lvalue-reference level (not rvalue references), looking
/// through typedefs.
pub fn unreference<'a>(reg: &'a TypedefRegistry, ast: &'a Ast, id: NodeId) -> AstView<'a> {
    let view = untypedef(reg, ast, id);
    match view.node().kind {
        Kind::Reference { to: Some(to) } => untypedef(reg, view.ast, to),
        _ => view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ArraySize;

    fn loc() -> Location {
        Location::default()
    }

    fn int_node(ast: &mut Ast) -> NodeId {
        ast.new_node(Kind::Builtin { bit_width: 0 }, TypeId::INT, loc())
    }

    fn array_node(ast: &mut Ast, size: u32) -> NodeId {
        ast.new_node(
            Kind::Array {
                size: ArraySize::Fixed(size),
                quals: TypeId::NONE,
                of: None,
            },
            TypeId::NONE,
            loc(),
        )
    }

    fn assert_no_placeholders(ast: &Ast, root: NodeId) {
        assert!(!ast.contains_placeholder(root), "placeholder survived");
    }

    fn assert_parents_consistent(ast: &Ast, root: NodeId) {
        for id in ast.descendants(root) {
            let node = ast.node(id);
            if let Some(child) = node.kind.chain_child() {
                assert_eq!(ast.node(child).parent, Some(id));
            }
            for &param in node.kind.params() {
                assert_eq!(ast.node(param).parent, Some(id));
            }
        }
    }

    /// `(*a)[10]` then patching `int`: pointer to array 10 of int.
    #[test]
    fn pointer_to_array() {
        let mut ast = Ast::new();
        let hole = placeholder(&mut ast, loc());
        let ptr = ast.new_node(Kind::Pointer { to: None }, TypeId::NONE, loc());
        ast.set_chain_child(ptr, hole);

        let arr = array_node(&mut ast, 10);
        let root = add_array(&mut ast, Some(ptr), arr);
        assert_eq!(root, ptr);

        let int = int_node(&mut ast);
        let root = patch_placeholder(&mut ast, int, Some(root));
        assert_eq!(root, ptr);
        assert_no_placeholders(&ast, root);
        assert_parents_consistent(&ast, root);

        match ast.node(ptr).kind {
            Kind::Pointer { to: Some(to) } => assert_eq!(to, arr),
            _ => panic!("expected pointer"),
        }
        match ast.node(arr).kind {
            Kind::Array { of: Some(of), .. } => assert_eq!(of, int),
            _ => panic!("expected array"),
        }
    }

    /// `a[2][3]`: array 2 of array 3.
    #[test]
    fn array_of_array() {
        let mut ast = Ast::new();
        let hole = placeholder(&mut ast, loc());
        let a2 = array_node(&mut ast, 2);
        let root = add_array(&mut ast, Some(hole), a2);
        assert_eq!(root, a2);
        let a3 = array_node(&mut ast, 3);
        let root = add_array(&mut ast, Some(root), a3);
        assert_eq!(root, a2);

        let int = int_node(&mut ast);
        let root = patch_placeholder(&mut ast, int, Some(root));
        assert_no_placeholders(&ast, root);
        match ast.node(a2).kind {
            Kind::Array { of: Some(of), .. } => assert_eq!(of, a3),
            _ => panic!("expected array 2 of array 3"),
        }
    }

    /// `(*a[3])(...)`: array 3 of pointer to function.
    #[test]
    fn array_of_pointer_to_function() {
        let mut ast = Ast::new();
        // inner: *a[3] — the array suffix binds first, the pointer wraps it
        let hole = placeholder(&mut ast, loc());
        let a3 = array_node(&mut ast, 3);
        let root = add_array(&mut ast, Some(hole), a3);
        let ptr = ast.new_node(Kind::Pointer { to: None }, TypeId::NONE, loc());
        let inner_hole = placeholder(&mut ast, loc());
        ast.set_chain_child(ptr, inner_hole);
        let root = patch_placeholder(&mut ast, ptr, Some(root));
        assert_eq!(root, a3);

        // outer: function suffix
        let func = ast.new_node(
            Kind::Function {
                params: vec![],
                ret: None,
            },
            TypeId::NONE,
            loc(),
        );
        let root = add_func(&mut ast, Some(root), None, func);
        assert_eq!(root, a3);

        let int = int_node(&mut ast);
        let root = patch_placeholder(&mut ast, int, Some(root));
        assert_no_placeholders(&ast, root);
        assert_parents_consistent(&ast, root);

        // shape: array 3 -> pointer -> function -> int
        match ast.node(a3).kind {
            Kind::Array { of: Some(of), .. } => assert_eq!(of, ptr),
            _ => panic!("expected array"),
        }
        match ast.node(ptr).kind {
            Kind::Pointer { to: Some(to) } => assert_eq!(to, func),
            _ => panic!("expected pointer to function"),
        }
        match ast.node(func).kind {
            Kind::Function { ret: Some(ret), .. } => assert_eq!(ret, int),
            _ => panic!("expected function returning int"),
        }
    }

    #[test]
    fn take_name_moves() {
        let mut ast = Ast::new();
        let int = int_node(&mut ast);
        let ptr = ast.new_node(Kind::Pointer { to: None }, TypeId::NONE, loc());
        ast.set_chain_child(ptr, int);
        ast.node_mut(int).sname = ScopedName::one("x".into());

        let name = take_name(&mut ast, ptr);
        assert_eq!(name.to_string(), "x");
        assert!(ast.node(int).sname.is_empty());
    }
}
