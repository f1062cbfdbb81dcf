//! The declaration AST.
//!
//! Nodes live in an arena owned by the parse that built them; references are
//! indices, and every non-root node has a parent back-pointer. C declarator
//! syntax is inside-out, so the arena fills up in a surprising order — see
//! `build` for the combinators that keep the tree consistent while it does.

pub mod build;

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::data::lex::Location;
use crate::intern::InternedStr;
use crate::typedefs::TypedefId;
use crate::types::TypeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One segment of a scoped name: the scope's flavor (`namespace`, `class`,
/// plain `scope` when unknown) and its identifier.
#[derive(Clone, Debug)]
pub struct Scope {
    pub type_id: TypeId,
    pub name: InternedStr,
}

/// An ordered sequence of scopes, e.g. `std::chrono::duration`.
#[derive(Clone, Debug, Default)]
pub struct ScopedName {
    segments: Vec<Scope>,
}

impl ScopedName {
    pub fn new() -> ScopedName {
        Default::default()
    }
    pub fn one(name: InternedStr) -> ScopedName {
        let mut sname = ScopedName::new();
        sname.push(TypeId::NONE, name);
        sname
    }
    pub fn push(&mut self, type_id: TypeId, name: InternedStr) {
        self.segments.push(Scope { type_id, name });
    }
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
    pub fn count(&self) -> usize {
        self.segments.len()
    }
    pub fn segments(&self) -> &[Scope] {
        &self.segments
    }
    /// The last (innermost) identifier.
    pub fn local_name(&self) -> InternedStr {
        self.segments
            .last()
            .map(|s| s.name)
            .unwrap_or_default()
    }
    /// Everything but the last identifier, `::`-joined.
    pub fn scope_name(&self) -> String {
        crate::data::joined(
            self.segments[..self.segments.len().saturating_sub(1)]
                .iter()
                .map(|s| s.name),
            "::",
        )
    }
    pub fn first_type(&self) -> TypeId {
        self.segments
            .first()
            .map(|s| s.type_id)
            .unwrap_or(TypeId::NONE)
    }
    /// The type of the innermost enclosing scope (next-to-last segment).
    pub fn scope_type(&self) -> TypeId {
        if self.segments.len() < 2 {
            TypeId::NONE
        } else {
            self.segments[self.segments.len() - 2].type_id
        }
    }
    pub fn set_scope_types(&mut self, type_id: TypeId) {
        for seg in &mut self.segments[..] {
            if seg.type_id.is_empty() {
                seg.type_id = type_id;
            }
        }
    }
}

impl PartialEq for ScopedName {
    fn eq(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.name == b.name)
    }
}
impl Eq for ScopedName {}

impl Hash for ScopedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for seg in &self.segments {
            seg.name.hash(state);
        }
    }
}

impl Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            crate::data::joined(self.segments.iter().map(|s| s.name), "::")
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArraySize {
    /// `a[]`
    Unspecified,
    /// C99 `a[*]`
    Variable,
    Fixed(u32),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Alignment {
    None,
    /// `alignas(8)`
    Expr(u32),
    /// `alignas(T)`
    Type(NodeId),
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::None
    }
}

#[derive(Clone, Debug)]
pub enum Kind {
    /// Temporary node standing in for a type not yet known; must not appear
    /// in a completed AST.
    Placeholder,
    /// A bare identifier: a K&R untyped parameter.
    Name,
    Builtin {
        bit_width: u32,
    },
    /// `enum`/`class`/`struct`/`union`; `of` is the fixed underlying type of
    /// a C++11 enum, when given.
    Ecsu {
        ecsu_sname: ScopedName,
        of: Option<NodeId>,
        bit_width: u32,
    },
    Typedef {
        def: TypedefId,
        bit_width: u32,
    },
    Variadic,
    Array {
        size: ArraySize,
        /// C99 `[static const N]` parameter-position qualifiers.
        quals: TypeId,
        of: Option<NodeId>,
    },
    Pointer {
        to: Option<NodeId>,
    },
    Reference {
        to: Option<NodeId>,
    },
    RvalueReference {
        to: Option<NodeId>,
    },
    PointerToMember {
        class_sname: ScopedName,
        of: Option<NodeId>,
    },
    /// Apple block (`^`).
    Block {
        params: Vec<NodeId>,
        ret: Option<NodeId>,
    },
    Function {
        params: Vec<NodeId>,
        ret: Option<NodeId>,
    },
    Operator {
        oper: InternedStr,
        params: Vec<NodeId>,
        ret: Option<NodeId>,
    },
    Lambda {
        params: Vec<NodeId>,
        ret: Option<NodeId>,
    },
    UserDefConversion {
        to: Option<NodeId>,
    },
    UserDefLiteral {
        params: Vec<NodeId>,
        ret: Option<NodeId>,
    },
    Constructor {
        params: Vec<NodeId>,
    },
    Destructor,
}

bitflags! {
    /// One bit per node kind, so "is this node one of..." is a mask test.
    pub struct KindSet: u32 {
        const PLACEHOLDER        = 1 << 0;
        const NAME               = 1 << 1;
        const BUILTIN            = 1 << 2;
        const ECSU               = 1 << 3;
        const TYPEDEF            = 1 << 4;
        const VARIADIC           = 1 << 5;
        const ARRAY              = 1 << 6;
        const POINTER            = 1 << 7;
        const POINTER_TO_MEMBER  = 1 << 8;
        const REFERENCE          = 1 << 9;
        const RVALUE_REFERENCE   = 1 << 10;
        const CONSTRUCTOR        = 1 << 11;
        const DESTRUCTOR         = 1 << 12;
        const BLOCK              = 1 << 13;
        const FUNCTION           = 1 << 14;
        const OPERATOR           = 1 << 15;
        const LAMBDA             = 1 << 16;
        const USER_DEF_CONVERSION = 1 << 17;
        const USER_DEF_LITERAL   = 1 << 18;

        const ANY_POINTER        = Self::POINTER.bits | Self::POINTER_TO_MEMBER.bits;
        const ANY_REFERENCE      = Self::REFERENCE.bits | Self::RVALUE_REFERENCE.bits;
        const ANY_FUNCTION_LIKE  = Self::BLOCK.bits | Self::CONSTRUCTOR.bits
                                 | Self::DESTRUCTOR.bits | Self::FUNCTION.bits
                                 | Self::OPERATOR.bits | Self::LAMBDA.bits
                                 | Self::USER_DEF_CONVERSION.bits
                                 | Self::USER_DEF_LITERAL.bits;
        const FUNCTION_RETURNING = Self::BLOCK.bits | Self::FUNCTION.bits | Self::OPERATOR.bits
                                 | Self::LAMBDA.bits | Self::USER_DEF_CONVERSION.bits
                                 | Self::USER_DEF_LITERAL.bits;
        const TRAILING_RETURN_OK = Self::FUNCTION.bits | Self::OPERATOR.bits | Self::LAMBDA.bits;
        const CAN_BIT_FIELD      = Self::BUILTIN.bits | Self::ECSU.bits | Self::TYPEDEF.bits;
        const ANY_PARENT         = Self::ANY_FUNCTION_LIKE.bits | Self::ANY_POINTER.bits
                                 | Self::ANY_REFERENCE.bits | Self::ARRAY.bits | Self::ECSU.bits;
        const ANY_REFERRER       = Self::ANY_PARENT.bits | Self::TYPEDEF.bits;
        const ANY_OBJECT         = Self::ANY_POINTER.bits | Self::ANY_REFERENCE.bits
                                 | Self::ARRAY.bits | Self::BUILTIN.bits | Self::ECSU.bits
                                 | Self::TYPEDEF.bits;
    }
}

impl Kind {
    pub fn kind_set(&self) -> KindSet {
        use Kind::*;
        match self {
            Placeholder => KindSet::PLACEHOLDER,
            Name => KindSet::NAME,
            Builtin { .. } => KindSet::BUILTIN,
            Ecsu { .. } => KindSet::ECSU,
            Typedef { .. } => KindSet::TYPEDEF,
            Variadic => KindSet::VARIADIC,
            Array { .. } => KindSet::ARRAY,
            Pointer { .. } => KindSet::POINTER,
            Reference { .. } => KindSet::REFERENCE,
            RvalueReference { .. } => KindSet::RVALUE_REFERENCE,
            PointerToMember { .. } => KindSet::POINTER_TO_MEMBER,
            Block { .. } => KindSet::BLOCK,
            Function { .. } => KindSet::FUNCTION,
            Operator { .. } => KindSet::OPERATOR,
            Lambda { .. } => KindSet::LAMBDA,
            UserDefConversion { .. } => KindSet::USER_DEF_CONVERSION,
            UserDefLiteral { .. } => KindSet::USER_DEF_LITERAL,
            Constructor { .. } => KindSet::CONSTRUCTOR,
            Destructor => KindSet::DESTRUCTOR,
        }
    }

    pub fn is(&self, set: KindSet) -> bool {
        set.contains(self.kind_set())
    }

    /// The English word for this kind.
    pub fn name(&self) -> &'static str {
        use Kind::*;
        match self {
            Placeholder => "placeholder",
            Name => "name",
            Builtin { .. } => "built-in type",
            Ecsu { .. } => "enum, class, struct, or union",
            Typedef { .. } => "typedef",
            Variadic => "variadic",
            Array { .. } => "array",
            Pointer { .. } => "pointer",
            Reference { .. } => "reference",
            RvalueReference { .. } => "rvalue reference",
            PointerToMember { .. } => "pointer to member",
            Block { .. } => "block",
            Function { .. } => "function",
            Operator { .. } => "operator",
            Lambda { .. } => "lambda",
            UserDefConversion { .. } => "user-defined conversion operator",
            UserDefLiteral { .. } => "user-defined literal",
            Constructor { .. } => "constructor",
            Destructor => "destructor",
        }
    }

    /// The declarator-spine child: the node this one is "of", "to", or
    /// "returning". Parameters and an `Ecsu` underlying type are not part of
    /// the spine.
    pub fn chain_child(&self) -> Option<NodeId> {
        use Kind::*;
        match self {
            Array { of, .. } | PointerToMember { of, .. } => *of,
            Pointer { to } | Reference { to } | RvalueReference { to }
            | UserDefConversion { to } => *to,
            Block { ret, .. }
            | Function { ret, .. }
            | Operator { ret, .. }
            | Lambda { ret, .. }
            | UserDefLiteral { ret, .. } => *ret,
            _ => None,
        }
    }

    pub fn params(&self) -> &[NodeId] {
        use Kind::*;
        match self {
            Block { params, .. }
            | Function { params, .. }
            | Operator { params, .. }
            | Lambda { params, .. }
            | UserDefLiteral { params, .. }
            | Constructor { params } => params,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug)]
pub struct AstNode {
    pub kind: Kind,
    pub type_id: TypeId,
    pub sname: ScopedName,
    pub parent: Option<NodeId>,
    pub align: Alignment,
    pub loc: Location,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisitDir {
    Down,
    Up,
}

/// A parse session's arena of nodes.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<AstNode>,
}

impl Ast {
    pub fn new() -> Ast {
        Default::default()
    }

    pub fn new_node(&mut self, kind: Kind, type_id: TypeId, loc: Location) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(AstNode {
            kind,
            type_id,
            sname: ScopedName::new(),
            parent: None,
            align: Alignment::None,
            loc,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Sets the spine child of `parent` to `child` and fixes the back-pointer.
    pub fn set_chain_child(&mut self, parent: NodeId, child: NodeId) {
        use Kind::*;
        match &mut self.node_mut(parent).kind {
            Array { of, .. } | PointerToMember { of, .. } => *of = Some(child),
            Pointer { to } | Reference { to } | RvalueReference { to }
            | UserDefConversion { to } => *to = Some(child),
            Block { ret, .. }
            | Function { ret, .. }
            | Operator { ret, .. }
            | Lambda { ret, .. }
            | UserDefLiteral { ret, .. } => *ret = Some(child),
            other => unreachable!("{} cannot have a spine child", other.name()),
        }
        self.node_mut(child).parent = Some(parent);
    }

    pub fn add_param(&mut self, func: NodeId, param: NodeId) {
        use Kind::*;
        match &mut self.node_mut(func).kind {
            Block { params, .. }
            | Function { params, .. }
            | Operator { params, .. }
            | Lambda { params, .. }
            | UserDefLiteral { params, .. }
            | Constructor { params } => params.push(param),
            other => unreachable!("{} cannot have parameters", other.name()),
        }
        self.node_mut(param).parent = Some(func);
    }

    pub fn set_ecsu_of(&mut self, ecsu: NodeId, of: NodeId) {
        match &mut self.node_mut(ecsu).kind {
            Kind::Ecsu { of: slot, .. } => *slot = Some(of),
            other => unreachable!("{} has no underlying type", other.name()),
        }
        self.node_mut(of).parent = Some(ecsu);
    }

    /// The bit-field width of a node, 0 meaning none.
    pub fn bit_width(&self, id: NodeId) -> u32 {
        match self.node(id).kind {
            Kind::Builtin { bit_width }
            | Kind::Ecsu { bit_width, .. }
            | Kind::Typedef { bit_width, .. } => bit_width,
            _ => 0,
        }
    }

    /// Sets a bit-field width; returns false if the kind cannot carry one.
    pub fn set_bit_width(&mut self, id: NodeId, width: u32) -> bool {
        match &mut self.node_mut(id).kind {
            Kind::Builtin { bit_width }
            | Kind::Ecsu { bit_width, .. }
            | Kind::Typedef { bit_width, .. } => {
                *bit_width = width;
                true
            }
            _ => false,
        }
    }

    /// Visits the declarator spine starting at `id`. `Down` goes root to
    /// leaf in pre-order, `Up` follows parent links. The visitor returns
    /// `true` to stop; the node it stopped at is returned.
    pub fn visit<F: FnMut(NodeId) -> bool>(
        &self,
        id: NodeId,
        dir: VisitDir,
        mut visitor: F,
    ) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if visitor(node) {
                return Some(node);
            }
            current = match dir {
                VisitDir::Down => self.node(node).kind.chain_child(),
                VisitDir::Up => self.node(node).parent,
            };
        }
        None
    }

    pub fn find_kind_any(&self, id: NodeId, dir: VisitDir, kinds: KindSet) -> Option<NodeId> {
        self.visit(id, dir, |n| self.node(n).kind.is(kinds))
    }

    pub fn find_name(&self, id: NodeId, dir: VisitDir) -> Option<NodeId> {
        self.visit(id, dir, |n| !self.node(n).sname.is_empty())
    }

    /// The innermost node of the spine.
    pub fn leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(child) = self.node(current).kind.chain_child() {
            current = child;
        }
        current
    }

    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// All nodes reachable from `id`: the spine plus parameters, underlying
    /// enum types, and alignment type operands.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            let n = self.node(node);
            if let Some(child) = n.kind.chain_child() {
                stack.push(child);
            }
            stack.extend(n.kind.params().iter().copied());
            if let Kind::Ecsu { of: Some(of), .. } = n.kind {
                stack.push(of);
            }
            if let Alignment::Type(t) = n.align {
                stack.push(t);
            }
        }
        out
    }

    pub fn contains_placeholder(&self, id: NodeId) -> bool {
        self.descendants(id)
            .iter()
            .any(|&n| self.node(n).kind.is(KindSet::PLACEHOLDER))
    }

    /// Structural equality: shape, types, and names, ignoring node ids,
    /// locations, and which arena the trees live in.
    pub fn eq_structure(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        let (na, nb) = (self.node(a), other.node(b));
        if na.type_id != nb.type_id || na.sname != nb.sname || na.align != nb.align {
            return false;
        }
        use Kind::*;
        let payload_eq = match (&na.kind, &nb.kind) {
            (Placeholder, Placeholder) | (Name, Name) | (Variadic, Variadic)
            | (Destructor, Destructor) => true,
            (Builtin { bit_width: wa }, Builtin { bit_width: wb }) => wa == wb,
            (
                Ecsu {
                    ecsu_sname: sa,
                    bit_width: wa,
                    ..
                },
                Ecsu {
                    ecsu_sname: sb,
                    bit_width: wb,
                    ..
                },
            ) => sa == sb && wa == wb,
            (
                Typedef {
                    def: da,
                    bit_width: wa,
                },
                Typedef {
                    def: db,
                    bit_width: wb,
                },
            ) => da == db && wa == wb,
            (Array { size: sa, quals: qa, .. }, Array { size: sb, quals: qb, .. }) => {
                sa == sb && qa == qb
            }
            (Pointer { .. }, Pointer { .. })
            | (Reference { .. }, Reference { .. })
            | (RvalueReference { .. }, RvalueReference { .. })
            | (Block { .. }, Block { .. })
            | (Function { .. }, Function { .. })
            | (Lambda { .. }, Lambda { .. })
            | (UserDefConversion { .. }, UserDefConversion { .. })
            | (UserDefLiteral { .. }, UserDefLiteral { .. })
            | (Constructor { .. }, Constructor { .. }) => true,
            (Operator { oper: oa, .. }, Operator { oper: ob, .. }) => oa == ob,
            (PointerToMember { class_sname: ca, .. }, PointerToMember { class_sname: cb, .. }) => {
                ca == cb
            }
            _ => return false,
        };
        if !payload_eq {
            return false;
        }
        let params_a = na.kind.params();
        let params_b = nb.kind.params();
        if params_a.len() != params_b.len() {
            return false;
        }
        for (&pa, &pb) in params_a.iter().zip(params_b) {
            if !self.eq_structure(pa, other, pb) {
                return false;
            }
        }
        match (na.kind.chain_child(), nb.kind.chain_child()) {
            (None, None) => {}
            (Some(ca), Some(cb)) => {
                if !self.eq_structure(ca, other, cb) {
                    return false;
                }
            }
            _ => return false,
        }
        let ecsu_of = |k: &Kind| match k {
            Ecsu { of, .. } => *of,
            _ => None,
        };
        match (ecsu_of(&na.kind), ecsu_of(&nb.kind)) {
            (None, None) => true,
            (Some(ca), Some(cb)) => self.eq_structure(ca, other, cb),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_links() {
        let mut ast = Ast::new();
        let int = ast.new_node(
            Kind::Builtin { bit_width: 0 },
            TypeId::INT,
            Location::default(),
        );
        let ptr = ast.new_node(Kind::Pointer { to: None }, TypeId::NONE, Location::default());
        ast.set_chain_child(ptr, int);
        assert_eq!(ast.node(int).parent, Some(ptr));
        assert_eq!(ast.leaf(ptr), int);
        assert_eq!(ast.root(int), ptr);
        assert_eq!(ast.depth(int), 1);
    }

    #[test]
    fn find_by_kind() {
        let mut ast = Ast::new();
        let int = ast.new_node(
            Kind::Builtin { bit_width: 0 },
            TypeId::INT,
            Location::default(),
        );
        let arr = ast.new_node(
            Kind::Array {
                size: ArraySize::Fixed(3),
                quals: TypeId::NONE,
                of: None,
            },
            TypeId::NONE,
            Location::default(),
        );
        let ptr = ast.new_node(Kind::Pointer { to: None }, TypeId::NONE, Location::default());
        ast.set_chain_child(ptr, arr);
        ast.set_chain_child(arr, int);
        assert_eq!(
            ast.find_kind_any(ptr, VisitDir::Down, KindSet::ARRAY),
            Some(arr)
        );
        assert_eq!(
            ast.find_kind_any(int, VisitDir::Up, KindSet::POINTER),
            Some(ptr)
        );
        assert_eq!(ast.find_kind_any(ptr, VisitDir::Down, KindSet::FUNCTION), None);
    }
}
