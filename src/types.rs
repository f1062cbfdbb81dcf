//! The 64-bit type bitset and its algebra.
//!
//! A `TypeId` is partitioned into five disjoint sectors: base types, storage
//! classes (and storage-class-like keywords), attributes, qualifiers, and
//! ref-qualifiers. Extracting a sector is a single mask; merging two partial
//! types is a bitwise or plus a handful of legality rules, the only
//! interesting one being `long` + `long` promoting to `long long`.

use bitflags::bitflags;

use crate::data::error::SemanticError;
use crate::data::lex::{Locatable, Location};
use crate::lang::{c_min, cpp_max, cpp_min, LangIds};

bitflags! {
    pub struct TypeId: u64 {
        // base types
        const VOID                = 0x0000_0000_0000_0001;
        const AUTO_TYPE           = 0x0000_0000_0000_0002;
        const BOOL                = 0x0000_0000_0000_0004;
        const CHAR                = 0x0000_0000_0000_0008;
        const CHAR8_T             = 0x0000_0000_0000_0010;
        const CHAR16_T            = 0x0000_0000_0000_0020;
        const CHAR32_T            = 0x0000_0000_0000_0040;
        const WCHAR_T             = 0x0000_0000_0000_0080;
        const SHORT               = 0x0000_0000_0000_0100;
        const INT                 = 0x0000_0000_0000_0200;
        const LONG                = 0x0000_0000_0000_0400;
        const LONG_LONG           = 0x0000_0000_0000_0800;
        const SIGNED              = 0x0000_0000_0000_1000;
        const UNSIGNED            = 0x0000_0000_0000_2000;
        const FLOAT               = 0x0000_0000_0000_4000;
        const DOUBLE              = 0x0000_0000_0000_8000;
        const COMPLEX             = 0x0000_0000_0001_0000;
        const IMAGINARY           = 0x0000_0000_0002_0000;
        const ENUM                = 0x0000_0000_0004_0000;
        const STRUCT              = 0x0000_0000_0008_0000;
        const UNION               = 0x0000_0000_0010_0000;
        const CLASS               = 0x0000_0000_0020_0000;
        const NAMESPACE           = 0x0000_0000_0040_0000;
        const SCOPE               = 0x0000_0000_0080_0000;
        const TYPEDEF_TYPE        = 0x0000_0000_0100_0000;

        // storage classes
        const AUTO_STORAGE        = 0x0000_0000_1000_0000;
        const APPLE_BLOCK         = 0x0000_0000_2000_0000;
        const EXTERN              = 0x0000_0000_4000_0000;
        const MUTABLE             = 0x0000_0000_8000_0000;
        const REGISTER            = 0x0000_0001_0000_0000;
        const STATIC              = 0x0000_0002_0000_0000;
        const THREAD_LOCAL        = 0x0000_0004_0000_0000;
        const TYPEDEF             = 0x0000_0008_0000_0000;

        // storage-class-like
        const CONSTEVAL           = 0x0000_0010_0000_0000;
        const CONSTEXPR           = 0x0000_0020_0000_0000;
        const DEFAULT             = 0x0000_0040_0000_0000;
        const DELETE              = 0x0000_0080_0000_0000;
        const EXPLICIT            = 0x0000_0100_0000_0000;
        const FINAL               = 0x0000_0200_0000_0000;
        const FRIEND              = 0x0000_0400_0000_0000;
        const INLINE              = 0x0000_0800_0000_0000;
        const NOEXCEPT            = 0x0000_1000_0000_0000;
        const OVERRIDE            = 0x0000_2000_0000_0000;
        const PURE_VIRTUAL        = 0x0000_4000_0000_0000;
        const THROW               = 0x0000_8000_0000_0000;
        const VIRTUAL             = 0x0001_0000_0000_0000;

        // attributes
        const CARRIES_DEPENDENCY  = 0x0002_0000_0000_0000;
        const DEPRECATED          = 0x0004_0000_0000_0000;
        const MAYBE_UNUSED        = 0x0008_0000_0000_0000;
        const NODISCARD           = 0x0010_0000_0000_0000;
        const NORETURN            = 0x0020_0000_0000_0000;

        // qualifiers
        const ATOMIC              = 0x0100_0000_0000_0000;
        const CONST               = 0x0200_0000_0000_0000;
        const RESTRICT            = 0x0400_0000_0000_0000;
        const VOLATILE            = 0x0800_0000_0000_0000;

        // ref-qualifiers
        const REFERENCE           = 0x1000_0000_0000_0000;
        const RVALUE_REFERENCE    = 0x2000_0000_0000_0000;

        // sector masks
        const MASK_BASE           = 0x0000_0000_0FFF_FFFF;
        const MASK_STORAGE        = 0x0001_FFFF_F000_0000;
        const MASK_ATTRIBUTE      = 0x003E_0000_0000_0000;
        const MASK_QUALIFIER      = 0x0F00_0000_0000_0000;
        const MASK_REF_QUALIFIER  = 0xF000_0000_0000_0000;

        // shorthands
        const MASK_STORAGE_CLASS  = Self::AUTO_STORAGE.bits | Self::APPLE_BLOCK.bits
                                  | Self::EXTERN.bits | Self::MUTABLE.bits
                                  | Self::REGISTER.bits | Self::STATIC.bits
                                  | Self::THREAD_LOCAL.bits | Self::TYPEDEF.bits;
        const ANY_CHAR            = Self::CHAR.bits | Self::WCHAR_T.bits | Self::CHAR8_T.bits
                                  | Self::CHAR16_T.bits | Self::CHAR32_T.bits;
        const ANY_FLOAT           = Self::FLOAT.bits | Self::DOUBLE.bits;
        const INT_MODIFIER        = Self::SHORT.bits | Self::LONG.bits | Self::LONG_LONG.bits
                                  | Self::SIGNED.bits | Self::UNSIGNED.bits;
        const CV                  = Self::CONST.bits | Self::VOLATILE.bits;
        const MEMBER_ONLY         = Self::CONST.bits | Self::VOLATILE.bits | Self::DEFAULT.bits
                                  | Self::DELETE.bits | Self::OVERRIDE.bits | Self::FINAL.bits
                                  | Self::VIRTUAL.bits | Self::REFERENCE.bits
                                  | Self::RESTRICT.bits | Self::RVALUE_REFERENCE.bits;
        const NON_MEMBER_ONLY     = Self::FRIEND.bits;
        const CONSTRUCTOR_OK      = Self::CONSTEVAL.bits | Self::CONSTEXPR.bits
                                  | Self::DEFAULT.bits | Self::DELETE.bits
                                  | Self::EXPLICIT.bits | Self::FRIEND.bits | Self::INLINE.bits
                                  | Self::NOEXCEPT.bits | Self::THROW.bits;
        const DESTRUCTOR_OK       = Self::DEFAULT.bits | Self::DELETE.bits | Self::FINAL.bits
                                  | Self::INLINE.bits | Self::NOEXCEPT.bits
                                  | Self::OVERRIDE.bits | Self::PURE_VIRTUAL.bits
                                  | Self::THROW.bits | Self::VIRTUAL.bits;
        const USER_DEF_CONV_OK    = Self::CONST.bits | Self::CONSTEXPR.bits
                                  | Self::EXPLICIT.bits | Self::FINAL.bits | Self::FRIEND.bits
                                  | Self::INLINE.bits | Self::NOEXCEPT.bits | Self::OVERRIDE.bits
                                  | Self::THROW.bits | Self::PURE_VIRTUAL.bits
                                  | Self::VIRTUAL.bits;
        const NONE                = 0;
    }
}

/// Which other base-type bits a base-type bit may be combined with.
///
/// The table is symmetric, so checking the incoming bit against the existing
/// sector catches conflicts no matter the order the tokens arrived in.
fn base_compat(bit: TypeId) -> TypeId {
    match bit {
        TypeId::CHAR => TypeId::SIGNED | TypeId::UNSIGNED,
        TypeId::SHORT => TypeId::INT | TypeId::SIGNED | TypeId::UNSIGNED,
        TypeId::INT => TypeId::INT_MODIFIER,
        TypeId::LONG => {
            TypeId::INT
                | TypeId::LONG_LONG
                | TypeId::SIGNED
                | TypeId::UNSIGNED
                | TypeId::DOUBLE
                | TypeId::COMPLEX
                | TypeId::IMAGINARY
        }
        TypeId::LONG_LONG => TypeId::INT | TypeId::LONG | TypeId::SIGNED | TypeId::UNSIGNED,
        TypeId::SIGNED | TypeId::UNSIGNED => {
            TypeId::CHAR | TypeId::SHORT | TypeId::INT | TypeId::LONG | TypeId::LONG_LONG
        }
        TypeId::FLOAT => TypeId::COMPLEX | TypeId::IMAGINARY,
        TypeId::DOUBLE => TypeId::LONG | TypeId::COMPLEX | TypeId::IMAGINARY,
        TypeId::COMPLEX | TypeId::IMAGINARY => TypeId::ANY_FLOAT | TypeId::LONG,
        _ => TypeId::NONE,
    }
}

/// The dialects a single type bit is legal in.
fn bit_langs(bit: TypeId) -> LangIds {
    match bit {
        TypeId::VOID => c_min(LangIds::C_89) | LangIds::CPP_ANY,
        TypeId::AUTO_TYPE => cpp_min(LangIds::CPP_11),
        TypeId::BOOL => c_min(LangIds::C_99) | LangIds::CPP_ANY,
        TypeId::CHAR8_T => LangIds::C_23 | cpp_min(LangIds::CPP_20),
        TypeId::CHAR16_T | TypeId::CHAR32_T => c_min(LangIds::C_11) | cpp_min(LangIds::CPP_11),
        TypeId::WCHAR_T => c_min(LangIds::C_95) | LangIds::CPP_ANY,
        TypeId::SIGNED => c_min(LangIds::C_89) | LangIds::CPP_ANY,
        TypeId::LONG_LONG => c_min(LangIds::C_99) | cpp_min(LangIds::CPP_11),
        TypeId::COMPLEX | TypeId::IMAGINARY => c_min(LangIds::C_99),
        TypeId::ENUM => c_min(LangIds::C_89) | LangIds::CPP_ANY,
        TypeId::CLASS | TypeId::NAMESPACE | TypeId::SCOPE => LangIds::CPP_ANY,

        TypeId::AUTO_STORAGE => LangIds::C_ANY | cpp_max(LangIds::CPP_03),
        TypeId::MUTABLE => LangIds::CPP_ANY,
        TypeId::REGISTER => LangIds::C_ANY | cpp_max(LangIds::CPP_14),
        TypeId::THREAD_LOCAL => c_min(LangIds::C_11) | cpp_min(LangIds::CPP_11),

        TypeId::CONSTEVAL => cpp_min(LangIds::CPP_20),
        TypeId::CONSTEXPR => cpp_min(LangIds::CPP_11),
        TypeId::DEFAULT | TypeId::DELETE => cpp_min(LangIds::CPP_11),
        TypeId::EXPLICIT | TypeId::FRIEND | TypeId::VIRTUAL | TypeId::PURE_VIRTUAL => {
            LangIds::CPP_ANY
        }
        TypeId::FINAL | TypeId::OVERRIDE | TypeId::NOEXCEPT => cpp_min(LangIds::CPP_11),
        TypeId::INLINE => c_min(LangIds::C_99) | LangIds::CPP_ANY,
        TypeId::THROW => cpp_max(LangIds::CPP_14),

        TypeId::CARRIES_DEPENDENCY => cpp_min(LangIds::CPP_11),
        TypeId::DEPRECATED => LangIds::C_23 | cpp_min(LangIds::CPP_14),
        TypeId::MAYBE_UNUSED | TypeId::NODISCARD => LangIds::C_23 | cpp_min(LangIds::CPP_17),
        TypeId::NORETURN => c_min(LangIds::C_11) | cpp_min(LangIds::CPP_11),

        TypeId::ATOMIC => c_min(LangIds::C_11) | cpp_min(LangIds::CPP_23),
        TypeId::CONST | TypeId::VOLATILE => c_min(LangIds::C_89) | LangIds::CPP_ANY,
        TypeId::RESTRICT => c_min(LangIds::C_99),

        TypeId::REFERENCE | TypeId::RVALUE_REFERENCE => cpp_min(LangIds::CPP_11),

        _ => LangIds::ANY,
    }
}

impl TypeId {
    pub fn base(self) -> TypeId {
        self & TypeId::MASK_BASE
    }
    pub fn storage(self) -> TypeId {
        self & TypeId::MASK_STORAGE
    }
    pub fn storage_class(self) -> TypeId {
        self & TypeId::MASK_STORAGE_CLASS
    }
    pub fn attributes(self) -> TypeId {
        self & TypeId::MASK_ATTRIBUTE
    }
    pub fn qualifiers(self) -> TypeId {
        self & TypeId::MASK_QUALIFIER
    }
    pub fn ref_qualifiers(self) -> TypeId {
        self & TypeId::MASK_REF_QUALIFIER
    }

    /// Merges `new` into `self`, reporting the conflicting token on failure.
    ///
    /// `long` + `long` promotes to `long long`; a third `long` is caught as a
    /// duplicate of `long long`.
    pub fn add(&mut self, mut new: TypeId, loc: Location) -> Result<(), Locatable<SemanticError>> {
        if new.contains(TypeId::LONG) && self.contains(TypeId::LONG) {
            new = (new - TypeId::LONG) | TypeId::LONG_LONG;
        }
        let dup = *self & new;
        if !dup.is_empty() {
            if dup.contains(TypeId::LONG_LONG) {
                return Err(loc.with(SemanticError::TooLong));
            }
            return Err(loc.with(SemanticError::DuplicateType(dup.lowest_bit_name())));
        }
        if !new.storage_class().is_empty() && !self.storage_class().is_empty() {
            return Err(loc.with(SemanticError::ConflictingStorage(
                new.storage_class().lowest_bit_name(),
                self.storage_class().lowest_bit_name(),
            )));
        }
        if !new.ref_qualifiers().is_empty() && !self.ref_qualifiers().is_empty() {
            return Err(loc.with(SemanticError::TypeConflict(
                new.ref_qualifiers().lowest_bit_name(),
                self.ref_qualifiers().lowest_bit_name(),
            )));
        }
        for bit in new.base().bits_iter() {
            let illegal = self.base() - base_compat(bit) - bit;
            if !illegal.is_empty() {
                return Err(loc.with(SemanticError::TypeConflict(
                    bit.lowest_bit_name(),
                    illegal.lowest_bit_name(),
                )));
            }
        }
        *self |= new;
        Ok(())
    }

    /// Returns the set of dialects in which every bit of `self` is legal.
    pub fn check(self) -> LangIds {
        self.bits_iter()
            .fold(LangIds::ANY, |langs, bit| langs & bit_langs(bit))
    }

    /// Every bit of `self` not legal in `lang`, with the dialects it needs.
    pub fn check_each(self, lang: LangIds) -> Vec<(TypeId, LangIds)> {
        self.bits_iter()
            .filter_map(|bit| {
                let ok = bit_langs(bit);
                if ok.contains(lang) {
                    None
                } else {
                    Some((bit, ok))
                }
            })
            .collect()
    }

    fn bits_iter(self) -> impl Iterator<Item = TypeId> {
        (0..64)
            .map(|i| TypeId::from_bits_truncate(1 << i))
            .filter(move |bit| !bit.is_empty() && self.contains(*bit))
    }

    /// The C token for a single bit.
    pub fn bit_name(self) -> &'static str {
        match self {
            TypeId::VOID => "void",
            TypeId::AUTO_TYPE | TypeId::AUTO_STORAGE => "auto",
            TypeId::BOOL => "bool",
            TypeId::CHAR => "char",
            TypeId::CHAR8_T => "char8_t",
            TypeId::CHAR16_T => "char16_t",
            TypeId::CHAR32_T => "char32_t",
            TypeId::WCHAR_T => "wchar_t",
            TypeId::SHORT => "short",
            TypeId::INT => "int",
            TypeId::LONG => "long",
            TypeId::LONG_LONG => "long long",
            TypeId::SIGNED => "signed",
            TypeId::UNSIGNED => "unsigned",
            TypeId::FLOAT => "float",
            TypeId::DOUBLE => "double",
            TypeId::COMPLEX => "_Complex",
            TypeId::IMAGINARY => "_Imaginary",
            TypeId::ENUM => "enum",
            TypeId::STRUCT => "struct",
            TypeId::UNION => "union",
            TypeId::CLASS => "class",
            TypeId::NAMESPACE => "namespace",
            TypeId::SCOPE => "scope",
            TypeId::TYPEDEF_TYPE => "typedef-type",
            TypeId::APPLE_BLOCK => "block",
            TypeId::EXTERN => "extern",
            TypeId::MUTABLE => "mutable",
            TypeId::REGISTER => "register",
            TypeId::STATIC => "static",
            TypeId::THREAD_LOCAL => "thread_local",
            TypeId::TYPEDEF => "typedef",
            TypeId::CONSTEVAL => "consteval",
            TypeId::CONSTEXPR => "constexpr",
            TypeId::DEFAULT => "= default",
            TypeId::DELETE => "= delete",
            TypeId::EXPLICIT => "explicit",
            TypeId::FINAL => "final",
            TypeId::FRIEND => "friend",
            TypeId::INLINE => "inline",
            TypeId::NOEXCEPT => "noexcept",
            TypeId::OVERRIDE => "override",
            TypeId::PURE_VIRTUAL => "= 0",
            TypeId::THROW => "throw()",
            TypeId::VIRTUAL => "virtual",
            TypeId::CARRIES_DEPENDENCY => "carries_dependency",
            TypeId::DEPRECATED => "deprecated",
            TypeId::MAYBE_UNUSED => "maybe_unused",
            TypeId::NODISCARD => "nodiscard",
            TypeId::NORETURN => "noreturn",
            TypeId::ATOMIC => "_Atomic",
            TypeId::CONST => "const",
            TypeId::RESTRICT => "restrict",
            TypeId::VOLATILE => "volatile",
            TypeId::REFERENCE => "reference",
            TypeId::RVALUE_REFERENCE => "rvalue reference",
            _ => "",
        }
    }

    /// English alias for a single bit, used when an error message crosses the
    /// English/gibberish boundary.
    pub fn bit_name_english(self) -> &'static str {
        match self {
            TypeId::NORETURN => "non-returning",
            TypeId::THREAD_LOCAL => "thread local",
            TypeId::MAYBE_UNUSED => "maybe unused",
            TypeId::CARRIES_DEPENDENCY => "carries dependency",
            TypeId::PURE_VIRTUAL => "pure virtual",
            _ => self.bit_name(),
        }
    }

    fn lowest_bit_name(self) -> &'static str {
        self.bits_iter()
            .next()
            .map(TypeId::bit_name)
            .unwrap_or_default()
    }

    /// Canonical pretty-print of every named bit, sectors in declaration
    /// order. `long long` suppresses the lone `long` it was promoted from.
    pub fn name(self) -> String {
        let mut out = String::new();
        let order = [
            // attributes first so they read like a `[[...]]` prefix
            TypeId::CARRIES_DEPENDENCY,
            TypeId::DEPRECATED,
            TypeId::MAYBE_UNUSED,
            TypeId::NODISCARD,
            TypeId::NORETURN,
            // storage classes and storage-class-like
            TypeId::FRIEND,
            TypeId::EXTERN,
            TypeId::STATIC,
            TypeId::AUTO_STORAGE,
            TypeId::REGISTER,
            TypeId::MUTABLE,
            TypeId::THREAD_LOCAL,
            TypeId::TYPEDEF,
            TypeId::CONSTEVAL,
            TypeId::CONSTEXPR,
            TypeId::EXPLICIT,
            TypeId::INLINE,
            TypeId::VIRTUAL,
            // function-tail keywords, named here only for diagnostics; the
            // gibberish printer strips them before printing a type head
            TypeId::NOEXCEPT,
            TypeId::THROW,
            TypeId::OVERRIDE,
            TypeId::FINAL,
            TypeId::PURE_VIRTUAL,
            TypeId::DEFAULT,
            TypeId::DELETE,
            TypeId::REFERENCE,
            TypeId::RVALUE_REFERENCE,
            // qualifiers
            TypeId::ATOMIC,
            TypeId::CONST,
            TypeId::RESTRICT,
            TypeId::VOLATILE,
            // base
            TypeId::AUTO_TYPE,
            TypeId::VOID,
            TypeId::BOOL,
            TypeId::SIGNED,
            TypeId::UNSIGNED,
            TypeId::SHORT,
            TypeId::LONG,
            TypeId::LONG_LONG,
            TypeId::CHAR,
            TypeId::CHAR8_T,
            TypeId::CHAR16_T,
            TypeId::CHAR32_T,
            TypeId::WCHAR_T,
            TypeId::INT,
            TypeId::FLOAT,
            TypeId::DOUBLE,
            TypeId::COMPLEX,
            TypeId::IMAGINARY,
            TypeId::ENUM,
            TypeId::STRUCT,
            TypeId::UNION,
            TypeId::CLASS,
            TypeId::NAMESPACE,
        ];
        for &bit in order.iter() {
            if !self.contains(bit) {
                continue;
            }
            if bit == TypeId::LONG && self.contains(TypeId::LONG_LONG) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(bit.bit_name());
        }
        out
    }

    /// Like `name`, with English aliases substituted.
    pub fn name_error(self) -> String {
        // only a few bits have aliases; patch them textually
        self.name()
            .replace("noreturn", "non-returning")
            .replace("= 0", "pure virtual")
            .replace("= default", "defaulted")
            .replace("= delete", "deleted")
            .replace("throw()", "non-throwing")
    }
}

impl Default for TypeId {
    fn default() -> Self {
        TypeId::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::default()
    }

    fn add_all(words: &[TypeId]) -> Result<TypeId, SemanticError> {
        let mut t = TypeId::NONE;
        for &w in words {
            t.add(w, loc()).map_err(|e| e.data)?;
        }
        Ok(t)
    }

    #[test]
    fn long_long_promotion() {
        let t = add_all(&[TypeId::LONG, TypeId::LONG]).unwrap();
        assert!(t.contains(TypeId::LONG | TypeId::LONG_LONG));
        assert_eq!(t.name(), "long long");

        let err = add_all(&[TypeId::LONG, TypeId::LONG, TypeId::LONG]).unwrap_err();
        assert_eq!(err, SemanticError::TooLong);
    }

    #[test]
    fn signed_unsigned_conflict() {
        let err = add_all(&[TypeId::SIGNED, TypeId::UNSIGNED]).unwrap_err();
        assert!(matches!(err, SemanticError::TypeConflict(_, _)));
    }

    #[test]
    fn float_int_conflict() {
        assert!(add_all(&[TypeId::FLOAT, TypeId::INT]).is_err());
        assert!(add_all(&[TypeId::LONG, TypeId::DOUBLE]).is_ok());
        assert!(add_all(&[TypeId::SHORT, TypeId::LONG]).is_err());
        assert!(add_all(&[TypeId::LONG, TypeId::CHAR]).is_err());
    }

    #[test]
    fn storage_conflict() {
        assert!(add_all(&[TypeId::STATIC, TypeId::EXTERN]).is_err());
        assert!(add_all(&[TypeId::TYPEDEF, TypeId::REGISTER]).is_err());
        // storage-class-like keywords coexist with storage classes
        assert!(add_all(&[TypeId::STATIC, TypeId::CONSTEXPR]).is_ok());
    }

    #[test]
    fn sector_disjointness() {
        let masks = [
            TypeId::MASK_BASE,
            TypeId::MASK_STORAGE,
            TypeId::MASK_ATTRIBUTE,
            TypeId::MASK_QUALIFIER,
            TypeId::MASK_REF_QUALIFIER,
        ];
        for (i, &a) in masks.iter().enumerate() {
            for &b in &masks[i + 1..] {
                assert!((a & b).is_empty());
            }
        }
    }

    #[test]
    fn lang_gating() {
        assert!(!TypeId::BOOL.check().contains(LangIds::C_89));
        assert!(TypeId::BOOL.check().contains(LangIds::C_99));
        assert!(TypeId::BOOL.check().contains(LangIds::CPP_98));
        assert!(!TypeId::CONSTEXPR.check().contains(LangIds::CPP_03));
        assert!(TypeId::CONSTEXPR.check().contains(LangIds::CPP_11));
        assert!(!TypeId::REGISTER.check().contains(LangIds::CPP_17));
        assert!(TypeId::REGISTER.check().contains(LangIds::CPP_14));
        assert!(!TypeId::RESTRICT.check().intersects(LangIds::CPP_ANY));
    }

    #[test]
    fn monotonic_check() {
        // a type legal in C99 stays legal in every later C dialect
        let t = TypeId::BOOL | TypeId::CONST;
        let ok = t.check();
        assert!(ok.contains(LangIds::C_99));
        for newer in [LangIds::C_11, LangIds::C_17, LangIds::C_23].iter() {
            assert!(ok.contains(*newer));
        }
    }

    #[test]
    fn names() {
        let t = add_all(&[TypeId::UNSIGNED, TypeId::LONG, TypeId::LONG, TypeId::INT]).unwrap();
        assert_eq!(t.name(), "unsigned long long int");
        assert_eq!(
            (TypeId::STATIC | TypeId::CONST | TypeId::CHAR).name(),
            "static const char"
        );
        assert_eq!(TypeId::NORETURN.name_error(), "non-returning");
    }
}
