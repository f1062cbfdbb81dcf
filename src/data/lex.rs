use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::Range;

use crate::intern::InternedStr;
use crate::lang::{c_min, cpp_min, LangIds};
use crate::types::TypeId;

/// A byte range within the current input line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl From<Range<u32>> for Span {
    fn from(r: Range<u32>) -> Span {
        Span {
            start: r.start,
            end: r.end,
        }
    }
}

/// Where a token or diagnostic came from. Input is a single line at a time,
/// so there is no file component.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub span: Span,
}

impl Location {
    pub fn merge<O: Borrow<Self>>(&self, other: O) -> Self {
        use std::cmp::{max, min};

        let other = other.borrow();
        Location {
            span: Span {
                start: min(self.span.start, other.span.start),
                end: max(self.span.end, other.span.end),
            },
        }
    }

    pub fn with<T>(self, data: T) -> Locatable<T> {
        Locatable {
            data,
            location: self,
        }
    }

    pub fn error<E: Into<crate::data::error::Error>>(
        self,
        error: E,
    ) -> crate::data::error::CompileError {
        self.with(error.into())
    }
}

impl PartialOrd for Location {
    /// NOTE: this only compares the start of the spans, it ignores the end
    fn partial_cmp(&self, other: &Location) -> Option<Ordering> {
        Some(self.span.start.cmp(&other.span.start))
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Locatable<T> {
    pub data: T,
    pub location: Location,
}

impl<T> Locatable<T> {
    pub fn new(data: T, location: Location) -> Locatable<T> {
        location.with(data)
    }
    pub fn map<S, F: FnOnce(T) -> S>(self, f: F) -> Locatable<S> {
        Locatable {
            data: f(self.data),
            location: self.location,
        }
    }
}

impl<T: PartialEq> PartialEq for Locatable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Locatable<T> {}

/// Reserved words of the declaration grammar.
///
/// Which spellings are reserved depends on the dialect: `bool` is a keyword
/// in C++ and C23 but a perfectly good typedef name in C89, so the lexer
/// consults `Keyword::in_lang` before classifying a word.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Keyword {
    // base types
    Void,
    Bool,
    Char,
    Char8T,
    Char16T,
    Char32T,
    WcharT,
    Short,
    Int,
    Long,
    Signed,
    Unsigned,
    Float,
    Double,
    Complex,
    Imaginary,
    Enum,
    Struct,
    Union,
    Class,
    Namespace,
    Auto,

    // storage classes
    Extern,
    Mutable,
    Register,
    Static,
    ThreadLocal,
    Typedef,

    // storage-class-like
    Consteval,
    Constexpr,
    Default,
    Delete,
    Explicit,
    Friend,
    Inline,
    Noexcept,
    Throw,
    Virtual,
    NoReturn,

    // qualifiers
    Atomic,
    Const,
    Restrict,
    Volatile,

    // structural
    Operator,
    Using,
    Alignas,
}

impl Keyword {
    /// Maps a spelling to a keyword, or `None` when the word is not reserved
    /// in `lang`.
    pub fn from_str(word: &str, lang: LangIds) -> Option<Keyword> {
        use Keyword::*;
        let (kw, ok) = match word {
            "void" => (Void, c_min(LangIds::C_89) | LangIds::CPP_ANY),
            "_Bool" => (Bool, c_min(LangIds::C_99)),
            "bool" => (Bool, LangIds::CPP_ANY | LangIds::C_23),
            "char" => (Char, LangIds::ANY),
            "char8_t" => (Char8T, cpp_min(LangIds::CPP_20) | LangIds::C_23),
            "char16_t" => (Char16T, cpp_min(LangIds::CPP_11) | c_min(LangIds::C_11)),
            "char32_t" => (Char32T, cpp_min(LangIds::CPP_11) | c_min(LangIds::C_11)),
            "wchar_t" => (WcharT, c_min(LangIds::C_95) | LangIds::CPP_ANY),
            "short" => (Short, LangIds::ANY),
            "int" => (Int, LangIds::ANY),
            "long" => (Long, LangIds::ANY),
            "signed" => (Signed, c_min(LangIds::C_89) | LangIds::CPP_ANY),
            "unsigned" => (Unsigned, LangIds::ANY),
            "float" => (Float, LangIds::ANY),
            "double" => (Double, LangIds::ANY),
            "_Complex" => (Complex, c_min(LangIds::C_99)),
            "_Imaginary" => (Imaginary, c_min(LangIds::C_99)),
            "enum" => (Enum, c_min(LangIds::C_89) | LangIds::CPP_ANY),
            "struct" => (Struct, LangIds::ANY),
            "union" => (Union, LangIds::ANY),
            "class" => (Class, LangIds::CPP_ANY),
            "namespace" => (Namespace, LangIds::CPP_ANY),
            "auto" => (Auto, LangIds::ANY),

            "extern" => (Extern, LangIds::ANY),
            "mutable" => (Mutable, LangIds::CPP_ANY),
            "register" => (Register, LangIds::ANY),
            "static" => (Static, LangIds::ANY),
            "_Thread_local" => (ThreadLocal, c_min(LangIds::C_11)),
            "thread_local" => (
                ThreadLocal,
                cpp_min(LangIds::CPP_11) | c_min(LangIds::C_23),
            ),
            "typedef" => (Typedef, LangIds::ANY),

            "consteval" => (Consteval, cpp_min(LangIds::CPP_20)),
            "constexpr" => (Constexpr, cpp_min(LangIds::CPP_11) | LangIds::C_23),
            "default" => (Default, LangIds::ANY),
            "delete" => (Delete, LangIds::CPP_ANY),
            "explicit" => (Explicit, LangIds::CPP_ANY),
            "friend" => (Friend, LangIds::CPP_ANY),
            "inline" => (Inline, c_min(LangIds::C_99) | LangIds::CPP_ANY),
            "noexcept" => (Noexcept, cpp_min(LangIds::CPP_11)),
            "throw" => (Throw, LangIds::CPP_ANY),
            "virtual" => (Virtual, LangIds::CPP_ANY),
            "_Noreturn" => (NoReturn, c_min(LangIds::C_11)),

            "_Atomic" => (Atomic, c_min(LangIds::C_11)),
            "const" => (Const, c_min(LangIds::C_89) | LangIds::CPP_ANY),
            "restrict" => (Restrict, c_min(LangIds::C_99)),
            "volatile" => (Volatile, LangIds::ANY),

            "operator" => (Operator, LangIds::CPP_ANY),
            "using" => (Using, LangIds::CPP_ANY),
            "_Alignas" => (Alignas, c_min(LangIds::C_11)),
            "alignas" => (Alignas, cpp_min(LangIds::CPP_11) | LangIds::C_23),
            _ => return None,
        };
        if ok.contains(lang) {
            Some(kw)
        } else {
            None
        }
    }

    /// The type bit this keyword contributes, if any. `auto` means storage in
    /// C and C++98/03 but a deduced type from C++11 on.
    pub fn type_id(self, lang: LangIds) -> Option<TypeId> {
        use Keyword::*;
        let id = match self {
            Void => TypeId::VOID,
            Bool => TypeId::BOOL,
            Char => TypeId::CHAR,
            Char8T => TypeId::CHAR8_T,
            Char16T => TypeId::CHAR16_T,
            Char32T => TypeId::CHAR32_T,
            WcharT => TypeId::WCHAR_T,
            Short => TypeId::SHORT,
            Int => TypeId::INT,
            Long => TypeId::LONG,
            Signed => TypeId::SIGNED,
            Unsigned => TypeId::UNSIGNED,
            Float => TypeId::FLOAT,
            Double => TypeId::DOUBLE,
            Complex => TypeId::COMPLEX,
            Imaginary => TypeId::IMAGINARY,
            Enum => TypeId::ENUM,
            Struct => TypeId::STRUCT,
            Union => TypeId::UNION,
            Class => TypeId::CLASS,
            Namespace => TypeId::NAMESPACE,
            Auto => {
                if cpp_min(LangIds::CPP_11).contains(lang) {
                    TypeId::AUTO_TYPE
                } else {
                    TypeId::AUTO_STORAGE
                }
            }
            Extern => TypeId::EXTERN,
            Mutable => TypeId::MUTABLE,
            Register => TypeId::REGISTER,
            Static => TypeId::STATIC,
            ThreadLocal => TypeId::THREAD_LOCAL,
            Typedef => TypeId::TYPEDEF,
            Consteval => TypeId::CONSTEVAL,
            Constexpr => TypeId::CONSTEXPR,
            Explicit => TypeId::EXPLICIT,
            Friend => TypeId::FRIEND,
            Inline => TypeId::INLINE,
            Noexcept => TypeId::NOEXCEPT,
            Virtual => TypeId::VIRTUAL,
            NoReturn => TypeId::NORETURN,
            Atomic => TypeId::ATOMIC,
            Const => TypeId::CONST,
            Restrict => TypeId::RESTRICT,
            Volatile => TypeId::VOLATILE,
            Default | Delete | Throw | Operator | Using | Alignas => return None,
        };
        Some(id)
    }

    /// Every reserved spelling `from_str` recognizes, each exactly once, for
    /// "did you mean" suggestions.
    pub fn all_spellings() -> &'static [&'static str] {
        &[
            "void", "_Bool", "bool", "char", "char8_t", "char16_t", "char32_t", "wchar_t",
            "short", "int", "long", "signed", "unsigned", "float", "double", "_Complex",
            "_Imaginary", "enum", "struct", "union", "class", "namespace", "auto", "extern",
            "mutable", "register", "static", "_Thread_local", "thread_local", "typedef",
            "consteval", "constexpr", "default", "delete", "explicit", "friend", "inline",
            "noexcept", "throw", "virtual", "_Noreturn", "_Atomic", "const", "restrict",
            "volatile", "operator", "using", "_Alignas", "alignas",
        ]
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Keyword::Complex | Keyword::Imaginary | Keyword::Atomic => write!(f, "_{:?}", self),
            Keyword::NoReturn => write!(f, "_Noreturn"),
            Keyword::ThreadLocal => write!(f, "thread_local"),
            Keyword::Char8T => write!(f, "char8_t"),
            Keyword::Char16T => write!(f, "char16_t"),
            Keyword::Char32T => write!(f, "char32_t"),
            Keyword::WcharT => write!(f, "wchar_t"),
            _ => write!(f, "{}", &format!("{:?}", self).to_lowercase()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Id(InternedStr),
    Number(u32),

    Star,
    Ampersand,
    LogicalAnd,
    Caret,
    // only meaningful while spelling an overloaded operator
    Plus,
    Minus,
    Slash,
    Percent,
    Less,
    Greater,
    Bang,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    Equal,
    Tilde,
    Arrow,
    Ellipsis,
    Question,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Token::*;
        match self {
            Keyword(k) => write!(f, "{}", k),
            Id(id) => write!(f, "{}", id),
            Number(n) => write!(f, "{}", n),
            Star => write!(f, "*"),
            Ampersand => write!(f, "&"),
            LogicalAnd => write!(f, "&&"),
            Caret => write!(f, "^"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Slash => write!(f, "/"),
            Percent => write!(f, "%"),
            Less => write!(f, "<"),
            Greater => write!(f, ">"),
            Bang => write!(f, "!"),
            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftBracket => write!(f, "["),
            RightBracket => write!(f, "]"),
            LeftBrace => write!(f, "{{"),
            RightBrace => write!(f, "}}"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            Colon => write!(f, ":"),
            ColonColon => write!(f, "::"),
            Equal => write!(f, "="),
            Tilde => write!(f, "~"),
            Arrow => write!(f, "->"),
            Ellipsis => write!(f, "..."),
            Question => write!(f, "?"),
        }
    }
}
