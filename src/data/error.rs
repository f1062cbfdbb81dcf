use std::collections::VecDeque;
use std::fmt::{self, Display};

use thiserror::Error;

use super::lex::{Locatable, Location};

/// A diagnostic with a source location attached.
pub type CompileError = Locatable<Error>;
pub type CompileWarning = Locatable<Warning>;
pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Semantic(#[from] SemanticError),
}

impl Error {
    pub fn is_syntax_err(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }
    pub fn is_semantic_err(&self) -> bool {
        matches!(self, Error::Semantic(_))
    }
}

fn fmt_suggestions(f: &mut fmt::Formatter, suggestions: &[String]) -> fmt::Result {
    match suggestions {
        [] => Ok(()),
        [one] => write!(f, "; did you mean \"{}\"?", one),
        [init @ .., last] => {
            write!(f, "; did you mean ")?;
            for s in init {
                write!(f, "\"{}\", ", s)?;
            }
            write!(f, "or \"{}\"?", last)
        }
    }
}

/// Errors reported while tokenizing or parsing a command.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of command")]
    UnexpectedEof,
    #[error("expected {0}, got {1}")]
    ExpectedToken(String, String),
    #[error("expected a name, got {0}")]
    ExpectedId(String),
    #[error("integer too large")]
    BadNumber,
    #[error("\"{name}\" is not a command{}", Suggest(.suggestions))]
    UnknownCommand {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("\"{name}\" is not a known type or keyword{}", Suggest(.suggestions))]
    UnknownName {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("\"{name}\" is not an option{}", Suggest(.suggestions))]
    UnknownOption {
        name: String,
        suggestions: Vec<String>,
    },
}

/// Adapter so thiserror format strings can render suggestion lists.
struct Suggest<'a>(&'a [String]);

impl Display for Suggest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_suggestions(f, self.0)
    }
}

/// Errors reported while merging type bits or checking a finished AST.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SemanticError {
    // type-combination errors
    #[error("\"long long long\" is illegal")]
    TooLong,
    #[error("\"{0}\" specified more than once")]
    DuplicateType(&'static str),
    #[error("\"{0}\" and \"{1}\" are illegal together")]
    TypeConflict(&'static str, &'static str),
    #[error("conflicting storage class \"{0}\" with \"{1}\"")]
    ConflictingStorage(&'static str, &'static str),

    // language-version errors
    #[error("{what} is not supported in {lang}{hint}")]
    NotSupported {
        what: String,
        lang: &'static str,
        hint: String,
    },

    // semantic shape errors
    #[error("pointer to reference is illegal")]
    PointerToReference,
    #[error("reference to reference is illegal")]
    ReferenceToReference,
    #[error("array of reference is illegal")]
    ArrayOfReference,
    #[error("array of function is illegal; did you mean array of pointer to function?")]
    ArrayOfFunction,
    #[error("array of void is illegal; did you mean array of pointer to void?")]
    ArrayOfVoid,
    #[error("function returning array is illegal; did you mean returning pointer?")]
    FunctionReturningArray,
    #[error("function returning function is illegal; did you mean returning pointer to function?")]
    FunctionReturningFunction,
    #[error("\"...\" must be the last parameter")]
    VariadicNotLast,
    #[error("\"...\" cannot be the only parameter")]
    VariadicAlone,
    #[error("\"void\" must be the only parameter")]
    VoidNotAlone,
    #[error("parameter \"{0}\" cannot have type void")]
    VoidParamNamed(String),
    #[error("variable of type void is illegal; did you mean pointer to void?")]
    VariableOfVoid,
    #[error("parameter cannot have storage class \"{0}\"")]
    ParamStorage(String),
    #[error("array qualifiers are only legal in a function parameter")]
    ArrayQualsOutsideParam,
    #[error("a trailing return type requires \"auto\"")]
    TrailingReturnAuto,

    // positional errors
    #[error("\"{0}\" is only legal for member functions")]
    MemberOnly(String),
    #[error("\"{0}\" is only legal inside a class")]
    NonMemberOnly(String),
    #[error("\"{0}\" is illegal for a constructor")]
    ConstructorType(String),
    #[error("\"{0}\" is illegal for a destructor")]
    DestructorType(String),
    #[error("\"{0}\" is illegal for a user-defined conversion operator")]
    ConversionType(String),
    #[error("alignment is not legal on functions")]
    AlignasOnFunction,

    // bit-fields
    #[error("bit-field width must be positive")]
    BitFieldWidth,
    #[error("only integral types can be bit-fields")]
    BitFieldKind,
    #[error("static members cannot be bit-fields")]
    BitFieldStatic,

    // implicit int
    #[error("implicit \"int\" is illegal in {0}")]
    ImplicitIntForbidden(&'static str),

    // casts
    #[error("cast into array is illegal; did you mean cast into pointer?")]
    CastIntoArray,
    #[error("cast into function is illegal; did you mean cast into pointer to function?")]
    CastIntoFunction,
    #[error("a cast cannot have storage class \"{0}\"")]
    CastStorage(String),

    // typedefs
    #[error("\"{0}\" is already defined with a different type")]
    TypedefRedefinition(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Warning {
    #[error("type specifier missing; \"int\" assumed")]
    ImplicitInt,
    #[error("\"{what}\" is deprecated{hint}")]
    Deprecated { what: String, hint: String },
    #[error("declaration does not declare anything")]
    EmptyDeclaration,
}

/// Collects diagnostics during a check so one command can report several
/// errors at once. Errors are drained in the order they were produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorHandler {
    errors: VecDeque<CompileError>,
    pub warnings: VecDeque<CompileWarning>,
}

impl ErrorHandler {
    pub fn new() -> ErrorHandler {
        Default::default()
    }

    pub fn error<E: Into<Error>>(&mut self, error: E, location: Location) {
        self.errors.push_back(location.with(error.into()));
    }

    pub fn warn<W: Into<Warning>>(&mut self, warning: W, location: Location) {
        self.warnings.push_back(location.with(warning.into()));
    }

    pub fn push_back(&mut self, error: CompileError) {
        self.errors.push_back(error);
    }

    pub fn pop_front(&mut self) -> Option<CompileError> {
        self.errors.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn append(&mut self, other: &mut ErrorHandler) {
        self.errors.append(&mut other.errors);
        self.warnings.append(&mut other.warnings);
    }

    pub fn into_errors(self) -> VecDeque<CompileError> {
        self.errors
    }
}

impl Iterator for ErrorHandler {
    type Item = CompileError;
    fn next(&mut self) -> Option<CompileError> {
        self.pop_front()
    }
}

impl From<Locatable<SemanticError>> for CompileError {
    fn from(err: Locatable<SemanticError>) -> CompileError {
        err.map(Error::Semantic)
    }
}

impl From<Locatable<SyntaxError>> for CompileError {
    fn from(err: Locatable<SyntaxError>) -> CompileError {
        err.map(Error::Syntax)
    }
}
