//! seaspeak: a bidirectional translator between C/C++ type declarations and
//! a controlled English.
//!
//! `declare x as pointer to array 10 of const int` becomes
//! `int const (*x)[10];`, and `explain int (*x)[10]` goes the other way.
//! Everything passes through one AST; see the `ast` module for its shape and
//! `analyze` for what makes a declaration legal in a given dialect.

#![warn(absolute_paths_not_starting_with_crate)]
#![warn(explicit_outlives_requirements)]
#![warn(unreachable_pub)]
#![warn(deprecated_in_future)]
#![deny(unsafe_code)]
#![deny(unused_extern_crates)]

use std::collections::VecDeque;
use std::io;

#[macro_use]
mod macros;
pub mod analyze;
pub mod ast;
pub mod data;
pub mod intern;
pub mod lang;
mod lex;
pub mod lookup;
mod parse;
pub mod print;
pub mod repl;
pub mod typedefs;
pub mod types;

pub use data::{CompileError, CompileWarning};
pub use lang::LangIds;
pub use parse::{CastKind, Command, SetArgs, ShowArgs, ShowWhat, TypedefFlavor};

use ast::build;
use data::error::SemanticError;
use data::Locatable;
use print::gibberish::{write_gibberish, write_typedef};
use print::GibFlags;
use typedefs::{Typedef, TypedefRegistry};
use types::TypeId;

/// Exit codes in the `sysexits.h` tradition.
pub mod sysexits {
    pub const EX_OK: i32 = 0;
    pub const EX_USAGE: i32 = 64;
    pub const EX_DATAERR: i32 = 65;
    pub const EX_SOFTWARE: i32 = 70;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}", .0.iter().map(|err| err.data.to_string()).collect::<Vec<_>>().join("\n"))]
    Source(VecDeque<CompileError>),

    #[error("io error: {0}")]
    IO(#[from] io::Error),
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Error {
        Error::Source(vec_deque![err])
    }
}

impl From<VecDeque<CompileError>> for Error {
    fn from(errs: VecDeque<CompileError>) -> Self {
        Error::Source(errs)
    }
}

/// Digraph/trigraph output mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Graphs {
    None,
    Di,
    Tri,
}

/// The option flags consumed by the printers and the checker.
#[derive(Clone, Debug)]
pub struct Opt {
    /// The active dialect; always a single bit.
    pub lang: LangIds,
    /// Emit `bitand`/`and`/`compl` instead of `&`/`&&`/`~`.
    pub alt_tokens: bool,
    /// Emit digraphs or trigraphs for brackets when the dialect allows.
    pub graphs: Graphs,
    /// Print `size_t const` rather than `const size_t`.
    pub east_const: bool,
    /// Terminate declarations with a `;`.
    pub semicolon: bool,
    /// Which signednesses force an explicit `int` (e.g. `unsigned int x`
    /// rather than `unsigned x`).
    pub explicit_int: TypeId,
    /// Prefer `using` over `typedef` when showing definitions in C++11+.
    pub using_decls: bool,
    /// Seed the typedef registry with the predefined names.
    pub predefined: bool,
}

impl Default for Opt {
    fn default() -> Opt {
        Opt {
            lang: LangIds::default(),
            alt_tokens: false,
            graphs: Graphs::None,
            east_const: false,
            semicolon: true,
            explicit_int: TypeId::NONE,
            using_decls: false,
            predefined: true,
        }
    }
}

/// What a successfully interpreted command produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// Translated output, one line per declaration, trailing newline
    /// included.
    Output(String),
    /// The command succeeded silently (`set`, `define`).
    None,
    /// The user asked to leave.
    Quit,
}

/// The result of one command, warnings included either way.
#[derive(Debug)]
pub struct Outcome {
    pub result: Result<Reply, VecDeque<CompileError>>,
    pub warnings: VecDeque<CompileWarning>,
}

/// All the state one interactive session carries: options and the typedef
/// registry. Every operation takes the session explicitly; nothing is
/// global but the string interner.
pub struct Session {
    pub opt: Opt,
    pub typedefs: TypedefRegistry,
}

impl Session {
    pub fn new(opt: Opt) -> Session {
        let mut typedefs = TypedefRegistry::new();
        if opt.predefined {
            typedefs::seed_predefined(&mut typedefs);
        }
        Session { opt, typedefs }
    }

    /// Parses, checks, and executes one command line.
    pub fn interpret(&mut self, line: &str) -> Outcome {
        let mut warnings = VecDeque::new();
        let result = self.interpret_inner(line, &mut warnings);
        Outcome { result, warnings }
    }

    fn interpret_inner(
        &mut self,
        line: &str,
        warnings: &mut VecDeque<CompileWarning>,
    ) -> Result<Reply, VecDeque<CompileError>> {
        if line.trim().is_empty() {
            return Ok(Reply::None);
        }
        let parser = parse::Parser::new(self, line).map_err(|e| vec_deque![e])?;
        let command = parser.command().map_err(|e| vec_deque![e])?;
        match command {
            Command::Declare { ast, root } => {
                let mut eh = analyze::check_declaration(self, &ast, root);
                warnings.extend(eh.warnings.drain(..));
                if !eh.is_empty() {
                    return Err(eh.into_errors());
                }
                let mut out = String::new();
                write_gibberish(self, &ast, root, GibFlags::DECL, &mut out)
                    .expect("writing to a String cannot fail");
                if self.opt.semicolon {
                    out.push(';');
                }
                out.push('\n');
                Ok(Reply::Output(out))
            }
            Command::Explain { mut ast, root } => {
                let mut eh = analyze::check_declaration(self, &ast, root);
                warnings.extend(eh.warnings.drain(..));
                if !eh.is_empty() {
                    return Err(eh.into_errors());
                }
                // `explain typedef int *p` reads as "declare p as type ..."
                let taken = build::take_type_any(&mut ast, root, TypeId::TYPEDEF);
                // storage classes read at the front of the English, wherever
                // the declaration carried them
                let storage_mask =
                    TypeId::MASK_STORAGE_CLASS - TypeId::TYPEDEF - TypeId::APPLE_BLOCK;
                let storage = build::take_type_any(&mut ast, root, storage_mask);
                if !storage.is_empty() {
                    ast.node_mut(root).type_id |= storage;
                }
                let name = build::take_name(&mut ast, root);
                let mut out = String::new();
                if !name.is_empty() {
                    out.push_str("declare ");
                    out.push_str(&name.to_string());
                    out.push_str(" as ");
                }
                if !taken.is_empty() {
                    out.push_str("type ");
                }
                print::english::write_english(self, &ast, root, &mut out)
                    .expect("writing to a String cannot fail");
                out.push('\n');
                Ok(Reply::Output(out))
            }
            Command::Cast {
                kind,
                name,
                ast,
                root,
            } => {
                if kind != CastKind::C && !self.opt.lang.is_cpp() {
                    let loc = ast.node(root).loc;
                    return Err(vec_deque![loc.error(SemanticError::NotSupported {
                        what: kind.gibberish().to_string(),
                        lang: self.opt.lang.name(),
                        hint: " unless C++".to_string(),
                    })]);
                }
                let mut eh = analyze::check_cast(self, &ast, root);
                warnings.extend(eh.warnings.drain(..));
                if !eh.is_empty() {
                    return Err(eh.into_errors());
                }
                let mut target = String::new();
                write_gibberish(self, &ast, root, GibFlags::CAST, &mut target)
                    .expect("writing to a String cannot fail");
                let name = name.map(|n| n.to_string()).unwrap_or_default();
                let out = if kind == CastKind::C {
                    format!("({}){}\n", target, name)
                } else {
                    format!("{}<{}>({})\n", kind.gibberish(), target, name)
                };
                Ok(Reply::Output(out))
            }
            Command::Define {
                name,
                mut ast,
                root,
            } => {
                ast.node_mut(root).sname = name.clone();
                let mut eh = analyze::check_declaration(self, &ast, root);
                warnings.extend(eh.warnings.drain(..));
                if !eh.is_empty() {
                    return Err(eh.into_errors());
                }
                let loc = ast.node(root).loc;
                let tdef = Typedef {
                    sname: name,
                    ast,
                    root,
                    lang_ids: LangIds::ANY,
                    user_defined: true,
                };
                match self.typedefs.define(tdef) {
                    Ok(_) => Ok(Reply::None),
                    Err(rejected) => Err(vec_deque![loc.error(
                        SemanticError::TypedefRedefinition(rejected.sname.to_string())
                    )]),
                }
            }
            Command::Show(args) => self.show(args),
            Command::Set(args) => Ok(self.set(args)),
            Command::Help => Ok(Reply::Output(help_text())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    fn show(&self, args: ShowArgs) -> Result<Reply, VecDeque<CompileError>> {
        let flavor = args.flavor.unwrap_or({
            if self.opt.using_decls && lang_has_using(self.opt.lang) {
                TypedefFlavor::Using
            } else {
                TypedefFlavor::Typedef
            }
        });
        if flavor == TypedefFlavor::Using && !lang_has_using(self.opt.lang) {
            let loc = data::Location::default();
            return Err(vec_deque![loc.error(SemanticError::NotSupported {
                what: "using".to_string(),
                lang: self.opt.lang.name(),
                hint: " until C++11".to_string(),
            })]);
        }
        let mut out = String::new();
        match args.what {
            ShowWhat::Name(sname) => match self.typedefs.lookup(&sname) {
                Some(id) => {
                    write_typedef(self, self.typedefs.get(id), flavor, &mut out)
                        .expect("writing to a String cannot fail");
                    out.push('\n');
                }
                None => {
                    let name = sname.to_string();
                    let loc = data::Location::default();
                    return Err(vec_deque![loc.error(
                        data::SyntaxError::UnknownName {
                            suggestions: lookup::suggest_type_name(&name, &self.typedefs),
                            name,
                        }
                    )]);
                }
            },
            ShowWhat::All | ShowWhat::Predefined | ShowWhat::User => {
                for (_, tdef) in self.typedefs.iter() {
                    let wanted = match args.what {
                        ShowWhat::Predefined => !tdef.user_defined,
                        ShowWhat::User => tdef.user_defined,
                        _ => true,
                    };
                    if !wanted || !tdef.lang_ids.contains(self.opt.lang) {
                        continue;
                    }
                    write_typedef(self, tdef, flavor, &mut out)
                        .expect("writing to a String cannot fail");
                    out.push('\n');
                }
            }
        }
        Ok(Reply::Output(out))
    }

    fn set(&mut self, args: SetArgs) -> Reply {
        match args {
            SetArgs::Lang(lang) => self.opt.lang = lang,
            SetArgs::AltTokens(on) => self.opt.alt_tokens = on,
            SetArgs::EastConst(on) => self.opt.east_const = on,
            SetArgs::Graphs(graphs) => self.opt.graphs = graphs,
            SetArgs::Semicolon(on) => self.opt.semicolon = on,
            SetArgs::UsingDecls(on) => self.opt.using_decls = on,
            SetArgs::ExplicitInt(mask) => self.opt.explicit_int = mask,
            SetArgs::List => {
                let on_off = |b: bool, name: &str| {
                    if b {
                        format!("  {}\n", name)
                    } else {
                        format!("  no{}\n", name)
                    }
                };
                let mut out = String::new();
                out.push_str(&on_off(self.opt.alt_tokens, "alt-tokens"));
                out.push_str(&on_off(self.opt.east_const, "east-const"));
                out.push_str(&on_off(self.opt.semicolon, "semicolon"));
                out.push_str(&on_off(self.opt.using_decls, "using"));
                out.push_str(match self.opt.graphs {
                    Graphs::None => "  nographs\n",
                    Graphs::Di => "  digraphs\n",
                    Graphs::Tri => "  trigraphs\n",
                });
                out.push_str(&format!("  lang={}\n", self.opt.lang.name()));
                return Reply::Output(out);
            }
        }
        Reply::None
    }
}

fn lang_has_using(lang: LangIds) -> bool {
    lang::cpp_min(LangIds::CPP_11).contains(lang)
}

fn help_text() -> String {
    let mut out = String::new();
    for line in &[
        "commands:",
        "  declare <name> as <english>",
        "  cast [<name>] into <english>",
        "  const | dynamic | reinterpret | static cast <name> into <english>",
        "  define <name> as <english>",
        "  typedef <declaration>",
        "  using <name> = <declaration>",
        "  explain <declaration>",
        "  show <name> | all | predefined | user [as typedef | using]",
        "  set [<option> | <language> | options]",
        "  help | ?",
        "  exit | quit",
    ] {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Renders a diagnostic with a caret line pointing into the offending
/// command, for hosts that echo the input.
pub fn render_caret(line: &str, err: &Locatable<impl std::fmt::Display>) -> String {
    let column = err.location.span.start as usize;
    let width = (err.location.span.end as usize).saturating_sub(column).max(1);
    let mut out = String::new();
    out.push_str(line);
    out.push('\n');
    out.push_str(&" ".repeat(column.min(line.len())));
    out.push_str(&"^".repeat(width));
    out.push('\n');
    out
}
