//! String interning for identifiers.
//!
//! Commands are short, but the same identifiers recur constantly across a
//! session: scoped-name segments, typedef names, and the English glue words
//! the parser tests for on nearly every token. Interning them once makes a
//! name a `Copy` token, keeps `ScopedName` comparison and hashing cheap, and
//! lets the word tests in the parser run without allocating. The core is
//! single-threaded, so the mutex only exists to keep the global table sound.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use lasso::{Rodeo, Spur};
use lazy_static::lazy_static;

lazy_static! {
    static ref STRINGS: Mutex<Rodeo<Spur>> = Mutex::new(Rodeo::default());
}

fn table() -> MutexGuard<'static, Rodeo<Spur>> {
    STRINGS
        .lock()
        .expect("the intern table is poisoned, another thread must have panicked")
}

/// A handle to an interned identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InternedStr(Spur);

impl InternedStr {
    pub fn get_or_intern<T: AsRef<str>>(val: T) -> InternedStr {
        InternedStr(table().get_or_intern(val.as_ref()))
    }

    /// Whether this is the empty name; unnamed parameters and abstract
    /// declarators all share it.
    pub fn is_empty(self) -> bool {
        self.eq_str("")
    }

    /// Compares against a plain string without copying anything out of the
    /// table; the grammars lean on this for every English glue word.
    pub fn eq_str(self, s: &str) -> bool {
        table().resolve(&self.0) == s
    }

    /// Copies the string back out, for diagnostics and for matching one word
    /// against several spellings at once.
    pub fn resolve(self) -> String {
        table().resolve(&self.0).to_string()
    }
}

impl fmt::Display for InternedStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(table().resolve(&self.0))
    }
}

impl Default for InternedStr {
    fn default() -> Self {
        Self::get_or_intern("")
    }
}

impl From<&str> for InternedStr {
    fn from(s: &str) -> Self {
        Self::get_or_intern(s)
    }
}

impl From<String> for InternedStr {
    fn from(s: String) -> Self {
        Self::get_or_intern(s)
    }
}

#[cfg(test)]
mod tests {
    use super::InternedStr;

    #[test]
    fn interning_is_idempotent() {
        let a = InternedStr::from("ptrdiff_t");
        let b = InternedStr::from("ptrdiff_t".to_string());
        assert_eq!(a, b);
        assert_eq!(a.resolve(), "ptrdiff_t");
    }

    #[test]
    fn word_tests() {
        let word = InternedStr::from("returning");
        assert!(word.eq_str("returning"));
        assert!(!word.eq_str("return"));
        assert!(!word.is_empty());
        assert!(InternedStr::default().is_empty());
    }
}
