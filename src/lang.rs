use std::fmt::{self, Display};

use bitflags::bitflags;

bitflags! {
    /// A set of language dialects.
    ///
    /// Within each family the bits are ordered oldest to newest, so "this
    /// dialect and everything after it" is a single wrapping-subtract mask.
    /// The C++ family starts at bit 8, leaving room for future C revisions.
    pub struct LangIds: u16 {
        const C_KNR   = 1 << 0;
        const C_89    = 1 << 1;
        const C_95    = 1 << 2;
        const C_99    = 1 << 3;
        const C_11    = 1 << 4;
        const C_17    = 1 << 5;
        const C_23    = 1 << 6;

        const CPP_98  = 1 << 8;
        const CPP_03  = 1 << 9;
        const CPP_11  = 1 << 10;
        const CPP_14  = 1 << 11;
        const CPP_17  = 1 << 12;
        const CPP_20  = 1 << 13;
        const CPP_23  = 1 << 14;

        const C_ANY   = Self::C_KNR.bits | Self::C_89.bits | Self::C_95.bits
                      | Self::C_99.bits | Self::C_11.bits | Self::C_17.bits
                      | Self::C_23.bits;
        const CPP_ANY = Self::CPP_98.bits | Self::CPP_03.bits | Self::CPP_11.bits
                      | Self::CPP_14.bits | Self::CPP_17.bits | Self::CPP_20.bits
                      | Self::CPP_23.bits;
        const ANY     = Self::C_ANY.bits | Self::CPP_ANY.bits;
        const NONE    = 0;
    }
}

/// Returns `lang` and every newer C dialect.
pub const fn c_min(lang: LangIds) -> LangIds {
    LangIds::from_bits_truncate(LangIds::C_ANY.bits() & !(lang.bits() - 1))
}

/// Returns every C dialect up to and including `lang`.
pub const fn c_max(lang: LangIds) -> LangIds {
    LangIds::from_bits_truncate(LangIds::C_ANY.bits() & ((lang.bits() - 1) | lang.bits()))
}

/// Returns `lang` and every newer C++ dialect.
pub const fn cpp_min(lang: LangIds) -> LangIds {
    LangIds::from_bits_truncate(LangIds::CPP_ANY.bits() & !(lang.bits() - 1))
}

/// Returns every C++ dialect up to and including `lang`.
pub const fn cpp_max(lang: LangIds) -> LangIds {
    LangIds::from_bits_truncate(LangIds::CPP_ANY.bits() & ((lang.bits() - 1) | lang.bits()))
}

impl LangIds {
    pub fn is_c(self) -> bool {
        self.intersects(LangIds::C_ANY)
    }
    pub fn is_cpp(self) -> bool {
        self.intersects(LangIds::CPP_ANY)
    }
    pub fn is_one_bit(self) -> bool {
        self.bits().is_power_of_two()
    }

    /// The oldest dialect in the set.
    pub fn oldest(self) -> LangIds {
        if self.is_empty() {
            LangIds::NONE
        } else {
            LangIds::from_bits_truncate(1 << self.bits().trailing_zeros())
        }
    }

    /// The newest dialect in the set.
    pub fn newest(self) -> LangIds {
        if self.is_empty() {
            LangIds::NONE
        } else {
            LangIds::from_bits_truncate(1 << (15 - self.bits().leading_zeros()))
        }
    }

    /// The canonical name of a single dialect.
    pub fn name(self) -> &'static str {
        match self {
            LangIds::C_KNR => "K&R C",
            LangIds::C_89 => "C89",
            LangIds::C_95 => "C95",
            LangIds::C_99 => "C99",
            LangIds::C_11 => "C11",
            LangIds::C_17 => "C17",
            LangIds::C_23 => "C23",
            LangIds::CPP_98 => "C++98",
            LangIds::CPP_03 => "C++03",
            LangIds::CPP_11 => "C++11",
            LangIds::CPP_14 => "C++14",
            LangIds::CPP_17 => "C++17",
            LangIds::CPP_20 => "C++20",
            LangIds::CPP_23 => "C++23",
            _ => "",
        }
    }

    /// Looks a dialect up by (case-insensitive) name, accepting the common
    /// aliases the original command language did.
    pub fn find(name: &str) -> Option<LangIds> {
        let lang = match name.to_ascii_uppercase().as_str() {
            "C" => LangIds::C_17,
            "CK&R" | "CKNR" | "CKR" | "K&R" | "K&RC" | "KNR" | "KNRC" | "KR" | "KRC" | "C78" => {
                LangIds::C_KNR
            }
            "C89" | "C90" => LangIds::C_89,
            "C95" => LangIds::C_95,
            "C99" => LangIds::C_99,
            "C11" => LangIds::C_11,
            "C17" | "C18" => LangIds::C_17,
            "C23" | "C2X" => LangIds::C_23,
            "C++" => LangIds::CPP_17,
            "C++98" => LangIds::CPP_98,
            "C++03" => LangIds::CPP_03,
            "C++11" => LangIds::CPP_11,
            "C++14" => LangIds::CPP_14,
            "C++17" => LangIds::CPP_17,
            "C++20" => LangIds::CPP_20,
            "C++23" | "C++2B" => LangIds::CPP_23,
            _ => return None,
        };
        Some(lang)
    }

    /// All dialect names, for `set` completion and suggestions.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "K&R", "C89", "C95", "C99", "C11", "C17", "C23", "C++98", "C++03", "C++11", "C++14",
            "C++17", "C++20", "C++23",
        ]
    }

    /// Phrases in which dialects a feature legal in `self` is available,
    /// relative to the current dialect, for tacking onto diagnostics:
    /// `" unless C++"`, `" since C11"`, `" until C++14"`, or `""` when no
    /// short phrase fits.
    pub fn which(self, current: LangIds) -> String {
        if self.is_empty() {
            return String::new();
        }
        if self.is_one_bit() {
            if self == current {
                return String::new();
            }
            return format!(" unless {}", self.name());
        }
        let same_family = if current.is_c() {
            self & LangIds::C_ANY
        } else {
            self & LangIds::CPP_ANY
        };
        if same_family.is_empty() {
            return if current.is_c() {
                " unless C++".to_string()
            } else {
                " unless C".to_string()
            };
        }
        let oldest = same_family.oldest();
        if current.bits() < oldest.bits() {
            format!(" until {}", oldest.name())
        } else {
            // legal before, removed after: the next dialect up is the first
            // in which the feature is illegal
            let next = LangIds::from_bits_truncate(same_family.newest().bits() << 1);
            format!(" since {}", next.name())
        }
    }
}

impl Display for LangIds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_one_bit() {
            write!(f, "{}", self.name())
        } else {
            let mut sep = "";
            for bit in (0..16).map(|i| LangIds::from_bits_truncate(1 << i)) {
                if self.contains(bit) && !bit.is_empty() {
                    write!(f, "{}{}", sep, bit.name())?;
                    sep = ", ";
                }
            }
            Ok(())
        }
    }
}

impl Default for LangIds {
    fn default() -> Self {
        LangIds::C_17
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_masks() {
        assert_eq!(
            c_min(LangIds::C_99),
            LangIds::C_99 | LangIds::C_11 | LangIds::C_17 | LangIds::C_23
        );
        assert_eq!(
            cpp_max(LangIds::CPP_14),
            LangIds::CPP_98 | LangIds::CPP_03 | LangIds::CPP_11 | LangIds::CPP_14
        );
        assert!(c_min(LangIds::C_KNR).contains(LangIds::C_23));
    }

    #[test]
    fn oldest_newest() {
        let set = LangIds::C_99 | LangIds::C_17 | LangIds::CPP_11;
        assert_eq!(set.oldest(), LangIds::C_99);
        assert_eq!(set.newest(), LangIds::CPP_11);
    }

    #[test]
    fn find_aliases() {
        assert_eq!(LangIds::find("c90"), Some(LangIds::C_89));
        assert_eq!(LangIds::find("knr"), Some(LangIds::C_KNR));
        assert_eq!(LangIds::find("C++20"), Some(LangIds::CPP_20));
        assert_eq!(LangIds::find("c++"), Some(LangIds::CPP_17));
        assert_eq!(LangIds::find("pascal"), None);
    }

    #[test]
    fn which_phrasing() {
        let cpp_only = LangIds::CPP_ANY;
        assert_eq!(cpp_only.which(LangIds::C_17), " unless C++");
        assert_eq!(c_min(LangIds::C_99).which(LangIds::C_89), " until C99");
        // `register` is legal until C++14; in C++17 the feature is gone
        assert_eq!(
            (LangIds::C_ANY | cpp_max(LangIds::CPP_14)).which(LangIds::CPP_17),
            " since C++17"
        );
    }
}
