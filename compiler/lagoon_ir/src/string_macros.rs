//! String literal suffix letters.

use bitflags::bitflags;

bitflags! {
    /// Post-processing stages selected by the letters written after a
    /// string literal's closing quote.
    ///
    /// Stages always run in declaration order, whatever order the letters
    /// were written in.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StringMacros: u8 {
        /// `i`: replace each `#{expr}` with the display of `expr`.
        const INTERPOLATE = 1 << 0;
        /// `d`: remove common leading whitespace.
        const DEDENT = 1 << 1;
        /// `l`: remove one leading newline.
        const STRIP_LEADING = 1 << 2;
        /// `r`: remove one trailing newline.
        const STRIP_TRAILING = 1 << 3;
        /// `~`: compile as a regular expression.
        const PATTERN = 1 << 4;
        /// `b`: encode to bytes.
        const BYTES = 1 << 5;
        /// `a`: shorthand for dedent + both strips.
        const ALL_WHITESPACE = Self::DEDENT.bits()
            | Self::STRIP_LEADING.bits()
            | Self::STRIP_TRAILING.bits();
    }
}

impl StringMacros {
    /// Flags for a single suffix letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'i' => Self::INTERPOLATE,
            'a' => Self::ALL_WHITESPACE,
            'd' => Self::DEDENT,
            'l' => Self::STRIP_LEADING,
            'r' => Self::STRIP_TRAILING,
            '~' => Self::PATTERN,
            'b' => Self::BYTES,
            _ => return None,
        })
    }

    /// Flags for a whole suffix, or `None` if any letter is not a macro letter.
    pub fn parse_suffix(suffix: &str) -> Option<Self> {
        suffix
            .chars()
            .try_fold(Self::empty(), |acc, c| Some(acc | Self::from_letter(c)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_compose() {
        let m = StringMacros::parse_suffix("bi").unwrap_or_default();
        assert!(m.contains(StringMacros::INTERPOLATE | StringMacros::BYTES));
        assert!(!m.contains(StringMacros::DEDENT));
    }

    #[test]
    fn test_a_is_shorthand() {
        assert_eq!(
            StringMacros::parse_suffix("a"),
            Some(StringMacros::DEDENT | StringMacros::STRIP_LEADING | StringMacros::STRIP_TRAILING)
        );
    }

    #[test]
    fn test_unknown_letter_rejects_suffix() {
        assert_eq!(StringMacros::parse_suffix("in"), None);
        assert_eq!(StringMacros::parse_suffix(""), Some(StringMacros::empty()));
    }
}
