//! Character classification for identifiers and digits.
//!
//! The grammar fixes identifiers to `[A-Za-z_][A-Za-z0-9_]*` (§4.1 rule 5),
//! so classification here is plain ASCII — no XID_Start/XID_Continue
//! tables are needed.

/// True if `c` may start an identifier: ASCII letter or underscore.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// True if `c` may continue an identifier: ASCII letter, digit, or
/// underscore.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `c` is an ASCII decimal digit.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_start_accepts_letters_and_underscore() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('Z'));
        assert!(is_ident_start('_'));
        assert!(!is_ident_start('1'));
        assert!(!is_ident_start('$'));
    }

    #[test]
    fn ident_continue_accepts_digits_too() {
        assert!(is_ident_continue('9'));
        assert!(is_ident_continue('a'));
        assert!(!is_ident_continue('-'));
    }

    #[test]
    fn digit_is_ascii_only() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(!is_digit('a'));
    }
}
