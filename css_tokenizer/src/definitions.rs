//! 4.2. Definitions
//!
//! https://www.w3.org/TR/css-syntax-3/#tokenizer-definitions

/// Expands to a pattern matching the named class of code points.
macro_rules! definition {
    (eof_code_point) => {
        None
    };
    (digit) => {
        '0'..='9'
    };
    (hex_digit) => {
        definition!(digit) | 'A'..='F' | 'a'..='f'
    };
    (uppercase_letter) => {
        'A'..='Z'
    };
    (lowercase_letter) => {
        'a'..='z'
    };
    (letter) => {
        definition!(uppercase_letter) | definition!(lowercase_letter)
    };
    (non_ascii_ident_code_point) => {
        '\u{B7}'
            | '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{203F}'
            | '\u{2040}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    };
    (ident_start_code_point) => {
        definition!(letter) | definition!(non_ascii_ident_code_point) | '_'
    };
    (ident_code_point) => {
        definition!(ident_start_code_point) | definition!(digit) | '-'
    };
    (non_printable_code_point) => {
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{E}'..='\u{1F}' | '\u{7F}'
    };
    (newline) => {
        '\n'
    };
    (whitespace) => {
        definition!(newline) | '\t' | ' '
    };
}

/// The greatest code point defined by Unicode.
pub const MAXIMUM_ALLOWED_CODE_POINT: u32 = 0x10FFFF;

pub fn is_digit(code_point: char) -> bool {
    matches!(code_point, definition!(digit))
}

pub fn is_hex_digit(code_point: char) -> bool {
    matches!(code_point, definition!(hex_digit))
}

pub fn is_letter(code_point: char) -> bool {
    matches!(code_point, definition!(letter))
}

pub fn is_ident_start_code_point(code_point: char) -> bool {
    matches!(code_point, definition!(ident_start_code_point))
}

pub fn is_ident_code_point(code_point: char) -> bool {
    matches!(code_point, definition!(ident_code_point))
}

pub fn is_non_printable_code_point(code_point: char) -> bool {
    matches!(code_point, definition!(non_printable_code_point))
}

pub fn is_newline(code_point: char) -> bool {
    matches!(code_point, definition!(newline))
}

pub fn is_whitespace(code_point: char) -> bool {
    matches!(code_point, definition!(whitespace))
}

/// Surrogates only exist as UTF-16 code units or escaped values, never as a `char`.
pub fn is_surrogate(code_point: u32) -> bool {
    (0xD800..=0xDFFF).contains(&code_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_code_points() {
        assert!(is_ident_start_code_point('_'));
        assert!(is_ident_start_code_point('\u{1234}'));
        assert!(is_ident_start_code_point('\u{12345}'));
        assert!(!is_ident_start_code_point('-'));
        assert!(!is_ident_start_code_point('1'));
        assert!(is_ident_code_point('-'));
        assert!(is_ident_code_point('1'));
    }

    #[test]
    fn non_ascii_gaps_are_not_ident_code_points() {
        assert!(!is_ident_start_code_point('\u{A0}'));
        assert!(!is_ident_start_code_point('\u{2003}'));
        assert!(!is_ident_code_point('\u{D7}'));
    }

    #[test]
    fn whitespace_is_limited_to_preprocessed_forms() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace('\n'));
        assert!(!is_whitespace('\r'));
        assert!(!is_whitespace('\u{C}'));
    }

    #[test]
    fn non_printable() {
        assert!(is_non_printable_code_point('\u{0}'));
        assert!(is_non_printable_code_point('\u{B}'));
        assert!(is_non_printable_code_point('\u{7F}'));
        assert!(!is_non_printable_code_point('\t'));
        assert!(!is_non_printable_code_point('\n'));
    }

    #[test]
    fn surrogates() {
        assert!(is_surrogate(0xD800));
        assert!(is_surrogate(0xDFFF));
        assert!(!is_surrogate(0xE000));
    }
}
