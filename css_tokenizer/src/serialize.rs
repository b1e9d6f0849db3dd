use crate::definitions::{
    is_digit, is_ident_code_point, is_ident_start_code_point, is_letter,
    is_non_printable_code_point, is_whitespace,
};
use crate::token::{HashType, NumberType, Sign, Token};

/// Conversion back into CSS text that tokenizes to the same tokens.
pub trait ToSource {
    fn to_source(&self) -> String;
}

impl ToSource for Token {
    fn to_source(&self) -> String {
        match self {
            Token::EndOfFile => String::new(),
            Token::Ident { value } => escape_ident(value),
            Token::Function { value } => format!("{}(", escape_ident(value)),
            Token::AtKeyword { value } => format!("@{}", escape_ident(value)),
            Token::Hash { value, hash_type } => match hash_type {
                HashType::Id => format!("#{}", escape_ident(value)),
                HashType::Unrestricted => format!("#{}", escape_hash(value)),
            },
            Token::String { value } => format!("\"{}\"", escape_string(value)),
            Token::BadString => "\"\n".to_string(),
            Token::Url { value } => format!("url({})", escape_url(value)),
            Token::BadUrl => "url(BADURL '')".to_string(),
            Token::Delim { value: '\\' } => "\\\n".to_string(),
            Token::Delim { value } => value.to_string(),
            Token::Number {
                value,
                number_type,
                sign,
            } => format_number(*value, *number_type, *sign),
            Token::Percentage {
                value,
                number_type,
                sign,
            } => format!("{}%", format_number(*value, *number_type, *sign)),
            Token::Dimension {
                value,
                number_type,
                sign,
                unit,
            } => {
                let mut unit = escape_ident(unit);

                // A unit starting with "e-" or "e" and a digit would be read back as an exponent.
                let mut chars = unit.chars();
                if let (Some(first @ ('e' | 'E')), Some(second)) = (chars.next(), chars.next()) {
                    if second == '-' || is_digit(second) {
                        unit = format!("\\{:x} {}", first as u32, &unit[1..]);
                    }
                }

                format!("{}{}", format_number(*value, *number_type, *sign), unit)
            }
            Token::Whitespace => " ".to_string(),
            Token::Cdo => "<!--".to_string(),
            Token::Cdc => "-->".to_string(),
            Token::Colon => ":".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Comma => ",".to_string(),
            Token::LeftSquareBracket => "[".to_string(),
            Token::RightSquareBracket => "]".to_string(),
            Token::LeftParenthesis => "(".to_string(),
            Token::RightParenthesis => ")".to_string(),
            Token::LeftCurlyBracket => "{".to_string(),
            Token::RightCurlyBracket => "}".to_string(),
        }
    }
}

impl ToSource for [Token] {
    fn to_source(&self) -> String {
        self.iter().map(ToSource::to_source).collect()
    }
}

/// Escapes `value` so it is read back as a single ident sequence.
pub fn escape_ident(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for (index, code_point) in value.chars().enumerate() {
        let allowed = if index == 0 {
            is_ident_start_code_point(code_point)
        } else {
            is_ident_code_point(code_point)
        };

        if allowed {
            result.push(code_point);
        } else {
            escape_ident_code_point(&mut result, code_point);
        }
    }
    result
}

/// Escapes the value of an unrestricted hash, where a leading digit or hyphen is allowed.
pub fn escape_hash(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for code_point in value.chars() {
        if is_ident_code_point(code_point) {
            result.push(code_point);
        } else {
            escape_ident_code_point(&mut result, code_point);
        }
    }
    result
}

/// Escapes the contents of a double-quoted string.
pub fn escape_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for code_point in value.chars() {
        match code_point {
            '\u{0}'..='\u{1F}' | '\u{7F}' | '"' | '\\' => push_hex_escape(&mut result, code_point),
            _ => result.push(code_point),
        }
    }
    result
}

/// Escapes the contents of an unquoted `url(…)`.
pub fn escape_url(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for code_point in value.chars() {
        match code_point {
            '"' | '\'' | '(' | ')' | '\\' => push_hex_escape(&mut result, code_point),
            _ if is_whitespace(code_point) || is_non_printable_code_point(code_point) => {
                push_hex_escape(&mut result, code_point)
            }
            _ => result.push(code_point),
        }
    }
    result
}

/// Formats a number so it matches the CSS `<number-token>` grammar.
///
/// A literal `+` sign is preserved, a leading zero before the decimal point is
/// dropped so the number never merges with a preceding `.` delimiter, and
/// infinite values are written with an out-of-range literal. A
/// [`NumberType::Number`] always keeps a decimal point or exponent, so it is
/// read back with the same type and never absorbs a following `.5`.
pub fn format_number(value: f64, number_type: NumberType, sign: Option<Sign>) -> String {
    let mut repr = match (value.is_infinite(), number_type) {
        (true, NumberType::Integer) => format!("{}1{}", negative_sign(value), "0".repeat(309)),
        (true, NumberType::Number) => format!("{}1e999", negative_sign(value)),
        (false, _) => value.to_string(),
    };

    if number_type == NumberType::Number && !repr.contains(['.', 'e']) {
        repr.push_str(".0");
    }

    if let Some(fraction) = repr.strip_prefix("0.") {
        repr = format!(".{fraction}");
    } else if let Some(fraction) = repr.strip_prefix("-0.") {
        repr = format!("-.{fraction}");
    }

    match sign {
        Some(Sign::Plus) => format!("+{repr}"),
        _ => repr,
    }
}

fn negative_sign(value: f64) -> &'static str {
    if value.is_sign_negative() {
        "-"
    } else {
        ""
    }
}

fn escape_ident_code_point(result: &mut String, code_point: char) {
    // Escaping with the literal code point would be read back as a hex escape
    // or as a line continuation.
    if is_digit(code_point)
        || is_letter(code_point)
        || is_whitespace(code_point)
        || is_non_printable_code_point(code_point)
    {
        push_hex_escape(result, code_point);
    } else {
        result.push('\\');
        result.push(code_point);
    }
}

fn push_hex_escape(result: &mut String, code_point: char) {
    result.push_str(&format!("\\{:x} ", code_point as u32));
}
