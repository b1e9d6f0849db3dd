use std::fmt;

use serde::Serialize;

// https://www.w3.org/TR/css-syntax-3/#tokenization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Token {
    #[serde(rename = "EOF")]
    EndOfFile,

    Ident {
        value: String,
    },
    Function {
        value: String,
    },
    AtKeyword {
        value: String,
    },
    Hash {
        value: String,
        hash_type: HashType,
    },
    String {
        value: String,
    },
    #[serde(rename = "BADSTRING")]
    BadString,
    Url {
        value: String,
    },
    #[serde(rename = "BADURL")]
    BadUrl,
    Delim {
        value: char,
    },
    Number {
        value: f64,
        number_type: NumberType,
        #[serde(skip_serializing_if = "Option::is_none")]
        sign: Option<Sign>,
    },
    Percentage {
        value: f64,
        number_type: NumberType,
        #[serde(skip_serializing_if = "Option::is_none")]
        sign: Option<Sign>,
    },
    Dimension {
        value: f64,
        number_type: NumberType,
        #[serde(skip_serializing_if = "Option::is_none")]
        sign: Option<Sign>,
        unit: String,
    },
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    #[serde(rename = "OPEN-SQUARE")]
    LeftSquareBracket,
    #[serde(rename = "CLOSE-SQUARE")]
    RightSquareBracket,
    #[serde(rename = "OPEN-PAREN")]
    LeftParenthesis,
    #[serde(rename = "CLOSE-PAREN")]
    RightParenthesis,
    #[serde(rename = "OPEN-CURLY")]
    LeftCurlyBracket,
    #[serde(rename = "CLOSE-CURLY")]
    RightCurlyBracket,
}

impl Token {
    /// The closing token that ends a block opened by this token.
    ///
    /// A <function-token> is closed by a <)-token> as well.
    pub fn mirror(&self) -> Option<Token> {
        match self {
            Token::LeftCurlyBracket => Some(Token::RightCurlyBracket),
            Token::LeftSquareBracket => Some(Token::RightSquareBracket),
            Token::LeftParenthesis | Token::Function { .. } => Some(Token::RightParenthesis),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::EndOfFile)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }

    /// Whether this is a <delim-token> with the given value.
    pub fn is_delim(&self, code_point: char) -> bool {
        matches!(self, Token::Delim { value } if *value == code_point)
    }

    /// Whether this is an <ident-token> that is an ASCII case-insensitive match for `name`.
    pub fn is_ident_matching(&self, name: &str) -> bool {
        matches!(self, Token::Ident { value } if value.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sign_prefix(sign: &Option<Sign>) -> &'static str {
            match sign {
                Some(Sign::Plus) => "+",
                _ => "",
            }
        }

        match self {
            Token::EndOfFile => write!(f, "EOF"),
            Token::Ident { value } => write!(f, "IDENT({value})"),
            Token::Function { value } => write!(f, "FUNCTION({value})"),
            Token::AtKeyword { value } => write!(f, "AT({value})"),
            Token::Hash { value, .. } => write!(f, "HASH({value})"),
            Token::String { value } => write!(f, "STRING({value})"),
            Token::BadString => write!(f, "BADSTRING"),
            Token::Url { value } => write!(f, "URL({value})"),
            Token::BadUrl => write!(f, "BADURL"),
            Token::Delim { value } => write!(f, "DELIM({value})"),
            Token::Number {
                value,
                number_type,
                sign,
            } => {
                let name = match number_type {
                    NumberType::Integer => "INT",
                    NumberType::Number => "NUMBER",
                };
                write!(f, "{name}({}{value})", sign_prefix(sign))
            }
            Token::Percentage { value, sign, .. } => {
                write!(f, "PERCENTAGE({}{value})", sign_prefix(sign))
            }
            Token::Dimension {
                value, sign, unit, ..
            } => write!(f, "DIM({}{value}, {unit})", sign_prefix(sign)),
            Token::Whitespace => write!(f, "WS"),
            Token::Cdo => write!(f, "CDO"),
            Token::Cdc => write!(f, "CDC"),
            Token::Colon => write!(f, "COLON"),
            Token::Semicolon => write!(f, "SEMICOLON"),
            Token::Comma => write!(f, "COMMA"),
            Token::LeftSquareBracket => write!(f, "OPEN-SQUARE"),
            Token::RightSquareBracket => write!(f, "CLOSE-SQUARE"),
            Token::LeftParenthesis => write!(f, "OPEN-PAREN"),
            Token::RightParenthesis => write!(f, "CLOSE-PAREN"),
            Token::LeftCurlyBracket => write!(f, "OPEN-CURLY"),
            Token::RightCurlyBracket => write!(f, "CLOSE-CURLY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    Integer,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    Id,
    Unrestricted,
}

/// The literal sign that preceded a number in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mirror_tokens() {
        assert_eq!(Token::LeftCurlyBracket.mirror(), Some(Token::RightCurlyBracket));
        assert_eq!(Token::LeftSquareBracket.mirror(), Some(Token::RightSquareBracket));
        assert_eq!(Token::LeftParenthesis.mirror(), Some(Token::RightParenthesis));
        assert_eq!(
            Token::Function {
                value: "calc".to_string()
            }
            .mirror(),
            Some(Token::RightParenthesis)
        );
        assert_eq!(Token::RightCurlyBracket.mirror(), None);
        assert_eq!(Token::Whitespace.mirror(), None);
    }

    #[test]
    fn display() {
        let number = Token::Number {
            value: 5.0,
            number_type: NumberType::Integer,
            sign: Some(Sign::Plus),
        };
        assert_eq!(number.to_string(), "INT(+5)");

        let dimension = Token::Dimension {
            value: -1.5,
            number_type: NumberType::Number,
            sign: Some(Sign::Minus),
            unit: "px".to_string(),
        };
        assert_eq!(dimension.to_string(), "DIM(-1.5, px)");
        assert_eq!(Token::Whitespace.to_string(), "WS");
        assert_eq!(
            Token::Ident {
                value: "foo".to_string()
            }
            .to_string(),
            "IDENT(foo)"
        );
    }

    #[test]
    fn serialize_to_json() {
        let token = Token::Hash {
            value: "foo".to_string(),
            hash_type: HashType::Id,
        };
        assert_eq!(
            serde_json::to_value(token).unwrap(),
            json!({"type": "HASH", "value": "foo", "hash_type": "id"})
        );

        let token = Token::Number {
            value: 6.3754,
            number_type: NumberType::Number,
            sign: Some(Sign::Plus),
        };
        assert_eq!(
            serde_json::to_value(token).unwrap(),
            json!({"type": "NUMBER", "value": 6.3754, "number_type": "number", "sign": "+"})
        );

        let token = Token::Percentage {
            value: 10.0,
            number_type: NumberType::Integer,
            sign: None,
        };
        assert_eq!(
            serde_json::to_value(token).unwrap(),
            json!({"type": "PERCENTAGE", "value": 10.0, "number_type": "integer"})
        );

        assert_eq!(
            serde_json::to_value(Token::AtKeyword {
                value: "media".to_string()
            })
            .unwrap(),
            json!({"type": "AT-KEYWORD", "value": "media"})
        );
        assert_eq!(serde_json::to_value(Token::EndOfFile).unwrap(), json!({"type": "EOF"}));
        assert_eq!(serde_json::to_value(Token::BadUrl).unwrap(), json!({"type": "BADURL"}));
        assert_eq!(
            serde_json::to_value(Token::LeftCurlyBracket).unwrap(),
            json!({"type": "OPEN-CURLY"})
        );
        assert_eq!(serde_json::to_value(Token::Whitespace).unwrap(), json!({"type": "WHITESPACE"}));
    }
}
