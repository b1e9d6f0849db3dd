//! Tokenization of CSS source text, following
//! [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/#tokenization).

#![allow(clippy::manual_is_ascii_check)]

pub use error::{Result, TokenizerError};
pub use preprocessor::{preprocess, preprocess_utf16};
pub use serialize::{escape_hash, escape_ident, escape_string, escape_url, format_number, ToSource};
pub use token::{HashType, NumberType, Sign, Token};
pub use tokenizer::Tokenizer;

macro_rules! log_current_token {
    ($token:expr) => {
        log::trace!(target: "CssTokenizer", "{}", $token);
    };
}

macro_rules! log_parse_error {
    ($message:expr) => {
        log::warn!(
            target: "CssTokenizer",
            "Parse error ({}:{}): {}",
            file!(),
            line!(),
            $message
        );
    };
    () => {
        log::warn!(target: "CssTokenizer", "Parse error ({}:{})", file!(), line!());
    };
}

#[macro_use]
pub mod definitions;

mod error;
mod preprocessor;
mod serialize;
pub mod token;
mod tokenizer;

/// Tokenizes `input` into a list of tokens that always ends with [`Token::EndOfFile`].
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Tokenizer::new(input).tokenize()
}
