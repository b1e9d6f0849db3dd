//! Parsing of CSS tokens into stylesheets, rules, declarations and component values,
//! following [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/#parsing).

pub use error::{ParseError, Result, SyntaxError};
pub use parser_entry_points::ParserInput;
pub use token_streams::{ProcessResult, TokenStream};
pub use types::{
    AtRule, BlockType, ComponentValue, Declaration, Function, QualifiedRule, Rule, SimpleBlock,
    StyleSheet,
};

pub use css_tokenizer::ToSource;

macro_rules! log_parse_error {
    ($message:expr) => {
        log::warn!(
            target: "CssParser",
            "Parse error ({}:{}): {}",
            file!(),
            line!(),
            $message
        );
    };
    () => {
        log::warn!(target: "CssParser", "Parse error ({}:{})", file!(), line!());
    };
}

mod error;
mod parser_algorithms;
pub mod parser_entry_points;
mod serialize;
pub mod token_streams;
pub mod types;
mod validity;

/// Namespace for the parser entry points.
///
/// Every entry point owns the token stream it parses, so no state is kept between calls.
pub struct Parser;
