use css_tokenizer::TokenizerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
}

/// Input that an entry point cannot turn into the requested construct.
///
/// Recoverable parse errors inside a construct are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("input is empty")]
    EmptyInput,
    #[error("unexpected input after the end of the construct")]
    TrailingInput,
    #[error("input is not a valid rule")]
    InvalidRule,
    #[error("input is not a valid declaration")]
    InvalidDeclaration,
}
