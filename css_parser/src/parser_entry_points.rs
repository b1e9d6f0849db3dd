use std::borrow::Cow;

use css_tokenizer::{tokenize, Token};

use crate::error::{Result, SyntaxError};
use crate::parser_algorithms::{
    consume_a_blocks_contents, consume_a_component_value, consume_a_declaration,
    consume_a_list_of_component_values, consume_a_qualified_rule, consume_a_stylesheets_contents,
    consume_an_at_rule,
};
use crate::token_streams::TokenStream;
use crate::types::{ComponentValue, Declaration, Rule, StyleSheet};
use crate::Parser;

/// Anything an entry point accepts as its input.
///
/// A borrowed [`TokenStream`] is parsed in place, so its index advances.
#[derive(Debug, Clone)]
pub enum ParserInput<'a> {
    Text(&'a str),
    Tokens(Vec<Token>),
    Stream(&'a TokenStream),
}

impl<'a> ParserInput<'a> {
    /// 5.4.1. Normalize into a token stream
    ///
    /// https://drafts.csswg.org/css-syntax-3/#normalize-into-a-token-stream
    fn normalize_into_a_token_stream(self) -> Result<Cow<'a, TokenStream>> {
        match self {
            // If input is a token stream, return input.
            ParserInput::Stream(stream) => Ok(Cow::Borrowed(stream)),
            // If input is a list of CSS tokens and/or component values,
            // create a new token stream with input as its tokens, and return it.
            ParserInput::Tokens(tokens) => Ok(Cow::Owned(TokenStream::new(tokens))),
            // If input is a string, then filter code points from input,
            // tokenize the result, and create a new token stream with those tokens as its tokens, and return it.
            ParserInput::Text(text) => Ok(Cow::Owned(TokenStream::new(tokenize(text)?))),
        }
    }
}

impl<'a> From<&'a str> for ParserInput<'a> {
    fn from(text: &'a str) -> Self {
        ParserInput::Text(text)
    }
}

impl<'a> From<&'a String> for ParserInput<'a> {
    fn from(text: &'a String) -> Self {
        ParserInput::Text(text)
    }
}

impl From<Vec<Token>> for ParserInput<'_> {
    fn from(tokens: Vec<Token>) -> Self {
        ParserInput::Tokens(tokens)
    }
}

impl From<&[Token]> for ParserInput<'_> {
    fn from(tokens: &[Token]) -> Self {
        ParserInput::Tokens(tokens.to_vec())
    }
}

impl<'a> From<&'a TokenStream> for ParserInput<'a> {
    fn from(stream: &'a TokenStream) -> Self {
        ParserInput::Stream(stream)
    }
}

/// 5.4. Parser Entry Points
///
/// https://www.w3.org/TR/css-syntax-3/#parser-entry-points
impl Parser {
    /// 5.4.3. Parse a stylesheet
    ///
    /// "Parse a stylesheet" is intended to be the normal parser entry point, for parsing stylesheets.
    ///
    /// https://www.w3.org/TR/css-syntax-3/#parse-stylesheet
    pub fn parse_a_stylesheet<'a>(
        input: impl Into<ParserInput<'a>>,
        location: Option<&str>,
    ) -> Result<StyleSheet> {
        // 1. If input is a byte stream for a stylesheet, decode bytes from input, and set input to the result.
        // NOTE: Byte streams are not accepted, text is always decoded already.

        // 2. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 3. Create a new stylesheet, with its location set to location (or null, if location was not passed).
        let mut stylesheet = StyleSheet::new(location);

        // 4. Consume a stylesheet’s contents from input, and set the stylesheet’s rules to the result.
        stylesheet.rules = consume_a_stylesheets_contents(&input);

        // 5. Return the stylesheet.
        Ok(stylesheet)
    }

    /// 5.4.4. Parse a stylesheet’s contents
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-a-stylesheets-contents
    pub fn parse_a_stylesheets_contents<'a>(
        input: impl Into<ParserInput<'a>>,
    ) -> Result<Vec<Rule>> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Consume a stylesheet’s contents from input, and return the result.
        Ok(consume_a_stylesheets_contents(&input))
    }

    /// 5.4.5. Parse a block’s contents
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-block-contents
    pub fn parse_a_blocks_contents<'a>(
        input: impl Into<ParserInput<'a>>,
    ) -> Result<(Vec<Declaration>, Vec<Rule>)> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Consume a block’s contents from input, and return the result.
        Ok(consume_a_blocks_contents(&input))
    }

    /// 5.4.6. Parse a rule
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-rule
    pub fn parse_a_rule<'a>(input: impl Into<ParserInput<'a>>) -> Result<Rule> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Discard whitespace from input.
        input.discard_whitespace();

        // 3. If the next token from input is an <EOF-token>, return a syntax error.
        let rule = match input.next_token() {
            Token::EndOfFile => return Err(SyntaxError::EmptyInput.into()),
            // Otherwise, if the next token from input is an <at-keyword-token>,
            // consume an at-rule from input, and let rule be the return value.
            Token::AtKeyword { .. } => consume_an_at_rule(&input, false)
                .map(Rule::AtRule)
                .ok_or(SyntaxError::InvalidRule)?,
            // Otherwise, consume a qualified rule from input and let rule be the return value.
            // If nothing or an invalid rule error was returned, return a syntax error.
            _ => consume_a_qualified_rule(&input, None, false)
                .map(Rule::QualifiedRule)
                .ok_or(SyntaxError::InvalidRule)?,
        };

        // 4. Discard whitespace from input.
        input.discard_whitespace();

        // 5. If the next token from input is an <EOF-token>, return rule. Otherwise, return a syntax error.
        if !input.empty() {
            return Err(SyntaxError::TrailingInput.into());
        }

        Ok(rule)
    }

    /// 5.4.7. Parse a declaration
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-declaration
    pub fn parse_a_declaration<'a>(input: impl Into<ParserInput<'a>>) -> Result<Declaration> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Discard whitespace from input.
        input.discard_whitespace();

        // 3. Consume a declaration from input. If anything was returned, return it. Otherwise, return a syntax error.
        consume_a_declaration(&input, false).ok_or_else(|| SyntaxError::InvalidDeclaration.into())
    }

    /// 5.4.8. Parse a component value
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-component-value
    pub fn parse_a_component_value<'a>(
        input: impl Into<ParserInput<'a>>,
    ) -> Result<ComponentValue> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Discard whitespace from input.
        input.discard_whitespace();

        // 3. If input is empty, return a syntax error.
        if input.empty() {
            return Err(SyntaxError::EmptyInput.into());
        }

        // 4. Consume a component value from input and let value be the return value.
        let value = consume_a_component_value(&input);

        // 5. Discard whitespace from input.
        input.discard_whitespace();

        // 6. If input is empty, return value. Otherwise, return a syntax error.
        if !input.empty() {
            return Err(SyntaxError::TrailingInput.into());
        }

        Ok(value)
    }

    /// 5.4.9. Parse a list of component values
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-list-of-component-values
    pub fn parse_a_list_of_component_values<'a>(
        input: impl Into<ParserInput<'a>>,
    ) -> Result<Vec<ComponentValue>> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Consume a list of component values from input, and return the result.
        Ok(consume_a_list_of_component_values(&input, None, false))
    }

    /// 5.4.10. Parse a comma-separated list of component values
    ///
    /// https://drafts.csswg.org/css-syntax-3/#parse-comma-separated-list-of-component-values
    pub fn parse_a_comma_separated_list_of_component_values<'a>(
        input: impl Into<ParserInput<'a>>,
    ) -> Result<Vec<Vec<ComponentValue>>> {
        // 1. Normalize input, and set input to the result.
        let input = input.into().normalize_into_a_token_stream()?;

        // 2. Let groups be an empty list.
        let mut groups = vec![];

        // 3. While input is not empty:
        while !input.empty() {
            // 1. Consume a list of component values from input, with <comma-token> as the stop token,
            // and append the result to groups.
            groups.push(consume_a_list_of_component_values(
                &input,
                Some(&Token::Comma),
                false,
            ));

            // 2. Discard a token from input.
            input.discard_a_token();
        }

        // 4. Return groups.
        Ok(groups)
    }
}
