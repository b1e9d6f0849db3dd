use std::mem;

use css_tokenizer::Token;

use crate::token_streams::{ProcessResult, TokenStream};
use crate::types::{
    AtRule, BlockType, ComponentValue, Declaration, Function, QualifiedRule, Rule, SimpleBlock,
};
use crate::validity::filter_valid;

/// 5.5.1. Consume a stylesheet's contents
///
/// https://drafts.csswg.org/css-syntax-3/#consume-a-stylesheets-contents
pub(crate) fn consume_a_stylesheets_contents(input: &TokenStream) -> Vec<Rule> {
    // Let rules be an initially empty list of rules.
    let mut rules = vec![];

    // Process input:
    input.process(|token| match token {
        Token::Whitespace => {
            // Discard a token from input.
            input.discard_a_token();
            ProcessResult::Continue
        }
        Token::EndOfFile => {
            // Return rules.
            ProcessResult::Return(mem::take(&mut rules))
        }
        Token::Cdo | Token::Cdc => {
            // Discard a token from input.
            input.discard_a_token();
            ProcessResult::Continue
        }
        Token::AtKeyword { .. } => {
            // Consume an at-rule from input. If anything is returned, append it to rules.
            if let Some(at_rule) = consume_an_at_rule(input, false) {
                rules.push(Rule::AtRule(at_rule));
            }
            ProcessResult::Continue
        }
        _ => {
            // Consume a qualified rule from input.
            let qualified_rule = consume_a_qualified_rule(input, None, false);
            // If anything is returned, append it to rules.
            if let Some(qualified_rule) = qualified_rule {
                rules.push(Rule::QualifiedRule(qualified_rule));
            }
            ProcessResult::Continue
        }
    })
}

/// 5.5.2. Consume an at-rule
///
/// https://drafts.csswg.org/css-syntax-3/#consume-at-rule
pub(crate) fn consume_an_at_rule(input: &TokenStream, nested: bool) -> Option<AtRule> {
    // Assert: The next token is an <at-keyword-token>.
    // Consume a token from input, and let rule be a new at-rule
    // with its name set to the returned token’s value,
    // its prelude initially set to an empty list, and no declarations or child rules.
    let mut rule = match input.consume_a_token() {
        Token::AtKeyword { value } => AtRule::new(value),
        _ => unreachable!("an at-keyword token was expected while consuming an at-rule"),
    };

    input.process(|token| match token {
        Token::Semicolon | Token::EndOfFile => {
            // Discard a token from input.
            input.discard_a_token();
            // If rule is valid in the current context, return it; otherwise return nothing.
            ProcessResult::Return(filter_valid(mem::take(&mut rule)))
        }
        Token::RightCurlyBracket => {
            // If nested is true:
            if nested {
                // If rule is valid in the current context, return it.
                // Otherwise, return nothing.
                return ProcessResult::Return(filter_valid(mem::take(&mut rule)));
            }

            // Otherwise, this is a parse error.
            log_parse_error!("unmatched '}' in the prelude of an at-rule");
            // Consume a token and append the result to rule’s prelude.
            rule.prelude
                .push(ComponentValue::PreservedToken(input.consume_a_token().clone()));

            ProcessResult::Continue
        }
        Token::LeftCurlyBracket => {
            // Consume a block from input, and assign the results to rule’s lists of declarations and child rules.
            let (declarations, child_rules) = consume_a_block(input);
            rule.declarations = Some(declarations);
            rule.child_rules = Some(child_rules);

            // If rule is valid in the current context, return it. Otherwise, return nothing.
            ProcessResult::Return(filter_valid(mem::take(&mut rule)))
        }
        _ => {
            // Consume a component value from input and append the returned value to rule’s prelude.
            rule.prelude.push(consume_a_component_value(input));
            ProcessResult::Continue
        }
    })
}

/// 5.5.3. Consume a qualified rule
///
/// https://drafts.csswg.org/css-syntax-3/#consume-qualified-rule
pub(crate) fn consume_a_qualified_rule(
    input: &TokenStream,
    stop_token: Option<&Token>,
    nested: bool,
) -> Option<QualifiedRule> {
    // Let rule be a new qualified rule with its prelude, declarations, and child rules all initially set to empty lists.
    let mut rule = QualifiedRule::default();

    input.process(|token| match token {
        token if token.is_eof() || Some(token) == stop_token => {
            // This is a parse error.
            log_parse_error!("unexpected end of the prelude of a qualified rule");

            // Return nothing.
            ProcessResult::Return(None)
        }
        Token::RightCurlyBracket => {
            // This is a parse error.
            log_parse_error!("unmatched '}' in the prelude of a qualified rule");

            // If nested is true, return nothing.
            if nested {
                return ProcessResult::Return(None);
            }

            // Otherwise, consume a token and append the result to rule’s prelude.
            rule.prelude
                .push(ComponentValue::PreservedToken(input.consume_a_token().clone()));

            ProcessResult::Continue
        }
        Token::LeftCurlyBracket => {
            // If the first two non-<whitespace-token> values of rule’s prelude are an <ident-token>
            // whose value starts with "--" followed by a <colon-token>,
            if looks_like_a_custom_property(&rule.prelude) {
                // consume the remnants of a bad declaration from input, with nested,
                consume_the_remnants_of_a_bad_declaration(input, nested);
                // and return nothing.
                return ProcessResult::Return(None);
            }

            // Otherwise, consume a block from input, and assign the results to rule’s lists of declarations and child rules.
            let (declarations, child_rules) = consume_a_block(input);
            rule.declarations = declarations;
            rule.child_rules = child_rules;

            // If rule is valid in the current context, return it; otherwise return nothing.
            ProcessResult::Return(filter_valid(mem::take(&mut rule)))
        }
        _ => {
            // Consume a component value from input
            let component_value = consume_a_component_value(input);
            // and append the result to rule’s prelude.
            rule.prelude.push(component_value);

            ProcessResult::Continue
        }
    })
}

fn looks_like_a_custom_property(prelude: &[ComponentValue]) -> bool {
    let mut values = prelude.iter().filter(|value| !value.is_whitespace());

    let starts_with_dashed_ident = matches!(
        values.next(),
        Some(ComponentValue::PreservedToken(Token::Ident { value })) if value.starts_with("--")
    );

    starts_with_dashed_ident
        && matches!(
            values.next(),
            Some(ComponentValue::PreservedToken(Token::Colon))
        )
}

/// 5.5.4. Consume a block
///
/// https://drafts.csswg.org/css-syntax-3/#consume-block
pub(crate) fn consume_a_block(input: &TokenStream) -> (Vec<Declaration>, Vec<Rule>) {
    // Assert: The next token is a <{-token>.
    debug_assert_eq!(input.next_token(), &Token::LeftCurlyBracket);

    // Discard a token from input.
    input.discard_a_token();
    // Consume a block’s contents from input and assign the results to decls and rules.
    let (decls, rules) = consume_a_blocks_contents(input);

    // Discard a token from input.
    input.discard_a_token();

    // Return decls and rules.
    (decls, rules)
}

/// 5.5.5. Consume a block's contents
///
/// https://drafts.csswg.org/css-syntax-3/#consume-block-contents
pub(crate) fn consume_a_blocks_contents(input: &TokenStream) -> (Vec<Declaration>, Vec<Rule>) {
    // Let decls be an empty list of declarations, and rules be an empty list of rules.
    let mut decls = vec![];
    let mut rules = vec![];

    input.process(|token| match token {
        Token::Whitespace | Token::Semicolon => {
            // Discard a token from input.
            input.discard_a_token();
            ProcessResult::Continue
        }
        Token::EndOfFile | Token::RightCurlyBracket => {
            // Return decls and rules.
            ProcessResult::Return((mem::take(&mut decls), mem::take(&mut rules)))
        }
        Token::AtKeyword { .. } => {
            // Consume an at-rule from input, with nested set to true.
            // If a rule was returned, append it to rules.
            if let Some(at_rule) = consume_an_at_rule(input, true) {
                rules.push(Rule::AtRule(at_rule));
            }
            ProcessResult::Continue
        }
        _ => {
            // Mark input.
            input.mark();

            // Consume a declaration from input, with nested set to true.
            let declaration = consume_a_declaration(input, true);
            // If a declaration was returned, append it to decls, and discard a mark from input.
            if let Some(declaration) = declaration {
                decls.push(declaration);
                input.discard_a_mark();

                return ProcessResult::Continue;
            }

            // Otherwise, restore a mark from input,
            input.restore_a_mark();
            // then consume a qualified rule from input, with nested set to true, and <semicolon-token> as the stop token.
            let qualified_rule = consume_a_qualified_rule(input, Some(&Token::Semicolon), true);
            // If a rule was returned, append it to rules.
            if let Some(qualified_rule) = qualified_rule {
                rules.push(Rule::QualifiedRule(qualified_rule));
            }

            ProcessResult::Continue
        }
    })
}

/// 5.5.6. Consume a declaration
///
/// https://drafts.csswg.org/css-syntax-3/#consume-declaration
pub(crate) fn consume_a_declaration(input: &TokenStream, nested: bool) -> Option<Declaration> {
    // 1. If the next token is an <ident-token>,
    let name = if let Token::Ident { value } = input.next_token() {
        // consume a token from input and set decl’s name to the token’s value.
        input.discard_a_token();
        value.clone()
    } else {
        // Otherwise, consume the remnants of a bad declaration from input, with nested,
        // and return nothing.
        consume_the_remnants_of_a_bad_declaration(input, nested);
        return None;
    };

    let mut decl = Declaration {
        name,
        value: vec![],
        important: false,
    };

    // 2. Discard whitespace from input.
    input.discard_whitespace();

    // 3. If the next token is a <colon-token>, discard a token from input.
    if input.next_token() == &Token::Colon {
        input.discard_a_token();
    } else {
        // Otherwise, consume the remnants of a bad declaration from input, with nested, and return nothing.
        log_parse_error!(format!("expected ':' after the declaration name {:?}", decl.name));
        consume_the_remnants_of_a_bad_declaration(input, nested);
        return None;
    }

    // 4. Discard whitespace from input.
    input.discard_whitespace();

    // 5. Consume a list of component values from input, with nested,
    // and with <semicolon-token> as the stop token, and set decl’s value to the result.
    decl.value = consume_a_list_of_component_values(input, Some(&Token::Semicolon), nested);

    // 6. If the last two non-<whitespace-token>s in decl’s value are a <delim-token> with the value "!"
    // followed by an <ident-token> with a value that is an ASCII case-insensitive match for "important",
    // remove them from decl’s value and set decl’s important flag.
    if let Some(index) = find_important_annotation(&decl.value) {
        decl.value.truncate(index);
        decl.important = true;
    }

    // 7. While the last item in decl’s value is a <whitespace-token>, remove that token.
    while decl.value.last().is_some_and(ComponentValue::is_whitespace) {
        decl.value.pop();
    }

    // 8. If decl is valid in the current context, return it; otherwise return nothing.
    filter_valid(decl)
}

/// Returns the index of the `!` that starts a trailing `!important`.
fn find_important_annotation(value: &[ComponentValue]) -> Option<usize> {
    let mut found_important = false;

    for (index, component_value) in value.iter().enumerate().rev() {
        let ComponentValue::PreservedToken(token) = component_value else {
            return None;
        };

        match token {
            Token::Whitespace => continue,
            token if !found_important && token.is_ident_matching("important") => {
                found_important = true;
            }
            token if found_important && token.is_delim('!') => return Some(index),
            _ => return None,
        }
    }

    None
}

/// 5.5.7. Consume the remnants of a bad declaration
///
/// https://drafts.csswg.org/css-syntax-3/#consume-the-remnants-of-a-bad-declaration
fn consume_the_remnants_of_a_bad_declaration(input: &TokenStream, nested: bool) {
    input.process(|token| match token {
        Token::EndOfFile | Token::Semicolon => {
            // Discard a token from input, and return nothing.
            input.discard_a_token();
            ProcessResult::Return(())
        }
        Token::RightCurlyBracket => {
            // If nested is true, return nothing.
            if nested {
                return ProcessResult::Return(());
            }

            // Otherwise, discard a token.
            input.discard_a_token();
            ProcessResult::Continue
        }
        _ => {
            // Consume a component value from input, and do nothing.
            consume_a_component_value(input);
            ProcessResult::Continue
        }
    })
}

/// 5.5.8. Consume a list of component values
///
/// https://drafts.csswg.org/css-syntax-3/#consume-list-of-components
pub(crate) fn consume_a_list_of_component_values(
    input: &TokenStream,
    stop_token: Option<&Token>,
    nested: bool,
) -> Vec<ComponentValue> {
    // Let values be an empty list of component values.
    let mut values = vec![];

    input.process(|token| match token {
        token if token.is_eof() || Some(token) == stop_token => {
            // Return values.
            ProcessResult::Return(mem::take(&mut values))
        }
        Token::RightCurlyBracket => {
            // If nested is true, return values.
            if nested {
                return ProcessResult::Return(mem::take(&mut values));
            }

            // Otherwise, this is a parse error.
            log_parse_error!("unmatched '}' in a list of component values");
            // Consume a token from input and append the result to values.
            values.push(ComponentValue::PreservedToken(input.consume_a_token().clone()));

            ProcessResult::Continue
        }
        _ => {
            // Consume a component value from input, and append the result to values.
            values.push(consume_a_component_value(input));
            ProcessResult::Continue
        }
    })
}

/// 5.5.9. Consume a component value
///
/// https://drafts.csswg.org/css-syntax-3/#consume-component-value
pub(crate) fn consume_a_component_value(input: &TokenStream) -> ComponentValue {
    match input.next_token() {
        Token::LeftCurlyBracket | Token::LeftSquareBracket | Token::LeftParenthesis => {
            // Consume a simple block from input and return the result.
            ComponentValue::SimpleBlock(consume_a_simple_block(input))
        }
        Token::Function { .. } => {
            // Consume a function from input and return the result.
            ComponentValue::Function(consume_a_function(input))
        }
        _ => {
            // Consume a token from input and return the result.
            ComponentValue::PreservedToken(input.consume_a_token().clone())
        }
    }
}

/// 5.5.10. Consume a simple block
///
/// https://drafts.csswg.org/css-syntax-3/#consume-simple-block
pub(crate) fn consume_a_simple_block(input: &TokenStream) -> SimpleBlock {
    // Assert: the next token of input is <{-token>, <[-token>, or <(-token>.
    let Some(block_type) = BlockType::from_token(input.next_token()) else {
        unreachable!("a '{{', '[' or '(' was expected while consuming a simple block");
    };

    // Let ending token be the mirror variant of the next token.
    // (E.g. if it was called with <[-token>, the ending token is <]-token>.)
    // Let block be a new simple block with its associated token set
    // to the next token and with its value initially set to an empty list.
    let block = OpenComponent::new(OpenKind::SimpleBlock(block_type));

    // Discard a token from input.
    input.discard_a_token();

    SimpleBlock {
        block_type,
        value: consume_until_ended(input, block),
    }
}

/// 5.5.11. Consume a function
///
/// https://drafts.csswg.org/css-syntax-3/#consume-function
pub(crate) fn consume_a_function(input: &TokenStream) -> Function {
    // Assert: The next token is a <function-token>.
    // Consume a token from input,
    let name = match input.consume_a_token() {
        Token::Function { value } => value.clone(),
        _ => unreachable!("a function token was expected while consuming a function"),
    };

    // and let function be a new function
    // with its name equal the returned token’s value, and a value set to an empty list.
    let function = OpenComponent::new(OpenKind::Function(name.clone()));

    Function {
        name,
        value: consume_until_ended(input, function),
    }
}

/// A simple block or function whose ending token has not been consumed yet.
struct OpenComponent {
    kind: OpenKind,
    value: Vec<ComponentValue>,
}

enum OpenKind {
    SimpleBlock(BlockType),
    Function(String),
}

impl OpenComponent {
    fn new(kind: OpenKind) -> Self {
        Self {
            kind,
            value: vec![],
        }
    }

    /// Consumes the next token if it starts a simple block or a function.
    fn open(input: &TokenStream) -> Option<Self> {
        let kind = match input.next_token() {
            Token::Function { value } => OpenKind::Function(value.clone()),
            token => OpenKind::SimpleBlock(BlockType::from_token(token)?),
        };
        input.discard_a_token();
        Some(Self::new(kind))
    }

    fn is_ended_by(&self, token: &Token) -> bool {
        match &self.kind {
            OpenKind::SimpleBlock(block_type) => token == &block_type.ending_token(),
            OpenKind::Function(_) => token == &Token::RightParenthesis,
        }
    }

    fn log_unexpected_eof(&self) {
        match &self.kind {
            OpenKind::SimpleBlock(block_type) => {
                log_parse_error!(format!(
                    "EOF in a simple block opened by '{}'",
                    block_type.opening_char()
                ));
            }
            OpenKind::Function(name) => {
                log_parse_error!(format!("EOF in function {name:?}"));
            }
        }
    }

    fn into_component_value(self) -> ComponentValue {
        match self.kind {
            OpenKind::SimpleBlock(block_type) => ComponentValue::SimpleBlock(SimpleBlock {
                block_type,
                value: self.value,
            }),
            OpenKind::Function(name) => ComponentValue::Function(Function {
                name,
                value: self.value,
            }),
        }
    }
}

/// Consumes component values into `outermost` until its ending token or EOF
/// and returns its value.
///
/// Simple blocks and functions nested inside are tracked on an explicit stack
/// rather than by recursion, so nesting depth is bounded by memory only.
fn consume_until_ended(input: &TokenStream, mut outermost: OpenComponent) -> Vec<ComponentValue> {
    let mut nested: Vec<OpenComponent> = vec![];

    input.process(|token| {
        let innermost = nested.last_mut().unwrap_or(&mut outermost);

        if !token.is_eof() && !innermost.is_ended_by(token) {
            // Consume a component value from input and append the result to the value.
            match OpenComponent::open(input) {
                Some(component) => nested.push(component),
                None => innermost
                    .value
                    .push(ComponentValue::PreservedToken(input.consume_a_token().clone())),
            }
            return ProcessResult::Continue;
        }

        if token.is_eof() {
            // This is a parse error.
            innermost.log_unexpected_eof();
        }

        // Discard a token from input.
        input.discard_a_token();

        match nested.pop() {
            Some(ended) => {
                let parent = nested.last_mut().unwrap_or(&mut outermost);
                parent.value.push(ended.into_component_value());
                ProcessResult::Continue
            }
            // Return the block or function.
            None => ProcessResult::Return(()),
        }
    });

    outermost.value
}
