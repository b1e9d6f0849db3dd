//! A generic validity check without knowledge of specific CSS grammars.

use css_tokenizer::Token;

use crate::types::{AtRule, BlockType, ComponentValue, Declaration, QualifiedRule};

pub(crate) trait ValidInContext {
    fn is_valid_in_the_current_context(&self) -> bool;
}

impl ValidInContext for AtRule {
    fn is_valid_in_the_current_context(&self) -> bool {
        true
    }
}

impl ValidInContext for QualifiedRule {
    /// Semicolons only end up in a prelude at the top level of a stylesheet.
    fn is_valid_in_the_current_context(&self) -> bool {
        !self
            .prelude
            .iter()
            .any(|value| matches!(value, ComponentValue::PreservedToken(Token::Semicolon)))
    }
}

impl ValidInContext for Declaration {
    /// Only custom properties may contain a `{}` block in their value.
    fn is_valid_in_the_current_context(&self) -> bool {
        if self.name.starts_with("--") {
            return true;
        }

        !self.value.iter().any(|value| {
            matches!(value, ComponentValue::SimpleBlock(block) if block.block_type == BlockType::CurlyBracket)
        })
    }
}

/// Returns `construct` if it is valid in the current context, otherwise nothing.
pub(crate) fn filter_valid<T: ValidInContext>(construct: T) -> Option<T> {
    construct
        .is_valid_in_the_current_context()
        .then_some(construct)
}
