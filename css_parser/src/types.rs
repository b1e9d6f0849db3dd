use css_tokenizer::Token;
use serde::Serialize;

/// https://drafts.csswg.org/css-syntax-3/#css-stylesheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "STYLESHEET")]
pub struct StyleSheet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new(location: Option<&str>) -> Self {
        Self {
            location: location.map(|s| s.to_string()),
            rules: vec![],
        }
    }
}

/// https://drafts.csswg.org/css-syntax-3/#css-rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    AtRule(AtRule),
    QualifiedRule(QualifiedRule),
}

/// https://drafts.csswg.org/css-syntax-3/#at-rule
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "AT-RULE")]
pub struct AtRule {
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    /// `None` when the rule ended without a block.
    pub declarations: Option<Vec<Declaration>>,
    /// `None` when the rule ended without a block.
    #[serde(rename = "rules")]
    pub child_rules: Option<Vec<Rule>>,
}

impl AtRule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn has_block(&self) -> bool {
        self.declarations.is_some()
    }
}

/// https://www.w3.org/TR/css-syntax-3/#qualified-rule
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "QUALIFIED-RULE")]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    pub declarations: Vec<Declaration>,
    #[serde(rename = "rules")]
    pub child_rules: Vec<Rule>,
}

/// https://drafts.csswg.org/css-syntax-3/#declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "DECLARATION")]
pub struct Declaration {
    pub name: String,
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

/// https://www.w3.org/TR/css-syntax-3/#component-value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentValue {
    /// https://www.w3.org/TR/css-syntax-3/#preserved-tokens
    PreservedToken(Token),
    /// https://www.w3.org/TR/css-syntax-3/#function
    Function(Function),
    SimpleBlock(SimpleBlock),
}

impl ComponentValue {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ComponentValue::PreservedToken(Token::Whitespace))
    }
}

/// https://drafts.csswg.org/css-syntax-3/#function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FUNCTION")]
pub struct Function {
    pub name: String,
    pub value: Vec<ComponentValue>,
}

/// https://www.w3.org/TR/css-syntax-3/#simple-block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "BLOCK")]
pub struct SimpleBlock {
    #[serde(rename = "name")]
    pub block_type: BlockType,
    pub value: Vec<ComponentValue>,
}

impl Drop for Function {
    fn drop(&mut self) {
        drop_nested_values(&mut self.value);
    }
}

impl Drop for SimpleBlock {
    fn drop(&mut self) {
        drop_nested_values(&mut self.value);
    }
}

/// Releases nested functions and blocks from an explicit stack, so dropping a
/// deeply nested tree never recurses.
fn drop_nested_values(values: &mut Vec<ComponentValue>) {
    let mut pending = std::mem::take(values);
    while let Some(value) = pending.pop() {
        match value {
            ComponentValue::Function(mut function) => pending.append(&mut function.value),
            ComponentValue::SimpleBlock(mut block) => pending.append(&mut block.value),
            ComponentValue::PreservedToken(_) => {}
        }
    }
}

/// The kind of bracket that opened a [`SimpleBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockType {
    #[serde(rename = "{")]
    CurlyBracket,
    #[serde(rename = "[")]
    SquareBracket,
    #[serde(rename = "(")]
    Parenthesis,
}

impl BlockType {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::LeftCurlyBracket => Some(BlockType::CurlyBracket),
            Token::LeftSquareBracket => Some(BlockType::SquareBracket),
            Token::LeftParenthesis => Some(BlockType::Parenthesis),
            _ => None,
        }
    }

    /// The mirror variant of the token that opened the block.
    pub fn ending_token(self) -> Token {
        match self {
            BlockType::CurlyBracket => Token::RightCurlyBracket,
            BlockType::SquareBracket => Token::RightSquareBracket,
            BlockType::Parenthesis => Token::RightParenthesis,
        }
    }

    pub fn opening_char(self) -> char {
        match self {
            BlockType::CurlyBracket => '{',
            BlockType::SquareBracket => '[',
            BlockType::Parenthesis => '(',
        }
    }

    pub fn closing_char(self) -> char {
        match self {
            BlockType::CurlyBracket => '}',
            BlockType::SquareBracket => ']',
            BlockType::Parenthesis => ')',
        }
    }
}
