use css_tokenizer::{escape_ident, ToSource};

use crate::types::{
    AtRule, ComponentValue, Declaration, Function, QualifiedRule, Rule, SimpleBlock, StyleSheet,
};

fn print_indent(level: usize) -> String {
    "\t".repeat(level)
}

enum Pending<'a> {
    Value(&'a ComponentValue),
    Close(char),
}

/// Nested functions and blocks are written from an explicit stack, so the
/// nesting depth of `values` does not grow the call stack.
fn component_values_to_source(values: &[ComponentValue]) -> String {
    let mut source = String::new();
    let mut pending: Vec<Pending> = values.iter().rev().map(Pending::Value).collect();

    while let Some(next) = pending.pop() {
        let (opening, children, closing) = match next {
            Pending::Close(closing) => {
                source.push(closing);
                continue;
            }
            Pending::Value(ComponentValue::PreservedToken(token)) => {
                source.push_str(&token.to_source());
                continue;
            }
            Pending::Value(ComponentValue::Function(function)) => {
                (escape_ident(&function.name) + "(", &function.value, ')')
            }
            Pending::Value(ComponentValue::SimpleBlock(block)) => (
                block.block_type.opening_char().to_string(),
                &block.value,
                block.block_type.closing_char(),
            ),
        };

        source.push_str(&opening);
        pending.push(Pending::Close(closing));
        pending.extend(children.iter().rev().map(Pending::Value));
    }

    source
}

/// Writes `{`, one line per declaration and child rule, then the closing `}`.
fn block_to_source(declarations: &[Declaration], child_rules: &[Rule], indent: usize) -> String {
    let mut source = String::from("{\n");

    for declaration in declarations {
        source.push_str(&declaration.to_source_with_indent(indent + 1));
        source.push('\n');
    }

    for rule in child_rules {
        source.push_str(&rule.to_source_with_indent(indent + 1));
        source.push('\n');
    }

    source.push_str(&print_indent(indent));
    source.push('}');
    source
}

impl ToSource for StyleSheet {
    fn to_source(&self) -> String {
        self.rules
            .iter()
            .map(ToSource::to_source)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Rule {
    pub fn to_source_with_indent(&self, indent: usize) -> String {
        match self {
            Rule::AtRule(rule) => rule.to_source_with_indent(indent),
            Rule::QualifiedRule(rule) => rule.to_source_with_indent(indent),
        }
    }
}

impl ToSource for Rule {
    fn to_source(&self) -> String {
        self.to_source_with_indent(0)
    }
}

impl AtRule {
    pub fn to_source_with_indent(&self, indent: usize) -> String {
        let mut source = format!("{}@{}", print_indent(indent), escape_ident(&self.name));
        source.push_str(&component_values_to_source(&self.prelude));

        match (&self.declarations, &self.child_rules) {
            (Some(declarations), child_rules) => {
                let child_rules = child_rules.as_deref().unwrap_or_default();
                source.push_str(&block_to_source(declarations, child_rules, indent));
            }
            (None, _) => source.push_str(";\n"),
        }

        source
    }
}

impl ToSource for AtRule {
    fn to_source(&self) -> String {
        self.to_source_with_indent(0)
    }
}

impl QualifiedRule {
    pub fn to_source_with_indent(&self, indent: usize) -> String {
        let mut source = print_indent(indent);
        source.push_str(&component_values_to_source(&self.prelude));
        source.push_str(&block_to_source(
            &self.declarations,
            &self.child_rules,
            indent,
        ));
        source
    }
}

impl ToSource for QualifiedRule {
    fn to_source(&self) -> String {
        self.to_source_with_indent(0)
    }
}

impl Declaration {
    pub fn to_source_with_indent(&self, indent: usize) -> String {
        format!(
            "{}{}: {}{};",
            print_indent(indent),
            escape_ident(&self.name),
            component_values_to_source(&self.value),
            if self.important { "!important" } else { "" }
        )
    }
}

impl ToSource for Declaration {
    fn to_source(&self) -> String {
        self.to_source_with_indent(0)
    }
}

impl ToSource for ComponentValue {
    fn to_source(&self) -> String {
        component_values_to_source(std::slice::from_ref(self))
    }
}

impl ToSource for Function {
    fn to_source(&self) -> String {
        format!(
            "{}({})",
            escape_ident(&self.name),
            component_values_to_source(&self.value)
        )
    }
}

impl ToSource for SimpleBlock {
    fn to_source(&self) -> String {
        format!(
            "{}{}{}",
            self.block_type.opening_char(),
            component_values_to_source(&self.value),
            self.block_type.closing_char()
        )
    }
}

#[cfg(test)]
mod tests {
    use css_tokenizer::{tokenize, Token};
    use rstest::rstest;

    use super::*;
    use crate::Parser;

    #[test]
    fn stylesheet() {
        let stylesheet =
            Parser::parse_a_stylesheet("@import 'a.css'; a { color: red; b { c: d } }", None)
                .unwrap();
        assert_eq!(
            stylesheet.to_source(),
            "@import \"a.css\";\n\na {\n\tcolor: red;\n\tb {\n\t\tc: d;\n\t}\n}"
        );
    }

    #[test]
    fn at_rule_with_a_block() {
        let rule = Parser::parse_a_rule("@media screen { a { } }").unwrap();
        assert_eq!(rule.to_source(), "@media screen {\n\ta {\n\t}\n}");

        let rule = Parser::parse_a_rule("@media{ }").unwrap();
        assert_eq!(rule.to_source(), "@media{\n}");
    }

    #[test]
    fn important_declaration() {
        let declaration = Parser::parse_a_declaration("foo: 9000 !Important").unwrap();
        assert_eq!(declaration.to_source(), "foo: 9000!important;");
        assert_eq!(declaration.to_source_with_indent(2), "\t\tfoo: 9000!important;");
    }

    #[rstest]
    #[case("rgb(1,2, 3)", "rgb(1,2, 3)")]
    #[case("[a (b]", "[a (b])]")]
    #[case("f(x", "f(x)")]
    #[case("{ a: b }", "{ a: b }")]
    #[case("--a", "\\--a")]
    fn component_values(#[case] input: &str, #[case] expected: &str) {
        let value = Parser::parse_a_component_value(input).unwrap();
        assert_eq!(value.to_source(), expected);
    }

    #[test]
    fn deeply_nested_values() {
        const DEPTH: usize = 50_000;

        let source = "[f(".repeat(DEPTH);
        let value = Parser::parse_a_component_value(&source).unwrap();
        assert_eq!(
            value.to_source(),
            format!("{source}{}", ")]".repeat(DEPTH))
        );
    }

    #[test]
    fn function_names_are_escaped() {
        let function = Function {
            name: "1a".to_string(),
            value: vec![ComponentValue::PreservedToken(Token::Whitespace)],
        };
        assert_eq!(function.to_source(), "\\31 a( )");
    }

    #[test]
    fn serialized_tree_reparses_to_the_same_tree() {
        let source = ".foo > a:hover { color: red !important; @media (min-width: 10px) { b { c: url(x.png) } } --x: {y} }";
        let stylesheet = Parser::parse_a_stylesheet(source, None).unwrap();
        let reparsed = Parser::parse_a_stylesheet(&stylesheet.to_source(), None).unwrap();

        // Whitespace runs may differ, so compare the significant tokens.
        let significant = |text: &str| -> Vec<Token> {
            tokenize(text)
                .unwrap()
                .into_iter()
                .filter(|token| !token.is_whitespace())
                .collect()
        };
        assert_eq!(
            significant(&stylesheet.to_source()),
            significant(&reparsed.to_source())
        );
        assert_eq!(stylesheet.rules.len(), reparsed.rules.len());
    }
}
