use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser as _, ValueEnum};
use css_parser::{ComponentValue, Declaration, Parser, Rule, StyleSheet, ToSource};
use css_tokenizer::{tokenize, Token};
use serde::Serialize;

#[derive(clap::Parser)]
#[command(name = "css-syntax")]
#[command(about = "Tokenizes and parses CSS, then dumps the result")]
struct Args {
    /// Path to the CSS file, reads stdin when absent or `-`
    path: Option<PathBuf>,

    /// The algorithm the input is fed through
    #[arg(long, short, value_enum, default_value_t = EntryPoint::Stylesheet)]
    entry_point: EntryPoint,

    #[arg(long, short, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntryPoint {
    Tokens,
    Stylesheet,
    StylesheetsContents,
    BlocksContents,
    Rule,
    Declaration,
    ComponentValue,
    List,
    CommaList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Source,
    Debug,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Parsed {
    Tokens(Vec<Token>),
    StyleSheet(StyleSheet),
    Rules(Vec<Rule>),
    BlocksContents {
        declarations: Vec<Declaration>,
        rules: Vec<Rule>,
    },
    Rule(Rule),
    Declaration(Declaration),
    ComponentValue(ComponentValue),
    ComponentValues(Vec<ComponentValue>),
    CommaSeparated(Vec<Vec<ComponentValue>>),
}

fn join<T: ToSource>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToSource::to_source)
        .collect::<Vec<_>>()
        .join(separator)
}

impl ToSource for Parsed {
    fn to_source(&self) -> String {
        match self {
            Parsed::Tokens(tokens) => tokens.to_source(),
            Parsed::StyleSheet(stylesheet) => stylesheet.to_source(),
            Parsed::Rules(rules) => join(rules, "\n"),
            Parsed::BlocksContents {
                declarations,
                rules,
            } => {
                let mut lines = declarations
                    .iter()
                    .map(ToSource::to_source)
                    .collect::<Vec<_>>();
                lines.extend(rules.iter().map(ToSource::to_source));
                lines.join("\n")
            }
            Parsed::Rule(rule) => rule.to_source(),
            Parsed::Declaration(declaration) => declaration.to_source(),
            Parsed::ComponentValue(value) => value.to_source(),
            Parsed::ComponentValues(values) => join(values, ""),
            Parsed::CommaSeparated(groups) => groups
                .iter()
                .map(|group| join(group, ""))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<(String, String)> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let css = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            Ok((css, path.display().to_string()))
        }
        _ => {
            let mut css = String::new();
            io::stdin()
                .read_to_string(&mut css)
                .context("failed to read stdin")?;
            Ok((css, "<stdin>".to_string()))
        }
    }
}

fn parse(css: &str, location: &str, entry_point: EntryPoint) -> Result<Parsed> {
    let parsed = match entry_point {
        EntryPoint::Tokens => Parsed::Tokens(tokenize(css)?),
        EntryPoint::Stylesheet => {
            Parsed::StyleSheet(Parser::parse_a_stylesheet(css, Some(location))?)
        }
        EntryPoint::StylesheetsContents => {
            Parsed::Rules(Parser::parse_a_stylesheets_contents(css)?)
        }
        EntryPoint::BlocksContents => {
            let (declarations, rules) = Parser::parse_a_blocks_contents(css)?;
            Parsed::BlocksContents {
                declarations,
                rules,
            }
        }
        EntryPoint::Rule => Parsed::Rule(Parser::parse_a_rule(css)?),
        EntryPoint::Declaration => Parsed::Declaration(Parser::parse_a_declaration(css)?),
        EntryPoint::ComponentValue => {
            Parsed::ComponentValue(Parser::parse_a_component_value(css)?)
        }
        EntryPoint::List => {
            Parsed::ComponentValues(Parser::parse_a_list_of_component_values(css)?)
        }
        EntryPoint::CommaList => Parsed::CommaSeparated(
            Parser::parse_a_comma_separated_list_of_component_values(css)?,
        ),
    };
    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let (css, location) = read_input(args.path.as_ref())?;

    log::info!("Started parsing '{}' as {}", location, args.entry_point);
    let before = Instant::now();
    let parsed = parse(&css, &location, args.entry_point)
        .with_context(|| format!("failed to parse '{location}' as {}", args.entry_point))?;
    let time = before.elapsed();
    log::info!("Finished parsing '{}'! Took {:?}!", location, time);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
        Format::Source => println!("{}", parsed.to_source()),
        Format::Debug => println!("{parsed:#?}"),
    }

    Ok(())
}
