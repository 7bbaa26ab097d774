/*
    This module parses grammar files of the form `A -> aB | b`
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use indexmap::IndexMap;
use itertools::Itertools;
use lexer::*;
pub use verifier::{validate, Diagnostics};
#[cfg(test)]
pub use verifier::DiagnosticKind;

#[derive(Debug)]
pub enum ParseErrorType {
    // A line which should contain a production does not have `->`
    MissingArrow,
    // A production has multiple arrows
    UnexpectedArrow,
    // The left hand side is not a single uppercase letter
    MissingNonterminal,
    // The left hand side has more than one symbol
    LongLeftHandSide,
    // `$` is reserved for the augmented start production
    UnexpectedEndMarker,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let ParseErrorType::FileError(a) = self {
            if let ParseErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            ParseErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            ParseErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            ParseErrorType::LongLeftHandSide => write!(f, "Left hand side must be a single nonterminal"),
            ParseErrorType::UnexpectedEndMarker => write!(f, "`$` is reserved for the end of input"),
            ParseErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseErrors = Errors<ParseErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> ParseError {
    ParseError {
        location: Location {
            file,
            line: 0
        },
        error: ParseErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type LineResult<T> = std::result::Result<T, ParseError>;
pub type FileResult<T> = std::result::Result<T, ParseErrors>;

type Alternative = Vec<Symbol>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: Nonterminal,
    alternatives: Vec<Alternative>,
    rejected: Vec<char>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    // Epsilon only marks an empty alternative and rejected characters are
    // reported by the verifier, so neither ends up in the production
    tokens.iter().filter_map(|t| match t {
        Token::Arrow => Some(Err(ParseErrorType::UnexpectedArrow)),
        Token::Symbol(Symbol::EndMarker) => Some(Err(ParseErrorType::UnexpectedEndMarker)),
        Token::Symbol(Symbol::Epsilon) => None,
        Token::Symbol(symbol) => Some(Ok(*symbol)),
        Token::Or | Token::Rejected(_) => None
    }).collect()
}

fn parse_alternatives(tokens: &[Token]) -> Result<Vec<Alternative>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_left_hand_side(tokens: &[Token]) -> Result<Nonterminal> {
    match tokens {
        [Token::Symbol(Symbol::Nonterminal(n @ Nonterminal::Named(_)))] => Ok(*n),
        [Token::Symbol(Symbol::Nonterminal(Nonterminal::Named(_))), ..] => Err(ParseErrorType::LongLeftHandSide),
        _ => Err(ParseErrorType::MissingNonterminal)
    }
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let arrow = tokens.iter()
        .position(|t| *t == Token::Arrow)
        .ok_or(ParseErrorType::MissingArrow)?;

    let symbol = parse_left_hand_side(&tokens[..arrow])?;

    let rhs = &tokens[arrow + 1..];
    let alternatives = parse_alternatives(rhs)?;
    let rejected = rhs.iter()
        .filter_map(|t| match t {
            Token::Rejected(c) => Some(*c),
            _ => None
        })
        .collect();

    return Ok(Rule {
        symbol,
        alternatives,
        rejected,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line), location.clone())
        .map_err(|error| ParseError { location: location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a reader, with the io errors wrapped
// in ParseError and enumerated
fn reader_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.to_path_buf())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rule_list: Vec<Rule>, file: PathBuf) -> Grammar {
    let mut rules = IndexMap::<Nonterminal, Vec<Production>>::new();
    let mut rejected = Vec::new();

    for rule in rule_list {
        let line = rule.location.line;
        let productions = rules.entry(rule.symbol).or_default();
        productions.extend(rule.alternatives.into_iter().map(|rhs| Production {
            lhs: rule.symbol,
            rhs,
            line
        }));
        rejected.extend(rule.rejected.into_iter().map(|character| RejectedSymbol {
            character,
            line
        }));
    }

    Grammar {
        file,
        rules,
        rejected
    }
}

/// Parses grammar text read from `reader`. `path` is only used for error
/// locations. Every malformed line is reported, and no grammar is returned
/// if there is any.
pub fn parse_reader<'a>(reader: impl BufRead + 'a, path: &'a Path) -> FileResult<AugmentedGrammar> {
    let lines = reader_line_nums(reader, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().filter_map(LineResult::err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().filter_map(LineResult::ok).collect_vec();

    return Ok(grammar_from_rules(rules_unwrapped, path.to_path_buf()).augment());
}

#[cfg(test)]
pub fn parse_str(text: &str, path: &Path) -> FileResult<AugmentedGrammar> {
    parse_reader(text.as_bytes(), path)
}

pub fn parse_file(path: &Path) -> FileResult<AugmentedGrammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    parse_reader(std::io::BufReader::new(file), path)
}
