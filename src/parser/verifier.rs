use std::collections::BTreeSet;
use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::error_handling::{Error, ErrorType, Location, Severity};
use crate::grammar::{AugmentedGrammar, Grammar, Nonterminal};

#[derive(Debug, PartialEq)]
pub enum DiagnosticKind {
    // A nonterminal is used on a right hand side but never defined
    UndefinedNonterminal(Nonterminal),
    // There is no production for `S`
    MissingStartSymbol,
    // Declared nonterminals that `S` never leads to, sorted
    UnreachableNonterminals(Vec<Nonterminal>),
    // A character that is not a grammar symbol, with its line
    InvalidSymbol(char, usize),
}

impl ErrorType for DiagnosticKind {
    fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnreachableNonterminals(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UndefinedNonterminal(n) => write!(f, "undefined nonterminal '{}' used in production", n),
            DiagnosticKind::MissingStartSymbol => write!(f, "missing start symbol"),
            DiagnosticKind::UnreachableNonterminals(set) => write!(f, "unreachable nonterminals found: {{{}}}", set.iter().join(", ")),
            DiagnosticKind::InvalidSymbol(c, line) => write!(f, "invalid symbol '{}' at line {}", c, line),
        }
    }
}

pub type Diagnostic = Error<DiagnosticKind>;

#[derive(Debug, PartialEq, Default)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    /// Computation may only go ahead when this is false.
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity() == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn kinds(&self) -> impl Iterator<Item = &DiagnosticKind> {
        self.0.iter().map(|d| &d.error)
    }
}

fn diagnostic(grammar: &Grammar, line: usize, error: DiagnosticKind) -> Diagnostic {
    Diagnostic {
        location: Location {
            file: grammar.file.clone(),
            line
        },
        error
    }
}

fn get_undefined_symbols(grammar: &Grammar) -> Vec<Diagnostic> {
    // Report each undefined nonterminal once, at its first use
    grammar.productions()
        .flat_map(|production| production.nonterminals().map(move |n| (n, production.line)))
        .filter(|(n, _)| !grammar.is_defined(n))
        .unique_by(|(n, _)| **n)
        .map(|(n, line)| diagnostic(grammar, line, DiagnosticKind::UndefinedNonterminal(*n)))
        .collect()
}

fn get_missing_start(grammar: &Grammar) -> Option<Diagnostic> {
    if grammar.is_defined(&Nonterminal::START) {
        None
    } else {
        Some(diagnostic(grammar, 0, DiagnosticKind::MissingStartSymbol))
    }
}

/// Every nonterminal reachable from `start`, including `start` itself.
pub fn reachable_from(grammar: &Grammar, start: Nonterminal) -> IndexSet<Nonterminal> {
    let mut reached = IndexSet::new();
    reached.insert(start);

    // `reached` doubles as the worklist, anything past `next` is still unvisited
    let mut next = 0;
    while let Some(&nonterminal) = reached.get_index(next) {
        next += 1;
        let referenced = grammar.rules.get(&nonterminal).into_iter()
            .flatten()
            .flat_map(|production| production.nonterminals().copied())
            .collect_vec();
        reached.extend(referenced);
    }

    reached
}

fn get_unreachable(grammar: &Grammar) -> Option<Diagnostic> {
    let reached = reachable_from(grammar, Nonterminal::START);
    let unreachable: BTreeSet<Nonterminal> = grammar.rules.keys()
        .filter(|n| !reached.contains(*n))
        .copied()
        .collect();

    if unreachable.is_empty() {
        None
    } else {
        let unreachable = unreachable.into_iter().collect();
        Some(diagnostic(grammar, 0, DiagnosticKind::UnreachableNonterminals(unreachable)))
    }
}

fn get_invalid_symbols(grammar: &Grammar) -> Vec<Diagnostic> {
    grammar.rejected.iter()
        .map(|r| diagnostic(grammar, r.line, DiagnosticKind::InvalidSymbol(r.character, r.line)))
        .collect()
}

/// Checks a grammar before any sets are computed. Every problem is
/// collected, the grammar is never changed.
pub fn validate(augmented: &AugmentedGrammar) -> Diagnostics {
    let grammar = &augmented.grammar;
    let mut diagnostics = Vec::new();

    diagnostics.extend(get_undefined_symbols(grammar));

    let missing_start = get_missing_start(grammar);
    // Without a start there is nothing to be reachable from
    if missing_start.is_none() {
        diagnostics.extend(get_unreachable(grammar));
    } else {
        diagnostics.extend(missing_start);
    }

    diagnostics.extend(get_invalid_symbols(grammar));

    Diagnostics(diagnostics)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::parser::{parse_file, parse_str};

    use super::*;

    fn validate_str(text: &str) -> Diagnostics {
        validate(&parse_str(text, Path::new("test")).unwrap())
    }

    fn n(c: char) -> Nonterminal {
        Nonterminal::Named(c)
    }

    #[test]
    fn valid_grammar_has_no_diagnostics() {
        let diagnostics = validate_str("S -> AB\nA -> aA | b\nB -> c |\n");
        assert_eq!(diagnostics, Diagnostics::default());
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn undefined_nonterminal() {
        let diagnostics = validate_str("S -> aC\nS -> Cb\nC ->\nS -> D\n");

        assert_eq!(diagnostics.0, vec![
            Diagnostic {
                location: Location { file: PathBuf::from("test"), line: 4 },
                error: DiagnosticKind::UndefinedNonterminal(n('D'))
            }
        ]);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn undefined_nonterminal_reported_once() {
        let diagnostics = validate_str("S -> CC\nS -> aCE\n");

        assert_eq!(diagnostics.kinds().collect_vec(), vec![
            &DiagnosticKind::UndefinedNonterminal(n('C')),
            &DiagnosticKind::UndefinedNonterminal(n('E'))
        ]);
        assert_eq!(diagnostics.0[0].location.line, 1);
        assert_eq!(diagnostics.0[1].location.line, 2);
    }

    #[test]
    fn missing_start_symbol() {
        let diagnostics = validate_str("A -> aB\nB -> b\n");

        assert_eq!(diagnostics.kinds().collect_vec(), vec![&DiagnosticKind::MissingStartSymbol]);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn missing_start_symbol_used_but_undefined() {
        let diagnostics = validate_str("A -> S\n");

        assert_eq!(diagnostics.kinds().collect_vec(), vec![
            &DiagnosticKind::UndefinedNonterminal(Nonterminal::START),
            &DiagnosticKind::MissingStartSymbol
        ]);
    }

    #[test]
    fn unreachable_nonterminals_are_sorted_warnings() {
        let diagnostics = validate_str("S -> aA\nE -> F\nA -> b\nD -> d\nF -> E\n");

        assert_eq!(diagnostics.kinds().collect_vec(), vec![
            &DiagnosticKind::UnreachableNonterminals(vec![n('D'), n('E'), n('F')])
        ]);
        assert_eq!(diagnostics.0[0].severity(), Severity::Warning);
        assert!(!diagnostics.has_errors());
        assert_eq!(
            diagnostics.0[0].error.to_string(),
            "unreachable nonterminals found: {D, E, F}"
        );
    }

    #[test]
    fn reachability_follows_every_alternative() {
        let grammar = parse_str("S -> A | B\nA -> aA\nB -> C\nC -> c\nD -> S\n", Path::new("test")).unwrap();
        let reached = reachable_from(&grammar.grammar, Nonterminal::START);

        assert_eq!(
            reached.into_iter().collect_vec(),
            vec![Nonterminal::START, n('A'), n('B'), n('C')]
        );
    }

    #[test]
    fn invalid_symbols_file() {
        let example_path = PathBuf::from("example_data/invalid_symbols.grammar");
        let diagnostics = validate(&parse_file(&example_path).unwrap());

        assert_eq!(diagnostics.0, vec![
            Diagnostic {
                location: Location { file: example_path.clone(), line: 2 },
                error: DiagnosticKind::InvalidSymbol('+', 2)
            },
            Diagnostic {
                location: Location { file: example_path, line: 3 },
                error: DiagnosticKind::InvalidSymbol('1', 3)
            }
        ]);
        assert_eq!(diagnostics.0[0].error.to_string(), "invalid symbol '+' at line 2");
    }

    #[test]
    fn every_check_is_collected_in_order() {
        let diagnostics = validate_str("A -> C#\nD -> d\n");

        assert_eq!(diagnostics.kinds().collect_vec(), vec![
            &DiagnosticKind::UndefinedNonterminal(n('C')),
            &DiagnosticKind::MissingStartSymbol,
            &DiagnosticKind::InvalidSymbol('#', 1)
        ]);
    }

    #[test]
    fn messages() {
        assert_eq!(
            DiagnosticKind::UndefinedNonterminal(n('C')).to_string(),
            "undefined nonterminal 'C' used in production"
        );
        assert_eq!(DiagnosticKind::MissingStartSymbol.to_string(), "missing start symbol");
    }
}
