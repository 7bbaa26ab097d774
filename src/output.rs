/*
    This module writes analysis results as text
*/

use std::fmt::Display;
use std::path::Path;

use itertools::Itertools;

use crate::analysis::{AnalysisResult, SymbolSet};
use crate::error_handling::*;
use crate::grammar::{Symbol, END_MARKER, EPSILON};

/// How the two special symbols are written out.
#[derive(Debug, PartialEq, Clone)]
pub struct Spelling {
    pub epsilon: String,
    pub end_marker: String,
}

impl Default for Spelling {
    fn default() -> Self {
        Spelling {
            epsilon: EPSILON.to_string(),
            end_marker: END_MARKER.to_string(),
        }
    }
}

impl Spelling {
    fn spell(&self, symbol: &Symbol) -> String {
        match symbol {
            Symbol::Epsilon => self.epsilon.clone(),
            Symbol::EndMarker => self.end_marker.clone(),
            _ => symbol.to_string(),
        }
    }
}

// An empty epsilon spelling still takes a field, so `{b, ε}` becomes `b, `
fn render_set(set: &SymbolSet, spelling: &Spelling) -> String {
    set.iter()
        .map(|symbol| spelling.spell(symbol))
        .join(", ")
}

/// Three lines per nonterminal: its name, its FIRST set and its FOLLOW set.
pub fn render(result: &AnalysisResult, spelling: &Spelling) -> String {
    result.entries()
        .map(|(nonterminal, first, follow)| format!(
            "{}\n{}\n{}\n",
            nonterminal,
            render_set(first, spelling),
            render_set(follow, spelling)
        ))
        .collect()
}

#[derive(Debug)]
pub struct WriteErrorType(pub std::io::Error);

impl ErrorType for WriteErrorType {}

impl PartialEq for WriteErrorType {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl Display for WriteErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not write analysis: {}", self.0)
    }
}

pub type WriteError = Error<WriteErrorType>;

pub fn write_file(path: &Path, text: &str) -> Result<(), WriteError> {
    std::fs::write(path, text).map_err(|e| WriteError {
        location: Location {
            file: path.to_path_buf(),
            line: 0
        },
        error: WriteErrorType(e)
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::analysis::analyze;
    use crate::analysis::test_util::set;
    use crate::parser::parse_file;

    use super::*;

    fn render_file(path: &str, spelling: &Spelling) -> String {
        let grammar = parse_file(&PathBuf::from(path)).unwrap();
        render(&analyze(&grammar), spelling)
    }

    #[test]
    fn render_default_spelling() {
        let rendered = render_file("example_data/nullable.grammar", &Spelling::default());

        assert_eq!(rendered, "\
S'
a, b
$$
S
a, b
$$
A
a, b
c, $$
B
c, ε
$$
");
    }

    #[test]
    fn render_empty_epsilon_as_field() {
        let spelling = Spelling {
            epsilon: String::new(),
            end_marker: "$".to_string(),
        };
        let rendered = render_file("example_data/nullable.grammar", &spelling);

        assert!(rendered.ends_with("B\nc, \n$\n"), "{}", rendered);
    }

    #[test]
    fn render_empty_and_epsilon_sets() {
        let grammar = crate::parser::parse_str("S -> A\nA ->\n", Path::new("test")).unwrap();
        let rendered = render(&analyze(&grammar), &Spelling::default());

        // FIRST(S') is empty, FIRST(S) and FIRST(A) are only epsilon
        assert_eq!(rendered, "S'\n\n$$\nS\nε\n$$\nA\nε\n$$\n");
    }

    #[test]
    fn every_set_renders_differently() {
        let sets = vec![set("bε"), set("b"), set("ε"), set("")];
        let rendered = sets.iter()
            .map(|s| render_set(s, &Spelling::default()))
            .collect_vec();

        assert_eq!(rendered, vec!["b, ε", "b", "ε", ""]);
        assert_eq!(rendered.iter().unique().count(), sets.len());
    }

    #[test]
    fn write_to_missing_directory() {
        let path = PathBuf::from("example_data/no_such_directory/out.txt");
        let error = write_file(&path, "").unwrap_err();

        assert_eq!(error.location, Location { file: path, line: 0 });
        assert_eq!(error.error.0.kind(), std::io::ErrorKind::NotFound);
    }
}
