use std::path::PathBuf;

use clap::Parser;

use crate::grammar::{END_MARKER, EPSILON};
use crate::output::Spelling;

/// Computes the FIRST and FOLLOW sets of a context-free grammar
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, one `A -> aB | b` production per line (`-` reads stdin)
    pub file: PathBuf,

    /// File to write the sets to (default: stdout)
    pub output: Option<PathBuf>,

    /// How to write epsilon in the sets
    #[arg(long, value_name = "TEXT", default_value = EPSILON)]
    pub epsilon: String,

    /// How to write the end-of-input marker
    #[arg(long, value_name = "TEXT", default_value = END_MARKER)]
    pub end_marker: String,

    /// Do not print warnings
    #[arg(short, long)]
    pub quiet: bool
}

impl Cli {
    pub fn spelling(&self) -> Spelling {
        Spelling {
            epsilon: self.epsilon.clone(),
            end_marker: self.end_marker.clone()
        }
    }

    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["ffsets", "grammar.txt"]);

        assert_eq!(cli.file, PathBuf::from("grammar.txt"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.spelling(), Spelling::default());
        assert!(!cli.quiet);
        assert!(!cli.reads_stdin());
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from(["ffsets", "-", "out.txt", "--epsilon", "e", "--end-marker", "$", "-q"]);

        assert!(cli.reads_stdin());
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.spelling(), Spelling {
            epsilon: "e".to_string(),
            end_marker: "$".to_string()
        });
        assert!(cli.quiet);
    }

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
