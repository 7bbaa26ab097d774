mod analysis;
mod cli;
mod error_handling;
mod grammar;
mod output;
mod parser;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use error_handling::Severity;
use analysis::AnalysisResult;
use grammar::AugmentedGrammar;
use parser::Diagnostics;

// The sets are only computed when validation finds no errors
fn check_and_analyze(grammar: &AugmentedGrammar) -> (Diagnostics, Option<AnalysisResult>) {
    let diagnostics = parser::validate(grammar);
    if diagnostics.has_errors() {
        (diagnostics, None)
    } else {
        (diagnostics, Some(analysis::analyze(grammar)))
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let parsed = if cli.reads_stdin() {
        parser::parse_reader(std::io::stdin().lock(), Path::new("<stdin>"))
    } else {
        parser::parse_file(&cli.file)
    };
    let grammar = match parsed {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    let (diagnostics, result) = check_and_analyze(&grammar);
    for diagnostic in diagnostics.iter() {
        if !(cli.quiet && diagnostic.severity() == Severity::Warning) {
            eprintln!("{}", diagnostic);
        }
    }
    let Some(result) = result else {
        return ExitCode::FAILURE;
    };

    let rendered = output::render(&result, &cli.spelling());

    match &cli.output {
        Some(path) => {
            if let Err(error) = output::write_file(path, &rendered) {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
            eprintln!("analysis written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    ExitCode::SUCCESS
}
