use std::path::PathBuf;
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Severity {
    Error,
    Warning,
}

pub trait ErrorType: Display + PartialEq {
    fn severity(&self) -> Severity {
        Severity::Error
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn severity(&self) -> Severity {
        self.error.severity()
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Red for errors, yellow for warnings
        let colour = match self.severity() {
            Severity::Error => 31,
            Severity::Warning => 33,
        };
        write!(f, "\x1b[{};49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", colour, self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;
