use std::fmt::Display;

pub const EPSILON: &str = "ε";
pub const END_MARKER: &str = "$$";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Nonterminal {
    Named(char),
    // The synthesized `S'`, which can never be written in a grammar file
    AugmentedStart,
}

impl Nonterminal {
    pub const START: Nonterminal = Nonterminal::Named('S');
}

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nonterminal::Named(c) => write!(f, "{}", c),
            Nonterminal::AugmentedStart => write!(f, "S'"),
        }
    }
}

// The variant order is also the order symbols are listed in a sorted set
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(Nonterminal),
    Epsilon,
    EndMarker,
}

#[derive(Debug, PartialEq)]
pub struct InvalidSymbol(pub String);

impl Symbol {
    /// Classifies a token purely by its spelling.
    ///
    /// Uppercase letters are nonterminals, lowercase letters are terminals,
    /// the empty token (or `ε`) is epsilon and `$`/`$$` is the end-marker.
    pub fn classify(token: &str) -> Result<Symbol, InvalidSymbol> {
        match token {
            "" | EPSILON => return Ok(Symbol::Epsilon),
            "$" | END_MARKER => return Ok(Symbol::EndMarker),
            "S'" => return Ok(Symbol::Nonterminal(Nonterminal::AugmentedStart)),
            _ => ()
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok(Symbol::Nonterminal(Nonterminal::Named(c))),
            (Some(c), None) if c.is_ascii_lowercase() => Ok(Symbol::Terminal(c)),
            _ => Err(InvalidSymbol(token.to_string()))
        }
    }

    pub fn classify_char(c: char) -> Result<Symbol, InvalidSymbol> {
        Symbol::classify(c.encode_utf8(&mut [0; 4]))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
            Symbol::EndMarker => write!(f, "{}", END_MARKER),
        }
    }
}
