/*
    This module is for storing grammars
*/

mod symbol;

use std::path::PathBuf;

use indexmap::IndexMap;

pub use symbol::*;

#[derive(Debug, PartialEq, Clone)]
pub struct Production {
    pub lhs: Nonterminal,
    // Empty for an epsilon production, never contains `Symbol::Epsilon`
    pub rhs: Vec<Symbol>,
    pub line: usize,
}

impl Production {
    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        self.rhs.iter().filter_map(|symbol| match symbol {
            Symbol::Nonterminal(n) => Some(n),
            _ => None
        })
    }
}

// A character the symbol model refused while reading a right-hand side
#[derive(Debug, PartialEq, Clone)]
pub struct RejectedSymbol {
    pub character: char,
    pub line: usize,
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub file: PathBuf,
    // Keys are in declaration order, alternatives in source order
    pub rules: IndexMap<Nonterminal, Vec<Production>>,
    pub rejected: Vec<RejectedSymbol>,
}

impl Grammar {
    pub fn is_defined(&self, nonterminal: &Nonterminal) -> bool {
        self.rules.get(nonterminal).is_some_and(|productions| !productions.is_empty())
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.rules.values().flatten()
    }

    /// Adds `S' -> S $$` as the new start production.
    pub fn augment(self) -> AugmentedGrammar {
        let start_production = Production {
            lhs: Nonterminal::AugmentedStart,
            rhs: vec![Symbol::Nonterminal(Nonterminal::START), Symbol::EndMarker],
            line: 0,
        };

        AugmentedGrammar {
            grammar: self,
            start_production,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct AugmentedGrammar {
    pub grammar: Grammar,
    pub start_production: Production,
}

impl AugmentedGrammar {
    /// `S'` followed by the user's nonterminals in declaration order.
    pub fn nonterminals(&self) -> impl Iterator<Item = &Nonterminal> {
        std::iter::once(&self.start_production.lhs).chain(self.grammar.rules.keys())
    }

    /// All productions, the augmented one first.
    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        std::iter::once(&self.start_production).chain(self.grammar.productions())
    }
}
