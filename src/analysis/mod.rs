/*
    This module computes FIRST and FOLLOW sets of validated grammars
*/

mod first;
mod follow;

use std::collections::BTreeSet;
use std::ops::Deref;

use indexmap::IndexMap;

use crate::grammar::*;

pub use first::{compute_first, FirstSets};
pub use follow::{compute_follow, FollowSets};

pub type SymbolSet = BTreeSet<Symbol>;

/// One set of symbols per nonterminal, keyed in the grammar's order.
#[derive(Debug, PartialEq, Clone)]
pub struct SymbolSets(IndexMap<Nonterminal, SymbolSet>);

impl SymbolSets {
    fn empty(grammar: &AugmentedGrammar) -> Self {
        SymbolSets(grammar.nonterminals().map(|n| (*n, SymbolSet::new())).collect())
    }

    /// The set of `nonterminal`. A nonterminal without an entry has an
    /// empty set.
    pub fn get(&self, nonterminal: &Nonterminal) -> &SymbolSet {
        static EMPTY: SymbolSet = BTreeSet::new();
        self.0.get(nonterminal).unwrap_or(&EMPTY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Nonterminal, &SymbolSet)> {
        self.0.iter()
    }

    // Returns whether the set of `nonterminal` grew
    fn extend(&mut self, nonterminal: &Nonterminal, symbols: impl IntoIterator<Item = Symbol>) -> bool {
        let set = self.0.entry(*nonterminal).or_default();
        let before = set.len();
        set.extend(symbols);
        set.len() > before
    }

    #[cfg(test)]
    pub fn is_subset(&self, other: &SymbolSets) -> bool {
        self.iter().all(|(n, set)| set.is_subset(other.get(n)))
    }
}

/// The FIRST and FOLLOW sets of every nonterminal, ready to be written out.
#[derive(Debug, PartialEq)]
pub struct AnalysisResult {
    first: FirstSets,
    follow: FollowSets,
}

impl AnalysisResult {
    pub fn first(&self) -> &FirstSets {
        &self.first
    }

    pub fn follow(&self) -> &FollowSets {
        &self.follow
    }

    /// `(nonterminal, FIRST, FOLLOW)` in the order of the FIRST sets.
    pub fn entries(&self) -> impl Iterator<Item = (&Nonterminal, &SymbolSet, &SymbolSet)> {
        self.first().iter().map(move |(n, first)| (n, first, self.follow().get(n)))
    }
}

pub fn assemble(first: FirstSets, follow: FollowSets) -> AnalysisResult {
    AnalysisResult { first, follow }
}

/// Runs both engines. Only call this on a grammar without error diagnostics.
pub fn analyze(grammar: &AugmentedGrammar) -> AnalysisResult {
    let first = compute_first(grammar);
    let follow = compute_follow(grammar, &first);
    assemble(first, follow)
}

macro_rules! symbol_sets_newtype {
    ($name:ident) => {
        impl Deref for $name {
            type Target = SymbolSets;

            fn deref(&self) -> &SymbolSets {
                &self.0
            }
        }
    };
}

symbol_sets_newtype!(FirstSets);
symbol_sets_newtype!(FollowSets);


#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn entries_pair_first_and_follow() {
        let g = grammar("S -> aS | b\n");
        let result = analyze(&g);

        let entries: Vec<_> = result.entries().collect();
        assert_eq!(entries, vec![
            (&Nonterminal::AugmentedStart, &set("ab"), &set("$")),
            (&Nonterminal::START, &set("ab"), &set("$"))
        ]);
    }

    #[test]
    fn missing_entries_are_empty() {
        let g = grammar("S -> a\n");
        let result = analyze(&g);

        assert!(result.first().get(&n('Q')).is_empty());
        assert!(result.follow().get(&n('Q')).is_empty());
    }

    #[test]
    fn unreachable_nonterminals_still_get_sets() {
        let g = grammar("S -> a\nD -> dD | e\n");
        let result = analyze(&g);

        assert_eq!(result.first().get(&n('D')), &set("de"));
        assert!(result.follow().get(&n('D')).is_empty());
    }
}
