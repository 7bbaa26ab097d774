use super::{SymbolSet, SymbolSets};
use crate::grammar::*;

/// FIRST sets hold terminals and possibly epsilon, never the end-marker.
#[derive(Debug, PartialEq, Clone)]
pub struct FirstSets(pub(super) SymbolSets);

impl FirstSets {
    /// FIRST of a sequence of symbols under the current sets.
    ///
    /// Walks left to right: a terminal (or the end-marker) is added and ends
    /// the walk, a nonterminal adds its set without epsilon and only lets the
    /// walk continue if it can vanish. Epsilon is added when every symbol can
    /// vanish, so the empty sequence gives `{ε}`.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> SymbolSet {
        let mut result = SymbolSet::new();

        for symbol in symbols {
            match symbol {
                Symbol::Terminal(_) | Symbol::EndMarker => {
                    result.insert(*symbol);
                    return result;
                }
                Symbol::Nonterminal(n) => {
                    let first = self.0.get(n);
                    result.extend(first.iter().filter(|s| **s != Symbol::Epsilon));
                    if !first.contains(&Symbol::Epsilon) {
                        return result;
                    }
                }
                Symbol::Epsilon => ()
            }
        }

        result.insert(Symbol::Epsilon);
        result
    }
}

// One pass over every production, returns whether any set grew
pub(super) fn first_pass(grammar: &AugmentedGrammar, first: &mut FirstSets) -> bool {
    let mut changed = false;

    for production in grammar.productions() {
        let additions = first.of_sequence(&production.rhs);
        changed |= first.0.extend(
            &production.lhs,
            additions.into_iter().filter(|s| *s != Symbol::EndMarker)
        );
    }

    changed
}

/// Computes the FIRST set of every nonterminal, repeating passes over the
/// productions until nothing changes.
pub fn compute_first(grammar: &AugmentedGrammar) -> FirstSets {
    let mut first = FirstSets(SymbolSets::empty(grammar));
    while first_pass(grammar, &mut first) {}
    first
}
