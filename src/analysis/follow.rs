use super::{FirstSets, SymbolSets};
use crate::grammar::*;

/// FOLLOW sets hold terminals and the end-marker, never epsilon.
#[derive(Debug, PartialEq, Clone)]
pub struct FollowSets(pub(super) SymbolSets);

impl FollowSets {
    // Everything starts empty apart from FOLLOW(S'), which holds the end-marker for good
    fn seeded(grammar: &AugmentedGrammar) -> Self {
        let mut follow = FollowSets(SymbolSets::empty(grammar));
        follow.0.extend(&Nonterminal::AugmentedStart, [Symbol::EndMarker]);
        follow
    }
}

// One pass over every occurrence of every nonterminal, returns whether any set grew
pub(super) fn follow_pass(grammar: &AugmentedGrammar, first: &FirstSets, follow: &mut FollowSets) -> bool {
    let mut changed = false;

    for production in grammar.productions() {
        for (i, symbol) in production.rhs.iter().enumerate() {
            let Symbol::Nonterminal(target) = symbol else {
                continue;
            };

            let rest = first.of_sequence(&production.rhs[i + 1..]);
            let mut additions: Vec<Symbol> = rest.iter()
                .filter(|s| **s != Symbol::Epsilon)
                .copied()
                .collect();
            if rest.contains(&Symbol::Epsilon) {
                additions.extend(follow.0.get(&production.lhs).iter().copied());
            }

            changed |= follow.0.extend(target, additions);
        }
    }

    changed
}

/// Computes the FOLLOW set of every nonterminal from fixed FIRST sets,
/// repeating passes until nothing changes.
pub fn compute_follow(grammar: &AugmentedGrammar, first: &FirstSets) -> FollowSets {
    let mut follow = FollowSets::seeded(grammar);
    while follow_pass(grammar, first, &mut follow) {}
    follow
}
