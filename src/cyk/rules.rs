use std::collections::HashMap;

use bit_vec::BitVec;

use crate::grammar::{Alternative, Grammar};

/// Productions keyed by their right hand side.
///
/// Built once per query so the table construction never scans the whole
/// production list: a terminal or a pair of nonterminal indices maps
/// straight to the set of left hand sides producing it.
#[derive(Debug)]
pub struct ProductionIndex {
    width: usize,
    by_terminal: HashMap<char, BitVec>,
    by_pair: HashMap<(usize, usize), BitVec>,
}

impl ProductionIndex {
    pub fn new(grammar: &Grammar) -> Self {
        let width = grammar.nonterminals().len();
        let positions: HashMap<char, usize> = grammar
            .nonterminals()
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect();

        let empty = BitVec::from_elem(width, false);
        let mut by_terminal: HashMap<char, BitVec> = HashMap::new();
        let mut by_pair: HashMap<(usize, usize), BitVec> = HashMap::new();
        // Productions only ever name declared nonterminals
        for (lhs, &nonterminal) in grammar.nonterminals().iter().enumerate() {
            for alternative in grammar.alternatives(nonterminal) {
                let producers = match *alternative {
                    Alternative::Terminal(t) => by_terminal.entry(t).or_insert_with(|| empty.clone()),
                    Alternative::Pair(b, c) => by_pair
                        .entry((positions[&b], positions[&c]))
                        .or_insert_with(|| empty.clone()),
                };
                producers.set(lhs, true);
            }
        }

        ProductionIndex { width, by_terminal, by_pair }
    }

    /// Number of nonterminals, the width of every set handed out.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn producing_terminal(&self, terminal: char) -> Option<&BitVec> {
        self.by_terminal.get(&terminal)
    }

    pub fn producing_pair(&self, left: usize, right: usize) -> Option<&BitVec> {
        self.by_pair.get(&(left, right))
    }
}
