/*
    This module decides membership with the Cocke-Younger-Kasami algorithm
*/

mod formatter;
mod rules;
mod table;

use std::fmt::Display;

use bit_vec::BitVec;
use itertools::{iproduct, Itertools};
use log::{debug, trace};

use crate::error_handling::ErrorType;
use crate::grammar::Grammar;
pub use formatter::format_table;
pub use rules::ProductionIndex;
pub use table::DerivationTable;
use table::members;

#[derive(Debug, PartialEq, Clone)]
pub enum QueryErrorType {
    // No productions or no terminals to work with
    EmptyGrammar,
    // The start symbol was never set
    NoStartSymbol,
    // The word uses a character outside the terminal alphabet
    InvalidWord(char),
}

impl ErrorType for QueryErrorType {}

impl Display for QueryErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryErrorType::EmptyGrammar => write!(f, "The grammar has no terminals or no productions"),
            QueryErrorType::NoStartSymbol => write!(f, "The grammar has no start symbol"),
            QueryErrorType::InvalidWord(c) => write!(f, "`{}` is not a terminal of the grammar", c),
        }
    }
}

impl std::error::Error for QueryErrorType {}

pub type Result<T> = std::result::Result<T, QueryErrorType>;

// Checks a query can run, handing back the start symbol
fn check_query(grammar: &Grammar, word: &[char]) -> Result<char> {
    if grammar.terminals().is_empty() || !grammar.has_productions() {
        return Err(QueryErrorType::EmptyGrammar);
    }
    let start = grammar.start_symbol().ok_or(QueryErrorType::NoStartSymbol)?;
    match word.iter().find(|&&c| !grammar.has_terminal(c)) {
        Some(&c) => Err(QueryErrorType::InvalidWord(c)),
        None => Ok(start),
    }
}

// Everything deriving the `left` cell followed by the `right` cell
fn combine(index: &ProductionIndex, left: &BitVec, right: &BitVec, into: &mut BitVec) {
    for (b, c) in iproduct!(members(left), members(right)) {
        if let Some(producers) = index.producing_pair(b, c) {
            into.or(producers);
        }
    }
}

fn build_table(grammar: &Grammar, word: &[char]) -> DerivationTable {
    let n = word.len();
    let index = ProductionIndex::new(grammar);
    let mut table = DerivationTable::new(n, grammar.nonterminals());
    let empty = BitVec::from_elem(index.width(), false);

    for (offset, &c) in word.iter().enumerate() {
        let bits = index.producing_terminal(c).cloned().unwrap_or_else(|| empty.clone());
        table.set_bits(0, offset, bits);
        trace!("Cell (0, {}) = {{{}}}", offset, table.cell(0, offset).join(","));
    }

    // Each cell only reads cells of strictly shorter spans
    for span in 1..n {
        for offset in 0..n - span {
            let mut bits = empty.clone();
            for split in 0..span {
                let left = table.bits(split, offset);
                let right = table.bits(span - split - 1, offset + split + 1);
                combine(&index, left, right, &mut bits);
            }
            table.set_bits(span, offset, bits);
            trace!("Cell ({}, {}) = {{{}}}", span, offset, table.cell(span, offset).join(","));
        }
    }

    table
}

/// Builds the full derivation table for `word`.
///
/// Fails when the grammar has nothing to derive with, has no start symbol
/// or when `word` leaves the terminal alphabet.
pub fn derivation_table(grammar: &Grammar, word: &str) -> Result<DerivationTable> {
    let chars = word.chars().collect_vec();
    check_query(grammar, &chars)?;
    Ok(build_table(grammar, &chars))
}

/// Whether the start symbol derives `word`. The empty word is never derived
/// since there are no empty productions.
pub fn is_derived(grammar: &Grammar, word: &str) -> Result<bool> {
    let chars = word.chars().collect_vec();
    let start = check_query(grammar, &chars)?;
    let derived = build_table(grammar, &chars).derives_word(start);
    debug!("`{}` {} derived from {}", word, if derived { "is" } else { "is not" }, start);
    Ok(derived)
}

/// The table computed for `word`, rendered one span length per line.
pub fn algorithm_state_to_string(grammar: &Grammar, word: &str) -> Result<String> {
    derivation_table(grammar, word).map(|table| format_table(&table))
}
