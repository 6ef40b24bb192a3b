/*
    This module generates words of a grammar's language
*/

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use log::debug;
use rand::prelude::*;

use crate::error_handling::ErrorType;
use crate::grammar::{Alternative, Grammar};

#[derive(Debug, PartialEq, Clone)]
pub enum GenerateErrorType {
    // No productions or no terminals to generate from
    EmptyGrammar,
    // The start symbol was never set
    NoStartSymbol,
    // The nonterminal derives no finite word
    Unproductive(char),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::EmptyGrammar => write!(f, "The grammar has no terminals or no productions"),
            GenerateErrorType::NoStartSymbol => write!(f, "The grammar has no start symbol"),
            GenerateErrorType::Unproductive(nonterminal) => write!(f, "`{}` never derives a word", nonterminal),
        }
    }
}

impl std::error::Error for GenerateErrorType {}

pub type GenResult = Result<String, GenerateErrorType>;

// Heights of the shortest derivation trees, keyed by nonterminal
pub type Heights = HashMap<char, usize>;

fn alternative_height(alternative: &Alternative, heights: &Heights) -> Option<usize> {
    match alternative {
        Alternative::Terminal(_) => Some(1),
        Alternative::Pair(b, c) => Some(1 + heights.get(b)?.max(heights.get(c)?)),
    }
}

/// Minimal derivation tree height of every productive nonterminal.
/// Unproductive nonterminals are left out.
pub fn productive_heights(grammar: &Grammar) -> Heights {
    let mut heights = Heights::new();
    let mut changed = true;
    while changed {
        changed = false;
        for (lhs, alternative) in grammar.rules() {
            let Some(height) = alternative_height(&alternative, &heights) else { continue };
            if heights.get(&lhs).map_or(true, |&current| height < current) {
                heights.insert(lhs, height);
                changed = true;
            }
        }
    }
    heights
}

/// Generates a random word derived from the start symbol.
///
/// Alternatives are picked uniformly until the derivation is `max_depth`
/// deep; from there on only alternatives closing the tree as fast as possible
/// are taken, so generation always ends.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize) -> GenResult {
    if grammar.terminals().is_empty() || !grammar.has_productions() {
        return Err(GenerateErrorType::EmptyGrammar);
    }
    let start = grammar.start_symbol().ok_or(GenerateErrorType::NoStartSymbol)?;
    generate_from(grammar, start, rng, max_depth)
}

// Generates a word in the given grammar starting with the given symbol
pub fn generate_from<R: Rng + ?Sized>(grammar: &Grammar, start: char, rng: &mut R, max_depth: usize) -> GenResult {
    let heights = productive_heights(grammar);
    let mut word = String::new();
    generate_nonterminal(start, grammar, &heights, rng, (0, max_depth), &mut word)?;
    debug!("Generated `{}` from {}", word, start);
    Ok(word)
}

pub fn generate_many<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, amount: usize, max_depth: usize) -> Result<Vec<String>, GenerateErrorType> {
    (0..amount).map(|_| generate(grammar, rng, max_depth)).collect()
}

fn generate_nonterminal<R: Rng + ?Sized>(
    nonterminal: char,
    grammar: &Grammar,
    heights: &Heights,
    rng: &mut R,
    (depth, max_depth): (usize, usize),
    word: &mut String,
) -> Result<(), GenerateErrorType> {
    let height = *heights.get(&nonterminal).ok_or(GenerateErrorType::Unproductive(nonterminal))?;

    // Past the depth limit only the quickest ways out remain
    let candidates = grammar
        .alternatives(nonterminal)
        .iter()
        .filter(|alternative| match alternative_height(alternative, heights) {
            Some(h) => depth < max_depth || h == height,
            None => false,
        })
        .collect_vec();
    let alternative = candidates
        .choose(rng)
        .ok_or(GenerateErrorType::Unproductive(nonterminal))?;

    match **alternative {
        Alternative::Terminal(t) => word.push(t),
        Alternative::Pair(b, c) => {
            generate_nonterminal(b, grammar, heights, rng, (depth + 1, max_depth), word)?;
            generate_nonterminal(c, grammar, heights, rng, (depth + 1, max_depth), word)?;
        }
    }
    Ok(())
}
