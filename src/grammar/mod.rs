/*
    This module stores grammars in Chomsky normal form and keeps them valid
*/

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use log::debug;

use crate::error_handling::ErrorType;

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarErrorType {
    // Not a letter of the right case, or already declared
    InvalidSymbol(char),
    // A nonterminal that was never declared
    UnknownSymbol(char),
    // The right hand side is neither `a` nor `BC` over declared symbols
    InvalidProduction(char, String),
    // The same right hand side is already registered for the nonterminal
    DuplicateProduction(char, String),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::InvalidSymbol(c) => write!(f, "`{}` is not a valid new symbol", c),
            GrammarErrorType::UnknownSymbol(c) => write!(f, "`{}` is not a declared nonterminal", c),
            GrammarErrorType::InvalidProduction(lhs, rhs) => write!(f, "`{}::={}` is not in Chomsky normal form over the declared symbols", lhs, rhs),
            GrammarErrorType::DuplicateProduction(lhs, rhs) => write!(f, "`{}::={}` is already defined", lhs, rhs),
        }
    }
}

impl std::error::Error for GrammarErrorType {}

pub type Result<T> = std::result::Result<T, GrammarErrorType>;

// A single character, tagged by its case
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    /// Lowercase letters are terminals, uppercase letters nonterminals.
    /// Anything else is not a symbol at all.
    pub fn classify(c: char) -> Option<Symbol> {
        if !c.is_alphabetic() {
            None
        } else if c.is_lowercase() {
            Some(Symbol::Terminal(c))
        } else if c.is_uppercase() {
            Some(Symbol::Nonterminal(c))
        } else {
            None
        }
    }
}

// One right hand side of a production
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Alternative {
    Terminal(char),
    Pair(char, char),
}

impl Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::Terminal(t) => write!(f, "{}", t),
            Alternative::Pair(b, c) => write!(f, "{}{}", b, c),
        }
    }
}

// The alternatives of a nonterminal, in insertion order
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    terminals: Vec<char>,
    nonterminals: Vec<char>,
    start_symbol: Option<char>,
    rules: HashMap<char, Rewrite>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn terminals(&self) -> &[char] {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &[char] {
        &self.nonterminals
    }

    pub fn start_symbol(&self) -> Option<char> {
        self.start_symbol
    }

    /// The alternatives registered for `lhs`, empty when there are none.
    pub fn alternatives(&self, lhs: char) -> &[Alternative] {
        self.rules.get(&lhs).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every production as `(lhs, alternative)`, nonterminals in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (char, Alternative)> + '_ {
        self.nonterminals
            .iter()
            .flat_map(move |&lhs| self.alternatives(lhs).iter().map(move |&alt| (lhs, alt)))
    }

    pub fn has_terminal(&self, c: char) -> bool {
        self.terminals.contains(&c)
    }

    pub fn has_nonterminal(&self, c: char) -> bool {
        self.nonterminals.contains(&c)
    }

    /// Position of `c` in the nonterminal alphabet.
    pub fn nonterminal_index(&self, c: char) -> Option<usize> {
        self.nonterminals.iter().position(|&n| n == c)
    }

    pub fn has_productions(&self) -> bool {
        self.rules.values().any(|rewrite| !rewrite.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty() && self.nonterminals.is_empty() && !self.has_productions()
    }

    pub fn add_nonterminal(&mut self, c: char) -> Result<()> {
        match Symbol::classify(c) {
            Some(Symbol::Nonterminal(_)) if !self.has_nonterminal(c) => {
                debug!("Added nonterminal {}", c);
                self.nonterminals.push(c);
                Ok(())
            }
            _ => Err(GrammarErrorType::InvalidSymbol(c)),
        }
    }

    pub fn add_terminal(&mut self, c: char) -> Result<()> {
        match Symbol::classify(c) {
            Some(Symbol::Terminal(_)) if !self.has_terminal(c) => {
                debug!("Added terminal {}", c);
                self.terminals.push(c);
                Ok(())
            }
            _ => Err(GrammarErrorType::InvalidSymbol(c)),
        }
    }

    pub fn set_start_symbol(&mut self, c: char) -> Result<()> {
        if !self.has_nonterminal(c) {
            return Err(GrammarErrorType::UnknownSymbol(c));
        }
        debug!("Start symbol is now {}", c);
        self.start_symbol = Some(c);
        Ok(())
    }

    fn parse_alternative(&self, lhs: char, rhs: &str) -> Result<Alternative> {
        let chars = rhs.chars().collect_vec();
        match *chars.as_slice() {
            [t] if self.has_terminal(t) => Ok(Alternative::Terminal(t)),
            [b, c] if self.has_nonterminal(b) && self.has_nonterminal(c) => Ok(Alternative::Pair(b, c)),
            _ => Err(GrammarErrorType::InvalidProduction(lhs, rhs.to_string())),
        }
    }

    pub fn add_production(&mut self, lhs: char, rhs: &str) -> Result<()> {
        if !self.has_nonterminal(lhs) {
            return Err(GrammarErrorType::UnknownSymbol(lhs));
        }
        let alternative = self.parse_alternative(lhs, rhs)?;
        if self.alternatives(lhs).contains(&alternative) {
            return Err(GrammarErrorType::DuplicateProduction(lhs, rhs.to_string()));
        }

        debug!("Added production {}::={}", lhs, alternative);
        self.rules.entry(lhs).or_default().push(alternative);
        Ok(())
    }

    /// Renders `lhs::=rhs1|rhs2|...`, or the empty string when `lhs` has no
    /// productions.
    pub fn productions(&self, lhs: char) -> String {
        let alternatives = self.alternatives(lhs);
        if alternatives.is_empty() {
            return String::new();
        }
        format!("{}::={}", lhs, alternatives.iter().join("|"))
    }

    /// The canonical rendering, same as `to_string()`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    pub fn remove_grammar(&mut self) {
        debug!("Removed grammar");
        *self = Grammar::default();
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.start_symbol.unwrap_or('_');
        writeln!(
            f,
            "G=({{{}}},{{{}}},{},P)",
            self.terminals.iter().join(","),
            self.nonterminals.iter().join(","),
            start
        )?;
        writeln!(f, "P={{")?;
        for &lhs in &self.nonterminals {
            if !self.alternatives(lhs).is_empty() {
                writeln!(f, "{}", self.productions(lhs))?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn sample_grammar() -> Grammar {
        let mut grammar = Grammar::new();
        for t in ['a', 'b'] {
            grammar.add_terminal(t).unwrap();
        }
        for n in ['S', 'A', 'B'] {
            grammar.add_nonterminal(n).unwrap();
        }
        grammar.set_start_symbol('S').unwrap();
        grammar.add_production('S', "AB").unwrap();
        grammar.add_production('A', "a").unwrap();
        grammar.add_production('B', "b").unwrap();
        grammar
    }

    #[test]
    fn classify_symbols() {
        assert_eq!(Symbol::classify('a'), Some(Symbol::Terminal('a')));
        assert_eq!(Symbol::classify('Z'), Some(Symbol::Nonterminal('Z')));
        assert_eq!(Symbol::classify('1'), None);
        assert_eq!(Symbol::classify('|'), None);
    }

    #[test]
    fn add_symbols() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.add_terminal('a'), Ok(()));
        assert_eq!(grammar.terminals(), &['a']);
        assert_eq!(grammar.add_nonterminal('S'), Ok(()));
        assert_eq!(grammar.nonterminals(), &['S']);
    }

    #[test]
    fn reject_bad_symbols() {
        let mut grammar = Grammar::new();
        grammar.add_terminal('a').unwrap();
        grammar.add_nonterminal('S').unwrap();

        assert_eq!(grammar.add_terminal('a'), Err(GrammarErrorType::InvalidSymbol('a')));
        assert_eq!(grammar.add_terminal('B'), Err(GrammarErrorType::InvalidSymbol('B')));
        assert_eq!(grammar.add_terminal('3'), Err(GrammarErrorType::InvalidSymbol('3')));
        assert_eq!(grammar.add_nonterminal('S'), Err(GrammarErrorType::InvalidSymbol('S')));
        assert_eq!(grammar.add_nonterminal('b'), Err(GrammarErrorType::InvalidSymbol('b')));
        assert_eq!(grammar.add_nonterminal('$'), Err(GrammarErrorType::InvalidSymbol('$')));

        assert_eq!(grammar.terminals().len(), 1);
        assert_eq!(grammar.nonterminals().len(), 1);
    }

    #[test]
    fn start_symbol_must_be_declared() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.set_start_symbol('S'), Err(GrammarErrorType::UnknownSymbol('S')));
        assert_eq!(grammar.start_symbol(), None);

        grammar.add_nonterminal('S').unwrap();
        grammar.add_nonterminal('T').unwrap();
        assert_eq!(grammar.set_start_symbol('S'), Ok(()));
        assert_eq!(grammar.set_start_symbol('T'), Ok(()));
        assert_eq!(grammar.start_symbol(), Some('T'));
    }

    #[test]
    fn reject_bad_productions() {
        let mut grammar = sample_grammar();
        let before = grammar.clone();

        assert_eq!(grammar.add_production('X', "a"), Err(GrammarErrorType::UnknownSymbol('X')));
        assert_eq!(grammar.add_production('S', ""), Err(GrammarErrorType::InvalidProduction('S', "".to_string())));
        assert_eq!(grammar.add_production('S', "ABA"), Err(GrammarErrorType::InvalidProduction('S', "ABA".to_string())));
        assert_eq!(grammar.add_production('S', "c"), Err(GrammarErrorType::InvalidProduction('S', "c".to_string())));
        assert_eq!(grammar.add_production('S', "A"), Err(GrammarErrorType::InvalidProduction('S', "A".to_string())));
        assert_eq!(grammar.add_production('S', "Ab"), Err(GrammarErrorType::InvalidProduction('S', "Ab".to_string())));
        assert_eq!(grammar.add_production('S', "AC"), Err(GrammarErrorType::InvalidProduction('S', "AC".to_string())));
        assert_eq!(grammar.add_production('S', "AB"), Err(GrammarErrorType::DuplicateProduction('S', "AB".to_string())));

        assert_eq!(grammar, before);
    }

    #[test]
    fn productions_keep_insertion_order() {
        let mut grammar = sample_grammar();
        grammar.add_production('S', "BA").unwrap();
        grammar.add_production('S', "a").unwrap();
        grammar.add_production('S', "SS").unwrap();

        assert_eq!(grammar.productions('S'), "S::=AB|BA|a|SS");
        assert_eq!(grammar.productions('A'), "A::=a");
    }

    #[test]
    fn productions_of_bare_nonterminal_is_empty() {
        let mut grammar = sample_grammar();
        grammar.add_nonterminal('C').unwrap();
        assert_eq!(grammar.productions('C'), "");
        assert_eq!(grammar.productions('Q'), "");
    }

    #[test]
    fn render_grammar() {
        let grammar = sample_grammar();
        assert_eq!(grammar.productions('S'), "S::=AB");
        assert_eq!(grammar.describe(), "G=({a,b},{S,A,B},S,P)\nP={\nS::=AB\nA::=a\nB::=b\n}");
    }

    #[test]
    fn render_partial_grammar() {
        let mut grammar = Grammar::new();
        assert_eq!(grammar.to_string(), "G=({},{},_,P)\nP={\n}");

        grammar.add_nonterminal('S').unwrap();
        grammar.add_terminal('x').unwrap();
        assert_eq!(grammar.to_string(), "G=({x},{S},_,P)\nP={\n}");
    }

    #[test]
    fn remove_grammar_resets_everything() {
        let mut grammar = sample_grammar();
        grammar.remove_grammar();

        assert!(grammar.is_empty());
        assert_eq!(grammar.start_symbol(), None);
        assert_eq!(grammar, Grammar::new());
        assert_eq!(grammar.add_nonterminal('S'), Ok(()));
    }

    #[test]
    fn rules_follow_declaration_order() {
        let grammar = sample_grammar();
        let rules: Vec<_> = grammar.rules().collect();
        assert_eq!(rules, vec![
            ('S', Alternative::Pair('A', 'B')),
            ('A', Alternative::Terminal('a')),
            ('B', Alternative::Terminal('b'))
        ]);
    }
}
