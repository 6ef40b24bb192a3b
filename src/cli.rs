use std::fmt::Display;

use clap::Parser;
use itertools::Itertools;

use cyk::error_handling::{Error, ErrorType, Errors};
use cyk::{derivation_table, DerivationTable, Grammar, GrammarErrorType, QueryErrorType};

#[derive(Parser)]
#[command(version, about = "Checks words against a grammar in Chomsky normal form")]
pub struct Cli {
    /// Words to check for membership
    pub words: Vec<String>,

    /// Terminal symbols, one lowercase letter each
    #[arg(short, long, value_name = "CHARS", default_value = "")]
    pub terminals: String,

    /// Nonterminal symbols, one uppercase letter each
    #[arg(short, long, value_name = "CHARS", default_value = "")]
    pub nonterminals: String,

    /// Start symbol
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Productions of one nonterminal, e.g. `S=AB|a` (repeatable)
    #[arg(short, long = "production", value_name = "LHS=RHS")]
    pub productions: Vec<String>,

    /// Print the CYK table of every word
    #[arg(long)]
    pub table: bool,

    /// Print the grammar before checking
    #[arg(long)]
    pub show_grammar: bool,

    /// Amount of random words to generate
    #[arg(short, long, value_name = "AMOUNT")]
    pub generate: Option<usize>,

    /// Seed for word generation (default: random)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Derivation depth after which generation heads for the shortest words
    #[arg(long, value_name = "DEPTH", default_value_t = 8)]
    pub max_depth: usize,
}

#[derive(Debug, PartialEq)]
pub enum DefinitionErrorType {
    // A production argument without `=` or without a single left hand side
    Malformed(String),
    // The grammar store rejected the definition
    Rejected(GrammarErrorType),
}

impl ErrorType for DefinitionErrorType {}

impl Display for DefinitionErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionErrorType::Malformed(text) => write!(f, "Expected `LHS=RHS[|RHS...]`, got `{}`", text),
            DefinitionErrorType::Rejected(error) => write!(f, "{}", error),
        }
    }
}

pub type DefinitionError = Error<DefinitionErrorType>;

fn rejected(argument: &'static str, position: usize, error: GrammarErrorType) -> DefinitionError {
    Error::at(argument, position, DefinitionErrorType::Rejected(error))
}

fn split_production(text: &str) -> Option<(char, Vec<&str>)> {
    let (lhs, rhs) = text.split_once('=')?;
    let lhs = lhs.trim().chars().exactly_one().ok()?;
    Some((lhs, rhs.split('|').map(str::trim).collect()))
}

// Feeds every definition to the grammar, collecting all failures
pub fn build_grammar(cli: &Cli) -> Result<Grammar, Errors<DefinitionErrorType>> {
    let mut grammar = Grammar::new();
    let mut errors = Vec::new();

    for (i, c) in cli.terminals.chars().enumerate() {
        if let Err(e) = grammar.add_terminal(c) {
            errors.push(rejected("--terminals", i + 1, e));
        }
    }
    for (i, c) in cli.nonterminals.chars().enumerate() {
        if let Err(e) = grammar.add_nonterminal(c) {
            errors.push(rejected("--nonterminals", i + 1, e));
        }
    }
    if let Some(start) = cli.start {
        if let Err(e) = grammar.set_start_symbol(start) {
            errors.push(rejected("--start", 0, e));
        }
    }
    for (i, text) in cli.productions.iter().enumerate() {
        let Some((lhs, alternatives)) = split_production(text) else {
            errors.push(Error::at("--production", i + 1, DefinitionErrorType::Malformed(text.clone())));
            continue;
        };
        for rhs in alternatives {
            if let Err(e) = grammar.add_production(lhs, rhs) {
                errors.push(rejected("--production", i + 1, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(grammar)
    } else {
        Err(errors)
    }
}

// Builds the table for `word` once, for both the verdict and the display
pub fn check_word(grammar: &Grammar, word: &str) -> Result<(bool, DerivationTable), QueryErrorType> {
    let table = derivation_table(grammar, word)?;
    let derived = grammar.start_symbol().is_some_and(|start| table.derives_word(start));
    Ok((derived, table))
}
