//! Grammars in Chomsky normal form and the CYK membership test.
//!
//! A [`Grammar`] is built up one symbol and production at a time, each
//! mutation validated before it is applied. [`is_derived`] then answers
//! whether a word belongs to the grammar's language, and
//! [`algorithm_state_to_string`] shows the table that answer came from.

pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;

pub use cyk::{algorithm_state_to_string, derivation_table, is_derived, DerivationTable, QueryErrorType};
pub use generator::{generate, GenerateErrorType};
pub use grammar::{Alternative, Grammar, GrammarErrorType, Symbol};
