use bit_vec::BitVec;

/// The triangular CYK table for one word.
///
/// Cell `(span, offset)` holds the nonterminals deriving the
/// `span + 1` characters starting at `offset`, as a bitset over the
/// nonterminal alphabet. Only cells with `offset + span < word_len` exist;
/// they are stored row by row, each row one cell shorter than the last.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationTable {
    word_len: usize,
    nonterminals: Vec<char>,
    cells: Vec<BitVec>,
}

// Indices of the set bits
pub(crate) fn members(bits: &BitVec) -> impl Iterator<Item = usize> + Clone + '_ {
    bits.iter().enumerate().filter(|&(_, set)| set).map(|(i, _)| i)
}

impl DerivationTable {
    pub(crate) fn new(word_len: usize, nonterminals: &[char]) -> Self {
        let empty = BitVec::from_elem(nonterminals.len(), false);
        DerivationTable {
            word_len,
            nonterminals: nonterminals.to_vec(),
            cells: vec![empty; word_len * (word_len + 1) / 2],
        }
    }

    pub fn word_len(&self) -> usize {
        self.word_len
    }

    /// Whether `(span, offset)` names a cell of this table.
    pub fn is_valid(&self, span: usize, offset: usize) -> bool {
        span < self.word_len && offset < self.word_len - span
    }

    fn index(&self, span: usize, offset: usize) -> usize {
        assert!(
            self.is_valid(span, offset),
            "cell ({}, {}) outside a table for a word of length {}",
            span, offset, self.word_len
        );
        span * self.word_len - span * span.saturating_sub(1) / 2 + offset
    }

    pub(crate) fn bits(&self, span: usize, offset: usize) -> &BitVec {
        &self.cells[self.index(span, offset)]
    }

    fn checked_bits(&self, span: usize, offset: usize) -> Option<&BitVec> {
        self.is_valid(span, offset).then(|| self.bits(span, offset))
    }

    pub(crate) fn set_bits(&mut self, span: usize, offset: usize, bits: BitVec) {
        let index = self.index(span, offset);
        self.cells[index] = bits;
    }

    /// The nonterminals of a cell, in declaration order. Coordinates
    /// outside the triangle yield nothing.
    pub fn cell(&self, span: usize, offset: usize) -> impl Iterator<Item = char> + '_ {
        self.checked_bits(span, offset)
            .into_iter()
            .flat_map(members)
            .map(move |i| self.nonterminals[i])
    }

    pub fn contains(&self, span: usize, offset: usize, nonterminal: char) -> bool {
        let Some(bits) = self.checked_bits(span, offset) else { return false };
        self.nonterminals
            .iter()
            .position(|&n| n == nonterminal)
            .is_some_and(|i| bits.get(i).unwrap_or(false))
    }

    /// Whether `nonterminal` derives the whole word.
    pub fn derives_word(&self, nonterminal: char) -> bool {
        self.word_len > 0 && self.contains(self.word_len - 1, 0, nonterminal)
    }
}
