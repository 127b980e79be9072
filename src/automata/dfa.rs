// src/automata/dfa.rs

/// Number of addressable symbol codes in a transition row.
pub const SYMBOL_SPACE: usize = 256;
/// Row layout: own id, one slot per symbol code, acceptance flag.
pub const ROW_WIDTH: usize = SYMBOL_SPACE + 2;
/// Acceptance-slot value for accepting states; also the no-transition
/// marker in the symbol slots.
pub const ACCEPT: i32 = 1;
pub const REJECT: i32 = -1;

/// A DFA transition table: one row per state, in id order. Immutable once
/// built — a load constructs a fresh value instead of patching an old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    num_states: usize,
    rows: Vec<Vec<i32>>,
}

impl Dfa {
    pub(crate) fn from_rows(rows: Vec<Vec<i32>>) -> Self {
        Self {
            num_states: rows.len(),
            rows,
        }
    }

    /// Reassembles a table exactly as persisted: the recorded state count
    /// and rows, verbatim and unvalidated.
    pub(crate) fn from_parts(num_states: usize, rows: Vec<Vec<i32>>) -> Self {
        Self { num_states, rows }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    /// Next state id for `state` on `byte`, or [`REJECT`].
    #[inline]
    pub fn next(&self, state: usize, byte: u8) -> i32 {
        self.rows[state][1 + byte as usize]
    }

    #[inline]
    pub fn is_accepting(&self, state: usize) -> bool {
        self.rows[state][ROW_WIDTH - 1] == ACCEPT
    }

    /// Plain table walk from state 0, acceptance only. Token extraction
    /// belongs to a consuming lexer, not here.
    pub fn accepts(&self, input: &[u8]) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let mut state = 0usize;
        for &byte in input {
            let next = self.next(state, byte);
            if next == REJECT {
                return false;
            }
            state = next as usize;
        }
        self.is_accepting(state)
    }

    /// On-demand structural check for tables from untrusted sources: row
    /// ids match their index, acceptance flags are ±1, and every
    /// transition slot stays inside the table. Loads never run this
    /// themselves.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_states != self.rows.len() {
            return Err(format!(
                "state count {} does not match {} rows",
                self.num_states,
                self.rows.len()
            ));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != ROW_WIDTH {
                return Err(format!(
                    "row {i}: expected {ROW_WIDTH} slots, got {}",
                    row.len()
                ));
            }
            if row[0] != i as i32 {
                return Err(format!("row {i}: own-id slot holds {}", row[0]));
            }
            let flag = row[ROW_WIDTH - 1];
            if flag != ACCEPT && flag != REJECT {
                return Err(format!("row {i}: acceptance flag {flag}"));
            }
            for (code, &next) in row[1..=SYMBOL_SPACE].iter().enumerate() {
                if next != REJECT && !(0..self.num_states as i32).contains(&next) {
                    return Err(format!("row {i}: code {code} points at state {next}"));
                }
            }
        }
        Ok(())
    }
}
