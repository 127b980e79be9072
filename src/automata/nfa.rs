// src/automata/nfa.rs
// Thompson-style NFA fragments over a shared state arena. Every combinator
// mutates fragment A in place and keeps the single-start / single-accept
// shape so fragments keep composing.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::ops::RangeInclusive;

use super::state::{Edge, Label, State, StateId};

/// An NFA fragment: start state, state set, accepting set, and the byte
/// codes actually used on edges (epsilon excluded). All ids index into the
/// arena of the [`NfaBuilder`] that created the fragment.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub id: u32,
    pub start: StateId,
    pub states: BTreeSet<StateId>,
    pub accepting: BTreeSet<StateId>,
    pub alphabet: BTreeSet<u8>,
}

/// Construction context. Owns every state created for its fragments and
/// hands out fragment ids; the counters live here rather than in
/// process-wide statics so builds are reproducible and isolated across
/// tests.
#[derive(Debug, Default)]
pub struct NfaBuilder {
    states: Vec<State>,
    next_nfa_id: u32,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id as usize]
    }

    fn alloc(&mut self, accepting: bool, token: Option<String>) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State {
            accepting,
            token,
            edges: Vec::new(),
        });
        id
    }

    fn fresh_nfa_id(&mut self) -> u32 {
        let id = self.next_nfa_id;
        self.next_nfa_id += 1;
        id
    }

    /// Two-state fragment accepting exactly the bytes in `symbols`: one
    /// edge per code in the inclusive range, all between the same two
    /// states. `token` attaches to the accepting state only. An inverted
    /// range is a caller contract violation.
    pub fn atomic(&mut self, symbols: RangeInclusive<u8>, token: Option<&str>) -> Nfa {
        let (lo, hi) = (*symbols.start(), *symbols.end());
        assert!(lo <= hi, "malformed symbol range 0x{lo:02X}..=0x{hi:02X}");

        let start = self.alloc(false, None);
        let accept = self.alloc(true, token.map(str::to_owned));

        let mut alphabet = BTreeSet::new();
        for byte in lo..=hi {
            self.state_mut(start).push_edge(Label::Byte(byte), accept);
            alphabet.insert(byte);
        }

        Nfa {
            id: self.fresh_nfa_id(),
            start,
            states: BTreeSet::from([start, accept]),
            accepting: BTreeSet::from([accept]),
            alphabet,
        }
    }

    /// Single-symbol convenience over [`NfaBuilder::atomic`].
    pub fn symbol(&mut self, byte: u8, token: Option<&str>) -> Nfa {
        self.atomic(byte..=byte, token)
    }

    /// Concatenation: `a` then `b`. Every edge leaving `b`'s start is
    /// copied onto each accepting state of `a`, which then loses
    /// acceptance; `b`'s start drops out of the merged state set (its
    /// arena slot stays behind, unreferenced). `a`'s accepting set becomes
    /// `b`'s and the alphabets union.
    pub fn concat(&mut self, mut a: Nfa, b: Nfa) -> Nfa {
        let bridged: Vec<Edge> = self.state(b.start).edges.clone();
        for &acc in &a.accepting {
            let st = self.state_mut(acc);
            st.edges.extend(bridged.iter().copied());
            st.accepting = false;
        }

        a.states.extend(b.states.iter().copied());
        a.states.remove(&b.start);
        a.accepting = b.accepting;
        a.alphabet.extend(b.alphabet.iter().copied());
        a
    }

    /// Union: a new start with ε edges to both old starts, a new sole
    /// accepting state reached by ε from every former accepting state.
    pub fn union(&mut self, mut a: Nfa, b: Nfa) -> Nfa {
        let e1 = self.alloc(false, None);
        let e2 = self.alloc(true, None);

        self.state_mut(e1).push_edge(Label::Epsilon, a.start);
        self.state_mut(e1).push_edge(Label::Epsilon, b.start);

        for &acc in a.accepting.iter().chain(b.accepting.iter()) {
            let st = self.state_mut(acc);
            st.push_edge(Label::Epsilon, e2);
            st.accepting = false;
        }

        a.start = e1;
        a.accepting.clear();
        a.accepting.insert(e2);
        a.states.extend(b.states.iter().copied());
        a.states.insert(e1);
        a.states.insert(e2);
        a.alphabet.extend(b.alphabet.iter().copied());
        a
    }

    /// Kleene star: zero or more repetitions. New start `e1` with ε to the
    /// old start and to the new sole accept `e2`; every former accepting
    /// state gains ε to `e2` and ε back to the old start.
    pub fn star(&mut self, mut a: Nfa) -> Nfa {
        let old_start = a.start;
        let e1 = self.alloc(false, None);
        let e2 = self.alloc(true, None);

        self.state_mut(e1).push_edge(Label::Epsilon, old_start);
        self.state_mut(e1).push_edge(Label::Epsilon, e2);

        for &acc in &a.accepting {
            let st = self.state_mut(acc);
            st.push_edge(Label::Epsilon, e2);
            st.push_edge(Label::Epsilon, old_start);
            st.accepting = false;
        }

        a.start = e1;
        a.accepting.clear();
        a.accepting.insert(e2);
        a.states.insert(e1);
        a.states.insert(e2);
        a
    }

    /// Kleene plus. Built as [`NfaBuilder::star`] with one extra ε edge
    /// from the new start straight to the new accept (a duplicate), so it
    /// still matches zero occurrences — the same language as `star`.
    // TODO: plus currently matches the empty string too; revisit whether
    // it should require at least one occurrence.
    pub fn plus(&mut self, a: Nfa) -> Nfa {
        let a = self.star(a);
        let accept = *a
            .accepting
            .iter()
            .next()
            .expect("star leaves a single accepting state");
        self.state_mut(a.start).push_edge(Label::Epsilon, accept);
        a
    }

    /// Optional: same shape as star but without the repetition back-edge,
    /// so it matches the fragment's language plus the empty string.
    pub fn optional(&mut self, mut a: Nfa) -> Nfa {
        let old_start = a.start;
        let e1 = self.alloc(false, None);
        let e2 = self.alloc(true, None);

        self.state_mut(e1).push_edge(Label::Epsilon, old_start);
        self.state_mut(e1).push_edge(Label::Epsilon, e2);

        for &acc in &a.accepting {
            let st = self.state_mut(acc);
            st.push_edge(Label::Epsilon, e2);
            st.accepting = false;
        }

        a.start = e1;
        a.accepting.clear();
        a.accepting.insert(e2);
        a.states.insert(e1);
        a.states.insert(e2);
        a
    }

    /// States reachable from `set` by exactly one edge labeled `byte`
    /// (epsilon edges excluded).
    pub fn move_set(&self, set: &BTreeSet<StateId>, byte: u8) -> BTreeSet<StateId> {
        let mut out = BTreeSet::new();
        for &id in set {
            for edge in &self.state(id).edges {
                if edge.label == Label::Byte(byte) {
                    out.insert(edge.to);
                }
            }
        }
        out
    }

    /// Smallest superset of `set` closed under ε edges. Worklist: each
    /// state enters the pending stack at most once, so this terminates.
    pub fn epsilon_closure(&self, set: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut out: BTreeSet<StateId> = set.clone();
        let mut pending: Vec<StateId> = set.iter().copied().collect();
        while let Some(id) = pending.pop() {
            for edge in &self.state(id).edges {
                if edge.label == Label::Epsilon && out.insert(edge.to) {
                    pending.push(edge.to);
                }
            }
        }
        out
    }

    /// Closure/move simulation of `input`, independent of any DFA
    /// conversion. Used as the correctness oracle by the sweep tests.
    pub fn nfa_accepts(&self, nfa: &Nfa, input: &[u8]) -> bool {
        let mut current = self.epsilon_closure(&BTreeSet::from([nfa.start]));
        for &byte in input {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&self.move_set(&current, byte));
        }
        current.iter().any(|id| nfa.accepting.contains(id))
    }

    /// Human-readable dump of a fragment: states, flags, edges, alphabet.
    pub fn describe(&self, nfa: &Nfa) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "NFA {}: {} states, start s{}",
            nfa.id,
            nfa.states.len(),
            nfa.start
        );
        for &id in &nfa.states {
            let st = self.state(id);
            match (st.accepting, st.token.as_deref()) {
                (true, Some(tok)) => {
                    let _ = writeln!(out, "  s{id} (accept, token {tok})");
                }
                (true, None) => {
                    let _ = writeln!(out, "  s{id} (accept)");
                }
                _ => {
                    let _ = writeln!(out, "  s{id}");
                }
            }
            for edge in &st.edges {
                let _ = writeln!(out, "    --{}--> s{}", edge.label, edge.to);
            }
        }
        let alphabet: Vec<String> = nfa
            .alphabet
            .iter()
            .map(|&b| Label::Byte(b).to_string())
            .collect();
        let _ = writeln!(out, "  alphabet: {{{}}}", alphabet.join(", "));
        let accepting: Vec<String> = nfa.accepting.iter().map(|id| format!("s{id}")).collect();
        let _ = writeln!(out, "  accepting: {{{}}}", accepting.join(", "));
        out
    }
}
