// src/automata/subset.rs
// Subset construction, NFA → DFA. Rows span the full byte space so the
// emitted table is directly position-addressable by raw code; the probe
// loop enumerates codes in [0, 255) only, so the column for code 255
// always stays -1.

use std::collections::BTreeSet;
use std::time::Instant;

use hashbrown::HashMap;

use super::dfa::{ACCEPT, Dfa, REJECT, ROW_WIDTH};
use super::nfa::{Nfa, NfaBuilder};
use super::state::StateId;

// Canonical map key for a subset: the sorted member-id vector.
fn key_of(set: &BTreeSet<StateId>) -> Vec<StateId> {
    set.iter().copied().collect()
}

/// Converts an NFA fragment to a DFA transition table. Subsets are
/// processed in first-discovered order and discovery order is the sole
/// source of DFA ids, so identical internal state numbering yields
/// byte-identical tables across runs. No minimization happens here.
pub fn nfa_to_dfa(builder: &NfaBuilder, nfa: &Nfa) -> Dfa {
    let t0 = Instant::now();

    let d0 = builder.epsilon_closure(&BTreeSet::from([nfa.start]));

    // Seen-subset interner: canonical member vector -> assigned DFA id.
    let mut ids: HashMap<Vec<StateId>, i32> = HashMap::new();
    ids.insert(key_of(&d0), 0);

    let mut subsets: Vec<BTreeSet<StateId>> = vec![d0];
    let mut rows: Vec<Vec<i32>> = Vec::new();

    let mut i = 0usize;
    while i < subsets.len() {
        let mut row = vec![REJECT; ROW_WIDTH];
        row[0] = i as i32;
        let accepting = subsets[i].iter().any(|id| nfa.accepting.contains(id));
        row[ROW_WIDTH - 1] = if accepting { ACCEPT } else { REJECT };

        for code in 0u8..255 {
            let target = builder.epsilon_closure(&builder.move_set(&subsets[i], code));
            if target.is_empty() {
                continue;
            }
            let key = key_of(&target);
            let next = subsets.len();
            let id = *ids.entry(key).or_insert_with(|| {
                subsets.push(target);
                next as i32
            });
            row[1 + code as usize] = id;
        }

        rows.push(row);
        i += 1;
    }

    log::debug!(
        "[subset] {} dfa states from {} nfa states in {} ms",
        rows.len(),
        nfa.states.len(),
        t0.elapsed().as_millis()
    );

    Dfa::from_rows(rows)
}
