// src/dev/generator.rs
// Random fragments and input corpora shared by the sweep tests.

use rand::Rng;

use crate::automata::{Nfa, NfaBuilder};

/// Bytes the random fragments draw their symbol ranges from. Kept small so
/// generated corpora actually exercise the interesting transitions.
pub const TEST_ALPHABET: &[u8] = b"abcde";

/// A byte outside [`TEST_ALPHABET`]; sprinkled into corpora so rejection
/// paths get compared too.
pub const FOREIGN_BYTE: u8 = b'z';

/// A random Thompson fragment of bounded combinator depth.
pub fn gen_nfa(rng: &mut impl Rng, b: &mut NfaBuilder, depth: usize) -> Nfa {
    if depth == 0 {
        return gen_atomic(rng, b);
    }
    match rng.random_range(0..6) {
        0 => {
            let x = gen_nfa(rng, b, depth - 1);
            let y = gen_nfa(rng, b, depth - 1);
            b.concat(x, y)
        }
        1 => {
            let x = gen_nfa(rng, b, depth - 1);
            let y = gen_nfa(rng, b, depth - 1);
            b.union(x, y)
        }
        2 => {
            let x = gen_nfa(rng, b, depth - 1);
            b.star(x)
        }
        3 => {
            let x = gen_nfa(rng, b, depth - 1);
            b.plus(x)
        }
        4 => {
            let x = gen_nfa(rng, b, depth - 1);
            b.optional(x)
        }
        _ => gen_atomic(rng, b),
    }
}

fn gen_atomic(rng: &mut impl Rng, b: &mut NfaBuilder) -> Nfa {
    let i = rng.random_range(0..TEST_ALPHABET.len());
    let j = rng.random_range(i..TEST_ALPHABET.len());
    b.atomic(TEST_ALPHABET[i]..=TEST_ALPHABET[j], None)
}

/// Every string over [`TEST_ALPHABET`] up to `max_len` bytes (so the empty
/// string and all single symbols are always covered), plus `extra` random
/// longer ones that may contain [`FOREIGN_BYTE`].
pub fn gen_corpus(rng: &mut impl Rng, max_len: usize, extra: usize) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for s in &frontier {
            for &byte in TEST_ALPHABET {
                let mut t = s.clone();
                t.push(byte);
                out.push(t.clone());
                next.push(t);
            }
        }
        frontier = next;
    }

    for _ in 0..extra {
        let len = rng.random_range(max_len + 1..=max_len + 4);
        let s: Vec<u8> = (0..len)
            .map(|_| {
                if rng.random_range(0..8) == 0 {
                    FOREIGN_BYTE
                } else {
                    TEST_ALPHABET[rng.random_range(0..TEST_ALPHABET.len())]
                }
            })
            .collect();
        out.push(s);
    }
    out
}
