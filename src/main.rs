// src/main.rs
// Demo driver: builds one NFA over the core API, converts it, prints the
// resulting table, and saves it to the working directory.

use std::path::Path;

use anyhow::Result;

use lexfa::automata::{NfaBuilder, REJECT, SYMBOL_SPACE, nfa_to_dfa, save_dfa};

fn main() -> Result<()> {
    let mut builder = NfaBuilder::new();
    let nfa = builder.atomic(b'a'..=b'z', Some("RANGE_AZ"));
    print!("{}", builder.describe(&nfa));

    let dfa = nfa_to_dfa(&builder, &nfa);
    println!("DFA: {} states", dfa.num_states());
    for (i, row) in dfa.rows().iter().enumerate() {
        let defined: Vec<String> = (0..SYMBOL_SPACE)
            .filter(|&code| row[1 + code] != REJECT)
            .map(|code| format!("0x{code:02X}->{}", row[1 + code]))
            .collect();
        let accept = if dfa.is_accepting(i) { " (accept)" } else { "" };
        let edges = if defined.is_empty() {
            "-".to_string()
        } else {
            defined.join(" ")
        };
        println!("  S{i}{accept}: {edges}");
    }

    let out = Path::new("dfa_table.csv");
    save_dfa(out, &dfa)?;
    println!("saved table to {}", out.display());
    Ok(())
}
