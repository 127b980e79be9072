// src/automata/mod.rs
pub mod dfa;
pub mod io;
pub mod nfa;
pub mod state;
pub mod subset;

// Re-exports to keep the external API flat.
pub use dfa::{ACCEPT, Dfa, REJECT, ROW_WIDTH, SYMBOL_SPACE};
pub use io::{LoadError, load_dfa, load_dfa_json_bytes, save_dfa, save_dfa_json};
pub use nfa::{Nfa, NfaBuilder};
pub use state::{Edge, Label, State, StateId};
pub use subset::nfa_to_dfa;
