//! Round-trip and failure-path tests for the persisted table formats.

use std::{
    fs,
    path::{Path, PathBuf},
};

use lexfa::{
    automata::{
        LoadError, NfaBuilder, load_dfa, load_dfa_json_bytes, nfa_to_dfa, save_dfa, save_dfa_json,
    },
    dev::generator::gen_nfa,
};
use rand::{SeedableRng, rngs::StdRng};

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lexfa_{tag}_{}.csv", std::process::id()))
}

#[test]
fn text_round_trip_is_exact() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..12 {
        let mut b = NfaBuilder::new();
        let nfa = gen_nfa(&mut rng, &mut b, 3);
        let dfa = nfa_to_dfa(&b, &nfa);
        assert!(dfa.num_states() > 0);

        let path = temp_path(&format!("rt{round}"));
        save_dfa(&path, &dfa).expect("save failed");
        let loaded = load_dfa(&path).expect("load failed");
        fs::remove_file(&path).ok();

        assert_eq!(loaded.num_states(), dfa.num_states());
        assert_eq!(loaded.rows(), dfa.rows());
    }
}

#[test]
fn saved_file_has_the_documented_shape() {
    let mut b = NfaBuilder::new();
    let nfa = b.atomic(b'a'..=b'z', Some("RANGE_AZ"));
    let dfa = nfa_to_dfa(&b, &nfa);

    let path = temp_path("shape");
    save_dfa(&path, &dfa).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + dfa.num_states());
    assert_eq!(lines[0], "2");
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 258);
        assert!(!line.contains('"'), "no quoting in the table format");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_dfa(Path::new("/nonexistent/lexfa_table.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "{err}");
}

#[test]
fn short_record_is_a_format_error_with_its_line_number() {
    let path = temp_path("short");
    fs::write(&path, "1\n0,-1,1\n").unwrap();
    let err = load_dfa(&path).unwrap_err();
    fs::remove_file(&path).ok();

    match err {
        LoadError::Format { line, .. } => assert_eq!(line, 2),
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn junk_field_is_a_format_error() {
    let path = temp_path("junk");
    let mut row: Vec<String> = (0..258).map(|_| "-1".to_string()).collect();
    row[5] = "q".to_string();
    fs::write(&path, format!("1\n{}\n", row.join(","))).unwrap();
    let err = load_dfa(&path).unwrap_err();
    fs::remove_file(&path).ok();

    match err {
        LoadError::Format { line, .. } => assert_eq!(line, 2),
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn bad_state_count_is_a_format_error_on_line_one() {
    let path = temp_path("count");
    fs::write(&path, "two\n").unwrap();
    let err = load_dfa(&path).unwrap_err();
    fs::remove_file(&path).ok();

    match err {
        LoadError::Format { line, .. } => assert_eq!(line, 1),
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn empty_file_is_a_format_error() {
    let path = temp_path("empty");
    fs::write(&path, "").unwrap();
    let err = load_dfa(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(matches!(err, LoadError::Format { line: 1, .. }), "{err}");
}

#[test]
fn failed_load_leaves_the_previous_table_untouched() {
    // A load never patches a table in place: it returns a fresh value only
    // on full success, so whatever the caller holds survives any error.
    let mut b = NfaBuilder::new();
    let nfa = b.atomic(b'a'..=b'c', None);
    let dfa = nfa_to_dfa(&b, &nfa);
    let before = dfa.clone();

    assert!(load_dfa(Path::new("/nonexistent/lexfa_table.csv")).is_err());

    assert_eq!(dfa, before);
    assert!(dfa.accepts(b"a"));
    assert!(!dfa.accepts(b"z"));
}

#[test]
fn json_round_trip_is_exact() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut b = NfaBuilder::new();
    let nfa = gen_nfa(&mut rng, &mut b, 3);
    let dfa = nfa_to_dfa(&b, &nfa);

    let path = temp_path("json").with_extension("json");
    save_dfa_json(&path, &dfa).expect("json save failed");
    let bytes = fs::read(&path).unwrap();
    fs::remove_file(&path).ok();

    let loaded = load_dfa_json_bytes(&bytes).expect("json load failed");
    assert_eq!(loaded.num_states(), dfa.num_states());
    assert_eq!(loaded.rows(), dfa.rows());
}

#[test]
fn truncated_json_is_a_format_error() {
    let err = load_dfa_json_bytes(b"{\"num_states\": 2, \"rows\": [[").unwrap_err();
    assert!(matches!(err, LoadError::Format { .. }), "{err}");
}
