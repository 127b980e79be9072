// src/automata/io.rs

use std::{
    fmt, fs,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::dfa::{Dfa, ROW_WIDTH};

/// Why a load failed: the file couldn't be read, or a record didn't
/// parse. Either way the caller's in-memory table is left untouched — a
/// load only ever returns a complete fresh [`Dfa`].
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Format { line: usize, msg: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "i/o error: {e}"),
            LoadError::Format { line, msg } => write!(f, "format error at line {line}: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Format { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

fn format_err(line: usize, msg: impl Into<String>) -> LoadError {
    LoadError::Format {
        line,
        msg: msg.into(),
    }
}

// -------------------- text table --------------------
// Line 1: decimal state count. One line per row after that, in id order:
// exactly 258 comma-separated decimal integers — own id, 256 transition
// slots, acceptance flag. No header, version tag, checksum, or quoting.

pub fn save_dfa(path: &Path, dfa: &Dfa) -> io::Result<()> {
    let f = fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    writeln!(w, "{}", dfa.num_states())?;
    for row in dfa.rows() {
        let line: Vec<String> = row.iter().map(i32::to_string).collect();
        writeln!(w, "{}", line.join(","))?;
    }
    w.flush()?;
    log::debug!(
        "[io] saved {} states to {}",
        dfa.num_states(),
        path.display()
    );
    Ok(())
}

/// Reads a table back verbatim. Per-record shape (field count, integer
/// fields) is checked; structural facts (own id == row index, transition
/// targets in range) are not — run [`Dfa::validate`] if the source is
/// untrusted.
pub fn load_dfa(path: &Path) -> Result<Dfa, LoadError> {
    let f = fs::File::open(path)?;
    let mut lines = BufReader::new(f).lines();

    let first = lines
        .next()
        .ok_or_else(|| format_err(1, "missing state count"))??;
    let num_states: usize = first
        .trim()
        .parse()
        .map_err(|_| format_err(1, format!("bad state count {first:?}")))?;

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let lineno = idx + 2;
        let mut row = Vec::with_capacity(ROW_WIDTH);
        for field in line.split(',') {
            let cell: i32 = field
                .trim()
                .parse()
                .map_err(|_| format_err(lineno, format!("bad field {field:?}")))?;
            row.push(cell);
        }
        if row.len() != ROW_WIDTH {
            return Err(format_err(
                lineno,
                format!("expected {ROW_WIDTH} fields, got {}", row.len()),
            ));
        }
        rows.push(row);
    }

    Ok(Dfa::from_parts(num_states, rows))
}

// -------------------- JSON (de)serialization --------------------

#[derive(Serialize, Deserialize)]
struct DfaDisk {
    num_states: usize,
    rows: Vec<Vec<i32>>,
}

impl From<&Dfa> for DfaDisk {
    fn from(d: &Dfa) -> Self {
        Self {
            num_states: d.num_states(),
            rows: d.rows().to_vec(),
        }
    }
}

impl DfaDisk {
    fn into_dfa(self) -> Dfa {
        Dfa::from_parts(self.num_states, self.rows)
    }
}

pub fn save_dfa_json(path: &Path, dfa: &Dfa) -> io::Result<()> {
    // Stream to disk to avoid a giant intermediate string.
    let f = fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &DfaDisk::from(dfa))?;
    w.flush()
}

pub fn load_dfa_json_bytes(data: &[u8]) -> Result<Dfa, LoadError> {
    serde_json::from_slice::<DfaDisk>(data)
        .map(DfaDisk::into_dfa)
        .map_err(|e| format_err(e.line(), format!("bad table JSON: {e}")))
}
