//! Plain-text roster and history files.
//!
//! Roster: one participant per line. History: one recorded group per line,
//! members separated by commas or tabs. A member containing a delimiter or a
//! double quote is written in double quotes with inner quotes doubled.
//! Normalization and validation are left to [`crate::participant`] and
//! [`crate::history`].

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::error::StoreError;
use crate::group::MatchingPlan;

fn io_error<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> StoreError + 'a {
    move |source| StoreError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Read raw roster lines. Blank lines are kept out.
pub fn read_roster(path: &Path) -> Result<Vec<String>, StoreError> {
    let text = fs::read_to_string(path).map_err(io_error("read roster", path))?;
    Ok(parse_roster(&text))
}

/// Read roster lines from any reader (e.g. stdin).
pub fn read_roster_from<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut roster = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            roster.push(line);
        }
    }
    Ok(roster)
}

pub fn parse_roster(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Read raw history rows. A missing file is an empty history.
pub fn read_history(path: &Path) -> Result<Vec<Vec<String>>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history file yet");
            return Ok(Vec::new());
        }
        Err(err) => return Err(io_error("read history", path)(err)),
    };
    Ok(parse_history(&text))
}

pub fn parse_history(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_row)
        .collect()
}

fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if cell.trim().is_empty() => {
                cell.clear();
                quoted = true;
            }
            ',' | '\t' if !quoted => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn quote_cell(name: &str) -> String {
    if name.contains([',', '\t', '"']) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// Append each group of `plan` as one history row.
pub fn append_plan(path: &Path, plan: &MatchingPlan) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error("open history", path))?;

    let mut rows = String::new();
    for group in plan.groups() {
        let names: Vec<String> = group.members().iter().map(|m| quote_cell(m.display())).collect();
        rows.push_str(&names.join(","));
        rows.push('\n');
    }

    file.write_all(rows.as_bytes())
        .map_err(io_error("append to history", path))?;
    debug!(path = %path.display(), groups = plan.len(), "appended plan to history");
    Ok(())
}
