//! Reading the team's spreadsheet exports and writing Editor-ready CSV.

use std::io::Write;

use encoding_rs::WINDOWS_1251;

use crate::error::{ImportError, Result};

const SNIFF_CHARS: usize = 10_000;
const UTF8_BOM: &str = "\u{feff}";

/// Exports come either as UTF-8 (often with a BOM) or as Windows-1251 from
/// older Excel installs.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1251.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

const CANDIDATES: [u8; 2] = [b',', b';'];

/// Unquoted occurrences of each candidate delimiter, one entry per
/// non-blank line in the head of the file.
fn delimiter_counts(text: &str) -> Vec<[usize; 2]> {
    let mut lines = Vec::new();
    let mut current = [0usize; 2];
    let mut blank = true;
    let mut in_quotes = false;
    for c in text.chars().take(SNIFF_CHARS) {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                if !blank {
                    lines.push(current);
                }
                current = [0; 2];
                blank = true;
                continue;
            }
            _ => {}
        }
        if !in_quotes {
            if let Some(slot) = CANDIDATES.iter().position(|&d| d as char == c) {
                current[slot] += 1;
            }
        }
        if !c.is_whitespace() {
            blank = false;
        }
    }
    if !blank {
        lines.push(current);
    }
    lines
}

/// Picks `,` or `;` the way spreadsheet dialect sniffing does: the winner is
/// the delimiter whose most common non-zero per-line count repeats on the
/// most lines. Total occurrences only break ties, and those go to the comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let lines = delimiter_counts(text);

    let score = |slot: usize| -> (usize, usize) {
        let mut frequency: Vec<(usize, usize)> = Vec::new();
        for line in &lines {
            let count = line[slot];
            if count == 0 {
                continue;
            }
            match frequency.iter_mut().find(|(n, _)| *n == count) {
                Some((_, hits)) => *hits += 1,
                None => frequency.push((count, 1)),
            }
        }
        let consistent = frequency.iter().map(|&(_, hits)| hits).max().unwrap_or(0);
        let total = lines.iter().map(|line| line[slot]).sum();
        (consistent, total)
    };

    let (comma, semicolon) = (score(0), score(1));
    if semicolon > comma { b';' } else { b',' }
}

pub fn read_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = decode(bytes);
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(&text))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    if rows.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(rows)
}

/// Semicolon-separated, CRLF-terminated UTF-8 with a BOM, which is what Excel and Ads Editor
/// open without an import dialog.
pub fn write_rows<W: Write>(mut out: W, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    out.write_all(UTF8_BOM.as_bytes())?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
