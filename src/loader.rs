//! Bulk loading of delimited record files.
//!
//! Each line of the input is one record. The key is everything before the
//! first delimiter and the value is everything after it, so a product table
//! line such as `ESZ5;E-mini S&P;50` stores `E-mini S&P;50` under `ESZ5`.
//! Every record becomes exactly one [`LanaiTrie::insert`] call, which means
//! the first occurrence of a repeated key wins.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::loader::LoaderConfig;
use crate::config::Validate;
use crate::data_structures::lanai_trie::LanaiTrie;
use crate::error::loader::{LoaderError, LoaderResult};
use crate::error::{report_error, ErrorContext};

/// Outcome counts for one bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Non-blank records read
    pub records: usize,
    /// Records that added a new key
    pub inserted: usize,
    /// Records whose key was already present
    pub duplicates: usize,
    /// Invalid records skipped
    pub skipped: usize,
}

/// Splits a record into key and value at the first delimiter.
///
/// Returns `None` when the record has no delimiter.
pub fn split_record<'a>(record: &'a [u8], config: &LoaderConfig) -> Option<(&'a [u8], &'a [u8])> {
    let mut utf8 = [0u8; 4];
    let delimiter = config.delimiter.encode_utf8(&mut utf8).as_bytes();

    let at = record
        .windows(delimiter.len())
        .position(|window| window == delimiter)?;
    let key = &record[..at];
    let key = if config.trim_keys { trim_ascii(key) } else { key };
    Some((key, &record[at + delimiter.len()..]))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Strips a trailing `\n` or `\r\n`.
fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Loads every record from `reader` into `trie`.
///
/// # Returns
///
/// * `Ok(LoadReport)` - Counts of inserted, duplicate and skipped records.
/// * `Err(LoaderError)` - `config` fails validation, reading failed, or a
///   record was invalid and `skip_invalid` is off.
pub fn load_records<R: BufRead>(
    mut reader: R,
    trie: &mut LanaiTrie<String>,
    config: &LoaderConfig,
) -> LoaderResult<LoadReport> {
    config.validate()?;

    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    let mut line = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoaderError::Read {
                line: line + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line += 1;

        let record = strip_line_end(&buf);
        if record.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        report.records += 1;

        let outcome = match split_record(record, config) {
            Some((key, value)) => trie
                .insert(key, String::from_utf8_lossy(value).into_owned())
                .map(|(_, inserted)| inserted)
                .map_err(|e| e.to_string()),
            None => Err(format!("missing '{}' delimiter", config.delimiter)),
        };

        match outcome {
            Ok(true) => report.inserted += 1,
            Ok(false) => {
                debug!(line, "duplicate key, keeping first value");
                report.duplicates += 1;
            }
            Err(reason) => {
                let error = LoaderError::InvalidRecord { line, reason };
                if !config.skip_invalid {
                    return Err(error);
                }
                report.skipped += 1;
                report_error(ErrorContext::new(error, "loader").with_details("record skipped"));
            }
        }
    }

    info!(
        records = report.records,
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped,
        "Bulk load finished"
    );
    Ok(report)
}

/// Opens `path` and loads its records into `trie`.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    trie: &mut LanaiTrie<String>,
    config: &LoaderConfig,
) -> LoaderResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loading records");
    load_records(BufReader::new(file), trie, config)
}
