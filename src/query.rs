//! Interactive lookup loop.
//!
//! Reads one key per line, answers with `<key> = <value>` or `Not found`,
//! and stops at end of input or on a quit command.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::config::query::QueryConfig;
use crate::data_structures::lanai_trie::LanaiTrie;

/// Counters for one query session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    /// Lookups performed
    pub queries: usize,
    /// Lookups that found a value
    pub hits: usize,
}

/// Answers a single query, writing the result line to `output`.
///
/// Returns whether the key was found.
pub fn answer<T: Display, W: Write>(
    trie: &LanaiTrie<T>,
    query: &str,
    output: &mut W,
) -> io::Result<bool> {
    match trie.find(query) {
        Some((key, value)) => {
            writeln!(output, "{} = {}", String::from_utf8_lossy(key), value)?;
            Ok(true)
        }
        None => {
            writeln!(output, "Not found")?;
            Ok(false)
        }
    }
}

/// Runs the prompt/lookup loop until EOF or a quit command.
pub fn run_query_loop<T, R, W>(
    trie: &LanaiTrie<T>,
    mut input: R,
    mut output: W,
    config: &QueryConfig,
) -> io::Result<QueryStats>
where
    T: Display,
    R: BufRead,
    W: Write,
{
    let mut stats = QueryStats::default();
    let mut line = String::new();

    loop {
        write!(output, "{}", config.prompt)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // Keep the terminal tidy when input ends mid-prompt
            writeln!(output)?;
            break;
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if config.quit_commands.iter().any(|cmd| cmd == query) {
            break;
        }

        stats.queries += 1;
        if answer(trie, query, &mut output)? {
            stats.hits += 1;
        }
    }

    output.flush()?;
    debug!(queries = stats.queries, hits = stats.hits, "Query loop finished");
    Ok(stats)
}
