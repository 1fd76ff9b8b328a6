// Copyright (c) 2025 Lanai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the Lanai Trie.
//! Drives the public API the way the `lanai` binary does: load a record
//! file, answer queries, then edit the trie.

use std::io::Cursor;

use lanai_lib::config::loader::LoaderConfig;
use lanai_lib::config::query::QueryConfig;
use lanai_lib::config::LanaiConfig;
use lanai_lib::data_structures::lanai_trie::{KeyAlphabet, LanaiTrie, LanaiTrieConfig, LanaiTrieError};
use lanai_lib::loader::{load_file, load_records};
use lanai_lib::query::run_query_loop;

const PRODUCTS: &str = "\
ESZ5;E-mini S&P 500;Dec 2025
ESH6;E-mini S&P 500;Mar 2026
NQZ5;E-mini Nasdaq-100;Dec 2025
ES;E-mini S&P 500 root
ESZ5;duplicate entry

malformed line
CL;Crude Oil
";

#[test]
fn test_load_then_query() {
    let config = LanaiConfig::default();
    let mut trie = LanaiTrie::with_config(config.trie.to_trie_config());
    let report = load_records(Cursor::new(PRODUCTS), &mut trie, &config.loader).unwrap();

    assert_eq!(report.records, 7);
    assert_eq!(report.inserted, 5);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped, 1);

    let mut output = Vec::new();
    let stats = run_query_loop(
        &trie,
        Cursor::new("ESZ5\nES\nESZ\nCL\nquit\n"),
        &mut output,
        &config.query,
    )
    .unwrap();

    assert_eq!(stats.queries, 4);
    assert_eq!(stats.hits, 3);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Key: ESZ5 = E-mini S&P 500;Dec 2025\n\
         Key: ES = E-mini S&P 500 root\n\
         Key: Not found\n\
         Key: CL = Crude Oil\n\
         Key: "
    );
}

#[test]
fn test_load_file_and_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.txt");
    std::fs::write(&path, PRODUCTS).unwrap();

    let mut trie = LanaiTrie::new();
    load_file(&path, &mut trie, &LoaderConfig::default()).unwrap();

    let keys: Vec<String> = trie
        .keys()
        .map(|k| String::from_utf8_lossy(k).into_owned())
        .collect();
    assert_eq!(keys, ["CL", "ES", "ESH6", "ESZ5", "NQZ5"]);

    // "ES" sits on the path to the contract keys; removing it keeps them
    assert_eq!(trie.erase("ES"), 1);
    assert!(trie.get("ESZ5").is_some());
    assert!(trie.get("ESH6").is_some());

    let nodes_before = trie.node_count();
    assert_eq!(trie.erase("NQZ5"), 1);
    assert!(trie.node_count() < nodes_before);

    *trie.get_or_insert_default("GC").unwrap() = "Gold".to_string();
    assert_eq!(trie.upsert("CL", "WTI".to_string()).unwrap(), Some("Crude Oil".to_string()));

    let entries: Vec<(String, &str)> = trie
        .iter()
        .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), v.as_str()))
        .collect();
    assert_eq!(
        entries,
        [
            ("CL".to_string(), "WTI"),
            ("ESH6".to_string(), "E-mini S&P 500;Mar 2026"),
            ("ESZ5".to_string(), "E-mini S&P 500;Dec 2025"),
            ("GC".to_string(), "Gold"),
        ]
    );
}

#[test]
fn test_key_validation_errors() {
    let mut trie: LanaiTrie<u8> = LanaiTrie::new();

    assert_eq!(trie.insert("", 0), Err(LanaiTrieError::EmptyKey));
    assert_eq!(
        trie.insert([b'a', 0x80], 0),
        Err(LanaiTrieError::UnsupportedByte {
            byte: 0x80,
            position: 1
        })
    );
    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 1);

    // Lookups of keys that could never be stored simply miss
    assert_eq!(trie.get([0xffu8]), None);
    assert_eq!(trie.count(""), 0);
    assert_eq!(trie.erase("\u{e9}"), 0);

    let mut extended = LanaiTrie::with_config(LanaiTrieConfig::new().with_alphabet(KeyAlphabet::Extended));
    assert!(extended.insert([0x80u8], 1).unwrap().1);
    assert!(extended.insert([0x00u8], 2).unwrap().1);
    assert_eq!(extended.get([0x80u8]), Some(&1));
    assert_eq!(extended.get([0x00u8]), Some(&2));
}

#[test]
fn test_memory_accounting() {
    let mut trie = LanaiTrie::new();
    assert_eq!(trie.memory_usage(), trie.node_size());

    for key in ["test", "testing", "te__ing"] {
        trie.insert(key, ()).unwrap();
    }
    // root, "te" split node and three valued nodes
    assert_eq!(trie.node_count(), 5);
    assert_eq!(trie.memory_usage(), 5 * trie.node_size());

    let wide: LanaiTrie<()> =
        LanaiTrie::with_config(LanaiTrieConfig::new().with_alphabet(KeyAlphabet::Extended));
    assert!(wide.node_size() > trie.node_size());
}

#[test]
fn test_query_loop_with_custom_config() {
    let trie: LanaiTrie<u32> = [("alpha", 1), ("alphabet", 2)].into_iter().collect();
    let config = QueryConfig {
        prompt: String::new(),
        quit_commands: vec![".".to_string()],
    };

    let mut output = Vec::new();
    run_query_loop(&trie, Cursor::new("alphabet\nalph\n.\n"), &mut output, &config).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "alphabet = 2\nNot found\n");
}
