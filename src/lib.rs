//! Lanai Library
//!
//! This library contains the Lanai Trie, a radix trie with direct-indexed
//! child tables tuned for fast exact lookups on short ASCII keys, along
//! with the pieces the `lanai` binary builds on: layered configuration,
//! error reporting, bulk loading of delimited record files and an
//! interactive lookup loop.
//!
//! # Architecture
//!
//! The data structure has no dependency on anything outside
//! [`data_structures`]; configuration, loading and querying sit on top of
//! it and can be used independently.

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod loader;
pub mod query;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::lanai_trie::{LanaiTrie, LanaiTrieConfig};

/// Version information for Lanai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function
pub fn init() -> error::LanaiResult<()> {
    // Set up global error reporter with tracing
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    // Initialize default configuration
    config::init_default_config()?;

    Ok(())
}
