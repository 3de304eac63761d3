//! Fuzz target for parsing and analysis.
//!
//! Any input that parses must also analyze without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use normalizer::{Normalizer, Parser, SourceMetadata};
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    // Discovery is quadratic in columns
    if data.len() > 16_384 {
        return;
    }

    for delimiter in [b',', b'\t'] {
        let Ok(table) = Parser::new().parse_bytes(data, delimiter) else {
            continue;
        };
        if table.column_count() > 24 {
            continue;
        }
        let source = SourceMetadata::new(
            PathBuf::from("fuzz.csv"),
            String::new(),
            data.len() as u64,
            "csv".to_string(),
            table.row_count(),
            table.column_count(),
        );
        let _ = Normalizer::new().analyze_table(&table, source);
    }
});
