//! Benchmark suite for card number checksum work
//!
//! Measures check digit computation, validation, and full card issuance
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use simple_banking::core::account_manager::issue_account;
use simple_banking::core::checksum::{compute_check_digit, derive_card_number, validate};
use simple_banking::core::identity::generate_unique_id;
use std::collections::HashSet;

fn main() {
    divan::main();
}

/// Check digit of a 15-digit partial card number
#[divan::bench]
fn check_digit() -> u8 {
    compute_check_digit(divan::black_box("400000844943340")).expect("valid digits")
}

/// Validation of a full 16-digit card number
#[divan::bench]
fn validate_card_number() -> bool {
    validate(divan::black_box("4000008449433403")).expect("valid digits")
}

/// Card number derivation from an account id
#[divan::bench]
fn derive_number() -> String {
    derive_card_number(divan::black_box("844943340")).expect("valid id")
}

/// Id generation against stores of increasing size
#[divan::bench(args = [0, 1_000, 100_000])]
fn unique_id(bencher: divan::Bencher, existing: usize) {
    let ids: HashSet<String> = (0..existing).map(|n| format!("{:09}", n)).collect();
    bencher.bench(|| generate_unique_id(divan::black_box(&ids)));
}

/// Issuing a complete account for a chosen id and PIN
#[divan::bench]
fn issue() {
    divan::black_box(issue_account("844943340".to_string(), "1234".to_string()).expect("valid id"));
}
