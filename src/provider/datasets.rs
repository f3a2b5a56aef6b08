//! Built-in read-only datasets
//!
//! Small, fully deterministic row sets used by the CLI and by conformance
//! tests, so pagination can be exercised without a backing store.

use serde_json::{json, Value};

/// Names of the built-in datasets
pub const BUILTIN_DATASETS: &[&str] = &["positive-integers", "ascii-characters"];

/// Get a built-in dataset by name
pub fn get_builtin(name: &str) -> Option<Vec<Value>> {
    match name {
        "positive-integers" => Some(positive_integers()),
        "ascii-characters" => Some(ascii_characters()),
        _ => None,
    }
}

/// Check if a name refers to a built-in dataset
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_DATASETS.contains(&name)
}

/// List all built-in dataset names
pub fn list_builtin() -> Vec<&'static str> {
    BUILTIN_DATASETS.to_vec()
}

/// The integers 1 through 100 with a few derived properties
pub fn positive_integers() -> Vec<Value> {
    (1u64..=100)
        .map(|id| {
            json!({
                "id": id,
                "isOdd": id % 2 == 1,
                "floorOfSquareRoot": floor_sqrt(id),
                "numBitsRequired": u64::BITS - id.leading_zeros(),
                "numType": number_type(id),
            })
        })
        .collect()
}

fn number_type(n: u64) -> &'static str {
    if n == 1 {
        "ONE"
    } else if (2..=floor_sqrt(n)).all(|d| n % d != 0) {
        "PRIME"
    } else {
        "COMPOSITE"
    }
}

fn floor_sqrt(n: u64) -> u64 {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// The 128 ASCII characters
pub fn ascii_characters() -> Vec<Value> {
    (0u8..=127)
        .map(|code| {
            let ch = char::from(code);
            json!({
                "id": code,
                "numericValue": code,
                "hexadecimal": format!("{code:02x}"),
                "thisCharacter": ch.to_string(),
                "isControl": ch.is_ascii_control(),
            })
        })
        .collect()
}
