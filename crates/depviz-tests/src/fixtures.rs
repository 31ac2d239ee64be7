//! Fixture graphs and registry payloads shared by the E2E tests

use serde_json::{Value, json};

/// `A→[B,C], B→[D], C→[D], D→[]`
pub const DIAMOND: &str = r#"
A = ["B", "C"]
B = ["D"]
C = ["D"]
D = []
"#;

/// `A→[B], B→[A]`
pub const TWO_CYCLE: &str = r#"
A = ["B"]
B = ["A"]
"#;

/// `A→[B,X], B→[]` with no entry for `X`
pub const MISSING_LEAF: &str = r#"
A = ["B", "X"]
B = []
"#;

/// Two cycles sharing the `A → B` edge
pub const SHARED_CYCLES: &str = r#"
A = ["B"]
B = ["A", "C"]
C = ["A"]
"#;

/// Body of `GET /api/v1/crates/{name}`
pub fn crate_response(name: &str, version: &str) -> Value {
    json!({
        "crate": {
            "id": name,
            "name": name,
            "max_version": version,
            "max_stable_version": version
        }
    })
}

/// Body of `GET /api/v1/crates/{name}/{version}/dependencies`
///
/// Each entry is `(crate_id, kind)`.
pub fn dependencies_response(dependencies: &[(&str, &str)]) -> Value {
    let entries: Vec<Value> = dependencies
        .iter()
        .map(|(crate_id, kind)| {
            json!({
                "crate_id": crate_id,
                "kind": kind,
                "req": "^1",
                "optional": false
            })
        })
        .collect();
    json!({ "dependencies": entries })
}
