// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Digest over structured inputs, serialized the way the proof engine emits them.

use serde::Serialize;
use tracing::debug;

use crate::{cert_hash, CertHash, CertHashError};

/// Serialize `prop` and `trace` to compact JSON and hash the result.
///
/// Uses `serde_json::to_string`, the same encoding the proof engine uses for
/// `prop_json` and `trace_json`. serde_json escapes control characters, so the
/// encoded text never contains a NUL and hashes identically through the C ABI.
pub fn cert_hash_json<P, T>(prop: &P, trace: &T) -> Result<CertHash, CertHashError>
where
    P: Serialize + ?Sized,
    T: Serialize + ?Sized,
{
    let prop_json = serde_json::to_string(prop)?;
    let trace_json = serde_json::to_string(trace)?;
    debug!(
        prop_len = prop_json.len(),
        trace_len = trace_json.len(),
        "hashing certificate inputs"
    );
    Ok(cert_hash(prop_json.as_bytes(), trace_json.as_bytes()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Sample {
        ts: i64,
        tags: BTreeMap<&'static str, f64>,
    }

    #[test]
    fn empty_object_and_array_match_raw_bytes() {
        let prop = serde_json::json!({});
        let trace: Vec<u8> = Vec::new();
        assert_eq!(
            cert_hash_json(&prop, &trace).unwrap(),
            cert_hash(b"{}", b"[]")
        );
    }

    #[test]
    fn structured_trace_is_compact() {
        let trace = vec![Sample {
            ts: 1,
            tags: BTreeMap::from([("P", 75.2)]),
        }];
        let prop = serde_json::json!({ "id": "overpressure" });
        assert_eq!(
            cert_hash_json(&prop, &trace).unwrap(),
            cert_hash(
                br#"{"id":"overpressure"}"#,
                br#"[{"ts":1,"tags":{"P":75.2}}]"#
            )
        );
    }

    #[test]
    fn embedded_nul_is_escaped() {
        let hash = cert_hash_json("a\0b", "").unwrap();
        assert_eq!(hash, cert_hash(br#""a\u0000b""#, br#""""#));
    }

    #[test]
    fn non_string_map_keys_fail() {
        let prop: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);
        let err = cert_hash_json(&prop, "").unwrap_err();
        assert!(matches!(err, CertHashError::Json(_)));
    }
}
