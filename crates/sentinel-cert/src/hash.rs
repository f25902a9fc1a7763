// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Byte-level digest over `prop ‖ trace`.

use crate::{CertHash, CertHashError, CERT_HASH_LEN};

/// Compute the certificate digest of `prop` followed by `trace`.
///
/// Both slices are fed to a fresh BLAKE3 hasher in order, with nothing between
/// them. The hasher lives on the stack; nothing is allocated or logged.
pub fn cert_hash(prop: &[u8], trace: &[u8]) -> CertHash {
    CertHash(*hasher_for(prop, trace).finalize().as_bytes())
}

/// Write the certificate digest into a caller-owned buffer.
///
/// `out` must be exactly [`CERT_HASH_LEN`] bytes. On a length mismatch nothing
/// is written and [`CertHashError::BufferLength`] is returned.
pub fn write_cert_hash(prop: &[u8], trace: &[u8], out: &mut [u8]) -> Result<(), CertHashError> {
    let actual = out.len();
    let out: &mut [u8; CERT_HASH_LEN] =
        out.try_into().map_err(|_| CertHashError::BufferLength {
            expected: CERT_HASH_LEN,
            actual,
        })?;
    *out = cert_hash(prop, trace).0;
    Ok(())
}

/// Recompute the digest and compare it against `expected`.
///
/// Comparison goes through [`blake3::Hash`], whose equality is constant-time.
pub fn verify_cert_hash(prop: &[u8], trace: &[u8], expected: &CertHash) -> bool {
    hasher_for(prop, trace).finalize() == blake3::Hash::from(expected.0)
}

fn hasher_for(prop: &[u8], trace: &[u8]) -> blake3::Hasher {
    let mut hasher = blake3::Hasher::new();
    hasher.update(prop);
    hasher.update(trace);
    hasher
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn matches_one_shot_blake3_of_concatenation() {
        let prop = br#"{"id":"overpressure"}"#;
        let trace = br#"[{"ts":1,"P":75.2}]"#;
        let joined = [prop.as_slice(), trace.as_slice()].concat();
        assert_eq!(
            cert_hash(prop, trace).as_bytes(),
            blake3::hash(&joined).as_bytes()
        );
    }

    #[test]
    fn write_fills_exact_buffer() {
        let mut out = [0u8; CERT_HASH_LEN];
        write_cert_hash(b"{}", b"[]", &mut out).unwrap();
        assert_eq!(out, cert_hash(b"{}", b"[]").0);
    }

    #[test]
    fn write_rejects_short_buffer_untouched() {
        let mut out = [0x5au8; 16];
        let err = write_cert_hash(b"{}", b"[]", &mut out).unwrap_err();
        assert!(matches!(
            err,
            CertHashError::BufferLength {
                expected: CERT_HASH_LEN,
                actual: 16
            }
        ));
        assert_eq!(out, [0x5a; 16]);
    }

    #[test]
    fn write_rejects_long_buffer_untouched() {
        let mut out = [0x5au8; 33];
        assert!(write_cert_hash(b"{}", b"[]", &mut out).is_err());
        assert!(out.iter().all(|&b| b == 0x5a));
    }

    #[test]
    fn verify_detects_mismatch() {
        let hash = cert_hash(b"{}", b"[]");
        assert!(verify_cert_hash(b"{}", b"[]", &hash));
        assert!(!verify_cert_hash(b"{}", b"[1]", &hash));
    }
}
