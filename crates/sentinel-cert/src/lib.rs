// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Certificate digest for Sentinel proof packets.
//!
//! A proof packet carries a `cert_hash` that fingerprints the certificate for a
//! property verdict. Until the certificate generator lands, the fingerprint is
//! computed directly over the certificate's two textual inputs:
//!
//! ```text
//! cert_hash = BLAKE3(prop_json ‖ trace_json)
//! ```
//!
//! # Byte Layout Policy
//!
//! The two inputs are concatenated with no separator and no length prefix.
//! `("ab", "c")` and `("a", "bc")` therefore collide. This layout is frozen: the
//! certificate path that will replace this digest hashes the same bytes, and the
//! C ABI in `sentinel-ffi` must produce identical values.
//!
//! # Determinism Invariant
//!
//! [`cert_hash`] touches no global state and never allocates. Identical input
//! bytes yield identical digests on every thread, process, and platform.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

mod hash;
mod json;

pub use hash::{cert_hash, verify_cert_hash, write_cert_hash};
pub use json::cert_hash_json;

use std::str::FromStr;

/// Length in bytes of a certificate digest.
pub const CERT_HASH_LEN: usize = 32;

/// A 32-byte BLAKE3 certificate digest.
///
/// The inner bytes are public for zero-cost access; `Display` renders lowercase
/// hex, which is also the form proof packets carry on the wire.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CertHash(pub [u8; CERT_HASH_LEN]);

impl CertHash {
    /// View the digest as a byte array.
    pub fn as_bytes(&self) -> &[u8; CERT_HASH_LEN] {
        &self.0
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for CertHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for CertHash {
    type Err = CertHashError;

    /// Parses exactly 64 hex characters (either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; CERT_HASH_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<CertHash> for [u8; CERT_HASH_LEN] {
    fn from(hash: CertHash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for CertHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Errors surfaced by the safe digest API.
///
/// The C ABI collapses all of these into a `false` return.
#[derive(Debug, thiserror::Error)]
pub enum CertHashError {
    /// Output buffer handed to [`write_cert_hash`] is not exactly 32 bytes.
    #[error("[CERT_BUFFER_LENGTH] output buffer must be {expected} bytes, got {actual}")]
    BufferLength {
        /// Required length ([`CERT_HASH_LEN`]).
        expected: usize,
        /// Length of the slice actually supplied.
        actual: usize,
    },
    /// Textual digest was not 64 hex characters.
    #[error("[CERT_INVALID_HEX] {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// A structured input could not be serialized to JSON.
    #[error("[CERT_JSON] {0}")]
    Json(#[from] serde_json::Error),
}
