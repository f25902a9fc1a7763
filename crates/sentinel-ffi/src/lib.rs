// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! C-compatible binding for the Sentinel certificate digest.
//!
//! Host runtimes (the Lean monitor, Python via ctypes, etc.) resolve
//! [`sentinel_cert_hash`] by name from the shared library and get back the same
//! digest `sentinel_cert::cert_hash` computes in-process.
#![deny(missing_docs)]
#![allow(unsafe_code)]

use std::ffi::CStr;
use std::os::raw::c_char;

use sentinel_cert::{cert_hash, CERT_HASH_LEN};

/// Size of the output buffer `sentinel_cert_hash` writes into.
pub const SENTINEL_CERT_HASH_LEN: usize = CERT_HASH_LEN;

/// Computes `BLAKE3(prop_json ‖ trace_json)` into `out32`.
///
/// Returns `false` without touching `out32` if any pointer is null. There is no
/// other failure mode: the bytes are hashed as-is, without UTF-8 validation.
///
/// # Safety
/// `prop_json` and `trace_json` must be null or point to NUL-terminated byte
/// strings that stay valid for the duration of the call. `out32` must be null
/// or point to at least 32 writable bytes not aliased by either input.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sentinel_cert_hash(
    prop_json: *const c_char,
    trace_json: *const c_char,
    out32: *mut u8,
) -> bool {
    if prop_json.is_null() || trace_json.is_null() || out32.is_null() {
        return false;
    }
    let prop = unsafe { CStr::from_ptr(prop_json) };
    let trace = unsafe { CStr::from_ptr(trace_json) };
    let hash = cert_hash(prop.to_bytes(), trace.to_bytes());
    unsafe {
        out32
            .cast::<[u8; SENTINEL_CERT_HASH_LEN]>()
            .write_unaligned(hash.0);
    }
    true
}
