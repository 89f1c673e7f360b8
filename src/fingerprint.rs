// src/fingerprint.rs

//! Weak content fingerprint for change detection.
//!
//! This is deliberately *not* a cryptographic hash. The detection policy in
//! [`crate::track`] assumes collisions happen and compensates with a
//! modification-time check, so a compact 32-bit rolling hash is all we need.

/// Fingerprint the full text content of a file.
///
/// Rolling hash over the UTF-16 code units of `text` (`h = h * 31 + unit`),
/// with all arithmetic wrapping to 32-bit signed. Empty content maps to `0`.
///
/// Stable across calls and platforms for identical input. Distinct inputs may
/// legitimately produce equal fingerprints; callers must not treat an equal
/// fingerprint alone as proof that content is unchanged.
pub fn fingerprint(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        // h * 31 + unit, expressed as (h << 5) - h + unit.
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash
}
