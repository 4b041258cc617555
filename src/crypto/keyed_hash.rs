//! Keyed hash primitive (C2): HMAC-SHA-256 over strings, integers and bytes.

use hmac::{Hmac, Mac};
use num_bigint::BigUint;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// `H(k, bytes) -> 32-byte digest`, i.e. HMAC-SHA-256.
pub fn h(k: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(k).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// `H` specialized to a UTF-8 string input.
pub fn h_str(k: &[u8], s: &str) -> [u8; 32] {
    h(k, s.as_bytes())
}

/// `H` specialized to a decimal-ASCII integer input, i.e. `H(k, str(n))`.
pub fn h_int(k: &[u8], n: u64) -> [u8; 32] {
    h_str(k, &n.to_string())
}

/// `H_int(k, s) = int.from_bytes(H(k, s), "big")`, projecting a digest to
/// an unbounded non-negative integer so that reduction `mod m` is defined
/// the same way regardless of how large `m` grows.
pub fn h_int_big(k: &[u8], data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&h(k, data))
}

/// `H_int(k, s) mod m`, reduced to a bit-array position.
pub fn h_mod(k: &[u8], data: &[u8], m: usize) -> usize {
    let reduced = h_int_big(k, data) % BigUint::from(m as u64);
    // `reduced < m` and `m` fits in a `usize` by construction, so this
    // cannot truncate.
    reduced.to_u64_digits().first().copied().unwrap_or(0) as usize
}

/// The least-significant bit of a digest, used throughout the ZN masking
/// scheme (`lsb(HMAC(...))`).
pub fn lsb(digest: &[u8; 32]) -> bool {
    digest[0] & 1 == 1
}

/// Hex-encodes a keyed-hash digest for logging or test fixtures. The
/// digest alone never reveals the keyword or key it was derived from, so
/// this is safe to print where the inputs to [`h`] are not.
pub fn h_hex(k: &[u8], data: &[u8]) -> String {
    hex::encode(h(k, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_is_deterministic() {
        let k = b"key".to_vec();
        assert_eq!(h(&k, b"data"), h(&k, b"data"));
    }

    #[test]
    fn h_is_sensitive_to_key_and_data() {
        let a = h(b"key-a", b"data");
        let b = h(b"key-b", b"data");
        let c = h(b"key-a", b"other");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn h_hex_matches_h() {
        let k = b"key".to_vec();
        assert_eq!(h_hex(&k, b"data"), hex::encode(h(&k, b"data")));
        assert_eq!(h_hex(&k, b"data").len(), 64);
    }

    #[test]
    fn h_mod_stays_in_range() {
        let k = b"key".to_vec();
        for i in 0..50u64 {
            let pos = h_mod(&k, i.to_string().as_bytes(), 614);
            assert!(pos < 614);
        }
    }
}
