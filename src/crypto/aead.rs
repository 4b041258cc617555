//! Update codec (C6): AES-256-GCM encryption of `(t, op, ind, w)` records.
//!
//! Ciphertexts are encoded on the wire as `nonce || ciphertext+tag`, a
//! fresh 96-bit nonce drawn from an OS-backed CSPRNG for every call to
//! [`encrypt`]. Never reuse a `k_L` across independently-generated nonces
//! from something other than `rand`'s OS-backed generator; AES-GCM's
//! security collapses under nonce reuse.

use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, OsRng},
    Aes256Gcm, KeyInit, Nonce,
};
use rand::RngCore;

use crate::error::{Error, Result};

const NONCE_LEN: usize = 12;

/// Encrypts `plaintext` under `key` (expected to be 32 bytes, i.e. 256
/// bits), returning `nonce || ciphertext+tag`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| Error::InvalidInput(format!("invalid AEAD key: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    // OsRng is the CSPRNG the aes-gcm crate itself re-exports; using it
    // (rather than a non-cryptographic RNG) keeps nonce generation
    // collision-resistant across the lifetime of one key.
    let mut rng = OsRng;
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| Error::InvalidInput("AEAD encryption failed".into()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypts a blob produced by [`encrypt`]. A tag mismatch is reported as
/// [`Error::IntegrityFailure`], matching §7's "fatal for that call" rule.
pub fn decrypt(key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return Err(Error::InvalidInput(
            "ciphertext shorter than the nonce prefix".into(),
        ));
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| Error::InvalidInput(format!("invalid AEAD key: {e}")))?;
    let nonce: &GenericArray<_, _> = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| Error::IntegrityFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<u8> {
        vec![0x11u8; 32]
    }

    #[test]
    fn round_trips() {
        let ct = encrypt(&key(), b"hello update record").unwrap();
        let pt = decrypt(&key(), &ct).unwrap();
        assert_eq!(pt, b"hello update record");
    }

    #[test]
    fn nonces_differ_across_calls() {
        let a = encrypt(&key(), b"same plaintext").unwrap();
        let b = encrypt(&key(), b"same plaintext").unwrap();
        assert_ne!(a, b, "each call must draw a fresh nonce");
    }

    #[test]
    fn tamper_is_rejected() {
        let mut ct = encrypt(&key(), b"hello").unwrap();
        let last = ct.len() - 1;
        ct[last] ^= 0xff;
        let err = decrypt(&key(), &ct).unwrap_err();
        assert!(matches!(err, Error::IntegrityFailure));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let ct = encrypt(&key(), b"hello").unwrap();
        let err = decrypt(&[0x22u8; 32], &ct).unwrap_err();
        assert!(matches!(err, Error::IntegrityFailure));
    }
}
