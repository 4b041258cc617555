//! Tunable parameters for the ZN and Libertas(+) schemes (§6.4).
//!
//! Centralizing these in one `serde`-deserializable struct means a
//! deployment can retune the (keyword length, false-positive rate)
//! trade-off, or the key sizes, from a TOML file instead of recompiling.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bloom filter / key-size parameters for one ZN instance.
///
/// The defaults reproduce the reference parameters for keywords of length
/// 7 at a 1% false-positive rate: `m ~= -(n * ln(p)) / ln(2)^2` with `n =
/// 64` (the size of `S_K(w)` for a 7-character keyword) gives `m = 614`,
/// and `k = (m/n) * ln(2)` gives `r = 7` hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZnParams {
    /// Bloom filter bit-array size `m`.
    pub bf_size: usize,
    /// Number of Bloom filter hash functions `r` (equals `|k_h|`).
    pub hash_count: usize,
    /// ZN HMAC key length in bits.
    pub security_bits: usize,
}

impl Default for ZnParams {
    fn default() -> Self {
        ZnParams {
            bf_size: 614,
            hash_count: 7,
            security_bits: 2048,
        }
    }
}

impl ZnParams {
    /// A larger preset for longer keywords (documented alongside `bf_size
    /// = 614` in §6.4).
    pub fn preset_1600() -> Self {
        ZnParams {
            bf_size: 1600,
            ..ZnParams::default()
        }
    }

    /// The largest documented preset.
    pub fn preset_2500() -> Self {
        ZnParams {
            bf_size: 2500,
            hash_count: 5,
            ..ZnParams::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.bf_size == 0 {
            return Err(Error::InvalidInput("bf_size must be non-zero".into()));
        }
        if self.hash_count == 0 {
            return Err(Error::InvalidInput("hash_count must be non-zero".into()));
        }
        if self.security_bits == 0 || self.security_bits % 8 != 0 {
            return Err(Error::InvalidInput(
                "security_bits must be a positive multiple of 8".into(),
            ));
        }
        Ok(())
    }

    /// Parses a `ZnParams` from a TOML document, e.g.:
    ///
    /// ```toml
    /// bf_size = 1600
    /// hash_count = 7
    /// security_bits = 2048
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: ZnParams =
            toml::from_str(s).map_err(|e| Error::InvalidInput(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

/// Security parameters for a Libertas(+) client: the AEAD key size and the
/// key size handed down to the underlying σ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibertasParams {
    /// Libertas AEAD key length in bits (default 256, i.e. AES-256-GCM).
    pub lib_security_bits: usize,
    /// Security parameter forwarded to `SigmaClient::setup`.
    pub sigma_security_bits: usize,
}

impl Default for LibertasParams {
    fn default() -> Self {
        LibertasParams {
            lib_security_bits: 256,
            sigma_security_bits: 2048,
        }
    }
}

impl LibertasParams {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: LibertasParams =
            toml::from_str(s).map_err(|e| Error::InvalidInput(e.to_string()))?;
        if params.lib_security_bits == 0 || params.lib_security_bits % 8 != 0 {
            return Err(Error::InvalidInput(
                "lib_security_bits must be a positive multiple of 8".into(),
            ));
        }
        Ok(params)
    }
}
