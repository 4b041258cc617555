//! ZN client (C4): key generation, add-token and search-token derivation.

use rand::RngCore;

use crate::bloom::BitArray;
use crate::crypto::keyed_hash::{h, h_int, h_mod, lsb};
use crate::error::{Error, Result};
use crate::features;
use crate::params::ZnParams;
use crate::sigma::SigmaClient;

/// Encodes a plain `u64` document identifier the same way the reference
/// scheme's `str(ind)` does for integers — decimal ASCII — so that direct
/// (non-Libertas) callers can use small integer ids while still going
/// through the opaque-bytes σ boundary (§9).
pub fn encode_ind(ind: u64) -> Vec<u8> {
    ind.to_string().into_bytes()
}

/// Inverse of [`encode_ind`].
pub fn decode_ind(bytes: &[u8]) -> Option<u64> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

struct ZnKeys {
    k_h: Vec<Vec<u8>>,
    k_g: Vec<u8>,
}

/// Add token: `(ind, BF_masked, b_id)` from §3/§4.4.
#[derive(Debug, Clone)]
pub struct ZnAddToken {
    pub ind: Vec<u8>,
    pub bf: BitArray,
    pub b_id: [u8; 32],
}

/// Search token: aligned `(positions, hashed_positions)` arrays from
/// §4.4. Empty when the query has no features (matches everything — see
/// [`crate::zn::server`]).
#[derive(Debug, Clone, Default)]
pub struct ZnSrchToken {
    pub positions: Vec<usize>,
    pub hashed_positions: Vec<[u8; 32]>,
}

/// Zhao–Nishide client: derives add/search tokens over a per-keyword
/// masked Bloom filter index (§4.4). Holds no index itself — that lives
/// server-side in [`crate::zn::server::ZnServer`].
pub struct ZnClient {
    keys: Option<ZnKeys>,
    params: ZnParams,
}

impl ZnClient {
    pub fn new(params: ZnParams) -> Self {
        ZnClient { keys: None, params }
    }

    fn require_keys(&self) -> Result<&ZnKeys> {
        self.keys
            .as_ref()
            .ok_or(Error::StateViolation("ZnClient::setup"))
    }
}

impl SigmaClient for ZnClient {
    type AddToken = ZnAddToken;
    type SrchToken = ZnSrchToken;

    /// Samples `r = params.hash_count` independent `k_h` keys and one
    /// `k_g` key, each `security_parameter / 8` bytes, from an OS CSPRNG.
    fn setup(&mut self, security_parameter: usize) -> Result<()> {
        if security_parameter == 0 || security_parameter % 8 != 0 {
            return Err(Error::InvalidInput(
                "security_parameter must be a positive multiple of 8".into(),
            ));
        }
        let key_len = security_parameter / 8;
        let mut rng = rand::thread_rng();

        let mut gen_key = |len: usize| {
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            buf
        };

        let k_h = (0..self.params.hash_count).map(|_| gen_key(key_len)).collect();
        let k_g = gen_key(key_len);
        self.keys = Some(ZnKeys { k_h, k_g });

        tracing::info!(
            security_parameter,
            hash_count = self.params.hash_count,
            bf_size = self.params.bf_size,
            "zn client setup complete"
        );
        Ok(())
    }

    /// Builds `(positions, hashed_positions)` for query `q` (§4.4). An
    /// empty `S_T(q)` (e.g. `q` is `""`, `"_"`, or `"*"`) yields empty
    /// arrays, which the server treats as a match-everything predicate.
    fn srch_token(&self, q: &str) -> Result<ZnSrchToken> {
        let keys = self.require_keys()?;
        let s_t = features::s_t(q);

        let mut positions = Vec::with_capacity(s_t.len() * keys.k_h.len());
        for e in &s_t {
            for k in &keys.k_h {
                positions.push(h_mod(k, e.as_bytes(), self.params.bf_size));
            }
        }
        let hashed_positions = positions
            .iter()
            .map(|&p| h_int(&keys.k_g, p as u64))
            .collect();

        tracing::debug!(
            n_features = s_t.len(),
            n_positions = positions.len(),
            "zn srch_token"
        );
        Ok(ZnSrchToken {
            positions,
            hashed_positions,
        })
    }

    /// Builds `(ind, BF_masked, b_id)` for the document-keyword pair
    /// `(ind, w)` (§4.4):
    /// 1. Fill a fresh `m`-bit array at every position `S_K(w)` hashes to
    ///    under each `k_h^j`.
    /// 2. Derive `b_id = H(k_g, ind || w)`.
    /// 3. XOR-mask every bit `p` with `lsb(H(b_id, H(k_g, str(p))))`.
    fn add_token(&mut self, ind: Vec<u8>, w: &str) -> Result<ZnAddToken> {
        let keys = self.require_keys()?;
        if w.is_empty() {
            return Err(Error::InvalidInput("keyword must be non-empty".into()));
        }
        if w.contains(',') {
            return Err(Error::InvalidInput(
                "keyword must not contain ',' (reserved by the update encoding)".into(),
            ));
        }

        let s_k = features::s_k(w);
        let mut bf = BitArray::new(self.params.bf_size);
        for e in &s_k {
            for k in &keys.k_h {
                let pos = h_mod(k, e.as_bytes(), self.params.bf_size);
                bf.set(pos);
            }
        }

        let mut b_id_input = ind.clone();
        b_id_input.extend_from_slice(w.as_bytes());
        let b_id = h(&keys.k_g, &b_id_input);

        for p in 0..self.params.bf_size {
            let hashed_pos = h_int(&keys.k_g, p as u64);
            let mask = lsb(&h(&b_id, &hashed_pos));
            bf.xor_mask_at(p, mask);
        }

        tracing::debug!(n_features = s_k.len(), "zn add_token");
        Ok(ZnAddToken { ind, bf, b_id })
    }
}
