//! ZN server (C5): an in-memory, append-only list of masked Bloom filter
//! entries, scanned against a search token.

use rayon::prelude::*;

use crate::crypto::keyed_hash::{h, lsb};
use crate::error::{Error, Result};
use crate::sigma::SigmaServer;
use crate::zn::client::{ZnAddToken, ZnSrchToken};

/// Zhao–Nishide server: holds the index and answers searches against it.
/// ZN itself is add-only (§4.5's docstring: "Delete operations are not
/// implemented as they are not required for Libertas"); Libertas(+)
/// supplies deletion semantics on top via encrypted DEL records.
pub struct ZnServer {
    index: Option<Vec<ZnAddToken>>,
}

impl ZnServer {
    pub fn new() -> Self {
        ZnServer { index: None }
    }

    fn require_index(&self) -> Result<&Vec<ZnAddToken>> {
        self.index
            .as_ref()
            .ok_or(Error::StateViolation("ZnServer::build_index"))
    }

    /// `true` iff `entry` satisfies the search predicate for `tok`: for
    /// every aligned `(position, hashed_position)` pair, the masked bit at
    /// `position` XORed with `lsb(H(entry.b_id, hashed_position))` is `1`.
    /// Vacuously true when `tok` carries no positions (the empty query,
    /// `"_"`, and `"*"` all reduce to this case).
    fn matches(entry: &ZnAddToken, tok: &ZnSrchToken) -> bool {
        tok.positions
            .iter()
            .zip(tok.hashed_positions.iter())
            .all(|(&pos, hashed_pos)| {
                let mask = lsb(&h(&entry.b_id, hashed_pos));
                entry.bf.get(pos) ^ mask
            })
    }
}

impl Default for ZnServer {
    fn default() -> Self {
        Self::new()
    }
}

impl SigmaServer for ZnServer {
    type AddToken = ZnAddToken;
    type SrchToken = ZnSrchToken;

    fn build_index(&mut self) {
        self.index = Some(Vec::new());
        tracing::info!("zn server index initialized");
    }

    fn add(&mut self, tok: ZnAddToken) -> Result<()> {
        let index = self
            .index
            .as_mut()
            .ok_or(Error::StateViolation("ZnServer::build_index"))?;
        index.push(tok);
        Ok(())
    }

    /// Scans the index with `rayon` when it's large enough to be worth
    /// the overhead, then restores insertion order and deduplicates by
    /// `ind` (first match wins), as §4.5 requires.
    fn search(&mut self, tok: &ZnSrchToken) -> Result<Vec<Vec<u8>>> {
        let index = self.require_index()?;

        const PARALLEL_THRESHOLD: usize = 256;
        let mut matched: Vec<(usize, &[u8])> = if index.len() >= PARALLEL_THRESHOLD {
            index
                .par_iter()
                .enumerate()
                .filter(|(_, entry)| Self::matches(entry, tok))
                .map(|(i, entry)| (i, entry.ind.as_slice()))
                .collect()
        } else {
            index
                .iter()
                .enumerate()
                .filter(|(_, entry)| Self::matches(entry, tok))
                .map(|(i, entry)| (i, entry.ind.as_slice()))
                .collect()
        };
        matched.sort_by_key(|(i, _)| *i);

        let mut results = Vec::new();
        for (_, ind) in matched {
            if !results.iter().any(|r: &Vec<u8>| r.as_slice() == ind) {
                results.push(ind.to_vec());
            }
        }
        tracing::debug!(n_matched = results.len(), "zn search");
        Ok(results)
    }

    /// As [`SigmaServer::search`], but removes every matching entry from
    /// the index (Libertas+'s clean-up primitive).
    fn search_plus(&mut self, tok: &ZnSrchToken) -> Result<Vec<Vec<u8>>> {
        let index = self
            .index
            .as_mut()
            .ok_or(Error::StateViolation("ZnServer::build_index"))?;

        let mut results: Vec<Vec<u8>> = Vec::new();
        let mut keep = Vec::with_capacity(index.len());
        for entry in index.drain(..) {
            if Self::matches(&entry, tok) {
                if !results.iter().any(|r| r.as_slice() == entry.ind.as_slice()) {
                    results.push(entry.ind.clone());
                }
            } else {
                keep.push(entry);
            }
        }
        *index = keep;

        tracing::debug!(
            n_matched = results.len(),
            n_remaining = index.len(),
            "zn search_plus (clean-up)"
        );
        Ok(results)
    }
}
