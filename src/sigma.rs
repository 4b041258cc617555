//! σ: the wildcard-SSE capability Libertas is built against (§6.1, §9).
//!
//! Libertas never assumes anything about the underlying wildcard scheme
//! beyond this pair of traits, so a concrete scheme — [`crate::zn`] is the
//! only one shipped here — can be swapped out without touching the
//! Libertas layer. `ind` at this boundary is always an opaque byte
//! string: ZN's own `u64`-identifier convenience API (`zn::client`'s
//! `encode_ind`/`decode_ind`) is a thin layer on top, and Libertas smuggles
//! AEAD ciphertexts through the same slot (design note in SPEC_FULL.md
//! §9).

use crate::error::Result;

/// Client side of a wildcard-supporting SSE scheme.
pub trait SigmaClient {
    /// Opaque add token produced by [`SigmaClient::add_token`] and
    /// consumed by the matching [`SigmaServer::add`].
    type AddToken;
    /// Opaque search token produced by [`SigmaClient::srch_token`] and
    /// consumed by the matching [`SigmaServer::search`] /
    /// [`SigmaServer::search_plus`].
    type SrchToken;

    /// Initializes the client's keys at the given security parameter
    /// (bits).
    fn setup(&mut self, security_parameter: usize) -> Result<()>;

    /// Builds a search token for wildcard query `q`.
    fn srch_token(&self, q: &str) -> Result<Self::SrchToken>;

    /// Builds an add token for the document-identifier/keyword pair
    /// `(ind, w)`. `ind` is an opaque byte string — Libertas uses it to
    /// carry an encrypted update record rather than a plain identifier.
    fn add_token(&mut self, ind: Vec<u8>, w: &str) -> Result<Self::AddToken>;
}

/// Server side of a wildcard-supporting SSE scheme.
pub trait SigmaServer {
    type AddToken;
    type SrchToken;

    /// Initializes an empty index.
    fn build_index(&mut self);

    /// Adds a document-keyword pair, represented by an add token, to the
    /// index.
    fn add(&mut self, tok: Self::AddToken) -> Result<()>;

    /// Searches the index for a query represented by a search token,
    /// returning the opaque `ind` byte strings of every entry whose
    /// Bloom filter predicate holds.
    fn search(&mut self, tok: &Self::SrchToken) -> Result<Vec<Vec<u8>>>;

    /// As [`SigmaServer::search`], but also removes every returned entry
    /// from the index (the Libertas+ clean-up primitive, §4.9). The
    /// client is responsible for re-adding document-keyword pairs that
    /// should remain searchable.
    fn search_plus(&mut self, tok: &Self::SrchToken) -> Result<Vec<Vec<u8>>>;
}
