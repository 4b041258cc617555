//! Error taxonomy shared by every fallible operation in the crate.
//!
//! Every public operation returns `Result<T, Error>`. Nothing is recovered
//! internally; the four variants mirror the four failure classes laid out
//! for this scheme: caller-supplied garbage, a broken authentication tag, a
//! call made out of the required setup order, and counter exhaustion.

use thiserror::Error;

/// Errors that can occur while operating the ZN / Libertas(+) schemes.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument violates a documented precondition
    /// (a keyword or query containing reserved bytes, a malformed update
    /// record, ...). No state was changed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// AEAD tag verification failed while decrypting an update record.
    /// Fatal for the call that triggered it.
    #[error("integrity check failed while decrypting an update record")]
    IntegrityFailure,

    /// An operation was attempted before the object it was called on was
    /// brought into a usable state (`setup`/`build_index`).
    #[error("operation requires {0} to run first")]
    StateViolation(&'static str),

    /// A monotonic counter (the Libertas timestamp `t`) could not be
    /// incremented further.
    #[error("counter exhausted")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, Error>;
