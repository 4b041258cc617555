//! Libertas / Libertas+ backward-privacy overlay (§4.6–§4.9): wraps any
//! [`crate::sigma`] scheme with encrypted, timestamped update records and
//! client-side reconciliation.

pub mod client;
pub mod server;

pub use client::LibertasClient;
pub use server::LibertasServer;

pub use crate::params::LibertasParams;
