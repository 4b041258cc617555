//! Zhao–Nishide wildcard-SSE scheme (§4.1–§4.5): the concrete σ
//! implementation this crate ships, built on the masked-Bloom-filter
//! index described in §3.

pub mod client;
pub mod server;

pub use client::{decode_ind, encode_ind, ZnAddToken, ZnClient, ZnSrchToken};
pub use server::ZnServer;

pub use crate::params::ZnParams;
