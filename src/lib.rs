//! Dynamic searchable symmetric encryption with wildcard queries and
//! backward privacy.
//!
//! [`zn`] implements Zhao–Nishide (ZN), a wildcard-supporting SSE scheme
//! built on masked Bloom filters. [`libertas`] layers Update Pattern
//! Revealing backward privacy on top of any [`sigma`]-shaped scheme by
//! encrypting update records and reconciling them client-side; its `+`
//! variant additionally cleans up the server's index on every search.
//!
//! ```
//! use libertas_dsse::libertas::{LibertasClient, LibertasServer};
//! use libertas_dsse::params::{LibertasParams, ZnParams};
//! use libertas_dsse::zn::{ZnClient, ZnServer};
//!
//! let mut client = LibertasClient::new(ZnClient::new(ZnParams::default()));
//! client.setup(LibertasParams::default()).unwrap();
//! let mut server = LibertasServer::new(ZnServer::new());
//! server.build_index();
//!
//! let tok = client.add_token(1, "cat").unwrap();
//! server.add(tok).unwrap();
//!
//! let srch = client.srch_token("c_t").unwrap();
//! let r_star = server.search_plus(&srch).unwrap();
//! let (results, re_add) = client.dec_search(r_star).unwrap();
//! assert_eq!(results, vec![1]);
//! for tok in re_add {
//!     server.add(tok).unwrap();
//! }
//! ```

pub mod bloom;
pub mod crypto;
pub mod error;
pub mod features;
pub mod libertas;
pub mod params;
pub mod sigma;
pub mod update;
pub mod zn;

pub use error::{Error, Result};
