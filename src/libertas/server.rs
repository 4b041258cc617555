//! Libertas(+) server (C8): a thin pass-through over σ. The only
//! Libertas-specific behavior is `delete`, which — like the reference
//! server — is implemented as an `add` of a token the client already
//! stamped with `Op::Del`; σ itself never distinguishes operations.

use crate::error::Result;
use crate::sigma::SigmaServer;

pub struct LibertasServer<S: SigmaServer> {
    sigma: S,
}

impl<S: SigmaServer> LibertasServer<S> {
    pub fn new(sigma: S) -> Self {
        LibertasServer { sigma }
    }

    pub fn build_index(&mut self) {
        self.sigma.build_index();
    }

    pub fn add(&mut self, tok: S::AddToken) -> Result<()> {
        self.sigma.add(tok)
    }

    /// A delete token is an add token carrying an `Op::Del`-stamped
    /// ciphertext; the server stores it exactly like any other entry.
    pub fn delete(&mut self, tok: S::AddToken) -> Result<()> {
        self.sigma.add(tok)
    }

    /// Plain Libertas search: entries survive. Pair with
    /// [`crate::libertas::client::LibertasClient::dec_search`], whose
    /// re-add tokens are then redundant but harmless.
    pub fn search(&mut self, tok: &S::SrchToken) -> Result<Vec<Vec<u8>>> {
        self.sigma.search(tok)
    }

    /// Libertas+ search: matching entries are removed from the index, so
    /// the caller must feed the returned ciphertexts through
    /// [`crate::libertas::client::LibertasClient::dec_search`] and add
    /// every resulting re-add token back through [`LibertasServer::add`].
    pub fn search_plus(&mut self, tok: &S::SrchToken) -> Result<Vec<Vec<u8>>> {
        self.sigma.search_plus(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libertas::client::LibertasClient;
    use crate::params::{LibertasParams, ZnParams};
    use crate::zn::{ZnClient, ZnServer};

    #[test]
    fn search_plus_removes_matches_search_does_not() {
        let mut client = LibertasClient::new(ZnClient::new(ZnParams::default()));
        client.setup(LibertasParams::default()).unwrap();
        let mut server = LibertasServer::new(ZnServer::new());
        server.build_index();

        let tok = client.add_token(1, "cat").unwrap();
        server.add(tok).unwrap();

        let srch = client.srch_token("cat").unwrap();
        let r1 = server.search_plus(&srch).unwrap();
        assert_eq!(r1.len(), 1);
        let r2 = server.search(&srch).unwrap();
        assert!(r2.is_empty());
    }
}
