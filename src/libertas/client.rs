//! Libertas(+) client (C7/C9): timestamps every update, encrypts it under
//! a key private to the client, and smuggles the ciphertext through σ's
//! `ind` slot. A search therefore comes back as a batch of ciphertexts
//! that only this client can open and reconcile into live document ids.
//!
//! The reconciliation logic (`dec_search`) is identical whether the
//! paired server is plain Libertas (`LibertasServer::search`, entries
//! survive) or Libertas+ (`LibertasServer::search_plus`, entries are
//! deleted and must be re-added) — the two source schemes differ only in
//! which server-side method the caller invokes, not in how the client
//! reconciles.

use rand::RngCore;

use crate::crypto::aead;
use crate::error::{Error, Result};
use crate::params::LibertasParams;
use crate::sigma::SigmaClient;
use crate::update::{Op, Update};

/// Libertas(+) client, generic over the underlying wildcard-SSE scheme.
pub struct LibertasClient<S: SigmaClient> {
    sigma: S,
    k: Option<Vec<u8>>,
    t: u64,
}

impl<S: SigmaClient> LibertasClient<S> {
    pub fn new(sigma: S) -> Self {
        LibertasClient { sigma, k: None, t: 0 }
    }

    fn require_key(&self) -> Result<&[u8]> {
        self.k
            .as_deref()
            .ok_or(Error::StateViolation("LibertasClient::setup"))
    }

    /// Generates the client's AEAD key and initializes the timestamp
    /// counter, then runs σ's own setup at `params.sigma_security_bits`.
    pub fn setup(&mut self, params: LibertasParams) -> Result<()> {
        if params.lib_security_bits == 0 || params.lib_security_bits % 8 != 0 {
            return Err(Error::InvalidInput(
                "lib_security_bits must be a positive multiple of 8".into(),
            ));
        }
        self.sigma.setup(params.sigma_security_bits)?;

        let mut k = vec![0u8; params.lib_security_bits / 8];
        rand::thread_rng().fill_bytes(&mut k);
        self.k = Some(k);
        self.t = 0;

        tracing::info!(
            lib_security_bits = params.lib_security_bits,
            sigma_security_bits = params.sigma_security_bits,
            "libertas client setup complete"
        );
        Ok(())
    }

    /// Forwards `q` to σ unchanged — queries carry no update metadata.
    pub fn srch_token(&self, q: &str) -> Result<S::SrchToken> {
        self.sigma.srch_token(q)
    }

    /// Stamps and encrypts an `Add` update for `(ind, w)`, then wraps it
    /// in a σ add token (the ciphertext rides in σ's `ind` slot).
    pub fn add_token(&mut self, ind: u64, w: &str) -> Result<S::AddToken> {
        self.tick()?;
        let content = self.encrypt_update(self.t, Op::Add, ind, w)?;
        self.sigma.add_token(content, w)
    }

    /// As [`LibertasClient::add_token`], but stamps a `Del` update.
    pub fn del_token(&mut self, ind: u64, w: &str) -> Result<S::AddToken> {
        self.tick()?;
        let content = self.encrypt_update(self.t, Op::Del, ind, w)?;
        self.sigma.add_token(content, w)
    }

    fn tick(&mut self) -> Result<()> {
        self.t = self.t.checked_add(1).ok_or(Error::OutOfRange)?;
        Ok(())
    }

    /// Decrypts every entry in `r_star` (the raw ciphertexts a search
    /// returned), reconciles adds against deletes per keyword in
    /// timestamp order, and returns the surviving document ids alongside
    /// fresh add tokens that re-insert every surviving `(ind, w)` pair —
    /// required after a `search_plus` round, harmless after a plain one.
    pub fn dec_search(&mut self, r_star: Vec<Vec<u8>>) -> Result<(Vec<u64>, Vec<S::AddToken>)> {
        let mut updates: Vec<Update> = r_star
            .iter()
            .map(|ct| self.decrypt_update(ct))
            .collect::<Result<_>>()?;
        updates.sort_by_key(|u| u.t);

        let mut by_keyword: Vec<(String, Vec<u64>)> = Vec::new();
        for update in updates {
            let docs = match by_keyword.iter_mut().find(|(w, _)| *w == update.w) {
                Some((_, docs)) => docs,
                None => {
                    by_keyword.push((update.w.clone(), Vec::new()));
                    &mut by_keyword.last_mut().unwrap().1
                }
            };
            match update.op {
                Op::Add if !docs.contains(&update.ind) => docs.push(update.ind),
                Op::Del => docs.retain(|&ind| ind != update.ind),
                _ => {}
            }
        }

        let mut re_add_tokens = Vec::new();
        let mut results: Vec<u64> = Vec::new();
        for (w, docs) in &by_keyword {
            for &ind in docs {
                re_add_tokens.push(self.add_token(ind, w)?);
                if !results.contains(&ind) {
                    results.push(ind);
                }
            }
        }

        tracing::debug!(
            n_results = results.len(),
            n_re_add = re_add_tokens.len(),
            "libertas dec_search"
        );
        Ok((results, re_add_tokens))
    }

    fn encrypt_update(&self, t: u64, op: Op, ind: u64, w: &str) -> Result<Vec<u8>> {
        let update = Update::new(t, op, ind, w)?;
        aead::encrypt(self.require_key()?, &update.encode())
    }

    fn decrypt_update(&self, ciphertext: &[u8]) -> Result<Update> {
        let plaintext = aead::decrypt(self.require_key()?, ciphertext)?;
        Update::decode(&plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ZnParams;
    use crate::zn::ZnClient;

    fn client() -> LibertasClient<ZnClient> {
        LibertasClient::new(ZnClient::new(ZnParams::default()))
    }

    #[test]
    fn setup_is_required_before_tokens() {
        let mut c = client();
        assert!(matches!(
            c.add_token(1, "abc"),
            Err(Error::StateViolation(_))
        ));
    }

    #[test]
    fn timestamp_increments_per_token() {
        let mut c = client();
        c.setup(LibertasParams::default()).unwrap();
        c.add_token(1, "abc").unwrap();
        c.add_token(2, "abc").unwrap();
        assert_eq!(c.t, 2);
    }

    #[test]
    fn dec_search_reconciles_add_then_del() {
        let mut c = client();
        c.setup(LibertasParams::default()).unwrap();

        let add = c.add_token(7, "cat").unwrap();
        let del = c.del_token(7, "cat").unwrap();

        let (results, re_add) = c.dec_search(vec![add.ind, del.ind]).unwrap();
        assert!(results.is_empty());
        assert!(re_add.is_empty());
    }

    #[test]
    fn dec_search_keeps_surviving_add() {
        let mut c = client();
        c.setup(LibertasParams::default()).unwrap();

        let add_cat = c.add_token(7, "cat").unwrap();
        let add_dog = c.add_token(8, "dog").unwrap();

        let (mut results, re_add) = c.dec_search(vec![add_cat.ind, add_dog.ind]).unwrap();
        results.sort();
        assert_eq!(results, vec![7, 8]);
        assert_eq!(re_add.len(), 2);
    }
}
