//! Update records (§3, §6.2): `(t, op, ind, w)` tuples and their
//! `"t,op_int,ind,w"` text encoding, prior to AEAD sealing.

use std::fmt;

use crate::error::{Error, Result};

/// The two update operations a dynamic SSE scheme tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Del,
}

impl Op {
    fn as_i32(self) -> i32 {
        match self {
            Op::Add => 1,
            Op::Del => 2,
        }
    }

    fn from_i32(n: i32) -> Result<Self> {
        match n {
            1 => Ok(Op::Add),
            2 => Ok(Op::Del),
            other => Err(Error::InvalidInput(format!("unknown op code {other}"))),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// One `(t, op, ind, w)` update record, plaintext before AEAD sealing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub t: u64,
    pub op: Op,
    pub ind: u64,
    pub w: String,
}

impl Update {
    pub fn new(t: u64, op: Op, ind: u64, w: impl Into<String>) -> Result<Self> {
        let w = w.into();
        if w.contains(',') {
            return Err(Error::InvalidInput(
                "keyword must not contain ',' (reserved by the update encoding)".into(),
            ));
        }
        Ok(Update { t, op, ind, w })
    }

    /// `"{t},{op_int},{ind},{w}"`, UTF-8.
    pub fn encode(&self) -> Vec<u8> {
        format!("{},{},{},{}", self.t, self.op, self.ind, self.w).into_bytes()
    }

    /// Inverse of [`Update::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidInput("update record is not valid UTF-8".into()))?;
        let mut parts = text.splitn(4, ',');
        let malformed = || Error::InvalidInput("malformed update record".to_string());

        let t: u64 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let op: i32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let ind: u64 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let w = parts.next().ok_or_else(malformed)?.to_string();

        Ok(Update {
            t,
            op: Op::from_i32(op)?,
            ind,
            w,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let u = Update::new(7, Op::Add, 42, "abc").unwrap();
        let back = Update::decode(&u.encode()).unwrap();
        assert_eq!(u, back);
    }

    #[test]
    fn rejects_keyword_with_comma() {
        assert!(Update::new(1, Op::Add, 1, "a,b").is_err());
    }

    #[test]
    fn op_codes_match_the_wire_format() {
        let u = Update::new(1, Op::Del, 1, "w").unwrap();
        assert_eq!(u.encode(), b"1,2,1,w");
    }
}
