//! ECDSA signatures: deterministic RFC6979 signing, verification, and the
//! DER wire form.
//!
//! `r` and `s` are plain integers reduced modulo the group order N, never
//! coordinate-field elements. Signing always emits the canonical low-s form;
//! verification accepts any `(r, s)` in range.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::{secp256k1, CurvePoint};
use crate::ec::private_key::PrivateKey;
use crate::ec::be_bytes_32;
use crate::hash::sha256_hmac;
use crate::EccError;

/// An ECDSA signature with both components in `[1, N-1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Construct from raw components, rejecting values of 0 or ≥ N.
    pub fn new(r: BigUint, s: BigUint) -> Result<Self, EccError> {
        let n = &secp256k1().n;
        if r.is_zero() || &r >= n {
            return Err(EccError::SignatureOutOfRange(
                "r is zero or exceeds the group order".to_string(),
            ));
        }
        if s.is_zero() || &s >= n {
            return Err(EccError::SignatureOutOfRange(
                "s is zero or exceeds the group order".to_string(),
            ));
        }
        Ok(Signature { r, s })
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Sign a 32-byte message hash with a deterministic RFC6979 nonce.
    ///
    /// The same `(secret, hash)` pair always yields the same signature.
    /// `s` is normalized to the low half of the order.
    pub fn sign(hash: &[u8; 32], private_key: &PrivateKey) -> Result<Self, EccError> {
        let curve = secp256k1();
        let n = &curve.n;
        let secret = private_key.secret();
        let z = BigUint::from_bytes_be(hash) % n;

        let mut nonce = NonceGenerator::new(secret, hash, n);
        loop {
            let k = nonce.next(n);
            let point = curve.generator().mul(&k)?;
            let x = match point.x() {
                Some(x) => x,
                None => {
                    nonce.reseed();
                    continue;
                }
            };
            let r = x.value() % n;
            if r.is_zero() {
                nonce.reseed();
                continue;
            }
            let k_inv = inv_mod(&k, n);
            let s = ((&z + &r * secret) * &k_inv) % n;
            if s.is_zero() {
                nonce.reseed();
                continue;
            }
            let s = if s > curve.half_n() { n - s } else { s };
            return Signature::new(r, s);
        }
    }

    /// Verify this signature over `hash` against a public point. A signature
    /// that does not match is `false`, never an error.
    pub fn verify(&self, hash: &[u8; 32], public_point: &CurvePoint) -> bool {
        let curve = secp256k1();
        let n = &curve.n;
        let z = BigUint::from_bytes_be(hash) % n;
        let w = inv_mod(&self.s, n);
        let u = (&z * &w) % n;
        let v = (&self.r * &w) % n;

        let u_g = match curve.generator().mul(&u) {
            Ok(p) => p,
            Err(_) => return false,
        };
        let v_p = match public_point.mul(&v) {
            Ok(p) => p,
            Err(_) => return false,
        };
        let total = match u_g.add(&v_p) {
            Ok(p) => p,
            Err(_) => return false,
        };
        match total.x() {
            Some(x) => x.value() % n == self.r,
            None => false,
        }
    }

    /// Serialize to DER: a SEQUENCE of two minimal-length INTEGERs, each
    /// padded with 0x00 when its leading content byte has the high bit set.
    pub fn to_der(&self) -> Vec<u8> {
        let rb = der_integer(&self.r);
        let sb = der_integer(&self.s);

        let mut out = Vec::with_capacity(6 + rb.len() + sb.len());
        out.push(0x30);
        out.push((4 + rb.len() + sb.len()) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Parse a DER signature. The outer tag, declared lengths, inner tags,
    /// and total consumed length are all validated exactly; components are
    /// range-checked against the group order.
    pub fn from_der(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.len() < 8 {
            return Err(EccError::MalformedSignature("too short".to_string()));
        }
        if bytes[0] != 0x30 {
            return Err(EccError::MalformedSignature(
                "no sequence marker".to_string(),
            ));
        }
        if bytes[1] as usize + 2 != bytes.len() {
            return Err(EccError::MalformedSignature(
                "declared length does not match input".to_string(),
            ));
        }

        let (r, rest) = der_read_integer(&bytes[2..], "r")?;
        let (s, rest) = der_read_integer(rest, "s")?;
        if !rest.is_empty() {
            return Err(EccError::MalformedSignature(
                "trailing bytes after s".to_string(),
            ));
        }
        Signature::new(r, s)
    }
}

/// Read one DER INTEGER from the front of `data`, returning the value and
/// the remaining bytes.
fn der_read_integer<'a>(data: &'a [u8], which: &str) -> Result<(BigUint, &'a [u8]), EccError> {
    if data.len() < 2 {
        return Err(EccError::MalformedSignature(format!(
            "truncated before {which}"
        )));
    }
    if data[0] != 0x02 {
        return Err(EccError::MalformedSignature(format!(
            "no integer marker for {which}"
        )));
    }
    let len = data[1] as usize;
    if len == 0 || data.len() < 2 + len {
        return Err(EccError::MalformedSignature(format!(
            "bogus length for {which}"
        )));
    }
    let value = BigUint::from_bytes_be(&data[2..2 + len]);
    Ok((value, &data[2 + len..]))
}

/// Minimal-length big-endian content bytes for a DER INTEGER, with the
/// 0x00 pad keeping the value non-negative under DER's signed convention.
fn der_integer(v: &BigUint) -> Vec<u8> {
    let bytes = v.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(bytes.len() + 1);
        out.push(0x00);
        out.extend_from_slice(&bytes);
        out
    } else {
        bytes
    }
}

/// Inverse modulo the (prime) group order, via Fermat.
fn inv_mod(x: &BigUint, n: &BigUint) -> BigUint {
    x.modpow(&(n - 2u32), n)
}

/// RFC6979 HMAC-SHA256 nonce chain. Seeded from the secret and the message
/// hash; each candidate outside `[1, N-1]` triggers one more HMAC round
/// rather than a failure, so derivation always terminates with a valid k
/// and never consumes external randomness.
struct NonceGenerator {
    k: [u8; 32],
    v: [u8; 32],
}

impl NonceGenerator {
    fn new(secret: &BigUint, hash: &[u8; 32], n: &BigUint) -> Self {
        let x = be_bytes_32(secret);
        // bits2octets: the hash interpreted as an integer, brought below N.
        let mut t = BigUint::from_bytes_be(hash);
        if &t >= n {
            t -= n;
        }
        let h1 = be_bytes_32(&t);

        let mut v = [0x01u8; 32];
        let mut k = [0x00u8; 32];
        k = sha256_hmac(&k, &[&v[..], &[0x00], &x, &h1].concat());
        v = sha256_hmac(&k, &v);
        k = sha256_hmac(&k, &[&v[..], &[0x01], &x, &h1].concat());
        v = sha256_hmac(&k, &v);
        NonceGenerator { k, v }
    }

    fn next(&mut self, n: &BigUint) -> BigUint {
        loop {
            self.v = sha256_hmac(&self.k, &self.v);
            let candidate = BigUint::from_bytes_be(&self.v);
            if !candidate.is_zero() && &candidate < n {
                return candidate;
            }
            self.reseed();
        }
    }

    fn reseed(&mut self) {
        self.k = sha256_hmac(&self.k, &[&self.v[..], &[0x00]].concat());
        self.v = sha256_hmac(&self.k, &self.v);
    }
}
