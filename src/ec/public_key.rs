//! secp256k1 public keys with SEC1 serialization.
//!
//! Compressed form is a parity prefix (0x02 even y, 0x03 odd y) plus the
//! 32-byte x coordinate; uncompressed is 0x04 plus both coordinates.
//! Parsing a compressed key recovers y by taking the square root of
//! `x³ + 7` and picking the root whose parity matches the prefix.

use std::fmt;

use num_bigint::BigUint;

use crate::curve::{secp256k1, CurvePoint};
use crate::ec::{be_bytes_32, Signature};
use crate::field::FieldElement;
use crate::EccError;

const COMPRESSED_LEN: usize = 33;
const UNCOMPRESSED_LEN: usize = 65;

/// A point on secp256k1 usable for signature verification.
///
/// Always an affine point; the identity is never a valid public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    /// Parse SEC1 bytes, compressed (33) or uncompressed (65).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        let curve = secp256k1();
        match bytes.first().copied() {
            Some(0x04) => {
                if bytes.len() != UNCOMPRESSED_LEN {
                    return Err(EccError::MalformedKeyEncoding(format!(
                        "uncompressed key must be {UNCOMPRESSED_LEN} bytes, got {}",
                        bytes.len()
                    )));
                }
                let x = BigUint::from_bytes_be(&bytes[1..33]);
                let y = BigUint::from_bytes_be(&bytes[33..65]);
                let point = curve.point(x, y)?;
                Ok(PublicKey { point })
            }
            Some(prefix @ (0x02 | 0x03)) => {
                if bytes.len() != COMPRESSED_LEN {
                    return Err(EccError::MalformedKeyEncoding(format!(
                        "compressed key must be {COMPRESSED_LEN} bytes, got {}",
                        bytes.len()
                    )));
                }
                let x = BigUint::from_bytes_be(&bytes[1..33]);
                let point = curve.lift_x(&x, prefix == 0x03)?;
                Ok(PublicKey { point })
            }
            Some(prefix) => Err(EccError::MalformedKeyEncoding(format!(
                "unknown SEC prefix byte {prefix:#04x}"
            ))),
            None => Err(EccError::MalformedKeyEncoding("empty input".to_string())),
        }
    }

    /// Parse a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already-computed curve point.
    pub fn from_point(point: CurvePoint) -> Result<Self, EccError> {
        if point.is_infinity() {
            return Err(EccError::InvalidPublicKey(
                "the point at infinity is not a public key".to_string(),
            ));
        }
        Ok(PublicKey { point })
    }

    fn coords(&self) -> (&FieldElement, &FieldElement) {
        match (self.point.x(), self.point.y()) {
            (Some(x), Some(y)) => (x, y),
            // from_point and from_bytes never admit the identity.
            _ => unreachable!("public key point is always affine"),
        }
    }

    /// Compressed SEC1 serialization: parity prefix + x.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let (x, y) = self.coords();
        let mut out = [0u8; COMPRESSED_LEN];
        out[0] = if y.is_even() { 0x02 } else { 0x03 };
        out[1..].copy_from_slice(&be_bytes_32(x.value()));
        out
    }

    /// Uncompressed SEC1 serialization: 0x04 + x + y.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let (x, y) = self.coords();
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&be_bytes_32(x.value()));
        out[33..].copy_from_slice(&be_bytes_32(y.value()));
        out
    }

    /// Compressed serialization as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Verify an ECDSA signature over a 32-byte message hash.
    pub fn verify(&self, hash: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(hash, &self.point)
    }

    pub fn point(&self) -> &CurvePoint {
        &self.point
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
