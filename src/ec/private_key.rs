//! secp256k1 private keys with WIF serialization.
//!
//! A private key is a secret scalar in `[1, N-1]` together with its derived
//! public point. WIF (Wallet Import Format) is the Base58Check transport:
//! a network prefix byte, the 32-byte big-endian secret, and an optional
//! trailing 0x01 marking that the public key serializes compressed.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::base58;
use crate::curve::secp256k1;
use crate::ec::{be_bytes_32, PublicKey, Signature};
use crate::EccError;

/// Mainnet WIF prefix byte.
const MAINNET_PREFIX: u8 = 0x80;

/// Testnet WIF prefix byte.
const TESTNET_PREFIX: u8 = 0xef;

/// Compression marker appended to WIF payloads for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key for deterministic ECDSA signing.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    secret: BigUint,
    public: PublicKey,
}

impl PrivateKey {
    /// Generate a random private key from the OS random number generator.
    pub fn new() -> Self {
        let mut buf = [0u8; 32];
        loop {
            OsRng.fill_bytes(&mut buf);
            if let Ok(key) = Self::from_bytes(&buf) {
                buf.zeroize();
                return key;
            }
        }
    }

    /// Create a private key from a 32-byte big-endian secret.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.len() != 32 {
            return Err(EccError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let curve = secp256k1();
        let secret = BigUint::from_bytes_be(bytes);
        if secret.is_zero() || secret >= curve.n {
            return Err(EccError::InvalidPrivateKey(
                "secret is zero or not below the group order".to_string(),
            ));
        }
        let point = curve.generator().mul(&secret)?;
        let public = PublicKey::from_point(point)?;
        Ok(PrivateKey { secret, public })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        if hex_str.is_empty() {
            return Err(EccError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string. Accepts mainnet and testnet prefixes, with or
    /// without the compression marker; the Base58Check checksum is verified.
    pub fn from_wif(wif: &str) -> Result<Self, EccError> {
        let payload = base58::check_decode(wif)?;
        // prefix + secret, or prefix + secret + compression marker
        match payload.len() {
            33 => {}
            34 => {
                if payload[33] != COMPRESS_MAGIC {
                    return Err(EccError::InvalidWif(
                        "invalid compression marker".to_string(),
                    ));
                }
            }
            other => {
                return Err(EccError::InvalidWif(format!(
                    "invalid payload length {other}"
                )));
            }
        }
        if payload[0] != MAINNET_PREFIX && payload[0] != TESTNET_PREFIX {
            return Err(EccError::InvalidWif(format!(
                "unknown network prefix {:#04x}",
                payload[0]
            )));
        }
        Self::from_bytes(&payload[1..33])
    }

    /// Encode as WIF: prefix byte, 32-byte secret, optional compression
    /// marker, Base58Check.
    pub fn to_wif(&self, compressed: bool, testnet: bool) -> String {
        let prefix = if testnet {
            TESTNET_PREFIX
        } else {
            MAINNET_PREFIX
        };
        let mut payload = Vec::with_capacity(34);
        payload.push(prefix);
        payload.extend_from_slice(&self.to_bytes());
        if compressed {
            payload.push(COMPRESS_MAGIC);
        }
        let encoded = base58::check_encode(&payload);
        payload.zeroize();
        encoded
    }

    /// The secret as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        be_bytes_32(&self.secret)
    }

    /// The secret as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Sign a 32-byte message hash with an RFC6979 deterministic nonce.
    pub fn sign(&self, hash: &[u8; 32]) -> Result<Signature, EccError> {
        Signature::sign(hash, self)
    }

    /// The derived public key.
    pub fn pub_key(&self) -> &PublicKey {
        &self.public
    }

    pub(crate) fn secret(&self) -> &BigUint {
        &self.secret
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        // Scrub the serialized form; the bignum limbs are freed with it.
        let mut bytes = self.to_bytes();
        bytes.zeroize();
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wif_known_vectors() {
        let one =
            PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001")
                .unwrap();
        assert_eq!(
            one.to_wif(false, false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
        assert_eq!(
            one.to_wif(true, false),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );

        // secret 5003, compressed, testnet
        let key =
            PrivateKey::from_hex("000000000000000000000000000000000000000000000000000000000000138b")
                .unwrap();
        assert_eq!(
            key.to_wif(true, true),
            "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN8rFTv2sfUK"
        );

        // secret 0x54321deadbeef, uncompressed, testnet
        let key =
            PrivateKey::from_hex("00000000000000000000000000000000000000000000000000054321deadbeef")
                .unwrap();
        assert_eq!(
            key.to_wif(false, true),
            "91avARGdfge8E4tZfYLoxeJ5sGBdNJQH4kvjL75whMhMoRTaANa"
        );
    }

    #[test]
    fn wif_roundtrip_all_forms() {
        let key =
            PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000001389")
                .unwrap();
        for (compressed, testnet) in [(false, false), (true, false), (false, true), (true, true)] {
            let wif = key.to_wif(compressed, testnet);
            let decoded = PrivateKey::from_wif(&wif).unwrap();
            assert_eq!(decoded, key);
        }
    }

    #[test]
    fn bytes_and_hex_roundtrip() {
        let key = PrivateKey::new();
        assert_eq!(PrivateKey::from_bytes(&key.to_bytes()).unwrap(), key);
        assert_eq!(PrivateKey::from_hex(&key.to_hex()).unwrap(), key);
    }

    #[test]
    fn rejects_out_of_range_secrets() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
        // N itself
        let n_bytes = be_bytes_32(&secp256k1().n);
        assert!(PrivateKey::from_bytes(&n_bytes).is_err());
        // N - 1 is the largest valid secret
        let n_minus_1 = be_bytes_32(&(&secp256k1().n - 1u32));
        assert!(PrivateKey::from_bytes(&n_minus_1).is_ok());
        // wrong length
        assert!(PrivateKey::from_bytes(&[1u8; 31]).is_err());
        assert!(PrivateKey::from_hex("").is_err());
    }

    #[test]
    fn rejects_malformed_wif() {
        // tampered character
        assert!(
            PrivateKey::from_wif("L401GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq").is_err()
        );
        // truncated
        assert!(
            PrivateKey::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoW").is_err()
        );
        // not base58 at all
        assert!(PrivateKey::from_wif("0OIl").is_err());
    }

    #[test]
    fn derived_public_key_matches_generator_multiple() {
        let key =
            PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000002")
                .unwrap();
        let curve = secp256k1();
        let doubled = curve.generator().add(&curve.generator()).unwrap();
        assert_eq!(key.pub_key().point(), &doubled);
    }
}
