//! Hash primitives used by signing and the checked encodings.
//!
//! SHA-256, double SHA-256 (the checksum hash for Base58Check payloads)
//! and HMAC-SHA256 (the RFC6979 nonce driver).

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Compute SHA-256 of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256: SHA-256(SHA-256(data)).
///
/// The standard Bitcoin message digest, also the source of the 4-byte
/// Base58Check checksum.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute HMAC-SHA256 of `data` under `key`.
pub fn sha256_hmac(key: &[u8], data: &[u8]) -> [u8; 32] {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result.into_bytes());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty_string() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256d_empty_string() {
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn sha256d_string() {
        assert_eq!(
            hex::encode(sha256d(b"this is the data I want to hash")),
            "2209ddda5914a3fbad507ff2284c4b6e559c18a669f9fc3ad3b5826a2a999d58"
        );
    }

    // NIST HMAC-SHA256 vector, keylen == blocklen.
    #[test]
    fn sha256_hmac_nist() {
        let key = hex::decode(
            "000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F\
             202122232425262728292A2B2C2D2E2F303132333435363738393A3B3C3D3E3F",
        )
        .unwrap();
        let mac = sha256_hmac(&key, b"Sample message for keylen=blocklen");
        assert_eq!(
            hex::encode(mac),
            "8bb9a1db9806f20df7f77b82138c7914d174d59e13dc4d0169c9057b133e1d62"
        );
    }
}
