//! Base58Check encoding, the outer transport for WIF private keys.
//!
//! A Base58Check string is `base58(payload || checksum)` where the checksum
//! is the first four bytes of SHA-256d(payload). Encoding and alphabet
//! handling are delegated to the `bs58` crate with Bitcoin's alphabet.

use crate::hash::sha256d;
use crate::EccError;

/// Encode bytes as plain Base58 with the Bitcoin alphabet.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a plain Base58 string with the Bitcoin alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, EccError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| EccError::InvalidBase58(e.to_string()))
}

/// Encode a payload with a trailing 4-byte SHA-256d checksum.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>, EccError> {
    let decoded = decode(s)?;
    if decoded.len() < 4 {
        return Err(EccError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let expected = sha256d(payload);
    if checksum != &expected[..4] {
        return Err(EccError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
