//! Keys and signatures on secp256k1.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;

use num_bigint::BigUint;

/// Fixed-width 32-byte big-endian serialization of a value known to fit.
pub(crate) fn be_bytes_32(v: &BigUint) -> [u8; 32] {
    let bytes = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
