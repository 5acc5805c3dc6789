/// Elliptic-curve cryptography on secp256k1, built from the field up.
///
/// This crate provides:
/// - Prime field arithmetic with the modulus carried as data
/// - The affine Weierstrass group law and double-and-add scalar multiplication
/// - The secp256k1 parameter set as a process-wide constant
/// - Deterministic (RFC6979) ECDSA signing and verification
/// - The Bitcoin wire encodings: SEC public keys (compressed and
///   uncompressed), DER signatures, and WIF private keys
///
/// All types are immutable values; signing and verification are pure
/// functions of their inputs, so calls may run concurrently without
/// coordination.

pub mod base58;
pub mod curve;
pub mod ec;
pub mod field;
pub mod hash;

mod error;
pub use error::EccError;

pub use curve::{secp256k1, CurvePoint, Secp256k1};
pub use ec::{PrivateKey, PublicKey, Signature};
pub use field::FieldElement;
