//! Weierstrass curve points and the secp256k1 parameter set.

pub mod point;
pub mod secp256k1;

pub use point::CurvePoint;
pub use secp256k1::{secp256k1, Secp256k1};
