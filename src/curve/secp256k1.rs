//! The secp256k1 parameter set: `y² = x³ + 7` over the prime
//! `P = 2²⁵⁶ − 2³² − 977`, with the standard generator and group order.
//!
//! Constructed once per process and handed out as a shared reference.

use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::curve::point::CurvePoint;
use crate::field::FieldElement;
use crate::EccError;

const N_HEX: &[u8] = b"fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
const GX_HEX: &[u8] = b"79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GY_HEX: &[u8] = b"483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

pub struct Secp256k1 {
    /// Field prime.
    pub p: BigUint,
    /// Order of the subgroup generated by G.
    pub n: BigUint,
    a: FieldElement,
    b: FieldElement,
    g: CurvePoint,
}

/// The process-wide secp256k1 parameters.
pub fn secp256k1() -> &'static Secp256k1 {
    static CURVE: OnceLock<Secp256k1> = OnceLock::new();
    CURVE.get_or_init(Secp256k1::build)
}

impl Secp256k1 {
    fn build() -> Self {
        let p = (BigUint::one() << 256u32) - (BigUint::one() << 32u32) - BigUint::from(977u32);
        let n = parse_hex(N_HEX);
        let a = FieldElement::new(BigUint::zero(), p.clone());
        let b = FieldElement::new(BigUint::from(7u32), p.clone());
        let gx = FieldElement::new(parse_hex(GX_HEX), p.clone());
        let gy = FieldElement::new(parse_hex(GY_HEX), p.clone());
        let g = CurvePoint::new(gx, gy, a.clone(), b.clone())
            .expect("generator coordinates satisfy the curve equation");
        Secp256k1 { p, n, a, b, g }
    }

    /// An element of the coordinate field.
    pub fn field(&self, value: BigUint) -> FieldElement {
        FieldElement::new(value, self.p.clone())
    }

    /// An affine point on this curve, validated.
    pub fn point(&self, x: BigUint, y: BigUint) -> Result<CurvePoint, EccError> {
        CurvePoint::new(
            self.field(x),
            self.field(y),
            self.a.clone(),
            self.b.clone(),
        )
    }

    pub fn generator(&self) -> CurvePoint {
        self.g.clone()
    }

    pub fn infinity(&self) -> CurvePoint {
        CurvePoint::infinity(self.a.clone(), self.b.clone())
    }

    /// N/2, the low-s boundary.
    pub fn half_n(&self) -> BigUint {
        &self.n >> 1u32
    }

    /// Recover the point with the given x coordinate and y parity, used for
    /// SEC point decompression. An x with no point on the curve surfaces as
    /// [`EccError::NoSquareRoot`].
    pub fn lift_x(&self, x: &BigUint, odd: bool) -> Result<CurvePoint, EccError> {
        let x = self.field(x.clone());
        // y² = x³ + 7 (a = 0 on this curve)
        let alpha = x.mul(&x)?.mul(&x)?.add(&self.b)?;
        let beta = alpha.sqrt()?;
        let y = if beta.is_even() == !odd { beta } else { beta.neg() };
        CurvePoint::new(x, y, self.a.clone(), self.b.clone())
    }
}

fn parse_hex(s: &[u8]) -> BigUint {
    BigUint::parse_bytes(s, 16).expect("valid hex constant")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        // build() would panic otherwise; make the invariant explicit.
        assert!(!secp256k1().generator().is_infinity());
    }

    #[test]
    fn generator_has_order_n() {
        let curve = secp256k1();
        let total = curve.generator().mul(&curve.n).unwrap();
        assert!(total.is_infinity());
    }

    #[test]
    fn prime_supports_fast_sqrt() {
        // P ≡ 3 mod 4, the precondition for the (p+1)/4 square root.
        assert_eq!(&secp256k1().p % BigUint::from(4u32), BigUint::from(3u32));
    }

    #[test]
    fn lift_x_recovers_both_parities() {
        let curve = secp256k1();
        let g = curve.generator();
        let gx = g.x().unwrap().value().clone();
        let even = curve.lift_x(&gx, false).unwrap();
        let odd = curve.lift_x(&gx, true).unwrap();
        assert_eq!(even.x(), odd.x());
        assert_ne!(even.y(), odd.y());
        assert_eq!(even.add(&odd).unwrap(), curve.infinity());
        // One of the two is G itself.
        assert!(even == g || odd == g);
    }
}
