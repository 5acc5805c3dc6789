//! Affine point group law for `y² = x³ + a·x + b`.
//!
//! The identity (point at infinity) is encoded as both coordinates absent.
//! Points carry their curve coefficients; combining points from different
//! curves is a [`EccError::DomainMismatch`].

use num_bigint::{BigInt, BigUint};

use crate::field::FieldElement;
use crate::EccError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CurvePoint {
    x: Option<FieldElement>,
    y: Option<FieldElement>,
    a: FieldElement,
    b: FieldElement,
}

impl CurvePoint {
    /// Construct an affine point, validating the curve equation.
    pub fn new(
        x: FieldElement,
        y: FieldElement,
        a: FieldElement,
        b: FieldElement,
    ) -> Result<Self, EccError> {
        let lhs = y.mul(&y)?;
        let rhs = x.mul(&x)?.mul(&x)?.add(&a.mul(&x)?)?.add(&b)?;
        if lhs != rhs {
            return Err(EccError::PointNotOnCurve(format!("({:?}, {:?})", x, y)));
        }
        Ok(CurvePoint {
            x: Some(x),
            y: Some(y),
            a,
            b,
        })
    }

    /// Construct from optional coordinates: both absent is the identity,
    /// both present is validated, one of each is rejected.
    pub fn from_coords(
        x: Option<FieldElement>,
        y: Option<FieldElement>,
        a: FieldElement,
        b: FieldElement,
    ) -> Result<Self, EccError> {
        match (x, y) {
            (Some(x), Some(y)) => Self::new(x, y, a, b),
            (None, None) => Ok(Self::infinity(a, b)),
            _ => Err(EccError::PointNotOnCurve(
                "one affine coordinate missing".to_string(),
            )),
        }
    }

    /// The group identity for the given curve.
    pub fn infinity(a: FieldElement, b: FieldElement) -> Self {
        CurvePoint {
            x: None,
            y: None,
            a,
            b,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.x.is_none()
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.x.as_ref()
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.y.as_ref()
    }

    fn same_curve(&self, other: &Self) -> Result<(), EccError> {
        if self.a != other.a || self.b != other.b {
            return Err(EccError::DomainMismatch(
                "points are on different curves".to_string(),
            ));
        }
        Ok(())
    }

    /// Group addition: identity rules, tangent doubling (vertical tangent at
    /// `y = 0` gives the identity), vertical chords, and the general chord.
    pub fn add(&self, other: &Self) -> Result<Self, EccError> {
        self.same_curve(other)?;

        let (x1, y1) = match (&self.x, &self.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(other.clone()),
        };
        let (x2, y2) = match (&other.x, &other.y) {
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(self.clone()),
        };

        if x1 == x2 {
            if y1 != y2 || y1.is_zero() {
                // Vertical chord, or doubling a point with a vertical tangent.
                return Ok(Self::infinity(self.a.clone(), self.b.clone()));
            }
            // Tangent slope: (3x² + a) / 2y
            let two = BigInt::from(2);
            let s = x1
                .mul(x1)?
                .mul_scalar(&BigInt::from(3))
                .add(&self.a)?
                .divide(&y1.mul_scalar(&two))?;
            let x3 = s.mul(&s)?.sub(&x1.mul_scalar(&two))?;
            let y3 = s.mul(&x1.sub(&x3)?)?.sub(y1)?;
            return Self::new(x3, y3, self.a.clone(), self.b.clone());
        }

        // Chord slope: (y1 - y2) / (x1 - x2)
        let s = y1.sub(y2)?.divide(&x1.sub(x2)?)?;
        let x3 = s.mul(&s)?.sub(x1)?.sub(x2)?;
        let y3 = s.mul(&x1.sub(&x3)?)?.sub(y1)?;
        Self::new(x3, y3, self.a.clone(), self.b.clone())
    }

    /// Scalar multiplication by double-and-add over the bits of `k`, least
    /// significant first. `k = 0` yields the identity. Callers reduce
    /// negative scalars modulo the group order before calling.
    pub fn mul(&self, k: &BigUint) -> Result<Self, EccError> {
        let mut result = Self::infinity(self.a.clone(), self.b.clone());
        let mut current = self.clone();
        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add(&current)?;
            }
            current = current.add(&current)?;
        }
        Ok(result)
    }

    /// The point with negated y, so that `p.add(&p.neg())` is the identity.
    pub fn neg(&self) -> Self {
        CurvePoint {
            x: self.x.clone(),
            y: self.y.as_ref().map(FieldElement::neg),
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    // The test curve y² = x³ + 7 over F223.
    const P: u32 = 223;

    fn fe(v: u32) -> FieldElement {
        FieldElement::new(BigUint::from(v), BigUint::from(P))
    }

    fn coeffs() -> (FieldElement, FieldElement) {
        (fe(0), fe(7))
    }

    fn pt(x: u32, y: u32) -> CurvePoint {
        let (a, b) = coeffs();
        CurvePoint::new(fe(x), fe(y), a, b).unwrap()
    }

    fn id() -> CurvePoint {
        let (a, b) = coeffs();
        CurvePoint::infinity(a, b)
    }

    #[test]
    fn on_curve_validation() {
        for (x, y) in [(192u32, 105u32), (17, 56), (1, 193)] {
            let (a, b) = coeffs();
            assert!(CurvePoint::new(fe(x), fe(y), a, b).is_ok());
        }
        for (x, y) in [(200u32, 119u32), (42, 99)] {
            let (a, b) = coeffs();
            assert!(matches!(
                CurvePoint::new(fe(x), fe(y), a, b).unwrap_err(),
                EccError::PointNotOnCurve(_)
            ));
        }
    }

    #[test]
    fn half_specified_coordinates_rejected() {
        let (a, b) = coeffs();
        assert!(CurvePoint::from_coords(Some(fe(192)), None, a.clone(), b.clone()).is_err());
        assert!(CurvePoint::from_coords(None, Some(fe(105)), a.clone(), b.clone()).is_err());
        assert!(CurvePoint::from_coords(None, None, a, b)
            .unwrap()
            .is_infinity());
    }

    #[test]
    fn identity_rules() {
        let p = pt(192, 105);
        assert_eq!(id().add(&p).unwrap(), p);
        assert_eq!(p.add(&id()).unwrap(), p);
        assert_eq!(id().add(&id()).unwrap(), id());
    }

    #[test]
    fn chord_addition() {
        assert_eq!(pt(170, 142).add(&pt(60, 139)).unwrap(), pt(220, 181));
        assert_eq!(pt(47, 71).add(&pt(17, 56)).unwrap(), pt(215, 68));
        assert_eq!(pt(143, 98).add(&pt(76, 66)).unwrap(), pt(47, 71));
    }

    #[test]
    fn addition_commutes() {
        let p = pt(170, 142);
        let q = pt(60, 139);
        assert_eq!(p.add(&q).unwrap(), q.add(&p).unwrap());
    }

    #[test]
    fn doubling() {
        assert_eq!(pt(192, 105).add(&pt(192, 105)).unwrap(), pt(49, 71));
        assert_eq!(pt(143, 98).add(&pt(143, 98)).unwrap(), pt(64, 168));
        assert_eq!(pt(47, 71).add(&pt(47, 71)).unwrap(), pt(36, 111));
    }

    #[test]
    fn vertical_chord_is_identity() {
        let p = pt(47, 71);
        assert_eq!(p.add(&p.neg()).unwrap(), id());
    }

    #[test]
    fn scalar_multiplication_known_values() {
        let p = pt(47, 71);
        assert_eq!(p.mul(&BigUint::from(4u32)).unwrap(), pt(194, 51));
        assert_eq!(p.mul(&BigUint::from(8u32)).unwrap(), pt(116, 55));
        // (47, 71) generates a subgroup of order 21.
        assert_eq!(p.mul(&BigUint::from(21u32)).unwrap(), id());
    }

    #[test]
    fn scalar_multiplication_matches_repeated_addition() {
        let p = pt(15, 86);
        let mut acc = id();
        for k in 0u32..8 {
            assert_eq!(p.mul(&BigUint::from(k)).unwrap(), acc);
            acc = acc.add(&p).unwrap();
        }
    }

    #[test]
    fn zero_scalar_is_identity() {
        assert_eq!(pt(47, 71).mul(&BigUint::zero()).unwrap(), id());
    }

    #[test]
    fn different_curves_rejected() {
        // y² = x³ + 5x + 7 over the same field holds (18, 77).
        let other = CurvePoint::new(fe(18), fe(77), fe(5), fe(7)).unwrap();
        assert!(matches!(
            pt(47, 71).add(&other).unwrap_err(),
            EccError::DomainMismatch(_)
        ));
    }
}
