//! Prime field arithmetic with the modulus carried as data.
//!
//! A `FieldElement` is a residue in `[0, p)` for a runtime prime `p`.
//! Elements of different fields never mix: every binary operation checks
//! that the moduli match and fails with [`EccError::DomainMismatch`]
//! otherwise. Every operation returns a new element; nothing is mutated.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::EccError;

#[derive(Clone, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Construct from a non-negative value, reducing it into `[0, p)`.
    pub fn new(value: BigUint, modulus: BigUint) -> Self {
        let value = &value % &modulus;
        FieldElement { value, modulus }
    }

    /// Construct from a possibly negative value. Negative inputs wrap into
    /// `[0, p)`; construction never fails.
    pub fn from_bigint(value: &BigInt, modulus: &BigUint) -> Self {
        let m = BigInt::from(modulus.clone());
        let v = value.mod_floor(&m);
        let v = v.to_biguint().unwrap_or_else(BigUint::zero);
        FieldElement {
            value: v,
            modulus: modulus.clone(),
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_even(&self) -> bool {
        self.value.is_even()
    }

    /// Compare against a raw integer, reduced into this field first.
    pub fn eq_int(&self, n: &BigInt) -> bool {
        Self::from_bigint(n, &self.modulus).value == self.value
    }

    fn same_field(&self, other: &Self, op: &str) -> Result<(), EccError> {
        if self.modulus != other.modulus {
            return Err(EccError::DomainMismatch(format!(
                "cannot {op} elements of fields mod {} and mod {}",
                self.modulus, other.modulus
            )));
        }
        Ok(())
    }

    fn reduced(&self, value: BigUint) -> Self {
        FieldElement {
            value: value % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, EccError> {
        self.same_field(other, "add")?;
        Ok(self.reduced(&self.value + &other.value))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, EccError> {
        self.same_field(other, "subtract")?;
        Ok(self.reduced(&self.value + &self.modulus - &other.value))
    }

    pub fn mul(&self, other: &Self) -> Result<Self, EccError> {
        self.same_field(other, "multiply")?;
        Ok(self.reduced(&self.value * &other.value))
    }

    /// Multiply by a plain integer scalar. No field to check on the scalar;
    /// negative scalars wrap.
    pub fn mul_scalar(&self, k: &BigInt) -> Self {
        let v = BigInt::from(self.value.clone()) * k;
        Self::from_bigint(&v, &self.modulus)
    }

    /// Raise to an integer power. By Fermat's little theorem the exponent is
    /// reduced modulo `p - 1` first, which also gives negative exponents
    /// their inverse meaning.
    pub fn pow(&self, exponent: &BigInt) -> Self {
        let phi = BigInt::from(&self.modulus - BigUint::one());
        let e = exponent
            .mod_floor(&phi)
            .to_biguint()
            .unwrap_or_else(BigUint::zero);
        FieldElement {
            value: self.value.modpow(&e, &self.modulus),
            modulus: self.modulus.clone(),
        }
    }

    /// Multiplicative inverse via `self^(p-2)`. The additive identity has no
    /// inverse.
    pub fn invert(&self) -> Result<Self, EccError> {
        if self.value.is_zero() {
            return Err(EccError::DivisionByZero);
        }
        let e = &self.modulus - BigUint::from(2u32);
        Ok(FieldElement {
            value: self.value.modpow(&e, &self.modulus),
            modulus: self.modulus.clone(),
        })
    }

    pub fn divide(&self, other: &Self) -> Result<Self, EccError> {
        self.same_field(other, "divide")?;
        self.mul(&other.invert()?)
    }

    /// Modular square root via `self^((p+1)/4)`, valid when `p ≡ 3 mod 4`.
    /// The candidate is squared back to detect non-residues, which signal
    /// [`EccError::NoSquareRoot`].
    pub fn sqrt(&self) -> Result<Self, EccError> {
        let e = (&self.modulus + BigUint::one()) >> 2u32;
        let root = FieldElement {
            value: self.value.modpow(&e, &self.modulus),
            modulus: self.modulus.clone(),
        };
        if root.mul(&root)? != *self {
            return Err(EccError::NoSquareRoot);
        }
        Ok(root)
    }

    /// Additive inverse.
    pub fn neg(&self) -> Self {
        if self.value.is_zero() {
            return self.clone();
        }
        FieldElement {
            value: &self.modulus - &self.value,
            modulus: self.modulus.clone(),
        }
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:#x} mod {:#x})", self.value, self.modulus)
    }
}
