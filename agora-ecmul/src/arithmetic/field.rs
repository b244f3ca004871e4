use super::modular::square_root_mod_prime;
use crate::EcmulError;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use std::fmt;
use std::sync::Arc;

/// An integer reduced into `[0, modulus)`.
///
/// Every element carries the modulus of the field it belongs to. Elements of
/// different fields never mix: the binary operations fail with
/// [`EcmulError::FieldMismatch`] instead. The derived `==` compares the
/// moduli too, so elements of different fields are simply unequal; use
/// [`FieldElement::try_eq`] to reject the comparison instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

/// Fails unless `modulus > 2`.
pub fn check_modulus(modulus: &BigUint) -> Result<(), EcmulError> {
    if *modulus <= BigUint::from(2u8) {
        Err(EcmulError::InvalidModulus)
    } else {
        Ok(())
    }
}

impl FieldElement {
    pub fn new(value: BigUint, modulus: Arc<BigUint>) -> Result<Self, EcmulError> {
        check_modulus(&modulus)?;
        if value >= *modulus {
            return Err(EcmulError::OutOfRange);
        }
        Ok(Self { value, modulus })
    }

    /// Coerces a signed integer, rejecting anything outside `[0, modulus)`.
    pub fn from_bigint(value: &BigInt, modulus: &Arc<BigUint>) -> Result<Self, EcmulError> {
        let value = value.to_biguint().ok_or(EcmulError::OutOfRange)?;
        Self::new(value, Arc::clone(modulus))
    }

    pub fn zero(modulus: &Arc<BigUint>) -> Result<Self, EcmulError> {
        Self::new(BigUint::zero(), Arc::clone(modulus))
    }

    pub fn one(modulus: &Arc<BigUint>) -> Result<Self, EcmulError> {
        Self::new(BigUint::one(), Arc::clone(modulus))
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn modulus(&self) -> &Arc<BigUint> {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_odd(&self) -> bool {
        self.value.is_odd()
    }

    /// Element of the same field holding `value mod modulus`.
    pub(crate) fn reduce(&self, value: BigUint) -> Self {
        Self {
            value: value % &*self.modulus,
            modulus: Arc::clone(&self.modulus),
        }
    }

    pub fn same_field(&self, other: &Self) -> Result<(), EcmulError> {
        if Arc::ptr_eq(&self.modulus, &other.modulus) || self.modulus == other.modulus {
            Ok(())
        } else {
            Err(EcmulError::FieldMismatch)
        }
    }

    pub fn try_eq(&self, rhs: &Self) -> Result<bool, EcmulError> {
        self.same_field(rhs)?;
        Ok(self.value == rhs.value)
    }

    pub fn try_add(&self, rhs: &Self) -> Result<Self, EcmulError> {
        self.same_field(rhs)?;
        Ok(self.reduce(&self.value + &rhs.value))
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, EcmulError> {
        self.same_field(rhs)?;
        Ok(self.reduce(&self.value + &*self.modulus - &rhs.value))
    }

    pub fn try_mul(&self, rhs: &Self) -> Result<Self, EcmulError> {
        self.same_field(rhs)?;
        Ok(self.reduce(&self.value * &rhs.value))
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self, EcmulError> {
        self.same_field(rhs)?;
        self.try_mul(&rhs.inverse()?)
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    pub fn inverse(&self) -> Result<Self, EcmulError> {
        if self.is_zero() {
            return Err(EcmulError::DivisionByZero);
        }
        let modulus = BigInt::from((*self.modulus).clone());
        let egcd = BigInt::from(self.value.clone()).extended_gcd(&modulus);
        if !egcd.gcd.is_one() {
            return Err(EcmulError::DivisionByZero);
        }
        // mod_floor with a positive modulus is never negative
        let inverse = egcd.x.mod_floor(&modulus);
        Ok(self.reduce(inverse.magnitude().clone()))
    }

    pub fn pow(&self, exponent: &BigInt) -> Result<Self, EcmulError> {
        if exponent.is_negative() {
            return Err(EcmulError::InvalidExponent);
        }
        Ok(self.reduce(self.value.modpow(exponent.magnitude(), &self.modulus)))
    }

    pub fn square(&self) -> Self {
        self.reduce(&self.value * &self.value)
    }

    /// Some square root of `self`; which of the two roots is unspecified.
    pub fn sqrt(&self) -> Result<Self, EcmulError> {
        let root = square_root_mod_prime(&self.value, &self.modulus)?;
        Ok(self.reduce(root))
    }
}

impl std::ops::Neg for &FieldElement {
    type Output = FieldElement;
    fn neg(self) -> Self::Output {
        if self.is_zero() {
            self.clone()
        } else {
            self.reduce(&*self.modulus - &self.value)
        }
    }
}

impl std::ops::Neg for FieldElement {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
