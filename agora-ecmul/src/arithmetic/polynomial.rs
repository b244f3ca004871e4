use crate::EcmulError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Polynomial over the integers mod `p`, coefficients in increasing powers of x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<BigUint>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<BigUint>) -> Self {
        Self { coeffs }
    }

    pub fn one() -> Self {
        Self::new(vec![BigUint::one()])
    }

    pub fn coeffs(&self) -> &[BigUint] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<BigUint> {
        self.coeffs
    }

    /// Coefficient of `x^index`, zero past the end.
    pub fn coeff(&self, index: usize) -> BigUint {
        self.coeffs.get(index).cloned().unwrap_or_default()
    }

    /// Remainder of the division by a monic `modulus` of degree at least one.
    pub fn reduce_mod(&self, modulus: &Self, p: &BigUint) -> Result<Self, EcmulError> {
        let n = modulus.coeffs.len();
        if n < 2 || !modulus.coeffs[n - 1].is_one() {
            return Err(EcmulError::InvalidModulus);
        }

        let mut coeffs = self.coeffs.clone();
        while coeffs.len() >= n {
            let len = coeffs.len();
            let lead = coeffs[len - 1].clone();
            if !lead.is_zero() {
                for i in 2..=n {
                    let cancel = (&lead * &modulus.coeffs[n - i]) % p;
                    coeffs[len - i] = (&coeffs[len - i] + p - cancel) % p;
                }
            }
            coeffs.pop();
        }
        Ok(Self::new(coeffs))
    }

    pub fn multiply_mod(&self, rhs: &Self, modulus: &Self, p: &BigUint) -> Result<Self, EcmulError> {
        if self.coeffs.is_empty() || rhs.coeffs.is_empty() {
            return Ok(Self::new(vec![]));
        }
        let mut product = vec![BigUint::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, lhs_coeff) in self.coeffs.iter().enumerate() {
            for (j, rhs_coeff) in rhs.coeffs.iter().enumerate() {
                product[i + j] = (&product[i + j] + lhs_coeff * rhs_coeff) % p;
            }
        }
        Self::new(product).reduce_mod(modulus, p)
    }

    /// Square-and-multiply, Handbook of Applied Cryptography algorithm 2.227.
    pub fn exp_mod(
        &self,
        exponent: &BigUint,
        modulus: &Self,
        p: &BigUint,
    ) -> Result<Self, EcmulError> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }

        let mut base = self.reduce_mod(modulus, p)?;
        let mut k = exponent.clone();
        let mut acc = if k.is_odd() {
            base.clone()
        } else {
            Self::one()
        };
        while k > BigUint::one() {
            k >>= 1;
            base = base.multiply_mod(&base, modulus, p)?;
            if k.is_odd() {
                acc = base.multiply_mod(&acc, modulus, p)?;
            }
        }
        Ok(acc)
    }
}
