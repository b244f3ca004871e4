use super::polynomial::Polynomial;
use crate::EcmulError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// `n mod m` for a small `m`.
fn residue(n: &BigUint, m: u32) -> u32 {
    // NOTE the remainder is below m, so it always fits into an u32
    (n % m).to_u32().unwrap_or_default()
}

/// Jacobi symbol `(a / n)` for odd `n >= 3`.
///
/// Handbook of Applied Cryptography, algorithm 2.149, with the tail
/// recursion unrolled into a loop.
pub fn jacobi(a: &BigUint, n: &BigUint) -> Result<i8, EcmulError> {
    if *n < BigUint::from(3u8) || n.is_even() {
        return Err(EcmulError::InvalidModulus);
    }

    let mut a = a % n;
    let mut n = n.clone();
    let mut sign = 1i8;
    loop {
        if a.is_zero() {
            return Ok(0);
        }
        if a.is_one() {
            return Ok(sign);
        }
        // a is non-zero here
        let e = a.trailing_zeros().unwrap_or_default();
        let a1 = &a >> e;
        let n8 = residue(&n, 8);
        if e % 2 == 1 && (n8 == 3 || n8 == 5) {
            sign = -sign;
        }
        if a1.is_one() {
            return Ok(sign);
        }
        if residue(&n, 4) == 3 && residue(&a1, 4) == 3 {
            sign = -sign;
        }
        a = &n % &a1;
        n = a1;
    }
}

/// Some `r` with `r² ≡ a (mod p)`, for a prime `p` and `0 <= a < p`.
///
/// The algorithm depends on the residue class of `p` (Handbook of Applied
/// Cryptography, algorithms 3.34 to 3.39):
/// - `p ≡ 3 (mod 4)`: `a^((p+1)/4)`
/// - `p ≡ 5 (mod 8)`: Atkin's formula
/// - `p ≡ 1 (mod 8)`: Cipolla's method, `x^((p+1)/2) mod (x² - bx + a)` for a
///   witness `b` such that `b² - 4a` is a non-residue.
///
/// The caller picks the sign of the result.
pub fn square_root_mod_prime(a: &BigUint, p: &BigUint) -> Result<BigUint, EcmulError> {
    if *p <= BigUint::one() {
        return Err(EcmulError::InvalidModulus);
    }
    if a >= p {
        return Err(EcmulError::OutOfRange);
    }
    if a.is_zero() {
        return Ok(BigUint::zero());
    }
    if *p == BigUint::from(2u8) {
        return Ok(a.clone());
    }

    if jacobi(a, p)? == -1 {
        return Err(EcmulError::NoSquareRoot);
    }

    if residue(p, 4) == 3 {
        let exponent: BigUint = (p + 1u32) >> 2;
        return Ok(a.modpow(&exponent, p));
    }

    if residue(p, 8) == 5 {
        let d = a.modpow(&((p - 1u32) >> 2), p);
        if d.is_one() {
            return Ok(a.modpow(&((p + 3u32) >> 3), p));
        }
        if d == p - 1u32 {
            let four_a: BigUint = (a << 2) % p;
            let root: BigUint = (a << 1) * four_a.modpow(&((p - 5u32) >> 3), p);
            return Ok(root % p);
        }
        return Err(EcmulError::Internal(
            "a^((p-1)/4) is neither 1 nor -1 for a quadratic residue",
        ));
    }

    let four_a: BigUint = (a << 2) % p;
    let mut b = BigUint::from(2u8);
    while b < *p {
        // b² - 4a, kept non-negative
        let discriminant = (&b * &b + p - &four_a) % p;
        if jacobi(&discriminant, p)? == -1 {
            // x² - bx + a
            let modulus_poly = Polynomial::new(vec![a.clone(), p - &b, BigUint::one()]);
            let x = Polynomial::new(vec![BigUint::zero(), BigUint::one()]);
            let power = x.exp_mod(&((p + 1u32) >> 1), &modulus_poly, p)?;
            return Ok(power.coeff(0));
        }
        b += 1u32;
    }
    Err(EcmulError::Internal("no non-residue witness found"))
}
