use crate::arithmetic::{check_modulus, FieldElement, Point};
use crate::EcmulError;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use std::sync::Arc;

/// Parameters of `y² = x³ + a·x + b` over the prime field `F_p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    modulus: Arc<BigUint>,
    a: FieldElement,
    b: FieldElement,
}

impl Curve {
    /// Validates the modulus before anything else, then coerces `a` and `b`
    /// into the field.
    pub fn new(modulus: &BigInt, a: &BigInt, b: &BigInt) -> Result<Self, EcmulError> {
        let modulus = modulus.to_biguint().ok_or(EcmulError::InvalidModulus)?;
        check_modulus(&modulus)?;
        let modulus = Arc::new(modulus);
        let a = FieldElement::from_bigint(a, &modulus)?;
        let b = FieldElement::from_bigint(b, &modulus)?;
        Ok(Self { modulus, a, b })
    }

    pub fn modulus(&self) -> &Arc<BigUint> {
        &self.modulus
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn element(&self, value: &BigInt) -> Result<FieldElement, EcmulError> {
        FieldElement::from_bigint(value, &self.modulus)
    }

    pub fn zero(&self) -> FieldElement {
        self.a.reduce(BigUint::zero())
    }

    /// `x³ + a·x + b`
    pub fn rhs(&self, x: &FieldElement) -> Result<FieldElement, EcmulError> {
        x.square()
            .try_mul(x)?
            .try_add(&self.a.try_mul(x)?)?
            .try_add(&self.b)
    }

    pub fn is_on_curve(&self, point: &Point) -> Result<bool, EcmulError> {
        match point {
            Point::Infinity => Ok(true),
            Point::Affine(p) => Ok(p.y().square() == self.rhs(p.x())?),
        }
    }

    /// Affine point from raw coordinates, rejected unless it lies on the curve.
    pub fn point(&self, x: &BigInt, y: &BigInt) -> Result<Point, EcmulError> {
        let point = Point::new(self.element(x)?, self.element(y)?)?;
        if !self.is_on_curve(&point)? {
            return Err(EcmulError::InvalidEncoding(
                "point is not on the curve".to_string(),
            ));
        }
        Ok(point)
    }

    /// `4a³ + 27b² ≡ 0 (mod p)`
    pub fn is_singular(&self) -> bool {
        let a = self.a.value();
        let b = self.b.value();
        let discriminant = (4u32 * a.pow(3) + 27u32 * b.pow(2)) % &*self.modulus;
        discriminant.is_zero()
    }
}

/// A named curve with hexadecimal domain parameters.
pub trait KnownCurve {
    const PRIME_MODULUS: &'static str;
    const COEFF_A: &'static str;
    const COEFF_B: &'static str;
    const GENERATOR_X: &'static str;
    const GENERATOR_Y: &'static str;

    fn curve() -> Curve {
        // NOTE unwrap is fine here because the constants describe a valid curve
        Curve::new(
            &from_hex(Self::PRIME_MODULUS),
            &from_hex(Self::COEFF_A),
            &from_hex(Self::COEFF_B),
        )
        .unwrap()
    }

    fn generator() -> Point {
        // NOTE unwrap is fine here because the generator is on the curve
        Self::curve()
            .point(&from_hex(Self::GENERATOR_X), &from_hex(Self::GENERATOR_Y))
            .unwrap()
    }
}

fn from_hex(hex: &str) -> BigInt {
    // NOTE only called with the hex constants below
    BigInt::parse_bytes(hex.as_bytes(), 16).unwrap_or_default()
}

/// The pairing-friendly curve behind the EVM `ecAdd`/`ecMul` precompiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AltBn128;

impl KnownCurve for AltBn128 {
    const PRIME_MODULUS: &'static str =
        "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";
    const COEFF_A: &'static str = "0";
    const COEFF_B: &'static str = "3";
    const GENERATOR_X: &'static str = "1";
    const GENERATOR_Y: &'static str = "2";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl KnownCurve for Secp256k1 {
    const PRIME_MODULUS: &'static str =
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
    const COEFF_A: &'static str = "0";
    const COEFF_B: &'static str = "7";
    const GENERATOR_X: &'static str =
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GENERATOR_Y: &'static str =
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
}
