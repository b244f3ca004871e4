//! SEC1 §2.3.3/§2.3.4 point compression, with the octet strings already
//! converted to integers: an x coordinate plus a flag selecting the root.

use crate::arithmetic::{FieldElement, Point};
use crate::curve::Curve;
use crate::EcmulError;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignFlag {
    Infinity = 0,
    Even = 2,
    Odd = 3,
}

impl SignFlag {
    /// Parity of the y coordinate selected by the flag.
    pub fn parity(self) -> Option<bool> {
        match self {
            Self::Infinity => None,
            Self::Even => Some(false),
            Self::Odd => Some(true),
        }
    }
}

impl TryFrom<&BigInt> for SignFlag {
    type Error = EcmulError;
    fn try_from(flag: &BigInt) -> Result<Self, Self::Error> {
        match flag.to_u8() {
            Some(0) => Ok(Self::Infinity),
            Some(2) => Ok(Self::Even),
            Some(3) => Ok(Self::Odd),
            _ => Err(EcmulError::InvalidEncoding(format!(
                "sign flag must be 0, 2 or 3, got {}",
                flag
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedPoint {
    x: FieldElement,
    sign: SignFlag,
}

impl CompressedPoint {
    pub fn new(x: FieldElement, sign: SignFlag) -> Self {
        Self { x, sign }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn sign(&self) -> SignFlag {
        self.sign
    }

    /// Infinity compresses to `(0, 0)`, an affine point to `(x, 2 + y mod 2)`.
    pub fn from_point(point: &Point, curve: &Curve) -> Self {
        match point {
            Point::Infinity => Self::new(curve.zero(), SignFlag::Infinity),
            Point::Affine(p) => {
                let sign = if p.y().is_odd() {
                    SignFlag::Odd
                } else {
                    SignFlag::Even
                };
                Self::new(p.x().clone(), sign)
            }
        }
    }

    /// Recovers `y` from `y² = x³ + a·x + b`, picking the root whose parity
    /// matches the sign flag.
    pub fn decompress(&self, curve: &Curve) -> Result<Point, EcmulError> {
        let odd = match self.sign.parity() {
            Some(odd) => odd,
            None if self.x.is_zero() => return Ok(Point::Infinity),
            None => {
                return Err(EcmulError::InvalidEncoding(
                    "infinity must be encoded with a zero x coordinate".to_string(),
                ))
            }
        };

        let alpha = curve.rhs(&self.x)?;
        let beta = alpha.sqrt()?;
        let y = if beta.is_odd() == odd { beta } else { -beta };
        Point::new(self.x.clone(), y)
    }
}
