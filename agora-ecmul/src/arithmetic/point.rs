use super::field::FieldElement;
use crate::curve::Curve;
use crate::EcmulError;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use std::fmt;

/// Affine coordinates of a point that is not the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
}

impl AffinePoint {
    /// Does not check the curve equation, see [`Curve::point`] for that.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self, EcmulError> {
        x.same_field(&y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }
}

/// A point of a short Weierstrass curve: the identity or an affine point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Point {
    Infinity,
    Affine(AffinePoint),
}

impl From<AffinePoint> for Point {
    fn from(affine: AffinePoint) -> Self {
        Self::Affine(affine)
    }
}

impl std::ops::Neg for &Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine(p) => Point::Affine(AffinePoint {
                x: p.x.clone(),
                y: -&p.y,
            }),
        }
    }
}

impl std::ops::Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Point {
    pub const IDENTITY: Self = Self::Infinity;

    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self, EcmulError> {
        AffinePoint::new(x, y).map(Self::Affine)
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    pub fn x(&self) -> Option<&FieldElement> {
        match self {
            Self::Infinity => None,
            Self::Affine(p) => Some(p.x()),
        }
    }

    pub fn y(&self) -> Option<&FieldElement> {
        match self {
            Self::Infinity => None,
            Self::Affine(p) => Some(p.y()),
        }
    }

    /// Coordinates as plain integers, `None` for the identity.
    pub fn to_pair(&self) -> Option<(BigUint, BigUint)> {
        match self {
            Self::Infinity => None,
            Self::Affine(p) => Some((p.x.value().clone(), p.y.value().clone())),
        }
    }

    /// Tangent-line doubling.
    ///
    /// Fails with [`EcmulError::DivisionByZero`] for points with `y = 0`,
    /// where the tangent is vertical.
    pub fn double(&self, curve: &Curve) -> Result<Self, EcmulError> {
        let p = match self {
            Self::Infinity => return Ok(Self::Infinity),
            Self::Affine(p) => p,
        };

        // λ = (3x² + a) / 2y
        let x2 = p.x.square();
        let numerator = x2.try_add(&x2)?.try_add(&x2)?.try_add(curve.a())?;
        let denominator = p.y.try_add(&p.y)?;
        let lambda = numerator.try_div(&denominator)?;

        // x' = λ² - 2x, y' = λ(x - x') - y
        let x = lambda.square().try_sub(&p.x)?.try_sub(&p.x)?;
        let y = lambda.try_mul(&p.x.try_sub(&x)?)?.try_sub(&p.y)?;
        Self::new(x, y)
    }

    /// The group law: chord rule for distinct points, tangent rule for equal
    /// ones, identity for a point and its negation.
    pub fn geometric_add(&self, rhs: &Self, curve: &Curve) -> Result<Self, EcmulError> {
        let (p, q) = match (self, rhs) {
            (Self::Infinity, _) => return Ok(rhs.clone()),
            (_, Self::Infinity) => return Ok(self.clone()),
            (Self::Affine(p), Self::Affine(q)) => (p, q),
        };

        p.x.same_field(&q.x)?;
        if p.x == q.x {
            if p.y.try_add(&q.y)?.is_zero() {
                return Ok(Self::Infinity);
            }
            return self.double(curve);
        }

        // λ = (y₂ - y₁) / (x₂ - x₁)
        let lambda = q.y.try_sub(&p.y)?.try_div(&q.x.try_sub(&p.x)?)?;
        // x₃ = λ² - x₁ - x₂, y₃ = λ(x₁ - x₃) - y₁
        let x = lambda.square().try_sub(&p.x)?.try_sub(&q.x)?;
        let y = lambda.try_mul(&p.x.try_sub(&x)?)?.try_sub(&p.y)?;
        Self::new(x, y)
    }

    /// Double-and-add over the bits of `scalar`, least significant first.
    pub fn scalar_mul(&self, scalar: &BigInt, curve: &Curve) -> Result<Self, EcmulError> {
        let scalar = scalar.to_biguint().ok_or(EcmulError::InvalidScalar)?;
        if scalar.is_zero() || self.is_identity() {
            return Ok(Self::Infinity);
        }

        let bits = scalar.bits();
        let mut acc = Self::Infinity;
        let mut addend = self.clone();
        for i in 0..bits {
            if scalar.bit(i) {
                acc = acc.geometric_add(&addend, curve)?;
            }
            if i + 1 < bits {
                // doubling through the group law sends 2-torsion points to
                // the identity instead of failing
                addend = addend.geometric_add(&addend, curve)?;
            }
        }
        Ok(acc)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "infinity"),
            Self::Affine(p) => write!(f, "({}, {})", p.x, p.y),
        }
    }
}
