use super::Point;
use crate::curve::Curve;
use crate::EcmulError;

use num_bigint::BigInt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub scalar: BigInt,
    pub point: Point,
}

/// Accumulates `(scalar, point)` pairs and evaluates `Σ sᵢ·Pᵢ`.
pub struct MultiMult<'a> {
    curve: &'a Curve,
    pairs: Vec<Pair>,
}

impl<'a> MultiMult<'a> {
    pub fn new(curve: &'a Curve) -> Self {
        Self {
            curve,
            pairs: vec![],
        }
    }

    pub fn with_pairs(curve: &'a Curve, pairs: Vec<Pair>) -> Self {
        Self { curve, pairs }
    }

    pub fn insert(&mut self, point: Point, scalar: BigInt) {
        self.pairs.push(Pair { scalar, point });
    }

    pub fn insert_pair(&mut self, pair: Pair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Scales every pair independently, then sums the products in insertion
    /// order. The first failing pair (in insertion order) decides the error.
    pub fn evaluate(self) -> Result<Point, EcmulError> {
        let curve = self.curve;

        #[cfg(feature = "parallel")]
        let iter = self.pairs.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = self.pairs.into_iter();

        let products = iter
            .map(|pair| pair.point.scalar_mul(&pair.scalar, curve))
            .collect::<Vec<_>>();

        products
            .into_iter()
            .try_fold(Point::IDENTITY, |acc, product| {
                acc.geometric_add(&product?, curve)
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::{AltBn128, KnownCurve, Secp256k1};

    #[test]
    fn multimult_empty() {
        let curve = Secp256k1::curve();
        let multimult = MultiMult::new(&curve);
        assert!(multimult.is_empty());
        assert_eq!(multimult.evaluate().unwrap(), Point::IDENTITY);
    }

    #[test]
    fn multimult_single() {
        let curve = Secp256k1::curve();
        let g = Secp256k1::generator();
        let mut multimult = MultiMult::new(&curve);
        multimult.insert(g.clone(), BigInt::from(1));
        assert_eq!(multimult.len(), 1);
        assert_eq!(multimult.evaluate().unwrap(), g);
    }

    #[test]
    fn multimult_matches_naive_sum() {
        let curve = AltBn128::curve();
        let g = AltBn128::generator();
        let h = g.scalar_mul(&BigInt::from(0xbeef), &curve).unwrap();

        let mut multimult = MultiMult::new(&curve);
        let mut naive = Point::IDENTITY;
        for (i, scalar) in [7u64, 0, 123_456_789, u64::MAX, 2].iter().enumerate() {
            let point = if i % 2 == 0 { g.clone() } else { h.clone() };
            let scalar = BigInt::from(*scalar);
            naive = naive
                .geometric_add(&point.scalar_mul(&scalar, &curve).unwrap(), &curve)
                .unwrap();
            multimult.insert_pair(Pair { scalar, point });
        }
        assert_eq!(multimult.evaluate().unwrap(), naive);
    }

    #[test]
    fn multimult_cancels_to_identity() {
        let curve = AltBn128::curve();
        let g = AltBn128::generator();
        let pairs = vec![
            Pair {
                scalar: BigInt::from(5),
                point: g.clone(),
            },
            Pair {
                scalar: BigInt::from(5),
                point: -g,
            },
        ];
        assert_eq!(
            MultiMult::with_pairs(&curve, pairs).evaluate().unwrap(),
            Point::IDENTITY
        );
    }

    #[test]
    fn multimult_negative_scalar() {
        let curve = AltBn128::curve();
        let mut multimult = MultiMult::new(&curve);
        multimult.insert(AltBn128::generator(), BigInt::from(3));
        multimult.insert(AltBn128::generator(), BigInt::from(-3));
        assert_eq!(multimult.evaluate(), Err(EcmulError::InvalidScalar));
    }
}
