use crate::arithmetic::multimult::{MultiMult, Pair};
use crate::arithmetic::{check_modulus, Point};
use crate::curve::Curve;
use crate::encoding::{CompressedPoint, SignFlag};
use crate::EcmulError;

use num_bigint::BigInt;
use num_traits::Signed;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One `(scalar, compressed point)` term of the linear combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub scalar: BigInt,
    pub x: BigInt,
    pub sign: BigInt,
}

impl Term {
    pub fn new(scalar: BigInt, x: BigInt, sign: BigInt) -> Self {
        Self { scalar, x, sign }
    }

    fn decode(&self, curve: &Curve) -> Result<Pair, EcmulError> {
        let x = curve.element(&self.x)?;
        let sign = SignFlag::try_from(&self.sign)?;
        let point = CompressedPoint::new(x, sign).decompress(curve)?;
        if self.scalar.is_negative() {
            return Err(EcmulError::InvalidScalar);
        }
        Ok(Pair {
            scalar: self.scalar.clone(),
            point,
        })
    }
}

/// `C = s₀·A₀ + s₁·A₁ + ⋯ + sₙ·Aₙ` on `y² = x³ + a·x + b` over `F_p`.
///
/// Every `Aᵢ` arrives compressed and is decoded before scaling. Any failure
/// aborts the whole computation; when several terms are invalid the error of
/// the first one is returned.
pub fn combine(modulus: &BigInt, a: &BigInt, b: &BigInt, terms: &[Term]) -> Result<Point, EcmulError> {
    let curve = Curve::new(modulus, a, b)?;
    debug!(terms = terms.len(), "evaluating linear combination");

    #[cfg(feature = "parallel")]
    let iter = terms.par_iter().enumerate();
    #[cfg(not(feature = "parallel"))]
    let iter = terms.iter().enumerate();

    let decoded = iter
        .map(|(index, term)| {
            let pair = term.decode(&curve);
            trace!(index, ok = pair.is_ok(), "decoded term");
            pair
        })
        .collect::<Vec<_>>();

    let pairs = decoded.into_iter().collect::<Result<Vec<_>, _>>()?;
    MultiMult::with_pairs(&curve, pairs).evaluate()
}

/// Flat calling convention `(p, a, b, s₀, x₀, sign₀, s₁, x₁, sign₁, …)`.
///
/// The modulus is validated first, then the argument count.
pub fn combine_flat(args: &[BigInt]) -> Result<Point, EcmulError> {
    let modulus = args.first().ok_or(EcmulError::InvalidArity(0))?;
    check_modulus(&modulus.to_biguint().ok_or(EcmulError::InvalidModulus)?)?;

    if args.len() < 3 {
        return Err(EcmulError::InvalidArity(args.len()));
    }
    let chunks = args[3..].chunks_exact(3);
    if !chunks.remainder().is_empty() {
        return Err(EcmulError::InvalidArity(args.len()));
    }

    let terms = chunks
        .map(|chunk| Term::new(chunk[0].clone(), chunk[1].clone(), chunk[2].clone()))
        .collect::<Vec<_>>();
    combine(&args[0], &args[1], &args[2], &terms)
}
