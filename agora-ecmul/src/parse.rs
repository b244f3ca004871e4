use crate::arithmetic::Point;
use crate::{combine_flat, EcmulError, Term};

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use std::str::FromStr;

/// Parses a hexadecimal integer with an optional `-` sign and `0x` prefix.
pub fn parse_int(s: &str) -> Result<BigInt, EcmulError> {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EcmulError::Parse(format!("invalid hex integer {:?}", s)));
    }
    // NOTE this cannot fail after the digit check above
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 16).unwrap_or_default();
    Ok(if negative { -magnitude } else { magnitude })
}

pub fn to_hex(n: &BigUint) -> String {
    format!("0x{}", n.to_str_radix(16))
}

/// One row of a test-vector file: `is_error, x, y, p, a, b, s0, x0, sign0, …`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVector {
    pub is_error: bool,
    pub expected: (BigUint, BigUint),
    pub args: Vec<BigInt>,
}

impl FromStr for TestVector {
    type Err = EcmulError;
    fn from_str(row: &str) -> Result<Self, Self::Err> {
        let fields = row
            .trim()
            .split(',')
            .map(parse_int)
            .collect::<Result<Vec<_>, _>>()?;
        if fields.len() < 8 {
            return Err(EcmulError::Parse(format!(
                "expected at least 8 fields, got {}",
                fields.len()
            )));
        }
        let coordinate = |value: &BigInt| {
            value
                .to_biguint()
                .ok_or_else(|| EcmulError::Parse("negative expected coordinate".to_string()))
        };
        Ok(Self {
            is_error: !fields[0].is_zero(),
            expected: (coordinate(&fields[1])?, coordinate(&fields[2])?),
            args: fields[3..].to_vec(),
        })
    }
}

impl TestVector {
    /// Runs the vector; infinity is reported as `(0, 0)`.
    pub fn check(&self) -> Result<(), String> {
        match (combine_flat(&self.args), self.is_error) {
            (Err(_), true) => Ok(()),
            (Err(e), false) => Err(format!("unexpected error: {}", e)),
            (Ok(point), true) => Err(format!("expected an error, got {}", point)),
            (Ok(point), false) => {
                let actual = point.to_pair().unwrap_or_default();
                if actual == self.expected {
                    Ok(())
                } else {
                    Err(format!(
                        "expected ({}, {}), got ({}, {})",
                        to_hex(&self.expected.0),
                        to_hex(&self.expected.1),
                        to_hex(&actual.0),
                        to_hex(&actual.1)
                    ))
                }
            }
        }
    }
}

/// Parses a test-vector file. The first line is a header, blank lines are
/// skipped.
pub fn parse_vectors(csv: &str) -> Result<Vec<TestVector>, EcmulError> {
    csv.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(TestVector::from_str)
        .collect()
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TermInput {
    pub scalar: String,
    pub x: String,
    pub sign: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcmulInput {
    pub modulus: String,
    pub a: String,
    pub b: String,
    pub terms: Vec<TermInput>,
}

pub struct ParsedEcmulInput {
    pub modulus: BigInt,
    pub a: BigInt,
    pub b: BigInt,
    pub terms: Vec<Term>,
}

impl TryFrom<EcmulInput> for ParsedEcmulInput {
    type Error = String;
    fn try_from(rhs: EcmulInput) -> Result<Self, Self::Error> {
        let parse = |s: &str| parse_int(s).map_err(|e| e.to_string());
        let terms = rhs
            .terms
            .iter()
            .map(|term| {
                Ok(Term::new(
                    parse(term.scalar.as_str())?,
                    parse(term.x.as_str())?,
                    parse(term.sign.as_str())?,
                ))
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self {
            modulus: parse(rhs.modulus.as_str())?,
            a: parse(rhs.a.as_str())?,
            b: parse(rhs.b.as_str())?,
            terms,
        })
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcmulOutput {
    pub x: String,
    pub y: String,
    pub infinity: bool,
}

impl From<&Point> for EcmulOutput {
    fn from(point: &Point) -> Self {
        let (x, y) = point.to_pair().unwrap_or_default();
        Self {
            x: to_hex(&x),
            y: to_hex(&y),
            infinity: point.is_identity(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::{AltBn128, KnownCurve};

    const BN_MODULUS: &str = "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47";

    #[test]
    fn integers() {
        assert_eq!(parse_int("ff"), Ok(BigInt::from(255)));
        assert_eq!(parse_int("0xFF"), Ok(BigInt::from(255)));
        assert_eq!(parse_int(" 0X10 "), Ok(BigInt::from(16)));
        assert_eq!(parse_int("-0x1"), Ok(BigInt::from(-1)));
        assert_eq!(parse_int("0"), Ok(BigInt::zero()));
        for invalid in ["", "0x", "-", "--1", "0xg", "1_0", "+1"] {
            assert!(matches!(parse_int(invalid), Err(EcmulError::Parse(_))), "{}", invalid);
        }
        assert_eq!(to_hex(&BigUint::from(255u32)), "0xff");
        assert_eq!(to_hex(&BigUint::zero()), "0x0");
    }

    #[test]
    fn vector_rows() {
        let row = format!("0,1,2,{},0,3,1,1,2", BN_MODULUS);
        let vector: TestVector = row.parse().unwrap();
        assert!(!vector.is_error);
        assert_eq!(vector.expected, (BigUint::from(1u32), BigUint::from(2u32)));
        assert_eq!(vector.args.len(), 6);
        assert_eq!(vector.check(), Ok(()));

        let wrong = format!("0,1,3,{},0,3,1,1,2", BN_MODULUS);
        assert!(wrong.parse::<TestVector>().unwrap().check().is_err());

        let error = format!("1,0,0,{},0,3,1,4,2", BN_MODULUS);
        assert_eq!(error.parse::<TestVector>().unwrap().check(), Ok(()));

        let not_error = format!("1,0,0,{},0,3,1,1,2", BN_MODULUS);
        assert!(not_error.parse::<TestVector>().unwrap().check().is_err());

        let infinity = format!("0,0,0,{},0,3,1,0,0", BN_MODULUS);
        assert_eq!(infinity.parse::<TestVector>().unwrap().check(), Ok(()));

        assert!(matches!(
            "0,1,2,3,4,5,6".parse::<TestVector>(),
            Err(EcmulError::Parse(_))
        ));
        assert!(matches!(
            "0,-1,2,3,4,5,6,7".parse::<TestVector>(),
            Err(EcmulError::Parse(_))
        ));
    }

    #[test]
    fn vector_files() {
        let csv = format!(
            "is_error,x,y,p,a,b,s0,x0,sign0\n0,1,2,{m},0,3,1,1,2\n\n1,0,0,2,0,3,1,1,2\n",
            m = BN_MODULUS
        );
        let vectors = parse_vectors(&csv).unwrap();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.check().is_ok()));
        assert!(parse_vectors("header\nnot,a,row").is_err());
    }

    #[test]
    fn json_input() {
        let json = format!(
            r#"{{"modulus":"0x{}","a":"0","b":"3","terms":[{{"scalar":"2","x":"1","sign":"2"}}]}}"#,
            BN_MODULUS
        );
        let input: EcmulInput = serde_json::from_str(&json).unwrap();
        let parsed = ParsedEcmulInput::try_from(input).unwrap();
        assert_eq!(parsed.terms.len(), 1);
        let point = crate::combine(&parsed.modulus, &parsed.a, &parsed.b, &parsed.terms).unwrap();
        assert_eq!(
            point,
            AltBn128::generator()
                .scalar_mul(&BigInt::from(2), &AltBn128::curve())
                .unwrap()
        );

        let output = EcmulOutput::from(&point);
        assert!(!output.infinity);
        assert_eq!(
            output.x,
            "0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd3"
        );
        let identity = EcmulOutput::from(&Point::IDENTITY);
        assert_eq!(
            identity,
            EcmulOutput {
                x: "0x0".to_string(),
                y: "0x0".to_string(),
                infinity: true,
            }
        );

        let bad = EcmulInput {
            modulus: "zz".to_string(),
            a: "0".to_string(),
            b: "3".to_string(),
            terms: vec![],
        };
        assert!(ParsedEcmulInput::try_from(bad).is_err());
    }
}
