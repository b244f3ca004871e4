#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
mod combine;
pub mod curve;
pub mod encoding;
pub mod parse;

pub use arithmetic::{AffinePoint, FieldElement, Point};
pub use combine::{combine, combine_flat, Term};
pub use curve::{AltBn128, Curve, KnownCurve, Secp256k1};
pub use encoding::{CompressedPoint, SignFlag};
pub use num_bigint::{BigInt, BigUint};

use parse::{EcmulInput, EcmulOutput, ParsedEcmulInput};
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcmulError {
    #[error("modulus must be an integer greater than 2")]
    InvalidModulus,
    #[error("integer is outside of the field")]
    OutOfRange,
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(String),
    #[error("value has no square root modulo the field prime")]
    NoSquareRoot,
    #[error("operands belong to different fields")]
    FieldMismatch,
    #[error("attempted to divide by zero")]
    DivisionByZero,
    #[error("scalar must be non-negative")]
    InvalidScalar,
    #[error("exponent must be non-negative")]
    InvalidExponent,
    #[error("expected 3 + 3k arguments, got {0}")]
    InvalidArity(usize),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("internal error: {0}")]
    Internal(&'static str),
}

#[wasm_bindgen(js_name = "ecmul")]
pub fn ecmul(input: JsValue) -> Result<JsValue, JsValue> {
    let input: ParsedEcmulInput = serde_wasm_bindgen::from_value::<EcmulInput>(input)
        .map_err(|e| e.to_string())?
        .try_into()?;

    let point = combine(&input.modulus, &input.a, &input.b, &input.terms)
        .map_err(|e| e.to_string())?;

    serde_wasm_bindgen::to_value(&EcmulOutput::from(&point))
        .map_err(|e| JsValue::from(e.to_string()))
}
