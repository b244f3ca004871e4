mod field;
pub mod modular;
pub mod multimult;
pub mod polynomial;
mod point;

pub use field::{check_modulus, FieldElement};
pub use modular::{jacobi, square_root_mod_prime};
pub use point::{AffinePoint, Point};
