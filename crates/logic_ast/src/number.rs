//! Internal numbers carried by `Number` nodes.
//!
//! The tree only stores them; arithmetic on them belongs to the engine's
//! arithmetic collaborator.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    Real(BigRational),
    Complex { re: BigRational, im: BigRational },
}

impl Number {
    pub fn integer(n: i64) -> Self {
        Number::Real(BigRational::from_integer(BigInt::from(n)))
    }

    /// `numer/denom` in lowest terms.
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Number::Real(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// A zero imaginary part collapses to `Real`.
    pub fn complex(re: BigRational, im: BigRational) -> Self {
        if im.is_zero() {
            Number::Real(re)
        } else {
            Number::Complex { re, im }
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Number::Complex { .. })
    }

    pub fn as_real(&self) -> Option<&BigRational> {
        match self {
            Number::Real(r) => Some(r),
            Number::Complex { .. } => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Real(r) => write!(f, "{}", r),
            Number::Complex { re, im } => write!(f, "{}+{}i", re, im),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_with_zero_imaginary_part_is_real() {
        let n = Number::complex(BigRational::from_integer(3.into()), BigRational::zero());
        assert!(!n.is_complex());
        assert_eq!(n, Number::integer(3));
    }

    #[test]
    fn rationals_are_normalized() {
        assert_eq!(Number::rational(4, 2), Number::integer(2));
        assert_eq!(Number::rational(1, 2).to_string(), "1/2");
    }
}
