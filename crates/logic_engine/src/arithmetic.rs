//! Arithmetic collaborator.
//!
//! The engine never does arithmetic itself: range bounds are compared,
//! stepped and turned back into nodes through this trait, so a host can plug
//! in its own number tower.

use logic_ast::{Context, NodeId, Number};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

pub trait Arithmetic {
    fn is_complex(&self, n: &Number) -> bool;

    /// `None` when the two values are not ordered (complex operands).
    fn comparison(&self, a: &Number, b: &Number) -> Option<Ordering>;

    fn addition(&self, a: &Number, b: &Number) -> Number;

    fn is_zero(&self, n: &Number) -> bool;

    fn is_negative(&self, n: &Number) -> bool;

    fn integer_one(&self) -> Number;

    fn zero(&self) -> Number;

    fn create_internal_number(&self, ctx: &mut Context, value: Number) -> NodeId {
        ctx.number(value)
    }
}

/// Exact arithmetic over [`BigRational`], complex values as `re + im·i`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RationalArithmetic;

impl Arithmetic for RationalArithmetic {
    fn is_complex(&self, n: &Number) -> bool {
        n.is_complex()
    }

    fn comparison(&self, a: &Number, b: &Number) -> Option<Ordering> {
        Some(a.as_real()?.cmp(b.as_real()?))
    }

    fn addition(&self, a: &Number, b: &Number) -> Number {
        match (a, b) {
            (Number::Real(x), Number::Real(y)) => Number::Real(x + y),
            _ => {
                let (ar, ai) = parts(a);
                let (br, bi) = parts(b);
                Number::complex(ar + br, ai + bi)
            }
        }
    }

    fn is_zero(&self, n: &Number) -> bool {
        match n {
            Number::Real(r) => r.is_zero(),
            Number::Complex { re, im } => re.is_zero() && im.is_zero(),
        }
    }

    fn is_negative(&self, n: &Number) -> bool {
        n.as_real().is_some_and(Signed::is_negative)
    }

    fn integer_one(&self) -> Number {
        Number::Real(BigRational::one())
    }

    fn zero(&self) -> Number {
        Number::Real(BigRational::zero())
    }
}

fn parts(n: &Number) -> (BigRational, BigRational) {
    match n {
        Number::Real(r) => (r.clone(), BigRational::zero()),
        Number::Complex { re, im } => (re.clone(), im.clone()),
    }
}
