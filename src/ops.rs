//! Arithmetic on Numbers.
//!
//! Operands are decoded to the narrowest native form that holds them: `(f64, f64)` pairs if
//! either side is complex, big integers if both are whole, `f64` otherwise. Results are
//! encoded again at the default precision.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::encoder::Qigits;
use crate::error::Error;
use crate::number::Number;
use crate::suffix::SuffixType;

type Complex = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Exact integer result, where integers are closed under the operation.
    fn whole(self, a: &BigInt, b: &BigInt) -> Option<BigInt> {
        match self {
            Op::Add => Some(a + b),
            Op::Sub => Some(a - b),
            Op::Mul => Some(a * b),
            Op::Div => None,
        }
    }

    fn real(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }

    fn complex(self, (a, b): Complex, (c, d): Complex) -> Complex {
        match self {
            Op::Add => (a + c, b + d),
            Op::Sub => (a - c, b - d),
            Op::Mul => (a * c - b * d, a * d + b * c),
            Op::Div => {
                let denominator = c * c + d * d;
                ((a * c + b * d) / denominator, (b * c - a * d) / denominator)
            }
        }
    }
}

impl Number {
    /// `self + other`
    ///
    /// # Errors
    ///
    /// Fails if an operand cannot be decoded (ludicrous, malformed suffixes) or the result
    /// cannot be encoded (ludicrous).
    pub fn checked_add(&self, other: &Self) -> Result<Self, Error> {
        self.binary(other, Op::Add)
    }

    /// `self - other`
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn checked_sub(&self, other: &Self) -> Result<Self, Error> {
        self.binary(other, Op::Sub)
    }

    /// `self × other`
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn checked_mul(&self, other: &Self) -> Result<Self, Error> {
        self.binary(other, Op::Mul)
    }

    /// `self ÷ other`, always in floating point. Dividing by zero gives ±infinity or NaN.
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn checked_div(&self, other: &Self) -> Result<Self, Error> {
        self.binary(other, Op::Div)
    }

    /// `-self`
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn checked_neg(&self) -> Result<Self, Error> {
        if self.is_complex() {
            let (re, im) = self.to_complex()?;
            return complex_result(-re, -im);
        }
        if self.is_whole() {
            return Ok(Self::from_bigint(&-self.to_bigint()?)?);
        }
        Ok(Self::from_f64(-self.to_f64()?, Qigits::DEFAULT)?)
    }

    /// `|self|`, the modulus for complex numbers.
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn checked_abs(&self) -> Result<Self, Error> {
        if self.is_complex() {
            let (re, im) = self.to_complex()?;
            return Ok(Self::from_f64(re.hypot(im), Qigits::DEFAULT)?);
        }
        if self.is_whole() {
            return Ok(Self::from_bigint(&self.to_bigint()?.abs())?);
        }
        Ok(Self::from_f64(self.to_f64()?.abs(), Qigits::DEFAULT)?)
    }

    /// `self + 1`
    ///
    /// # Errors
    ///
    /// See [`checked_add`](Self::checked_add).
    pub fn inc(&self) -> Result<Self, Error> {
        self.checked_add(&Self::from(1))
    }

    /// Same real part, negated imaginary part.
    ///
    /// # Errors
    ///
    /// Fails on a malformed suffix chain or an undecodable imaginary part.
    pub fn conjugate(&self) -> Result<Self, Error> {
        let real = self.real()?;
        if !self.is_complex() {
            return Ok(real);
        }
        let imag = self.imag()?.checked_neg()?;
        Ok(real.plus_suffix(SuffixType::IMAGINARY, &imag)?)
    }

    fn binary(&self, other: &Self, op: Op) -> Result<Self, Error> {
        if self.is_complex() || other.is_complex() {
            let (re, im) = op.complex(self.to_complex()?, other.to_complex()?);
            return complex_result(re, im);
        }
        if op != Op::Div && self.is_whole() && other.is_whole() {
            if let Some(result) = op.whole(&self.to_bigint()?, &other.to_bigint()?) {
                return Ok(Self::from_bigint(&result)?);
            }
        }
        let result = op.real(self.to_f64()?, other.to_f64()?);
        Ok(Self::from_f64(result, Qigits::DEFAULT)?)
    }
}

/// A complex result, dropping an imaginary part that came out zero.
fn complex_result(re: f64, im: f64) -> Result<Number, Error> {
    if im == 0.0 {
        Ok(Number::from_f64(re, Qigits::DEFAULT)?)
    } else {
        Ok(Number::from_complex(re, im)?)
    }
}
