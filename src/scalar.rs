//! Scalar element traits used by the coarsening and interpolation kernels
//!
//! The strength-of-connection kernels compare entries through a norm, so they
//! are generic over [`Scalar`] and work for real and complex matrices alike.
//! The splitting helpers and interpolation formulas contain sign- and
//! order-tests (`a < 0`, `signof(a_kj) == signof(a_kk)`) that only make sense
//! for real scalars, so those kernels require [`RealScalar`].

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_complex::{Complex32, Complex64};

/// Trait for types that can be entries of a CSR matrix
///
/// `magnitude` must return a non-negative real consistent with how `max`
/// compares: the absolute value for reals, the 2-norm for complex numbers.
pub trait Scalar:
    Copy
    + Clone
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + 'static
{
    /// Additive identity
    const ZERO: Self;

    /// Multiplicative identity
    const ONE: Self;

    /// Convert from f64 (lossy for narrower types)
    fn from_f64(v: f64) -> Self;

    /// Norm of the entry as a non-negative real
    fn magnitude(self) -> f64;
}

/// Real scalars, for kernels whose formulas branch on sign and ordering
pub trait RealScalar: Scalar + PartialOrd {
    /// Absolute value
    fn abs(self) -> Self;

    /// Sign of the value: -1, 0, or +1
    ///
    /// Both operands of a sign comparison must agree on the zero case, so
    /// exact zero maps to 0 and everything else to ±1.
    fn signof(self) -> i8;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl RealScalar for f64 {
    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn signof(self) -> i8 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self as f64).abs()
    }
}

impl RealScalar for f32 {
    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn signof(self) -> i8 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }
}

impl Scalar for Complex64 {
    const ZERO: Self = Complex64::new(0.0, 0.0);
    const ONE: Self = Complex64::new(1.0, 0.0);

    #[inline]
    fn from_f64(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.norm()
    }
}

impl Scalar for Complex32 {
    const ZERO: Self = Complex32::new(0.0, 0.0);
    const ONE: Self = Complex32::new(1.0, 0.0);

    #[inline]
    fn from_f64(v: f64) -> Self {
        Complex32::new(v as f32, 0.0)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self.norm_sqr() as f64).sqrt()
    }
}
