//! Element types and the numeric trait hierarchy.
//!
//! A [`Matrix`](crate::Matrix) or [`Vector`](crate::Vector) carries its element
//! type at run time as a [`DType`] tag. Kernels are written once, generically,
//! against the trait hierarchy below and instantiated for each tag:
//!
//! ```text
//! Scalar            (f32, f64, i32)
//!   ├── Integer     (i32)
//!   └── Float       (f32, f64)
//!         └── Real
//! ```

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::buffer::NumericBuffer;

// ---------------------------------------------------------------------------
// DType: run-time element tag
// ---------------------------------------------------------------------------

/// Element representation shared by every slot of a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    #[default]
    F64,
    /// 32-bit signed integer.
    I32,
}

impl DType {
    /// Size of one element in bytes.
    pub const fn size_of(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F64 => 8,
        }
    }

    /// `true` for `F32` and `F64`.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Scalar: the root trait for every storable element type
// ---------------------------------------------------------------------------

/// Base trait for all element types storable in a [`NumericBuffer`].
///
/// Operations that are defined for every dtype but behave differently for
/// integers (division, remainder, power) are part of this trait so that the
/// arithmetic kernels stay dtype-agnostic.
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Default
    + 'static
{
    /// Run-time tag of this element type.
    const DTYPE: DType;

    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Convert from `usize` (used for index / shape arithmetic).
    fn from_usize(v: usize) -> Self;

    /// Convert from `f64`. Integers truncate toward zero and saturate.
    fn from_f64(v: f64) -> Self;

    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Division that reports integer division by zero as `None`.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Remainder that reports integer modulus by zero as `None`.
    fn checked_rem(self, rhs: Self) -> Option<Self>;

    /// `self` raised to `rhs`.
    fn pow(self, rhs: Self) -> Self;

    /// `self + rhs`, wrapping on integer overflow.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// `self - rhs`, wrapping on integer overflow.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// `self * rhs`, wrapping on integer overflow.
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// `self + a * b`, wrapping on integer overflow.
    fn mul_acc(self, a: Self, b: Self) -> Self;

    /// Wrap an owned vector into the matching buffer variant.
    fn into_buffer(data: Vec<Self>) -> NumericBuffer;

    /// Borrow the storage of `buffer` if it holds this element type.
    fn slice_of(buffer: &NumericBuffer) -> Option<&[Self]>;

    /// Mutably borrow the storage of `buffer` if it holds this element type.
    fn slice_of_mut(buffer: &mut NumericBuffer) -> Option<&mut [Self]>;
}

// ---------------------------------------------------------------------------
// Integer
// ---------------------------------------------------------------------------

/// Marker trait for integer element types.
pub trait Integer: Scalar {}

// ---------------------------------------------------------------------------
// Float: operations that only make sense for floating-point numbers
// ---------------------------------------------------------------------------

/// Trait for floating-point element types (`f32`, `f64`).
pub trait Float: Scalar + Neg<Output = Self> {
    /// Machine epsilon.
    fn epsilon() -> Self;

    /// Smallest positive normal value.
    fn min_positive() -> Self;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn hypot(self, other: Self) -> Self;
    fn is_finite(self) -> bool;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;

    /// `|self|` carrying the sign of `sign` (`sign >= 0` counts as positive).
    #[inline]
    fn with_sign_of(self, sign: Self) -> Self {
        if sign >= Self::zero() {
            self.abs()
        } else {
            -self.abs()
        }
    }
}

/// Real-valued floats, the element types the factorization kernels accept.
pub trait Real: Float {}

// ===========================================================================
// Macro implementations
// ===========================================================================

macro_rules! impl_scalar_float {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
            #[inline]
            fn checked_div(self, rhs: Self) -> Option<Self> {
                Some(self / rhs)
            }
            #[inline]
            fn checked_rem(self, rhs: Self) -> Option<Self> {
                Some(self % rhs)
            }
            #[inline]
            fn pow(self, rhs: Self) -> Self {
                <$ty>::powf(self, rhs)
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self - rhs
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                self * rhs
            }
            #[inline]
            fn mul_acc(self, a: Self, b: Self) -> Self {
                self + a * b
            }
            #[inline]
            fn into_buffer(data: Vec<Self>) -> NumericBuffer {
                NumericBuffer::$variant(data)
            }
            #[inline]
            fn slice_of(buffer: &NumericBuffer) -> Option<&[Self]> {
                match buffer {
                    NumericBuffer::$variant(d) => Some(d),
                    _ => None,
                }
            }
            #[inline]
            fn slice_of_mut(buffer: &mut NumericBuffer) -> Option<&mut [Self]> {
                match buffer {
                    NumericBuffer::$variant(d) => Some(d),
                    _ => None,
                }
            }
        }

        impl Float for $ty {
            #[inline]
            fn epsilon() -> Self {
                <$ty>::EPSILON
            }
            #[inline]
            fn min_positive() -> Self {
                <$ty>::MIN_POSITIVE
            }
            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
            #[inline]
            fn hypot(self, other: Self) -> Self {
                <$ty>::hypot(self, other)
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }
            #[inline]
            fn min(self, other: Self) -> Self {
                <$ty>::min(self, other)
            }
            #[inline]
            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }
        }

        impl Real for $ty {}
    };
}

impl_scalar_float!(f32, F32);
impl_scalar_float!(f64, F64);

impl Scalar for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn zero() -> Self {
        0
    }
    #[inline]
    fn one() -> Self {
        1
    }
    #[inline]
    fn from_usize(v: usize) -> Self {
        v as Self
    }
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as Self
    }
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        i32::checked_div(self, rhs)
    }
    #[inline]
    fn checked_rem(self, rhs: Self) -> Option<Self> {
        i32::checked_rem(self, rhs)
    }
    #[inline]
    fn pow(self, rhs: Self) -> Self {
        if rhs >= 0 {
            return self.wrapping_pow(rhs.unsigned_abs());
        }
        // Negative exponents truncate toward zero like integer division.
        match self {
            1 => 1,
            -1 if rhs % 2 == 0 => 1,
            -1 => -1,
            _ => 0,
        }
    }
    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        i32::wrapping_add(self, rhs)
    }
    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        i32::wrapping_sub(self, rhs)
    }
    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        i32::wrapping_mul(self, rhs)
    }
    #[inline]
    fn mul_acc(self, a: Self, b: Self) -> Self {
        i32::wrapping_add(self, i32::wrapping_mul(a, b))
    }
    #[inline]
    fn into_buffer(data: Vec<Self>) -> NumericBuffer {
        NumericBuffer::I32(data)
    }
    #[inline]
    fn slice_of(buffer: &NumericBuffer) -> Option<&[Self]> {
        match buffer {
            NumericBuffer::I32(d) => Some(d),
            _ => None,
        }
    }
    #[inline]
    fn slice_of_mut(buffer: &mut NumericBuffer) -> Option<&mut [Self]> {
        match buffer {
            NumericBuffer::I32(d) => Some(d),
            _ => None,
        }
    }
}

impl Integer for i32 {}
