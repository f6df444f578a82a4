//! Element-wise math functions on [`Matrix`] and [`Vector`].
//!
//! Every function runs through `f64` and converts back to the receiver
//! dtype, so an `I32` matrix stays `I32` (fractional results truncate
//! toward zero).
//!
//! ```
//! # use densa_core::{Matrix, Vector};
//! let v = Vector::from_vec(vec![1.0_f64, 4.0, 9.0]).unwrap();
//! assert_eq!(v.sqrt().to_f64_vec(), vec![1.0, 2.0, 3.0]);
//!
//! let m = Matrix::from_rows(vec![vec![-1_i32, 2], vec![3, -4]]).unwrap();
//! assert_eq!(m.abs().to_f64_vec(), vec![1.0, 2.0, 3.0, 4.0]);
//! ```

use crate::matrix::Matrix;
use crate::vector::Vector;

macro_rules! unary_maps {
    ($ty:ty { $($(#[$doc:meta])* $name:ident => $f:expr;)* }) => {
        impl $ty {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $name(&self) -> $ty {
                    self.map($f)
                }
            )*

            /// Logarithm in an arbitrary `base`.
            #[inline]
            pub fn log(&self, base: f64) -> $ty {
                self.map(|x| x.log(base))
            }
        }
    };
}

macro_rules! math_functions {
    ($($ty:ty),*) => {
        $(
            unary_maps!($ty {
                abs => f64::abs;
                sqrt => f64::sqrt;
                exp => f64::exp;
                /// `exp(x) - 1`, accurate near zero.
                exp_m1 => f64::exp_m1;
                /// Natural logarithm.
                ln => f64::ln;
                /// `ln(1 + x)`, accurate near zero.
                ln_1p => f64::ln_1p;
                log2 => f64::log2;
                log10 => f64::log10;
                sin => f64::sin;
                asin => f64::asin;
                cos => f64::cos;
                acos => f64::acos;
                tan => f64::tan;
                atan => f64::atan;
                /// Radians to degrees.
                to_degrees => f64::to_degrees;
                /// Degrees to radians.
                to_radians => f64::to_radians;
                floor => f64::floor;
                ceil => f64::ceil;
                /// Round half away from zero.
                round => f64::round;
            });
        )*
    };
}

math_functions!(Matrix, Vector);
