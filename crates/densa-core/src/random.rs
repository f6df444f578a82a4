//! Random matrix and vector factories.
//!
//! Every factory takes the generator explicitly; there is no hidden global
//! or thread-local state. Values are drawn as `f64` and converted to the
//! requested dtype, so integer targets truncate toward zero.
//!
//! ```
//! use densa_core::{DType, Matrix};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let m = Matrix::uniform(3, 4, DType::F64, &mut rng).unwrap();
//! assert!(m.to_f64_vec().iter().all(|x| (-1.0..1.0).contains(x)));
//! ```

use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal, Uniform};

use crate::buffer::NumericBuffer;
use crate::dtype::DType;
use crate::error::{CoreError, Result};
use crate::guard::element_count;
use crate::matrix::Matrix;
use crate::vector::Vector;

fn sample<D: Distribution<f64>>(
    dist: &D,
    len: usize,
    dtype: DType,
    rng: &mut impl Rng,
) -> Result<NumericBuffer> {
    NumericBuffer::from_f64_iter(dtype, dist.sample_iter(rng).take(len))
}

fn poisson(lambda: f64) -> Result<Poisson<f64>> {
    Poisson::new(lambda).map_err(|_| CoreError::InvalidArgument {
        reason: "poisson lambda must be positive and finite",
    })
}

impl Matrix {
    /// Uniform samples in `[0, 1)`.
    pub fn randn(rows: usize, cols: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let buf = sample(&Uniform::new(0.0, 1.0), len, dtype, rng)?;
        Ok(Self::from_parts(rows, cols, buf))
    }

    /// Uniform samples in `[-1, 1)`.
    pub fn uniform(rows: usize, cols: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let buf = sample(&Uniform::new(-1.0, 1.0), len, dtype, rng)?;
        Ok(Self::from_parts(rows, cols, buf))
    }

    /// Standard normal samples.
    pub fn gaussian(rows: usize, cols: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let buf = sample(&StandardNormal, len, dtype, rng)?;
        Ok(Self::from_parts(rows, cols, buf))
    }

    /// Poisson samples with mean `lambda`.
    pub fn poisson(
        rows: usize,
        cols: usize,
        lambda: f64,
        dtype: DType,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let buf = sample(&poisson(lambda)?, len, dtype, rng)?;
        Ok(Self::from_parts(rows, cols, buf))
    }
}

impl Vector {
    /// Uniform samples in `[0, 1)`.
    pub fn randn(len: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::from_parts(sample(&Uniform::new(0.0, 1.0), len, dtype, rng)?))
    }

    /// Uniform samples in `[-1, 1)`.
    pub fn uniform(len: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::from_parts(sample(&Uniform::new(-1.0, 1.0), len, dtype, rng)?))
    }

    /// Standard normal samples.
    pub fn gaussian(len: usize, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::from_parts(sample(&StandardNormal, len, dtype, rng)?))
    }

    /// Poisson samples with mean `lambda`.
    ///
    /// ```
    /// use densa_core::{DType, Vector};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let v = Vector::poisson(100, 3.0, DType::I32, &mut rng).unwrap();
    /// assert!(v.to_f64_vec().iter().all(|&x| x >= 0.0));
    /// assert!(Vector::poisson(5, -1.0, DType::I32, &mut rng).is_err());
    /// ```
    pub fn poisson(len: usize, lambda: f64, dtype: DType, rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::from_parts(sample(&poisson(lambda)?, len, dtype, rng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let r = Matrix::randn(10, 10, DType::F64, &mut rng).unwrap();
        assert!(r.to_f64_vec().iter().all(|x| (0.0..1.0).contains(x)));
        let u = Vector::uniform(200, DType::F32, &mut rng).unwrap();
        assert_eq!(u.dtype(), DType::F32);
        assert!(u.to_f64_vec().iter().all(|x| (-1.0..1.0).contains(x)));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = Vector::gaussian(16, DType::F64, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = Vector::gaussian(16, DType::F64, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = StdRng::seed_from_u64(1234);
        let v = Vector::gaussian(20_000, DType::F64, &mut rng).unwrap();
        assert!(v.mean().abs() < 0.05);
        assert!((v.variance() - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_poisson_mean_and_integers() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = Matrix::poisson(100, 100, 4.0, DType::I32, &mut rng).unwrap();
        assert_eq!(m.dtype(), DType::I32);
        let data = m.to_f64_vec();
        let mean = data.iter().sum::<f64>() / data.len() as f64;
        assert!((mean - 4.0).abs() < 0.1);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Matrix::gaussian(0, 3, DType::F64, &mut rng),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Vector::randn(0, DType::F64, &mut rng),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Matrix::poisson(2, 2, 0.0, DType::F64, &mut rng),
            Err(CoreError::InvalidArgument { .. })
        ));
    }
}
