//! Reductions over all elements of a vector. Results are widened to `f64`.

use core::cmp::Ordering;

use crate::buffer::dispatch;
use crate::dtype::Scalar;

use super::Vector;

impl Vector {
    /// Sum of the elements.
    pub fn total(&self) -> f64 {
        dispatch!(&self.buffer, |d: T| d.iter().map(|&x| x.to_f64()).sum())
    }

    /// Product of the elements.
    pub fn product(&self) -> f64 {
        dispatch!(&self.buffer, |d: T| d.iter().map(|&x| x.to_f64()).product())
    }

    pub fn mean(&self) -> f64 {
        self.total() / self.len() as f64
    }

    /// Population variance.
    ///
    /// ```
    /// # use densa_core::Vector;
    /// let v = Vector::from_vec(vec![2_i32, 4, 4, 4, 5, 5, 7, 9]).unwrap();
    /// assert_eq!(v.variance(), 4.0);
    /// ```
    pub fn variance(&self) -> f64 {
        let mu = self.mean();
        let ss: f64 = self.to_f64_vec().iter().map(|&x| (x - mu) * (x - mu)).sum();
        ss / self.len() as f64
    }

    /// Middle value; the mean of the two middle values for even lengths.
    pub fn median(&self) -> f64 {
        let mut sorted = self.to_f64_vec();
        sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    pub fn min(&self) -> f64 {
        self.to_f64_vec().into_iter().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.to_f64_vec().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the first smallest element.
    pub fn argmin(&self) -> usize {
        self.arg_by(Ordering::Less)
    }

    /// Index of the first largest element.
    pub fn argmax(&self) -> usize {
        self.arg_by(Ordering::Greater)
    }

    fn arg_by(&self, wanted: Ordering) -> usize {
        dispatch!(&self.buffer, |d: T| {
            let mut best = 0;
            for (i, x) in d.iter().enumerate().skip(1) {
                if x.partial_cmp(&d[best]) == Some(wanted) {
                    best = i;
                }
            }
            best
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_total_and_product() {
        let v = Vector::from_vec(vec![1.0_f64, -2.0, 3.0]).unwrap();
        assert_eq!(v.total(), 2.0);
        assert_eq!(v.product(), -6.0);
        assert_eq!(v.mean(), 2.0 / 3.0);
    }

    #[test]
    fn test_median() {
        let odd = Vector::from_vec(vec![5_i32, 1, 3]).unwrap();
        assert_eq!(odd.median(), 3.0);
        let even = Vector::from_vec(vec![4.0_f32, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(even.median(), 2.5);
    }

    #[test]
    fn test_extrema() {
        let v = Vector::from_vec(vec![3_i32, -1, 7, 7, -1]).unwrap();
        assert_eq!(v.min(), -1.0);
        assert_eq!(v.max(), 7.0);
        assert_eq!(v.argmin(), 1);
        assert_eq!(v.argmax(), 2);
    }
}
