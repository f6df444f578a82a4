//! Ordering and the explicit in-place primitives.

use crate::buffer::dispatch;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::guard::check_index;
use crate::linalg::{Linalg, SortOrder};

use super::Vector;

impl Vector {
    /// Sorted copy.
    ///
    /// ```
    /// # use densa_core::{Vector, linalg::SortOrder};
    /// let v = Vector::from_vec(vec![3_i32, 1, 2]).unwrap();
    /// assert_eq!(v.sort(SortOrder::Descending).as_slice::<i32>().unwrap(), &[3, 2, 1]);
    /// assert_eq!(v.as_slice::<i32>().unwrap(), &[3, 1, 2]);
    /// ```
    pub fn sort(&self, order: SortOrder) -> Vector {
        let mut out = self.clone();
        out.sort_in_place(order);
        out
    }

    pub fn sort_in_place(&mut self, order: SortOrder) {
        Linalg::default().sort(self, order);
    }

    /// Exchange elements `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        check_index(self.len(), i)?;
        check_index(self.len(), j)?;
        self.buffer.swap(i, j);
        Ok(())
    }

    /// `self *= c`. Integer vectors compute in `f64` and truncate.
    pub fn scale_in_place(&mut self, c: f64) {
        dispatch!(&mut self.buffer, |d: T| {
            for x in d.iter_mut() {
                *x = T::from_f64(x.to_f64() * c);
            }
        });
    }
}
