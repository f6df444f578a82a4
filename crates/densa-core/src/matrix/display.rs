//! `Display` formatting for [`Matrix`].

use core::fmt;

use crate::buffer::dispatch;

use super::Matrix;

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = (self.rows, self.cols);
        writeln!(f, "matrix([")?;
        dispatch!(&self.buffer, |d: T| {
            for r in 0..rows {
                write!(f, "  [")?;
                for c in 0..cols {
                    if c > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", d[r * cols + c])?;
                }
                if r < rows - 1 {
                    writeln!(f, "],")?;
                } else {
                    writeln!(f, "]")?;
                }
            }
        });
        write!(f, "], dtype={})", self.dtype())
    }
}
