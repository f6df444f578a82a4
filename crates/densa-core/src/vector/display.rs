//! `Display` formatting for [`Vector`].

use core::fmt;

use crate::buffer::dispatch;

use super::Vector;

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vector([")?;
        dispatch!(&self.buffer, |d: T| {
            for (i, x) in d.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
        });
        write!(f, "], dtype={})", self.dtype())
    }
}
