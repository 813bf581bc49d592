use core::fmt;

use crate::MAX_SIZE;

/// Dimensions of a list viewed as a vector.
///
/// Only 1-D shapes exist today: `rows` is the list length and `cols` is the
/// [`MAX_SIZE`] sentinel. Matrix shapes are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of a 1-D vector with `len` elements.
    pub const fn vector(len: usize) -> Self {
        Self::new(len, MAX_SIZE)
    }

    pub const fn is_vector(&self) -> bool {
        self.cols == MAX_SIZE
    }

    /// Whether `self * other` would be a valid product, i.e. the row count of
    /// `self` matches the column count of `other`.
    pub const fn valid_mult(&self, other: &Shape) -> bool {
        self.rows == other.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vector() {
            write!(f, "({},)", self.rows)
        } else {
            write!(f, "({}, {})", self.rows, self.cols)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_shape_uses_sentinel() {
        let shape = Shape::vector(3);
        assert_eq!(shape.rows, 3);
        assert_eq!(shape.cols, MAX_SIZE);
        assert!(shape.is_vector());
        assert!(!Shape::new(3, 2).is_vector());
    }

    #[test]
    fn equality() {
        assert_eq!(Shape::vector(2), Shape::vector(2));
        assert_ne!(Shape::vector(2), Shape::vector(3));
        assert_ne!(Shape::vector(2), Shape::new(2, 2));
    }

    #[test]
    fn valid_mult() {
        assert!(Shape::new(2, 3).valid_mult(&Shape::new(3, 2)));
        assert!(!Shape::new(2, 3).valid_mult(&Shape::new(2, 3)));
        // Two vectors never multiply unless one is absurdly long.
        assert!(!Shape::vector(4).valid_mult(&Shape::vector(4)));
    }

    #[test]
    fn display() {
        assert_eq!(Shape::vector(0).to_string(), "(0,)");
        assert_eq!(Shape::vector(5).to_string(), "(5,)");
        assert_eq!(Shape::new(2, 3).to_string(), "(2, 3)");
    }
}
