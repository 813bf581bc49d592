//! Treats an [`ArrayList`] as a 1-D numeric vector.

use core::ops::AddAssign;

use allocator_api2::alloc::Allocator;

use crate::{ArrayList, Error, Result, Shape};

/// Element types that can take part in a dot product.
///
/// Products are always accumulated in `f64`, whatever the element type.
pub trait Scalar: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                #[inline(always)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T, A: Allocator> ArrayList<T, A> {
    /// `(len,)`: the length plus the [`MAX_SIZE`](crate::MAX_SIZE) sentinel,
    /// since matrices are not supported.
    pub fn shape(&self) -> Shape {
        Shape::vector(self.len())
    }

    /// Sum of pairwise products with `other`.
    ///
    /// Fails with [`Error::ShapeMismatch`] unless both lists have the same shape.
    ///
    /// ```
    /// use array_list::{Error, Shape, array_list};
    ///
    /// let x = array_list![1, 0];
    /// assert_eq!(x.dot(&array_list![0, 1]), Ok(0.0));
    /// assert_eq!(x.dot(&array_list![1, 1]), Ok(1.0));
    /// assert_eq!(
    ///     x.dot(&array_list![1, 1, 1]),
    ///     Err(Error::ShapeMismatch { left: Shape::vector(2), right: Shape::vector(3) })
    /// );
    /// ```
    pub fn dot<B: Allocator>(&self, other: &ArrayList<T, B>) -> Result<f64>
    where
        T: Scalar,
    {
        let (left, right) = (self.shape(), other.shape());
        if left != right {
            return Err(Error::ShapeMismatch { left, right });
        }

        Ok(self
            .iter()
            .zip(other.iter())
            .fold(0.0, |acc, (&a, &b)| acc + a.to_f64() * b.to_f64()))
    }

    /// Adds every element to the first one with `+=`.
    ///
    /// The total keeps the element type. Unlike [`ArrayList::dot`], which
    /// always widens to `f64`, integers sum as integers and can overflow.
    ///
    /// An empty list has nothing to start from and yields [`Error::EmptySum`].
    pub fn sum(&self) -> Result<T>
    where
        T: Clone + AddAssign,
    {
        let (first, rest) = self.as_slice().split_first().ok_or(Error::EmptySum)?;
        let mut total = first.clone();
        for value in rest {
            total += value.clone();
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_SIZE, array_list};

    #[test]
    fn shape_is_length_and_sentinel() {
        let list = array_list![1, 2, 3];
        assert_eq!(list.shape(), Shape::new(3, MAX_SIZE));
        assert_eq!(ArrayList::<f32>::new().shape(), Shape::vector(0));
    }

    #[test]
    fn dot_products() {
        let x = array_list![1, 0];
        assert_eq!(x.dot(&array_list![0, 1]), Ok(0.0));
        assert_eq!(x.dot(&array_list![1, 1]), Ok(1.0));

        let a = array_list![1.5f32, 2.0, -1.0];
        let b = array_list![2.0f32, 0.5, 3.0];
        assert_eq!(a.dot(&b), Ok(1.0));
    }

    #[test]
    fn dot_does_not_overflow_narrow_types() {
        let a = array_list![200u8, 200];
        assert_eq!(a.dot(&a), Ok(80_000.0));
    }

    #[test]
    fn dot_of_empty_lists() {
        let empty = ArrayList::<i64>::new();
        assert_eq!(empty.dot(&ArrayList::new()), Ok(0.0));
    }

    #[test]
    fn dot_shape_mismatch() {
        let x = array_list![1, 2];
        let y = array_list![1, 2, 3];
        assert_eq!(
            x.dot(&y),
            Err(Error::ShapeMismatch {
                left: Shape::vector(2),
                right: Shape::vector(3),
            })
        );
    }

    #[test]
    fn sum() {
        assert_eq!(array_list![1, 2, 3].sum(), Ok(6));
        assert_eq!(array_list![0.5, 0.25].sum(), Ok(0.75));
        assert_eq!(array_list![-4i64].sum(), Ok(-4));
    }

    #[test]
    fn sum_of_strings_concatenates() {
        let words = array_list![String::from("ab"), String::from("c")];
        // `String: AddAssign<&str>` only, so go through a wrapper.
        #[derive(Clone, Debug, PartialEq)]
        struct Text(String);
        impl AddAssign for Text {
            fn add_assign(&mut self, rhs: Text) {
                self.0.push_str(&rhs.0);
            }
        }
        let texts: ArrayList<Text> = words.into_iter().map(Text).collect();
        assert_eq!(texts.sum(), Ok(Text(String::from("abc"))));
    }

    #[test]
    fn sum_of_empty_list_is_an_error() {
        assert_eq!(ArrayList::<i32>::new().sum(), Err(Error::EmptySum));
    }
}
