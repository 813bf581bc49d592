use core::fmt;

use allocator_api2::alloc::Allocator;

use crate::ArrayList;

/// Renders `[e0, e1, ..., en]`, or `[]` when empty.
impl<T: fmt::Display, A: Allocator> fmt::Display for ArrayList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ArrayList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "std")]
impl<T: fmt::Display, A: Allocator> ArrayList<T, A> {
    /// Writes the [`Display`](fmt::Display) form followed by `end`.
    pub fn write_to<W: std::io::Write>(&self, out: &mut W, end: &str) -> std::io::Result<()> {
        write!(out, "{self}{end}")
    }

    /// Prints the list to stdout on its own line.
    ///
    /// # Panics
    ///
    /// Panics if writing to stdout fails, like [`println!`].
    pub fn print(&self) {
        if let Err(err) = self.write_to(&mut std::io::stdout().lock(), "\n") {
            panic!("failed printing to stdout: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::{ArrayList, array_list};

    #[test]
    fn display() {
        expect!["[]"].assert_eq(&ArrayList::<i32>::new().to_string());
        expect!["[1, 2]"].assert_eq(&array_list![1, 2].to_string());
        expect!["[hello]"].assert_eq(&array_list!["hello"].to_string());
        expect!["[0.5, -1]"].assert_eq(&array_list![0.5, -1.0].to_string());
    }

    #[test]
    fn display_ignores_spare_capacity() {
        let mut list = ArrayList::with_capacity(8);
        list.push_back('x');
        expect!["[x]"].assert_eq(&list.to_string());
    }

    #[test]
    fn debug() {
        expect![[r#"["a", "b"]"#]].assert_eq(&format!("{:?}", array_list!["a", "b"]));
        expect!["[]"].assert_eq(&format!("{:?}", ArrayList::<u8>::new()));
    }

    #[cfg(feature = "std")]
    #[test]
    fn write_to_with_terminator() {
        let mut out = Vec::new();
        array_list![3, 4].write_to(&mut out, ";").unwrap();
        ArrayList::<i32>::new().write_to(&mut out, "\n").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[3, 4];[]\n");
    }

    #[cfg(feature = "std")]
    #[test]
    fn print_to_stdout() {
        array_list![1, 2, 3].print();
        ArrayList::<f64>::new().print();
    }
}
