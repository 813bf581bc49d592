// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Pattern matching cases - detect common pattern forms
    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Some($($pattern:tt)*) }) => {
        match $result {
            Some($($pattern)*) => {},
            other => panic!("Expected Some({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { None }) => {
        match $result {
            None => {},
            other => panic!("Expected None but got {:#?}", other),
        }
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        match $result {
            Ok(actual) => {
                pretty_assertions::assert_eq!($expected, actual, "Expected {:#?} but got {:#?}\n\n< expected / got >", $expected, actual);
            },
            other => panic!("Expected Ok(...) but got {:?}", other),
        }
    };
}

// Generates one test function per assertion field.
// Every test starts from a fresh `input()` and replays the operation.
#[macro_export]
macro_rules! handle_case {
    ([$($attrs:meta)*] result, $expected:tt, ($list:ident, $op:expr)) => {
        $(#[$attrs])*
        #[test]
        fn validate_result() {
            let mut $list = input();
            let result = $op;
            assert_case!(result, $expected);
        }
    };

    ([$($attrs:meta)*] contents, $expected:tt, ($list:ident, $op:expr)) => {
        $(#[$attrs])*
        #[test]
        fn validate_contents() {
            let mut $list = input();
            let _ = $op;
            let expected: &[i64] = &$expected;
            pretty_assertions::assert_eq!($list.as_slice(), expected);
        }
    };

    ([$($attrs:meta)*] len, $expected:tt, ($list:ident, $op:expr)) => {
        $(#[$attrs])*
        #[test]
        fn validate_len() {
            let mut $list = input();
            let _ = $op;
            pretty_assertions::assert_eq!($list.len(), $expected);
        }
    };

    ([$($attrs:meta)*] capacity, $expected:tt, ($list:ident, $op:expr)) => {
        $(#[$attrs])*
        #[test]
        fn validate_capacity() {
            let mut $list = input();
            let _ = $op;
            pretty_assertions::assert_eq!($list.capacity(), $expected);
        }
    };

    ([$($attrs:meta)*] formatted, $expected:tt, ($list:ident, $op:expr)) => {
        $(#[$attrs])*
        #[test]
        fn validate_formatted() {
            let mut $list = input();
            let _ = $op;
            pretty_assertions::assert_eq!($list.to_string(), $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt, $op:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*] $op:tt) => {
        $($test_functions)*
    };

    // Parse assertion field with potential attributes
    (@parse [$($test_functions:tt)*] $op:tt $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value, $op}
        ] $op $($rest)*}
    };
}

// Main macro - name first, input and op second, then any order for assertions
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        op: |$list:ident| $op:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, unused_mut, dead_code)]

            use super::*;

            fn input() -> ArrayList<i64> {
                $input
            }

            // Generate all test functions
            parse_assertions! {@parse [] ($list, $op) $($assertion_fields)*}
        }
    };
}
