// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
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

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    ([$($attrs:meta)*] value, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_value() {
            let engine = animo::Engine::default();
            let mut expr = build(&engine).expect("construction should succeed");
            let result = expr.evaluate().map(|value| animo::Value::clone(&value)).map_err(|err| err.kind);
            assert_case!(result, $expected);
        }
    };

    // Evaluates twice to check that reused results stay correct.
    ([$($attrs:meta)*] stable, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_stable() {
            let engine = animo::Engine::default();
            let mut expr = build(&engine).expect("construction should succeed");
            let _ = expr.evaluate();
            let result = expr.evaluate().map(|value| animo::Value::clone(&value)).map_err(|err| err.kind);
            assert_case!(result, $expected);
        }
    };

    ([$($attrs:meta)*] construction, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_construction() {
            let engine = animo::Engine::default();
            let result = build(&engine);
            assert_case!(result, $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields (now correctly capturing braces)
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    // Parse assertion field with potential attributes (handles both cases)
    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name first, input second, then any order for assertions.
// `input` builds the tree under test from an engine with the built-in
// catalogue.
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;

            fn build(
                engine: &animo::Engine,
            ) -> Result<animo::Expression, animo::ConstructionError> {
                let input: fn(&animo::Engine) -> Result<animo::Expression, animo::ConstructionError> =
                    $input;
                input(engine)
            }

            // Generate all test functions
            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}
