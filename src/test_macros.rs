//! Test generators shared by the `demography` subcommands.
//!
//! Every command module checks the same three things: how clap parses its
//! flags, what `execute` returns against the fixture store, and how the result
//! renders in each output format. Each macro expands to one test function.

/// `test_defaults`: parse the subcommand with only its required flags and
/// compare each listed field with its clap default.
#[macro_export]
macro_rules! cli_defaults_test {
    (
        command: $cmd:literal,
        variant: $variant:ident,
        required_args: [$($req_arg:literal),*],
        defaults: {
            $($def_field:ident : $def_expected:expr),* $(,)?
        } $(,)?
    ) => {
        #[rstest]
        fn test_defaults() {
            let args = Args::try_parse_from(["demography", $cmd, $($req_arg),*]).unwrap();
            match args.command {
                crate::commands::Command::$variant(cmd) => {
                    $(
                        assert_eq!(cmd.$def_field, $def_expected,
                            concat!("default of --", stringify!($def_field)));
                    )*
                }
                _ => panic!(concat!("Expected ", stringify!($variant), " command")),
            }
        }
    };
}

/// Parse one flag combination and compare a single field of the parsed command.
#[macro_export]
macro_rules! cli_option_test {
    (
        command: $cmd:literal,
        variant: $variant:ident,
        test_name: $test_name:ident,
        args: [$($arg:literal),+],
        field: $field:ident,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let args = Args::try_parse_from([
                "demography",
                $cmd,
                $($arg),+
            ]).unwrap();
            match args.command {
                crate::commands::Command::$variant(cmd) => {
                    assert_eq!(cmd.$field, $expected,
                        concat!("parsed ", stringify!($field)));
                }
                _ => panic!(concat!("Expected ", stringify!($variant), " command")),
            }
        }
    };
}

/// Parsing the bare subcommand fails, and clap's message names the missing flag.
///
/// # Example
///
/// ```ignore
/// cli_required_arg_test! {
///     command: "pyramid",
///     test_name: test_requires_country,
///     required_arg: "--country",
/// }
/// ```
#[macro_export]
macro_rules! cli_required_arg_test {
    (
        command: $cmd:literal,
        test_name: $test_name:ident,
        required_arg: $arg:literal $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let result = Args::try_parse_from(["demography", $cmd]);
            assert!(result.is_err(), concat!($cmd, " parsed without ", $arg));
            assert!(
                result.unwrap_err().to_string().contains($arg),
                concat!("clap error does not name ", $arg)
            );
        }
    };
}

/// The given flags are rejected at parse time, e.g. a year outside the data.
///
/// # Example
///
/// ```ignore
/// cli_error_test! {
///     command: "fertility",
///     test_name: test_year_before_range_rejected,
///     args: ["--year", "1900"],
/// }
/// ```
#[macro_export]
macro_rules! cli_error_test {
    (
        command: $cmd:literal,
        test_name: $test_name:ident,
        args: [$($arg:literal),+] $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let result = Args::try_parse_from([
                "demography",
                $cmd,
                $($arg),+
            ]);
            assert!(result.is_err());
        }
    };
}

// =============================================================================
// Execute Test Macros
// =============================================================================

/// Run `execute` on the fixture store (four countries, seeded demography and
/// fertility rows) and hand the result to the assertion block.
///
/// # Example
/// ```ignore
/// execute_test! {
///     test_name: test_pyramid_for_spain,
///     cmd: PyramidCmd { country: CountryKey::new("ESP"), year: 2023 },
///     assertions: |result| {
///         assert_eq!(result.items.len(), 5);
///     },
/// }
/// ```
#[macro_export]
macro_rules! execute_test {
    (
        test_name: $test_name:ident,
        cmd: $cmd:expr,
        assertions: |$result:ident| $assertions:block $(,)?
    ) => {
        #[tokio::test]
        async fn $test_name() {
            use crate::commands::Execute;
            let store = crate::test_utils::seeded_store().await;
            let $result = $cmd.execute(&store).await.expect("execute against fixture store");
            $assertions
        }
    };
}

/// `test_empty_db`: the catalog is loaded but no tables exist, so `execute`
/// must surface the engine error.
#[macro_export]
macro_rules! execute_empty_db_test {
    (
        cmd: $cmd:expr $(,)?
    ) => {
        #[tokio::test]
        async fn test_empty_db() {
            use crate::commands::Execute;
            let store = crate::test_utils::empty_store().await;
            let result = $cmd.execute(&store).await;
            assert!(result.is_err());
        }
    };
}

// =============================================================================
// Output Test Macros
// =============================================================================

/// Compare the whole table rendering of an rstest fixture with `expected`.
#[macro_export]
macro_rules! output_table_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::Outputable;
            assert_eq!($fixture.to_table(), $expected);
        }
    };
}

/// Check that the table rendering contains each needle, for results whose
/// column widths depend on the data.
#[macro_export]
macro_rules! output_table_contains_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        contains: [$($needle:literal),* $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::Outputable;
            let output = $fixture.to_table();
            $(
                assert!(output.contains($needle), concat!("table is missing ", $needle));
            )*
        }
    };
}

/// Parse the JSON rendering and compare top-level fields.
///
/// # Example
/// ```ignore
/// output_json_test! {
///     test_name: test_format_json,
///     fixture: spain_pyramid,
///     fixture_type: PopulationPyramid,
///     assertions: {
///         "type": "PopulationPyramid",
///     },
/// }
/// ```
#[macro_export]
macro_rules! output_json_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        assertions: { $($field:literal : $expected:expr),* $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{Outputable, OutputFormat};
            let output = $fixture.format(OutputFormat::Json);
            let parsed: serde_json::Value = serde_json::from_str(&output)
                .expect("JSON rendering parses");
            $(
                assert_eq!(parsed[$field], $expected, concat!("JSON field ", $field));
            )*
        }
    };
}

/// Check that the toon rendering contains each needle.
#[macro_export]
macro_rules! output_toon_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        contains: [$($needle:literal),* $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{Outputable, OutputFormat};
            let output = $fixture.format(OutputFormat::Toon);
            $(
                assert!(output.contains($needle), concat!("toon is missing ", $needle));
            )*
        }
    };
}
