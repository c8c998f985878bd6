//! CLI parsing tests for query command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::db::QueryArg;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_required_arg_test! {
        command: "query",
        test_name: test_query_requires_name,
        required_arg: "<NAME>",
    }

    crate::cli_option_test! {
        command: "query",
        variant: Query,
        test_name: test_query_name,
        args: ["countries_all"],
        field: name,
        expected: "countries_all",
    }

    crate::cli_option_test! {
        command: "query",
        variant: Query,
        test_name: test_query_coerces_args,
        args: ["dem_by_year", "-a", "year=2020", "--arg", "type=t", "-a", "flag=true"],
        field: args,
        expected: vec![
            ("year".to_string(), QueryArg::Integer(2020)),
            ("type".to_string(), QueryArg::Text("t".to_string())),
            ("flag".to_string(), QueryArg::Boolean(true)),
        ],
    }

    crate::cli_option_test! {
        command: "query",
        variant: Query,
        test_name: test_query_value_may_contain_equals,
        args: ["q", "-a", "expr=a=b"],
        field: args,
        expected: vec![("expr".to_string(), QueryArg::Text("a=b".to_string()))],
    }

    crate::cli_error_test! {
        command: "query",
        test_name: test_query_arg_without_equals_rejected,
        args: ["countries_all", "-a", "year"],
    }

    crate::cli_error_test! {
        command: "query",
        test_name: test_query_arg_without_key_rejected,
        args: ["countries_all", "-a", "=2020"],
    }
}
