//! Macros for ergonomic rule parameters.

/// Build a [`Params`](crate::core::Params) bag of plain values.
///
/// Keys are identifiers; values are anything `serde_json::json!` accepts as a
/// single token tree, optionally negated.
///
/// # Example
///
/// ```
/// use fieldrule::params;
///
/// let params = params! {
///     min_size: 2,
///     max_size: 5,
///     types: ["string"],
///     offset: -1,
/// };
///
/// assert_eq!(params.usize("max_size").unwrap(), Some(5));
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["min_size", "max_size", "types", "offset"]);
/// ```
#[macro_export]
macro_rules! params {
    (@acc $params:expr ;) => {
        $params
    };
    (@acc $params:expr ; $key:ident : - $value:tt $(, $($rest:tt)*)?) => {
        $crate::params!(
            @acc $params.with(stringify!($key), $crate::__serde_json::json!(-$value)) ;
            $($($rest)*)?
        )
    };
    (@acc $params:expr ; $key:ident : $value:tt $(, $($rest:tt)*)?) => {
        $crate::params!(
            @acc $params.with(stringify!($key), $crate::__serde_json::json!($value)) ;
            $($($rest)*)?
        )
    };
    ($($body:tt)*) => {
        $crate::params!(@acc $crate::core::Params::new() ; $($body)*)
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn empty_params() {
        let params = params! {};
        assert!(params.is_empty());
    }

    #[test]
    fn values_keep_declaration_order() {
        let params = params! { types: ["string", "null"], min_size: 2, strict: true };

        assert_eq!(
            params.names().collect::<Vec<_>>(),
            vec!["types", "min_size", "strict"]
        );
        assert_eq!(
            params.value("types").unwrap(),
            Some(&json!(["string", "null"]))
        );
    }

    #[test]
    fn negative_and_nested_values() {
        let params = params! {
            min_value: -10,
            limits: { "low": -1.5, "high": 2 },
        };

        assert_eq!(params.f64("min_value").unwrap(), Some(-10.0));
        assert_eq!(
            params.value("limits").unwrap(),
            Some(&json!({ "low": -1.5, "high": 2 }))
        );
    }
}
