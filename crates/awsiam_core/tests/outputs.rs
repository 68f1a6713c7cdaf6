//! Property tests for output indexing and lookup.

use awsiam_core::input::Input;
use awsiam_core::output::{Output, OutputError};
use core::future::IntoFuture;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// `index` agrees with slice indexing, and past the end it fails with
    /// the requested index and the actual length.
    #[test]
    fn prop_index_agrees_with_slice(items in prop::collection::vec(any::<i64>(), 0..8), index in 0..10_usize) {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let (deferred, resolver) = Output::<Vec<i64>>::pending();
        let selected = deferred.index(index);
        resolver.resolve(items.clone());

        let result = rt.block_on(selected.into_future());
        match items.get(index) {
            Some(expected) => prop_assert_eq!(result, Ok(*expected)),
            None => prop_assert_eq!(
                result,
                Err(OutputError::IndexOutOfRange { index, len: items.len() })
            ),
        }
    }

    /// `map_index` agrees with `HashMap::get`.
    #[test]
    fn prop_map_index_agrees_with_get(
        entries in prop::collection::hash_map("[a-d]", any::<bool>(), 0..4),
        key in "[a-e]",
    ) {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let output: Output<HashMap<String, bool>> = entries.to_output();

        let result = rt.block_on(output.map_index(key.clone()).into_future());
        prop_assert_eq!(result, Ok(entries.get(&key).copied()));
    }
}
