//! Request serialization properties.
//!
//! - Boolean flags are the literal strings `"true"`/`"false"`
//! - Parameter order is fixed
//! - The query survives encoding and is recoverable from a document link

use docsift::request::{self, document_href, query_from_href};
use docsift::types::{MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
use docsift::SearchOptions;
use proptest::prelude::*;

fn options_strategy() -> impl Strategy<Value = SearchOptions> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT,
    )
        .prop_map(|(spelling, synonyms, soundex, limit)| {
            SearchOptions::new(spelling, synonyms, soundex, limit).unwrap()
        })
}

fn literal(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: flags serialize to exactly "true"/"false", matching the input.
    #[test]
    fn prop_flags_are_literal_booleans(query in "\\PC{1,40}", options in options_strategy()) {
        let req = request::build(&query, options).unwrap();
        let pairs = req.query_pairs();

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(
            keys,
            vec!["q", "k", "use_spelling_correction", "use_synonyms", "use_soundex"]
        );
        prop_assert_eq!(pairs[1].1.clone(), options.result_limit().to_string());
        prop_assert_eq!(pairs[2].1.as_str(), literal(options.spelling_correction()));
        prop_assert_eq!(pairs[3].1.as_str(), literal(options.synonyms()));
        prop_assert_eq!(pairs[4].1.as_str(), literal(options.soundex()));
    }

    /// Property: the encoded query string has no raw separators from the query.
    #[test]
    fn prop_query_string_has_five_pairs(query in "\\PC{1,40}", options in options_strategy()) {
        let req = request::build(&query, options).unwrap();
        let qs = req.to_query_string();
        prop_assert_eq!(qs.split('&').count(), 5);
        prop_assert!(!qs.contains(' '));
        prop_assert!(!qs.contains('#'));
    }

    /// Property: building is pure.
    #[test]
    fn prop_build_is_deterministic(query in "\\PC{1,40}", options in options_strategy()) {
        let a = request::build(&query, options).unwrap();
        let b = request::build(&query, options).unwrap();
        prop_assert_eq!(a.url("http://h"), b.url("http://h"));
    }

    /// Property: the query carried on a document link comes back verbatim.
    #[test]
    fn prop_document_link_carries_query(filename in "[a-zA-Z0-9_. -]{1,20}", query in "\\PC{0,40}") {
        let href = document_href(&filename, &query);
        prop_assert_eq!(query_from_href(&href), Some(query));
    }
}
