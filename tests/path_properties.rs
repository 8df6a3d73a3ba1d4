//! Property tests for endpoint path decomposition.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use promconf::settings::{parse_parameter_names, EndpointPath};
use proptest::prelude::*;

const SEGMENT: &str = "[a-zA-Z0-9 _.-]{1,10}";

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(SEGMENT, 1..6).prop_map(|segments| segments.join("/"))
}

proptest! {
    #[test]
    fn decomposed_path_reassembles(path in path_strategy()) {
        let decomposed = EndpointPath::parse(&path).unwrap();
        prop_assert_eq!(
            format!("{}{}", decomposed.url_name(), decomposed.additional_path()),
            path.clone()
        );
        prop_assert_eq!(decomposed.effective(), path);
    }

    #[test]
    fn url_name_is_first_segment(path in path_strategy()) {
        let decomposed = EndpointPath::parse(&path).unwrap();
        let first = path.split('/').next().unwrap();

        prop_assert_eq!(decomposed.url_name(), first);
        prop_assert!(!decomposed.url_name().contains('/'));
        prop_assert!(
            decomposed.additional_path().is_empty() || decomposed.additional_path().starts_with('/')
        );
        prop_assert_eq!(decomposed.additional_path().is_empty(), !path.contains('/'));
    }

    #[test]
    fn parameter_names_never_contain_separators(
        names in prop::collection::vec("[a-z_]{1,8}", 0..6),
        pad in " {0,3}",
    ) {
        let separator = format!("{},{}", pad, pad);
        let raw = names.join(separator.as_str());
        let parsed = parse_parameter_names(&format!("{}{}{}", pad, raw, pad));

        prop_assert_eq!(parsed, names);
    }
}

#[test]
fn test_documented_examples() {
    let single = EndpointPath::parse("metrics").unwrap();
    assert_eq!((single.url_name(), single.additional_path()), ("metrics", ""));

    let nested = EndpointPath::parse("a/b/c").unwrap();
    assert_eq!((nested.url_name(), nested.additional_path()), ("a", "/b/c"));
}
