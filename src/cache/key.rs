//! Request key construction

/// Separator between the base URL and each rendered parameter
const CONNECTOR: &str = "_";

/// Builds a key that uniquely and repeatably identifies a request by its base
/// URL and query parameters.
///
/// Each parameter is rendered as `name_value`, the rendered strings are sorted
/// and joined with `_`, and the result is appended to the base URL after one
/// more `_`. Parameter order never changes the key.
///
/// `_` and `%` inside names and values are percent-escaped first, so two
/// different parameter sets can never render to the same string.
///
/// # Examples
/// ```
/// use npsites::cache::build_key;
///
/// let key = build_key("https://api.test/search", [("origin", "49931"), ("radius", "10")]);
/// assert_eq!(key, "https://api.test/search_origin_49931_radius_10");
/// ```
pub fn build_key<I, K, V>(base_url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rendered: Vec<String> = params
        .into_iter()
        .map(|(k, v)| format!("{}{}{}", escape(k.as_ref()), CONNECTOR, escape(v.as_ref())))
        .collect();
    rendered.sort();

    format!("{}{}{}", base_url, CONNECTOR, rendered.join(CONNECTOR))
}

fn escape(s: &str) -> String {
    s.replace('%', "%25").replace('_', "%5F")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    const BASE: &str = "https://example.test/api";

    #[test]
    fn test_build_key_plain_params() {
        let key = build_key(BASE, [("origin", "49931"), ("radius", "10")]);
        assert_eq!(key, "https://example.test/api_origin_49931_radius_10");
    }

    #[test]
    fn test_build_key_is_order_independent() {
        let forward = build_key(BASE, [("a", "1"), ("b", "2"), ("c", "3")]);
        let backward = build_key(BASE, [("c", "3"), ("b", "2"), ("a", "1")]);
        let shuffled = build_key(BASE, [("b", "2"), ("c", "3"), ("a", "1")]);

        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_build_key_same_for_hashmap_and_btreemap() {
        let mut hashed = HashMap::new();
        let mut ordered = BTreeMap::new();
        for (k, v) in [("maxMatches", "10"), ("ambiguities", "ignore"), ("outFormat", "json")] {
            hashed.insert(k, v);
            ordered.insert(k, v);
        }

        assert_eq!(build_key(BASE, &hashed), build_key(BASE, &ordered));
    }

    #[test]
    fn test_build_key_no_params_keeps_connector() {
        let key = build_key(BASE, Vec::<(&str, &str)>::new());
        assert_eq!(key, "https://example.test/api_");
    }

    #[test]
    fn test_build_key_underscore_in_name_and_value_do_not_collide() {
        let left = build_key(BASE, [("a_b", "c")]);
        let right = build_key(BASE, [("a", "b_c")]);
        assert_ne!(left, right);
    }

    #[test]
    fn test_build_key_split_pairs_do_not_collide() {
        // One pair whose value looks like a second rendered pair
        let single = build_key(BASE, [("a", "1_b_2")]);
        let double = build_key(BASE, [("a", "1"), ("b", "2")]);
        assert_ne!(single, double);
    }

    #[test]
    fn test_build_key_escape_marker_does_not_collide() {
        let literal = build_key(BASE, [("a", "%5F")]);
        let underscore = build_key(BASE, [("a", "_")]);
        assert_ne!(literal, underscore);
    }

    #[test]
    fn test_build_key_distinct_values_give_distinct_keys() {
        let first = build_key(BASE, [("origin", "49931")]);
        let second = build_key(BASE, [("origin", "82190-0168")]);
        assert_ne!(first, second);
    }
}
