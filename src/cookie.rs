//! Cookie parsing for handshake `Cookie` headers.

use crate::request::HandshakeRequest;

/// Name of the header cookies are derived from.
pub const COOKIE_HEADER: &str = "Cookie";

const PAIR_DELIMITER: &str = "; ";

/// A single cookie pair taken from a `Cookie` request header.
///
/// A pair written without `=` has no value at all, which is different from
/// a pair with an empty value (`name=`).
///
/// # Examples
///
/// ```
/// use handshake_adapter::Cookie;
///
/// let cookies = Cookie::parse_header("a=1; b=; c");
/// assert_eq!(cookies[0], Cookie::new("a", Some("1")));
/// assert_eq!(cookies[1].value(), Some(""));
/// assert_eq!(cookies[2].value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: Option<String>,
}

impl Cookie {
    /// Creates a cookie pair.
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    /// Returns the cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cookie value, or `None` when the pair had no `=`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Splits one `Cookie` header value into pairs, in order.
    ///
    /// Pairs are separated by exactly `"; "`. Each pair is split at its
    /// first `=`. Tokens with an empty name (`""` or `"=x"`) are dropped.
    pub fn parse_header(header_value: &str) -> Vec<Cookie> {
        header_value
            .split(PAIR_DELIMITER)
            .filter_map(|token| {
                let (name, value) = match token.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (token, None),
                };
                if name.is_empty() {
                    return None;
                }
                Some(Cookie::new(name, value))
            })
            .collect()
    }
}

/// Derives the cookie list of a handshake.
///
/// Returns `None` when the source has no `Cookie` header. Every value of the
/// header is parsed and the pairs are flattened in encounter order.
pub(crate) fn derive_cookies<S>(source: &S) -> Option<Vec<Cookie>>
where
    S: HandshakeRequest + ?Sized,
{
    let values = source.header_values(COOKIE_HEADER)?;
    let cookies: Vec<Cookie> = values
        .iter()
        .flat_map(|value| Cookie::parse_header(value))
        .collect();

    tracing::debug!(
        header_values = values.len(),
        cookies = cookies.len(),
        "derived handshake cookies"
    );

    Some(cookies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Handshake;

    fn handshake_with_cookies(values: &[&str]) -> Handshake {
        values.iter().fold(
            Handshake::new("/ws".parse().unwrap()),
            |handshake, value| handshake.add_header(COOKIE_HEADER, *value),
        )
    }

    #[test]
    fn parse_splits_pairs_in_order() {
        let cookies = Cookie::parse_header("a=1; b=2; c");

        assert_eq!(
            cookies,
            vec![
                Cookie::new("a", Some("1")),
                Cookie::new("b", Some("2")),
                Cookie::new("c", None::<String>),
            ]
        );
    }

    #[test]
    fn parse_splits_at_first_equals_only() {
        let cookies = Cookie::parse_header("token=abc==; q=x=y");

        assert_eq!(cookies[0].value(), Some("abc=="));
        assert_eq!(cookies[1].name(), "q");
        assert_eq!(cookies[1].value(), Some("x=y"));
    }

    #[test]
    fn parse_requires_space_after_semicolon() {
        // "a=1;b=2" is one pair because the delimiter is "; "
        let cookies = Cookie::parse_header("a=1;b=2");

        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value(), Some("1;b=2"));
    }

    #[test]
    fn parse_drops_empty_tokens() {
        assert!(Cookie::parse_header("").is_empty());
        assert_eq!(Cookie::parse_header("a=1; ").len(), 1);
    }

    #[test]
    fn parse_drops_pairs_without_a_name() {
        let cookies = Cookie::parse_header("=x; ; a; =");

        assert_eq!(cookies, vec![Cookie::new("a", None::<String>)]);
    }

    #[test]
    fn empty_value_differs_from_missing_value() {
        let cookies = Cookie::parse_header("empty=; bare");

        assert_eq!(cookies[0].value(), Some(""));
        assert_eq!(cookies[1].value(), None);
        assert_ne!(cookies[0], Cookie::new("empty", None::<String>));
    }

    #[test]
    fn derive_without_cookie_header_is_none() {
        let handshake = Handshake::new("/ws".parse().unwrap()).add_header("Host", "example.com");
        assert_eq!(derive_cookies(&handshake), None);
    }

    #[test]
    fn derive_flattens_multiple_header_values() {
        let handshake = handshake_with_cookies(&["a=1", "b=2"]);

        assert_eq!(
            derive_cookies(&handshake),
            Some(vec![Cookie::new("a", Some("1")), Cookie::new("b", Some("2"))])
        );
    }

    #[test]
    fn derive_keeps_order_across_values() {
        let handshake = handshake_with_cookies(&["z=26; y=25", "a=1"]);
        let names: Vec<String> = derive_cookies(&handshake)
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        assert_eq!(names, vec!["z", "y", "a"]);
    }

    #[test]
    fn derive_with_empty_header_value_is_empty_list() {
        let handshake = handshake_with_cookies(&[""]);
        assert_eq!(derive_cookies(&handshake), Some(Vec::new()));
    }

    mod proptests {
        use super::*;
        use crate::test_utils::{arb_cookie_name, arb_cookie_value, init_tracing};
        use proptest::prelude::*;

        proptest! {
            /// Property: every pair written survives parsing, in order
            #[test]
            fn proptest_parse_recovers_pairs(
                pairs in prop::collection::vec(
                    (arb_cookie_name(), prop::option::of(arb_cookie_value())),
                    1..8,
                )
            ) {
                let header = pairs
                    .iter()
                    .map(|(name, value)| match value {
                        Some(value) => format!("{}={}", name, value),
                        None => name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(PAIR_DELIMITER);

                let cookies = Cookie::parse_header(&header);

                prop_assert_eq!(cookies.len(), pairs.len());
                for (cookie, (name, value)) in cookies.iter().zip(&pairs) {
                    prop_assert_eq!(cookie.name(), name.as_str());
                    prop_assert_eq!(cookie.value(), value.as_deref());
                }
            }

            /// Property: splitting pairs across header values does not change the list
            #[test]
            fn proptest_derive_flattens_header_values(
                names in prop::collection::vec(arb_cookie_name(), 1..8),
                split in 0usize..8,
            ) {
                init_tracing();
                let pairs: Vec<String> = names.iter().map(|n| format!("{}=v", n)).collect();
                let split = split.min(pairs.len());
                let (first, second) = pairs.split_at(split);

                let joined = handshake_with_cookies(&[pairs.join(PAIR_DELIMITER).as_str()]);
                let mut values = Vec::new();
                if !first.is_empty() {
                    values.push(first.join(PAIR_DELIMITER));
                }
                if !second.is_empty() {
                    values.push(second.join(PAIR_DELIMITER));
                }
                let value_refs: Vec<&str> = values.iter().map(String::as_str).collect();
                let spread = handshake_with_cookies(&value_refs);

                prop_assert_eq!(derive_cookies(&joined), derive_cookies(&spread));
            }
        }
    }
}
