use std::borrow::Cow;

use crate::config::Config;
use crate::error::Result;

use super::parse::decode::decode;

/// Splits a querystring into `(key, value)` pairs, in input order.
///
/// Pairs are separated by `&` and empty segments are skipped. A segment
/// without `=` yields a key with no value (`flag` in `flag&a=1`), while
/// `a=` yields an empty value. Keys are percent-decoded here; values are
/// returned raw, to be decoded by [`parse`](crate::parse).
///
/// ```
/// let pairs = shape_qs::tokenize("action=myAction&map.id1=value%201&flag", &Default::default())
///     .unwrap();
/// assert_eq!(pairs[0], ("action".into(), Some("myAction")));
/// assert_eq!(pairs[1], ("map.id1".into(), Some("value%201")));
/// assert_eq!(pairs[2], ("flag".into(), None));
/// ```
pub fn tokenize<'qs>(
    input: &'qs str,
    config: &Config,
) -> Result<Vec<(Cow<'qs, str>, Option<&'qs str>)>> {
    let mut pairs = Vec::new();
    let mut offset = 0;
    for segment in input.split('&') {
        let start = offset;
        offset += segment.len() + 1;
        if segment.is_empty() {
            continue;
        }

        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (segment, None),
        };
        let key = decode(key, config.use_form_encoding).map_err(|e| e.within(start, "key"))?;
        pairs.push((key, value));
    }
    Ok(pairs)
}
