use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::shape::Shape;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

/// Decodes the input string, applying the following:
/// - Decodes percent-encoded characters
/// - Replaces `+` with a space, if `use_form_encoding` is set
/// - Checks the result is valid UTF-8
///
/// A `%` that is not followed by two hex digits is an error, and so is a
/// decoded byte sequence which is not UTF-8. Both are reported at a byte
/// offset in `input`: the `%` itself, or the start of the escape (or plain
/// byte) which produced the first invalid byte.
pub fn decode(input: &str, use_form_encoding: bool) -> Result<Cow<'_, str>> {
    let bytes = input.as_bytes();
    if !bytes
        .iter()
        .any(|&b| b == b'%' || (use_form_encoding && b == b'+'))
    {
        return Ok(Cow::Borrowed(input));
    }

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut last_segment = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b'+' if use_form_encoding => {
                decoded.extend_from_slice(&bytes[last_segment..idx]);
                decoded.push(b' ');
                idx += 1;
                last_segment = idx;
            }
            b'%' => {
                let escape = bytes.get(idx + 1..idx + 3).and_then(|pair| {
                    let h = char_to_digit(pair[0])?;
                    let l = char_to_digit(pair[1])?;
                    Some(h * 0x10 + l)
                });
                let Some(decoded_byte) = escape else {
                    let end = bytes.len().min(idx + 3);
                    return Err(Error::malformed(
                        format!(
                            "invalid percent-escape `{}`",
                            String::from_utf8_lossy(&bytes[idx..end])
                        ),
                        idx,
                    ));
                };
                decoded.extend_from_slice(&bytes[last_segment..idx]);
                decoded.push(decoded_byte);
                idx += 3;
                last_segment = idx;
            }
            _ => idx += 1,
        }
    }

    decoded.extend_from_slice(&bytes[last_segment..]);
    String::from_utf8(decoded).map(Cow::Owned).map_err(|e| {
        Error::malformed(
            "percent-decoded text is not valid UTF-8",
            input_offset(bytes, e.utf8_error().valid_up_to()),
        )
    })
}

/// Maps an offset into the decoded bytes back to `input`, whose escapes are
/// known to be well-formed.
fn input_offset(input: &[u8], decoded_offset: usize) -> usize {
    let mut idx = 0;
    for _ in 0..decoded_offset {
        idx += match input.get(idx) {
            Some(b'%') => 3,
            _ => 1,
        };
    }
    idx
}

/// Turns a raw value into a leaf of the tree.
///
/// A missing value is [`Shape::Null`]; anything else, including the empty
/// string, is a decoded [`Shape::String`].
pub fn decode_value(value: Option<&str>, use_form_encoding: bool) -> Result<Shape> {
    match value {
        None => Ok(Shape::Null),
        Some(raw) => Ok(Shape::String(decode(raw, use_form_encoding)?.into_owned())),
    }
}
