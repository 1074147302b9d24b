use crate::config::{Config, KeyDecoding};
use crate::error::{Error, Result};

/// The path components of a single key, e.g. `["map", "1", "Name"]` for
/// `map.1.Name`.
///
/// Always holds at least one component: the empty key is a single empty
/// component.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyPath<'k> {
    segments: Vec<&'k str>,
}

impl<'k> KeyPath<'k> {
    pub fn segments(&self) -> &[&'k str] {
        &self.segments
    }

    /// Splits into the intermediate components and the final one.
    pub fn split_last(&self) -> (&'k str, &[&'k str]) {
        match self.segments.split_last() {
            Some((last, parents)) => (*last, parents),
            None => ("", &[]),
        }
    }
}

/// Splits `key` into path components according to `config`.
///
/// Empty components are kept: `a..b` is `["a", "", "b"]`. At most
/// `max_depth` separators are honoured; the remainder of the key stays
/// in the last component.
pub fn split_key<'k>(key: &'k str, config: &Config) -> Result<KeyPath<'k>> {
    check_key_decoding(config)?;
    let segments = match config.key_decoding {
        KeyDecoding::Flat => vec![key],
        KeyDecoding::Separator(separator) => key
            .splitn(config.max_depth.saturating_add(1), separator)
            .collect(),
    };
    Ok(KeyPath { segments })
}

pub(crate) fn check_key_decoding(config: &Config) -> Result<()> {
    match config.key_decoding {
        KeyDecoding::Separator("") => Err(Error::UnrecognizedStrategy(
            "key separator cannot be empty".to_owned(),
        )),
        _ => Ok(()),
    }
}
