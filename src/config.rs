use serde::de;

use crate::error::Result;
use crate::shape::Shape;

/// Configuration for turning key/value pairs into a [`Shape`].
///
/// The `Config` struct selects how keys are split into path components,
/// how map-like and list-like structures are recognised, and how values are
/// percent-decoded. It is `Copy` and meant to be built once and reused.
///
/// ## Nesting Depth
///
/// The `max_depth` parameter controls how many nested dictionaries a single
/// key may create. This is important for preventing denial-of-service attacks
/// from maliciously crafted inputs with excessive nesting. Once the limit is
/// reached, the rest of the key is kept as one component, separators included.
/// A `max_depth` of 0 means no nesting is allowed (flat key-value pairs only).
/// Larger values are clamped to [`Config::DEPTH_LIMIT`].
///
/// Default value: `max_depth = 5`
///
/// ```
/// use shape_qs::{Config, Shape};
///
/// let config = Config::new().max_depth(1);
/// let shape = config.parse_pairs([("a.b.c", Some("1"))]).unwrap();
/// assert_eq!(shape.pointer(["a", "b.c"]), Some(&Shape::from("1")));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) max_depth: usize,
    pub(crate) use_form_encoding: bool,
    pub(crate) key_decoding: KeyDecoding,
    pub(crate) map_decoding: MapDecoding,
    pub(crate) list_decoding: ListDecoding,
}

/// How a raw key is split into path components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDecoding {
    /// Split on every occurrence of the separator, e.g. `a.b.c` with `"."`.
    Separator(&'static str),
    /// Never split: every key is a single top-level entry.
    Flat,
}

/// How maps are represented in the flat key space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapDecoding {
    /// A map is a dictionary of its own keys: `map.id1=value1`.
    SingleShapeEntry,
    /// A map is a list of numbered groups:
    /// `map.1.Name=id1&map.1.Value=value1`.
    ///
    /// Such groups are collapsed into a dictionary `{ id1: value1 }`.
    NameValuePairs {
        name: &'static str,
        value: &'static str,
    },
}

impl MapDecoding {
    /// `NameValuePairs` using the `Name` and `Value` labels.
    pub const fn name_value_pairs() -> Self {
        MapDecoding::NameValuePairs {
            name: "Name",
            value: "Value",
        }
    }
}

/// How numbered path components are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListDecoding {
    /// Use `ids.1=a&ids.2=b` as a dictionary keyed by `"1"` and `"2"`.
    Keyed,
    /// Turn a dictionary whose keys are all numbers into a list,
    /// ordered by index.
    Indexed,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// The largest accepted `max_depth`.
    ///
    /// Building, merging and decoding a [`Shape`] recurse once per level,
    /// so the nesting depth must stay small enough for the stack.
    pub const DEPTH_LIMIT: usize = 128;

    pub const fn new() -> Self {
        Self {
            max_depth: 5,
            use_form_encoding: false,
            key_decoding: KeyDecoding::Separator("."),
            map_decoding: MapDecoding::SingleShapeEntry,
            list_decoding: ListDecoding::Keyed,
        }
    }

    /// Specifies the maximum number of nested dictionaries a single key
    /// can create. Default is 5, and anything above
    /// [`Config::DEPTH_LIMIT`] is clamped to it.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = if max_depth > Self::DEPTH_LIMIT {
            Self::DEPTH_LIMIT
        } else {
            max_depth
        };
        self
    }

    /// By default, values are only percent-decoded and a `+` is kept as is.
    ///
    /// With form encoding (`application/x-www-form-urlencoded`), a `+`
    /// is decoded to a space.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Specifies how keys are split. The default splits on `"."`.
    pub const fn key_decoding(mut self, key_decoding: KeyDecoding) -> Self {
        self.key_decoding = key_decoding;
        self
    }

    /// Specifies how maps are recognised. The default is
    /// [`MapDecoding::SingleShapeEntry`].
    pub const fn map_decoding(mut self, map_decoding: MapDecoding) -> Self {
        self.map_decoding = map_decoding;
        self
    }

    /// Specifies whether numbered entries become lists. The default is
    /// [`ListDecoding::Keyed`].
    pub const fn list_decoding(mut self, list_decoding: ListDecoding) -> Self {
        self.list_decoding = list_decoding;
        self
    }

    /// Builds a [`Shape`] from key/value pairs using this `Config`.
    pub fn parse_pairs<I, K, V>(&self, pairs: I) -> Result<Shape>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        crate::de::parse(pairs, self)
    }

    /// Builds a [`Shape`] from a querystring using this `Config`.
    pub fn parse_str(&self, input: &str) -> Result<Shape> {
        let pairs = crate::de::tokenize(input, self)?;
        self.parse_pairs(pairs)
    }

    /// Deserializes key/value pairs into `T` using this `Config`.
    pub fn deserialize_pairs<T, I, K, V>(&self, pairs: I) -> Result<T>
    where
        T: de::DeserializeOwned,
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        crate::de::from_shape(self.parse_pairs(pairs)?)
    }

    /// Deserializes a querystring into `T` using this `Config`.
    pub fn deserialize_str<T: de::DeserializeOwned>(&self, input: &str) -> Result<T> {
        crate::de::from_shape(self.parse_str(input)?)
    }
}
