//! Building [`Shape`] trees from key/value pairs, and deserializing them.
//!
//! ### An overview of the design
//!
//! This code is designed to handle non-ordered parameters. For example,
//! `struct { a: Vec<u8>, b: String }` might be sent as either
//! `a.0=1&a.1=2&b=Hello` or `a.1=2&b=Hello&a.0=1`.
//!
//! Rather than scanning the input each time a particular key is needed, the
//! pairs are first folded into a tree, and the tree is then deserialized.
//!
//! The `parse` module handles the first step. Every key is split into path
//! components by the `key` module, every value is percent-decoded, and the
//! leaves are inserted one by one into a tree of nested dictionaries. Two
//! pairs which give the same path different meanings are rejected instead
//! of silently overwriting each other, so the resulting tree does not depend
//! on the order of the pairs. Once all pairs are inserted, the map and list
//! strategies of the [`Config`] rewrite numbered entries.
//!
//! From here, `ShapeDeserializer` walks the tree for `serde`. Dictionaries
//! are visited as maps or structs, lists as sequences, and string leaves are
//! parsed on demand by `StringParsingDeserializer`.

mod key;
mod parse;
mod shape_de;
mod string_parser;
mod tokenize;

pub use self::key::{KeyPath, split_key};
pub use self::shape_de::ShapeDeserializer;
pub use self::tokenize::tokenize;

use serde::de;

use crate::config::Config;
use crate::error::Result;
use crate::shape::Shape;

use self::parse::TreeBuilder;
use self::parse::decode::decode_value;

/// Builds a [`Shape`] from an ordered list of `(key, value)` pairs.
///
/// Keys are split into path components according to `config`; values are
/// percent-decoded, and a missing value becomes [`Shape::Null`]. The result is
/// always a [`Shape::Dictionary`], and does not depend on the order of
/// `pairs`.
///
/// ```
/// use shape_qs::{Config, Shape};
///
/// let shape = shape_qs::parse(
///     [("action", Some("myAction")), ("map.id1", Some("value%201")), ("flag", None)],
///     &Config::default(),
/// )
/// .unwrap();
/// assert_eq!(shape.pointer(["map", "id1"]), Some(&Shape::from("value 1")));
/// assert_eq!(shape.get("flag"), Some(&Shape::Null));
/// ```
///
/// # Errors
///
/// - [`Error::MalformedEncoding`](crate::Error::MalformedEncoding) if a value
///   has an invalid percent-escape,
/// - [`Error::ConflictingPath`](crate::Error::ConflictingPath) if two pairs
///   give the same path different meanings,
/// - [`Error::UnrecognizedStrategy`](crate::Error::UnrecognizedStrategy) if
///   `config` cannot be interpreted.
pub fn parse<I, K, V>(pairs: I, config: &Config) -> Result<Shape>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut builder = TreeBuilder::new(config)?;
    #[cfg(feature = "tracing")]
    let mut count = 0usize;
    for (key, value) in pairs {
        #[cfg(feature = "tracing")]
        {
            count += 1;
        }
        let key = key.as_ref();
        let leaf = decode_value(value.as_ref().map(AsRef::as_ref), config.use_form_encoding)
            .map_err(|e| e.within(0, &format!("value of `{key}`")))?;
        builder.insert(key, leaf).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::trace!(key, error = %_err, "rejected pair");
        })?;
    }

    let shape = builder.finish()?;
    #[cfg(feature = "tracing")]
    tracing::trace!(pairs = count, "built shape");
    Ok(shape)
}

/// Deserializes a [`Shape`] into `T`.
pub fn from_shape<T: de::DeserializeOwned>(shape: Shape) -> Result<T> {
    T::deserialize(ShapeDeserializer::new(shape))
}

/// Deserializes `(key, value)` pairs into `T` using the default [`Config`].
///
/// ```
/// # use serde::Deserialize;
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Query {
///     action: String,
///     limit: Option<u32>,
/// }
///
/// let query: Query = shape_qs::from_pairs([("action", Some("list")), ("limit", Some("10"))])
///     .unwrap();
/// assert_eq!(query, Query { action: "list".to_owned(), limit: Some(10) });
/// ```
pub fn from_pairs<T, I, K, V>(pairs: I) -> Result<T>
where
    T: de::DeserializeOwned,
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Config::default().deserialize_pairs(pairs)
}

/// Deserializes a querystring into `T` using the default [`Config`].
///
/// ```
/// # use serde::Deserialize;
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Address {
///     city: String,
///     postcode: String,
/// }
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Query {
///     name: String,
///     address: Address,
///     user_ids: Vec<u8>,
/// }
///
/// let query: Query = shape_qs::from_str(
///     "name=Acme&address.city=Carrot%20City&address.postcode=12345&user_ids.1=2&user_ids.0=1",
/// )
/// .unwrap();
/// assert_eq!(query.address.city, "Carrot City");
/// assert_eq!(query.user_ids, vec![1, 2]);
/// ```
pub fn from_str<T: de::DeserializeOwned>(input: &str) -> Result<T> {
    Config::default().deserialize_str(input)
}
