//! Nested key/value pairs as tree-shaped values.
//!
//! Querystrings, form bodies and header blocks all arrive as a flat, ordered
//! list of `(key, value)` pairs. Structured data is encoded in that flat key
//! space by joining path components with a separator, e.g.
//! `map.id1=value1&map.id2=value2`.
//!
//! This library folds such pairs into a [`Shape`]: a tree of dictionaries,
//! lists, string leaves and nulls. The tree does not depend on the order of
//! the pairs, and pairs which contradict each other are reported as errors
//! rather than silently overwritten. A [`Shape`] can then be deserialized
//! into any `serde` type.
//!
//! ## Conventions
//!
//! The [`Config`] selects how keys are split ([`KeyDecoding`]), how maps are
//! represented ([`MapDecoding`]) and whether numbered entries become lists
//! ([`ListDecoding`]).
//!
//! ```
//! use shape_qs::{Config, MapDecoding, Shape};
//!
//! let pairs = [
//!     ("map.1.Name", Some("id1")),
//!     ("map.1.Value", Some("value1")),
//!     ("map.2.Name", Some("id2")),
//!     ("map.2.Value", Some("value2")),
//! ];
//!
//! // numbered groups stay as they are by default
//! let shape = shape_qs::parse(pairs, &Config::default()).unwrap();
//! assert_eq!(shape.pointer(["map", "2", "Name"]), Some(&Shape::from("id2")));
//!
//! // ...or are read as name/value pairs
//! let config = Config::new().map_decoding(MapDecoding::name_value_pairs());
//! let shape = config.parse_pairs(pairs).unwrap();
//! assert_eq!(shape.pointer(["map", "id2"]), Some(&Shape::from("value2")));
//! ```
//!
//! ## Usage
//!
//! ```
//! use serde::Deserialize;
//! use std::collections::HashMap;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Request {
//!     action: String,
//!     map: HashMap<String, String>,
//! }
//!
//! let request: Request =
//!     shape_qs::from_str("action=myAction&map.id1=value1&map.id2=value2").unwrap();
//! assert_eq!(request.action, "myAction");
//! assert_eq!(request.map["id2"], "value2");
//! ```

mod config;
mod de;
mod error;
mod map;
mod shape;

pub use config::{Config, KeyDecoding, ListDecoding, MapDecoding};
#[doc(inline)]
pub use de::{
    KeyPath, ShapeDeserializer, from_pairs, from_shape, from_str, parse, split_key, tokenize,
};
pub use error::{Error, Result};
pub use map::Map;
pub use shape::{Dictionary, Shape};
