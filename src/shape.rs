use std::fmt;

use crate::error::{Error, Result};
use crate::map::{Entry, Map};

/// A dictionary node of a [`Shape`] tree.
pub type Dictionary = Map<String, Shape>;

/// The tree-shaped value built from a flat list of key/value pairs.
///
/// A `Shape` returned by [`parse`](crate::parse) always has a
/// [`Shape::Dictionary`] at its root.
///
/// - `String`: a leaf holding the decoded text, e.g. `name=Acme`
/// - `Dictionary`: nested entries, e.g. `user.name=John&user.age=30`
/// - `List`: positional entries, only produced with
///   [`ListDecoding::Indexed`](crate::ListDecoding::Indexed)
/// - `Null`: a key with no value at all, e.g. `flag`
#[derive(Clone, PartialEq, Eq)]
pub enum Shape {
    String(String),
    Dictionary(Dictionary),
    List(Vec<Shape>),
    Null,
}

impl Shape {
    /// An empty dictionary node.
    pub fn dictionary() -> Self {
        Shape::Dictionary(Dictionary::default())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Shape::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Shape::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Shape]> {
        match self {
            Shape::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Shape::Null)
    }

    /// Looks up a direct child of a dictionary node.
    pub fn get(&self, key: &str) -> Option<&Shape> {
        self.as_dictionary().and_then(|map| map.get(key))
    }

    /// Follows a sequence of dictionary keys from this node.
    pub fn pointer<'a, I>(&self, path: I) -> Option<&Shape>
    where
        I: IntoIterator<Item = &'a str>,
    {
        path.into_iter().try_fold(self, |node, key| node.get(key))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Shape::String(_) => "a value",
            Shape::Dictionary(_) => "a nested dictionary",
            Shape::List(_) => "a list",
            Shape::Null => "a key without value",
        }
    }

    /// Merges `other` into `self`.
    ///
    /// Dictionaries merge entry by entry. Anything else must be equal,
    /// otherwise the same `path` would be given two different meanings.
    pub(crate) fn merge(&mut self, other: Shape, path: &str) -> Result<()> {
        match (self, other) {
            (Shape::Dictionary(existing), Shape::Dictionary(incoming)) => {
                for (key, value) in incoming {
                    let child_path = format!("{path}.{key}");
                    match existing.entry(key) {
                        Entry::Vacant(v) => {
                            v.insert(value);
                        }
                        Entry::Occupied(mut o) => o.get_mut().merge(value, &child_path)?,
                    }
                }
                Ok(())
            }
            (existing, incoming) if *existing == incoming => Ok(()),
            (existing, incoming) => Err(Error::conflict(format!(
                "`{path}` is used for both {} and {}",
                existing.kind(),
                incoming.kind()
            ))),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String(s) => write!(f, "String({s:?})"),
            Shape::Dictionary(m) => f.debug_map().entries(m.iter()).finish(),
            Shape::List(l) => f.debug_list().entries(l.iter()).finish(),
            Shape::Null => write!(f, "Null"),
        }
    }
}

impl From<&str> for Shape {
    fn from(s: &str) -> Self {
        Shape::String(s.to_owned())
    }
}

impl From<String> for Shape {
    fn from(s: String) -> Self {
        Shape::String(s)
    }
}

impl From<Dictionary> for Shape {
    fn from(map: Dictionary) -> Self {
        Shape::Dictionary(map)
    }
}

impl From<Vec<Shape>> for Shape {
    fn from(list: Vec<Shape>) -> Self {
        Shape::List(list)
    }
}

impl<K: Into<String>> FromIterator<(K, Shape)> for Shape {
    fn from_iter<T: IntoIterator<Item = (K, Shape)>>(iter: T) -> Self {
        Shape::Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
