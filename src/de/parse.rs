use crate::config::{Config, KeyDecoding, ListDecoding, MapDecoding};
use crate::error::{Error, Result};
use crate::map::Entry;
use crate::shape::{Dictionary, Shape};

use super::key::{check_key_decoding, split_key};

pub(crate) mod decode;

/// Folds `(key, leaf)` pairs into a single dictionary tree.
///
/// Each key is split into path components. Intermediate components create
/// (or re-use) nested dictionaries, the last component receives the leaf.
/// Inserting the same leaf twice is harmless, but re-using a leaf as a
/// dictionary, or giving a key two different values, is a
/// [`Error::ConflictingPath`]. Because of this, the resulting tree does not
/// depend on the order of the pairs.
pub(crate) struct TreeBuilder<'c> {
    root: Dictionary,
    config: &'c Config,
}

impl<'c> TreeBuilder<'c> {
    pub fn new(config: &'c Config) -> Result<Self> {
        validate(config)?;
        Ok(TreeBuilder {
            root: Dictionary::default(),
            config,
        })
    }

    pub fn insert(&mut self, key: &str, leaf: Shape) -> Result<()> {
        let config = self.config;
        let path = split_key(key, config)?;
        let (last, parents) = path.split_last();

        let mut node = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let child = node
                .entry((*segment).to_owned())
                .or_insert_with(Shape::dictionary);
            node = match child {
                Shape::Dictionary(map) => map,
                other => {
                    return Err(Error::conflict(format!(
                        "`{key}` uses `{}` as a nested dictionary, but it is already {}",
                        prefix(config, parents, depth),
                        other.kind()
                    )));
                }
            };
        }

        match node.entry(last.to_owned()) {
            Entry::Vacant(v) => {
                v.insert(leaf);
            }
            Entry::Occupied(mut o) => o.get_mut().merge(leaf, key)?,
        }
        Ok(())
    }

    /// Applies the map and list strategies and returns the finished tree.
    ///
    /// The root always stays a dictionary.
    pub fn finish(self) -> Result<Shape> {
        let mut root = Dictionary::default();
        for (key, child) in self.root {
            let child = normalize(child, self.config, &key)?;
            root.insert(key, child);
        }
        Ok(Shape::Dictionary(root))
    }
}

/// The key up to and including the component at `depth`.
fn prefix(config: &Config, parents: &[&str], depth: usize) -> String {
    match config.key_decoding {
        KeyDecoding::Separator(separator) => parents[..=depth].join(separator),
        KeyDecoding::Flat => parents[..=depth].concat(),
    }
}

fn validate(config: &Config) -> Result<()> {
    check_key_decoding(config)?;
    if let MapDecoding::NameValuePairs { name, value } = config.map_decoding {
        if name.is_empty() || value.is_empty() || name == value {
            return Err(Error::UnrecognizedStrategy(format!(
                "name/value pair labels must be distinct and non-empty, got `{name}` and `{value}`"
            )));
        }
    }
    Ok(())
}

fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Rewrites the subtree at `path` bottom-up according to the map and list
/// strategies.
///
/// Recursion is bounded by the nesting depth, which `max_depth` caps at
/// [`Config::DEPTH_LIMIT`].
fn normalize(shape: Shape, config: &Config, path: &str) -> Result<Shape> {
    let Shape::Dictionary(map) = shape else {
        return Ok(shape);
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, child) in map {
        let child = normalize(child, config, &format!("{path}.{key}"))?;
        entries.push((key, child));
    }

    let is_indexed =
        !entries.is_empty() && entries.iter().all(|(key, _)| parse_index(key).is_some());
    if !is_indexed {
        return Ok(Shape::Dictionary(entries.into_iter().collect()));
    }
    entries.sort_by(|(a, _), (b, _)| parse_index(a).cmp(&parse_index(b)).then_with(|| a.cmp(b)));

    if let MapDecoding::NameValuePairs { name, value } = config.map_decoding {
        if entries
            .iter()
            .all(|(_, group)| is_name_value_group(group, name, value))
        {
            return collect_name_value_pairs(entries, name, value, path);
        }
    }

    match config.list_decoding {
        ListDecoding::Indexed => Ok(Shape::List(
            entries.into_iter().map(|(_, child)| child).collect(),
        )),
        ListDecoding::Keyed => Ok(Shape::Dictionary(entries.into_iter().collect())),
    }
}

fn is_name_value_group(group: &Shape, name: &str, value: &str) -> bool {
    match group {
        Shape::Dictionary(fields) => {
            matches!(fields.get(name), Some(Shape::String(_)))
                && fields.keys().all(|k| k == name || k == value)
        }
        _ => false,
    }
}

/// Collapses `1.Name=id1&1.Value=value1` groups into `{ id1: value1 }`.
fn collect_name_value_pairs(
    groups: Vec<(String, Shape)>,
    name: &str,
    value: &str,
    path: &str,
) -> Result<Shape> {
    let mut map = Dictionary::default();
    for (_, group) in groups {
        let Shape::Dictionary(fields) = group else {
            continue;
        };
        let mut entry_name = None;
        let mut entry_value = Shape::Null;
        for (label, field) in fields {
            if label == name {
                entry_name = field.as_str().map(str::to_owned);
            } else if label == value {
                entry_value = field;
            }
        }
        let Some(entry_name) = entry_name else {
            continue;
        };
        let entry_path = format!("{path}.{entry_name}");
        match map.entry(entry_name) {
            Entry::Vacant(v) => {
                v.insert(entry_value);
            }
            Entry::Occupied(mut o) => o.get_mut().merge(entry_value, &entry_path)?,
        }
    }
    Ok(Shape::Dictionary(map))
}
