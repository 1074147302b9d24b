use serde::de::{self, Deserializer as _, IntoDeserializer, Unexpected};

use crate::error::{Error, Result};
use crate::shape::{Dictionary, Shape};

use super::string_parser::StringParsingDeserializer;

/// A `serde` deserializer over a [`Shape`] tree.
///
/// Leaves are parsed on demand into whatever the target type asks for.
/// [`Shape::Null`] means "present but empty": it becomes `None` for options,
/// the empty string for strings and an empty sequence or map for
/// collections. A missing key is simply not visited, so serde's own
/// `default` and missing-field handling applies.
pub struct ShapeDeserializer(Shape);

impl ShapeDeserializer {
    pub fn new(shape: Shape) -> Self {
        ShapeDeserializer(shape)
    }
}

impl<'de> IntoDeserializer<'de, Error> for Shape {
    type Deserializer = ShapeDeserializer;

    fn into_deserializer(self) -> Self::Deserializer {
        ShapeDeserializer(self)
    }
}

fn leaf<'a>(value: String) -> StringParsingDeserializer<'a, Error> {
    StringParsingDeserializer::new(value)
}

fn unexpected(shape: &Shape) -> Unexpected<'_> {
    match shape {
        Shape::String(s) => Unexpected::Str(s),
        Shape::Dictionary(_) => Unexpected::Map,
        Shape::List(_) => Unexpected::Seq,
        Shape::Null => Unexpected::Unit,
    }
}

/// Orders the entries of a dictionary like `{ "1": a, "0": b }` by index.
fn indexed_values(map: Dictionary) -> Result<Vec<Shape>> {
    let mut entries = map
        .into_iter()
        .map(|(key, value)| match key.parse::<usize>() {
            Ok(index) => Ok((index, value)),
            Err(_) => Err(Error::Custom(format!(
                "expected a sequence, found the non-numeric key `{key}`"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by_key(|(index, _)| *index);
    Ok(entries.into_iter().map(|(_, value)| value).collect())
}

macro_rules! deserialize_primitive {
    ($method:ident) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            match self.0 {
                Shape::String(s) => leaf(s).$method(visitor),
                other => ShapeDeserializer(other).deserialize_any(visitor),
            }
        }
    };
}

impl<'de> de::Deserializer<'de> for ShapeDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::String(s) => leaf(s).deserialize_any(visitor),
            Shape::Dictionary(map) => visitor.visit_map(DictionaryAccess::new(map)),
            Shape::List(list) => visitor.visit_seq(ListAccess(list.into_iter())),
            Shape::Null => visitor.visit_unit(),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::Null => visitor.visit_none(),
            other => visitor.visit_some(ShapeDeserializer(other)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::Null => visitor.visit_unit(),
            Shape::String(s) => leaf(s).deserialize_unit(visitor),
            other => ShapeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::Null => visitor.visit_str(""),
            other => ShapeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::Null => visitor.visit_bytes(&[]),
            Shape::String(s) => leaf(s).deserialize_bytes(visitor),
            other => ShapeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    /// Lists, index-keyed dictionaries (`ids.0=a&ids.1=b`), a single value
    /// (`ids=a`) and `Null` (no elements) can all be read as sequences.
    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let elements = match self.0 {
            Shape::List(list) => list,
            Shape::Dictionary(map) => indexed_values(map)?,
            Shape::Null => Vec::new(),
            value @ Shape::String(_) => vec![value],
        };
        visitor.visit_seq(ListAccess(elements.into_iter()))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::Dictionary(map) => visitor.visit_map(DictionaryAccess::new(map)),
            Shape::Null => visitor.visit_map(DictionaryAccess::new(Dictionary::default())),
            other => ShapeDeserializer(other).deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    /// Unit variants come from plain values (`colour=Red`), other variants
    /// from a dictionary with a single entry (`shape.Circle.radius=2`).
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Shape::String(s) => visitor.visit_enum(leaf(s)),
            Shape::Dictionary(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(VariantAccess { variant, value })
                    }
                    _ => Err(de::Error::custom(
                        "expected a dictionary with exactly one entry for an enum",
                    )),
                }
            }
            other => Err(de::Error::invalid_type(unexpected(&other), &"an enum variant")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    deserialize_primitive!(deserialize_bool);
    deserialize_primitive!(deserialize_i8);
    deserialize_primitive!(deserialize_i16);
    deserialize_primitive!(deserialize_i32);
    deserialize_primitive!(deserialize_i64);
    deserialize_primitive!(deserialize_i128);
    deserialize_primitive!(deserialize_u8);
    deserialize_primitive!(deserialize_u16);
    deserialize_primitive!(deserialize_u32);
    deserialize_primitive!(deserialize_u64);
    deserialize_primitive!(deserialize_u128);
    deserialize_primitive!(deserialize_f32);
    deserialize_primitive!(deserialize_f64);
    deserialize_primitive!(deserialize_char);
    deserialize_primitive!(deserialize_identifier);
}

struct DictionaryAccess {
    iter: <Dictionary as IntoIterator>::IntoIter,
    value: Option<Shape>,
}

impl DictionaryAccess {
    fn new(map: Dictionary) -> Self {
        DictionaryAccess {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for DictionaryAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(leaf(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ShapeDeserializer(value)),
            None => Err(de::Error::custom("value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct ListAccess(std::vec::IntoIter<Shape>);

impl<'de> de::SeqAccess<'de> for ListAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        self.0
            .next()
            .map(|value| seed.deserialize(ShapeDeserializer(value)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

struct VariantAccess {
    variant: String,
    value: Shape,
}

impl<'de> de::EnumAccess<'de> for VariantAccess {
    type Error = Error;
    type Variant = ShapeDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(leaf(self.variant))?;
        Ok((variant, ShapeDeserializer(self.value)))
    }
}

impl<'de> de::VariantAccess<'de> for ShapeDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.0 {
            Shape::Null => Ok(()),
            Shape::String(s) if s.is_empty() => Ok(()),
            other => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }
}
