//! JSON encoding of request bodies and decoding of response bodies.
//!
//! Response decoding binds JSON object keys to struct fields ignoring ASCII
//! case, so a field `value` accepts `value`, `Value` and `VALUE`. The match is
//! done against the field list serde hands to `deserialize_struct`, which
//! means it also applies to `#[serde(rename)]`d fields and aliases, at any
//! nesting depth.
//!
//! Limitations: `#[serde(flatten)]` goes through `deserialize_map` and is
//! matched exactly; if two keys in one object fold to the same field the
//! derive reports a duplicate field.

use serde::de::value::StringDeserializer;
use serde::de::{
    self, DeserializeOwned, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde::Serialize;
use serde_json::{Map, Value};

/// Content type sent with JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Decode a response body.
///
/// An empty or whitespace-only body yields `T::default()`.
pub fn decode_response<T>(body: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    let value: Value = serde_json::from_str(body)?;
    from_value_case_insensitive(value)
}

/// Deserialize a JSON value, matching struct fields case-insensitively.
pub fn from_value_case_insensitive<T>(value: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    T::deserialize(CaseInsensitive(value))
}

/// Encode a request body as JSON text. `null` means "no body".
pub fn encode_body<B>(body: &B) -> Result<Option<String>, serde_json::Error>
where
    B: Serialize + ?Sized,
{
    let value = serde_json::to_value(body)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::to_string(&value).map(Some)
}

/// A `serde_json::Value` deserializer that folds object keys onto struct
/// field names.
struct CaseInsensitive(Value);

impl<'de> Deserializer<'de> for CaseInsensitive {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Array(items) => visit_array(items, visitor),
            Value::Object(map) => visitor.visit_map(FoldedMap::new(map, None)),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(CaseInsensitive(other)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Array(items) => visit_array(items, visitor),
            other => other.deserialize_seq(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(FoldedMap::new(map, None)),
            other => other.deserialize_map(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(FoldedMap::new(map, Some(fields))),
            Value::Array(items) => visit_array(items, visitor),
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    // Enum payloads are matched exactly.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.0.deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct identifier ignored_any
    }
}

fn visit_array<'de, V: Visitor<'de>>(
    items: Vec<Value>,
    visitor: V,
) -> Result<V::Value, serde_json::Error> {
    let len = items.len();
    let mut seq = FoldedSeq {
        iter: items.into_iter(),
    };
    let value = visitor.visit_seq(&mut seq)?;
    if seq.iter.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

struct FoldedSeq {
    iter: std::vec::IntoIter<Value>,
}

impl<'de> SeqAccess<'de> for FoldedSeq {
    type Error = serde_json::Error;

    fn next_element_seed<S: DeserializeSeed<'de>>(
        &mut self,
        seed: S,
    ) -> Result<Option<S::Value>, Self::Error> {
        match self.iter.next() {
            Some(value) => seed.deserialize(CaseInsensitive(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct FoldedMap {
    iter: serde_json::map::IntoIter,
    fields: Option<&'static [&'static str]>,
    pending: Option<Value>,
}

impl FoldedMap {
    fn new(map: Map<String, Value>, fields: Option<&'static [&'static str]>) -> Self {
        Self {
            iter: map.into_iter(),
            fields,
            pending: None,
        }
    }

    /// Exact field match first, then the first case-insensitive one.
    fn canonical_key(&self, key: String) -> String {
        let Some(fields) = self.fields else {
            return key;
        };
        if fields.contains(&key.as_str()) {
            return key;
        }
        fields
            .iter()
            .find(|field| field.eq_ignore_ascii_case(&key))
            .map(|field| (*field).to_string())
            .unwrap_or(key)
    }
}

impl<'de> MapAccess<'de> for FoldedMap {
    type Error = serde_json::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, Self::Error> {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                let key = self.canonical_key(key);
                seed.deserialize(MapKey(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<S: DeserializeSeed<'de>>(
        &mut self,
        seed: S,
    ) -> Result<S::Value, Self::Error> {
        let value = self.pending.take().ok_or_else(|| {
            <serde_json::Error as de::Error>::custom("map value requested before its key")
        })?;
        seed.deserialize(CaseInsensitive(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Object key deserializer; numeric targets parse the key text the way
/// `serde_json` does for `HashMap<u64, _>` and friends.
struct MapKey(String);

macro_rules! deserialize_numeric_key {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                match self.0.parse() {
                    Ok(n) => visitor.$visit(n),
                    Err(_) => visitor.visit_string(self.0),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for MapKey {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_string(self.0)
    }

    deserialize_numeric_key! {
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        StringDeserializer::<serde_json::Error>::new(self.0)
            .deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        value: i32,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct User {
        id: u64,
        name: String,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        address: Option<Address>,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Address {
        city: String,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Renamed {
        #[serde(rename = "userName")]
        user_name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum Level {
        Low,
        High,
    }

    #[test]
    fn test_field_case_is_ignored() {
        let upper: Sample = decode_response(r#"{"Value":5}"#).unwrap();
        let lower: Sample = decode_response(r#"{"value":5}"#).unwrap();
        let shout: Sample = decode_response(r#"{"VALUE":5}"#).unwrap();

        assert_eq!(upper, Sample { value: 5 });
        assert_eq!(lower, upper);
        assert_eq!(shout, upper);
    }

    #[test]
    fn test_nested_structs_and_sequences() {
        let user: User = decode_response(
            r#"{"ID":42,"Name":"Ann","TAGS":["a","b"],"Address":{"CITY":"Rome"}}"#,
        )
        .unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.name, "Ann");
        assert_eq!(user.tags, vec!["a", "b"]);
        assert_eq!(user.address, Some(Address { city: "Rome".into() }));
    }

    #[test]
    fn test_list_of_structs() {
        let users: Vec<Sample> = decode_response(r#"[{"Value":1},{"value":2}]"#).unwrap();
        assert_eq!(users, vec![Sample { value: 1 }, Sample { value: 2 }]);
    }

    #[test]
    fn test_renamed_field() {
        let r: Renamed = decode_response(r#"{"USERNAME":"ann"}"#).unwrap();
        assert_eq!(r.user_name, "ann");
    }

    #[test]
    fn test_map_keys_are_kept_verbatim() {
        let map: HashMap<String, Sample> =
            decode_response(r#"{"First":{"VALUE":1},"second":{"value":2}}"#).unwrap();
        assert_eq!(map["First"], Sample { value: 1 });
        assert_eq!(map["second"], Sample { value: 2 });
    }

    #[test]
    fn test_numeric_map_keys() {
        let map: HashMap<u32, String> = decode_response(r#"{"1":"one","2":"two"}"#).unwrap();
        assert_eq!(map[&1], "one");
        assert_eq!(map[&2], "two");
    }

    #[test]
    fn test_unit_enum_variant() {
        let level: Level = from_value_case_insensitive(serde_json::json!("High")).unwrap();
        assert_eq!(level, Level::High);
        assert!(from_value_case_insensitive::<Level>(serde_json::json!("Medium")).is_err());
        let _ = Level::Low;
    }

    #[test]
    fn test_empty_body_yields_default() {
        let sample: Sample = decode_response("").unwrap();
        assert_eq!(sample, Sample::default());

        let list: Vec<Sample> = decode_response("  \n").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(decode_response::<Sample>("{\"value\":").is_err());
        assert!(decode_response::<Sample>(r#"{"value":"five"}"#).is_err());
    }

    #[test]
    fn test_untyped_value_passthrough() {
        let value: Value = decode_response(r#"{"Id":1,"items":[1,2]}"#).unwrap();
        assert_eq!(value["Id"], 1);
        assert_eq!(value["items"][1], 2);
    }

    #[test]
    fn test_encode_body() {
        assert_eq!(
            encode_body(&serde_json::json!({"a":1})).unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert_eq!(encode_body(&Value::Null).unwrap(), None);
        assert_eq!(encode_body(&Option::<u8>::None).unwrap(), None);
    }
}
