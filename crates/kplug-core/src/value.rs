// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed settings values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Field name the TOML parser uses to carry a datetime through serde.
const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

/// A single configuration value, either supplied as a default or read from
/// the config file.
///
/// Any YAML or TOML scalar, list, or table maps onto the matching variant.
/// `null` and integers outside the `i64` range are rejected. TOML datetimes
/// become strings in their RFC 3339 form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingsValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<SettingsValue>),
    Mapping(BTreeMap<String, SettingsValue>),
}

impl SettingsValue {
    /// Human-readable name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingsValue::Boolean(_) => "boolean",
            SettingsValue::Integer(_) => "integer",
            SettingsValue::Float(_) => "float",
            SettingsValue::String(_) => "string",
            SettingsValue::Sequence(_) => "sequence",
            SettingsValue::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingsValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingsValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats; floats never narrow to integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingsValue::Float(f) => Some(*f),
            SettingsValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingsValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[SettingsValue]> {
        match self {
            SettingsValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, SettingsValue>> {
        match self {
            SettingsValue::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for SettingsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsValue::Boolean(b) => write!(f, "{b}"),
            SettingsValue::Integer(i) => write!(f, "{i}"),
            SettingsValue::Float(x) => write!(f, "{x}"),
            SettingsValue::String(s) => write!(f, "{s:?}"),
            SettingsValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            SettingsValue::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl<'de> Deserialize<'de> for SettingsValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SettingsValueVisitor)
    }
}

struct SettingsValueVisitor;

impl<'de> Visitor<'de> for SettingsValueVisitor {
    type Value = SettingsValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 64-bit integer, float, string, sequence, or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<SettingsValue, E> {
        Ok(SettingsValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<SettingsValue, E> {
        Ok(SettingsValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<SettingsValue, E> {
        i64::try_from(v)
            .map(SettingsValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range for a 64-bit signed integer")))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<SettingsValue, E> {
        i64::try_from(v)
            .map(SettingsValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range for a 64-bit signed integer")))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<SettingsValue, E> {
        i64::try_from(v)
            .map(SettingsValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range for a 64-bit signed integer")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<SettingsValue, E> {
        Ok(SettingsValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SettingsValue, E> {
        Ok(SettingsValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SettingsValue, E> {
        Ok(SettingsValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<SettingsValue, E> {
        Err(E::custom("null is not a settings value"))
    }

    fn visit_none<E: de::Error>(self) -> Result<SettingsValue, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<SettingsValue, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SettingsValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(SettingsValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SettingsValue, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, SettingsValue>()? {
            map.insert(key, value);
        }

        if map.len() == 1 {
            if let Some(SettingsValue::String(datetime)) = map.get(TOML_DATETIME_FIELD) {
                return Ok(SettingsValue::String(datetime.clone()));
            }
        }
        Ok(SettingsValue::Mapping(map))
    }
}

impl From<bool> for SettingsValue {
    fn from(b: bool) -> Self {
        SettingsValue::Boolean(b)
    }
}

impl From<i64> for SettingsValue {
    fn from(i: i64) -> Self {
        SettingsValue::Integer(i)
    }
}

impl From<i32> for SettingsValue {
    fn from(i: i32) -> Self {
        SettingsValue::Integer(i64::from(i))
    }
}

impl From<u32> for SettingsValue {
    fn from(i: u32) -> Self {
        SettingsValue::Integer(i64::from(i))
    }
}

impl From<f64> for SettingsValue {
    fn from(x: f64) -> Self {
        SettingsValue::Float(x)
    }
}

impl From<&str> for SettingsValue {
    fn from(s: &str) -> Self {
        SettingsValue::String(s.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(s: String) -> Self {
        SettingsValue::String(s)
    }
}

impl<T: Into<SettingsValue>> From<Vec<T>> for SettingsValue {
    fn from(items: Vec<T>) -> Self {
        SettingsValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SettingsValue>> From<BTreeMap<String, T>> for SettingsValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        SettingsValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_matching_variant() {
        assert_eq!(SettingsValue::from("a"), SettingsValue::String("a".into()));
        assert_eq!(SettingsValue::from(1), SettingsValue::Integer(1));
        assert_eq!(SettingsValue::from(true), SettingsValue::Boolean(true));
        assert_eq!(
            SettingsValue::from(vec!["foo", "bar"]),
            SettingsValue::Sequence(vec!["foo".into(), "bar".into()])
        );
        assert_eq!(
            SettingsValue::from(Vec::<String>::new()),
            SettingsValue::Sequence(vec![])
        );
    }

    #[test]
    fn accessors_reject_other_variants() {
        let v = SettingsValue::from("1");
        assert_eq!(v.as_str(), Some("1"));
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_bool(), None);
        assert!(v.as_seq().is_none());
        assert!(v.as_map().is_none());
    }

    #[test]
    fn integer_widens_to_float() {
        assert_eq!(SettingsValue::Integer(2).as_f64(), Some(2.0));
        assert_eq!(SettingsValue::Float(2.5).as_i64(), None);
    }

    #[test]
    fn display_is_compact() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), SettingsValue::from(vec![1, 2]));
        map.insert("a".to_string(), SettingsValue::from("x"));
        assert_eq!(SettingsValue::Mapping(map).to_string(), r#"{a: "x", b: [1, 2]}"#);
    }

    mod deserialize {
        use super::*;
        use serde::de::value::{Error, MapDeserializer};
        use serde::de::IntoDeserializer;

        fn from<'de, D: IntoDeserializer<'de, Error>>(input: D) -> Result<SettingsValue, Error> {
            SettingsValue::deserialize(input.into_deserializer())
        }

        #[test]
        fn unsigned_within_range_is_integer() {
            assert_eq!(from(42u64).unwrap(), SettingsValue::Integer(42));
            assert_eq!(from(i64::MAX as u64).unwrap(), SettingsValue::Integer(i64::MAX));
        }

        #[test]
        fn unsigned_past_i64_max_is_rejected() {
            let err = from(u64::MAX).unwrap_err();
            assert!(err.to_string().contains("out of range"));
        }

        #[test]
        fn unit_is_rejected() {
            assert!(from(()).is_err());
        }

        #[test]
        fn toml_datetime_marker_becomes_string() {
            let entries = vec![(TOML_DATETIME_FIELD, "1979-05-27T07:32:00Z")];
            let value =
                SettingsValue::deserialize(MapDeserializer::<_, Error>::new(entries.into_iter()))
                    .unwrap();
            assert_eq!(value, SettingsValue::from("1979-05-27T07:32:00Z"));
        }

        #[test]
        fn ordinary_single_key_mapping_is_kept() {
            let entries = vec![("when", "1979-05-27")];
            let value =
                SettingsValue::deserialize(MapDeserializer::<_, Error>::new(entries.into_iter()))
                    .unwrap();
            assert_eq!(value.as_map().unwrap()["when"], SettingsValue::from("1979-05-27"));
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(SettingsValue::from(1.5).type_name(), "float");
        assert_eq!(SettingsValue::Mapping(BTreeMap::new()).type_name(), "mapping");
    }
}
