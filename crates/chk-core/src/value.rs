//! Dynamically typed values compared with strict equality.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::truthy::Truthy;

/// JSON value whose equality never coerces between types.
///
/// `5` and `"5"` are unequal, `1` and `1.0` are equal, and arrays and
/// objects compare element-wise under the same rules.
///
/// JSON has no NaN or infinities, so deserializing a non-finite number
/// (YAML `.nan`, `.inf`) fails instead of degrading to `null`.
#[derive(Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StrictValue(pub Value);

impl StrictValue {
    /// Returns the wrapped JSON value.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the JSON value.
    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for StrictValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StrictValueVisitor)
    }
}

struct StrictValueVisitor;

impl<'de> Visitor<'de> for StrictValueVisitor {
    type Value = StrictValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible value with finite numbers")
    }

    fn visit_bool<E: de::Error>(self, flag: bool) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::Bool(flag)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::from(n)))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::from(n)))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<StrictValue, E> {
        Number::from_f64(n)
            .map(|number| StrictValue(Value::Number(number)))
            .ok_or_else(|| E::custom(format!("non-finite number {n} is not a valid value")))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::String(text.to_owned())))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::String(text)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<StrictValue, E> {
        Ok(StrictValue(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<StrictValue, D::Error> {
        StrictValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StrictValue, A::Error> {
        let mut values = Vec::new();
        while let Some(StrictValue(value)) = seq.next_element()? {
            values.push(value);
        }
        Ok(StrictValue(Value::Array(values)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StrictValue, A::Error> {
        let mut entries = Map::new();
        while let Some((key, StrictValue(value))) = map.next_entry::<String, StrictValue>()? {
            entries.insert(key, value);
        }
        Ok(StrictValue(Value::Object(entries)))
    }
}

impl PartialEq for StrictValue {
    fn eq(&self, other: &Self) -> bool {
        strict_equals(&self.0, &other.0)
    }
}

impl fmt::Debug for StrictValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for StrictValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Truthy for StrictValue {
    fn is_truthy(&self) -> bool {
        self.0.is_truthy()
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a == b;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Compares two JSON values without type coercion.
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| strict_equals(x, y)))
        }
        _ => false,
    }
}
