// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{Entity, Key};
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use google_cloud_wkt as wkt;
use serde_json::{Map, Value as Json, json};

/// An object that represents a latitude/longitude pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LatLng {
    /// The latitude in degrees. It must be in the range [-90.0, +90.0].
    pub latitude: f64,
    /// The longitude in degrees. It must be in the range [-180.0, +180.0].
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A property value.
///
/// Values convert from the corresponding Rust types:
/// ```
/// # use google_cloud_datastore::model::Value;
/// assert_eq!(Value::from(4), Value::Integer(4));
/// assert_eq!(Value::from("fun"), Value::String("fun".into()));
/// assert_eq!(
///     Value::from(vec!["fun", "programming"]),
///     Value::Array(vec![Value::from("fun"), Value::from("programming")])
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(wkt::Timestamp),
    Key(Key),
    String(String),
    Blob(bytes::Bytes),
    GeoPoint(LatLng),
    Entity(Box<Entity>),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&wkt::Timestamp> {
        match self {
            Self::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Self::Key(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts the value to its JSON representation.
    ///
    /// `exclude` sets `excludeFromIndexes`. For arrays the flag is applied to
    /// each element, the service rejects it on the array value itself.
    pub(crate) fn to_json(&self, exclude: bool) -> Result<Json, serde_json::Error> {
        let mut object = match self {
            Self::Null => json!({ "nullValue": null }),
            Self::Boolean(v) => json!({ "booleanValue": v }),
            Self::Integer(v) => json!({ "integerValue": v.to_string() }),
            Self::Double(v) => json!({ "doubleValue": double_to_json(*v) }),
            Self::Timestamp(v) => json!({ "timestampValue": serde_json::to_value(v)? }),
            Self::Key(v) => json!({ "keyValue": serde_json::to_value(v)? }),
            Self::String(v) => json!({ "stringValue": v }),
            Self::Blob(v) => json!({ "blobValue": BASE64_STANDARD.encode(v) }),
            Self::GeoPoint(v) => json!({ "geoPointValue": serde_json::to_value(v)? }),
            Self::Entity(v) => json!({ "entityValue": serde_json::to_value(v)? }),
            Self::Array(values) => {
                let values = values
                    .iter()
                    .map(|v| v.to_json(exclude))
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(json!({ "arrayValue": { "values": values } }));
            }
        };
        if exclude {
            if let Some(map) = object.as_object_mut() {
                map.insert("excludeFromIndexes".to_string(), Json::Bool(true));
            }
        }
        Ok(object)
    }

    /// Parses the JSON representation, returning the value and whether it is
    /// excluded from indexes.
    pub(crate) fn from_json(json: Json) -> Result<(Self, bool), String> {
        use serde_json::from_value;
        let Json::Object(mut map) = json else {
            return Err(format!("expected a JSON object for a value, got {json}"));
        };
        let mut exclude = map
            .remove("excludeFromIndexes")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        map.remove("meaning");
        let (name, field) = single_field(map)?;
        let value = match name.as_str() {
            "nullValue" => Self::Null,
            "booleanValue" => Self::Boolean(from_value(field).map_err(|e| e.to_string())?),
            "integerValue" => Self::Integer(parse_integer(&field)?),
            "doubleValue" => Self::Double(parse_double(&field)?),
            "timestampValue" => Self::Timestamp(from_value(field).map_err(|e| e.to_string())?),
            "keyValue" => Self::Key(from_value(field).map_err(|e| e.to_string())?),
            "stringValue" => Self::String(from_value(field).map_err(|e| e.to_string())?),
            "blobValue" => {
                let encoded: String = from_value(field).map_err(|e| e.to_string())?;
                let decoded = BASE64_STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| e.to_string())?;
                Self::Blob(bytes::Bytes::from(decoded))
            }
            "geoPointValue" => Self::GeoPoint(from_value(field).map_err(|e| e.to_string())?),
            "entityValue" => Self::Entity(Box::new(from_value(field).map_err(|e| e.to_string())?)),
            "arrayValue" => {
                let values = match field {
                    Json::Object(mut array) => array.remove("values").unwrap_or(Json::Null),
                    other => return Err(format!("invalid arrayValue {other}")),
                };
                let values = match values {
                    Json::Null => Vec::new(),
                    Json::Array(values) => values
                        .into_iter()
                        .map(Self::from_json)
                        .collect::<Result<Vec<_>, _>>()?,
                    other => return Err(format!("invalid arrayValue.values {other}")),
                };
                // The flag lives on the elements of an array.
                exclude = exclude || (!values.is_empty() && values.iter().all(|(_, e)| *e));
                Self::Array(values.into_iter().map(|(v, _)| v).collect())
            }
            unknown => return Err(format!("unknown value type {unknown}")),
        };
        Ok((value, exclude))
    }
}

fn single_field(map: Map<String, Json>) -> Result<(String, Json), String> {
    let mut fields = map.into_iter();
    match (fields.next(), fields.next()) {
        (Some(field), None) => Ok(field),
        (None, _) => Ok(("nullValue".to_string(), Json::Null)),
        (Some((a, _)), Some((b, _))) => Err(format!("a value has multiple types: {a}, {b}")),
    }
}

fn parse_integer(json: &Json) -> Result<i64, String> {
    match json {
        Json::String(s) => s.parse::<i64>().map_err(|e| e.to_string()),
        Json::Number(n) => n
            .as_i64()
            .ok_or_else(|| format!("integer value out of range {n}")),
        other => Err(format!("invalid integerValue {other}")),
    }
}

// JSON has no representation for non-finite numbers.
fn double_to_json(v: f64) -> Json {
    match v {
        v if v.is_nan() => Json::from("NaN"),
        v if v == f64::INFINITY => Json::from("Infinity"),
        v if v == f64::NEG_INFINITY => Json::from("-Infinity"),
        v => Json::from(v),
    }
}

fn parse_double(json: &Json) -> Result<f64, String> {
    match json {
        Json::Number(n) => n.as_f64().ok_or_else(|| format!("invalid doubleValue {n}")),
        Json::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            s => s.parse::<f64>().map_err(|e| e.to_string()),
        },
        other => Err(format!("invalid doubleValue {other}")),
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        self.to_json(false)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;
        let json = Json::deserialize(deserializer)?;
        Self::from_json(json)
            .map(|(v, _)| v)
            .map_err(D::Error::custom)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<wkt::Timestamp> for Value {
    fn from(value: wkt::Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        Self::Key(value)
    }
}

impl From<bytes::Bytes> for Value {
    fn from(value: bytes::Bytes) -> Self {
        Self::Blob(value)
    }
}

impl From<LatLng> for Value {
    fn from(value: LatLng) -> Self {
        Self::GeoPoint(value)
    }
}

impl From<Entity> for Value {
    fn from(value: Entity) -> Self {
        Self::Entity(Box::new(value))
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
