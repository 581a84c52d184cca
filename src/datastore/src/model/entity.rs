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

use super::{Key, Value};
use serde_json::{Map, Value as Json};
use std::collections::{HashMap, HashSet};

/// A Datastore data object.
///
/// An entity is limited to 1 megabyte when stored. Properties excluded from
/// indexes are not available in queries, but they may hold longer strings.
///
/// # Example
/// ```
/// # use google_cloud_datastore::model::{Entity, Key, PathElement};
/// let key = Key::from_path([PathElement::named("Task", "sampleTask")]);
/// let task = Entity::new(key)
///     .set("category", "Personal")
///     .set("done", false)
///     .set("priority", 4)
///     .set("description", "Learn Cloud Datastore")
///     .set_exclude_from_indexes(["description"]);
/// assert_eq!(task.get("priority").and_then(|v| v.as_integer()), Some(4));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Entity {
    /// The entity's key.
    ///
    /// An entity must have a key, unless otherwise documented (for example,
    /// an entity in `Value.entity_value` may have no key).
    pub key: Option<Key>,

    /// The entity's properties.
    pub properties: HashMap<String, Value>,

    /// The names of the properties excluded from indexes.
    ///
    /// For array properties the flag is sent on each element. An empty array
    /// has no elements to carry it, so the exclusion of an empty array is not
    /// sent to the service and is absent from entities read back.
    pub exclude_from_indexes: HashSet<String>,
}

impl Entity {
    /// Creates an entity with the given key and no properties.
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Default::default()
        }
    }

    /// Sets the value of [key][Entity::key].
    pub fn set_key<T: Into<Key>>(mut self, v: T) -> Self {
        self.key = Some(v.into());
        self
    }

    /// Sets a property, replacing any previous value.
    pub fn set<K: Into<String>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a property in place, returning the previous value.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> Option<Value> {
        self.properties.insert(name.into(), value.into())
    }

    /// Sets the property names excluded from indexes.
    pub fn set_exclude_from_indexes<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.exclude_from_indexes = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl serde::Serialize for Entity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        let mut properties = Map::new();
        for (name, value) in &self.properties {
            let exclude = self.exclude_from_indexes.contains(name);
            let value = value.to_json(exclude).map_err(S::Error::custom)?;
            properties.insert(name.clone(), value);
        }
        let mut object = Map::new();
        if let Some(key) = &self.key {
            object.insert(
                "key".to_string(),
                serde_json::to_value(key).map_err(S::Error::custom)?,
            );
        }
        object.insert("properties".to_string(), Json::Object(properties));
        Json::Object(object).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Entity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;
        #[derive(Default, serde::Deserialize)]
        #[serde(default)]
        struct Raw {
            key: Option<Key>,
            properties: Map<String, Json>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut entity = Entity {
            key: raw.key,
            ..Default::default()
        };
        for (name, json) in raw.properties {
            let (value, exclude) = Value::from_json(json).map_err(D::Error::custom)?;
            if exclude {
                entity.exclude_from_indexes.insert(name.clone());
            }
            entity.properties.insert(name, value);
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathElement;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn task() -> Entity {
        Entity::new(Key::from_path([PathElement::named("Task", "sampleTask")]))
            .set("category", "Personal")
            .set("done", false)
            .set("priority", 4)
            .set("description", "Learn Cloud Datastore")
            .set("tags", vec!["fun", "programming"])
            .set_exclude_from_indexes(["description", "tags"])
    }

    #[test]
    fn builder() {
        let mut task = task();
        assert_eq!(task.len(), 5);
        assert_eq!(task.get("category").and_then(Value::as_str), Some("Personal"));
        assert_eq!(task.get("done").and_then(Value::as_bool), Some(false));
        let previous = task.insert("done", true);
        assert_eq!(previous, Some(Value::Boolean(false)));
        assert!(task.exclude_from_indexes.contains("description"));
    }

    #[test]
    fn serialize() -> anyhow::Result<()> {
        let got = serde_json::to_value(task())?;
        let want = json!({
            "key": {"path": [{"kind": "Task", "name": "sampleTask"}]},
            "properties": {
                "category": {"stringValue": "Personal"},
                "done": {"booleanValue": false},
                "priority": {"integerValue": "4"},
                "description": {"stringValue": "Learn Cloud Datastore", "excludeFromIndexes": true},
                "tags": {"arrayValue": {"values": [
                    {"stringValue": "fun", "excludeFromIndexes": true},
                    {"stringValue": "programming", "excludeFromIndexes": true},
                ]}},
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let input = serde_json::to_value(task())?;
        let got = serde_json::from_value::<Entity>(input)?;
        assert_eq!(got, task());
        Ok(())
    }

    #[test]
    fn deserialize_empty() -> anyhow::Result<()> {
        let got = serde_json::from_value::<Entity>(json!({}))?;
        assert_eq!(got, Entity::default());
        assert!(got.is_empty());
        Ok(())
    }

    #[test]
    fn embedded() -> anyhow::Result<()> {
        let inner = Entity::default().set("city", "Seattle");
        let outer = task().set("address", inner.clone());
        let got = serde_json::to_value(&outer)?;
        assert_eq!(
            got["properties"]["address"],
            json!({"entityValue": {"properties": {"city": {"stringValue": "Seattle"}}}})
        );
        let got = serde_json::from_value::<Entity>(got)?;
        assert_eq!(got.get("address").and_then(Value::as_entity), Some(&inner));
        Ok(())
    }

    #[test]
    fn empty_excluded_array() -> anyhow::Result<()> {
        let empty: Vec<Value> = Vec::new();
        let entity = task().set("tags", empty);
        let got = serde_json::to_value(&entity)?;
        assert_eq!(got["properties"]["tags"], json!({"arrayValue": {"values": []}}));
        let got = serde_json::from_value::<Entity>(got)?;
        assert_eq!(got.get("tags").and_then(Value::as_array), Some(&[][..]));
        assert!(!got.exclude_from_indexes.contains("tags"));
        assert!(got.exclude_from_indexes.contains("description"));
        Ok(())
    }
}
