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

use serde_with::{DisplayFromStr, serde_as};

/// A partition ID identifies a grouping of entities.
///
/// The grouping is always by project, database, and namespace. Empty fields
/// refer to the default database and the default namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PartitionId {
    /// The ID of the project to which the entities belong.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    /// If not empty, the ID of the database to which the entities belong.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// If not empty, the ID of the namespace to which the entities belong.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace_id: String,
}

impl PartitionId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][PartitionId::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [database_id][PartitionId::database_id].
    pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets the value of [namespace_id][PartitionId::namespace_id].
    pub fn set_namespace_id<T: Into<String>>(mut self, v: T) -> Self {
        self.namespace_id = v.into();
        self
    }
}

/// A (kind, ID/name) pair used to construct a key path.
///
/// If either name or ID is set, the element is complete. If neither is set,
/// the element is incomplete.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PathElement {
    /// The kind of the entity.
    pub kind: String,

    /// The auto-allocated ID of the entity.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The name of the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PathElement {
    /// Creates a path element identified by name.
    pub fn named<K: Into<String>, N: Into<String>>(kind: K, name: N) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            name: Some(name.into()),
        }
    }

    /// Creates a path element identified by a numeric ID.
    pub fn with_id<K: Into<String>>(kind: K, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id: Some(id),
            name: None,
        }
    }

    /// Creates an incomplete path element, the service allocates an ID.
    pub fn incomplete<K: Into<String>>(kind: K) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            name: None,
        }
    }

    /// Returns true if the element has an ID or a name.
    pub fn is_complete(&self) -> bool {
        self.id.is_some() || self.name.is_some()
    }
}

/// A unique identifier for an entity.
///
/// Keys are hierarchical. The last element of the path identifies the entity
/// itself, the preceding elements identify its ancestors.
///
/// # Example
/// ```
/// # use google_cloud_datastore::model::{Key, PathElement};
/// let key = Key::from_path([
///     PathElement::named("TaskList", "default"),
///     PathElement::named("Task", "sampleTask"),
/// ]);
/// assert_eq!(key.name(), Some("sampleTask"));
/// let parent = key.parent();
/// assert_eq!(parent.as_ref().and_then(|p| p.name()), Some("default"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Key {
    /// Entities are partitioned into subsets, currently identified by a
    /// project ID, database ID, and namespace ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_id: Option<PartitionId>,

    /// The entity path. The first element is the root ancestor, the last
    /// element identifies the entity.
    pub path: Vec<PathElement>,
}

impl Key {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a key from a sequence of path elements.
    pub fn from_path<T>(path: T) -> Self
    where
        T: IntoIterator<Item = PathElement>,
    {
        Self {
            partition_id: None,
            path: path.into_iter().collect(),
        }
    }

    /// Sets the value of [partition_id][Key::partition_id].
    pub fn set_partition_id<T: Into<PartitionId>>(mut self, v: T) -> Self {
        self.partition_id = Some(v.into());
        self
    }

    /// Sets or clears the value of [partition_id][Key::partition_id].
    pub fn set_or_clear_partition_id<T: Into<PartitionId>>(mut self, v: Option<T>) -> Self {
        self.partition_id = v.map(Into::into);
        self
    }

    /// Returns a new key with `element` appended to the path.
    pub fn child(&self, element: PathElement) -> Self {
        let mut key = self.clone();
        key.path.push(element);
        key
    }

    /// The kind of the entity identified by this key.
    pub fn kind(&self) -> Option<&str> {
        self.path.last().map(|e| e.kind.as_str())
    }

    /// The name of the entity, if the key uses a name.
    pub fn name(&self) -> Option<&str> {
        self.path.last().and_then(|e| e.name.as_deref())
    }

    /// The numeric ID of the entity, if the key uses an ID.
    pub fn id(&self) -> Option<i64> {
        self.path.last().and_then(|e| e.id)
    }

    /// The ID or the name of the entity, formatted as a string.
    pub fn id_or_name(&self) -> Option<String> {
        let last = self.path.last()?;
        last.name
            .clone()
            .or_else(|| last.id.map(|id| id.to_string()))
    }

    /// The key of the parent entity, `None` for root entities.
    pub fn parent(&self) -> Option<Key> {
        match self.path.len() {
            0 | 1 => None,
            n => Some(Key {
                partition_id: self.partition_id.clone(),
                path: self.path[..n - 1].to_vec(),
            }),
        }
    }

    /// A key is complete when its last path element has an ID or a name.
    pub fn is_complete(&self) -> bool {
        self.path.last().is_some_and(PathElement::is_complete)
    }

    pub(crate) fn check_complete(&self) -> crate::Result<()> {
        use crate::error::KeyError;
        if self.path.is_empty() {
            return Err(KeyError::EmptyPath.into_binding());
        }
        if !self.is_complete() {
            return Err(KeyError::Incomplete(self.clone()).into_binding());
        }
        Ok(())
    }
}
