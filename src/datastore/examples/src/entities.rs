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

use google_cloud_datastore::client::Datastore;
use google_cloud_datastore::model::{Entity, PathElement, Value};

pub fn basic_entity(client: &Datastore) -> Entity {
    // [START datastore_basic_entity]
    let task = Entity::new(client.key([PathElement::incomplete("Task")]))
        .set("category", "Personal")
        .set("done", false)
        .set("priority", 4)
        .set("description", "Learn Cloud Datastore");
    // [END datastore_basic_entity]
    task
}

pub fn entity_with_parent(client: &Datastore) -> Entity {
    // [START datastore_entity_with_parent]
    let key = client.key([
        PathElement::named("TaskList", "default"),
        PathElement::named("Task", "sampleTask"),
    ]);
    let task = Entity::new(key)
        .set("category", "Personal")
        .set("done", false)
        .set("priority", 4)
        .set("description", "Learn Cloud Datastore");
    // [END datastore_entity_with_parent]
    task
}

pub fn properties(client: &Datastore) -> Entity {
    // [START datastore_properties]
    let task = Entity::new(client.key([PathElement::incomplete("Task")]))
        .set("category", "Personal")
        .set("created", crate::now())
        .set("done", false)
        .set("priority", 4)
        .set("percent_complete", 10.5)
        .set("description", "Learn Cloud Datastore")
        .set_exclude_from_indexes(["description"]);
    // [END datastore_properties]
    task
}

pub fn array_value(client: &Datastore) -> Entity {
    // [START datastore_array_value]
    let task = Entity::new(client.key([PathElement::named("Task", "sampleTask")]))
        .set("tags", vec!["fun", "programming"])
        .set("collaborators", vec!["alice", "bob"]);
    // [END datastore_array_value]
    task
}

pub fn exploding_properties(client: &Datastore) -> Entity {
    // [START datastore_exploding_properties]
    let task = Entity::new(client.key([PathElement::incomplete("Task")]))
        .set(
            "tags",
            Value::Array(vec!["fun".into(), "programming".into(), "learn".into()]),
        )
        .set(
            "collaborators",
            Value::Array(vec!["alice".into(), "bob".into(), "charlie".into()]),
        )
        .set("created", crate::now());
    // [END datastore_exploding_properties]
    task
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Datastore {
        #[derive(Debug)]
        struct Unused;
        impl google_cloud_datastore::stub::Datastore for Unused {}
        Datastore::from_stub("test-project", Unused)
    }

    #[test]
    fn properties_excludes_description() {
        let task = properties(&client());
        assert!(task.exclude_from_indexes.contains("description"));
        assert_eq!(task.get("percent_complete").and_then(Value::as_double), Some(10.5));
        assert!(task.key.as_ref().is_some_and(|k| !k.is_complete()));
    }

    #[test]
    fn array_values() {
        let task = array_value(&client());
        let tags = task.get("tags").and_then(Value::as_array).map(|v| v.len());
        assert_eq!(tags, Some(2));
        assert_eq!(task.key.as_ref().and_then(|k| k.name()), Some("sampleTask"));
    }

    #[test]
    fn parent() {
        let task = entity_with_parent(&client());
        let parent = task.key.as_ref().and_then(|k| k.parent());
        assert_eq!(parent.as_ref().and_then(|k| k.name()), Some("default"));
    }
}
