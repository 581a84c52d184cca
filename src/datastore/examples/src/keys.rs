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
use google_cloud_datastore::model::{Key, PathElement};

pub fn incomplete_key(client: &Datastore) -> Key {
    // [START datastore_incomplete_key]
    let key = client.key([PathElement::incomplete("Task")]);
    // [END datastore_incomplete_key]
    key
}

pub fn named_key(client: &Datastore) -> Key {
    // [START datastore_named_key]
    let key = client.key([PathElement::named("Task", "sampleTask")]);
    // [END datastore_named_key]
    key
}

pub fn key_with_parent(client: &Datastore) -> Key {
    // [START datastore_key_with_parent]
    let key = client.key([
        PathElement::named("TaskList", "default"),
        PathElement::named("Task", "sampleTask"),
    ]);
    // [END datastore_key_with_parent]
    key
}

pub fn key_with_multilevel_parent(client: &Datastore) -> Key {
    // [START datastore_key_with_multilevel_parent]
    let key = client.key([
        PathElement::named("User", "alice"),
        PathElement::named("TaskList", "default"),
        PathElement::named("Task", "sampleTask"),
    ]);
    // [END datastore_key_with_multilevel_parent]
    key
}
