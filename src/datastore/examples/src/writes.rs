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
use google_cloud_datastore::model::{Entity, Key, PathElement};

fn sample_task(key: Key) -> Entity {
    Entity::new(key)
        .set("category", "Personal")
        .set("done", false)
        .set("priority", 4)
        .set("description", "Learn Cloud Datastore")
}

pub async fn upsert(client: &Datastore) -> anyhow::Result<Entity> {
    // [START datastore_upsert]
    let key = client.key([PathElement::named("Task", "sampleTask")]);
    let task = client.put(sample_task(key)).await?;
    // [END datastore_upsert]
    Ok(task)
}

pub async fn insert(client: &Datastore) -> anyhow::Result<Entity> {
    // [START datastore_insert]
    let mut transaction = client.transaction().await?;
    let key = client.key([PathElement::incomplete("Task")]);
    transaction.insert(sample_task(key));
    let task = transaction
        .commit()
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("the commit did not return the inserted task"))?;
    // [END datastore_insert]
    Ok(task)
}

pub async fn update(client: &Datastore) -> anyhow::Result<Entity> {
    upsert(client).await?;

    // [START datastore_update]
    let key = client.key([PathElement::named("Task", "sampleTask")]);
    let mut transaction = client.transaction().await?;
    let Some(task) = transaction.get(&key).await? else {
        transaction.rollback().await?;
        anyhow::bail!("missing task {key:?}");
    };
    transaction.update(task.set("done", true));
    let task = transaction
        .commit()
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("the commit did not return the updated task"))?;
    // [END datastore_update]
    Ok(task)
}

pub async fn lookup(client: &Datastore) -> anyhow::Result<Option<Entity>> {
    upsert(client).await?;

    // [START datastore_lookup]
    let key = client.key([PathElement::named("Task", "sampleTask")]);
    let task = client.get(&key).await?;
    // [END datastore_lookup]
    Ok(task)
}

pub async fn delete(client: &Datastore) -> anyhow::Result<Key> {
    upsert(client).await?;

    // [START datastore_delete]
    let key = client.key([PathElement::named("Task", "sampleTask")]);
    client.delete(key.clone()).await?;
    // [END datastore_delete]
    Ok(key)
}

pub async fn batch_upsert(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_batch_upsert]
    let task1 = Entity::new(client.key([PathElement::with_id("Task", 1)]))
        .set("category", "Personal")
        .set("done", false)
        .set("priority", 4)
        .set("description", "Learn Cloud Datastore");
    let task2 = Entity::new(client.key([PathElement::with_id("Task", 2)]))
        .set("category", "Work")
        .set("done", false)
        .set("priority", 8)
        .set("description", "Integrate Cloud Datastore");
    let tasks = client.put_multi([task1, task2]).await?;
    // [END datastore_batch_upsert]
    Ok(tasks)
}

pub async fn batch_lookup(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    batch_upsert(client).await?;

    // [START datastore_batch_lookup]
    let keys = [
        client.key([PathElement::with_id("Task", 1)]),
        client.key([PathElement::with_id("Task", 2)]),
    ];
    let tasks = client.get_multi(keys).await?;
    // [END datastore_batch_lookup]
    Ok(tasks)
}

pub async fn batch_delete(client: &Datastore) -> anyhow::Result<Vec<Key>> {
    batch_upsert(client).await?;

    // [START datastore_batch_delete]
    let keys = vec![
        client.key([PathElement::with_id("Task", 1)]),
        client.key([PathElement::with_id("Task", 2)]),
    ];
    client.delete_multi(keys.clone()).await?;
    // [END datastore_batch_delete]
    Ok(keys)
}
