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
use google_cloud_datastore::model::{Entity, Key, PathElement, Query};
use google_cloud_gax::error::rpc::Code;

// [START datastore_transactional_update]
async fn transfer_funds(
    client: &Datastore,
    from_key: &Key,
    to_key: &Key,
    amount: i64,
) -> anyhow::Result<()> {
    let mut transaction = client.transaction().await?;
    let accounts = transaction
        .get_multi([from_key.clone(), to_key.clone()])
        .await?;
    let balance = |key: &Key| {
        let account = accounts.iter().find(|a| a.key.as_ref() == Some(key))?;
        let balance = account.get("balance").and_then(|v| v.as_integer());
        Some((account.clone(), balance.unwrap_or_default()))
    };
    let (Some((from, from_balance)), Some((to, to_balance))) =
        (balance(from_key), balance(to_key))
    else {
        transaction.rollback().await?;
        anyhow::bail!("missing accounts");
    };
    transaction.put(from.set("balance", from_balance - amount));
    transaction.put(to.set("balance", to_balance + amount));
    transaction.commit().await?;
    Ok(())
}
// [END datastore_transactional_update]

pub async fn transactional_update(client: &Datastore) -> anyhow::Result<(Key, Key)> {
    let accounts = client
        .put_multi([
            Entity::new(client.key([PathElement::incomplete("Account")])).set("balance", 100),
            Entity::new(client.key([PathElement::incomplete("Account")])).set("balance", 100),
        ])
        .await?;
    let mut keys = accounts.into_iter().filter_map(|a| a.key);
    let (Some(account1), Some(account2)) = (keys.next(), keys.next()) else {
        anyhow::bail!("the service did not return the account keys");
    };

    // [START datastore_transactional_retry]
    const MAX_ATTEMPTS: usize = 5;
    for attempt in 1..=MAX_ATTEMPTS {
        match transfer_funds(client, &account1, &account2, 50).await {
            Ok(()) => break,
            Err(e) if attempt < MAX_ATTEMPTS && is_contention(&e) => {
                println!("transaction aborted, retrying: {e}");
            }
            Err(e) => return Err(e),
        }
    }
    // [END datastore_transactional_retry]

    Ok((account1, account2))
}

fn is_contention(e: &anyhow::Error) -> bool {
    e.downcast_ref::<google_cloud_datastore::Error>()
        .and_then(|e| e.status())
        .is_some_and(|s| s.code == Code::Aborted)
}

pub async fn transactional_get_or_create(client: &Datastore) -> anyhow::Result<Entity> {
    let name = String::from(crate::now());

    // [START datastore_transactional_get_or_create]
    let key = client.key([PathElement::named("Task", name)]);
    let mut transaction = client.transaction().await?;
    let task = match transaction.get(&key).await? {
        Some(task) => {
            transaction.rollback().await?;
            task
        }
        None => {
            transaction.insert(Entity::new(key).set("description", "Example task"));
            transaction.commit().await?.pop().ok_or_else(|| {
                anyhow::anyhow!("the commit did not return the created task")
            })?
        }
    };
    // [END datastore_transactional_get_or_create]
    Ok(task)
}

pub async fn transactional_single_entity_group_read_only(
    client: &Datastore,
) -> anyhow::Result<(Option<Entity>, Vec<Entity>)> {
    let task_list_key = client.key([PathElement::named("TaskList", "default")]);
    client.put(Entity::new(task_list_key.clone())).await?;
    client
        .put(
            Entity::new(task_list_key.child(PathElement::incomplete("Task")))
                .set("description", "Buy milk"),
        )
        .await?;

    // [START datastore_transactional_single_entity_group_read_only]
    let transaction = client.read_only_transaction().await?;
    let task_list = transaction.get(&task_list_key).await?;
    let query = Query::new("Task").set_ancestor(task_list_key);
    let tasks_in_list = transaction.fetch(query).await?;
    transaction.commit().await?;
    // [END datastore_transactional_single_entity_group_read_only]
    Ok((task_list, tasks_in_list))
}
