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
use google_cloud_datastore::model::{Entity, Key};
use google_cloud_gax::options::RequestOptionsBuilder;
use google_cloud_gax::retry_policy::{Aip194Strict, RetryPolicyExt};
use std::collections::HashSet;
use std::time::Duration;

/// A [Datastore] client that remembers what the tests created.
///
/// Tests push the entities and keys they create into `entities_to_delete` and
/// `keys_to_delete`, [cleanup()][CleanupClient::cleanup] removes all of them
/// in a single commit.
#[derive(Debug)]
pub struct CleanupClient {
    client: Datastore,
    pub entities_to_delete: Vec<Entity>,
    pub keys_to_delete: Vec<Key>,
}

impl CleanupClient {
    pub fn new(client: Datastore) -> Self {
        Self {
            client,
            entities_to_delete: Vec::new(),
            keys_to_delete: Vec::new(),
        }
    }

    /// Deletes all the tracked entities and keys.
    ///
    /// Entities without a key, or with an incomplete key, are skipped.
    /// Errors are logged and otherwise ignored.
    pub async fn cleanup(&mut self) {
        let keys = std::mem::take(&mut self.entities_to_delete)
            .into_iter()
            .filter_map(|e| e.key)
            .chain(std::mem::take(&mut self.keys_to_delete))
            .filter(Key::is_complete)
            .collect::<HashSet<_>>();
        if keys.is_empty() {
            return;
        }
        let count = keys.len();
        let mut batch = self
            .client
            .batch()
            .with_retry_policy(
                Aip194Strict
                    .with_attempt_limit(5)
                    .with_time_limit(Duration::from_secs(60)),
            )
            .with_idempotency(true);
        for key in keys {
            batch.delete(key);
        }
        match batch.commit().await {
            Ok(_) => tracing::info!("deleted {count} test entities"),
            Err(e) => tracing::warn!("error deleting {count} test entities: {e:?}"),
        }
    }
}

impl std::ops::Deref for CleanupClient {
    type Target = Datastore;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_cloud_datastore::Result;
    use google_cloud_datastore::model::{
        CommitRequest, CommitResponse, Mutation, MutationResult, PathElement,
    };
    use google_cloud_gax::error::rpc::{Code, Status};
    use google_cloud_gax::options::RequestOptions;
    use google_cloud_gax::response::Response;
    use pretty_assertions::assert_eq;

    mockall::mock! {
        #[derive(Debug)]
        Datastore {}
        impl google_cloud_datastore::stub::Datastore for Datastore {
            async fn commit(&self, req: CommitRequest, _options: RequestOptions) -> Result<Response<CommitResponse>>;
        }
    }

    fn task_key(id: i64) -> Key {
        Key::from_path([PathElement::with_id("Task", id)])
    }

    #[tokio::test]
    async fn single_commit() {
        let mut mock = MockDatastore::new();
        mock.expect_commit()
            .withf(|req, options| {
                let mut deleted = req
                    .mutations
                    .iter()
                    .filter_map(|m| match m {
                        Mutation::Delete(k) => k.id(),
                        _ => None,
                    })
                    .collect::<Vec<_>>();
                deleted.sort();
                deleted == vec![1, 2, 3] && options.idempotent() == Some(true)
            })
            .times(1)
            .returning(|req, _| {
                let results = req.mutations.iter().map(|_| MutationResult::new());
                Ok(Response::from(CommitResponse::new().set_mutation_results(results)))
            });

        let mut client = CleanupClient::new(Datastore::from_stub("test-project", mock));
        client.entities_to_delete.push(Entity::new(task_key(1)));
        client.entities_to_delete.push(Entity::new(task_key(2)));
        client.entities_to_delete.push(Entity::default());
        client.keys_to_delete.push(task_key(2));
        client.keys_to_delete.push(task_key(3));
        client
            .keys_to_delete
            .push(Key::from_path([PathElement::incomplete("Task")]));
        client.cleanup().await;
        assert_eq!(client.entities_to_delete, Vec::<Entity>::new());
        assert_eq!(client.keys_to_delete, Vec::<Key>::new());
    }

    #[tokio::test]
    async fn nothing_tracked() {
        let mut mock = MockDatastore::new();
        mock.expect_commit().never();
        let mut client = CleanupClient::new(Datastore::from_stub("test-project", mock));
        client
            .keys_to_delete
            .push(Key::from_path([PathElement::incomplete("Task")]));
        client.cleanup().await;
    }

    #[tokio::test]
    async fn errors_are_ignored() {
        let mut mock = MockDatastore::new();
        mock.expect_commit().times(1).returning(|_, _| {
            Err(google_cloud_datastore::Error::service(
                Status::default()
                    .set_code(Code::PermissionDenied)
                    .set_message("uh-oh"),
            ))
        });
        let mut client = CleanupClient::new(Datastore::from_stub("test-project", mock));
        client.keys_to_delete.push(task_key(1));
        client.cleanup().await;
    }

    #[test]
    fn deref() {
        let client = CleanupClient::new(Datastore::from_stub("test-project", MockDatastore::new()));
        assert_eq!(client.project_id(), "test-project");
    }
}
