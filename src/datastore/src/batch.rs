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

//! Batches of mutations and transactions.

use crate::Result;
use crate::client::Datastore;
use crate::error::KeyError;
use crate::model::{CommitMode, Entity, Key, Mutation, Query, ReadOptions};
use google_cloud_gax as gax;

/// A group of mutations committed in a single request.
///
/// Mutations are validated when they are added, any validation error is
/// returned by [commit()][Batch::commit] before contacting the service.
///
/// # Example
/// ```
/// # use google_cloud_datastore::client::Datastore;
/// # use google_cloud_datastore::model::{Entity, PathElement};
/// # async fn sample(client: &Datastore) -> anyhow::Result<()> {
/// let mut batch = client.batch();
/// batch.upsert(Entity::new(client.key([PathElement::named("Task", "a")])).set("done", false));
/// batch.delete(client.key([PathElement::named("Task", "b")]));
/// let saved = batch.commit().await?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Batch {
    client: Datastore,
    transaction: Option<bytes::Bytes>,
    mutations: Vec<Mutation>,
    error: Option<KeyError>,
    options: gax::options::RequestOptions,
}

impl Batch {
    pub(crate) fn new(client: Datastore, transaction: Option<bytes::Bytes>) -> Self {
        Self {
            client,
            transaction,
            mutations: Vec::new(),
            error: None,
            options: gax::options::RequestOptions::default(),
        }
    }

    /// Inserts or replaces the entity.
    ///
    /// The entity may have an incomplete key, the service allocates an ID
    /// for it on commit.
    pub fn put(&mut self, entity: Entity) -> &mut Self {
        let m = check_entity(&entity, false).map(|_| Mutation::Upsert(entity));
        self.push(m)
    }

    /// Inserts or replaces the entity, the entity key must be complete.
    pub fn upsert(&mut self, entity: Entity) -> &mut Self {
        let m = check_entity(&entity, true).map(|_| Mutation::Upsert(entity));
        self.push(m)
    }

    /// Inserts the entity, fails on commit if it already exists.
    pub fn insert(&mut self, entity: Entity) -> &mut Self {
        let m = check_entity(&entity, false).map(|_| Mutation::Insert(entity));
        self.push(m)
    }

    /// Updates the entity, fails on commit if it does not exist.
    pub fn update(&mut self, entity: Entity) -> &mut Self {
        let m = check_entity(&entity, true).map(|_| Mutation::Update(entity));
        self.push(m)
    }

    /// Deletes the entity with the given key.
    pub fn delete(&mut self, key: Key) -> &mut Self {
        let m = check_key(&key).map(|_| Mutation::Delete(key));
        self.push(m)
    }

    /// The mutations accumulated so far.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    fn push(&mut self, m: std::result::Result<Mutation, KeyError>) -> &mut Self {
        match m {
            Ok(m) => self.mutations.push(m),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Sends the mutations.
    ///
    /// Returns the inserted, updated and upserted entities, in the order they
    /// were added, with their keys completed by the service.
    pub async fn commit(self) -> Result<Vec<Entity>> {
        if let Some(e) = self.error {
            return Err(e.into_binding());
        }
        let mode = match self.transaction {
            Some(_) => CommitMode::Transactional,
            None => CommitMode::NonTransactional,
        };
        let expected = self.mutations.len();
        let response = self
            .client
            .commit()
            .with_options(self.options)
            .set_mode(mode)
            .set_or_clear_transaction(self.transaction)
            .set_mutations(self.mutations.clone())
            .send()
            .await?;
        let got = response.mutation_results.len();
        if got != expected {
            return Err(KeyError::MismatchedResults { expected, got }.into_binding());
        }
        tracing::debug!(
            mutations = expected,
            index_updates = response.index_updates,
            "commit complete"
        );
        let saved = self
            .mutations
            .into_iter()
            .zip(response.mutation_results)
            .filter_map(|(m, r)| match m {
                Mutation::Insert(mut e) | Mutation::Update(mut e) | Mutation::Upsert(mut e) => {
                    if let Some(key) = r.key {
                        e.key = Some(key);
                    }
                    Some(e)
                }
                _ => None,
            })
            .collect();
        Ok(saved)
    }
}

#[doc(hidden)]
impl gax::options::internal::RequestBuilder for Batch {
    fn request_options(&mut self) -> &mut gax::options::RequestOptions {
        &mut self.options
    }
}

fn check_entity(entity: &Entity, complete: bool) -> std::result::Result<(), KeyError> {
    match &entity.key {
        None => Err(KeyError::MissingKey),
        Some(k) if k.path.is_empty() => Err(KeyError::EmptyPath),
        Some(k) if complete && !k.is_complete() => Err(KeyError::Incomplete(k.clone())),
        Some(_) => Ok(()),
    }
}

fn check_key(key: &Key) -> std::result::Result<(), KeyError> {
    if key.path.is_empty() {
        return Err(KeyError::EmptyPath);
    }
    if !key.is_complete() {
        return Err(KeyError::Incomplete(key.clone()));
    }
    Ok(())
}

/// A Datastore transaction.
///
/// Reads observe a consistent snapshot, mutations are buffered locally and
/// applied atomically by [commit()][Transaction::commit]. Dropping a
/// transaction without committing it leaves it to expire on the service, call
/// [rollback()][Transaction::rollback] to release it early.
///
/// # Example
/// ```
/// # use google_cloud_datastore::client::Datastore;
/// # use google_cloud_datastore::model::PathElement;
/// # async fn sample(client: &Datastore) -> anyhow::Result<()> {
/// let key = client.key([PathElement::named("Account", "alice")]);
/// let mut transaction = client.transaction().await?;
/// if let Some(account) = transaction.get(&key).await? {
///     let balance = account.get("balance").and_then(|v| v.as_integer()).unwrap_or_default();
///     transaction.put(account.set("balance", balance + 10));
/// }
/// transaction.commit().await?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Transaction {
    id: bytes::Bytes,
    read_only: bool,
    batch: Batch,
}

impl Transaction {
    pub(crate) fn new(client: Datastore, id: bytes::Bytes, read_only: bool) -> Self {
        Self {
            batch: Batch::new(client, Some(id.clone())),
            id,
            read_only,
        }
    }

    /// The transaction identifier returned by the service.
    pub fn id(&self) -> &bytes::Bytes {
        &self.id
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn read_options(&self) -> Option<ReadOptions> {
        Some(ReadOptions::in_transaction(self.id.clone()))
    }

    /// Retrieves an entity inside the transaction.
    pub async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        let mut found = self.get_multi([key.clone()]).await?;
        Ok(found.pop())
    }

    /// Retrieves multiple entities inside the transaction.
    pub async fn get_multi<T>(&self, keys: T) -> Result<Vec<Entity>>
    where
        T: IntoIterator<Item = Key>,
    {
        self.batch
            .client
            .lookup_all(keys.into_iter().collect(), self.read_options())
            .await
    }

    /// Runs a query inside the transaction.
    ///
    /// Queries inside a transaction must be ancestor queries.
    pub async fn fetch(&self, query: Query) -> Result<Vec<Entity>> {
        self.batch
            .client
            .fetch_all(query, self.read_options())
            .await
    }

    /// Buffers a put, see [Batch::put].
    pub fn put(&mut self, entity: Entity) -> &mut Self {
        self.batch.put(entity);
        self
    }

    /// Buffers an upsert, see [Batch::upsert].
    pub fn upsert(&mut self, entity: Entity) -> &mut Self {
        self.batch.upsert(entity);
        self
    }

    /// Buffers an insert, see [Batch::insert].
    pub fn insert(&mut self, entity: Entity) -> &mut Self {
        self.batch.insert(entity);
        self
    }

    /// Buffers an update, see [Batch::update].
    pub fn update(&mut self, entity: Entity) -> &mut Self {
        self.batch.update(entity);
        self
    }

    /// Buffers a delete, see [Batch::delete].
    pub fn delete(&mut self, key: Key) -> &mut Self {
        self.batch.delete(key);
        self
    }

    /// Commits the transaction and its buffered mutations.
    pub async fn commit(self) -> Result<Vec<Entity>> {
        self.batch.commit().await
    }

    /// Aborts the transaction, discarding the buffered mutations.
    pub async fn rollback(self) -> Result<()> {
        self.batch
            .client
            .rollback()
            .set_transaction(self.id)
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{MockDatastore, task, task_key};
    use crate::model::{
        BeginTransactionRequest, BeginTransactionResponse, CommitRequest, CommitResponse,
        EntityResult, LookupRequest, LookupResponse, MutationResult, PathElement, RollbackRequest,
        RollbackResponse,
    };
    use gax::error::rpc::{Code, Status};
    use gax::options::RequestOptionsBuilder;
    use gax::response::Response;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;
    use test_case::test_case;

    fn incomplete_task() -> Entity {
        Entity::new(Key::from_path([PathElement::incomplete("Task")])).set("done", false)
    }

    #[tokio::test]
    async fn commit_completes_keys() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_commit()
            .withf(|req: &CommitRequest, options| {
                req.mode == CommitMode::NonTransactional
                    && req.transaction.is_none()
                    && req.mutations.len() == 3
                    && options.idempotent() == Some(true)
            })
            .return_once(|_, _| {
                Ok(Response::from(CommitResponse::new().set_mutation_results([
                    MutationResult::new()
                        .set_key(Key::from_path([PathElement::with_id("Task", 42)])),
                    MutationResult::new(),
                    MutationResult::new(),
                ])))
            });

        let client = Datastore::from_stub("test-project", mock);
        let mut batch = client.batch().with_idempotency(true);
        batch
            .put(incomplete_task())
            .upsert(task("a"))
            .delete(task_key("b"));
        assert_eq!(batch.len(), 3);
        assert!(matches!(batch.mutations()[0], Mutation::Upsert(_)));
        let saved = batch.commit().await?;
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].key.as_ref().and_then(Key::id), Some(42));
        assert_eq!(saved[1], task("a"));
        Ok(())
    }

    #[test_case(Batch::update, incomplete_task(); "update incomplete")]
    #[test_case(Batch::upsert, incomplete_task(); "upsert incomplete")]
    #[test_case(Batch::insert, Entity::default(); "insert without key")]
    #[test_case(Batch::put, Entity::new(Key::new()); "put empty path")]
    #[tokio::test]
    async fn validation(add: fn(&mut Batch, Entity) -> &mut Batch, entity: Entity) {
        let client = Datastore::from_stub("test-project", MockDatastore::new());
        let mut batch = client.batch();
        add(&mut batch, entity);
        assert!(batch.is_empty());
        let err = batch.commit().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(
            err.source().and_then(|e| e.downcast_ref::<KeyError>()).is_some(),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn delete_incomplete() {
        let client = Datastore::from_stub("test-project", MockDatastore::new());
        let mut batch = client.batch();
        batch.delete(Key::from_path([PathElement::incomplete("Task")]));
        let err = batch.commit().await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
    }

    #[tokio::test]
    async fn mismatched_results() {
        let mut mock = MockDatastore::new();
        mock.expect_commit()
            .return_once(|_, _| Ok(Response::from(CommitResponse::new())));
        let client = Datastore::from_stub("test-project", mock);
        let mut batch = client.batch();
        batch.upsert(task("a"));
        let err = batch.commit().await.unwrap_err();
        let source = err.source().and_then(|e| e.downcast_ref::<KeyError>()).cloned();
        assert_eq!(
            source,
            Some(KeyError::MismatchedResults {
                expected: 1,
                got: 0
            })
        );
    }

    #[tokio::test]
    async fn transaction_commit() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_begin_transaction()
            .withf(|req: &BeginTransactionRequest, _| {
                req.transaction_options
                    .as_ref()
                    .is_some_and(|o| o.read_write.is_some())
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    BeginTransactionResponse::new()
                        .set_transaction(bytes::Bytes::from_static(b"tx1")),
                ))
            });
        mock.expect_lookup()
            .withf(|req: &LookupRequest, _| {
                let want = ReadOptions::in_transaction(bytes::Bytes::from_static(b"tx1"));
                req.read_options == Some(want)
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    LookupResponse::new().set_found([EntityResult::new(task("a"))]),
                ))
            });
        mock.expect_commit()
            .withf(|req: &CommitRequest, _| {
                req.mode == CommitMode::Transactional
                    && req.transaction == Some(bytes::Bytes::from_static(b"tx1"))
                    && req.mutations.len() == 1
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    CommitResponse::new().set_mutation_results([MutationResult::new()]),
                ))
            });

        let client = Datastore::from_stub("test-project", mock);
        let mut transaction = client.transaction().await?;
        assert_eq!(transaction.id().as_ref(), b"tx1");
        assert!(!transaction.is_read_only());
        let found = transaction.get(&task_key("a")).await?;
        let Some(entity) = found else {
            anyhow::bail!("missing entity");
        };
        transaction.put(entity.set("done", true));
        let saved = transaction.commit().await?;
        assert_eq!(saved, vec![task("a").set("done", true)]);
        Ok(())
    }

    #[tokio::test]
    async fn transaction_rollback() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_begin_transaction()
            .withf(|req: &BeginTransactionRequest, _| {
                req.transaction_options
                    .as_ref()
                    .is_some_and(|o| o.read_only.is_some())
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    BeginTransactionResponse::new()
                        .set_transaction(bytes::Bytes::from_static(b"tx2")),
                ))
            });
        mock.expect_rollback()
            .withf(|req: &RollbackRequest, _| req.transaction.as_ref() == b"tx2")
            .return_once(|_, _| Ok(Response::from(RollbackResponse::new())));

        let client = Datastore::from_stub("test-project", mock);
        let transaction = client.read_only_transaction().await?;
        assert!(transaction.is_read_only());
        transaction.rollback().await?;
        Ok(())
    }

    #[tokio::test]
    async fn transaction_commit_error() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_begin_transaction().return_once(|_, _| {
            Ok(Response::from(
                BeginTransactionResponse::new().set_transaction(bytes::Bytes::from_static(b"tx3")),
            ))
        });
        mock.expect_commit().return_once(|_, _| {
            Err(gax::error::Error::service(
                Status::default()
                    .set_code(Code::Aborted)
                    .set_message("too much contention"),
            ))
        });

        let client = Datastore::from_stub("test-project", mock);
        let mut transaction = client.transaction().await?;
        transaction.upsert(task("a"));
        let err = transaction.commit().await.unwrap_err();
        assert_eq!(err.status().map(|s| s.code), Some(Code::Aborted), "{err:?}");
        Ok(())
    }
}
