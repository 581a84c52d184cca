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

use crate::Result;
use crate::batch::{Batch, Transaction};
use crate::builder::datastore as builders;
use crate::model::{
    Entity, Key, MoreResultsType, PartitionId, PathElement, Query, ReadOptions,
    TransactionOptions,
};
use crate::stub::dynamic;
use crate::transport::TransportConfig;
use google_cloud_auth as auth;
use google_cloud_gax as gax;
use std::sync::{Arc, Mutex};

/// Implements a client for the Cloud Datastore API.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// # use google_cloud_datastore::client::Datastore;
/// let client = Datastore::builder("my-project").build().await?;
/// // use `client` to make requests to Cloud Datastore.
/// # google_cloud_gax::client_builder::Result::<()>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `Datastore` use the `with_*` methods in the type returned
/// by [builder()][Datastore::builder]. The default configuration should
/// work for most applications. Common configuration changes include
///
/// * [with_endpoint()]: by default this client uses the global default endpoint
///   (`https://datastore.googleapis.com`). Applications using regional
///   endpoints, such as `https://nam5-datastore.googleapis.com`, need to
///   override this default. If the `DATASTORE_EMULATOR_HOST` environment
///   variable is set, and no endpoint is configured, the client connects to
///   the emulator without authentication.
/// * [with_credentials()]: by default this client uses
///   [Application Default Credentials]. Applications using custom
///   authentication may need to override this default.
///
/// # Pooling and Cloning
///
/// `Datastore` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Datastore` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// # Service Description
///
/// Each project has a collection of entities. Entities are identified by a
/// [Key], which contains the kind of the entity and a name or numeric ID.
/// Keys may have ancestors, forming entity groups. Entities are read by key
/// or with a [Query], and written through a [Batch] or a [Transaction].
///
/// [with_endpoint()]: ClientBuilder::with_endpoint
/// [with_credentials()]: ClientBuilder::with_credentials
/// [Application Default Credentials]: https://cloud.google.com/docs/authentication#adc
#[derive(Clone, Debug)]
pub struct Datastore {
    inner: Arc<dyn dynamic::Datastore>,
    project_id: String,
    database_id: String,
    namespace: Option<String>,
}

/// A page of query results.
///
/// Returned by [Datastore::fetch_page]. Use the `cursor` to continue the
/// query where this page ended.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct QueryPage {
    /// The entities in this page.
    pub entities: Vec<Entity>,
    /// A cursor pointing after the last result in this page.
    pub cursor: Option<bytes::Bytes>,
    /// The state of the query after this page.
    pub more_results: MoreResultsType,
}

impl Datastore {
    /// Returns a builder for [Datastore].
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// # use google_cloud_datastore::client::Datastore;
    /// let client = Datastore::builder("my-project").build().await?;
    /// # google_cloud_gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub fn builder<T: Into<String>>(project_id: T) -> ClientBuilder {
        ClientBuilder::new(project_id.into())
    }

    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub<P, T>(project_id: P, stub: T) -> Self
    where
        P: Into<String>,
        T: crate::stub::Datastore + 'static,
    {
        Self {
            inner: Arc::new(stub),
            project_id: project_id.into(),
            database_id: String::new(),
            namespace: None,
        }
    }

    /// Returns a copy of this client targeting a different namespace.
    pub fn with_namespace<T: Into<String>>(&self, namespace: Option<T>) -> Self {
        Self {
            namespace: namespace.map(Into::into),
            ..self.clone()
        }
    }

    /// The project used by this client.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The database used by this client, empty for the default database.
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// The namespace used by this client, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Creates a key in this client's partition.
    ///
    /// ```
    /// # use google_cloud_datastore::client::Datastore;
    /// # use google_cloud_datastore::model::PathElement;
    /// # fn sample(client: &Datastore) {
    /// let key = client.key([
    ///     PathElement::named("TaskList", "default"),
    ///     PathElement::named("Task", "sampleTask"),
    /// ]);
    /// # }
    /// ```
    pub fn key<T>(&self, path: T) -> Key
    where
        T: IntoIterator<Item = PathElement>,
    {
        Key::from_path(path).set_partition_id(self.partition_id())
    }

    pub(crate) fn partition_id(&self) -> PartitionId {
        PartitionId::new()
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
            .set_namespace_id(self.namespace.clone().unwrap_or_default())
    }

    /// Looks up entities by key.
    pub fn lookup(&self) -> builders::Lookup {
        builders::Lookup::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
    }

    /// Queries for entities.
    pub fn run_query(&self) -> builders::RunQuery {
        builders::RunQuery::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
            .set_or_clear_partition_id(Some(self.partition_id()))
    }

    /// Begins a new transaction.
    pub fn begin_transaction(&self) -> builders::BeginTransaction {
        builders::BeginTransaction::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
    }

    /// Commits a transaction, optionally creating, deleting or modifying some
    /// entities.
    pub fn commit(&self) -> builders::Commit {
        builders::Commit::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
    }

    /// Rolls back a transaction.
    pub fn rollback(&self) -> builders::Rollback {
        builders::Rollback::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
    }

    /// Allocates IDs for the given keys, which is useful for referencing an
    /// entity before it is inserted.
    pub fn allocate_ids(&self) -> builders::AllocateIds {
        builders::AllocateIds::new(self.inner.clone())
            .set_project_id(&self.project_id)
            .set_database_id(&self.database_id)
    }

    /// Retrieves an entity by key, returns `None` if it does not exist.
    ///
    /// ```
    /// # use google_cloud_datastore::client::Datastore;
    /// # use google_cloud_datastore::model::PathElement;
    /// # async fn sample(client: &Datastore) -> anyhow::Result<()> {
    /// let key = client.key([PathElement::named("Task", "sampleTask")]);
    /// if let Some(task) = client.get(&key).await? {
    ///     println!("found {task:?}");
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        let mut found = self.get_multi([key.clone()]).await?;
        Ok(found.pop())
    }

    /// Retrieves multiple entities by key.
    ///
    /// Missing entities are omitted. The order of the results is unrelated to
    /// the order of the keys.
    pub async fn get_multi<T>(&self, keys: T) -> Result<Vec<Entity>>
    where
        T: IntoIterator<Item = Key>,
    {
        self.lookup_all(keys.into_iter().collect(), None).await
    }

    pub(crate) async fn lookup_all(
        &self,
        keys: Vec<Key>,
        read_options: Option<ReadOptions>,
    ) -> Result<Vec<Entity>> {
        for key in &keys {
            key.check_complete()?;
        }
        let mut found = Vec::new();
        let mut pending = keys;
        while !pending.is_empty() {
            let response = self
                .lookup()
                .set_or_clear_read_options(read_options.clone())
                .set_keys(std::mem::take(&mut pending))
                .send()
                .await?;
            tracing::debug!(
                found = response.found.len(),
                missing = response.missing.len(),
                deferred = response.deferred.len(),
                "lookup response"
            );
            found.extend(response.found.into_iter().map(|r| r.entity));
            pending = response.deferred;
        }
        Ok(found)
    }

    /// Saves an entity, returning it with its key completed.
    ///
    /// If the entity has an incomplete key the service allocates an ID.
    pub async fn put(&self, entity: Entity) -> Result<Entity> {
        let mut saved = self.put_multi([entity]).await?;
        saved.pop().ok_or_else(|| {
            crate::error::KeyError::MismatchedResults {
                expected: 1,
                got: 0,
            }
            .into_binding()
        })
    }

    /// Saves multiple entities in a single non-transactional commit.
    pub async fn put_multi<T>(&self, entities: T) -> Result<Vec<Entity>>
    where
        T: IntoIterator<Item = Entity>,
    {
        let mut batch = self.batch();
        for entity in entities {
            batch.put(entity);
        }
        batch.commit().await
    }

    /// Deletes an entity.
    pub async fn delete(&self, key: Key) -> Result<()> {
        self.delete_multi([key]).await
    }

    /// Deletes multiple entities in a single non-transactional commit.
    pub async fn delete_multi<T>(&self, keys: T) -> Result<()>
    where
        T: IntoIterator<Item = Key>,
    {
        let mut batch = self.batch();
        for key in keys {
            batch.delete(key);
        }
        batch.commit().await.map(|_| ())
    }

    /// Allocates `count` IDs for the incomplete key.
    ///
    /// Returns the completed keys.
    pub async fn allocate_keys(&self, incomplete_key: &Key, count: usize) -> Result<Vec<Key>> {
        if incomplete_key.path.is_empty() {
            return Err(crate::error::KeyError::EmptyPath.into_binding());
        }
        let response = self
            .allocate_ids()
            .set_keys(std::iter::repeat_n(incomplete_key.clone(), count))
            .send()
            .await?;
        Ok(response.keys)
    }

    /// Runs a query and returns all the results.
    ///
    /// The client keeps fetching batches while the service reports more
    /// results.
    ///
    /// ```
    /// # use google_cloud_datastore::client::Datastore;
    /// # use google_cloud_datastore::model::{Filter, Operator, Query};
    /// # async fn sample(client: &Datastore) -> anyhow::Result<()> {
    /// let query = Query::new("Task").add_filter(Filter::property("done", Operator::Equal, false));
    /// for task in client.fetch(query).await? {
    ///     println!("{task:?}");
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn fetch(&self, query: Query) -> Result<Vec<Entity>> {
        self.fetch_all(query, None).await
    }

    pub(crate) async fn fetch_all(
        &self,
        mut query: Query,
        read_options: Option<ReadOptions>,
    ) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();
        loop {
            let response = self
                .run_query()
                .set_or_clear_read_options(read_options.clone())
                .set_query(query.clone())
                .send()
                .await?;
            let batch = response.batch;
            let count = batch.entity_results.len() as i32;
            entities.extend(batch.entity_results.into_iter().map(|r| r.entity));
            if batch.more_results != MoreResultsType::NotFinished {
                break;
            }
            let Some(cursor) = batch.end_cursor else {
                break;
            };
            query.start_cursor = Some(cursor);
            query.offset = (query.offset - batch.skipped_results).max(0);
            if let Some(limit) = query.limit.as_mut() {
                *limit -= count;
                if *limit <= 0 {
                    break;
                }
            }
            tracing::debug!(count, "fetching the next batch of query results");
        }
        Ok(entities)
    }

    /// Runs a query and returns the first batch of results.
    ///
    /// ```
    /// # use google_cloud_datastore::client::Datastore;
    /// # use google_cloud_datastore::model::Query;
    /// # async fn sample(client: &Datastore) -> anyhow::Result<()> {
    /// let page = client.fetch_page(Query::new("Task").set_limit(5)).await?;
    /// let next = client
    ///     .fetch_page(Query::new("Task").set_limit(5).set_or_clear_start_cursor(page.cursor))
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub async fn fetch_page(&self, query: Query) -> Result<QueryPage> {
        let response = self.run_query().set_query(query).send().await?;
        let batch = response.batch;
        Ok(QueryPage {
            entities: batch.entity_results.into_iter().map(|r| r.entity).collect(),
            cursor: batch.end_cursor,
            more_results: batch.more_results,
        })
    }

    /// Creates a batch of non-transactional mutations.
    pub fn batch(&self) -> Batch {
        Batch::new(self.clone(), None)
    }

    /// Begins a read-write transaction.
    pub async fn transaction(&self) -> Result<Transaction> {
        self.start_transaction(TransactionOptions::read_write()).await
    }

    /// Begins a read-only transaction.
    pub async fn read_only_transaction(&self) -> Result<Transaction> {
        self.start_transaction(TransactionOptions::read_only()).await
    }

    async fn start_transaction(&self, options: TransactionOptions) -> Result<Transaction> {
        let read_only = options.read_only.is_some();
        let response = self
            .begin_transaction()
            .set_transaction_options(options)
            .send()
            .await?;
        tracing::debug!(read_only, "transaction started");
        Ok(Transaction::new(self.clone(), response.transaction, read_only))
    }

    async fn new(builder: ClientBuilder) -> gax::client_builder::Result<Self> {
        use gax::client_builder::Error;
        let emulator = std::env::var(crate::EMULATOR_HOST_VAR)
            .ok()
            .filter(|v| !v.is_empty());
        let (endpoint, cred) = match (builder.endpoint, emulator) {
            (Some(endpoint), _) => (endpoint, builder.credentials),
            (None, Some(host)) => (
                format!("http://{host}"),
                builder
                    .credentials
                    .or_else(|| Some(auth::credentials::anonymous::Builder::new().build())),
            ),
            (None, None) => (crate::DEFAULT_HOST.to_string(), builder.credentials),
        };
        let cred = match cred {
            Some(c) => c,
            None => auth::credentials::Builder::default()
                .build()
                .map_err(Error::cred)?,
        };
        let options = builder.default_options;
        let config = TransportConfig {
            endpoint,
            cred,
            retry_policy: options.retry_policy().clone(),
            backoff_policy: options.backoff_policy().clone(),
            retry_throttler: options.retry_throttler().clone().unwrap_or_else(|| {
                Arc::new(Mutex::new(gax::retry_throttler::AdaptiveThrottler::default()))
            }),
        };
        let transport = crate::transport::Datastore::new(config);
        let inner: Arc<dyn dynamic::Datastore> = if builder.tracing {
            Arc::new(crate::tracing::Datastore::new(transport))
        } else {
            Arc::new(transport)
        };
        Ok(Self {
            inner,
            project_id: builder.project_id,
            database_id: builder.database_id,
            namespace: builder.namespace,
        })
    }
}

/// A builder for [Datastore].
///
/// ```
/// # tokio_test::block_on(async {
/// # use google_cloud_datastore::client::Datastore;
/// let client = Datastore::builder("my-project")
///     .with_endpoint("https://nam5-datastore.googleapis.com")
///     .build()
///     .await?;
/// # google_cloud_gax::client_builder::Result::<()>::Ok(()) });
/// ```
pub struct ClientBuilder {
    project_id: String,
    database_id: String,
    namespace: Option<String>,
    endpoint: Option<String>,
    credentials: Option<auth::credentials::Credentials>,
    tracing: bool,
    // Default options for requests.
    default_options: gax::options::RequestOptions,
}

impl ClientBuilder {
    pub(crate) fn new(project_id: String) -> Self {
        use gax::retry_policy::{Aip194Strict, RetryPolicyExt};
        let mut default_options = gax::options::RequestOptions::default();
        default_options
            .set_retry_policy(Aip194Strict.with_time_limit(std::time::Duration::from_secs(60)));
        Self {
            project_id,
            database_id: String::new(),
            namespace: None,
            endpoint: None,
            credentials: None,
            tracing: false,
            default_options,
        }
    }

    /// Creates a new client.
    pub async fn build(self) -> gax::client_builder::Result<Datastore> {
        Datastore::new(self).await
    }

    /// Sets the endpoint.
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// # use google_cloud_datastore::client::Datastore;
    /// let client = Datastore::builder("my-project")
    ///     .with_endpoint("https://nam5-datastore.googleapis.com")
    ///     .build()
    ///     .await?;
    /// # google_cloud_gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    ///
    /// More information about valid credentials types can be found in the
    /// [google-cloud-auth] crate documentation.
    ///
    /// [google-cloud-auth]: https://docs.rs/google-cloud-auth
    pub fn with_credentials<V: Into<auth::credentials::Credentials>>(mut self, v: V) -> Self {
        self.credentials = Some(v.into());
        self
    }

    /// Targets a named database, the default database is used otherwise.
    pub fn with_database_id<V: Into<String>>(mut self, v: V) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets the namespace for keys and queries created by the client.
    pub fn with_namespace<V: Into<String>>(mut self, v: V) -> Self {
        self.namespace = Some(v.into());
        self
    }

    /// Configure the retry policy.
    ///
    /// The client libraries can automatically retry operations that fail. The
    /// retry policy controls what errors are considered retryable, sets limits
    /// on the number of attempts or the time trying to make attempts.
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// # use google_cloud_datastore::client::Datastore;
    /// use google_cloud_gax::retry_policy::{AlwaysRetry, RetryPolicyExt};
    /// let client = Datastore::builder("my-project")
    ///     .with_retry_policy(AlwaysRetry.with_attempt_limit(3))
    ///     .build()
    ///     .await?;
    /// # google_cloud_gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub fn with_retry_policy<V: Into<gax::retry_policy::RetryPolicyArg>>(mut self, v: V) -> Self {
        self.default_options.set_retry_policy(v);
        self
    }

    /// Configure the retry backoff policy.
    ///
    /// The backoff policy controls how long to wait in between retry attempts.
    pub fn with_backoff_policy<V: Into<gax::backoff_policy::BackoffPolicyArg>>(
        mut self,
        v: V,
    ) -> Self {
        self.default_options.set_backoff_policy(v);
        self
    }

    /// Configure the retry throttler.
    ///
    /// Advanced applications may want to configure a retry throttler to
    /// [Address Cascading Failures] and when [Handling Overload] conditions.
    ///
    /// [Handling Overload]: https://sre.google/sre-book/handling-overload/
    /// [Address Cascading Failures]: https://sre.google/sre-book/addressing-cascading-failures/
    pub fn with_retry_throttler<V: Into<gax::retry_throttler::RetryThrottlerArg>>(
        mut self,
        v: V,
    ) -> Self {
        self.default_options.set_retry_throttler(v);
        self
    }

    /// Enables tracing.
    ///
    /// The client emits a `tracing` span for each RPC, including the request
    /// and the response.
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{
        AllocateIdsRequest, AllocateIdsResponse, EntityResult, LookupRequest, LookupResponse,
        QueryResultBatch, RunQueryRequest, RunQueryResponse,
    };
    use gax::options::RequestOptions;
    use gax::response::Response;
    use httptest::matchers::request;
    use httptest::responders::json_encoded;
    use httptest::{Expectation, Server};
    use pretty_assertions::assert_eq;
    use scoped_env::ScopedEnv;
    use serde_json::json;
    use serial_test::serial;

    mockall::mock! {
        #[derive(Debug)]
        pub(crate) Datastore {}
        impl crate::stub::Datastore for Datastore {
            async fn lookup(&self, req: crate::model::LookupRequest, _options: RequestOptions) -> Result<Response<crate::model::LookupResponse>>;
            async fn run_query(&self, req: crate::model::RunQueryRequest, _options: RequestOptions) -> Result<Response<crate::model::RunQueryResponse>>;
            async fn begin_transaction(&self, req: crate::model::BeginTransactionRequest, _options: RequestOptions) -> Result<Response<crate::model::BeginTransactionResponse>>;
            async fn commit(&self, req: crate::model::CommitRequest, _options: RequestOptions) -> Result<Response<crate::model::CommitResponse>>;
            async fn rollback(&self, req: crate::model::RollbackRequest, _options: RequestOptions) -> Result<Response<crate::model::RollbackResponse>>;
            async fn allocate_ids(&self, req: crate::model::AllocateIdsRequest, _options: RequestOptions) -> Result<Response<crate::model::AllocateIdsResponse>>;
        }
    }

    pub(crate) fn task_key(name: &str) -> Key {
        Key::from_path([PathElement::named("Task", name)])
    }

    pub(crate) fn task(name: &str) -> Entity {
        Entity::new(task_key(name)).set("done", false)
    }

    #[tokio::test]
    async fn get_found() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_lookup()
            .withf(|req: &LookupRequest, options: &RequestOptions| {
                req.project_id == "test-project"
                    && req.keys == vec![task_key("sampleTask")]
                    && options.idempotent() == Some(true)
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    LookupResponse::new().set_found([EntityResult::new(task("sampleTask"))]),
                ))
            });

        let client = Datastore::from_stub("test-project", mock);
        let got = client.get(&task_key("sampleTask")).await?;
        assert_eq!(got, Some(task("sampleTask")));
        Ok(())
    }

    #[tokio::test]
    async fn get_missing() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_lookup().return_once(|_, _| {
            Ok(Response::from(
                LookupResponse::new().set_missing([EntityResult::new(Entity::new(task_key("a")))]),
            ))
        });

        let client = Datastore::from_stub("test-project", mock);
        let got = client.get(&task_key("a")).await?;
        assert_eq!(got, None);
        Ok(())
    }

    #[tokio::test]
    async fn get_multi_deferred() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockDatastore::new();
        mock.expect_lookup()
            .withf(|req: &LookupRequest, _| req.keys.len() == 2)
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(Response::from(
                    LookupResponse::new()
                        .set_found([EntityResult::new(task("a"))])
                        .set_deferred([task_key("b")]),
                ))
            });
        mock.expect_lookup()
            .withf(|req: &LookupRequest, _| req.keys == vec![task_key("b")])
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(Response::from(
                    LookupResponse::new().set_found([EntityResult::new(task("b"))]),
                ))
            });

        let client = Datastore::from_stub("test-project", mock);
        let got = client.get_multi([task_key("a"), task_key("b")]).await?;
        assert_eq!(got, vec![task("a"), task("b")]);
        Ok(())
    }

    #[tokio::test]
    async fn get_incomplete_key() {
        let mock = MockDatastore::new();
        let client = Datastore::from_stub("test-project", mock);
        let key = Key::from_path([PathElement::incomplete("Task")]);
        let err = client.get(&key).await.unwrap_err();
        assert!(err.is_binding(), "{err:?}");
    }

    #[tokio::test]
    async fn fetch_drains_batches() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockDatastore::new();
        mock.expect_run_query()
            .withf(|req: &RunQueryRequest, _| {
                req.query.as_ref().is_some_and(|q| q.start_cursor.is_none() && q.limit == Some(3))
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(Response::from(
                    RunQueryResponse::new().set_batch(
                        QueryResultBatch::new()
                            .set_entity_results([
                                EntityResult::new(task("a")),
                                EntityResult::new(task("b")),
                            ])
                            .set_end_cursor(bytes::Bytes::from_static(b"c1"))
                            .set_more_results(MoreResultsType::NotFinished),
                    ),
                ))
            });
        mock.expect_run_query()
            .withf(|req: &RunQueryRequest, _| {
                req.query.as_ref().is_some_and(|q| {
                    q.start_cursor == Some(bytes::Bytes::from_static(b"c1")) && q.limit == Some(1)
                })
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(Response::from(
                    RunQueryResponse::new().set_batch(
                        QueryResultBatch::new()
                            .set_entity_results([EntityResult::new(task("c"))])
                            .set_more_results(MoreResultsType::MoreResultsAfterLimit),
                    ),
                ))
            });

        let client = Datastore::from_stub("test-project", mock);
        let got = client.fetch(Query::new("Task").set_limit(3)).await?;
        assert_eq!(got, vec![task("a"), task("b"), task("c")]);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_run_query()
            .withf(|req: &RunQueryRequest, _| {
                let want = PartitionId::new()
                    .set_project_id("test-project")
                    .set_namespace_id("ns");
                req.partition_id == Some(want)
            })
            .return_once(|_, _| {
                Ok(Response::from(
                    RunQueryResponse::new().set_batch(
                        QueryResultBatch::new()
                            .set_entity_results([EntityResult::new(task("a"))])
                            .set_end_cursor(bytes::Bytes::from_static(b"c1"))
                            .set_more_results(MoreResultsType::NotFinished),
                    ),
                ))
            });

        let client = Datastore::from_stub("test-project", mock).with_namespace(Some("ns"));
        let page = client.fetch_page(Query::new("Task").set_limit(1)).await?;
        assert_eq!(page.entities, vec![task("a")]);
        assert_eq!(page.cursor, Some(bytes::Bytes::from_static(b"c1")));
        assert_eq!(page.more_results, MoreResultsType::NotFinished);
        Ok(())
    }

    #[tokio::test]
    async fn allocate_keys() -> anyhow::Result<()> {
        let mut mock = MockDatastore::new();
        mock.expect_allocate_ids()
            .withf(|req: &AllocateIdsRequest, _| req.keys.len() == 2)
            .return_once(|req, _| {
                let keys = req
                    .keys
                    .into_iter()
                    .enumerate()
                    .map(|(i, k)| {
                        let kind = k.kind().unwrap_or_default().to_string();
                        Key::from_path([PathElement::with_id(kind, i as i64 + 1)])
                    });
                Ok(Response::from(AllocateIdsResponse::new().set_keys(keys)))
            });

        let client = Datastore::from_stub("test-project", mock);
        let incomplete = client.key([PathElement::incomplete("Task")]);
        let got = client.allocate_keys(&incomplete, 2).await?;
        let ids = got.iter().filter_map(Key::id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn key_partition() {
        let client =
            Datastore::from_stub("test-project", MockDatastore::new()).with_namespace(Some("ns"));
        let key = client.key([PathElement::named("Task", "a")]);
        assert_eq!(
            key.partition_id,
            Some(PartitionId::new().set_project_id("test-project").set_namespace_id("ns"))
        );
        assert_eq!(client.namespace(), Some("ns"));
        assert_eq!(client.database_id(), "");
    }

    #[tokio::test]
    #[serial]
    async fn emulator() -> anyhow::Result<()> {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/projects/test-project:lookup"))
                .respond_with(json_encoded(json!({}))),
        );
        let addr = server.addr().to_string();
        let _env = ScopedEnv::set(crate::EMULATOR_HOST_VAR, addr.as_str());
        let client = Datastore::builder("test-project").with_tracing().build().await?;
        let got = client.get(&task_key("a")).await?;
        assert_eq!(got, None);
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn endpoint_overrides_emulator() -> anyhow::Result<()> {
        let entity = serde_json::to_value(task("a"))?;
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/projects/test-project:lookup"))
                .respond_with(json_encoded(json!({"found": [{"entity": entity}]}))),
        );
        let _env = ScopedEnv::set(crate::EMULATOR_HOST_VAR, "127.0.0.1:1");
        let client = Datastore::builder("test-project")
            .with_endpoint(format!("http://{}", server.addr()))
            .with_credentials(auth::credentials::anonymous::Builder::new().build())
            .build()
            .await?;
        let got = client.get(&task_key("a")).await?;
        assert_eq!(got, Some(task("a")));
        Ok(())
    }
}
