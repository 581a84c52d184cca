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

use super::{Entity, Key, PartitionId, Query};
use google_cloud_wkt as wkt;
use serde_with::base64::Base64;
use serde_with::{DisplayFromStr, serde_as};

/// The request for [Datastore::lookup][crate::client::Datastore::lookup].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LookupRequest {
    /// The ID of the project against which to make the request.
    #[serde(skip)]
    pub project_id: String,

    /// The ID of the database against which to make the request.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// The options for this lookup request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_options: Option<ReadOptions>,

    /// Keys of entities to look up.
    pub keys: Vec<Key>,
}

impl LookupRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][LookupRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [database_id][LookupRequest::database_id].
    pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets the value of [read_options][LookupRequest::read_options].
    pub fn set_read_options<T: Into<ReadOptions>>(mut self, v: T) -> Self {
        self.read_options = Some(v.into());
        self
    }

    /// Sets the value of [keys][LookupRequest::keys].
    pub fn set_keys<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Key>,
    {
        self.keys = v.into_iter().map(Into::into).collect();
        self
    }
}

/// The response for [Datastore::lookup][crate::client::Datastore::lookup].
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LookupResponse {
    /// Entities found, the order is unrelated to the order of the keys.
    pub found: Vec<EntityResult>,

    /// Entities not found, with only a key populated.
    pub missing: Vec<EntityResult>,

    /// Keys that were not looked up due to resource constraints.
    pub deferred: Vec<Key>,

    /// The identifier of the transaction started as part of the request.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<bytes::Bytes>,

    /// The time at which the entities were read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<wkt::Timestamp>,
}

impl LookupResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [found][LookupResponse::found].
    pub fn set_found<T: IntoIterator<Item = EntityResult>>(mut self, v: T) -> Self {
        self.found = v.into_iter().collect();
        self
    }

    /// Sets the value of [missing][LookupResponse::missing].
    pub fn set_missing<T: IntoIterator<Item = EntityResult>>(mut self, v: T) -> Self {
        self.missing = v.into_iter().collect();
        self
    }

    /// Sets the value of [deferred][LookupResponse::deferred].
    pub fn set_deferred<T: IntoIterator<Item = Key>>(mut self, v: T) -> Self {
        self.deferred = v.into_iter().collect();
        self
    }
}

/// The request for [Datastore::run_query][crate::client::Datastore::run_query].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RunQueryRequest {
    #[serde(skip)]
    pub project_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// Entities are partitioned into subsets, identified by a partition ID.
    /// Queries are scoped to a single partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_id: Option<PartitionId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_options: Option<ReadOptions>,

    /// The query to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

impl RunQueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][RunQueryRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [database_id][RunQueryRequest::database_id].
    pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets or clears the value of [partition_id][RunQueryRequest::partition_id].
    pub fn set_or_clear_partition_id<T: Into<PartitionId>>(mut self, v: Option<T>) -> Self {
        self.partition_id = v.map(Into::into);
        self
    }

    /// Sets the value of [read_options][RunQueryRequest::read_options].
    pub fn set_read_options<T: Into<ReadOptions>>(mut self, v: T) -> Self {
        self.read_options = Some(v.into());
        self
    }

    /// Sets the value of [query][RunQueryRequest::query].
    pub fn set_query<T: Into<Query>>(mut self, v: T) -> Self {
        self.query = Some(v.into());
        self
    }
}

/// The response for [Datastore::run_query][crate::client::Datastore::run_query].
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RunQueryResponse {
    /// A batch of query results (always present).
    pub batch: QueryResultBatch,

    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<bytes::Bytes>,
}

impl RunQueryResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [batch][RunQueryResponse::batch].
    pub fn set_batch<T: Into<QueryResultBatch>>(mut self, v: T) -> Self {
        self.batch = v.into();
        self
    }
}

/// A batch of results produced by a query.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct QueryResultBatch {
    /// The number of results skipped, typically because of an offset.
    pub skipped_results: i32,

    /// A cursor that points to the position after the last skipped result.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_cursor: Option<bytes::Bytes>,

    /// The result type for every entity in `entity_results`.
    pub entity_result_type: EntityResultType,

    /// The results for this batch.
    pub entity_results: Vec<EntityResult>,

    /// A cursor that points to the position after the last result in the
    /// batch.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<bytes::Bytes>,

    /// The state of the query after the current batch.
    pub more_results: MoreResultsType,

    #[serde_as(as = "DisplayFromStr")]
    pub snapshot_version: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<wkt::Timestamp>,
}

impl QueryResultBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [entity_results][QueryResultBatch::entity_results].
    pub fn set_entity_results<T: IntoIterator<Item = EntityResult>>(mut self, v: T) -> Self {
        self.entity_results = v.into_iter().collect();
        self
    }

    /// Sets the value of [end_cursor][QueryResultBatch::end_cursor].
    pub fn set_end_cursor<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.end_cursor = Some(v.into());
        self
    }

    /// Sets the value of [more_results][QueryResultBatch::more_results].
    pub fn set_more_results<T: Into<MoreResultsType>>(mut self, v: T) -> Self {
        self.more_results = v.into();
        self
    }
}

/// The result of fetching an entity from Datastore.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct EntityResult {
    /// The resulting entity.
    pub entity: Entity,

    /// The version of the entity. Absent for entities in `missing` results
    /// and projection queries.
    #[serde_as(as = "DisplayFromStr")]
    pub version: i64,

    /// A cursor that points to the position after the result entity.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<bytes::Bytes>,
}

impl EntityResult {
    pub fn new<T: Into<Entity>>(entity: T) -> Self {
        Self {
            entity: entity.into(),
            ..Default::default()
        }
    }
}

/// Specifies what data the `entity` field contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum EntityResultType {
    /// The key and properties.
    #[serde(rename = "FULL")]
    Full,
    /// A projected subset of properties. The entity may have no key.
    #[serde(rename = "PROJECTION")]
    Projection,
    /// Only the key.
    #[serde(rename = "KEY_ONLY")]
    KeyOnly,
    /// Not set, or a value unknown to this client.
    #[default]
    #[serde(rename = "RESULT_TYPE_UNSPECIFIED", other)]
    Unspecified,
}

/// The possible values for the `more_results` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum MoreResultsType {
    /// There may be additional batches to fetch from this query.
    #[serde(rename = "NOT_FINISHED")]
    NotFinished,
    /// The query is finished, but there may be more results after the limit.
    #[serde(rename = "MORE_RESULTS_AFTER_LIMIT")]
    MoreResultsAfterLimit,
    /// The query is finished, but there may be more results after the end
    /// cursor.
    #[serde(rename = "MORE_RESULTS_AFTER_CURSOR")]
    MoreResultsAfterCursor,
    /// The query is finished, and there are no more results.
    #[serde(rename = "NO_MORE_RESULTS")]
    NoMoreResults,
    /// Not set, or a value unknown to this client.
    #[default]
    #[serde(rename = "MORE_RESULTS_TYPE_UNSPECIFIED", other)]
    Unspecified,
}

/// The request for [Datastore::commit][crate::client::Datastore::commit].
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CommitRequest {
    #[serde(skip)]
    pub project_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// The type of commit to perform.
    pub mode: CommitMode,

    /// The identifier of the transaction associated with the commit. Only
    /// used with [CommitMode::Transactional].
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<bytes::Bytes>,

    /// The mutations to perform. Mutations are applied in order.
    pub mutations: Vec<Mutation>,
}

impl CommitRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][CommitRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [database_id][CommitRequest::database_id].
    pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets the value of [mode][CommitRequest::mode].
    pub fn set_mode<T: Into<CommitMode>>(mut self, v: T) -> Self {
        self.mode = v.into();
        self
    }

    /// Sets the value of [transaction][CommitRequest::transaction].
    pub fn set_transaction<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.transaction = Some(v.into());
        self
    }

    /// Sets the value of [mutations][CommitRequest::mutations].
    pub fn set_mutations<T: IntoIterator<Item = Mutation>>(mut self, v: T) -> Self {
        self.mutations = v.into_iter().collect();
        self
    }
}

/// The modes available for commits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum CommitMode {
    #[serde(rename = "TRANSACTIONAL")]
    Transactional,
    #[serde(rename = "NON_TRANSACTIONAL")]
    NonTransactional,
    /// Not set, or a value unknown to this client.
    #[default]
    #[serde(rename = "MODE_UNSPECIFIED", other)]
    Unspecified,
}

/// A mutation to apply to an entity.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Mutation {
    /// The entity to insert. The entity must not already exist.
    Insert(Entity),
    /// The entity to update. The entity must already exist.
    Update(Entity),
    /// The entity to upsert. The entity may or may not already exist.
    Upsert(Entity),
    /// The key of the entity to delete. The entity may or may not already
    /// exist. Must have a complete key path.
    Delete(Key),
}

impl Mutation {
    /// The key affected by this mutation, if any.
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Insert(e) | Self::Update(e) | Self::Upsert(e) => e.key.as_ref(),
            Self::Delete(k) => Some(k),
        }
    }
}

/// The response for [Datastore::commit][crate::client::Datastore::commit].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CommitResponse {
    /// The result of performing the mutations, in the same order as the
    /// mutations in the request.
    pub mutation_results: Vec<MutationResult>,

    /// The number of index entries updated during the commit.
    pub index_updates: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_time: Option<wkt::Timestamp>,
}

impl CommitResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [mutation_results][CommitResponse::mutation_results].
    pub fn set_mutation_results<T: IntoIterator<Item = MutationResult>>(mut self, v: T) -> Self {
        self.mutation_results = v.into_iter().collect();
        self
    }
}

/// The result of applying a mutation.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct MutationResult {
    /// The automatically allocated key. Set only when the mutation allocated
    /// a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,

    /// The version of the entity on the server after processing the
    /// mutation.
    #[serde_as(as = "DisplayFromStr")]
    pub version: i64,

    /// Whether a conflict was detected for this mutation.
    pub conflict_detected: bool,
}

impl MutationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [key][MutationResult::key].
    pub fn set_key<T: Into<Key>>(mut self, v: T) -> Self {
        self.key = Some(v.into());
        self
    }
}

/// The request for [Datastore::begin_transaction][crate::client::Datastore::begin_transaction].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BeginTransactionRequest {
    #[serde(skip)]
    pub project_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// Options for a new transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_options: Option<TransactionOptions>,
}

impl BeginTransactionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][BeginTransactionRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [transaction_options][BeginTransactionRequest::transaction_options].
    pub fn set_transaction_options<T: Into<TransactionOptions>>(mut self, v: T) -> Self {
        self.transaction_options = Some(v.into());
        self
    }
}

/// The response for [Datastore::begin_transaction][crate::client::Datastore::begin_transaction].
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BeginTransactionResponse {
    /// The transaction identifier (always present).
    #[serde_as(as = "Base64")]
    pub transaction: bytes::Bytes,
}

impl BeginTransactionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [transaction][BeginTransactionResponse::transaction].
    pub fn set_transaction<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.transaction = v.into();
        self
    }
}

/// The request for [Datastore::rollback][crate::client::Datastore::rollback].
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RollbackRequest {
    #[serde(skip)]
    pub project_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// The transaction identifier, returned by a call to
    /// [Datastore::begin_transaction][crate::client::Datastore::begin_transaction].
    #[serde_as(as = "Base64")]
    pub transaction: bytes::Bytes,
}

impl RollbackRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][RollbackRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [transaction][RollbackRequest::transaction].
    pub fn set_transaction<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.transaction = v.into();
        self
    }
}

/// The response for [Datastore::rollback][crate::client::Datastore::rollback].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct RollbackResponse {}

impl RollbackResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The request for [Datastore::allocate_ids][crate::client::Datastore::allocate_ids].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AllocateIdsRequest {
    #[serde(skip)]
    pub project_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub database_id: String,

    /// A list of keys with incomplete key paths for which to allocate IDs.
    pub keys: Vec<Key>,
}

impl AllocateIdsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][AllocateIdsRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [keys][AllocateIdsRequest::keys].
    pub fn set_keys<T: IntoIterator<Item = Key>>(mut self, v: T) -> Self {
        self.keys = v.into_iter().collect();
        self
    }
}

/// The response for [Datastore::allocate_ids][crate::client::Datastore::allocate_ids].
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AllocateIdsResponse {
    /// The keys specified in the request (in the same order), each with its
    /// key path completed with a newly allocated ID.
    pub keys: Vec<Key>,
}

impl AllocateIdsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [keys][AllocateIdsResponse::keys].
    pub fn set_keys<T: IntoIterator<Item = Key>>(mut self, v: T) -> Self {
        self.keys = v.into_iter().collect();
        self
    }
}

/// The options shared by read requests.
///
/// At most one of `read_consistency` and `transaction` may be set.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadOptions {
    /// The non-transactional read consistency to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_consistency: Option<ReadConsistency>,

    /// The identifier of the transaction in which to read.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<bytes::Bytes>,
}

impl ReadOptions {
    /// Read with the given consistency, outside any transaction.
    pub fn with_consistency(v: ReadConsistency) -> Self {
        Self {
            read_consistency: Some(v),
            transaction: None,
        }
    }

    /// Read inside the given transaction.
    pub fn in_transaction<T: Into<bytes::Bytes>>(v: T) -> Self {
        Self {
            read_consistency: None,
            transaction: Some(v.into()),
        }
    }
}

/// The possible read consistencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum ReadConsistency {
    #[serde(rename = "STRONG")]
    Strong,
    #[serde(rename = "EVENTUAL")]
    Eventual,
    /// Not set, or a value unknown to this client.
    #[default]
    #[serde(rename = "READ_CONSISTENCY_UNSPECIFIED", other)]
    Unspecified,
}

/// Options for beginning a new transaction.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TransactionOptions {
    /// The transaction should allow both reads and writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_write: Option<ReadWrite>,

    /// The transaction should only allow reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<ReadOnly>,
}

impl TransactionOptions {
    pub fn read_write() -> Self {
        Self {
            read_write: Some(ReadWrite::default()),
            read_only: None,
        }
    }

    pub fn read_only() -> Self {
        Self {
            read_write: None,
            read_only: Some(ReadOnly::default()),
        }
    }
}

/// Options specific to read / write transactions.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadWrite {
    /// The transaction identifier of the transaction being retried.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_transaction: Option<bytes::Bytes>,
}

/// Options specific to read-only transactions.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ReadOnly {}
