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
use crate::model;
use google_cloud_gax::options::RequestOptions;
use google_cloud_gax::response::Response;

/// A dyn-compatible, crate-private version of [super::Datastore].
#[async_trait::async_trait]
pub trait Datastore: std::fmt::Debug + Send + Sync {
    async fn lookup(
        &self,
        req: model::LookupRequest,
        options: RequestOptions,
    ) -> Result<Response<model::LookupResponse>>;

    async fn run_query(
        &self,
        req: model::RunQueryRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RunQueryResponse>>;

    async fn begin_transaction(
        &self,
        req: model::BeginTransactionRequest,
        options: RequestOptions,
    ) -> Result<Response<model::BeginTransactionResponse>>;

    async fn commit(
        &self,
        req: model::CommitRequest,
        options: RequestOptions,
    ) -> Result<Response<model::CommitResponse>>;

    async fn rollback(
        &self,
        req: model::RollbackRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RollbackResponse>>;

    async fn allocate_ids(
        &self,
        req: model::AllocateIdsRequest,
        options: RequestOptions,
    ) -> Result<Response<model::AllocateIdsResponse>>;
}

/// All implementations of [super::Datastore] also implement [Datastore].
#[async_trait::async_trait]
impl<T: super::Datastore> Datastore for T {
    async fn lookup(
        &self,
        req: model::LookupRequest,
        options: RequestOptions,
    ) -> Result<Response<model::LookupResponse>> {
        T::lookup(self, req, options).await
    }

    async fn run_query(
        &self,
        req: model::RunQueryRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RunQueryResponse>> {
        T::run_query(self, req, options).await
    }

    async fn begin_transaction(
        &self,
        req: model::BeginTransactionRequest,
        options: RequestOptions,
    ) -> Result<Response<model::BeginTransactionResponse>> {
        T::begin_transaction(self, req, options).await
    }

    async fn commit(
        &self,
        req: model::CommitRequest,
        options: RequestOptions,
    ) -> Result<Response<model::CommitResponse>> {
        T::commit(self, req, options).await
    }

    async fn rollback(
        &self,
        req: model::RollbackRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RollbackResponse>> {
        T::rollback(self, req, options).await
    }

    async fn allocate_ids(
        &self,
        req: model::AllocateIdsRequest,
        options: RequestOptions,
    ) -> Result<Response<model::AllocateIdsResponse>> {
        T::allocate_ids(self, req, options).await
    }
}
