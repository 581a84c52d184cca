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

/// Implements a [Datastore](crate::stub::Datastore) decorator for logging and tracing.
#[derive(Clone, Debug)]
pub struct Datastore<T>
where
    T: crate::stub::Datastore + std::fmt::Debug + Send + Sync,
{
    inner: T,
}

impl<T> Datastore<T>
where
    T: crate::stub::Datastore + std::fmt::Debug + Send + Sync,
{
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T> crate::stub::Datastore for Datastore<T>
where
    T: crate::stub::Datastore + std::fmt::Debug + Send + Sync,
{
    #[::tracing::instrument(ret)]
    async fn lookup(
        &self,
        req: model::LookupRequest,
        options: RequestOptions,
    ) -> Result<Response<model::LookupResponse>> {
        self.inner.lookup(req, options).await
    }

    #[::tracing::instrument(ret)]
    async fn run_query(
        &self,
        req: model::RunQueryRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RunQueryResponse>> {
        self.inner.run_query(req, options).await
    }

    #[::tracing::instrument(ret)]
    async fn begin_transaction(
        &self,
        req: model::BeginTransactionRequest,
        options: RequestOptions,
    ) -> Result<Response<model::BeginTransactionResponse>> {
        self.inner.begin_transaction(req, options).await
    }

    #[::tracing::instrument(ret)]
    async fn commit(
        &self,
        req: model::CommitRequest,
        options: RequestOptions,
    ) -> Result<Response<model::CommitResponse>> {
        self.inner.commit(req, options).await
    }

    #[::tracing::instrument(ret)]
    async fn rollback(
        &self,
        req: model::RollbackRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RollbackResponse>> {
        self.inner.rollback(req, options).await
    }

    #[::tracing::instrument(ret)]
    async fn allocate_ids(
        &self,
        req: model::AllocateIdsRequest,
        options: RequestOptions,
    ) -> Result<Response<model::AllocateIdsResponse>> {
        self.inner.allocate_ids(req, options).await
    }
}
