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

//! Traits to mock the clients in this library.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

use crate::Result;
use crate::model;
use gax::options::RequestOptions;
use gax::response::Response;
use google_cloud_gax as gax;

pub(crate) mod dynamic;

/// Defines the trait used to implement [crate::client::Datastore].
///
/// Application developers may need to implement this trait to mock
/// `client::Datastore`. In other use-cases, application developers only
/// use `client::Datastore` and need not be concerned with this trait or
/// its implementations.
///
/// Services gain new RPCs routinely. Consequently, this trait gains new methods
/// too. To avoid breaking applications the trait provides a default
/// implementation of each method. Most of these implementations just return an
/// error.
pub trait Datastore: std::fmt::Debug + Send + Sync {
    /// Implements [crate::client::Datastore::lookup].
    fn lookup(
        &self,
        _req: model::LookupRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::LookupResponse>>> + Send {
        unimplemented_stub()
    }

    /// Implements [crate::client::Datastore::run_query].
    fn run_query(
        &self,
        _req: model::RunQueryRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::RunQueryResponse>>> + Send {
        unimplemented_stub()
    }

    /// Implements [crate::client::Datastore::begin_transaction].
    fn begin_transaction(
        &self,
        _req: model::BeginTransactionRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::BeginTransactionResponse>>> + Send
    {
        unimplemented_stub()
    }

    /// Implements [crate::client::Datastore::commit].
    fn commit(
        &self,
        _req: model::CommitRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::CommitResponse>>> + Send {
        unimplemented_stub()
    }

    /// Implements [crate::client::Datastore::rollback].
    fn rollback(
        &self,
        _req: model::RollbackRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::RollbackResponse>>> + Send {
        unimplemented_stub()
    }

    /// Implements [crate::client::Datastore::allocate_ids].
    fn allocate_ids(
        &self,
        _req: model::AllocateIdsRequest,
        _options: RequestOptions,
    ) -> impl std::future::Future<Output = Result<Response<model::AllocateIdsResponse>>> + Send {
        unimplemented_stub()
    }
}

const UNIMPLEMENTED: &str = concat!(
    "the default implementation of each stub method panics. ",
    "Override the methods used by your tests."
);

async fn unimplemented_stub<T: Send>() -> Result<T> {
    unimplemented!("{UNIMPLEMENTED}");
}
