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

//! Request builders for the low-level Datastore RPCs.

pub mod datastore {
    use crate::Result;
    use crate::model;
    use google_cloud_gax as gax;
    use std::sync::Arc;

    pub use crate::client::ClientBuilder;

    /// Common implementation for [crate::client::Datastore] request builders.
    #[derive(Clone, Debug)]
    pub(crate) struct RequestBuilder<R: std::default::Default> {
        stub: Arc<dyn crate::stub::dynamic::Datastore>,
        request: R,
        options: gax::options::RequestOptions,
    }

    impl<R> RequestBuilder<R>
    where
        R: std::default::Default,
    {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self {
                stub,
                request: R::default(),
                options: gax::options::RequestOptions::default(),
            }
        }

        fn idempotent(mut self) -> Self {
            self.options = gax::options::internal::set_default_idempotency(self.options, true);
            self
        }
    }

    /// The request builder for [Datastore::lookup][crate::client::Datastore::lookup] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use google_cloud_datastore::builder::datastore::Lookup;
    /// # use google_cloud_gax as gax;
    /// # async fn sample() -> gax::Result<()> {
    /// let builder = prepare_request_builder();
    /// let response = builder.send().await?;
    /// # gax::Result::<()>::Ok(()) }
    ///
    /// fn prepare_request_builder() -> Lookup {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct Lookup(RequestBuilder<model::LookupRequest>);

    impl Lookup {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub).idempotent())
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::LookupRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::LookupResponse> {
            (*self.0.stub)
                .lookup(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::LookupRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::LookupRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets the value of [read_options][model::LookupRequest::read_options].
        pub fn set_read_options<T: Into<model::ReadOptions>>(mut self, v: T) -> Self {
            self.0.request.read_options = Some(v.into());
            self
        }

        /// Sets or clears the value of [read_options][model::LookupRequest::read_options].
        pub fn set_or_clear_read_options<T>(mut self, v: Option<T>) -> Self
        where
            T: Into<model::ReadOptions>,
        {
            self.0.request.read_options = v.map(Into::into);
            self
        }

        /// Sets the value of [keys][model::LookupRequest::keys].
        ///
        /// This is a **required** field for requests.
        pub fn set_keys<T, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = V>,
            V: Into<model::Key>,
        {
            self.0.request.keys = v.into_iter().map(Into::into).collect();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for Lookup {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Datastore::run_query][crate::client::Datastore::run_query] calls.
    #[derive(Clone, Debug)]
    pub struct RunQuery(RequestBuilder<model::RunQueryRequest>);

    impl RunQuery {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub).idempotent())
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::RunQueryRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::RunQueryResponse> {
            (*self.0.stub)
                .run_query(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::RunQueryRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::RunQueryRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets or clears the value of [partition_id][model::RunQueryRequest::partition_id].
        pub fn set_or_clear_partition_id<T: Into<model::PartitionId>>(
            mut self,
            v: Option<T>,
        ) -> Self {
            self.0.request.partition_id = v.map(Into::into);
            self
        }

        /// Sets or clears the value of [read_options][model::RunQueryRequest::read_options].
        pub fn set_or_clear_read_options<T>(mut self, v: Option<T>) -> Self
        where
            T: Into<model::ReadOptions>,
        {
            self.0.request.read_options = v.map(Into::into);
            self
        }

        /// Sets the value of [query][model::RunQueryRequest::query].
        pub fn set_query<T: Into<model::Query>>(mut self, v: T) -> Self {
            self.0.request.query = Some(v.into());
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for RunQuery {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Datastore::begin_transaction][crate::client::Datastore::begin_transaction] calls.
    #[derive(Clone, Debug)]
    pub struct BeginTransaction(RequestBuilder<model::BeginTransactionRequest>);

    impl BeginTransaction {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::BeginTransactionRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::BeginTransactionResponse> {
            (*self.0.stub)
                .begin_transaction(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::BeginTransactionRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::BeginTransactionRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets the value of [transaction_options][model::BeginTransactionRequest::transaction_options].
        pub fn set_transaction_options<T>(mut self, v: T) -> Self
        where
            T: Into<model::TransactionOptions>,
        {
            self.0.request.transaction_options = Some(v.into());
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for BeginTransaction {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Datastore::commit][crate::client::Datastore::commit] calls.
    #[derive(Clone, Debug)]
    pub struct Commit(RequestBuilder<model::CommitRequest>);

    impl Commit {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::CommitRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::CommitResponse> {
            (*self.0.stub)
                .commit(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::CommitRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::CommitRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets the value of [mode][model::CommitRequest::mode].
        pub fn set_mode<T: Into<model::CommitMode>>(mut self, v: T) -> Self {
            self.0.request.mode = v.into();
            self
        }

        /// Sets or clears the value of [transaction][model::CommitRequest::transaction].
        pub fn set_or_clear_transaction<T: Into<bytes::Bytes>>(mut self, v: Option<T>) -> Self {
            self.0.request.transaction = v.map(Into::into);
            self
        }

        /// Sets the value of [mutations][model::CommitRequest::mutations].
        pub fn set_mutations<T: IntoIterator<Item = model::Mutation>>(mut self, v: T) -> Self {
            self.0.request.mutations = v.into_iter().collect();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for Commit {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Datastore::rollback][crate::client::Datastore::rollback] calls.
    #[derive(Clone, Debug)]
    pub struct Rollback(RequestBuilder<model::RollbackRequest>);

    impl Rollback {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::RollbackRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::RollbackResponse> {
            (*self.0.stub)
                .rollback(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::RollbackRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::RollbackRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets the value of [transaction][model::RollbackRequest::transaction].
        ///
        /// This is a **required** field for requests.
        pub fn set_transaction<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
            self.0.request.transaction = v.into();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for Rollback {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Datastore::allocate_ids][crate::client::Datastore::allocate_ids] calls.
    #[derive(Clone, Debug)]
    pub struct AllocateIds(RequestBuilder<model::AllocateIdsRequest>);

    impl AllocateIds {
        pub(crate) fn new(stub: Arc<dyn crate::stub::dynamic::Datastore>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::AllocateIdsRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<gax::options::RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::AllocateIdsResponse> {
            (*self.0.stub)
                .allocate_ids(self.0.request, self.0.options)
                .await
                .map(gax::response::Response::into_body)
        }

        /// Sets the value of [project_id][model::AllocateIdsRequest::project_id].
        ///
        /// This is a **required** field for requests.
        pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.project_id = v.into();
            self
        }

        /// Sets the value of [database_id][model::AllocateIdsRequest::database_id].
        pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.database_id = v.into();
            self
        }

        /// Sets the value of [keys][model::AllocateIdsRequest::keys].
        ///
        /// This is a **required** field for requests.
        pub fn set_keys<T: IntoIterator<Item = model::Key>>(mut self, v: T) -> Self {
            self.0.request.keys = v.into_iter().collect();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for AllocateIds {
        fn request_options(&mut self) -> &mut gax::options::RequestOptions {
            &mut self.0.options
        }
    }
}
