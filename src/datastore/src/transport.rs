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
use auth::credentials::{CacheableResource, Credentials};
use gax::backoff_policy::BackoffPolicy;
use gax::error::Error;
use gax::exponential_backoff::ExponentialBackoff;
use gax::options::RequestOptions;
use gax::response::{Parts, Response};
use gax::retry_policy::RetryPolicy;
use gax::retry_throttler::SharedRetryThrottler;
use google_cloud_auth as auth;
use google_cloud_gax as gax;
use http::Extensions;
use std::sync::Arc;

/// The configuration shared by all the requests sent through [Datastore].
#[derive(Clone, Debug)]
pub(crate) struct TransportConfig {
    pub endpoint: String,
    pub cred: Credentials,
    pub retry_policy: Option<Arc<dyn RetryPolicy>>,
    pub backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    pub retry_throttler: SharedRetryThrottler,
}

/// Sends Datastore v1 requests as JSON over HTTP.
#[derive(Clone, Debug)]
pub(crate) struct Datastore {
    inner: reqwest::Client,
    config: Arc<TransportConfig>,
}

impl Datastore {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            inner: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    fn url(&self, project_id: &str, method: &str) -> String {
        format!(
            "{}/v1/projects/{project_id}:{method}",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn execute<I, O>(
        &self,
        project_id: &str,
        database_id: &str,
        method: &'static str,
        body: &I,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        I: serde::ser::Serialize,
        O: serde::de::DeserializeOwned + Default,
    {
        if project_id.is_empty() {
            return Err(Error::binding(format!(
                "missing project id in {method} request"
            )));
        }
        let payload = serde_json::to_vec(body).map_err(Error::ser)?;
        let mut builder = self
            .inner
            .post(self.url(project_id, method))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(
                "x-goog-request-params",
                routing_header(project_id, database_id),
            )
            .body(bytes::Bytes::from(payload));
        if let Some(user_agent) = options.user_agent() {
            builder = builder.header(
                reqwest::header::USER_AGENT,
                reqwest::header::HeaderValue::from_str(user_agent).map_err(Error::ser)?,
            );
        }
        tracing::debug!(method, project_id, "sending Datastore request");
        match self.get_retry_policy(&options) {
            None => self.request_attempt::<O>(builder, &options, None).await,
            Some(policy) => self.retry_loop::<O>(builder, options, policy).await,
        }
    }

    async fn retry_loop<O: serde::de::DeserializeOwned + Default>(
        &self,
        builder: reqwest::RequestBuilder,
        options: RequestOptions,
        retry_policy: Arc<dyn RetryPolicy>,
    ) -> Result<Response<O>> {
        let idempotent = options.idempotent().unwrap_or(false);
        let throttler = self.get_retry_throttler(&options);
        let backoff = self.get_backoff_policy(&options);
        let this = self.clone();
        let inner = async move |d| {
            let builder = builder
                .try_clone()
                .ok_or_else(|| Error::io("cannot clone the request builder in the retry loop"))?;
            this.request_attempt(builder, &options, d).await
        };
        let sleep = async |d| tokio::time::sleep(d).await;
        gax::retry_loop_internal::retry_loop(
            inner,
            sleep,
            idempotent,
            throttler,
            retry_policy,
            backoff,
        )
        .await
    }

    async fn request_attempt<O: serde::de::DeserializeOwned + Default>(
        &self,
        mut builder: reqwest::RequestBuilder,
        options: &RequestOptions,
        remaining_time: Option<std::time::Duration>,
    ) -> Result<Response<O>> {
        builder = gax::retry_loop_internal::effective_timeout(options, remaining_time)
            .into_iter()
            .fold(builder, |b, t| b.timeout(t));
        let cached_auth_headers = self
            .config
            .cred
            .headers(Extensions::new())
            .await
            .map_err(Error::authentication)?;
        let auth_headers = match cached_auth_headers {
            CacheableResource::New { data, .. } => data,
            CacheableResource::NotModified => {
                unreachable!("headers are not cached");
            }
        };
        let builder = builder.headers(auth_headers);
        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return to_http_error(response).await;
        }
        to_http_response(response).await
    }

    fn get_retry_policy(&self, options: &RequestOptions) -> Option<Arc<dyn RetryPolicy>> {
        options
            .retry_policy()
            .clone()
            .or_else(|| self.config.retry_policy.clone())
    }

    fn get_backoff_policy(&self, options: &RequestOptions) -> Arc<dyn BackoffPolicy> {
        options
            .backoff_policy()
            .clone()
            .or_else(|| self.config.backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }

    fn get_retry_throttler(&self, options: &RequestOptions) -> SharedRetryThrottler {
        options
            .retry_throttler()
            .clone()
            .unwrap_or_else(|| self.config.retry_throttler.clone())
    }
}

impl crate::stub::Datastore for Datastore {
    async fn lookup(
        &self,
        req: model::LookupRequest,
        options: RequestOptions,
    ) -> Result<Response<model::LookupResponse>> {
        self.execute(&req.project_id, &req.database_id, "lookup", &req, options)
            .await
    }

    async fn run_query(
        &self,
        req: model::RunQueryRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RunQueryResponse>> {
        self.execute(&req.project_id, &req.database_id, "runQuery", &req, options)
            .await
    }

    async fn begin_transaction(
        &self,
        req: model::BeginTransactionRequest,
        options: RequestOptions,
    ) -> Result<Response<model::BeginTransactionResponse>> {
        self.execute(
            &req.project_id,
            &req.database_id,
            "beginTransaction",
            &req,
            options,
        )
        .await
    }

    async fn commit(
        &self,
        req: model::CommitRequest,
        options: RequestOptions,
    ) -> Result<Response<model::CommitResponse>> {
        self.execute(&req.project_id, &req.database_id, "commit", &req, options)
            .await
    }

    async fn rollback(
        &self,
        req: model::RollbackRequest,
        options: RequestOptions,
    ) -> Result<Response<model::RollbackResponse>> {
        self.execute(&req.project_id, &req.database_id, "rollback", &req, options)
            .await
    }

    async fn allocate_ids(
        &self,
        req: model::AllocateIdsRequest,
        options: RequestOptions,
    ) -> Result<Response<model::AllocateIdsResponse>> {
        self.execute(
            &req.project_id,
            &req.database_id,
            "allocateIds",
            &req,
            options,
        )
        .await
    }
}

fn routing_header(project_id: &str, database_id: &str) -> String {
    match database_id {
        "" => format!("project_id={project_id}"),
        d => format!("project_id={project_id}&database_id={d}"),
    }
}

fn map_send_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;
    let error = match gax::error::rpc::Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        Err(_) => Error::http(status_code, headers, body),
    };
    Err(error)
}

async fn to_http_response<O: serde::de::DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<Response<O>> {
    // 204 No Content has no body.
    let no_content_status = response.status() == reqwest::StatusCode::NO_CONTENT;
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;
    let response = match body {
        content if content.is_empty() && no_content_status => O::default(),
        content => serde_json::from_slice::<O>(&content).map_err(Error::deser)?,
    };
    Ok(Response::from_parts(
        Parts::new().set_headers(headers),
        response,
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Entity, Key, PathElement};
    use crate::stub::Datastore as _;
    use gax::error::rpc::Code;
    use gax::exponential_backoff::ExponentialBackoffBuilder;
    use gax::options::internal::set_default_idempotency;
    use gax::retry_policy::{Aip194Strict, RetryPolicyExt};
    use gax::retry_throttler::AdaptiveThrottler;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    type TestResult = anyhow::Result<()>;

    pub(crate) fn test_config(endpoint: String) -> anyhow::Result<TransportConfig> {
        Ok(TransportConfig {
            endpoint,
            cred: auth::credentials::anonymous::Builder::new().build(),
            retry_policy: Some(Arc::new(Aip194Strict.with_attempt_limit(3))),
            backoff_policy: Some(Arc::new(
                ExponentialBackoffBuilder::new()
                    .with_initial_delay(Duration::from_millis(1))
                    .with_maximum_delay(Duration::from_millis(2))
                    .build()?,
            )),
            retry_throttler: Arc::new(Mutex::new(AdaptiveThrottler::default())),
        })
    }

    fn transient() -> impl httptest::responders::Responder {
        status_code(503).body(
            json!({"error": {"code": 503, "message": "try-again", "status": "UNAVAILABLE"}})
                .to_string(),
        )
    }

    #[tokio::test]
    async fn lookup_success() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/v1/projects/test-project:lookup"),
                request::headers(contains(("x-goog-request-params", "project_id=test-project"))),
                request::body(json_decoded(eq(json!({
                    "keys": [{"path": [{"kind": "Task", "name": "sampleTask"}]}]
                })))),
            ])
            .respond_with(json_encoded(json!({
                "found": [{
                    "entity": {
                        "key": {"path": [{"kind": "Task", "name": "sampleTask"}]},
                        "properties": {"done": {"booleanValue": false}},
                    },
                    "version": "1",
                }]
            }))),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let key = Key::from_path([PathElement::named("Task", "sampleTask")]);
        let request = model::LookupRequest::new()
            .set_project_id("test-project")
            .set_keys([key.clone()]);
        let response = transport
            .lookup(request, RequestOptions::default())
            .await?
            .into_body();
        let want = Entity::new(key).set("done", false);
        assert_eq!(response.found.len(), 1);
        assert_eq!(response.found[0].entity, want);
        Ok(())
    }

    #[tokio::test]
    async fn database_routing() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/v1/projects/test-project:allocateIds"),
                request::headers(contains((
                    "x-goog-request-params",
                    "project_id=test-project&database_id=db"
                ))),
                request::body(json_decoded(eq(json!({"databaseId": "db", "keys": []})))),
            ])
            .respond_with(json_encoded(json!({}))),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let mut request = model::AllocateIdsRequest::new().set_project_id("test-project");
        request.database_id = "db".to_string();
        let response = transport
            .allocate_ids(request, RequestOptions::default())
            .await?
            .into_body();
        assert!(response.keys.is_empty(), "{response:?}");
        Ok(())
    }

    #[tokio::test]
    async fn retry_transient_idempotent() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/projects/test-project:runQuery",
            ))
                .times(3)
                .respond_with(cycle![
                    transient(),
                    transient(),
                    json_encoded(json!({"batch": {"moreResults": "NO_MORE_RESULTS"}})),
                ]),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let request = model::RunQueryRequest::new().set_project_id("test-project");
        let options = set_default_idempotency(RequestOptions::default(), true);
        let response = transport.run_query(request, options).await?.into_body();
        assert_eq!(
            response.batch.more_results,
            model::MoreResultsType::NoMoreResults
        );
        Ok(())
    }

    #[tokio::test]
    async fn no_retry_non_idempotent() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/v1/projects/test-project:commit"))
                .times(1)
                .respond_with(transient()),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let request = model::CommitRequest::new().set_project_id("test-project");
        let err = transport
            .commit(request, RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status().map(|s| s.code), Some(Code::Unavailable), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn permanent_error() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/projects/test-project:runQuery",
            ))
                .times(1)
                .respond_with(status_code(400).body(
                    json!({"error": {
                        "code": 400,
                        "message": "inequality filter must be first sort order",
                        "status": "INVALID_ARGUMENT",
                    }})
                    .to_string(),
                )),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let request = model::RunQueryRequest::new().set_project_id("test-project");
        let options = set_default_idempotency(RequestOptions::default(), true);
        let err = transport.run_query(request, options).await.unwrap_err();
        assert_eq!(err.http_status_code(), Some(400), "{err:?}");
        assert_eq!(
            err.status().map(|s| s.code),
            Some(Code::InvalidArgument),
            "{err:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn http_error_without_status() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "POST",
                "/v1/projects/test-project:rollback",
            ))
                .respond_with(status_code(404).body("not here")),
        );

        let transport = Datastore::new(test_config(format!("http://{}", server.addr()))?);
        let request = model::RollbackRequest::new().set_project_id("test-project");
        let err = transport
            .rollback(request, RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(404), "{err:?}");
        assert!(err.status().is_none(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn missing_project() -> TestResult {
        let transport = Datastore::new(test_config("http://127.0.0.1:1".to_string())?);
        let err = transport
            .lookup(model::LookupRequest::new(), RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        Ok(())
    }

    #[test]
    fn url() -> TestResult {
        let endpoint = "https://nam5-datastore.googleapis.com/".to_string();
        let transport = Datastore::new(test_config(endpoint)?);
        assert_eq!(
            transport.url("p", "commit"),
            "https://nam5-datastore.googleapis.com/v1/projects/p:commit"
        );
        Ok(())
    }
}
