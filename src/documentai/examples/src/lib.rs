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

//! Code snippets for the Document AI processor version lifecycle.

pub mod delete_processor;
pub mod deploy_processor_version;
pub mod list_processor_versions;
pub mod train_processor_version;
pub mod undeploy_processor_version;

use google_cloud_documentai_v1::client::DocumentProcessorService;
use google_cloud_gax::error::Error;
use google_cloud_gax::error::rpc::{Code, Status};
use google_cloud_longrunning::model::{Operation, operation};
use std::time::Duration;

const POLLING_PERIOD: Duration = Duration::from_secs(1);

/// Creates a client for the regional Document AI endpoint in `location`.
pub async fn client(location: &str) -> anyhow::Result<DocumentProcessorService> {
    let client = DocumentProcessorService::builder()
        .with_endpoint(format!("https://{location}-documentai.googleapis.com"))
        .build()
        .await?;
    Ok(client)
}

/// Polls `operation` until it completes.
///
/// Returns the completed operation, or the operation error as a service
/// error.
pub async fn wait_for_operation(
    client: &DocumentProcessorService,
    mut operation: Operation,
) -> google_cloud_gax::Result<Operation> {
    loop {
        if operation.done {
            if let Some(operation::Result::Error(status)) = &operation.result {
                let status: &google_cloud_rpc::model::Status = status;
                return Err(Error::service(Status::from(status)));
            }
            return Ok(operation);
        }
        tracing::info!("waiting for {}", operation.name);
        tokio::time::sleep(POLLING_PERIOD).await;
        operation = client
            .get_operation()
            .set_name(&operation.name)
            .send()
            .await?;
    }
}

/// Returns true if `e` is a service error with one of the given codes.
pub(crate) fn has_code(e: &Error, codes: &[Code]) -> bool {
    e.status().is_some_and(|s| codes.contains(&s.code))
}

pub(crate) fn processor_name(project_id: &str, location: &str, processor_id: &str) -> String {
    format!("projects/{project_id}/locations/{location}/processors/{processor_id}")
}

pub(crate) fn processor_version_name(
    project_id: &str,
    location: &str,
    processor_id: &str,
    processor_version_id: &str,
) -> String {
    format!(
        "{}/processorVersions/{processor_version_id}",
        processor_name(project_id, location, processor_id)
    )
}
