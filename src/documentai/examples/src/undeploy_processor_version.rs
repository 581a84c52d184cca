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

// [START documentai_undeploy_processor_version]
use google_cloud_documentai_v1::client::DocumentProcessorService;
use google_cloud_gax::error::rpc::Code;

pub async fn sample(
    client: &DocumentProcessorService,
    project_id: &str,
    location: &str,
    processor_id: &str,
    processor_version_id: &str,
) -> anyhow::Result<()> {
    let name =
        crate::processor_version_name(project_id, location, processor_id, processor_version_id);
    let result = async {
        let operation = client
            .undeploy_processor_version()
            .set_name(name)
            .send()
            .await?;
        println!("{}", operation.name);
        crate::wait_for_operation(client, operation).await
    }
    .await;
    match result {
        Ok(_) => Ok(()),
        // Undeploying fails if the version is already undeployed, or if it is
        // a pretrained version.
        Err(e) if crate::has_code(&e, &[Code::FailedPrecondition, Code::InvalidArgument]) => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
// [END documentai_undeploy_processor_version]
