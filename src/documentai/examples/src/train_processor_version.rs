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

// [START documentai_train_processor_version]
use google_cloud_documentai_v1::client::DocumentProcessorService;
use google_cloud_documentai_v1::model::train_processor_version_request::InputData;
use google_cloud_documentai_v1::model::{
    BatchDocumentsInputConfig, GcsPrefix, ProcessorVersion, TrainProcessorVersionMetadata,
    TrainProcessorVersionResponse,
};
use google_cloud_gax::error::Error;
use google_cloud_longrunning::model::operation;

pub async fn sample(
    client: &DocumentProcessorService,
    project_id: &str,
    location: &str,
    processor_id: &str,
    display_name: &str,
    train_data_uri: Option<&str>,
    test_data_uri: Option<&str>,
) -> anyhow::Result<TrainProcessorVersionResponse> {
    // Without explicit data the training and test sets configured in the
    // console are used.
    let documents = |uri: &str| {
        BatchDocumentsInputConfig::new().set_gcs_prefix(GcsPrefix::new().set_gcs_uri_prefix(uri))
    };
    let mut input_data = InputData::new();
    if let Some(uri) = train_data_uri {
        input_data = input_data.set_training_documents(documents(uri));
    }
    if let Some(uri) = test_data_uri {
        input_data = input_data.set_test_documents(documents(uri));
    }

    let operation = client
        .train_processor_version()
        .set_parent(crate::processor_name(project_id, location, processor_id))
        .set_processor_version(ProcessorVersion::new().set_display_name(display_name))
        .set_input_data(input_data)
        .send()
        .await?;
    println!("{}", operation.name);

    let operation = crate::wait_for_operation(client, operation).await?;
    let response = match &operation.result {
        Some(operation::Result::Response(any)) => any
            .to_msg::<TrainProcessorVersionResponse>()
            .map_err(Error::deser)?,
        _ => anyhow::bail!("missing response in completed operation {}", operation.name),
    };
    let metadata = operation
        .metadata
        .as_ref()
        .map(|any| any.to_msg::<TrainProcessorVersionMetadata>())
        .transpose()
        .map_err(Error::deser)?
        .unwrap_or_default();

    println!("New Processor Version:{}", response.processor_version);
    println!(
        "Training Set Validation: {:?}",
        metadata.training_dataset_validation
    );
    println!("Test Set Validation: {:?}", metadata.test_dataset_validation);
    Ok(response)
}
// [END documentai_train_processor_version]
