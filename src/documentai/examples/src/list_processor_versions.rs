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

// [START documentai_list_processor_versions]
use google_cloud_documentai_v1::client::DocumentProcessorService;
use google_cloud_documentai_v1::model::ProcessorVersion;
use google_cloud_gax::paginator::ItemPaginator as _;

pub async fn sample(
    client: &DocumentProcessorService,
    project_id: &str,
    location: &str,
    processor_id: &str,
) -> anyhow::Result<Vec<ProcessorVersion>> {
    let mut items = client
        .list_processor_versions()
        .set_parent(crate::processor_name(project_id, location, processor_id))
        .by_item();
    let mut versions = Vec::new();
    while let Some(version) = items.next().await.transpose()? {
        print_processor_version(&version);
        versions.push(version);
    }
    Ok(versions)
}

fn print_processor_version(version: &ProcessorVersion) {
    let id = version.name.rsplit('/').next().unwrap_or_default();
    println!("Processor Version: {id}");
    println!("Display Name: {}", version.display_name);
    println!("{}", version.state.name().unwrap_or("UNKNOWN"));
    println!();
}
// [END documentai_list_processor_versions]
