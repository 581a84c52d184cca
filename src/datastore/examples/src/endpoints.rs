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

use google_cloud_datastore::client::Datastore;

pub async fn regional_endpoint(project_id: &str) -> anyhow::Result<Datastore> {
    // [START datastore_regional_endpoints]
    let client = Datastore::builder(project_id)
        .with_endpoint("https://nam5-datastore.googleapis.com")
        .build()
        .await?;
    // [END datastore_regional_endpoints]
    Ok(client)
}
