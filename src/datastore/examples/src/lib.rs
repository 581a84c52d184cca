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

//! Code snippets for Cloud Datastore.
//!
//! Each snippet receives a [Datastore] client and returns whatever it created
//! or read, so the integration tests can verify the results and remove any
//! entities left behind.

pub mod cleanup;
pub mod endpoints;
pub mod entities;
pub mod keys;
pub mod metadata;
pub mod queries;
pub mod transactions;
pub mod writes;

pub use cleanup::CleanupClient;
pub use google_cloud_datastore::client::Datastore;

use google_cloud_wkt as wkt;

/// The current time as a Datastore timestamp.
pub(crate) fn now() -> wkt::Timestamp {
    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    wkt::Timestamp::clamp(elapsed.as_secs() as i64, elapsed.subsec_nanos() as i32)
}

/// A timestamp at midnight UTC on January 1st of `year`.
pub(crate) fn start_of_year(year: i32) -> anyhow::Result<wkt::Timestamp> {
    let ts = wkt::Timestamp::try_from(format!("{year:04}-01-01T00:00:00Z").as_str())?;
    Ok(ts)
}
