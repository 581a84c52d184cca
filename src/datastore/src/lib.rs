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

//! Google Cloud Client Libraries for Rust - Cloud Datastore API
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases. Testing is also incomplete, we do
//! **not** recommend that you use this crate in production. We welcome feedback
//! about the APIs, documentation, missing features, bugs, etc.
//!
//! This crate contains traits, types, and functions to interact with
//! [Datastore]. Most applications will use the structs defined in the
//! [client] module. More specifically:
//!
//! * [Datastore](client::Datastore)
//!
//! The client speaks the Datastore v1 REST API. Keys, entities, and queries
//! are defined in the [model] module. Mutations may be grouped into a
//! [Batch](batch::Batch) or a [Transaction](batch::Transaction).
//!
//! [Datastore]: https://cloud.google.com/datastore

pub use gax::Result;
pub use gax::error::Error;

use google_cloud_gax as gax;

pub mod batch;
pub mod builder;
pub mod client;
pub mod error;
pub mod model;
pub mod stub;

mod tracing;
mod transport;

/// The default host used by the service.
const DEFAULT_HOST: &str = "https://datastore.googleapis.com";

/// The environment variable pointing the client at a local emulator.
pub(crate) const EMULATOR_HOST_VAR: &str = "DATASTORE_EMULATOR_HOST";
