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

//! The messages and enums that are part of this client library.
//!
//! The types follow the [Datastore v1 REST] representation. Fields use the
//! snake case version of the JSON names.
//!
//! [Datastore v1 REST]: https://cloud.google.com/datastore/docs/reference/data/rest

mod entity;
mod key;
mod messages;
mod query;
mod value;

pub use entity::Entity;
pub use key::{Key, PartitionId, PathElement};
pub use messages::*;
pub use query::{
    CompositeFilter, CompositeOperator, Direction, Filter, KEY_PROPERTY, KindExpression, Operator,
    Projection, PropertyFilter, PropertyOrder, PropertyReference, Query,
};
pub use value::{LatLng, Value};
