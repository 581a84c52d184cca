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

//! Queries over the Datastore metadata kinds.

use google_cloud_datastore::client::Datastore;
use google_cloud_datastore::model::{Entity, Filter, Operator, PathElement, Query};
use std::collections::BTreeMap;

pub async fn namespace_run_query(
    client: &Datastore,
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let google = client.with_namespace(Some("google"));
    google
        .put(Entity::new(google.key([PathElement::named("Task", "sample-task")])))
        .await?;

    // [START datastore_namespace_run_query]
    let query = Query::new("__namespace__").keys_only();
    let all_namespaces = client
        .fetch(query)
        .await?
        .into_iter()
        .filter_map(|e| e.key.and_then(|k| k.id_or_name()))
        .collect();

    let start_namespace = client.key([PathElement::named("__namespace__", "g")]);
    let end_namespace = client.key([PathElement::named("__namespace__", "h")]);
    let query = Query::new("__namespace__")
        .keys_only()
        .add_filter(Filter::key(Operator::GreaterThanOrEqual, start_namespace))
        .add_filter(Filter::key(Operator::LessThan, end_namespace));
    let filtered_namespaces = client
        .fetch(query)
        .await?
        .into_iter()
        .filter_map(|e| e.key.and_then(|k| k.id_or_name()))
        .collect();
    // [END datastore_namespace_run_query]
    Ok((all_namespaces, filtered_namespaces))
}

pub async fn kind_run_query(client: &Datastore) -> anyhow::Result<Vec<String>> {
    crate::writes::upsert(client).await?;

    // [START datastore_kind_run_query]
    let query = Query::new("__kind__").keys_only();
    let kinds = client
        .fetch(query)
        .await?
        .into_iter()
        .filter_map(|e| e.key.and_then(|k| k.id_or_name()))
        .collect();
    // [END datastore_kind_run_query]
    Ok(kinds)
}

pub async fn property_run_query(
    client: &Datastore,
) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    crate::writes::upsert(client).await?;

    // [START datastore_property_run_query]
    let query = Query::new("__property__").keys_only();
    let mut properties_by_kind = BTreeMap::<String, Vec<String>>::new();
    for entity in client.fetch(query).await? {
        let Some(key) = entity.key else {
            continue;
        };
        let kind = key.parent().and_then(|p| p.id_or_name());
        let (Some(kind), Some(property)) = (kind, key.id_or_name()) else {
            continue;
        };
        properties_by_kind.entry(kind).or_default().push(property);
    }
    // [END datastore_property_run_query]
    Ok(properties_by_kind)
}

pub async fn property_by_kind_run_query(
    client: &Datastore,
) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    crate::writes::upsert(client).await?;

    // [START datastore_property_by_kind_run_query]
    let ancestor = client.key([PathElement::named("__kind__", "Task")]);
    let query = Query::new("__property__").set_ancestor(ancestor);
    let mut representations_by_property = BTreeMap::new();
    for entity in client.fetch(query).await? {
        let Some(name) = entity.key.as_ref().and_then(|k| k.id_or_name()) else {
            continue;
        };
        let representations = entity
            .get("property_representation")
            .and_then(|v| v.as_array())
            .unwrap_or_default()
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect::<Vec<_>>();
        representations_by_property.insert(name, representations);
    }
    // [END datastore_property_by_kind_run_query]
    Ok(representations_by_property)
}
