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

use google_cloud_datastore::Result;
use google_cloud_datastore::client::Datastore;
use google_cloud_datastore::model::{
    Entity, Filter, Key, Operator, PathElement, PropertyOrder, Query,
};
use google_cloud_gax::error::rpc::Code;

/// Prints the error if the service rejects the query.
///
/// Some query shapes are only rejected by older backends, an accepted query is
/// not an error.
fn print_rejection(result: Result<Vec<Entity>>) -> anyhow::Result<()> {
    match result {
        Ok(tasks) => {
            println!("the query was accepted, returned {} tasks", tasks.len());
            Ok(())
        }
        Err(e) => match e.status().map(|s| s.code) {
            Some(Code::InvalidArgument) | Some(Code::FailedPrecondition) => {
                println!("the query was rejected: {e}");
                Ok(())
            }
            _ => Err(e.into()),
        },
    }
}

pub async fn unindexed_property_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_unindexed_property_query]
    let query = Query::new("Task").add_filter(Filter::property(
        "description",
        Operator::Equal,
        "Learn Cloud Datastore",
    ));
    // [END datastore_unindexed_property_query]
    Ok(client.fetch(query).await?)
}

pub async fn basic_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_basic_query]
    let query = Query::new("Task")
        .add_filter(Filter::property("done", Operator::Equal, false))
        .add_filter(Filter::property("priority", Operator::GreaterThanOrEqual, 4))
        .add_order(PropertyOrder::desc("priority"));
    // [END datastore_basic_query]
    Ok(client.fetch(query).await?)
}

pub async fn projection_query(client: &Datastore) -> anyhow::Result<(Vec<i64>, Vec<f64>)> {
    let mut transaction = client.transaction().await?;
    transaction.put(
        Entity::new(client.key([PathElement::incomplete("Task")]))
            .set("priority", 4)
            .set("percent_complete", 50.0),
    );
    transaction.commit().await?;

    // [START datastore_projection_query]
    let query = Query::new("Task").set_projection(["priority", "percent_complete"]);
    // [END datastore_projection_query]

    // [START datastore_run_query_projection]
    let tasks = client.fetch(query).await?;
    let priorities = tasks
        .iter()
        .filter_map(|t| t.get("priority").and_then(|v| v.as_integer()))
        .collect();
    let percents = tasks
        .iter()
        .filter_map(|t| t.get("percent_complete").and_then(|v| v.as_double()))
        .collect();
    // [END datastore_run_query_projection]
    Ok((priorities, percents))
}

pub async fn ancestor_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    client
        .put(
            Entity::new(client.key([
                PathElement::named("TaskList", "default"),
                PathElement::incomplete("Task"),
            ]))
            .set("description", "Buy milk"),
        )
        .await?;

    // [START datastore_ancestor_query]
    let ancestor = client.key([PathElement::named("TaskList", "default")]);
    let query = Query::new("Task").set_ancestor(ancestor);
    // [END datastore_ancestor_query]
    Ok(client.fetch(query).await?)
}

pub async fn run_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_run_query]
    let query = Query::kindless();
    let results = client.fetch(query).await?;
    // [END datastore_run_query]
    Ok(results)
}

pub async fn limit(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_limit]
    let query = Query::new("Task").set_limit(5);
    let tasks = client.fetch(query).await?;
    // [END datastore_limit]
    Ok(tasks)
}

/// The results of [cursor_paging]: two pages and the cursors after each one.
pub type Pages = (
    Vec<Entity>,
    Option<bytes::Bytes>,
    Vec<Entity>,
    Option<bytes::Bytes>,
);

pub async fn cursor_paging(client: &Datastore) -> anyhow::Result<Pages> {
    // [START datastore_cursor_paging]
    async fn one_page_of_tasks(
        client: &Datastore,
        cursor: Option<bytes::Bytes>,
    ) -> anyhow::Result<(Vec<Entity>, Option<bytes::Bytes>)> {
        let query = Query::new("Task")
            .set_limit(5)
            .set_or_clear_start_cursor(cursor);
        let page = client.fetch_page(query).await?;
        Ok((page.entities, page.cursor))
    }
    // [END datastore_cursor_paging]

    let (page_one, cursor_one) = one_page_of_tasks(client, None).await?;
    let (page_two, cursor_two) = one_page_of_tasks(client, cursor_one.clone()).await?;
    Ok((page_one, cursor_one, page_two, cursor_two))
}

pub async fn property_filter(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_property_filter]
    let query = Query::new("Task").add_filter(Filter::property("done", Operator::Equal, false));
    // [END datastore_property_filter]
    Ok(client.fetch(query).await?)
}

pub async fn composite_filter(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_composite_filter]
    let query = Query::new("Task")
        .add_filter(Filter::property("done", Operator::Equal, false))
        .add_filter(Filter::property("priority", Operator::Equal, 4));
    // [END datastore_composite_filter]
    Ok(client.fetch(query).await?)
}

pub async fn key_filter(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_key_filter]
    let first_key = client.key([PathElement::named("Task", "first_task")]);
    let query = Query::new("Task").add_filter(Filter::key(Operator::GreaterThan, first_key));
    // [END datastore_key_filter]
    Ok(client.fetch(query).await?)
}

pub async fn ascending_sort(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_ascending_sort]
    let query = Query::new("Task").add_order(PropertyOrder::asc("created"));
    // [END datastore_ascending_sort]
    Ok(client.fetch(query).await?)
}

pub async fn descending_sort(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_descending_sort]
    let query = Query::new("Task").add_order(PropertyOrder::desc("created"));
    // [END datastore_descending_sort]
    Ok(client.fetch(query).await?)
}

pub async fn multi_sort(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_multi_sort]
    let query = Query::new("Task")
        .add_order(PropertyOrder::desc("priority"))
        .add_order(PropertyOrder::asc("created"));
    // [END datastore_multi_sort]
    Ok(client.fetch(query).await?)
}

pub async fn keys_only_query(client: &Datastore) -> anyhow::Result<Vec<Key>> {
    crate::writes::upsert(client).await?;

    // [START datastore_keys_only_query]
    let query = Query::new("Task").keys_only().set_limit(10);
    let keys = client
        .fetch(query)
        .await?
        .into_iter()
        .filter_map(|entity| entity.key)
        .collect();
    // [END datastore_keys_only_query]
    Ok(keys)
}

pub async fn distinct_on_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_distinct_on_query]
    let query = Query::new("Task")
        .set_distinct_on(["category"])
        .add_order(PropertyOrder::asc("category"))
        .add_order(PropertyOrder::asc("priority"));
    // [END datastore_distinct_on_query]
    Ok(client.fetch(query).await?)
}

pub async fn kindless_query(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    crate::writes::upsert(client).await?;

    // [START datastore_kindless_query]
    let last_seen_key = client.key([PathElement::named("Task", "a")]);
    let query = Query::kindless().add_filter(Filter::key(Operator::GreaterThan, last_seen_key));
    // [END datastore_kindless_query]
    Ok(client.fetch(query).await?)
}

pub async fn inequality_range(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    let start_date = crate::start_of_year(1990)?;
    let end_date = crate::start_of_year(2000)?;

    // [START datastore_inequality_range]
    let query = Query::new("Task")
        .add_filter(Filter::property("created", Operator::GreaterThan, start_date))
        .add_filter(Filter::property("created", Operator::LessThan, end_date));
    // [END datastore_inequality_range]
    Ok(client.fetch(query).await?)
}

pub async fn inequality_invalid(client: &Datastore) -> anyhow::Result<()> {
    let start_date = crate::start_of_year(1990)?;

    // [START datastore_inequality_invalid]
    let query = Query::new("Task")
        .add_filter(Filter::property("created", Operator::GreaterThan, start_date))
        .add_filter(Filter::property("priority", Operator::GreaterThan, 3));
    // [END datastore_inequality_invalid]
    print_rejection(client.fetch(query).await)
}

pub async fn equal_and_inequality_range(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    let start_date = crate::start_of_year(1990)?;
    let end_date = crate::start_of_year(2000)?;

    // [START datastore_equal_and_inequality_range]
    let query = Query::new("Task")
        .add_filter(Filter::property("priority", Operator::Equal, 4))
        .add_filter(Filter::property("done", Operator::Equal, false))
        .add_filter(Filter::property("created", Operator::GreaterThan, start_date))
        .add_filter(Filter::property("created", Operator::LessThan, end_date));
    // [END datastore_equal_and_inequality_range]
    Ok(client.fetch(query).await?)
}

pub async fn inequality_sort(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_inequality_sort]
    let query = Query::new("Task")
        .add_filter(Filter::property("priority", Operator::GreaterThan, 3))
        .add_order(PropertyOrder::asc("priority"))
        .add_order(PropertyOrder::asc("created"));
    // [END datastore_inequality_sort]
    Ok(client.fetch(query).await?)
}

pub async fn inequality_sort_invalid_not_same(client: &Datastore) -> anyhow::Result<()> {
    // [START datastore_inequality_sort_invalid_not_same]
    let query = Query::new("Task")
        .add_filter(Filter::property("priority", Operator::GreaterThan, 3))
        .add_order(PropertyOrder::asc("created"));
    // [END datastore_inequality_sort_invalid_not_same]
    print_rejection(client.fetch(query).await)
}

pub async fn inequality_sort_invalid_not_first(client: &Datastore) -> anyhow::Result<()> {
    // [START datastore_inequality_sort_invalid_not_first]
    let query = Query::new("Task")
        .add_filter(Filter::property("priority", Operator::GreaterThan, 3))
        .add_order(PropertyOrder::asc("created"))
        .add_order(PropertyOrder::asc("priority"));
    // [END datastore_inequality_sort_invalid_not_first]
    print_rejection(client.fetch(query).await)
}

pub async fn array_value_inequality_range(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_array_value_inequality_range]
    let query = Query::new("Task")
        .add_filter(Filter::property("tag", Operator::GreaterThan, "learn"))
        .add_filter(Filter::property("tag", Operator::LessThan, "math"));
    // [END datastore_array_value_inequality_range]
    Ok(client.fetch(query).await?)
}

pub async fn array_value_equality(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    // [START datastore_array_value_equality]
    let query = Query::new("Task")
        .add_filter(Filter::property("tag", Operator::Equal, "fun"))
        .add_filter(Filter::property("tag", Operator::Equal, "programming"));
    // [END datastore_array_value_equality]
    Ok(client.fetch(query).await?)
}

pub async fn index_merge_queries(client: &Datastore) -> anyhow::Result<Vec<Entity>> {
    let photo = Entity::new(client.key([PathElement::named("Photo", "100")]))
        .set("owner_id", "user1234")
        .set("size", 2)
        .set("tag", vec!["family", "outside", "camera"]);
    client.put(photo).await?;

    // [START datastore_exploding_properties_query]
    let queries = [
        Query::new("Photo").add_filter(Filter::property("owner_id", Operator::Equal, "user1234")),
        Query::new("Photo").add_filter(Filter::property("size", Operator::Equal, 2)),
        Query::new("Photo").add_filter(Filter::property("tag", Operator::Equal, "family")),
    ];
    for query in queries {
        let photos = client.fetch(query).await?;
        println!("found {} photos", photos.len());
    }
    // [END datastore_exploding_properties_query]

    // [START datastore_merged_qualifying_indexes_query]
    let query = Query::new("Photo")
        .add_filter(Filter::property("owner_id", Operator::Equal, "user1234"))
        .add_filter(Filter::property("size", Operator::Equal, 2))
        .add_filter(Filter::property("tag", Operator::Equal, "family"))
        .add_filter(Filter::property("tag", Operator::Equal, "outside"));
    let photos = client.fetch(query).await?;
    // [END datastore_merged_qualifying_indexes_query]
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_cloud_datastore::Error;
    use google_cloud_gax::error::rpc::Status;

    fn rejected(code: Code) -> Result<Vec<Entity>> {
        Err(Error::service(Status::default().set_code(code).set_message("rejected")))
    }

    #[test]
    fn print_rejection_swallows_invalid_queries() {
        assert!(print_rejection(rejected(Code::InvalidArgument)).is_ok());
        assert!(print_rejection(rejected(Code::FailedPrecondition)).is_ok());
        assert!(print_rejection(Ok(Vec::new())).is_ok());
    }

    #[test]
    fn print_rejection_propagates_other_errors() {
        assert!(print_rejection(rejected(Code::Unavailable)).is_err());
    }
}
