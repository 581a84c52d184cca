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

use super::{Key, Value};
use serde_with::base64::Base64;
use serde_with::serde_as;

/// The name of the special property holding the entity key.
pub const KEY_PROPERTY: &str = "__key__";

/// A query for entities.
///
/// # Example
/// ```
/// # use google_cloud_datastore::model::{Filter, Operator, PropertyOrder, Query};
/// let query = Query::new("Task")
///     .add_filter(Filter::property("done", Operator::Equal, false))
///     .add_filter(Filter::property("priority", Operator::GreaterThanOrEqual, 4))
///     .add_order(PropertyOrder::desc("priority"));
/// ```
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Query {
    /// The projection to return. Defaults to returning all properties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projection: Vec<Projection>,

    /// The kinds to query (if empty, returns entities of all kinds).
    /// Currently at most 1 kind may be specified.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<KindExpression>,

    /// The filter to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    /// The order to apply to the query results (if empty, order is
    /// unspecified).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<PropertyOrder>,

    /// The properties to make distinct.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distinct_on: Vec<PropertyReference>,

    /// A starting point for the query results.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<bytes::Bytes>,

    /// An ending point for the query results.
    #[serde_as(as = "Option<Base64>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<bytes::Bytes>,

    /// The number of results to skip.
    #[serde(skip_serializing_if = "is_zero")]
    pub offset: i32,

    /// The maximum number of results to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

impl Query {
    /// Creates a query over entities of `kind`.
    pub fn new<T: Into<String>>(kind: T) -> Self {
        Self::default().set_kind(kind)
    }

    /// Creates a query over entities of all kinds.
    pub fn kindless() -> Self {
        Self::default()
    }

    /// Sets the kind to query.
    pub fn set_kind<T: Into<String>>(mut self, v: T) -> Self {
        self.kind = vec![KindExpression { name: v.into() }];
        self
    }

    /// Replaces the query filter.
    pub fn set_filter<T: Into<Filter>>(mut self, v: T) -> Self {
        self.filter = Some(v.into());
        self
    }

    /// Adds a filter, all the filters must match.
    ///
    /// Filters added with this method accumulate in a composite `AND`
    /// filter.
    pub fn add_filter<T: Into<Filter>>(mut self, v: T) -> Self {
        let v = v.into();
        self.filter = Some(match self.filter.take() {
            None => v,
            Some(Filter::CompositeFilter(mut composite))
                if composite.op == CompositeOperator::And =>
            {
                composite.filters.push(v);
                Filter::CompositeFilter(composite)
            }
            Some(existing) => Filter::and([existing, v]),
        });
        self
    }

    /// Limits the results to descendants of `key`.
    pub fn set_ancestor(self, key: Key) -> Self {
        self.add_filter(Filter::has_ancestor(key))
    }

    /// Adds a sort order, applied after any previous orders.
    pub fn add_order(mut self, v: PropertyOrder) -> Self {
        self.order.push(v);
        self
    }

    /// Returns only the given properties.
    pub fn set_projection<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.projection = v
            .into_iter()
            .map(|name| Projection {
                property: PropertyReference::new(name),
            })
            .collect();
        self
    }

    /// Returns only the entity keys.
    pub fn keys_only(self) -> Self {
        self.set_projection([KEY_PROPERTY])
    }

    /// Returns a single result for each combination of the given properties.
    pub fn set_distinct_on<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.distinct_on = v.into_iter().map(PropertyReference::new).collect();
        self
    }

    /// Sets the value of [start_cursor][Query::start_cursor].
    pub fn set_start_cursor<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.start_cursor = Some(v.into());
        self
    }

    /// Sets or clears the value of [start_cursor][Query::start_cursor].
    pub fn set_or_clear_start_cursor<T: Into<bytes::Bytes>>(mut self, v: Option<T>) -> Self {
        self.start_cursor = v.map(Into::into);
        self
    }

    /// Sets the value of [end_cursor][Query::end_cursor].
    pub fn set_end_cursor<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.end_cursor = Some(v.into());
        self
    }

    /// Sets the value of [offset][Query::offset].
    pub fn set_offset(mut self, v: i32) -> Self {
        self.offset = v;
        self
    }

    /// Sets the value of [limit][Query::limit].
    pub fn set_limit(mut self, v: i32) -> Self {
        self.limit = Some(v);
        self
    }

    /// Returns true if the query only returns keys.
    pub fn is_keys_only(&self) -> bool {
        self.projection.len() == 1 && self.projection[0].property.name == KEY_PROPERTY
    }
}

/// A representation of a kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct KindExpression {
    pub name: String,
}

/// A reference to a property relative to the kind expressions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct PropertyReference {
    /// The name of the property. Use dots for embedded properties, e.g.
    /// `address.city`.
    pub name: String,
}

impl PropertyReference {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self { name: name.into() }
    }
}

/// A representation of a property in a projection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Projection {
    pub property: PropertyReference,
}

/// The desired order for a specific property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct PropertyOrder {
    pub property: PropertyReference,
    pub direction: Direction,
}

impl PropertyOrder {
    /// Sort by `name` in ascending order.
    pub fn asc<T: Into<String>>(name: T) -> Self {
        Self {
            property: PropertyReference::new(name),
            direction: Direction::Ascending,
        }
    }

    /// Sort by `name` in descending order.
    pub fn desc<T: Into<String>>(name: T) -> Self {
        Self {
            property: PropertyReference::new(name),
            direction: Direction::Descending,
        }
    }
}

/// The sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// A holder for any type of filter.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Filter {
    CompositeFilter(CompositeFilter),
    PropertyFilter(PropertyFilter),
}

impl Filter {
    /// A filter on a single property.
    pub fn property<N, V>(name: N, op: Operator, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Self::PropertyFilter(PropertyFilter {
            property: PropertyReference::new(name),
            op,
            value: value.into(),
        })
    }

    /// A filter on the entity key.
    pub fn key(op: Operator, key: Key) -> Self {
        Self::property(KEY_PROPERTY, op, key)
    }

    /// Limits the results to descendants of `key`.
    pub fn has_ancestor(key: Key) -> Self {
        Self::key(Operator::HasAncestor, key)
    }

    /// All the filters must match.
    pub fn and<T: IntoIterator<Item = Filter>>(filters: T) -> Self {
        Self::composite(CompositeOperator::And, filters)
    }

    /// At least one of the filters must match.
    pub fn or<T: IntoIterator<Item = Filter>>(filters: T) -> Self {
        Self::composite(CompositeOperator::Or, filters)
    }

    fn composite<T: IntoIterator<Item = Filter>>(op: CompositeOperator, filters: T) -> Self {
        Self::CompositeFilter(CompositeFilter {
            op,
            filters: filters.into_iter().collect(),
        })
    }
}

/// A filter that merges multiple other filters using the given operator.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct CompositeFilter {
    pub op: CompositeOperator,
    pub filters: Vec<Filter>,
}

/// A composite filter operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum CompositeOperator {
    #[default]
    And,
    Or,
}

/// A filter on a specific property.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct PropertyFilter {
    pub property: PropertyReference,
    pub op: Operator,
    pub value: Value,
}

/// A property filter operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Operator {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    #[default]
    Equal,
    In,
    NotEqual,
    HasAncestor,
    NotIn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathElement;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn composite() -> anyhow::Result<()> {
        let query = Query::new("Task")
            .add_filter(Filter::property("done", Operator::Equal, false))
            .add_filter(Filter::property("priority", Operator::GreaterThanOrEqual, 4))
            .add_order(PropertyOrder::desc("priority"));
        let got = serde_json::to_value(&query)?;
        let want = json!({
            "kind": [{"name": "Task"}],
            "filter": {"compositeFilter": {"op": "AND", "filters": [
                {"propertyFilter": {"property": {"name": "done"}, "op": "EQUAL", "value": {"booleanValue": false}}},
                {"propertyFilter": {"property": {"name": "priority"}, "op": "GREATER_THAN_OR_EQUAL", "value": {"integerValue": "4"}}},
            ]}},
            "order": [{"property": {"name": "priority"}, "direction": "DESCENDING"}],
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn add_filter_wraps_or() {
        let or = Filter::or([
            Filter::property("a", Operator::Equal, 1),
            Filter::property("b", Operator::Equal, 2),
        ]);
        let query = Query::new("Task")
            .set_filter(or.clone())
            .add_filter(Filter::property("c", Operator::Equal, 3));
        let want = Filter::and([or, Filter::property("c", Operator::Equal, 3)]);
        assert_eq!(query.filter, Some(want));
    }

    #[test]
    fn ancestor() -> anyhow::Result<()> {
        let parent = Key::from_path([PathElement::named("TaskList", "default")]);
        let query = Query::new("Task").set_ancestor(parent);
        let got = serde_json::to_value(&query)?;
        assert_eq!(
            got["filter"],
            json!({"propertyFilter": {
                "property": {"name": "__key__"},
                "op": "HAS_ANCESTOR",
                "value": {"keyValue": {"path": [{"kind": "TaskList", "name": "default"}]}},
            }})
        );
        Ok(())
    }

    #[test]
    fn keys_only() -> anyhow::Result<()> {
        let query = Query::new("Task").keys_only();
        assert!(query.is_keys_only());
        let got = serde_json::to_value(&query)?;
        assert_eq!(got["projection"], json!([{"property": {"name": "__key__"}}]));
        Ok(())
    }

    #[test]
    fn paging() -> anyhow::Result<()> {
        let query = Query::kindless()
            .set_distinct_on(["category"])
            .set_start_cursor(bytes::Bytes::from_static(b"abc"))
            .set_offset(2)
            .set_limit(5);
        let got = serde_json::to_value(&query)?;
        let want = json!({
            "distinctOn": [{"name": "category"}],
            "startCursor": "YWJj",
            "offset": 2,
            "limit": 5,
        });
        assert_eq!(got, want);
        let roundtrip = serde_json::from_value::<Query>(got)?;
        assert_eq!(roundtrip, query);
        Ok(())
    }
}
