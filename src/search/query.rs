//! Elasticsearch request bodies.

use serde_json::{json, Map, Value};

use crate::search::{NestedFilter, Page, SortSpec};

/// Body for a paginated listing.
pub fn list_body(page: Page, filter: Option<&NestedFilter>, sort: Option<&SortSpec>) -> Value {
    let mut body = paged(page);
    if let Some(filter) = filter {
        body.insert(
            "query".to_string(),
            json!({
                "nested": {
                    "path": filter.path,
                    "query": {
                        "bool": {
                            "must": [{ "match": { filter.field.as_str(): filter.value } }]
                        }
                    }
                }
            }),
        );
    }
    if let Some(sort) = sort {
        body.insert(
            "sort".to_string(),
            json!([{ sort.field.as_str(): sort.direction() }]),
        );
    }
    Value::Object(body)
}

/// Body for a fuzzy match on one field, or an unfiltered listing when the
/// query is blank.
pub fn search_body(page: Page, field: &str, query: Option<&str>) -> Value {
    let mut body = paged(page);
    if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
        body.insert(
            "query".to_string(),
            json!({ "match": { field: { "query": query, "fuzziness": "auto" } } }),
        );
    }
    Value::Object(body)
}

fn paged(page: Page) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("from".to_string(), json!(page.offset()));
    body.insert("size".to_string(), json!(page.size));
    body
}
