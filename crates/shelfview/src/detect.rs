//! Locate the item array inside an API response of unknown shape.
//!
//! The API wraps its list in an envelope whose layout is not fixed. The
//! search accepts a bare array, an array under any top-level key, or an
//! array one object deeper, and picks the first match in document order.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Where in the response the item array was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemsLocation {
    /// The response itself is the array.
    Root,
    /// `response[field]`.
    Field { field: String },
    /// `response[parent][field]`.
    Nested { parent: String, field: String },
}

impl fmt::Display for ItemsLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemsLocation::Root => f.write_str("$"),
            ItemsLocation::Field { field } => write!(f, "$.{field}"),
            ItemsLocation::Nested { parent, field } => write!(f, "$.{parent}.{field}"),
        }
    }
}

/// The item array together with the path it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedItems<'a> {
    pub location: ItemsLocation,
    pub items: &'a [Value],
}

/// The response decoded, but holds no array within two levels.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("no item array within two levels of a {0} response")]
    NoArray(&'static str),
}

/// Find the first item array, searching the root, then top-level fields,
/// then the fields of top-level objects.
pub fn locate_items(response: &Value) -> Result<LocatedItems<'_>, ShapeError> {
    let map = match response {
        Value::Array(items) => {
            return Ok(LocatedItems {
                location: ItemsLocation::Root,
                items,
            })
        }
        Value::Object(map) => map,
        other => return Err(ShapeError::NoArray(kind(other))),
    };

    for (key, value) in map {
        if let Value::Array(items) = value {
            return Ok(LocatedItems {
                location: ItemsLocation::Field { field: key.clone() },
                items,
            });
        }
    }

    for (parent, value) in map {
        let Value::Object(inner) = value else {
            continue;
        };
        for (key, value) in inner {
            if let Value::Array(items) = value {
                return Ok(LocatedItems {
                    location: ItemsLocation::Nested {
                        parent: parent.clone(),
                        field: key.clone(),
                    },
                    items,
                });
            }
        }
    }

    Err(ShapeError::NoArray("object"))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let response = json!([{"title": "A"}, {"title": "B"}]);
        let found = locate_items(&response).unwrap();
        assert_eq!(found.location, ItemsLocation::Root);
        assert_eq!(found.items.len(), 2);
    }

    #[test]
    fn test_empty_bare_array() {
        let response = json!([]);
        let found = locate_items(&response).unwrap();
        assert!(found.items.is_empty());
    }

    #[test]
    fn test_top_level_field() {
        let response = json!({"total": 1, "result": [{"title": "Book A"}]});
        let found = locate_items(&response).unwrap();
        assert_eq!(found.location.to_string(), "$.result");
        assert_eq!(found.items[0]["title"], "Book A");
    }

    #[test]
    fn test_nested_field() {
        let response = json!({"data": {"count": 2, "items": [{"id": 1}, {"id": 2}]}});
        let found = locate_items(&response).unwrap();
        assert_eq!(
            found.location,
            ItemsLocation::Nested {
                parent: "data".into(),
                field: "items".into()
            }
        );
        assert_eq!(found.items.len(), 2);
    }

    #[test]
    fn test_top_level_beats_nested() {
        let response = json!({"meta": {"tags": ["x"]}, "items": [{"id": 1}]});
        let found = locate_items(&response).unwrap();
        assert_eq!(found.location.to_string(), "$.items");
    }

    #[test]
    fn test_first_array_in_document_order_wins() {
        let response = json!({"z_first": [1], "a_second": [2, 3]});
        let found = locate_items(&response).unwrap();
        assert_eq!(found.location.to_string(), "$.z_first");
    }

    #[test]
    fn test_not_found() {
        assert_eq!(
            locate_items(&json!({"foo": 1})),
            Err(ShapeError::NoArray("object"))
        );
        assert_eq!(
            locate_items(&json!("text")),
            Err(ShapeError::NoArray("string"))
        );
        assert!(locate_items(&Value::Null).is_err());
    }

    #[test]
    fn test_three_levels_deep_is_out_of_reach() {
        let response = json!({"a": {"b": {"c": [1]}}});
        assert!(locate_items(&response).is_err());
    }
}
