//! Strict-mode rewriting: close every object schema that leaves
//! `additionalProperties` unspecified.
//!
//! Condition sub-schemas (`if`, `not`) are left open; closing them would
//! change which branch applies rather than tighten the document shape.

use serde_json::{Map, Value};

/// Keywords whose value is a map of name -> sub-schema.
const SCHEMA_MAPS: [&str; 5] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords whose value is a single sub-schema.
const SCHEMA_SINGLES: [&str; 9] = [
    "propertyNames",
    "additionalProperties",
    "unevaluatedProperties",
    "items",
    "contains",
    "additionalItems",
    "unevaluatedItems",
    "then",
    "else",
];

/// Keywords whose value is an array of sub-schemas.
const SCHEMA_LISTS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Keywords that declare which properties an untyped schema allows.
const SHAPE_KEYWORDS: [&str; 2] = ["properties", "patternProperties"];

pub(crate) fn close_object_schemas(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            if describes_object(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for (key, child) in map.iter_mut() {
                let key = key.as_str();
                if SCHEMA_MAPS.contains(&key) {
                    if let Value::Object(named) = child {
                        named.values_mut().for_each(close_object_schemas);
                    }
                } else if SCHEMA_SINGLES.contains(&key) || SCHEMA_LISTS.contains(&key) {
                    close_object_schemas(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_object_schemas),
        _ => {}
    }
}

fn describes_object(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "object"),
        _ => SHAPE_KEYWORDS.iter().any(|keyword| map.contains_key(*keyword)),
    }
}
