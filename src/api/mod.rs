/*
* Resource routers for the two managed tables, plus the shared error shape.
*/

pub mod error;
pub mod fasum;
pub mod users;

use serde_json::{Map, Value};

/// Projects a request body onto an entity's field set: unknown fields
/// are dropped, absent fields are forwarded as null for the store to
/// judge. No validation happens here.
pub(crate) fn pick_fields(body: &Value, fields: &[&str]) -> Value {
    let picked: Map<String, Value> = fields
        .iter()
        .map(|field| {
            let value: Value = body.get(*field).cloned().unwrap_or(Value::Null);
            ((*field).to_string(), value)
        })
        .collect();

    Value::Object(picked)
}
