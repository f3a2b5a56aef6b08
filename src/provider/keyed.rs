//! Sort key extraction

use crate::page::KeyValue;
use serde_json::Value;

/// Entities a provider can order and derive cursors for
pub trait Keyed {
    /// Value of `property` (a dotted path), or `None` if the entity lacks it
    fn key_value(&self, property: &str) -> Option<KeyValue>;
}

impl Keyed for Value {
    fn key_value(&self, property: &str) -> Option<KeyValue> {
        let mut current = self;
        for part in property.split('.') {
            match current {
                Value::Object(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        KeyValue::from_json(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_key_value() {
        let row = json!({"id": 3, "name": "c", "address": {"city": "Oslo"}});
        assert_eq!(row.key_value("id"), Some(KeyValue::Int(3)));
        assert_eq!(row.key_value("address.city"), Some(KeyValue::from("Oslo")));
        assert_eq!(row.key_value("missing"), None);
        assert_eq!(row.key_value("name.first"), None);
        assert_eq!(row.key_value("address"), None);
    }
}
