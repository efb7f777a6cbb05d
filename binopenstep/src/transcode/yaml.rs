//! YAML transcoding: convert OpenStep values to YAML text.
//!
//! Mapping:
//!   - Value::Literal    -> YAML string (quoting flag and comments dropped)
//!   - Value::Array      -> YAML sequence
//!   - Value::Dictionary -> YAML mapping (source order kept)
//!
//! Every literal becomes a string, so `YES` or `46` stay strings and are
//! quoted by the emitter where YAML would otherwise read them as scalars of
//! another type.

use libopenstep::Value;

/// Encode a Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let yaml_value = value_to_yaml(value);
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Literal(lit) => serde_yaml::Value::String(lit.content.clone()),
        Value::Array(arr) => serde_yaml::Value::Sequence(arr.iter().map(value_to_yaml).collect()),
        Value::Dictionary(dict) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in dict.iter() {
                map.insert(serde_yaml::Value::String(k.to_string()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}
