//! Typed tool arguments.
//!
//! Every field is optional and never rejects a call: a missing or wrong-typed
//! string becomes `""`, and a missing or non-array `extra_args` becomes `[]`.

use rmcp::schemars;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct MustGatherArgs {
    #[serde(deserialize_with = "lenient_string")]
    #[schemars(with = "String", description = "Directory to write gathered data")]
    pub dest_dir: String,
    #[serde(deserialize_with = "lenient_string_list")]
    #[schemars(
        with = "Vec<String>",
        description = "Additional arguments passed directly to oc adm must-gather"
    )]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ClusterQueueArgs {
    #[serde(deserialize_with = "lenient_string")]
    #[schemars(with = "String", description = "Name of the ClusterQueue")]
    pub cluster_queue_name: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// Non-string items are kept as their JSON text so `[1, true]` becomes `["1", "true"]`.
// This differs from Go-style `fmt.Sprint` rendering for null and object items:
// `null` becomes "null" (not "<nil>") and `{"a":1}` stays JSON (not "map[a:1]").
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    })
}
