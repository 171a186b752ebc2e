use super::{METRIC_SEPARATOR, flatten_object, select_all_by_field, select_by_field};
use crate::Result;
use crate::error::MonitorError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const LOG_TARGET: &str = "   extract";

const HOST_KEY: &str = "host";
const INSTANCE_KEY: &str = "instance";
const ALL_ID: &str = "all";

/// Extract the seven fixed metric groups from a parsed status document.
///
/// | group | source path | strategy |
/// |---|---|---|
/// | `host\|cpus` | `amps.host.cpus[]` | by `id == "all"` |
/// | `host\|memory` | `amps.host.memory` | flatten |
/// | `host\|network` | `amps.host.network[]` | all, prefixed by `id` |
/// | `instance\|cpu` | `amps.instance.cpu` | flatten |
/// | `instance\|caches` | `amps.instance.memory.caches.caches[]` | all, prefixed by `description` |
/// | `instance\|queries` | `amps.instance.queries` | flatten |
/// | `instance\|processors` | `amps.instance.processors[]` | by `id == "all"` |
///
/// A group whose subtree is absent is skipped with a debug log; the rest of
/// the document still yields metrics. A subtree that is present with the
/// wrong JSON type fails the whole extraction.
///
/// # Errors
///
/// Returns [`MonitorError::Extract`] if the document is not an object, the
/// `amps` root key is missing or not an object, or an expected subtree has
/// the wrong type.
pub fn assemble(document: &Value) -> Result<BTreeMap<String, f64>> {
    let top = document
        .as_object()
        .ok_or_else(|| MonitorError::Extract("top-level value is not an object".to_string()))?;

    let amps = match top.get("amps") {
        Some(Value::Object(amps)) => amps,
        Some(_) => return Err(MonitorError::Extract("'amps' is not an object".to_string())),
        None => return Err(MonitorError::Extract("'amps' root key is missing".to_string())),
    };

    let mut metrics = BTreeMap::new();

    if let Some(host) = object_child(amps, "amps", HOST_KEY)? {
        if let Some(cpus) = array_child(host, "amps.host", "cpus")? {
            merge_group(&mut metrics, &category(HOST_KEY, "cpus"), select_by_field(cpus, "id", ALL_ID)?);
        }

        if let Some(memory) = object_child(host, "amps.host", "memory")? {
            merge_group(&mut metrics, &category(HOST_KEY, "memory"), flatten_object(memory, ""));
        }

        if let Some(network) = array_child(host, "amps.host", "network")? {
            merge_group(&mut metrics, &category(HOST_KEY, "network"), select_all_by_field(network, "id")?);
        }
    }

    if let Some(instance) = object_child(amps, "amps", INSTANCE_KEY)? {
        if let Some(cpu) = object_child(instance, "amps.instance", "cpu")? {
            merge_group(&mut metrics, &category(INSTANCE_KEY, "cpu"), flatten_object(cpu, ""));
        }

        if let Some(caches) = cache_array(instance)? {
            merge_group(
                &mut metrics,
                &category(INSTANCE_KEY, "caches"),
                select_all_by_field(caches, "description")?,
            );
        }

        if let Some(queries) = object_child(instance, "amps.instance", "queries")? {
            merge_group(&mut metrics, &category(INSTANCE_KEY, "queries"), flatten_object(queries, ""));
        }

        if let Some(processors) = array_child(instance, "amps.instance", "processors")? {
            merge_group(
                &mut metrics,
                &category(INSTANCE_KEY, "processors"),
                select_by_field(processors, "id", ALL_ID)?,
            );
        }
    }

    Ok(metrics)
}

/// The cache list sits two objects deep at `amps.instance.memory.caches.caches`.
fn cache_array(instance: &Map<String, Value>) -> Result<Option<&Vec<Value>>> {
    let Some(memory) = object_child(instance, "amps.instance", "memory")? else {
        return Ok(None);
    };

    let Some(caches) = object_child(memory, "amps.instance.memory", "caches")? else {
        return Ok(None);
    };

    array_child(caches, "amps.instance.memory.caches", "caches")
}

fn object_child<'a>(parent: &'a Map<String, Value>, parent_path: &str, key: &str) -> Result<Option<&'a Map<String, Value>>> {
    match parent.get(key) {
        None => {
            log::debug!(target: LOG_TARGET, "'{parent_path}.{key}' is absent, skipping");
            Ok(None)
        }
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(MonitorError::Extract(format!("'{parent_path}.{key}' is not an object"))),
    }
}

fn array_child<'a>(parent: &'a Map<String, Value>, parent_path: &str, key: &str) -> Result<Option<&'a Vec<Value>>> {
    match parent.get(key) {
        None => {
            log::debug!(target: LOG_TARGET, "'{parent_path}.{key}' is absent, skipping");
            Ok(None)
        }
        Some(Value::Array(array)) => Ok(Some(array)),
        Some(_) => Err(MonitorError::Extract(format!("'{parent_path}.{key}' is not an array"))),
    }
}

fn category(top: &str, sub: &str) -> String {
    format!("{top}{METRIC_SEPARATOR}{sub}")
}

fn merge_group(metrics: &mut BTreeMap<String, f64>, category: &str, group: BTreeMap<String, f64>) {
    for (name, value) in group {
        let _ = metrics.insert(format!("{category}{METRIC_SEPARATOR}{name}"), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "amps": {
                "host": {
                    "cpus": [
                        {"id": "all", "system_percent": 3.5, "user_percent": 12.25, "iowait_percent": "0.5"},
                        {"id": "cpu0", "system_percent": 7.0}
                    ],
                    "memory": {"in_use": 7340032, "cached": "1048576", "swapping": false},
                    "network": [
                        {"id": "eth0", "bytes_in": 100, "bytes_out": 50},
                        {"id": "lo", "bytes_in": 9}
                    ]
                },
                "instance": {
                    "cpu": {"system_percent": 1.25, "user_percent": 2.5},
                    "memory": {
                        "vmsize": 123456,
                        "caches": {
                            "caches": [
                                {"description": "sow_cache", "hits": 10, "misses": 2},
                                {"description": "topic_cache", "hits": 33}
                            ]
                        }
                    },
                    "queries": {"queued_queries": 0, "executed_queries": 512},
                    "processors": [
                        {"id": "all", "denied_reads": 0, "denied_writes": "1"}
                    ]
                }
            }
        })
    }

    #[test]
    fn all_seven_groups_extracted() {
        let metrics = assemble(&sample_document()).unwrap();

        assert_eq!(metrics["host|cpus|system_percent"], 3.5);
        assert_eq!(metrics["host|cpus|user_percent"], 12.25);
        assert_eq!(metrics["host|cpus|iowait_percent"], 0.5);
        assert_eq!(metrics["host|memory|in_use"], 7_340_032.0);
        assert_eq!(metrics["host|memory|cached"], 1_048_576.0);
        assert_eq!(metrics["host|network|eth0|bytes_in"], 100.0);
        assert_eq!(metrics["host|network|eth0|bytes_out"], 50.0);
        assert_eq!(metrics["host|network|lo|bytes_in"], 9.0);
        assert_eq!(metrics["instance|cpu|system_percent"], 1.25);
        assert_eq!(metrics["instance|caches|sow_cache|hits"], 10.0);
        assert_eq!(metrics["instance|caches|sow_cache|misses"], 2.0);
        assert_eq!(metrics["instance|caches|topic_cache|hits"], 33.0);
        assert_eq!(metrics["instance|queries|executed_queries"], 512.0);
        assert_eq!(metrics["instance|processors|denied_reads"], 0.0);
        assert_eq!(metrics["instance|processors|denied_writes"], 1.0);

        // cpu0 never contributes: only the "all" element is selected
        assert!(!metrics.keys().any(|name| name.contains("cpu0")));

        // the boolean and the nested caches object are not metric leaves
        assert!(!metrics.contains_key("host|memory|swapping"));
        assert!(!metrics.contains_key("instance|memory|vmsize"));
    }

    #[test]
    fn missing_amps_root_is_total_failure() {
        let result = assemble(&json!({"something": "else"}));
        assert!(matches!(result, Err(MonitorError::Extract(_))));
    }

    #[test]
    fn non_object_document_is_total_failure() {
        assert!(matches!(assemble(&json!([1, 2, 3])), Err(MonitorError::Extract(_))));
        assert!(matches!(assemble(&json!("amps")), Err(MonitorError::Extract(_))));
    }

    #[test]
    fn non_object_amps_root_is_total_failure() {
        let result = assemble(&json!({"amps": 17}));
        assert!(matches!(result, Err(MonitorError::Extract(_))));
    }

    #[test]
    fn absent_subtree_skips_only_that_group() {
        let document = json!({
            "amps": {
                "host": {
                    "memory": {"in_use": 1}
                }
            }
        });

        let metrics = assemble(&document).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics["host|memory|in_use"], 1.0);
    }

    #[test]
    fn absent_cache_chain_skips_cache_group() {
        let document = json!({
            "amps": {
                "instance": {
                    "memory": {"vmsize": 5},
                    "queries": {"executed_queries": 2}
                }
            }
        });

        let metrics = assemble(&document).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics["instance|queries|executed_queries"], 2.0);
    }

    #[test]
    fn wrong_typed_subtree_is_error() {
        let document = json!({
            "amps": {
                "host": {
                    "cpus": {"id": "all"}
                }
            }
        });

        assert!(matches!(assemble(&document), Err(MonitorError::Extract(_))));
    }

    #[test]
    fn empty_amps_root_yields_zero_metrics() {
        let metrics = assemble(&json!({"amps": {}})).unwrap();
        assert!(metrics.is_empty());
    }
}
