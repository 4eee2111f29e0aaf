//! Warnings for config keys `Config` does not know about

use serde_json::Value;
use tracing::warn;

/// Every key `Config` reads, as dotted paths
const KNOWN_KEYS: &[&str] = &[
    "window",
    "window.showFallbacksOnEmpty",
    "window.historySearch",
    "window.itemCount",
    "window.clearOnHide",
    "window.hideOnFocusLoss",
    "window.displayDelayMs",
    "window.buttonFadeMs",
    "window.modFallback",
    "window.modActions",
    "web",
    "web.engineBaseUrl",
];

/// Log a warning per unknown key. Invalid JSON is left to the parser.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    for path in unknown_keys(&value) {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Dotted paths of unknown keys. An unknown section is reported once,
/// its children are not visited.
fn unknown_keys(value: &Value) -> Vec<String> {
    let mut unknown = Vec::new();
    collect_unknown(value, "", &mut unknown);
    unknown
}

fn collect_unknown(value: &Value, prefix: &str, unknown: &mut Vec<String>) {
    let Value::Object(map) = value else {
        return;
    };

    for (key, child) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if KNOWN_KEYS.contains(&path.as_str()) {
            collect_unknown(child, &path, unknown);
        } else {
            unknown.push(path);
        }
    }
}
