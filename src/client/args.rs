//! `key value` argument pairs for `call-tool`.

use serde_json::{Map, Value};

/// Pair up `key value` arguments. Each value is parsed as JSON, falling back
/// to a plain string, so `true`, `10` and `{"a":1}` keep their types. A
/// trailing key without a value is ignored.
pub fn parse_params(args: &[String]) -> Map<String, Value> {
    args.chunks_exact(2)
        .map(|pair| {
            let value = serde_json::from_str(&pair[1])
                .unwrap_or_else(|_| Value::String(pair[1].clone()));
            (pair[0].clone(), value)
        })
        .collect()
}
