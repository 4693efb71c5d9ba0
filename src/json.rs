use std::borrow::Cow;

use serde_json::Value;

/// Pretty-prints `raw` as indented JSON.
///
/// Bytes that do not parse as JSON are returned verbatim.
pub fn pretty(raw: &[u8]) -> Cow<'_, [u8]> {
    match serde_json::from_slice::<Value>(raw).and_then(|value| serde_json::to_vec_pretty(&value)) {
        Ok(pretty) => Cow::Owned(pretty),
        Err(_) => Cow::Borrowed(raw),
    }
}
