//! Shallow field patches.
//!
//! A patch is a JSON object whose keys are the camelCase field names of the
//! target. Merging replaces top-level fields and re-parses the result, so a
//! patch that does not fit the target's shape is rejected as a whole.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub type Patch = Map<String, Value>;

/// Merge `patch` over `target`, never touching `protected` keys.
pub fn merge<T>(target: &T, patch: &Patch, protected: &[&str]) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(target)?;

    if let Value::Object(fields) = &mut value {
        for (key, field) in patch {
            if protected.contains(&key.as_str()) {
                continue;
            }
            fields.insert(key.clone(), field.clone());
        }
    }

    serde_json::from_value(value)
}

/// Build a patch from `key => value` pairs
#[macro_export]
macro_rules! patch {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut patch = $crate::Patch::new();
        $(patch.insert($key.to_string(), $crate::serde_json::json!($value));)*
        patch
    }};
}
