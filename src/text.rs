//! Defensive text coercion shared by every analyzer.

use serde_json::Value;
use tracing::debug;

/// Coerces any JSON value to text without lowercasing.
///
/// Strings pass through unchanged. Other values are rendered on a
/// best-effort basis and a diagnostic tagged with `context` is logged.
pub fn coerce(input: &Value, context: &str) -> String {
    match input {
        Value::String(s) => s.clone(),
        Value::Null => {
            debug!(context, "Expected text, got null; using empty string");
            String::new()
        }
        Value::Bool(b) => {
            debug!(context, "Expected text, got boolean; rendering as text");
            b.to_string()
        }
        Value::Number(n) => {
            debug!(context, "Expected text, got number; rendering as text");
            n.to_string()
        }
        Value::Array(items) => {
            debug!(context, "Expected text, got array; joining elements");
            items
                .iter()
                .map(|item| coerce(item, context))
                .collect::<Vec<_>>()
                .join(" ")
        }
        Value::Object(_) => {
            debug!(context, "Expected text, got object; rendering as JSON");
            input.to_string()
        }
    }
}

/// Coerces any JSON value to lowercase text. Never fails.
pub fn normalize(input: &Value, context: &str) -> String {
    coerce(input, context).to_lowercase()
}

/// Lowercases text that is already a string.
pub fn normalize_str(input: &str) -> String {
    input.to_lowercase()
}

/// Joins the non-blank parts with newlines, preserving order.
pub fn join_nonblank<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_lowercases_strings() {
        assert_eq!(normalize(&json!("We BELIEVE"), "test"), "we believe");
    }

    #[test]
    fn normalize_null_is_empty() {
        assert_eq!(normalize(&Value::Null, "test"), "");
    }

    #[test]
    fn normalize_numbers_and_bools() {
        assert_eq!(normalize(&json!(42), "test"), "42");
        assert_eq!(normalize(&json!(true), "test"), "true");
    }

    #[test]
    fn normalize_array_joins_elements() {
        assert_eq!(normalize(&json!(["Pain", 3, null]), "test"), "pain 3 ");
    }

    #[test]
    fn normalize_object_renders_json() {
        assert_eq!(normalize(&json!({"A": 1}), "test"), r#"{"a":1}"#);
    }

    #[test]
    fn join_nonblank_skips_empty_parts() {
        assert_eq!(join_nonblank(["a", " ", "", "b"]), "a\nb");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_string_is_lowercase_of_input(s in ".*") {
                prop_assert_eq!(normalize(&Value::String(s.clone()), "prop"), s.to_lowercase());
            }

            #[test]
            fn normalize_is_idempotent(s in "[a-zA-Z0-9 $€£%.,]*") {
                let once = normalize_str(&s);
                prop_assert_eq!(normalize_str(&once), once.clone());
            }
        }
    }
}
