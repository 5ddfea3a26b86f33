//! Structured context merged into agent prompts.

use serde_json::Value;
use std::collections::BTreeMap;

/// Key-sorted structured input for a prompt.
///
/// A `BTreeMap` keeps iteration order deterministic, which in turn keeps
/// rendered prompts stable across runs.
pub type Context = BTreeMap<String, Value>;

/// Merge `overlay` on top of `base`. Keys present in both take the overlay value.
pub fn merge_context(base: &Context, overlay: Option<&Context>) -> Context {
    let mut merged = base.clone();
    if let Some(overlay) = overlay {
        merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_wins_on_collision() {
        let base = Context::from([
            ("a".to_string(), json!("from-base")),
            ("b".to_string(), json!(1)),
        ]);
        let overlay = Context::from([("a".to_string(), json!("from-overlay"))]);

        let merged = merge_context(&base, Some(&overlay));
        assert_eq!(merged["a"], json!("from-overlay"));
        assert_eq!(merged["b"], json!(1));
    }

    #[test]
    fn test_no_overlay() {
        let base = Context::from([("a".to_string(), json!(true))]);
        assert_eq!(merge_context(&base, None), base);
    }
}
