#![forbid(unsafe_code)]

//! Property maps passed from a parent into a binding and on to the wrapped
//! component.
//!
//! Values are [`serde_json::Value`], so props can carry scalars, lists and
//! nested objects without a bespoke value enum. Keys iterate in sorted order.
//!
//! # Merge rule
//!
//! | Key present in      | Rendered value   |
//! |---------------------|------------------|
//! | state only          | state value      |
//! | props only          | props value      |
//! | state and props     | **props value**  |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An immutable-by-convention mapping from prop name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props {
    entries: Map<String, Value>,
}

/// State produced by a binding's transform. Same shape as [`Props`].
pub type DerivedState = Props;

impl Props {
    /// Empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value. Returns `None` unless the value is an object.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(entries) => Some(Self { entries }),
            _ => None,
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// View the mapping as a JSON object value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

impl From<Map<String, Value>> for Props {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Merge derived state with parent props for rendering.
///
/// Every state entry is copied first, then every props entry; props win on
/// key collision. Neither input is modified.
#[must_use]
pub fn merge_render_props(state: &DerivedState, props: &Props) -> Props {
    let mut entries = state.entries.clone();
    for (key, value) in &props.entries {
        entries.insert(key.clone(), value.clone());
    }
    Props { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn from_json_accepts_objects_only() {
        assert!(Props::from_json(json!({"id": 1})).is_some());
        assert!(Props::from_json(json!([1, 2])).is_none());
        assert!(Props::from_json(json!(null)).is_none());
    }

    #[test]
    fn merge_props_win_on_collision() {
        let state = Props::new().with("count", 3).with("id", 0);
        let props = Props::new().with("id", 1);
        let merged = merge_render_props(&state, &props);
        assert_eq!(merged, Props::new().with("count", 3).with("id", 1));
    }

    #[test]
    fn merge_keeps_disjoint_keys() {
        let state = Props::new().with("a", "x");
        let props = Props::new().with("b", true);
        let merged = merge_render_props(&state, &props);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("a"), Some(&json!("x")));
        assert_eq!(merged.get("b"), Some(&json!(true)));
    }

    #[test]
    fn merge_does_not_touch_inputs() {
        let state = Props::new().with("k", 1);
        let props = Props::new().with("k", 2);
        let _ = merge_render_props(&state, &props);
        assert_eq!(state.get("k"), Some(&json!(1)));
        assert_eq!(props.get("k"), Some(&json!(2)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let props = Props::new().with("id", 7);
        assert_eq!(serde_json::to_value(&props).unwrap(), json!({"id": 7}));
        let back: Props = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn collect_from_pairs() {
        let props: Props = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(props.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    fn small_props() -> impl Strategy<Value = Props> {
        proptest::collection::btree_map("[a-e]", any::<i64>(), 0..6)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn merged_value_is_props_value_when_present(state in small_props(), props in small_props()) {
            let merged = merge_render_props(&state, &props);
            for (key, value) in merged.iter() {
                match props.get(key) {
                    Some(p) => prop_assert_eq!(value, p),
                    None => prop_assert_eq!(Some(value), state.get(key)),
                }
            }
            for key in state.keys().chain(props.keys()) {
                prop_assert!(merged.contains_key(key));
            }
        }
    }
}
